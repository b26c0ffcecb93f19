//! Compatibility wrappers around [`PayloadGenerator`](crate::payload::PayloadGenerator)
//!
//! Older integrations built payloads through one helper per flow. Each
//! helper owns a generator and forwards to it; new code should
//! use the generator directly.

pub mod direct;
pub mod redirect;

pub use direct::{DirectMethod, SimpleDirectMethod};
pub use redirect::{RedirectMethod, SimpleRedirectMethod};
