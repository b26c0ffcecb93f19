//! Numeric transaction references

use rand::rngs::OsRng;
use rand::Rng;

/// Default reference length
pub const DEFAULT_REFERENCE_LENGTH: usize = 6;

/// Generator of zero-padded numeric transaction references
#[derive(Debug, Clone, Copy, Default)]
pub struct Reference;

impl Reference {
    pub fn new() -> Self {
        Self
    }

    /// Generate a reference of `len` digits.
    ///
    /// A supplied `number` is left-padded with zeros to `len`; numbers with
    /// more digits are returned whole. Without a number, a value is drawn
    /// uniformly from `[0, 10^len - 1]` using the operating system CSPRNG.
    pub fn generate(&self, len: usize, number: Option<u64>) -> String {
        match number {
            Some(number) => format!("{:0>width$}", number, width = len),
            None => random_digits(len),
        }
    }

    /// A random 6-digit reference
    pub fn generate_default(&self) -> String {
        self.generate(DEFAULT_REFERENCE_LENGTH, None)
    }
}

// One uniform digit per position is uniform over the whole padded range.
fn random_digits(len: usize) -> String {
    if len == 0 {
        return "0".to_string();
    }

    let mut rng = OsRng;
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}
