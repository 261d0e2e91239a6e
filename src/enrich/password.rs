//! Temporary credential generation.
//!
//! Passwords satisfy the usual directory-service complexity rule: at least one
//! uppercase letter, lowercase letter, digit, and punctuation symbol.

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};

use crate::config::{MIN_PASSWORD_LENGTH, check_password_length};
use crate::error::Result;

pub const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
pub const DIGITS: &[u8] = b"0123456789";
/// ASCII punctuation, the full printable symbol range.
pub const PUNCTUATION: &[u8] = b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

const CLASSES: [&[u8]; 4] = [UPPERCASE, LOWERCASE, DIGITS, PUNCTUATION];

/// Generates complexity-compliant passwords of a fixed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordGenerator {
    length: usize,
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self {
            length: MIN_PASSWORD_LENGTH,
        }
    }
}

impl PasswordGenerator {
    /// Fails with `InvalidConfig` when `length` is outside the accepted range.
    pub fn new(length: usize) -> Result<Self> {
        check_password_length(length)?;
        Ok(Self { length })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Generates a password from the operating system's CSPRNG.
    pub fn generate(&self) -> String {
        self.generate_with(&mut OsRng)
    }

    /// Generates a password from the supplied cryptographic RNG.
    ///
    /// One character is drawn from each class, the rest from their union, and
    /// the whole sequence is shuffled so the guaranteed characters do not sit
    /// at fixed positions.
    pub fn generate_with<R: Rng + CryptoRng + ?Sized>(&self, rng: &mut R) -> String {
        let mut password: Vec<u8> = Vec::with_capacity(self.length);
        for class in CLASSES {
            password.push(pick(rng, class));
        }

        let pool: Vec<u8> = CLASSES.concat();
        while password.len() < self.length {
            password.push(pick(rng, &pool));
        }

        password.shuffle(rng);
        password.into_iter().map(char::from).collect()
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, set: &[u8]) -> u8 {
    set[rng.gen_range(0..set.len())]
}
