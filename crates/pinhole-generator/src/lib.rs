//! Short code generators.
//!
//! Generators here never talk to storage; checking a code against the
//! repository is the shortener's job.

mod clock;
pub mod seed;

pub use clock::{Clock, SystemClock};
pub use seed::{ClockSeed, SeedSource, SequenceSeed};

use pinhole_core::base62;
use pinhole_core::ShortCode;
use typed_builder::TypedBuilder;

/// Trait for generating short codes.
///
/// Implementations are pure generators that don't interact with storage.
pub trait Generator: Send + Sync + 'static {
    /// Produces the next candidate short code.
    ///
    /// Candidates should rarely repeat, but callers must still check them
    /// against storage.
    fn generate(&self) -> ShortCode;
}

/// Length policy for generated codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeLength {
    /// Plain base-62 of the seed; length grows with the seed's magnitude.
    Variable,
    /// Exactly this many characters: the seed is reduced modulo `62^n` and
    /// left-padded with `0`.
    Fixed(u8),
}

/// Codes are 8 characters unless configured otherwise.
pub const DEFAULT_CODE_LENGTH: u8 = 8;

/// Longest fixed length that still yields a valid [`ShortCode`].
pub const MAX_CODE_LENGTH: u8 = pinhole_core::shortcode::MAX_LENGTH as u8;

impl CodeLength {
    /// Maps a configured length to a policy, with `0` meaning variable.
    ///
    /// Returns `None` for lengths above [`MAX_CODE_LENGTH`].
    pub fn from_len(len: u8) -> Option<Self> {
        match len {
            0 => Some(CodeLength::Variable),
            n if n <= MAX_CODE_LENGTH => Some(CodeLength::Fixed(n)),
            _ => None,
        }
    }
}

impl Default for CodeLength {
    fn default() -> Self {
        CodeLength::Fixed(DEFAULT_CODE_LENGTH)
    }
}

/// Encodes seeds from a [`SeedSource`] as base-62 short codes.
#[derive(Debug, TypedBuilder)]
pub struct Base62Generator<S> {
    seed: S,
    #[builder(default)]
    length: CodeLength,
}

impl<S: SeedSource> Base62Generator<S> {
    pub fn new(seed: S) -> Self {
        Self {
            seed,
            length: CodeLength::default(),
        }
    }

    pub fn length(&self) -> CodeLength {
        self.length
    }

    fn encode(&self, seed: u64) -> String {
        match self.length {
            CodeLength::Variable => base62::encode(seed),
            CodeLength::Fixed(width) => {
                let width = width.min(MAX_CODE_LENGTH);
                let reduced = match base62::code_space(u32::from(width)) {
                    Some(space) => seed % space,
                    // every u64 already fits in this many digits
                    None => seed,
                };
                base62::encode_padded(reduced, usize::from(width))
            }
        }
    }
}

impl<S: SeedSource> Generator for Base62Generator<S> {
    fn generate(&self) -> ShortCode {
        ShortCode::new_unchecked(self.encode(self.seed.next_seed()))
    }
}
