//! Tokenizers for extracting terms from address names and queries.
//!
//! The same tokenizer is used in two places, and must behave identically in both:
//!
//! 1. **Shard set writing**: every token of an address name that is long enough
//!    (and not a stop word) places the address into the shard named after the
//!    token's prefix.
//! 2. **Query processing**: query tokens select the shard to load, and are then
//!    prefix-matched against the tokens of every candidate name.
//!
//! Tokenization is two-step: [`Tokenizer::normalize`] produces an owned,
//! lowercased string, and [`Tokenizer::tokenize`] returns an iterator of
//! string slices over it to avoid per-token allocations.

pub mod letter_run;

pub use letter_run::LetterRunTokenizer;

/// A tokenizer extracts terms (tokens) from normalized string values.
pub trait Tokenizer: Send + Sync {
    /// The iterator type returned by tokenize.
    type TokenIter<'a>: Iterator<Item = &'a str>
    where
        Self: 'a;

    /// Extract terms from the (already normalized) input string as an iterator
    /// of string slices.
    fn tokenize<'a>(&'a self, input: &'a str) -> Self::TokenIter<'a>;

    /// Normalizes raw text before tokenization.
    fn normalize(&self, input: &str) -> String {
        input.to_lowercase()
    }

    /// Normalizes and tokenizes `input` into owned tokens.
    fn tokens(&self, input: &str) -> Vec<String> {
        let normalized = self.normalize(input);
        self.tokenize(&normalized).map(str::to_owned).collect()
    }
}

/// Number of Unicode scalar values in `input`.
///
/// Token lengths and shard-key prefixes are measured in characters, not bytes.
pub fn char_len(input: &str) -> usize {
    input.chars().count()
}

/// Returns the prefix of `input` holding at most `count` characters.
///
/// The result always ends at a UTF-8 character boundary.
pub fn char_prefix(input: &str, count: usize) -> &str {
    match input.char_indices().nth(count) {
        Some((boundary, _)) => &input[..boundary],
        None => input,
    }
}
