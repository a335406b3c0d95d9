//! Letter Run Tokenizer - splits text on every maximal run of non-letter characters.

use std::sync::LazyLock;

use regex::Regex;

use super::Tokenizer;

/// One or more codepoints outside the Unicode `Letter` general category.
static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\P{L}+").expect("separator pattern is valid"));

/// Letter Run Tokenizer - extracts letter-only tokens from text.
///
/// A letter is any codepoint of the Unicode `Letter` general category
/// (`Lu`, `Ll`, `Lt`, `Lm`, `Lo`). Every maximal run of other codepoints
/// (spaces, digits, punctuation, symbols, letter-numbers such as `Ⅷ`,
/// combining marks) is a single separator. Separators are collapsed, not
/// retained. A leading or trailing separator produces an empty token at that
/// boundary, and an empty input produces a single empty token, so callers that
/// match on prefixes must discard empty tokens themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct LetterRunTokenizer;

impl LetterRunTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for LetterRunTokenizer {
    type TokenIter<'a> = regex::Split<'static, 'a>;

    fn tokenize<'a>(&'a self, input: &'a str) -> Self::TokenIter<'a> {
        SEPARATOR.split(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(input: &str) -> Vec<&str> {
        static TOKENIZER: LetterRunTokenizer = LetterRunTokenizer;
        TOKENIZER.tokenize(input).collect()
    }

    #[test]
    fn test_letter_run_tokenizer() {
        assert_eq!(split("main street"), vec!["main", "street"]);
        // Digits and punctuation are separators, runs are collapsed
        assert_eq!(split("rue 12, bis--avenue"), vec!["rue", "bis", "avenue"]);
        assert_eq!(split("a1b"), vec!["a", "b"]);
        // Underscore is not a letter
        assert_eq!(split("north_park"), vec!["north", "park"]);
    }

    #[test]
    fn test_boundary_empty_tokens() {
        assert_eq!(split(""), vec![""]);
        assert_eq!(split(" main st "), vec!["", "main", "st", ""]);
        assert_eq!(split("42"), vec!["", ""]);
        assert_eq!(split("...!"), vec!["", ""]);
        assert_eq!(split("12 main"), vec!["", "main"]);
    }

    #[test]
    fn test_single_word_is_idempotent() {
        for word in ["main", "straße", "北京", "москва"] {
            assert_eq!(split(word), vec![word]);
        }
    }

    #[test]
    fn test_unicode_letters() {
        assert_eq!(split("café naïve résumé"), vec!["café", "naïve", "résumé"]);
        assert_eq!(split("你好世界 2024年 北京"), vec!["你好世界", "年", "北京"]);
        assert_eq!(split("Санкт-Петербург"), vec!["Санкт", "Петербург"]);
    }

    #[test]
    fn test_only_letter_category_forms_tokens() {
        // Roman numeral letter-numbers (Nl) separate words
        assert_eq!(split("via ⅷ maggio"), vec!["via", "maggio"]);
        assert_eq!(split("ⅷⅷⅷ"), vec!["", ""]);
        // Circled letters are symbols (So)
        assert_eq!(split("ⓐⓑⓒ road"), vec!["", "road"]);
        // Devanagari vowel sign (Mc) and virama (Mn) are not letters
        assert_eq!(split("कि"), vec!["क", ""]);
        assert_eq!(split("क्ष"), vec!["क", "ष"]);
        // Modifier letters (Lm) are letters
        assert_eq!(split("ʻokina"), vec!["ʻokina"]);
    }
}
