use osmtext_common::{Result, error::Error};

use crate::{config::IndexConfig, shard::ShardKey, tokenizers::Tokenizer};

/// A query tokenized once, reused for shard selection and matching.
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    text: String,
    tokens: Vec<String>,
}

impl PreparedQuery {
    pub fn new<T: Tokenizer>(tokenizer: &T, text: &str) -> PreparedQuery {
        PreparedQuery {
            text: text.to_string(),
            tokens: tokenizer.tokens(text),
        }
    }

    /// The query as given by the caller.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// All tokens, in query order, including empty boundary tokens.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The tokens used for matching.
    ///
    /// Empty tokens are discarded: an empty prefix would match every name.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str).filter(|t| !t.is_empty())
    }

    /// Tokens that may select a shard under `config`, in query order.
    pub fn eligible_tokens<'a>(
        &'a self,
        config: &'a IndexConfig,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.terms().filter(move |t| config.is_eligible(t))
    }

    /// Derives the shard key from the first eligible token.
    ///
    /// # Errors
    ///
    /// Returns `ErrorKind::InsufficientQuery` when no token is eligible.
    pub fn shard_key(&self, config: &IndexConfig) -> Result<ShardKey> {
        self.terms()
            .find_map(|t| config.shard_key(t))
            .ok_or_else(|| Error::insufficient_query(&self.text))
    }
}

#[cfg(test)]
mod tests {
    use crate::{config::IndexConfig, tokenizers::LetterRunTokenizer};

    use super::PreparedQuery;

    fn prepare(text: &str) -> PreparedQuery {
        PreparedQuery::new(&LetterRunTokenizer::new(), text)
    }

    #[test]
    fn test_terms_skip_empty_tokens() {
        let query = prepare("  Main St. ");
        assert_eq!(query.tokens(), ["", "main", "st", ""]);
        assert_eq!(query.terms().collect::<Vec<_>>(), vec!["main", "st"]);
    }

    #[test]
    fn test_first_eligible_token_wins() {
        let config = IndexConfig::new(["the"], 3).unwrap();
        let query = prepare("the st northern parkway");
        assert_eq!(query.shard_key(&config).unwrap().as_str(), "nor");
        assert_eq!(
            query.eligible_tokens(&config).collect::<Vec<_>>(),
            vec!["northern", "parkway"]
        );
    }

    #[test]
    fn test_insufficient_query() {
        let config = IndexConfig::new(["the"], 3).unwrap();
        for text in ["the a", "", "12 34", "st", "The"] {
            let err = prepare(text).shard_key(&config).unwrap_err();
            assert!(err.is_insufficient_query(), "{text:?}");
        }
    }

    #[test]
    fn test_same_prefix_same_shard() {
        let config = IndexConfig::default();
        let a = prepare("main").shard_key(&config).unwrap();
        let b = prepare("12 Maison").shard_key(&config).unwrap();
        assert_eq!(a, b);
    }
}
