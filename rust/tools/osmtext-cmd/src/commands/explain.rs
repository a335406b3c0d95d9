//! Explain command implementation

use anyhow::{Context, Result};
use serde::Serialize;

use osmtext_index::{LetterRunTokenizer, PreparedQuery};

use crate::commands::{open_session, runtime};

#[derive(Debug, Serialize)]
struct Explanation {
    query: String,
    tokens: Vec<String>,
    eligible_tokens: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shard_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shard_location: Option<String>,
    token_length: usize,
    stop_words: Vec<String>,
}

pub fn run(base: String, query: String) -> Result<()> {
    let explanation = explain(&base, &query)?;
    println!("{}", serde_json::to_string_pretty(&explanation)?);
    Ok(())
}

fn explain(base: &str, query: &str) -> Result<Explanation> {
    runtime()?.block_on(async {
        let session = open_session(base)?;
        let config = session
            .ready()
            .await
            .with_context(|| format!("Failed to load index metadata from {}", session.base()))?;

        let prepared = PreparedQuery::new(&LetterRunTokenizer::new(), query);
        let shard_key = prepared.shard_key(&config).ok();
        let shard_location = match &shard_key {
            Some(key) => Some(session.base().resolve(&key.file_name())?),
            None => None,
        };
        let mut stop_words: Vec<String> = config.stop_words().iter().cloned().collect();
        stop_words.sort();

        Ok(Explanation {
            query: prepared.text().to_string(),
            tokens: prepared.tokens().to_vec(),
            eligible_tokens: prepared
                .eligible_tokens(&config)
                .map(str::to_owned)
                .collect(),
            shard_key: shard_key.map(|k| k.to_string()),
            shard_location,
            token_length: config.min_token_length(),
            stop_words,
        })
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::commands::tests::write_shard_set;

    use super::explain;

    #[test]
    fn test_explain_selected_shard() {
        let dir = TempDir::new().unwrap();
        write_shard_set(dir.path());

        let explanation = explain(dir.path().to_str().unwrap(), "The Main St.").unwrap();
        assert_eq!(explanation.tokens, vec!["the", "main", "st", ""]);
        assert_eq!(explanation.eligible_tokens, vec!["main"]);
        assert_eq!(explanation.shard_key.as_deref(), Some("mai"));
        assert!(explanation.shard_location.unwrap().ends_with("/mai.json"));
        assert_eq!(explanation.token_length, 3);
        assert_eq!(explanation.stop_words, vec!["the"]);
    }

    #[test]
    fn test_explain_without_eligible_token() {
        let dir = TempDir::new().unwrap();
        write_shard_set(dir.path());

        let explanation = explain(dir.path().to_str().unwrap(), "the 12 st").unwrap();
        assert_eq!(explanation.tokens, vec!["the", "st"]);
        assert!(explanation.eligible_tokens.is_empty());
        assert!(explanation.shard_key.is_none());
        assert!(explanation.shard_location.is_none());

        let json = serde_json::to_value(&explanation).unwrap();
        assert!(json.get("shard_key").is_none());
    }

    #[test]
    fn test_explain_missing_shard_set() {
        let dir = TempDir::new().unwrap();
        assert!(explain(dir.path().join("nowhere").to_str().unwrap(), "main").is_err());
    }
}
