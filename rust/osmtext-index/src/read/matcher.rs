//! Prefix matching of query terms against candidate names.

use crate::{entry::AddressEntry, read::query::PreparedQuery, tokenizers::Tokenizer};

/// Returns `true` if every term is a prefix of at least one token of `name`.
pub fn name_matches<T: Tokenizer>(tokenizer: &T, terms: &[&str], name: &str) -> bool {
    let normalized = tokenizer.normalize(name);
    let candidates: Vec<&str> = tokenizer.tokenize(&normalized).collect();
    terms
        .iter()
        .all(|term| candidates.iter().any(|token| token.starts_with(term)))
}

/// Returns the entries whose names match every term of `query`, in their
/// original order.
pub fn filter_entries<T: Tokenizer>(
    tokenizer: &T,
    query: &PreparedQuery,
    entries: &[AddressEntry],
) -> Vec<AddressEntry> {
    let terms: Vec<&str> = query.terms().collect();
    entries
        .iter()
        .filter(|entry| name_matches(tokenizer, &terms, &entry.name))
        .cloned()
        .collect()
}
