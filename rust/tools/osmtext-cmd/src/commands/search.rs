use anyhow::{Context, Result};
use std::io::{self, Write};

use crate::commands::{open_session, runtime};

pub fn run(base: String, query: String, limit: Option<usize>) -> Result<()> {
    let mut out = io::stdout().lock();
    let omitted = search(&base, &query, limit, &mut out)?;
    if omitted > 0 {
        eprintln!("({omitted} more matches not shown)");
    }
    Ok(())
}

/// Writes up to `limit` matches to `out` as JSON lines and returns the number
/// of matches left out.
fn search(
    base: &str,
    query: &str,
    limit: Option<usize>,
    out: &mut impl Write,
) -> Result<usize> {
    runtime()?.block_on(async {
        let session = open_session(base)?;
        let results = session.search(query).await.with_context(|| {
            format!("Search for {query:?} in {} failed", session.base())
        })?;

        let limit = limit.unwrap_or(usize::MAX);
        for entry in results.iter().take(limit) {
            writeln!(out, "{}", serde_json::to_string(entry)?)?;
        }
        Ok(results.len().saturating_sub(limit))
    })
}
