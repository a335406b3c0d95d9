//! Index command implementation

use anyhow::{Context, Result};
use log::info;
use std::{fs::File, io::BufReader, path::Path};

use osmtext_index::{IndexConfig, ShardSetWriter, write::input::JsonLines};

use crate::utils;

/// Run the index command
pub fn run(
    input: String,
    output_dir: String,
    token_length: usize,
    stopwords: Option<String>,
    max_pending_shards: Option<usize>,
) -> Result<()> {
    utils::validate_file_exists(&input)?;
    let stop_words = utils::parse_stopwords(stopwords.as_deref());
    let config = IndexConfig::new(&stop_words, token_length)
        .with_context(|| "Invalid index configuration")?;

    let mut writer = ShardSetWriter::new(Path::new(&output_dir), config)
        .with_context(|| format!("Failed to create output directory: {output_dir}"))?;
    if let Some(max) = max_pending_shards {
        writer = writer.with_max_pending_shards(max);
    }

    let file = File::open(&input).with_context(|| format!("Failed to open {input}"))?;
    for entry in JsonLines::new(BufReader::new(file)) {
        let entry = entry.with_context(|| format!("Failed to read {input}"))?;
        writer.push(entry)?;
    }

    let summary = writer.finish()?;
    info!("indexed {input} into {output_dir}");
    println!(
        "Indexed {} entries into {} shards ({} without an indexable word)",
        summary.entries, summary.shards, summary.unindexed
    );
    Ok(())
}
