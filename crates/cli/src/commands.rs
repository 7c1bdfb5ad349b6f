//! Subcommand implementations.

use anyhow::Context;
use roadindex::{
    Config, DirectoryStore, SearchQuery, index_store, read_collection, read_index, split_to_store,
    write_index,
};
use std::io::Write;
use std::path::Path;
use tracing::info;

pub fn split(config: &Config, input: &Path, out_dir: &Path) -> anyhow::Result<()> {
    info!("Reading {}", input.display());
    let collection = read_collection(input)?;

    let mut store = DirectoryStore::new(out_dir, config);
    let report = split_to_store(collection, config, &mut store)
        .with_context(|| format!("Failed to split {}", input.display()))?;

    info!(
        "Wrote {} buckets with {} features to {}",
        report.buckets.len(),
        report.total(),
        out_dir.display()
    );
    Ok(())
}

pub fn index(config: &Config, dir: &Path, output: &Path) -> anyhow::Result<()> {
    let store = DirectoryStore::new(dir, config);
    let report = index_store(&store, config)
        .with_context(|| format!("Failed to build index from {}", dir.display()))?;

    let size = write_index(output, &report.index)?;
    info!("Index written: {}", output.display());
    info!("Entries: {}", report.index.len());
    info!("File size: {:.1} KB", size as f64 / 1024.0);
    Ok(())
}

pub fn search<W: Write>(index_path: &Path, query: &SearchQuery, out: &mut W) -> anyhow::Result<()> {
    let index = read_index(index_path)?;
    let results = roadindex::search(&index, query);

    for entry in &results {
        serde_json::to_writer(&mut *out, entry)?;
        writeln!(out)?;
    }

    info!("{} result(s)", results.len());
    Ok(())
}
