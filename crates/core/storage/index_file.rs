//! Reading and writing the search index file.
//!
//! The file is a compact JSON array of
//! `{"name":..,"fclass":..,"ref":..,"bbox":[min_lng,min_lat,max_lng,max_lat]}`
//! records with no whitespace and non-ASCII text written as UTF-8.

use super::directory::write_atomic;
use crate::error::{Result, RoadIndexError};
use log::info;
use roadindex_types::index::SearchIndex;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Serialize `index` in the index file layout.
pub fn index_to_json(index: &SearchIndex) -> Result<String> {
    Ok(serde_json::to_string(index)?)
}

/// Write `index` to `path`, returning the size of the written file in bytes.
pub fn write_index<P: AsRef<Path>>(path: P, index: &SearchIndex) -> Result<u64> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| RoadIndexError::io(parent, e))?;
    }

    write_atomic(path, |writer| {
        serde_json::to_writer(writer, index)?;
        Ok(())
    })?;

    let size = std::fs::metadata(path)
        .map_err(|e| RoadIndexError::io(path, e))?
        .len();
    info!(
        "wrote {} index entries to {} ({:.1} KB)",
        index.len(),
        path.display(),
        size as f64 / 1024.0
    );
    Ok(size)
}

/// Read an index file written by [`write_index`].
pub fn read_index<P: AsRef<Path>>(path: P) -> Result<SearchIndex> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| RoadIndexError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| RoadIndexError::decode(path, e))
}
