//! Directory-backed collection store: one GeoJSON file per bucket.

use super::CollectionStore;
use crate::config::Config;
use crate::error::{Result, RoadIndexError};
use geojson::FeatureCollection;
use log::debug;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Collections stored as `{prefix}{bucket}.{extension}` files in one directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    dir: PathBuf,
    config: Config,
}

impl DirectoryStore {
    pub fn new<P: AsRef<Path>>(dir: P, config: &Config) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            config: config.clone(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `bucket`.
    pub fn path_for(&self, bucket: &str) -> PathBuf {
        self.config.collection_path(&self.dir, bucket)
    }
}

impl CollectionStore for DirectoryStore {
    fn load(&self, bucket: &str) -> Result<Option<FeatureCollection>> {
        let path = self.path_for(bucket);
        if !path.exists() {
            return Ok(None);
        }
        read_collection(&path).map(Some)
    }

    fn store(&mut self, bucket: &str, collection: &FeatureCollection) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| RoadIndexError::io(&self.dir, e))?;
        write_collection(self.path_for(bucket), collection)
    }

    fn contains(&self, bucket: &str) -> bool {
        self.path_for(bucket).is_file()
    }
}

/// Read a GeoJSON FeatureCollection from `path`.
pub fn read_collection<P: AsRef<Path>>(path: P) -> Result<FeatureCollection> {
    let path = path.as_ref();
    debug!("reading collection {}", path.display());

    let file = File::open(path).map_err(|e| RoadIndexError::io(path, e))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| RoadIndexError::decode(path, e))
}

/// Write `collection` to `path` as compact GeoJSON.
///
/// The file is written next to its destination and renamed into place, so
/// a failed write never leaves a truncated collection behind.
pub fn write_collection<P: AsRef<Path>>(path: P, collection: &FeatureCollection) -> Result<()> {
    let path = path.as_ref();
    debug!(
        "writing {} features to {}",
        collection.features.len(),
        path.display()
    );

    write_atomic(path, |writer| {
        serde_json::to_writer(writer, collection)?;
        Ok(())
    })
}

/// Write through a temporary sibling file and rename it over `path`.
pub(crate) fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let temp_path = temp_path(path);

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| RoadIndexError::io(&temp_path, e))?;

    let mut writer = BufWriter::new(file);
    let result = write(&mut writer).and_then(|()| {
        writer
            .flush()
            .map_err(|e| RoadIndexError::io(&temp_path, e))
    });

    if let Err(e) = result {
        drop(writer);
        let _ = std::fs::remove_file(&temp_path);
        return Err(e);
    }
    drop(writer);

    std::fs::rename(&temp_path, path).map_err(|e| RoadIndexError::io(path, e))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut temp = path.to_path_buf();
    if let Some(name) = temp.file_name() {
        let mut new_name = name.to_string_lossy().into_owned();
        new_name.push_str(".tmp");
        temp.set_file_name(new_name);
    }
    temp
}
