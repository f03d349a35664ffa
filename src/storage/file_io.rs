//! File I/O utilities with atomic writes
//!
//! Every store is a full snapshot: read whole, written whole. Writes go to a
//! sibling temp file that is synced and then renamed over the target, so a
//! crash mid-write leaves the previous snapshot intact.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::TallyError;

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, TallyError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let Some(reader) = open_if_exists(path)? else {
        return Ok(T::default());
    };

    serde_json::from_reader(reader)
        .map_err(|e| TallyError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Read a bincode snapshot, returning a default value if file doesn't exist
pub fn read_bincode<T, P>(path: P) -> Result<T, TallyError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    // Decoding from a slice bounds every length prefix by the bytes present
    let bytes = fs::read(path)
        .map_err(|e| TallyError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    bincode::deserialize(&bytes)
        .map_err(|e| TallyError::Storage(format!("Failed to decode {}: {}", path.display(), e)))
}

/// Write pretty JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), TallyError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_atomic(path.as_ref(), |writer| {
        serde_json::to_writer_pretty(writer, data)
            .map_err(|e| TallyError::Storage(format!("Failed to serialize data: {}", e)))
    })
}

/// Write a bincode snapshot to a file atomically (write to temp, then rename)
pub fn write_bincode_atomic<T, P>(path: P, data: &T) -> Result<(), TallyError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_atomic(path.as_ref(), |writer| {
        bincode::serialize_into(writer, data)
            .map_err(|e| TallyError::Storage(format!("Failed to encode data: {}", e)))
    })
}

fn open_if_exists(path: &Path) -> Result<Option<BufReader<File>>, TallyError> {
    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path)
        .map_err(|e| TallyError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    Ok(Some(BufReader::new(file)))
}

/// Temp file next to `path`, e.g. `users.json` -> `users.json.tmp`
pub(crate) fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_atomic<F>(path: &Path, encode: F) -> Result<(), TallyError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), TallyError>,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            TallyError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = temp_path_for(path);

    let result = (|| {
        let file = File::create(&temp_path)
            .map_err(|e| TallyError::Storage(format!("Failed to create temp file: {}", e)))?;

        let mut writer = BufWriter::new(file);
        encode(&mut writer)?;

        writer
            .flush()
            .map_err(|e| TallyError::Storage(format!("Failed to flush data: {}", e)))?;

        writer
            .get_ref()
            .sync_all()
            .map_err(|e| TallyError::Storage(format!("Failed to sync data: {}", e)))?;

        fs::rename(&temp_path, path)
            .map_err(|e| TallyError::Storage(format!("Failed to rename temp file: {}", e)))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}
