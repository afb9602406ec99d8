//! File read/write helpers used by every stage service.

use super::{StoreError, StoreResult};
use crate::model::entry::HeatmapEntry;
use log::{debug, error, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::{File, Permissions};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

/// Indentation of pretty-printed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonIndent {
    /// Heatmap datasets.
    Two,
    /// Raw data snapshot.
    Four,
}

impl JsonIndent {
    fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Two => b"  ",
            Self::Four => b"    ",
        }
    }
}

/// Reads and decodes one JSON document.
///
/// # Errors
/// - `NotFound` when the file is missing.
/// - `Io` for other read failures, `Json` for decode failures.
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> StoreResult<T> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => StoreError::NotFound {
            path: path.to_path_buf(),
        },
        _ => StoreError::Io {
            path: path.to_path_buf(),
            source: err,
        },
    })?;

    let value = serde_json::from_reader(BufReader::new(file)).map_err(|err| {
        error!(
            "event=json_read module=store status=error path={} error={}",
            path.display(),
            err
        );
        StoreError::Json {
            path: path.to_path_buf(),
            source: err,
        }
    })?;
    debug!("event=json_read module=store status=ok path={}", path.display());
    Ok(value)
}

/// Reads a heatmap dataset (JSON array of entries).
pub fn read_entries(path: impl AsRef<Path>) -> StoreResult<Vec<HeatmapEntry>> {
    read_json(path)
}

/// Atomically replaces `path` with the pretty-printed JSON of `value`.
///
/// # Side effects
/// - Creates the parent directory when missing.
/// - Emits `json_write` events with duration and status.
pub fn write_json<T: Serialize + ?Sized>(
    path: impl AsRef<Path>,
    value: &T,
    indent: JsonIndent,
) -> StoreResult<()> {
    let path = path.as_ref();
    let started_at = Instant::now();

    let result = replace_atomically(path, |writer| {
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        value
            .serialize(&mut serializer)
            .map_err(std::io::Error::from)
    });

    match &result {
        Ok(()) => info!(
            "event=json_write module=store status=ok path={} duration_ms={}",
            path.display(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=json_write module=store status=error path={} duration_ms={} error={}",
            path.display(),
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

/// Writes a heatmap dataset with two-space indentation.
pub fn write_entries(path: impl AsRef<Path>, entries: &[HeatmapEntry]) -> StoreResult<()> {
    write_json(path, entries, JsonIndent::Two)
}

/// Atomically replaces `path` with one line per item.
pub fn write_lines<I, S>(path: impl AsRef<Path>, lines: I) -> StoreResult<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    let result = replace_atomically(path, |writer| {
        for line in lines {
            writer.write_all(line.as_ref().as_bytes())?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    });
    if let Err(err) = &result {
        error!(
            "event=lines_write module=store status=error path={} error={}",
            path.display(),
            err
        );
    }
    result
}

fn replace_atomically<F>(path: &Path, write: F) -> StoreResult<()>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> std::io::Result<()>,
{
    let io_error = |source: std::io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = parent_dir(path);
    std::fs::create_dir_all(&dir).map_err(io_error)?;

    let mut temp = NamedTempFile::new_in(&dir).map_err(io_error)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write(&mut writer).map_err(io_error)?;
        writer.flush().map_err(io_error)?;
    }
    if let Some(permissions) = target_permissions(path).map_err(io_error)? {
        temp.as_file().set_permissions(permissions).map_err(io_error)?;
    }
    temp.as_file().sync_all().map_err(io_error)?;
    temp.persist(path).map_err(|err| io_error(err.error))?;
    Ok(())
}

/// Mode the replaced file should carry: the existing file's, or the usual
/// 0644 for a new file. Temp files start out as 0600.
fn target_permissions(path: &Path) -> std::io::Result<Option<Permissions>> {
    match std::fs::metadata(path) {
        Ok(metadata) => Ok(Some(metadata.permissions())),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(new_file_permissions()),
        Err(err) => Err(err),
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
