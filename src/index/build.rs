use crate::error::{Error, IoContext, Result};
use crate::index::encoding::encode_record;
use crate::index::types::{BuildStats, PackageRecord};
use crate::utils::progress::spinner;
use crate::utils::{AtomicFile, CacheDir};
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Rebuild the cache directory's index from its installed source document
pub fn build_from_cache(cache: &CacheDir) -> Result<BuildStats> {
    build_index(&cache.source_document(), &cache.index_path())
}

/// Compact the bulk document at `source` into a fresh index at `index_path`.
///
/// The new index is written beside the old one and renamed into place only
/// after the last record is flushed, so a failed build leaves the previous
/// index intact.
pub fn build_index(source: &Path, index_path: &Path) -> Result<BuildStats> {
    info!("[Build] reading {}", source.display());
    let data = fs::read_to_string(source).at(source)?;

    info!("[Build] parsing JSON");
    let parse_spinner = spinner("Parsing JSON...");
    let start = Instant::now();
    let document = parse_document(source, &data);
    parse_spinner.finish_and_clear();
    let document = document?;
    debug!(elapsed = ?start.elapsed(), entries = document.len(), "parseJSON");

    info!("[Build] building database");
    let build_spinner = spinner("Building database...");
    let start = Instant::now();
    let stats = write_index(&document, index_path);
    build_spinner.finish_and_clear();
    let stats = stats?;
    debug!(elapsed = ?start.elapsed(), records = stats.records, bytes = stats.bytes, "buildDB");

    info!(
        "[Build] wrote {} records to {}",
        stats.records,
        index_path.display()
    );
    Ok(stats)
}

/// Parse the bulk document; only a top-level JSON object is accepted
fn parse_document(source: &Path, data: &str) -> Result<Map<String, Value>> {
    let parse_error = |message: String| Error::Parse {
        path: source.to_path_buf(),
        message,
    };

    match serde_json::from_str::<Value>(data) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(parse_error(format!(
            "expected a JSON object, found {}",
            json_type_name(&other)
        ))),
        Err(e) => Err(parse_error(e.to_string())),
    }
}

/// Stream one encoded line per entry, in document order
fn write_index(document: &Map<String, Value>, index_path: &Path) -> Result<BuildStats> {
    let mut out = AtomicFile::create(index_path)?;
    let temp = out.temp_path().to_path_buf();

    let mut records = 0;
    let mut non_objects = 0;
    for (key, value) in document {
        if !value.is_object() {
            warn!(key = key.as_str(), "entry is not an object, writing an empty record");
            non_objects += 1;
        }
        let line = encode_record(&PackageRecord::from_value(value));
        out.write_all(line.as_bytes()).at(&temp)?;
        out.write_all(b"\n").at(&temp)?;
        records += 1;
    }

    let bytes = out.bytes_written();
    out.commit()?;

    Ok(BuildStats {
        records,
        non_objects,
        bytes,
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
