//! Probe output normalization
//!
//! Turns the prober's JSON description of a file into a flat [`MetadataRecord`].
//! Field mappings live in [`fields`] as static tables; values that are computed
//! rather than read live in [`derived`].

mod derived;
mod fields;

pub use derived::{aspect_ratio, parse_rational, resolution_category};

use crate::error::{ExtractionError, ExtractionResult};
use fields::{
    apply_all, AUDIO_STREAM_FIELDS, CONTAINER_TAG_FIELDS, FORMAT_FIELDS, VIDEO_STREAM_FIELDS,
};
use serde_json::Value;
use std::path::PathBuf;
use vidmeta_core::MetadataRecord;

static NULL: Value = Value::Null;

/// Identity of the file the probe output describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIdentity {
    /// Name the client uploaded the file under
    pub name: String,
    /// Absolute path of the staged file that was probed
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Build a complete record from raw probe output.
///
/// Only the leading JSON value is read, so diagnostics the tool printed after
/// the document are ignored. Text that does not start with JSON fails. Absent
/// sections and fields fall back to the record defaults, and a JSON value that
/// is not an object yields a record carrying nothing but the file identity.
///
/// When a file has several streams of one kind, the last one wins.
pub fn normalize(raw: &str, identity: &FileIdentity) -> ExtractionResult<MetadataRecord> {
    let root = serde_json::Deserializer::from_str(raw)
        .into_iter::<Value>()
        .next()
        .ok_or_else(|| ExtractionError::ParseFailed("probe output is empty".to_string()))?
        .map_err(|e| ExtractionError::ParseFailed(e.to_string()))?;

    let mut record = MetadataRecord {
        file_name: identity.name.clone(),
        file_size_bytes: identity.size_bytes,
        file_path: identity.path.display().to_string(),
        ..Default::default()
    };

    let format = root.get("format").unwrap_or(&NULL);
    apply_all(FORMAT_FIELDS, &mut record, format);

    let streams = root
        .get("streams")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    for stream in streams {
        match stream.get("codec_type").and_then(Value::as_str) {
            Some("video") => {
                record.has_video = true;
                apply_all(VIDEO_STREAM_FIELDS, &mut record, stream);
                record.aspect_ratio = aspect_ratio(record.width, record.height);
                record.resolution_category = resolution_category(record.height).to_string();
            }
            Some("audio") => {
                record.has_audio = true;
                apply_all(AUDIO_STREAM_FIELDS, &mut record, stream);
            }
            _ => {}
        }

        if let Some(timecode) = stream_timecode(stream) {
            record.timecode_start = timecode;
        }
    }

    record.timecode_end = String::new();
    record.timecode_rate = record.frame_rate;

    apply_all(CONTAINER_TAG_FIELDS, &mut record, format);

    Ok(record)
}

/// Timecode attribute of a stream. Timecodes held only in `tags` are not read.
fn stream_timecode(stream: &Value) -> Option<String> {
    stream.get("timecode").map(|value| match value {
        Value::String(s) => s.clone(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
        other => other.to_string(),
    })
}
