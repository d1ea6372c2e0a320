//! Declarative mapping from probe JSON to [`MetadataRecord`] fields.
//!
//! Each [`FieldMapping`] names where a value lives (a key on the section itself
//! or in its `tags` map), which record field receives it and how it is coerced.
//! Applying a mapping always writes the field: a missing or unusable value
//! writes the field's default.

use super::derived::parse_rational;
use serde_json::Value;
use vidmeta_core::MetadataRecord;

/// Location of a value relative to a JSON section (the `format` object or one stream).
#[derive(Debug, Clone, Copy)]
pub enum Source {
    /// A key directly on the section
    Field(&'static str),
    /// A key inside the section's `tags` map
    Tag(&'static str),
}

impl Source {
    fn lookup(self, section: &Value) -> Option<&Value> {
        match self {
            Source::Field(key) => section.get(key),
            Source::Tag(key) => section.get("tags").and_then(|tags| tags.get(key)),
        }
    }
}

/// Record field plus the coercion used to fill it.
#[derive(Clone, Copy)]
pub enum Target {
    Text(fn(&mut MetadataRecord) -> &mut String),
    Count(fn(&mut MetadataRecord) -> &mut u32),
    Size(fn(&mut MetadataRecord) -> &mut u64),
    /// Seconds given as a decimal string, truncated to whole seconds
    WholeSeconds(fn(&mut MetadataRecord) -> &mut u64),
    /// `"A/B"` or bare number, see [`parse_rational`]
    Rational(fn(&mut MetadataRecord) -> &mut f64),
}

#[derive(Clone, Copy)]
pub struct FieldMapping {
    pub source: Source,
    pub target: Target,
}

impl FieldMapping {
    pub fn apply(&self, record: &mut MetadataRecord, section: &Value) {
        let value = self.source.lookup(section);
        match self.target {
            Target::Text(slot) => *slot(record) = value.and_then(as_text).unwrap_or_default(),
            Target::Count(slot) => {
                *slot(record) = value
                    .and_then(as_integer)
                    .and_then(|v| u32::try_from(v).ok())
                    .unwrap_or(0)
            }
            Target::Size(slot) => {
                *slot(record) = value
                    .and_then(as_integer)
                    .and_then(|v| u64::try_from(v).ok())
                    .unwrap_or(0)
            }
            Target::WholeSeconds(slot) => {
                *slot(record) = value
                    .and_then(as_float)
                    .filter(|secs| *secs >= 0.0)
                    .map(|secs| secs.trunc() as u64)
                    .unwrap_or(0)
            }
            Target::Rational(slot) => {
                *slot(record) = value
                    .and_then(as_text)
                    .map(|text| parse_rational(&text))
                    .unwrap_or(0.0)
            }
        }
    }
}

/// Apply every mapping of `table` against one JSON section.
pub fn apply_all(table: &[FieldMapping], record: &mut MetadataRecord, section: &Value) {
    for mapping in table {
        mapping.apply(record, section);
    }
}

/// Text rendering of a scalar; containers and null have none.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Integer reading of a scalar. Fractions truncate toward zero; numeric strings parse.
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            })
        }
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Build a [`FieldMapping`] row: `map!(Field("width") => width: Count)`.
macro_rules! map {
    (@slot $field:ident, $ty:ty) => {{
        fn slot(record: &mut MetadataRecord) -> &mut $ty {
            &mut record.$field
        }
        slot
    }};
    ($kind:ident($key:literal) => $field:ident: Text) => {
        FieldMapping {
            source: Source::$kind($key),
            target: Target::Text(map!(@slot $field, String)),
        }
    };
    ($kind:ident($key:literal) => $field:ident: Count) => {
        FieldMapping {
            source: Source::$kind($key),
            target: Target::Count(map!(@slot $field, u32)),
        }
    };
    ($kind:ident($key:literal) => $field:ident: Size) => {
        FieldMapping {
            source: Source::$kind($key),
            target: Target::Size(map!(@slot $field, u64)),
        }
    };
    ($kind:ident($key:literal) => $field:ident: WholeSeconds) => {
        FieldMapping {
            source: Source::$kind($key),
            target: Target::WholeSeconds(map!(@slot $field, u64)),
        }
    };
    ($kind:ident($key:literal) => $field:ident: Rational) => {
        FieldMapping {
            source: Source::$kind($key),
            target: Target::Rational(map!(@slot $field, f64)),
        }
    };
}

/// Container-level fields read from the `format` section before the streams.
pub static FORMAT_FIELDS: &[FieldMapping] = &[
    map!(Field("format_name") => format: Text),
    map!(Field("duration") => duration_seconds: WholeSeconds),
    map!(Tag("creation_time") => creation_time: Text),
];

/// Fields read from a video stream. Camera and color details are stream-scoped
/// because cameras embed them on the video track.
pub static VIDEO_STREAM_FIELDS: &[FieldMapping] = &[
    map!(Field("width") => width: Count),
    map!(Field("height") => height: Count),
    map!(Field("r_frame_rate") => frame_rate: Rational),
    map!(Field("codec_name") => video_codec: Text),
    map!(Field("profile") => video_profile: Text),
    map!(Field("bit_rate") => video_bit_rate: Size),
    map!(Field("bits_per_raw_sample") => video_bit_depth: Text),
    // Camera and shooting
    map!(Tag("lens") => camera_lens: Text),
    map!(Tag("shutter_speed") => shutter_speed: Rational),
    map!(Tag("aperture") => aperture: Rational),
    map!(Tag("iso") => iso: Count),
    map!(Tag("focal_length") => lens_focal_length: Count),
    map!(Tag("lens_type") => lens_type: Text),
    map!(Tag("exposure_mode") => exposure_mode: Text),
    map!(Tag("white_balance") => white_balance: Text),
    map!(Tag("focus_mode") => focus_mode: Text),
    map!(Tag("stabilization_type") => stabilization_type: Text),
    map!(Tag("frame_rate_mode") => frame_rate_mode: Text),
    // Color
    map!(Field("color_space") => color_space: Text),
    map!(Field("color_range") => color_range: Text),
    map!(Field("color_transfer") => color_transfer: Text),
    map!(Field("bits_per_raw_sample") => color_depth: Text),
    map!(Tag("dynamic_range") => dynamic_range: Text),
];

pub static AUDIO_STREAM_FIELDS: &[FieldMapping] = &[
    map!(Field("codec_name") => audio_codec: Text),
    map!(Field("channels") => audio_channels: Count),
    map!(Field("bit_rate") => audio_bit_rate: Size),
    map!(Field("sample_rate") => audio_sample_rate: Count),
    map!(Tag("mix_type") => audio_mix_type: Text),
    map!(Field("channel_layout") => channel_layout: Text),
    map!(Field("bits_per_sample") => audio_bit_depth: Count),
];

/// Container tags read from `format.tags` after the streams.
pub static CONTAINER_TAG_FIELDS: &[FieldMapping] = &[
    // Camera
    map!(Tag("make") => camera_make: Text),
    map!(Tag("model") => camera_model: Text),
    map!(Tag("serial_number") => camera_serial_number: Text),
    map!(Tag("sensor_type") => camera_sensor_type: Text),
    // Project and production
    map!(Tag("project_name") => project_name: Text),
    map!(Tag("director") => director: Text),
    map!(Tag("editor") => editor: Text),
    map!(Tag("production_company") => production_company: Text),
    map!(Tag("shoot_date") => shoot_date: Text),
    map!(Tag("version") => version: Text),
    // Spatial
    map!(Tag("location") => gps_coordinates: Text),
    map!(Tag("location_description") => location: Text),
    // Language
    map!(Tag("language") => language: Text),
    map!(Tag("subtitle_language") => subtitle_language: Text),
    // Compression
    map!(Tag("video_compression") => video_compression: Text),
    map!(Tag("compression_level") => compression_level: Text),
];
