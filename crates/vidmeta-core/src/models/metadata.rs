use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Flat description of one uploaded video file.
///
/// Every field always carries a value: numbers default to zero, flags to
/// `false` and text to the empty string when the probe output does not
/// mention them. Field names are serialized in camelCase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MetadataRecord {
    // File identity
    pub file_name: String,
    pub file_size_bytes: u64,
    pub file_path: String,
    /// Container format name as reported by the prober (e.g. "mov,mp4,m4a,3gp,3g2,mj2")
    pub format: String,
    pub duration_seconds: u64,
    pub creation_time: String,

    // Video stream
    pub has_video: bool,
    pub width: u32,
    pub height: u32,
    pub frame_rate: f64,
    pub video_codec: String,
    pub video_profile: String,
    pub video_bit_rate: u64,
    /// "16:9", "4:3" or "<ratio>:1", derived from width and height
    pub aspect_ratio: String,
    /// "4K", "2K", "1080p", "720p", "480p" or "SD", derived from height
    pub resolution_category: String,
    pub video_bit_depth: String,

    // Audio stream
    pub has_audio: bool,
    pub audio_codec: String,
    pub audio_channels: u32,
    pub audio_bit_rate: u64,
    pub audio_sample_rate: u32,
    pub audio_mix_type: String,
    pub channel_layout: String,
    pub audio_bit_depth: u32,

    // Timecode
    pub timecode_start: String,
    pub timecode_end: String,
    /// Always equal to `frame_rate`
    pub timecode_rate: f64,

    // Camera and shooting
    pub camera_make: String,
    pub camera_model: String,
    pub camera_serial_number: String,
    pub camera_sensor_type: String,
    pub camera_lens: String,
    pub shutter_speed: f64,
    pub aperture: f64,
    pub iso: u32,
    /// Focal length in millimetres
    pub lens_focal_length: u32,
    pub lens_type: String,
    pub exposure_mode: String,
    pub white_balance: String,
    pub focus_mode: String,
    pub stabilization_type: String,
    pub frame_rate_mode: String,

    // Color
    pub color_space: String,
    pub color_range: String,
    pub color_transfer: String,
    pub color_depth: String,
    pub dynamic_range: String,

    // Project and production
    pub project_name: String,
    pub director: String,
    pub editor: String,
    pub production_company: String,
    pub shoot_date: String,
    pub version: String,

    // Spatial
    pub gps_coordinates: String,
    pub location: String,

    // Language
    pub language: String,
    pub subtitle_language: String,

    // Compression
    pub video_compression: String,
    pub compression_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_serializes_every_field() {
        let json = serde_json::to_value(MetadataRecord::default()).unwrap();
        let object = json.as_object().unwrap();

        assert!(object.values().all(|v| !v.is_null()));
        assert_eq!(object["hasVideo"], false);
        assert_eq!(object["frameRate"], 0.0);
        assert_eq!(object["aspectRatio"], "");
        assert_eq!(object["lensFocalLength"], 0);
        assert_eq!(object["gpsCoordinates"], "");
        assert_eq!(object.len(), 59);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let record: MetadataRecord =
            serde_json::from_str(r#"{"fileName":"clip.mp4","width":1920}"#).unwrap();
        assert_eq!(record.file_name, "clip.mp4");
        assert_eq!(record.width, 1920);
        assert_eq!(record.height, 0);
        assert_eq!(record.video_codec, "");
    }
}
