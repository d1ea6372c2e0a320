//! Test fixtures: canned prober output and upload bodies.

use serde_json::json;

/// ffprobe output for a 1920x1080 H.264 clip at 30000/1001 with 48 kHz stereo AAC.
pub fn h264_aac_probe_output() -> String {
    json!({
        "streams": [
            {
                "index": 0,
                "codec_name": "h264",
                "profile": "High",
                "codec_type": "video",
                "width": 1920,
                "height": 1080,
                "r_frame_rate": "30000/1001",
                "bit_rate": "4800000",
                "bits_per_raw_sample": "8",
                "color_space": "bt709",
                "tags": { "language": "und" }
            },
            {
                "index": 1,
                "codec_name": "aac",
                "codec_type": "audio",
                "sample_rate": "48000",
                "channels": 2,
                "channel_layout": "stereo",
                "bits_per_sample": 0,
                "bit_rate": "128000"
            }
        ],
        "format": {
            "filename": "/tmp/upload_fixture.mp4",
            "format_name": "mov,mp4,m4a,3gp,3g2,mj2",
            "duration": "10.010000",
            "size": "6170000",
            "tags": {
                "creation_time": "2024-03-15T09:30:00.000000Z",
                "make": "Apple",
                "model": "iPhone 15 Pro"
            }
        }
    })
    .to_string()
}

/// Bytes standing in for a video file; the stub prober never reads them.
pub fn fake_video_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}
