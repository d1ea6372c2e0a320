//! Vidmeta Processing Library
//!
//! Runs the external prober against a video file and normalizes its JSON output
//! into a [`MetadataRecord`](vidmeta_core::MetadataRecord).

pub mod error;
pub mod metadata;
pub mod probe;
pub mod video;

pub use error::ExtractionError;
pub use metadata::{normalize, FileIdentity};
pub use probe::{FfprobeRunner, MediaProber};
pub use video::VideoMetadataExtractor;
