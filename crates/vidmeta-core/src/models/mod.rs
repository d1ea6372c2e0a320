//! Data models shared by the extraction pipeline, the store and the API.

mod metadata;

pub use metadata::MetadataRecord;
