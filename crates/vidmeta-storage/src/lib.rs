//! Vidmeta Storage Library
//!
//! Persists extracted metadata records as JSON documents. The [`MetadataStore`]
//! trait is the seam the API layer depends on; [`LocalMetadataStore`] writes one
//! pretty-printed file per record into a local directory.
//!
//! # File naming
//!
//! A record is stored as `<base>.json`, where `<base>` is the record's file name
//! with every character outside `[A-Za-z0-9-_.]` replaced by `_` and the
//! extension removed. Saving a record whose base name already exists replaces
//! the earlier file.

pub mod local;
pub mod traits;

pub use local::{sanitize_base_name, LocalMetadataStore};
pub use traits::{MetadataStore, StorageError, StorageResult};
