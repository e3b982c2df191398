mod base;
pub mod s3;

pub use base::{ArtifactStore, AudioArtifact, ObjectLocation, build_object_key};
pub use s3::{S3ArtifactStore, S3StoreSettings};
