pub mod media_uri;
pub use media_uri::{MediaUriError, build_media_uri};
