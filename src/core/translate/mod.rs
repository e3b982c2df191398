pub mod aws_translate;
mod base;

pub use aws_translate::{AwsTranslator, MAX_TRANSLATE_BYTES};
pub use base::{TranslatedRecord, Translator};
