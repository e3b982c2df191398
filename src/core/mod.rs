pub mod clients;
pub mod naming;
pub mod sink;
pub mod source;
pub mod staging;
pub mod storage;
pub mod stt;
pub mod translate;
pub mod tts;

// Re-export commonly used types for convenience
pub use clients::{ServiceClients, load_sdk_config};
pub use naming::{ArtifactNamer, Clock, SystemClock};
pub use sink::ResultSink;
pub use source::{LineSource, TextRecord, records_from_lines};
pub use staging::StagedAudio;

pub use storage::{ArtifactStore, AudioArtifact, ObjectLocation, S3ArtifactStore, build_object_key};
pub use stt::{AwsTranscribeSubmitter, TranscriptionJob, TranscriptionRequest, TranscriptionSubmitter};
pub use translate::{AwsTranslator, TranslatedRecord, Translator};
pub use tts::{AudioFormat, AudioStream, AwsPollyTTS, SpeechSynthesizer};
