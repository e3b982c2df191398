pub mod aws_polly;
mod base;

pub use aws_polly::{AwsPollyTTS, AwsPollyTTSConfig, PollyEngine};
pub use base::{AudioFormat, AudioStream, SpeechSynthesizer};
