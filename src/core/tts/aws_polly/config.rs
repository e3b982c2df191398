//! Configuration types for Amazon Polly.
//!
//! Voice and output format are chosen per call by the pipeline; this module
//! only holds the options that stay fixed for the lifetime of the client.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::tts::base::AudioFormat;

// =============================================================================
// Polly Engine
// =============================================================================

/// Amazon Polly synthesis engine options.
///
/// When no engine is configured the request omits it and Polly falls back to
/// the standard engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollyEngine {
    #[serde(rename = "standard")]
    Standard,
    #[serde(rename = "neural")]
    Neural,
    #[serde(rename = "long-form")]
    LongForm,
    #[serde(rename = "generative")]
    Generative,
}

impl PollyEngine {
    /// Convert to AWS API string.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Neural => "neural",
            Self::LongForm => "long-form",
            Self::Generative => "generative",
        }
    }
}

impl fmt::Display for PollyEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PollyEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "neural" => Ok(Self::Neural),
            "long-form" | "longform" | "long_form" => Ok(Self::LongForm),
            "generative" => Ok(Self::Generative),
            other => Err(format!(
                "Unsupported Polly engine: {other}. Supported engines: standard, neural, long-form, generative"
            )),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Maximum text length for SynthesizeSpeech API (characters).
pub const MAX_TEXT_LENGTH: usize = 3000;

/// Client-wide options for Amazon Polly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsPollyTTSConfig {
    /// Engine override (service default when `None`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<PollyEngine>,

    /// Sample rate override in Hz (format default when `None`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
}

impl AwsPollyTTSConfig {
    /// Validate the options against the output format they will be used with.
    pub fn validate_for(&self, format: AudioFormat) -> Result<(), String> {
        if let Some(rate) = self.sample_rate {
            let supported = format.supported_sample_rates();
            if !supported.contains(&rate) {
                return Err(format!(
                    "Sample rate {} is not supported for {} format. Supported rates: {:?}",
                    rate,
                    format.as_str(),
                    supported
                ));
            }
        }

        Ok(())
    }
}
