//! Recording mock providers
//!
//! In-process doubles for the four remote capabilities. Each one records the
//! calls it receives and can be told to fail on a given call so pipeline
//! tests can check ordering, fail-fast behavior and local cleanup.

// Not every test uses every helper
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use parking_lot::Mutex;
use time::{Duration, OffsetDateTime};

use waav_pipeline::PipelineError;
use waav_pipeline::PipelineResult;
use waav_pipeline::core::{
    ArtifactStore, AudioFormat, AudioStream, Clock, ServiceClients, SpeechSynthesizer,
    TranscriptionJob, TranscriptionRequest, TranscriptionSubmitter, Translator,
};

/// 1-based call number on which a mock fails, if any
#[derive(Debug, Clone, Copy, Default)]
pub struct FailOn(Option<usize>);

impl FailOn {
    pub fn never() -> Self {
        Self(None)
    }

    pub fn call(n: usize) -> Self {
        Self(Some(n))
    }

    fn hits(&self, call: usize) -> bool {
        self.0 == Some(call)
    }
}

// =============================================================================
// Translation
// =============================================================================

pub struct MockTranslator {
    calls: Mutex<Vec<String>>,
    fail_on: FailOn,
}

impl MockTranslator {
    pub fn new(fail_on: FailOn) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on,
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn translation_of(text: &str) -> String {
        match text {
            "こんにちは" => "Hello".to_string(),
            "ありがとう" => "Thank you".to_string(),
            other => format!("[en] {}", other),
        }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        _source_language: &str,
        _target_language: &str,
    ) -> PipelineResult<String> {
        let call = {
            let mut calls = self.calls.lock();
            calls.push(text.to_string());
            calls.len()
        };
        if self.fail_on.hits(call) {
            return Err(PipelineError::Translation(format!(
                "simulated throttling on call {}",
                call
            )));
        }
        Ok(Self::translation_of(text))
    }

    fn provider_name(&self) -> &'static str {
        "mock-translate"
    }
}

// =============================================================================
// Speech synthesis
// =============================================================================

pub struct MockSynthesizer {
    calls: Mutex<Vec<(String, String, AudioFormat)>>,
    /// Fail while the stream is being read rather than on the call itself
    fail_stream_on: FailOn,
}

impl MockSynthesizer {
    pub fn new(fail_stream_on: FailOn) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_stream_on,
        }
    }

    pub fn calls(&self) -> Vec<(String, String, AudioFormat)> {
        self.calls.lock().clone()
    }

    pub fn audio_for(text: &str) -> Vec<u8> {
        format!("ID3:{}", text).into_bytes()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        voice: &str,
        format: AudioFormat,
    ) -> PipelineResult<AudioStream> {
        let call = {
            let mut calls = self.calls.lock();
            calls.push((text.to_string(), voice.to_string(), format));
            calls.len()
        };

        let audio = Self::audio_for(text);
        let (head, tail) = audio.split_at(audio.len() / 2);
        let mut chunks: Vec<PipelineResult<Bytes>> = vec![Ok(Bytes::copy_from_slice(head))];
        if self.fail_stream_on.hits(call) {
            chunks.push(Err(PipelineError::Synthesis(
                "Failed to read audio stream: connection reset".to_string(),
            )));
        } else {
            chunks.push(Ok(Bytes::copy_from_slice(tail)));
        }

        Ok(Box::pin(stream::iter(chunks)))
    }

    fn provider_name(&self) -> &'static str {
        "mock-tts"
    }
}

// =============================================================================
// Object storage
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub content: Bytes,
    /// Files present in the staging directory when the upload happened
    pub staged_files: usize,
}

pub struct MockStore {
    puts: Mutex<Vec<StoredObject>>,
    fail_on: FailOn,
    staging_probe: Option<PathBuf>,
}

impl MockStore {
    pub fn new(fail_on: FailOn) -> Self {
        Self {
            puts: Mutex::new(Vec::new()),
            fail_on,
            staging_probe: None,
        }
    }

    /// Count files in `dir` on every upload.
    pub fn with_staging_probe(mut self, dir: PathBuf) -> Self {
        self.staging_probe = Some(dir);
        self
    }

    pub fn puts(&self) -> Vec<StoredObject> {
        self.puts.lock().clone()
    }

    pub fn keys(&self) -> Vec<String> {
        self.puts.lock().iter().map(|p| p.key.clone()).collect()
    }
}

#[async_trait]
impl ArtifactStore for MockStore {
    async fn put(&self, bucket: &str, key: &str, content: Bytes) -> PipelineResult<()> {
        let staged_files = self
            .staging_probe
            .as_ref()
            .map(|dir| count_files(dir))
            .unwrap_or(0);

        let call = {
            let mut puts = self.puts.lock();
            puts.push(StoredObject {
                bucket: bucket.to_string(),
                key: key.to_string(),
                content,
                staged_files,
            });
            puts.len()
        };
        if self.fail_on.hits(call) {
            return Err(PipelineError::Storage(format!(
                "Failed to upload {} to {}: AccessDenied",
                key, bucket
            )));
        }
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "mock-store"
    }
}

// =============================================================================
// Transcription
// =============================================================================

pub struct MockSubmitter {
    requests: Mutex<Vec<TranscriptionRequest>>,
    fail_on: FailOn,
}

impl MockSubmitter {
    pub fn new(fail_on: FailOn) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_on,
        }
    }

    pub fn requests(&self) -> Vec<TranscriptionRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl TranscriptionSubmitter for MockSubmitter {
    async fn submit(&self, request: &TranscriptionRequest) -> PipelineResult<TranscriptionJob> {
        let call = {
            let mut requests = self.requests.lock();
            requests.push(request.clone());
            requests.len()
        };
        if self.fail_on.hits(call) {
            return Err(PipelineError::Submission(format!(
                "Transcribe API error for job {}: ConflictException",
                request.job_name
            )));
        }
        Ok(TranscriptionJob::accepted(
            request,
            Some("IN_PROGRESS".to_string()),
        ))
    }

    fn provider_name(&self) -> &'static str {
        "mock-transcribe"
    }
}

// =============================================================================
// Clocks
// =============================================================================

/// Always returns the same instant.
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

/// Advances by `step` on every read.
pub struct SteppingClock {
    start: OffsetDateTime,
    step: Duration,
    reads: AtomicI64,
}

impl SteppingClock {
    pub fn new(start: OffsetDateTime, step: Duration) -> Self {
        Self {
            start,
            step,
            reads: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> OffsetDateTime {
        let n = self.reads.fetch_add(1, Ordering::SeqCst);
        self.start + self.step * (n as i32)
    }
}

// =============================================================================
// Bundle
// =============================================================================

/// Mocks plus the client bundle that points at them.
pub struct MockServices {
    pub translator: Arc<MockTranslator>,
    pub synthesizer: Arc<MockSynthesizer>,
    pub store: Arc<MockStore>,
    pub transcriber: Arc<MockSubmitter>,
}

impl MockServices {
    pub fn new(
        translator: MockTranslator,
        synthesizer: MockSynthesizer,
        store: MockStore,
        transcriber: MockSubmitter,
    ) -> Self {
        Self {
            translator: Arc::new(translator),
            synthesizer: Arc::new(synthesizer),
            store: Arc::new(store),
            transcriber: Arc::new(transcriber),
        }
    }

    /// Mocks that never fail.
    pub fn healthy() -> Self {
        Self::new(
            MockTranslator::new(FailOn::never()),
            MockSynthesizer::new(FailOn::never()),
            MockStore::new(FailOn::never()),
            MockSubmitter::new(FailOn::never()),
        )
    }

    pub fn clients(&self) -> ServiceClients {
        ServiceClients {
            translator: self.translator.clone(),
            synthesizer: self.synthesizer.clone(),
            store: self.store.clone(),
            transcriber: self.transcriber.clone(),
        }
    }

    /// Total remote calls across all four services.
    pub fn total_calls(&self) -> usize {
        self.translator.calls().len()
            + self.synthesizer.calls().len()
            + self.store.puts().len()
            + self.transcriber.requests().len()
    }
}

// =============================================================================
// Log capture
// =============================================================================

/// In-memory sink for formatted `tracing` output.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Route debug-level events on this thread into the buffer until the
    /// guard is dropped.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Captured lines containing `message`.
    pub fn lines_with(&self, message: &str) -> Vec<String> {
        String::from_utf8_lossy(&self.0.lock())
            .lines()
            .filter(|line| line.contains(message))
            .map(str::to_string)
            .collect()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Number of entries in `dir`, 0 when it cannot be read.
pub fn count_files(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| entries.filter_map(Result::ok).count())
        .unwrap_or(0)
}
