//! Sequential, fail-fast pipeline driver.
//!
//! For every non-blank line:
//! 1. translate and append the translation to the output file
//! 2. synthesize speech and stage it in a local file
//! 3. upload the staged audio, then delete the local copy
//! 4. submit a transcription job for the uploaded object
//!
//! The first error stops the run. The output file is removed on every exit
//! path; on success it is optionally uploaded first.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use tokio::io::AsyncBufRead;
use tracing::{debug, error, info, warn};

use super::types::{PipelineRun, RecordOutcome, RecordStage, RunSettings};
use crate::core::clients::ServiceClients;
use crate::core::naming::Clock;
use crate::core::sink::ResultSink;
use crate::core::source::{LineSource, TextRecord, records_from_lines};
use crate::core::staging::StagedAudio;
use crate::core::storage::{AudioArtifact, ObjectLocation, build_object_key};
use crate::core::stt::TranscriptionRequest;
use crate::core::translate::TranslatedRecord;
use crate::errors::{PipelineError, PipelineResult};
use crate::utils::media_uri::build_media_uri;

pub struct PipelineOrchestrator {
    settings: RunSettings,
    clients: ServiceClients,
    clock: Arc<dyn Clock>,
    issued_names: HashSet<String>,
}

impl PipelineOrchestrator {
    pub fn new(settings: RunSettings, clients: ServiceClients, clock: Arc<dyn Clock>) -> Self {
        Self {
            settings,
            clients,
            clock,
            issued_names: HashSet::new(),
        }
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// Run the pipeline over a newline-delimited input file.
    pub async fn run(&mut self, input: &Path) -> PipelineResult<PipelineRun> {
        let source = LineSource::open(input).await?;
        self.run_source(source).await
    }

    /// Run the pipeline over an already-open source.
    ///
    /// The whole source is read before the first record is processed, so a
    /// read error aborts the run without any remote calls.
    pub async fn run_source<R>(&mut self, source: LineSource<R>) -> PipelineResult<PipelineRun>
    where
        R: AsyncBufRead + Unpin,
    {
        let lines = source.read_all().await?;
        let total_lines = lines.len();
        let records = records_from_lines(lines);
        let skipped_blank_lines = total_lines - records.len();

        info!(
            records = records.len(),
            skipped_blank_lines, "Starting pipeline run"
        );

        let mut sink = ResultSink::create(&self.settings.output_path).await?;
        let mut outcomes = Vec::with_capacity(records.len());

        for record in &records {
            let mut stage = RecordStage::Start;
            match self.process_record(record, &mut sink, &mut stage).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    error!(
                        index = record.index,
                        stage = %stage,
                        failed_step = e.stage(),
                        error = %e,
                        "Pipeline aborted"
                    );
                    discard_sink(sink).await;
                    return Err(e);
                }
            }
        }

        let results_location = match self.finish_sink(&mut sink).await {
            Ok(location) => location,
            Err(e) => {
                error!(error = %e, "Failed to finalize output file");
                discard_sink(sink).await;
                return Err(e);
            }
        };

        let output_path = sink.path().to_path_buf();
        let entries = sink.len();
        match sink.remove().await {
            Ok(()) => info!(path = %output_path.display(), entries, "Deleted local text file"),
            Err(e) => warn!(error = %e, "Failed to delete local text file"),
        }

        info!(
            processed = outcomes.len(),
            skipped_blank_lines, "Pipeline run complete"
        );

        Ok(PipelineRun {
            output_path,
            records: outcomes,
            skipped_blank_lines,
            results_location,
        })
    }

    async fn process_record(
        &mut self,
        record: &TextRecord,
        sink: &mut ResultSink,
        stage: &mut RecordStage,
    ) -> PipelineResult<RecordOutcome> {
        let settings = &self.settings;

        let translated_text = self
            .clients
            .translator
            .translate(
                &record.text,
                &settings.source_language,
                &settings.target_language,
            )
            .await?;
        *stage = RecordStage::Translated;
        info!(index = record.index, translated = %translated_text, "Translated text");

        let translation = TranslatedRecord {
            source_text: record.text.clone(),
            translated_text,
            source_language: settings.source_language.clone(),
            target_language: settings.target_language.clone(),
        };
        sink.append(translation.clone()).await?;

        let audio = self
            .clients
            .synthesizer
            .synthesize(
                &translation.translated_text,
                &settings.voice_id,
                settings.audio_format,
            )
            .await?;

        let audio_name = settings.namer.audio_name(self.clock.now());
        note_issued(&mut self.issued_names, &audio_name);
        let mut staged = StagedAudio::materialize(&settings.staging_dir, &audio_name, audio).await?;
        *stage = RecordStage::Synthesized;
        debug!(
            index = record.index,
            name = %audio_name,
            size_bytes = staged.size_bytes(),
            "Synthesized speech"
        );

        let key = build_object_key(settings.key_prefix.as_deref(), &audio_name);
        let content = staged.read_back().await?;
        let size_bytes = content.len() as u64;
        self.clients
            .store
            .put(&settings.bucket, &key, content)
            .await?;
        *stage = RecordStage::Uploaded;
        info!(
            index = record.index,
            bucket = %settings.bucket,
            key = %key,
            "Uploaded audio file"
        );

        let staged_path = staged.path().to_path_buf();
        if let Err(e) = staged.remove().await {
            warn!(path = %staged_path.display(), error = %e, "Failed to delete staging file");
        }

        let artifact = AudioArtifact {
            name: audio_name,
            format: settings.audio_format,
            size_bytes,
            location: ObjectLocation {
                bucket: settings.bucket.clone(),
                key,
            },
        };

        let job_name = settings.namer.job_name(self.clock.now());
        note_issued(&mut self.issued_names, &job_name);
        let request = self.transcription_request(job_name, &artifact)?;
        let job = self.clients.transcriber.submit(&request).await?;
        *stage = RecordStage::Submitted;
        info!(
            index = record.index,
            job_name = %job.job_name,
            status = job.status.as_deref().unwrap_or("unknown"),
            "Transcription job started"
        );

        *stage = RecordStage::Done;

        Ok(RecordOutcome {
            index: record.index,
            translation,
            artifact,
            job,
        })
    }

    fn transcription_request(
        &self,
        job_name: String,
        artifact: &AudioArtifact,
    ) -> PipelineResult<TranscriptionRequest> {
        let settings = &self.settings;

        let media_uri = build_media_uri(
            &settings.media_uri_scheme,
            &artifact.location.bucket,
            &artifact.location.key,
        )
        .map_err(|e| PipelineError::Submission(e.to_string()))?;

        let media_format = artifact
            .format
            .transcription_media_format()
            .ok_or_else(|| {
                PipelineError::Submission(format!(
                    "Audio format {} cannot be transcribed",
                    artifact.format
                ))
            })?;

        Ok(TranscriptionRequest {
            job_name,
            media_uri,
            language_code: settings.transcription_language.clone(),
            media_format: media_format.to_string(),
            output_bucket: settings.bucket.clone(),
        })
    }

    async fn finish_sink(&self, sink: &mut ResultSink) -> PipelineResult<Option<ObjectLocation>> {
        sink.flush().await?;

        let Some(ref results_key) = self.settings.results_object_key else {
            return Ok(None);
        };

        let key = build_object_key(self.settings.key_prefix.as_deref(), results_key);
        let content = sink.contents().await?;
        self.clients
            .store
            .put(&self.settings.bucket, &key, content)
            .await?;
        info!(bucket = %self.settings.bucket, key = %key, "Uploaded translated text");

        Ok(Some(ObjectLocation {
            bucket: self.settings.bucket.clone(),
            key,
        }))
    }
}

/// Names are only unique per second; a reused audio name overwrites the
/// earlier object and a reused job name is rejected by the service.
fn note_issued(issued: &mut HashSet<String>, name: &str) {
    if !issued.insert(name.to_string()) {
        warn!(name, "Artifact name reused within this run");
    }
}

async fn discard_sink(sink: ResultSink) {
    let path = sink.path().to_path_buf();
    debug!(path = %path.display(), entries = sink.len(), "Discarding local text file");
    if let Err(e) = sink.remove().await {
        warn!(path = %path.display(), error = %e, "Failed to delete local text file");
    }
}
