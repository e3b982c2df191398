//! Translated-text output file.
//!
//! [`ResultSink`] appends one line per translated record, in input order. Line
//! breaks inside a translation are written as spaces. The file is created at
//! run start and is not meant to survive the run.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

use crate::core::translate::TranslatedRecord;
use crate::errors::{PipelineError, PipelineResult};

/// Append-only, newline-delimited translation log.
pub struct ResultSink {
    path: PathBuf,
    writer: BufWriter<File>,
    entries: Vec<TranslatedRecord>,
}

impl ResultSink {
    /// Create (or truncate) the output file.
    pub async fn create(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)
            .await
            .map_err(|e| PipelineError::io(format!("creating output file {}", path.display()), e))?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            entries: Vec::new(),
        })
    }

    /// Buffer one translation as a line.
    pub async fn append(&mut self, record: TranslatedRecord) -> PipelineResult<()> {
        let mut line = single_line(&record.translated_text);
        line.push('\n');
        self.writer.write_all(line.as_bytes()).await.map_err(|e| {
            PipelineError::io(format!("writing output file {}", self.path.display()), e)
        })?;
        self.entries.push(record);
        Ok(())
    }

    /// Records appended so far.
    pub fn entries(&self) -> &[TranslatedRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write buffered lines through to disk.
    pub async fn flush(&mut self) -> PipelineResult<()> {
        self.writer.flush().await.map_err(|e| {
            PipelineError::io(format!("flushing output file {}", self.path.display()), e)
        })?;
        debug!(path = %self.path.display(), entries = self.entries.len(), "Flushed output file");
        Ok(())
    }

    /// Current file contents. Only lines already flushed are included.
    pub async fn contents(&self) -> PipelineResult<Bytes> {
        tokio::fs::read(&self.path)
            .await
            .map(Bytes::from)
            .map_err(|e| PipelineError::io(format!("reading output file {}", self.path.display()), e))
    }

    /// Close the writer without flushing and delete the file.
    pub async fn remove(self) -> PipelineResult<()> {
        let Self { path, writer, .. } = self;
        drop(writer);
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| PipelineError::io(format!("removing output file {}", path.display()), e))
    }
}

/// Replace every `\r\n`, `\r` or `\n` with one space.
fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(source: &str, translated: &str) -> TranslatedRecord {
        TranslatedRecord {
            source_text: source.to_string(),
            translated_text: translated.to_string(),
            source_language: "ja".to_string(),
            target_language: "en".to_string(),
        }
    }

    #[tokio::test]
    async fn test_append_flush_preserves_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("translated_text.txt");

        let mut sink = ResultSink::create(&path).await.unwrap();
        assert!(sink.is_empty());

        sink.append(record("こんにちは", "Hello")).await.unwrap();
        sink.append(record("ありがとう", "Thank you")).await.unwrap();
        sink.flush().await.unwrap();

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.entries()[1].translated_text, "Thank you");
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Hello\nThank you\n"
        );
        assert_eq!(&sink.contents().await.unwrap()[..], b"Hello\nThank you\n");
    }

    #[tokio::test]
    async fn test_embedded_line_breaks_stay_on_one_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");

        let mut sink = ResultSink::create(&path).await.unwrap();
        sink.append(record("一行目\n二行目", "First line\nSecond line"))
            .await
            .unwrap();
        sink.append(record("三行目", "Third\r\nline\rend")).await.unwrap();
        sink.flush().await.unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "First line Second line\nThird line end\n"
        );
        assert_eq!(sink.entries()[0].translated_text, "First line\nSecond line");
    }

    #[tokio::test]
    async fn test_create_truncates_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "stale\n").unwrap();

        let mut sink = ResultSink::create(&path).await.unwrap();
        sink.flush().await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[tokio::test]
    async fn test_remove_deletes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");

        let mut sink = ResultSink::create(&path).await.unwrap();
        sink.append(record("a", "b")).await.unwrap();
        sink.remove().await.unwrap();

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_create_in_missing_directory() {
        let dir = TempDir::new().unwrap();
        let result = ResultSink::create(dir.path().join("missing/out.txt")).await;

        assert!(matches!(result, Err(PipelineError::Io { .. })));
    }
}
