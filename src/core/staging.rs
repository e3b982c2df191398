//! Local staging of synthesized audio.
//!
//! Audio streams are written to a file first, then rewound and read back for
//! upload. [`StagedAudio`] owns that file and deletes it when dropped, so the
//! copy never outlives the record that produced it.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures::StreamExt;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tracing::{debug, warn};

use crate::core::tts::AudioStream;
use crate::errors::{PipelineError, PipelineResult};

/// A synthesized audio file on local disk.
#[derive(Debug)]
pub struct StagedAudio {
    path: PathBuf,
    file: Option<File>,
    size_bytes: u64,
    removed: bool,
}

impl StagedAudio {
    /// Drain `stream` into `<dir>/<name>`.
    ///
    /// A failed write or stream read leaves no file behind.
    pub async fn materialize(dir: &Path, name: &str, mut stream: AudioStream) -> PipelineResult<Self> {
        let path = dir.join(name);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .await
            .map_err(|e| PipelineError::io(format!("creating staging file {}", path.display()), e))?;

        let mut staged = Self {
            path,
            file: Some(file),
            size_bytes: 0,
            removed: false,
        };

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            staged.write_chunk(&chunk).await?;
        }

        let path = staged.path.clone();
        staged
            .file_mut()?
            .flush()
            .await
            .map_err(|e| PipelineError::io(format!("flushing staging file {}", path.display()), e))?;

        debug!(
            path = %staged.path.display(),
            size_bytes = staged.size_bytes,
            "Staged synthesized audio"
        );

        Ok(staged)
    }

    async fn write_chunk(&mut self, chunk: &[u8]) -> PipelineResult<()> {
        let path = self.path.clone();
        self.file_mut()?
            .write_all(chunk)
            .await
            .map_err(|e| PipelineError::io(format!("writing staging file {}", path.display()), e))?;
        self.size_bytes += chunk.len() as u64;
        Ok(())
    }

    fn file_mut(&mut self) -> PipelineResult<&mut File> {
        let path = &self.path;
        self.file.as_mut().ok_or_else(|| {
            PipelineError::io(
                format!("accessing staging file {}", path.display()),
                std::io::Error::other("staging file already closed"),
            )
        })
    }

    /// Rewind and read the whole file back.
    pub async fn read_back(&mut self) -> PipelineResult<Bytes> {
        let path = self.path.clone();
        let size = self.size_bytes;
        let file = self.file_mut()?;

        file.seek(SeekFrom::Start(0))
            .await
            .map_err(|e| PipelineError::io(format!("rewinding staging file {}", path.display()), e))?;

        let mut content = Vec::with_capacity(size as usize);
        file.read_to_end(&mut content)
            .await
            .map_err(|e| PipelineError::io(format!("reading staging file {}", path.display()), e))?;

        Ok(Bytes::from(content))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Close and delete the file.
    pub async fn remove(mut self) -> PipelineResult<()> {
        self.file.take();
        self.removed = true;
        tokio::fs::remove_file(&self.path)
            .await
            .map_err(|e| PipelineError::io(format!("removing staging file {}", self.path.display()), e))
    }
}

impl Drop for StagedAudio {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        self.file.take();
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed staging file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove staging file"
            ),
        }
    }
}
