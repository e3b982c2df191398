//! Line-oriented input source.
//!
//! [`LineSource`] yields raw lines lazily and never filters them; blank-line
//! filtering happens once, at the pipeline boundary, in [`records_from_lines`].

use std::path::Path;

use serde::Serialize;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use crate::errors::{PipelineError, PipelineResult};

/// One non-blank line of source input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextRecord {
    /// 0-based line number in the input, blank lines included
    pub index: usize,
    /// Line text exactly as read (terminator stripped)
    pub text: String,
}

/// Lazy, finite, non-restartable sequence of raw lines.
pub struct LineSource<R> {
    lines: Lines<R>,
    description: String,
}

impl LineSource<BufReader<File>> {
    /// Open a newline-delimited text file.
    pub async fn open(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .await
            .map_err(|e| PipelineError::io(format!("opening input file {}", path.display()), e))?;

        Ok(Self {
            lines: BufReader::new(file).lines(),
            description: path.display().to_string(),
        })
    }
}

impl<R: AsyncBufRead + Unpin> LineSource<R> {
    /// Wrap an already-open reader.
    pub fn from_reader(reader: R, description: impl Into<String>) -> Self {
        Self {
            lines: reader.lines(),
            description: description.into(),
        }
    }

    /// Next raw line, or `None` once the source is exhausted.
    pub async fn next_line(&mut self) -> PipelineResult<Option<String>> {
        self.lines
            .next_line()
            .await
            .map_err(|e| PipelineError::io(format!("reading {}", self.description), e))
    }

    /// Drain every remaining line.
    pub async fn read_all(mut self) -> PipelineResult<Vec<String>> {
        let mut lines = Vec::new();
        while let Some(line) = self.next_line().await? {
            lines.push(line);
        }
        Ok(lines)
    }
}

/// Turn raw lines into records, dropping blank and whitespace-only lines.
pub fn records_from_lines<I>(lines: I) -> Vec<TextRecord>
where
    I: IntoIterator<Item = String>,
{
    lines
        .into_iter()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, text)| TextRecord { index, text })
        .collect()
}
