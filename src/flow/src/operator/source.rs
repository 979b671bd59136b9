//! Record sources feeding the head of an operator chain.
//!
//! A source produces a lazy, finite, forward-only sequence of raw lines.
//! End-of-stream is signalled distinctly from an empty line, and an open
//! failure distinctly from an empty file. Sources open lazily at `start()`
//! so build-time failures stay limited to argument validation.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use crate::error::FlowError;

/// A lazy, finite, forward-only sequence of raw text records.
pub trait RecordSource: Send {
    /// Acquire the underlying resource. Called once, at `start()`.
    fn open(&mut self) -> Result<(), FlowError>;

    /// Fetch the next record, `Ok(None)` at end-of-stream.
    fn next_record(&mut self) -> Result<Option<String>, FlowError>;

    /// Description used in logs.
    fn describe(&self) -> String;
}

/// Source reading newline-delimited UTF-8 text from a file.
///
/// The file handle is held only between `open()` and the end of the driver
/// loop; dropping the source on any exit path releases it.
pub struct TextFileSource {
    path: PathBuf,
    reader: Option<BufReader<File>>,
}

impl TextFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            reader: None,
        }
    }

    fn unavailable(&self, source: std::io::Error) -> FlowError {
        FlowError::SourceUnavailable {
            path: self.path.clone(),
            source,
        }
    }
}

impl RecordSource for TextFileSource {
    fn open(&mut self) -> Result<(), FlowError> {
        let file = File::open(&self.path).map_err(|e| self.unavailable(e))?;
        tracing::debug!(path = %self.path.display(), "opened text file source");
        self.reader = Some(BufReader::new(file));
        Ok(())
    }

    fn next_record(&mut self) -> Result<Option<String>, FlowError> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };
        let mut line = String::new();
        let read = reader
            .read_line(&mut line)
            .map_err(|e| FlowError::SourceUnavailable {
                path: self.path.clone(),
                source: e,
            })?;
        if read == 0 {
            self.reader = None;
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// In-memory source over a fixed list of lines.
///
/// The synchronous counterpart of a mock connector: tests and embedders push
/// records in up front instead of reading them from disk.
pub struct VecSource {
    lines: VecDeque<String>,
}

impl VecSource {
    pub fn new(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl RecordSource for VecSource {
    fn open(&mut self) -> Result<(), FlowError> {
        Ok(())
    }

    fn next_record(&mut self) -> Result<Option<String>, FlowError> {
        Ok(self.lines.pop_front())
    }

    fn describe(&self) -> String {
        format!("memory:{} lines", self.lines.len())
    }
}
