//! Line scanner shared by the OBJ and MTL readers.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::error::{AssetError, AssetResult, RecordError};

/// One physical line of an input file, without its line terminator.
#[derive(Clone, Debug)]
pub struct Line {
    /// 1-based line number.
    pub number: usize,
    pub text: String,
}

impl Line {
    /// Split into `(tag, operands)`.
    ///
    /// Leading whitespace is skipped and the tag runs up to the first
    /// whitespace character. Blank lines and `#` comments yield `None`.
    pub fn record(&self) -> Option<(&str, &str)> {
        let trimmed = self.text.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }
        Some(trimmed.split_once(char::is_whitespace).unwrap_or((trimmed, "")))
    }
}

/// Reads a text file line by line, remembering where it came from so that
/// decode failures can be reported with a location.
pub struct LineScanner<R> {
    reader: R,
    path: PathBuf,
    number: usize,
    buf: Vec<u8>,
}

impl LineScanner<BufReader<File>> {
    /// Open `path` for scanning.
    pub fn open(path: &Path) -> AssetResult<Self> {
        let file = File::open(path).map_err(|source| AssetError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file), path))
    }
}

impl<R: BufRead> LineScanner<R> {
    /// Scan an already opened reader; `path` is only used for diagnostics
    /// and relative path resolution.
    pub fn new(reader: R, path: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            path: path.into(),
            number: 0,
            buf: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wrap a decode failure with this file's location.
    pub fn record_error(&self, line: &Line, source: RecordError) -> AssetError {
        AssetError::Record {
            path: self.path.clone(),
            line: line.number,
            text: line.text.trim().to_owned(),
            source,
        }
    }
}

impl<R: BufRead> Iterator for LineScanner<R> {
    type Item = AssetResult<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        self.number += 1;
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                // Exported files are not always valid UTF-8 in comments.
                let text = String::from_utf8_lossy(&self.buf);
                let text = text.trim_end_matches(['\n', '\r']).to_owned();
                Some(Ok(Line {
                    number: self.number,
                    text,
                }))
            }
            Err(source) => Some(Err(AssetError::Read {
                path: self.path.clone(),
                line: self.number,
                source,
            })),
        }
    }
}
