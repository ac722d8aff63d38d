//! G-Code file reading
//!
//! Programs are small text files read whole. A UTF-8 byte order mark is
//! dropped so it cannot end up inside the first statement.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Files above this size are still read, with a warning
const LARGE_FILE_BYTES: u64 = 64 * 1024 * 1024;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Supported file encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileEncoding {
    /// UTF-8 with a byte order mark
    Utf8Bom,
    /// UTF-8 (ASCII included)
    Utf8,
    /// Anything else; decoded lossily
    Unknown,
}

impl FileEncoding {
    /// Detect encoding from file bytes
    pub fn detect(data: &[u8]) -> Self {
        if data.starts_with(UTF8_BOM) {
            FileEncoding::Utf8Bom
        } else if std::str::from_utf8(data).is_ok() {
            FileEncoding::Utf8
        } else {
            FileEncoding::Unknown
        }
    }
}

/// G-code file reader
pub struct GcodeFileReader {
    path: PathBuf,
    file_size: u64,
}

impl GcodeFileReader {
    /// Create a new G-code file reader
    ///
    /// # Errors
    /// Returns error if file does not exist or cannot be accessed
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(anyhow!("File does not exist: {}", path.display()));
        }

        if !path.is_file() {
            return Err(anyhow!("Path is not a file: {}", path.display()));
        }

        let file_size = fs::metadata(&path)?.len();
        Ok(Self { path, file_size })
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole program as text
    pub fn read_all(&self) -> Result<String> {
        if self.file_size > LARGE_FILE_BYTES {
            tracing::warn!(
                "Reading very large file ({}MB) into memory",
                self.file_size / (1024 * 1024)
            );
        }

        let bytes = fs::read(&self.path)
            .map_err(|e| anyhow!("Failed to read {}: {}", self.path.display(), e))?;
        let text = match FileEncoding::detect(&bytes) {
            FileEncoding::Utf8Bom => String::from_utf8_lossy(&bytes[UTF8_BOM.len()..]).into_owned(),
            FileEncoding::Utf8 => String::from_utf8_lossy(&bytes).into_owned(),
            FileEncoding::Unknown => {
                tracing::warn!(
                    "{} is not valid UTF-8, invalid bytes replaced",
                    self.path.display()
                );
                String::from_utf8_lossy(&bytes).into_owned()
            }
        };
        tracing::debug!(
            "Read {} bytes from {}",
            self.file_size,
            self.path.display()
        );
        Ok(text)
    }
}

/// Read a program from `path`
pub fn read_program(path: impl AsRef<Path>) -> Result<String> {
    GcodeFileReader::new(path)?.read_all()
}
