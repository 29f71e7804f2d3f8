//! Evidence image encoding.
//!
//! Evidence is stored in the backend as a single text column holding a
//! base64 data URI. The 5 MiB cap is checked against the declared file
//! size before any byte is read, so an oversized file never reaches the
//! encoder.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Maximum accepted evidence source-file size (5 MiB).
pub const MAX_EVIDENCE_BYTES: u64 = 5 * 1024 * 1024;

/// Errors from the evidence encoding layer.
#[derive(Debug, thiserror::Error)]
pub enum EvidenceError {
    /// The declared file size exceeds [`MAX_EVIDENCE_BYTES`].
    #[error("Evidence file is {size} bytes; the limit is {MAX_EVIDENCE_BYTES} bytes")]
    TooLarge {
        /// Declared size of the offending file.
        size: u64,
    },

    /// Reading the file's bytes failed.
    #[error("Failed to read evidence file: {0}")]
    Read(#[from] io::Error),
}

// ---------------------------------------------------------------------------
// Evidence sources
// ---------------------------------------------------------------------------

/// A selected evidence file: a name, a declared size, and lazily-read bytes.
///
/// `len` must be answerable without touching the file contents so the
/// size gate can run before any read.
pub trait EvidenceSource {
    /// File name as selected by the operator (used for MIME inference).
    fn file_name(&self) -> &str;

    /// Declared size in bytes.
    fn len(&self) -> u64;

    /// Whether the declared size is zero.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the full contents into memory.
    fn read(&self) -> io::Result<Vec<u8>>;
}

/// Evidence backed by a file on disk.
///
/// The size is captured from file metadata at open time; the contents
/// are only read when the encoder asks for them.
#[derive(Debug, Clone)]
pub struct FileEvidence {
    path: PathBuf,
    file_name: String,
    len: u64,
}

impl FileEvidence {
    /// Stat the file at `path` and capture its name and size.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let len = fs::metadata(&path)?.len();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { path, file_name, len })
    }
}

impl EvidenceSource for FileEvidence {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn len(&self) -> u64 {
        self.len
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }
}

/// Evidence held directly in memory (non-file inputs, tests).
#[derive(Debug, Clone)]
pub struct MemoryEvidence {
    file_name: String,
    bytes: Vec<u8>,
}

impl MemoryEvidence {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

impl EvidenceSource for MemoryEvidence {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Reject a declared size over [`MAX_EVIDENCE_BYTES`].
pub fn check_size(len: u64) -> Result<(), EvidenceError> {
    if len > MAX_EVIDENCE_BYTES {
        return Err(EvidenceError::TooLarge { size: len });
    }
    Ok(())
}

/// MIME type inferred from the file extension.
///
/// Unknown extensions fall back to `application/octet-stream`; the
/// backend stores the URI opaquely either way.
pub fn mime_for_file_name(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Encode an evidence source as a `data:` URI.
///
/// Callers are expected to have run [`check_size`] first; the size is
/// re-checked here so the encoder never buffers an oversized file.
pub fn encode_data_uri(source: &dyn EvidenceSource) -> Result<String, EvidenceError> {
    check_size(source.len())?;
    let bytes = source.read()?;
    let mime = mime_for_file_name(source.file_name());
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
