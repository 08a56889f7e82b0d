//! Store repository contracts and JSON document implementations.
//!
//! # Responsibility
//! - Load and save the whole store as one JSON document.
//! - Keep file and encoding details inside the persistence boundary.
//!
//! # Invariants
//! - `save` always rewrites the full document; there are no partial writes.
//! - Saved documents are pretty-printed with 4-space indentation.
//! - `load` rejects malformed documents instead of masking them.

use crate::model::store::TaskStore;
use log::{error, info};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

const DOCUMENT_INDENT: &[u8] = b"    ";
const EMPTY_DOCUMENT: &str = "{}\n";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for store persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Backing document does not exist.
    NotFound(PathBuf),
    /// `create_empty` was asked to replace an existing document.
    AlreadyExists(PathBuf),
    /// File-system failure while reading or writing.
    Io { path: PathBuf, source: io::Error },
    /// Document is not a valid store.
    Malformed(serde_json::Error),
    /// Store could not be encoded.
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "store file not found: {}", path.display()),
            Self::AlreadyExists(path) => {
                write!(f, "store file already exists: {}", path.display())
            }
            Self::Io { path, source } => write!(f, "store file `{}`: {source}", path.display()),
            Self::Malformed(err) => write!(f, "malformed store document: {err}"),
            Self::Encode(err) => write!(f, "failed to encode store document: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Malformed(err) | Self::Encode(err) => Some(err),
            Self::NotFound(_) | Self::AlreadyExists(_) => None,
        }
    }
}

/// Repository interface for whole-store persistence.
pub trait StoreRepository {
    /// Whether a backing document is present.
    fn exists(&self) -> bool;
    /// Writes an empty store document; fails if one already exists.
    fn create_empty(&self) -> RepoResult<()>;
    fn load(&self) -> RepoResult<TaskStore>;
    fn save(&self, store: &TaskStore) -> RepoResult<()>;
}

impl<R: StoreRepository + ?Sized> StoreRepository for &R {
    fn exists(&self) -> bool {
        (**self).exists()
    }

    fn create_empty(&self) -> RepoResult<()> {
        (**self).create_empty()
    }

    fn load(&self) -> RepoResult<TaskStore> {
        (**self).load()
    }

    fn save(&self, store: &TaskStore) -> RepoResult<()> {
        (**self).save(store)
    }
}

/// Encodes a store as a 4-space indented JSON document with trailing newline.
pub fn encode_store(store: &TaskStore) -> RepoResult<String> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(DOCUMENT_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    store.serialize(&mut serializer).map_err(RepoError::Encode)?;
    buffer.push(b'\n');
    // serde_json only emits UTF-8.
    String::from_utf8(buffer).map_err(|err| {
        RepoError::Encode(serde::ser::Error::custom(format!(
            "encoded document is not UTF-8: {err}"
        )))
    })
}

/// Decodes a store document.
pub fn decode_store(text: &str) -> RepoResult<TaskStore> {
    serde_json::from_str(text).map_err(RepoError::Malformed)
}

/// File-backed store repository.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    fn io_error(&self, source: io::Error) -> RepoError {
        if source.kind() == io::ErrorKind::NotFound {
            return RepoError::NotFound(self.path.clone());
        }
        RepoError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl StoreRepository for JsonFileRepository {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn create_empty(&self) -> RepoResult<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .map_err(|err| match err.kind() {
                io::ErrorKind::AlreadyExists => RepoError::AlreadyExists(self.path.clone()),
                _ => RepoError::Io {
                    path: self.path.clone(),
                    source: err,
                },
            })?;
        file.write_all(EMPTY_DOCUMENT.as_bytes())
            .map_err(|err| self.io_error(err))?;

        info!("event=store_create module=repo status=ok mode=file");
        Ok(())
    }

    fn load(&self) -> RepoResult<TaskStore> {
        let started_at = Instant::now();
        let text = std::fs::read_to_string(&self.path).map_err(|err| {
            error!(
                "event=store_load module=repo status=error mode=file duration_ms={} error_code=read_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            self.io_error(err)
        })?;

        match decode_store(text.as_str()) {
            Ok(store) => {
                info!(
                    "event=store_load module=repo status=ok mode=file duration_ms={} days={} reviews={}",
                    started_at.elapsed().as_millis(),
                    store.len(),
                    store.review_count()
                );
                Ok(store)
            }
            Err(err) => {
                error!(
                    "event=store_load module=repo status=error mode=file duration_ms={} error_code=malformed_document error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    fn save(&self, store: &TaskStore) -> RepoResult<()> {
        let started_at = Instant::now();
        let document = encode_store(store)?;

        if let Err(err) = std::fs::write(&self.path, document.as_bytes()) {
            error!(
                "event=store_save module=repo status=error mode=file duration_ms={} error_code=write_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(self.io_error(err));
        }

        info!(
            "event=store_save module=repo status=ok mode=file duration_ms={} bytes={} days={}",
            started_at.elapsed().as_millis(),
            document.len(),
            store.len()
        );
        Ok(())
    }
}

/// Store repository kept in memory as an encoded document.
///
/// Goes through the same encode/decode path as the file repository.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    document: RefCell<Option<String>>,
}

impl InMemoryRepository {
    /// Creates a repository with no document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding `document` verbatim.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: RefCell::new(Some(document.into())),
        }
    }

    /// Returns the last saved document text.
    pub fn document(&self) -> Option<String> {
        self.document.borrow().clone()
    }
}

impl StoreRepository for InMemoryRepository {
    fn exists(&self) -> bool {
        self.document.borrow().is_some()
    }

    fn create_empty(&self) -> RepoResult<()> {
        let mut slot = self.document.borrow_mut();
        if slot.is_some() {
            return Err(RepoError::AlreadyExists(PathBuf::from(":memory:")));
        }
        *slot = Some(EMPTY_DOCUMENT.to_string());
        Ok(())
    }

    fn load(&self) -> RepoResult<TaskStore> {
        match self.document.borrow().as_deref() {
            Some(text) => decode_store(text),
            None => Err(RepoError::NotFound(PathBuf::from(":memory:"))),
        }
    }

    fn save(&self, store: &TaskStore) -> RepoResult<()> {
        let document = encode_store(store)?;
        *self.document.borrow_mut() = Some(document);
        Ok(())
    }
}
