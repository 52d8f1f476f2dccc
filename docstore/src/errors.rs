use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for docstore operations.
///
/// Each kind describes a category of failure so that callers can translate
/// them into their own response semantics. Errors propagate unmodified — this
/// layer performs no retries and no local recovery.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// A uniqueness constraint in the backing store was violated
    DuplicateKey,
    /// Any other store-side failure (connectivity, malformed filter, constraint)
    BackingStore,
    /// Invalid construction-time state, e.g. a collection name registered twice
    Configuration,
    /// The requested resource was not found
    NotFound,
    /// The provided document identifier is invalid
    InvalidId,
    /// The operation is not valid in the current context
    InvalidOperation,
    /// Error mapping a typed entity to/from a document
    ObjectMapping,
    /// Internal error (usually indicates a bug)
    Internal,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::DuplicateKey => write!(f, "Duplicate key"),
            ErrorKind::BackingStore => write!(f, "Backing store error"),
            ErrorKind::Configuration => write!(f, "Configuration error"),
            ErrorKind::NotFound => write!(f, "Not found"),
            ErrorKind::InvalidId => write!(f, "Invalid ID"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::ObjectMapping => write!(f, "Object mapping error"),
            ErrorKind::Internal => write!(f, "Internal error"),
        }
    }
}

/// Custom docstore error type.
///
/// `DocStoreError` encapsulates the error message, kind, and optional cause.
/// It supports error chaining and backtraces for debugging.
///
/// # Examples
///
/// ```rust,ignore
/// use docstore::errors::{DocStoreError, ErrorKind, DocStoreResult};
///
/// fn example() -> DocStoreResult<()> {
///     Err(DocStoreError::new("Collection 'users' already exists", ErrorKind::Configuration))
/// }
/// ```
#[derive(Clone)]
pub struct DocStoreError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<DocStoreError>>,
    backtrace: Atomic<Backtrace>,
}

impl DocStoreError {
    /// Creates a new `DocStoreError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        DocStoreError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `DocStoreError` with a cause error.
    ///
    /// This creates an error chain where the cause error is preserved for
    /// debugging.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: DocStoreError) -> Self {
        DocStoreError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&Box<DocStoreError>> {
        self.cause.as_ref()
    }
}

impl Display for DocStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for DocStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for DocStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for docstore operations.
///
/// `DocStoreResult<T>` is shorthand for `Result<T, DocStoreError>`.
/// All fallible docstore operations return this type.
pub type DocStoreResult<T> = Result<T, DocStoreError>;

// From trait implementations for internal fallbacks
impl From<String> for DocStoreError {
    fn from(msg: String) -> Self {
        DocStoreError::new(&msg, ErrorKind::Internal)
    }
}

impl From<&str> for DocStoreError {
    fn from(msg: &str) -> Self {
        DocStoreError::new(msg, ErrorKind::Internal)
    }
}
