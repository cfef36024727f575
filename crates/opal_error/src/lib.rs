//! Error types shared across the OpalDB workspace.

use std::error::Error;
use std::fmt;

pub type Result<T, E = DbError> = std::result::Result<T, E>;

/// Classifies an error for programmatic handling.
///
/// Schema-resolution failures carry one of the schema kinds so callers can
/// surface them as schema-compatibility errors, distinct from I/O or data
/// corruption errors raised later during value decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbErrorKind {
    /// Schema element 0 is missing or not a group.
    MalformedRootSchema,
    /// The schema parser ran past the supplied element sequence.
    SchemaCursorOutOfBounds,
    /// Two top-level fields share a name.
    DuplicateFieldName,
    /// Elements remained unconsumed after resolving all top-level fields.
    SchemaLengthMismatch,
    /// A list-annotated group violates the two- or three-level list shape.
    InvalidListShape,
    /// A map-annotated group violates the key/value group shape.
    InvalidMapShape,
    /// A physical/logical/converted type combination with no defined mapping.
    UnsupportedSchemaType,
    /// Column lookup miss.
    FieldNotFound,
    /// Anything else, including wrapped foreign errors.
    Internal,
}

impl fmt::Display for DbErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MalformedRootSchema => "malformed root schema",
            Self::SchemaCursorOutOfBounds => "schema cursor out of bounds",
            Self::DuplicateFieldName => "duplicate field name",
            Self::SchemaLengthMismatch => "schema length mismatch",
            Self::InvalidListShape => "invalid list shape",
            Self::InvalidMapShape => "invalid map shape",
            Self::UnsupportedSchemaType => "unsupported schema type",
            Self::FieldNotFound => "field not found",
            Self::Internal => "internal",
        };
        f.write_str(s)
    }
}

/// Error type used throughout the workspace.
#[derive(Debug)]
pub struct DbError {
    kind: DbErrorKind,
    msg: String,
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl DbError {
    pub fn new(kind: DbErrorKind, msg: impl Into<String>) -> Self {
        DbError {
            kind,
            msg: msg.into(),
            source: None,
        }
    }

    /// Create an internal error wrapping some other error.
    pub fn with_source(
        msg: impl Into<String>,
        source: Box<dyn Error + Send + Sync>,
    ) -> Self {
        DbError {
            kind: DbErrorKind::Internal,
            msg: msg.into(),
            source: Some(source),
        }
    }

    pub fn kind(&self) -> DbErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.msg
    }
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|s| s.as_ref() as _)
    }
}

/// Extension trait for converting foreign errors into [`DbError`] while
/// attaching context.
pub trait ResultExt<T> {
    /// Wrap the error with a static context message.
    fn context(self, msg: &'static str) -> Result<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Error + Send + Sync + 'static,
{
    fn context(self, msg: &'static str) -> Result<T> {
        self.map_err(|e| DbError::with_source(msg, Box::new(e)))
    }
}
