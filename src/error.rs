use thiserror::Error;

// ---------------------------------------------------------------------------
// MergeError
// ---------------------------------------------------------------------------

/// A failure while coercing or merging a remote payload against local state.
///
/// Any failure inside a nested merge aborts the enclosing merge and surfaces
/// the innermost error unchanged — no partial merged tree is ever returned.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("property \"{property}\": schema declares {expected}, payload held {received}")]
    SchemaMismatch {
        property: String,
        expected: &'static str,
        received: &'static str,
    },

    #[error(
        "property \"{0}\" declares neither a primitive item kind nor an element schema \
         and cannot be merged"
    )]
    UnsupportedType(String),
}

// ---------------------------------------------------------------------------
// IdentifierError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum IdentifierError {
    #[error("schema does not designate an identifier property")]
    NoIdentifierProperty,

    #[error("payload is missing mandatory identifier property \"{0}\"")]
    MissingIdentifier(String),

    #[error("identifier property \"{property}\" holds a {received} value, which cannot form an id")]
    UnsupportedIdentifierType {
        property: String,
        received: &'static str,
    },
}

// ---------------------------------------------------------------------------
// StateError
// ---------------------------------------------------------------------------

/// A failure raised by the persisted-state boundary while storing a merged
/// property value.
#[derive(Debug, Error)]
#[error("state rejected value for property \"{property}\": {message}")]
pub struct StateError {
    pub property: String,
    pub message: String,
}

impl StateError {
    pub fn new(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// RemoteStateError — top-level rollup
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum RemoteStateError {
    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    #[error(transparent)]
    State(#[from] StateError),
}

/// Convenience alias — the default error type is `RemoteStateError`.
pub type Result<T, E = RemoteStateError> = std::result::Result<T, E>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
