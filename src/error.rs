//! Error and result types for the `badbatch` crate.

use std::fmt;

/// A result that is either `Ok(T)` or `Err(badbatch::Error)`.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An extension trait for [`badbatch::Result`][crate::Result] that provides
/// additional methods.
pub trait ResultExt<T> {
    /// Turns an [`AmbiguousPath`][ErrorKind::AmbiguousPath] error into
    /// `Ok(None)`, wrapping successful values in `Some`.
    ///
    /// # Examples
    ///
    /// ```
    /// use badbatch::{unflatten, ResultExt};
    /// use serde_json::json;
    ///
    /// let flat = json!({"a": 1, "a.b": 2});
    /// let value = unflatten(flat.as_object().unwrap()).ignore_ambiguous();
    /// assert!(matches!(value, Ok(None)));
    /// ```
    fn ignore_ambiguous(self) -> Result<Option<T>>;
}

impl<T> ResultExt<T> for Result<T> {
    #[inline]
    fn ignore_ambiguous(self) -> Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                if err.is_ambiguous_path() {
                    Ok(None)
                } else {
                    Err(err)
                }
            }
        }
    }
}

/// An error that can occur when using the `badbatch` crate.
///
/// This type is a thin wrapper around [`ErrorKind`], which contains the
/// specific kind of error that occurred.
///
/// # Examples
///
/// ```
/// use badbatch::{Error, ErrorKind};
///
/// let error: Error = {
///     // ...
/// #   Error::ambiguous_path("a.0")
/// };
///
/// if error.is_ambiguous_path() {
///     println!("ambiguous!");
/// }
///
/// match error.kind() {
///     ErrorKind::AmbiguousPath { path } => println!("ambiguous at {path}"),
///     ErrorKind::Serialization(e) => println!("codec failure: {e}"),
///
///     // The `ErrorKind` type is not exhaustive, so we always need a catch-all arm.
///     unknown => println!("unknown! {unknown:?}"),
/// }
/// ```
pub struct Error {
    kind: Box<ErrorKind>,
}

impl From<ErrorKind> for Error {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
        }
    }
}

impl From<serde_json::Error> for Error {
    #[inline]
    fn from(e: serde_json::Error) -> Self {
        ErrorKind::Serialization(e).into()
    }
}

impl From<url::ParseError> for Error {
    #[inline]
    fn from(e: url::ParseError) -> Self {
        ErrorKind::InvalidUrl(e).into()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.kind {
            ErrorKind::Serialization(e) => {
                write!(f, "failed to (de)serialize a value tree: {e}")
            }
            ErrorKind::AmbiguousPath { path } => {
                write!(
                    f,
                    "flat path `{path}` is used both as an object key and as an array \
                     index (or both as a leaf and a container)"
                )
            }
            ErrorKind::MissingToken { token } => {
                write!(f, "expected token `{token}` was not found in the serialized baseline")
            }
            ErrorKind::Incorruptible { path } => {
                write!(f, "the value at `{path}` is not a scalar and cannot be corrupted")
            }
            ErrorKind::InvalidUrl(e) => {
                write!(f, "the baseline url is invalid: {e}")
            }
            ErrorKind::UnsupportedMethod(method) => {
                write!(f, "unsupported request method `{method}`")
            }
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &*self.kind {
            ErrorKind::Serialization(e) => Some(e),
            ErrorKind::InvalidUrl(e) => Some(e),
            _ => None,
        }
    }
}

impl Error {
    /// Returns a new error indicating that a flat path has conflicting usages.
    #[must_use]
    pub fn ambiguous_path(path: impl Into<String>) -> Self {
        ErrorKind::AmbiguousPath { path: path.into() }.into()
    }

    /// Returns a new error indicating that an expected token is missing from
    /// the serialized baseline.
    #[must_use]
    pub fn missing_token(token: impl Into<String>) -> Self {
        ErrorKind::MissingToken {
            token: token.into(),
        }
        .into()
    }

    /// Returns a new error indicating that a non-scalar value was targeted for
    /// corruption.
    #[must_use]
    pub fn incorruptible(path: impl Into<String>) -> Self {
        ErrorKind::Incorruptible { path: path.into() }.into()
    }

    /// Returns a new error indicating that the given request method has no
    /// known success code.
    #[must_use]
    pub fn unsupported_method(method: impl Into<String>) -> Self {
        ErrorKind::UnsupportedMethod(method.into()).into()
    }

    /// Returns the kind of this error.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns `true` if the error's kind is
    /// [`Serialization`][ErrorKind::Serialization].
    #[must_use]
    pub fn is_serialization(&self) -> bool {
        matches!(self.kind(), ErrorKind::Serialization(_))
    }

    /// Returns `true` if the error's kind is
    /// [`AmbiguousPath`][ErrorKind::AmbiguousPath].
    #[must_use]
    pub fn is_ambiguous_path(&self) -> bool {
        matches!(self.kind(), ErrorKind::AmbiguousPath { .. })
    }

    /// Returns `true` if the error's kind is
    /// [`MissingToken`][ErrorKind::MissingToken].
    #[must_use]
    pub fn is_missing_token(&self) -> bool {
        matches!(self.kind(), ErrorKind::MissingToken { .. })
    }

    /// Returns `true` if the error's kind is
    /// [`InvalidUrl`][ErrorKind::InvalidUrl].
    #[must_use]
    pub fn is_invalid_url(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidUrl(_))
    }

    /// Returns `true` if the error's kind is
    /// [`UnsupportedMethod`][ErrorKind::UnsupportedMethod].
    #[must_use]
    pub fn is_unsupported_method(&self) -> bool {
        matches!(self.kind(), ErrorKind::UnsupportedMethod(_))
    }
}

/// The kind of an error that can occur when using the `badbatch` crate.
///
/// This enum is not exhaustive, and new variants may be added in the future.
/// When matching on this enum, a catch-all arm should be used to handle any
/// new variants that are added.
#[non_exhaustive]
#[derive(Debug)]
pub enum ErrorKind {
    /// Serializing a tree, or re-parsing mutated text, failed.
    ///
    /// Mutated text is always derived from an already-serializable baseline,
    /// so this points at an engine defect or at substitutions that do not
    /// keep literals parseable (for example a non-digit digit substitute).
    Serialization(serde_json::Error),

    /// A flat path is used with conflicting shapes and cannot be unflattened.
    AmbiguousPath {
        /// The path prefix at which the conflict was found.
        path: String,
    },

    /// A `"path": value` token expected in the serialized baseline was not
    /// found.
    MissingToken {
        /// The token that was searched for.
        token: String,
    },

    /// A container value was passed as a corruptable entry.
    Incorruptible {
        /// The flat path of the offending entry.
        path: String,
    },

    /// The baseline url could not be parsed.
    InvalidUrl(url::ParseError),

    /// The request method has no known success code.
    UnsupportedMethod(String),
}
