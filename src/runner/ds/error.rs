use std::fmt;
use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Name of a native error kind, as used by [`raise`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ReferenceError,
    TypeError,
    RangeError,
    SyntaxError,
}
impl ErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::ReferenceError => "ReferenceError",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::RangeError => "RangeError",
            ErrorKind::SyntaxError => "SyntaxError",
        }
    }
}
impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An exception thrown by a native operation. It unwinds, by `?`, to the nearest
/// frame of the walker that is prepared to catch it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JErrorType {
    #[error("Uncaught reference error: {0}.")]
    ReferenceError(String),
    #[error("Uncaught type error: {0}.")]
    TypeError(String),
    #[error("Uncaught range error: {0}.")]
    RangeError(String),
    #[error("Uncaught syntax error: {0}.")]
    SyntaxError(String),
}
impl JErrorType {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            ErrorKind::ReferenceError => JErrorType::ReferenceError(message),
            ErrorKind::TypeError => JErrorType::TypeError(message),
            ErrorKind::RangeError => JErrorType::RangeError(message),
            ErrorKind::SyntaxError => JErrorType::SyntaxError(message),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            JErrorType::ReferenceError(_) => ErrorKind::ReferenceError,
            JErrorType::TypeError(_) => ErrorKind::TypeError,
            JErrorType::RangeError(_) => ErrorKind::RangeError,
            JErrorType::SyntaxError(_) => ErrorKind::SyntaxError,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            JErrorType::ReferenceError(m)
            | JErrorType::TypeError(m)
            | JErrorType::RangeError(m)
            | JErrorType::SyntaxError(m) => m,
        }
    }
}

/// Raise a native exception of the given kind.
///
/// ```
/// use jsabsint::runner::ds::error::{raise, ErrorKind, JErrorType};
///
/// let r: Result<(), JErrorType> = raise(ErrorKind::TypeError, "boom");
/// assert_eq!(r, Err(JErrorType::TypeError("boom".to_string())));
/// ```
pub fn raise<T>(kind: ErrorKind, message: impl Into<String>) -> Result<T, JErrorType> {
    Err(JErrorType::new(kind, message))
}

/// Failure while installing the built-in object graph. Unlike [`JErrorType`] this is
/// never caught by the walker; it aborts the analysis run.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to install '{property}' on {target}: {source}")]
    Install {
        target: &'static str,
        property: String,
        #[source]
        source: JErrorType,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_kind() {
        let e = JErrorType::new(ErrorKind::TypeError, "Attempted to call non-callable value");
        assert_eq!(
            e.to_string(),
            "Uncaught type error: Attempted to call non-callable value."
        );
        assert_eq!(e.kind(), ErrorKind::TypeError);
        assert_eq!(e.message(), "Attempted to call non-callable value");
    }

    #[test]
    fn test_raise_every_kind() {
        for kind in [
            ErrorKind::ReferenceError,
            ErrorKind::TypeError,
            ErrorKind::RangeError,
            ErrorKind::SyntaxError,
        ]
        .iter()
        {
            let r: Result<u32, JErrorType> = raise(*kind, "m");
            let e = r.unwrap_err();
            assert_eq!(e.kind(), *kind);
            assert_eq!(e.message(), "m");
        }
    }

    #[test]
    fn test_bootstrap_error_keeps_source() {
        use std::error::Error;
        let e = BootstrapError::Install {
            target: "Function.prototype",
            property: "apply".to_string(),
            source: JErrorType::TypeError("x".to_string()),
        };
        assert!(e.to_string().starts_with("failed to install 'apply' on Function.prototype"));
        assert!(e.source().is_some());
    }
}
