//! Core types for the evaluation engine.
//!
//! An analysis run does not stop at the first exception. The walker turns each thrown
//! [`JErrorType`] into a [`Diagnostic`] and continues with `Unknown` as the result of the
//! failing expression.

use std::fmt;
use std::fmt::{Display, Formatter};

use crate::runner::ds::error::{ErrorKind, JErrorType};
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::types::ValueResult;

/// Position of an expression in the analysed source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub filename: String,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(filename: impl Into<String>, line: u32, column: u32) -> Self {
        SourceLocation {
            filename: filename.into(),
            line,
            column,
        }
    }
}

impl Display for SourceLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// An exception observed during analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub location: SourceLocation,
    pub kind: ErrorKind,
    pub message: String,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.location, self.kind, self.message)
    }
}

/// Diagnostics collected over one analysis run, in the order they were raised.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    /// Record `error` as raised at `location`.
    pub fn record(&mut self, error: &JErrorType, location: &SourceLocation) {
        tracing::debug!(%location, kind = %error.kind(), message = error.message(), "recovered from exception");
        self.entries.push(Diagnostic {
            location: location.clone(),
            kind: error.kind(),
            message: error.message().to_string(),
        });
    }

    /// The value of `result`, or `Unknown` after recording its error.
    pub fn recover(&mut self, result: ValueResult, location: &SourceLocation) -> JsValue {
        match result {
            Ok(v) => v,
            Err(e) => {
                self.record(&e, location);
                JsValue::Unknown
            }
        }
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recover_records_and_yields_unknown() {
        let mut d = Diagnostics::new();
        let at = SourceLocation::new("a.js", 3, 7);
        assert_eq!(d.recover(Ok(JsValue::Null), &at), JsValue::Null);
        assert!(d.is_empty());
        let r = d.recover(
            Err(JErrorType::new(ErrorKind::TypeError, "Cannot invoke non-function type")),
            &at,
        );
        assert_eq!(r, JsValue::Unknown);
        assert_eq!(d.len(), 1);
        assert_eq!(
            d.entries()[0].to_string(),
            "a.js:3:7: TypeError: Cannot invoke non-function type"
        );
        d.clear();
        assert!(d.is_empty());
    }
}
