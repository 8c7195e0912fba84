//! Call-depth tracking for native and bound-function dispatch.
//!
//! Bound functions and native methods re-enter the invocation protocol, so a delegation
//! chain that never bottoms out would otherwise exhaust the host stack. The same
//! configuration caps how many arguments an array-like may spread into one call.

use crate::runner::ds::error::{ErrorKind, JErrorType};

pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;
pub const DEFAULT_MAX_ARGUMENTS: usize = 65_535;

/// Configuration for the call-depth guard.
#[derive(Debug, Clone)]
pub struct CallStackConfig {
    /// Maximum number of nested dispatches. None means unlimited.
    pub max_depth: Option<usize>,
    /// Largest argument list `apply` will build from an array-like.
    pub max_arguments: usize,
}

impl CallStackConfig {
    /// No depth limit; only the host stack bounds recursion.
    pub fn unlimited() -> Self {
        CallStackConfig {
            max_depth: None,
            max_arguments: DEFAULT_MAX_ARGUMENTS,
        }
    }

    pub fn with_limit(max_depth: usize) -> Self {
        CallStackConfig {
            max_depth: Some(max_depth),
            max_arguments: DEFAULT_MAX_ARGUMENTS,
        }
    }

    pub fn with_max_arguments(mut self, max_arguments: usize) -> Self {
        self.max_arguments = max_arguments;
        self
    }
}

impl Default for CallStackConfig {
    fn default() -> Self {
        Self::with_limit(DEFAULT_MAX_CALL_DEPTH)
    }
}

#[derive(Debug)]
pub struct CallStack {
    config: CallStackConfig,
    depth: usize,
}

impl CallStack {
    pub fn new(config: CallStackConfig) -> Self {
        CallStack { config, depth: 0 }
    }

    /// Enter a frame.
    ///
    /// Returns a recoverable `RangeError` if the frame would exceed the limit.
    pub fn enter(&mut self) -> Result<(), JErrorType> {
        if let Some(max_depth) = self.config.max_depth {
            if self.depth >= max_depth {
                tracing::warn!(max_depth, "call depth limit reached");
                return Err(JErrorType::new(
                    ErrorKind::RangeError,
                    "Maximum call stack size exceeded",
                ));
            }
        }
        self.depth += 1;
        Ok(())
    }

    /// Reject an argument list longer than the configured maximum before it is built.
    pub fn check_argument_count(&self, count: usize) -> Result<(), JErrorType> {
        if count > self.config.max_arguments {
            tracing::debug!(
                count,
                max_arguments = self.config.max_arguments,
                "argument list too long"
            );
            return Err(JErrorType::new(
                ErrorKind::RangeError,
                "Too many arguments in function call",
            ));
        }
        Ok(())
    }

    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn config(&self) -> &CallStackConfig {
        &self.config
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new(CallStackConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_stack_unlimited() {
        let mut stack = CallStack::new(CallStackConfig::unlimited());
        for _ in 0..10_000 {
            assert!(stack.enter().is_ok());
        }
        assert_eq!(stack.depth(), 10_000);
    }

    #[test]
    fn test_call_stack_limited() {
        let mut stack = CallStack::new(CallStackConfig::with_limit(2));
        assert!(stack.enter().is_ok());
        assert!(stack.enter().is_ok());

        let result = stack.enter();
        assert_eq!(
            result,
            Err(JErrorType::RangeError(
                "Maximum call stack size exceeded".to_string()
            ))
        );
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn test_call_stack_exit() {
        let mut stack = CallStack::new(CallStackConfig::with_limit(1));
        stack.enter().unwrap();
        stack.exit();
        assert_eq!(stack.depth(), 0);
        assert!(stack.enter().is_ok());

        stack.exit();
        stack.exit();
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_default_limit() {
        let stack = CallStack::default();
        assert_eq!(stack.config().max_depth, Some(DEFAULT_MAX_CALL_DEPTH));
        assert_eq!(stack.config().max_arguments, DEFAULT_MAX_ARGUMENTS);
    }

    #[test]
    fn test_argument_count_limit() {
        let stack = CallStack::new(CallStackConfig::unlimited().with_max_arguments(3));
        assert!(stack.check_argument_count(0).is_ok());
        assert!(stack.check_argument_count(3).is_ok());
        assert_eq!(
            stack.check_argument_count(4),
            Err(JErrorType::RangeError(
                "Too many arguments in function call".to_string()
            ))
        );
    }
}
