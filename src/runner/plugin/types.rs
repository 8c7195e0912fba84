//! Core types shared by every native function.

use crate::runner::ds::call_stack::{CallStack, CallStackConfig};
use crate::runner::ds::error::{BootstrapError, JErrorType};
use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::realm::Intrinsics;
use crate::runner::ds::value::JsValue;
use crate::runner::std_lib::register_core_builtins;

/// Outcome of evaluating anything that may throw.
pub type ValueResult = Result<JsValue, JErrorType>;

/// Function signature for built-in methods.
/// Native functions receive the evaluation context, `this` value, and arguments.
pub type NativeFn = fn(ctx: &mut EvalContext, this: JsValue, args: Vec<JsValue>) -> ValueResult;

/// Signature of a native `[[Construct]]` behaviour.
pub type NativeConstructFn =
    fn(ctx: &mut EvalContext, args: Vec<JsValue>) -> Result<JsObjectType, JErrorType>;

/// Execution context passed to native functions.
///
/// One context serves one analysis run. It owns the intrinsic objects and the
/// recursion guard consulted by every `[[Call]]`.
pub struct EvalContext {
    intrinsics: Intrinsics,
    pub(crate) call_stack: CallStack,
}

impl EvalContext {
    /// A context with the default recursion limit and all built-ins installed.
    pub fn new() -> Result<Self, BootstrapError> {
        Self::with_config(CallStackConfig::default())
    }

    pub fn with_config(config: CallStackConfig) -> Result<Self, BootstrapError> {
        let mut ctx = EvalContext {
            intrinsics: Intrinsics::new(),
            call_stack: CallStack::new(config),
        };
        register_core_builtins(&mut ctx)?;
        tracing::debug!(max_depth = ?ctx.call_stack.config().max_depth, "evaluation context ready");
        Ok(ctx)
    }

    pub fn intrinsics(&self) -> &Intrinsics {
        &self.intrinsics
    }

    /// Number of calls currently in progress.
    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }
}
