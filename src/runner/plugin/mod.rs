//! Types shared with native functions, and the analysis plugins.
//!
//! [`EvalContext`](types::EvalContext) is the handle every native function receives.
//! Plugins keep their own state and are fed by the walker; none of them reach into the
//! context.

pub mod include_finder;
pub mod types;

pub use include_finder::IncludeFinder;
pub use types::{EvalContext, NativeConstructFn, NativeFn, ValueResult};
