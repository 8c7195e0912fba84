//! Standard library built-in objects.
//!
//! Only the prototypes the invocation core relies on live here: Object.prototype and
//! Function.prototype.

pub mod core;
pub mod function;
pub mod object;

pub use self::core::register_core_builtins;
