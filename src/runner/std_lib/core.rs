//! Core built-ins registration.
//!
//! Installs the methods of Object.prototype and Function.prototype onto the intrinsic
//! objects of a fresh [`EvalContext`].

use crate::runner::ds::error::{BootstrapError, ErrorKind, JErrorType};
use crate::runner::ds::function_object::create_native_function;
use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::operations::object::put;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::types::{EvalContext, NativeFn};

use super::function;
use super::object;

/// Register all core built-ins. Object.prototype goes first since Function.prototype
/// shares its methods.
pub fn register_core_builtins(ctx: &mut EvalContext) -> Result<(), BootstrapError> {
    object::register(ctx)?;
    function::register(ctx)?;
    Ok(())
}

/// Wrap each `(name, length, behaviour)` as a native function and store it on `target`
/// as a non-enumerable property. A property that cannot be stored aborts the bootstrap.
pub(crate) fn install_methods(
    ctx: &mut EvalContext,
    target_name: &'static str,
    target: &JsObjectType,
    methods: &[(&'static str, u32, NativeFn)],
) -> Result<(), BootstrapError> {
    let function_prototype = ctx.intrinsics().function_prototype().clone();
    for &(name, arity, behaviour) in methods {
        let f = create_native_function(&function_prototype, name, arity, behaviour);
        let installed = put(ctx, target, PropertyKey::from(name), JsValue::Object(f), false, true);
        let source = match installed {
            Ok(true) => continue,
            Ok(false) => JErrorType::new(ErrorKind::TypeError, "property was not stored"),
            Err(e) => e,
        };
        return Err(BootstrapError::Install {
            target: target_name,
            property: name.to_string(),
            source,
        });
    }
    tracing::trace!(target_name, count = methods.len(), "installed built-in methods");
    Ok(())
}
