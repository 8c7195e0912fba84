//! Function.prototype and its methods.
//!
//! Function.prototype is itself callable: invoking it ignores its arguments and yields
//! `Undefined`. It is created once per [`EvalContext`] with Object.prototype as its
//! prototype, before any other function exists, so building it never consults
//! Function.prototype.

use crate::runner::ds::error::{raise, BootstrapError, ErrorKind, JErrorType};
use crate::runner::ds::function_object::{call, create_native_function, BoundFunction, FunctionKind};
use crate::runner::ds::object::{JsObject, JsObjectType, ObjectClass};
use crate::runner::ds::object_property::{
    PropertyDescriptorSetter, PropertyKey, ARGUMENTS_PROP, CALLER_PROP, LENGTH_PROP,
};
use crate::runner::ds::operations::object::get;
use crate::runner::ds::operations::type_conversion::{to_integer, to_number, to_uint32};
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::types::{EvalContext, NativeFn, ValueResult};

use super::core::install_methods;
use super::object::{any_unknown, object_proto_to_string, OBJECT_PROTOTYPE_METHODS};

/// `(name, length, behaviour)` of the methods specific to Function.prototype.
pub const FUNCTION_PROTOTYPE_METHODS: [(&str, u32, NativeFn); 4] = [
    ("toString", 0, function_proto_to_string),
    ("apply", 2, function_proto_apply),
    ("call", 1, function_proto_call),
    ("bind", 1, function_proto_bind),
];

/// Build the bare Function.prototype object. Its methods are added by [`register`].
pub fn function_prototype_create(object_prototype: &JsObjectType) -> JsObjectType {
    create_native_function(object_prototype, "", 0, function_prototype_call)
}

fn function_prototype_call(
    _ctx: &mut EvalContext,
    _this: JsValue,
    _args: Vec<JsValue>,
) -> ValueResult {
    Ok(JsValue::Undefined)
}

/// Behaviour of `%ThrowTypeError%`.
pub fn throw_type_error(_ctx: &mut EvalContext, _this: JsValue, _args: Vec<JsValue>) -> ValueResult {
    raise(
        ErrorKind::TypeError,
        "'caller' and 'arguments' are restricted function properties and cannot be accessed in this context",
    )
}

/// Install the Object.prototype methods other than `toString`, then the Function
/// methods, on Function.prototype.
pub fn register(ctx: &mut EvalContext) -> Result<(), BootstrapError> {
    let target = ctx.intrinsics().function_prototype().clone();
    let inherited: Vec<(&'static str, u32, NativeFn)> = OBJECT_PROTOTYPE_METHODS
        .iter()
        .filter(|(name, _, _)| *name != "toString")
        .cloned()
        .collect();
    install_methods(ctx, "Function.prototype", &target, &inherited)?;
    install_methods(ctx, "Function.prototype", &target, &FUNCTION_PROTOTYPE_METHODS)
}

/// The callable `this` of apply, call and bind.
fn callable_this(this: &JsValue) -> Result<JsObjectType, JErrorType> {
    match this {
        JsValue::Object(o) if o.borrow().is_callable() => Ok(o.clone()),
        _ => raise(ErrorKind::TypeError, "Attempted to call non-callable value"),
    }
}

/// Function.prototype.toString
pub fn function_proto_to_string(
    ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> ValueResult {
    if any_unknown(&this, &args) {
        return Ok(JsValue::Unknown);
    }
    if this.class() != Some(ObjectClass::Function) {
        return raise(ErrorKind::TypeError, "Cannot invoke non-function type");
    }
    object_proto_to_string(ctx, this, args)
}

/// Function.prototype.apply
///
/// The second argument, when neither `undefined` nor `null`, is read as an array-like:
/// its `length` and then each index below it. Holes read as `Undefined`. A `length`
/// above the context's argument limit is a `RangeError`.
pub fn function_proto_apply(
    ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> ValueResult {
    if any_unknown(&this, &args) {
        return Ok(JsValue::Unknown);
    }
    let target = callable_this(&this)?;
    let mut args = args.into_iter();
    let this_arg = args.next().unwrap_or(JsValue::Undefined);
    let arg_list = match args.next().unwrap_or(JsValue::Undefined) {
        JsValue::Undefined | JsValue::Null => Vec::new(),
        JsValue::Object(arr) => {
            let len = get(ctx, &arr, &LENGTH_PROP)?;
            let len = to_number(ctx, &len)?;
            if len.is_unknown() {
                tracing::debug!("apply: argument list length is unknown");
                return Ok(JsValue::Unknown);
            }
            let n = to_uint32(ctx, &len)?;
            ctx.call_stack.check_argument_count(n as usize)?;
            let mut list = Vec::with_capacity(n as usize);
            for i in 0..n {
                list.push(get(ctx, &arr, &PropertyKey::Int(i))?);
            }
            list
        }
        _ => return raise(ErrorKind::TypeError, "Arguments value is not an object"),
    };
    call(ctx, &target, this_arg, arg_list)
}

/// Function.prototype.call
pub fn function_proto_call(
    ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> ValueResult {
    if any_unknown(&this, &args) {
        return Ok(JsValue::Unknown);
    }
    let target = callable_this(&this)?;
    let mut args = args.into_iter();
    let this_arg = args.next().unwrap_or(JsValue::Undefined);
    call(ctx, &target, this_arg, args.collect())
}

/// Function.prototype.bind
///
/// The result is a new `Function` object whose `[[Call]]`, `[[Construct]]` and
/// `[[HasInstance]]` forward to the target with the captured receiver and argument
/// prefix. Its `length` is the target's minus the prefix length, never below zero, and
/// its `caller` and `arguments` are poisoned with `%ThrowTypeError%`.
pub fn function_proto_bind(
    ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> ValueResult {
    if any_unknown(&this, &args) {
        return Ok(JsValue::Unknown);
    }
    let target = callable_this(&this)?;
    let mut args = args.into_iter();
    let bound_this = args.next().unwrap_or(JsValue::Undefined);
    let bound_args: Vec<JsValue> = args.collect();

    let length = bound_length(ctx, &target, bound_args.len())?;
    tracing::debug!(prefix = bound_args.len(), length = %length, "bind");

    let f = JsObject::new_function(
        FunctionKind::Bound(BoundFunction::new(target, bound_this, bound_args)),
        Some(ctx.intrinsics().function_prototype()),
    )
    .into_shared();
    let thrower = ctx.intrinsics().throw_type_error().clone();
    {
        let mut fb = f.borrow_mut();
        fb.define_own_property(
            LENGTH_PROP.clone(),
            PropertyDescriptorSetter::data(length, false, false, false),
            true,
            false,
        )?;
        for key in [&*CALLER_PROP, &*ARGUMENTS_PROP].iter() {
            fb.define_own_property(
                (*key).clone(),
                PropertyDescriptorSetter::accessor(
                    Some(thrower.clone()),
                    Some(thrower.clone()),
                    false,
                    false,
                ),
                true,
                false,
            )?;
        }
    }
    Ok(JsValue::Object(f))
}

fn bound_length(
    ctx: &mut EvalContext,
    target: &JsObjectType,
    prefix_len: usize,
) -> ValueResult {
    if target.borrow().class() != ObjectClass::Function {
        return Ok(JsValue::from(0i64));
    }
    let target_len = get(ctx, target, &LENGTH_PROP)?;
    let target_len = to_number(ctx, &target_len)?;
    if target_len.is_unknown() {
        return Ok(JsValue::Unknown);
    }
    let n = to_integer(ctx, &target_len)?;
    Ok(JsValue::from_f64((n - prefix_len as f64).max(0.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::array_object::array_create;
    use crate::runner::ds::function_object::{construct, has_instance};
    use crate::runner::ds::object::object_create;
    use crate::runner::ds::operations::object::put;

    fn setup() -> EvalContext {
        EvalContext::new().unwrap()
    }

    fn echo(_ctx: &mut EvalContext, this: JsValue, args: Vec<JsValue>) -> ValueResult {
        let mut out = vec![this];
        out.extend(args);
        Ok(JsValue::from(out.len() as i64))
    }

    fn native(ctx: &EvalContext, arity: u32, f: NativeFn) -> JsValue {
        JsValue::Object(create_native_function(
            ctx.intrinsics().function_prototype(),
            "test",
            arity,
            f,
        ))
    }

    fn this_of(_ctx: &mut EvalContext, this: JsValue, _args: Vec<JsValue>) -> ValueResult {
        Ok(this)
    }

    fn first_arg(_ctx: &mut EvalContext, _this: JsValue, args: Vec<JsValue>) -> ValueResult {
        Ok(args.into_iter().next().unwrap_or(JsValue::Undefined))
    }

    #[test]
    fn test_function_prototype_is_callable() {
        let mut ctx = setup();
        let fp = ctx.intrinsics().function_prototype().clone();
        assert_eq!(fp.borrow().class(), ObjectClass::Function);
        assert_eq!(
            call(&mut ctx, &fp, JsValue::Null, vec![JsValue::from(1i64)]).unwrap(),
            JsValue::Undefined
        );
        assert_eq!(get(&mut ctx, &fp, &LENGTH_PROP).unwrap(), JsValue::from(0i64));
    }

    #[test]
    fn test_function_prototype_methods_installed() {
        use crate::runner::ds::object_property::PropertyDescriptor;

        let mut ctx = setup();
        let fp = ctx.intrinsics().function_prototype().clone();
        let expected = [
            ("toLocaleString", 0i64),
            ("valueOf", 0),
            ("hasOwnProperty", 1),
            ("isPrototypeOf", 1),
            ("propertyIsEnumerable", 1),
            ("toString", 0),
            ("apply", 2),
            ("call", 1),
            ("bind", 1),
        ];
        for (name, arity) in expected.iter() {
            let desc = fp
                .borrow()
                .get_own_property(&PropertyKey::from(*name))
                .cloned()
                .unwrap_or_else(|| panic!("{} is not an own property", name));
            let method = match desc {
                PropertyDescriptor::Data(d) => {
                    assert!(d.writable, "{} writable", name);
                    assert!(!d.enumerable, "{} enumerable", name);
                    assert!(d.configurable, "{} configurable", name);
                    d.value
                }
                PropertyDescriptor::Accessor(_) => panic!("{} is an accessor", name),
            };
            let method = method.as_object().unwrap().clone();
            assert!(method.borrow().is_callable(), "{} callable", name);
            assert_eq!(
                get(&mut ctx, &method, &LENGTH_PROP).unwrap(),
                JsValue::from(*arity),
                "{}.length",
                name
            );
        }
        // Function.prototype's own toString replaces the inherited one.
        let own = get(&mut ctx, &fp, &PropertyKey::from("toString")).unwrap();
        let r = call(&mut ctx, own.as_object().unwrap(), JsValue::Object(fp.clone()), vec![]).unwrap();
        assert_eq!(r, JsValue::from("[object Function]"));
    }

    #[test]
    fn test_to_string() {
        let mut ctx = setup();
        let f = native(&ctx, 0, echo);
        assert_eq!(
            function_proto_to_string(&mut ctx, f, vec![]).unwrap(),
            JsValue::from("[object Function]")
        );
        let o = object_create(Some(ctx.intrinsics().object_prototype()));
        let err = function_proto_to_string(&mut ctx, JsValue::Object(o), vec![]).unwrap_err();
        assert_eq!(err, JErrorType::TypeError("Cannot invoke non-function type".to_string()));
        assert_eq!(
            function_proto_to_string(&mut ctx, JsValue::Unknown, vec![]).unwrap(),
            JsValue::Unknown
        );
    }

    #[test]
    fn test_call_passes_receiver() {
        let mut ctx = setup();
        let f = native(&ctx, 0, this_of);
        let r = function_proto_call(&mut ctx, f.clone(), vec![JsValue::from(7i64)]).unwrap();
        assert_eq!(r, JsValue::from(7i64));
        let r = function_proto_call(&mut ctx, f, vec![]).unwrap();
        assert_eq!(r, JsValue::Undefined);
    }

    #[test]
    fn test_apply_reads_array_like() {
        let mut ctx = setup();
        let f = native(&ctx, 0, echo);
        let arr = array_create(&ctx, vec![JsValue::from(1i64), JsValue::from(2i64)]);
        let r = function_proto_apply(&mut ctx, f.clone(), vec![JsValue::Null, JsValue::Object(arr)])
            .unwrap();
        assert_eq!(r, JsValue::from(3i64));
        let r = function_proto_apply(&mut ctx, f.clone(), vec![JsValue::Null, JsValue::Null]).unwrap();
        assert_eq!(r, JsValue::from(1i64));

        let like = object_create(Some(ctx.intrinsics().object_prototype()));
        put(&mut ctx, &like, LENGTH_PROP.clone(), JsValue::from(4i64), true, false).unwrap();
        let r = function_proto_apply(&mut ctx, f.clone(), vec![JsValue::Null, JsValue::Object(like)])
            .unwrap();
        assert_eq!(r, JsValue::from(5i64));

        let err = function_proto_apply(&mut ctx, f, vec![JsValue::Null, JsValue::from(1i64)])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeError);
    }

    #[test]
    fn test_apply_unknown_length() {
        let mut ctx = setup();
        let f = native(&ctx, 0, echo);
        let like = object_create(Some(ctx.intrinsics().object_prototype()));
        put(&mut ctx, &like, LENGTH_PROP.clone(), JsValue::Unknown, true, false).unwrap();
        let r = function_proto_apply(&mut ctx, f, vec![JsValue::Null, JsValue::Object(like)])
            .unwrap();
        assert_eq!(r, JsValue::Unknown);
    }

    #[test]
    fn test_non_callable_this() {
        let mut ctx = setup();
        let o = JsValue::Object(object_create(Some(ctx.intrinsics().object_prototype())));
        for f in [function_proto_apply, function_proto_call, function_proto_bind].iter() {
            let err = f(&mut ctx, o.clone(), vec![]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::TypeError);
        }
    }

    #[test]
    fn test_bind_shape() {
        let mut ctx = setup();
        let target = native(&ctx, 3, echo);
        let b = function_proto_bind(
            &mut ctx,
            target,
            vec![JsValue::Null, JsValue::from(1i64)],
        )
        .unwrap();
        let b = b.as_object().unwrap().clone();
        assert_eq!(b.borrow().class(), ObjectClass::Function);
        assert!(b.borrow().is_extensible());
        assert_eq!(get(&mut ctx, &b, &LENGTH_PROP).unwrap(), JsValue::from(2i64));
        let len = b.borrow().get_own_property(&LENGTH_PROP).cloned().unwrap();
        assert!(!len.is_enumerable());
        assert!(!len.is_configurable());
        let caller = b.borrow().get_own_property(&CALLER_PROP).cloned().unwrap();
        assert!(caller.is_accessor_descriptor());
        assert!(!caller.is_enumerable());
        assert!(get(&mut ctx, &b, &ARGUMENTS_PROP).is_err());
    }

    #[test]
    fn test_bind_length_floors_at_zero() {
        let mut ctx = setup();
        let target = native(&ctx, 1, echo);
        let args = vec![JsValue::Null, JsValue::from(1i64), JsValue::from(2i64)];
        let b = function_proto_bind(&mut ctx, target, args).unwrap();
        let b = b.as_object().unwrap().clone();
        assert_eq!(get(&mut ctx, &b, &LENGTH_PROP).unwrap(), JsValue::from(0i64));
    }

    #[test]
    fn test_bound_call_prepends_arguments() {
        let mut ctx = setup();
        let target = native(&ctx, 2, first_arg);
        let b = function_proto_bind(&mut ctx, target, vec![JsValue::Null, JsValue::from("a")])
            .unwrap();
        let b = b.as_object().unwrap().clone();
        let r = call(&mut ctx, &b, JsValue::Undefined, vec![JsValue::from("b")]).unwrap();
        assert_eq!(r, JsValue::from("a"));
    }

    #[test]
    fn test_bound_receiver_wins() {
        let mut ctx = setup();
        let target = native(&ctx, 0, this_of);
        let b = function_proto_bind(&mut ctx, target, vec![JsValue::from(1i64)]).unwrap();
        let r = function_proto_call(&mut ctx, b, vec![JsValue::from(2i64)]).unwrap();
        assert_eq!(r, JsValue::from(1i64));
    }

    #[test]
    fn test_bound_native_without_construct() {
        let mut ctx = setup();
        let target = native(&ctx, 0, echo);
        let b = function_proto_bind(&mut ctx, target, vec![]).unwrap();
        let b = b.as_object().unwrap().clone();
        let err = construct(&mut ctx, &b, vec![]).err().unwrap();
        assert_eq!(
            err,
            JErrorType::TypeError("Bind target does not have a constructor".to_string())
        );
        let o = JsValue::Object(object_create(Some(ctx.intrinsics().object_prototype())));
        // Native targets have no own `prototype`.
        assert!(has_instance(&mut ctx, &b, &o).is_err());
    }
}
