//! Object.prototype methods.
//!
//! Every method yields `Unknown` without doing anything when `this` or any argument is
//! `Unknown`.

use std::rc::Rc;

use crate::runner::ds::error::{raise, BootstrapError, ErrorKind, JErrorType};
use crate::runner::ds::function_object::call;
use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::operations::object::get;
use crate::runner::ds::operations::test_and_comparison::are_any_unknown;
use crate::runner::ds::operations::type_conversion::to_string;
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::types::{EvalContext, NativeFn, ValueResult};

use super::core::install_methods;

/// `(name, length, behaviour)` of each Object.prototype method.
pub const OBJECT_PROTOTYPE_METHODS: [(&str, u32, NativeFn); 6] = [
    ("toString", 0, object_proto_to_string),
    ("toLocaleString", 0, object_proto_to_locale_string),
    ("valueOf", 0, object_proto_value_of),
    ("hasOwnProperty", 1, object_proto_has_own_property),
    ("isPrototypeOf", 1, object_proto_is_prototype_of),
    ("propertyIsEnumerable", 1, object_proto_property_is_enumerable),
];

/// Install the methods on Object.prototype.
pub fn register(ctx: &mut EvalContext) -> Result<(), BootstrapError> {
    let target = ctx.intrinsics().object_prototype().clone();
    install_methods(ctx, "Object.prototype", &target, &OBJECT_PROTOTYPE_METHODS)
}

pub(crate) fn any_unknown(this: &JsValue, args: &[JsValue]) -> bool {
    are_any_unknown(std::iter::once(this).chain(args.iter()))
}

fn arg(args: &[JsValue], index: usize) -> JsValue {
    args.get(index).cloned().unwrap_or(JsValue::Undefined)
}

fn require_object_coercible(this: &JsValue) -> Result<(), JErrorType> {
    match this {
        JsValue::Undefined | JsValue::Null => raise(
            ErrorKind::TypeError,
            "Cannot convert undefined or null to object",
        ),
        _ => Ok(()),
    }
}

/// `ToPropertyKey`; `None` when the conversion lands on `Unknown`.
fn property_key_of(ctx: &mut EvalContext, v: &JsValue) -> Result<Option<PropertyKey>, JErrorType> {
    Ok(match to_string(ctx, v)? {
        JsValue::String(s) => Some(PropertyKey::from(s)),
        _ => None,
    })
}

/// Object.prototype.toString
pub fn object_proto_to_string(
    _ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> ValueResult {
    if any_unknown(&this, &args) {
        return Ok(JsValue::Unknown);
    }
    let tag = match &this {
        JsValue::Undefined => "Undefined",
        JsValue::Null => "Null",
        JsValue::Boolean(_) => "Boolean",
        JsValue::Number(_) => "Number",
        JsValue::String(_) => "String",
        JsValue::Object(o) => o.borrow().class().name(),
        JsValue::Unknown => return Ok(JsValue::Unknown),
    };
    Ok(JsValue::String(format!("[object {}]", tag)))
}

/// Object.prototype.toLocaleString
fn object_proto_to_locale_string(
    ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> ValueResult {
    if any_unknown(&this, &args) {
        return Ok(JsValue::Unknown);
    }
    require_object_coercible(&this)?;
    match &this {
        JsValue::Object(o) => match get(ctx, o, &PropertyKey::from("toString"))? {
            JsValue::Unknown => Ok(JsValue::Unknown),
            JsValue::Object(f) if f.borrow().is_callable() => {
                call(ctx, &f, this.clone(), Vec::new())
            }
            _ => raise(ErrorKind::TypeError, "toString is not a function"),
        },
        // Primitives have no wrapper objects here.
        _ => to_string(ctx, &this),
    }
}

/// Object.prototype.valueOf
fn object_proto_value_of(
    _ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> ValueResult {
    if any_unknown(&this, &args) {
        return Ok(JsValue::Unknown);
    }
    require_object_coercible(&this)?;
    Ok(this)
}

/// Object.prototype.hasOwnProperty
fn object_proto_has_own_property(
    ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> ValueResult {
    if any_unknown(&this, &args) {
        return Ok(JsValue::Unknown);
    }
    let key = match property_key_of(ctx, &arg(&args, 0))? {
        Some(key) => key,
        None => return Ok(JsValue::Unknown),
    };
    require_object_coercible(&this)?;
    Ok(JsValue::Boolean(match &this {
        JsValue::Object(o) => o.borrow().has_own_property(&key),
        _ => false,
    }))
}

/// Object.prototype.isPrototypeOf
fn object_proto_is_prototype_of(
    _ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> ValueResult {
    if any_unknown(&this, &args) {
        return Ok(JsValue::Unknown);
    }
    let v = match arg(&args, 0) {
        JsValue::Object(v) => v,
        _ => return Ok(JsValue::Boolean(false)),
    };
    require_object_coercible(&this)?;
    let o = match &this {
        JsValue::Object(o) => o,
        _ => return Ok(JsValue::Boolean(false)),
    };
    Ok(JsValue::Boolean(is_on_chain(o, &v)))
}

fn is_on_chain(o: &JsObjectType, v: &JsObjectType) -> bool {
    let mut current = v.borrow().get_prototype_of();
    while let Some(p) = current {
        if Rc::ptr_eq(&p, o) {
            return true;
        }
        current = p.borrow().get_prototype_of();
    }
    false
}

/// Object.prototype.propertyIsEnumerable
fn object_proto_property_is_enumerable(
    ctx: &mut EvalContext,
    this: JsValue,
    args: Vec<JsValue>,
) -> ValueResult {
    if any_unknown(&this, &args) {
        return Ok(JsValue::Unknown);
    }
    let key = match property_key_of(ctx, &arg(&args, 0))? {
        Some(key) => key,
        None => return Ok(JsValue::Unknown),
    };
    require_object_coercible(&this)?;
    Ok(JsValue::Boolean(match &this {
        JsValue::Object(o) => o
            .borrow()
            .get_own_property(&key)
            .map_or(false, |d| d.is_enumerable()),
        _ => false,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ds::array_object::array_create;
    use crate::runner::ds::object::object_create;
    use crate::runner::ds::object_property::PropertyDescriptorSetter;
    use crate::runner::ds::operations::object::define_property_or_throw;

    fn setup() -> EvalContext {
        EvalContext::new().unwrap()
    }

    #[test]
    fn test_to_string_tags() {
        let mut ctx = setup();
        let o = object_create(Some(ctx.intrinsics().object_prototype()));
        let a = array_create(&ctx, vec![]);
        let cases = vec![
            (JsValue::Undefined, "[object Undefined]"),
            (JsValue::Null, "[object Null]"),
            (JsValue::from(true), "[object Boolean]"),
            (JsValue::from(1i64), "[object Number]"),
            (JsValue::from("s"), "[object String]"),
            (JsValue::Object(o), "[object Object]"),
            (JsValue::Object(a), "[object Array]"),
        ];
        for (this, expected) in cases {
            assert_eq!(
                object_proto_to_string(&mut ctx, this, vec![]).unwrap(),
                JsValue::from(expected)
            );
        }
    }

    #[test]
    fn test_unknown_short_circuits() {
        let mut ctx = setup();
        for (_, _, f) in OBJECT_PROTOTYPE_METHODS.iter() {
            assert_eq!(f(&mut ctx, JsValue::Unknown, vec![]).unwrap(), JsValue::Unknown);
            assert_eq!(
                f(&mut ctx, JsValue::Null, vec![JsValue::Unknown]).unwrap(),
                JsValue::Unknown
            );
        }
    }

    #[test]
    fn test_has_own_property() {
        let mut ctx = setup();
        let o = object_create(Some(ctx.intrinsics().object_prototype()));
        define_property_or_throw(
            &o,
            "x".into(),
            PropertyDescriptorSetter::data(JsValue::Null, true, false, true),
        )
        .unwrap();
        let this = JsValue::Object(o);
        let has = |ctx: &mut EvalContext, k: &str| {
            object_proto_has_own_property(ctx, this.clone(), vec![JsValue::from(k)]).unwrap()
        };
        assert_eq!(has(&mut ctx, "x"), JsValue::from(true));
        assert_eq!(has(&mut ctx, "toString"), JsValue::from(false));
        assert_eq!(
            object_proto_property_is_enumerable(&mut ctx, this.clone(), vec![JsValue::from("x")])
                .unwrap(),
            JsValue::from(false)
        );
        let err = object_proto_has_own_property(&mut ctx, JsValue::Undefined, vec![]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeError);
    }

    #[test]
    fn test_is_prototype_of() {
        let mut ctx = setup();
        let proto = ctx.intrinsics().object_prototype().clone();
        let o = object_create(Some(&proto));
        let r = object_proto_is_prototype_of(
            &mut ctx,
            JsValue::Object(proto.clone()),
            vec![JsValue::Object(o.clone())],
        )
        .unwrap();
        assert_eq!(r, JsValue::from(true));
        let r = object_proto_is_prototype_of(&mut ctx, JsValue::Object(o), vec![JsValue::Object(proto)])
            .unwrap();
        assert_eq!(r, JsValue::from(false));
        let r = object_proto_is_prototype_of(&mut ctx, JsValue::Null, vec![JsValue::from(1i64)]).unwrap();
        assert_eq!(r, JsValue::from(false));
    }

    #[test]
    fn test_value_of_and_locale_string() {
        let mut ctx = setup();
        let o = object_create(Some(ctx.intrinsics().object_prototype()));
        let this = JsValue::Object(o);
        assert_eq!(object_proto_value_of(&mut ctx, this.clone(), vec![]).unwrap(), this);
        assert_eq!(
            object_proto_to_locale_string(&mut ctx, this, vec![]).unwrap(),
            JsValue::from("[object Object]")
        );
        assert!(object_proto_value_of(&mut ctx, JsValue::Null, vec![]).is_err());
    }
}
