use std::rc::Rc;

use crate::runner::ds::value::{JsNumberType, JsValue, ValueKind};

fn same_number(a: &JsNumberType, b: &JsNumberType, strict_mode: bool) -> bool {
    let (x, y) = (a.as_f64(), b.as_f64());
    if x.is_nan() || y.is_nan() {
        !strict_mode && x.is_nan() && y.is_nan()
    } else if x == 0.0 && y == 0.0 {
        strict_mode || x.is_sign_negative() == y.is_sign_negative()
    } else {
        x == y
    }
}

fn is_same_value(a: &JsValue, b: &JsValue, strict_mode: bool) -> bool {
    match (a, b) {
        (JsValue::Undefined, JsValue::Undefined) | (JsValue::Null, JsValue::Null) => true,
        (JsValue::Boolean(x), JsValue::Boolean(y)) => x == y,
        (JsValue::String(x), JsValue::String(y)) => x == y,
        (JsValue::Number(x), JsValue::Number(y)) => same_number(x, y, strict_mode),
        (JsValue::Object(x), JsValue::Object(y)) => Rc::ptr_eq(x, y),
        // Two undetermined values are never provably the same.
        _ => false,
    }
}

/// ES5 `SameValue`.
pub fn same_value(a: &JsValue, b: &JsValue) -> bool {
    is_same_value(a, b, false)
}

/// ES5 `===`.
pub fn strict_equality_comparison(a: &JsValue, b: &JsValue) -> bool {
    is_same_value(a, b, true)
}

pub fn is_callable(v: &JsValue) -> bool {
    v.is_callable()
}

pub fn is_object(v: &JsValue) -> bool {
    v.is_object()
}

pub fn is_type(v: &JsValue, kinds: &[ValueKind]) -> bool {
    kinds.contains(&v.kind())
}

/// The soundness gate every native operation runs before any other validation.
pub fn are_any_unknown<'a, I>(values: I) -> bool
where
    I: IntoIterator<Item = &'a JsValue>,
{
    values.into_iter().any(JsValue::is_unknown)
}
