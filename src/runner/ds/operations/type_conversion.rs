use crate::runner::ds::error::{raise, ErrorKind, JErrorType};
use crate::runner::ds::function_object::call;
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::operations::object::get;
use crate::runner::ds::value::{JsNumberType, JsValue};
use crate::runner::plugin::types::{EvalContext, ValueResult};

pub const TYPE_STR_UNDEFINED: &str = "undefined";
pub const TYPE_STR_NULL: &str = "null";
pub const TYPE_STR_BOOLEAN: &str = "boolean";
pub const TYPE_STR_STRING: &str = "string";
pub const TYPE_STR_NUMBER: &str = "number";
pub const TYPE_STR_OBJECT: &str = "object";
pub const TYPE_STR_FUNCTION: &str = "function";
pub const TYPE_STR_UNKNOWN: &str = "unknown";

/// `typeof`-style name of a value.
pub fn get_type(a: &JsValue) -> &'static str {
    match a {
        JsValue::Undefined => TYPE_STR_UNDEFINED,
        JsValue::Null => TYPE_STR_NULL,
        JsValue::Boolean(_) => TYPE_STR_BOOLEAN,
        JsValue::String(_) => TYPE_STR_STRING,
        JsValue::Number(_) => TYPE_STR_NUMBER,
        JsValue::Object(o) => {
            if o.borrow().is_callable() {
                TYPE_STR_FUNCTION
            } else {
                TYPE_STR_OBJECT
            }
        }
        JsValue::Unknown => TYPE_STR_UNKNOWN,
    }
}

pub enum PreferredType {
    Default,
    String,
    Number,
}

/// Objects are converted through `valueOf`/`toString` (in hint order); anything else,
/// `Unknown` included, is returned as is.
pub fn to_primitive(ctx: &mut EvalContext, v: &JsValue, preferred_type: PreferredType) -> ValueResult {
    let o = match v {
        JsValue::Object(o) => o.clone(),
        _ => return Ok(v.clone()),
    };
    let order = match preferred_type {
        PreferredType::String => ["toString", "valueOf"],
        PreferredType::Default | PreferredType::Number => ["valueOf", "toString"],
    };
    for name in order.iter() {
        let method = get(ctx, &o, &PropertyKey::from(*name))?;
        match &method {
            JsValue::Unknown => return Ok(JsValue::Unknown),
            JsValue::Object(f) if f.borrow().is_callable() => {
                let result = call(ctx, f, v.clone(), Vec::new())?;
                if !result.is_object() {
                    return Ok(result);
                }
            }
            _ => {}
        }
    }
    raise(ErrorKind::TypeError, "Cannot convert object to primitive value")
}

/// Yields a `Number`, or `Unknown` when the input is or converts to `Unknown`.
pub fn to_number(ctx: &mut EvalContext, v: &JsValue) -> ValueResult {
    match v {
        JsValue::Undefined => Ok(JsValue::Number(JsNumberType::NaN)),
        JsValue::Null => Ok(JsValue::Number(JsNumberType::Integer(0))),
        JsValue::Boolean(b) => Ok(JsValue::Number(JsNumberType::Integer(if *b { 1 } else { 0 }))),
        JsValue::String(s) => Ok(JsValue::Number(string_to_number(s))),
        JsValue::Number(_) => Ok(v.clone()),
        JsValue::Object(_) => {
            let pv = to_primitive(ctx, v, PreferredType::Number)?;
            to_number(ctx, &pv)
        }
        JsValue::Unknown => Ok(JsValue::Unknown),
    }
}

fn number_of(ctx: &mut EvalContext, v: &JsValue, op: &str) -> Result<JsNumberType, JErrorType> {
    match to_number(ctx, v)? {
        JsValue::Number(n) => Ok(n),
        _ => raise(
            ErrorKind::TypeError,
            format!("{} is not defined for an unknown value", op),
        ),
    }
}

/// ES5 `ToInteger`. Callers filter out `Unknown` first.
pub fn to_integer(ctx: &mut EvalContext, v: &JsValue) -> Result<f64, JErrorType> {
    let n = number_of(ctx, v, "ToInteger")?.as_f64();
    if n.is_nan() {
        Ok(0.0)
    } else {
        Ok(n.trunc())
    }
}

/// ES5 `ToUint32`. Callers filter out `Unknown` first.
pub fn to_uint32(ctx: &mut EvalContext, v: &JsValue) -> Result<u32, JErrorType> {
    Ok(match number_of(ctx, v, "ToUint32")? {
        JsNumberType::Integer(i) => i.rem_euclid(1i64 << 32) as u32,
        JsNumberType::Float(f) => {
            if f.is_finite() {
                f.trunc().rem_euclid(4_294_967_296.0) as u32
            } else {
                0
            }
        }
        JsNumberType::NaN | JsNumberType::PositiveInfinity | JsNumberType::NegativeInfinity => 0,
    })
}

pub fn to_boolean(v: &JsValue) -> JsValue {
    JsValue::Boolean(match v {
        JsValue::Undefined | JsValue::Null => false,
        JsValue::Boolean(b) => *b,
        JsValue::String(s) => !s.is_empty(),
        JsValue::Number(n) => {
            let f = n.as_f64();
            !(f.is_nan() || f == 0.0)
        }
        JsValue::Object(_) => true,
        JsValue::Unknown => return JsValue::Unknown,
    })
}

pub fn to_string(ctx: &mut EvalContext, v: &JsValue) -> ValueResult {
    Ok(match v {
        JsValue::Undefined => JsValue::from(TYPE_STR_UNDEFINED),
        JsValue::Null => JsValue::from(TYPE_STR_NULL),
        JsValue::Boolean(b) => JsValue::String(b.to_string()),
        JsValue::String(_) => v.clone(),
        JsValue::Number(n) => JsValue::String(n.to_string()),
        JsValue::Object(_) => {
            let pv = to_primitive(ctx, v, PreferredType::String)?;
            return to_string(ctx, &pv);
        }
        JsValue::Unknown => JsValue::Unknown,
    })
}

/// Numeric value of a string literal; malformed input is `NaN`.
pub fn string_to_number(s: &str) -> JsNumberType {
    let s = s.trim();
    if s.is_empty() {
        return JsNumberType::Integer(0);
    }
    match s {
        "Infinity" | "+Infinity" => return JsNumberType::PositiveInfinity,
        "-Infinity" => return JsNumberType::NegativeInfinity,
        _ => {}
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return match u64::from_str_radix(hex, 16) {
            Ok(n) => JsNumberType::from_f64(n as f64),
            Err(_) => JsNumberType::NaN,
        };
    }
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return JsNumberType::NaN;
    }
    match s.parse::<f64>() {
        Ok(n) => JsNumberType::from_f64(n),
        Err(_) => JsNumberType::NaN,
    }
}
