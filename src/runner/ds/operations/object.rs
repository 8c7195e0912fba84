use std::rc::Rc;

use crate::runner::ds::error::JErrorType;
use crate::runner::ds::function_object::call;
use crate::runner::ds::object::{reject, JsObjectType};
use crate::runner::ds::object_property::{
    PropertyDescriptor, PropertyDescriptorSetter, PropertyKey,
};
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::types::{EvalContext, ValueResult};

/// The own or nearest inherited descriptor for `p`, together with the object holding it.
/// No borrow is held once this returns.
fn find_property(o: &JsObjectType, p: &PropertyKey) -> Option<(JsObjectType, PropertyDescriptor)> {
    let mut current = Some(o.clone());
    while let Some(obj) = current {
        let next = {
            let b = obj.borrow();
            if let Some(desc) = b.get_own_property(p) {
                Err(desc.clone())
            } else {
                Ok(b.get_prototype_of())
            }
        };
        match next {
            Err(desc) => return Some((obj, desc)),
            Ok(proto) => current = proto,
        }
    }
    None
}

/// `[[Get]]`: data properties yield their value, accessors run their getter with `o`
/// as `this`, and a property found nowhere on the chain reads as `Undefined`.
pub fn get(ctx: &mut EvalContext, o: &JsObjectType, p: &PropertyKey) -> ValueResult {
    match find_property(o, p) {
        None => Ok(JsValue::Undefined),
        Some((_, PropertyDescriptor::Data(d))) => Ok(d.value),
        Some((_, PropertyDescriptor::Accessor(a))) => match a.get {
            None => Ok(JsValue::Undefined),
            Some(getter) => call(ctx, &getter, JsValue::Object(o.clone()), Vec::new()),
        },
    }
}

/// `[[Put]]`: creates or updates a data property, or runs an inherited or own setter.
///
/// With `override_read_only` the writable and extensible checks are skipped so that
/// built-ins can be installed; a property that is both non-writable and
/// non-configurable still keeps its value. Properties created this way are
/// non-enumerable.
pub fn put(
    ctx: &mut EvalContext,
    o: &JsObjectType,
    p: PropertyKey,
    value: JsValue,
    throw: bool,
    override_read_only: bool,
) -> Result<bool, JErrorType> {
    let extensible = o.borrow().is_extensible();
    match find_property(o, &p) {
        Some((_, PropertyDescriptor::Accessor(a))) => match a.set {
            Some(setter) => {
                call(ctx, &setter, JsValue::Object(o.clone()), vec![value])?;
                Ok(true)
            }
            None => reject(
                throw,
                format!("Cannot set property {} which has only a getter", p),
            ),
        },
        Some((holder, PropertyDescriptor::Data(d))) if Rc::ptr_eq(&holder, o) => {
            if d.writable || (override_read_only && d.configurable) {
                o.borrow_mut().define_own_property(
                    p,
                    PropertyDescriptorSetter::value_only(value),
                    throw,
                    override_read_only,
                )
            } else {
                reject(
                    throw,
                    format!("Cannot assign to read only property '{}'", p),
                )
            }
        }
        Some((_, PropertyDescriptor::Data(d))) if !d.writable && !override_read_only => reject(
            throw,
            format!("Cannot assign to read only property '{}'", p),
        ),
        _ => {
            if !extensible && !override_read_only {
                return reject(
                    throw,
                    format!("Cannot add property {}, object is not extensible", p),
                );
            }
            o.borrow_mut().define_own_property(
                p,
                PropertyDescriptorSetter::data(value, true, !override_read_only, true),
                throw,
                override_read_only,
            )
        }
    }
}

pub fn define_property_or_throw(
    o: &JsObjectType,
    p: PropertyKey,
    desc: PropertyDescriptorSetter,
) -> Result<bool, JErrorType> {
    o.borrow_mut().define_own_property(p, desc, true, false)
}
