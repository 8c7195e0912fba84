use crate::runner::ds::object::{JsObject, JsObjectType, ObjectClass};
use crate::runner::ds::object_property::{PropertyDescriptorSetter, PropertyKey, LENGTH_PROP};
use crate::runner::ds::value::JsValue;
use crate::runner::plugin::types::EvalContext;

/// An `Array` holding `values` at indices `0..n` with a non-enumerable `length` of `n`.
///
/// Only the shape is modelled: writing past the end later does not grow `length`.
pub fn array_create(ctx: &EvalContext, values: Vec<JsValue>) -> JsObjectType {
    let mut a = JsObject::new(ObjectClass::Array, Some(ctx.intrinsics().object_prototype()));
    let len = values.len();
    for (i, v) in values.into_iter().enumerate() {
        a.insert_own_property(
            PropertyKey::Int(i as u32),
            PropertyDescriptorSetter::data(v, true, true, true).into_new_descriptor(),
        );
    }
    a.insert_own_property(
        LENGTH_PROP.clone(),
        PropertyDescriptorSetter::data(JsValue::from(len as i64), true, false, false)
            .into_new_descriptor(),
    );
    a.into_shared()
}
