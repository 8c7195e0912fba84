use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::{Rc, Weak};

use crate::runner::ds::error::{ErrorKind, JErrorType};
use crate::runner::ds::function_object::FunctionKind;
use crate::runner::ds::object_property::{
    same_function, PropertyDescriptor, PropertyDescriptorSetter, PropertyKey,
};
use crate::runner::ds::operations::test_and_comparison::same_value;

/// Shared handle to an object. Every value naming the object holds one of these, so a
/// mutation through any holder is visible to all of them.
pub type JsObjectType = Rc<RefCell<JsObject>>;

/// Class tag of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectClass {
    Object,
    Function,
    Array,
    Error,
    Arguments,
}
impl ObjectClass {
    pub fn name(&self) -> &'static str {
        match self {
            ObjectClass::Object => "Object",
            ObjectClass::Function => "Function",
            ObjectClass::Array => "Array",
            ObjectClass::Error => "Error",
            ObjectClass::Arguments => "Arguments",
        }
    }
}
impl Display for ObjectClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub struct ObjectBase {
    properties: HashMap<PropertyKey, PropertyDescriptor>,
    insertion_order: Vec<PropertyKey>,
    is_extensible: bool,
    // Lookup only; the prototype is kept alive by whoever installed it.
    prototype: Option<Weak<RefCell<JsObject>>>,
}
impl ObjectBase {
    pub fn new(prototype: Option<&JsObjectType>) -> Self {
        ObjectBase {
            properties: HashMap::new(),
            insertion_order: Vec::new(),
            is_extensible: true,
            prototype: prototype.map(Rc::downgrade),
        }
    }
}

pub struct JsObject {
    class: ObjectClass,
    base: ObjectBase,
    function: Option<FunctionKind>,
}
impl JsObject {
    pub fn new(class: ObjectClass, prototype: Option<&JsObjectType>) -> Self {
        JsObject {
            class,
            base: ObjectBase::new(prototype),
            function: None,
        }
    }

    /// A callable object of class `Function`.
    pub fn new_function(kind: FunctionKind, prototype: Option<&JsObjectType>) -> Self {
        JsObject {
            class: ObjectClass::Function,
            base: ObjectBase::new(prototype),
            function: Some(kind),
        }
    }

    pub fn into_shared(self) -> JsObjectType {
        Rc::new(RefCell::new(self))
    }

    pub fn class(&self) -> ObjectClass {
        self.class
    }

    pub fn is_callable(&self) -> bool {
        self.function.is_some()
    }

    pub fn function_kind(&self) -> Option<&FunctionKind> {
        self.function.as_ref()
    }

    pub fn get_prototype_of(&self) -> Option<JsObjectType> {
        self.base.prototype.as_ref().and_then(Weak::upgrade)
    }

    pub fn is_extensible(&self) -> bool {
        self.base.is_extensible
    }

    pub fn prevent_extensions(&mut self) -> bool {
        self.base.is_extensible = false;
        true
    }

    pub fn get_own_property(&self, property: &PropertyKey) -> Option<&PropertyDescriptor> {
        self.base.properties.get(property)
    }

    pub fn has_own_property(&self, property: &PropertyKey) -> bool {
        self.base.properties.contains_key(property)
    }

    /// Own keys: array indices ascending, then string names in insertion order.
    pub fn own_property_keys(&self) -> Vec<PropertyKey> {
        let mut int_keys = vec![];
        let mut str_keys = vec![];
        for key in &self.base.insertion_order {
            match key {
                PropertyKey::Int(i) => int_keys.push(*i),
                PropertyKey::Str(_) => str_keys.push(key.clone()),
            }
        }
        int_keys.sort_unstable();
        int_keys
            .into_iter()
            .map(PropertyKey::Int)
            .chain(str_keys.into_iter())
            .collect()
    }

    /// Merges `descriptor_setter` into the property named `property`.
    ///
    /// The whole change is validated before anything is written, so a rejected
    /// definition leaves the property exactly as it was. `override_read_only` lets
    /// built-ins be installed on a non-extensible object; it never relaxes the
    /// configurability rules.
    pub fn define_own_property(
        &mut self,
        property: PropertyKey,
        descriptor_setter: PropertyDescriptorSetter,
        throw: bool,
        override_read_only: bool,
    ) -> Result<bool, JErrorType> {
        match self.merge_descriptor(&property, descriptor_setter, override_read_only) {
            Ok(None) => Ok(true),
            Ok(Some(desc)) => {
                self.insert_own_property(property, desc);
                Ok(true)
            }
            Err(message) => reject(throw, message),
        }
    }

    fn merge_descriptor(
        &self,
        property: &PropertyKey,
        descriptor_setter: PropertyDescriptorSetter,
        override_read_only: bool,
    ) -> Result<Option<PropertyDescriptor>, String> {
        let current = match self.base.properties.get(property) {
            None => {
                return if self.base.is_extensible || override_read_only {
                    Ok(Some(descriptor_setter.into_new_descriptor()))
                } else {
                    Err(format!(
                        "Cannot define property {}, object is not extensible",
                        property
                    ))
                };
            }
            Some(c) => c,
        };
        if descriptor_setter.is_empty() || descriptor_setter.is_subset_of(current) {
            return Ok(None);
        }
        let redefine_error = || format!("Cannot redefine property: {}", property);
        let locked = !current.is_configurable();
        if locked {
            if descriptor_setter.honour_configurable
                && descriptor_setter.descriptor.is_configurable()
            {
                return Err(redefine_error());
            }
            if descriptor_setter.honour_enumerable
                && descriptor_setter.descriptor.is_enumerable() != current.is_enumerable()
            {
                return Err(redefine_error());
            }
        }
        let mut next = current.clone();
        if !descriptor_setter.is_generic_descriptor() {
            if current.is_data_descriptor() != descriptor_setter.descriptor.is_data_descriptor() {
                if locked {
                    return Err(redefine_error());
                }
                next = PropertyDescriptor::converted(&descriptor_setter.descriptor, current);
            } else if locked {
                match (current, &descriptor_setter.descriptor) {
                    (PropertyDescriptor::Data(c), PropertyDescriptor::Data(d)) => {
                        if !c.writable {
                            if descriptor_setter.honour_writable && d.writable {
                                return Err(redefine_error());
                            }
                            if descriptor_setter.honour_value && !same_value(&c.value, &d.value) {
                                return Err(redefine_error());
                            }
                        }
                    }
                    (PropertyDescriptor::Accessor(c), PropertyDescriptor::Accessor(d)) => {
                        if descriptor_setter.honour_set && !same_function(&c.set, &d.set) {
                            return Err(redefine_error());
                        }
                        if descriptor_setter.honour_get && !same_function(&c.get, &d.get) {
                            return Err(redefine_error());
                        }
                    }
                    _ => {}
                }
            }
        }
        descriptor_setter.apply_to(&mut next);
        Ok(Some(next))
    }

    pub fn delete(&mut self, property: &PropertyKey, throw: bool) -> Result<bool, JErrorType> {
        match self.base.properties.get(property) {
            None => Ok(true),
            Some(pd) if pd.is_configurable() => {
                self.base.properties.remove(property);
                self.base.insertion_order.retain(|k| k != property);
                Ok(true)
            }
            Some(_) => reject(throw, format!("Cannot delete property '{}'", property)),
        }
    }

    pub(crate) fn insert_own_property(&mut self, property: PropertyKey, desc: PropertyDescriptor) {
        if !self.base.properties.contains_key(&property) {
            self.base.insertion_order.push(property.clone());
        }
        self.base.properties.insert(property, desc);
    }
}

/// Fails with a `TypeError` when `throw` is set, otherwise reports `false`.
pub(crate) fn reject(throw: bool, message: String) -> Result<bool, JErrorType> {
    if throw {
        Err(JErrorType::new(ErrorKind::TypeError, message))
    } else {
        Ok(false)
    }
}

/// Replaces the prototype of `o`. Refused for non-extensible objects and for any
/// prototype whose chain already contains `o`.
pub fn set_prototype_of(o: &JsObjectType, prototype: Option<&JsObjectType>) -> bool {
    let current = o.borrow().get_prototype_of();
    let unchanged = match (&current, prototype) {
        (None, None) => true,
        (Some(c), Some(p)) => Rc::ptr_eq(c, p),
        _ => false,
    };
    if unchanged {
        return true;
    }
    if !o.borrow().is_extensible() {
        return false;
    }
    let mut p = prototype.cloned();
    while let Some(some_p) = p {
        if Rc::ptr_eq(&some_p, o) {
            // To prevent circular chain
            return false;
        }
        p = some_p.borrow().get_prototype_of();
    }
    o.borrow_mut().base.prototype = prototype.map(Rc::downgrade);
    true
}

/// Own or inherited property lookup.
pub fn has_property(o: &JsObjectType, property: &PropertyKey) -> bool {
    let mut current = Some(o.clone());
    while let Some(obj) = current {
        let obj = obj.borrow();
        if obj.has_own_property(property) {
            return true;
        }
        current = obj.get_prototype_of();
    }
    false
}

/// Plain object inheriting from `prototype`.
pub fn object_create(prototype: Option<&JsObjectType>) -> JsObjectType {
    JsObject::new(ObjectClass::Object, prototype).into_shared()
}
