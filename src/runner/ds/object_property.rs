use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::runner::ds::object::JsObjectType;
use crate::runner::ds::operations::test_and_comparison::same_value;
use crate::runner::ds::value::JsValue;

lazy_static! {
    pub static ref LENGTH_PROP: PropertyKey = PropertyKey::Str("length".to_string());
    pub static ref PROTOTYPE_PROP: PropertyKey = PropertyKey::Str("prototype".to_string());
    pub static ref CALLER_PROP: PropertyKey = PropertyKey::Str("caller".to_string());
    pub static ref ARGUMENTS_PROP: PropertyKey = PropertyKey::Str("arguments".to_string());
}

/// Name of a property. String names that are canonical array indices are stored as
/// `Int`, so `"0"` and `0` address the same slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Str(String),
    Int(u32),
}
impl PropertyKey {
    fn from_name(name: String) -> Self {
        match name.parse::<u32>() {
            Ok(idx) if idx != u32::MAX && idx.to_string() == name => PropertyKey::Int(idx),
            _ => PropertyKey::Str(name),
        }
    }
}
impl From<&str> for PropertyKey {
    fn from(name: &str) -> Self {
        PropertyKey::from_name(name.to_string())
    }
}
impl From<String> for PropertyKey {
    fn from(name: String) -> Self {
        PropertyKey::from_name(name)
    }
}
impl From<u32> for PropertyKey {
    fn from(idx: u32) -> Self {
        PropertyKey::Int(idx)
    }
}
impl Display for PropertyKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::Str(s) => write!(f, "{}", s),
            PropertyKey::Int(i) => write!(f, "{}", i),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PropertyDescriptorData {
    pub value: JsValue,
    pub writable: bool,
    pub enumerable: bool,
    pub configurable: bool,
}

#[derive(Clone)]
pub struct PropertyDescriptorAccessor {
    pub get: Option<JsObjectType>,
    pub set: Option<JsObjectType>,
    pub enumerable: bool,
    pub configurable: bool,
}
impl fmt::Debug for PropertyDescriptorAccessor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptorAccessor")
            .field("get", &self.get.is_some())
            .field("set", &self.set.is_some())
            .field("enumerable", &self.enumerable)
            .field("configurable", &self.configurable)
            .finish()
    }
}

/// A complete property descriptor. It is always exactly one of the two kinds.
#[derive(Debug, Clone)]
pub enum PropertyDescriptor {
    Data(PropertyDescriptorData),
    Accessor(PropertyDescriptorAccessor),
}
impl PropertyDescriptor {
    pub fn is_enumerable(&self) -> bool {
        match self {
            PropertyDescriptor::Data(d) => d.enumerable,
            PropertyDescriptor::Accessor(a) => a.enumerable,
        }
    }

    pub fn is_configurable(&self) -> bool {
        match self {
            PropertyDescriptor::Data(d) => d.configurable,
            PropertyDescriptor::Accessor(a) => a.configurable,
        }
    }

    pub fn is_data_descriptor(&self) -> bool {
        matches!(self, PropertyDescriptor::Data(_))
    }

    pub fn is_accessor_descriptor(&self) -> bool {
        matches!(self, PropertyDescriptor::Accessor(_))
    }

    fn set_enumerable(&mut self, enumerable: bool) {
        match self {
            PropertyDescriptor::Data(d) => d.enumerable = enumerable,
            PropertyDescriptor::Accessor(a) => a.enumerable = enumerable,
        }
    }

    fn set_configurable(&mut self, configurable: bool) {
        match self {
            PropertyDescriptor::Data(d) => d.configurable = configurable,
            PropertyDescriptor::Accessor(a) => a.configurable = configurable,
        }
    }

    /// Default-valued descriptor of the same kind as `shape`, keeping only the shared flags
    /// of `flags_from`.
    pub(crate) fn converted(shape: &PropertyDescriptor, flags_from: &PropertyDescriptor) -> Self {
        match shape {
            PropertyDescriptor::Data(_) => PropertyDescriptor::Data(PropertyDescriptorData {
                value: JsValue::Undefined,
                writable: false,
                enumerable: flags_from.is_enumerable(),
                configurable: flags_from.is_configurable(),
            }),
            PropertyDescriptor::Accessor(_) => {
                PropertyDescriptor::Accessor(PropertyDescriptorAccessor {
                    get: None,
                    set: None,
                    enumerable: flags_from.is_enumerable(),
                    configurable: flags_from.is_configurable(),
                })
            }
        }
    }
}
impl PartialEq for PropertyDescriptor {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropertyDescriptor::Data(a), PropertyDescriptor::Data(b)) => {
                same_value(&a.value, &b.value)
                    && a.writable == b.writable
                    && a.enumerable == b.enumerable
                    && a.configurable == b.configurable
            }
            (PropertyDescriptor::Accessor(a), PropertyDescriptor::Accessor(b)) => {
                same_function(&a.get, &b.get)
                    && same_function(&a.set, &b.set)
                    && a.enumerable == b.enumerable
                    && a.configurable == b.configurable
            }
            _ => false,
        }
    }
}

pub(crate) fn same_function(a: &Option<JsObjectType>, b: &Option<JsObjectType>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Rc::ptr_eq(a, b),
        _ => false,
    }
}

/// A partial descriptor, as handed to `define_own_property`. Only the fields whose
/// `honour_*` flag is set take part; the kind of `descriptor` decides whether a
/// non-generic fragment is a data or an accessor fragment.
#[derive(Debug, Clone)]
pub struct PropertyDescriptorSetter {
    pub honour_value: bool,
    pub honour_writable: bool,
    pub honour_set: bool,
    pub honour_get: bool,
    pub honour_enumerable: bool,
    pub honour_configurable: bool,
    pub descriptor: PropertyDescriptor,
}
impl PropertyDescriptorSetter {
    pub fn new_from_property_descriptor(desc: PropertyDescriptor) -> Self {
        let is_data = desc.is_data_descriptor();
        PropertyDescriptorSetter {
            honour_value: is_data,
            honour_writable: is_data,
            honour_set: !is_data,
            honour_get: !is_data,
            honour_enumerable: true,
            honour_configurable: true,
            descriptor: desc,
        }
    }

    /// Fragment that only carries a new value.
    pub fn value_only(value: JsValue) -> Self {
        PropertyDescriptorSetter {
            honour_value: true,
            honour_writable: false,
            honour_set: false,
            honour_get: false,
            honour_enumerable: false,
            honour_configurable: false,
            descriptor: PropertyDescriptor::Data(PropertyDescriptorData {
                value,
                writable: false,
                enumerable: false,
                configurable: false,
            }),
        }
    }

    /// Fragment that only touches the shared flags.
    pub fn generic(enumerable: Option<bool>, configurable: Option<bool>) -> Self {
        PropertyDescriptorSetter {
            honour_value: false,
            honour_writable: false,
            honour_set: false,
            honour_get: false,
            honour_enumerable: enumerable.is_some(),
            honour_configurable: configurable.is_some(),
            descriptor: PropertyDescriptor::Data(PropertyDescriptorData {
                value: JsValue::Undefined,
                writable: false,
                enumerable: enumerable.unwrap_or(false),
                configurable: configurable.unwrap_or(false),
            }),
        }
    }

    pub fn data(value: JsValue, writable: bool, enumerable: bool, configurable: bool) -> Self {
        Self::new_from_property_descriptor(PropertyDescriptor::Data(PropertyDescriptorData {
            value,
            writable,
            enumerable,
            configurable,
        }))
    }

    pub fn accessor(
        get: Option<JsObjectType>,
        set: Option<JsObjectType>,
        enumerable: bool,
        configurable: bool,
    ) -> Self {
        Self::new_from_property_descriptor(PropertyDescriptor::Accessor(
            PropertyDescriptorAccessor {
                get,
                set,
                enumerable,
                configurable,
            },
        ))
    }

    pub(crate) fn is_empty(&self) -> bool {
        !self.honour_configurable
            && !self.honour_enumerable
            && !self.honour_get
            && !self.honour_set
            && !self.honour_value
            && !self.honour_writable
    }

    pub(crate) fn is_generic_descriptor(&self) -> bool {
        !self.honour_get && !self.honour_set && !self.honour_value && !self.honour_writable
    }

    /// True when every honoured field already has the same value in `current`.
    pub(crate) fn is_subset_of(&self, current: &PropertyDescriptor) -> bool {
        if self.honour_enumerable && self.descriptor.is_enumerable() != current.is_enumerable() {
            return false;
        }
        if self.honour_configurable
            && self.descriptor.is_configurable() != current.is_configurable()
        {
            return false;
        }
        if self.is_generic_descriptor() {
            return true;
        }
        match (&self.descriptor, current) {
            (PropertyDescriptor::Data(d), PropertyDescriptor::Data(c)) => {
                (!self.honour_value || same_value(&d.value, &c.value))
                    && (!self.honour_writable || d.writable == c.writable)
            }
            (PropertyDescriptor::Accessor(d), PropertyDescriptor::Accessor(c)) => {
                (!self.honour_get || same_function(&d.get, &c.get))
                    && (!self.honour_set || same_function(&d.set, &c.set))
            }
            _ => false,
        }
    }

    /// Writes the honoured fields onto `target`, which must already be of the fragment's
    /// kind unless the fragment is generic.
    pub(crate) fn apply_to(self, target: &mut PropertyDescriptor) {
        if self.honour_enumerable {
            target.set_enumerable(self.descriptor.is_enumerable());
        }
        if self.honour_configurable {
            target.set_configurable(self.descriptor.is_configurable());
        }
        match (self.descriptor, target) {
            (PropertyDescriptor::Data(d), PropertyDescriptor::Data(t)) => {
                if self.honour_value {
                    t.value = d.value;
                }
                if self.honour_writable {
                    t.writable = d.writable;
                }
            }
            (PropertyDescriptor::Accessor(d), PropertyDescriptor::Accessor(t)) => {
                if self.honour_get {
                    t.get = d.get;
                }
                if self.honour_set {
                    t.set = d.set;
                }
            }
            _ => {}
        }
    }

    /// Complete descriptor for a property that does not exist yet; absent fields take
    /// their defaults.
    pub(crate) fn into_new_descriptor(self) -> PropertyDescriptor {
        let mut desc = if self.is_generic_descriptor() {
            PropertyDescriptor::Data(PropertyDescriptorData {
                value: JsValue::Undefined,
                writable: false,
                enumerable: false,
                configurable: false,
            })
        } else {
            PropertyDescriptor::converted(&self.descriptor, &PropertyDescriptor::Data(
                PropertyDescriptorData {
                    value: JsValue::Undefined,
                    writable: false,
                    enumerable: false,
                    configurable: false,
                },
            ))
        };
        self.apply_to(&mut desc);
        desc
    }
}
