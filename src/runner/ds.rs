//! Runtime data structures: values, objects, property descriptors and callables.

pub mod array_object;
pub mod call_stack;
pub mod error;
pub mod function_object;
pub mod object;
pub mod object_property;
pub mod operations;
pub mod realm;
pub mod value;
