use crate::runner::ds::function_object::create_native_function;
use crate::runner::ds::object::{object_create, JsObjectType};
use crate::runner::std_lib::function::{function_prototype_create, throw_type_error};

/// The built-in objects every analysed program shares. Prototype links are weak, so
/// this is what keeps Object.prototype and Function.prototype alive.
pub struct Intrinsics {
    object_prototype: JsObjectType,
    function_prototype: JsObjectType,
    throw_type_error: JsObjectType,
}
impl Intrinsics {
    /// Creates the bare prototype objects. Their methods are installed afterwards by
    /// [`register_core_builtins`](crate::runner::std_lib::register_core_builtins).
    pub fn new() -> Self {
        let object_prototype = object_create(None);
        let function_prototype = function_prototype_create(&object_prototype);
        let thrower = create_native_function(&function_prototype, "ThrowTypeError", 0, throw_type_error);
        thrower.borrow_mut().prevent_extensions();
        Intrinsics {
            object_prototype,
            function_prototype,
            throw_type_error: thrower,
        }
    }

    pub fn object_prototype(&self) -> &JsObjectType {
        &self.object_prototype
    }

    pub fn function_prototype(&self) -> &JsObjectType {
        &self.function_prototype
    }

    /// `%ThrowTypeError%`, shared by every poisoned accessor.
    pub fn throw_type_error(&self) -> &JsObjectType {
        &self.throw_type_error
    }
}

impl Default for Intrinsics {
    fn default() -> Self {
        Self::new()
    }
}
