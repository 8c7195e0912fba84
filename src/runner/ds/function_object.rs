use std::rc::Rc;

use crate::runner::ds::error::{raise, ErrorKind, JErrorType};
use crate::runner::ds::object::{JsObject, JsObjectType};
use crate::runner::ds::object_property::{PropertyDescriptorSetter, LENGTH_PROP, PROTOTYPE_PROP};
use crate::runner::ds::operations::object::get;
use crate::runner::ds::value::{JsNumberType, JsValue};
use crate::runner::plugin::types::{EvalContext, NativeConstructFn, NativeFn, ValueResult};

/// Body of a function written in the analysed program. The AST walker implements this;
/// the core only dispatches to it.
pub trait FunctionBody {
    fn call(&self, ctx: &mut EvalContext, this: JsValue, args: Vec<JsValue>) -> ValueResult;

    fn is_constructor(&self) -> bool {
        false
    }

    fn construct(
        &self,
        _ctx: &mut EvalContext,
        _args: Vec<JsValue>,
    ) -> Result<JsObjectType, JErrorType> {
        raise(ErrorKind::TypeError, "Function is not a constructor")
    }

    fn supports_has_instance(&self) -> bool {
        true
    }
}

#[derive(Clone, Copy)]
pub struct NativeFunction {
    pub name: &'static str,
    pub arity: u32,
    pub call: NativeFn,
    pub construct: Option<NativeConstructFn>,
}

/// Target, receiver and argument prefix captured by `bind`. The fields are only
/// readable; nothing can rebind an existing bound function.
#[derive(Clone)]
pub struct BoundFunction {
    target: JsObjectType,
    bound_this: JsValue,
    bound_args: Rc<[JsValue]>,
}
impl BoundFunction {
    pub fn new(target: JsObjectType, bound_this: JsValue, bound_args: Vec<JsValue>) -> Self {
        BoundFunction {
            target,
            bound_this,
            bound_args: bound_args.into(),
        }
    }

    pub fn target(&self) -> &JsObjectType {
        &self.target
    }

    pub fn bound_this(&self) -> &JsValue {
        &self.bound_this
    }

    pub fn bound_args(&self) -> &[JsValue] {
        &self.bound_args
    }

    fn prefixed(&self, extra: Vec<JsValue>) -> Vec<JsValue> {
        let mut args = Vec::with_capacity(self.bound_args.len() + extra.len());
        args.extend(self.bound_args.iter().cloned());
        args.extend(extra);
        args
    }
}

/// The callable capability of a `Function` object.
#[derive(Clone)]
pub enum FunctionKind {
    Ordinary(Rc<dyn FunctionBody>),
    Native(NativeFunction),
    Bound(BoundFunction),
}
impl FunctionKind {
    fn label(&self) -> &'static str {
        match self {
            FunctionKind::Ordinary(_) => "ordinary",
            FunctionKind::Native(n) => n.name,
            FunctionKind::Bound(_) => "bound",
        }
    }
}

fn function_kind_of(f: &JsObjectType) -> Option<FunctionKind> {
    f.borrow().function_kind().cloned()
}

fn not_callable<T>() -> Result<T, JErrorType> {
    raise(ErrorKind::TypeError, "Attempted to call non-callable value")
}

/// `[[Call]]`: invokes `f` with the given receiver and arguments.
pub fn call(ctx: &mut EvalContext, f: &JsObjectType, this: JsValue, args: Vec<JsValue>) -> ValueResult {
    let kind = match function_kind_of(f) {
        Some(kind) => kind,
        None => return not_callable(),
    };
    tracing::trace!(function = kind.label(), argc = args.len(), "call");
    ctx.call_stack.enter()?;
    let result = match kind {
        FunctionKind::Ordinary(body) => body.call(ctx, this, args),
        FunctionKind::Native(native) => (native.call)(ctx, this, args),
        FunctionKind::Bound(bound) => {
            let args = bound.prefixed(args);
            call(ctx, &bound.target, bound.bound_this.clone(), args)
        }
    };
    ctx.call_stack.exit();
    result
}

/// Whether `f` has a `[[Construct]]` behaviour. Bound functions always do; theirs raises
/// when the target has none.
pub fn is_constructor(f: &JsObjectType) -> bool {
    match f.borrow().function_kind() {
        Some(FunctionKind::Ordinary(body)) => body.is_constructor(),
        Some(FunctionKind::Native(native)) => native.construct.is_some(),
        Some(FunctionKind::Bound(_)) => true,
        None => false,
    }
}

/// Whether `f` has a `[[HasInstance]]` behaviour.
pub fn has_has_instance(f: &JsObjectType) -> bool {
    match f.borrow().function_kind() {
        Some(FunctionKind::Ordinary(body)) => body.supports_has_instance(),
        Some(FunctionKind::Native(_)) | Some(FunctionKind::Bound(_)) => true,
        None => false,
    }
}

/// `[[Construct]]`.
pub fn construct(
    ctx: &mut EvalContext,
    f: &JsObjectType,
    args: Vec<JsValue>,
) -> Result<JsObjectType, JErrorType> {
    let kind = match function_kind_of(f) {
        Some(kind) => kind,
        None => return raise(ErrorKind::TypeError, "Object is not a constructor"),
    };
    tracing::trace!(function = kind.label(), argc = args.len(), "construct");
    ctx.call_stack.enter()?;
    let result = match kind {
        FunctionKind::Ordinary(body) => {
            if body.is_constructor() {
                body.construct(ctx, args)
            } else {
                raise(ErrorKind::TypeError, "Function is not a constructor")
            }
        }
        FunctionKind::Native(native) => match native.construct {
            Some(construct_fn) => construct_fn(ctx, args),
            None => raise(
                ErrorKind::TypeError,
                format!("{} is not a constructor", native.name),
            ),
        },
        FunctionKind::Bound(bound) => {
            if is_constructor(&bound.target) {
                let args = bound.prefixed(args);
                construct(ctx, &bound.target, args)
            } else {
                raise(ErrorKind::TypeError, "Bind target does not have a constructor")
            }
        }
    };
    ctx.call_stack.exit();
    result
}

/// `[[HasInstance]]`, i.e. the right-hand side of `instanceof`.
pub fn has_instance(ctx: &mut EvalContext, f: &JsObjectType, v: &JsValue) -> Result<bool, JErrorType> {
    let kind = match function_kind_of(f) {
        Some(kind) => kind,
        None => {
            return raise(
                ErrorKind::TypeError,
                "Object does not have a hasInstance method",
            )
        }
    };
    ctx.call_stack.enter()?;
    let result = match kind {
        FunctionKind::Bound(bound) => {
            if has_has_instance(&bound.target) {
                has_instance(ctx, &bound.target, v)
            } else {
                raise(
                    ErrorKind::TypeError,
                    "Bind target does not have a hasInstance method",
                )
            }
        }
        FunctionKind::Ordinary(body) if !body.supports_has_instance() => raise(
            ErrorKind::TypeError,
            "Object does not have a hasInstance method",
        ),
        FunctionKind::Ordinary(_) | FunctionKind::Native(_) => ordinary_has_instance(ctx, f, v),
    };
    ctx.call_stack.exit();
    result
}

/// Looks for `f.prototype` on the prototype chain of `v`.
fn ordinary_has_instance(ctx: &mut EvalContext, f: &JsObjectType, v: &JsValue) -> Result<bool, JErrorType> {
    let v = match v {
        JsValue::Object(o) => o.clone(),
        _ => return Ok(false),
    };
    let proto = match get(ctx, f, &PROTOTYPE_PROP)? {
        JsValue::Object(p) => p,
        _ => {
            return raise(
                ErrorKind::TypeError,
                "Function has non-object prototype in instanceof check",
            )
        }
    };
    let mut current = v.borrow().get_prototype_of();
    while let Some(p) = current {
        if Rc::ptr_eq(&p, &proto) {
            return Ok(true);
        }
        current = p.borrow().get_prototype_of();
    }
    Ok(false)
}

/// `v instanceof f` as the walker evaluates it: `Unknown` on either side gives `Unknown`.
pub fn instance_of(ctx: &mut EvalContext, v: &JsValue, f: &JsValue) -> ValueResult {
    if v.is_unknown() || f.is_unknown() {
        return Ok(JsValue::Unknown);
    }
    match f {
        JsValue::Object(o) => Ok(JsValue::Boolean(has_instance(ctx, o, v)?)),
        _ => raise(
            ErrorKind::TypeError,
            "Right-hand side of 'instanceof' is not callable",
        ),
    }
}

fn define_length(f: &mut JsObject, length: JsNumberType) {
    f.insert_own_property(
        LENGTH_PROP.clone(),
        PropertyDescriptorSetter::data(JsValue::Number(length), false, false, false)
            .into_new_descriptor(),
    );
}

/// A native function inheriting from `prototype` (normally Function.prototype), with a
/// read-only `length` equal to `arity`.
pub fn create_native_function(
    prototype: &JsObjectType,
    name: &'static str,
    arity: u32,
    call: NativeFn,
) -> JsObjectType {
    let mut f = JsObject::new_function(
        FunctionKind::Native(NativeFunction {
            name,
            arity,
            call,
            construct: None,
        }),
        Some(prototype),
    );
    define_length(&mut f, JsNumberType::Integer(arity as i64));
    f.into_shared()
}

/// Function object for a body supplied by the walker.
pub fn create_ordinary_function(
    ctx: &EvalContext,
    body: Rc<dyn FunctionBody>,
    length: u32,
) -> JsObjectType {
    let mut f = JsObject::new_function(
        FunctionKind::Ordinary(body),
        Some(ctx.intrinsics().function_prototype()),
    );
    define_length(&mut f, JsNumberType::Integer(length as i64));
    f.into_shared()
}
