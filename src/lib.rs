//! # jsabsint - runtime core of a JavaScript abstract interpreter
//!
//! Values, objects and the invocation protocol used while walking JavaScript source
//! for static analysis. Besides the usual ECMAScript 5 value kinds there is
//! [`Unknown`](runner::ds::value::JsValue::Unknown), a value the analysis could not
//! determine. Operations receiving it yield `Unknown` instead of performing work or
//! raising, so an analysis can keep going past code it does not understand.
//!
//! ## Quick Start
//!
//! ```
//! use jsabsint::runner::ds::function_object::call;
//! use jsabsint::runner::ds::object_property::PropertyKey;
//! use jsabsint::runner::ds::operations::object::get;
//! use jsabsint::runner::ds::value::JsValue;
//! use jsabsint::runner::plugin::types::EvalContext;
//!
//! let mut ctx = EvalContext::new().unwrap();
//! let fp = ctx.intrinsics().function_prototype().clone();
//! let bind = get(&mut ctx, &fp, &PropertyKey::from("bind")).unwrap();
//! let bind = bind.as_object().unwrap().clone();
//!
//! // Function.prototype.bind.call(Function.prototype, null, 1)
//! let bound = call(&mut ctx, &bind, JsValue::Object(fp), vec![JsValue::Null, JsValue::from(1i64)]).unwrap();
//! assert!(bound.is_callable());
//!
//! // Unknown in, Unknown out.
//! let r = call(&mut ctx, &bind, JsValue::Unknown, vec![]).unwrap();
//! assert!(r.is_unknown());
//! ```
//!
//! ## Architecture
//!
//! - **[`runner::ds`]** - Values, objects, property descriptors, callables and the
//!   abstract operations over them
//! - **[`runner::std_lib`]** - Object.prototype and Function.prototype
//! - **[`runner::plugin`]** - [`EvalContext`](runner::plugin::types::EvalContext) and
//!   the include-finder plugin
//! - **[`runner::eval`]** - Diagnostics recorded by the AST walker

#[macro_use]
extern crate lazy_static;

pub mod runner;
