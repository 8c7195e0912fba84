//! Property-based tests for the invocation protocol.
//!
//! Operands are concrete primitives; objects are created per case since they are tied
//! to one `EvalContext`.

extern crate jsabsint;

use proptest::prelude::*;

use jsabsint::runner::ds::array_object::array_create;
use jsabsint::runner::ds::function_object::{call, create_native_function};
use jsabsint::runner::ds::object::JsObjectType;
use jsabsint::runner::ds::object_property::PropertyKey;
use jsabsint::runner::ds::operations::object::get;
use jsabsint::runner::ds::value::JsValue;
use jsabsint::runner::plugin::types::{EvalContext, ValueResult};

// -- Strategies --

fn primitive_strategy() -> impl Strategy<Value = JsValue> {
    prop_oneof![
        Just(JsValue::Undefined),
        Just(JsValue::Null),
        any::<bool>().prop_map(JsValue::from),
        (-1000i64..1000).prop_map(JsValue::from),
        "[a-z]{0,6}".prop_map(JsValue::String),
    ]
}

fn args_strategy() -> impl Strategy<Value = Vec<JsValue>> {
    prop::collection::vec(primitive_strategy(), 0..6)
}

// -- Helpers --

/// Returns `[this, ...args]` as an array.
fn record(ctx: &mut EvalContext, this: JsValue, args: Vec<JsValue>) -> ValueResult {
    let mut all = vec![this];
    all.extend(args);
    Ok(JsValue::Object(array_create(ctx, all)))
}

fn recorder(ctx: &EvalContext, arity: u32) -> JsObjectType {
    create_native_function(ctx.intrinsics().function_prototype(), "record", arity, record)
}

fn method(ctx: &mut EvalContext, name: &str) -> JsObjectType {
    let fp = ctx.intrinsics().function_prototype().clone();
    get(ctx, &fp, &PropertyKey::from(name))
        .unwrap()
        .as_object()
        .unwrap()
        .clone()
}

fn elements(ctx: &mut EvalContext, arr: &JsValue) -> Vec<JsValue> {
    let arr = arr.as_object().unwrap().clone();
    let len = match get(ctx, &arr, &PropertyKey::from("length")).unwrap() {
        JsValue::Number(l) => l.as_f64() as u32,
        other => panic!("length is {:?}", other),
    };
    (0..len)
        .map(|i| get(ctx, &arr, &PropertyKey::Int(i)).unwrap())
        .collect()
}

proptest! {
    #[test]
    fn unknown_operand_always_yields_unknown(
        name in prop::sample::select(vec!["toString", "apply", "call", "bind"]),
        this in primitive_strategy(),
        mut args in args_strategy(),
        at in 0usize..7,
    ) {
        let mut ctx = EvalContext::new().unwrap();
        let m = method(&mut ctx, name);
        let at = at % (args.len() + 1);
        args.insert(at, JsValue::Unknown);
        let r = call(&mut ctx, &m, this, args).unwrap();
        prop_assert_eq!(r, JsValue::Unknown);
    }

    #[test]
    fn call_matches_apply(this_arg in primitive_strategy(), args in args_strategy()) {
        let mut ctx = EvalContext::new().unwrap();
        let f = JsValue::Object(recorder(&ctx, 0));
        let call_fn = method(&mut ctx, "call");
        let apply = method(&mut ctx, "apply");

        let mut call_args = vec![this_arg.clone()];
        call_args.extend(args.iter().cloned());
        let via_call = call(&mut ctx, &call_fn, f.clone(), call_args).unwrap();

        let arr = JsValue::Object(array_create(&ctx, args));
        let via_apply = call(&mut ctx, &apply, f, vec![this_arg, arr]).unwrap();

        let a = elements(&mut ctx, &via_call);
        let b = elements(&mut ctx, &via_apply);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn bound_call_matches_call_with_prefix(
        this_arg in primitive_strategy(),
        prefix in args_strategy(),
        rest in args_strategy(),
        call_site_this in primitive_strategy(),
    ) {
        let mut ctx = EvalContext::new().unwrap();
        let f = recorder(&ctx, 0);
        let bind = method(&mut ctx, "bind");

        let mut bind_args = vec![this_arg.clone()];
        bind_args.extend(prefix.iter().cloned());
        let bound = call(&mut ctx, &bind, JsValue::Object(f.clone()), bind_args).unwrap();
        let bound = bound.as_object().unwrap().clone();
        let via_bound = call(&mut ctx, &bound, call_site_this, rest.clone()).unwrap();

        let mut all = prefix;
        all.extend(rest);
        let direct = call(&mut ctx, &f, this_arg, all).unwrap();

        let a = elements(&mut ctx, &via_bound);
        let b = elements(&mut ctx, &direct);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn bound_length_is_floored_difference(arity in 0u32..8, k in 0usize..10) {
        let mut ctx = EvalContext::new().unwrap();
        let f = recorder(&ctx, arity);
        let bind = method(&mut ctx, "bind");
        let mut bind_args = vec![JsValue::Null];
        bind_args.extend((0..k).map(|i| JsValue::from(i as i64)));
        let bound = call(&mut ctx, &bind, JsValue::Object(f), bind_args).unwrap();
        let bound = bound.as_object().unwrap().clone();
        let len = get(&mut ctx, &bound, &PropertyKey::from("length")).unwrap();
        let expected = (arity as i64 - k as i64).max(0);
        prop_assert_eq!(len, JsValue::from(expected));
    }
}
