//! Same-value comparison for JSON values.
//!
//! Numbers compare by same-value rules: `NaN` equals itself, `-0` and `+0`
//! are distinct, and an integer equals a float of the same value. Everything
//! else compares structurally; object key order is irrelevant.

use serde_json::{Number, Value};

/// Compare two numbers with same-value semantics.
pub fn same_number(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        if !(a.is_f64() || b.is_f64()) {
            return x == y;
        }
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        if !(a.is_f64() || b.is_f64()) {
            return x == y;
        }
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => same_f64(x, y),
        _ => false,
    }
}

fn same_f64(x: f64, y: f64) -> bool {
    if x.is_nan() || y.is_nan() {
        return x.is_nan() && y.is_nan();
    }
    if x == 0.0 && y == 0.0 {
        return x.is_sign_negative() == y.is_sign_negative();
    }
    x == y
}

/// Compare two scalars with same-value semantics.
///
/// Containers are compared by identity: two containers are the same value
/// only if they are the same node.
pub fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => same_number(x, y),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => {
            std::ptr::eq(a, b)
        }
        _ => false,
    }
}

/// Structural equality with same-value number semantics.
///
/// Pairs are compared from an explicit work list, so depth is bounded only
/// by memory.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    let mut pending = vec![(a, b)];
    while let Some((a, b)) = pending.pop() {
        match (a, b) {
            (Value::Array(xs), Value::Array(ys)) => {
                if xs.len() != ys.len() {
                    return false;
                }
                pending.extend(xs.iter().zip(ys));
            }
            (Value::Object(xs), Value::Object(ys)) => {
                if xs.len() != ys.len() {
                    return false;
                }
                for (key, x) in xs {
                    match ys.get(key) {
                        Some(y) => pending.push((x, y)),
                        None => return false,
                    }
                }
            }
            _ if !same_value(a, b) => return false,
            _ => {}
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn num(v: f64) -> Value {
        Value::Number(Number::from_f64(v).unwrap())
    }

    #[test]
    fn signed_zeros_are_distinct() {
        assert!(!same_value(&num(0.0), &num(-0.0)));
        assert!(same_value(&num(-0.0), &num(-0.0)));
    }

    #[test]
    fn integer_and_float_of_same_value_are_equal() {
        assert!(same_value(&json!(1), &num(1.0)));
        assert!(!same_value(&json!(1), &num(1.5)));
    }

    #[test]
    fn large_unsigned_integers_compare_exactly() {
        assert!(same_value(&json!(u64::MAX), &json!(u64::MAX)));
        assert!(!same_value(&json!(u64::MAX), &json!(u64::MAX - 1)));
    }

    #[test]
    fn different_kinds_are_never_equal() {
        assert!(!same_value(&json!(null), &json!(false)));
        assert!(!same_value(&json!("1"), &json!(1)));
    }

    #[test]
    fn deep_equal_ignores_key_order() {
        let a = json!({"a": 1, "b": [1, {"c": null}]});
        let b = json!({"b": [1, {"c": null}], "a": 1});
        assert!(deep_equal(&a, &b));
    }

    #[test]
    fn deep_equal_detects_nested_difference() {
        let a = json!({"a": [1, 2, 3]});
        let b = json!({"a": [1, 2, 4]});
        assert!(!deep_equal(&a, &b));
        assert!(!deep_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
    }

    #[test]
    fn deep_equal_handles_deep_nesting() {
        let mut a = json!(1);
        let mut b = json!(1);
        for _ in 0..10_000 {
            a = json!({"n": a});
            b = json!({"n": b});
        }
        assert!(deep_equal(&a, &b));
        // serde_json's own Drop is recursive; leak the values instead.
        std::mem::forget(a);
        std::mem::forget(b);
    }

    #[test]
    fn distinct_containers_are_not_the_same_value() {
        let a = json!([1]);
        let b = json!([1]);
        assert!(!same_value(&a, &b));
        assert!(same_value(&a, &a));
    }
}
