use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::context::BindingContext;
use crate::error::{ExprError, ExprResult};
use crate::value::{compare, display, loose_eq, number, strict_eq, to_number, truthy};
use serde_json::Value;
use std::cmp::Ordering;

pub(crate) fn evaluate(expr: &Expr, ctx: &BindingContext<'_>) -> ExprResult<Value> {
    match expr {
        Expr::Literal(v) => Ok(v.clone()),
        Expr::Ident(name) => ctx
            .resolve(name)
            .cloned()
            .ok_or_else(|| ExprError::UnknownIdentifier(name.clone())),
        Expr::Member(object, name) => {
            let object = evaluate(object, ctx)?;
            Ok(member(&object, name))
        }
        Expr::Index(object, index) => {
            let object = evaluate(object, ctx)?;
            let index = evaluate(index, ctx)?;
            Ok(match (&object, &index) {
                (Value::Array(items), Value::Number(n)) => n
                    .as_u64()
                    .and_then(|i| items.get(i as usize))
                    .cloned()
                    .unwrap_or(Value::Null),
                _ => member(&object, &display(&index)),
            })
        }
        Expr::Call(name, args) => {
            let args = args
                .iter()
                .map(|a| evaluate(a, ctx))
                .collect::<ExprResult<Vec<_>>>()?;
            ctx.functions().call(name, &args)
        }
        Expr::Unary(op, operand) => {
            let v = evaluate(operand, ctx)?;
            Ok(match op {
                UnaryOp::Not => Value::Bool(!truthy(&v)),
                UnaryOp::Neg => to_number(&v).map_or(Value::Null, |n| number(-n)),
            })
        }
        Expr::Binary(BinaryOp::And, lhs, rhs) => {
            let l = evaluate(lhs, ctx)?;
            if truthy(&l) { evaluate(rhs, ctx) } else { Ok(l) }
        }
        Expr::Binary(BinaryOp::Or, lhs, rhs) => {
            let l = evaluate(lhs, ctx)?;
            if truthy(&l) { Ok(l) } else { evaluate(rhs, ctx) }
        }
        Expr::Binary(op, lhs, rhs) => {
            let l = evaluate(lhs, ctx)?;
            let r = evaluate(rhs, ctx)?;
            Ok(binary(*op, &l, &r))
        }
        Expr::Conditional(cond, then, otherwise) => {
            if truthy(&evaluate(cond, ctx)?) {
                evaluate(then, ctx)
            } else {
                evaluate(otherwise, ctx)
            }
        }
    }
}

/// Property lookup. Missing keys and lookups on `null` yield `null`
/// rather than an error, so `this.a.b` on a sparse widget is harmless.
fn member(object: &Value, name: &str) -> Value {
    match object {
        Value::Object(map) => map.get(name).cloned().unwrap_or(Value::Null),
        Value::Array(items) if name == "length" => Value::from(items.len()),
        Value::String(s) if name == "length" => Value::from(s.chars().count()),
        _ => Value::Null,
    }
}

fn binary(op: BinaryOp, l: &Value, r: &Value) -> Value {
    let arith = |f: fn(f64, f64) -> f64| match (to_number(l), to_number(r)) {
        (Some(a), Some(b)) => number(f(a, b)),
        _ => Value::Null,
    };
    let ordering = |accept: fn(Ordering) -> bool| Value::Bool(compare(l, r).is_some_and(accept));

    match op {
        BinaryOp::Add => {
            if l.is_string() || r.is_string() {
                Value::String(display(l) + &display(r))
            } else {
                arith(|a, b| a + b)
            }
        }
        BinaryOp::Sub => arith(|a, b| a - b),
        BinaryOp::Mul => arith(|a, b| a * b),
        BinaryOp::Div => arith(|a, b| a / b),
        BinaryOp::Rem => arith(|a, b| a % b),
        BinaryOp::LooseEq => Value::Bool(loose_eq(l, r)),
        BinaryOp::LooseNe => Value::Bool(!loose_eq(l, r)),
        BinaryOp::StrictEq => Value::Bool(strict_eq(l, r)),
        BinaryOp::StrictNe => Value::Bool(!strict_eq(l, r)),
        BinaryOp::Lt => ordering(|o| o == Ordering::Less),
        BinaryOp::Le => ordering(|o| o != Ordering::Greater),
        BinaryOp::Gt => ordering(|o| o == Ordering::Greater),
        BinaryOp::Ge => ordering(|o| o != Ordering::Less),
        BinaryOp::And | BinaryOp::Or => unreachable!("short-circuit operators are handled by evaluate"),
    }
}
