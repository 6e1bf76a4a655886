//! Whitelisted functions callable from expressions.

use crate::error::{ExprError, ExprResult};
use crate::value::{display, is_numeric_str};
use canvas_model::TextPattern;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// A host function. Receives already-evaluated arguments.
pub type Builtin = fn(&[Value]) -> ExprResult<Value>;

/// Table of callable functions. Expressions cannot reach anything else.
#[derive(Clone, Default)]
pub struct Functions {
    table: HashMap<&'static str, (usize, Builtin)>,
}

impl fmt::Debug for Functions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.table.keys().collect();
        names.sort();
        f.debug_struct("Functions").field("names", &names).finish()
    }
}

impl Functions {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The general-purpose functions: `len`, `trim`, `lower`, `upper`,
    /// `isNumeric`, `matches`.
    pub fn standard() -> Self {
        let mut functions = Self::new();
        functions.register("len", 1, len);
        functions.register("trim", 1, |args| Ok(Value::String(display(&args[0]).trim().to_string())));
        functions.register("lower", 1, |args| Ok(Value::String(display(&args[0]).to_lowercase())));
        functions.register("upper", 1, |args| Ok(Value::String(display(&args[0]).to_uppercase())));
        functions.register("isNumeric", 1, is_numeric);
        functions.register("matches", 2, matches);
        functions
    }

    /// Registers (or replaces) a function with a fixed arity.
    pub fn register(&mut self, name: &'static str, arity: usize, f: Builtin) {
        self.table.insert(name, (arity, f));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Calls `name` after checking its arity.
    pub fn call(&self, name: &str, args: &[Value]) -> ExprResult<Value> {
        let (arity, f) = self
            .table
            .get(name)
            .ok_or_else(|| ExprError::UnknownFunction(name.to_string()))?;
        if args.len() != *arity {
            return Err(ExprError::Arity {
                name: name.to_string(),
                expected: *arity,
                got: args.len(),
            });
        }
        f(args)
    }
}

fn len(args: &[Value]) -> ExprResult<Value> {
    let n = match &args[0] {
        Value::String(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        Value::Null => 0,
        other => return Err(ExprError::Type(format!("len() of {other}"))),
    };
    Ok(Value::from(n))
}

fn is_numeric(args: &[Value]) -> ExprResult<Value> {
    Ok(Value::Bool(match &args[0] {
        Value::Number(_) => true,
        Value::String(s) => is_numeric_str(s),
        _ => false,
    }))
}

/// `matches(text, pattern)`: pattern uses the `/body/flags` convention.
/// An empty pattern matches everything.
fn matches(args: &[Value]) -> ExprResult<Value> {
    let text = display(&args[0]);
    let pattern = display(&args[1]);
    Ok(Value::Bool(
        TextPattern::parse(&pattern).is_none_or(|p| p.is_match(&text)),
    ))
}
