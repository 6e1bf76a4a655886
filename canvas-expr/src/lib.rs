//! Binding expressions for the canvas widget engine.
//!
//! Widget properties and derived properties are written as templates such
//! as `"{{ this.text }}"` or `"Hello {{ Input1.text }}!"`. This crate parses
//! and evaluates them inside a sandbox:
//!
//! - the only reachable names are the roots registered on a
//!   [`BindingContext`] (`this` plus named widgets);
//! - the only callable functions are those in a [`Functions`] table;
//! - nothing can mutate the context, perform I/O or loop.
//!
//! # Example
//!
//! ```
//! use canvas_expr::{BindingContext, Functions, Template};
//! use serde_json::json;
//!
//! let functions = Functions::standard();
//! let ctx = BindingContext::new(json!({"text": "hi"}), &functions);
//! let value = Template::parse("{{ upper(this.text) }}!").unwrap().evaluate(&ctx).unwrap();
//! assert_eq!(value, json!("HI!"));
//! ```

mod ast;
mod context;
mod error;
mod eval;
mod functions;
mod lexer;
mod parser;
mod template;
pub mod value;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use context::BindingContext;
pub use error::{ExprError, ExprResult};
pub use functions::{Builtin, Functions};
pub use parser::Expression;
pub use template::{Segment, Template};

/// Parses and evaluates a template in one step.
pub fn evaluate_template(
    source: &str,
    ctx: &BindingContext<'_>,
) -> ExprResult<serde_json::Value> {
    Template::parse(source)?.evaluate(ctx)
}
