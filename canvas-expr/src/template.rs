use crate::context::BindingContext;
use crate::error::ExprResult;
use crate::parser::Expression;
use crate::value::display;
use serde_json::Value;

/// A piece of a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Text(String),
    Binding(Expression),
}

/// Text with embedded `{{ expression }}` bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Splits `source` into text and bindings. An unterminated `{{` is
    /// kept as text.
    pub fn parse(source: &str) -> ExprResult<Self> {
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(open) = rest.find("{{") {
            let Some(close) = rest[open + 2..].find("}}") else {
                break;
            };
            if open > 0 {
                segments.push(Segment::Text(rest[..open].to_string()));
            }
            let body = &rest[open + 2..open + 2 + close];
            segments.push(Segment::Binding(Expression::parse(body)?));
            rest = &rest[open + 2 + close + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Text(rest.to_string()));
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether the template contains at least one binding.
    pub fn is_dynamic(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Binding(_)))
    }

    /// Evaluates the template. A template that is exactly one binding yields
    /// the binding's value unchanged; otherwise the pieces are joined into a
    /// string.
    pub fn evaluate(&self, ctx: &BindingContext<'_>) -> ExprResult<Value> {
        match self.segments.as_slice() {
            [] => Ok(Value::String(String::new())),
            [Segment::Binding(expr)] => expr.evaluate(ctx),
            [Segment::Text(text)] => Ok(Value::String(text.clone())),
            segments => {
                let mut out = String::new();
                for segment in segments {
                    match segment {
                        Segment::Text(text) => out.push_str(text),
                        Segment::Binding(expr) => out.push_str(&display(&expr.evaluate(ctx)?)),
                    }
                }
                Ok(Value::String(out))
            }
        }
    }
}
