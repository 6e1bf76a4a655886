//! Property-based checks that evaluation is total: any parsed expression
//! over arbitrary inputs returns a value or an error, never panics.

use canvas_expr::{BindingContext, Expression, Functions, Template};
use proptest::prelude::*;
use serde_json::{Value, json};

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        (-1e6f64..1e6).prop_map(|n| json!(n)),
        "[a-z0-9 ]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,3}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

const EXPRESSIONS: &[&str] = &[
    "this.a + this.b",
    "this.a - this.b * this.a / this.b % this.a",
    "this.a == this.b || this.a === this.b",
    "this.a < this.b ? this.a : this.b",
    "!this.a && -this.b",
    "this.a[this.b]",
    "this.a.length",
    "len(this.a)",
    "upper(this.a) + lower(this.b)",
    "matches(this.a, this.b)",
    "isNumeric(this.a)",
];

proptest! {
    #[test]
    fn evaluation_never_panics(a in arb_value(), b in arb_value(), idx in 0..EXPRESSIONS.len()) {
        let functions = Functions::standard();
        let ctx = BindingContext::new(json!({"a": a, "b": b}), &functions);
        let expr = Expression::parse(EXPRESSIONS[idx]).unwrap();
        let _ = expr.evaluate(&ctx);
    }

    #[test]
    fn parsing_arbitrary_text_never_panics(source in "\\PC{0,40}") {
        let _ = Expression::parse(&source);
        let _ = Template::parse(&source);
    }

    #[test]
    fn static_text_renders_verbatim(text in "[a-zA-Z0-9 .,!]{0,40}") {
        let functions = Functions::new();
        let ctx = BindingContext::new(json!({}), &functions);
        let rendered = Template::parse(&text).unwrap().evaluate(&ctx).unwrap();
        prop_assert_eq!(rendered, Value::String(text));
    }
}

// ── Resource limits ─────────────────────────────────────────────

#[test]
fn oversized_bindings_fail_to_parse() {
    let functions = Functions::standard();
    let ctx = BindingContext::new(json!({"a": {"a": 1}}), &functions);

    let sum = format!("{{{{ {} }}}}", vec!["1"; 200_000].join("+"));
    assert!(canvas_expr::evaluate_template(&sum, &ctx).is_err());

    let path = format!("{{{{ this{} }}}}", ".a".repeat(200_000));
    assert!(canvas_expr::evaluate_template(&path, &ctx).is_err());
}

#[test]
fn chains_within_budget_evaluate() {
    let functions = Functions::standard();
    let ctx = BindingContext::new(json!({"a": {"a": 1}}), &functions);

    let sum = Expression::parse(&vec!["1"; 100].join(" + ")).unwrap();
    assert_eq!(sum.evaluate(&ctx).unwrap(), json!(100));

    let path = Expression::parse(&format!("this{}", ".a".repeat(100))).unwrap();
    assert_eq!(path.evaluate(&ctx).unwrap(), Value::Null);
}
