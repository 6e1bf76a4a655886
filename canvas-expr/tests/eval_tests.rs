use canvas_expr::{BindingContext, ExprError, Expression, Functions};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn eval_with(this: Value, source: &str) -> Result<Value, ExprError> {
    let functions = Functions::standard();
    let ctx = BindingContext::new(this, &functions);
    Expression::parse(source).unwrap().evaluate(&ctx)
}

fn eval(source: &str) -> Value {
    eval_with(
        json!({
            "text": "hello",
            "count": 3,
            "isRequired": true,
            "tags": ["a", "b"],
            "nested": { "inner": { "value": 7 } },
        }),
        source,
    )
    .unwrap()
}

// ── Lookup ───────────────────────────────────────────────────────

#[test]
fn this_member_lookup() {
    assert_eq!(eval("this.text"), json!("hello"));
    assert_eq!(eval("this.nested.inner.value"), json!(7));
}

#[test]
fn missing_members_are_null() {
    assert_eq!(eval("this.absent"), Value::Null);
    assert_eq!(eval("this.absent.deeper.still"), Value::Null);
    assert_eq!(eval("this.count.foo"), Value::Null);
}

#[test]
fn length_of_strings_and_arrays() {
    assert_eq!(eval("this.text.length"), json!(5));
    assert_eq!(eval("this.tags.length"), json!(2));
}

#[test]
fn index_access() {
    assert_eq!(eval("this.tags[1]"), json!("b"));
    assert_eq!(eval("this.tags[5]"), Value::Null);
    assert_eq!(eval("this['text']"), json!("hello"));
    assert_eq!(eval("this.nested['inner'].value"), json!(7));
}

#[test]
fn unknown_root_is_an_error() {
    assert_eq!(
        eval_with(json!({}), "window.location").unwrap_err(),
        ExprError::UnknownIdentifier("window".into())
    );
}

#[test]
fn other_widgets_resolve_by_name() {
    let functions = Functions::standard();
    let ctx = BindingContext::new(json!({}), &functions)
        .with_widget("Input1", json!({"text": "from input"}));
    let value = Expression::parse("Input1.text").unwrap().evaluate(&ctx).unwrap();
    assert_eq!(value, json!("from input"));
}

// ── Arithmetic ───────────────────────────────────────────────────

#[test]
fn arithmetic_on_numbers() {
    assert_eq!(eval("this.count * 2 + 1"), json!(7));
    assert_eq!(eval("7 % 4"), json!(3));
    assert_eq!(eval("1 / 4"), json!(0.25));
    assert_eq!(eval("-this.count"), json!(-3));
}

#[test]
fn division_by_zero_is_null() {
    assert_eq!(eval("1 / 0"), Value::Null);
    assert_eq!(eval("0 / 0"), Value::Null);
}

#[test]
fn plus_concatenates_when_a_string_is_involved() {
    assert_eq!(eval("this.text + ' world'"), json!("hello world"));
    assert_eq!(eval("'n=' + this.count"), json!("n=3"));
    assert_eq!(eval("1 + '2'"), json!("12"));
}

#[test]
fn numeric_strings_coerce_in_arithmetic() {
    assert_eq!(eval("'6' * 2"), json!(12));
    assert_eq!(eval("'abc' * 2"), Value::Null);
}

// ── Comparison and logic ─────────────────────────────────────────

#[test]
fn loose_and_strict_equality() {
    assert_eq!(eval("'3' == this.count"), json!(true));
    assert_eq!(eval("'3' === this.count"), json!(false));
    assert_eq!(eval("null == null"), json!(true));
    assert_eq!(eval("null == 0"), json!(false));
    assert_eq!(eval("this.text !== 'hello'"), json!(false));
}

#[test]
fn relational_comparison() {
    assert_eq!(eval("this.count > 2"), json!(true));
    assert_eq!(eval("this.count <= 2"), json!(false));
    assert_eq!(eval("'abc' < 'abd'"), json!(true));
    assert_eq!(eval("'abc' < 5"), json!(false));
    assert_eq!(eval("'abc' >= 5"), json!(false));
}

#[test]
fn logical_operators_return_operands() {
    assert_eq!(eval("this.absent || 'fallback'"), json!("fallback"));
    assert_eq!(eval("this.text && this.count"), json!(3));
    assert_eq!(eval("'' && this.count"), json!(""));
    assert_eq!(eval("!this.isRequired"), json!(false));
    assert_eq!(eval("!''"), json!(true));
}

#[test]
fn short_circuit_skips_unknown_names() {
    assert_eq!(eval("true || nobody.here"), json!(true));
    assert_eq!(eval("false && nobody.here"), json!(false));
}

#[test]
fn conditional_selects_branch() {
    assert_eq!(eval("this.isRequired ? 'yes' : 'no'"), json!("yes"));
    assert_eq!(eval("this.tags.length > 5 ? 'many' : 'few'"), json!("few"));
}

// ── Functions ────────────────────────────────────────────────────

#[test]
fn standard_functions() {
    assert_eq!(eval("upper(this.text)"), json!("HELLO"));
    assert_eq!(eval("lower('ABC')"), json!("abc"));
    assert_eq!(eval("trim('  x ')"), json!("x"));
    assert_eq!(eval("len(this.tags)"), json!(2));
    assert_eq!(eval("len(this.absent)"), json!(0));
    assert_eq!(eval("isNumeric('12.5')"), json!(true));
    assert_eq!(eval("isNumeric('12px')"), json!(false));
    assert_eq!(eval("matches(this.text, '/^HEL/i')"), json!(true));
    assert_eq!(eval("matches(this.text, '')"), json!(true));
}

#[test]
fn unknown_function_is_an_error() {
    assert_eq!(
        eval_with(json!({}), "eval('1')").unwrap_err(),
        ExprError::UnknownFunction("eval".into())
    );
}

#[test]
fn arity_is_checked() {
    assert_eq!(
        eval_with(json!({}), "upper('a', 'b')").unwrap_err(),
        ExprError::Arity {
            name: "upper".into(),
            expected: 1,
            got: 2
        }
    );
}

#[test]
fn len_rejects_numbers() {
    assert!(matches!(
        eval_with(json!({}), "len(5)"),
        Err(ExprError::Type(_))
    ));
}

#[test]
fn custom_functions_can_be_registered() {
    let mut functions = Functions::standard();
    functions.register("double", 1, |args| {
        Ok(json!(args[0].as_f64().unwrap_or(0.0) * 2.0))
    });
    assert!(functions.contains("double"));
    let ctx = BindingContext::new(json!({"n": 4}), &functions);
    let value = Expression::parse("double(this.n)").unwrap().evaluate(&ctx).unwrap();
    assert_eq!(value, json!(8.0));
}

#[test]
fn empty_table_calls_nothing() {
    let functions = Functions::new();
    let ctx = BindingContext::new(json!({}), &functions);
    assert!(Expression::parse("len('a')").unwrap().evaluate(&ctx).is_err());
}
