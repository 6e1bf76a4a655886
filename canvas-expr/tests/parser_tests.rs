use canvas_expr::{BinaryOp, Expr, ExprError, Expression, UnaryOp};
use pretty_assertions::assert_eq;
use serde_json::json;

fn ast(source: &str) -> Expr {
    Expression::parse(source).unwrap().ast().clone()
}

fn ident(name: &str) -> Box<Expr> {
    Box::new(Expr::Ident(name.to_string()))
}

fn lit(v: serde_json::Value) -> Box<Expr> {
    Box::new(Expr::Literal(v))
}

// ── Literals ─────────────────────────────────────────────────────

#[test]
fn keyword_literals() {
    assert_eq!(ast("true"), Expr::Literal(json!(true)));
    assert_eq!(ast("false"), Expr::Literal(json!(false)));
    assert_eq!(ast("null"), Expr::Literal(json!(null)));
    assert_eq!(ast("undefined"), Expr::Literal(json!(null)));
}

#[test]
fn integral_numbers_stay_integral() {
    assert_eq!(ast("42"), Expr::Literal(json!(42)));
    assert_eq!(ast("1.5"), Expr::Literal(json!(1.5)));
    assert_eq!(ast("1e3"), Expr::Literal(json!(1000)));
}

#[test]
fn string_literals_with_escapes() {
    assert_eq!(ast(r#""a\"b""#), Expr::Literal(json!("a\"b")));
    assert_eq!(ast(r"'line\nbreak'"), Expr::Literal(json!("line\nbreak")));
}

// ── Precedence ───────────────────────────────────────────────────

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(
        ast("1 + 2 * 3"),
        Expr::Binary(
            BinaryOp::Add,
            lit(json!(1)),
            Box::new(Expr::Binary(BinaryOp::Mul, lit(json!(2)), lit(json!(3)))),
        )
    );
}

#[test]
fn binary_operators_are_left_associative() {
    assert_eq!(
        ast("a - b - c"),
        Expr::Binary(
            BinaryOp::Sub,
            Box::new(Expr::Binary(BinaryOp::Sub, ident("a"), ident("b"))),
            ident("c"),
        )
    );
}

#[test]
fn and_binds_tighter_than_or() {
    assert_eq!(
        ast("a || b && c"),
        Expr::Binary(
            BinaryOp::Or,
            ident("a"),
            Box::new(Expr::Binary(BinaryOp::And, ident("b"), ident("c"))),
        )
    );
}

#[test]
fn strict_equality_is_one_token() {
    assert_eq!(
        ast("a === b"),
        Expr::Binary(BinaryOp::StrictEq, ident("a"), ident("b"))
    );
    assert_eq!(
        ast("a !== b"),
        Expr::Binary(BinaryOp::StrictNe, ident("a"), ident("b"))
    );
}

#[test]
fn conditional_is_right_associative() {
    assert_eq!(
        ast("a ? 1 : b ? 2 : 3"),
        Expr::Conditional(
            ident("a"),
            lit(json!(1)),
            Box::new(Expr::Conditional(ident("b"), lit(json!(2)), lit(json!(3)))),
        )
    );
}

#[test]
fn unary_operators_nest() {
    assert_eq!(
        ast("!!a"),
        Expr::Unary(
            UnaryOp::Not,
            Box::new(Expr::Unary(UnaryOp::Not, ident("a")))
        )
    );
    assert_eq!(ast("-1"), Expr::Unary(UnaryOp::Neg, lit(json!(1))));
}

// ── Postfix ──────────────────────────────────────────────────────

#[test]
fn member_and_index_chains() {
    assert_eq!(
        ast("this.tabsObj[key].label"),
        Expr::Member(
            Box::new(Expr::Index(
                Box::new(Expr::Member(ident("this"), "tabsObj".into())),
                ident("key"),
            )),
            "label".into(),
        )
    );
}

#[test]
fn calls_take_argument_lists() {
    assert_eq!(ast("len()"), Expr::Call("len".into(), vec![]));
    assert_eq!(
        ast("matches(this.text, '/a/i')"),
        Expr::Call(
            "matches".into(),
            vec![
                Expr::Member(ident("this"), "text".into()),
                Expr::Literal(json!("/a/i")),
            ],
        )
    );
}

// ── Rejections ───────────────────────────────────────────────────

#[test]
fn only_named_functions_are_callable() {
    let err = Expression::parse("this.text()").unwrap_err();
    assert!(matches!(err, ExprError::Parse { .. }));
}

#[test]
fn assignment_and_statements_do_not_parse() {
    for source in ["a = 1", "a; b", "a => a", "{a: 1}", "`tpl`"] {
        assert!(
            matches!(Expression::parse(source), Err(ExprError::Parse { .. })),
            "{source} should be rejected"
        );
    }
}

#[test]
fn empty_expression_is_rejected() {
    assert_eq!(
        Expression::parse("   ").unwrap_err(),
        ExprError::Parse {
            message: "empty expression".into(),
            offset: 0
        }
    );
}

#[test]
fn parse_errors_report_offsets() {
    match Expression::parse("a + ").unwrap_err() {
        ExprError::Parse { offset, .. } => assert_eq!(offset, 4),
        other => panic!("unexpected error: {other:?}"),
    }
    match Expression::parse("a b").unwrap_err() {
        ExprError::Parse { offset, .. } => assert_eq!(offset, 2),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unterminated_string_is_rejected() {
    assert!(matches!(
        Expression::parse("'abc"),
        Err(ExprError::Parse { offset: 0, .. })
    ));
}

#[test]
fn deep_nesting_is_rejected() {
    let source = format!("{}1{}", "(".repeat(200), ")".repeat(200));
    assert!(matches!(
        Expression::parse(&source),
        Err(ExprError::Parse { .. })
    ));
    let source = format!("{}a", "!".repeat(200));
    assert!(Expression::parse(&source).is_err());
}

#[test]
fn moderate_nesting_is_fine() {
    let source = format!("{}1{}", "(".repeat(20), ")".repeat(20));
    assert_eq!(Expression::parse(&source).unwrap().ast(), &Expr::Literal(json!(1)));
}

#[test]
fn long_operator_chain_is_rejected() {
    let source = vec!["1"; 200_000].join("+");
    assert!(matches!(
        Expression::parse(&source),
        Err(ExprError::Parse { .. })
    ));

    let mixed = vec!["a"; 200_000].join(" && ");
    assert!(Expression::parse(&mixed).is_err());
}

#[test]
fn long_postfix_chain_is_rejected() {
    let members = format!("this{}", ".a".repeat(200_000));
    assert!(matches!(
        Expression::parse(&members),
        Err(ExprError::Parse { .. })
    ));

    let indexes = format!("list{}", "[0]".repeat(200_000));
    assert!(Expression::parse(&indexes).is_err());
}

#[test]
fn short_chains_are_fine() {
    let sum = Expression::parse(&vec!["1"; 40].join(" + ")).unwrap();
    assert!(matches!(sum.ast(), Expr::Binary(BinaryOp::Add, _, _)));

    let path = Expression::parse(&format!("this{}", ".a".repeat(40))).unwrap();
    assert!(matches!(path.ast(), Expr::Member(_, name) if name == "a"));
}

#[test]
fn source_is_preserved() {
    let expr = Expression::parse(" this.text ").unwrap();
    assert_eq!(expr.source(), " this.text ");
}
