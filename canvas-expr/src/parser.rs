//! Recursive-descent parser with JavaScript-like precedence:
//! `?:` < `||` < `&&` < equality < relational < additive < multiplicative
//! < unary < postfix (member, index, call).

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::context::BindingContext;
use crate::error::{ExprError, ExprResult};
use crate::lexer::{Spanned, Token, tokenize};
use serde_json::Value;

/// Budget shared by nesting and chain links (`a + b + c`, `a.b.c`). Every
/// unit is one level of AST depth, which bounds evaluation recursion.
const MAX_DEPTH: usize = 128;

/// A parsed, reusable binding expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    root: Expr,
}

impl Expression {
    /// Parses expression text (without the surrounding `{{ }}`).
    pub fn parse(source: &str) -> ExprResult<Self> {
        let tokens = tokenize(source)?;
        let mut parser = Parser {
            tokens,
            pos: 0,
            depth: 0,
            end: source.len(),
        };
        if parser.tokens.is_empty() {
            return Err(ExprError::parse("empty expression", 0));
        }
        let root = parser.conditional()?;
        if let Some(extra) = parser.tokens.get(parser.pos) {
            return Err(ExprError::parse("unexpected trailing input", extra.offset));
        }
        Ok(Self {
            source: source.to_string(),
            root,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn ast(&self) -> &Expr {
        &self.root
    }

    /// Evaluates against a binding context.
    pub fn evaluate(&self, ctx: &BindingContext<'_>) -> ExprResult<Value> {
        crate::eval::evaluate(&self.root, ctx)
    }
}

enum Link {
    Member(String),
    Index(Expr),
    Call(String, Vec<Expr>),
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    depth: usize,
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |t| t.offset)
    }

    fn eat(&mut self, punct: &str) -> bool {
        if matches!(self.peek(), Some(Token::Punct(p)) if *p == punct) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, punct: &str) -> ExprResult<()> {
        if self.eat(punct) {
            Ok(())
        } else {
            Err(ExprError::parse(format!("expected '{punct}'"), self.offset()))
        }
    }

    fn descend(&mut self) -> ExprResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExprError::parse("expression nested too deeply", self.offset()));
        }
        Ok(())
    }

    fn conditional(&mut self) -> ExprResult<Expr> {
        self.descend()?;
        let cond = self.binary(0)?;
        let expr = if self.eat("?") {
            let then = self.conditional()?;
            self.expect(":")?;
            let otherwise = self.conditional()?;
            Expr::Conditional(Box::new(cond), Box::new(then), Box::new(otherwise))
        } else {
            cond
        };
        self.depth -= 1;
        Ok(expr)
    }

    /// Precedence climbing over the binary operator table.
    fn binary(&mut self, level: usize) -> ExprResult<Expr> {
        const LEVELS: &[&[(&str, BinaryOp)]] = &[
            &[("||", BinaryOp::Or)],
            &[("&&", BinaryOp::And)],
            &[
                ("===", BinaryOp::StrictEq),
                ("!==", BinaryOp::StrictNe),
                ("==", BinaryOp::LooseEq),
                ("!=", BinaryOp::LooseNe),
            ],
            &[
                ("<=", BinaryOp::Le),
                (">=", BinaryOp::Ge),
                ("<", BinaryOp::Lt),
                (">", BinaryOp::Gt),
            ],
            &[("+", BinaryOp::Add), ("-", BinaryOp::Sub)],
            &[("*", BinaryOp::Mul), ("/", BinaryOp::Div), ("%", BinaryOp::Rem)],
        ];

        let Some(ops) = LEVELS.get(level) else {
            return self.unary();
        };

        let mut lhs = self.binary(level + 1)?;
        let mut links = 0;
        'outer: loop {
            for (punct, op) in ops.iter() {
                if self.eat(punct) {
                    self.descend()?;
                    links += 1;
                    let rhs = self.binary(level + 1)?;
                    lhs = Expr::Binary(*op, Box::new(lhs), Box::new(rhs));
                    continue 'outer;
                }
            }
            self.depth -= links;
            return Ok(lhs);
        }
    }

    fn unary(&mut self) -> ExprResult<Expr> {
        let op = if self.eat("!") {
            UnaryOp::Not
        } else if self.eat("-") {
            UnaryOp::Neg
        } else {
            return self.postfix();
        };
        self.descend()?;
        let operand = self.unary()?;
        self.depth -= 1;
        Ok(Expr::Unary(op, Box::new(operand)))
    }

    fn postfix(&mut self) -> ExprResult<Expr> {
        let mut expr = self.primary()?;
        let mut links = 0;
        loop {
            let link = if self.eat(".") {
                let offset = self.offset();
                match self.tokens.get(self.pos).map(|t| t.token.clone()) {
                    Some(Token::Ident(name)) => {
                        self.pos += 1;
                        Link::Member(name)
                    }
                    _ => return Err(ExprError::parse("expected property name after '.'", offset)),
                }
            } else if self.eat("[") {
                let index = self.conditional()?;
                self.expect("]")?;
                Link::Index(index)
            } else if matches!(self.peek(), Some(Token::Punct("("))) {
                let Expr::Ident(name) = &expr else {
                    return Err(ExprError::parse(
                        "only named functions can be called",
                        self.offset(),
                    ));
                };
                let name = name.clone();
                self.pos += 1;
                Link::Call(name, self.arguments()?)
            } else {
                self.depth -= links;
                return Ok(expr);
            };

            self.descend()?;
            links += 1;
            expr = match link {
                Link::Member(name) => Expr::Member(Box::new(expr), name),
                Link::Index(index) => Expr::Index(Box::new(expr), Box::new(index)),
                Link::Call(name, args) => Expr::Call(name, args),
            };
        }
    }

    fn arguments(&mut self) -> ExprResult<Vec<Expr>> {
        let mut args = Vec::new();
        if self.eat(")") {
            return Ok(args);
        }
        loop {
            args.push(self.conditional()?);
            if self.eat(")") {
                return Ok(args);
            }
            self.expect(",")?;
        }
    }

    fn primary(&mut self) -> ExprResult<Expr> {
        let offset = self.offset();
        let Some(token) = self.tokens.get(self.pos).map(|t| t.token.clone()) else {
            return Err(ExprError::parse("unexpected end of expression", offset));
        };
        self.pos += 1;

        match token {
            Token::Number(n) => Ok(Expr::Literal(crate::value::number(n))),
            Token::Str(s) => Ok(Expr::Literal(Value::String(s))),
            Token::Ident(name) => Ok(match name.as_str() {
                "true" => Expr::Literal(Value::Bool(true)),
                "false" => Expr::Literal(Value::Bool(false)),
                "null" | "undefined" => Expr::Literal(Value::Null),
                _ => Expr::Ident(name),
            }),
            Token::Punct("(") => {
                let inner = self.conditional()?;
                self.expect(")")?;
                Ok(inner)
            }
            Token::Punct(p) => Err(ExprError::parse(format!("unexpected '{p}'"), offset)),
        }
    }
}
