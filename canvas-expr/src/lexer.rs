//! Tokenizer for binding expressions.

use crate::error::{ExprError, ExprResult};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    Str(String),
    Ident(String),
    Punct(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned {
    pub token: Token,
    pub offset: usize,
}

// Longest first so `===` wins over `==` and `=`.
const PUNCTUATION: &[&str] = &[
    "===", "!==", "==", "!=", "<=", ">=", "&&", "||", "<", ">", "!", "+", "-", "*", "/", "%",
    "?", ":", ".", ",", "(", ")", "[", "]",
];

pub(crate) fn tokenize(source: &str) -> ExprResult<Vec<Spanned>> {
    let mut tokens = Vec::new();
    let bytes = source.as_bytes();
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos];
        if c.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        let start = pos;
        let token = if c.is_ascii_digit()
            || (c == b'.' && bytes.get(pos + 1).is_some_and(u8::is_ascii_digit))
        {
            let (n, end) = lex_number(source, pos)?;
            pos = end;
            Token::Number(n)
        } else if c == b'"' || c == b'\'' {
            let (s, end) = lex_string(source, pos)?;
            pos = end;
            Token::Str(s)
        } else if c.is_ascii_alphabetic() || c == b'_' || c == b'$' {
            while pos < bytes.len()
                && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_' || bytes[pos] == b'$')
            {
                pos += 1;
            }
            Token::Ident(source[start..pos].to_string())
        } else if let Some(p) = PUNCTUATION.iter().find(|p| source[pos..].starts_with(*p)) {
            pos += p.len();
            Token::Punct(*p)
        } else {
            let ch = source[pos..].chars().next().unwrap_or('?');
            return Err(ExprError::parse(format!("unexpected character '{ch}'"), pos));
        };

        tokens.push(Spanned {
            token,
            offset: start,
        });
    }

    Ok(tokens)
}

fn lex_number(source: &str, start: usize) -> ExprResult<(f64, usize)> {
    let bytes = source.as_bytes();
    let mut pos = start;
    while pos < bytes.len() && (bytes[pos].is_ascii_digit() || bytes[pos] == b'.') {
        pos += 1;
    }
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut exp = pos + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        if exp < bytes.len() && bytes[exp].is_ascii_digit() {
            pos = exp;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
        }
    }
    source[start..pos]
        .parse::<f64>()
        .map(|n| (n, pos))
        .map_err(|_| ExprError::parse(format!("invalid number '{}'", &source[start..pos]), start))
}

fn lex_string(source: &str, start: usize) -> ExprResult<(String, usize)> {
    let quote = source.as_bytes()[start] as char;
    let mut out = String::new();
    let mut chars = source[start + 1..].char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            c if c == quote => return Ok((out, start + 1 + i + 1)),
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, other)) => out.push(other),
                None => break,
            },
            c => out.push(c),
        }
    }

    Err(ExprError::parse("unterminated string literal", start))
}
