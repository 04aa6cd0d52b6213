//! # Build Expressions
//!
//! Attribute values in the form the build-file writer renders them.

mod select;

pub use select::*;

use std::fmt;

const INDENT: &str = "    ";

/// A build-file expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// String literal
    String(String),
    /// Bare identifier, e.g. a function name
    Ident(String),
    List(Vec<Expr>),
    Dict {
        entries: Vec<KeyValue>,
        /// Render one entry per line even when short
        force_multiline: bool,
    },
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
    },
}

/// A `key: value` entry of a dict expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: Expr,
    pub value: Expr,
}

impl Expr {
    pub fn string(value: impl Into<String>) -> Self {
        Expr::String(value.into())
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    /// List of string literals
    pub fn string_list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expr::List(values.into_iter().map(|v| Expr::String(v.into())).collect())
    }

    fn render(&self, out: &mut String, depth: usize) {
        match self {
            Expr::String(value) => quote_into(out, value),
            Expr::Ident(name) => out.push_str(name),
            Expr::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.render(out, depth);
                }
                out.push(']');
            }
            Expr::Dict { entries, force_multiline } => {
                if entries.is_empty() {
                    out.push_str("{}");
                } else if *force_multiline {
                    out.push_str("{\n");
                    for entry in entries {
                        out.push_str(&INDENT.repeat(depth + 1));
                        entry.key.render(out, depth + 1);
                        out.push_str(": ");
                        entry.value.render(out, depth + 1);
                        out.push_str(",\n");
                    }
                    out.push_str(&INDENT.repeat(depth));
                    out.push('}');
                } else {
                    out.push('{');
                    for (i, entry) in entries.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        entry.key.render(out, depth);
                        out.push_str(": ");
                        entry.value.render(out, depth);
                    }
                    out.push('}');
                }
            }
            Expr::Call { func, args } => {
                func.render(out, depth);
                out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    arg.render(out, depth);
                }
                out.push(')');
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.render(&mut out, 0);
        f.write_str(&out)
    }
}

fn quote_into(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_literals() {
        assert_eq!(Expr::string("a\"b\\c").to_string(), r#""a\"b\\c""#);
        assert_eq!(Expr::string_list(["/server"]).to_string(), r#"["/server"]"#);
        assert_eq!(Expr::List(Vec::new()).to_string(), "[]");
        assert_eq!(
            Expr::string_list([":a", ":b"]).to_string(),
            r#"[":a", ":b"]"#
        );
    }

    #[test]
    fn test_render_multiline_dict_in_call() {
        let expr = Expr::Call {
            func: Box::new(Expr::ident("select")),
            args: vec![Expr::Dict {
                entries: vec![KeyValue {
                    key: Expr::string("k"),
                    value: Expr::string("v"),
                }],
                force_multiline: true,
            }],
        };
        assert_eq!(expr.to_string(), "select({\n    \"k\": \"v\",\n})");
    }

    #[test]
    fn test_render_inline_dict() {
        let expr = Expr::Dict {
            entries: vec![
                KeyValue { key: Expr::string("a"), value: Expr::string("1") },
                KeyValue { key: Expr::string("b"), value: Expr::string("2") },
            ],
            force_multiline: false,
        };
        assert_eq!(expr.to_string(), r#"{"a": "1", "b": "2"}"#);
    }
}
