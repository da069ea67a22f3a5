//! `{variable}` substitution for task prompts.
//!
//! # Syntax
//!
//! - `{name}` - Substitutes the value of variable `name`
//! - `{{` - Renders as literal `{`
//! - `}}` - Renders as literal `}`
//!
//! Undefined variables are an error, never an empty substitution.

use std::collections::HashMap;
use std::fmt;

/// Error type for template rendering failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A variable was referenced but not provided.
    UndefinedVariable { name: String, position: usize },
    /// A `{` was found without a matching `}`.
    UnmatchedBrace { position: usize },
    /// `{}` with nothing inside.
    EmptyVariableName { position: usize },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UndefinedVariable { name, position } => {
                write!(f, "undefined variable '{}' at position {}", name, position)
            }
            TemplateError::UnmatchedBrace { position } => {
                write!(f, "unmatched '{{' at position {}", position)
            }
            TemplateError::EmptyVariableName { position } => {
                write!(f, "empty variable name '{{}}' at position {}", position)
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// Render `template`, replacing each `{name}` with `variables[name]`.
pub fn render_template(
    template: &str,
    variables: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, c)) => name.push(c),
                        None => return Err(TemplateError::UnmatchedBrace { position: pos }),
                    }
                }

                let name = name.trim();
                if name.is_empty() {
                    return Err(TemplateError::EmptyVariableName { position: pos });
                }
                let Some(value) = variables.get(name) else {
                    return Err(TemplateError::UndefinedVariable {
                        name: name.to_string(),
                        position: pos,
                    });
                };
                out.push_str(value);
            }
            '}' => {
                // `}}` collapses to one brace; a lone `}` is literal
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                }
                out.push('}');
            }
            _ => out.push(ch),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_substitutes_variables() {
        let v = vars(&[("user_query", "Who leads Alpha Team?"), ("context", "")]);
        assert_eq!(
            render_template("Q: {user_query}|{context}|", &v).unwrap(),
            "Q: Who leads Alpha Team?||"
        );
    }

    #[test]
    fn test_whitespace_inside_braces_is_trimmed() {
        let v = vars(&[("user_query", "hi")]);
        assert_eq!(render_template("{ user_query }", &v).unwrap(), "hi");
    }

    #[test]
    fn test_escapes() {
        let v = vars(&[]);
        assert_eq!(
            render_template(r#"Return {{"answer": "..."}}"#, &v).unwrap(),
            r#"Return {"answer": "..."}"#
        );
        assert_eq!(render_template("a } b", &v).unwrap(), "a } b");
    }

    #[test]
    fn test_undefined_variable() {
        let err = render_template("Hello {name}", &vars(&[])).unwrap_err();
        assert_eq!(
            err,
            TemplateError::UndefinedVariable {
                name: "name".to_string(),
                position: 6
            }
        );
    }

    #[test]
    fn test_unmatched_and_empty() {
        assert_eq!(
            render_template("oops {user", &vars(&[])).unwrap_err(),
            TemplateError::UnmatchedBrace { position: 5 }
        );
        assert_eq!(
            render_template("x {} y", &vars(&[])).unwrap_err(),
            TemplateError::EmptyVariableName { position: 2 }
        );
    }

    #[test]
    fn test_values_are_not_re_rendered() {
        let v = vars(&[("user_query", "{context}")]);
        assert_eq!(render_template("{user_query}", &v).unwrap(), "{context}");
    }
}
