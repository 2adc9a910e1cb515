//! Subject templates with `{}` placeholders
//!
//! A [`Subject`] keeps the template and its arguments apart until it is
//! rendered. Rendering happens when a mailer sends the message, so a
//! malformed template is reported at send time rather than when it is set.
//!
//! Placeholder syntax:
//! - `{}` takes the next argument in order
//! - `{N}` takes argument `N` (zero-based) without advancing the implicit counter
//! - `{{` and `}}` produce literal braces
//!
//! Surplus arguments are ignored.

use std::fmt::Display;

/// Error raised when a subject template cannot be rendered
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("missing subject argument {index}")]
    MissingArgument { index: usize },

    #[error("unclosed placeholder starting at byte {position}")]
    UnclosedPlaceholder { position: usize },

    #[error("unmatched '}}' at byte {position}")]
    UnmatchedBrace { position: usize },

    #[error("invalid placeholder '{{{content}}}' at byte {position}")]
    InvalidPlaceholder { position: usize, content: String },
}

/// A subject template and the arguments substituted into it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subject {
    template: String,
    args: Vec<String>,
}

impl Subject {
    /// Create a subject from a template and its arguments
    ///
    /// Arguments are captured through their `Display` impl. No check is made
    /// that the template consumes them.
    pub fn new(template: impl Into<String>, args: &[&dyn Display]) -> Self {
        Self {
            template: template.into(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    /// A subject with no placeholders to fill
    pub fn plain(template: impl Into<String>) -> Self {
        Self::new(template, &[])
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Substitute the arguments into the template
    pub fn render(&self) -> Result<String, FormatError> {
        let mut out = String::with_capacity(self.template.len());
        let mut next_implicit = 0usize;
        let mut chars = self.template.char_indices().peekable();

        while let Some((position, c)) = chars.next() {
            match c {
                '{' => {
                    if let Some(&(_, '{')) = chars.peek() {
                        chars.next();
                        out.push('{');
                        continue;
                    }

                    let mut content = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        content.push(c);
                    }
                    if !closed {
                        return Err(FormatError::UnclosedPlaceholder { position });
                    }

                    let index = if content.is_empty() {
                        let index = next_implicit;
                        next_implicit += 1;
                        index
                    } else {
                        content
                            .parse::<usize>()
                            .map_err(|_| FormatError::InvalidPlaceholder {
                                position,
                                content: content.clone(),
                            })?
                    };

                    let arg = self
                        .args
                        .get(index)
                        .ok_or(FormatError::MissingArgument { index })?;
                    out.push_str(arg);
                }
                '}' => {
                    if let Some(&(_, '}')) = chars.peek() {
                        chars.next();
                        out.push('}');
                    } else {
                        return Err(FormatError::UnmatchedBrace { position });
                    }
                }
                _ => out.push(c),
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_placeholder() {
        let subject = Subject::new("Hello {}", &[&"World"]);
        assert_eq!(subject.render().unwrap(), "Hello World");
    }

    #[test]
    fn test_render_mixed_argument_types() {
        let name = String::from("Ada");
        let subject = Subject::new("{} has {} new messages", &[&name, &3]);
        assert_eq!(subject.render().unwrap(), "Ada has 3 new messages");
    }

    #[test]
    fn test_render_positional_placeholders() {
        let subject = Subject::new("{1} before {0}, then {}", &[&"a", &"b"]);
        assert_eq!(subject.render().unwrap(), "b before a, then a");
    }

    #[test]
    fn test_render_escaped_braces() {
        let subject = Subject::new("{{literal}} {}", &[&"x"]);
        assert_eq!(subject.render().unwrap(), "{literal} x");
    }

    #[test]
    fn test_render_plain_subject() {
        let subject = Subject::plain("Weekly report");
        assert_eq!(subject.render().unwrap(), "Weekly report");
        assert!(subject.args().is_empty());
    }

    #[test]
    fn test_surplus_arguments_are_ignored() {
        let subject = Subject::new("Only {}", &[&"one", &"two"]);
        assert_eq!(subject.render().unwrap(), "Only one");
    }

    #[test]
    fn test_missing_argument() {
        let subject = Subject::new("{} and {}", &[&"one"]);
        assert_eq!(
            subject.render(),
            Err(FormatError::MissingArgument { index: 1 })
        );
    }

    #[test]
    fn test_unclosed_placeholder() {
        let subject = Subject::new("Hello {", &[&"World"]);
        assert_eq!(
            subject.render(),
            Err(FormatError::UnclosedPlaceholder { position: 6 })
        );
    }

    #[test]
    fn test_unmatched_closing_brace() {
        let subject = Subject::plain("oops }");
        assert_eq!(
            subject.render(),
            Err(FormatError::UnmatchedBrace { position: 5 })
        );
    }

    #[test]
    fn test_invalid_placeholder() {
        let subject = Subject::new("Hi {name}", &[&"x"]);
        assert_eq!(
            subject.render(),
            Err(FormatError::InvalidPlaceholder {
                position: 3,
                content: "name".to_string(),
            })
        );
    }

    #[test]
    fn test_non_ascii_template() {
        let subject = Subject::new("Grüße, {}!", &[&"Jürgen"]);
        assert_eq!(subject.render().unwrap(), "Grüße, Jürgen!");
    }
}
