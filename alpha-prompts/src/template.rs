//! Minimal `{{variable}}` prompt templates.

use std::collections::HashMap;

use crate::error::{PromptError, PromptResult};

/// A prompt template with `{{variable}}` placeholders.
///
/// Rendering is a single left-to-right pass, so substituted values are never
/// re-scanned for placeholders. Variables declared with
/// [`require`](Self::require) must be supplied; any other unresolved
/// placeholder renders as an empty string.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use alpha_prompts::PromptTemplate;
///
/// let template = PromptTemplate::new("Use the {{name}} framework.").require("name");
/// let vars = HashMap::from([("name", "R-T-F".to_owned())]);
/// assert_eq!(template.render(&vars).unwrap(), "Use the R-T-F framework.");
/// ```
#[derive(Clone, Debug)]
pub struct PromptTemplate {
    template: String,
    required: Vec<String>,
}

impl PromptTemplate {
    /// Creates a template from the supplied text.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            required: Vec::new(),
        }
    }

    /// Declares a variable that must be present at render time.
    #[must_use]
    pub fn require(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }

    /// Renders the template with the supplied variables.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::MissingVariable`] if a required variable is not
    /// present in `vars`.
    pub fn render(&self, vars: &HashMap<&str, String>) -> PromptResult<String> {
        if let Some(missing) = self
            .required
            .iter()
            .find(|name| !vars.contains_key(name.as_str()))
        {
            return Err(PromptError::MissingVariable {
                name: missing.clone(),
            });
        }

        let mut out = String::with_capacity(self.template.len());
        for segment in segments(&self.template) {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    if let Some(value) = vars.get(name) {
                        out.push_str(value);
                    }
                }
            }
        }
        Ok(out)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Placeholder(&'a str),
}

/// Splits a template into literal text and trimmed placeholder names.
/// An unterminated `{{` is kept as literal text.
fn segments(template: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            break;
        };
        if open > 0 {
            out.push(Segment::Text(&rest[..open]));
        }
        out.push(Segment::Placeholder(after_open[..close].trim()));
        rest = &after_open[close + 2..];
    }

    if !rest.is_empty() {
        out.push(Segment::Text(rest));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&'static str, &str)]) -> HashMap<&'static str, String> {
        pairs.iter().map(|(k, v)| (*k, (*v).to_owned())).collect()
    }

    #[test]
    fn renders_multiple_variables() {
        let template = PromptTemplate::new("{{greeting}} {{name}}, {{question}}");
        let rendered = template
            .render(&vars(&[
                ("greeting", "Hello"),
                ("name", "Alice"),
                ("question", "how are you?"),
            ]))
            .unwrap();
        assert_eq!(rendered, "Hello Alice, how are you?");
    }

    #[test]
    fn required_variables_error_when_missing() {
        let template = PromptTemplate::new("Hello {{name}}!").require("name");
        let err = template.render(&HashMap::new()).expect_err("should error");
        assert_eq!(
            err,
            PromptError::MissingVariable {
                name: "name".into()
            }
        );
    }

    #[test]
    fn optional_variables_render_empty() {
        let template = PromptTemplate::new("a{{missing}}b");
        assert_eq!(template.render(&HashMap::new()).unwrap(), "ab");
    }

    #[test]
    fn values_are_not_rescanned() {
        let template = PromptTemplate::new("{{x}}");
        let rendered = template.render(&vars(&[("x", "{{y}}")])).unwrap();
        assert_eq!(rendered, "{{y}}");
    }

    #[test]
    fn placeholder_names_are_trimmed() {
        let template = PromptTemplate::new("{{ a }}-{{a}}").require("a");
        assert_eq!(template.render(&vars(&[("a", "x")])).unwrap(), "x-x");
    }

    #[test]
    fn unterminated_placeholder_is_literal() {
        let template = PromptTemplate::new("code: {{oops");
        assert_eq!(template.render(&HashMap::new()).unwrap(), "code: {{oops");
        assert_eq!(segments("{{oops"), vec![Segment::Text("{{oops")]);
    }
}
