//! Builds the outbound request from raw intent and a framework.

use std::collections::HashMap;

use alpha_primitives::{FrameworkId, FrameworkTemplate};
use serde::Serialize;
use tracing::trace;

use crate::error::{PromptError, PromptResult};
use crate::template::PromptTemplate;

/// Sampling temperature sent with every request; leans creative so the
/// model fills slots the user left open.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

const INSTRUCTION: &str = "\
You are an elite Prompt Engineering AI named 'Prompt Alpha'.
Your goal is to take a raw, often vague user request and rewrite it into a highly effective, structured prompt using the {{name}} framework.

Framework Details:
Name: {{name}} ({{full_name}})
Structure components: {{structure}}

Instruction:
1. Analyze the user's raw prompt to understand their core intent.
2. Fill in the specific components of the {{name}} framework based on the user's intent. If the user didn't provide enough info for a specific component, creatively infer it to make the prompt robust (but keep it realistic).
3. Output the final result.

Output Format:
Return the response in Markdown.
Start with a clear breakdown of how you filled the framework slots, in the order listed below, then provide the \"Final Optimized Prompt\" in a code block for easy copying.

Example Output Structure:
### Framework Breakdown
{{breakdown}}

### Optimized Prompt
```text
[The full complete prompt goes here]
```
";

/// Payload handed to the completion client.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RequestPayload {
    framework: FrameworkId,
    system_instruction: String,
    user_content: String,
    temperature: f32,
}

impl RequestPayload {
    /// Framework the instruction was built for.
    #[must_use]
    pub const fn framework(&self) -> FrameworkId {
        self.framework
    }

    /// System-level directive describing the framework and output shape.
    #[must_use]
    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// The user's raw text, exactly as entered.
    #[must_use]
    pub fn user_content(&self) -> &str {
        &self.user_content
    }

    /// Sampling temperature.
    #[must_use]
    pub const fn temperature(&self) -> f32 {
        self.temperature
    }
}

/// Composes the request for `raw_input` under `template`.
///
/// The instruction lists every slot as `Label (hint)` and asks for a
/// `### Framework Breakdown` with one `**Label:**` line per slot, both in
/// catalog order, followed by a fenced `### Optimized Prompt`.
///
/// # Errors
///
/// Returns [`PromptError::EmptyInput`] when `raw_input` is blank. Callers are
/// expected to guard against this before composing.
pub fn compose(raw_input: &str, template: &FrameworkTemplate) -> PromptResult<RequestPayload> {
    if raw_input.trim().is_empty() {
        return Err(PromptError::EmptyInput);
    }

    let slots = template.slots();
    let structure = slots
        .iter()
        .map(|slot| format!("{} ({})", slot.label(), slot.hint()))
        .collect::<Vec<_>>()
        .join(", ");
    let breakdown = slots
        .iter()
        .map(|slot| format!("**{}:** [Content]", slot.label()))
        .collect::<Vec<_>>()
        .join("\n");

    let vars = HashMap::from([
        ("name", template.name().to_owned()),
        ("full_name", template.full_name().to_owned()),
        ("structure", structure),
        ("breakdown", breakdown),
    ]);
    let system_instruction = PromptTemplate::new(INSTRUCTION)
        .require("name")
        .require("full_name")
        .require("structure")
        .require("breakdown")
        .render(&vars)?;

    trace!(
        framework = %template.id(),
        instruction_len = system_instruction.len(),
        "composed system instruction"
    );

    Ok(RequestPayload {
        framework: template.id(),
        system_instruction,
        user_content: raw_input.to_owned(),
        temperature: DEFAULT_TEMPERATURE,
    })
}

#[cfg(test)]
mod tests {
    use alpha_primitives::catalog;

    use super::*;

    fn positions(haystack: &str, needles: &[&str]) -> Vec<usize> {
        let mut from = 0;
        needles
            .iter()
            .map(|needle| {
                let at = haystack[from..]
                    .find(needle)
                    .map(|offset| from + offset)
                    .unwrap_or_else(|| panic!("`{needle}` missing after byte {from}"));
                from = at + needle.len();
                at
            })
            .collect()
    }

    #[test]
    fn slot_labels_appear_in_catalog_order() {
        for template in catalog() {
            let payload = compose("write me a landing page", template).unwrap();
            let structure: Vec<String> = template
                .slots()
                .iter()
                .map(|slot| format!("{} ({})", slot.label(), slot.hint()))
                .collect();
            let structure: Vec<&str> = structure.iter().map(String::as_str).collect();
            positions(payload.system_instruction(), &structure);

            let breakdown: Vec<String> = template
                .slots()
                .iter()
                .map(|slot| format!("**{}:**", slot.label()))
                .collect();
            let breakdown: Vec<&str> = breakdown.iter().map(String::as_str).collect();
            positions(payload.system_instruction(), &breakdown);
        }
    }

    #[test]
    fn rtf_instruction_orders_role_task_format() {
        let template = FrameworkId::Rtf.template();
        let payload = compose("I need a facebook ad for running shoes", template).unwrap();
        let at = positions(payload.system_instruction(), &["Role", "Task", "Format"]);
        assert!(at.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn names_the_framework_and_output_sections() {
        let payload = compose("plan a product launch", FrameworkId::Rise.template()).unwrap();
        let instruction = payload.system_instruction();
        assert!(instruction.contains("R-I-S-E (Role • Input • Steps • Expectation)"));
        assert!(instruction.contains("creatively infer"));
        positions(
            instruction,
            &["### Framework Breakdown", "### Optimized Prompt", "```text"],
        );
        assert!(!instruction.contains("{{"));
    }

    #[test]
    fn carries_raw_text_and_fixed_temperature() {
        let raw = "  keep my spacing  ";
        let payload = compose(raw, FrameworkId::Tag.template()).unwrap();
        assert_eq!(payload.user_content(), raw);
        assert!((payload.temperature() - 0.7).abs() < f32::EPSILON);
        assert_eq!(payload.framework(), FrameworkId::Tag);
    }

    #[test]
    fn composition_is_deterministic() {
        let template = FrameworkId::Care.template();
        assert_eq!(
            compose("same input", template).unwrap(),
            compose("same input", template).unwrap()
        );
    }

    #[test]
    fn blank_input_is_rejected() {
        let err = compose(" \n\t", FrameworkId::Bab.template()).expect_err("blank");
        assert_eq!(err, PromptError::EmptyInput);
    }
}
