//! Plain-text rendering for catalog listings and session outcomes.

use prompt_alpha::kernel::SessionState;
use prompt_alpha::primitives::{FrameworkTemplate, catalog as templates};
use prompt_alpha::prompts::OptimizedResponse;

/// One catalog entry: header line, description, then one line per slot.
pub fn template(template: &FrameworkTemplate) -> String {
    let mut out = format!(
        "{:<7} {} [{}]\n        {}\n",
        template.name(),
        template.full_name(),
        template.id(),
        template.description()
    );
    for slot in template.slots() {
        out.push_str(&format!("        - {}: {}\n", slot.label(), slot.hint()));
    }
    out
}

/// The whole catalog in display order, blank line between entries.
pub fn catalog() -> String {
    templates()
        .iter()
        .map(template)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Success banner for the framework that produced the result.
pub fn banner(template: &FrameworkTemplate) -> String {
    format!("OPTIMIZATION COMPLETE • {} PROTOCOL", template.name())
}

/// Formats a successful result.
///
/// With `prompt_only` the fenced "Optimized Prompt" block is printed bare,
/// falling back to the full Markdown when the model omitted it. Otherwise the
/// banner (when a framework is known) precedes the full Markdown.
pub fn outcome(template: Option<&FrameworkTemplate>, markdown: &str, prompt_only: bool) -> String {
    if prompt_only {
        let parsed = OptimizedResponse::parse(markdown);
        let body = parsed.optimized_prompt().unwrap_or(markdown);
        return format!("{}\n", body.trim_end());
    }

    match template {
        Some(template) => format!("{}\n\n{}\n", banner(template), markdown.trim_end()),
        None => format!("{}\n", markdown.trim_end()),
    }
}

/// Renders a settled session; empty unless it succeeded.
pub fn result(state: &SessionState, prompt_only: bool) -> String {
    state
        .result_text()
        .map(|text| outcome(state.selected_template(), text, prompt_only))
        .unwrap_or_default()
}

/// Short status line used by the shell's `:show`.
pub fn status(state: &SessionState) -> String {
    let framework = state
        .selected_template()
        .map_or("none", FrameworkTemplate::name);
    let chars = state.raw_input().chars().count();
    format!(
        "framework: {framework} | input: {chars} chars | phase: {:?} | attempts: {}",
        state.phase(),
        state.attempts()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompt_alpha::primitives::FrameworkId;

    const MARKDOWN: &str = "### Framework Breakdown\n**Role:** Copywriter\n\n### Optimized Prompt\n```text\nAct as a copywriter.\nWrite the ad.\n```\n";

    #[test]
    fn catalog_lists_every_framework_with_slots() {
        let text = catalog();
        for name in ["R-T-F", "T-A-G", "B-A-B", "C-A-R-E", "R-I-S-E"] {
            assert!(text.contains(name), "missing {name}");
        }
        assert!(text.contains("Role • Task • Format"));
        assert!(text.contains("[rise]"));
        assert!(text.contains("- Role:"));
        assert!(text.contains("- Expectation:"));
    }

    #[test]
    fn banner_names_protocol() {
        assert_eq!(
            banner(FrameworkId::Care.template()),
            "OPTIMIZATION COMPLETE • C-A-R-E PROTOCOL"
        );
    }

    #[test]
    fn full_outcome_has_banner_then_markdown() {
        let text = outcome(Some(FrameworkId::Rtf.template()), MARKDOWN, false);
        assert!(text.starts_with("OPTIMIZATION COMPLETE • R-T-F PROTOCOL\n\n### Framework Breakdown"));
        assert!(text.ends_with("```\n"));
        assert!(text.contains("**Role:** Copywriter"));
    }

    #[test]
    fn full_outcome_without_framework_is_bare_markdown() {
        assert_eq!(outcome(None, MARKDOWN, false), MARKDOWN);
    }

    #[test]
    fn prompt_only_prints_fenced_block() {
        let text = outcome(Some(FrameworkId::Rtf.template()), MARKDOWN, true);
        assert_eq!(text, "Act as a copywriter.\nWrite the ad.\n");
    }

    #[test]
    fn prompt_only_falls_back_to_full_markdown() {
        let markdown = "Just some prose without sections.";
        assert_eq!(
            outcome(Some(FrameworkId::Tag.template()), markdown, true),
            "Just some prose without sections.\n"
        );
    }

    #[test]
    fn idle_state_renders_nothing() {
        assert!(result(&SessionState::new(), false).is_empty());
        assert!(status(&SessionState::new()).contains("framework: none"));
    }
}
