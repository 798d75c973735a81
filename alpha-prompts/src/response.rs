//! Reads the two-section Markdown returned by the model.
//!
//! Parsing is lenient: the text comes from a remote model, so missing or
//! malformed sections produce empty results instead of errors.

use serde::Serialize;

/// One `**Label:** content` line from the framework breakdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BreakdownEntry {
    /// Slot label as written by the model.
    pub label: String,
    /// Content the model filled in for the slot.
    pub content: String,
}

/// Structured view over a generated response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OptimizedResponse {
    breakdown: Vec<BreakdownEntry>,
    optimized_prompt: Option<String>,
}

impl OptimizedResponse {
    /// Parses the Markdown produced for a composed request.
    #[must_use]
    pub fn parse(markdown: &str) -> Self {
        let mut breakdown = Vec::new();
        let mut optimized_prompt = None;
        let mut section = Section::Other;
        let mut fence: Option<Vec<&str>> = None;

        for line in markdown.lines() {
            let trimmed = line.trim();

            if let Some(body) = fence.as_mut() {
                if trimmed.starts_with("```") {
                    if optimized_prompt.is_none() {
                        optimized_prompt = Some(body.join("\n"));
                    }
                    fence = None;
                } else {
                    body.push(line);
                }
                continue;
            }

            if let Some(heading) = heading_text(trimmed) {
                section = Section::classify(heading);
                continue;
            }

            match section {
                Section::Breakdown => {
                    if let Some(entry) = parse_entry(trimmed) {
                        breakdown.push(entry);
                    }
                }
                Section::Optimized if trimmed.starts_with("```") => {
                    fence = Some(Vec::new());
                }
                Section::Optimized | Section::Other => {}
            }
        }

        // Unterminated fence: keep what the model sent.
        if optimized_prompt.is_none() {
            optimized_prompt = fence.map(|body| body.join("\n"));
        }

        Self {
            breakdown,
            optimized_prompt,
        }
    }

    /// Breakdown entries in the order the model wrote them.
    #[must_use]
    pub fn breakdown(&self) -> &[BreakdownEntry] {
        &self.breakdown
    }

    /// Contents of the fenced block under the `Optimized Prompt` heading.
    #[must_use]
    pub fn optimized_prompt(&self) -> Option<&str> {
        self.optimized_prompt.as_deref()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Breakdown,
    Optimized,
    Other,
}

impl Section {
    fn classify(heading: &str) -> Self {
        let lower = heading.to_ascii_lowercase();
        if lower.contains("breakdown") {
            Self::Breakdown
        } else if lower.contains("optimized prompt") {
            Self::Optimized
        } else {
            Self::Other
        }
    }
}

fn heading_text(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches('#');
    (rest.len() < line.len() && rest.starts_with(' ')).then(|| rest.trim())
}

/// Accepts `**Label:** text`, `**Label**: text`, optionally bulleted.
fn parse_entry(line: &str) -> Option<BreakdownEntry> {
    let line = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .unwrap_or(line);
    let rest = line.strip_prefix("**")?;
    let (label, content) = rest.split_once("**")?;
    let (label, content) = match label.strip_suffix(':') {
        Some(label) => (label, content),
        None => (label, content.strip_prefix(':')?),
    };

    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    Some(BreakdownEntry {
        label: label.to_owned(),
        content: content.trim().to_owned(),
    })
}
