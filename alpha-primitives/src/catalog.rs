//! The fixed framework catalog.

use crate::framework::{ColorToken, FrameworkId, FrameworkTemplate, Slot};

const RTF_SLOTS: &[Slot] = &[
    Slot::new("Role", "Act as a..."),
    Slot::new("Task", "Create a..."),
    Slot::new("Format", "Show as..."),
];

const TAG_SLOTS: &[Slot] = &[
    Slot::new("Task", "Define the task"),
    Slot::new("Action", "State the action"),
    Slot::new("Goal", "Clarify the goal"),
];

const BAB_SLOTS: &[Slot] = &[
    Slot::new("Before", "Explain problem"),
    Slot::new("After", "State outcome"),
    Slot::new("Bridge", "Ask for the bridge"),
];

const CARE_SLOTS: &[Slot] = &[
    Slot::new("Context", "Give context"),
    Slot::new("Action", "Describe action"),
    Slot::new("Result", "Clarify result"),
    Slot::new("Example", "Give example"),
];

const RISE_SLOTS: &[Slot] = &[
    Slot::new("Role", "Specify role"),
    Slot::new("Input", "Describe input"),
    Slot::new("Steps", "Ask for steps"),
    Slot::new("Expectation", "Describe expectation"),
];

static CATALOG: [FrameworkTemplate; 5] = [
    FrameworkTemplate::new(
        FrameworkId::Rtf,
        "R-T-F",
        "Role • Task • Format",
        "Best for generating specific deliverables like content, code, or emails.",
        RTF_SLOTS,
        ColorToken::Cyan,
    ),
    FrameworkTemplate::new(
        FrameworkId::Tag,
        "T-A-G",
        "Task • Action • Goal",
        "Perfect for optimizing performance, feedback, or process improvement.",
        TAG_SLOTS,
        ColorToken::Amber,
    ),
    FrameworkTemplate::new(
        FrameworkId::Bab,
        "B-A-B",
        "Before • After • Bridge",
        "Ideal for marketing copy, storytelling, and problem-solution narratives.",
        BAB_SLOTS,
        ColorToken::Emerald,
    ),
    FrameworkTemplate::new(
        FrameworkId::Care,
        "C-A-R-E",
        "Context • Action • Result • Example",
        "Great for complex requests requiring nuance and specific examples.",
        CARE_SLOTS,
        ColorToken::Purple,
    ),
    FrameworkTemplate::new(
        FrameworkId::Rise,
        "R-I-S-E",
        "Role • Input • Steps • Expectation",
        "The heavyweight champion for complex strategy and multi-step plans.",
        RISE_SLOTS,
        ColorToken::Rose,
    ),
];

/// Returns every framework in display order.
#[must_use]
pub fn catalog() -> &'static [FrameworkTemplate] {
    &CATALOG
}

/// Looks up a framework by its short token, acronym, or any spelling
/// accepted by [`FrameworkId`]'s `FromStr`.
#[must_use]
pub fn find(id: &str) -> Option<&'static FrameworkTemplate> {
    id.parse::<FrameworkId>().ok().map(template_for)
}

pub(crate) fn template_for(id: FrameworkId) -> &'static FrameworkTemplate {
    match id {
        FrameworkId::Rtf => &CATALOG[0],
        FrameworkId::Tag => &CATALOG[1],
        FrameworkId::Bab => &CATALOG[2],
        FrameworkId::Care => &CATALOG[3],
        FrameworkId::Rise => &CATALOG[4],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_is_fixed() {
        let names: Vec<_> = catalog().iter().map(FrameworkTemplate::name).collect();
        assert_eq!(names, ["R-T-F", "T-A-G", "B-A-B", "C-A-R-E", "R-I-S-E"]);
    }

    #[test]
    fn ids_resolve_to_matching_entries() {
        for id in FrameworkId::ALL {
            assert_eq!(id.template().id(), id);
        }
        let ids: Vec<_> = catalog().iter().map(FrameworkTemplate::id).collect();
        assert_eq!(ids, FrameworkId::ALL);
    }

    #[test]
    fn every_framework_has_slots() {
        assert!(catalog().iter().all(|fw| !fw.slots().is_empty()));
    }

    #[test]
    fn rtf_slots_in_order() {
        let labels: Vec<_> = FrameworkId::Rtf
            .template()
            .slots()
            .iter()
            .map(Slot::label)
            .collect();
        assert_eq!(labels, ["Role", "Task", "Format"]);
    }

    #[test]
    fn find_accepts_acronyms() {
        assert_eq!(find("B-A-B").map(FrameworkTemplate::id), Some(FrameworkId::Bab));
        assert!(find("xyz").is_none());
    }
}
