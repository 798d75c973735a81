//! Framework template descriptors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Lookup key for a catalog framework.
///
/// Sessions store this key rather than a copy of the template; resolve it
/// with [`FrameworkId::template`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkId {
    /// Role, Task, Format.
    Rtf,
    /// Task, Action, Goal.
    Tag,
    /// Before, After, Bridge.
    Bab,
    /// Context, Action, Result, Example.
    Care,
    /// Role, Input, Steps, Expectation.
    Rise,
}

impl FrameworkId {
    /// Every identifier, in catalog order.
    pub const ALL: [Self; 5] = [Self::Rtf, Self::Tag, Self::Bab, Self::Care, Self::Rise];

    /// Returns the short token (`rtf`, `tag`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rtf => "rtf",
            Self::Tag => "tag",
            Self::Bab => "bab",
            Self::Care => "care",
            Self::Rise => "rise",
        }
    }

    /// Resolves the identifier against the catalog.
    #[must_use]
    pub fn template(self) -> &'static FrameworkTemplate {
        crate::catalog::template_for(self)
    }
}

impl fmt::Display for FrameworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameworkId {
    type Err = Error;

    /// Accepts the short token or the acronym, ignoring case and dashes
    /// (`rtf`, `RTF`, `R-T-F`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == normalized)
            .ok_or_else(|| Error::UnknownFramework { id: s.to_owned() })
    }
}

/// Presentation-only accent color of a framework.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    /// Cyan accent.
    Cyan,
    /// Amber accent.
    Amber,
    /// Emerald accent.
    Emerald,
    /// Purple accent.
    Purple,
    /// Rose accent.
    Rose,
}

/// One labeled slot of a framework, e.g. `Role` / `Act as a...`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Slot {
    label: &'static str,
    hint: &'static str,
}

impl Slot {
    pub(crate) const fn new(label: &'static str, hint: &'static str) -> Self {
        Self { label, hint }
    }

    /// Slot label emitted into the breakdown.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Short guidance describing what the slot should contain.
    #[must_use]
    pub const fn hint(&self) -> &'static str {
        self.hint
    }
}

/// Immutable description of a prompt framework.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct FrameworkTemplate {
    id: FrameworkId,
    name: &'static str,
    full_name: &'static str,
    description: &'static str,
    slots: &'static [Slot],
    color: ColorToken,
}

impl FrameworkTemplate {
    pub(crate) const fn new(
        id: FrameworkId,
        name: &'static str,
        full_name: &'static str,
        description: &'static str,
        slots: &'static [Slot],
        color: ColorToken,
    ) -> Self {
        Self {
            id,
            name,
            full_name,
            description,
            slots,
            color,
        }
    }

    /// Catalog identifier.
    #[must_use]
    pub const fn id(&self) -> FrameworkId {
        self.id
    }

    /// Acronym label (e.g. `R-T-F`).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Expanded label (e.g. `Role • Task • Format`).
    #[must_use]
    pub const fn full_name(&self) -> &'static str {
        self.full_name
    }

    /// One-sentence usage guidance.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// Slots in their meaningful order.
    #[must_use]
    pub const fn slots(&self) -> &'static [Slot] {
        self.slots
    }

    /// Accent color used by renderers.
    #[must_use]
    pub const fn color(&self) -> ColorToken {
        self.color
    }
}
