use std::fmt;

use serde::{Deserialize, Serialize};

/// Tone and structure requested for a generated prompt.
///
/// Serializes to the human-facing label the gateway embeds in its
/// instruction, e.g. `"Short & Direct"` for [`PromptStyle::Concise`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PromptStyle {
    #[default]
    #[serde(rename = "Structured (CO-STAR)")]
    Structured,
    #[serde(rename = "Creative & Flowy")]
    Creative,
    #[serde(rename = "Short & Direct")]
    Concise,
    #[serde(rename = "Academic & Rigorous")]
    Academic,
}

impl PromptStyle {
    pub const ALL: [PromptStyle; 4] = [
        PromptStyle::Structured,
        PromptStyle::Creative,
        PromptStyle::Concise,
        PromptStyle::Academic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PromptStyle::Structured => "Structured",
            PromptStyle::Creative => "Creative",
            PromptStyle::Concise => "Concise",
            PromptStyle::Academic => "Academic",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PromptStyle::Structured => "Structured (CO-STAR)",
            PromptStyle::Creative => "Creative & Flowy",
            PromptStyle::Concise => "Short & Direct",
            PromptStyle::Academic => "Academic & Rigorous",
        }
    }

    /// Resolves either the short name (case-insensitive) or the full label.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|style| style.label() == label || style.name().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for PromptStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
