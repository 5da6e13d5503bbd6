//! Story, intro, and clue texts supplied by an external writer.
//!
//! The writer replies with a JSON object `{"story": .., "intro": .., "clues": [..]}`.
//! Decoding is lenient: a malformed reply degrades to placeholder texts rather
//! than failing the session.

use serde_json::Value;

pub const NO_STORY: &str = "(No full story generated.)";
pub const NO_INTRO: &str = "(No intro)";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Narrative {
    pub story: String,
    pub intro: String,
    pub clues: Vec<String>,
}

impl Default for Narrative {
    fn default() -> Self {
        Self { story: NO_STORY.to_string(), intro: NO_INTRO.to_string(), clues: Vec::new() }
    }
}

impl Narrative {
    pub fn from_json(text: &str) -> Self {
        let Ok(value) = serde_json::from_str::<Value>(text) else {
            return Self {
                story: "(Could not parse JSON.)".to_string(),
                intro: "(Could not parse JSON.)".to_string(),
                clues: Vec::new(),
            };
        };

        let field = |key: &str, fallback: &str| {
            value.get(key).and_then(Value::as_str).unwrap_or(fallback).to_string()
        };
        let clues = value
            .get("clues")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default();

        Self {
            story: field("story", "(No story field)"),
            intro: field("intro", "(No intro field)"),
            clues,
        }
    }
}

/// Produces the scenario texts for a chosen murderer, weapon, and room set.
pub trait NarrativeSource {
    fn compose(&self, murderer: &str, weapon: &str, room_names: &[String]) -> Narrative;
}

/// Used when no writer is configured; keeps the built-in clue texts.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineNarrative;

impl NarrativeSource for OfflineNarrative {
    fn compose(&self, _murderer: &str, _weapon: &str, _room_names: &[String]) -> Narrative {
        Narrative::default()
    }
}
