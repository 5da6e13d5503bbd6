//! Built-in cast: the victim, six suspects, six weapons, and placeholder clues.

use crate::entities::{Clue, Suspect, Victim, Weapon};

pub const VICTIM: (&str, &str) = ("Mr. Boddy", "\u{1F480}");

pub const SUSPECTS: [(&str, &str); 6] = [
    ("Mr. Green", "\u{1F468}"),
    ("Ms. Scarlet", "\u{1F469}"),
    ("Col. Mustard", "\u{1F474}"),
    ("Mrs. Peacock", "\u{1F475}"),
    ("Prof. Plum", "\u{1F468}\u{1F3A8}"),
    ("Dr. Orchid", "\u{1F469}\u{1F3EB}"),
];

pub const WEAPONS: [(&str, &str); 6] = [
    ("Knife", "\u{1F52A}"),
    ("Candlestick", "\u{1F56F}"),
    ("Revolver", "\u{1F52B}"),
    ("Rope", "\u{1F517}"),
    ("Lead Pipe", "\u{1F6AC}"),
    ("Wrench", "\u{1F527}"),
];

pub const CLUES: [&str; 6] = [
    "Blood stains in the Study",
    "Open window in Library",
    "Footprints in the Hall",
    "Broken glass in Lounge",
    "Napkin in Dining Room",
    "Knife missing from Kitchen",
];

pub const PLAYER_GLYPH: &str = "\u{1F464}";
pub const CLUE_GLYPH: &str = "\u{1F4DC}";

/// Everything placed on the map besides the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cast {
    pub victim: Victim,
    pub suspects: Vec<Suspect>,
    pub weapons: Vec<Weapon>,
    pub clues: Vec<Clue>,
}

impl Default for Cast {
    fn default() -> Self {
        Self {
            victim: Victim { name: VICTIM.0.to_string(), glyph: VICTIM.1.to_string(), pos: None },
            suspects: SUSPECTS
                .iter()
                .map(|(name, glyph)| Suspect {
                    name: (*name).to_string(),
                    glyph: (*glyph).to_string(),
                    pos: None,
                })
                .collect(),
            weapons: WEAPONS
                .iter()
                .map(|(name, glyph)| Weapon {
                    name: (*name).to_string(),
                    glyph: (*glyph).to_string(),
                    pos: None,
                    collected: false,
                })
                .collect(),
            clues: CLUES
                .iter()
                .map(|text| Clue { text: (*text).to_string(), pos: None, found: false })
                .collect(),
        }
    }
}
