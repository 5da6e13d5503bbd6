//! Questioning suspects. A responder sees the suspect's persona and the
//! transcript so far and produces the next reply; the session keeps one
//! transcript per suspect.

use serde::{Deserialize, Serialize};

pub const NO_RESPONDER: &str = "(No interrogator configured.)";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Player,
    Suspect,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatLine {
    pub speaker: Speaker,
    pub text: String,
}

/// Who the responder plays. Only the murderer's persona knows its guilt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Persona<'a> {
    pub suspect: &'a str,
    pub victim: &'a str,
    pub is_murderer: bool,
}

impl Persona<'_> {
    /// Role instructions for a text-generating responder.
    pub fn briefing(&self) -> String {
        let mut briefing = format!(
            "You are {}, a murder suspect in a text-based mystery game.\n\
             {} has been found murdered.\n",
            self.suspect, self.victim
        );
        if self.is_murderer {
            briefing.push_str(
                "Secretly, you know you are the murderer. Stay in character without being \
                 obvious; enough evidence may force you to come clean.\n",
            );
        } else {
            briefing.push_str(
                "You do not know who the murderer is because it is not you. Stay in character \
                 as an innocent suspect.\n",
            );
        }
        briefing.push_str("Answer in a story-driven way and keep replies under 50 words.\n");
        briefing
    }
}

pub trait Interrogator {
    /// `transcript` excludes `message`.
    fn respond(&self, persona: &Persona<'_>, transcript: &[ChatLine], message: &str) -> String;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineInterrogator;

impl Interrogator for OfflineInterrogator {
    fn respond(&self, _persona: &Persona<'_>, _transcript: &[ChatLine], _message: &str) -> String {
        NO_RESPONDER.to_string()
    }
}
