//! Mansion mystery core: procedural mansion layout, tile passability, entity
//! lookup, and the game session built on top of them.

pub mod content;
pub mod entities;
pub mod interrogation;
pub mod journal;
pub mod mapgen;
pub mod narrative;
pub mod placement;
pub mod replay;
pub mod session;
pub mod types;

pub use content::Cast;
pub use entities::{Clue, Suspect, Victim, Weapon, clue_at, suspect_at, weapon_at};
pub use interrogation::{ChatLine, Interrogator, OfflineInterrogator, Persona, Speaker};
pub use journal::{InputJournal, InputPayload, InputRecord, JournalError};
pub use mapgen::{
    GeneratorOptions, Mansion, MansionGenerator, MapGenError, ROOM_NAMES, RoomDescriptor,
    VerticalDoorPolicy, generate_mansion,
};
pub use narrative::{Narrative, NarrativeSource, OfflineNarrative};
pub use replay::{ReplayError, ReplayResult, replay_to_end};
pub use session::{Session, SessionConfig, SessionError, Solution};
pub use types::*;
