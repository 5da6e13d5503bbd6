//! Suspect, weapon, and clue records plus coordinate lookups over them.
//!
//! Lookups are linear scans returning the first match in list order, so two
//! entities sharing a tile resolve to whichever was listed first.

use crate::types::Pos;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suspect {
    pub name: String,
    pub glyph: String,
    pub pos: Option<Pos>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Weapon {
    pub name: String,
    pub glyph: String,
    pub pos: Option<Pos>,
    pub collected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clue {
    pub text: String,
    pub pos: Option<Pos>,
    pub found: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Victim {
    pub name: String,
    pub glyph: String,
    pub pos: Option<Pos>,
}

pub fn suspect_index_at(suspects: &[Suspect], pos: Pos) -> Option<usize> {
    suspects.iter().position(|suspect| suspect.pos == Some(pos))
}

/// Collected weapons are no longer on the floor and never match.
pub fn weapon_index_at(weapons: &[Weapon], pos: Pos) -> Option<usize> {
    weapons.iter().position(|weapon| weapon.pos == Some(pos) && !weapon.collected)
}

/// Found clues never match.
pub fn clue_index_at(clues: &[Clue], pos: Pos) -> Option<usize> {
    clues.iter().position(|clue| clue.pos == Some(pos) && !clue.found)
}

pub fn suspect_at(suspects: &[Suspect], pos: Pos) -> Option<&Suspect> {
    suspect_index_at(suspects, pos).map(|index| &suspects[index])
}

pub fn weapon_at(weapons: &[Weapon], pos: Pos) -> Option<&Weapon> {
    weapon_index_at(weapons, pos).map(|index| &weapons[index])
}

pub fn clue_at(clues: &[Clue], pos: Pos) -> Option<&Clue> {
    clue_index_at(clues, pos).map(|index| &clues[index])
}
