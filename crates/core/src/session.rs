//! A single game of the mansion mystery: the generated map, the placed cast,
//! the player's position and findings, and the hidden solution.

mod hash;

use std::collections::BTreeMap;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::Cast;
use crate::entities::{
    Clue, Suspect, Victim, Weapon, clue_index_at, suspect_at, suspect_index_at, weapon_index_at,
};
use crate::interrogation::{ChatLine, Interrogator, Persona, Speaker};
use crate::mapgen::{GeneratorOptions, Mansion, MansionGenerator, MapGenError, VerticalDoorPolicy};
use crate::narrative::{Narrative, NarrativeSource, OfflineNarrative};
use crate::placement::{
    MIN_INTERIOR_HEIGHT, MIN_INTERIOR_WIDTH, first_cramped_room, place_cast, player_start,
};
use crate::types::{Direction, LogEvent, Pos, StepOutcome, Verdict};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub rooms: usize,
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub vertical_door: VerticalDoorPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { rooms: 6, width: 40, height: 15, vertical_door: VerticalDoorPolicy::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("could not generate the mansion: {0}")]
    MapGen(#[from] MapGenError),
    #[error(
        "the {room} interior is {width}x{height}; placing the cast needs at least {}x{}",
        MIN_INTERIOR_WIDTH,
        MIN_INTERIOR_HEIGHT
    )]
    RoomTooCramped { room: String, width: i32, height: i32 },
    #[error("the case is already closed")]
    CaseClosed,
    #[error("no suspect here")]
    NoSuspectHere,
    #[error("no weapons in inventory")]
    EmptyInventory,
    #[error("{weapon} has not been collected")]
    WeaponNotCollected { weapon: String },
    #[error("nothing to say")]
    EmptyMessage,
}

/// The murderer and weapon, revealed once the case is closed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution<'a> {
    pub murderer: &'a Suspect,
    pub weapon: &'a Weapon,
}

pub struct Session {
    seed: u64,
    config: SessionConfig,
    mansion: Mansion,
    cast: Cast,
    player: Pos,
    inventory: Vec<String>,
    collected_clues: Vec<String>,
    murderer: usize,
    murder_weapon: usize,
    narrative: Narrative,
    accusations: u32,
    solved: bool,
    transcripts: BTreeMap<String, Vec<ChatLine>>,
    log: Vec<LogEvent>,
}

impl Session {
    /// A session whose scenario texts are the built-in placeholders.
    pub fn new(seed: u64, config: &SessionConfig) -> Result<Self, SessionError> {
        Self::with_narrative(seed, config, &OfflineNarrative)
    }

    /// Builds the session, then asks `source` for the story, intro, and clue
    /// texts of the drawn murderer and weapon.
    pub fn with_narrative(
        seed: u64,
        config: &SessionConfig,
        source: &dyn NarrativeSource,
    ) -> Result<Self, SessionError> {
        let generator = MansionGenerator::new(GeneratorOptions {
            vertical_door: config.vertical_door,
            ..GeneratorOptions::default()
        });
        let mansion = generator.generate(config.rooms, config.width, config.height)?;
        if let Some(room) = first_cramped_room(&mansion.rooms) {
            return Err(SessionError::RoomTooCramped {
                room: room.name.clone(),
                width: room.x2 - room.x1 + 1,
                height: room.y2 - room.y1 + 1,
            });
        }

        let mut cast = Cast::default();
        place_cast(&mansion.rooms, &mut cast);
        let player = player_start(&mansion.rooms).ok_or(MapGenError::NoRooms)?;

        // Suspect and weapon `i` live in room `i`; the solution is drawn only
        // from rooms the player can walk to.
        let unreachable = mansion.unreachable_rooms(player);
        let reachable_rooms = |placed: usize| -> Vec<usize> {
            (0..placed.min(mansion.rooms.len()))
                .filter(|index| !unreachable.contains(index))
                .collect()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let placed_suspects = cast.suspects.iter().filter(|suspect| suspect.pos.is_some()).count();
        let placed_weapons = cast.weapons.iter().filter(|weapon| weapon.pos.is_some()).count();
        let murderer = choose_from(&mut rng, &reachable_rooms(placed_suspects));
        let murder_weapon = choose_from(&mut rng, &reachable_rooms(placed_weapons));

        log::debug!(
            "session seed={seed} rooms={} start={player:?}",
            mansion.room_names.join(",")
        );

        let mut session = Self {
            seed,
            config: config.clone(),
            mansion,
            cast,
            player,
            inventory: Vec::new(),
            collected_clues: Vec::new(),
            murderer,
            murder_weapon,
            narrative: Narrative::default(),
            accusations: 0,
            solved: false,
            transcripts: BTreeMap::new(),
            log: Vec::new(),
        };

        let narrative = source.compose(
            &session.cast.suspects[murderer].name,
            &session.cast.weapons[murder_weapon].name,
            &session.mansion.room_names,
        );
        session.apply_narrative(narrative);
        Ok(session)
    }

    /// Moves one tile if the target is passable, then picks up the first
    /// uncollected weapon and reveals the first unfound clue on that tile.
    pub fn step(&mut self, direction: Direction) -> Result<StepOutcome, SessionError> {
        if self.solved {
            return Err(SessionError::CaseClosed);
        }

        let target = self.player.offset(direction);
        if !self.mansion.is_passable(target) {
            self.log.push(LogEvent::Bumped { at: target });
            return Ok(StepOutcome::Blocked);
        }

        self.player = target;
        self.log.push(LogEvent::Moved { to: target });

        let mut picked_up = None;
        if let Some(index) = weapon_index_at(&self.cast.weapons, target) {
            let weapon = &mut self.cast.weapons[index];
            weapon.collected = true;
            self.inventory.push(weapon.name.clone());
            self.log.push(LogEvent::WeaponCollected { name: weapon.name.clone() });
            picked_up = Some(weapon.name.clone());
        }

        let mut found_clue = None;
        if let Some(index) = clue_index_at(&self.cast.clues, target) {
            let clue = &mut self.cast.clues[index];
            clue.found = true;
            self.collected_clues.push(clue.text.clone());
            self.log.push(LogEvent::ClueFound { text: clue.text.clone() });
            found_clue = Some(clue.text.clone());
        }

        Ok(StepOutcome::Moved { pos: target, picked_up, found_clue })
    }

    pub fn suspect_here(&self) -> Option<&Suspect> {
        suspect_at(&self.cast.suspects, self.player)
    }

    /// Accuses the suspect on the player's tile of using `weapon`, which must
    /// already be in the inventory. A wrong accusation leaves the case open.
    pub fn accuse(&mut self, weapon: &str) -> Result<Verdict, SessionError> {
        if self.solved {
            return Err(SessionError::CaseClosed);
        }
        let Some(suspect) = self.suspect_here() else {
            return Err(SessionError::NoSuspectHere);
        };
        if self.inventory.is_empty() {
            return Err(SessionError::EmptyInventory);
        }
        if !self.inventory.iter().any(|name| name == weapon) {
            return Err(SessionError::WeaponNotCollected { weapon: weapon.to_string() });
        }

        let suspect_name = suspect.name.clone();
        let correct = suspect_name == self.cast.suspects[self.murderer].name
            && weapon == self.cast.weapons[self.murder_weapon].name;
        let verdict = if correct { Verdict::Correct } else { Verdict::Wrong };

        self.accusations += 1;
        self.solved = correct;
        log::info!("accused {suspect_name} with the {weapon}: {verdict:?}");
        self.log.push(LogEvent::Accused {
            suspect: suspect_name,
            weapon: weapon.to_string(),
            verdict,
        });

        Ok(verdict)
    }

    /// Puts `message` to the suspect on the player's tile and records both
    /// sides in that suspect's transcript.
    pub fn talk(
        &mut self,
        interrogator: &dyn Interrogator,
        message: &str,
    ) -> Result<String, SessionError> {
        if self.solved {
            return Err(SessionError::CaseClosed);
        }
        let message = message.trim();
        if message.is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        let Some(index) = suspect_index_at(&self.cast.suspects, self.player) else {
            return Err(SessionError::NoSuspectHere);
        };

        let suspect = self.cast.suspects[index].name.clone();
        let persona = Persona {
            suspect: &suspect,
            victim: &self.cast.victim.name,
            is_murderer: index == self.murderer,
        };
        let reply = interrogator.respond(&persona, self.transcript(&suspect), message);

        log::debug!("questioned {suspect}");
        self.log.push(LogEvent::Questioned { suspect: suspect.clone() });
        self.transcripts.entry(suspect).or_default().extend([
            ChatLine { speaker: Speaker::Player, text: message.to_string() },
            ChatLine { speaker: Speaker::Suspect, text: reply.clone() },
        ]);
        Ok(reply)
    }

    /// Everything said with `suspect` so far, oldest first.
    pub fn transcript(&self, suspect: &str) -> &[ChatLine] {
        self.transcripts.get(suspect).map(Vec::as_slice).unwrap_or_default()
    }

    /// Replaces clue texts in list order and keeps the story and intro.
    pub fn apply_narrative(&mut self, narrative: Narrative) {
        for (clue, text) in self.cast.clues.iter_mut().zip(&narrative.clues) {
            clue.text = text.clone();
        }
        self.narrative = narrative;
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn mansion(&self) -> &Mansion {
        &self.mansion
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn inventory(&self) -> &[String] {
        &self.inventory
    }

    pub fn collected_clues(&self) -> &[String] {
        &self.collected_clues
    }

    pub fn suspects(&self) -> &[Suspect] {
        &self.cast.suspects
    }

    pub fn weapons(&self) -> &[Weapon] {
        &self.cast.weapons
    }

    pub fn clues(&self) -> &[Clue] {
        &self.cast.clues
    }

    pub fn victim(&self) -> &Victim {
        &self.cast.victim
    }

    pub fn narrative(&self) -> &Narrative {
        &self.narrative
    }

    pub fn accusations(&self) -> u32 {
        self.accusations
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn solution(&self) -> Option<Solution<'_>> {
        self.solved.then(|| Solution {
            murderer: &self.cast.suspects[self.murderer],
            weapon: &self.cast.weapons[self.murder_weapon],
        })
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }
}

/// Room 0 holds the start tile, so `candidates` is never empty in practice.
fn choose_from(rng: &mut ChaCha8Rng, candidates: &[usize]) -> usize {
    let roll = rng.next_u64();
    if candidates.is_empty() {
        return 0;
    }
    candidates[(roll % candidates.len() as u64) as usize]
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::interrogation::OfflineInterrogator;

    #[derive(Default)]
    struct RecordingSource {
        calls: RefCell<Vec<(String, String, Vec<String>)>>,
    }

    impl NarrativeSource for RecordingSource {
        fn compose(&self, murderer: &str, weapon: &str, room_names: &[String]) -> Narrative {
            self.calls.borrow_mut().push((
                murderer.to_string(),
                weapon.to_string(),
                room_names.to_vec(),
            ));
            Narrative {
                story: format!("{murderer} used the {weapon}."),
                intro: "A storm rolls in.".to_string(),
                clues: vec!["Mud on the stairs".to_string()],
            }
        }
    }

    #[derive(Default)]
    struct RecordingInterrogator {
        personas: RefCell<Vec<(String, bool, usize)>>,
    }

    impl Interrogator for RecordingInterrogator {
        fn respond(&self, persona: &Persona<'_>, transcript: &[ChatLine], message: &str) -> String {
            self.personas.borrow_mut().push((
                persona.suspect.to_string(),
                persona.is_murderer,
                transcript.len(),
            ));
            format!("{} heard: {message}", persona.suspect)
        }
    }

    fn reference_session(seed: u64) -> Session {
        Session::new(seed, &SessionConfig::default()).expect("default layout is valid")
    }

    fn walk(session: &mut Session, goal: Pos) {
        let steps = session.mansion().route(session.player(), goal).expect("goal is reachable");
        for direction in steps {
            session.step(direction).expect("case still open");
        }
        assert_eq!(session.player(), goal);
    }

    #[test]
    fn player_starts_inside_the_first_room() {
        let session = reference_session(1);
        assert_eq!(session.player(), Pos::new(2, 2));
        assert!(session.mansion().is_passable(session.player()));
    }

    #[test]
    fn walls_block_without_moving_the_player() {
        let mut session = reference_session(1);
        assert_eq!(
            session.step(Direction::Up),
            Ok(StepOutcome::Moved { pos: Pos::new(2, 1), picked_up: None, found_clue: None })
        );
        assert_eq!(session.step(Direction::Up), Ok(StepOutcome::Blocked));
        assert_eq!(session.player(), Pos::new(2, 1));
        assert_eq!(session.log().last(), Some(&LogEvent::Bumped { at: Pos::new(2, 0) }));
    }

    #[test]
    fn stepping_onto_items_collects_them_exactly_once() {
        let mut session = reference_session(1);
        let clue_pos = session.clues()[0].pos.expect("placed");
        let weapon_pos = session.weapons()[0].pos.expect("placed");

        walk(&mut session, clue_pos);
        assert!(session.clues()[0].found);
        assert_eq!(session.collected_clues(), ["Blood stains in the Study"]);

        walk(&mut session, weapon_pos);
        assert!(session.weapons()[0].collected);
        assert_eq!(session.inventory(), ["Knife"]);

        session.step(Direction::Left).expect("open");
        let revisit = session.step(Direction::Right).expect("open");
        assert_eq!(
            revisit,
            StepOutcome::Moved { pos: weapon_pos, picked_up: None, found_clue: None }
        );
        assert_eq!(session.inventory().len(), 1);
    }

    #[test]
    fn accusations_require_a_suspect_and_a_collected_weapon() {
        let mut session = reference_session(3);
        assert_eq!(session.accuse("Knife"), Err(SessionError::NoSuspectHere));

        let suspect_pos = session.suspects()[0].pos.expect("placed");
        walk(&mut session, suspect_pos);
        assert_eq!(session.suspect_here().map(|s| s.name.as_str()), Some("Mr. Green"));
        assert_eq!(session.accuse("Knife"), Err(SessionError::EmptyInventory));

        let weapon_pos = session.weapons()[0].pos.expect("placed");
        walk(&mut session, weapon_pos);
        walk(&mut session, suspect_pos);
        assert_eq!(
            session.accuse("Rope"),
            Err(SessionError::WeaponNotCollected { weapon: "Rope".to_string() })
        );
        assert!(session.accuse("Knife").is_ok());
    }

    #[test]
    fn correct_accusation_closes_the_case() {
        let mut session = reference_session(42);
        let murderer = session.murderer;
        let weapon_pos = session.weapons()[session.murder_weapon].pos.expect("placed");
        let weapon_name = session.weapons()[session.murder_weapon].name.clone();
        let suspect_pos = session.suspects()[murderer].pos.expect("placed");

        walk(&mut session, weapon_pos);
        walk(&mut session, suspect_pos);
        assert!(session.solution().is_none());
        assert_eq!(session.accuse(&weapon_name), Ok(Verdict::Correct));

        let solution = session.solution().expect("revealed after solving");
        assert_eq!(solution.weapon.name, weapon_name);
        assert_eq!(session.step(Direction::Left), Err(SessionError::CaseClosed));
        assert_eq!(session.accuse(&weapon_name), Err(SessionError::CaseClosed));
    }

    #[test]
    fn wrong_accusation_keeps_the_case_open() {
        let mut session = reference_session(42);
        let innocent = (session.murderer + 1) % session.suspects().len();
        let weapon_pos = session.weapons()[0].pos.expect("placed");
        let suspect_pos = session.suspects()[innocent].pos.expect("placed");

        walk(&mut session, weapon_pos);
        walk(&mut session, suspect_pos);
        assert_eq!(session.accuse("Knife"), Ok(Verdict::Wrong));
        assert!(!session.is_solved());
        assert_eq!(session.accusations(), 1);
    }

    #[test]
    fn solution_is_drawn_from_placed_entities_only() {
        let config = SessionConfig { rooms: 2, ..SessionConfig::default() };
        for seed in 0..32 {
            let session = Session::new(seed, &config).expect("valid layout");
            assert!(session.murderer < 2, "seed {seed} picked an unplaced suspect");
            assert!(session.murder_weapon < 2, "seed {seed} picked an unplaced weapon");
        }
    }

    #[test]
    fn solution_avoids_rooms_cut_off_from_the_start() {
        let config = SessionConfig { rooms: 4, width: 16, height: 10, ..SessionConfig::default() };
        for seed in 0..32 {
            let session = Session::new(seed, &config).expect("valid layout");
            assert_eq!(session.mansion().unreachable_rooms(session.player()), vec![2, 3]);
            assert!(session.murderer < 2, "seed {seed} hid the murderer behind a wall");
            assert!(session.murder_weapon < 2, "seed {seed} hid the weapon behind a wall");
        }
    }

    #[test]
    fn narrative_replaces_clue_texts_in_order() {
        let mut session = reference_session(7);
        session.apply_narrative(Narrative {
            story: "story".to_string(),
            intro: "intro".to_string(),
            clues: vec!["first".to_string(), "second".to_string()],
        });
        assert_eq!(session.clues()[0].text, "first");
        assert_eq!(session.clues()[1].text, "second");
        assert_eq!(session.clues()[2].text, "Footprints in the Hall");
        assert_eq!(session.narrative().intro, "intro");
    }

    #[test]
    fn narrative_source_receives_the_drawn_solution() {
        let source = RecordingSource::default();
        let mut session =
            Session::with_narrative(42, &SessionConfig::default(), &source).expect("valid layout");

        let murderer = session.suspects()[session.murderer].name.clone();
        let weapon = session.weapons()[session.murder_weapon].name.clone();
        let calls = source.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, murderer);
        assert_eq!(calls[0].1, weapon);
        assert_eq!(calls[0].2, session.mansion().room_names);
        drop(calls);

        assert_eq!(session.narrative().intro, "A storm rolls in.");
        assert_eq!(session.clues()[0].text, "Mud on the stairs");
        assert_eq!(session.clues()[1].text, "Open window in Library");

        let clue_pos = session.clues()[0].pos.expect("placed");
        walk(&mut session, clue_pos);
        assert_eq!(session.collected_clues(), ["Mud on the stairs"]);
    }

    #[test]
    fn offline_sessions_keep_placeholder_texts() {
        let session = reference_session(42);
        assert_eq!(session.narrative(), &Narrative::default());
        assert_eq!(session.clues()[0].text, "Blood stains in the Study");
    }

    #[test]
    fn talking_needs_a_suspect_and_something_to_say() {
        let mut session = reference_session(3);
        assert_eq!(
            session.talk(&OfflineInterrogator, "Where were you?"),
            Err(SessionError::NoSuspectHere)
        );

        session.step(Direction::Right).expect("open");
        assert_eq!(session.talk(&OfflineInterrogator, "   "), Err(SessionError::EmptyMessage));
        assert!(session.transcript("Mr. Green").is_empty());
    }

    #[test]
    fn talking_keeps_a_transcript_per_suspect() {
        let mut session = reference_session(42);
        let interrogator = RecordingInterrogator::default();
        let murderer = session.murderer;

        for index in [0, 1, 0] {
            let pos = session.suspects()[index].pos.expect("placed");
            walk(&mut session, pos);
            let reply = session.talk(&interrogator, " Where were you? ").expect("suspect here");
            assert!(reply.ends_with("heard: Where were you?"));
        }

        let green = session.transcript("Mr. Green");
        assert_eq!(green.len(), 4);
        assert_eq!(
            green[0],
            ChatLine { speaker: Speaker::Player, text: "Where were you?".to_string() }
        );
        assert_eq!(green[1].speaker, Speaker::Suspect);
        assert_eq!(session.transcript("Ms. Scarlet").len(), 2);

        let personas = interrogator.personas.borrow();
        assert_eq!(personas[0], ("Mr. Green".to_string(), murderer == 0, 0));
        assert_eq!(personas[1], ("Ms. Scarlet".to_string(), murderer == 1, 0));
        assert_eq!(personas[2], ("Mr. Green".to_string(), murderer == 0, 2));
        let questioned = LogEvent::Questioned { suspect: "Ms. Scarlet".to_string() };
        assert!(session.log().contains(&questioned));
    }

    #[test]
    fn cramped_layouts_are_rejected() {
        let config = SessionConfig { rooms: 2, width: 6, height: 3, ..SessionConfig::default() };
        let Err(err) = Session::new(1, &config) else {
            panic!("single-tile rooms cannot hold the cast");
        };
        assert_eq!(
            err,
            SessionError::RoomTooCramped { room: "Kitchen".to_string(), width: 1, height: 1 }
        );
        assert!(err.to_string().contains("at least 5x2"));
    }

    #[test]
    fn accepted_layouts_place_every_entity_on_floor() {
        let layouts = [(2, 14, 4), (6, 40, 15), (4, 16, 10), (9, 50, 25), (1, 20, 6), (3, 30, 8)];
        for (rooms, width, height) in layouts {
            let config = SessionConfig { rooms, width, height, ..SessionConfig::default() };
            let session = Session::new(5, &config).expect("layout fits the cast");
            let placed = session
                .suspects()
                .iter()
                .map(|suspect| suspect.pos)
                .chain(session.weapons().iter().map(|weapon| weapon.pos))
                .chain(session.clues().iter().map(|clue| clue.pos))
                .chain([session.victim().pos])
                .flatten();
            for pos in placed {
                assert!(session.mansion().is_passable(pos), "{pos:?} is solid in {config:?}");
            }
            assert!(session.solution().is_none());
        }
    }

    #[test]
    fn invalid_layouts_surface_as_session_errors() {
        let config = SessionConfig { rooms: 10, ..SessionConfig::default() };
        let Err(err) = Session::new(1, &config) else {
            panic!("ten rooms exceed the name list");
        };
        assert_eq!(
            err,
            SessionError::MapGen(MapGenError::TooManyRooms { requested: 10, available: 9 })
        );
    }
}
