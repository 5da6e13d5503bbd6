//! Line-driven play loop over any reader/writer pair.

use std::io::{BufRead, Write};

use anyhow::Result;
use mansion_core::{Direction, InputJournal, Interrogator, Session, StepOutcome, Verdict};

const PLAYER_MARK: char = '@';
const SUSPECT_MARK: char = 'S';
const WEAPON_MARK: char = 'W';
const CLUE_MARK: char = '?';
const VICTIM_MARK: char = 'X';

const HELP: &str = "commands: w/a/s/d (or up/down/left/right), look, inv, clues, \
                    talk <text>, accuse <weapon>, map, help, quit";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Look,
    Inventory,
    Clues,
    Talk(String),
    Accuse(String),
    Map,
    Help,
    Quit,
    Unknown(String),
}

/// `None` for blank lines.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "" => return None,
        "w" | "up" => Command::Move(Direction::Up),
        "s" | "down" => Command::Move(Direction::Down),
        "a" | "left" => Command::Move(Direction::Left),
        "d" | "right" => Command::Move(Direction::Right),
        "look" | "l" => Command::Look,
        "inv" | "i" | "inventory" => Command::Inventory,
        "clues" | "c" => Command::Clues,
        "talk" | "t" => Command::Talk(rest.to_string()),
        "accuse" => Command::Accuse(rest.to_string()),
        "map" | "m" => Command::Map,
        "help" | "h" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    };
    Some(command)
}

/// Map rows with the cast and player drawn over them. Collected weapons and
/// found clues are no longer shown.
pub fn render(session: &Session) -> Vec<String> {
    let mut grid: Vec<Vec<char>> =
        session.mansion().rows().iter().map(|row| row.chars().collect()).collect();

    let mut marks = Vec::new();
    marks.extend(session.victim().pos.map(|pos| (pos, VICTIM_MARK)));
    marks.extend(
        session
            .clues()
            .iter()
            .filter(|clue| !clue.found)
            .filter_map(|clue| clue.pos)
            .map(|pos| (pos, CLUE_MARK)),
    );
    marks.extend(
        session
            .weapons()
            .iter()
            .filter(|weapon| !weapon.collected)
            .filter_map(|weapon| weapon.pos)
            .map(|pos| (pos, WEAPON_MARK)),
    );
    marks.extend(
        session.suspects().iter().filter_map(|suspect| suspect.pos).map(|pos| (pos, SUSPECT_MARK)),
    );
    marks.push((session.player(), PLAYER_MARK));

    for (pos, mark) in marks {
        if let Some(cell) = usize::try_from(pos.y)
            .ok()
            .zip(usize::try_from(pos.x).ok())
            .and_then(|(y, x)| grid.get_mut(y).and_then(|row| row.get_mut(x)))
        {
            *cell = mark;
        }
    }

    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}

/// Runs until the case is solved, the player quits, or input ends. Every
/// move and accepted accusation is appended to `journal`; conversations are
/// kept only in the session's transcripts.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    journal: &mut InputJournal,
    interrogator: &dyn Interrogator,
    input: R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}", session.narrative().intro)?;
    writeln!(
        out,
        "{} lies dead somewhere in the mansion. Find the murderer and the weapon.",
        session.victim().name
    )?;
    writeln!(out, "{HELP}")?;
    print_map(session, out)?;

    for line in input.lines() {
        let Some(command) = parse_command(&line?) else {
            continue;
        };
        log::debug!("command {command:?}");

        match command {
            Command::Move(direction) => {
                let outcome = session.step(direction)?;
                journal.append_move(direction);
                report_step(session, &outcome, out)?;
            }
            Command::Look => describe_surroundings(session, out)?,
            Command::Inventory => {
                if session.inventory().is_empty() {
                    writeln!(out, "You carry nothing.")?;
                } else {
                    writeln!(out, "You carry: {}", session.inventory().join(", "))?;
                }
            }
            Command::Clues => {
                if session.collected_clues().is_empty() {
                    writeln!(out, "No clues yet.")?;
                }
                for clue in session.collected_clues() {
                    writeln!(out, "- {clue}")?;
                }
            }
            Command::Talk(message) => match session.talk(interrogator, &message) {
                    Ok(reply) => {
                        let name = session.suspect_here().map(|suspect| suspect.name.as_str());
                        writeln!(out, "{}: {reply}", name.unwrap_or_default())?;
                    }
                    Err(err) => writeln!(out, "You cannot talk: {err}.")?,
                },
            Command::Accuse(weapon) => {
                if accuse(session, journal, &weapon, out)? {
                    break;
                }
            }
            Command::Map => print_map(session, out)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => {
                writeln!(out, "You leave the mansion with the case unsolved.")?;
                break;
            }
            Command::Unknown(text) => writeln!(out, "Unknown command '{text}'. {HELP}")?,
        }
    }

    Ok(())
}

fn print_map<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    for row in render(session) {
        writeln!(out, "{row}")?;
    }
    Ok(())
}

fn report_step<W: Write>(session: &Session, outcome: &StepOutcome, out: &mut W) -> Result<()> {
    match outcome {
        StepOutcome::Blocked => writeln!(out, "You bump into a wall.")?,
        StepOutcome::Moved { picked_up, found_clue, .. } => {
            if let Some(weapon) = picked_up {
                writeln!(out, "You picked up the {weapon}.")?;
            }
            if let Some(clue) = found_clue {
                writeln!(out, "You found a clue: {clue}")?;
            }
            if let Some(suspect) = session.suspect_here() {
                writeln!(out, "{} is here.", suspect.name)?;
            }
        }
    }
    Ok(())
}

fn describe_surroundings<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    let player = session.player();
    match session.mansion().room_at(player) {
        Some(room) => writeln!(out, "You are in the {}.", room.name)?,
        None => writeln!(out, "You are standing in a doorway.")?,
    }
    if let Some(suspect) = session.suspect_here() {
        writeln!(out, "{} is here.", suspect.name)?;
    }
    if session.victim().pos == Some(player) {
        writeln!(out, "The body of {} lies at your feet.", session.victim().name)?;
    }
    Ok(())
}

/// Returns true once the case is closed.
fn accuse<W: Write>(
    session: &mut Session,
    journal: &mut InputJournal,
    weapon: &str,
    out: &mut W,
) -> Result<bool> {
    // Match the carried weapon regardless of how the player typed it.
    let weapon = session
        .inventory()
        .iter()
        .find(|carried| carried.eq_ignore_ascii_case(weapon))
        .cloned()
        .unwrap_or_else(|| weapon.to_string());
    let suspect = session.suspect_here().map(|suspect| suspect.name.clone());

    match session.accuse(&weapon) {
        Ok(Verdict::Correct) => {
            journal.append_accusation(&weapon);
            let name = suspect.unwrap_or_default();
            writeln!(out, "Correct! {name} did it with the {weapon}.")?;
            writeln!(out, "{}", session.narrative().story)?;
            Ok(true)
        }
        Ok(Verdict::Wrong) => {
            journal.append_accusation(&weapon);
            let name = suspect.unwrap_or_default();
            writeln!(out, "Wrong. {name} did not do it with the {weapon}.")?;
            Ok(false)
        }
        Err(err) => {
            writeln!(out, "You cannot accuse: {err}.")?;
            Ok(false)
        }
    }
}
