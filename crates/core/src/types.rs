use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self { y: self.y + dy, x: self.x + dx }
    }
}

/// Structural tile vocabulary. Room-name labels are not tiles; they live in
/// the mansion's label overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Wall,
    Floor,
    Door,
}

impl TileKind {
    pub fn is_passable(self) -> bool {
        !matches!(self, TileKind::Wall)
    }

    pub fn glyph(self) -> char {
        match self {
            TileKind::Wall => '#',
            TileKind::Floor => ' ',
            TileKind::Door => '/',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Wrong,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Blocked,
    Moved { pos: Pos, picked_up: Option<String>, found_clue: Option<String> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    Moved { to: Pos },
    Bumped { at: Pos },
    WeaponCollected { name: String },
    ClueFound { text: String },
    Questioned { suspect: String },
    Accused { suspect: String, weapon: String, verdict: Verdict },
}
