//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, gesture feed).
//!
//! # Board Dimensions
//!
//! Standard Tetris playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn anchor**: (3, 0), the top-left corner of the 4x4 bounding box
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 10 | Host loop frame interval |
//! | `GRAVITY_INTERVAL_MS` | 500 | Time between automatic falls |
//! | `FAST_DROP_MULTIPLIER` | 3 | Gravity speed-up while fast drop is held |
//! | `COMMAND_INTERVAL_MS` | 150 | Minimum time between accepted commands |
//! | `ROTATION_INTERVAL_MS` | 500 | Minimum time between accepted rotations |
//! | `GESTURE_COOLDOWN_MS` | 300 | Repeat suppression inside the gesture source |
//! | `GESTURE_STALE_MS` | 500 | Age after which a gesture reading is ignored |
//!
//! # Examples
//!
//! ```
//! use motion_tetris_types::{Command, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! // Shapes carry their board tag
//! assert_eq!(ShapeKind::I.tag(), 1);
//! assert_eq!(ShapeKind::from_tag(7), Some(ShapeKind::Z));
//!
//! // Unknown command strings degrade to `none`
//! assert_eq!(Command::parse("hardDrop"), Command::HardDrop);
//! assert_eq!(Command::parse("wave"), Command::None);
//!
//! // Board dimensions
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn anchor column: `BOARD_WIDTH / 2 - 2`
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 2;

/// Spawn anchor row
pub const SPAWN_Y: i8 = 0;

/// Host loop frame interval in milliseconds
pub const TICK_MS: u32 = 10;

/// Default time between automatic falls (500ms)
pub const GRAVITY_INTERVAL_MS: u32 = 500;

/// Gravity is divided by this factor while fast drop is engaged
pub const FAST_DROP_MULTIPLIER: u32 = 3;

/// Minimum time between two accepted directional commands
pub const COMMAND_INTERVAL_MS: u32 = 150;

/// Minimum time between two accepted rotations
pub const ROTATION_INTERVAL_MS: u32 = 500;

/// Repeat suppression for discrete gestures (left/right/rotate)
pub const GESTURE_COOLDOWN_MS: u32 = 300;

/// A gesture reading older than this is treated as `none`
pub const GESTURE_STALE_MS: u32 = 500;

/// Line clear scoring table
///
/// Points for clearing N lines in a single lock:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// A cell on the game board
///
/// - `0`: Empty cell
/// - `1..=7`: Cell locked by the shape with that tag (see [`ShapeKind::tag`])
pub type Cell = u8;

/// The empty cell value
pub const EMPTY: Cell = 0;

/// The seven tetromino shape kinds
///
/// Each kind owns a fixed board tag and display color:
/// - **I**: tag 1, cyan
/// - **J**: tag 2, blue
/// - **L**: tag 3, orange
/// - **O**: tag 4, yellow
/// - **S**: tag 5, green
/// - **T**: tag 6, purple
/// - **Z**: tag 7, red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl ShapeKind {
    /// All kinds in catalog order (also the round-robin spawn order)
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];

    /// Board cell tag for this kind (1..=7)
    pub const fn tag(self) -> Cell {
        match self {
            ShapeKind::I => 1,
            ShapeKind::J => 2,
            ShapeKind::L => 3,
            ShapeKind::O => 4,
            ShapeKind::S => 5,
            ShapeKind::T => 6,
            ShapeKind::Z => 7,
        }
    }

    /// Inverse of [`ShapeKind::tag`]; `None` for empty or unknown tags
    pub fn from_tag(tag: Cell) -> Option<Self> {
        match tag {
            1 => Some(ShapeKind::I),
            2 => Some(ShapeKind::J),
            3 => Some(ShapeKind::L),
            4 => Some(ShapeKind::O),
            5 => Some(ShapeKind::S),
            6 => Some(ShapeKind::T),
            7 => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// Parse shape kind from its letter (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use motion_tetris_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("Z"), Some(ShapeKind::Z));
    /// assert_eq!(ShapeKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "I" => Some(ShapeKind::I),
            "J" => Some(ShapeKind::J),
            "L" => Some(ShapeKind::L),
            "O" => Some(ShapeKind::O),
            "S" => Some(ShapeKind::S),
            "T" => Some(ShapeKind::T),
            "Z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// Uppercase letter key
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::J => "J",
            ShapeKind::L => "L",
            ShapeKind::O => "O",
            ShapeKind::S => "S",
            ShapeKind::T => "T",
            ShapeKind::Z => "Z",
        }
    }

    /// Display color used by renderers
    pub const fn color(self) -> Rgb {
        match self {
            ShapeKind::I => Rgb::new(0, 255, 255),
            ShapeKind::J => Rgb::new(0, 0, 255),
            ShapeKind::L => Rgb::new(255, 165, 0),
            ShapeKind::O => Rgb::new(255, 255, 0),
            ShapeKind::S => Rgb::new(0, 255, 0),
            ShapeKind::T => Rgb::new(128, 0, 128),
            ShapeKind::Z => Rgb::new(255, 0, 0),
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Background color of an empty board cell
pub const EMPTY_COLOR: Rgb = Rgb::new(30, 30, 30);

/// Color for any cell value; empty and unknown tags use [`EMPTY_COLOR`]
pub fn cell_color(cell: Cell) -> Rgb {
    ShapeKind::from_tag(cell)
        .map(|kind| kind.color())
        .unwrap_or(EMPTY_COLOR)
}

/// Discrete per-tick commands
///
/// Commands come from the keyboard mapper or the gesture feed and share one
/// channel. At most one command is applied per tick; when several signals are
/// active at once the strongest wins (see [`Command::priority`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Command {
    /// No input this tick
    #[default]
    None,
    /// Move piece one cell left
    Left,
    /// Move piece one cell right
    Right,
    /// Advance to the next rotation state (no wall kicks)
    Rotate,
    /// Move piece one cell down
    SoftDrop,
    /// Drop piece to its landing row and lock it
    HardDrop,
}

impl Command {
    /// Parse a command from its wire name (case-insensitive)
    ///
    /// Unrecognized values are treated as [`Command::None`].
    ///
    /// # Examples
    ///
    /// ```
    /// use motion_tetris_types::Command;
    ///
    /// assert_eq!(Command::parse("left"), Command::Left);
    /// assert_eq!(Command::parse("ROTATE"), Command::Rotate);
    /// assert_eq!(Command::parse("harddrop"), Command::HardDrop);
    /// assert_eq!(Command::parse(""), Command::None);
    /// ```
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Command::Left,
            "right" => Command::Right,
            "rotate" => Command::Rotate,
            "softdrop" => Command::SoftDrop,
            "harddrop" => Command::HardDrop,
            _ => Command::None,
        }
    }

    /// camelCase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::None => "none",
            Command::Left => "left",
            Command::Right => "right",
            Command::Rotate => "rotate",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
        }
    }

    /// Conflict resolution rank: hardDrop > rotate > softDrop > left/right > none
    pub fn priority(&self) -> u8 {
        match self {
            Command::None => 0,
            Command::Left | Command::Right => 1,
            Command::SoftDrop => 2,
            Command::Rotate => 3,
            Command::HardDrop => 4,
        }
    }

    /// Pick the highest-priority command; ties keep the first one seen
    pub fn strongest(commands: impl IntoIterator<Item = Command>) -> Command {
        commands
            .into_iter()
            .fold(Command::None, |best, c| {
                if c.priority() > best.priority() {
                    c
                } else {
                    best
                }
            })
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Command::None)
    }
}

/// Per-tick input handed to the game session
///
/// `fast_drop` is a sustained state (held fist or toggled key) that speeds up
/// gravity while set; `command` is the discrete command for this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Signal {
    pub command: Command,
    pub fast_drop: bool,
}

impl Signal {
    pub const fn new(command: Command, fast_drop: bool) -> Self {
        Self { command, fast_drop }
    }

    /// Combine two sources into one channel: strongest command, fast drop if either holds it
    pub fn merge(self, other: Signal) -> Signal {
        Signal {
            command: Command::strongest([self.command, other.command]),
            fast_drop: self.fast_drop || other.fast_drop,
        }
    }
}

impl From<Command> for Signal {
    fn from(command: Command) -> Self {
        Self {
            command,
            fast_drop: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(GRAVITY_INTERVAL_MS, 500);
        assert_eq!(FAST_DROP_MULTIPLIER, 3);
        assert_eq!(ROTATION_INTERVAL_MS, 500);
        assert_eq!(GESTURE_COOLDOWN_MS, 300);
        assert_eq!(SPAWN_X, 3);
        assert_eq!(SPAWN_Y, 0);
    }

    #[test]
    fn tags_round_trip_through_kinds() {
        for (i, kind) in ShapeKind::ALL.iter().enumerate() {
            assert_eq!(kind.tag() as usize, i + 1);
            assert_eq!(ShapeKind::from_tag(kind.tag()), Some(*kind));
        }
        assert_eq!(ShapeKind::from_tag(EMPTY), None);
        assert_eq!(ShapeKind::from_tag(8), None);
    }

    #[test]
    fn strongest_command_follows_priority() {
        assert_eq!(
            Command::strongest([Command::Left, Command::HardDrop, Command::Rotate]),
            Command::HardDrop
        );
        assert_eq!(
            Command::strongest([Command::Right, Command::Rotate]),
            Command::Rotate
        );
        assert_eq!(
            Command::strongest([Command::Right, Command::Left]),
            Command::Right
        );
        assert_eq!(Command::strongest([]), Command::None);
    }
}
