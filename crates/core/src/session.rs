//! Game session - the tick-driven state machine
//!
//! Ties together the board, the active piece, the spawn sequence, scoring and
//! the three cooldown gates (gravity, command, rotation). The host calls
//! [`GameSession::tick`] once per frame with the merged input signal and a
//! monotonic millisecond clock; [`GameSession::reset`] is the only other
//! mutator.
//!
//! Spawning, locking and clearing all happen inside one tick, so between ticks
//! the session is either [`Phase::Falling`] or [`Phase::GameOver`].

use tracing::debug;

use crate::board::Board;
use crate::piece::ActivePiece;
use crate::scoring::score_for;
use crate::sequence::{PieceSequence, SpawnPolicy};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::timer::Cooldown;
use crate::types::{
    Command, ShapeKind, Signal, COMMAND_INTERVAL_MS, FAST_DROP_MULTIPLIER, GRAVITY_INTERVAL_MS,
    ROTATION_INTERVAL_MS,
};

/// Tunable timing and spawn policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionConfig {
    /// Time between automatic falls
    pub gravity_interval_ms: u32,
    /// Gravity is divided by this while fast drop is engaged
    pub fast_drop_multiplier: u32,
    /// Minimum time between accepted commands
    pub command_interval_ms: u32,
    /// Minimum time between accepted rotations
    pub rotation_interval_ms: u32,
    pub spawn: SpawnPolicy,
}

impl SessionConfig {
    /// Gravity interval for the current fast-drop state, never below 1ms
    pub fn effective_gravity_ms(&self, fast_drop: bool) -> u32 {
        let base = if fast_drop {
            self.gravity_interval_ms / self.fast_drop_multiplier.max(1)
        } else {
            self.gravity_interval_ms
        };
        base.max(1)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            gravity_interval_ms: GRAVITY_INTERVAL_MS,
            fast_drop_multiplier: FAST_DROP_MULTIPLIER,
            command_interval_ms: COMMAND_INTERVAL_MS,
            rotation_interval_ms: ROTATION_INTERVAL_MS,
            spawn: SpawnPolicy::Cycle,
        }
    }
}

/// Observable session state between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// An active piece is on the board
    Falling,
    /// A spawn failed; terminal until [`GameSession::reset`]
    GameOver,
}

/// One lock with its line clear result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockEvent {
    pub kind: ShapeKind,
    pub lines_cleared: u32,
    pub score_gained: u32,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TickOutcome {
    /// Command that changed the piece this tick, if any
    pub command_applied: Option<Command>,
    /// Gravity moved the piece down one row
    pub fell: bool,
    pub lock: Option<LockEvent>,
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    board: Board,
    active: Option<ActivePiece>,
    sequence: PieceSequence,
    score: u32,
    lines: u32,
    pieces: u32,
    game_over: bool,
    fast_drop: bool,
    gravity: Cooldown,
    command: Cooldown,
    rotation: Cooldown,
    /// Last lock (consumed by the host for the clear cue)
    last_event: Option<LockEvent>,
}

impl GameSession {
    /// Start a session on an empty board with the first piece spawned
    pub fn new(config: SessionConfig) -> Self {
        Self::from_board(config, Board::empty())
    }

    /// Start a session on a pre-filled board
    ///
    /// The first spawn is checked against `board`, so a blocked spawn area
    /// ends the game before the first tick.
    pub fn from_board(config: SessionConfig, board: Board) -> Self {
        let mut session = Self {
            config,
            board,
            active: None,
            sequence: PieceSequence::new(config.spawn),
            score: 0,
            lines: 0,
            pieces: 0,
            game_over: false,
            fast_drop: false,
            gravity: Cooldown::new(config.gravity_interval_ms),
            command: Cooldown::new(config.command_interval_ms),
            rotation: Cooldown::new(config.rotation_interval_ms),
            last_event: None,
        };
        session.spawn_piece();
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared_total(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Fast-drop state seen on the last tick
    pub fn fast_drop(&self) -> bool {
        self.fast_drop
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else {
            Phase::Falling
        }
    }

    /// Kind of the piece that spawns after the current one locks
    pub fn next_kind(&self) -> ShapeKind {
        self.sequence.peek()
    }

    /// Landing row of the active piece
    pub fn ghost_y(&self) -> Option<i8> {
        self.active.map(|piece| piece.hard_drop_target(&self.board))
    }

    /// Take and clear the last lock event
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next_kind();
        out.score = self.score;
        out.lines = self.lines;
        out.pieces = self.pieces;
        out.game_over = self.game_over;
        out.fast_drop = self.fast_drop;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Return to a fresh game with the same configuration
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.sequence.reset();
        self.score = 0;
        self.lines = 0;
        self.pieces = 0;
        self.game_over = false;
        self.fast_drop = false;
        self.gravity.clear();
        self.command.clear();
        self.rotation.clear();
        self.last_event = None;
        debug!("session reset");
        self.spawn_piece();
    }

    /// Advance the simulation by one frame
    ///
    /// Applies at most one command, then the gravity step. Does nothing once
    /// the game is over.
    pub fn tick(&mut self, input: impl Into<Signal>, now_ms: u64) -> TickOutcome {
        let signal = input.into();
        let mut outcome = TickOutcome::default();

        if self.game_over {
            outcome.game_over = true;
            return outcome;
        }

        self.fast_drop = signal.fast_drop;
        self.sync_clock(now_ms);

        let hard_dropped = self.apply_command(signal.command, now_ms, &mut outcome);
        if !hard_dropped {
            self.apply_gravity(now_ms, &mut outcome);
        }

        outcome.game_over = self.game_over;
        outcome
    }

    fn sync_clock(&mut self, now_ms: u64) {
        let mut resynced = self.gravity.resync_if_behind(now_ms);
        resynced |= self.command.resync_if_behind(now_ms);
        resynced |= self.rotation.resync_if_behind(now_ms);
        if resynced {
            debug!(now_ms, "clock went backwards, timers re-synced");
        }
        self.gravity.start_if_unset(now_ms);
    }

    /// Open until first use, then rate limited
    fn gate_open(gate: &Cooldown, now_ms: u64) -> bool {
        !gate.is_started() || gate.ready(now_ms)
    }

    /// Returns true when a hard drop locked the piece
    fn apply_command(&mut self, command: Command, now_ms: u64, outcome: &mut TickOutcome) -> bool {
        let Some(mut piece) = self.active else {
            return false;
        };
        if command.is_none() || !Self::gate_open(&self.command, now_ms) {
            return false;
        }

        let changed = match command {
            Command::None => false,
            Command::Left => piece.try_move(&self.board, -1),
            Command::Right => piece.try_move(&self.board, 1),
            Command::Rotate => {
                Self::gate_open(&self.rotation, now_ms) && piece.try_rotate(&self.board)
            }
            Command::SoftDrop => piece.try_soft_drop(&self.board),
            Command::HardDrop => {
                piece.y = piece.hard_drop_target(&self.board);
                self.command.restart(now_ms);
                self.gravity.restart(now_ms);
                outcome.command_applied = Some(command);
                outcome.lock = Some(self.lock_piece(piece));
                return true;
            }
        };

        if changed {
            self.active = Some(piece);
            self.command.restart(now_ms);
            match command {
                Command::Rotate => self.rotation.restart(now_ms),
                Command::SoftDrop => self.gravity.restart(now_ms),
                _ => {}
            }
            outcome.command_applied = Some(command);
        }
        false
    }

    fn apply_gravity(&mut self, now_ms: u64, outcome: &mut TickOutcome) {
        let Some(mut piece) = self.active else {
            return;
        };
        let interval = self.config.effective_gravity_ms(self.fast_drop);
        if !self.gravity.ready_after(now_ms, interval) {
            return;
        }

        if piece.try_soft_drop(&self.board) {
            self.active = Some(piece);
            outcome.fell = true;
        } else {
            outcome.lock = Some(self.lock_piece(piece));
        }
        self.gravity.restart(now_ms);
    }

    /// Lock, clear, score, then spawn the next piece
    fn lock_piece(&mut self, piece: ActivePiece) -> LockEvent {
        self.active = None;
        piece.lock_into(&mut self.board);

        let lines_cleared = self.board.clear_full_rows();
        let score_gained = score_for(lines_cleared);
        self.score = self.score.saturating_add(score_gained);
        self.lines = self.lines.saturating_add(lines_cleared);
        self.pieces = self.pieces.saturating_add(1);

        let event = LockEvent {
            kind: piece.kind,
            lines_cleared,
            score_gained,
        };
        self.last_event = Some(event);
        debug!(
            kind = piece.kind.as_str(),
            x = piece.x,
            y = piece.y,
            lines_cleared,
            score = self.score,
            "piece locked"
        );

        self.spawn_piece();
        event
    }

    /// Spawn the next piece from the sequence; sets game over if it does not fit
    fn spawn_piece(&mut self) -> bool {
        let kind = self.sequence.next();
        let piece = ActivePiece::spawn(kind);

        if !piece.is_valid(&self.board) {
            self.active = None;
            self.game_over = true;
            debug!(
                kind = kind.as_str(),
                score = self.score,
                lines = self.lines,
                "spawn blocked, game over"
            );
            return false;
        }

        self.active = Some(piece);
        debug!(kind = kind.as_str(), "piece spawned");
        true
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
