//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{shape, shapes::cells, ActiveSnapshot, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rect, Rgb};
use crate::types::{cell_color, Command, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// What the HUD shows about the gesture feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureStatusView {
    /// A detector has sent at least one frame.
    pub connected: bool,
    /// Current fresh reading, `None` when stale or missing.
    pub reading: Option<Command>,
    pub hands: u8,
}

/// Per-frame values that do not live in the game snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudView {
    pub fps: u32,
    /// `None` when the gesture feed is disabled.
    pub gesture: Option<GestureStatusView>,
}

/// Screen regions of a rendered frame.
///
/// The renderer uses these to pick a repaint granularity per region: whole
/// board cells on the board, whole rows in the side panel and the game-over
/// overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Board including its border.
    pub frame: Rect,
    /// Board interior, where each board cell is `cell_w` columns wide.
    pub board: Rect,
    pub cell_w: u16,
    /// Side panel, `None` when the viewport is too narrow for it.
    pub panel: Option<Rect>,
    /// The three rows the game-over text can occupy, across the frame.
    pub overlay: Rect,
}

impl Layout {
    /// Whether a screen cell belongs to the board, panel or overlay.
    pub fn owns(&self, x: u16, y: u16) -> bool {
        self.board.contains(x, y)
            || self.overlay.contains(x, y)
            || self.panel.is_some_and(|p| p.contains(x, y))
    }
}

/// Narrowest side panel worth drawing.
const MIN_PANEL_W: u16 = 12;

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Where the board, panel and overlay go in a viewport.
    pub fn layout(&self, viewport: Viewport) -> Layout {
        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        let panel = (panel_x < viewport.width && viewport.width - panel_x >= MIN_PANEL_W).then(|| {
            Rect::new(
                panel_x,
                start_y,
                viewport.width - panel_x,
                viewport.height.saturating_sub(start_y),
            )
        });

        let mid_y = start_y.saturating_add(frame_h / 2);
        Layout {
            frame: Rect::new(start_x, start_y, frame_w, frame_h),
            board: Rect::new(start_x + 1, start_y + 1, board_px_w, board_px_h),
            cell_w: self.cell_w,
            panel,
            overlay: Rect::new(start_x, mid_y.saturating_sub(1), frame_w, 3),
        }
    }

    /// Render a snapshot into an existing framebuffer and return its layout.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: &HudView,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) -> Layout {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let layout = self.layout(viewport);
        let Rect {
            x: start_x,
            y: start_y,
            w: frame_w,
            h: frame_h,
        } = layout.frame;

        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let board = layout.board;
        fb.fill_rect(board.x, board.y, board.w, board.h, ' ', bg);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell == EMPTY {
                    self.draw_empty_cell(fb, start_x, start_y, x as u16, y as u16);
                } else {
                    let style = CellStyle::new(cell_color(cell), BOARD_BG).bold();
                    self.fill_cell_rect(fb, start_x, start_y, x as u16, y as u16, '█', style);
                }
            }
        }

        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            if ghost_y != active.y {
                let ghost = CellStyle::new(Rgb::new(140, 140, 140), BOARD_BG).dim();
                self.draw_piece(fb, start_x, start_y, active, ghost_y, '░', ghost);
            }
        }

        if let Some(active) = snap.active {
            let style = CellStyle::new(active.kind.color(), BOARD_BG).bold();
            self.draw_piece(fb, start_x, start_y, active, active.y, '█', style);
        }

        if let Some(panel) = layout.panel {
            self.draw_side_panel(fb, snap, hud, panel);
        }

        if snap.game_over {
            self.draw_game_over(fb, snap.score, layout.overlay);
        }
        layout
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: &HudView, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', style);
    }

    /// Draw the occupied cells of a piece with its top-left at `(active.x, row)`.
    #[allow(clippy::too_many_arguments)]
    fn draw_piece(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        active: ActiveSnapshot,
        row: i8,
        ch: char,
        style: CellStyle,
    ) {
        let matrix = shape(active.kind).rotation(active.rotation);
        for (r, c, _) in cells(matrix) {
            let x = i16::from(active.x) + c as i16;
            let y = i16::from(row) + r as i16;
            if (0..BOARD_WIDTH as i16).contains(&x) && (0..BOARD_HEIGHT as i16).contains(&y) {
                self.fill_cell_rect(fb, start_x, start_y, x as u16, y as u16, ch, style);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: &HudView,
        panel: Rect,
    ) {
        let panel_x = panel.x;
        let panel_w = panel.w;

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let mut y = panel.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.lines, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PIECES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.pieces, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        y = self.draw_preview(fb, panel_x, y, snap.next);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "FPS", label);
        fb.put_u32(panel_x + 4, y, hud.fps, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "GESTURE", label);
        y = y.saturating_add(1);
        match hud.gesture {
            None => {
                fb.put_str(panel_x, y, "OFF", value);
            }
            Some(st) if !st.connected => {
                fb.put_str(panel_x, y, "waiting", dim);
            }
            Some(st) => {
                let name = st.reading.map(|c| c.as_str()).unwrap_or("-");
                fb.put_str(panel_x, y, name, value);
                if panel_w >= 16 && st.reading.is_some() {
                    fb.put_str(panel_x + 9, y, "h", dim);
                    fb.put_u32(panel_x + 10, y, u32::from(st.hands), dim);
                }
            }
        }
        y = y.saturating_add(2);

        if snap.fast_drop {
            let hot = CellStyle::new(Rgb::new(255, 200, 80), PANEL_BG).bold();
            fb.put_str(panel_x, y, "FAST DROP", hot);
        }
    }

    /// Draw the rotation-0 matrix of `kind` and return the next free row.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: ShapeKind) -> u16 {
        let style = CellStyle::new(kind.color(), PANEL_BG).bold();
        let matrix = shape(kind).rotation(0);
        let mut used_rows = 0u16;
        for (r, c, _) in cells(matrix) {
            let px = x + (c as u16) * self.cell_w;
            fb.fill_rect(px, y + r as u16, self.cell_w, 1, '█', style);
            used_rows = used_rows.max(r as u16 + 1);
        }
        y.saturating_add(used_rows)
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, score: u32, overlay: Rect) {
        let mid_y = overlay.y.saturating_add(1);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let centered = |text_w: u16| overlay.x.saturating_add(overlay.w.saturating_sub(text_w) / 2);

        let title = "GAME OVER";
        fb.put_str(centered(title.len() as u16), overlay.y, title, style);

        // "SCORE " plus the digits.
        let digits = digit_count(score);
        let x = centered(6 + digits);
        fb.put_str(x, mid_y, "SCORE ", style);
        fb.put_u32(x + 6, mid_y, score, style);

        let hint = "R restart / Q quit";
        fb.put_str(centered(hint.len() as u16), mid_y + 1, hint, style.dim());
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
