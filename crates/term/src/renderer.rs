//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Repaints follow the game's [`Layout`]. A board cell is the smallest board
//! repaint, so a moving piece never leaves half a block behind. Panel and
//! overlay rows repaint from the row start, because their numbers change
//! width. Anything outside those regions (border, margins) is diffed glyph
//! by glyph. The first frame and every frame after a resize repaint
//! everything.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rect, Rgb};
use crate::game_view::Layout;

/// A horizontal run of cells to repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    spans: Vec<Span>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            spans: Vec::with_capacity(256),
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.last = None;
        self.flush_buf()
    }

    /// Undo [`enter`](Self::enter). Raw mode is left even if the flush fails.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        let flushed = self.flush_buf();
        terminal::disable_raw_mode()?;
        flushed
    }

    /// Force the next draw to repaint everything, e.g. after a resize event.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer rendered with `layout`, swapping it into internal
    /// state.
    ///
    /// Callers keep one `FrameBuffer` and pass it in every frame; after the
    /// call it holds the previous frame and can be rendered into again.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer, layout: &Layout) -> Result<()> {
        self.buf.clear();
        self.spans.clear();

        match self.last.take() {
            Some(mut prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                damage_into(&prev, fb, layout, &mut self.spans);
                encode_spans_into(fb, &self.spans, &mut self.buf)?;
                std::mem::swap(&mut prev, fb);
                self.last = Some(prev);
            }
            stale => {
                self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
                full_spans_into(fb, &mut self.spans);
                encode_spans_into(fb, &self.spans, &mut self.buf)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                std::mem::swap(&mut prev, fb);
                self.last = Some(prev);
            }
        }

        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// One span per row covering the whole frame.
pub fn full_spans_into(fb: &FrameBuffer, out: &mut Vec<Span>) {
    out.extend((0..fb.height()).map(|y| Span {
        x: 0,
        y,
        len: fb.width(),
    }));
}

/// Collect the spans that differ between two frames of the same size.
///
/// Overlay rows take precedence over the board they cover. Spans never
/// overlap.
pub fn damage_into(prev: &FrameBuffer, next: &FrameBuffer, layout: &Layout, out: &mut Vec<Span>) {
    let (w, h) = (next.width(), next.height());
    let overlay = layout.overlay.clip(w, h);
    let board = layout.board.clip(w, h);

    for y in board.y..board.bottom() {
        if !overlay.contains(board.x, y) {
            board_row_damage(prev, next, board, layout.cell_w.max(1), y, out);
        }
    }
    for y in overlay.y..overlay.bottom() {
        row_damage(prev, next, overlay, y, out);
    }
    if let Some(panel) = layout.panel {
        let panel = panel.clip(w, h);
        for y in panel.y..panel.bottom() {
            row_damage(prev, next, panel, y, out);
        }
    }

    // Border and margins only change on a layout change; diff them per glyph.
    for y in 0..h {
        let mut run: Option<Span> = None;
        for x in 0..w {
            let dirty = !layout.owns(x, y) && prev.get(x, y) != next.get(x, y);
            extend_run(&mut run, dirty, Span { x, y, len: 1 }, out);
        }
        out.extend(run);
    }
}

/// Board row: repaint whole board cells, merging neighbours into one span.
fn board_row_damage(
    prev: &FrameBuffer,
    next: &FrameBuffer,
    board: Rect,
    cell_w: u16,
    y: u16,
    out: &mut Vec<Span>,
) {
    let mut run: Option<Span> = None;
    let mut x = board.x;
    while x < board.right() {
        let len = cell_w.min(board.right() - x);
        let dirty = (x..x + len).any(|cx| prev.get(cx, y) != next.get(cx, y));
        extend_run(&mut run, dirty, Span { x, y, len }, out);
        x += len;
    }
    out.extend(run);
}

/// Grow the open run with a dirty `piece`, or close it on a clean one.
fn extend_run(run: &mut Option<Span>, dirty: bool, piece: Span, out: &mut Vec<Span>) {
    if !dirty {
        out.extend(run.take());
    } else if let Some(span) = run.as_mut() {
        span.len += piece.len;
    } else {
        *run = Some(piece);
    }
}

/// Text row: repaint from the region's left edge through the last change.
fn row_damage(prev: &FrameBuffer, next: &FrameBuffer, region: Rect, y: u16, out: &mut Vec<Span>) {
    let last_changed = (region.x..region.right())
        .rev()
        .find(|&x| prev.get(x, y) != next.get(x, y));
    if let Some(end) = last_changed {
        out.push(Span {
            x: region.x,
            y,
            len: end - region.x + 1,
        });
    }
}

/// Encode `spans` of `fb` as crossterm commands into `out`.
///
/// Style changes are emitted per component, so a run of same-colored cells
/// costs one escape sequence.
pub fn encode_spans_into(fb: &FrameBuffer, spans: &[Span], out: &mut Vec<u8>) -> Result<()> {
    if spans.is_empty() {
        return Ok(());
    }

    let mut pen = Pen::default();
    for span in spans {
        out.queue(cursor::MoveTo(span.x, span.y))?;
        for x in span.x..span.x.saturating_add(span.len) {
            let cell = fb.get(x, span.y).unwrap_or_default();
            pen.apply(out, cell.style)?;
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Tracks the terminal's current style while encoding.
#[derive(Default)]
struct Pen {
    current: Option<CellStyle>,
}

impl Pen {
    fn apply(&mut self, out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
        let prev = self.current;
        if prev == Some(style) {
            return Ok(());
        }

        // SGR reset clears colors too, so they are re-sent after it.
        let attrs_changed = prev.map_or(true, |p| p.bold != style.bold || p.dim != style.dim);
        if attrs_changed {
            out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
        }
        if attrs_changed || prev.map(|p| p.fg) != Some(style.fg) {
            out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        }
        if attrs_changed || prev.map(|p| p.bg) != Some(style.bg) {
            out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        }

        self.current = Some(style);
        Ok(())
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameSession;
    use crate::game_view::{GameView, HudView, Viewport};
    use crate::types::{Command, Signal};

    fn render(session: &GameSession, hud: &HudView) -> (FrameBuffer, Layout) {
        let view = GameView::default();
        let mut fb = FrameBuffer::new(0, 0);
        let layout = view.render_into(&session.snapshot(), hud, Viewport::new(60, 30), &mut fb);
        (fb, layout)
    }

    fn damage(prev: &FrameBuffer, next: &FrameBuffer, layout: &Layout) -> Vec<Span> {
        let mut spans = Vec::new();
        damage_into(prev, next, layout, &mut spans);
        spans
    }

    #[test]
    fn identical_frames_have_no_damage() {
        let session = GameSession::default();
        let (a, layout) = render(&session, &HudView::default());
        assert!(damage(&a, &a.clone(), &layout).is_empty());

        let mut out = Vec::new();
        encode_spans_into(&a, &[], &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn piece_move_repaints_whole_board_cells() {
        let mut session = GameSession::default();
        let (before, layout) = render(&session, &HudView::default());
        let outcome = session.tick(Signal::from(Command::Left), 0);
        assert_eq!(outcome.command_applied, Some(Command::Left));
        let (after, _) = render(&session, &HudView::default());

        let spans = damage(&before, &after, &layout);
        assert!(!spans.is_empty());
        for span in spans.iter().filter(|s| layout.board.contains(s.x, s.y)) {
            assert_eq!((span.x - layout.board.x) % layout.cell_w, 0);
            assert_eq!(span.len % layout.cell_w, 0);
        }
    }

    #[test]
    fn panel_change_repaints_from_row_start() {
        let session = GameSession::default();
        let (a, layout) = render(&session, &HudView { fps: 9, gesture: None });
        let (b, _) = render(&session, &HudView { fps: 10, gesture: None });

        let panel = layout.panel.unwrap();
        let spans = damage(&a, &b, &layout);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].x, panel.x);
        // "FPS 10" ends at column 5 of the panel.
        assert_eq!(spans[0].len, 6);
    }

    #[test]
    fn overlay_rows_are_not_split_by_board_cells() {
        let session = GameSession::default();
        let (a, layout) = render(&session, &HudView::default());
        let mut over = session.snapshot();
        over.game_over = true;
        let mut b = FrameBuffer::new(0, 0);
        GameView::default().render_into(&over, &HudView::default(), Viewport::new(60, 30), &mut b);

        let spans = damage(&a, &b, &layout);
        for y in layout.overlay.y..layout.overlay.bottom() {
            let row: Vec<_> = spans.iter().filter(|s| s.y == y).collect();
            assert_eq!(row.len(), 1, "row {y}");
            assert_eq!(row[0].x, layout.overlay.x);
        }
    }

    #[test]
    fn margin_changes_fall_back_to_glyph_runs() {
        let session = GameSession::default();
        let (a, layout) = render(&session, &HudView::default());
        let mut b = a.clone();
        b.put_str(1, 0, "ab", CellStyle::default());
        assert_eq!(damage(&a, &b, &layout), vec![Span { x: 1, y: 0, len: 2 }]);
    }

    #[test]
    fn pen_skips_unchanged_style_components() {
        let red = CellStyle::new(Rgb::new(255, 0, 0), Rgb::new(0, 0, 0));
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(0, 0, "abcd", red);

        let mut one_run = Vec::new();
        encode_spans_into(&fb, &[Span { x: 0, y: 0, len: 4 }], &mut one_run).unwrap();
        let text = String::from_utf8_lossy(&one_run);
        assert!(text.contains("abcd"));
        assert_eq!(text.matches("38;2;255;0;0").count(), 1);
    }

    #[test]
    fn full_spans_cover_every_row() {
        let fb = FrameBuffer::new(3, 2);
        let mut spans = Vec::new();
        full_spans_into(&fb, &mut spans);
        assert_eq!(
            spans,
            vec![Span { x: 0, y: 0, len: 3 }, Span { x: 0, y: 1, len: 3 }]
        );
    }
}
