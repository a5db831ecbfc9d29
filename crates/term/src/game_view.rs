//! GameView: maps a `core::RoundSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{RoundSnapshot, TileSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{RoundPhase, TileState, GRID_COLUMNS, GRID_ROWS, TILE_COUNT};

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

const TABLE_BG: Rgb = Rgb::new(28, 36, 44);
const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK);
const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), Rgb::BLACK).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK);
const PAIRS_TOTAL: &str = "/8";

/// A lightweight terminal renderer for the card grid.
pub struct GameView {
    /// Card width in terminal columns.
    card_w: u16,
    /// Card height in terminal rows.
    card_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            card_w: 7,
            card_h: 3,
        }
    }
}

impl GameView {
    pub fn new(card_w: u16, card_h: u16) -> Self {
        Self {
            card_w: card_w.max(3),
            card_h: card_h.max(1),
        }
    }

    /// Outer size of the bordered table: cards, one-cell gaps, one-cell padding, border.
    pub fn frame_size(&self) -> (u16, u16) {
        let cols = GRID_COLUMNS as u16;
        let rows = GRID_ROWS as u16;
        let w = cols * self.card_w + (cols - 1) + 4;
        let h = rows * self.card_h + (rows - 1) + 4;
        (w, h)
    }

    /// Top-left terminal cell of card `index`, relative to the frame origin.
    pub fn card_origin(&self, index: usize) -> (u16, u16) {
        let col = (index % GRID_COLUMNS) as u16;
        let row = (index / GRID_COLUMNS) as u16;
        (2 + col * (self.card_w + 1), 2 + row * (self.card_h + 1))
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// `cursor` is the tile index to highlight, if any.
    pub fn render_into(
        &self,
        snap: &RoundSnapshot,
        cursor: Option<usize>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w.saturating_sub(2),
            frame_h.saturating_sub(2),
            ' ',
            CellStyle::new(TABLE_BG, TABLE_BG),
        );
        self.draw_border(fb, start_x, start_y, frame_w, frame_h);
        fb.put_str(start_x + 2, start_y, " MEMORY ", LABEL);

        if snap.started {
            let mismatch = snap.phase == RoundPhase::Resolving;
            for (index, tile) in snap.tiles.iter().enumerate() {
                let (cx, cy) = self.card_origin(index);
                self.draw_card(fb, start_x + cx, start_y + cy, tile, mismatch);
            }
            if let Some(index) = cursor.filter(|&i| i < TILE_COUNT) {
                let (cx, cy) = self.card_origin(index);
                self.draw_cursor(fb, start_x + cx, start_y + cy, snap.playable());
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        if snap.won {
            self.draw_result_overlay(fb, snap, start_x, start_y, frame_w, frame_h);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &RoundSnapshot, cursor: Option<usize>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '╭', BORDER);
        fb.put_char(x + w - 1, y, '╮', BORDER);
        fb.put_char(x, y + h - 1, '╰', BORDER);
        fb.put_char(x + w - 1, y + h - 1, '╯', BORDER);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', BORDER);
            fb.put_char(x + dx, y + h - 1, '─', BORDER);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', BORDER);
            fb.put_char(x + w - 1, y + dy, '│', BORDER);
        }
    }

    fn draw_card(&self, fb: &mut FrameBuffer, x: u16, y: u16, tile: &TileSnapshot, mismatch: bool) {
        let (style, fill, face) = match tile.state {
            TileState::Hidden => (
                CellStyle::new(Rgb::new(90, 110, 160), Rgb::new(46, 62, 92)).dim(),
                '░',
                None,
            ),
            // Both face-up unmatched tiles during Resolving are a mismatch.
            TileState::Revealed if mismatch => (
                CellStyle::new(Rgb::WHITE, Rgb::new(200, 70, 70)).bold(),
                ' ',
                Some(tile.symbol.glyph()),
            ),
            TileState::Revealed => (
                CellStyle::new(Rgb::WHITE, Rgb::new(40, 150, 200)).bold(),
                ' ',
                Some(tile.symbol.glyph()),
            ),
            TileState::Matched => (
                CellStyle::new(Rgb::WHITE, Rgb::new(60, 170, 110)).bold(),
                ' ',
                Some(tile.symbol.glyph()),
            ),
        };

        fb.fill_rect(x, y, self.card_w, self.card_h, fill, style);
        if let Some(glyph) = face {
            fb.put_char(x + self.card_w / 2, y + self.card_h / 2, glyph, style);
        }
    }

    /// The cursor is dimmed while selections would be rejected.
    fn draw_cursor(&self, fb: &mut FrameBuffer, x: u16, y: u16, active: bool) {
        let base = CellStyle::new(Rgb::new(255, 220, 80), TABLE_BG);
        let style = if active { base.bold() } else { base.dim() };
        let mid = y + self.card_h / 2;
        fb.put_char(x.saturating_sub(1), mid, '▶', style);
        fb.put_char(x + self.card_w, mid, '◀', style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &RoundSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let mut y = start_y;
        fb.put_str(panel_x, y, "MOVES", LABEL);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.move_count, VALUE);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "STARS", LABEL);
        y = y.saturating_add(1);
        let stars = CellStyle::new(Rgb::new(255, 210, 60), Rgb::BLACK).bold();
        fb.put_str(panel_x, y, star_text(snap.star_rating.stars()), stars);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TIME", LABEL);
        y = y.saturating_add(1);
        put_clock(fb, panel_x, y, snap.elapsed_seconds, VALUE);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PAIRS", LABEL);
        y = y.saturating_add(1);
        let x = fb.put_u32(panel_x, y, (snap.matched_count() / 2) as u32, VALUE);
        fb.put_str(x, y, PAIRS_TOTAL, VALUE);
        y = y.saturating_add(2);

        let hint = VALUE.dim();
        for line in ["arrows  move", "enter   flip", "r       restart", "q       quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_result_overlay(
        &self,
        fb: &mut FrameBuffer,
        snap: &RoundSnapshot,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
    ) {
        let box_w = 24u16.min(frame_w.saturating_sub(2));
        let box_h = 8u16;
        let x = start_x + frame_w.saturating_sub(box_w) / 2;
        let y = start_y + frame_h.saturating_sub(box_h) / 2;
        let style = CellStyle::new(Rgb::WHITE, Rgb::new(20, 20, 28));

        fb.fill_rect(x, y, box_w, box_h, ' ', style);
        fb.put_str_centered(x, y + 1, box_w, "YOU WON!", style.bold());

        let moves_w = decimal_width(snap.move_count) + " moves".len() as u16;
        let cx = fb.put_u32(centered(x, box_w, moves_w), y + 3, snap.move_count, style);
        fb.put_str(cx, y + 3, " moves", style);

        let time_w = "in ".len() as u16 + clock_width(snap.elapsed_seconds);
        let cx = fb.put_str(centered(x, box_w, time_w), y + 4, "in ", style);
        put_clock(fb, cx, y + 4, snap.elapsed_seconds, style);
        fb.put_str_centered(x, y + 5, box_w, star_text(snap.star_rating.stars()), style.bold());
        fb.put_str_centered(x, y + 6, box_w, "r: play again", style.dim());
    }
}

/// Draw `mm:ss` (minutes uncapped). Returns the column after it.
pub fn put_clock(fb: &mut FrameBuffer, x: u16, y: u16, seconds: u32, style: CellStyle) -> u16 {
    let x = fb.put_u32_padded(x, y, seconds / 60, 2, style);
    fb.put_char(x, y, ':', style);
    fb.put_u32_padded(x.saturating_add(1), y, seconds % 60, 2, style)
}

/// Columns [`put_clock`] uses for `seconds`.
pub fn clock_width(seconds: u32) -> u16 {
    decimal_width(seconds / 60).max(2) + 3
}

fn decimal_width(value: u32) -> u16 {
    value.checked_ilog10().map_or(1, |d| d as u16 + 1)
}

fn centered(x: u16, w: u16, len: u16) -> u16 {
    x.saturating_add(w.saturating_sub(len) / 2)
}

fn star_text(stars: u8) -> &'static str {
    match stars {
        3 => "★★★",
        2 => "★★☆",
        _ => "★☆☆",
    }
}
