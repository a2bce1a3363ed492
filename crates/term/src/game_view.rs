//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{ActivePiece, GameSnapshot};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{Color, BOARD_HEIGHT, BOARD_WIDTH};

/// Side of the square next-piece preview box, in board cells.
const PREVIEW_CELLS: u16 = 6;

const BACKGROUND: Rgb = Rgb::new(10, 10, 10);
const WELL: Rgb = Rgb::new(18, 18, 24);

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

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2 columns per cell roughly squares up terminal glyphs.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Render one frame into an existing framebuffer.
    ///
    /// `start_enabled` shows the start prompt, mirroring the start control.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        start_enabled: bool,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Cell {
            ch: ' ',
            style: CellStyle::new(BACKGROUND, BACKGROUND),
        });

        let frame_w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let frame_h = BOARD_HEIGHT as u16 + 2;
        let panel_w = PREVIEW_CELLS * self.cell_w + 2;
        let total_w = frame_w + 2 + panel_w;

        let origin_x = viewport.width.saturating_sub(total_w) / 2;
        let origin_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle::new(Rgb::new(0, 200, 255), BACKGROUND);
        draw_border(fb, origin_x, origin_y, frame_w, frame_h, border);
        fb.fill_rect(
            origin_x + 1,
            origin_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::new(WELL, WELL),
        );

        let well_x = origin_x + 1;
        let well_y = origin_y + 1;

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if let Some(color) = cell.color() {
                    self.draw_block(fb, well_x, well_y, x as i16, y as i16, color);
                }
            }
        }

        if let Some(active) = snap.active {
            self.draw_piece(fb, well_x, well_y, &active, active.x as i16, active.y as i16);
        }

        let panel_x = origin_x + frame_w + 2;
        self.draw_side_panel(fb, snap, panel_x, origin_y, panel_w, border);

        if snap.game_over {
            draw_banner(fb, origin_x, origin_y, frame_w, frame_h, "GAME OVER");
        }
        if start_enabled {
            let prompt = if snap.started {
                "ENTER: PLAY AGAIN"
            } else {
                "ENTER: START"
            };
            let y = origin_y + frame_h / 2 + 2;
            let x = origin_x + frame_w.saturating_sub(prompt.len() as u16) / 2;
            fb.put_str(x, y, prompt, CellStyle::new(Rgb::new(255, 255, 255), BACKGROUND));
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, start_enabled: bool, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, start_enabled, viewport, &mut fb);
        fb
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        x: u16,
        y: u16,
        panel_w: u16,
        border: CellStyle,
    ) {
        let label = CellStyle::new(Rgb::new(255, 0, 255), BACKGROUND).bold();
        let value = CellStyle::new(Rgb::new(230, 230, 230), BACKGROUND);

        fb.put_str(x, y, "NEXT", label);
        let box_h = PREVIEW_CELLS + 2;
        draw_border(fb, x, y + 1, panel_w, box_h, border);

        // Center the matrix in the preview box.
        let size = snap.next.shape.size() as i16;
        let offset = (PREVIEW_CELLS as i16 - size) / 2;
        self.draw_piece(fb, x + 1, y + 2, &snap.next, offset, offset);

        let mut row = y + 1 + box_h + 1;
        for (name, number) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(x, row, name, label);
            fb.put_str(x, row + 1, &number.to_string(), value);
            row += 3;
        }
    }

    /// Draw a piece's occupied cells with its matrix origin at cell (ox, oy).
    fn draw_piece(
        &self,
        fb: &mut FrameBuffer,
        base_x: u16,
        base_y: u16,
        piece: &ActivePiece,
        ox: i16,
        oy: i16,
    ) {
        for (dx, dy) in piece.shape.minos() {
            self.draw_block(fb, base_x, base_y, ox + dx as i16, oy + dy as i16, piece.color);
        }
    }

    /// Cells above or left of the base are skipped (spawn overlap above row 0).
    fn draw_block(&self, fb: &mut FrameBuffer, base_x: u16, base_y: u16, x: i16, y: i16, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        let rgb = Rgb::from(color);
        let style = CellStyle::new(rgb, rgb.scaled(45)).bold();
        let px = base_x + x as u16 * self.cell_w;
        let py = base_y + y as u16;
        fb.fill_rect(px, py, self.cell_w, 1, '▓', style);
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '╔', style);
    fb.put_char(x + w - 1, y, '╗', style);
    fb.put_char(x, y + h - 1, '╚', style);
    fb.put_char(x + w - 1, y + h - 1, '╝', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '═', style);
        fb.put_char(x + dx, y + h - 1, '═', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '║', style);
        fb.put_char(x + w - 1, y + dy, '║', style);
    }
}

/// Dark band across the middle third of the well with centered text.
fn draw_banner(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, text: &str) {
    let band = CellStyle::new(Rgb::new(0, 0, 0), Rgb::new(0, 0, 0));
    fb.fill_rect(x + 1, y + h / 3, w - 2, h / 3, ' ', band);

    let text_w = text.chars().count() as u16;
    let tx = x + w.saturating_sub(text_w) / 2;
    let style = CellStyle::new(Rgb::new(255, 0, 0), Rgb::new(0, 0, 0)).bold();
    fb.put_str(tx, y + h / 2, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_draws_border() {
        let view = GameView::default();
        let fb = view.render(&GameSnapshot::default(), true, Viewport::new(60, 24));

        // 10 cells * 2 columns + 2 border columns, followed by panel.
        let top = fb.row_text(1);
        assert!(top.contains('╔'));
        assert!(top.contains(&"═".repeat(20)));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let view = GameView::default();
        let fb = view.render(&GameSnapshot::default(), false, Viewport::new(3, 2));
        assert_eq!(fb.width(), 3);
    }
}
