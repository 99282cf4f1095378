//! Character-cell rendering of a chain frame.
//!
//! The chain is laid out with [`Layout`] in cell units. A border frames the
//! canvas and its first and last columns are the walls. Springs are drawn
//! as a sine wave of slash and dash glyphs; each mass is a filled disc
//! labelled with its index.
//! Terminal cells are about twice as tall as wide, so discs are squashed
//! vertically by [`CELL_ASPECT`].

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use std::fmt::Write as _;

use crossterm::style::Stylize;
use normal_modes::{DisplacementPair, Frame, Layout, MassBody, PhysicalParameters, SpringCoil};

/// Height-to-width ratio of a terminal cell.
pub const CELL_ASPECT: f64 = 2.0;

/// Fewest columns one coil turn may span before turns are dropped.
pub const MIN_CELLS_PER_TURN: f64 = 4.0;

/// What a cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellKind {
    /// Background.
    #[default]
    Empty,
    /// Canvas border, including both walls.
    Border,
    /// Part of a spring.
    Spring,
    /// Part of a mass.
    Mass,
    /// Mass index.
    Label,
}

/// One character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Glyph.
    pub ch: char,
    /// Role of the glyph.
    pub kind: CellKind,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            kind: CellKind::Empty,
        }
    }
}

/// A grid of cells, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    /// Blank canvas.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let (width, height) = (usize::from(width), usize::from(height));
        Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        }
    }

    /// Width in cells.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Cell at `col`, `row`.
    #[must_use]
    pub fn get(&self, col: usize, row: usize) -> Option<Cell> {
        (col < self.width && row < self.height).then(|| self.cells[row * self.width + col])
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    /// Number of cells of a given kind.
    #[must_use]
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|cell| cell.kind == kind).count()
    }

    /// Sets the cell containing the point `(x, y)`; points off the canvas
    /// are dropped.
    fn plot(&mut self, x: f64, y: f64, ch: char, kind: CellKind) {
        if let (Some(col), Some(row)) = (to_index(x, self.width), to_index(y, self.height)) {
            self.cells[row * self.width + col] = Cell { ch, kind };
        }
    }

    fn draw_border(&mut self) {
        let (right, bottom) = (self.width as f64 - 0.5, self.height as f64 - 0.5);
        for col in 0..self.width {
            let x = col as f64 + 0.5;
            self.plot(x, 0.5, '-', CellKind::Border);
            self.plot(x, bottom, '-', CellKind::Border);
        }
        for row in 0..self.height {
            let y = row as f64 + 0.5;
            let ch = if row == 0 || row + 1 == self.height { '+' } else { '|' };
            self.plot(0.5, y, ch, CellKind::Border);
            self.plot(right, y, ch, CellKind::Border);
        }
    }

    fn draw_spring(&mut self, coil: &SpringCoil) {
        let max_turns = (coil.length() / MIN_CELLS_PER_TURN).floor().max(0.0);
        let coil = SpringCoil {
            turns: coil.turns.min(max_turns),
            ..*coil
        };

        for (x, y) in coil.points() {
            let distance = x - coil.start;
            // Screen rows grow downwards.
            let slope = coil.sample(distance + 0.5) - coil.sample(distance - 0.5);
            let ch = if slope < -0.3 {
                '/'
            } else if slope > 0.3 {
                '\\'
            } else {
                '-'
            };
            self.plot(x + 0.5, y, ch, CellKind::Spring);
        }
    }

    fn draw_mass(&mut self, mass: &MassBody, label: char) {
        for row in 0..self.height {
            for col in 0..self.width {
                let (x, y) = (col as f64 + 0.5, row as f64 + 0.5);
                if mass.contains(x, y, CELL_ASPECT) {
                    self.plot(x, y, '@', CellKind::Mass);
                }
            }
        }
        self.plot(mass.center_x, mass.center_y, label, CellKind::Label);
    }

    /// Draws a whole frame: springs, border, then both masses.
    pub fn draw(&mut self, frame: &Frame) {
        for coil in &frame.springs {
            self.draw_spring(coil);
        }
        self.draw_border();
        self.draw_mass(&frame.mass1, '1');
        self.draw_mass(&frame.mass2, '2');
    }

    /// Rows as plain text joined by newlines, trailing blanks trimmed.
    #[must_use]
    pub fn to_plain(&self) -> String {
        let lines: Vec<String> = self
            .rows()
            .map(|row| {
                let line: String = row.iter().map(|cell| cell.ch).collect();
                line.trim_end().to_string()
            })
            .collect();
        lines.join("\n")
    }

    /// One row with ANSI colors.
    #[must_use]
    pub fn styled_row(&self, row: usize) -> String {
        let mut out = String::with_capacity(self.width * 4);
        let start = row * self.width;
        let Some(cells) = self.cells.get(start..start + self.width) else {
            return out;
        };
        for cell in cells {
            let _ = match cell.kind {
                CellKind::Empty => write!(out, "{}", cell.ch),
                CellKind::Border => write!(out, "{}", cell.ch.dark_grey().bold()),
                CellKind::Spring => write!(out, "{}", cell.ch.red()),
                CellKind::Mass => write!(out, "{}", cell.ch.blue()),
                CellKind::Label => write!(out, "{}", cell.ch.white().on_blue().bold()),
            };
        }
        out
    }
}

fn to_index(value: f64, limit: usize) -> Option<usize> {
    (value.is_finite() && value >= 0.0 && value < limit as f64).then(|| value as usize)
}

/// Lays out and draws frames for a terminal of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Renderer {
    width: u16,
    height: u16,
    radius_scale: f64,
}

impl Renderer {
    /// Renderer for a `width` by `height` cell area.
    #[must_use]
    pub const fn new(width: u16, height: u16, radius_scale: f64) -> Self {
        Self {
            width,
            height,
            radius_scale,
        }
    }

    /// Adopts a new area size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Area size in cells.
    #[must_use]
    pub const fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Cell-unit layout for the current size.
    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout::new(f64::from(self.width), f64::from(self.height))
            .with_radius_scale(self.radius_scale)
    }

    /// Draws the chain at the given displacement.
    #[must_use]
    pub fn render(&self, params: &PhysicalParameters, pair: DisplacementPair) -> Canvas {
        let frame = self.layout().frame(params, pair);
        let mut canvas = Canvas::new(self.width, self.height);
        canvas.draw(&frame);
        canvas
    }
}
