use std::fs;
use std::path::Path;

use crate::constants::{ADVERSARY, COIN, EMPTY, GATE, WALL};
use crate::error::{GameError, MazeFormatError, MazeLoadError};
use crate::types::Vec2;

/// Mutable maze grid. Cells hold the symbol alphabet from `constants`;
/// the player is never stored here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    width: i32,
    height: i32,
    cells: Vec<Vec<char>>,
    terrain: Vec<Vec<char>>,
    treasure: Vec<Vec2>,
}

impl Maze {
    /// Builds a grid from raw rows. Trailing `\r` is dropped and entity glyphs
    /// are cleared, since placement owns coins and adversaries.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Self, MazeFormatError> {
        let mut cells: Vec<Vec<char>> = lines
            .iter()
            .map(|line| {
                line.as_ref()
                    .trim_end_matches('\r')
                    .chars()
                    .map(normalize_symbol)
                    .collect()
            })
            .collect();
        while cells.last().is_some_and(|row| row.is_empty()) {
            cells.pop();
        }
        let Some(first) = cells.first() else {
            return Err(MazeFormatError::NoRows);
        };
        let expected = first.len();
        if expected == 0 {
            return Err(MazeFormatError::NoRows);
        }
        for (row, values) in cells.iter().enumerate() {
            if values.len() != expected {
                return Err(MazeFormatError::RaggedRow {
                    row,
                    expected,
                    found: values.len(),
                });
            }
        }

        let mut treasure = Vec::new();
        for (y, row) in cells.iter().enumerate() {
            for (x, symbol) in row.iter().enumerate() {
                if *symbol == GATE {
                    treasure.push(Vec2::new(x as i32, y as i32));
                }
            }
        }

        Ok(Self {
            width: expected as i32,
            height: cells.len() as i32,
            terrain: cells.clone(),
            cells,
            treasure,
        })
    }

    pub fn from_text(text: &str) -> Result<Self, MazeFormatError> {
        let lines: Vec<&str> = text.lines().collect();
        Self::parse(&lines)
    }

    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = fs::read_to_string(path).map_err(|source| MazeLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if text.lines().all(|line| line.trim_end_matches('\r').is_empty()) {
            return Err(MazeLoadError::Empty {
                path: path.to_path_buf(),
            }
            .into());
        }
        Ok(Self::from_text(&text)?)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Shared by player and adversary movement: in bounds and neither wall nor gate.
    pub fn is_passable(&self, x: i32, y: i32) -> bool {
        match self.cell(x, y) {
            Some(symbol) => symbol != WALL && symbol != GATE,
            None => false,
        }
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<char> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.cells[y as usize][x as usize])
    }

    pub(crate) fn set_cell(&mut self, x: i32, y: i32, symbol: char) {
        if self.in_bounds(x, y) {
            self.cells[y as usize][x as usize] = symbol;
        }
    }

    /// Symbol a vacated cell falls back to: its loaded terrain, with gates
    /// reading as empty (nothing stands on a gate before it opens).
    pub(crate) fn floor_symbol(&self, x: i32, y: i32) -> char {
        if !self.in_bounds(x, y) {
            return EMPTY;
        }
        match self.terrain[y as usize][x as usize] {
            GATE => EMPTY,
            other => other,
        }
    }

    /// Gate positions recorded at load; they stay known after the gates open.
    pub fn treasure_cells(&self) -> &[Vec2] {
        &self.treasure
    }

    pub fn is_treasure(&self, x: i32, y: i32) -> bool {
        self.treasure.iter().any(|cell| cell.x == x && cell.y == y)
    }

    pub fn count_symbol(&self, symbol: char) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|value| **value == symbol).count())
            .sum()
    }

    /// Row-major list of cells whose symbol satisfies `accept`.
    pub(crate) fn cells_where(&self, accept: impl Fn(char) -> bool) -> Vec<Vec2> {
        let mut out = Vec::new();
        for (y, row) in self.cells.iter().enumerate() {
            for (x, symbol) in row.iter().enumerate() {
                if accept(*symbol) {
                    out.push(Vec2::new(x as i32, y as i32));
                }
            }
        }
        out
    }

    /// Clears every gate symbol, returning how many were cleared.
    pub(crate) fn clear_gates(&mut self) -> usize {
        let mut cleared = 0;
        for row in &mut self.cells {
            for symbol in row.iter_mut() {
                if *symbol == GATE {
                    *symbol = EMPTY;
                    cleared += 1;
                }
            }
        }
        cleared
    }

    pub fn row_string(&self, y: i32) -> Option<String> {
        if y < 0 || y >= self.height {
            return None;
        }
        Some(self.cells[y as usize].iter().collect())
    }
}

fn normalize_symbol(symbol: char) -> char {
    match symbol {
        COIN | ADVERSARY => EMPTY,
        other => other,
    }
}
