// card.rs
// Bingo card model: cells, grids and card identifiers as served by the cards endpoint.

use crate::defs::BLANK_NUMBER;

use serde::{Deserialize, Serialize};
use std::fmt;

/// One grid position on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub number: String,
    pub crossed_out: bool,
}

impl Cell {
    pub fn new(number: &str) -> Self {
        Self {
            number: number.to_string(),
            crossed_out: false,
        }
    }

    /// Blank slots are never crossable and never count toward a win.
    pub fn is_blank(&self) -> bool {
        self.number == BLANK_NUMBER
    }

    pub fn is_playable(&self) -> bool {
        !self.is_blank()
    }
}

/// Card identifier. The API sends integers, strings are tolerated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardId {
    Number(i64),
    Text(String),
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardId::Number(n) => write!(f, "{n}"),
            CardId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for CardId {
    fn from(value: i64) -> Self {
        CardId::Number(value)
    }
}

impl From<i32> for CardId {
    fn from(value: i32) -> Self {
        CardId::Number(i64::from(value))
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        CardId::Text(value.to_string())
    }
}

/// A player's card. The grid shape is fixed once the card is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub card_id: CardId,
    #[serde(rename = "card")]
    pub grid: Vec<Vec<Cell>>,
}

impl Card {
    pub fn new(card_id: impl Into<CardId>, grid: Vec<Vec<Cell>>) -> Self {
        Self {
            card_id: card_id.into(),
            grid,
        }
    }

    /// Build an uncrossed card from plain numbers, row by row.
    pub fn from_numbers(card_id: impl Into<CardId>, rows: &[&[&str]]) -> Self {
        let grid = rows
            .iter()
            .map(|row| row.iter().map(|n| Cell::new(n)).collect())
            .collect();
        Self::new(card_id, grid)
    }

    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    pub fn columns(&self) -> usize {
        self.grid.first().map_or(0, Vec::len)
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid.iter().flatten()
    }

    pub fn playable_cells(&self) -> usize {
        self.cells().filter(|cell| cell.is_playable()).count()
    }

    pub fn crossed_cells(&self) -> usize {
        self.cells()
            .filter(|cell| cell.is_playable() && cell.crossed_out)
            .count()
    }

    /// True when every playable cell is crossed out.
    /// A card without any playable cell is never complete.
    pub fn is_complete(&self) -> bool {
        let playable = self.playable_cells();
        playable > 0 && self.crossed_cells() == playable
    }
}
