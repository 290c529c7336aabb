//! Saved 2048 game snapshot
//!
//! The shape the game writes under the game state key. The manager itself
//! accepts any serde type; this is the typed view for Rust callers.

use serde::{Deserialize, Serialize};

/// Cell coordinates on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

/// A tile occupying a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub position: Position,
    pub value: u32,
}

/// Square board, indexed `cells[x][y]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub size: usize,
    pub cells: Vec<Vec<Option<Tile>>>,
}

impl Grid {
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![vec![None; size]; size],
        }
    }

    /// Place a tile at its own position. Out-of-range tiles are ignored.
    pub fn insert(&mut self, tile: Tile) {
        let Position { x, y } = tile.position;
        if let Some(cell) = self.cells.get_mut(x).and_then(|col| col.get_mut(y)) {
            *cell = Some(tile);
        }
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flatten().flatten()
    }

    /// Largest tile value on the board
    pub fn max_tile(&self) -> Option<u32> {
        self.tiles().map(|t| t.value).max()
    }
}

/// In-progress game as persisted between page loads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    pub grid: Grid,
    pub score: u64,
    pub over: bool,
    pub won: bool,
    /// Player chose to continue after reaching 2048
    pub keep_playing: bool,
}

impl SavedGame {
    pub fn new(size: usize) -> Self {
        Self {
            grid: Grid::empty(size),
            score: 0,
            over: false,
            won: false,
            keep_playing: false,
        }
    }

    /// Whether the game can still be resumed
    pub fn is_resumable(&self) -> bool {
        !self.over && (!self.won || self.keep_playing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_game_output() {
        let json = r#"{
            "grid": {"size": 2, "cells": [
                [null, {"position": {"x": 0, "y": 1}, "value": 2}],
                [{"position": {"x": 1, "y": 0}, "value": 4}, null]
            ]},
            "score": 4, "over": false, "won": false, "keepPlaying": false
        }"#;
        let game: SavedGame = serde_json::from_str(json).unwrap();
        assert_eq!(game.grid.size, 2);
        assert_eq!(game.grid.tiles().count(), 2);
        assert_eq!(game.grid.max_tile(), Some(4));
        assert!(game.is_resumable());
    }

    #[test]
    fn test_insert_places_tile() {
        let mut grid = Grid::empty(4);
        grid.insert(Tile {
            position: Position { x: 3, y: 2 },
            value: 8,
        });
        grid.insert(Tile {
            position: Position { x: 9, y: 0 },
            value: 16,
        });
        assert_eq!(grid.cells[3][2].map(|t| t.value), Some(8));
        assert_eq!(grid.max_tile(), Some(8));
    }

    #[test]
    fn test_resumable_states() {
        let mut game = SavedGame::new(4);
        assert_eq!(game.grid.max_tile(), None);
        game.won = true;
        assert!(!game.is_resumable());
        game.keep_playing = true;
        assert!(game.is_resumable());
        game.over = true;
        assert!(!game.is_resumable());
    }
}
