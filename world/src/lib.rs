#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative map state for Floorplan.
//!
//! The [`Grid`] owns every [`Cell`] and is the only place cells are created or
//! destroyed. Cells exist only while they hold content: the grid materialises
//! a cell the first time a placement targets its coordinate and drops it again
//! once a removal leaves it empty.

mod cell;

use std::collections::HashMap;

use floorplan_core::CellCoord;

pub use cell::{Cell, CellCheck, CommitError, Validation, Verdict};

/// Sparse coordinate-indexed container of cells.
#[derive(Debug, Default)]
pub struct Grid {
    cells: HashMap<CellCoord, Cell>,
}

impl Grid {
    /// Creates an empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the cell at `coord` without creating it.
    #[must_use]
    pub fn get_cell(&self, coord: CellCoord) -> Option<&Cell> {
        self.cells.get(&coord)
    }

    /// Looks up the cell at `coord` for mutation without creating it.
    #[must_use]
    pub fn get_cell_mut(&mut self, coord: CellCoord) -> Option<&mut Cell> {
        self.cells.get_mut(&coord)
    }

    /// Returns the cell at `coord`, inserting an empty one if none exists.
    ///
    /// This is the only way the grid grows.
    pub fn get_or_create_cell(&mut self, coord: CellCoord) -> &mut Cell {
        self.cells.entry(coord).or_insert_with(|| {
            log::trace!("materialising cell at {coord}");
            Cell::new(coord)
        })
    }

    /// Removes the cell at `coord` if it exists and is empty.
    ///
    /// Returns `false` without mutating anything otherwise.
    pub fn try_remove_cell(&mut self, coord: CellCoord) -> bool {
        let removable = self.cells.get(&coord).is_some_and(Cell::is_empty);
        if !removable {
            return false;
        }

        let _ = self.cells.remove(&coord);
        log::trace!("released empty cell at {coord}");
        true
    }

    /// Number of materialised cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Iterates the materialised cells in coordinate order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        let mut cells: Vec<&Cell> = self.cells.values().collect();
        cells.sort_by_key(|cell| cell.coord());
        cells.into_iter()
    }
}

/// Query functions that provide read-only access to the map state.
pub mod query {
    use floorplan_core::{CellCoord, FloorType, FurnitureType, StructureType};

    use super::Grid;

    /// Floor laid at `coord`, if any.
    #[must_use]
    pub fn floor_at(grid: &Grid, coord: CellCoord) -> Option<FloorType> {
        grid.get_cell(coord).and_then(|cell| cell.floor())
    }

    /// Structure standing at `coord`, if any.
    #[must_use]
    pub fn structure_at(grid: &Grid, coord: CellCoord) -> Option<StructureType> {
        grid.get_cell(coord).and_then(|cell| cell.structure())
    }

    /// Furniture standing at `coord`, if any.
    #[must_use]
    pub fn furniture_at(grid: &Grid, coord: CellCoord) -> Option<FurnitureType> {
        grid.get_cell(coord).and_then(|cell| cell.furniture())
    }

    /// Coordinates whose cell carries a structure or furniture, in coordinate order.
    #[must_use]
    pub fn occupied_cells(grid: &Grid) -> Vec<CellCoord> {
        grid.cells()
            .filter(|cell| cell.has_structure() || cell.has_furniture())
            .map(|cell| cell.coord())
            .collect()
    }
}
