//! Build intents describing one requested operation across many cells.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CellCoord, FloorType, FurnitureType, StructureType};

/// Layer of cell content targeted by a build intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildKind {
    /// Ground covering layer.
    Floor,
    /// Wall-like structure layer.
    Wall,
    /// Interactive furniture layer.
    Furniture,
}

/// Operation requested by a build intent.
///
/// Replacement is never requested directly; the builder derives it when a
/// placement lands on a cell whose layer is already occupied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildOperation {
    /// Add content to the targeted layer.
    Place,
    /// Clear the targeted layer.
    Remove,
}

/// Concrete action applied to every cell of an intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildAction {
    /// Lay the given floor, replacing a different floor if one exists.
    PlaceFloor(FloorType),
    /// Lift the floor.
    RemoveFloor,
    /// Raise the given structure, replacing a different structure if one exists.
    PlaceWall(StructureType),
    /// Tear down the structure.
    RemoveWall,
    /// Install the given furniture, replacing different furniture if present.
    PlaceFurniture(FurnitureType),
    /// Remove the furniture.
    RemoveFurniture,
}

impl BuildAction {
    /// Layer targeted by the action.
    #[must_use]
    pub const fn kind(self) -> BuildKind {
        match self {
            Self::PlaceFloor(_) | Self::RemoveFloor => BuildKind::Floor,
            Self::PlaceWall(_) | Self::RemoveWall => BuildKind::Wall,
            Self::PlaceFurniture(_) | Self::RemoveFurniture => BuildKind::Furniture,
        }
    }

    /// Operation performed by the action.
    #[must_use]
    pub const fn operation(self) -> BuildOperation {
        match self {
            Self::PlaceFloor(_) | Self::PlaceWall(_) | Self::PlaceFurniture(_) => {
                BuildOperation::Place
            }
            Self::RemoveFloor | Self::RemoveWall | Self::RemoveFurniture => BuildOperation::Remove,
        }
    }
}

/// Reasons a build intent may be rejected at construction time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum IntentError {
    /// The intent did not name any target cell.
    #[error("build intent must target at least one cell")]
    NoCells,
    /// The same coordinate appeared more than once.
    #[error("build intent targets {0} more than once")]
    DuplicateCell(CellCoord),
}

/// Immutable request to apply one action to an ordered list of cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawIntent")]
pub struct BuildIntent {
    action: BuildAction,
    cells: Vec<CellCoord>,
}

impl BuildIntent {
    /// Creates an intent after checking that the target list is non-empty and
    /// free of duplicates.
    pub fn new<I>(action: BuildAction, cells: I) -> Result<Self, IntentError>
    where
        I: IntoIterator<Item = CellCoord>,
    {
        let cells: Vec<CellCoord> = cells.into_iter().collect();
        if cells.is_empty() {
            return Err(IntentError::NoCells);
        }

        let mut seen = HashSet::with_capacity(cells.len());
        if let Some(duplicate) = cells.iter().find(|cell| !seen.insert(**cell)) {
            return Err(IntentError::DuplicateCell(*duplicate));
        }

        Ok(Self { action, cells })
    }

    /// Requests the given floor on every target cell.
    pub fn place_floor<I>(floor: FloorType, cells: I) -> Result<Self, IntentError>
    where
        I: IntoIterator<Item = CellCoord>,
    {
        Self::new(BuildAction::PlaceFloor(floor), cells)
    }

    /// Requests floor removal on every target cell.
    pub fn remove_floor<I>(cells: I) -> Result<Self, IntentError>
    where
        I: IntoIterator<Item = CellCoord>,
    {
        Self::new(BuildAction::RemoveFloor, cells)
    }

    /// Requests the given structure on every target cell.
    pub fn place_wall<I>(structure: StructureType, cells: I) -> Result<Self, IntentError>
    where
        I: IntoIterator<Item = CellCoord>,
    {
        Self::new(BuildAction::PlaceWall(structure), cells)
    }

    /// Requests structure removal on every target cell.
    pub fn remove_wall<I>(cells: I) -> Result<Self, IntentError>
    where
        I: IntoIterator<Item = CellCoord>,
    {
        Self::new(BuildAction::RemoveWall, cells)
    }

    /// Requests the given furniture on every target cell.
    pub fn place_furniture<I>(furniture: FurnitureType, cells: I) -> Result<Self, IntentError>
    where
        I: IntoIterator<Item = CellCoord>,
    {
        Self::new(BuildAction::PlaceFurniture(furniture), cells)
    }

    /// Requests furniture removal on every target cell.
    pub fn remove_furniture<I>(cells: I) -> Result<Self, IntentError>
    where
        I: IntoIterator<Item = CellCoord>,
    {
        Self::new(BuildAction::RemoveFurniture, cells)
    }

    /// Action applied to each target cell.
    #[must_use]
    pub const fn action(&self) -> BuildAction {
        self.action
    }

    /// Layer targeted by the intent.
    #[must_use]
    pub const fn kind(&self) -> BuildKind {
        self.action.kind()
    }

    /// Operation requested by the intent.
    #[must_use]
    pub const fn operation(&self) -> BuildOperation {
        self.action.operation()
    }

    /// Target cells in the order they will be processed.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }
}

#[derive(Deserialize)]
struct RawIntent {
    action: BuildAction,
    cells: Vec<CellCoord>,
}

impl TryFrom<RawIntent> for BuildIntent {
    type Error = IntentError;

    fn try_from(raw: RawIntent) -> Result<Self, Self::Error> {
        Self::new(raw.action, raw.cells)
    }
}
