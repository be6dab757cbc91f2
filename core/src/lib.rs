#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Floorplan build engine.
//!
//! This crate defines the value types that connect adapters, the
//! authoritative map grid, and the builder system. Adapters describe desired
//! mutations as [`BuildIntent`] values, the builder evaluates them cell by
//! cell against the grid, and returns a [`BuildResult`] whose per-coordinate
//! [`OperationResult`] entries tell the visual layer what to spawn, despawn
//! or report.

mod intent;
mod result;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use intent::{BuildAction, BuildIntent, BuildKind, BuildOperation, IntentError};
pub use result::{
    BuildResult, BuildSummary, FailureReason, OperationResult, Outcome, VisualChange,
};

/// Location of a single map cell expressed as signed x, y and z components.
///
/// The map is conceptually infinite, so every integer triple is a legal
/// coordinate.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "[i32; 3]", into = "[i32; 3]")]
pub struct CellCoord {
    x: i32,
    y: i32,
    z: i32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Horizontal component of the coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Depth component of the coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Layer component of the coordinate.
    #[must_use]
    pub const fn z(&self) -> i32 {
        self.z
    }
}

impl From<[i32; 3]> for CellCoord {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<CellCoord> for [i32; 3] {
    fn from(coord: CellCoord) -> Self {
        [coord.x, coord.y, coord.z]
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Inclusive axis-aligned rectangle of cells on a single layer.
///
/// Drag gestures produce one of these from the cell where the drag started
/// and the cell under the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRect {
    min: CellCoord,
    max: CellCoord,
}

impl CellRect {
    /// Constructs the rectangle spanned by two corners given in any order.
    ///
    /// The layer of `first` is used for every cell in the rectangle.
    #[must_use]
    pub fn spanning(first: CellCoord, second: CellCoord) -> Self {
        let z = first.z();
        Self {
            min: CellCoord::new(first.x().min(second.x()), first.y().min(second.y()), z),
            max: CellCoord::new(first.x().max(second.x()), first.y().max(second.y()), z),
        }
    }

    /// Corner with the smallest x and y components.
    #[must_use]
    pub const fn min(&self) -> CellCoord {
        self.min
    }

    /// Corner with the largest x and y components.
    #[must_use]
    pub const fn max(&self) -> CellCoord {
        self.max
    }

    /// Number of cells along the x axis.
    #[must_use]
    pub fn width(&self) -> u64 {
        u64::from(self.max.x().abs_diff(self.min.x())) + 1
    }

    /// Number of cells along the y axis.
    #[must_use]
    pub fn height(&self) -> u64 {
        u64::from(self.max.y().abs_diff(self.min.y())) + 1
    }

    /// Total number of cells covered by the rectangle.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.width().saturating_mul(self.height())
    }

    /// A rectangle always covers at least its corner cell.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterates every covered coordinate in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let Self { min, max } = *self;
        (min.y()..=max.y())
            .flat_map(move |y| (min.x()..=max.x()).map(move |x| CellCoord::new(x, y, min.z())))
    }
}

impl IntoIterator for CellRect {
    type Item = CellCoord;
    type IntoIter = Box<dyn Iterator<Item = CellCoord>>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.cells())
    }
}

/// Ground coverings that can be laid on a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloorType {
    /// Riveted metal plating.
    Metal,
    /// Wooden planks.
    Wood,
    /// Soft carpet.
    Carpet,
    /// Ceramic tiles.
    Tile,
}

/// Vertical structures that can stand on a floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureType {
    /// Solid wall segment.
    Wall,
    /// Wall segment with a door.
    Door,
    /// Wall segment with a window.
    Window,
}

/// Interactive objects that can stand on a floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FurnitureType {
    /// Single-seat slot machine.
    SlotMachine,
    /// Poker table.
    PokerTable,
    /// Blackjack table.
    BlackjackTable,
    /// Drinks bar counter.
    Bar,
}

impl fmt::Display for FloorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Metal => "metal",
            Self::Wood => "wood",
            Self::Carpet => "carpet",
            Self::Tile => "tile",
        };
        f.write_str(name)
    }
}

impl fmt::Display for StructureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Wall => "wall",
            Self::Door => "door",
            Self::Window => "window",
        };
        f.write_str(name)
    }
}

impl fmt::Display for FurnitureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SlotMachine => "slot machine",
            Self::PokerTable => "poker table",
            Self::BlackjackTable => "blackjack table",
            Self::Bar => "bar",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{hash_map::DefaultHasher, HashMap};
    use std::hash::{Hash, Hasher};

    use super::{CellCoord, CellRect};

    fn hash_of(coord: CellCoord) -> u64 {
        let mut hasher = DefaultHasher::new();
        coord.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equal_components_produce_interchangeable_keys() {
        let first = CellCoord::new(3, -4, 1);
        let second = CellCoord::new(3, -4, 1);
        assert_eq!(first, second);
        assert_eq!(hash_of(first), hash_of(second));

        let mut map = HashMap::new();
        let _ = map.insert(first, "slot machine");
        assert_eq!(map.get(&second), Some(&"slot machine"));
    }

    #[test]
    fn coordinates_differing_in_one_component_are_distinct() {
        let origin = CellCoord::new(0, 0, 0);
        assert_ne!(origin, CellCoord::new(0, 0, 1));
        assert_ne!(origin, CellCoord::new(0, 1, 0));
        assert_ne!(origin, CellCoord::new(1, 0, 0));
    }

    #[test]
    fn extreme_components_are_legal() {
        let coord = CellCoord::new(i32::MIN, i32::MAX, -1);
        assert_eq!(coord.x(), i32::MIN);
        assert_eq!(coord.y(), i32::MAX);
        assert_eq!(coord.to_string(), format!("({}, {}, -1)", i32::MIN, i32::MAX));
    }

    #[test]
    fn rect_normalises_corners_and_iterates_row_major() {
        let rect = CellRect::spanning(CellCoord::new(1, 1, 2), CellCoord::new(0, 0, 5));
        assert_eq!(rect.min(), CellCoord::new(0, 0, 2));
        assert_eq!(rect.max(), CellCoord::new(1, 1, 2));
        assert_eq!(rect.len(), 4);

        let cells: Vec<CellCoord> = rect.cells().collect();
        assert_eq!(
            cells,
            vec![
                CellCoord::new(0, 0, 2),
                CellCoord::new(1, 0, 2),
                CellCoord::new(0, 1, 2),
                CellCoord::new(1, 1, 2),
            ]
        );
    }

    #[test]
    fn single_cell_rect_yields_only_its_corner() {
        let corner = CellCoord::new(-3, 7, 0);
        let rect = CellRect::spanning(corner, corner);
        assert_eq!(rect.len(), 1);
        assert_eq!(rect.into_iter().collect::<Vec<_>>(), vec![corner]);
    }
}
