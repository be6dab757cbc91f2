//! Build plans loaded from TOML files.

use floorplan_core::{
    BuildAction, BuildIntent, CellCoord, CellRect, FloorType, FurnitureType, IntentError,
    StructureType,
};
use serde::Deserialize;
use thiserror::Error;

/// Ordered list of intents read from a plan file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct BuildPlan {
    #[serde(default, rename = "intent")]
    intents: Vec<PlanIntent>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanIntent {
    action: PlanAction,
    floor: Option<FloorType>,
    structure: Option<StructureType>,
    furniture: Option<FurnitureType>,
    #[serde(default)]
    cells: Vec<CellCoord>,
    rect: Option<PlanRect>,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum PlanAction {
    PlaceFloor,
    RemoveFloor,
    PlaceWall,
    RemoveWall,
    PlaceFurniture,
    RemoveFurniture,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanRect {
    from: CellCoord,
    to: CellCoord,
}

/// Reasons a parsed plan cannot be turned into build intents.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum PlanError {
    /// The plan did not list any intent.
    #[error("build plan does not contain any [[intent]] entry")]
    Empty,
    /// A placement omitted the content it should place.
    #[error("intent #{index}: `{action}` requires a `{key}` value")]
    MissingContent {
        index: usize,
        action: &'static str,
        key: &'static str,
    },
    /// The targets failed intent validation.
    #[error("intent #{index}: {source}")]
    Intent {
        index: usize,
        #[source]
        source: IntentError,
    },
}

impl BuildPlan {
    /// Parses a plan from TOML text.
    pub(crate) fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Validates every entry, yielding intents in file order.
    ///
    /// Entries are numbered from one in error messages.
    pub(crate) fn into_intents(self) -> Result<Vec<BuildIntent>, PlanError> {
        if self.intents.is_empty() {
            return Err(PlanError::Empty);
        }

        self.intents
            .into_iter()
            .enumerate()
            .map(|(offset, entry)| entry.into_intent(offset + 1))
            .collect()
    }
}

impl PlanIntent {
    fn into_intent(self, index: usize) -> Result<BuildIntent, PlanError> {
        let missing = |action: &'static str, key: &'static str| PlanError::MissingContent {
            index,
            action,
            key,
        };

        let action = match self.action {
            PlanAction::PlaceFloor => BuildAction::PlaceFloor(
                self.floor.ok_or_else(|| missing("place_floor", "floor"))?,
            ),
            PlanAction::RemoveFloor => BuildAction::RemoveFloor,
            PlanAction::PlaceWall => BuildAction::PlaceWall(
                self.structure
                    .ok_or_else(|| missing("place_wall", "structure"))?,
            ),
            PlanAction::RemoveWall => BuildAction::RemoveWall,
            PlanAction::PlaceFurniture => BuildAction::PlaceFurniture(
                self.furniture
                    .ok_or_else(|| missing("place_furniture", "furniture"))?,
            ),
            PlanAction::RemoveFurniture => BuildAction::RemoveFurniture,
        };

        let rect_cells = self
            .rect
            .into_iter()
            .flat_map(|rect| CellRect::spanning(rect.from, rect.to).cells());
        let cells: Vec<CellCoord> = self.cells.into_iter().chain(rect_cells).collect();

        BuildIntent::new(action, cells).map_err(|source| PlanError::Intent { index, source })
    }
}
