#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Builder system that evaluates build intents against the map grid.
//!
//! The builder holds no state between calls: every coordinate of an intent is
//! validated against the grid's current contents, committed when valid, and
//! reported through an [`OperationResult`]. Coordinates are independent, so a
//! refused cell inside a drag rectangle never stops its neighbours from
//! building.

use floorplan_core::{
    BuildAction, BuildIntent, BuildKind, BuildOperation, BuildResult, CellCoord, FailureReason,
    OperationResult, Outcome,
};
use floorplan_world::{Cell, CellCheck, Grid, Validation, Verdict};

/// Extension point invoked right after a coordinate's mutation committed.
///
/// Cost deduction and refunds belong here; the builder calls the hook before
/// moving on to the next coordinate.
pub trait CommitHook {
    /// Observes a successful `Placed`, `Replaced` or `Removed` result.
    fn committed(&mut self, action: BuildAction, result: &OperationResult);
}

/// Hook that ignores every commit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoCommitHook;

impl CommitHook for NoCommitHook {
    fn committed(&mut self, _action: BuildAction, _result: &OperationResult) {}
}

/// Read-only evaluation of an intent against the current grid.
///
/// Carries the results applying the intent would produce right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildPreview {
    result: BuildResult,
}

impl BuildPreview {
    /// Predicted per-coordinate results, in intent order.
    #[must_use]
    pub fn results(&self) -> &[OperationResult] {
        self.result.results()
    }

    /// Coordinates that would change if the intent were applied.
    #[must_use]
    pub fn placeable_cells(&self) -> Vec<CellCoord> {
        self.result
            .results()
            .iter()
            .filter(|result| result.is_success())
            .filter_map(OperationResult::cell)
            .collect()
    }

    /// Reports whether every coordinate would change.
    #[must_use]
    pub fn is_fully_placeable(&self) -> bool {
        self.result.is_complete_success()
    }

    /// Consumes the preview, yielding the predicted build result.
    #[must_use]
    pub fn into_result(self) -> BuildResult {
        self.result
    }
}

/// Orchestrates build intents against a [`Grid`] borrowed for each call.
#[derive(Debug, Default)]
pub struct BuildManager<H = NoCommitHook> {
    hook: H,
}

impl BuildManager {
    /// Creates a builder without an economy hook.
    #[must_use]
    pub const fn new() -> Self {
        Self { hook: NoCommitHook }
    }
}

impl<H: CommitHook> BuildManager<H> {
    /// Creates a builder that reports every successful commit to `hook`.
    #[must_use]
    pub const fn with_hook(hook: H) -> Self {
        Self { hook }
    }

    /// Hook receiving commit notifications.
    #[must_use]
    pub const fn hook(&self) -> &H {
        &self.hook
    }

    /// Consumes the builder, yielding its hook.
    #[must_use]
    pub fn into_hook(self) -> H {
        self.hook
    }

    /// Applies the intent to every target coordinate in order.
    ///
    /// The returned result holds exactly one entry per target coordinate, in
    /// the order the intent lists them.
    pub fn apply_build_operations(&mut self, grid: &mut Grid, intent: &BuildIntent) -> BuildResult {
        let action = intent.action();
        let plan = Plan::for_action(action);
        let mut results = Vec::with_capacity(intent.cells().len());

        for &coord in intent.cells() {
            let result = apply_at(grid, coord, &plan);
            log::debug!(
                "{action:?} at {coord}: {:?} ({:?})",
                result.outcome(),
                result.reason()
            );
            if result.is_success() {
                self.hook.committed(action, &result);
            }
            results.push(result);
        }

        BuildResult::new(intent.clone(), results)
    }

    /// Evaluates the intent without mutating the grid or notifying the hook.
    ///
    /// Cheap enough to run every frame while the player drags a selection.
    #[must_use]
    pub fn preview_build_operations(&self, grid: &Grid, intent: &BuildIntent) -> BuildPreview {
        let plan = Plan::for_action(intent.action());
        let results = intent
            .cells()
            .iter()
            .map(|&coord| match grid.get_cell(coord) {
                Some(cell) => {
                    let validation = plan.resolve(cell);
                    if validation.is_valid() {
                        OperationResult::success(coord, committed_outcome(validation.check()))
                    } else {
                        translate(&validation)
                    }
                }
                None if plan.creates_cell => OperationResult::success(coord, Outcome::Placed),
                None => plan.absent(coord),
            })
            .collect();

        BuildPreview {
            result: BuildResult::new(intent.clone(), results),
        }
    }
}

/// Checks a single action runs against one cell.
#[derive(Clone, Copy, Debug)]
struct Plan {
    operation: BuildOperation,
    direct: CellCheck,
    fallback: Option<CellCheck>,
    creates_cell: bool,
}

impl Plan {
    fn for_action(action: BuildAction) -> Self {
        match action.kind() {
            BuildKind::Floor => Self::floor(action),
            BuildKind::Wall => Self::wall(action),
            BuildKind::Furniture => Self::furniture(action),
        }
    }

    fn floor(action: BuildAction) -> Self {
        match action {
            BuildAction::PlaceFloor(floor) => Self {
                operation: BuildOperation::Place,
                direct: CellCheck::PlaceFloor(floor),
                fallback: Some(CellCheck::ReplaceFloor(floor)),
                creates_cell: true,
            },
            _ => Self::removal(CellCheck::RemoveFloor),
        }
    }

    fn wall(action: BuildAction) -> Self {
        match action {
            BuildAction::PlaceWall(structure) => Self::placement(
                CellCheck::PlaceStructure(structure),
                CellCheck::ReplaceStructure(structure),
            ),
            _ => Self::removal(CellCheck::RemoveStructure),
        }
    }

    fn furniture(action: BuildAction) -> Self {
        match action {
            BuildAction::PlaceFurniture(furniture) => Self::placement(
                CellCheck::PlaceFurniture(furniture),
                CellCheck::ReplaceFurniture(furniture),
            ),
            _ => Self::removal(CellCheck::RemoveFurniture),
        }
    }

    const fn placement(direct: CellCheck, fallback: CellCheck) -> Self {
        Self {
            operation: BuildOperation::Place,
            direct,
            fallback: Some(fallback),
            creates_cell: false,
        }
    }

    const fn removal(direct: CellCheck) -> Self {
        Self {
            operation: BuildOperation::Remove,
            direct,
            fallback: None,
            creates_cell: false,
        }
    }

    /// Runs the direct check, upgrading a blocked placement to a replacement.
    fn resolve(&self, cell: &Cell) -> Validation {
        let direct = cell.validate(self.direct);
        match (direct.verdict(), self.fallback) {
            (Verdict::NoOp, Some(fallback)) => cell.validate(fallback),
            _ => direct,
        }
    }

    /// Result reported when no cell exists at the coordinate.
    fn absent(&self, coord: CellCoord) -> OperationResult {
        match self.operation {
            BuildOperation::Place => OperationResult::failed(coord, FailureReason::NoFloor),
            BuildOperation::Remove => OperationResult::skipped(coord, FailureReason::NoCell),
        }
    }
}

fn apply_at(grid: &mut Grid, coord: CellCoord, plan: &Plan) -> OperationResult {
    let cell = if plan.creates_cell {
        Some(grid.get_or_create_cell(coord))
    } else {
        grid.get_cell_mut(coord)
    };
    let Some(cell) = cell else {
        return plan.absent(coord);
    };

    let validation = plan.resolve(cell);
    let result = if validation.is_valid() {
        match cell.commit(&validation) {
            Ok(()) => OperationResult::success(coord, committed_outcome(validation.check())),
            Err(error) => {
                log::error!("commit of a fresh validation failed at {coord}: {error}");
                OperationResult::failed(coord, FailureReason::InternalError)
            }
        }
    } else {
        translate(&validation)
    };

    if cell.is_empty() {
        if !grid.try_remove_cell(coord) {
            log::error!("empty cell at {coord} could not be released from the grid");
        }
    } else if validation.check() == CellCheck::RemoveFloor && result.is_success() {
        log::error!("cell at {coord} still holds content after its floor was removed");
    }

    result
}

fn committed_outcome(check: CellCheck) -> Outcome {
    match check {
        CellCheck::PlaceFloor(_) | CellCheck::PlaceStructure(_) | CellCheck::PlaceFurniture(_) => {
            Outcome::Placed
        }
        CellCheck::ReplaceFloor(_)
        | CellCheck::ReplaceStructure(_)
        | CellCheck::ReplaceFurniture(_) => Outcome::Replaced,
        CellCheck::RemoveFloor | CellCheck::RemoveStructure | CellCheck::RemoveFurniture => {
            Outcome::Removed
        }
    }
}

/// Maps a refused cell-level validation onto the build-level vocabulary.
fn translate(validation: &Validation) -> OperationResult {
    let coord = validation.cell();
    match validation.verdict() {
        Verdict::NoOp => OperationResult::skipped(coord, validation.reason()),
        Verdict::Invalid => OperationResult::failed(coord, validation.reason()),
        Verdict::Valid => OperationResult::failed(coord, FailureReason::InternalError),
    }
}
