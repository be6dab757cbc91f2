//! Outcome values reported back to the callers of the builder.

use serde::{Deserialize, Serialize};

use crate::{BuildIntent, CellCoord};

/// Build-level outcome of processing a single coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// New content was added to an unoccupied layer.
    Placed,
    /// Existing content was swapped for a different type.
    Replaced,
    /// Existing content was cleared.
    Removed,
    /// The requested state already held; nothing changed.
    Skipped,
    /// The request could not be honoured; nothing changed.
    Failed,
}

/// Diagnostic detail accompanying an [`Outcome`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureReason {
    /// The operation succeeded.
    #[default]
    None,
    /// Existing content on the cell prevents the operation.
    Blocked,
    /// The cell lacks the floor the operation depends on.
    NoFloor,
    /// The cell has no structure to operate on.
    NoStructure,
    /// The cell has no furniture to operate on.
    NoFurniture,
    /// The cell already holds content of the requested type.
    SameType,
    /// No cell exists at the coordinate.
    NoCell,
    /// The map reached an inconsistent state.
    InternalError,
}

/// What the visual layer should do for a processed coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisualChange {
    /// Spawn a representation for newly placed content.
    Spawn,
    /// Swap the existing representation for the replacement.
    Respawn,
    /// Despawn the representation of removed content.
    Despawn,
    /// Leave visuals alone and surface the reason to the player.
    Report,
}

/// Immutable outcome of processing one coordinate of a build intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationResult {
    cell: Option<CellCoord>,
    outcome: Outcome,
    reason: FailureReason,
}

impl OperationResult {
    /// Creates a result with explicit field values.
    #[must_use]
    pub const fn new(cell: Option<CellCoord>, outcome: Outcome, reason: FailureReason) -> Self {
        Self {
            cell,
            outcome,
            reason,
        }
    }

    /// Creates a successful result for the provided cell.
    #[must_use]
    pub const fn success(cell: CellCoord, outcome: Outcome) -> Self {
        Self::new(Some(cell), outcome, FailureReason::None)
    }

    /// Creates a skipped result explaining why nothing changed.
    #[must_use]
    pub const fn skipped(cell: CellCoord, reason: FailureReason) -> Self {
        Self::new(Some(cell), Outcome::Skipped, reason)
    }

    /// Creates a failed result explaining why the request was refused.
    #[must_use]
    pub const fn failed(cell: CellCoord, reason: FailureReason) -> Self {
        Self::new(Some(cell), Outcome::Failed, reason)
    }

    /// Coordinate the result refers to, if known.
    #[must_use]
    pub const fn cell(&self) -> Option<CellCoord> {
        self.cell
    }

    /// Outcome reported for the coordinate.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Diagnostic reason attached to the outcome.
    #[must_use]
    pub const fn reason(&self) -> FailureReason {
        self.reason
    }

    /// Reports whether the map was mutated for this coordinate.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(
            self.outcome,
            Outcome::Placed | Outcome::Replaced | Outcome::Removed
        )
    }

    /// Maps the outcome onto the action expected from the visual layer.
    #[must_use]
    pub const fn visual_change(&self) -> VisualChange {
        match self.outcome {
            Outcome::Placed => VisualChange::Spawn,
            Outcome::Replaced => VisualChange::Respawn,
            Outcome::Removed => VisualChange::Despawn,
            Outcome::Skipped | Outcome::Failed => VisualChange::Report,
        }
    }
}

/// Per-outcome tally of a [`BuildResult`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BuildSummary {
    /// Number of coordinates that received new content.
    pub placed: usize,
    /// Number of coordinates whose content was replaced.
    pub replaced: usize,
    /// Number of coordinates whose content was removed.
    pub removed: usize,
    /// Number of coordinates left untouched because the state already held.
    pub skipped: usize,
    /// Number of coordinates where the request was refused.
    pub failed: usize,
}

impl BuildSummary {
    /// Number of coordinates where the map changed.
    #[must_use]
    pub const fn changed(&self) -> usize {
        self.placed + self.replaced + self.removed
    }

    /// Total number of coordinates tallied.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.changed() + self.skipped + self.failed
    }
}

/// Aggregated, ordered outcome of executing a [`BuildIntent`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildResult {
    intent: BuildIntent,
    results: Vec<OperationResult>,
}

impl BuildResult {
    /// Pairs an intent with its per-coordinate results.
    ///
    /// Results are expected in the same order as `intent.cells()`.
    #[must_use]
    pub fn new(intent: BuildIntent, results: Vec<OperationResult>) -> Self {
        Self { intent, results }
    }

    /// Intent that produced the results.
    #[must_use]
    pub const fn intent(&self) -> &BuildIntent {
        &self.intent
    }

    /// One result per target cell, in intent order.
    #[must_use]
    pub fn results(&self) -> &[OperationResult] {
        &self.results
    }

    /// Results that did not change the map.
    pub fn failures(&self) -> impl Iterator<Item = &OperationResult> {
        self.results.iter().filter(|result| !result.is_success())
    }

    /// Reports whether every coordinate changed the map.
    #[must_use]
    pub fn is_complete_success(&self) -> bool {
        self.results.iter().all(OperationResult::is_success)
    }

    /// Counts results per outcome.
    #[must_use]
    pub fn summary(&self) -> BuildSummary {
        self.results
            .iter()
            .fold(BuildSummary::default(), |mut summary, result| {
                match result.outcome() {
                    Outcome::Placed => summary.placed += 1,
                    Outcome::Replaced => summary.replaced += 1,
                    Outcome::Removed => summary.removed += 1,
                    Outcome::Skipped => summary.skipped += 1,
                    Outcome::Failed => summary.failed += 1,
                }
                summary
            })
    }
}
