//! Contents of a single map coordinate and the rules guarding them.
//!
//! Every mutation is split in two phases. A `validate_*` method inspects the
//! cell without touching it and returns a [`Validation`]; only a `Valid`
//! validation produced by the same cell for the same check can be handed to
//! the matching commit method. Preview code may validate as often as it
//! likes, while the commit re-checks the current contents so a validation
//! taken against an older state cannot slip through.

use floorplan_core::{CellCoord, FailureReason, FloorType, FurnitureType, StructureType};
use thiserror::Error;

/// Cell-level verdict of a validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The check passed and the matching commit may proceed.
    Valid,
    /// The requested state already holds.
    NoOp,
    /// The cell's contents forbid the operation.
    Invalid,
}

/// Operation evaluated by a validation, including the content involved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellCheck {
    /// Lay a floor on a bare cell.
    PlaceFloor(FloorType),
    /// Swap the existing floor for a different type.
    ReplaceFloor(FloorType),
    /// Lift the floor.
    RemoveFloor,
    /// Raise a structure on a floored, unoccupied cell.
    PlaceStructure(StructureType),
    /// Swap the existing structure for a different type.
    ReplaceStructure(StructureType),
    /// Tear down the structure.
    RemoveStructure,
    /// Install furniture on a floored, unoccupied cell.
    PlaceFurniture(FurnitureType),
    /// Swap the existing furniture for a different type.
    ReplaceFurniture(FurnitureType),
    /// Remove the furniture.
    RemoveFurniture,
}

/// Result of validating a [`CellCheck`] against a cell.
///
/// Values can only be obtained from a cell's `validate_*` methods, which makes
/// a `Valid` validation proof that the check passed at the time it was taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Validation {
    cell: CellCoord,
    check: CellCheck,
    verdict: Verdict,
    reason: FailureReason,
}

impl Validation {
    const fn new(cell: CellCoord, check: CellCheck, verdict: Verdict, reason: FailureReason) -> Self {
        Self {
            cell,
            check,
            verdict,
            reason,
        }
    }

    /// Coordinate of the validated cell.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Check that was evaluated.
    #[must_use]
    pub const fn check(&self) -> CellCheck {
        self.check
    }

    /// Verdict reached by the check.
    #[must_use]
    pub const fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Reason attached to a `NoOp` or `Invalid` verdict, `None` when valid.
    #[must_use]
    pub const fn reason(&self) -> FailureReason {
        self.reason
    }

    /// Reports whether the validation permits a commit.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.verdict == Verdict::Valid
    }
}

/// Contract violations raised when committing a validation.
///
/// These indicate a caller bug; the cell is never mutated when one is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CommitError {
    /// The validation did not pass.
    #[error("cannot commit {check:?} at {cell}: validation was {verdict:?} ({reason:?})")]
    NotValid {
        /// Coordinate of the validated cell.
        cell: CellCoord,
        /// Check carried by the validation.
        check: CellCheck,
        /// Verdict carried by the validation.
        verdict: Verdict,
        /// Reason carried by the validation.
        reason: FailureReason,
    },
    /// The validation belongs to a different commit method.
    #[error("`{operation}` cannot commit a validation for {found:?}")]
    WrongCheck {
        /// Commit method that was called.
        operation: &'static str,
        /// Check carried by the validation.
        found: CellCheck,
    },
    /// The validation was taken against another cell.
    #[error("validation for {found} cannot be committed on {expected}")]
    WrongCell {
        /// Coordinate of the cell receiving the commit.
        expected: CellCoord,
        /// Coordinate recorded in the validation.
        found: CellCoord,
    },
    /// The cell changed after the validation was taken.
    #[error("validation for {check:?} at {cell} is stale: now {reason:?}")]
    Stale {
        /// Coordinate of the validated cell.
        cell: CellCoord,
        /// Check carried by the validation.
        check: CellCheck,
        /// Reason the check fails against the current contents.
        reason: FailureReason,
    },
}

/// Floor, structure and furniture held by one coordinate.
///
/// Structures and furniture stand on a floor and never share a cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    coord: CellCoord,
    floor: Option<FloorType>,
    structure: Option<StructureType>,
    furniture: Option<FurnitureType>,
}

impl Cell {
    pub(crate) const fn new(coord: CellCoord) -> Self {
        Self {
            coord,
            floor: None,
            structure: None,
            furniture: None,
        }
    }

    /// Coordinate owning the cell.
    #[must_use]
    pub const fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Floor laid on the cell.
    #[must_use]
    pub const fn floor(&self) -> Option<FloorType> {
        self.floor
    }

    /// Structure standing on the cell.
    #[must_use]
    pub const fn structure(&self) -> Option<StructureType> {
        self.structure
    }

    /// Furniture standing on the cell.
    #[must_use]
    pub const fn furniture(&self) -> Option<FurnitureType> {
        self.furniture
    }

    /// Reports whether a floor is laid.
    #[must_use]
    pub const fn has_floor(&self) -> bool {
        self.floor.is_some()
    }

    /// Reports whether a structure stands on the cell.
    #[must_use]
    pub const fn has_structure(&self) -> bool {
        self.structure.is_some()
    }

    /// Reports whether furniture stands on the cell.
    #[must_use]
    pub const fn has_furniture(&self) -> bool {
        self.furniture.is_some()
    }

    /// Reports whether the cell holds nothing at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.has_floor() && !self.has_structure() && !self.has_furniture()
    }

    const fn is_occupied(&self) -> bool {
        self.has_structure() || self.has_furniture()
    }

    /// Evaluates the check against the current contents without mutating them.
    #[must_use]
    pub fn validate(&self, check: CellCheck) -> Validation {
        let (verdict, reason) = match check {
            CellCheck::PlaceFloor(_) => {
                if self.has_floor() {
                    (Verdict::NoOp, FailureReason::Blocked)
                } else {
                    (Verdict::Valid, FailureReason::None)
                }
            }
            CellCheck::ReplaceFloor(floor) => match self.floor {
                None => (Verdict::Invalid, FailureReason::NoFloor),
                Some(_) if self.is_occupied() => (Verdict::Invalid, FailureReason::Blocked),
                Some(current) if current == floor => (Verdict::NoOp, FailureReason::SameType),
                Some(_) => (Verdict::Valid, FailureReason::None),
            },
            CellCheck::RemoveFloor => {
                if !self.has_floor() {
                    (Verdict::NoOp, FailureReason::NoFloor)
                } else if self.is_occupied() {
                    (Verdict::Invalid, FailureReason::Blocked)
                } else {
                    (Verdict::Valid, FailureReason::None)
                }
            }
            CellCheck::PlaceStructure(_) => {
                if !self.has_floor() {
                    (Verdict::Invalid, FailureReason::NoFloor)
                } else if self.has_structure() {
                    (Verdict::NoOp, FailureReason::Blocked)
                } else if self.has_furniture() {
                    (Verdict::Invalid, FailureReason::Blocked)
                } else {
                    (Verdict::Valid, FailureReason::None)
                }
            }
            CellCheck::ReplaceStructure(structure) => match self.structure {
                None => (Verdict::Invalid, FailureReason::NoStructure),
                Some(current) if current == structure => (Verdict::NoOp, FailureReason::SameType),
                Some(_) => (Verdict::Valid, FailureReason::None),
            },
            CellCheck::RemoveStructure => {
                if self.has_structure() {
                    (Verdict::Valid, FailureReason::None)
                } else {
                    (Verdict::NoOp, FailureReason::NoStructure)
                }
            }
            CellCheck::PlaceFurniture(_) => {
                if !self.has_floor() {
                    (Verdict::Invalid, FailureReason::NoFloor)
                } else if self.has_furniture() {
                    (Verdict::NoOp, FailureReason::Blocked)
                } else if self.has_structure() {
                    (Verdict::Invalid, FailureReason::Blocked)
                } else {
                    (Verdict::Valid, FailureReason::None)
                }
            }
            CellCheck::ReplaceFurniture(furniture) => match self.furniture {
                None => (Verdict::Invalid, FailureReason::NoFurniture),
                Some(current) if current == furniture => (Verdict::NoOp, FailureReason::SameType),
                Some(_) => (Verdict::Valid, FailureReason::None),
            },
            CellCheck::RemoveFurniture => {
                if self.has_furniture() {
                    (Verdict::Valid, FailureReason::None)
                } else {
                    (Verdict::NoOp, FailureReason::NoFurniture)
                }
            }
        };

        Validation::new(self.coord, check, verdict, reason)
    }

    /// Checks whether a floor can be laid; any existing floor yields `NoOp`.
    #[must_use]
    pub fn validate_place_floor(&self, floor: FloorType) -> Validation {
        self.validate(CellCheck::PlaceFloor(floor))
    }

    /// Checks whether the existing floor can be swapped for `floor`.
    ///
    /// A floor carrying a structure or furniture cannot be swapped.
    #[must_use]
    pub fn validate_replace_floor(&self, floor: FloorType) -> Validation {
        self.validate(CellCheck::ReplaceFloor(floor))
    }

    /// Checks whether the floor can be lifted.
    #[must_use]
    pub fn validate_remove_floor(&self) -> Validation {
        self.validate(CellCheck::RemoveFloor)
    }

    /// Checks whether a structure can be raised; any existing structure yields `NoOp`.
    #[must_use]
    pub fn validate_place_structure(&self, structure: StructureType) -> Validation {
        self.validate(CellCheck::PlaceStructure(structure))
    }

    /// Checks whether the existing structure can be swapped for `structure`.
    #[must_use]
    pub fn validate_replace_structure(&self, structure: StructureType) -> Validation {
        self.validate(CellCheck::ReplaceStructure(structure))
    }

    /// Checks whether the structure can be torn down.
    #[must_use]
    pub fn validate_remove_structure(&self) -> Validation {
        self.validate(CellCheck::RemoveStructure)
    }

    /// Checks whether furniture can be installed; existing furniture yields `NoOp`.
    #[must_use]
    pub fn validate_place_furniture(&self, furniture: FurnitureType) -> Validation {
        self.validate(CellCheck::PlaceFurniture(furniture))
    }

    /// Checks whether the existing furniture can be swapped for `furniture`.
    #[must_use]
    pub fn validate_replace_furniture(&self, furniture: FurnitureType) -> Validation {
        self.validate(CellCheck::ReplaceFurniture(furniture))
    }

    /// Checks whether the furniture can be removed.
    #[must_use]
    pub fn validate_remove_furniture(&self) -> Validation {
        self.validate(CellCheck::RemoveFurniture)
    }

    /// Applies the mutation described by a `Valid` validation of this cell.
    ///
    /// The check is re-evaluated against the current contents first, so a
    /// validation taken before an intervening mutation is refused as stale.
    pub fn commit(&mut self, validation: &Validation) -> Result<(), CommitError> {
        if validation.cell != self.coord {
            return Err(CommitError::WrongCell {
                expected: self.coord,
                found: validation.cell,
            });
        }

        if !validation.is_valid() {
            return Err(CommitError::NotValid {
                cell: validation.cell,
                check: validation.check,
                verdict: validation.verdict,
                reason: validation.reason,
            });
        }

        let current = self.validate(validation.check);
        if !current.is_valid() {
            return Err(CommitError::Stale {
                cell: self.coord,
                check: validation.check,
                reason: current.reason,
            });
        }

        match validation.check {
            CellCheck::PlaceFloor(floor) | CellCheck::ReplaceFloor(floor) => {
                self.floor = Some(floor);
            }
            CellCheck::RemoveFloor => self.floor = None,
            CellCheck::PlaceStructure(structure) | CellCheck::ReplaceStructure(structure) => {
                self.structure = Some(structure);
            }
            CellCheck::RemoveStructure => self.structure = None,
            CellCheck::PlaceFurniture(furniture) | CellCheck::ReplaceFurniture(furniture) => {
                self.furniture = Some(furniture);
            }
            CellCheck::RemoveFurniture => self.furniture = None,
        }

        log::trace!("committed {:?} at {}", validation.check, self.coord);
        Ok(())
    }

    /// Commits a validation from [`Cell::validate_place_floor`].
    pub fn place_floor(&mut self, validation: &Validation) -> Result<(), CommitError> {
        self.commit_as("place_floor", validation, |check| {
            matches!(check, CellCheck::PlaceFloor(_))
        })
    }

    /// Commits a validation from [`Cell::validate_replace_floor`].
    pub fn replace_floor(&mut self, validation: &Validation) -> Result<(), CommitError> {
        self.commit_as("replace_floor", validation, |check| {
            matches!(check, CellCheck::ReplaceFloor(_))
        })
    }

    /// Commits a validation from [`Cell::validate_remove_floor`].
    pub fn remove_floor(&mut self, validation: &Validation) -> Result<(), CommitError> {
        self.commit_as("remove_floor", validation, |check| {
            check == CellCheck::RemoveFloor
        })
    }

    /// Commits a validation from [`Cell::validate_place_structure`].
    pub fn place_structure(&mut self, validation: &Validation) -> Result<(), CommitError> {
        self.commit_as("place_structure", validation, |check| {
            matches!(check, CellCheck::PlaceStructure(_))
        })
    }

    /// Commits a validation from [`Cell::validate_replace_structure`].
    pub fn replace_structure(&mut self, validation: &Validation) -> Result<(), CommitError> {
        self.commit_as("replace_structure", validation, |check| {
            matches!(check, CellCheck::ReplaceStructure(_))
        })
    }

    /// Commits a validation from [`Cell::validate_remove_structure`].
    pub fn remove_structure(&mut self, validation: &Validation) -> Result<(), CommitError> {
        self.commit_as("remove_structure", validation, |check| {
            check == CellCheck::RemoveStructure
        })
    }

    /// Commits a validation from [`Cell::validate_place_furniture`].
    pub fn place_furniture(&mut self, validation: &Validation) -> Result<(), CommitError> {
        self.commit_as("place_furniture", validation, |check| {
            matches!(check, CellCheck::PlaceFurniture(_))
        })
    }

    /// Commits a validation from [`Cell::validate_replace_furniture`].
    pub fn replace_furniture(&mut self, validation: &Validation) -> Result<(), CommitError> {
        self.commit_as("replace_furniture", validation, |check| {
            matches!(check, CellCheck::ReplaceFurniture(_))
        })
    }

    /// Commits a validation from [`Cell::validate_remove_furniture`].
    pub fn remove_furniture(&mut self, validation: &Validation) -> Result<(), CommitError> {
        self.commit_as("remove_furniture", validation, |check| {
            check == CellCheck::RemoveFurniture
        })
    }

    fn commit_as(
        &mut self,
        operation: &'static str,
        validation: &Validation,
        accepts: fn(CellCheck) -> bool,
    ) -> Result<(), CommitError> {
        if !accepts(validation.check) {
            return Err(CommitError::WrongCheck {
                operation,
                found: validation.check,
            });
        }
        self.commit(validation)
    }
}
