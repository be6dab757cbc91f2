use floorplan_core::{
    BuildAction, BuildIntent, CellCoord, CellRect, FailureReason, FloorType, FurnitureType,
    OperationResult, Outcome, StructureType,
};
use floorplan_system_builder::{BuildManager, CommitHook};
use floorplan_world::{query, Grid};

fn apply(manager: &mut BuildManager, grid: &mut Grid, intent: BuildIntent) -> Vec<OperationResult> {
    manager
        .apply_build_operations(grid, &intent)
        .results()
        .to_vec()
}

fn lay_floor(grid: &mut Grid, floor: FloorType, cells: &[CellCoord]) {
    let mut manager = BuildManager::new();
    let intent = BuildIntent::place_floor(floor, cells.iter().copied()).expect("floor intent");
    let result = manager.apply_build_operations(grid, &intent);
    assert!(result.is_complete_success(), "setup floor must succeed");
}

#[derive(Debug, Default)]
struct RecordingHook {
    commits: Vec<(BuildAction, OperationResult)>,
}

impl CommitHook for RecordingHook {
    fn committed(&mut self, action: BuildAction, result: &OperationResult) {
        self.commits.push((action, *result));
    }
}

#[test]
fn floor_round_trip_releases_the_cell() {
    let mut grid = Grid::new();
    let mut manager = BuildManager::new();
    let coord = CellCoord::new(1, 1, 1);
    let before = grid.cell_count();

    let placed = apply(
        &mut manager,
        &mut grid,
        BuildIntent::place_floor(FloorType::Wood, [coord]).expect("intent"),
    );
    assert_eq!(placed, vec![OperationResult::success(coord, Outcome::Placed)]);
    assert_eq!(grid.cell_count(), before + 1);

    let removed = apply(
        &mut manager,
        &mut grid,
        BuildIntent::remove_floor([coord]).expect("intent"),
    );
    assert_eq!(removed, vec![OperationResult::success(coord, Outcome::Removed)]);
    assert_eq!(grid.cell_count(), before);
    assert!(grid.get_cell(coord).is_none(), "empty cell must be released");
}

#[test]
fn one_blocked_cell_does_not_stop_the_batch() {
    let mut grid = Grid::new();
    let mut manager = BuildManager::new();
    let blocked = CellCoord::new(0, 0, 0);
    let open = CellCoord::new(1, 0, 0);

    lay_floor(&mut grid, FloorType::Metal, &[blocked]);
    let _ = apply(
        &mut manager,
        &mut grid,
        BuildIntent::place_wall(StructureType::Wall, [blocked]).expect("intent"),
    );

    let result = manager.apply_build_operations(
        &mut grid,
        &BuildIntent::remove_floor([blocked]).expect("intent"),
    );
    assert_eq!(
        result.results(),
        &[OperationResult::failed(blocked, FailureReason::Blocked)]
    );

    let results = apply(
        &mut manager,
        &mut grid,
        BuildIntent::place_furniture(FurnitureType::SlotMachine, [blocked, open])
            .expect("intent"),
    );
    assert_eq!(
        results,
        vec![
            OperationResult::failed(blocked, FailureReason::Blocked),
            OperationResult::failed(open, FailureReason::NoFloor),
        ],
        "results keep intent order",
    );

    let results = apply(
        &mut manager,
        &mut grid,
        BuildIntent::place_floor(FloorType::Metal, [blocked, open]).expect("intent"),
    );
    assert_eq!(results[0].outcome(), Outcome::Failed);
    assert_eq!(results[0].reason(), FailureReason::Blocked);
    assert_eq!(results[1], OperationResult::success(open, Outcome::Placed));
    assert_eq!(query::floor_at(&grid, open), Some(FloorType::Metal));
    assert_eq!(query::structure_at(&grid, blocked), Some(StructureType::Wall));
}

#[test]
fn floor_under_a_wall_is_blocked_while_its_neighbour_is_floored() {
    let mut grid = Grid::new();
    let mut manager = BuildManager::new();
    let walled = CellCoord::new(0, 0, 0);
    let empty = CellCoord::new(1, 0, 0);

    lay_floor(&mut grid, FloorType::Wood, &[walled]);
    let _ = apply(
        &mut manager,
        &mut grid,
        BuildIntent::place_wall(StructureType::Wall, [walled]).expect("intent"),
    );

    let results = apply(
        &mut manager,
        &mut grid,
        BuildIntent::place_floor(FloorType::Metal, [walled, empty]).expect("intent"),
    );
    assert_eq!(
        results,
        vec![
            OperationResult::failed(walled, FailureReason::Blocked),
            OperationResult::success(empty, Outcome::Placed),
        ]
    );
    assert_eq!(query::floor_at(&grid, walled), Some(FloorType::Wood));
    assert_eq!(query::structure_at(&grid, walled), Some(StructureType::Wall));
    assert_eq!(query::floor_at(&grid, empty), Some(FloorType::Metal));

    let retry = apply(
        &mut manager,
        &mut grid,
        BuildIntent::place_floor(FloorType::Wood, [walled]).expect("intent"),
    );
    assert_eq!(
        retry,
        vec![OperationResult::failed(walled, FailureReason::Blocked)],
        "matching floor type is still blocked by the wall"
    );
}

#[test]
fn wall_placement_skips_same_type_and_requires_floor() {
    let mut grid = Grid::new();
    let mut manager = BuildManager::new();
    let walled = CellCoord::new(0, 0, 0);
    let empty = CellCoord::new(1, 0, 0);

    lay_floor(&mut grid, FloorType::Wood, &[walled]);
    let _ = apply(
        &mut manager,
        &mut grid,
        BuildIntent::place_wall(StructureType::Wall, [walled]).expect("intent"),
    );

    let results = apply(
        &mut manager,
        &mut grid,
        BuildIntent::place_wall(StructureType::Wall, [walled, empty]).expect("intent"),
    );
    assert_eq!(
        results,
        vec![
            OperationResult::skipped(walled, FailureReason::SameType),
            OperationResult::failed(empty, FailureReason::NoFloor),
        ]
    );
    assert!(
        grid.get_cell(empty).is_none(),
        "wall placement never materialises cells"
    );

    let results = apply(
        &mut manager,
        &mut grid,
        BuildIntent::place_floor(FloorType::Wood, [empty]).expect("intent"),
    );
    assert_eq!(results, vec![OperationResult::success(empty, Outcome::Placed)]);
    assert!(query::floor_at(&grid, walled).is_some());
}

#[test]
fn placing_a_different_floor_replaces_it() {
    let mut grid = Grid::new();
    let mut manager = BuildManager::new();
    let coord = CellCoord::new(4, 2, 0);
    lay_floor(&mut grid, FloorType::Wood, &[coord]);

    let results = apply(
        &mut manager,
        &mut grid,
        BuildIntent::place_floor(FloorType::Metal, [coord]).expect("intent"),
    );
    assert_eq!(results, vec![OperationResult::success(coord, Outcome::Replaced)]);
    assert_eq!(query::floor_at(&grid, coord), Some(FloorType::Metal));
}

#[test]
fn placing_a_different_structure_replaces_it() {
    let mut grid = Grid::new();
    let mut manager = BuildManager::new();
    let coord = CellCoord::new(0, 3, 0);
    lay_floor(&mut grid, FloorType::Tile, &[coord]);

    let _ = apply(
        &mut manager,
        &mut grid,
        BuildIntent::place_wall(StructureType::Wall, [coord]).expect("intent"),
    );
    let results = apply(
        &mut manager,
        &mut grid,
        BuildIntent::place_wall(StructureType::Door, [coord]).expect("intent"),
    );
    assert_eq!(results, vec![OperationResult::success(coord, Outcome::Replaced)]);
    assert_eq!(query::structure_at(&grid, coord), Some(StructureType::Door));
}

#[test]
fn structure_and_furniture_exclude_each_other() {
    let mut grid = Grid::new();
    let mut manager = BuildManager::new();
    let table = CellCoord::new(0, 0, 0);
    let wall = CellCoord::new(1, 0, 0);
    lay_floor(&mut grid, FloorType::Carpet, &[table, wall]);

    let _ = apply(
        &mut manager,
        &mut grid,
        BuildIntent::place_furniture(FurnitureType::PokerTable, [table]).expect("intent"),
    );
    let _ = apply(
        &mut manager,
        &mut grid,
        BuildIntent::place_wall(StructureType::Wall, [wall]).expect("intent"),
    );

    let results = apply(
        &mut manager,
        &mut grid,
        BuildIntent::place_wall(StructureType::Wall, [table]).expect("intent"),
    );
    assert_eq!(
        results,
        vec![OperationResult::failed(table, FailureReason::Blocked)]
    );
    assert_eq!(query::structure_at(&grid, table), None);

    let results = apply(
        &mut manager,
        &mut grid,
        BuildIntent::place_furniture(FurnitureType::Bar, [wall]).expect("intent"),
    );
    assert_eq!(
        results,
        vec![OperationResult::failed(wall, FailureReason::Blocked)]
    );
    assert_eq!(query::furniture_at(&grid, wall), None);
}

#[test]
fn removing_absent_content_is_skipped() {
    let mut grid = Grid::new();
    let mut manager = BuildManager::new();
    let floored = CellCoord::new(0, 0, 0);
    let nothing = CellCoord::new(5, 5, 5);
    lay_floor(&mut grid, FloorType::Wood, &[floored]);

    let results = apply(
        &mut manager,
        &mut grid,
        BuildIntent::remove_wall([floored, nothing]).expect("intent"),
    );
    assert_eq!(
        results,
        vec![
            OperationResult::skipped(floored, FailureReason::NoStructure),
            OperationResult::skipped(nothing, FailureReason::NoCell),
        ]
    );
    assert_eq!(grid.cell_count(), 1);
}

#[test]
fn drag_rectangle_builds_around_obstacles() {
    let mut grid = Grid::new();
    let mut manager = BuildManager::new();
    let rect = CellRect::spanning(CellCoord::new(0, 0, 0), CellCoord::new(2, 1, 0));
    lay_floor(&mut grid, FloorType::Wood, &rect.cells().collect::<Vec<_>>());

    let pillar = CellCoord::new(1, 0, 0);
    let _ = apply(
        &mut manager,
        &mut grid,
        BuildIntent::place_furniture(FurnitureType::Bar, [pillar]).expect("intent"),
    );

    let result = manager.apply_build_operations(
        &mut grid,
        &BuildIntent::remove_floor(rect).expect("intent"),
    );
    let summary = result.summary();
    assert_eq!(summary.removed, 5);
    assert_eq!(summary.failed, 1);
    assert_eq!(result.results()[1].cell(), Some(pillar));
    assert_eq!(result.results()[1].reason(), FailureReason::Blocked);
    assert_eq!(grid.cell_count(), 1, "only the furnished cell remains");
}

#[test]
fn preview_predicts_apply_without_mutating() {
    let mut grid = Grid::new();
    let mut manager = BuildManager::new();
    let wood = CellCoord::new(0, 0, 0);
    let same = CellCoord::new(1, 0, 0);
    let bare = CellCoord::new(2, 0, 0);
    lay_floor(&mut grid, FloorType::Wood, &[wood]);
    lay_floor(&mut grid, FloorType::Metal, &[same]);

    let intent = BuildIntent::place_floor(FloorType::Metal, [wood, same, bare]).expect("intent");
    let preview = manager.preview_build_operations(&grid, &intent);
    let again = manager.preview_build_operations(&grid, &intent);
    assert_eq!(preview, again, "previews are repeatable");
    assert_eq!(grid.cell_count(), 2, "preview must not materialise cells");
    assert_eq!(query::floor_at(&grid, wood), Some(FloorType::Wood));
    assert_eq!(preview.placeable_cells(), vec![wood, bare]);
    assert!(!preview.is_fully_placeable());

    let applied = manager.apply_build_operations(&mut grid, &intent);
    assert_eq!(preview.into_result(), applied);
}

#[test]
fn hook_observes_each_successful_commit_once() {
    let mut grid = Grid::new();
    let mut manager = BuildManager::with_hook(RecordingHook::default());
    let placed = CellCoord::new(0, 0, 0);
    let fresh = CellCoord::new(1, 0, 0);

    let first = BuildIntent::place_floor(FloorType::Tile, [placed]).expect("intent");
    let _ = manager.apply_build_operations(&mut grid, &first);

    let second = BuildIntent::place_floor(FloorType::Tile, [placed, fresh]).expect("intent");
    let _ = manager.apply_build_operations(&mut grid, &second);

    let preview = BuildIntent::remove_floor([placed]).expect("intent");
    let _ = manager.preview_build_operations(&grid, &preview);

    let commits = manager.into_hook().commits;
    assert_eq!(
        commits,
        vec![
            (
                BuildAction::PlaceFloor(FloorType::Tile),
                OperationResult::success(placed, Outcome::Placed),
            ),
            (
                BuildAction::PlaceFloor(FloorType::Tile),
                OperationResult::success(fresh, Outcome::Placed),
            ),
        ]
    );
}
