//! Resolver integration tests driven by textual grid fixtures

use pillfall::core::codec::decode;
use pillfall::core::resolver::{
    demote_orphans, find_matches, mark_destroyed, settle_step, sweep_destroyed,
};
use pillfall::types::{Cell, PillColor};

#[test]
fn test_horizontal_virus_run_destroyed() {
    // Four red viruses in a row on the floor.
    let text = "\
pillgrid,8:
XXXXXXXX
XXXXXXXX
XXXXXXXX
XXXXXXXX
XXXXXXXX
XXXXXXXX
XXXXXXXX
XXXXXXXX
XXXXXXXX
XXXXXXXX
XXXXXXXX
XXXXXXXX
XXXXXXXX
XXXXXXXX
XXXXXXXX
XXXXXXXX
XrrrrXXX
";
    let mut grid = decode(text).unwrap();
    let positions = find_matches(&grid);
    assert_eq!(positions, vec![(16, 1), (16, 2), (16, 3), (16, 4)]);

    let stats = mark_destroyed(&mut grid, &positions);
    assert_eq!(stats.cells, 4);
    assert_eq!(stats.viruses, 4);
    for col in 1..5 {
        assert_eq!(grid.get(16, col), Some(Cell::Destroyed));
    }
    assert_eq!(grid.virus_count(), 0);
}

#[test]
fn test_three_run_left_alone() {
    let text = format!("{}{}", "XXXXXXXX\n".repeat(16), "XbbbXXXX\n");
    let grid = decode(&text).unwrap();
    assert!(find_matches(&grid).is_empty());
}

#[test]
fn test_full_clear_cycle_with_orphan_and_settle() {
    // A vertical yellow run through a pill's bottom half. Destroying it
    // orphans the top half, which then falls as a loose segment.
    let mut lines = vec!["XXXXXXXX".to_string(); 17];
    lines[10] = "XXvXXXXX".to_string(); // top half, blue
    lines[11] = "XXUXXXXX".to_string(); // bottom half, yellow
    lines[12] = "XXyXXXXX".to_string();
    lines[13] = "XXyXXXXX".to_string();
    lines[14] = "XXyXXXXX".to_string();
    lines[16] = "XXXXrXXX".to_string(); // unrelated support elsewhere
    let text = lines.join("\n");
    let mut grid = decode(&text).unwrap();

    let positions = find_matches(&grid);
    assert_eq!(positions.len(), 4);
    let stats = mark_destroyed(&mut grid, &positions);
    assert_eq!(stats.viruses, 3);

    demote_orphans(&mut grid);
    assert_eq!(grid.get(10, 2), Some(Cell::PillSegment(PillColor::Blue)));

    sweep_destroyed(&mut grid);
    // The loose segment falls to the floor in repeated settle steps.
    let mut steps = 0;
    while settle_step(&mut grid) {
        steps += 1;
        assert!(steps < 20);
    }
    assert_eq!(grid.get(16, 2), Some(Cell::PillSegment(PillColor::Blue)));
    assert!(grid.is_open(10, 2));
}

#[test]
fn test_settle_leaves_stable_grid_alone() {
    let mut lines = vec!["XXXXXXXX".to_string(); 17];
    lines[15] = "lLXXXXXX".to_string();
    lines[16] = "rybXXXXX".to_string();
    let mut grid = decode(&lines.join("\n")).unwrap();
    assert!(!settle_step(&mut grid));
}

#[test]
fn test_cross_shaped_clear_counts_once() {
    let mut lines = vec!["XXXXXXXX".to_string(); 17];
    lines[13] = "XXrXXXXX".to_string();
    lines[14] = "XXrXXXXX".to_string();
    lines[15] = "rrrrXXXX".to_string();
    lines[16] = "XXrXXXXX".to_string();
    let mut grid = decode(&lines.join("\n")).unwrap();

    let positions = find_matches(&grid);
    // Seven distinct cells; the shared cell appears once.
    assert_eq!(positions.len(), 7);
    let stats = mark_destroyed(&mut grid, &positions);
    assert_eq!(stats.cells, 7);
    assert_eq!(stats.viruses, 7);
}
