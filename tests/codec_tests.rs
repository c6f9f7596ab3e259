//! Codec integration tests

use pillfall::core::codec::{decode, encode};
use pillfall::core::rng::SimpleRng;
use pillfall::core::Grid;
use pillfall::types::{Cell, PillColor};
use pillfall::EngineError;

#[test]
fn test_encode_shape() {
    let grid = Grid::new(8, 16).unwrap();
    let text = encode(&grid);
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("pillgrid,8:"));
    // 17 rows: the hidden spawn row plus 16 playable rows.
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 17);
    assert!(rows.iter().all(|row| *row == "XXXXXXXX"));
}

#[test]
fn test_round_trip_every_cell_kind() {
    let mut grid = Grid::new(8, 4).unwrap();
    let samples = [
        Cell::Empty,
        Cell::Destroyed,
        Cell::Virus(PillColor::Red),
        Cell::Virus(PillColor::Yellow),
        Cell::Virus(PillColor::Blue),
        Cell::PillSegment(PillColor::Red),
        Cell::PillTop(PillColor::Yellow),
        Cell::PillBottom(PillColor::Yellow),
        Cell::PillLeft(PillColor::Blue),
        Cell::PillRight(PillColor::Red),
    ];
    for (i, &cell) in samples.iter().enumerate() {
        grid.set((i / 8) as i16, (i % 8) as i16, cell);
    }
    assert_eq!(decode(&encode(&grid)).unwrap(), grid);
}

#[test]
fn test_round_trip_random_boards() {
    for seed in [1u32, 99, 4242] {
        let mut rng = SimpleRng::new(seed);
        let grid = Grid::with_viruses(8, 16, 15, &mut rng).unwrap();
        let decoded = decode(&encode(&grid)).unwrap();
        assert_eq!(decoded, grid);
        assert_eq!(decoded.virus_count(), grid.virus_count());
    }
}

#[test]
fn test_decode_nondefault_width() {
    let text = "pillgrid,6:\n".to_string() + &"XXXXXX\n".repeat(13);
    let grid = decode(&text).unwrap();
    assert_eq!(grid.width(), 6);
    assert_eq!(grid.height(), 12);
}

#[test]
fn test_decode_rejects_bad_input() {
    // Ragged rows without a header.
    let ragged = "XXXXXXXX\nXXXX\nXXXXXXXX\n";
    assert!(matches!(decode(ragged), Err(EngineError::Format(_))));

    // Header width that no row satisfies.
    let mismatched = "pillgrid,5:\nXXXXXXXX\nXXXXXXXX\n";
    assert!(matches!(decode(mismatched), Err(EngineError::Format(_))));

    // Garbage header.
    let garbage = "pillgrid:\nXXXXXXXX\nXXXXXXXX\n";
    assert!(matches!(decode(garbage), Err(EngineError::Format(_))));

    // Width outside the supported range.
    let narrow = "XX\n".repeat(5);
    assert!(matches!(decode(&narrow), Err(EngineError::Format(_))));
}

#[test]
fn test_error_messages_name_the_problem() {
    let err = decode("XXXXXXXX\nXXXQXXXX\n").unwrap_err();
    assert!(err.to_string().contains('Q'));
}
