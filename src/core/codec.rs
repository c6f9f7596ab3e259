//! Codec module - textual grid encoding for fixtures and debugging
//!
//! `encode` and `decode` are exact inverses for any grid the codec produced.
//! The format is one header line `"<tag>,<width>:"` followed by one line per
//! row (hidden row first), one character per cell. This exists to make test
//! fixtures human-inspectable and diffable; it is not a wire format.
//!
//! Alphabet, colors ordered red/yellow/blue:
//!   Empty `X`, Destroyed `#`
//!   Virus `ryb`, Segment `RYB`
//!   Top `tuv`, Bottom `TUV`, Left `lmn`, Right `LMN`

use crate::core::grid::Grid;
use crate::error::EngineError;
use crate::types::{Cell, PillColor};

/// Format tag written in the header line
pub const FORMAT_TAG: &str = "pillgrid";

fn color_char(table: &[u8; 3], color: PillColor) -> char {
    table[color.index()] as char
}

fn encode_cell(cell: Cell) -> char {
    match cell {
        Cell::Empty => 'X',
        Cell::Destroyed => '#',
        Cell::Virus(c) => color_char(b"ryb", c),
        Cell::PillSegment(c) => color_char(b"RYB", c),
        Cell::PillTop(c) => color_char(b"tuv", c),
        Cell::PillBottom(c) => color_char(b"TUV", c),
        Cell::PillLeft(c) => color_char(b"lmn", c),
        Cell::PillRight(c) => color_char(b"LMN", c),
    }
}

fn decode_cell(ch: char) -> Result<Cell, EngineError> {
    use PillColor::*;
    Ok(match ch {
        'X' => Cell::Empty,
        '#' => Cell::Destroyed,
        'r' => Cell::Virus(Red),
        'y' => Cell::Virus(Yellow),
        'b' => Cell::Virus(Blue),
        'R' => Cell::PillSegment(Red),
        'Y' => Cell::PillSegment(Yellow),
        'B' => Cell::PillSegment(Blue),
        't' => Cell::PillTop(Red),
        'u' => Cell::PillTop(Yellow),
        'v' => Cell::PillTop(Blue),
        'T' => Cell::PillBottom(Red),
        'U' => Cell::PillBottom(Yellow),
        'V' => Cell::PillBottom(Blue),
        'l' => Cell::PillLeft(Red),
        'm' => Cell::PillLeft(Yellow),
        'n' => Cell::PillLeft(Blue),
        'L' => Cell::PillRight(Red),
        'M' => Cell::PillRight(Yellow),
        'N' => Cell::PillRight(Blue),
        _ => {
            return Err(EngineError::Format(format!(
                "unrecognized cell character {:?}",
                ch
            )))
        }
    })
}

/// Encode a grid into the fixture text format
pub fn encode(grid: &Grid) -> String {
    let width = grid.width() as usize;
    let mut out = String::with_capacity((width + 1) * (grid.rows() + 1) + 16);
    out.push_str(FORMAT_TAG);
    out.push(',');
    out.push_str(&grid.width().to_string());
    out.push_str(":\n");
    for row in grid.cells().chunks(width) {
        for &cell in row {
            out.push(encode_cell(cell));
        }
        out.push('\n');
    }
    out
}

/// Decode the fixture text format back into a grid.
///
/// A leading `"<tag>,<width>:"` header and whitespace-only lines are tolerated
/// and stripped. Fails with a Format error when the declared width disagrees
/// with a row, a character is unrecognized, or no rows remain.
pub fn decode(text: &str) -> Result<Grid, EngineError> {
    let mut declared_width: Option<usize> = None;
    let mut rows: Vec<Vec<Cell>> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if rows.is_empty() && declared_width.is_none() && line.ends_with(':') {
            let body = &line[..line.len() - 1];
            let (_, width) = body.split_once(',').ok_or_else(|| {
                EngineError::Format(format!("malformed header line {:?}", line))
            })?;
            let width: usize = width
                .parse()
                .map_err(|_| EngineError::Format(format!("bad width in header {:?}", line)))?;
            declared_width = Some(width);
            continue;
        }
        let mut row = Vec::with_capacity(line.chars().count());
        for ch in line.chars() {
            row.push(decode_cell(ch)?);
        }
        if let Some(width) = declared_width {
            if row.len() != width {
                return Err(EngineError::Format(format!(
                    "row has {} cells, header declares {}",
                    row.len(),
                    width
                )));
            }
        } else if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(EngineError::Format(format!(
                    "row has {} cells, expected {}",
                    row.len(),
                    first.len()
                )));
            }
        }
        rows.push(row);
    }

    if rows.len() < 2 {
        return Err(EngineError::Format(format!(
            "need at least 2 rows (hidden + playable), got {}",
            rows.len()
        )));
    }

    let width = rows[0].len() as u8;
    let height = (rows.len() - 1) as u8;
    let mut grid = Grid::new(width, height)
        .map_err(|e| EngineError::Format(format!("unsupported grid dimensions: {}", e)))?;
    for (r, row) in rows.iter().enumerate() {
        for (c, &cell) in row.iter().enumerate() {
            grid.set(r as i16, c as i16, cell);
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::SimpleRng;

    #[test]
    fn test_round_trip_empty() {
        let grid = Grid::new(8, 16).unwrap();
        let text = encode(&grid);
        assert!(text.starts_with("pillgrid,8:\n"));
        assert_eq!(decode(&text).unwrap(), grid);
    }

    #[test]
    fn test_round_trip_populated() {
        let mut rng = SimpleRng::new(77);
        let mut grid = Grid::with_viruses(8, 16, 10, &mut rng).unwrap();
        grid.set(3, 2, Cell::PillLeft(PillColor::Yellow));
        grid.set(3, 3, Cell::PillRight(PillColor::Blue));
        grid.set(8, 5, Cell::PillTop(PillColor::Red));
        grid.set(9, 5, Cell::PillBottom(PillColor::Red));
        grid.set(12, 0, Cell::PillSegment(PillColor::Blue));
        grid.set(13, 0, Cell::Destroyed);

        assert_eq!(decode(&encode(&grid)).unwrap(), grid);
    }

    #[test]
    fn test_decode_without_header() {
        let text = "XXXXXXXX\n".repeat(17);
        let grid = decode(&text).unwrap();
        assert_eq!(grid.width(), 8);
        assert_eq!(grid.height(), 16);
    }

    #[test]
    fn test_decode_tolerates_blank_lines() {
        let mut grid = Grid::new(8, 16).unwrap();
        grid.set(6, 1, Cell::Virus(PillColor::Red));
        let text = encode(&grid);
        let padded = format!("\n  \n{}\n\n", text);
        assert_eq!(decode(&padded).unwrap(), grid);
    }

    #[test]
    fn test_decode_width_mismatch() {
        let text = "pillgrid,8:\nXXXXXXXX\nXXXX\n";
        assert!(matches!(decode(text), Err(EngineError::Format(_))));
    }

    #[test]
    fn test_decode_unknown_char() {
        let text = format!("{}{}", "XXXXXXXX\n".repeat(16), "XXXXXXQX\n");
        assert!(matches!(decode(&text), Err(EngineError::Format(_))));
    }

    #[test]
    fn test_decode_no_rows() {
        assert!(matches!(decode(""), Err(EngineError::Format(_))));
        assert!(matches!(
            decode("pillgrid,8:\n"),
            Err(EngineError::Format(_))
        ));
    }
}
