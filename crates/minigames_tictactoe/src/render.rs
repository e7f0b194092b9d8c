//! Text table rendering of the board.

use crate::{Board, Position};
use tracing::instrument;

/// Column headers printed above the board.
pub const HEADERS: [&str; 3] = ["TIC", "TAC", "TOE"];

/// Renders the board as a box-drawn table with `TIC`, `TAC` and `TOE`
/// column headers. Unclaimed cells show their index.
#[instrument(skip(board))]
pub fn render_board(board: &Board) -> String {
    let rows: Vec<[String; 3]> = (0..3)
        .map(|row| {
            std::array::from_fn(|col| {
                Position::from_row_col(row, col)
                    .map(|pos| board.label(pos))
                    .unwrap_or_default()
            })
        })
        .collect();

    let widths: [usize; 3] = std::array::from_fn(|col| {
        rows.iter()
            .map(|row| row[col].chars().count())
            .chain(std::iter::once(HEADERS[col].chars().count()))
            .max()
            .unwrap_or(0)
    });

    let mut out = String::new();
    out.push_str(&border(&widths, '┌', '┬', '┐'));
    out.push_str(&line(&widths, &HEADERS.map(String::from)));
    out.push_str(&border(&widths, '├', '┼', '┤'));
    for row in &rows {
        out.push_str(&line(&widths, row));
    }
    out.push_str(&border(&widths, '└', '┴', '┘'));
    out
}

fn border(widths: &[usize; 3], left: char, mid: char, right: char) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{left}{}{right}\n", segments.join(&mid.to_string()))
}

fn line(widths: &[usize; 3], cells: &[String; 3]) -> String {
    let segments: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!(" {cell:<width$} "))
        .collect();
    format!("│{}│\n", segments.join("│"))
}
