use ratatui::style::{Color, Modifier, Style};

use crate::highlight::CellFlags;
use crate::layout::CELL_WIDTH;
use crate::model::Bucket;
use crate::views::Cell;

const DIM_GLYPH: &str = "░░";
const HOVER_GLYPH: &str = "<>";

pub fn bucket_color(bucket: Bucket) -> Color {
    match bucket {
        Bucket::Green => Color::Green,
        Bucket::Yellow => Color::Yellow,
        Bucket::Red => Color::Red,
    }
}

/// Glyph and style for one cell.
///
/// Filtered-out cells keep their bucket colour as a faded foreground on a
/// dark background; matching cells are filled with it.
pub fn cell_appearance(cell: &Cell, flags: CellFlags) -> (String, Style) {
    let color = bucket_color(cell.bucket);
    let mut style = if flags.dim() {
        Style::default()
            .fg(color)
            .bg(Color::Black)
            .add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(Color::Black).bg(color)
    };
    if flags.hovered {
        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
    }

    let glyph = match (cell.tie, flags.hovered, flags.dim()) {
        (Some(tie), _, _) => format!("{tie:>2}"),
        (None, true, _) => HOVER_GLYPH.to_string(),
        (None, false, true) => DIM_GLYPH.to_string(),
        (None, false, false) => " ".repeat(usize::from(CELL_WIDTH)),
    };
    (glyph, style)
}
