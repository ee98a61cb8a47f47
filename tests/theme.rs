use ratatui::style::{Color, Modifier};

use playoff_scenarios::highlight::CellFlags;
use playoff_scenarios::model::Bucket;
use playoff_scenarios::theme::{bucket_color, cell_appearance};
use playoff_scenarios::views::Cell;

fn cell(bucket: Bucket, tie: Option<u32>) -> Cell {
    Cell {
        id: 0,
        scenario_id: "S1".to_string(),
        team: "APINA".to_string(),
        bucket,
        tie,
        callout: None,
    }
}

const MATCHING: CellFlags = CellFlags {
    matches: true,
    hovered: false,
};

const FILTERED_OUT: CellFlags = CellFlags {
    matches: false,
    hovered: false,
};

#[test]
fn matching_cells_are_filled_with_bucket_color() {
    for bucket in [Bucket::Green, Bucket::Yellow, Bucket::Red] {
        let (glyph, style) = cell_appearance(&cell(bucket, None), MATCHING);
        assert_eq!(style.bg, Some(bucket_color(bucket)));
        assert_eq!(glyph, "  ");
        assert!(!style.add_modifier.contains(Modifier::DIM));
    }
}

#[test]
fn dimmed_cells_keep_their_bucket_color() {
    for bucket in [Bucket::Green, Bucket::Yellow, Bucket::Red] {
        let (glyph, style) = cell_appearance(&cell(bucket, None), FILTERED_OUT);
        assert_eq!(style.fg, Some(bucket_color(bucket)));
        assert_eq!(style.bg, Some(Color::Black));
        assert!(style.add_modifier.contains(Modifier::DIM));
        assert!(!glyph.trim().is_empty());
    }

    let (glyph, style) = cell_appearance(&cell(Bucket::Yellow, Some(5)), FILTERED_OUT);
    assert_eq!(glyph, " 5");
    assert_eq!(style.fg, Some(Color::Yellow));
}

#[test]
fn hovered_cells_stand_out() {
    let hovered = CellFlags {
        matches: true,
        hovered: true,
    };
    let (glyph, style) = cell_appearance(&cell(Bucket::Green, None), hovered);
    assert_eq!(glyph, "<>");
    assert!(style.add_modifier.contains(Modifier::BOLD | Modifier::REVERSED));
    assert_eq!(style.bg, Some(Color::Green));
}
