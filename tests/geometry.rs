use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use playoff_scenarios::geometry::{
    CALLOUT_DEBOUNCE, Debounce, contains, place_callout, place_tooltip,
};

const SCREEN: Rect = Rect {
    x: 0,
    y: 0,
    width: 80,
    height: 24,
};

#[test]
fn tooltip_sits_below_right_of_pointer() {
    let area = place_tooltip((10, 5), 20, 6, SCREEN, 1);
    assert_eq!(area, Rect::new(11, 6, 20, 6));
}

#[test]
fn tooltip_flips_left_at_right_edge() {
    let area = place_tooltip((70, 5), 20, 6, SCREEN, 1);
    assert_eq!(area, Rect::new(49, 6, 20, 6));
}

#[test]
fn tooltip_flips_up_at_bottom_edge() {
    let area = place_tooltip((10, 20), 20, 6, SCREEN, 1);
    assert_eq!(area, Rect::new(11, 13, 20, 6));
}

#[test]
fn tooltip_never_leaves_the_viewport() {
    let tiny = Rect::new(0, 0, 20, 10);
    let area = place_tooltip((5, 2), 20, 6, tiny, 1);
    assert_eq!(area, Rect::new(1, 3, 19, 6));

    for px in (0..80).step_by(7) {
        for py in (0..24).step_by(5) {
            let area = place_tooltip((px, py), 30, 8, SCREEN, 1);
            assert!(area.x >= 1 && area.y >= 1, "pointer {px},{py} -> {area:?}");
            assert!(area.right() <= SCREEN.right() && area.bottom() <= SCREEN.bottom());
        }
    }
}

#[test]
fn tooltip_respects_viewport_offset() {
    let viewport = Rect::new(10, 4, 40, 12);
    let area = place_tooltip((10, 4), 8, 3, viewport, 1);
    assert_eq!(area, Rect::new(11, 5, 8, 3));
}

#[test]
fn callout_is_offset_from_anchor_cell() {
    let root = Rect::new(0, 0, 100, 30);
    let anchor = Rect::new(50, 10, 2, 1);
    assert_eq!(
        place_callout(root, anchor, -28, -4, 32, 4),
        Some(Rect::new(22, 6, 32, 4))
    );
}

#[test]
fn callout_slides_back_inside_root() {
    let root = Rect::new(0, 2, 100, 30);
    let anchor = Rect::new(5, 3, 2, 1);
    assert_eq!(
        place_callout(root, anchor, -28, -4, 32, 4),
        Some(Rect::new(0, 2, 32, 4))
    );

    let small = Rect::new(0, 0, 20, 3);
    assert_eq!(
        place_callout(small, Rect::new(4, 1, 2, 1), 0, 0, 32, 4),
        Some(Rect::new(0, 0, 20, 3))
    );
    assert_eq!(place_callout(Rect::new(0, 0, 0, 0), anchor, 0, 0, 32, 4), None);
}

#[test]
fn debounce_fires_once_after_quiet_period() {
    let start = Instant::now();
    let mut debounce = Debounce::new(CALLOUT_DEBOUNCE);
    assert!(!debounce.fire(start));

    debounce.trigger(start);
    assert!(debounce.is_pending());
    assert!(!debounce.fire(start + Duration::from_millis(30)));

    // A second resize pushes the deadline out.
    debounce.trigger(start + Duration::from_millis(40));
    assert!(!debounce.fire(start + Duration::from_millis(80)));
    assert!(debounce.fire(start + Duration::from_millis(100)));
    assert!(!debounce.fire(start + Duration::from_millis(200)));
}

#[test]
fn contains_is_half_open() {
    let r = Rect::new(2, 3, 2, 1);
    assert!(contains(r, 2, 3));
    assert!(contains(r, 3, 3));
    assert!(!contains(r, 4, 3));
    assert!(!contains(r, 2, 4));
}
