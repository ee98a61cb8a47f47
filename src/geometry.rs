use std::time::{Duration, Instant};

use ratatui::layout::Rect;

pub const TOOLTIP_PAD: u16 = 1;
pub const CALLOUT_DEBOUNCE: Duration = Duration::from_millis(60);

/// Places a `width` x `height` box next to the pointer inside `viewport`.
///
/// The box sits below-right of the pointer, flips to the other side of an
/// axis it would overflow, and is finally pushed back to at least `pad` from
/// the top-left edge.
pub fn place_tooltip(
    pointer: (u16, u16),
    width: u16,
    height: u16,
    viewport: Rect,
    pad: u16,
) -> Rect {
    let (px, py) = (i32::from(pointer.0), i32::from(pointer.1));
    let (w, h) = (i32::from(width), i32::from(height));
    let pad = i32::from(pad);
    let left = i32::from(viewport.x);
    let top = i32::from(viewport.y);
    let right = i32::from(viewport.right());
    let bottom = i32::from(viewport.bottom());

    let mut x = px + pad;
    let mut y = py + pad;
    if x + w > right {
        x = px - w - pad;
    }
    if y + h > bottom {
        y = py - h - pad;
    }
    if x < left + pad {
        x = left + pad;
    }
    if y < top + pad {
        y = top + pad;
    }

    clip(x, y, w, h, viewport)
}

/// Box pinned at `(dx, dy)` from the anchor cell's top-left corner.
///
/// Returns `None` when nothing of it would land inside `root`.
pub fn place_callout(
    root: Rect,
    anchor: Rect,
    dx: i16,
    dy: i16,
    width: u16,
    height: u16,
) -> Option<Rect> {
    let x = i32::from(anchor.x) + i32::from(dx);
    let y = i32::from(anchor.y) + i32::from(dy);
    let (w, h) = (i32::from(width), i32::from(height));

    // Slide back inside the root before clipping so the bubble keeps its size when it can.
    let x = x.min(i32::from(root.right()) - w).max(i32::from(root.x));
    let y = y.min(i32::from(root.bottom()) - h).max(i32::from(root.y));

    let placed = clip(x, y, w, h, root);
    (placed.width > 0 && placed.height > 0).then_some(placed)
}

fn clip(x: i32, y: i32, w: i32, h: i32, bounds: Rect) -> Rect {
    let left = x.max(i32::from(bounds.x));
    let top = y.max(i32::from(bounds.y));
    let right = (x + w).min(i32::from(bounds.right()));
    let bottom = (y + h).min(i32::from(bounds.bottom()));
    if right <= left || bottom <= top {
        return Rect::new(bounds.x, bounds.y, 0, 0);
    }
    Rect::new(
        to_u16(left),
        to_u16(top),
        to_u16(right - left),
        to_u16(bottom - top),
    )
}

fn to_u16(value: i32) -> u16 {
    value.clamp(0, i32::from(u16::MAX)) as u16
}

pub fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.right() && y >= rect.y && y < rect.bottom()
}

/// Trailing-edge debounce: fires once `delay` has passed since the last trigger.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    pending: Option<Instant>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn trigger(&mut self, now: Instant) {
        self.pending = Some(now);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn fire(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(at) if now.saturating_duration_since(at) >= self.delay => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}
