//! Terminal geometry for the screen.
//!
//! Rendering and mouse hit-testing both read the same [`AppLayout`], so a
//! cell is clickable exactly where it is drawn.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Span;

use crate::geometry::contains;
use crate::highlight::CellId;
use crate::i18n::{Key, Lang};
use crate::model::Outcome;
use crate::state::AppState;
use crate::views::{BarsView, GRID_SIZE, GridView, ViewSet};

pub const CELL_WIDTH: u16 = 2;
pub const PANEL_PREFERRED_WIDTH: u16 = 60;
const ROW_LABEL_WIDTH: u16 = 2;
const BLOCK_GAP: u16 = 1;
const GRID_CELLS_PER_LINE: u16 = 3;
const FILTER_BUTTON_WIDTH: u16 = 3;
const FILTER_LABEL_MAX: u16 = 18;

pub const FILTER_OPTIONS: [Option<Outcome>; 4] =
    [None, Some(Outcome::W), Some(Outcome::D), Some(Outcome::L)];

pub fn option_label(value: Option<Outcome>) -> &'static str {
    match value {
        None => "?",
        Some(outcome) => outcome.label(),
    }
}

pub fn text_width(text: &str) -> u16 {
    Span::raw(text).width().min(usize::from(u16::MAX)) as u16
}

/// Lines `text` needs when wrapped at `width` columns (approximate for word wrap).
pub fn wrapped_height(text: &str, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    text_width(text).div_ceil(width).max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Filter { slot: usize, value: Option<Outcome> },
    Clear,
    Lang(Lang),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenAreas {
    pub header: Rect,
    pub filters: Rect,
    pub views: Rect,
    pub legend: Rect,
    pub console: Rect,
    pub footer: Rect,
}

pub fn screen_areas(area: Rect) -> ScreenAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(area);
    ScreenAreas {
        header: chunks[0],
        filters: chunks[1],
        views: chunks[2],
        legend: chunks[3],
        console: chunks[4],
        footer: chunks[5],
    }
}

/// Right-aligned language buttons on the first line of `area`.
pub fn lang_buttons(area: Rect) -> Vec<(Rect, Lang)> {
    if area.height == 0 {
        return Vec::new();
    }
    let widths: Vec<u16> = Lang::ALL
        .iter()
        .map(|lang| text_width(lang.button_label()) + 2)
        .collect();
    let total = widths.iter().sum::<u16>() + (widths.len() as u16).saturating_sub(1);
    if total > area.width {
        return Vec::new();
    }
    let mut x = area.right() - total;
    let mut out = Vec::with_capacity(widths.len());
    for (lang, w) in Lang::ALL.iter().zip(widths) {
        out.push((Rect::new(x, area.y, w, 1), *lang));
        x += w + 1;
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSlotLayout {
    pub slot: usize,
    pub label: Rect,
    pub buttons: Vec<(Rect, Option<Outcome>)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterBarLayout {
    pub heading: Rect,
    pub slots: Vec<FilterSlotLayout>,
    pub clear: Option<Rect>,
}

/// Lays out `label [?][W][D][L]  ...  [clear]` under the heading.
///
/// With a single line available the controls follow the heading inline.
/// Slots that do not fit are dropped from the right.
pub fn filter_bar(area: Rect, heading: &str, labels: &[&str], clear: &str) -> FilterBarLayout {
    let right = area.right();
    let heading_w = text_width(heading).min(area.width);
    let heading = Rect::new(area.x, area.y, heading_w, area.height.min(1));
    let (y, mut x) = if area.height >= 2 {
        (area.y + 1, area.x)
    } else {
        (area.y, area.x.saturating_add(heading_w).saturating_add(2))
    };

    let mut slots = Vec::with_capacity(labels.len());
    for (slot, label) in labels.iter().enumerate() {
        let label_w = text_width(label).clamp(1, FILTER_LABEL_MAX);
        let need = label_w + 1 + FILTER_BUTTON_WIDTH * FILTER_OPTIONS.len() as u16;
        if x.saturating_add(need) > right {
            break;
        }
        let label = Rect::new(x, y, label_w, 1);
        x += label_w + 1;
        let buttons = FILTER_OPTIONS
            .iter()
            .map(|value| {
                let rect = Rect::new(x, y, FILTER_BUTTON_WIDTH, 1);
                x += FILTER_BUTTON_WIDTH;
                (rect, *value)
            })
            .collect();
        slots.push(FilterSlotLayout {
            slot,
            label,
            buttons,
        });
        x += 1;
    }

    let clear_w = text_width(clear) + 2;
    let clear = (x.saturating_add(clear_w) <= right && area.height > 0)
        .then(|| Rect::new(x, y, clear_w, 1));

    FilterBarLayout {
        heading,
        slots,
        clear,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Bars(usize),
    Grid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLayout {
    pub kind: PanelKind,
    pub area: Rect,
    pub row_labels: Vec<(Rect, Outcome)>,
    // (title rect, index into GridView::blocks)
    pub block_titles: Vec<(Rect, usize)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewLayout {
    pub root: Rect,
    pub panels: Vec<PanelLayout>,
    cells: Vec<Option<Rect>>,
    /// Some panel or cell did not fit in `root`.
    pub truncated: bool,
}

impl ViewLayout {
    pub fn compute(root: Rect, views: &ViewSet) -> Self {
        let cell_slots = views.cells().map(|c| c.id + 1).max().unwrap_or(0);
        let mut layout = ViewLayout {
            root,
            panels: Vec::new(),
            cells: vec![None; cell_slots],
            truncated: false,
        };

        let mut kinds: Vec<PanelKind> = (0..views.bars.len()).map(PanelKind::Bars).collect();
        if views.grid.is_some() {
            kinds.push(PanelKind::Grid);
        }
        if kinds.is_empty() || root.width == 0 || root.height == 0 {
            layout.truncated = !kinds.is_empty();
            return layout;
        }

        let columns = (root.width / PANEL_PREFERRED_WIDTH).clamp(1, kinds.len() as u16);
        let panel_w = root.width / columns;
        let mut y = root.y;
        for chunk in kinds.chunks(usize::from(columns)) {
            let heights: Vec<u16> = chunk
                .iter()
                .map(|kind| match kind {
                    PanelKind::Bars(idx) => bars_height(&views.bars[*idx], panel_w),
                    PanelKind::Grid => views.grid.as_ref().map_or(2, |g| grid_height(g, panel_w)),
                })
                .collect();
            let row_h = heights.iter().copied().max().unwrap_or(0);
            if y.saturating_add(row_h) > root.bottom() {
                layout.truncated = true;
                break;
            }
            for (i, (kind, h)) in chunk.iter().zip(heights).enumerate() {
                let area = Rect::new(root.x + i as u16 * panel_w, y, panel_w, h);
                let panel = match kind {
                    PanelKind::Bars(idx) => layout.place_bars(*kind, area, &views.bars[*idx]),
                    PanelKind::Grid => match views.grid.as_ref() {
                        Some(grid) => layout.place_grid(area, grid),
                        None => continue,
                    },
                };
                layout.panels.push(panel);
            }
            y += row_h;
        }
        layout
    }

    pub fn cell_rect(&self, cell: CellId) -> Option<Rect> {
        self.cells.get(cell).copied().flatten()
    }

    pub fn placed(&self) -> impl Iterator<Item = (CellId, Rect)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(id, rect)| rect.map(|r| (id, r)))
    }

    pub fn cell_at(&self, x: u16, y: u16) -> Option<CellId> {
        self.placed()
            .find(|(_, rect)| contains(*rect, x, y))
            .map(|(id, _)| id)
    }

    /// Next cell from `from` in direction `nav`; the first placed cell when nothing is focused.
    pub fn neighbor(&self, from: Option<CellId>, nav: Nav) -> Option<CellId> {
        let Some((from, origin)) = from.and_then(|id| self.cell_rect(id).map(|r| (id, r))) else {
            return self.placed().next().map(|(id, _)| id);
        };
        match nav {
            Nav::Right => self.placed().find(|(id, _)| *id > from).map(|(id, _)| id),
            Nav::Left => self
                .placed()
                .filter(|(id, _)| *id < from)
                .last()
                .map(|(id, _)| id),
            Nav::Up | Nav::Down => self
                .placed()
                .filter(|(_, r)| match nav {
                    Nav::Up => r.y < origin.y,
                    _ => r.y > origin.y,
                })
                .min_by_key(|(_, r)| (r.y.abs_diff(origin.y), r.x.abs_diff(origin.x)))
                .map(|(id, _)| id),
        }
    }

    fn set_cell(&mut self, cell: CellId, rect: Rect, bounds: Rect) {
        let fits = rect.x >= bounds.x
            && rect.right() <= bounds.right()
            && rect.y >= bounds.y
            && rect.bottom() <= bounds.bottom();
        if !fits {
            self.truncated = true;
            return;
        }
        if let Some(slot) = self.cells.get_mut(cell) {
            *slot = Some(rect);
        }
    }

    fn place_bars(&mut self, kind: PanelKind, area: Rect, view: &BarsView) -> PanelLayout {
        let inner = inner(area);
        let per_line = bars_per_line(inner.width);
        let mut row_labels = Vec::with_capacity(view.rows.len());
        let mut y = inner.y;
        for row in &view.rows {
            if inner.width > 0 && y < inner.bottom() {
                let label = Rect::new(inner.x, y, ROW_LABEL_WIDTH.min(inner.width), 1);
                row_labels.push((label, row.outcome));
            }
            for (i, cell) in row.cells.iter().enumerate() {
                let line = (i / per_line) as u16;
                let col = (i % per_line) as u16;
                let rect = Rect::new(
                    inner.x + ROW_LABEL_WIDTH + col * CELL_WIDTH,
                    y + line,
                    CELL_WIDTH,
                    1,
                );
                self.set_cell(cell.id, rect, inner);
            }
            y += lines_for(row.cells.len(), per_line);
        }
        PanelLayout {
            kind,
            area,
            row_labels,
            block_titles: Vec::new(),
        }
    }

    fn place_grid(&mut self, area: Rect, grid: &GridView) -> PanelLayout {
        let inner = inner(area);
        let (block_w, per_line) = grid_geometry(area.width);
        let mut block_titles = Vec::with_capacity(grid.blocks.len());
        let mut y = inner.y;
        for br in 0..usize::from(GRID_SIZE) {
            let mut max_lines = 1;
            for bc in 0..usize::from(GRID_SIZE) {
                let idx = br * usize::from(GRID_SIZE) + bc;
                let Some(block) = grid.blocks.get(idx) else {
                    continue;
                };
                let bx = inner.x + bc as u16 * (block_w + BLOCK_GAP);
                if block_w > 0 && y < inner.bottom() {
                    block_titles.push((Rect::new(bx, y, block_w, 1), idx));
                }
                for (i, cell) in block.cells.iter().enumerate() {
                    let line = (i / per_line) as u16;
                    let col = (i % per_line) as u16;
                    let rect = Rect::new(bx + col * CELL_WIDTH, y + 1 + line, CELL_WIDTH, 1);
                    self.set_cell(cell.id, rect, inner);
                }
                max_lines = max_lines.max(lines_for(block.cells.len(), per_line));
            }
            y += 1 + max_lines;
        }
        PanelLayout {
            kind: PanelKind::Grid,
            area,
            row_labels: Vec::new(),
            block_titles,
        }
    }
}

fn inner(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    )
}

fn bars_per_line(inner_width: u16) -> usize {
    usize::from((inner_width.saturating_sub(ROW_LABEL_WIDTH) / CELL_WIDTH).max(1))
}

fn lines_for(cells: usize, per_line: usize) -> u16 {
    cells.div_ceil(per_line.max(1)).max(1) as u16
}

fn bars_height(view: &BarsView, panel_width: u16) -> u16 {
    let per_line = bars_per_line(panel_width.saturating_sub(2));
    2 + view
        .rows
        .iter()
        .map(|row| lines_for(row.cells.len(), per_line))
        .sum::<u16>()
}

// (block width, cells per line inside a block)
fn grid_geometry(panel_width: u16) -> (u16, usize) {
    let inner_w = panel_width.saturating_sub(2);
    let gaps = BLOCK_GAP * (u16::from(GRID_SIZE) - 1);
    let block_w = inner_w.saturating_sub(gaps) / u16::from(GRID_SIZE);
    let per_line = (block_w / CELL_WIDTH).clamp(1, GRID_CELLS_PER_LINE);
    (block_w, usize::from(per_line))
}

fn grid_height(grid: &GridView, panel_width: u16) -> u16 {
    let (_, per_line) = grid_geometry(panel_width);
    let size = usize::from(GRID_SIZE);
    let body: u16 = (0..size)
        .map(|br| {
            let lines = grid.blocks[br * size..((br + 1) * size).min(grid.blocks.len())]
                .iter()
                .map(|block| lines_for(block.cells.len(), per_line))
                .max()
                .unwrap_or(1);
            1 + lines
        })
        .sum();
    2 + body
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppLayout {
    pub screen: ScreenAreas,
    pub lang_buttons: Vec<(Rect, Lang)>,
    pub filter_bar: Option<FilterBarLayout>,
    pub views: ViewLayout,
}

impl AppLayout {
    pub fn compute(area: Rect, state: &AppState) -> Self {
        let screen = screen_areas(area);
        let lang_buttons = lang_buttons(Rect { height: 1, ..screen.header });

        let Some(session) = state.session.as_ref().filter(|_| state.is_ready()) else {
            return Self {
                screen,
                lang_buttons,
                filter_bar: None,
                views: ViewLayout::default(),
            };
        };

        let labels: Vec<&str> = session
            .engine
            .filter()
            .slots()
            .map(|(id, _)| session.store.match_label(id))
            .collect();
        let filter_bar = filter_bar(
            inner(screen.filters),
            state.t(Key::WhatIf),
            &labels,
            state.t(Key::Clear),
        );
        let views = ViewLayout::compute(screen.views, &session.views);

        Self {
            screen,
            lang_buttons,
            filter_bar: Some(filter_bar),
            views,
        }
    }

    pub fn control_at(&self, x: u16, y: u16) -> Option<Control> {
        if let Some((_, lang)) = self.lang_buttons.iter().find(|(r, _)| contains(*r, x, y)) {
            return Some(Control::Lang(*lang));
        }
        let bar = self.filter_bar.as_ref()?;
        if bar.clear.is_some_and(|r| contains(r, x, y)) {
            return Some(Control::Clear);
        }
        bar.slots.iter().find_map(|slot| {
            slot.buttons
                .iter()
                .find(|(r, _)| contains(*r, x, y))
                .map(|(_, value)| Control::Filter {
                    slot: slot.slot,
                    value: *value,
                })
        })
    }

    pub fn cell_at(&self, x: u16, y: u16) -> Option<CellId> {
        self.views.cell_at(x, y)
    }
}
