use crate::callouts::{Callout, callout_for};
use crate::highlight::{CellId, HighlightEngine};
use crate::model::{Bucket, Outcome, Scenario};
use crate::store::ScenarioStore;

pub const GRID_SIZE: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub id: CellId,
    pub scenario_id: String,
    pub team: String,
    pub bucket: Bucket,
    // Only kept for tiebreaker cells.
    pub tie: Option<u32>,
    pub callout: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarRow {
    pub outcome: Outcome,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarsView {
    pub team: String,
    pub rows: Vec<BarRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridBlockView {
    pub r: u8,
    pub c: u8,
    pub title: String,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    pub team: String,
    // Row-major, always GRID_SIZE x GRID_SIZE.
    pub blocks: Vec<GridBlockView>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSet {
    pub bars: Vec<BarsView>,
    pub grid: Option<GridView>,
}

impl ViewSet {
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        let bars = self
            .bars
            .iter()
            .flat_map(|view| view.rows.iter().flat_map(|row| row.cells.iter()));
        let grid = self
            .grid
            .iter()
            .flat_map(|view| view.blocks.iter().flat_map(|block| block.cells.iter()));
        bars.chain(grid)
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells().find(|cell| cell.id == id)
    }

    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    pub fn callout_cell(&self, callout_id: &str) -> Option<&Cell> {
        self.cells()
            .find(|cell| cell.callout.as_deref() == Some(callout_id))
    }
}

/// Rebuilds every view and re-registers its cells with the engine.
pub fn build_views(
    store: &ScenarioStore,
    callouts: &[Callout],
    engine: &mut HighlightEngine,
) -> ViewSet {
    engine.reset_cells();
    let bars = store
        .bar_teams()
        .filter_map(|team| build_bars(store, team, callouts, engine))
        .collect();
    let grid = build_grid(store, callouts, engine);
    engine.recompute(store);
    ViewSet { bars, grid }
}

pub fn build_bars(
    store: &ScenarioStore,
    team: &str,
    callouts: &[Callout],
    engine: &mut HighlightEngine,
) -> Option<BarsView> {
    let cfg = store.team_bars(team)?;
    let rows = Outcome::ALL
        .iter()
        .map(|&outcome| BarRow {
            outcome,
            cells: cfg
                .rows
                .row(outcome)
                .iter()
                .filter_map(|sid| store.get(sid))
                .map(|scenario| make_cell(scenario, team, callouts, engine))
                .collect(),
        })
        .collect();
    Some(BarsView {
        team: team.to_string(),
        rows,
    })
}

pub fn build_grid(
    store: &ScenarioStore,
    callouts: &[Callout],
    engine: &mut HighlightEngine,
) -> Option<GridView> {
    let cfg = store.grid()?;
    let mut blocks = Vec::with_capacity(usize::from(GRID_SIZE * GRID_SIZE));
    for r in 0..GRID_SIZE {
        for c in 0..GRID_SIZE {
            let block = cfg.block(r, c);
            let cells = block
                .map(|b| b.cells.as_slice())
                .unwrap_or_default()
                .iter()
                .filter_map(|sid| store.get(sid))
                .map(|scenario| make_cell(scenario, &cfg.team, callouts, engine))
                .collect();
            blocks.push(GridBlockView {
                r,
                c,
                title: block.map(|b| b.title.clone()).unwrap_or_default(),
                cells,
            });
        }
    }
    Some(GridView {
        team: cfg.team.clone(),
        blocks,
    })
}

fn make_cell(
    scenario: &Scenario,
    team: &str,
    callouts: &[Callout],
    engine: &mut HighlightEngine,
) -> Cell {
    let standing = scenario.standing(team);
    // No standing for this team: render as undecided.
    let bucket = standing.map(|s| s.bucket).unwrap_or(Bucket::Yellow);
    let tie = match bucket {
        Bucket::Yellow => standing.and_then(|s| s.tie),
        _ => None,
    };
    Cell {
        id: engine.register(&scenario.id),
        scenario_id: scenario.id.clone(),
        team: team.to_string(),
        bucket,
        tie,
        callout: callout_for(callouts, team, &scenario.id).map(|c| c.id.clone()),
    }
}
