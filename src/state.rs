use std::collections::VecDeque;

use chrono::Local;

use crate::callouts::{Callout, default_callout_specs, resolve_callouts};
use crate::highlight::{CellId, HighlightEngine};
use crate::i18n::{Key, Lang, t};
use crate::model::{Bucket, Dataset, Outcome, Scenario};
use crate::store::ScenarioStore;
use crate::views::{ViewSet, build_views};

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading { source: String },
    Ready,
    Failed(String),
}

/// Everything that exists only once the data file has loaded.
#[derive(Debug, Clone)]
pub struct Session {
    pub store: ScenarioStore,
    pub views: ViewSet,
    pub engine: HighlightEngine,
    pub callouts: Vec<Callout>,
}

impl Session {
    pub fn new(dataset: Dataset) -> (Self, Vec<String>) {
        let store = ScenarioStore::new(dataset);
        let specs = store
            .callout_specs()
            .map(<[_]>::to_vec)
            .unwrap_or_else(default_callout_specs);
        let (callouts, rejected) = resolve_callouts(&specs);
        let warnings = rejected
            .iter()
            .map(|spec| {
                format!(
                    "[WARN] Callout {} dropped: unknown text key {:?}",
                    spec.id, spec.text_key
                )
            })
            .collect();

        let mut engine = HighlightEngine::for_store(&store);
        let views = build_views(&store, &callouts, &mut engine);
        (
            Self {
                store,
                views,
                engine,
                callouts,
            },
            warnings,
        )
    }

    pub fn hovered_scenario(&self) -> Option<&Scenario> {
        self.engine.hovered().and_then(|id| self.store.get(id))
    }
}

#[derive(Debug, Clone)]
pub enum Delta {
    DataLoaded(Box<Dataset>),
    LoadFailed(String),
    Log(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeSummary {
    pub green: Vec<String>,
    pub yellow: Vec<String>,
    pub red: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TooltipLine {
    Result { label: String, outcome: Option<Outcome> },
    Rule,
    Group { heading: String, teams: String },
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub load: LoadState,
    pub session: Option<Session>,
    pub lang: Lang,
    pub logs: VecDeque<String>,
    // Keyboard/mouse focus; the focused cell is the hovered one.
    pub cursor: Option<CellId>,
    pub pointer: Option<(u16, u16)>,
    pub show_callouts: bool,
    pub help_overlay: bool,
    pub howto_overlay: bool,
}

impl AppState {
    pub fn new(source: impl Into<String>, lang: Lang) -> Self {
        Self {
            load: LoadState::Loading {
                source: source.into(),
            },
            session: None,
            lang,
            logs: VecDeque::new(),
            cursor: None,
            pointer: None,
            show_callouts: true,
            help_overlay: false,
            howto_overlay: false,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        let stamp = Local::now().format("%H:%M:%S");
        self.logs.push_back(format!("{stamp} {}", msg.into()));
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn t(&self, key: Key) -> &'static str {
        t(self.lang, key)
    }

    pub fn is_ready(&self) -> bool {
        self.load == LoadState::Ready && self.session.is_some()
    }

    pub fn hover_cell(&mut self, cell: CellId, pointer: Option<(u16, u16)>) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.engine.scenario_id(cell).is_none() {
            return false;
        }
        self.cursor = Some(cell);
        self.pointer = pointer;
        session.engine.hover_cell(&session.store, cell)
    }

    pub fn leave(&mut self) -> bool {
        self.cursor = None;
        self.pointer = None;
        match self.session.as_mut() {
            Some(session) => session.engine.leave(&session.store),
            None => false,
        }
    }

    pub fn click_cell(&mut self, cell: CellId) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if !session.engine.click_cell(&session.store, cell) {
            return false;
        }
        let sid = session.engine.scenario_id(cell).unwrap_or_default().to_string();
        let matched = session.engine.matched_scenarios(&session.store);
        self.push_log(format!("[INFO] Filter set from {sid} ({matched} matching)"));
        true
    }

    pub fn set_filter(&mut self, slot: usize, value: Option<Outcome>) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(match_id) = session.engine.filter().slot_id(slot).map(str::to_string) else {
            return false;
        };
        session.engine.set_filter(&session.store, &match_id, value)
    }

    pub fn cycle_filter(&mut self, slot: usize) -> Option<Option<Outcome>> {
        let session = self.session.as_mut()?;
        let match_id = session.engine.filter().slot_id(slot)?.to_string();
        session.engine.cycle_filter(&session.store, &match_id)
    }

    pub fn clear_filters(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.engine.clear_filters(&session.store);
        self.push_log("[INFO] Filters cleared");
    }

    pub fn set_lang(&mut self, lang: Lang) -> bool {
        if self.lang == lang {
            return false;
        }
        self.lang = lang;
        true
    }

    pub fn tooltip_lines(&self) -> Option<Vec<TooltipLine>> {
        let session = self.session.as_ref()?;
        let scenario = session.hovered_scenario()?;

        let mut lines: Vec<TooltipLine> = session
            .store
            .matches()
            .iter()
            .map(|m| TooltipLine::Result {
                label: session.store.match_label(&m.id).to_string(),
                outcome: scenario.result(&m.id),
            })
            .collect();
        lines.push(TooltipLine::Rule);

        let out = summarize_outcome(scenario);
        if !out.green.is_empty() {
            lines.push(TooltipLine::Group {
                heading: self.t(Key::HoverQualified).to_string(),
                teams: out.green.join(", "),
            });
        }
        if !out.yellow.is_empty() {
            let mut heading = self.t(Key::HoverTiebreaker).to_string();
            if out.yellow.len() > 1 {
                heading.push_str(&format!(" ({}{})", out.yellow.len(), self.t(Key::Teams)));
            }
            lines.push(TooltipLine::Group {
                heading,
                teams: out.yellow.join(", "),
            });
        }
        if !out.red.is_empty() {
            lines.push(TooltipLine::Group {
                heading: self.t(Key::HoverEliminated).to_string(),
                teams: out.red.join(", "),
            });
        }
        Some(lines)
    }
}

pub fn summarize_outcome(scenario: &Scenario) -> OutcomeSummary {
    let mut out = OutcomeSummary::default();
    for (team, standing) in &scenario.by_team {
        let bucket = match standing.bucket {
            Bucket::Green => &mut out.green,
            Bucket::Yellow => &mut out.yellow,
            Bucket::Red => &mut out.red,
        };
        bucket.push(team.clone());
    }
    out
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::DataLoaded(dataset) => {
            let (session, warnings) = Session::new(*dataset);
            let scenarios = session.store.len();
            let cells = session.engine.cell_count();
            state.session = Some(session);
            state.load = LoadState::Ready;
            state.cursor = None;
            state.pointer = None;
            state.push_log(format!("[INFO] Loaded {scenarios} scenarios ({cells} cells)"));
            for warning in warnings {
                state.push_log(warning);
            }
        }
        Delta::LoadFailed(err) => {
            // No partial rendering: drop anything a previous load left behind.
            state.session = None;
            state.cursor = None;
            state.pointer = None;
            state.push_log(format!("[ERROR] {err}"));
            state.load = LoadState::Failed(err);
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
