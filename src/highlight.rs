use crate::model::{Outcome, Scenario};
use crate::store::ScenarioStore;

pub type CellId = usize;

pub const STANDARD_MATCH_IDS: [&str; 4] = ["m1", "m2", "m3", "m4"];

/// One tri-state constraint per remaining match. `None` means unconstrained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    slots: Vec<(String, Option<Outcome>)>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(STANDARD_MATCH_IDS)
    }
}

impl FilterState {
    pub fn new<I, S>(match_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut slots: Vec<(String, Option<Outcome>)> = Vec::new();
        for id in match_ids {
            let id = id.into();
            if !slots.iter().any(|(existing, _)| *existing == id) {
                slots.push((id, None));
            }
        }
        Self { slots }
    }

    pub fn slots(&self) -> impl Iterator<Item = (&str, Option<Outcome>)> {
        self.slots.iter().map(|(id, value)| (id.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot_id(&self, index: usize) -> Option<&str> {
        self.slots.get(index).map(|(id, _)| id.as_str())
    }

    pub fn get(&self, match_id: &str) -> Option<Outcome> {
        self.slots
            .iter()
            .find(|(id, _)| id == match_id)
            .and_then(|(_, value)| *value)
    }

    /// Returns false when `match_id` is not one of the slots.
    pub fn set(&mut self, match_id: &str, value: Option<Outcome>) -> bool {
        match self.slots.iter_mut().find(|(id, _)| id == match_id) {
            Some((_, slot)) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn cycle(&mut self, match_id: &str) -> Option<Option<Outcome>> {
        let (_, slot) = self.slots.iter_mut().find(|(id, _)| id == match_id)?;
        *slot = next_filter_value(*slot);
        Some(*slot)
    }

    pub fn clear(&mut self) {
        for (_, value) in &mut self.slots {
            *value = None;
        }
    }

    /// Overwrites every slot with the scenario's own result for that match.
    pub fn apply_results(&mut self, scenario: &Scenario) {
        for (id, value) in &mut self.slots {
            *value = scenario.result(id);
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.slots.iter().all(|(_, value)| value.is_none())
    }

    pub fn matches(&self, scenario: &Scenario) -> bool {
        self.slots.iter().all(|(id, need)| match need {
            None => true,
            Some(need) => scenario.result(id) == Some(*need),
        })
    }
}

/// unconstrained -> W -> D -> L -> unconstrained
pub fn next_filter_value(value: Option<Outcome>) -> Option<Outcome> {
    match value {
        None => Some(Outcome::W),
        Some(Outcome::W) => Some(Outcome::D),
        Some(Outcome::D) => Some(Outcome::L),
        Some(Outcome::L) => None,
    }
}

/// A scenario that cannot be found never matches.
pub fn scenario_matches(filter: &FilterState, scenario: Option<&Scenario>) -> bool {
    scenario.is_some_and(|s| filter.matches(s))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellFlags {
    pub matches: bool,
    pub hovered: bool,
}

impl CellFlags {
    pub fn dim(self) -> bool {
        !self.matches
    }
}

/// Session state for the views: filter, hover, and the cell -> scenario table.
///
/// Every mutating call recomputes the flags of all registered cells before
/// returning, so readers never observe a stale mix.
#[derive(Debug, Clone, Default)]
pub struct HighlightEngine {
    filter: FilterState,
    hover: Option<String>,
    cells: Vec<String>,
    flags: Vec<CellFlags>,
}

impl HighlightEngine {
    pub fn new(filter: FilterState) -> Self {
        Self {
            filter,
            hover: None,
            cells: Vec::new(),
            flags: Vec::new(),
        }
    }

    pub fn for_store(store: &ScenarioStore) -> Self {
        let ids = store.match_ids();
        let filter = if ids.is_empty() {
            FilterState::default()
        } else {
            FilterState::new(ids)
        };
        Self::new(filter)
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hover.as_deref()
    }

    pub fn reset_cells(&mut self) {
        self.cells.clear();
        self.flags.clear();
    }

    pub fn register(&mut self, scenario_id: &str) -> CellId {
        self.cells.push(scenario_id.to_string());
        self.flags.push(CellFlags::default());
        self.cells.len() - 1
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn scenario_id(&self, cell: CellId) -> Option<&str> {
        self.cells.get(cell).map(String::as_str)
    }

    pub fn flags(&self, cell: CellId) -> CellFlags {
        self.flags.get(cell).copied().unwrap_or_default()
    }

    pub fn matched_scenarios(&self, store: &ScenarioStore) -> usize {
        store
            .scenarios()
            .iter()
            .filter(|s| self.filter.matches(s))
            .count()
    }

    pub fn hover_cell(&mut self, store: &ScenarioStore, cell: CellId) -> bool {
        let Some(id) = self.cells.get(cell).cloned() else {
            return false;
        };
        self.hover_scenario(store, Some(id))
    }

    /// Returns whether the hover target changed.
    pub fn hover_scenario(&mut self, store: &ScenarioStore, scenario_id: Option<String>) -> bool {
        if self.hover == scenario_id {
            return false;
        }
        self.hover = scenario_id;
        self.recompute(store);
        true
    }

    pub fn leave(&mut self, store: &ScenarioStore) -> bool {
        self.hover_scenario(store, None)
    }

    /// Replaces the whole filter with the clicked scenario's results.
    pub fn click_cell(&mut self, store: &ScenarioStore, cell: CellId) -> bool {
        let Some(scenario) = self.scenario_id(cell).and_then(|id| store.get(id)) else {
            return false;
        };
        self.filter.apply_results(scenario);
        self.recompute(store);
        true
    }

    pub fn set_filter(
        &mut self,
        store: &ScenarioStore,
        match_id: &str,
        value: Option<Outcome>,
    ) -> bool {
        if !self.filter.set(match_id, value) {
            return false;
        }
        self.recompute(store);
        true
    }

    pub fn cycle_filter(
        &mut self,
        store: &ScenarioStore,
        match_id: &str,
    ) -> Option<Option<Outcome>> {
        let value = self.filter.cycle(match_id)?;
        self.recompute(store);
        Some(value)
    }

    pub fn clear_filters(&mut self, store: &ScenarioStore) {
        self.filter.clear();
        self.recompute(store);
    }

    pub fn recompute(&mut self, store: &ScenarioStore) {
        let hover = self.hover.as_deref();
        for (flags, sid) in self.flags.iter_mut().zip(&self.cells) {
            flags.matches = scenario_matches(&self.filter, store.get(sid));
            flags.hovered = hover == Some(sid.as_str());
        }
    }
}
