use std::collections::HashMap;

use crate::model::{CalloutSpec, Dataset, GridConfig, MatchMeta, Meta, Scenario, TeamBars};

/// Read-only index over a loaded dataset.
#[derive(Debug, Clone)]
pub struct ScenarioStore {
    meta: Meta,
    scenarios: Vec<Scenario>,
    by_id: HashMap<String, usize>,
    bars: Vec<(String, TeamBars)>,
    grid: Option<GridConfig>,
    callouts: Option<Vec<CalloutSpec>>,
}

impl ScenarioStore {
    pub fn new(dataset: Dataset) -> Self {
        let Dataset {
            meta,
            scenarios,
            views,
        } = dataset;

        let mut by_id = HashMap::with_capacity(scenarios.len());
        for (idx, scenario) in scenarios.iter().enumerate() {
            // First record wins if the file repeats an id.
            by_id.entry(scenario.id.clone()).or_insert(idx);
        }

        let mut bars_map = views.bars;
        let mut bars = Vec::with_capacity(bars_map.len());
        for team in &meta.teams {
            if let Some(cfg) = bars_map.remove(team) {
                bars.push((team.clone(), cfg));
            }
        }
        // Teams not named in meta.teams follow in key order.
        bars.extend(bars_map);

        Self {
            meta,
            scenarios,
            by_id,
            bars,
            grid: views.grid,
            callouts: views.callouts,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Scenario> {
        self.by_id.get(id).map(|&idx| &self.scenarios[idx])
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn title(&self) -> Option<&str> {
        self.meta.title.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn matches(&self) -> &[MatchMeta] {
        &self.meta.matches
    }

    pub fn match_ids(&self) -> Vec<String> {
        self.meta.matches.iter().map(|m| m.id.clone()).collect()
    }

    pub fn match_label<'a>(&'a self, match_id: &'a str) -> &'a str {
        self.meta
            .matches
            .iter()
            .find(|m| m.id == match_id)
            .map(|m| m.label.as_str())
            .filter(|label| !label.is_empty())
            .unwrap_or(match_id)
    }

    pub fn bar_teams(&self) -> impl Iterator<Item = &str> {
        self.bars.iter().map(|(team, _)| team.as_str())
    }

    pub fn team_bars(&self, team: &str) -> Option<&TeamBars> {
        self.bars
            .iter()
            .find(|(name, _)| name == team)
            .map(|(_, cfg)| cfg)
    }

    pub fn grid(&self) -> Option<&GridConfig> {
        self.grid.as_ref()
    }

    pub fn callout_specs(&self) -> Option<&[CalloutSpec]> {
        self.callouts.as_deref()
    }
}
