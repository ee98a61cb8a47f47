use std::collections::BTreeMap;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GRID_TEAM: &str = "GiGO";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    W,
    D,
    L,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [Outcome::W, Outcome::D, Outcome::L];

    pub fn label(self) -> &'static str {
        match self {
            Outcome::W => "W",
            Outcome::D => "D",
            Outcome::L => "L",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Green,
    Yellow,
    Red,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub bucket: Bucket,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tie: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    // Keyed by match id (m1..m4).
    #[serde(default)]
    pub results: BTreeMap<String, Outcome>,
    // Keeps the data file's team order.
    #[serde(default, rename = "byTeam")]
    pub by_team: IndexMap<String, TeamStanding>,
}

impl Scenario {
    pub fn result(&self, match_id: &str) -> Option<Outcome> {
        self.results.get(match_id).copied()
    }

    pub fn standing(&self, team: &str) -> Option<&TeamStanding> {
        self.by_team.get(team)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchMeta {
    pub id: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub matches: Vec<MatchMeta>,
    // Display order of the bar views.
    #[serde(default)]
    pub teams: Vec<String>,
}

/// Scenario ids per self-outcome row of one team's bar view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRows {
    #[serde(default, rename = "W")]
    pub win: Vec<String>,
    #[serde(default, rename = "D")]
    pub draw: Vec<String>,
    #[serde(default, rename = "L")]
    pub loss: Vec<String>,
}

impl TeamRows {
    pub fn row(&self, outcome: Outcome) -> &[String] {
        match outcome {
            Outcome::W => &self.win,
            Outcome::D => &self.draw,
            Outcome::L => &self.loss,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamBars {
    #[serde(default)]
    pub rows: TeamRows,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBlock {
    pub r: u8,
    pub c: u8,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub cells: Vec<String>,
}

// `views.gigo` shows up both as a bare block list and as `{ team, blocks }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum GridDescriptor {
    Blocks(Vec<GridBlock>),
    Config {
        #[serde(default)]
        team: Option<String>,
        #[serde(default)]
        blocks: Vec<GridBlock>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    pub team: String,
    pub blocks: Vec<GridBlock>,
}

impl GridConfig {
    pub fn block(&self, r: u8, c: u8) -> Option<&GridBlock> {
        self.blocks.iter().find(|b| b.r == r && b.c == c)
    }
}

impl From<GridDescriptor> for GridConfig {
    fn from(desc: GridDescriptor) -> Self {
        match desc {
            GridDescriptor::Blocks(blocks) => GridConfig {
                team: DEFAULT_GRID_TEAM.to_string(),
                blocks,
            },
            GridDescriptor::Config { team, blocks } => GridConfig {
                team: team
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_GRID_TEAM.to_string()),
                blocks,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalloutSpec {
    pub id: String,
    pub team: String,
    pub scenario: String,
    pub dx: i16,
    pub dy: i16,
    #[serde(rename = "textKey")]
    pub text_key: String,
}

#[derive(Debug, Clone, Default)]
pub struct Views {
    pub bars: BTreeMap<String, TeamBars>,
    pub grid: Option<GridConfig>,
    pub callouts: Option<Vec<CalloutSpec>>,
}

#[derive(Debug, Deserialize, Default)]
struct RawViews {
    #[serde(default)]
    bars: BTreeMap<String, TeamBars>,
    #[serde(default)]
    gigo: Option<GridDescriptor>,
    #[serde(default)]
    callouts: Option<Vec<CalloutSpec>>,
}

#[derive(Debug, Deserialize)]
struct RawDataset {
    #[serde(default)]
    meta: Meta,
    scenarios: Vec<Scenario>,
    #[serde(default)]
    views: RawViews,
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub meta: Meta,
    pub scenarios: Vec<Scenario>,
    pub views: Views,
}

pub fn parse_dataset_json(raw: &str) -> Result<Dataset> {
    let raw: RawDataset = serde_json::from_str(raw).context("invalid scenario data json")?;
    Ok(Dataset {
        meta: raw.meta,
        scenarios: raw.scenarios,
        views: Views {
            bars: raw.views.bars,
            grid: raw.views.gigo.map(GridConfig::from),
            callouts: raw.views.callouts,
        },
    })
}
