use std::fs;
use std::path::PathBuf;

use playoff_scenarios::callouts::{callout_for, default_callout_specs, resolve_callouts};
use playoff_scenarios::highlight::HighlightEngine;
use playoff_scenarios::model::{Bucket, CalloutSpec, Outcome, parse_dataset_json};
use playoff_scenarios::store::ScenarioStore;
use playoff_scenarios::views::{build_bars, build_grid, build_views};

fn fixture_store() -> ScenarioStore {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures/scenarios.json");
    let raw = fs::read_to_string(path).expect("fixture file should be readable");
    ScenarioStore::new(parse_dataset_json(&raw).expect("fixture should parse"))
}

const SPARSE: &str = r#"{
  "meta": {"matches": [{"id": "m1", "label": "m1"}]},
  "scenarios": [
    {"id": "S1", "results": {"m1": "W"}, "byTeam": {"T": {"bucket": "red", "tie": 2}}},
    {"id": "S2", "results": {"m1": "D"}, "byTeam": {"T": {"bucket": "yellow", "tie": 4}}},
    {"id": "S3", "results": {"m1": "L"}, "byTeam": {}}
  ],
  "views": {
    "bars": {"T": {"rows": {"W": ["S1", "S9"], "D": ["S2"], "L": ["S3"]}}},
    "gigo": [{"r": 2, "c": 0, "title": "corner", "cells": ["S3", "S1"]}]
  }
}"#;

#[test]
fn bars_follow_descriptor_order_per_row() {
    let store = fixture_store();
    let mut engine = HighlightEngine::for_store(&store);
    let view = build_bars(&store, "APINA", &[], &mut engine).expect("APINA has bars");

    let outcomes: Vec<Outcome> = view.rows.iter().map(|r| r.outcome).collect();
    assert_eq!(outcomes, vec![Outcome::W, Outcome::D, Outcome::L]);

    let cfg = store.team_bars("APINA").unwrap();
    for row in &view.rows {
        let ids: Vec<&str> = row.cells.iter().map(|c| c.scenario_id.as_str()).collect();
        let expected: Vec<&str> = cfg.rows.row(row.outcome).iter().map(String::as_str).collect();
        assert_eq!(ids, expected);
        assert_eq!(row.cells.len(), 27);
    }
    assert_eq!(engine.cell_count(), 81);
}

#[test]
fn unknown_team_and_scenarios_are_skipped() {
    let store = ScenarioStore::new(parse_dataset_json(SPARSE).unwrap());
    let mut engine = HighlightEngine::for_store(&store);
    assert!(build_bars(&store, "NOPE", &[], &mut engine).is_none());

    let view = build_bars(&store, "T", &[], &mut engine).unwrap();
    let w: Vec<&str> = view.rows[0].cells.iter().map(|c| c.scenario_id.as_str()).collect();
    assert_eq!(w, vec!["S1"]);
}

#[test]
fn cells_carry_bucket_and_tie_only_for_tiebreakers() {
    let store = ScenarioStore::new(parse_dataset_json(SPARSE).unwrap());
    let mut engine = HighlightEngine::for_store(&store);
    let view = build_bars(&store, "T", &[], &mut engine).unwrap();

    let red = &view.rows[0].cells[0];
    assert_eq!(red.bucket, Bucket::Red);
    assert_eq!(red.tie, None);

    let yellow = &view.rows[1].cells[0];
    assert_eq!(yellow.bucket, Bucket::Yellow);
    assert_eq!(yellow.tie, Some(4));

    // No standing for the team: undecided, no number.
    let missing = &view.rows[2].cells[0];
    assert_eq!(missing.bucket, Bucket::Yellow);
    assert_eq!(missing.tie, None);
}

#[test]
fn grid_always_has_nine_blocks() {
    let store = ScenarioStore::new(parse_dataset_json(SPARSE).unwrap());
    let mut engine = HighlightEngine::for_store(&store);
    let grid = build_grid(&store, &[], &mut engine).unwrap();

    assert_eq!(grid.blocks.len(), 9);
    let positions: Vec<(u8, u8)> = grid.blocks.iter().map(|b| (b.r, b.c)).collect();
    assert_eq!(positions[0], (0, 0));
    assert_eq!(positions[8], (2, 2));

    let corner = &grid.blocks[6];
    assert_eq!(corner.title, "corner");
    let ids: Vec<&str> = corner.cells.iter().map(|c| c.scenario_id.as_str()).collect();
    assert_eq!(ids, vec!["S3", "S1"]);
    assert!(grid.blocks[0].title.is_empty());
    assert!(grid.blocks[0].cells.is_empty());
    assert_eq!(grid.team, "GiGO");
}

#[test]
fn build_views_registers_every_cell_once() {
    let store = fixture_store();
    let mut engine = HighlightEngine::for_store(&store);
    let views = build_views(&store, &[], &mut engine);

    assert_eq!(views.bars.len(), 4);
    assert_eq!(views.cell_count(), 4 * 81 + 81);
    assert_eq!(engine.cell_count(), views.cell_count());
    for cell in views.cells() {
        assert_eq!(engine.scenario_id(cell.id), Some(cell.scenario_id.as_str()));
    }

    // Rebuilding starts a fresh table instead of appending.
    let again = build_views(&store, &[], &mut engine);
    assert_eq!(engine.cell_count(), again.cell_count());
}

#[test]
fn default_callouts_tag_their_cells() {
    let store = fixture_store();
    let (callouts, rejected) = resolve_callouts(&default_callout_specs());
    assert!(rejected.is_empty());
    assert_eq!(callouts.len(), 2);

    let mut engine = HighlightEngine::for_store(&store);
    let views = build_views(&store, &callouts, &mut engine);

    let apina = views.callout_cell("apinaWinStillOut").expect("tagged");
    assert_eq!((apina.team.as_str(), apina.scenario_id.as_str()), ("APINA", "S55"));
    let fiveway = views.callout_cell("fivewayTie").expect("tagged");
    assert_eq!((fiveway.team.as_str(), fiveway.scenario_id.as_str()), ("SILKHAT", "S54"));

    // The bubbles sit on cells that show what their text claims.
    assert_eq!(apina.bucket, Bucket::Red);
    assert_eq!(store.get("S55").and_then(|s| s.result("m3")), Some(Outcome::W));
    assert_eq!(fiveway.bucket, Bucket::Yellow);
    assert_eq!(fiveway.tie, Some(5));

    let tagged = views.cells().filter(|c| c.callout.is_some()).count();
    assert_eq!(tagged, 2);
    assert!(callout_for(&callouts, "GiGO", "S54").is_none());
}

#[test]
fn callouts_with_unknown_text_are_rejected() {
    let specs = vec![CalloutSpec {
        id: "x".to_string(),
        team: "T".to_string(),
        scenario: "S1".to_string(),
        dx: 0,
        dy: 0,
        text_key: "no-such-key".to_string(),
    }];
    let (callouts, rejected) = resolve_callouts(&specs);
    assert!(callouts.is_empty());
    assert_eq!(rejected, specs);
}
