use crate::i18n::Key;
use crate::model::CalloutSpec;

/// A callout bubble pinned next to one team's cell for one scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callout {
    pub id: String,
    pub team: String,
    pub scenario: String,
    // Offset from the anchor cell's top-left corner, in terminal cells.
    pub dx: i16,
    pub dy: i16,
    pub text: Key,
}

pub fn default_callout_specs() -> Vec<CalloutSpec> {
    vec![
        CalloutSpec {
            id: "apinaWinStillOut".to_string(),
            team: "APINA".to_string(),
            scenario: "S55".to_string(),
            dx: -28,
            dy: -4,
            text_key: Key::CalloutApina.name().to_string(),
        },
        CalloutSpec {
            id: "fivewayTie".to_string(),
            team: "SILKHAT".to_string(),
            scenario: "S54".to_string(),
            dx: -14,
            dy: -5,
            text_key: Key::CalloutFiveway.name().to_string(),
        },
    ]
}

/// Resolves text keys; specs with an unknown key come back in the second list.
pub fn resolve_callouts(specs: &[CalloutSpec]) -> (Vec<Callout>, Vec<CalloutSpec>) {
    let mut resolved = Vec::with_capacity(specs.len());
    let mut rejected = Vec::new();
    for spec in specs {
        match Key::from_name(&spec.text_key) {
            Some(text) => resolved.push(Callout {
                id: spec.id.clone(),
                team: spec.team.clone(),
                scenario: spec.scenario.clone(),
                dx: spec.dx,
                dy: spec.dy,
                text,
            }),
            None => rejected.push(spec.clone()),
        }
    }
    (resolved, rejected)
}

pub fn callout_for<'a>(
    callouts: &'a [Callout],
    team: &str,
    scenario_id: &str,
) -> Option<&'a Callout> {
    callouts
        .iter()
        .find(|c| c.team == team && c.scenario == scenario_id)
}
