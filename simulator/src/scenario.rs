//! Feed driving scenarios.

use serde::{Deserialize, Serialize};

/// A scripted feed session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Steps in the scenario.
    pub steps: Vec<ScenarioStep>,
}

/// A step in a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScenarioStep {
    /// Wait for a duration of feed time.
    Wait { seconds: u64 },
    /// Enter an amount into the input field.
    SetAmount { value: String },
    /// Flip the conversion direction.
    ToggleDirection,
    /// Enter and apply a manual rate.
    ApplyManualRate { rate: String },
    /// Reset to the real rate.
    ClearManualRate,
    /// Log the current feed snapshot.
    ShowSnapshot,
}

impl Scenario {
    /// Load a scenario by name.
    pub fn load(name: &str) -> anyhow::Result<Self> {
        match name {
            "basic-conversion" => Ok(Self::basic_conversion()),
            "manual-override" => Ok(Self::manual_override()),
            "drift-revoke" => Ok(Self::drift_revoke()),
            "high-volume" => Ok(Self::high_volume()),
            _ => Err(anyhow::anyhow!("Unknown scenario: {}", name)),
        }
    }

    /// Convert an amount, then flip the direction.
    fn basic_conversion() -> Self {
        Self {
            name: "basic-conversion".to_string(),
            description: "Single conversion followed by a direction flip".to_string(),
            steps: vec![
                ScenarioStep::SetAmount {
                    value: "100".to_string(),
                },
                ScenarioStep::ShowSnapshot,
                ScenarioStep::ToggleDirection,
                ScenarioStep::ShowSnapshot,
                ScenarioStep::Wait { seconds: 4 },
                ScenarioStep::ShowSnapshot,
            ],
        }
    }

    /// Activate a manual rate, convert under it, then clear.
    fn manual_override() -> Self {
        Self {
            name: "manual-override".to_string(),
            description: "Conversion under a user-applied manual rate".to_string(),
            steps: vec![
                ScenarioStep::ApplyManualRate {
                    rate: "1.2".to_string(),
                },
                ScenarioStep::SetAmount {
                    value: "250".to_string(),
                },
                ScenarioStep::ShowSnapshot,
                ScenarioStep::Wait { seconds: 4 },
                ScenarioStep::ClearManualRate,
                ScenarioStep::ShowSnapshot,
            ],
        }
    }

    /// Let the walk drift until the manual rate is revoked.
    fn drift_revoke() -> Self {
        Self {
            name: "drift-revoke".to_string(),
            description: "Manual rate revoked once the walk drifts beyond the threshold"
                .to_string(),
            steps: vec![
                ScenarioStep::ApplyManualRate {
                    rate: "1.2".to_string(),
                },
                ScenarioStep::SetAmount {
                    value: "100".to_string(),
                },
                ScenarioStep::Wait { seconds: 30 },
                ScenarioStep::ShowSnapshot,
            ],
        }
    }

    /// Many conversions in quick succession to churn the history.
    fn high_volume() -> Self {
        let mut steps = Vec::new();
        for i in 1..=20 {
            steps.push(ScenarioStep::SetAmount {
                value: (i * 37).to_string(),
            });
        }
        steps.push(ScenarioStep::ShowSnapshot);

        Self {
            name: "high-volume".to_string(),
            description: "History churn under rapid input changes".to_string(),
            steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_known_scenarios() {
        for name in [
            "basic-conversion",
            "manual-override",
            "drift-revoke",
            "high-volume",
        ] {
            let scenario = Scenario::load(name).unwrap();
            assert_eq!(scenario.name, name);
            assert!(!scenario.steps.is_empty());
        }
    }

    #[test]
    fn test_load_unknown_scenario_fails() {
        assert!(Scenario::load("nope").is_err());
    }
}
