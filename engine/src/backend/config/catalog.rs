use anyhow::Context;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use shared::{Segment, SegmentDisplay, SegmentId, SegmentKind};
use std::collections::HashSet;
use std::path::Path;

use crate::backend::error::{WheelError, WheelResult};

/// Bonus share of the probability mass when a catalog does not set one
pub const DEFAULT_BONUS_PROBABILITY: f64 = 0.01;

const EMBEDDED_CATALOG: &str = include_str!("../../../config/scenarios.yaml");

fn default_bonus_probability() -> f64 {
    DEFAULT_BONUS_PROBABILITY
}

fn default_days() -> Vec<u32> {
    vec![1, 2]
}

fn default_color() -> String {
    "#FFFFFF".to_string()
}

fn default_text_color() -> String {
    "#000000".to_string()
}

/// Raw catalog file as written by the event organiser
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    scope_prefix: String,
    #[serde(default = "default_bonus_probability")]
    bonus_probability: f64,
    #[serde(default = "default_days")]
    days: Vec<u32>,
    #[serde(default)]
    scenarios: Vec<ScenarioEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScenarioEntry {
    id: String,
    name: String,
    #[serde(default)]
    bonus_probability: Option<f64>,
    #[serde(default)]
    segments: Vec<SegmentEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SegmentEntry {
    id: SegmentId,
    kind: SegmentKind,
    #[serde(default)]
    daily_quota: Option<u32>,
    label: String,
    #[serde(default = "default_color")]
    color: String,
    #[serde(default = "default_text_color")]
    text_color: String,
}

/// A validated wheel configuration for one festival
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub bonus_probability: f64,
    /// Segments in wheel order
    pub segments: Vec<Segment>,
    pub displays: Vec<SegmentDisplay>,
}

impl Scenario {
    /// Build a scenario from bare segments, labelling them "Segment <id>"
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        bonus_probability: f64,
        segments: Vec<Segment>,
    ) -> WheelResult<Self> {
        let displays = segments
            .iter()
            .map(|segment| SegmentDisplay {
                id: segment.id,
                label: format!("Segment {}", segment.id),
                color: default_color(),
                text_color: default_text_color(),
            })
            .collect();

        let scenario = Self {
            id: id.into(),
            name: name.into(),
            bonus_probability,
            segments,
            displays,
        };
        scenario.validate()?;
        Ok(scenario)
    }

    /// Check the invariants the selector relies on
    pub fn validate(&self) -> WheelResult<()> {
        if !(0.0..1.0).contains(&self.bonus_probability) {
            return Err(WheelError::InvalidBonusProbability {
                value: self.bonus_probability,
            });
        }

        if self.segments.is_empty() {
            return Err(WheelError::EmptyConfiguration {
                scenario: self.id.clone(),
            });
        }

        let mut seen = HashSet::new();
        for segment in &self.segments {
            if !seen.insert(segment.id) {
                return Err(WheelError::DuplicateSegment {
                    scenario: self.id.clone(),
                    id: segment.id,
                });
            }

            match (segment.kind, segment.daily_quota) {
                (SegmentKind::Lot, None) => {
                    return Err(WheelError::InvalidQuota {
                        scenario: self.id.clone(),
                        id: segment.id,
                        reason: "lot segments need a daily quota",
                    });
                }
                (SegmentKind::Bonus, Some(_)) => {
                    return Err(WheelError::InvalidQuota {
                        scenario: self.id.clone(),
                        id: segment.id,
                        reason: "bonus segments are unlimited",
                    });
                }
                _ => {}
            }
        }

        let bonus_count = self.segments.iter().filter(|s| s.is_bonus()).count();
        match bonus_count {
            0 => Err(WheelError::MissingBonus {
                scenario: self.id.clone(),
            }),
            1 => Ok(()),
            count => Err(WheelError::MultipleBonus {
                scenario: self.id.clone(),
                count,
            }),
        }
    }

    pub fn display(&self, id: SegmentId) -> Option<&SegmentDisplay> {
        self.displays.iter().find(|d| d.id == id)
    }

    /// Display label, falling back to the numeric id
    pub fn label(&self, id: SegmentId) -> String {
        self.display(id)
            .map(|d| d.label.clone())
            .unwrap_or_else(|| format!("#{}", id))
    }
}

/// The full set of festivals plus the storage scope they share
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioCatalog {
    scope_prefix: String,
    days: Vec<u32>,
    scenarios: Vec<Scenario>,
}

impl ScenarioCatalog {
    /// Environment variable naming a catalog file to use instead of the embedded one
    pub const CONFIG_ENV_VAR: &'static str = "PRIZE_WHEEL_CONFIG";

    /// The catalog compiled into the crate
    pub fn embedded() -> WheelResult<Self> {
        Self::from_yaml_str(EMBEDDED_CATALOG)
    }

    /// Load from `PRIZE_WHEEL_CONFIG` when set, otherwise the embedded catalog
    pub fn from_env_or_default() -> WheelResult<Self> {
        match std::env::var(Self::CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => {
                info!("Loading scenario catalog from {}", path);
                Self::from_path(path.trim())
            }
            _ => {
                debug!("{} not set, using embedded catalog", Self::CONFIG_ENV_VAR);
                Self::embedded()
            }
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> WheelResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario catalog {}", path.display()))?;
        Self::from_yaml_str(&yaml)
    }

    pub fn from_yaml_str(yaml: &str) -> WheelResult<Self> {
        let file: CatalogFile = serde_yaml::from_str(yaml)
            .map_err(|e| WheelError::InvalidCatalog(format!("unparsable catalog: {}", e)))?;
        Self::from_file(file)
    }

    fn from_file(file: CatalogFile) -> WheelResult<Self> {
        if file.scope_prefix.trim().is_empty() {
            return Err(WheelError::InvalidCatalog(
                "scope_prefix must not be empty".to_string(),
            ));
        }
        if file.days.is_empty() {
            return Err(WheelError::InvalidCatalog(
                "at least one day must be configured".to_string(),
            ));
        }
        if file.scenarios.is_empty() {
            return Err(WheelError::InvalidCatalog(
                "at least one scenario must be configured".to_string(),
            ));
        }

        let mut ids = HashSet::new();
        let mut scenarios = Vec::with_capacity(file.scenarios.len());
        for entry in file.scenarios {
            if !ids.insert(entry.id.clone()) {
                return Err(WheelError::InvalidCatalog(format!(
                    "scenario '{}' is declared more than once",
                    entry.id
                )));
            }

            let (segments, displays) = entry
                .segments
                .into_iter()
                .map(|s| {
                    (
                        Segment {
                            id: s.id,
                            kind: s.kind,
                            daily_quota: s.daily_quota,
                        },
                        SegmentDisplay {
                            id: s.id,
                            label: s.label,
                            color: s.color,
                            text_color: s.text_color,
                        },
                    )
                })
                .unzip();

            let scenario = Scenario {
                id: entry.id,
                name: entry.name,
                bonus_probability: entry.bonus_probability.unwrap_or(file.bonus_probability),
                segments,
                displays,
            };
            scenario.validate()?;
            scenarios.push(scenario);
        }

        info!(
            "Loaded scenario catalog '{}' with {} scenarios",
            file.scope_prefix,
            scenarios.len()
        );

        Ok(Self {
            scope_prefix: file.scope_prefix,
            days: file.days,
            scenarios,
        })
    }

    pub fn scope_prefix(&self) -> &str {
        &self.scope_prefix
    }

    pub fn days(&self) -> &[u32] {
        &self.days
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn scenario(&self, id: &str) -> WheelResult<&Scenario> {
        self.scenarios
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| WheelError::UnknownScenario(id.to_string()))
    }

    /// Key under which a scenario's ledger is persisted: `<scope-prefix>-<scenario-id>`
    pub fn storage_key(&self, scenario_id: &str) -> String {
        format!("{}-{}", self.scope_prefix, scenario_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
scope_prefix: test-wheel
scenarios:
  - id: fair
    name: Fair
    segments:
      - { id: 1, kind: lot, daily_quota: 2, label: "A" }
      - { id: 2, kind: bonus, label: "Bonus" }
"#;

    #[test]
    fn test_embedded_catalog_is_valid() {
        let catalog = ScenarioCatalog::embedded().expect("embedded catalog should load");
        assert!(!catalog.scenarios().is_empty());
        assert_eq!(catalog.days(), &[1, 2]);

        for scenario in catalog.scenarios() {
            assert_eq!(scenario.segments.iter().filter(|s| s.is_bonus()).count(), 1);
            assert_eq!(scenario.segments.len(), scenario.displays.len());
        }
    }

    #[test]
    fn test_defaults_applied() {
        let catalog = ScenarioCatalog::from_yaml_str(MINIMAL).unwrap();
        let scenario = catalog.scenario("fair").unwrap();

        assert_eq!(scenario.bonus_probability, DEFAULT_BONUS_PROBABILITY);
        assert_eq!(catalog.days(), &[1, 2]);
        assert_eq!(scenario.display(1).unwrap().color, "#FFFFFF");
        assert_eq!(scenario.label(2), "Bonus");
        assert_eq!(scenario.label(99), "#99");
    }

    #[test]
    fn test_scenario_probability_override() {
        let catalog = ScenarioCatalog::embedded().unwrap();
        let harvest = catalog.scenario("harvest-fair").unwrap();
        assert_eq!(harvest.bonus_probability, 0.02);
    }

    #[test]
    fn test_storage_key() {
        let catalog = ScenarioCatalog::from_yaml_str(MINIMAL).unwrap();
        assert_eq!(catalog.storage_key("fair"), "test-wheel-fair");
    }

    #[test]
    fn test_unknown_scenario() {
        let catalog = ScenarioCatalog::from_yaml_str(MINIMAL).unwrap();
        let result = catalog.scenario("nope");
        assert!(matches!(result, Err(WheelError::UnknownScenario(id)) if id == "nope"));
    }

    #[test]
    fn test_empty_segment_list_rejected() {
        let yaml = r#"
scope_prefix: w
scenarios:
  - { id: empty, name: Empty, segments: [] }
"#;
        let result = ScenarioCatalog::from_yaml_str(yaml);
        assert!(matches!(result, Err(WheelError::EmptyConfiguration { .. })));
    }

    #[test]
    fn test_missing_bonus_rejected() {
        let result = Scenario::new("s", "S", 0.01, vec![Segment::lot(1, 3)]);
        assert!(matches!(result, Err(WheelError::MissingBonus { .. })));
    }

    #[test]
    fn test_multiple_bonus_rejected() {
        let result = Scenario::new(
            "s",
            "S",
            0.01,
            vec![Segment::lot(1, 3), Segment::bonus(2), Segment::bonus(3)],
        );
        assert!(matches!(result, Err(WheelError::MultipleBonus { count: 2, .. })));
    }

    #[test]
    fn test_duplicate_segment_rejected() {
        let result = Scenario::new(
            "s",
            "S",
            0.01,
            vec![Segment::lot(1, 3), Segment::lot(1, 4), Segment::bonus(2)],
        );
        assert!(matches!(result, Err(WheelError::DuplicateSegment { id: 1, .. })));
    }

    #[test]
    fn test_quota_shape_rejected() {
        let lot_without_quota = Segment {
            id: 1,
            kind: SegmentKind::Lot,
            daily_quota: None,
        };
        let result = Scenario::new("s", "S", 0.01, vec![lot_without_quota, Segment::bonus(2)]);
        assert!(matches!(result, Err(WheelError::InvalidQuota { id: 1, .. })));

        let limited_bonus = Segment {
            id: 2,
            kind: SegmentKind::Bonus,
            daily_quota: Some(5),
        };
        let result = Scenario::new("s", "S", 0.01, vec![Segment::lot(1, 3), limited_bonus]);
        assert!(matches!(result, Err(WheelError::InvalidQuota { id: 2, .. })));
    }

    #[test]
    fn test_bonus_probability_range() {
        let segments = vec![Segment::lot(1, 3), Segment::bonus(2)];
        assert!(Scenario::new("s", "S", 0.0, segments.clone()).is_ok());
        assert!(matches!(
            Scenario::new("s", "S", 1.0, segments.clone()),
            Err(WheelError::InvalidBonusProbability { .. })
        ));
        assert!(matches!(
            Scenario::new("s", "S", -0.1, segments),
            Err(WheelError::InvalidBonusProbability { .. })
        ));
    }

    #[test]
    fn test_catalog_level_errors() {
        let no_scenarios = "scope_prefix: w\nscenarios: []\n";
        assert!(matches!(
            ScenarioCatalog::from_yaml_str(no_scenarios),
            Err(WheelError::InvalidCatalog(_))
        ));

        let no_days = format!("{}days: []\n", MINIMAL);
        assert!(matches!(
            ScenarioCatalog::from_yaml_str(&no_days),
            Err(WheelError::InvalidCatalog(_))
        ));

        assert!(matches!(
            ScenarioCatalog::from_yaml_str("not: [valid"),
            Err(WheelError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catalog.yaml");
        std::fs::write(&path, MINIMAL).unwrap();

        let catalog = ScenarioCatalog::from_path(&path).unwrap();
        assert_eq!(catalog.scope_prefix(), "test-wheel");

        let missing = ScenarioCatalog::from_path(dir.path().join("missing.yaml"));
        assert!(matches!(missing, Err(WheelError::Storage(_))));
    }
}
