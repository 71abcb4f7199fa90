//! Per-nation input for government classification.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GovMapError, Result};

/// Political state of a source nation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationInput {
    /// Country tag, e.g. `ENG`
    pub tag: String,
    /// Current government type
    pub government: String,
    /// Ideology of the ruling party. Empty when unknown.
    #[serde(default)]
    pub ruling_ideology: String,
    /// Enacted level per reform track
    #[serde(default)]
    pub reforms: BTreeMap<String, String>,
}

impl NationInput {
    pub fn new(tag: impl Into<String>, government: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            government: government.into(),
            ..Self::default()
        }
    }

    pub fn with_ideology(mut self, ideology: impl Into<String>) -> Self {
        self.ruling_ideology = ideology.into();
        self
    }

    pub fn with_reform(mut self, track: impl Into<String>, level: impl Into<String>) -> Self {
        self.reforms.insert(track.into(), level.into());
        self
    }

    /// `(track, level)` pairs.
    pub fn enacted_levels(&self) -> impl Iterator<Item = (&str, &str)> {
        self.reforms.iter().map(|(t, l)| (t.as_str(), l.as_str()))
    }
}

/// Load a JSON array of nations.
pub fn load_nations(path: &Path) -> Result<Vec<NationInput>> {
    if !path.exists() {
        return Err(GovMapError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| GovMapError::NationParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Keep only the nation with the given tag.
pub fn select_nation(nations: Vec<NationInput>, tag: &str) -> Result<Vec<NationInput>> {
    let selected: Vec<_> = nations
        .into_iter()
        .filter(|n| n.tag.eq_ignore_ascii_case(tag))
        .collect();
    if selected.is_empty() {
        return Err(GovMapError::NationNotFound {
            tag: tag.to_string(),
        });
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NATIONS: &str = r#"[
        {
            "tag": "ENG",
            "government": "hms_government",
            "ruling_ideology": "liberal",
            "reforms": { "vote_franschise": "wealth_voting", "slavery": "no_slavery" }
        },
        { "tag": "RUS", "government": "absolute_monarchy" }
    ]"#;

    #[test]
    fn test_load_nations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nations.json");
        fs::write(&path, NATIONS).unwrap();

        let nations = load_nations(&path).unwrap();
        assert_eq!(nations.len(), 2);
        assert_eq!(
            nations[0],
            NationInput::new("ENG", "hms_government")
                .with_ideology("liberal")
                .with_reform("vote_franschise", "wealth_voting")
                .with_reform("slavery", "no_slavery")
        );
        assert_eq!(nations[1].ruling_ideology, "");
        assert!(nations[1].reforms.is_empty());
    }

    #[test]
    fn test_load_nations_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nations.json");
        fs::write(&path, r#"[{ "tag": "ENG" }]"#).unwrap();

        let result = load_nations(&path);
        assert!(matches!(result, Err(GovMapError::NationParse { .. })));
    }

    #[test]
    fn test_load_nations_missing() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_nations(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(GovMapError::SourceNotFound { .. })));
    }

    #[test]
    fn test_enacted_levels() {
        let nation = NationInput::new("ENG", "hms_government")
            .with_reform("slavery", "no_slavery")
            .with_reform("wage_reform", "low_minimum_wage");
        let levels: Vec<_> = nation.enacted_levels().collect();
        assert_eq!(
            levels,
            vec![("slavery", "no_slavery"), ("wage_reform", "low_minimum_wage")]
        );
    }

    #[test]
    fn test_select_nation() {
        let nations = vec![
            NationInput::new("ENG", "hms_government"),
            NationInput::new("RUS", "absolute_monarchy"),
        ];
        let selected = select_nation(nations.clone(), "rus").unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].tag, "RUS");

        let missing = select_nation(nations, "USA");
        assert!(matches!(missing, Err(GovMapError::NationNotFound { .. })));
    }
}
