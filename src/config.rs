use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    ease::{Ease, FoldState},
    foundation::error::FoldResult,
    params::BoxParameters,
};

/// On-disk description of a box and its fold state.
///
/// Every field is optional in JSON; missing fields fall back to the defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FoldConfig {
    pub parameters: BoxParameters,
    pub ease: Ease,
    pub progress: f64,
}

impl FoldConfig {
    /// Parses and validates a config document.
    pub fn from_json_str(s: &str) -> FoldResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.parameters.validate()?;
        Ok(cfg)
    }

    /// Reads a config file; IO and parse errors carry the path.
    pub fn load(path: &Path) -> FoldResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse config JSON '{}'", path.display()))?;
        cfg.parameters.validate()?;
        Ok(cfg)
    }

    pub fn to_json_pretty(&self) -> FoldResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn state(&self) -> FoldState {
        FoldState::with_ease(self.progress, self.ease)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::error::FoldError;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = FoldConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, FoldConfig::default());
        assert_eq!(cfg.ease, Ease::InOutCubic);
        assert_eq!(cfg.state(), FoldState::FLAT);
    }

    #[test]
    fn partial_parameters_merge_with_defaults() {
        let cfg = FoldConfig::from_json_str(
            r#"{"parameters": {"depth": 7.5}, "ease": "Linear", "progress": 0.25}"#,
        )
        .unwrap();
        assert_eq!(cfg.parameters.depth, 7.5);
        assert_eq!(cfg.parameters.height, BoxParameters::default().height);
        assert_eq!(cfg.state().close_progress(), 0.25);
    }

    #[test]
    fn invalid_dimensions_are_rejected_on_load() {
        let err = FoldConfig::from_json_str(r#"{"parameters": {"height": 0}}"#).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn malformed_json_is_a_serde_error() {
        let err = FoldConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, FoldError::Serde(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = FoldConfig::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, FoldError::Other(_)));
        assert!(format!("{err:#}").contains("does/not/exist.json"));
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = std::path::PathBuf::from("target").join("config_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.json");
        std::fs::write(&path, "{ \"progress\": ").unwrap();

        let err = FoldConfig::load(&path).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("broken.json"), "{msg}");
        assert!(msg.contains("parse config JSON"), "{msg}");
    }

    #[test]
    fn json_roundtrip() {
        let cfg = FoldConfig {
            progress: 0.5,
            ..FoldConfig::default()
        };
        let s = cfg.to_json_pretty().unwrap();
        assert_eq!(FoldConfig::from_json_str(&s).unwrap(), cfg);
    }
}
