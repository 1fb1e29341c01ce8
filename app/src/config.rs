//! Application settings loaded via OrthoConfig.
//!
//! Settings come from `SENIOR_SPARK_*` environment variables and config
//! files. Command-line flags parsed by the binary are applied on top.

use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_STORAGE_DIR: &str = ".senior-spark";

/// Runtime configuration for the `senior-spark` binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SENIOR_SPARK")]
pub struct AppSettings {
    /// Directory holding the persisted session entries.
    pub storage_dir: Option<PathBuf>,
    /// Seed registry file replacing the built-in catalog.
    pub seed_registry: Option<PathBuf>,
    /// Named demo seed whose generated groups are added to the catalog.
    pub demo_seed: Option<String>,
    /// Emit logs as JSON lines instead of compact text.
    #[ortho_config(default = false)]
    pub log_json: bool,
}

impl AppSettings {
    /// Storage directory, falling back to `.senior-spark` in the working
    /// directory.
    pub fn storage_dir(&self) -> &Path {
        self.storage_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_STORAGE_DIR))
    }

    /// Seed registry override, if any.
    pub fn seed_registry(&self) -> Option<&Path> {
        self.seed_registry.as_deref()
    }

    /// Demo seed name, if any.
    pub fn demo_seed(&self) -> Option<&str> {
        self.demo_seed.as_deref()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "SENIOR_SPARK_STORAGE_DIR",
        "SENIOR_SPARK_SEED_REGISTRY",
        "SENIOR_SPARK_DEMO_SEED",
        "SENIOR_SPARK_LOG_JSON",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("senior-spark")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.storage_dir(), Path::new(DEFAULT_STORAGE_DIR));
        assert!(settings.seed_registry().is_none());
        assert!(settings.demo_seed().is_none());
        assert!(!settings.log_json);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("SENIOR_SPARK_STORAGE_DIR", Some("/tmp/spark".to_owned())),
            ("SENIOR_SPARK_SEED_REGISTRY", Some("/tmp/catalog.json".to_owned())),
            ("SENIOR_SPARK_DEMO_SEED", Some("sunny-heron".to_owned())),
            ("SENIOR_SPARK_LOG_JSON", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.storage_dir(), Path::new("/tmp/spark"));
        assert_eq!(settings.seed_registry(), Some(Path::new("/tmp/catalog.json")));
        assert_eq!(settings.demo_seed(), Some("sunny-heron"));
        assert!(settings.log_json);
    }
}
