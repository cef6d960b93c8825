//! Persistent driver settings (JSON file in the user config directory).

use std::fs;
use std::path::{Path, PathBuf};

use phonema_core::EngineConfig;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const EXCEPTIONS_ENV: &str = "PHONEMA_EXCEPTIONS";
pub const THREADS_ENV: &str = "PHONEMA_THREADS";

const MAX_THREADS: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct AppSettings {
    /// Exception dictionary file; `None` uses the built-in one.
    pub exceptions_path: Option<PathBuf>,
    /// Worker threads. `0` means one per available core.
    pub threads: usize,
    pub position_dependent: bool,
    pub report_ambiguous_stress: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            exceptions_path: None,
            threads: 0,
            position_dependent: false,
            report_ambiguous_stress: true,
        }
    }
}

impl AppSettings {
    pub fn normalize(&mut self) {
        self.exceptions_path = self
            .exceptions_path
            .as_ref()
            .and_then(|p| p.to_str())
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        if self.threads == 0 {
            self.threads = std::thread::available_parallelism()
                .map(usize::from)
                .unwrap_or(1);
        }
        self.threads = self.threads.clamp(1, MAX_THREADS);
    }

    /// Apply `PHONEMA_EXCEPTIONS` / `PHONEMA_THREADS` from the process
    /// environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(EXCEPTIONS_ENV).filter(|p| !p.trim().is_empty()) {
            self.exceptions_path = Some(PathBuf::from(path.trim()));
        }
        if let Some(raw) = lookup(THREADS_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(threads) => self.threads = threads,
                Err(_) => warn!("ignoring {THREADS_ENV}={raw:?}: not a number"),
            }
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            exceptions_path: self.exceptions_path.clone(),
            report_ambiguous_stress: self.report_ambiguous_stress,
        }
    }
}

pub fn default_settings_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("Phonema")
            .join("settings.json")
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                std::env::var_os("HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
                    .join(".config")
            })
            .join("phonema")
            .join("settings.json")
    }
}

/// Read settings from `path`. A missing file gives the defaults; an
/// unparsable one is logged and also gives the defaults.
pub fn load_settings(path: &Path) -> AppSettings {
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => serde_json::from_str::<AppSettings>(&raw).unwrap_or_else(|e| {
            warn!("ignoring settings file {:?}: {e}", path);
            AppSettings::default()
        }),
        Err(_) => AppSettings::default(),
    };
    settings.normalize();
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let settings = load_settings(Path::new("/nonexistent/phonema/settings.json"));
        assert_eq!(settings.exceptions_path, None);
        assert!(settings.threads >= 1);
        assert!(settings.report_ambiguous_stress);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "threads": 500, "positionDependent": true }"#).unwrap();
        let settings = load_settings(&path);
        assert_eq!(settings.threads, MAX_THREADS);
        assert!(settings.position_dependent);
        assert!(settings.report_ambiguous_stress);
    }

    #[test]
    fn garbage_json_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        let settings = load_settings(&path);
        assert!(!settings.position_dependent);
    }

    #[test]
    fn blank_exceptions_path_is_dropped() {
        let mut settings = AppSettings {
            exceptions_path: Some(PathBuf::from("   ")),
            threads: 2,
            ..AppSettings::default()
        };
        settings.normalize();
        assert_eq!(settings.exceptions_path, None);
        assert_eq!(settings.threads, 2);
    }

    #[test]
    fn environment_overrides() {
        let mut settings = AppSettings::default();
        settings.apply_overrides_from(|key| match key {
            EXCEPTIONS_ENV => Some(" /srv/exceptions.txt ".into()),
            THREADS_ENV => Some("3".into()),
            _ => None,
        });
        assert_eq!(
            settings.exceptions_path,
            Some(PathBuf::from("/srv/exceptions.txt"))
        );
        assert_eq!(settings.threads, 3);
    }

    #[test]
    fn bad_thread_override_is_ignored() {
        let mut settings = AppSettings {
            threads: 4,
            ..AppSettings::default()
        };
        settings.apply_overrides_from(|key| (key == THREADS_ENV).then(|| "many".into()));
        assert_eq!(settings.threads, 4);
    }

    #[test]
    fn engine_config_mirrors_settings() {
        let settings = AppSettings {
            exceptions_path: Some(PathBuf::from("ex.txt")),
            report_ambiguous_stress: false,
            ..AppSettings::default()
        };
        let config = settings.engine_config();
        assert_eq!(config.exceptions_path, Some(PathBuf::from("ex.txt")));
        assert!(!config.report_ambiguous_stress);
    }
}
