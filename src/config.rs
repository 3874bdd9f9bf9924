//! Persisted source toggles.
//!
//! The store keeps one small JSON object on disk recording which sources the
//! user has enabled. It is read once at startup and written back whenever a
//! toggle changes; everything else in [`crate::state::SearchState`] is
//! session-local.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::state::types::Source;

/// What: Per-source enabled flags, round-tripped through the config file.
///
/// Inputs:
/// - Loaded from `config.json` at startup; mutated when the user toggles a
///   source in the UI.
///
/// Output:
/// - Serialized back with the store's historical JSON keys
///   (`searchPacman`, `searchAUR`, `searchFlatpak`, `searchSnap`).
///
/// Details:
/// - Unknown or missing keys fall back to enabled so a stale or truncated
///   file never hides a source silently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceToggles {
    pub search_pacman: bool,
    #[serde(rename = "searchAUR")]
    pub search_aur: bool,
    pub search_flatpak: bool,
    pub search_snap: bool,
}

impl Default for SourceToggles {
    fn default() -> Self {
        Self {
            search_pacman: true,
            search_aur: true,
            search_flatpak: true,
            search_snap: true,
        }
    }
}

impl SourceToggles {
    /// Whether `source` is enabled.
    pub fn enabled(&self, source: Source) -> bool {
        match source {
            Source::Pacman => self.search_pacman,
            Source::Aur => self.search_aur,
            Source::Flatpak => self.search_flatpak,
            Source::Snap => self.search_snap,
        }
    }
}

/// What: Resolve the Omnipac configuration directory, ensuring it exists.
///
/// Inputs:
/// - None (reads `HOME` and `XDG_CONFIG_HOME`).
///
/// Output:
/// - `PathBuf` pointing to the config directory.
///
/// Details:
/// - Prefers `$HOME/.config/omnipac`, falling back to
///   `XDG_CONFIG_HOME/omnipac` when `HOME` is unavailable.
pub fn config_dir() -> PathBuf {
    if let Ok(home) = env::var("HOME") {
        let dir = Path::new(&home).join(".config").join("omnipac");
        if std::fs::create_dir_all(&dir).is_ok() {
            return dir;
        }
    }
    let base = env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".config"));
    let dir = base.join("omnipac");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Path of the toggle config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// What: Load the persisted toggles from disk.
///
/// Inputs:
/// - None (reads [`config_path`]).
///
/// Output:
/// - The saved `SourceToggles`, or `SourceToggles::default()` when the file
///   is missing or unreadable.
///
/// Details:
/// - Parse failures are logged and degrade to the default; a broken config
///   file never prevents the store from starting.
pub fn load() -> SourceToggles {
    let path = config_path();
    match std::fs::read_to_string(&path) {
        Ok(body) => match serde_json::from_str(&body) {
            Ok(toggles) => toggles,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
                SourceToggles::default()
            }
        },
        Err(_) => SourceToggles::default(),
    }
}

/// Write the toggles back to [`config_path`].
pub fn save(toggles: &SourceToggles) -> std::io::Result<()> {
    let path = config_path();
    let body = serde_json::to_string_pretty(toggles).map_err(std::io::Error::other)?;
    std::fs::write(&path, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_serialize_with_store_keys() {
        let v = serde_json::to_value(SourceToggles::default()).unwrap();
        let obj = v.as_object().unwrap();
        for key in ["searchPacman", "searchAUR", "searchFlatpak", "searchSnap"] {
            assert_eq!(obj.get(key).and_then(|b| b.as_bool()), Some(true));
        }
    }

    #[test]
    fn toggles_missing_keys_default_to_enabled() {
        let toggles: SourceToggles = serde_json::from_str(r#"{"searchSnap": false}"#).unwrap();
        assert!(toggles.search_pacman);
        assert!(toggles.search_aur);
        assert!(toggles.search_flatpak);
        assert!(!toggles.search_snap);
    }

    #[test]
    fn save_and_load_round_trip_under_home() {
        let _guard = crate::test_utils::lock_env_mutex();
        let orig_home = std::env::var_os("HOME");
        let base = std::env::temp_dir().join(format!(
            "omnipac_test_config_{}_{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        let _ = std::fs::create_dir_all(&base);
        unsafe { std::env::set_var("HOME", base.display().to_string()) };

        let toggles = SourceToggles {
            search_pacman: true,
            search_aur: false,
            search_flatpak: true,
            search_snap: false,
        };
        save(&toggles).unwrap();
        assert_eq!(load(), toggles);

        // Corrupt file degrades to defaults.
        std::fs::write(config_path(), "{not json").unwrap();
        assert_eq!(load(), SourceToggles::default());

        unsafe {
            if let Some(v) = orig_home {
                std::env::set_var("HOME", v);
            } else {
                std::env::remove_var("HOME");
            }
        }
        let _ = std::fs::remove_dir_all(&base);
    }
}
