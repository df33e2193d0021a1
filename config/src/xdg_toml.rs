//! Load the `[env]` table from `$XDG_CONFIG_HOME/<app>/config.toml`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::LoadError;

/// Platform config dir (`$XDG_CONFIG_HOME`, else `~/.config`, on Linux).
fn config_home() -> Result<PathBuf, LoadError> {
    dirs::config_dir()
        .ok_or_else(|| LoadError::XdgPath("no config directory for this platform".to_string()))
}

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, String>,
}

/// Reads `<config_home>/<app_name>/config.toml`. Missing file or section returns an empty map.
pub(crate) fn load_env_map_in(config_home: &Path, app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    let path = config_home.join(app_name).join("config.toml");
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read_to_string(&path).map_err(LoadError::XdgRead)?;
    let config: ConfigFile = toml::from_str(&content)?;
    Ok(config.env)
}

/// Returns env key-value pairs from the `[env]` section of the app's XDG config file.
pub fn load_env_map(app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    load_env_map_in(&config_home()?, app_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(app: &str, content: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let app_dir = dir.path().join(app);
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(app_dir.join("config.toml"), content).unwrap();
        dir
    }

    #[test]
    fn config_home_is_platform_config_dir() {
        assert_eq!(config_home().ok(), dirs::config_dir());
    }

    #[test]
    fn missing_config_returns_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        let map = load_env_map_in(dir.path(), "process-advisor").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn reads_env_table() {
        let dir = write_config(
            "process-advisor",
            r#"
[env]
GEMINI_API_KEY = "from_toml"
PORT = "6000"
"#,
        );
        let map = load_env_map_in(dir.path(), "process-advisor").unwrap();
        assert_eq!(map.get("GEMINI_API_KEY").map(String::as_str), Some("from_toml"));
        assert_eq!(map.get("PORT").map(String::as_str), Some("6000"));
    }

    #[test]
    fn config_without_env_section_returns_empty_map() {
        let dir = write_config("noenv", "[other]\nkey = \"ignored\"\n");
        let map = load_env_map_in(dir.path(), "noenv").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn invalid_toml_returns_xdg_parse_error() {
        let dir = write_config("badapp", "not valid toml [[[\n");
        let result = load_env_map_in(dir.path(), "badapp");
        assert!(matches!(result, Err(LoadError::XdgParse(_))));
    }
}
