//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory holding project-level configuration
pub const PROJECT_DIR: &str = ".prepflow";

/// Environment variable overriding `site_url`
pub const ENV_SITE_URL: &str = "PREPFLOW_SITE_URL";

/// Environment variable overriding `materials_dir`
pub const ENV_MATERIALS: &str = "PREPFLOW_MATERIALS";

/// Valid configuration keys with descriptions
pub const KEYS: &[(&str, &str)] = &[
    (
        "site_url",
        "Base URL joined onto link paths in terminal output",
    ),
    (
        "materials_dir",
        "Directory of extra material YAML files merged over the built-in library",
    ),
    (
        "default_format",
        "Default output format (auto, yaml, json, tsv, csv, md)",
    ),
];

/// prepflow configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL for resolving link markup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,

    /// Extra material definitions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub materials_dir: Option<PathBuf>,

    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_layers(
            Self::global_config_path().as_deref(),
            Self::project_config_path(&cwd).as_deref(),
            |key| std::env::var(key).ok(),
        )
    }

    /// Merge defaults, global file, project file and environment
    pub fn load_layers<F>(global: Option<&Path>, project: Option<&Path>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // 1. Built-in defaults (Default impl)
        let mut config = Config::default();

        // 2. Global user config, 3. project config
        // Relative paths in the global file are anchored at its directory,
        // in the project file at the directory holding `.prepflow/`
        let layers = [
            global.map(|p| (p, p.parent())),
            project.map(|p| (p, p.parent().and_then(Path::parent))),
        ];
        for (path, base) in layers.into_iter().flatten() {
            if let Some(mut layer) = Self::read_file(path) {
                if let Some(base) = base {
                    layer.anchor_paths(base);
                }
                config.merge(layer);
            }
        }

        // 4. Environment variables
        if let Some(url) = env(ENV_SITE_URL).filter(|v| !v.is_empty()) {
            config.site_url = Some(url);
        }
        if let Some(dir) = env(ENV_MATERIALS).filter(|v| !v.is_empty()) {
            config.materials_dir = Some(PathBuf::from(dir));
        }

        config
    }

    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Option<Config>>(&contents) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                None
            }
        }
    }

    /// Path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "prepflow")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Nearest `.prepflow/config.yaml` at or above `start`
    pub fn project_config_path(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(PROJECT_DIR))
            .find(|dir| dir.is_dir())
            .map(|dir| dir.join("config.yaml"))
    }

    fn anchor_paths(&mut self, base: &Path) {
        if let Some(dir) = self.materials_dir.as_mut().filter(|d| d.is_relative()) {
            *dir = base.join(&*dir);
        }
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.site_url.is_some() {
            self.site_url = other.site_url;
        }
        if other.materials_dir.is_some() {
            self.materials_dir = other.materials_dir;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Value of a single key as display text
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "site_url" => self.site_url.clone(),
            "materials_dir" => self.materials_dir.as_ref().map(|p| p.display().to_string()),
            "default_format" => self.default_format.clone(),
            _ => None,
        }
    }

    pub fn site_url(&self) -> Option<&str> {
        self.site_url.as_deref()
    }

    pub fn materials_dir(&self) -> Option<&Path> {
        self.materials_dir.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_when_nothing_exists() {
        let config = Config::load_layers(None, Some(Path::new("/nonexistent/config.yaml")), no_env);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_project_overrides_global() {
        let dir = tempdir().unwrap();
        let global = dir.path().join("global.yaml");
        let project = dir.path().join("project.yaml");
        fs::write(&global, "site_url: https://global.example\ndefault_format: json\n").unwrap();
        fs::write(&project, "site_url: https://project.example\n").unwrap();

        let config = Config::load_layers(Some(&global), Some(&project), no_env);
        assert_eq!(config.site_url(), Some("https://project.example"));
        assert_eq!(config.default_format.as_deref(), Some("json"));
    }

    #[test]
    fn test_env_overrides_files() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("config.yaml");
        fs::write(&project, "materials_dir: /from/file\n").unwrap();

        let config = Config::load_layers(None, Some(&project), |key| match key {
            ENV_MATERIALS => Some("/from/env".to_string()),
            ENV_SITE_URL => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.materials_dir(), Some(Path::new("/from/env")));
        assert_eq!(config.site_url(), None);
    }

    #[test]
    fn test_empty_or_bad_file_ignored() {
        let dir = tempdir().unwrap();
        let empty = dir.path().join("empty.yaml");
        let bad = dir.path().join("bad.yaml");
        fs::write(&empty, "").unwrap();
        fs::write(&bad, "site_url: [unclosed").unwrap();

        assert_eq!(Config::load_layers(Some(&empty), Some(&bad), no_env), Config::default());
    }

    #[test]
    fn test_project_config_walks_up() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(PROJECT_DIR)).unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            Config::project_config_path(&nested),
            Some(dir.path().join(PROJECT_DIR).join("config.yaml"))
        );
    }

    #[test]
    fn test_relative_materials_dir_anchored_at_project_root() {
        let dir = tempdir().unwrap();
        let project_dir = dir.path().join(PROJECT_DIR);
        fs::create_dir(&project_dir).unwrap();
        let project = project_dir.join("config.yaml");
        fs::write(&project, "materials_dir: mats\n").unwrap();

        let config = Config::load_layers(None, Some(&project), no_env);
        assert_eq!(config.materials_dir(), Some(dir.path().join("mats").as_path()));
    }

    #[test]
    fn test_relative_materials_dir_anchored_at_global_dir() {
        let dir = tempdir().unwrap();
        let global = dir.path().join("config.yaml");
        fs::write(&global, "materials_dir: shared/materials\n").unwrap();

        let config = Config::load_layers(Some(&global), None, no_env);
        assert_eq!(
            config.materials_dir(),
            Some(dir.path().join("shared/materials").as_path())
        );
    }

    #[test]
    fn test_absolute_materials_dir_and_env_untouched() {
        let dir = tempdir().unwrap();
        let project_dir = dir.path().join(PROJECT_DIR);
        fs::create_dir(&project_dir).unwrap();
        let project = project_dir.join("config.yaml");
        fs::write(&project, "materials_dir: /opt/materials\n").unwrap();

        let config = Config::load_layers(None, Some(&project), no_env);
        assert_eq!(config.materials_dir(), Some(Path::new("/opt/materials")));

        let config = Config::load_layers(None, Some(&project), |key| {
            (key == ENV_MATERIALS).then(|| "local".to_string())
        });
        assert_eq!(config.materials_dir(), Some(Path::new("local")));
    }

    #[test]
    fn test_get_key() {
        let config = Config {
            default_format: Some("md".into()),
            ..Default::default()
        };
        assert_eq!(config.get("default_format").as_deref(), Some("md"));
        assert_eq!(config.get("site_url"), None);
        assert_eq!(config.get("nonsense"), None);
    }
}
