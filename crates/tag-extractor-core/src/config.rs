//! Configuration loading and discovery.
//!
//! Settings come from, lowest precedence first:
//! 1. Built-in defaults
//! 2. `~/.config/tag-extractor/config.<ext>` (user config)
//! 3. Project config in the current directory or the nearest parent that has one:
//!    `.tags.<ext>`, `tags.<ext>`, `.tag-extractor.<ext>`, `tag-extractor.<ext>`
//! 4. Files passed explicitly (`--config`)
//! 5. `TAG_EXTRACTOR_*` environment variables
//!
//! Where `<ext>` is one of `toml`, `yaml`, `yml`, `json`. Files are merged
//! via figment, later sources overriding earlier ones key by key.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use tag_extractor_core::config::ConfigLoader;
//!
//! let cwd = Utf8PathBuf::try_from(std::env::current_dir().unwrap()).unwrap();
//! let (config, _sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! println!("tokenizer: {:?}", config.tokenizer);
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::tokenize::TokenizerMode;

/// The configuration for tag-extractor.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for JSONL log files. File logging is off when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// Stop-word list used when `--stop-words` is not given.
    pub stop_words: Option<Utf8PathBuf>,
    /// Report file written when `--output` is not given.
    pub output: Option<Utf8PathBuf>,
    /// Tokenization rule. Defaults to `reference`.
    pub tokenizer: Option<TokenizerMode>,
    /// Show at most this many tags on screen. Saved reports are never truncated.
    pub limit: Option<usize>,
    /// Maximum source file size in bytes. Unlimited when unset.
    pub max_input_bytes: Option<usize>,
    /// Disable the input size limit entirely; `max_input_bytes` is then ignored.
    pub disable_input_limit: bool,
}

impl Config {
    /// The effective input size limit.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            self.max_input_bytes
        }
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Which configuration files were merged, returned alongside [`Config`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project config files, ordered low→high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Files passed via [`ConfigLoader::with_file`].
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The highest-precedence file that was loaded, if any.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }
}

const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

const APP_NAME: &str = "tag-extractor";

/// Project config base names, lowest precedence first.
const APP_NAMES: &[&str] = &["tags", "tag-extractor"];

/// Builder for loading configuration from multiple sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    project_search_root: Option<Utf8PathBuf>,
    include_user_config: bool,
    /// Stop walking up at a directory containing this entry.
    boundary_marker: Option<String>,
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a loader that reads user config and stops at `.git`.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Walk up from `path` looking for project config files.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include user config from `~/.config/tag-extractor/`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Stop the upward search at a directory containing `marker`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Search all the way to the filesystem root.
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file. Later files take precedence.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Merge every source and deserialize the result.
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        if self.include_user_config
            && let Some(user_config) = find_user_config()
        {
            figment = merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        if let Some(ref root) = self.project_search_root {
            let project_configs = self.find_project_configs(root);
            for pc in &project_configs {
                figment = merge_file(figment, pc);
            }
            sources.project_files = project_configs;
        }

        for file in &self.explicit_files {
            figment = merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        // TAG_EXTRACTOR_TOKENIZER=letters, TAG_EXTRACTOR_STOP_WORDS=stop.txt, ...
        figment = figment.merge(Env::prefixed("TAG_EXTRACTOR_").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            tokenizer = ?config.tokenizer,
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Config files from the closest directory (at or above `start`) that has any.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let mut found = Vec::new();
            for app_name in APP_NAMES {
                for prefix in [".", ""] {
                    for ext in CONFIG_EXTENSIONS {
                        let candidate = dir.join(format!("{prefix}{app_name}.{ext}"));
                        if candidate.is_file() {
                            found.push(candidate);
                        }
                    }
                }
            }
            if !found.is_empty() {
                return found;
            }

            // A config next to the marker still counts; only stop above it.
            if let Some(ref marker) = self.boundary_marker
                && dir.join(marker).exists()
                && dir != start
            {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }
}

fn find_user_config() -> Option<Utf8PathBuf> {
    let config_dir = user_config_dir()?;
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| config_dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    match path.extension() {
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
        Some("json") => figment.merge(Json::file_exact(path.as_str())),
        _ => figment.merge(Toml::file_exact(path.as_str())),
    }
}

/// Get the user config directory path.
///
/// Returns `~/.config/tag-extractor/` on Linux, `~/Library/Application Support/tag-extractor/`
/// on macOS, and equivalent on other platforms.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serializes tests that mutate environment variables.
    static TEST_ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn load_file(contents: &str, name: &str) -> Config {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join(name)).unwrap();
        fs::write(&path, contents).unwrap();
        let (config, _sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&path)
            .load()
            .unwrap();
        config
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.stop_words.is_none());
        assert!(config.tokenizer.is_none());
        assert!(!config.disable_input_limit);
        assert_eq!(config.input_limit(), None);
    }

    #[test]
    fn loads_with_no_files() {
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .load()
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(sources.primary_file().is_none());
    }

    #[test]
    fn toml_fields() {
        let config = load_file(
            r#"
log_level = "debug"
stop_words = "lists/stop.txt"
output = "tags.out"
tokenizer = "letters"
limit = 25
"#,
            "config.toml",
        );
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.stop_words.as_deref().map(Utf8Path::as_str), Some("lists/stop.txt"));
        assert_eq!(config.output.as_deref().map(Utf8Path::as_str), Some("tags.out"));
        assert_eq!(config.tokenizer, Some(TokenizerMode::Letters));
        assert_eq!(config.limit, Some(25));
    }

    #[test]
    fn yaml_and_json_formats() {
        let yaml = load_file("tokenizer: reference\nlimit: 3\n", "config.yaml");
        assert_eq!(yaml.tokenizer, Some(TokenizerMode::Reference));
        assert_eq!(yaml.limit, Some(3));

        let json = load_file(r#"{"tokenizer": "letters"}"#, "config.json");
        assert_eq!(json.tokenizer, Some(TokenizerMode::Letters));
    }

    #[test]
    fn unknown_tokenizer_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("config.toml")).unwrap();
        fs::write(&path, "tokenizer = \"words\"\n").unwrap();

        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&path)
            .load();
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn max_input_bytes_sets_limit() {
        let config = load_file("max_input_bytes = 2048\n", "config.toml");
        assert_eq!(config.input_limit(), Some(2048));
    }

    #[test]
    fn disable_input_limit_wins() {
        let config = load_file(
            "max_input_bytes = 1024\ndisable_input_limit = true\n",
            "config.toml",
        );
        assert_eq!(config.max_input_bytes, Some(1024));
        assert_eq!(config.input_limit(), None);
    }

    #[test]
    fn later_file_overrides_earlier() {
        let tmp = TempDir::new().unwrap();
        let base = Utf8PathBuf::try_from(tmp.path().join("base.toml")).unwrap();
        let over = Utf8PathBuf::try_from(tmp.path().join("override.toml")).unwrap();
        fs::write(&base, "tokenizer = \"letters\"\nlimit = 5\n").unwrap();
        fs::write(&over, "tokenizer = \"reference\"\n").unwrap();

        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&base)
            .with_file(&over)
            .load()
            .unwrap();

        assert_eq!(config.tokenizer, Some(TokenizerMode::Reference));
        assert_eq!(config.limit, Some(5));
        assert_eq!(sources.primary_file(), Some(over.as_path()));
    }

    #[test]
    fn discovers_project_config_from_subdirectory() {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("project");
        let deep = project.join("a").join("b");
        fs::create_dir_all(&deep).unwrap();
        fs::write(project.join(".tag-extractor.toml"), "limit = 7\n").unwrap();

        let deep = Utf8PathBuf::try_from(deep).unwrap();
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&deep)
            .load()
            .unwrap();

        assert_eq!(config.limit, Some(7));
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    fn boundary_marker_stops_search() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        let work = child.join("work");
        fs::create_dir_all(&work).unwrap();
        fs::write(parent.join(".tag-extractor.toml"), "limit = 1\n").unwrap();
        fs::create_dir(child.join(".git")).unwrap();

        let work = Utf8PathBuf::try_from(work).unwrap();
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .with_boundary_marker(".git")
            .with_project_search(&work)
            .load()
            .unwrap();

        assert!(config.limit.is_none());
        assert!(sources.project_files.is_empty());
    }

    #[test]
    fn tag_extractor_name_beats_tags_name() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".tags.toml"), "limit = 1\ntokenizer = \"letters\"\n").unwrap();
        fs::write(tmp.path().join("tag-extractor.toml"), "limit = 2\n").unwrap();

        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&root)
            .load()
            .unwrap();

        assert_eq!(config.limit, Some(2));
        assert_eq!(config.tokenizer, Some(TokenizerMode::Letters));
        assert_eq!(sources.project_files.len(), 2);
        assert!(sources.primary_file().unwrap().as_str().ends_with("tag-extractor.toml"));
    }

    #[test]
    fn only_closest_directory_contributes() {
        let tmp = TempDir::new().unwrap();
        let parent = tmp.path().join("parent");
        let child = parent.join("child");
        fs::create_dir_all(&child).unwrap();
        fs::write(parent.join("tags.toml"), "tokenizer = \"letters\"\n").unwrap();
        fs::write(child.join("tags.yaml"), "limit: 9\n").unwrap();

        let child = Utf8PathBuf::try_from(child).unwrap();
        let (config, sources) = ConfigLoader::new()
            .with_user_config(false)
            .without_boundary_marker()
            .with_project_search(&child)
            .load()
            .unwrap();

        assert_eq!(config.limit, Some(9));
        assert!(config.tokenizer.is_none());
        assert_eq!(sources.project_files.len(), 1);
    }

    #[test]
    #[allow(unsafe_code)]
    fn env_var_overrides_file() {
        let _lock = TEST_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("config.toml")).unwrap();
        fs::write(&path, "log_dir = \"/tmp/from-file\"\n").unwrap();

        // SAFETY: Test environment — mutex serializes env access across tests.
        unsafe {
            std::env::set_var("TAG_EXTRACTOR_LOG_DIR", "/tmp/from-env");
        }

        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&path)
            .load();

        // SAFETY: Cleanup after test.
        unsafe {
            std::env::remove_var("TAG_EXTRACTOR_LOG_DIR");
        }

        let (config, _sources) = result.unwrap();
        assert_eq!(
            config.log_dir.as_deref().map(Utf8Path::as_str),
            Some("/tmp/from-env")
        );
    }

    #[test]
    fn yaml_deserializes_directly() {
        let config: Config = serde_yaml::from_str("stop_words: stop.txt\n").unwrap();
        assert_eq!(
            config.stop_words.as_deref().map(Utf8Path::as_str),
            Some("stop.txt")
        );
        assert!(config.output.is_none());
    }
}
