//! Configuration management for `pagesmith`.
//!
//! Configuration sources and precedence (highest wins):
//! 1. CLI overrides
//! 2. Environment variables (`PAGESMITH_<KEY>`)
//! 3. Project config (`--config <path>` or `./pagesmith.yaml`)
//! 4. Defaults
//!
//! Each source is read into a flat [`ConfigLayer`] of normalized keys;
//! the merged layer is then resolved into a typed [`Config`].

use crate::error::{GenError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Project config filename looked up in the working directory.
pub const PROJECT_CONFIG_FILENAME: &str = "pagesmith.yaml";

const ENV_PREFIX: &str = "PAGESMITH_";

const DEFAULT_NAV_TIMEOUT_MS: u64 = 60_000;
const DEFAULT_WATCH_SETTLE_MS: u64 = 200;

/// Keys understood by the resolver.
const KNOWN_KEYS: &[&str] = &[
    "out-dir",
    "recordings-dir",
    "api-input",
    "pages-dir",
    "web-tests-dir",
    "api-dir",
    "api-tests-dir",
    "locale-file",
    "nav-timeout-ms",
    "wait-until",
    "watch-settle-ms",
];

/// Navigation strategy baked into the generated `goto` method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitUntil {
    #[default]
    Load,
    #[serde(rename = "domcontentloaded")]
    DomContentLoaded,
    #[serde(rename = "networkidle")]
    NetworkIdle,
    Commit,
}

impl WaitUntil {
    /// The literal used in generated TypeScript.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::DomContentLoaded => "domcontentloaded",
            Self::NetworkIdle => "networkidle",
            Self::Commit => "commit",
        }
    }
}

impl fmt::Display for WaitUntil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaitUntil {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "load" => Ok(Self::Load),
            "domcontentloaded" => Ok(Self::DomContentLoaded),
            "networkidle" => Ok(Self::NetworkIdle),
            "commit" => Ok(Self::Commit),
            _ => Err(GenError::InvalidWaitUntil {
                value: s.to_string(),
            }),
        }
    }
}

/// Defaults for the generated `goto` method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationDefaults {
    pub timeout_ms: u64,
    pub wait_until: WaitUntil,
}

impl Default for NavigationDefaults {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_NAV_TIMEOUT_MS,
            wait_until: WaitUntil::Load,
        }
    }
}

/// Where generated files land, relative to `root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputLayout {
    pub root: PathBuf,
    pub pages_dir: PathBuf,
    pub web_tests_dir: PathBuf,
    pub api_dir: PathBuf,
    pub api_tests_dir: PathBuf,
    pub locale_file: PathBuf,
}

impl OutputLayout {
    /// Conventional layout under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pages_dir: PathBuf::from("pages"),
            web_tests_dir: PathBuf::from("tests/web"),
            api_dir: PathBuf::from("api"),
            api_tests_dir: PathBuf::from("tests/api"),
            locale_file: PathBuf::from("locales/en.json"),
        }
    }

    /// `<root>/<pages_dir>/<ClassName>.ts`
    #[must_use]
    pub fn page_file(&self, class_name: &str) -> PathBuf {
        self.root
            .join(&self.pages_dir)
            .join(format!("{class_name}.ts"))
    }

    /// `<root>/<web_tests_dir>/<prefix>.spec.ts`
    #[must_use]
    pub fn web_test_file(&self, test_prefix: &str) -> PathBuf {
        self.root
            .join(&self.web_tests_dir)
            .join(format!("{test_prefix}.spec.ts"))
    }

    /// API class directory, optionally nested under `folder`.
    #[must_use]
    pub fn api_class_dir(&self, folder: Option<&str>) -> PathBuf {
        let base = self.root.join(&self.api_dir);
        match folder {
            Some(folder) => base.join(folder),
            None => base,
        }
    }

    /// API spec directory, optionally nested under `folder`.
    #[must_use]
    pub fn api_spec_dir(&self, folder: Option<&str>) -> PathBuf {
        let base = self.root.join(&self.api_tests_dir);
        match folder {
            Some(folder) => base.join(folder),
            None => base,
        }
    }

    /// Absolute (root-joined) locale file path.
    #[must_use]
    pub fn locale_path(&self) -> PathBuf {
        self.root.join(&self.locale_file)
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Fully resolved configuration passed to every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub layout: OutputLayout,
    pub recordings_dir: PathBuf,
    pub api_input: PathBuf,
    pub navigation: NavigationDefaults,
    pub watch_settle_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: OutputLayout::default(),
            recordings_dir: PathBuf::from("recordings"),
            api_input: PathBuf::from("tests.json"),
            navigation: NavigationDefaults::default(),
            watch_settle_ms: DEFAULT_WATCH_SETTLE_MS,
        }
    }
}

impl Config {
    /// Config rooted at `root` with every other value defaulted.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            layout: OutputLayout::new(root),
            ..Self::default()
        }
    }

    /// Resolve a merged layer into typed configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric value cannot be parsed or the wait
    /// strategy is unknown.
    pub fn from_layer(layer: &ConfigLayer) -> Result<Self> {
        let defaults = ConfigLayer::defaults();
        let get = |key: &str| -> String {
            layer
                .get(key)
                .or_else(|| defaults.get(key))
                .cloned()
                .unwrap_or_default()
        };

        let layout = OutputLayout {
            root: PathBuf::from(get("out-dir")),
            pages_dir: PathBuf::from(get("pages-dir")),
            web_tests_dir: PathBuf::from(get("web-tests-dir")),
            api_dir: PathBuf::from(get("api-dir")),
            api_tests_dir: PathBuf::from(get("api-tests-dir")),
            locale_file: PathBuf::from(get("locale-file")),
        };

        Ok(Self {
            layout,
            recordings_dir: PathBuf::from(get("recordings-dir")),
            api_input: PathBuf::from(get("api-input")),
            navigation: NavigationDefaults {
                timeout_ms: parse_u64("nav-timeout-ms", &get("nav-timeout-ms"))?,
                wait_until: get("wait-until").parse()?,
            },
            watch_settle_ms: parse_u64("watch-settle-ms", &get("watch-settle-ms"))?,
        })
    }
}

/// A flat key/value view of one configuration source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    values: BTreeMap<String, String>,
}

impl ConfigLayer {
    /// Default layer (lowest precedence), taken from [`Config::default`].
    #[must_use]
    pub fn defaults() -> Self {
        Self::from_config(&Config::default())
    }

    /// Layer holding every value of a resolved config.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let path = |p: &Path| p.to_string_lossy().into_owned();
        let layout = &config.layout;
        let mut layer = Self::default();
        layer.insert("out-dir", path(&layout.root));
        layer.insert("recordings-dir", path(&config.recordings_dir));
        layer.insert("api-input", path(&config.api_input));
        layer.insert("pages-dir", path(&layout.pages_dir));
        layer.insert("web-tests-dir", path(&layout.web_tests_dir));
        layer.insert("api-dir", path(&layout.api_dir));
        layer.insert("api-tests-dir", path(&layout.api_tests_dir));
        layer.insert("locale-file", path(&layout.locale_file));
        layer.insert("nav-timeout-ms", config.navigation.timeout_ms.to_string());
        layer.insert("wait-until", config.navigation.wait_until.as_str());
        layer.insert("watch-settle-ms", config.watch_settle_ms.to_string());
        layer
    }

    /// Insert a value under its normalized key.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        let normalized = normalize_key(key);
        if !is_known_key(&normalized) {
            debug!(key = %normalized, "Ignoring unknown config key");
            return;
        }
        self.values.insert(normalized, value.into());
    }

    /// Look up a value by key (any spelling).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&String> {
        self.values.get(&normalize_key(key))
    }

    /// Merge another layer on top of this one (higher precedence wins).
    pub fn merge_from(&mut self, other: &Self) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Merge multiple layers in precedence order (lowest to highest).
    #[must_use]
    pub fn merge_layers(layers: &[Self]) -> Self {
        let mut merged = Self::default();
        for layer in layers {
            merged.merge_from(layer);
        }
        merged
    }

    /// Build a layer from a YAML file path. Missing files return empty config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn from_yaml(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Build a layer from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a YAML mapping.
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(contents)?;
        let mut layer = Self::default();

        match value {
            serde_yaml::Value::Null => {}
            serde_yaml::Value::Mapping(map) => {
                for (key, value) in map {
                    let Some(key) = key.as_str() else {
                        continue;
                    };
                    if let Some(text) = yaml_scalar_to_string(&value) {
                        layer.insert(key, text);
                    }
                }
            }
            _ => {
                return Err(GenError::Config(
                    "project config must be a YAML mapping".to_string(),
                ));
            }
        }

        Ok(layer)
    }

    /// Build a layer from `PAGESMITH_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(env::vars())
    }

    /// Build a layer from an explicit variable list.
    #[must_use]
    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut layer = Self::default();
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                if !value.trim().is_empty() {
                    layer.insert(stripped, value);
                }
            }
        }
        layer
    }
}

/// CLI overrides for config loading (optional).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub out_dir: Option<PathBuf>,
    pub recordings_dir: Option<PathBuf>,
    pub api_input: Option<PathBuf>,
    pub nav_timeout_ms: Option<u64>,
    pub wait_until: Option<String>,
}

impl CliOverrides {
    #[must_use]
    pub fn as_layer(&self) -> ConfigLayer {
        let mut layer = ConfigLayer::default();

        if let Some(path) = &self.out_dir {
            layer.insert("out-dir", path.to_string_lossy());
        }
        if let Some(path) = &self.recordings_dir {
            layer.insert("recordings-dir", path.to_string_lossy());
        }
        if let Some(path) = &self.api_input {
            layer.insert("api-input", path.to_string_lossy());
        }
        if let Some(timeout) = self.nav_timeout_ms {
            layer.insert("nav-timeout-ms", timeout.to_string());
        }
        if let Some(wait_until) = &self.wait_until {
            layer.insert("wait-until", wait_until.clone());
        }

        layer
    }
}

/// Load configuration with the standard precedence order.
///
/// An explicit `config_path` must exist; the implicit `./pagesmith.yaml`
/// is optional.
///
/// # Errors
///
/// Returns an error if a config file cannot be read or parsed, or a value
/// is invalid.
pub fn load_config(config_path: Option<&Path>, cli: &CliOverrides) -> Result<Config> {
    let project = match config_path {
        Some(path) => {
            if !path.is_file() {
                return Err(GenError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            ConfigLayer::from_yaml(path)?
        }
        None => ConfigLayer::from_yaml(Path::new(PROJECT_CONFIG_FILENAME))?,
    };

    let merged = ConfigLayer::merge_layers(&[
        ConfigLayer::defaults(),
        project,
        ConfigLayer::from_env(),
        cli.as_layer(),
    ]);

    let config = Config::from_layer(&merged)?;
    debug!(?config, "Resolved configuration");
    Ok(config)
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace(['_', '.'], "-")
}

fn is_known_key(key: &str) -> bool {
    KNOWN_KEYS.contains(&key)
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn parse_u64(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| GenError::Config(format!("{key} must be a non-negative integer, got '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_resolve_to_conventional_layout() {
        let config = Config::from_layer(&ConfigLayer::defaults()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.layout.pages_dir, PathBuf::from("pages"));
        assert_eq!(config.layout.web_tests_dir, PathBuf::from("tests/web"));
        assert_eq!(config.navigation.timeout_ms, 60_000);
        assert_eq!(config.navigation.wait_until, WaitUntil::Load);
    }

    #[test]
    fn default_layer_covers_every_known_key() {
        let defaults = ConfigLayer::defaults();
        for key in KNOWN_KEYS {
            assert!(defaults.get(key).is_some(), "no default for {key}");
        }
        assert_eq!(defaults.get("nav-timeout-ms").unwrap(), &DEFAULT_NAV_TIMEOUT_MS.to_string());
        assert_eq!(defaults.get("watch-settle-ms").unwrap(), &DEFAULT_WATCH_SETTLE_MS.to_string());
    }

    #[test]
    fn resolved_config_round_trips_through_a_layer() {
        let mut config = Config::with_root("build/out");
        config.navigation.timeout_ms = 1_500;
        config.navigation.wait_until = WaitUntil::NetworkIdle;
        config.layout.locale_file = "i18n/fr.json".into();
        assert_eq!(Config::from_layer(&ConfigLayer::from_config(&config)).unwrap(), config);
    }

    #[test]
    fn yaml_layer_accepts_snake_and_kebab_keys() {
        let layer = ConfigLayer::from_yaml_str(
            "out_dir: build\nnav-timeout-ms: 30000\nwait_until: networkidle\nunknown: 1\n",
        )
        .unwrap();
        assert_eq!(layer.get("out-dir").unwrap(), "build");
        assert_eq!(layer.get("nav_timeout_ms").unwrap(), "30000");
        assert!(layer.get("unknown").is_none());

        let config = Config::from_layer(&layer).unwrap();
        assert_eq!(config.layout.root, PathBuf::from("build"));
        assert_eq!(config.navigation.timeout_ms, 30_000);
        assert_eq!(config.navigation.wait_until, WaitUntil::NetworkIdle);
    }

    #[test]
    fn yaml_layer_rejects_non_mapping() {
        let err = ConfigLayer::from_yaml_str("- a\n- b\n").unwrap_err();
        assert!(matches!(err, GenError::Config(_)));
    }

    #[test]
    fn env_layer_reads_prefixed_vars_only() {
        let layer = ConfigLayer::from_vars(vec![
            ("PAGESMITH_OUT_DIR".to_string(), "env-out".to_string()),
            ("PAGESMITH_WAIT_UNTIL".to_string(), "commit".to_string()),
            ("OUT_DIR".to_string(), "ignored".to_string()),
            ("PAGESMITH_API_INPUT".to_string(), "  ".to_string()),
        ]);
        assert_eq!(layer.get("out-dir").unwrap(), "env-out");
        assert_eq!(layer.get("wait-until").unwrap(), "commit");
        assert!(layer.get("api-input").is_none());
    }

    #[test]
    fn precedence_cli_overrides_env_and_yaml() {
        let yaml = ConfigLayer::from_yaml_str("out-dir: yaml\nrecordings-dir: yaml-rec\n").unwrap();
        let env_layer = ConfigLayer::from_vars(vec![
            ("PAGESMITH_OUT_DIR".to_string(), "env".to_string()),
            ("PAGESMITH_RECORDINGS_DIR".to_string(), "env-rec".to_string()),
        ]);
        let cli = CliOverrides {
            out_dir: Some(PathBuf::from("cli")),
            ..CliOverrides::default()
        };

        let merged =
            ConfigLayer::merge_layers(&[ConfigLayer::defaults(), yaml, env_layer, cli.as_layer()]);
        let config = Config::from_layer(&merged).unwrap();
        assert_eq!(config.layout.root, PathBuf::from("cli"));
        assert_eq!(config.recordings_dir, PathBuf::from("env-rec"));
    }

    #[test]
    fn invalid_values_are_reported() {
        let mut layer = ConfigLayer::defaults();
        layer.insert("nav-timeout-ms", "soon");
        let err = Config::from_layer(&layer).unwrap_err();
        assert!(err.to_string().contains("nav-timeout-ms"));

        let mut layer = ConfigLayer::defaults();
        layer.insert("wait-until", "eventually");
        let err = Config::from_layer(&layer).unwrap_err();
        assert!(matches!(err, GenError::InvalidWaitUntil { .. }));
    }

    #[test]
    fn explicit_config_path_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yaml");
        let err = load_config(Some(&missing), &CliOverrides::default()).unwrap_err();
        assert!(matches!(err, GenError::Config(_)));
    }

    #[test]
    fn explicit_config_path_is_loaded() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.yaml");
        fs::write(&path, "pages-dir: src/pages\nwatch-settle-ms: 0\n").unwrap();

        let cli = CliOverrides {
            out_dir: Some(temp.path().to_path_buf()),
            ..CliOverrides::default()
        };
        let config = load_config(Some(&path), &cli).unwrap();
        assert_eq!(config.layout.pages_dir, PathBuf::from("src/pages"));
        assert_eq!(config.watch_settle_ms, 0);
        assert_eq!(
            config.layout.page_file("LoginPage"),
            temp.path().join("src/pages").join("LoginPage.ts")
        );
    }

    #[test]
    fn layout_paths_follow_convention() {
        let layout = OutputLayout::new("/work");
        assert_eq!(
            layout.web_test_file("login"),
            PathBuf::from("/work/tests/web/login.spec.ts")
        );
        assert_eq!(
            layout.api_class_dir(Some("users")),
            PathBuf::from("/work/api/users")
        );
        assert_eq!(layout.api_spec_dir(None), PathBuf::from("/work/tests/api"));
        assert_eq!(
            layout.locale_path(),
            PathBuf::from("/work/locales/en.json")
        );
    }
}
