//! Loader for workspace configuration with YAML + environment overlays.
//!
//! `oportuna.yaml` holds the scrape target and shell settings; any field can
//! be overridden with `OPORTUNA__`-prefixed environment variables, and string
//! values may reference `${VAR}` placeholders that are expanded after the
//! sources are merged.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Deserialize)]
pub struct OportunaConfig {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub scrape: ScrapeSection,
    #[serde(default)]
    pub shell: ShellSection,
}

/// Where and how the listing page is scraped.
#[derive(Debug, Deserialize)]
pub struct ScrapeSection {
    /// The one fixed listing URL the pipeline fetches.
    #[serde(default = "default_listing_url")]
    pub listing_url: String,
    /// WebDriver endpoint the browser session connects to.
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
    #[serde(default = "default_headless")]
    pub headless: bool,
    /// Fixed pause after each scroll, giving lazy content time to load.
    #[serde(default = "default_settle_secs")]
    pub settle_secs: u64,
    /// Upper bound on scroll rounds for pages that never stabilize.
    #[serde(default = "default_max_scroll_rounds")]
    pub max_scroll_rounds: usize,
}

impl Default for ScrapeSection {
    fn default() -> Self {
        Self {
            listing_url: default_listing_url(),
            webdriver_url: default_webdriver_url(),
            headless: default_headless(),
            settle_secs: default_settle_secs(),
            max_scroll_rounds: default_max_scroll_rounds(),
        }
    }
}

/// Presentation-shell settings: the classified dataset and labels.
#[derive(Debug, Deserialize)]
pub struct ShellSection {
    /// Path of the classified course dataset consumed by `render`.
    #[serde(default = "default_dataset")]
    pub dataset: PathBuf,
    /// Institution label attached to rows built from a live scrape.
    #[serde(default = "default_source_label")]
    pub source_label: String,
}

impl Default for ShellSection {
    fn default() -> Self {
        Self {
            dataset: default_dataset(),
            source_label: default_source_label(),
        }
    }
}

fn default_listing_url() -> String {
    "https://www.ev.org.br/cursos".into()
}
fn default_webdriver_url() -> String {
    "http://localhost:9515".into()
}
fn default_headless() -> bool {
    true
}
fn default_settle_secs() -> u64 {
    2
}
fn default_max_scroll_rounds() -> usize {
    40
}
fn default_dataset() -> PathBuf {
    PathBuf::from("cursos_classificados.csv")
}
fn default_source_label() -> String {
    "Escola Virtual".into()
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (YAML + env overrides).
pub struct OportunaConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for OportunaConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl OportunaConfigLoader {
    /// Start with sensible defaults: `OPORTUNA__` env overrides only. Every
    /// schema field has a serde default, so a bare loader yields a working
    /// configuration.
    ///
    /// ```
    /// use oportuna_config::OportunaConfigLoader;
    ///
    /// let config = OportunaConfigLoader::new().load().expect("valid config");
    /// assert_eq!(config.scrape.listing_url, "https://www.ev.org.br/cursos");
    /// assert_eq!(config.scrape.settle_secs, 2);
    /// ```
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("OPORTUNA").separator("__"));
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by
    /// suffix. Missing files are tolerated so headless deployments can rely
    /// purely on environment variables.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use oportuna_config::OportunaConfigLoader;
    ///
    /// let cfg = OportunaConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// version: "test"
    /// scrape:
    ///   headless: false
    ///   max_scroll_rounds: 5
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.version.as_deref(), Some("test"));
    /// assert!(!cfg.scrape.headless);
    /// assert_eq!(cfg.scrape.max_scroll_rounds, 5);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly
    /// typed config.
    ///
    /// The loader combines YAML snippets with `OPORTUNA__`-prefixed
    /// environment variables and expands `${VAR}` placeholders before
    /// materialising strongly typed structs.
    ///
    /// ```
    /// use oportuna_config::OportunaConfigLoader;
    ///
    /// unsafe { std::env::set_var("COURSE_HOST", "https://www.ev.org.br"); }
    ///
    /// let config = OportunaConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// scrape:
    ///   listing_url: "${COURSE_HOST}/cursos"
    /// "#,
    ///     )
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.scrape.listing_url, "https://www.ev.org.br/cursos");
    ///
    /// unsafe { std::env::remove_var("COURSE_HOST"); }
    /// ```
    pub fn load(self) -> Result<OportunaConfig, ConfigError> {
        let cfg = self.builder.build()?;

        // Convert to serde_json::Value first
        let mut v: Value = cfg.try_deserialize()?;
        // Recursively expand environment variables
        expand_env_in_value(&mut v);

        // Deserialize into the strongly-typed config
        let typed: OportunaConfig =
            serde_json::from_value(v).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
