use clap::ValueEnum;
use riverlog_engine::config::ParserConfig;
use serde::{Deserialize, Serialize};
use std::fs;

/// Shape of the hand list written by `parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON array
    Json,
    /// One hand per line
    Jsonl,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<OutputFormat> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "jsonl" => Some(OutputFormat::Jsonl),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub hero: Option<String>,
    pub format: OutputFormat,
    pub marker: char,
    pub noise_prefixes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let parser = ParserConfig::default();
        Self {
            hero: None,
            format: OutputFormat::Json,
            marker: parser.marker_char,
            noise_prefixes: parser.noise_prefixes,
        }
    }
}

impl Config {
    /// Engine settings derived from this configuration.
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            noise_prefixes: self.noise_prefixes.clone(),
            marker_char: self.marker,
            hero_fallback: self.hero.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub hero: ValueSource,
    pub format: ValueSource,
    pub marker: ValueSource,
    pub noise_prefixes: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            hero: ValueSource::Default,
            format: ValueSource::Default,
            marker: ValueSource::Default,
            noise_prefixes: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

pub const CONFIG_VAR: &str = "RIVERLOG_CONFIG";
pub const HERO_VAR: &str = "RIVERLOG_HERO";
pub const FORMAT_VAR: &str = "RIVERLOG_FORMAT";
pub const MARKER_VAR: &str = "RIVERLOG_MARKER";

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    load_with_sources_from(|key| std::env::var(key).ok())
}

/// Resolves defaults, then the TOML file named by `RIVERLOG_CONFIG`, then the
/// `RIVERLOG_*` variables, reading variables through `env`.
pub fn load_with_sources_from<F>(env: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();
    let var = |key: &str| env(key).filter(|v| !v.is_empty());

    if let Some(path) = var(CONFIG_VAR) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.hero {
            cfg.hero = Some(v);
            sources.hero = ValueSource::File;
        }
        if let Some(v) = f.format {
            cfg.format = parse_format(&v)?;
            sources.format = ValueSource::File;
        }
        if let Some(v) = f.marker {
            cfg.marker = parse_marker(&v)?;
            sources.marker = ValueSource::File;
        }
        if let Some(v) = f.noise_prefixes {
            cfg.noise_prefixes = v;
            sources.noise_prefixes = ValueSource::File;
        }
    }

    if let Some(hero) = var(HERO_VAR) {
        cfg.hero = Some(hero);
        sources.hero = ValueSource::Env;
    }
    if let Some(format) = var(FORMAT_VAR) {
        cfg.format = parse_format(&format)?;
        sources.format = ValueSource::Env;
    }
    if let Some(marker) = var(MARKER_VAR) {
        cfg.marker = parse_marker(&marker)?;
        sources.marker = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    hero: Option<String>,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    marker: Option<String>,
    #[serde(default)]
    noise_prefixes: Option<Vec<String>>,
}

fn parse_format(s: &str) -> Result<OutputFormat, ConfigError> {
    OutputFormat::parse(s)
        .ok_or_else(|| ConfigError::Invalid(format!("Invalid format: {} (expected json or jsonl)", s)))
}

fn parse_marker(s: &str) -> Result<char, ConfigError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigError::Invalid(format!(
            "Invalid marker: {:?} (expected a single character)",
            s
        ))),
    }
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.marker.is_alphanumeric() || cfg.marker.is_whitespace() || cfg.marker == '"' {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: marker {:?} would hide log lines",
            cfg.marker
        )));
    }
    if cfg.hero.as_deref().is_some_and(|h| h.trim().is_empty()) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: hero must not be blank".into(),
        ));
    }
    if cfg.noise_prefixes.iter().any(|p| p.is_empty()) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: empty noise prefix matches every line".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let resolved = load_with_sources_from(env_of(&[])).unwrap();
        assert_eq!(resolved.config, Config::default());
        assert_eq!(resolved.sources.hero, ValueSource::Default);
        assert_eq!(resolved.config.parser_config(), ParserConfig::default());
    }

    #[test]
    fn env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("riverlog.toml");
        std::fs::write(
            &path,
            "hero = \"FromFile\"\nformat = \"jsonl\"\nnoise_prefixes = [\"The admin \"]\n",
        )
        .unwrap();
        let path = path.to_string_lossy().to_string();
        let resolved = load_with_sources_from(env_of(&[
            (CONFIG_VAR, path.as_str()),
            (HERO_VAR, "FromEnv"),
        ]))
        .unwrap();
        assert_eq!(resolved.config.hero.as_deref(), Some("FromEnv"));
        assert_eq!(resolved.sources.hero, ValueSource::Env);
        assert_eq!(resolved.config.format, OutputFormat::Jsonl);
        assert_eq!(resolved.sources.format, ValueSource::File);
        assert_eq!(resolved.config.noise_prefixes, vec!["The admin "]);
        assert_eq!(resolved.sources.marker, ValueSource::Default);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            load_with_sources_from(env_of(&[(FORMAT_VAR, "xml")])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            load_with_sources_from(env_of(&[(MARKER_VAR, "**")])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            load_with_sources_from(env_of(&[(MARKER_VAR, "A")])),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn unreadable_file_is_io_error() {
        let res = load_with_sources_from(env_of(&[(CONFIG_VAR, "/nonexistent/riverlog.toml")]));
        assert!(matches!(res, Err(ConfigError::Io(_))));
    }

    #[test]
    fn unknown_file_key_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "level = 3\n").unwrap();
        let path = path.to_string_lossy().to_string();
        let res = load_with_sources_from(env_of(&[(CONFIG_VAR, path.as_str())]));
        assert!(matches!(res, Err(ConfigError::Parse(_))));
    }
}
