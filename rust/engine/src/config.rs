use serde::{Deserialize, Serialize};

/// Tunables for the log parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Entries starting with any of these carry no hand information.
    pub noise_prefixes: Vec<String>,
    /// Entries starting with this character are platform banners.
    pub marker_char: char,
    /// Hero name used when the log never reveals the hero's cards.
    pub hero_fallback: Option<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            noise_prefixes: vec![
                "The admin ".into(),
                "The game's ".into(),
                "IMPORTANT:".into(),
            ],
            marker_char: '*',
            hero_fallback: None,
        }
    }
}

impl ParserConfig {
    pub fn with_hero_fallback(mut self, name: impl Into<String>) -> Self {
        self.hero_fallback = Some(name.into());
        self
    }

    pub fn is_noise(&self, entry: &str) -> bool {
        let entry = entry.trim();
        entry.is_empty()
            || entry.starts_with(self.marker_char)
            || self
                .noise_prefixes
                .iter()
                .any(|p| entry.starts_with(p.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_noise_rules() {
        let cfg = ParserConfig::default();
        assert!(cfg.is_noise(""));
        assert!(cfg.is_noise("   "));
        assert!(cfg.is_noise("The admin approved the player \"A @ x\" participation."));
        assert!(cfg.is_noise("The game's big blind was changed from 20 to 40."));
        assert!(cfg.is_noise("* table paused"));
        assert!(!cfg.is_noise("-- starting hand #1 (id: x) No Limit Texas Hold'em --"));
        assert!(!cfg.is_noise("\"A @ x\" calls 20"));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: ParserConfig = serde_json::from_str(r#"{"marker_char":"!"}"#).unwrap();
        assert_eq!(cfg.marker_char, '!');
        assert_eq!(cfg.noise_prefixes, ParserConfig::default().noise_prefixes);
    }
}
