//! Configuration document
//!
//! ```json
//! {
//!   "home_url": "https://gateway.example.com/guacamole/",
//!   "macros": [
//!     { "name": "1", "text": "sebastian.garcia" },
//!     { "name": "4", "text": "sudo apt update" }
//!   ]
//! }
//! ```
//!
//! Macro entries also accept `label` / `button` for the name and `macro` for
//! the text. When several are present the canonical key wins, then the
//! aliases in that order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;
use crate::Result;

/// Home URL used when no configuration file exists yet
pub const DEFAULT_HOME_URL: &str = "about:blank";

/// Schemes that are kept verbatim instead of being prefixed with `https://`
const PASSTHROUGH_SCHEMES: [&str; 3] = ["about:", "file:", "data:"];

/// A single palette entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroDef {
    /// Short label shown on the palette control
    pub name: String,
    /// Payload injected into the active session
    pub text: String,
}

impl MacroDef {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Immutable configuration snapshot
#[derive(Debug, Clone, Serialize)]
pub struct Configuration {
    /// Gateway URL opened by new sessions
    pub home_url: Url,
    /// Macro definitions in document order
    pub macros: Vec<MacroDef>,
    /// File this snapshot was read from, `None` for first-run defaults
    pub source: Option<PathBuf>,
    /// Bumped by the store on every successful swap
    pub generation: u64,
}

/// Keys read for a macro's name, in precedence order
const NAME_KEYS: [&str; 3] = ["name", "label", "button"];
/// Keys read for a macro's text, in precedence order
const TEXT_KEYS: [&str; 2] = ["text", "macro"];

/// Field name used when the document itself has the wrong shape
const DOCUMENT_FIELD: &str = "(document)";

impl Configuration {
    /// First-run configuration: no home override and an empty palette
    pub fn defaults() -> Self {
        Self {
            home_url: default_home_url(),
            macros: Vec::new(),
            source: None,
            generation: 0,
        }
    }

    /// Read and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::parse(&contents)?;
        config.source = Some(path.to_path_buf());

        tracing::debug!(
            path = %path.display(),
            macro_count = config.macros.len(),
            "Loaded configuration file"
        );

        Ok(config)
    }

    /// Validate a configuration document
    pub fn parse(contents: &str) -> Result<Self> {
        let mut document = match serde_json::from_str::<Value>(contents)? {
            Value::Object(map) => map,
            other => {
                return Err(ConfigError::InvalidField {
                    field: DOCUMENT_FIELD.to_string(),
                    reason: format!("expected an object, found {}", kind_of(&other)),
                })
            }
        };

        let home_url = match document.remove("home_url") {
            Some(Value::String(url)) => normalize_home_url(&url)?,
            Some(other) => {
                return Err(ConfigError::InvalidField {
                    field: "home_url".to_string(),
                    reason: format!("expected a string, found {}", kind_of(&other)),
                })
            }
            None => {
                return Err(ConfigError::MissingField {
                    field: "home_url".to_string(),
                })
            }
        };

        let macros = match document.remove("macros") {
            None => Vec::new(),
            Some(Value::Array(entries)) => entries
                .into_iter()
                .enumerate()
                .map(|(index, entry)| parse_macro(index, entry))
                .collect::<Result<Vec<_>>>()?,
            Some(other) => {
                return Err(ConfigError::InvalidField {
                    field: "macros".to_string(),
                    reason: format!("expected an array, found {}", kind_of(&other)),
                })
            }
        };

        warn_on_duplicate_names(&macros);

        Ok(Self {
            home_url,
            macros,
            source: None,
            generation: 0,
        })
    }

    /// Look up a macro by label; the first match wins
    pub fn find_macro(&self, name: &str) -> Option<&MacroDef> {
        self.macros.iter().find(|m| m.name == name)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::defaults()
    }
}

fn default_home_url() -> Url {
    Url::parse(DEFAULT_HOME_URL).expect("about:blank is a valid URL")
}

fn parse_macro(index: usize, entry: Value) -> Result<MacroDef> {
    let field = format!("macros[{index}]");
    let mut entry = match entry {
        Value::Object(map) => map,
        other => {
            return Err(ConfigError::InvalidField {
                field,
                reason: format!("expected an object, found {}", kind_of(&other)),
            })
        }
    };

    Ok(MacroDef {
        name: string_field(first_of(&mut entry, &NAME_KEYS), &format!("{field}.name"))?,
        text: string_field(first_of(&mut entry, &TEXT_KEYS), &format!("{field}.text"))?,
    })
}

/// Value of the first key present
fn first_of(entry: &mut Map<String, Value>, keys: &[&str]) -> Option<Value> {
    keys.iter().find_map(|key| entry.remove(*key))
}

fn string_field(value: Option<Value>, field: &str) -> Result<String> {
    match value {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(ConfigError::InvalidField {
            field: field.to_string(),
            reason: format!("expected a string, found {}", kind_of(&other)),
        }),
        None => Err(ConfigError::MissingField {
            field: field.to_string(),
        }),
    }
}

/// Trim and give scheme-less hosts an `https://` prefix
fn normalize_home_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidField {
            field: "home_url".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let candidate = if trimmed.contains("://")
        || PASSTHROUGH_SCHEMES
            .iter()
            .any(|scheme| trimmed.starts_with(scheme))
    {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    Url::parse(&candidate).map_err(|e| ConfigError::InvalidField {
        field: "home_url".to_string(),
        reason: e.to_string(),
    })
}

fn warn_on_duplicate_names(macros: &[MacroDef]) {
    let mut seen = HashSet::new();
    for def in macros {
        if !seen.insert(def.name.as_str()) {
            tracing::warn!(name = %def.name, "Duplicate macro name, first entry wins on lookup");
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let config = Configuration::parse(
            r#"{
                "home_url": "https://gateway.example.com/guacamole/",
                "macros": [
                    {"name": "1", "text": "sebastian.garcia"},
                    {"name": "4", "text": "sudo apt update"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            config.home_url.as_str(),
            "https://gateway.example.com/guacamole/"
        );
        assert_eq!(
            config.macros,
            vec![
                MacroDef::new("1", "sebastian.garcia"),
                MacroDef::new("4", "sudo apt update"),
            ]
        );
    }

    #[test]
    fn test_missing_home_url_names_field() {
        let err = Configuration::parse(r#"{"macros": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { .. }));
        assert_eq!(err.field(), Some("home_url"));
    }

    #[test]
    fn test_macro_missing_text_names_entry() {
        let err = Configuration::parse(
            r#"{"home_url": "https://a.example", "macros": [{"name": "ok", "text": "x"}, {"name": "bad"}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("macros[1].text"));
    }

    #[test]
    fn test_macro_missing_name_names_entry() {
        let err = Configuration::parse(
            r#"{"home_url": "https://a.example", "macros": [{"text": "x"}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("macros[0].name"));
    }

    #[test]
    fn test_non_object_macro_rejected() {
        let err = Configuration::parse(r#"{"home_url": "https://a.example", "macros": ["x"]}"#)
            .unwrap_err();
        assert_eq!(err.field(), Some("macros[0]"));
    }

    #[test]
    fn test_alias_keys_accepted() {
        let config = Configuration::parse(
            r#"{"home_url": "https://a.example", "macros": [
                {"label": "user", "macro": "root"},
                {"button": "ls", "text": "ls -la\n"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(config.macros[0], MacroDef::new("user", "root"));
        assert_eq!(config.macros[1], MacroDef::new("ls", "ls -la\n"));
    }

    #[test]
    fn test_canonical_key_wins_over_alias() {
        let config = Configuration::parse(
            r#"{"home_url": "https://a.example", "macros": [
                {"name": "a", "label": "b", "text": "x"},
                {"label": "c", "button": "d", "text": "y", "macro": "z"},
                {"button": "e", "macro": "w"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            config.macros,
            vec![
                MacroDef::new("a", "x"),
                MacroDef::new("c", "y"),
                MacroDef::new("e", "w"),
            ]
        );
    }

    #[test]
    fn test_non_object_document_rejected() {
        let err = Configuration::parse(r#"["https://a.example", []]"#).unwrap_err();
        assert_eq!(err.field(), Some("(document)"));
        assert!(matches!(
            err,
            ConfigError::InvalidField { ref reason, .. } if reason == "expected an object, found an array"
        ));
    }

    #[test]
    fn test_scheme_prefixed_when_missing() {
        let config = Configuration::parse(r#"{"home_url": "  gateway.local:8080/guac  "}"#).unwrap();
        assert_eq!(config.home_url.as_str(), "https://gateway.local:8080/guac");
        assert!(config.macros.is_empty());
    }

    #[test]
    fn test_about_blank_kept() {
        let config = Configuration::parse(r#"{"home_url": "about:blank"}"#).unwrap();
        assert_eq!(config.home_url.as_str(), "about:blank");
    }

    #[test]
    fn test_wrong_home_url_type() {
        let err = Configuration::parse(r#"{"home_url": 42}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidField { .. }));
        assert_eq!(err.field(), Some("home_url"));
    }

    #[test]
    fn test_malformed_json() {
        let err = Configuration::parse("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_duplicate_names_are_advisory() {
        let config = Configuration::parse(
            r#"{"home_url": "https://a.example", "macros": [
                {"name": "x", "text": "first"},
                {"name": "x", "text": "second"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(config.macros.len(), 2);
        assert_eq!(config.find_macro("x").unwrap().text, "first");
    }
}
