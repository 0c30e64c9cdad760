//! Localized placeholder strings, looked up once per form construction.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::markup::to_class_name;
use crate::transport::Transport;

pub const PLACEHOLDERS_PATH: &str = "/placeholders.json";

static DEFAULTS: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([("formContinue", "Continue to"), ("formBack", "Back to")])
});

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Vec<Row>,
}

#[derive(Deserialize)]
struct Row {
    #[serde(default, rename = "Key")]
    key: String,
    #[serde(default, rename = "Text")]
    text: String,
}

/// Mapping of localized label strings keyed by camel-cased placeholder key.
#[derive(Debug, Clone, Default)]
pub struct Placeholders {
    entries: BTreeMap<String, String>,
}

impl Placeholders {
    /// Fetches the placeholder sheet. A missing or malformed sheet falls back
    /// to the built-in defaults rather than failing form construction.
    pub fn fetch(transport: &dyn Transport) -> Self {
        match transport.get(PLACEHOLDERS_PATH, &[]) {
            Ok(response) if response.is_success() => {
                match serde_json::from_str::<Envelope>(&response.body) {
                    Ok(envelope) => Self::from_rows(envelope.data),
                    Err(err) => {
                        tracing::warn!("Malformed placeholder sheet: {err}");
                        Self::default()
                    }
                }
            }
            Ok(response) => {
                tracing::debug!(status = response.status, "No placeholder sheet available");
                Self::default()
            }
            Err(err) => {
                tracing::debug!("Placeholder fetch failed: {err}");
                Self::default()
            }
        }
    }

    fn from_rows(rows: Vec<Row>) -> Self {
        let entries = rows
            .into_iter()
            .filter(|row| !row.key.trim().is_empty())
            .map(|row| (to_camel_case(&row.key), row.text))
            .collect();
        Self { entries }
    }

    pub fn get(&self, key: &str) -> &str {
        self.entries
            .get(key)
            .map(String::as_str)
            .or_else(|| DEFAULTS.get(key).copied())
            .unwrap_or("")
    }

    pub fn form_continue(&self) -> &str {
        self.get("formContinue")
    }

    pub fn form_back(&self) -> &str {
        self.get("formBack")
    }
}

fn to_camel_case(key: &str) -> String {
    let mut camel = String::new();
    for (index, segment) in to_class_name(key).split('-').enumerate() {
        if index == 0 {
            camel.push_str(segment);
        } else {
            let mut chars = segment.chars();
            if let Some(first) = chars.next() {
                camel.push(first.to_ascii_uppercase());
                camel.push_str(chars.as_str());
            }
        }
    }
    camel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_camel_cased() {
        assert_eq!(to_camel_case("Form Continue"), "formContinue");
        assert_eq!(to_camel_case("form-back"), "formBack");
        assert_eq!(to_camel_case("single"), "single");
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let ph = Placeholders::default();
        assert_eq!(ph.form_continue(), "Continue to");
        assert_eq!(ph.form_back(), "Back to");
        assert_eq!(ph.get("unknownKey"), "");
    }

    #[test]
    fn sheet_rows_override_defaults() {
        let ph = Placeholders::from_rows(vec![Row {
            key: "Form Continue".into(),
            text: "Weiter zu".into(),
        }]);
        assert_eq!(ph.form_continue(), "Weiter zu");
        assert_eq!(ph.form_back(), "Back to");
    }
}
