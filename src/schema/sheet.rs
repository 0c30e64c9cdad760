//! Tabular document dialect (schema source (b)).
//!
//! Sheet cells are loosely typed: a `Mandatory` column may hold a string, a
//! published number, or a bare boolean depending on how the sheet was
//! authored. [`Cell`] absorbs all of those into text before normalization.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::errors::FormError;
use crate::schema::{parse_rule, split_options, FieldDefinition, FieldKind, FormDefinition};
use crate::transport::Transport;

const SOURCE_SUFFIX: &str = ".json";
const MANDATORY_MARK: &str = "x";

/// One loosely-typed sheet cell, coerced to text.
#[derive(Debug, Default, Clone)]
struct Cell(String);

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let text = match value {
            Value::String(text) => text,
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            Value::Null => String::new(),
            other => other.to_string(),
        };
        Ok(Cell(text))
    }
}

impl Cell {
    fn into_inner(self) -> String {
        self.0
    }

    fn opt(self) -> Option<String> {
        if self.0.trim().is_empty() {
            None
        } else {
            Some(self.0)
        }
    }
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Vec<SheetRow>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct SheetRow {
    #[serde(rename = "Field")]
    field: Cell,
    #[serde(rename = "Label")]
    label: Cell,
    #[serde(rename = "Type")]
    kind: Cell,
    #[serde(rename = "Placeholder")]
    placeholder: Cell,
    #[serde(rename = "Value")]
    value: Cell,
    #[serde(rename = "Mandatory")]
    mandatory: Cell,
    #[serde(rename = "Options")]
    options: Cell,
    #[serde(rename = "Rules")]
    rules: Cell,
    #[serde(rename = "Support")]
    support: Cell,
    #[serde(rename = "Section")]
    section: Cell,
    #[serde(rename = "Style")]
    style: Cell,
    #[serde(rename = "Icon")]
    icon: Cell,
    #[serde(rename = "Extra")]
    extra: Cell,
}

/// Fetches and normalizes a sheet-backed form. The submission action is the
/// source URL truncated at its trailing `.json` segment; no CSRF token exists
/// in this mode.
pub fn fetch_sheet_form(transport: &dyn Transport, url: &str) -> Result<FormDefinition, FormError> {
    let response = transport.get(url, &[])?;
    if !response.is_success() {
        return Err(FormError::SchemaFetch {
            message: format!("Error loading webform: {url}"),
        });
    }
    let envelope: Envelope = serde_json::from_str(&response.body)?;
    tracing::debug!(rows = envelope.data.len(), "Loaded sheet form");
    let action = derive_action(url);
    let fields = envelope.data.into_iter().map(normalize_row).collect();
    Ok(FormDefinition {
        action,
        csrf_token: None,
        config_token: None,
        fields,
    })
}

fn derive_action(url: &str) -> String {
    match url.rfind(SOURCE_SUFFIX) {
        Some(index) => url[..index].to_string(),
        None => url.to_string(),
    }
}

fn normalize_row(row: SheetRow) -> FieldDefinition {
    let rule = row.rules.opt().and_then(|raw| parse_rule(&raw));
    FieldDefinition {
        field: row.field.into_inner(),
        label: row.label.into_inner(),
        kind: FieldKind::parse(&row.kind.into_inner()),
        placeholder: row.placeholder.into_inner(),
        default_value: row.value.into_inner(),
        mandatory: row.mandatory.into_inner().trim() == MANDATORY_MARK,
        options: split_options(&row.options.into_inner()),
        support: row.support.into_inner(),
        section: row.section.opt(),
        style: row.style.opt(),
        rule,
        icon: row.icon.opt(),
        redirect_target: row.extra.opt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_strips_trailing_json_suffix() {
        assert_eq!(derive_action("/forms/contact.json"), "/forms/contact");
        assert_eq!(
            derive_action("https://host/forms/contact.json?sheet=main"),
            "https://host/forms/contact"
        );
        assert_eq!(derive_action("/forms/contact"), "/forms/contact");
    }

    #[test]
    fn cells_coerce_numbers_and_booleans() {
        let row: SheetRow = serde_json::from_value(serde_json::json!({
            "Field": "age",
            "Label": 42,
            "Mandatory": true
        }))
        .unwrap();
        let fd = normalize_row(row);
        assert_eq!(fd.field, "age");
        assert_eq!(fd.label, "42");
        // Only the literal mark counts as mandatory.
        assert!(!fd.mandatory);
    }

    #[test]
    fn mandatory_mark_and_options_normalize() {
        let row: SheetRow = serde_json::from_value(serde_json::json!({
            "Field": "colors",
            "Type": "checkbox",
            "Mandatory": "x",
            "Options": "Red, Blue"
        }))
        .unwrap();
        let fd = normalize_row(row);
        assert!(fd.mandatory);
        assert_eq!(fd.kind, FieldKind::Checkbox);
        assert_eq!(fd.options, vec!["Red", "Blue"]);
    }

    #[test]
    fn malformed_rules_cell_is_dropped() {
        let row: SheetRow = serde_json::from_value(serde_json::json!({
            "Field": "speciality",
            "Rules": "{oops"
        }))
        .unwrap();
        assert!(normalize_row(row).rule.is_none());
    }
}
