//! Canonical field schema and the normalizers feeding it.
//!
//! Two upstream shapes exist: the form-builder service ([`builder`]) and the
//! static tabular document ([`sheet`]). Both are reduced to one ordered
//! sequence of [`FieldDefinition`]s plus a submission descriptor, so the rest
//! of the engine never branches on the schema's origin.

pub mod builder;
pub mod sheet;

use serde::Deserialize;

/// Closed set of renderable field kinds. Unrecognized or missing upstream
/// types fall back to [`FieldKind::Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Textarea,
    Select,
    Checkbox,
    Radio,
    Hidden,
    Submit,
    Button,
    Heading,
    Copy,
}

impl FieldKind {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "email" => Self::Email,
            "tel" => Self::Tel,
            "textarea" => Self::Textarea,
            "select" => Self::Select,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "hidden" => Self::Hidden,
            "submit" => Self::Submit,
            "button" => Self::Button,
            "heading" => Self::Heading,
            "copy" => Self::Copy,
            _ => Self::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Tel => "tel",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Hidden => "hidden",
            Self::Submit => "submit",
            Self::Button => "button",
            Self::Heading => "heading",
            Self::Copy => "copy",
        }
    }
}

/// Equality condition evaluated against the current payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleCondition {
    pub key: String,
    pub operator: String,
    pub value: String,
}

/// Declarative visibility rule attached to a field. Kind and operator stay as
/// plain strings: unsupported values must remain representable no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VisibilityRule {
    #[serde(rename = "type")]
    pub kind: String,
    pub condition: RuleCondition,
}

/// Canonical description of one form control, produced by either normalizer.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    pub field: String,
    pub label: String,
    pub kind: FieldKind,
    pub placeholder: String,
    pub default_value: String,
    pub mandatory: bool,
    pub options: Vec<String>,
    pub support: String,
    pub section: Option<String>,
    pub style: Option<String>,
    pub rule: Option<VisibilityRule>,
    pub icon: Option<String>,
    pub redirect_target: Option<String>,
}

impl Default for FieldDefinition {
    fn default() -> Self {
        Self {
            field: String::new(),
            label: String::new(),
            kind: FieldKind::Text,
            placeholder: String::new(),
            default_value: String::new(),
            mandatory: false,
            options: Vec::new(),
            support: String::new(),
            section: None,
            style: None,
            rule: None,
            icon: None,
            redirect_target: None,
        }
    }
}

/// Normalizer output: the field sequence plus the submission descriptor.
#[derive(Debug, Clone)]
pub struct FormDefinition {
    pub action: String,
    pub csrf_token: Option<String>,
    pub config_token: Option<String>,
    pub fields: Vec<FieldDefinition>,
}

/// Lenient rule parse: a malformed rule is logged and dropped, never fatal to
/// the rest of the form.
pub(crate) fn parse_rule(raw: &str) -> Option<VisibilityRule> {
    if raw.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(raw) {
        Ok(rule) => Some(rule),
        Err(err) => {
            tracing::warn!("Invalid rule {raw}: {err}");
            None
        }
    }
}

pub(crate) fn split_options(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_type_defaults_to_text() {
        assert_eq!(FieldKind::parse("wibble"), FieldKind::Text);
        assert_eq!(FieldKind::parse(""), FieldKind::Text);
        assert_eq!(FieldKind::parse("SELECT"), FieldKind::Select);
    }

    #[test]
    fn options_are_trimmed_and_split() {
        assert_eq!(split_options("Red, Blue , Green"), vec!["Red", "Blue", "Green"]);
        assert!(split_options("").is_empty());
    }

    #[test]
    fn malformed_rule_is_dropped() {
        assert!(parse_rule("{not json").is_none());
        assert!(parse_rule("").is_none());
        let rule = parse_rule(
            r#"{"type":"visible","condition":{"key":"role","operator":"eq","value":"doctor"}}"#,
        )
        .unwrap();
        assert_eq!(rule.kind, "visible");
        assert_eq!(rule.condition.key, "role");
    }
}
