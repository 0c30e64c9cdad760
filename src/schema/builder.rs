//! Form-builder service dialect (schema source (a)).

use serde::Deserialize;

use crate::errors::FormError;
use crate::schema::{FieldDefinition, FieldKind, FormDefinition};
use crate::transport::{Transport, CONFIG_TOKEN_HEADER, FORMS_API_ENDPOINT};

const SUBMIT_FIELD_ID: &str = "submit";
const SUBMIT_LABEL: &str = "Submit";
const SUBMIT_REDIRECT: &str = "/forms/thank-you";
const REQUIRED_VALIDATOR: &str = "required";

#[derive(Deserialize)]
struct Envelope {
    data: Payload,
}

#[derive(Deserialize)]
struct Payload {
    #[serde(default, rename = "csrfToken")]
    csrf_token: Option<String>,
    #[serde(default)]
    fields: Vec<BuilderField>,
}

#[derive(Deserialize)]
struct BuilderField {
    id: String,
    #[serde(default)]
    label: String,
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    value: String,
    #[serde(default)]
    placeholder: String,
    #[serde(default)]
    validators: Vec<BuilderValidator>,
}

#[derive(Deserialize)]
struct BuilderValidator {
    #[serde(rename = "type")]
    kind: String,
}

/// Fetches and normalizes a builder-service form.
///
/// A non-success status becomes a typed error whose message callers render
/// inline; no widgets are constructed for that form.
pub fn fetch_builder_form(
    transport: &dyn Transport,
    token: &str,
) -> Result<FormDefinition, FormError> {
    let response = transport.get(FORMS_API_ENDPOINT, &[(CONFIG_TOKEN_HEADER, token)])?;
    if response.status != 200 {
        return Err(FormError::SchemaFetch {
            message: format!("Error loading webform: {token}"),
        });
    }
    let envelope: Envelope = serde_json::from_str(&response.body)?;
    tracing::debug!(fields = envelope.data.fields.len(), "Loaded builder form");
    let fields = envelope.data.fields.into_iter().map(normalize_field).collect();
    Ok(FormDefinition {
        action: FORMS_API_ENDPOINT.to_string(),
        csrf_token: envelope.data.csrf_token,
        config_token: Some(token.to_string()),
        fields,
    })
}

fn normalize_field(raw: BuilderField) -> FieldDefinition {
    if raw.id == SUBMIT_FIELD_ID {
        // Reserved identifier: fixed label and redirect target by convention,
        // regardless of upstream content.
        return FieldDefinition {
            field: SUBMIT_FIELD_ID.to_string(),
            label: SUBMIT_LABEL.to_string(),
            kind: FieldKind::Submit,
            redirect_target: Some(SUBMIT_REDIRECT.to_string()),
            ..FieldDefinition::default()
        };
    }
    let mandatory = raw
        .validators
        .iter()
        .any(|validator| validator.kind == REQUIRED_VALIDATOR);
    FieldDefinition {
        field: raw.id,
        label: raw.label,
        kind: FieldKind::parse(&raw.kind),
        placeholder: raw.placeholder,
        default_value: raw.value,
        mandatory,
        ..FieldDefinition::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(json: serde_json::Value) -> FieldDefinition {
        normalize_field(serde_json::from_value(json).unwrap())
    }

    #[test]
    fn required_validator_maps_to_mandatory() {
        let fd = field(serde_json::json!({
            "id": "email",
            "label": "Email",
            "type": "email",
            "validators": [{ "type": "required" }]
        }));
        assert!(fd.mandatory);
        assert_eq!(fd.kind, FieldKind::Email);

        let fd = field(serde_json::json!({ "id": "nick", "label": "Nickname" }));
        assert!(!fd.mandatory);
        assert_eq!(fd.kind, FieldKind::Text);
    }

    #[test]
    fn submit_identifier_is_synthesized() {
        let fd = field(serde_json::json!({
            "id": "submit",
            "label": "Send it",
            "type": "text"
        }));
        assert_eq!(fd.kind, FieldKind::Submit);
        assert_eq!(fd.label, "Submit");
        assert_eq!(fd.redirect_target.as_deref(), Some("/forms/thank-you"));
    }
}
