mod common;

use common::MockTransport;
use webform_core::form::Form;
use webform_core::placeholders::Placeholders;
use webform_core::schema::{FieldDefinition, FieldKind, FormDefinition};
use webform_core::submit::SubmitOutcome;

const ACTION: &str = "https://forms.example.com/api/v2/forms";
const REDIRECT: &str = "/forms/thank-you";

fn submit_field() -> FieldDefinition {
    FieldDefinition {
        field: "submit".into(),
        label: "Submit".into(),
        kind: FieldKind::Submit,
        redirect_target: Some(REDIRECT.into()),
        ..FieldDefinition::default()
    }
}

fn name_field(value: &str, mandatory: bool) -> FieldDefinition {
    FieldDefinition {
        field: "name".into(),
        label: "Name".into(),
        kind: FieldKind::Text,
        default_value: value.into(),
        mandatory,
        ..FieldDefinition::default()
    }
}

fn token_form() -> Form {
    let definition = FormDefinition {
        action: ACTION.into(),
        csrf_token: Some("csrf-1".into()),
        config_token: Some("tok-1".into()),
        fields: vec![name_field("Ada", false), submit_field()],
    };
    Form::build(definition, Placeholders::default())
}

fn plain_form() -> Form {
    let definition = FormDefinition {
        action: "/forms/contact".into(),
        csrf_token: None,
        config_token: None,
        fields: vec![name_field("Ada", false), submit_field()],
    };
    Form::build(definition, Placeholders::default())
}

#[test]
fn successful_submission_redirects_and_replaces() {
    let transport = MockTransport::new();
    transport.stub(ACTION, 200, "OK");
    transport.stub("/forms/thank-you.plain.html", 200, "<h2>Thank you</h2>");

    let mut form = token_form();
    let outcome = form.press_submit(&transport).unwrap();
    match outcome {
        SubmitOutcome::Redirected { result, html } => {
            assert!(result.success);
            assert_eq!(result.status, 200);
            assert_eq!(result.message, "OK");
            assert_eq!(html, "<h2>Thank you</h2>");
        }
        other => panic!("expected redirect, got {other:?}"),
    }

    assert_eq!(transport.request_count("POST", ACTION), 1);
    assert_eq!(transport.request_count("GET", "/forms/thank-you.plain.html"), 1);
    assert_eq!(form.replacement(), Some("<h2>Thank you</h2>"));
    assert!(form.render().to_html().contains("<h2>Thank you</h2>"));
}

#[test]
fn token_mode_sends_csrf_and_config_header() {
    let transport = MockTransport::new();
    transport.stub(ACTION, 200, "OK");
    transport.stub("/forms/thank-you.plain.html", 200, "done");

    token_form().press_submit(&transport).unwrap();

    let post = &transport.requests()[0];
    assert_eq!(post.headers, vec![("x-config-token".to_string(), "tok-1".to_string())]);
    let body = post.body.as_ref().unwrap();
    assert_eq!(body["csrfToken"], "csrf-1");
    assert_eq!(body["name"], "Ada");
}

#[test]
fn plain_mode_wraps_payload_in_data() {
    let transport = MockTransport::new();
    transport.stub("/forms/contact", 200, "OK");
    transport.stub("/forms/thank-you.plain.html", 200, "done");

    plain_form().press_submit(&transport).unwrap();

    let post = &transport.requests()[0];
    assert!(post.headers.is_empty());
    let body = post.body.as_ref().unwrap();
    assert_eq!(body["data"]["name"], "Ada");
    assert!(body.get("csrfToken").is_none());
}

#[test]
fn rejected_submission_keeps_form_interactive() {
    let transport = MockTransport::new();
    transport.stub(ACTION, 422, "Validation failed upstream");

    let mut form = token_form();
    let outcome = form.press_submit(&transport).unwrap();
    match outcome {
        SubmitOutcome::Rejected(result) => {
            assert!(!result.success);
            assert_eq!(result.status, 422);
            assert_eq!(result.message, "Validation failed upstream");
        }
        other => panic!("expected rejection, got {other:?}"),
    }

    // No redirect fetch was issued and the form is untouched.
    assert_eq!(transport.request_count("GET", "/forms/thank-you.plain.html"), 0);
    assert!(form.replacement().is_none());
    form.set_value("name", "Grace").unwrap();
    assert_eq!(form.payload().get("name").unwrap(), "Grace");
}

#[test]
fn invalid_form_blocks_the_network_call() {
    let transport = MockTransport::new();

    let definition = FormDefinition {
        action: ACTION.into(),
        csrf_token: Some("csrf-1".into()),
        config_token: Some("tok-1".into()),
        fields: vec![name_field("", true), submit_field()],
    };
    let mut form = Form::build(definition, Placeholders::default());

    let outcome = form.press_submit(&transport).unwrap();
    match outcome {
        SubmitOutcome::Invalid(invalid) => assert_eq!(invalid.field, "name"),
        other => panic!("expected invalid outcome, got {other:?}"),
    }
    assert!(transport.requests().is_empty());
}

#[test]
fn accepted_without_redirect_target_replaces_nothing() {
    let transport = MockTransport::new();
    transport.stub("/forms/contact", 200, "OK");

    let definition = FormDefinition {
        action: "/forms/contact".into(),
        csrf_token: None,
        config_token: None,
        fields: vec![name_field("Ada", false)],
    };
    let mut form = Form::build(definition, Placeholders::default());

    let outcome = form.press_submit(&transport).unwrap();
    assert!(matches!(outcome, SubmitOutcome::Accepted(_)));
    assert!(form.replacement().is_none());
}
