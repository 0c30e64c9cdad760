//! Renders a schema-driven form to markup on stdout.
//!
//! Usage:
//!   webform_cli <schema-url>.json       render a sheet-backed form
//!   webform_cli --token <config-token>  render a builder-service form

use std::env;
use std::process::ExitCode;

use webform_core::form::{render_error, Form};
use webform_core::placeholders::Placeholders;
use webform_core::schema::{builder::fetch_builder_form, sheet::fetch_sheet_form, FormDefinition};
use webform_core::transport::UreqTransport;

fn main() -> ExitCode {
    webform_core::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let transport = UreqTransport::new();
    let definition = match args.as_slice() {
        [flag, token] if flag == "--token" => fetch_builder_form(&transport, token),
        [url] if url.contains(".json") => fetch_sheet_form(&transport, url),
        _ => {
            eprintln!("usage: webform_cli <schema-url>.json | --token <config-token>");
            return ExitCode::FAILURE;
        }
    };

    render(definition, &transport)
}

fn render(
    definition: Result<FormDefinition, webform_core::errors::FormError>,
    transport: &UreqTransport,
) -> ExitCode {
    match definition {
        Ok(definition) => {
            let form = Form::build(definition, Placeholders::fetch(transport));
            println!("{}", form.render().to_html());
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("{}", render_error(&err.to_string()).to_html());
            ExitCode::FAILURE
        }
    }
}
