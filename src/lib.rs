#![doc(test(attr(deny(warnings))))]

//! Webform Core interprets declarative, row-oriented field schemas into live
//! multi-step forms with conditional visibility and credentialed submission.

pub mod errors;
pub mod form;
pub mod markup;
pub mod placeholders;
pub mod schema;
pub mod submit;
pub mod transport;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        init_tracing();
        tracing::info!("Webform Core tracing initialized.");
    });
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::from_default_env().add_directive("webform_core=info".parse().unwrap());

    fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
