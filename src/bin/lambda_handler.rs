//! AWS Lambda handler for the pension simulation API
//!
//! Routes JSON requests to the projection engine and returns the response
//! envelope. Supports Lambda Function URLs for direct HTTP access.
//!
//! Rules are read from the directory in `PENSION_RULES_DIR` when set,
//! otherwise the built-in defaults apply.

use std::path::Path;
use std::sync::Arc;

use lambda_http::http::Method;
use lambda_http::{run, service_fn, Body, Request, Response};
use lambda_runtime::Error;
use serde::de::DeserializeOwned;
use serde::Serialize;

use pension_projection::api::{respond, service_info, ApiResponse, PensionApi};
use pension_projection::{EngineError, ProjectionConfig, RuleSet};

const RULES_DIR_ENV: &str = "PENSION_RULES_DIR";

fn json_response<T: Serialize>(status: u16, body: &T) -> Result<Response<Body>, Error> {
    let text = serde_json::to_string(body)?;
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::Text(text))?)
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    json_response(status, &ApiResponse::<()>::error(message))
}

fn parse_body<T: DeserializeOwned>(event: &Request) -> Result<T, serde_json::Error> {
    match event.body() {
        Body::Text(s) => serde_json::from_str(s),
        Body::Binary(b) => serde_json::from_slice(b),
        Body::Empty => serde_json::from_str("{}"),
    }
}

/// Parse the body, run one API call and wrap the outcome
fn dispatch<B, T>(
    event: &Request,
    call: impl FnOnce(B) -> Result<T, EngineError>,
) -> Result<Response<Body>, Error>
where
    B: DeserializeOwned,
    T: Serialize,
{
    match parse_body(event) {
        Ok(body) => {
            let (status, envelope) = respond(call(body));
            json_response(status, &envelope)
        }
        Err(e) => error_response(400, &format!("Invalid JSON: {}", e)),
    }
}

async fn handler(rules: &RuleSet, event: Request) -> Result<Response<Body>, Error> {
    let api = PensionApi::new(rules, ProjectionConfig::starting_this_year());
    let path = event.uri().path().trim_end_matches('/');
    log::info!("{} {}", event.method(), path);

    match (event.method(), path) {
        (&Method::GET, "/health") => json_response(200, &service_info()),
        (&Method::POST, "/api/simulation/corpus") => {
            dispatch(&event, |body| api.simulate_corpus(body))
        }
        (&Method::POST, "/api/simulation/optimize") => {
            dispatch(&event, |body| api.optimize_contribution(body))
        }
        (&Method::POST, "/api/simulation/scenarios") => {
            dispatch(&event, |body| api.compare_scenarios(body))
        }
        (&Method::POST, "/api/tax/benefit") => {
            dispatch(&event, |body| Ok(api.tax_benefit(body)))
        }
        _ => error_response(404, &format!("No route for {} {}", event.method(), path)),
    }
}

fn load_rules() -> Result<RuleSet, Error> {
    match std::env::var(RULES_DIR_ENV) {
        Ok(dir) => {
            log::info!("Loading rules from {}", dir);
            Ok(RuleSet::from_csv_path(Path::new(&dir))?)
        }
        Err(_) => Ok(RuleSet::default_rules()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let rules = Arc::new(load_rules()?);

    run(service_fn(move |event: Request| {
        let rules = Arc::clone(&rules);
        async move { handler(&rules, event).await }
    }))
    .await
}
