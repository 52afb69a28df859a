use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::Value;

use crate::models::QueryPairs;

pub const GENERIC_GREETING: &str = "This HTTP triggered function executed successfully. Pass a name in the query string or in the request body for a personalized response.";

/// Greets `name` from the query string or, failing that, from a JSON body.
/// Always answers 200, even when the body cannot be read.
pub async fn http_example(
    req: HttpRequest,
    body: Result<web::Bytes, actix_web::Error>,
) -> HttpResponse {
    tracing::info!("HTTP trigger function processed a request.");

    let name = QueryPairs::parse(req.query_string())
        .first("name")
        .filter(|n| !n.is_empty())
        .or_else(|| match &body {
            Ok(body) => name_from_body(body),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unreadable request body");
                None
            }
        });

    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(greeting(name.as_deref()))
}

/// Best-effort read of `name` from a JSON object body; anything else is "no name".
pub fn name_from_body(body: &[u8]) -> Option<String> {
    if body.is_empty() {
        return None;
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(value) => value.get("name").and_then(name_text),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring unparseable request body");
            None
        }
    }
}

/// Strings are used as-is; other truthy values are rendered as JSON text.
/// `null`, `false`, zero and empty strings, arrays or objects are not a name.
fn name_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Object(fields) if fields.is_empty() => None,
        other => Some(other.to_string()),
    }
}

pub fn greeting(name: Option<&str>) -> String {
    match name {
        Some(name) => format!(
            "Hello, {}. This HTTP triggered function executed successfully.",
            name
        ),
        None => GENERIC_GREETING.to_string(),
    }
}
