use lambda_http::http::{response::Builder, StatusCode};
use lambda_http::{Error, Response};
use serde::Serialize;
use serde_json::json;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, X-Amz-Date, Authorization, X-Api-Key";

fn cors_builder(status: &StatusCode) -> Builder {
    Response::builder()
        .status(status)
        .header("Access-Control-Allow-Origin", ALLOW_ORIGIN)
        .header("Access-Control-Allow-Methods", ALLOW_METHODS)
        .header("Access-Control-Allow-Headers", ALLOW_HEADERS)
}

pub fn empty_response(status: &StatusCode) -> Result<Response<String>, Error> {
    let response = cors_builder(status)
        .body("".to_string())
        .map_err(Box::new)?;

    Ok(response)
}

pub fn json_response(
    status: &StatusCode,
    body: &impl Serialize,
) -> Result<Response<String>, Error> {
    let response = cors_builder(status)
        .header("content-type", "application/json")
        .body(serde_json::to_string(&body)?)
        .map_err(Box::new)?;

    Ok(response)
}

pub fn error_response(status: &StatusCode, message: &str) -> Result<Response<String>, Error> {
    json_response(status, &json!({ "message": message }))
}
