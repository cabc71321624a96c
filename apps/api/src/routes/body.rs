//! Request-body parsing collaborator.
//!
//! Handlers never touch raw bodies: this extractor turns any supported
//! content type (JSON, URL-encoded form, multipart/form-data) into a flat
//! `field name → value` map. Requests with no recognized content type get a
//! JSON parse attempt, the wire default of the clients this API serves.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::extract::{FromRequest, Multipart, Request};
use axum::{Form, Json};
use bytes::Bytes;
use serde_json::Value;

use crate::errors::AppError;

const INVALID_FORMAT: &str = "Invalid request format. Use JSON or URL-encoded form data.";

/// Flat field map over a request body. Only string-valued members are kept;
/// `get` treats empty strings as absent.
#[derive(Debug)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(value) = Json::<Value>::from_request(req, state)
                .await
                .map_err(|_| invalid_format())?;
            Ok(Self(string_members(value)))
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|_| invalid_format())?;
            Ok(Self(fields))
        } else if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|_| invalid_format())?;
            let mut fields = HashMap::new();
            while let Some(field) = multipart.next_field().await.map_err(|_| invalid_format())? {
                let Some(name) = field.name().map(str::to_owned) else {
                    continue;
                };
                let text = field.text().await.map_err(|_| invalid_format())?;
                fields.insert(name, text.trim().to_string());
            }
            Ok(Self(fields))
        } else {
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|_| invalid_format())?;
            let value: Value = serde_json::from_slice(&bytes).map_err(|_| invalid_format())?;
            Ok(Self(string_members(value)))
        }
    }
}

fn invalid_format() -> AppError {
    AppError::Validation(INVALID_FORMAT.to_string())
}

fn string_members(value: Value) -> HashMap<String, String> {
    match value {
        Value::Object(map) => map
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(s) => Some((key, s)),
                _ => None,
            })
            .collect(),
        _ => HashMap::new(),
    }
}
