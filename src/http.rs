use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

use crate::config::Config;
use crate::decode::{decode_list, decode_one};
use crate::error::ApiError;
use crate::session::Session;

const JSON: &str = "application/json";

/// Request body variants. Only multipart skips the JSON content type.
#[derive(Debug)]
pub enum Payload {
    Empty,
    Json(Value),
    Multipart(Form),
}

/// Authenticated fetch against the backend. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: &str, session: Session, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn from_config(config: &Config, session: Session) -> Result<Self, ApiError> {
        Self::new(&config.api.base_url, session, config.timeout())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send one request. The token check happens before anything touches the
    /// network; non-2xx responses become [`ApiError::Http`].
    pub async fn send(&self, method: Method, path: &str, payload: Payload) -> Result<Value, ApiError> {
        let token = self.session.require_token()?;
        let url = self.url(path);
        tracing::debug!("{method} {path}");

        let request = self.http.request(method.clone(), &url).bearer_auth(token);
        let request = match payload {
            Payload::Empty => request.header(CONTENT_TYPE, HeaderValue::from_static(JSON)),
            Payload::Json(body) => request
                .header(CONTENT_TYPE, HeaderValue::from_static(JSON))
                .body(serde_json::to_vec(&body).map_err(|err| {
                    ApiError::InvalidInput(format!("request body is not serializable: {err}"))
                })?),
            Payload::Multipart(form) => request.multipart(form),
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                tracing::warn!("{method} {path} rejected: auth token missing or expired");
            } else {
                tracing::debug!("{method} {path} failed with {status}");
            }
            return Err(ApiError::from_response(status, &body));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|err| ApiError::Decode {
            endpoint: path.to_string(),
            reason: format!("response is not JSON: {err}"),
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.send(Method::GET, path, Payload::Empty).await?;
        decode_one(path, body)
    }

    /// Fetch a list endpoint. The backend signals "no items" with 404, so
    /// that status yields an empty list.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        match self.send(Method::GET, path, Payload::Empty).await {
            Ok(body) => decode_list(path, body),
            Err(err) if err.is_not_found() => {
                tracing::debug!("{path} returned 404, treating as empty");
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.send(Method::POST, path, Payload::Json(to_value(body)?)).await?;
        decode_one(path, body)
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = self.send(Method::PATCH, path, Payload::Json(to_value(body)?)).await?;
        decode_one(path, body)
    }

    pub async fn upload<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T, ApiError> {
        let body = self.send(Method::POST, path, Payload::Multipart(form)).await?;
        decode_one(path, body)
    }
}

fn to_value<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body)
        .map_err(|err| ApiError::InvalidInput(format!("request body is not serializable: {err}")))
}

/// Build a single-file multipart form under the `file` field, rejecting
/// extensions outside `allowed` before any I/O.
pub async fn file_form(path: &Path, allowed: &[(&str, &str)]) -> Result<Form, ApiError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let Some((_, mime)) = allowed.iter().find(|(ext, _)| *ext == extension) else {
        let accepted: Vec<&str> = allowed.iter().map(|(ext, _)| *ext).collect();
        return Err(ApiError::InvalidInput(format!(
            "unsupported file type {:?}; expected one of: {}",
            path.display().to_string(),
            accepted.join(", ")
        )));
    };

    let bytes = tokio::fs::read(path).await.map_err(|err| {
        ApiError::InvalidInput(format!("failed to read {}: {err}", path.display()))
    })?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload")
        .to_string();

    let part = Part::bytes(bytes).file_name(file_name).mime_str(mime)?;
    Ok(Form::new().part("file", part))
}
