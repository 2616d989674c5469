//! Telegram Bot API client over plain HTTPS.
//!
//! Every method answers with an `{ok, result, description}` envelope, even on
//! HTTP error statuses, so responses are decoded before the status is judged.

use crate::core::ChatApi;
use crate::domain::chat::Update;
use crate::utils::error::{FancyError, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.telegram.org";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Extra time on top of the long-poll timeout before the HTTP call gives up.
const POLL_GRACE: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RemoteFile {
    file_path: Option<String>,
}

#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
    token: String,
}

impl fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl TelegramClient {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    fn file_url(&self, file_path: &str) -> String {
        format!("{}/file/bot{}/{}", self.base_url, self.token, file_path)
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, request: RequestBuilder) -> Result<T> {
        tracing::debug!("Calling Telegram method {}", method);
        let response = request.send().await?;
        let status = response.status();
        let envelope: ApiResponse<T> = response.json().await?;

        if !envelope.ok {
            let description = envelope
                .description
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(FancyError::TelegramApiError {
                method: method.to_string(),
                description,
            });
        }

        envelope.result.ok_or_else(|| FancyError::TelegramApiError {
            method: method.to_string(),
            description: "response has no result".to_string(),
        })
    }

    async fn call_json<T: DeserializeOwned>(
        &self,
        method: &str,
        body: serde_json::Value,
        timeout: Duration,
    ) -> Result<T> {
        let request = self
            .client
            .post(self.method_url(method))
            .timeout(timeout)
            .json(&body);
        self.call(method, request).await
    }
}

#[async_trait]
impl ChatApi for TelegramClient {
    async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>> {
        let body = serde_json::json!({
            "offset": offset,
            "timeout": timeout_secs,
            "allowed_updates": ["message"],
        });
        let updates: Vec<Update> = self
            .call_json(
                "getUpdates",
                body,
                Duration::from_secs(timeout_secs) + POLL_GRACE,
            )
            .await?;

        if !updates.is_empty() {
            tracing::debug!("Received {} updates", updates.len());
        }
        Ok(updates)
    }

    async fn send_message(&self, chat_id: i64, text: &str, markdown: bool) -> Result<()> {
        let mut body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });
        if markdown {
            body["parse_mode"] = serde_json::Value::from("Markdown");
        }

        let _: serde_json::Value = self
            .call_json("sendMessage", body, REQUEST_TIMEOUT)
            .await?;
        Ok(())
    }

    async fn get_file_bytes(&self, file_id: &str) -> Result<Vec<u8>> {
        let remote: RemoteFile = self
            .call_json(
                "getFile",
                serde_json::json!({ "file_id": file_id }),
                REQUEST_TIMEOUT,
            )
            .await?;

        let file_path = remote
            .file_path
            .ok_or_else(|| FancyError::TelegramApiError {
                method: "getFile".to_string(),
                description: "file is not available for download".to_string(),
            })?;

        let response = self
            .client
            .get(self.file_url(&file_path))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;

        let data = response.bytes().await?;
        tracing::debug!("Downloaded {} ({} bytes)", file_path, data.len());
        Ok(data.to_vec())
    }

    async fn send_document(
        &self,
        chat_id: i64,
        file_name: &str,
        data: Vec<u8>,
        caption: &str,
    ) -> Result<()> {
        let document = Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str("text/plain")?;
        let form = Form::new()
            .text("chat_id", chat_id.to_string())
            .text("caption", caption.to_string())
            .part("document", document);

        let request = self
            .client
            .post(self.method_url("sendDocument"))
            .timeout(REQUEST_TIMEOUT)
            .multipart(form);

        let _: serde_json::Value = self.call("sendDocument", request).await?;
        Ok(())
    }
}
