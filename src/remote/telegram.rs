//! Telegram Bot API client

use crate::config::schema::BotConfig;
use crate::error::{VoxError, VoxResult};
use crate::remote::{ChatId, RemoteService, Upload};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

/// Envelope every Bot API method responds with
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// A bot or user account
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    #[serde(default)]
    pub first_name: String,
    pub username: Option<String>,
}

/// Incoming update from getUpdates
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

/// A chat message
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
    pub voice: Option<Voice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: ChatId,
}

/// Voice note metadata; `file_id` is the reusable handle
#[derive(Debug, Clone, Deserialize)]
pub struct Voice {
    pub file_id: String,
    #[serde(default)]
    pub duration: u32,
}

#[derive(Serialize)]
struct SendVoiceById<'a> {
    chat_id: ChatId,
    voice: &'a str,
    caption: &'a str,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: ChatId,
    text: &'a str,
}

#[derive(Serialize)]
struct GetUpdates {
    offset: i64,
    timeout: u32,
    allowed_updates: [&'static str; 1],
}

/// Bot API client bound to one bot token
#[derive(Clone)]
pub struct TelegramClient {
    http_client: Client,
    base_url: String,
}

impl TelegramClient {
    /// Create a client for `token` using the API settings in `config`
    pub fn new(token: &str, config: &BotConfig) -> VoxResult<Self> {
        // Long polls must not be cut short by the per-request timeout
        let timeout = config
            .request_timeout_secs
            .max(u64::from(config.poll_timeout_secs) + 10);

        let http_client = Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()
            .map_err(|e| VoxError::Internal(format!("building HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: format!("{}/bot{}", config.api_url.trim_end_matches('/'), token),
        })
    }

    /// Identify the bot behind the token
    pub async fn get_me(&self) -> VoxResult<User> {
        self.call_json("getMe", &serde_json::json!({})).await
    }

    /// Long-poll for updates with id >= `offset`
    pub async fn get_updates(&self, offset: i64, timeout_secs: u32) -> VoxResult<Vec<Update>> {
        let request = GetUpdates {
            offset,
            timeout: timeout_secs,
            allowed_updates: ["message"],
        };
        self.call_json("getUpdates", &request).await
    }

    /// Send a text message
    pub async fn send_message(&self, chat: ChatId, text: &str) -> VoxResult<Message> {
        self.call_json("sendMessage", &SendMessage {
            chat_id: chat,
            text,
        })
        .await
    }

    async fn call_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> VoxResult<T> {
        trace!(method, "Calling Bot API");
        let request = self.http_client.post(self.method_url(method)).json(body);
        self.execute(method, request).await
    }

    async fn call_form<T: DeserializeOwned>(&self, method: &str, form: Form) -> VoxResult<T> {
        trace!(method, "Calling Bot API with upload");
        let request = self.http_client.post(self.method_url(method)).multipart(form);
        self.execute(method, request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: &str,
        request: reqwest::RequestBuilder,
    ) -> VoxResult<T> {
        // Error bodies carry the API description, so read them whatever the status
        let response = request
            .send()
            .await
            .map_err(|e| VoxError::http(method, e.without_url()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| VoxError::http(method, e.without_url()))?;

        trace!(method, status = status.as_u16(), "Bot API responded");
        parse_response(method, &text)
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }
}

#[async_trait]
impl RemoteService for TelegramClient {
    async fn send_by_handle(&self, chat: ChatId, handle: &str, caption: &str) -> VoxResult<()> {
        let _: Message = self
            .call_json("sendVoice", &SendVoiceById {
                chat_id: chat,
                voice: handle,
                caption,
            })
            .await?;
        Ok(())
    }

    async fn send_by_upload(&self, chat: ChatId, upload: &Upload) -> VoxResult<String> {
        let voice = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(content_type_for(&upload.file_name))
            .map_err(|e| VoxError::Internal(format!("building upload for {}: {e}", upload.file_name)))?;

        let form = Form::new()
            .text("chat_id", chat.to_string())
            .text("caption", upload.caption.clone())
            .part("voice", voice);

        let message: Message = self.call_form("sendVoice", form).await?;
        let voice = message.voice.ok_or_else(|| VoxError::MissingHandle {
            method: "sendVoice".to_string(),
        })?;

        debug!(
            duration = voice.duration,
            "Uploaded {} as {}", upload.file_name, voice.file_id
        );
        Ok(voice.file_id)
    }

    fn service_name(&self) -> &'static str {
        "Telegram"
    }
}

/// Guess a MIME type for an audio file from its extension
fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("ogg") | Some("oga") | Some("opus") => "audio/ogg",
        Some("mp3") => "audio/mpeg",
        Some("m4a") => "audio/mp4",
        _ => "application/octet-stream",
    }
}

/// Unwrap a Bot API envelope into its result
fn parse_response<T: DeserializeOwned>(method: &str, text: &str) -> VoxResult<T> {
    let response: ApiResponse<T> = serde_json::from_str(text)
        .map_err(|e| VoxError::http(method, format!("unexpected response: {e}")))?;

    if !response.ok {
        return Err(VoxError::Api {
            method: method.to_string(),
            description: response
                .description
                .unwrap_or_else(|| "no description".to_string()),
        });
    }

    response.result.ok_or_else(|| VoxError::Api {
        method: method.to_string(),
        description: "response has no result".to_string(),
    })
}
