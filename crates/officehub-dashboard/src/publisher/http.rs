//! REST publisher for the chat platform.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};

use officehub_core::config::ChatConfig;
use officehub_core::types::{Control, ControlStyle, Document, MessageHandle, SurfaceId};

use super::{PublishError, SurfacePublisher};

/// Buttons allowed per action row.
const BUTTONS_PER_ROW: usize = 5;

/// Publishes documents as embed messages through the chat platform's REST API.
#[derive(Debug, Clone)]
pub struct ChatApiPublisher {
    http: reqwest::Client,
    api_base: String,
    bot_token: String,
}

#[derive(Debug, Serialize)]
struct MessagePayload {
    embeds: Vec<Embed>,
    components: Vec<ActionRow>,
}

#[derive(Debug, Serialize)]
struct Embed {
    title: String,
    description: String,
    color: u32,
    fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    footer: Option<EmbedFooter>,
}

#[derive(Debug, Serialize)]
struct EmbedField {
    name: String,
    value: String,
    inline: bool,
}

#[derive(Debug, Serialize)]
struct EmbedFooter {
    text: String,
}

#[derive(Debug, Serialize)]
struct ActionRow {
    #[serde(rename = "type")]
    kind: u8,
    components: Vec<Button>,
}

#[derive(Debug, Serialize)]
struct Button {
    #[serde(rename = "type")]
    kind: u8,
    style: u8,
    label: String,
    custom_id: String,
    disabled: bool,
}

#[derive(Debug, Deserialize)]
struct CreatedMessage {
    id: String,
}

impl From<&Control> for Button {
    fn from(control: &Control) -> Self {
        let style = match control.style {
            ControlStyle::Primary => 1,
            ControlStyle::Secondary => 2,
            ControlStyle::Danger => 4,
        };
        Self {
            kind: 2,
            style,
            label: control.label.clone(),
            custom_id: control.custom_id.clone(),
            disabled: control.disabled,
        }
    }
}

impl From<&Document> for MessagePayload {
    fn from(doc: &Document) -> Self {
        let embed = Embed {
            title: doc.title.clone(),
            description: doc.description.clone(),
            color: doc.color,
            fields: doc
                .fields
                .iter()
                .map(|f| EmbedField {
                    name: f.name.clone(),
                    value: f.value.clone(),
                    inline: f.inline,
                })
                .collect(),
            footer: doc.footer.clone().map(|text| EmbedFooter { text }),
        };
        let components = doc
            .controls
            .chunks(BUTTONS_PER_ROW)
            .map(|row| ActionRow {
                kind: 1,
                components: row.iter().map(Button::from).collect(),
            })
            .collect();
        Self {
            embeds: vec![embed],
            components,
        }
    }
}

impl ChatApiPublisher {
    /// Build a publisher from configuration.
    pub fn new(config: &ChatConfig) -> Result<Self, PublishError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| PublishError::Transport(format!("failed to build client: {e}")))?;
        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bot_token: config.bot_token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.api_base, path))
            .header(reqwest::header::AUTHORIZATION, format!("Bot {}", self.bot_token))
    }

    async fn send(&self, builder: RequestBuilder) -> Result<reqwest::Response, PublishError> {
        let response = builder
            .send()
            .await
            .map_err(|e| PublishError::Transport(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(PublishError::Rejected {
            status: status.as_u16(),
            message: message.chars().take(200).collect(),
        })
    }
}

#[async_trait]
impl SurfacePublisher for ChatApiPublisher {
    async fn create(
        &self,
        surface: &SurfaceId,
        document: &Document,
    ) -> Result<MessageHandle, PublishError> {
        let path = format!("/channels/{}/messages", surface.channel);
        let response = self
            .send(self.request(Method::POST, &path).json(&MessagePayload::from(document)))
            .await?;
        let created: CreatedMessage = response.json().await.map_err(|e| PublishError::Rejected {
            status: StatusCode::OK.as_u16(),
            message: format!("unexpected create response: {e}"),
        })?;
        tracing::debug!(surface = %surface, message = %created.id, "Created dashboard message");
        Ok(MessageHandle::from(created.id))
    }

    async fn edit(
        &self,
        surface: &SurfaceId,
        handle: &MessageHandle,
        document: &Document,
    ) -> Result<(), PublishError> {
        let path = format!("/channels/{}/messages/{}", surface.channel, handle);
        match self
            .send(self.request(Method::PATCH, &path).json(&MessagePayload::from(document)))
            .await
        {
            Ok(_) => Ok(()),
            Err(PublishError::Rejected { status: 404, .. }) => Err(PublishError::MessageGone),
            Err(e) => Err(e),
        }
    }
}
