use anyhow::Context;
use reqwest::{multipart, Client};
use serde::Serialize;
use tracing::instrument;

/// Discord rejects embeds with more fields than this.
pub const MAX_EMBED_FIELDS: usize = 25;
/// Discord rejects messages with more embeds than this.
pub const MAX_EMBEDS: usize = 10;

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct WebhookMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Embed {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedImage {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl Embed {
    pub fn new(title: impl Into<String>, description: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color,
            ..Default::default()
        }
    }

    /// Shows an attached file, referenced as `attachment://<filename>`.
    pub fn with_attached_image(mut self, filename: &str) -> Self {
        self.image = Some(EmbedImage {
            url: format!("attachment://{filename}"),
        });
        self
    }

    pub fn add_field(&mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
    }
}

#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn png(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            mime: "image/png",
            bytes,
        }
    }
}

#[derive(Clone)]
pub struct DiscordWebhook {
    client: Client,
    url: String,
}

impl DiscordWebhook {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// Posts the message with its attachments in a single request.
    #[instrument(skip_all, fields(embeds = message.embeds.len(), files = attachments.len()))]
    pub async fn execute(
        &self,
        message: &WebhookMessage,
        attachments: Vec<Attachment>,
    ) -> anyhow::Result<()> {
        let mut form =
            multipart::Form::new().text("payload_json", serde_json::to_string(message)?);
        for (index, attachment) in attachments.into_iter().enumerate() {
            form = form.part(
                format!("files[{index}]"),
                multipart::Part::bytes(attachment.bytes)
                    .file_name(attachment.filename)
                    .mime_str(attachment.mime)?,
            );
        }

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .context("Failed to reach the webhook")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Webhook rejected the message: Received HTTP {status}: {body}");
        }

        Ok(())
    }
}
