//! MyMemory translation API client

use super::{TranslationBackend, TranslationResponse};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Reply {
    #[serde(default)]
    response_status: serde_json::Value,
    #[serde(default)]
    response_data: Option<ReplyData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReplyData {
    translated_text: Option<String>,
}

/// Only a numeric status counts; the string form some errors carry does not
fn parse_status(value: &serde_json::Value) -> Option<u16> {
    value.as_u64().and_then(|n| u16::try_from(n).ok())
}

/// Decode a raw reply body
pub fn parse_reply(body: &str) -> Result<TranslationResponse> {
    let reply: Reply = serde_json::from_str(body)?;
    Ok(TranslationResponse {
        status: parse_status(&reply.response_status),
        translated_text: reply.response_data.and_then(|d| d.translated_text),
    })
}

#[derive(Debug, Clone)]
pub struct MyMemoryClient {
    client: Client,
    endpoint: String,
}

impl MyMemoryClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
        }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(&config.translation_endpoint)
    }

    pub fn request_url(&self, text: &str, lang_pair: &str) -> String {
        format!(
            "{}?q={}&langpair={}",
            self.endpoint,
            urlencoding::encode(text),
            urlencoding::encode(lang_pair)
        )
    }
}

#[async_trait]
impl TranslationBackend for MyMemoryClient {
    async fn fetch(&self, text: &str, lang_pair: &str) -> Result<TranslationResponse> {
        let url = self.request_url(text, lang_pair);
        debug!("MyMemory request: {}", url);

        // HTTP errors still carry a JSON body with the service status
        let body = self.client.get(&url).send().await?.text().await?;
        parse_reply(&body)
    }

    fn name(&self) -> &str {
        "mymemory"
    }
}
