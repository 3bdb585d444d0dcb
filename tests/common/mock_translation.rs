//! Mock Translation Backend for Testing
//!
//! Returns scripted replies and records each request.

use aem_prep::translation::{TranslationBackend, TranslationResponse};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum Reply {
    Ok(u16, &'static str),
    /// Service answered without a usable status
    NoStatus,
    TransportError,
}

#[derive(Debug)]
pub struct MockTranslationBackend {
    pub reply: Arc<Mutex<Reply>>,
    /// `(text, lang_pair)` of every request
    pub requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockTranslationBackend {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply: Arc::new(Mutex::new(reply)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TranslationBackend for MockTranslationBackend {
    async fn fetch(&self, text: &str, lang_pair: &str) -> Result<TranslationResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((text.to_string(), lang_pair.to_string()));

        let reply = self.reply.lock().unwrap().clone();
        match reply {
            Reply::Ok(status, text) => Ok(TranslationResponse {
                status: Some(status),
                translated_text: Some(text.to_string()),
            }),
            Reply::NoStatus => Ok(TranslationResponse {
                status: None,
                translated_text: None,
            }),
            Reply::TransportError => Err(anyhow::anyhow!("connection refused")),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
