//! # テスト用モック送信
//!
//! ユースケーステストで使用するインメモリの送信モック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! email-api-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use email_api_domain::{OutgoingEmail, SendResult, TransportError};

use crate::sender::EmailSender;

// ===== MockEmailSender =====

/// 送信したメールを記録するモック
///
/// `clone()` したインスタンス同士で記録を共有する。
#[derive(Clone)]
pub struct MockEmailSender {
    sent:    Arc<Mutex<Vec<OutgoingEmail>>>,
    outcome: Result<SendResult, TransportError>,
}

impl Default for MockEmailSender {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEmailSender {
    /// 常に SMTP 送信成功を返すモック
    pub fn new() -> Self {
        Self::with_outcome(Ok(SendResult::smtp()))
    }

    /// 指定した結果を返すモック
    pub fn with_outcome(outcome: Result<SendResult, TransportError>) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            outcome,
        }
    }

    /// 常に指定したエラーを返すモック
    pub fn failing(error: TransportError) -> Self {
        Self::with_outcome(Err(error))
    }

    /// 送信を試みたメールの一覧
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for MockEmailSender {
    async fn send(&self, email: &OutgoingEmail) -> Result<SendResult, TransportError> {
        self.sent.lock().unwrap().push(email.clone());
        self.outcome.clone()
    }
}
