//! Offline 送信実装
//!
//! メールを実際に送信せず、組み立てたメッセージをログに出力する。
//! SMTP ホストが設定されていない場合に使用する。

use async_trait::async_trait;
use email_api_domain::{OutgoingEmail, SendResult, TransportError};

use super::EmailSender;

/// Offline 送信（ログ出力のみ）
#[derive(Debug, Clone, Default)]
pub struct OfflineEmailSender;

impl OfflineEmailSender {
    /// ログに出力するメッセージ本文を組み立てる
    pub fn render(email: &OutgoingEmail) -> String {
        format!(
            "=== Simulated Email ===\nFrom: {}\nTo: {}\nSubject: {}\nBody:\n{}\n======================",
            email.from, email.to, email.subject, email.body_text
        )
    }
}

#[async_trait]
impl EmailSender for OfflineEmailSender {
    async fn send(&self, email: &OutgoingEmail) -> Result<SendResult, TransportError> {
        tracing::info!(
            from = %email.from,
            to = %email.to,
            subject = %email.subject,
            "Offline: メール送信をシミュレート\n{}",
            Self::render(email)
        );
        Ok(SendResult::smtp())
    }
}
