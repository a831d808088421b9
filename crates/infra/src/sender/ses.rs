//! SES 送信実装
//!
//! AWS SES v2 API を使用してメールを送信する。
//! 件名・本文とも UTF-8 を明示し、宛先は 1 件のみ指定する。

use async_trait::async_trait;
use aws_sdk_sesv2::{
    Client,
    error::DisplayErrorContext,
    types::{Body, Content, Destination, EmailContent, Message},
};
use email_api_domain::{OutgoingEmail, SendResult, TransportError};

use super::EmailSender;

const CHARSET: &str = "UTF-8";

/// SES 送信
///
/// `aws_sdk_sesv2::Client` をラップする。
pub struct SesEmailSender {
    client: Client,
}

impl SesEmailSender {
    /// 既存のクライアントから作成する
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// 指定リージョンのクライアントを作成する
    ///
    /// 認証情報は SDK のデフォルト認証チェーン（環境変数 / IAM ロール）で解決する。
    pub async fn for_region(region: impl Into<String>) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.into()))
            .load()
            .await;

        Self::new(Client::new(&config))
    }

    fn utf8_content(data: &str, part: &str) -> Result<Content, TransportError> {
        Content::builder()
            .data(data)
            .charset(CHARSET)
            .build()
            .map_err(|e| TransportError::Ses(format!("failed to build {part}: {e}")))
    }
}

#[async_trait]
impl EmailSender for SesEmailSender {
    async fn send(&self, email: &OutgoingEmail) -> Result<SendResult, TransportError> {
        let destination = Destination::builder().to_addresses(&email.to).build();

        let content = EmailContent::builder()
            .simple(
                Message::builder()
                    .subject(Self::utf8_content(&email.subject, "subject")?)
                    .body(
                        Body::builder()
                            .text(Self::utf8_content(&email.body_text, "text body")?)
                            .build(),
                    )
                    .build(),
            )
            .build();

        let output = self
            .client
            .send_email()
            .from_email_address(&email.from)
            .destination(destination)
            .content(content)
            .send()
            .await
            .map_err(|e| TransportError::Ses(DisplayErrorContext(&e).to_string()))?;

        tracing::debug!(message_id = ?output.message_id(), "SES 送信完了");

        Ok(SendResult::ses(output.message_id().map(str::to_string)))
    }
}
