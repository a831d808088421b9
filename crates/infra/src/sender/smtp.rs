//! SMTP 送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 接続方式は [`SmtpSecurity`] で選択する（暗黙的 TLS / STARTTLS / 平文）。

use std::{fmt, time::Duration};

use async_trait::async_trait;
use email_api_domain::{OutgoingEmail, SendResult, TransportError};
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Message,
    Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use super::EmailSender;

/// 接続・各コマンドのタイムアウト
pub const SMTP_TIMEOUT: Duration = Duration::from_secs(15);

/// SMTP 接続の暗号化方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmtpSecurity {
    /// 接続直後から TLS（SMTPS）
    ImplicitTls,
    /// 平文で接続し、EHLO 後に STARTTLS で昇格する（昇格必須）
    StartTls,
    /// 平文のまま（Mailpit 等のローカル SMTP 向け）
    #[default]
    Plaintext,
}

impl SmtpSecurity {
    /// 設定フラグから暗号化方式を決定する
    ///
    /// 両方が有効な場合は暗黙的 TLS を優先する。
    pub fn from_flags(use_implicit_tls: bool, use_starttls: bool) -> Self {
        match (use_implicit_tls, use_starttls) {
            (true, _) => Self::ImplicitTls,
            (false, true) => Self::StartTls,
            (false, false) => Self::Plaintext,
        }
    }
}

/// SMTP 認証情報
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// SMTP 接続設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host:        String,
    pub port:        u16,
    /// ユーザー名とパスワードの両方がある場合のみ認証する
    pub credentials: Option<SmtpCredentials>,
    pub security:    SmtpSecurity,
}

/// SMTP 送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
/// 接続は送信ごとに張り、送信後に閉じる。
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpEmailSender {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// TLS パラメータの構築に失敗した場合は `TransportError::Smtp` を返す。
    pub fn new(settings: &SmtpSettings) -> Result<Self, TransportError> {
        let builder = match settings.security {
            SmtpSecurity::ImplicitTls => {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host).map_err(smtp_error)?
            }
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
                    .map_err(smtp_error)?
            }
            // builder_dangerous: TLS なしで接続
            SmtpSecurity::Plaintext => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            }
        };

        let mut builder = builder.port(settings.port).timeout(Some(SMTP_TIMEOUT));
        if let Some(credentials) = &settings.credentials {
            builder = builder.credentials(Credentials::new(
                credentials.username.clone(),
                credentials.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }

    /// `From` / `To` / `Subject` とプレーンテキスト本文からなるメッセージを組み立てる
    pub fn build_message(email: &OutgoingEmail) -> Result<Message, TransportError> {
        let from: Mailbox = email
            .from
            .parse()
            .map_err(|e| TransportError::Smtp(format!("invalid From address: {e}")))?;
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| TransportError::Smtp(format!("invalid To address: {e}")))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(&email.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(email.body_text.clone())
            .map_err(smtp_error)
    }
}

fn smtp_error(e: impl fmt::Display) -> TransportError {
    TransportError::Smtp(e.to_string())
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send(&self, email: &OutgoingEmail) -> Result<SendResult, TransportError> {
        let message = Self::build_message(email)?;

        self.transport.send(message).await.map_err(smtp_error)?;

        Ok(SendResult::smtp())
    }
}
