//! # 送信手段と送信結果
//!
//! `EMAIL_MODE` の値を送信手段（[`TransportKind`]）に対応付け、
//! 送信結果（[`SendResult`]）と送信エラー（[`TransportError`]）を定義する。
//!
//! | `EMAIL_MODE` | 送信手段 |
//! |---|---|
//! | `offline` / `local` / `smtp` | [`TransportKind::Smtp`]（SMTP ホスト未設定時は送信をシミュレート） |
//! | `ses` | [`TransportKind::Ses`] |

use std::str::FromStr;

use serde::Serialize;
use strum::{EnumString, IntoStaticStr};
use thiserror::Error;

use crate::EmailRequest;

/// 送信手段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumString, IntoStaticStr, strum::Display)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// SMTP（ホスト未設定時はログ出力によるシミュレーション）
    #[strum(to_string = "smtp", serialize = "offline", serialize = "local")]
    Smtp,
    /// Amazon SES
    #[strum(to_string = "ses")]
    Ses,
}

/// 未知の `EMAIL_MODE`
///
/// クライアントの誤りではなく設定の誤り。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown EMAIL_MODE '{0}'. Use offline|smtp|ses")]
pub struct UnknownModeError(pub String);

impl TransportKind {
    /// `EMAIL_MODE` の値から送信手段を決定する（大文字小文字を区別しない）
    pub fn from_mode(mode: &str) -> Result<Self, UnknownModeError> {
        let mode = mode.to_lowercase();
        Self::from_str(&mode).map_err(|_| UnknownModeError(mode))
    }
}

/// 送信メール
///
/// 送信元と検証済みリクエストを組み合わせたもの。各送信実装に渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// 送信元メールアドレス
    pub from:      String,
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// プレーンテキスト本文
    pub body_text: String,
}

impl OutgoingEmail {
    pub fn new(from: impl Into<String>, request: &EmailRequest) -> Self {
        Self {
            from:      from.into(),
            to:        request.receiver_email().to_string(),
            subject:   request.subject().to_string(),
            body_text: request.body_text().to_string(),
        }
    }
}

/// 送信結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResult {
    /// 実際に使用した送信手段
    pub mode:       TransportKind,
    /// プロバイダが払い出したメッセージ ID（SES のみ）
    pub message_id: Option<String>,
}

impl SendResult {
    /// SMTP 送信（シミュレーション含む）の結果。SMTP はメッセージ ID を返さない。
    pub fn smtp() -> Self {
        Self {
            mode:       TransportKind::Smtp,
            message_id: None,
        }
    }

    pub fn ses(message_id: Option<String>) -> Self {
        Self {
            mode: TransportKind::Ses,
            message_id,
        }
    }
}

/// 送信エラー
///
/// 下流の送信サービスでの失敗。呼び出し側で 502 に変換される。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// SMTP 送信失敗（アドレス解析、接続、TLS、認証、プロトコル）
    #[error("SMTP error: {0}")]
    Smtp(String),

    /// SES 送信失敗（リクエスト構築、クライアント、サービス）
    #[error("SES error: {0}")]
    Ses(String),
}
