//! # メール送信
//!
//! メール送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `EmailSender` trait でメール送信を抽象化
//! - **3 つの実装**: SMTP（lettre）、SES（本番用）、Offline（SMTP ホスト未設定時のシミュレーション）
//! - **実装の選択は呼び出し側**: `TransportKind` と設定値のパターンマッチで決定する

mod offline;
mod ses;
mod smtp;

use async_trait::async_trait;
use email_api_domain::{OutgoingEmail, SendResult, TransportError};
pub use offline::OfflineEmailSender;
pub use ses::SesEmailSender;
pub use smtp::{SMTP_TIMEOUT, SmtpCredentials, SmtpEmailSender, SmtpSecurity, SmtpSettings};

/// メール送信トレイト
///
/// 1 回の呼び出しで 1 通を送信する。再試行は行わない。
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// メールを送信する
    async fn send(&self, email: &OutgoingEmail) -> Result<SendResult, TransportError>;
}
