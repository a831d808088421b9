//! # email-api インフラ層
//!
//! メールの実際の送信（SMTP / Amazon SES）を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **送信トレイト**: [`EmailSender`] で送信方法を抽象化
//! - **SMTP 送信**: lettre による SMTP 送信と、ホスト未設定時のシミュレーション
//! - **SES 送信**: AWS SDK（SES v2）による送信
//!
//! ## 依存関係
//!
//! ```text
//! function → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`sender`] - 送信トレイトと各実装
//! - `mock` - テスト用モック（`test-utils` feature）

pub mod sender;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use sender::{
    EmailSender,
    OfflineEmailSender,
    SesEmailSender,
    SmtpCredentials,
    SmtpEmailSender,
    SmtpSecurity,
    SmtpSettings,
};
