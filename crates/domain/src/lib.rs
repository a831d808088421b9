//! # email-api ドメイン層
//!
//! メール送信リクエストの検証ルールと、送信結果・送信手段を表す型を定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! function → infra → domain
//! ```
//!
//! ドメイン層は SMTP や SES などの外部サービスに一切依存しない。
//! 入力は `serde_json::Value`、出力は検証済みの値オブジェクトのみ。
//!
//! ## モジュール構成
//!
//! - [`email`] - 送信リクエスト（[`EmailRequest`]）とバリデーション
//! - [`transport`] - 送信手段（[`TransportKind`]）、送信結果、送信エラー
//!
//! ## 使用例
//!
//! ```rust
//! use email_api_domain::{EmailRequest, TransportKind};
//! use serde_json::json;
//!
//! let payload = json!({
//!     "receiver_email": "a@b.com",
//!     "subject": "Hi",
//!     "body_text": "Hello",
//! });
//! let request = EmailRequest::from_json(&payload).unwrap();
//! assert_eq!(request.receiver_email(), "a@b.com");
//!
//! let kind = TransportKind::from_mode("OFFLINE").unwrap();
//! assert_eq!(kind, TransportKind::Smtp);
//! ```

pub mod email;
pub mod transport;

pub use email::{EmailRequest, EmailRequestError, ValidationError};
pub use transport::{OutgoingEmail, SendResult, TransportError, TransportKind, UnknownModeError};
