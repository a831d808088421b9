//! # 送信手段のディスパッチ
//!
//! [`TransportKind`] と設定から送信実装を 1 つ選ぶ。
//!
//! | 送信手段 | 条件 | 実装 |
//! |---|---|---|
//! | `Smtp` | `SMTP_HOST` 未設定 | [`OfflineEmailSender`]（ログ出力のみ） |
//! | `Smtp` | `SMTP_HOST` 設定あり | [`SmtpEmailSender`] |
//! | `Ses` | - | [`SesEmailSender`] |
//!
//! `SMTP_PORT` は `Smtp` を選んだときだけ解釈する。不正な値は設定エラー（500）。

use async_trait::async_trait;
use email_api_domain::TransportKind;
use email_api_infra::{EmailSender, OfflineEmailSender, SesEmailSender, SmtpEmailSender};

use crate::{config::EmailConfig, error::FunctionError};

/// 送信実装のファクトリ
///
/// ハンドラから送信実装の生成を切り離す。テストではモックに差し替える。
#[async_trait]
pub trait SenderFactory: Send + Sync {
    async fn create(
        &self,
        kind: TransportKind,
        config: &EmailConfig,
    ) -> Result<Box<dyn EmailSender>, FunctionError>;
}

/// 設定に従って実際の送信実装を生成するファクトリ
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSenderFactory;

#[async_trait]
impl SenderFactory for DefaultSenderFactory {
    async fn create(
        &self,
        kind: TransportKind,
        config: &EmailConfig,
    ) -> Result<Box<dyn EmailSender>, FunctionError> {
        match kind {
            TransportKind::Smtp => match config.smtp.settings()? {
                None => Ok(Box::new(OfflineEmailSender)),
                Some(settings) => Ok(Box::new(SmtpEmailSender::new(&settings)?)),
            },
            TransportKind::Ses => Ok(Box::new(
                SesEmailSender::for_region(config.ses_region.clone()).await,
            )),
        }
    }
}
