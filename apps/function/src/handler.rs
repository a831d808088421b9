//! # 送信ハンドラ
//!
//! 1 回の呼び出しを処理する。
//!
//! ```text
//! デコード → 検証 → 送信手段の決定 → 送信 → レスポンス構築
//! ```
//!
//! どの段で失敗しても JSON のエラーレスポンスに変換して返し、エラーを外に漏らさない。

use email_api_domain::{EmailRequest, OutgoingEmail, SendResult, TransportKind};
use email_api_shared::ApiResponse;
use serde_json::Value;

use crate::{
    config::{ConfigError, EmailConfig},
    decoder::{self, IncomingRequest},
    dispatch::{DefaultSenderFactory, SenderFactory},
    error::FunctionError,
    response::build_response,
};

/// 送信ハンドラ
///
/// 状態を持たない。設定は呼び出しごとに受け取る。
#[derive(Debug, Clone, Default)]
pub struct EmailHandler<F = DefaultSenderFactory> {
    factory: F,
}

impl<F: SenderFactory> EmailHandler<F> {
    pub fn new(factory: F) -> Self {
        Self { factory }
    }

    /// 呼び出しイベント（任意の JSON）を処理する
    ///
    /// 設定は環境変数から毎回読み込む。
    pub async fn handle_event(&self, event: Value) -> ApiResponse {
        tracing::debug!(%event, "受信イベント");

        let config = EmailConfig::from_env();
        match serde_json::from_value::<IncomingRequest>(event) {
            Ok(request) => self.handle(request, config).await,
            Err(e) => {
                let outcome = Err(FunctionError::Unexpected(format!(
                    "Malformed invocation event: {e}"
                )));
                respond(&outcome, config.cors_enabled)
            }
        }
    }

    /// リクエストを処理し、必ずレスポンスを返す
    pub async fn handle(&self, request: IncomingRequest, config: EmailConfig) -> ApiResponse {
        let outcome = self.process(&request, &config).await;
        respond(&outcome, config.cors_enabled)
    }

    /// リクエストを処理し、送信結果またはエラーを返す
    ///
    /// 設定値の解釈は検証の後に行う。検証エラーは設定の誤りより優先される。
    pub async fn process(
        &self,
        request: &IncomingRequest,
        config: &EmailConfig,
    ) -> Result<SendResult, FunctionError> {
        let payload = decoder::decode(request)?;
        let email_request = EmailRequest::from_json(&payload)?;
        let kind = TransportKind::from_mode(&config.mode).map_err(ConfigError::from)?;

        let email = OutgoingEmail::new(config.sender_email.as_str(), &email_request);
        let sender = self.factory.create(kind, config).await?;
        let result = sender.send(&email).await?;

        tracing::info!(
            mode = %result.mode,
            message_id = ?result.message_id,
            to = %email.to,
            "メール送信成功"
        );

        Ok(result)
    }
}

fn respond(outcome: &Result<SendResult, FunctionError>, cors: bool) -> ApiResponse {
    if let Err(e) = outcome {
        let status = e.status_code();
        if e.is_client_error() {
            tracing::warn!(status, error = %e, "リクエストを拒否しました");
        } else {
            tracing::error!(status, error = %e, "メール送信処理に失敗しました");
        }
    }
    build_response(outcome, cors)
}
