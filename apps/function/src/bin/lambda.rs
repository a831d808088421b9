//! # Lambda エントリーポイント
//!
//! 呼び出しイベントを受け取り、`{statusCode, headers, body}` を返す。
//! 設定は呼び出しごとに環境変数から読み込む。
//!
//! ## 環境変数
//!
//! `email_api_function::config` を参照。ログ出力は `RUST_LOG` と `LOG_FORMAT` で制御する。

use std::sync::Arc;

use email_api_function::{dispatch::DefaultSenderFactory, handler::EmailHandler};
use email_api_shared::{
    ApiResponse,
    observability::{TracingConfig, init_tracing},
};
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use tracing::Instrument as _;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let tracing_config = TracingConfig::from_env("email-api-lambda");
    init_tracing(&tracing_config);
    let root_span = tracing_config.root_span();

    let handler = Arc::new(EmailHandler::new(DefaultSenderFactory));

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let handler = Arc::clone(&handler);
        let span = tracing::info_span!(
            parent: &root_span,
            "invocation",
            request_id = %event.context.request_id
        );
        let invocation =
            async move { Ok::<ApiResponse, Error>(handler.handle_event(event.payload).await) };
        invocation.instrument(span)
    }))
    .await
}
