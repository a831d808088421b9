//! # ローカルサーバー
//!
//! Lambda を使わずに関数を HTTP で呼び出す。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `EMAIL_API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `EMAIL_API_PORT` | No | ポート番号（デフォルト: `3000`） |
//!
//! 送信設定は `email_api_function::config` を参照。
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p email-api-function --bin email-api-local
//!
//! curl -X POST localhost:3000/send-email \
//!   -d '{"receiver_email":"a@b.com","subject":"Hi","body_text":"Hello"}'
//! ```

use std::{future::IntoFuture as _, sync::Arc};

use anyhow::Context as _;
use email_api_function::{
    config::ServerConfig,
    dispatch::DefaultSenderFactory,
    handler::EmailHandler,
    server::{AppState, router},
};
use email_api_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;
use tracing::Instrument as _;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("email-api-local");
    init_tracing(&tracing_config);

    let config = ServerConfig::from_env().context("サーバー設定の読み込みに失敗しました")?;
    let addr = config.addr().context("アドレスのパースに失敗しました")?;

    let state = Arc::new(AppState::from_env(EmailHandler::new(DefaultSenderFactory)));
    let app = router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("{addr} にバインドできません"))?;
    tracing::info!("ローカルサーバーが起動しました: {}", addr);

    axum::serve(listener, app)
        .into_future()
        .instrument(tracing_config.root_span())
        .await?;

    Ok(())
}
