//! # ローカル HTTP サーバー
//!
//! Lambda の外で関数を動かすための axum ルーター。
//!
//! | メソッド | パス | 説明 |
//! |---------|------|------|
//! | `POST` | `/send-email` | ボディをそのまま関数に渡す |
//! | `OPTIONS` | `/send-email` | CORS プリフライト（204） |
//! | `GET` | `/health` | ヘルスチェック |
//!
//! 関数の [`ApiResponse`] のステータスとヘッダーを HTTP レスポンスに写す。

use std::sync::Arc;

use axum::{
    Json,
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use email_api_shared::{ApiResponse, HealthResponse, api_response::CORS_HEADERS};
use tower_http::trace::TraceLayer;

use crate::{
    config::EmailConfig,
    decoder::IncomingRequest,
    dispatch::SenderFactory,
    handler::EmailHandler,
};

/// 設定の読み込み関数
pub type ConfigLoader = Arc<dyn Fn() -> EmailConfig + Send + Sync>;

/// ルーターの共有状態
pub struct AppState<F> {
    pub handler:     EmailHandler<F>,
    /// リクエストごとに呼び出す
    pub load_config: ConfigLoader,
}

impl<F: SenderFactory> AppState<F> {
    pub fn new(handler: EmailHandler<F>, load_config: ConfigLoader) -> Self {
        Self {
            handler,
            load_config,
        }
    }

    /// 環境変数から設定を読み込む状態
    pub fn from_env(handler: EmailHandler<F>) -> Self {
        Self::new(handler, Arc::new(EmailConfig::from_env))
    }
}

/// ルーターを構築する
pub fn router<F: SenderFactory + 'static>(state: Arc<AppState<F>>) -> Router {
    Router::new()
        .route(
            "/send-email",
            post(send_email::<F>).options(preflight::<F>),
        )
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn send_email<F: SenderFactory + 'static>(
    State(state): State<Arc<AppState<F>>>,
    body: Bytes,
) -> Response {
    let request = IncomingRequest::from_raw_body(&body);
    let response = state.handler.handle(request, (state.load_config)()).await;
    into_http_response(response)
}

async fn preflight<F: SenderFactory + 'static>(
    State(state): State<Arc<AppState<F>>>,
) -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    if (state.load_config)().cors_enabled {
        insert_headers(&mut response, CORS_HEADERS);
    }
    response
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// [`ApiResponse`] を HTTP レスポンスに変換する
fn into_http_response(api: ApiResponse) -> Response {
    let status = StatusCode::from_u16(api.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut response = api.body.into_response();
    *response.status_mut() = status;
    insert_headers(
        &mut response,
        api.headers.iter().map(|(name, value)| (name.as_str(), value.as_str())),
    );
    response
}

/// ヘッダーを上書きで設定する。不正なヘッダーは捨てる。
fn insert_headers<'a>(response: &mut Response, headers: impl IntoIterator<Item = (&'a str, &'a str)>) {
    for (name, value) in headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(header_name), Ok(header_value)) => {
                response.headers_mut().insert(header_name, header_value);
            }
            _ => tracing::warn!(header = name, "不正なレスポンスヘッダーを無視しました"),
        }
    }
}
