//! # API レスポンスエンベロープ
//!
//! 関数の戻り値 `{ "statusCode": u16, "headers": {...}, "body": "<JSON 文字列>" }` を提供する。
//! API Gateway のプロキシ統合レスポンスと同じ形状で、そのままシリアライズして返せる。
//!
//! ## ヘッダー
//!
//! - `Content-Type: application/json` は常に付与する
//! - CORS を有効にした場合は、任意のオリジン・`Content-Type` ヘッダー・
//!   `OPTIONS` / `POST` メソッドを許可するヘッダーを付与する

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// CORS を許可するレスポンスヘッダー
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type"),
    ("Access-Control-Allow-Methods", "OPTIONS,POST"),
];

/// 関数の統一レスポンス型
///
/// ## 使用例
///
/// ```
/// use email_api_shared::ApiResponse;
///
/// let response = ApiResponse::message(200, "Email sent successfully", true);
/// assert_eq!(response.status_code, 200);
/// assert_eq!(response.body, r#"{"message":"Email sent successfully"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers:     BTreeMap<String, String>,
    /// JSON エンコード済みの本文
    pub body:        String,
}

impl ApiResponse {
    /// JSON 本文を持つレスポンスを作成する
    pub fn json(status_code: u16, payload: &serde_json::Value, cors: bool) -> Self {
        Self {
            status_code,
            headers: response_headers(cors),
            body: payload.to_string(),
        }
    }

    /// `{"message": ...}` 形式のレスポンス
    pub fn message(status_code: u16, message: impl Into<String>, cors: bool) -> Self {
        Self::json(status_code, &json!({ "message": message.into() }), cors)
    }

    /// `{"error": ...}` 形式のレスポンス
    pub fn error(status_code: u16, error: impl Into<String>, cors: bool) -> Self {
        Self::json(status_code, &json!({ "error": error.into() }), cors)
    }

    /// 本文を JSON としてパースする
    pub fn body_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// レスポンスヘッダーを組み立てる
pub fn response_headers(cors: bool) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::from([(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())]);
    if cors {
        headers.extend(
            CORS_HEADERS
                .iter()
                .map(|(name, value)| ((*name).to_string(), (*value).to_string())),
        );
    }
    headers
}
