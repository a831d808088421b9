//! # リクエストデコーダー
//!
//! 呼び出しイベントからリクエストボディを取り出し、JSON としてパースする。
//! `isBase64Encoded` が真の場合は先に base64 デコードする。
//! MIME 形式で折り返された base64 も受け付けるため、デコード前に ASCII 空白を取り除く。

use std::borrow::Cow;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// デコードエラー（いずれも 400）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Missing request body")]
    MissingBody,

    /// base64 として不正、またはデコード結果が UTF-8 でない
    #[error("Body is base64 encoded but could not be decoded")]
    BadEncoding,

    #[error("Request body is not valid JSON")]
    InvalidJson,
}

/// 呼び出しイベント
///
/// API Gateway のプロキシ統合イベントのうち、必要なフィールドのみを読む。
/// 未知のフィールドは無視する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingRequest {
    #[serde(default)]
    pub body:              Option<String>,
    /// `null` は `false` とみなす
    #[serde(default)]
    pub is_base64_encoded: Option<bool>,
}

impl IncomingRequest {
    /// テキストのボディを持つリクエスト
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            body:              Some(body.into()),
            is_base64_encoded: Some(false),
        }
    }

    /// base64 エンコード済みのボディを持つリクエスト
    pub fn base64(encoded: impl Into<String>) -> Self {
        Self {
            body:              Some(encoded.into()),
            is_base64_encoded: Some(true),
        }
    }

    /// HTTP の生のボディから組み立てる
    ///
    /// 空なら本文なし、UTF-8 ならそのまま、それ以外は base64 エンコードして渡す。
    pub fn from_raw_body(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::default();
        }
        match std::str::from_utf8(bytes) {
            Ok(text) => Self::text(text),
            Err(_) => Self::base64(STANDARD.encode(bytes)),
        }
    }

    pub fn is_base64_encoded(&self) -> bool {
        self.is_base64_encoded.unwrap_or(false)
    }
}

/// リクエストボディを JSON 値にデコードする
pub fn decode(request: &IncomingRequest) -> Result<Value, DecodeError> {
    let body = request.body.as_deref().ok_or(DecodeError::MissingBody)?;

    let text: Cow<'_, str> = if request.is_base64_encoded() {
        let compact: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        let bytes = STANDARD
            .decode(compact)
            .map_err(|_| DecodeError::BadEncoding)?;
        Cow::Owned(String::from_utf8(bytes).map_err(|_| DecodeError::BadEncoding)?)
    } else {
        Cow::Borrowed(body)
    };

    serde_json::from_str(&text).map_err(|_| DecodeError::InvalidJson)
}
