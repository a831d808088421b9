//! # レスポンスビルダー
//!
//! 処理結果を [`ApiResponse`] に変換する純粋関数。ネットワークに依存しない。

use email_api_domain::SendResult;
use email_api_shared::ApiResponse;

use crate::error::FunctionError;

pub const SUCCESS_MESSAGE: &str = "Email sent successfully";

/// 処理結果からレスポンスを組み立てる
///
/// 成功は 200 `{"message": ...}`、失敗はエラー種別のステータスと `{"error": ...}`。
pub fn build_response(outcome: &Result<SendResult, FunctionError>, cors: bool) -> ApiResponse {
    match outcome {
        Ok(_) => ApiResponse::message(200, SUCCESS_MESSAGE, cors),
        Err(e) => ApiResponse::error(e.status_code(), e.to_string(), cors),
    }
}
