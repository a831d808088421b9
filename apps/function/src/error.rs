//! # 関数のエラー定義
//!
//! 各段のエラーを集約し、HTTP ステータスコードへの対応を定義する。
//!
//! | エラー種別 | ステータス | 用途 |
//! |-----------|-----------|------|
//! | `Decode` | 400 | ボディの欠落・base64 不正・JSON 不正 |
//! | `Validation` | 400 / 422 | 必須フィールド欠落 / 形式・長さ違反 |
//! | `Config` | 500 | 未知の `EMAIL_MODE`、不正なポート番号 |
//! | `Transport` | 502 | SMTP / SES での送信失敗 |
//! | `Unexpected` | 500 | 上記以外 |

use email_api_domain::{EmailRequestError, TransportError, ValidationError};
use thiserror::Error;

use crate::{config::ConfigError, decoder::DecodeError};

/// 関数で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FunctionError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("{0}")]
    Unexpected(String),
}

impl From<EmailRequestError> for FunctionError {
    fn from(error: EmailRequestError) -> Self {
        match error {
            EmailRequestError::Invalid(e) => Self::Validation(e),
            EmailRequestError::Malformed(message) => Self::Unexpected(message),
        }
    }
}

impl FunctionError {
    /// HTTP ステータスコード
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Decode(_) => 400,
            Self::Validation(e) => e.status_code(),
            Self::Config(_) | Self::Unexpected(_) => 500,
            Self::Transport(_) => 502,
        }
    }

    /// クライアント起因のエラーか（4xx）
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

#[cfg(test)]
mod tests {
    use email_api_domain::UnknownModeError;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(FunctionError::Decode(DecodeError::MissingBody), 400)]
    #[case(FunctionError::Decode(DecodeError::InvalidJson), 400)]
    #[case(FunctionError::Validation(ValidationError::MissingFields(vec!["subject"])), 400)]
    #[case(FunctionError::Validation(ValidationError::InvalidReceiverEmail), 422)]
    #[case(FunctionError::Validation(ValidationError::SubjectTooLong), 422)]
    #[case(FunctionError::Config(ConfigError::UnknownMode(UnknownModeError("x".to_string()))), 500)]
    #[case(FunctionError::Transport(TransportError::Smtp("refused".to_string())), 502)]
    #[case(FunctionError::Transport(TransportError::Ses("denied".to_string())), 502)]
    #[case(FunctionError::Unexpected("boom".to_string()), 500)]
    fn test_エラー種別ごとのステータスコード(
        #[case] error: FunctionError,
        #[case] expected: u16,
    ) {
        assert_eq!(error.status_code(), expected);
    }

    #[test]
    fn test_形状不正のリクエストは想定外エラーになる() {
        let error = FunctionError::from(EmailRequestError::Malformed(
            "Request body must be a JSON object".to_string(),
        ));

        assert_eq!(
            error,
            FunctionError::Unexpected("Request body must be a JSON object".to_string())
        );
        assert!(!error.is_client_error());
    }

    #[test]
    fn test_メッセージは内側のエラーをそのまま使う() {
        let error = FunctionError::from(TransportError::Smtp("timed out".to_string()));

        assert_eq!(error.to_string(), "SMTP error: timed out");
        assert!(!error.is_client_error());
    }
}
