//! # メール送信リクエスト
//!
//! リクエストボディ（JSON）から検証済みの [`EmailRequest`] を構築する。
//!
//! ## 検証順序
//!
//! 1. 必須フィールド（`receiver_email`, `subject`, `body_text`）の存在確認。
//!    欠落したフィールドはすべて収集し、まとめて報告する（400）
//! 2. 宛先アドレスの形式確認（422）
//! 3. 件名の長さ確認（422）
//!
//! 最初に失敗した検査のエラーのみを返す。
//!
//! ## 欠落とみなす値
//!
//! キーがない、`null`、空白のみの文字列はいずれも欠落（400）として扱う。
//! `null` はクライアントが値を送らなかったことを表すため、形状不正ではなく欠落に含める。
//! 文字列でも `null` でもない値（数値・配列・オブジェクト）は
//! [`EmailRequestError::Malformed`] とし、呼び出し側で想定外エラー（500）になる。
//!
//! ## 宛先アドレスの形式
//!
//! `<@以外の1文字以上>@<@以外の1文字以上>.<@以外の1文字以上>` という粗い形状のみを確認する。
//! RFC 5322 の文法検証は行わない。`a@b.c` は通り、`a@b@c.d` や `a@b` は通らない。

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

/// 件名の最大文字数（RFC 5322 のヘッダー行長の上限）
pub const MAX_SUBJECT_LENGTH: usize = 998;

/// 必須フィールド（報告順）
const REQUIRED_FIELDS: [&str; 3] = ["receiver_email", "subject", "body_text"];

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("宛先アドレスの正規表現が不正です")
});

/// 検証エラー
///
/// クライアントの入力内容に起因するエラー。ステータスは 400 または 422。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 必須フィールドの欠落（空白のみも欠落とみなす）
    #[error("Missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// 宛先アドレスの形式不正
    #[error("receiver_email is not a valid email address")]
    InvalidReceiverEmail,

    /// 件名が長すぎる
    #[error("Subject is too long")]
    SubjectTooLong,
}

impl ValidationError {
    /// HTTP ステータスコード
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingFields(_) => 400,
            Self::InvalidReceiverEmail | Self::SubjectTooLong => 422,
        }
    }
}

/// リクエスト構築エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailRequestError {
    /// 入力値の検証失敗
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// JSON の構造が想定外（オブジェクトでない、フィールドが文字列でない）
    ///
    /// クライアント入力の検証ではなく想定外の失敗として扱う。
    #[error("{0}")]
    Malformed(String),
}

/// 検証済みのメール送信リクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRequest {
    receiver_email: String,
    subject:        String,
    body_text:      String,
}

impl EmailRequest {
    /// JSON 値から検証済みリクエストを構築する
    ///
    /// 宛先アドレスは前後の空白を除去して保持する。件名と本文は受け取ったまま保持する。
    pub fn from_json(value: &Value) -> Result<Self, EmailRequestError> {
        let Some(object) = value.as_object() else {
            return Err(EmailRequestError::Malformed(
                "Request body must be a JSON object".to_string(),
            ));
        };

        let mut fields: [Option<&str>; 3] = [None; 3];
        let mut missing = Vec::new();
        for (slot, name) in fields.iter_mut().zip(REQUIRED_FIELDS) {
            match object.get(name) {
                None | Some(Value::Null) => missing.push(name),
                Some(Value::String(s)) if s.trim().is_empty() => missing.push(name),
                Some(Value::String(s)) => *slot = Some(s.as_str()),
                Some(_) => {
                    return Err(EmailRequestError::Malformed(format!(
                        "Field '{name}' must be a string"
                    )));
                }
            }
        }

        let [Some(receiver_email), Some(subject), Some(body_text)] = fields else {
            return Err(ValidationError::MissingFields(missing).into());
        };

        let receiver_email = receiver_email.trim();
        if !is_plausible_address(receiver_email) {
            return Err(ValidationError::InvalidReceiverEmail.into());
        }

        if subject.chars().count() > MAX_SUBJECT_LENGTH {
            return Err(ValidationError::SubjectTooLong.into());
        }

        Ok(Self {
            receiver_email: receiver_email.to_string(),
            subject:        subject.to_string(),
            body_text:      body_text.to_string(),
        })
    }

    /// 宛先アドレス（前後の空白除去済み）
    pub fn receiver_email(&self) -> &str {
        &self.receiver_email
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn body_text(&self) -> &str {
        &self.body_text
    }
}

/// 宛先アドレスが粗い形状（`x@y.z`）を満たすか
pub fn is_plausible_address(address: &str) -> bool {
    EMAIL_SHAPE.is_match(address)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn validate(value: Value) -> Result<EmailRequest, EmailRequestError> {
        EmailRequest::from_json(&value)
    }

    #[test]
    fn test_正常なリクエストを構築できる() {
        let request = validate(json!({
            "receiver_email": "  a@b.com  ",
            "subject": " Hi ",
            "body_text": "Hello",
        }))
        .unwrap();

        assert_eq!(request.receiver_email(), "a@b.com");
        assert_eq!(request.subject(), " Hi ");
        assert_eq!(request.body_text(), "Hello");
    }

    #[test]
    fn test_空オブジェクトは全フィールドを欠落として報告する() {
        let error = validate(json!({})).unwrap_err();

        assert_eq!(
            error,
            EmailRequestError::Invalid(ValidationError::MissingFields(vec![
                "receiver_email",
                "subject",
                "body_text",
            ]))
        );
        assert_eq!(
            error.to_string(),
            "Missing required field(s): receiver_email, subject, body_text"
        );
    }

    #[rstest]
    #[case(json!({"subject": "Hi", "body_text": "Hello"}), "receiver_email")]
    #[case(json!({"receiver_email": "a@b.com", "subject": "   ", "body_text": "Hello"}), "subject")]
    #[case(json!({"receiver_email": "a@b.com", "subject": "Hi", "body_text": null}), "body_text")]
    #[case(json!({"receiver_email": "", "subject": "Hi", "body_text": "\n\t"}), "receiver_email, body_text")]
    fn test_欠落フィールドを固定順で列挙する(#[case] payload: Value, #[case] expected: &str) {
        let error = validate(payload).unwrap_err();

        assert_eq!(
            error.to_string(),
            format!("Missing required field(s): {expected}")
        );
    }

    #[test]
    fn test_欠落チェックは宛先形式より優先される() {
        let error = validate(json!({"receiver_email": "not-an-email"})).unwrap_err();

        assert_eq!(
            error.to_string(),
            "Missing required field(s): subject, body_text"
        );
    }

    #[rstest]
    #[case("not-an-email")]
    #[case("a@b")]
    #[case("@b.com")]
    #[case("a@.com")]
    #[case("a@b.")]
    #[case("a@b@c.com")]
    fn test_宛先形式が不正なら422(#[case] address: &str) {
        let error = validate(json!({
            "receiver_email": address,
            "subject": "Hi",
            "body_text": "Hello",
        }))
        .unwrap_err();

        let EmailRequestError::Invalid(error) = error else {
            panic!("検証エラーを期待: {error:?}");
        };
        assert_eq!(error, ValidationError::InvalidReceiverEmail);
        assert_eq!(error.status_code(), 422);
        assert_eq!(
            error.to_string(),
            "receiver_email is not a valid email address"
        );
    }

    #[rstest]
    #[case("a@b.c")]
    #[case("first.last+tag@mail.example.co.jp")]
    #[case("a b@c.d")]
    fn test_粗い形状を満たす宛先は受け付ける(#[case] address: &str) {
        assert!(is_plausible_address(address));
    }

    #[test]
    fn test_件名が998文字ちょうどなら受け付ける() {
        let subject = "あ".repeat(MAX_SUBJECT_LENGTH);
        let result = validate(json!({
            "receiver_email": "a@b.com",
            "subject": subject,
            "body_text": "Hello",
        }));

        assert!(result.is_ok());
    }

    #[test]
    fn test_件名が998文字を超えると422() {
        let error = validate(json!({
            "receiver_email": "a@b.com",
            "subject": "x".repeat(MAX_SUBJECT_LENGTH + 1),
            "body_text": "Hello",
        }))
        .unwrap_err();

        assert_eq!(
            error,
            EmailRequestError::Invalid(ValidationError::SubjectTooLong)
        );
        assert_eq!(error.to_string(), "Subject is too long");
    }

    #[test]
    fn test_宛先形式チェックは件名長より優先される() {
        let error = validate(json!({
            "receiver_email": "nope",
            "subject": "x".repeat(MAX_SUBJECT_LENGTH + 1),
            "body_text": "Hello",
        }))
        .unwrap_err();

        assert_eq!(
            error,
            EmailRequestError::Invalid(ValidationError::InvalidReceiverEmail)
        );
    }

    #[rstest]
    #[case(json!([]))]
    #[case(json!("text"))]
    #[case(json!(42))]
    fn test_オブジェクト以外は想定外エラー(#[case] payload: Value) {
        let error = validate(payload).unwrap_err();

        assert_eq!(
            error,
            EmailRequestError::Malformed("Request body must be a JSON object".to_string())
        );
    }

    #[test]
    fn test_文字列以外のフィールドは想定外エラー() {
        let error = validate(json!({
            "receiver_email": "a@b.com",
            "subject": 5,
            "body_text": "Hello",
        }))
        .unwrap_err();

        assert_eq!(
            error,
            EmailRequestError::Malformed("Field 'subject' must be a string".to_string())
        );
    }

    #[test]
    fn test_nullのフィールドは欠落として400() {
        let error = validate(json!({
            "receiver_email": null,
            "subject": null,
            "body_text": null,
        }))
        .unwrap_err();

        assert_eq!(
            error,
            EmailRequestError::Invalid(ValidationError::MissingFields(vec![
                "receiver_email",
                "subject",
                "body_text",
            ]))
        );
        assert_eq!(
            ValidationError::MissingFields(vec!["receiver_email"]).status_code(),
            400
        );
    }

    #[test]
    fn test_ステータスコードの対応() {
        assert_eq!(ValidationError::MissingFields(vec!["subject"]).status_code(), 400);
        assert_eq!(ValidationError::InvalidReceiverEmail.status_code(), 422);
        assert_eq!(ValidationError::SubjectTooLong.status_code(), 422);
    }
}
