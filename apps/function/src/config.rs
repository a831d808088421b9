//! # 関数の設定
//!
//! 環境変数から送信設定を読み込む。
//!
//! 設定は呼び出しごとに読み込み、各コンポーネントへ明示的に渡す。
//! テストでは [`EmailConfig::from_lookup`] に任意の検索関数を渡して注入する。
//! 空文字の値は未設定とみなす。
//!
//! 読み込み自体は失敗しない。`SMTP_PORT` は生の文字列のまま保持し、
//! SMTP 送信を選んだときに [`SmtpConfig::settings`] で解釈する。
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|-----------|------|
//! | `SENDER_EMAIL` | `test@example.com` | 送信元アドレス |
//! | `EMAIL_MODE` | `offline` | `offline` / `local` / `smtp` / `ses`（大文字小文字を区別しない） |
//! | `SMTP_HOST` | なし | 未設定なら送信をシミュレートする |
//! | `SMTP_PORT` | `587` | |
//! | `SMTP_USER` / `SMTP_PASS` | なし | 両方ある場合のみ認証する |
//! | `SMTP_USE_TLS` | `false` | STARTTLS を使用する |
//! | `SMTP_USE_SSL` | `false` | 暗黙的 TLS（SMTPS）を使用する |
//! | `SES_REGION` → `AWS_REGION` | `us-east-1` | SES のリージョン |
//! | `CORS_ENABLED` | `true` | `false` で CORS ヘッダーを付与しない |

use std::{env, net::SocketAddr, num::ParseIntError};

use email_api_domain::UnknownModeError;
use email_api_infra::{SmtpCredentials, SmtpSecurity, SmtpSettings};
use thiserror::Error;

pub const DEFAULT_SENDER_EMAIL: &str = "test@example.com";
pub const DEFAULT_EMAIL_MODE: &str = "offline";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_SES_REGION: &str = "us-east-1";

/// 設定エラー
///
/// クライアントの誤りではないため 500 として返す。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 未知の `EMAIL_MODE`
    #[error(transparent)]
    UnknownMode(#[from] UnknownModeError),

    /// 数値として解釈できないポート番号
    #[error("Invalid {name} '{value}': {source}")]
    InvalidPort {
        name:   &'static str,
        value:  String,
        #[source]
        source: ParseIntError,
    },
}

/// 送信設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailConfig {
    /// 送信元メールアドレス
    pub sender_email: String,
    /// `EMAIL_MODE` の生の値（送信手段への変換は検証後に行う）
    pub mode:         String,
    pub smtp:         SmtpConfig,
    /// SES のリージョン
    pub ses_region:   String,
    /// レスポンスに CORS ヘッダーを付与するか
    pub cors_enabled: bool,
}

/// SMTP 設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host:             Option<String>,
    /// `SMTP_PORT` の生の値（未設定なら 587）
    pub port:             Option<String>,
    pub username:         Option<String>,
    pub password:         Option<String>,
    /// `SMTP_USE_TLS`
    pub use_starttls:     bool,
    /// `SMTP_USE_SSL`
    pub use_implicit_tls: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            sender_email: DEFAULT_SENDER_EMAIL.to_string(),
            mode:         DEFAULT_EMAIL_MODE.to_string(),
            smtp:         SmtpConfig::default(),
            ses_region:   DEFAULT_SES_REGION.to_string(),
            cors_enabled: true,
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host:             None,
            port:             None,
            username:         None,
            password:         None,
            use_starttls:     false,
            use_implicit_tls: false,
        }
    }
}

impl EmailConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の検索関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let flag = |key: &str| get(key).is_some_and(|value| value.eq_ignore_ascii_case("true"));

        Self {
            sender_email: get("SENDER_EMAIL").unwrap_or_else(|| DEFAULT_SENDER_EMAIL.to_string()),
            mode:         get("EMAIL_MODE").unwrap_or_else(|| DEFAULT_EMAIL_MODE.to_string()),
            smtp:         SmtpConfig {
                host:             get("SMTP_HOST"),
                port:             get("SMTP_PORT"),
                username:         get("SMTP_USER"),
                password:         get("SMTP_PASS"),
                use_starttls:     flag("SMTP_USE_TLS"),
                use_implicit_tls: flag("SMTP_USE_SSL"),
            },
            ses_region:   get("SES_REGION")
                .or_else(|| get("AWS_REGION"))
                .unwrap_or_else(|| DEFAULT_SES_REGION.to_string()),
            cors_enabled: !get("CORS_ENABLED").is_some_and(|value| value.eq_ignore_ascii_case("false")),
        }
    }
}

impl SmtpConfig {
    /// ポート番号を解釈する
    pub fn port(&self) -> Result<u16, ConfigError> {
        parse_port("SMTP_PORT", self.port.clone(), DEFAULT_SMTP_PORT)
    }

    /// 実際に接続するための設定
    ///
    /// ホストが未設定の場合は `None`（送信をシミュレートする）。
    /// ポート番号はホストの有無にかかわらず検証する。
    pub fn settings(&self) -> Result<Option<SmtpSettings>, ConfigError> {
        let port = self.port()?;
        let Some(host) = self.host.clone() else {
            return Ok(None);
        };
        let credentials = match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(SmtpCredentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        };

        Ok(Some(SmtpSettings {
            host,
            port,
            credentials,
            security: SmtpSecurity::from_flags(self.use_implicit_tls, self.use_starttls),
        }))
    }
}

/// ローカル実行サーバーの設定
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
}

impl ServerConfig {
    /// 環境変数（`EMAIL_API_HOST`, `EMAIL_API_PORT`）から読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        let get = |key: &str| env::var(key).ok().filter(|value| !value.is_empty());

        Ok(Self {
            host: get("EMAIL_API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_port("EMAIL_API_PORT", get("EMAIL_API_PORT"), 3000)?,
        })
    }

    pub fn addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

fn parse_port(name: &'static str, value: Option<String>, default: u16) -> Result<u16, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    let parsed = value.trim().parse();
    parsed.map_err(|source| ConfigError::InvalidPort {
        name,
        value,
        source,
    })
}
