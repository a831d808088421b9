//! # トレーシング初期化
//!
//! Lambda ランタイムとローカルサーバーで共通のログ設定。
//!
//! | 変数名 | 説明 |
//! |--------|------|
//! | `RUST_LOG` | ログレベル（デフォルト: `info,email_api=debug`） |
//! | `LOG_FORMAT` | `json` / `pretty`（大文字小文字を区別しない） |
//! | `AWS_LAMBDA_FUNCTION_NAME` | 設定されていれば Lambda 上で動作しているとみなす |
//!
//! Lambda 上では CloudWatch Logs 向けに JSON をデフォルトとし、ANSI カラーを無効にする。

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_FILTER: &str = "info,email_api=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    /// 未知の値は `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// ルートスパンと初期化ログに付与するサービス名
    pub service_name:    String,
    pub log_format:      LogFormat,
    /// Pretty 出力で ANSI カラーを使うか
    pub ansi:            bool,
    /// 解釈できなかった `LOG_FORMAT` の値（初期化後に警告する）
    pub rejected_format: Option<String>,
}

impl TracingConfig {
    /// 環境変数から読み取る
    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::from_lookup(service_name, |key| std::env::var(key).ok())
    }

    /// 任意の検索関数から読み取る
    pub fn from_lookup(
        service_name: impl Into<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let on_lambda = lookup("AWS_LAMBDA_FUNCTION_NAME").is_some_and(|value| !value.is_empty());
        let fallback = if on_lambda {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        };

        let (log_format, rejected_format) =
            match lookup("LOG_FORMAT").filter(|value| !value.trim().is_empty()) {
                None => (fallback, None),
                Some(value) => match LogFormat::parse(&value) {
                    Some(format) => (format, None),
                    None => (fallback, Some(value)),
                },
            };

        Self {
            service_name: service_name.into(),
            log_format,
            ansi: !on_lambda,
            rejected_format,
        }
    }

    /// `service` フィールドを持つルートスパン
    ///
    /// JSON 出力では `span.service` として各イベントに付く。
    pub fn root_span(&self) -> tracing::Span {
        tracing::info_span!("email_api", service = %self.service_name)
    }
}

/// トレーシングを初期化する
///
/// プロセスごとに 1 回だけ呼び出す。
/// JSON 出力ではイベントのフィールドをトップレベルに展開する。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_ansi(config.ansi)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!(
        service = %config.service_name,
        format = ?config.log_format,
        "トレーシングを初期化しました"
    );
    if let Some(value) = &config.rejected_format {
        tracing::warn!(value = %value, "LOG_FORMAT を解釈できないためデフォルトの形式を使います");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> TracingConfig {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        TracingConfig::from_lookup("email-api-test", move |key| {
            pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        })
    }

    #[rstest]
    #[case("json", Some(LogFormat::Json))]
    #[case(" JSON ", Some(LogFormat::Json))]
    #[case("Pretty", Some(LogFormat::Pretty))]
    #[case("yaml", None)]
    fn test_ログ形式のパース(#[case] value: &str, #[case] expected: Option<LogFormat>) {
        assert_eq!(LogFormat::parse(value), expected);
    }

    #[test]
    fn test_ローカルではprettyとansiカラーを使う() {
        assert_eq!(
            config_from(&[]),
            TracingConfig {
                service_name:    "email-api-test".to_string(),
                log_format:      LogFormat::Pretty,
                ansi:            true,
                rejected_format: None,
            }
        );
    }

    #[test]
    fn test_lambda上ではjsonをデフォルトにしansiを無効にする() {
        let config = config_from(&[("AWS_LAMBDA_FUNCTION_NAME", "email-api")]);

        assert_eq!(config.log_format, LogFormat::Json);
        assert!(!config.ansi);
    }

    #[test]
    fn test_log_formatの指定はデフォルトより優先される() {
        let config = config_from(&[
            ("AWS_LAMBDA_FUNCTION_NAME", "email-api"),
            ("LOG_FORMAT", "pretty"),
        ]);

        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(!config.ansi);
    }

    #[test]
    fn test_解釈できないlog_formatは記録してデフォルトに戻す() {
        let config = config_from(&[("LOG_FORMAT", "yaml")]);

        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.rejected_format.as_deref(), Some("yaml"));
    }
}
