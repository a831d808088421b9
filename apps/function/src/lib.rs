//! # メール送信関数
//!
//! 1 回の呼び出しで 1 通のメールを送信する、状態を持たない関数。
//!
//! ## 処理の流れ
//!
//! ```text
//! 呼び出しイベント
//!   → decoder   (ボディの取り出し・base64 デコード・JSON パース)
//!   → domain    (フィールド検証)
//!   → dispatch  (EMAIL_MODE による送信手段の選択)
//!   → infra     (SMTP / SES / シミュレーション送信)
//!   → response  (statusCode / headers / body の組み立て)
//! ```
//!
//! ## モジュール構成
//!
//! - `config`: 環境変数からの設定読み込み
//! - `decoder`: リクエストボディのデコード
//! - `dispatch`: 送信実装の選択
//! - `error`: エラー種別と HTTP ステータスの対応
//! - `handler`: 呼び出し全体の処理
//! - `response`: レスポンスの組み立て
//! - `server`: ローカル実行用の HTTP サーバー
//!
//! ## エントリーポイント
//!
//! - `email-api-lambda`: AWS Lambda ランタイム
//! - `email-api-local`: ローカル HTTP サーバー（`POST /send-email`）

pub mod config;
pub mod decoder;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod response;
pub mod server;
