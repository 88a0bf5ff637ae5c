//! # Auth Service ライブラリ
//!
//! ログイン・サインアップを提供する HTTP サービスのコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app_builder`: ルーター構築（ミドルウェア含む）
//! - `config`: 環境変数からの設定読み込み
//! - `error`: ユースケースのエラー
//! - `handler`: HTTP ハンドラとルーター
//! - `protocol`: ルーターの入出力型
//! - `usecase`: ビジネスロジック
//!
//! ## 依存関係
//!
//! ```text
//! handler → usecase → infra（トレイト） → domain
//! ```

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod protocol;
#[cfg(test)]
mod test_utils;
pub mod usecase;
