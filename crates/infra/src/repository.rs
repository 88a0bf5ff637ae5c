//! # リポジトリ実装
//!
//! ユースケースが利用するリポジトリトレイトと、その PostgreSQL 実装を提供する。

pub mod account_repository;

pub use account_repository::{
    AccountRepository,
    AddAccountRepository,
    LoadAccountByEmailRepository,
    PostgresAccountRepository,
};
