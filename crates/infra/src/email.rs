//! # メールアドレス書式検証
//!
//! ログイン・サインアップのリクエストに含まれるメールアドレスの書式を検証する。
//! 検証ロジックそのものは `validator` クレートに委譲する。

use validator::ValidateEmail;

/// メールアドレスの書式検証を担当するトレイト
pub trait EmailValidator: Send + Sync {
    fn is_valid(&self, email: &str) -> bool;
}

/// `validator` クレート（HTML5 仕様準拠）による書式検証
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxEmailValidator;

impl EmailValidator for SyntaxEmailValidator {
    fn is_valid(&self, email: &str) -> bool {
        ValidateEmail::validate_email(&email)
    }
}
