use thiserror::Error;

/// アプリケーション層のエラー
///
/// 分類: NotFound系（参照先なし）、RentalLimitExceeded（業務ルール違反）、
/// Validation（入力不正）、StoreError（永続化層の障害）。
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 会員が存在しない
    #[error("Member not found")]
    MemberNotFound,

    /// 書籍が存在しない
    #[error("Book not found")]
    BookNotFound,

    /// レンタルが存在しない
    #[error("Rental not found")]
    RentalNotFound,

    /// レンタル開始時に会員または書籍が存在しない
    #[error("Member or Book not found")]
    MemberOrBookNotFound,

    /// 会員のレンタル上限（2件）に達している
    #[error("Member already has 2 active rentals")]
    RentalLimitExceeded,

    /// 入力値の検証エラー
    #[error("Validation error: {0}")]
    Validation(String),

    /// ストアのエラー
    #[error("Store error")]
    StoreError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, ApplicationError>;
