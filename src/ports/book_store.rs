use crate::domain::{Book, NewBook, value_objects::BookId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 書籍ストアポート
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Book>>;

    async fn find_by_id(&self, book_id: BookId) -> Result<Option<Book>>;

    /// 書籍を新規作成し、採番済みのレコードを返す
    async fn insert(&self, book: NewBook) -> Result<Book>;

    /// 既存の書籍を上書き保存する。対象が存在しない場合は `None`
    async fn save(&self, book: Book) -> Result<Option<Book>>;

    async fn delete_by_id(&self, book_id: BookId) -> Result<bool>;
}
