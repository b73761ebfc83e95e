use serde::{Deserialize, Serialize};

use super::BookId;

/// 在庫数の初期値
pub const DEFAULT_STOCK: u32 = 1;

/// 書籍
///
/// 在庫数はレンタルワークフローでは増減しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub book_id: BookId,
    pub code: String,
    pub title: String,
    pub author: String,
    pub stock: u32,
}

/// 新規書籍（IDはストアが採番する）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub code: String,
    pub title: String,
    pub author: String,
    pub stock: u32,
}

/// 書籍の部分更新
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookChanges {
    pub code: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub stock: Option<u32>,
}

/// 純粋関数：書籍に部分更新を適用する
pub fn apply_book_changes(book: Book, changes: BookChanges) -> Book {
    Book {
        code: changes.code.unwrap_or(book.code),
        title: changes.title.unwrap_or(book.title),
        author: changes.author.unwrap_or(book.author),
        stock: changes.stock.unwrap_or(book.stock),
        ..book
    }
}
