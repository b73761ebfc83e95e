use crate::domain::{Book, NewBook, value_objects::BookId};
use crate::ports::book_store::{BookStore as BookStoreTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

/// PostgreSQLの行データをBookに変換する
///
/// stockのi32からu32への変換でエラーハンドリングを行う。
pub(super) fn map_row_to_book(row: &PgRow, prefix: &str) -> Result<Book> {
    let column = |name: &str| format!("{}{}", prefix, name);

    let stock_i32: i32 = row.get(column("stock").as_str());
    let stock: u32 = stock_i32.try_into().map_err(|_| {
        Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("stock out of range: {}", stock_i32),
        )) as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(Book {
        book_id: BookId::from_uuid(row.get(column("book_id").as_str())),
        code: row.get(column("code").as_str()),
        title: row.get(column("title").as_str()),
        author: row.get(column("author").as_str()),
        stock,
    })
}

fn stock_to_i32(stock: u32) -> Result<i32> {
    i32::try_from(stock).map_err(|_| format!("stock out of range: {}", stock).into())
}

/// BookStoreのPostgreSQL実装
pub struct BookStore {
    pool: PgPool,
}

impl BookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStoreTrait for BookStore {
    async fn find_all(&self) -> Result<Vec<Book>> {
        let rows = sqlx::query(
            r#"
            SELECT book_id, code, title, author, stock
            FROM books
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(|row| map_row_to_book(row, "")).collect()
    }

    async fn find_by_id(&self, book_id: BookId) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT book_id, code, title, author, stock
            FROM books
            WHERE book_id = $1
            "#,
        )
        .bind(book_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(|row| map_row_to_book(row, "")).transpose()
    }

    async fn insert(&self, book: NewBook) -> Result<Book> {
        let row = sqlx::query(
            r#"
            INSERT INTO books (code, title, author, stock)
            VALUES ($1, $2, $3, $4)
            RETURNING book_id, code, title, author, stock
            "#,
        )
        .bind(&book.code)
        .bind(&book.title)
        .bind(&book.author)
        .bind(stock_to_i32(book.stock)?)
        .fetch_one(&self.pool)
        .await?;

        map_row_to_book(&row, "")
    }

    async fn save(&self, book: Book) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            UPDATE books
            SET code = $2, title = $3, author = $4, stock = $5
            WHERE book_id = $1
            RETURNING book_id, code, title, author, stock
            "#,
        )
        .bind(book.book_id.value())
        .bind(&book.code)
        .bind(&book.title)
        .bind(&book.author)
        .bind(stock_to_i32(book.stock)?)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(|row| map_row_to_book(row, "")).transpose()
    }

    async fn delete_by_id(&self, book_id: BookId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM books WHERE book_id = $1")
            .bind(book_id.value())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
