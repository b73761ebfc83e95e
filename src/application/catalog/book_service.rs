use crate::application::{ApplicationError, Result, ServiceDependencies};
use crate::domain::{Book, BookChanges, NewBook, book, value_objects::BookId};

pub async fn list_books(deps: &ServiceDependencies) -> Result<Vec<Book>> {
    deps.book_store
        .find_all()
        .await
        .map_err(ApplicationError::StoreError)
}

pub async fn get_book(deps: &ServiceDependencies, book_id: BookId) -> Result<Book> {
    deps.book_store
        .find_by_id(book_id)
        .await
        .map_err(ApplicationError::StoreError)?
        .ok_or(ApplicationError::BookNotFound)
}

/// 書籍を登録する
pub async fn register_book(deps: &ServiceDependencies, new_book: NewBook) -> Result<Book> {
    let book = deps
        .book_store
        .insert(new_book)
        .await
        .map_err(ApplicationError::StoreError)?;

    tracing::info!(book_id = %book.book_id.value(), "book registered");
    Ok(book)
}

/// 書籍を部分更新する
pub async fn update_book(
    deps: &ServiceDependencies,
    book_id: BookId,
    changes: BookChanges,
) -> Result<Book> {
    let current = get_book(deps, book_id).await?;

    deps.book_store
        .save(book::apply_book_changes(current, changes))
        .await
        .map_err(ApplicationError::StoreError)?
        .ok_or(ApplicationError::BookNotFound)
}

pub async fn remove_book(deps: &ServiceDependencies, book_id: BookId) -> Result<()> {
    let deleted = deps
        .book_store
        .delete_by_id(book_id)
        .await
        .map_err(ApplicationError::StoreError)?;

    if !deleted {
        return Err(ApplicationError::BookNotFound);
    }

    tracing::info!(book_id = %book_id.value(), "book removed");
    Ok(())
}
