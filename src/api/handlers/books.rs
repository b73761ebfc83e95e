use crate::application::catalog;
use crate::domain::value_objects::BookId;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use super::AppState;
use crate::api::{
    error::ApiError,
    extract::ValidatedJson,
    types::{BookResponse, CreateBookRequest, ErrorResponse, UpdateBookRequest},
};

#[utoipa::path(
    get,
    path = "/books",
    tag = "Books",
    responses(
        (status = 200, description = "A list of books", body = Vec<BookResponse>),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookResponse>>, ApiError> {
    let books = catalog::list_books(&state.service_deps).await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "Books",
    params(("id" = Uuid, Path, description = "ID of the book")),
    responses(
        (status = 200, description = "Book found", body = BookResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<Uuid>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = catalog::get_book(&state.service_deps, BookId::from_uuid(book_id)).await?;
    Ok(Json(BookResponse::from(book)))
}

/// POST /books - 書籍を登録（stock省略時は1）
#[utoipa::path(
    post,
    path = "/books",
    tag = "Books",
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Book created", body = BookResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateBookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let book = catalog::register_book(&state.service_deps, req.into_new_book()).await?;
    Ok((StatusCode::CREATED, Json(BookResponse::from(book))))
}

#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "Books",
    params(("id" = Uuid, Path, description = "ID of the book")),
    request_body = UpdateBookRequest,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateBookRequest>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = catalog::update_book(
        &state.service_deps,
        BookId::from_uuid(book_id),
        req.into_changes(),
    )
    .await?;
    Ok(Json(BookResponse::from(book)))
}

#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "Books",
    params(("id" = Uuid, Path, description = "ID of the book")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(book_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    catalog::remove_book(&state.service_deps, BookId::from_uuid(book_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
