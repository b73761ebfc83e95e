use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{AppState, books, health_check, members, rentals};
use super::types::*;
use crate::domain::Penalty;

/// OpenAPIドキュメント
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sewa Rental Service",
        version = "0.1.0",
        description = "Book rental (sewa) management API"
    ),
    paths(
        super::handlers::health_check,
        rentals::list_rentals,
        rentals::get_rental,
        rentals::create_rental,
        rentals::update_rental,
        rentals::delete_rental,
        members::list_members,
        members::get_member,
        members::create_member,
        members::update_member,
        members::delete_member,
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
    ),
    components(schemas(
        CreateRentalRequest,
        UpdateRentalRequest,
        RentalResponse,
        RentalViewResponse,
        CreateMemberRequest,
        UpdateMemberRequest,
        MemberResponse,
        CreateBookRequest,
        UpdateBookRequest,
        BookResponse,
        ErrorResponse,
        Penalty,
    )),
    tags(
        (name = "Sewa", description = "Book rentals"),
        (name = "Members", description = "Library members"),
        (name = "Books", description = "Book catalogue"),
        (name = "Health", description = "Liveness")
    )
)]
pub struct ApiDoc;

/// Creates the API router
///
/// - /sewa: レンタル（一覧・作成・取得・更新・終了）
/// - /members, /books: 会員・書籍の管理
/// - /api-docs: Swagger UI（仕様は /openapi.json）
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Rentals
        .route(
            "/sewa",
            get(rentals::list_rentals).post(rentals::create_rental),
        )
        .route(
            "/sewa/:id",
            get(rentals::get_rental)
                .put(rentals::update_rental)
                .delete(rentals::delete_rental),
        )
        // Members
        .route(
            "/members",
            get(members::list_members).post(members::create_member),
        )
        .route(
            "/members/:id",
            get(members::get_member)
                .put(members::update_member)
                .delete(members::delete_member),
        )
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // API documentation
        .merge(SwaggerUi::new("/api-docs").url("/openapi.json", ApiDoc::openapi()))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}
