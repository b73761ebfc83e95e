use crate::application::rental::{
    close_rental as execute_close_rental, get_rental as execute_get_rental,
    list_rentals as execute_list_rentals, open_rental as execute_open_rental,
    update_rental as execute_update_rental,
};
use crate::domain::{
    commands::{CloseRental, UpdateRental},
    value_objects::RentalId,
};
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
    types::{
        CreateRentalRequest, ErrorResponse, RentalResponse, RentalViewResponse,
        UpdateRentalRequest,
    },
};

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /sewa - 全レンタルを取得
///
/// 会員・書籍を参照解決した状態で返す。
#[utoipa::path(
    get,
    path = "/sewa",
    tag = "Sewa",
    responses(
        (status = 200, description = "A list of sewa records", body = Vec<RentalViewResponse>),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
pub async fn list_rentals(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RentalViewResponse>>, ApiError> {
    let rentals = execute_list_rentals(&state.service_deps).await?;
    Ok(Json(
        rentals.into_iter().map(RentalViewResponse::from).collect(),
    ))
}

/// GET /sewa/:id - レンタルをIDで取得
#[utoipa::path(
    get,
    path = "/sewa/{id}",
    tag = "Sewa",
    params(("id" = Uuid, Path, description = "ID of the sewa record")),
    responses(
        (status = 200, description = "Sewa record found", body = RentalViewResponse),
        (status = 404, description = "Sewa record not found", body = ErrorResponse)
    )
)]
pub async fn get_rental(
    State(state): State<Arc<AppState>>,
    Path(rental_id): Path<Uuid>,
) -> Result<Json<RentalViewResponse>, ApiError> {
    let view = execute_get_rental(&state.service_deps, RentalId::from_uuid(rental_id)).await?;
    Ok(Json(RentalViewResponse::from(view)))
}

// ============================================================================
// Command handlers (POST / PUT / DELETE)
// ============================================================================

/// POST /sewa - レンタルを開始
///
/// 強制されるビジネスルール:
/// - 会員と書籍が存在すること（404）
/// - 会員の既存レンタルが2件未満であること（400）
#[utoipa::path(
    post,
    path = "/sewa",
    tag = "Sewa",
    request_body = CreateRentalRequest,
    responses(
        (status = 201, description = "Sewa record created", body = RentalResponse),
        (status = 400, description = "Rental limit exceeded or invalid period", body = ErrorResponse),
        (status = 404, description = "Member or Book not found", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
pub async fn create_rental(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateRentalRequest>,
) -> Result<(StatusCode, Json<RentalResponse>), ApiError> {
    let rental = execute_open_rental(&state.service_deps, req.to_command()).await?;
    Ok((StatusCode::CREATED, Json(RentalResponse::from(rental))))
}

/// PUT /sewa/:id - レンタルを更新
///
/// 会員・書籍の存在確認とレンタル上限の再チェックは行わない。
#[utoipa::path(
    put,
    path = "/sewa/{id}",
    tag = "Sewa",
    params(("id" = Uuid, Path, description = "ID of the sewa record")),
    request_body = UpdateRentalRequest,
    responses(
        (status = 200, description = "Sewa record updated", body = RentalViewResponse),
        (status = 400, description = "Invalid period", body = ErrorResponse),
        (status = 404, description = "Sewa record not found", body = ErrorResponse)
    )
)]
pub async fn update_rental(
    State(state): State<Arc<AppState>>,
    Path(rental_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateRentalRequest>,
) -> Result<Json<RentalViewResponse>, ApiError> {
    let cmd = UpdateRental {
        rental_id: RentalId::from_uuid(rental_id),
        changes: req.to_changes(),
    };

    let view = execute_update_rental(&state.service_deps, cmd).await?;
    Ok(Json(RentalViewResponse::from(view)))
}

/// DELETE /sewa/:id - レンタルを終了（返却）
///
/// 終了日から7日を超えている場合、会員にペナルティを付与する。
#[utoipa::path(
    delete,
    path = "/sewa/{id}",
    tag = "Sewa",
    params(("id" = Uuid, Path, description = "ID of the sewa record")),
    responses(
        (status = 204, description = "Sewa record closed"),
        (status = 404, description = "Sewa record not found", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
pub async fn delete_rental(
    State(state): State<Arc<AppState>>,
    Path(rental_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let cmd = CloseRental {
        rental_id: RentalId::from_uuid(rental_id),
        closed_at: chrono::Utc::now(),
    };

    execute_close_rental(&state.service_deps, cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}
