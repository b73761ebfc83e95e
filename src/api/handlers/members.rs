use crate::application::catalog;
use crate::domain::value_objects::MemberId;
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
    types::{CreateMemberRequest, ErrorResponse, MemberResponse, UpdateMemberRequest},
};

/// GET /members - 全会員を取得
#[utoipa::path(
    get,
    path = "/members",
    tag = "Members",
    responses(
        (status = 200, description = "A list of members", body = Vec<MemberResponse>),
        (status = 500, description = "Store error", body = ErrorResponse)
    )
)]
pub async fn list_members(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MemberResponse>>, ApiError> {
    let members = catalog::list_members(&state.service_deps).await?;
    Ok(Json(members.into_iter().map(MemberResponse::from).collect()))
}

/// GET /members/:id
#[utoipa::path(
    get,
    path = "/members/{id}",
    tag = "Members",
    params(("id" = Uuid, Path, description = "ID of the member")),
    responses(
        (status = 200, description = "Member found", body = MemberResponse),
        (status = 404, description = "Member not found", body = ErrorResponse)
    )
)]
pub async fn get_member(
    State(state): State<Arc<AppState>>,
    Path(member_id): Path<Uuid>,
) -> Result<Json<MemberResponse>, ApiError> {
    let member = catalog::get_member(&state.service_deps, MemberId::from_uuid(member_id)).await?;
    Ok(Json(MemberResponse::from(member)))
}

/// POST /members - 会員を登録
#[utoipa::path(
    post,
    path = "/members",
    tag = "Members",
    request_body = CreateMemberRequest,
    responses(
        (status = 201, description = "Member created", body = MemberResponse),
        (status = 400, description = "Validation error", body = ErrorResponse)
    )
)]
pub async fn create_member(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<CreateMemberRequest>,
) -> Result<(StatusCode, Json<MemberResponse>), ApiError> {
    let member = catalog::register_member(&state.service_deps, req.into_new_member()).await?;
    Ok((StatusCode::CREATED, Json(MemberResponse::from(member))))
}

/// PUT /members/:id - 会員を部分更新
///
/// ペナルティの解除はこの操作でのみ行える。
#[utoipa::path(
    put,
    path = "/members/{id}",
    tag = "Members",
    params(("id" = Uuid, Path, description = "ID of the member")),
    request_body = UpdateMemberRequest,
    responses(
        (status = 200, description = "Member updated", body = MemberResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Member not found", body = ErrorResponse)
    )
)]
pub async fn update_member(
    State(state): State<Arc<AppState>>,
    Path(member_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateMemberRequest>,
) -> Result<Json<MemberResponse>, ApiError> {
    let member = catalog::update_member(
        &state.service_deps,
        MemberId::from_uuid(member_id),
        req.into_changes(),
    )
    .await?;
    Ok(Json(MemberResponse::from(member)))
}

/// DELETE /members/:id
#[utoipa::path(
    delete,
    path = "/members/{id}",
    tag = "Members",
    params(("id" = Uuid, Path, description = "ID of the member")),
    responses(
        (status = 204, description = "Member deleted"),
        (status = 404, description = "Member not found", body = ErrorResponse)
    )
)]
pub async fn delete_member(
    State(state): State<Arc<AppState>>,
    Path(member_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    catalog::remove_member(&state.service_deps, MemberId::from_uuid(member_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
