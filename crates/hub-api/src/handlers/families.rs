//! Family, member and tree handlers

use axum::{extract::State, Json};
use hub_service::dto::{
    CreateFamilyRequest, CreateMemberRequest, FamilyResponse, ForestResponse, MemberResponse,
    SubtreeResponse, TreeResponse, UpdateMemberRequest,
};
use hub_service::FamilyService;

use crate::extractors::{FamilyPath, IdPath, MemberPath, Session, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /families
pub async fn list_families(State(state): State<AppState>) -> ApiResult<Json<Vec<FamilyResponse>>> {
    let service = FamilyService::new(state.service_context());
    Ok(Json(service.list_families().await?))
}

/// POST /families
pub async fn create_family(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(request): ValidatedJson<CreateFamilyRequest>,
) -> ApiResult<Created<Json<FamilyResponse>>> {
    let service = FamilyService::new(state.service_context());
    let family = service.create_family(session.role, request).await?;
    Ok(Created(Json(family)))
}

/// GET /families/:family_id
pub async fn get_family(
    State(state): State<AppState>,
    IdPath(path): IdPath<FamilyPath>,
) -> ApiResult<Json<FamilyResponse>> {
    let service = FamilyService::new(state.service_context());
    Ok(Json(service.get_family(path.family_id).await?))
}

/// Delete a family with all of its members
///
/// DELETE /families/:family_id
pub async fn delete_family(
    State(state): State<AppState>,
    session: Session,
    IdPath(path): IdPath<FamilyPath>,
) -> ApiResult<NoContent> {
    let service = FamilyService::new(state.service_context());
    service.delete_family(session.role, path.family_id).await?;
    Ok(NoContent)
}

/// Tree from the family's first root; `status` is `empty` without members
///
/// GET /families/:family_id/tree
pub async fn get_tree(
    State(state): State<AppState>,
    IdPath(path): IdPath<FamilyPath>,
) -> ApiResult<Json<TreeResponse>> {
    let service = FamilyService::new(state.service_context());
    Ok(Json(service.family_tree(path.family_id).await?))
}

/// One tree per root member
///
/// GET /families/:family_id/forest
pub async fn get_forest(
    State(state): State<AppState>,
    IdPath(path): IdPath<FamilyPath>,
) -> ApiResult<Json<ForestResponse>> {
    let service = FamilyService::new(state.service_context());
    Ok(Json(service.family_forest(path.family_id).await?))
}

/// GET /families/:family_id/members
pub async fn list_members(
    State(state): State<AppState>,
    IdPath(path): IdPath<FamilyPath>,
) -> ApiResult<Json<Vec<MemberResponse>>> {
    let service = FamilyService::new(state.service_context());
    Ok(Json(service.list_members(path.family_id).await?))
}

/// POST /families/:family_id/members
pub async fn add_member(
    State(state): State<AppState>,
    session: Session,
    IdPath(path): IdPath<FamilyPath>,
    ValidatedJson(request): ValidatedJson<CreateMemberRequest>,
) -> ApiResult<Created<Json<MemberResponse>>> {
    let service = FamilyService::new(state.service_context());
    let member = service
        .add_member(session.role, path.family_id, request)
        .await?;
    Ok(Created(Json(member)))
}

/// GET /families/:family_id/members/:node_id
pub async fn get_member(
    State(state): State<AppState>,
    IdPath(path): IdPath<MemberPath>,
) -> ApiResult<Json<MemberResponse>> {
    let service = FamilyService::new(state.service_context());
    Ok(Json(service.get_member(path.family_id, path.node_id).await?))
}

/// PATCH /families/:family_id/members/:node_id
pub async fn update_member(
    State(state): State<AppState>,
    session: Session,
    IdPath(path): IdPath<MemberPath>,
    ValidatedJson(request): ValidatedJson<UpdateMemberRequest>,
) -> ApiResult<Json<MemberResponse>> {
    let service = FamilyService::new(state.service_context());
    let member = service
        .update_member(session.role, path.family_id, path.node_id, request)
        .await?;
    Ok(Json(member))
}

/// DELETE /families/:family_id/members/:node_id
pub async fn delete_member(
    State(state): State<AppState>,
    session: Session,
    IdPath(path): IdPath<MemberPath>,
) -> ApiResult<NoContent> {
    let service = FamilyService::new(state.service_context());
    service
        .delete_member(session.role, path.family_id, path.node_id)
        .await?;
    Ok(NoContent)
}

/// GET /families/:family_id/members/:node_id/subtree
pub async fn get_subtree(
    State(state): State<AppState>,
    IdPath(path): IdPath<MemberPath>,
) -> ApiResult<Json<SubtreeResponse>> {
    let service = FamilyService::new(state.service_context());
    Ok(Json(
        service.member_subtree(path.family_id, path.node_id).await?,
    ))
}
