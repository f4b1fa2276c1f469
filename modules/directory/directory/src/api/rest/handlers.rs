// Every handler fails with an `ApiError` envelope
#![allow(clippy::missing_errors_doc, clippy::unused_async)]

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Extension, Query};
use axum::http::{StatusCode, Uri};
use directory_sdk::{
    ContactQuery, ContactRecord, MembershipQuery, MembershipRecord, PermissionQuery,
    PermissionRecord,
};
use tracing::{debug, warn};

use crate::api::rest::dto::{
    AssignUserReq, CreateContactReq, CreatePermissionReq, DeleteContactParams, MessageDto,
    RemoveUserParams, RevokePermissionParams,
};
use crate::api::rest::error::ApiError;
use crate::domain::error::DomainError;
use crate::module::ConcreteAppServices;

type ApiResult<T> = Result<T, ApiError>;
type Services = Arc<ConcreteAppServices>;

const INVALID_PERMISSION_QUERY: &str =
    "Invalid query parameters. Use group_name, service_action with service, or service";
const INVALID_MEMBERSHIP_QUERY: &str = "Invalid parameters";

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, DomainError> {
    payload
        .map(|Json(req)| req)
        .map_err(|rejection| {
            DomainError::malformed_input(format!("Invalid request body: {}", rejection.body_text()))
        })
}

fn params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, DomainError> {
    query
        .map(|Query(p)| p)
        .map_err(|rejection| DomainError::invalid_query(rejection.body_text()))
}

/// Both parts of a composite delete key, or `InvalidQuery` with `message`.
fn required_pair(
    a: Option<String>,
    b: Option<String>,
    message: &str,
) -> Result<(String, String), DomainError> {
    match (a, b) {
        (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => Ok((a, b)),
        _ => Err(DomainError::invalid_query(message)),
    }
}

// ============================================================================
// Permissions
// ============================================================================

#[tracing::instrument(skip(svc))]
pub async fn list_permissions(
    Extension(svc): Extension<Services>,
    Query(query): Query<BTreeMap<String, String>>,
) -> ApiResult<Json<Vec<PermissionRecord>>> {
    let query = PermissionQuery::from_params(&query).ok_or_else(|| {
        warn!("Unsupported permission query");
        DomainError::invalid_query(INVALID_PERMISSION_QUERY)
    })?;

    let records = svc.permissions.list_permissions(&query).await?;
    Ok(Json(records))
}

#[tracing::instrument(skip(svc, payload))]
pub async fn create_permission(
    Extension(svc): Extension<Services>,
    payload: Result<Json<CreatePermissionReq>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageDto>)> {
    let req = body(payload)?;
    svc.permissions.grant(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageDto::new("Permission created successfully")),
    ))
}

#[tracing::instrument(skip(svc, query))]
pub async fn delete_permission(
    Extension(svc): Extension<Services>,
    query: Result<Query<RevokePermissionParams>, QueryRejection>,
) -> ApiResult<Json<MessageDto>> {
    let p = params(query)?;
    let (group_name, service_action) = required_pair(
        p.group_name,
        p.service_action,
        "group_name and service_action are required",
    )?;

    svc.permissions.revoke(&group_name, &service_action).await?;

    Ok(Json(MessageDto::new("Permission deleted successfully")))
}

// ============================================================================
// Memberships
// ============================================================================

#[tracing::instrument(skip(svc))]
pub async fn list_users(
    Extension(svc): Extension<Services>,
    Query(query): Query<BTreeMap<String, String>>,
) -> ApiResult<Json<Vec<MembershipRecord>>> {
    let query = MembershipQuery::from_params(&query)
        .ok_or_else(|| DomainError::invalid_query(INVALID_MEMBERSHIP_QUERY))?;

    let records = svc.memberships.list_memberships(&query).await?;
    Ok(Json(records))
}

#[tracing::instrument(skip(svc, payload))]
pub async fn assign_user(
    Extension(svc): Extension<Services>,
    payload: Result<Json<AssignUserReq>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageDto>)> {
    let req = body(payload)?;
    svc.memberships.assign(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageDto::new("User assigned to group successfully")),
    ))
}

#[tracing::instrument(skip(svc, query))]
pub async fn remove_user(
    Extension(svc): Extension<Services>,
    query: Result<Query<RemoveUserParams>, QueryRejection>,
) -> ApiResult<Json<MessageDto>> {
    let p = params(query)?;
    let (user_id, group_name) =
        required_pair(p.user_id, p.group_name, "user_id and group_name are required")?;

    svc.memberships.remove(&user_id, &group_name).await?;

    Ok(Json(MessageDto::new("User removed from group successfully")))
}

// ============================================================================
// Contacts
// ============================================================================

#[tracing::instrument(skip(svc))]
pub async fn get_contacts(
    Extension(svc): Extension<Services>,
    Query(query): Query<BTreeMap<String, String>>,
) -> ApiResult<Json<Vec<ContactRecord>>> {
    let query = ContactQuery::from_params(&query);

    let records = svc.contacts.get_contacts(&query).await?;
    Ok(Json(records))
}

#[tracing::instrument(skip(svc, payload))]
pub async fn create_contact(
    Extension(svc): Extension<Services>,
    payload: Result<Json<CreateContactReq>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageDto>)> {
    let req = body(payload)?;
    svc.contacts.create_contact(req.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageDto::new("Contact information created successfully")),
    ))
}

#[tracing::instrument(skip(svc, query))]
pub async fn delete_contact(
    Extension(svc): Extension<Services>,
    query: Result<Query<DeleteContactParams>, QueryRejection>,
) -> ApiResult<Json<MessageDto>> {
    let p = params(query)?;
    let (target, contact_type) =
        required_pair(p.target, p.contact_type, "target and type are required")?;

    svc.contacts.delete_contact(&target, &contact_type).await?;

    Ok(Json(MessageDto::new(
        "Contact information deleted successfully",
    )))
}

// ============================================================================
// Health and fallbacks
// ============================================================================

pub async fn health() -> &'static str {
    "ok"
}

/// Answers unknown paths and unsupported methods on known paths.
pub async fn fallback(uri: Uri) -> ApiError {
    debug!(path = %uri.path(), "No route matched");
    unmatched(uri.path())
}

fn unmatched(path: &str) -> ApiError {
    let path = path.trim_end_matches('/');
    let Some(rest) = path.strip_prefix("/v1") else {
        return ApiError::not_found("Invalid path - must start with /v1");
    };
    match rest {
        "" => ApiError::not_found("Invalid path"),
        "/admin" => ApiError::not_found("Invalid admin path"),
        _ if rest.starts_with("/admin/") => ApiError::bad_request("Invalid admin path or method"),
        _ if rest.starts_with('/') => ApiError::not_found("Invalid path or method"),
        _ => ApiError::not_found("Invalid path - must start with /v1"),
    }
}
