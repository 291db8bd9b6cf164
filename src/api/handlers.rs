use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};
use serde::Serialize;
use std::sync::Arc;

use crate::model::{
    FlatTag, Id, NewDomain, NewTag, Tag, TagNode, TagQuery, TagUpdate, TaxonomyError,
    TaxonomySnapshot,
};
use crate::store::traits::TaxonomyStore;

pub type AppState<S> = Arc<S>;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> ListResponse<T> {
    fn new(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RootColorResponse {
    pub id: Id,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteTagResponse {
    pub removed: Vec<Id>,
}

#[derive(Debug, Serialize)]
pub struct DeleteDomainResponse {
    pub removed: bool,
}

fn status_for(error: &TaxonomyError) -> StatusCode {
    match error {
        TaxonomyError::NotFound { .. } => StatusCode::NOT_FOUND,
        TaxonomyError::DuplicateName { .. } => StatusCode::CONFLICT,
        TaxonomyError::InvalidColor { .. }
        | TaxonomyError::DerivedColor { .. }
        | TaxonomyError::InvalidSnapshot { .. } => StatusCode::BAD_REQUEST,
        TaxonomyError::TooDeep { .. } => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn error_response(error: TaxonomyError) -> (StatusCode, Json<ErrorResponse>) {
    let status = status_for(&error);
    if status != StatusCode::NOT_FOUND {
        log::warn!("Rejected request: {}", error);
    }
    (status, Json(ErrorResponse::new(&error.to_string())))
}

pub async fn list_tags<S: TaxonomyStore>(
    State(store): State<AppState<S>>,
    Query(query): Query<TagQuery>,
) -> ApiResult<ListResponse<Tag>> {
    let tags = store.list_tags(query).await.map_err(error_response)?;
    Ok(Json(ListResponse::new(tags)))
}

pub async fn list_root_tags<S: TaxonomyStore>(
    State(store): State<AppState<S>>,
) -> ApiResult<ListResponse<Tag>> {
    let roots = store.list_root_tags().await.map_err(error_response)?;
    Ok(Json(ListResponse::new(roots)))
}

pub async fn get_tag_tree<S: TaxonomyStore>(
    State(store): State<AppState<S>>,
) -> ApiResult<Vec<TagNode>> {
    store.get_tag_tree().await.map(Json).map_err(error_response)
}

pub async fn get_tag<S: TaxonomyStore>(
    State(store): State<AppState<S>>,
    Path(tag_id): Path<Id>,
) -> ApiResult<Tag> {
    store.get_tag(&tag_id).await.map(Json).map_err(error_response)
}

pub async fn create_tag<S: TaxonomyStore>(
    State(store): State<AppState<S>>,
    RequestJson(new_tag): RequestJson<NewTag>,
) -> Result<(StatusCode, Json<Tag>), (StatusCode, Json<ErrorResponse>)> {
    let tag = store.create_tag(new_tag).await.map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(tag)))
}

pub async fn update_tag<S: TaxonomyStore>(
    State(store): State<AppState<S>>,
    Path(tag_id): Path<Id>,
    RequestJson(update): RequestJson<TagUpdate>,
) -> ApiResult<Tag> {
    store
        .update_tag(&tag_id, update)
        .await
        .map(Json)
        .map_err(error_response)
}

pub async fn delete_tag<S: TaxonomyStore>(
    State(store): State<AppState<S>>,
    Path(tag_id): Path<Id>,
) -> ApiResult<DeleteTagResponse> {
    let removed = store.delete_tag(&tag_id).await.map_err(error_response)?;
    Ok(Json(DeleteTagResponse { removed }))
}

pub async fn get_tag_hierarchy<S: TaxonomyStore>(
    State(store): State<AppState<S>>,
    Path(tag_id): Path<Id>,
) -> ApiResult<Vec<String>> {
    store
        .get_tag_hierarchy(&tag_id)
        .await
        .map(Json)
        .map_err(error_response)
}

pub async fn get_descendants<S: TaxonomyStore>(
    State(store): State<AppState<S>>,
    Path(tag_id): Path<Id>,
) -> ApiResult<ListResponse<Id>> {
    let ids = store.get_descendants(&tag_id).await.map_err(error_response)?;
    Ok(Json(ListResponse::new(ids)))
}

pub async fn get_subtree<S: TaxonomyStore>(
    State(store): State<AppState<S>>,
    Path(tag_id): Path<Id>,
) -> ApiResult<ListResponse<FlatTag>> {
    let flat = store.get_subtree(&tag_id).await.map_err(error_response)?;
    Ok(Json(ListResponse::new(flat)))
}

pub async fn get_root_color<S: TaxonomyStore>(
    State(store): State<AppState<S>>,
    Path(tag_id): Path<Id>,
) -> ApiResult<RootColorResponse> {
    let color = store.get_root_color(&tag_id).await.map_err(error_response)?;
    Ok(Json(RootColorResponse { id: tag_id, color }))
}

pub async fn list_domains<S: TaxonomyStore>(
    State(store): State<AppState<S>>,
) -> ApiResult<ListResponse<String>> {
    let domains = store.list_domains().await.map_err(error_response)?;
    Ok(Json(ListResponse::new(domains)))
}

pub async fn add_domain<S: TaxonomyStore>(
    State(store): State<AppState<S>>,
    RequestJson(new_domain): RequestJson<NewDomain>,
) -> Result<(StatusCode, Json<NewDomain>), (StatusCode, Json<ErrorResponse>)> {
    store
        .add_domain(&new_domain.label)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(new_domain)))
}

pub async fn remove_domain<S: TaxonomyStore>(
    State(store): State<AppState<S>>,
    Path(label): Path<String>,
) -> ApiResult<DeleteDomainResponse> {
    let removed = store.remove_domain(&label).await.map_err(error_response)?;
    Ok(Json(DeleteDomainResponse { removed }))
}

pub async fn export_snapshot<S: TaxonomyStore>(
    State(store): State<AppState<S>>,
) -> ApiResult<TaxonomySnapshot> {
    store.export_snapshot().await.map(Json).map_err(error_response)
}

pub async fn replace_snapshot<S: TaxonomyStore>(
    State(store): State<AppState<S>>,
    RequestJson(snapshot): RequestJson<TaxonomySnapshot>,
) -> ApiResult<TaxonomySnapshot> {
    store
        .replace_snapshot(snapshot)
        .await
        .map_err(error_response)?;
    store.export_snapshot().await.map(Json).map_err(error_response)
}
