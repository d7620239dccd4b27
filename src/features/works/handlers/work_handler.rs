use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::AdminSession;
use crate::features::categories::services::CategoryService;
use crate::features::works::dtos::{
    CreateWorkFields, CreateWorkFormDto, PreviewImage, UpdateWorkDto, WorkResponseDto,
    WorkStatusDto,
};
use crate::features::works::models::WorkStatus;
use crate::features::works::services::WorkService;
use crate::modules::storage::MinIOClient;
use crate::shared::constants::DEFAULT_WORK_VERSION;
use crate::shared::ids::generate_work_id;
use crate::shared::types::{ApiResponse, Meta};

/// State shared by the work form handlers
#[derive(Clone)]
pub struct WorksState {
    pub works: Arc<WorkService>,
    pub categories: Arc<CategoryService>,
    /// `None` when object storage is not configured; image uploads are then refused
    pub storage: Option<Arc<MinIOClient>>,
}

/// List every work, archived ones included
#[utoipa::path(
    get,
    path = "/api/admin/works",
    responses(
        (status = 200, description = "All works by category, newest first", body = ApiResponse<Vec<WorkResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "works",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_works(
    _session: AdminSession,
    State(state): State<WorksState>,
) -> Result<Json<ApiResponse<Vec<WorkResponseDto>>>> {
    let works: Vec<WorkResponseDto> = state
        .works
        .list_all()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = works.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(works),
        None,
        Some(Meta { total }),
    )))
}

/// Statuses selectable on the work form
#[utoipa::path(
    get,
    path = "/api/admin/works/statuses",
    responses(
        (status = 200, description = "Work statuses with badges", body = ApiResponse<Vec<WorkStatusDto>>)
    ),
    tag = "works",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_work_statuses(_session: AdminSession) -> Json<ApiResponse<Vec<WorkStatusDto>>> {
    let statuses: Vec<WorkStatusDto> = WorkStatus::ALL.into_iter().map(Into::into).collect();
    Json(ApiResponse::success(Some(statuses), None, None))
}

/// Get a work by id
#[utoipa::path(
    get,
    path = "/api/admin/works/{id}",
    params(
        ("id" = String, Path, description = "Work id")
    ),
    responses(
        (status = 200, description = "Work found", body = ApiResponse<WorkResponseDto>),
        (status = 404, description = "Work not found")
    ),
    tag = "works",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_work(
    _session: AdminSession,
    State(state): State<WorksState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<WorkResponseDto>>> {
    let work = state
        .works
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Work '{}' not found", id)))?;

    Ok(Json(ApiResponse::success(Some(work.into()), None, None)))
}

/// Create a work from the multipart form
///
/// Text fields: `work_name`, `category`, `subcategory`, `version`, `status`,
/// `streamlit_page`, `description`, `short_description`, `notes`.
/// The optional `image` part is stored as the preview image.
#[utoipa::path(
    post,
    path = "/api/admin/works",
    request_body(
        content = CreateWorkFormDto,
        content_type = "multipart/form-data",
        description = "Work form with an optional preview image",
    ),
    responses(
        (status = 201, description = "Work created", body = ApiResponse<WorkResponseDto>),
        (status = 400, description = "Validation error or unknown category"),
        (status = 409, description = "Generated id already taken"),
        (status = 502, description = "Preview image upload failed")
    ),
    tag = "works",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_work(
    _session: AdminSession,
    State(state): State<WorksState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<WorkResponseDto>>)> {
    let mut fields = CreateWorkFields::default();
    let mut image: Option<PreviewImage> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == "image" {
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let file_name = field.file_name().unwrap_or("").to_string();
            let data = field.bytes().await.map_err(|e| {
                AppError::BadRequest(format!("Failed to read image data: {}", e))
            })?;

            // Browsers send an empty part when no file was chosen
            if !data.is_empty() {
                image = Some(PreviewImage {
                    data: data.to_vec(),
                    file_name,
                    content_type,
                });
            }
            continue;
        }

        let text = field.text().await.map_err(|e| {
            AppError::BadRequest(format!("Failed to read field '{}': {}", field_name, e))
        })?;
        if !fields.set(&field_name, text) {
            debug!("Ignoring unknown field: {}", field_name);
        }
    }

    if fields.version.is_empty() {
        fields.version = DEFAULT_WORK_VERSION.to_string();
    }
    fields
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let status: WorkStatus = fields.status.parse().map_err(AppError::Validation)?;

    let active = state.categories.list_active().await?;
    if !active.iter().any(|c| c.category_id == fields.category) {
        return Err(AppError::Validation(format!(
            "Category '{}' does not exist or is archived",
            fields.category
        )));
    }

    if let Some(ref image) = image {
        image.validate().map_err(AppError::Validation)?;
        if state.storage.is_none() {
            return Err(AppError::BadRequest(
                "Image uploads are not configured on this server".to_string(),
            ));
        }
    }

    let work_id = generate_work_id(&fields.work_name)?;

    let image_preview_url = match (image, state.storage.as_ref()) {
        (Some(image), Some(storage)) => {
            let ext = image.extension().unwrap_or_default();
            let path = format!("works/{}.{}", work_id, ext);
            Some(
                storage
                    .upload_public(&path, &image.data, &image.content_type)
                    .await?,
            )
        }
        _ => None,
    };

    let work = state
        .works
        .create(fields.into_new_work(work_id, status, image_preview_url))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(work.into()),
            Some("Work created".to_string()),
            None,
        )),
    ))
}

/// Edit a work (not yet available)
#[utoipa::path(
    put,
    path = "/api/admin/works/{id}",
    params(
        ("id" = String, Path, description = "Work id")
    ),
    request_body = UpdateWorkDto,
    responses(
        (status = 501, description = "Editing works is not yet available")
    ),
    tag = "works",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_work(
    _session: AdminSession,
    Path(id): Path<String>,
    AppJson(_dto): AppJson<UpdateWorkDto>,
) -> Result<Json<ApiResponse<WorkResponseDto>>> {
    debug!("Edit requested for work '{}'", id);
    Err(AppError::Unsupported(
        "Editing works is not yet available".to_string(),
    ))
}

/// Archive a work
#[utoipa::path(
    post,
    path = "/api/admin/works/{id}/archive",
    params(
        ("id" = String, Path, description = "Work id")
    ),
    responses(
        (status = 200, description = "Work archived"),
        (status = 404, description = "Work not found")
    ),
    tag = "works",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn archive_work(
    _session: AdminSession,
    State(state): State<WorksState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    state.works.archive(&id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Work archived".to_string()),
        None,
    )))
}
