use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::AdminSession;
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::NewCategory;
use crate::features::categories::services::CategoryService;
use crate::shared::constants::CATEGORY_ICONS;
use crate::shared::ids::generate_category_id;
use crate::shared::types::{ApiResponse, Meta};

/// List active categories
#[utoipa::path(
    get,
    path = "/api/admin/categories",
    responses(
        (status = 200, description = "Active categories by display order", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_categories(
    _session: AdminSession,
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories: Vec<CategoryResponseDto> = service
        .list_active()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = categories.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(categories),
        None,
        Some(Meta { total }),
    )))
}

/// Icons selectable for a category
#[utoipa::path(
    get,
    path = "/api/admin/categories/icons",
    responses(
        (status = 200, description = "Selectable icons", body = ApiResponse<Vec<String>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_category_icons(_session: AdminSession) -> Json<ApiResponse<Vec<String>>> {
    let icons: Vec<String> = CATEGORY_ICONS.iter().map(|icon| icon.to_string()).collect();
    Json(ApiResponse::success(Some(icons), None, None))
}

/// Get a category by id
#[utoipa::path(
    get,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = String, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = ApiResponse<CategoryResponseDto>),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_category(
    _session: AdminSession,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", id)))?;

    Ok(Json(ApiResponse::success(Some(category.into()), None, None)))
}

/// Create a category; its id is derived from the name
#[utoipa::path(
    post,
    path = "/api/admin/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Generated id already taken")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_category(
    _session: AdminSession,
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category_name = dto.category_name.trim().to_string();
    let category_id = generate_category_id(&category_name)?;

    let category = service
        .create(NewCategory {
            category_id,
            category_name,
            category_icon: dto.category_icon,
            display_order: dto.display_order,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(category.into()),
            Some("Category created".to_string()),
            None,
        )),
    ))
}

/// Update the supplied fields of a category
#[utoipa::path(
    put,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = String, Path, description = "Category id")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_category(
    _session: AdminSession,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.update(&id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(category.into()),
        Some("Category updated".to_string()),
        None,
    )))
}

/// Archive a category. It no longer appears in the active listing.
#[utoipa::path(
    post,
    path = "/api/admin/categories/{id}/archive",
    params(
        ("id" = String, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category archived"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn archive_category(
    _session: AdminSession,
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.archive(&id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Category archived".to_string()),
        None,
    )))
}
