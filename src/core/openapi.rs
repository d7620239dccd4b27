use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dto as auth_dto, handler as auth_handler};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::works::{dtos as works_dtos, handlers as works_handlers, models as works_models};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handler::login,
        auth_handler::logout,
        auth_handler::get_session,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::list_category_icons,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::archive_category,
        // Works
        works_handlers::list_works,
        works_handlers::list_work_statuses,
        works_handlers::get_work,
        works_handlers::create_work,
        works_handlers::update_work,
        works_handlers::archive_work,
    ),
    components(
        schemas(
            Meta,
            // Auth
            auth_dto::LoginRequestDto,
            auth_dto::LoginResponseDto,
            auth_dto::SessionDto,
            ApiResponse<auth_dto::LoginResponseDto>,
            ApiResponse<auth_dto::SessionDto>,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            // Works
            works_models::WorkStatus,
            works_dtos::WorkResponseDto,
            works_dtos::WorkStatusDto,
            works_dtos::UpdateWorkDto,
            works_dtos::CreateWorkFormDto,
            ApiResponse<works_dtos::WorkResponseDto>,
            ApiResponse<Vec<works_dtos::WorkResponseDto>>,
            ApiResponse<Vec<works_dtos::WorkStatusDto>>,
        )
    ),
    tags(
        (name = "auth", description = "Admin login and session"),
        (name = "categories", description = "Work category forms (admin session required)"),
        (name = "works", description = "Work forms (admin session required)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Works Admin API",
        version = "0.1.0",
        description = "Administration of the works catalogue",
    )
)]
pub struct ApiDoc;

/// Adds the admin session bearer scheme to the OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("Session token")
                        .build(),
                ),
            );
        }
    }
}

/// Overrides title, version and description from configuration
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
