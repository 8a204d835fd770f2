use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::middleware::service_auth::API_KEY_HEADER;
use crate::modules::students::model::{
    MessageResponse, Student, StudentListResponse, StudentPayload, StudentStatus,
    StudentStatusDto,
};
use registrar_auth::Role;
use registrar_core::ErrorResponse;
use registrar_models::{IdentityKind, RequestIdentity};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::students::controller::handle_get_all_students,
        crate::modules::students::controller::handle_add_student,
        crate::modules::students::controller::handle_update_student,
        crate::modules::students::controller::handle_get_student_detail,
        crate::modules::students::controller::handle_student_status,
    ),
    components(
        schemas(
            Student,
            StudentListResponse,
            StudentPayload,
            StudentStatus,
            StudentStatusDto,
            MessageResponse,
            ErrorResponse,
            RequestIdentity,
            IdentityKind,
            Role,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Students", description = "Student administration endpoints")
    ),
    info(
        title = "Registrar API",
        version = "0.1.0",
        description = "School administration API. Users authenticate with a bearer JWT; internal services with the x-api-key header.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
            );
        }
    }
}
