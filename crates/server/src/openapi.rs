use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ContactFormDoc { pub name: String, pub email: String, pub subject: String, pub message: String }

/// `status` is one of `new`, `read`, `resolved`, `archived`.
#[derive(ToSchema)]
pub struct StatusUpdateDoc { pub status: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::catalog::advertisements,
        crate::routes::catalog::ideas,
        crate::routes::catalog::students,
        crate::routes::contact::list_messages,
        crate::routes::contact::submit,
        crate::routes::contact::update_status,
    ),
    components(schemas(HealthResponse, ContactFormDoc, StatusUpdateDoc)),
    tags(
        (name = "health"),
        (name = "catalog", description = "Seed data merged with live records"),
        (name = "contact", description = "Contact form and admin status updates"),
    )
)]
pub struct ApiDoc;
