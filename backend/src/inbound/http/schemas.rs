//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay free of `ToSchema`; these wrappers mirror their wire
//! shape for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    #[schema(rename = "unauthorized")]
    Unauthorized,
    #[schema(rename = "not_found")]
    NotFound,
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// The directory or identity provider failed; the message explains how.
    #[schema(rename = "upstream_failure")]
    UpstreamFailure,
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    #[schema(example = "Person was not found: ab123")]
    message: String,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Person`].
///
/// Keys keep the directory's original capitalisation.
#[derive(ToSchema)]
#[schema(as = crate::domain::Person, rename_all = "PascalCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PersonSchema {
    #[schema(rename = "CRSID", example = "ab123")]
    crsid: String,
    #[schema(example = "A. Person")]
    display_name: String,
    #[schema(example = "Alice Person")]
    registered_name: String,
    #[schema(example = "Person")]
    surname: String,
    #[schema(example = "Department of Computer Science and Technology")]
    institution: String,
    #[schema(example = "King's College")]
    college: String,
    #[schema(example = "Staff")]
    status: String,
    #[schema(value_type = String, format = DateTime, example = "2024-03-01T12:00:00Z")]
    last_updated: String,
}
