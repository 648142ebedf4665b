//! Person lookup endpoint.
//!
//! ```text
//! GET /api/people/ab123
//! Authorization: Basic <base64 of "<api key>:">
//! ```

use actix_web::{get, web};
use serde_json::json;
use tracing::debug;

use super::auth::ApiCaller;
use super::schemas::{ErrorSchema, PersonSchema};
use super::state::HttpState;
use crate::domain::{Crsid, Error, Person};
use crate::inbound::http::ApiResult;

/// Resolve a directory entry by CRSID.
#[utoipa::path(
    get,
    path = "/api/people/{crsid}",
    params(("crsid" = String, Path, description = "Directory identifier, e.g. ab123")),
    responses(
        (status = 200, description = "Directory entry", body = PersonSchema),
        (status = 400, description = "Malformed identifier or authorization header", body = ErrorSchema),
        (status = 401, description = "Missing or rejected API key", body = ErrorSchema),
        (status = 404, description = "No such person in the directory", body = ErrorSchema),
        (status = 500, description = "Directory or identity provider failure", body = ErrorSchema),
        (status = 503, description = "Credential store unavailable", body = ErrorSchema)
    ),
    tags = ["people"],
    operation_id = "getPerson"
)]
#[get("/people/{crsid}")]
pub async fn get_person(
    _caller: ApiCaller,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Person>> {
    let raw = path.into_inner();
    let crsid = Crsid::new(&raw).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "crsid": raw }))
    })?;
    debug!(%crsid, "person lookup requested");
    let person = state.lookup.lookup(&crsid).await?;
    Ok(web::Json(person))
}
