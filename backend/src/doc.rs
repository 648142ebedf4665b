//! OpenAPI document for the lookup API.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary for external tooling.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, PersonSchema};
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the basic-auth security scheme in the generated document.
pub const BASIC_AUTH_SCHEME: &str = "BasicAuth";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let mut scheme = Http::new(HttpAuthScheme::Basic);
        scheme.description = Some("Username must equal the configured API key.".to_owned());
        components.add_security_scheme(BASIC_AUTH_SCHEME, SecurityScheme::Http(scheme));
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Cambridge lookup proxy",
        description = "Structured access to the University of Cambridge lookup directory."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BasicAuth" = [])),
    paths(
        crate::inbound::http::people::get_person,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(PersonSchema, ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "people", description = "Directory lookups"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
