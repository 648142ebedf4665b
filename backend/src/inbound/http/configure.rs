//! Administrative form for storing login credentials and the API key.
//!
//! ```text
//! GET  /configure
//! POST /configure  key=userid&value=ab123
//! ```

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::auth::AdminCaller;
use super::state::HttpState;
use crate::domain::ports::CredentialError;
use crate::domain::{ConfigKey, Error, UnknownConfigKey};
use crate::inbound::http::ApiResult;

const CONFIGURE_FORM: &str = r#"<html>
  <body>
    <form method="post">
      <input name="key" value="" placeholder="Key" /><br />
      <input name="value" type="password" value="" placeholder="Value" /><br />
      <input type="submit" />
    </form>
  </body>
</html>
"#;

/// Urlencoded body of `POST /configure`.
#[derive(Debug, Deserialize)]
pub struct ConfigureForm {
    pub key: String,
    pub value: String,
}

fn form_page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(CONFIGURE_FORM)
}

fn map_credential_error(error: CredentialError) -> Error {
    match error {
        CredentialError::Backend { message } => {
            warn!(%message, "failed to store configuration value");
            Error::service_unavailable("configuration store is unavailable")
        }
        other => Error::internal(other.to_string()),
    }
}

/// Render the configuration form.
#[get("/configure")]
pub async fn configure_page(caller: AdminCaller) -> HttpResponse {
    if caller == AdminCaller::Bootstrap {
        info!("serving configuration form without credentials");
    }
    form_page()
}

/// Store one configuration value and render the form again.
#[post("/configure")]
pub async fn update_configuration(
    _caller: AdminCaller,
    state: web::Data<HttpState>,
    form: web::Form<ConfigureForm>,
) -> ApiResult<HttpResponse> {
    let ConfigureForm { key, value } = form.into_inner();
    let key: ConfigKey = key.parse().map_err(|err: UnknownConfigKey| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "key": key,
            "allowed": ConfigKey::ALL.into_iter().map(ConfigKey::as_str).collect::<Vec<_>>(),
        }))
    })?;
    state
        .credentials
        .set(key, &value)
        .await
        .map_err(map_credential_error)?;
    info!(%key, "configuration value updated");
    Ok(form_page())
}
