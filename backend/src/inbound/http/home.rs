//! Plain-text banner served at the root path.

use actix_web::{HttpResponse, get, http::header::ContentType};

pub const BANNER: &str = "This is a proxy for the cambridge lookup API\n";

/// Serve the plain-text banner.
#[get("/")]
pub async fn home() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(BANNER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test as actix_test};

    #[actix_web::test]
    async fn serves_banner() {
        let app = actix_test::init_service(App::new().service(home)).await;
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;
        assert!(response.status().is_success());
        let body = actix_test::read_body(response).await;
        assert_eq!(body.as_ref(), BANNER.as_bytes());
    }
}
