//! CORS middleware configuration for cross-origin requests.
//!
//! A wildcard origin list (`*`, the default) allows any origin without
//! credentials. An explicit list allows exactly those origins and lets
//! browsers send credentials.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use ev_shared::config::CorsConfig;

/// Creates a CORS middleware instance from the configured origins.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        log::debug!("Configuring CORS for any origin");
        return cors.allow_any_origin();
    }

    let mut cors = cors.supports_credentials();
    for origin in config.allowed_origins.iter().map(|s| s.trim()) {
        if !origin.is_empty() {
            log::info!("Adding allowed origin: {}", origin);
            cors = cors.allowed_origin(origin);
        }
    }
    cors
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{
        http::{header::HeaderMap, StatusCode},
        test, web, App, HttpResponse,
    };

    fn config(origins: &[&str]) -> CorsConfig {
        CorsConfig {
            allowed_origins: origins.iter().map(|s| s.to_string()).collect(),
            ..CorsConfig::default()
        }
    }

    async fn preflight(config: &CorsConfig, origin: &str) -> (StatusCode, HeaderMap) {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(config))
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/ping")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        (resp.status(), resp.headers().clone())
    }

    #[actix_web::test]
    async fn test_wildcard_allows_any_origin() {
        let (status, headers) = preflight(&config(&["*"]), "https://anywhere.example").await;

        assert_eq!(status, StatusCode::OK);
        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
    }

    #[actix_web::test]
    async fn test_explicit_origin_supports_credentials() {
        let (status, headers) =
            preflight(&config(&["https://app.example"]), "https://app.example").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("https://app.example")
        );
        assert_eq!(
            headers
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .and_then(|v| v.to_str().ok()),
            Some("true")
        );
    }

    #[actix_web::test]
    async fn test_unlisted_origin_is_rejected() {
        let (status, _) = preflight(&config(&["https://app.example"]), "https://evil.example").await;
        assert!(status.is_client_error());
    }
}
