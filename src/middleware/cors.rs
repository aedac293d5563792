//! CORS Middleware Configuration

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};

use crate::config::Cors;

/// Preflight cache lifetime
const MAX_AGE: Duration = Duration::from_secs(3600);

/// Create CORS layer from the `CORS` section.
///
/// A `*` entry (or no parseable origin) allows any origin. Browsers reject
/// wildcards on credentialed requests, so with `CREDENTIALS` enabled the
/// wildcard origin, methods and headers are mirrored from the request.
pub fn create_cors_layer(cors: &Cors) -> CorsLayer {
    let wildcard = cors.origin.iter().any(|origin| origin == "*");
    let origins: Vec<HeaderValue> = cors
        .origin
        .iter()
        .filter(|origin| origin.as_str() != "*")
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let methods: Vec<Method> = cors
        .methods
        .iter()
        .filter_map(|method| Method::from_bytes(method.as_str().as_bytes()).ok())
        .collect();

    let allow_origin = if wildcard || origins.is_empty() {
        if cors.credentials {
            AllowOrigin::mirror_request()
        } else {
            AllowOrigin::from(Any)
        }
    } else {
        AllowOrigin::list(origins)
    };

    let allow_methods = if !methods.is_empty() {
        AllowMethods::list(methods)
    } else if cors.credentials {
        AllowMethods::mirror_request()
    } else {
        AllowMethods::from(Any)
    };

    let allow_headers = if cors.credentials {
        AllowHeaders::mirror_request()
    } else {
        AllowHeaders::from(Any)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(allow_methods)
        .allow_headers(allow_headers)
        .allow_credentials(cors.credentials)
        .max_age(MAX_AGE)
}
