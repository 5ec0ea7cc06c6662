use crate::config::CorsConfig;
use actix_cors::Cors;
use actix_web::http::header;

/// Browser access for the form. A `*` entry, or no `[cors]` section at all,
/// allows every origin.
pub fn build_cors(config: Option<&CorsConfig>) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(3600);

    match config {
        Some(config) if !config.allows_any_origin() => config
            .allowed_origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin)),
        _ => cors.allow_any_origin(),
    }
}
