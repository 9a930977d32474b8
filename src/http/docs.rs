//! API documentation endpoints.
//!
//! Serves the page advertised in the startup record
//! (`/swagger/index.html`) and the OpenAPI document it describes.

use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Json,
};
use serde_json::json;

use crate::http::server::AppState;

/// Static description of the public API surface.
#[derive(Debug, Clone)]
pub struct ApiInfo {
    pub title: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub base_path: &'static str,
    pub license: &'static str,
}

impl Default for ApiInfo {
    fn default() -> Self {
        Self {
            title: "Pandora Helper API",
            version: "1.0.0",
            description: "This is the API server for Pandora Helper.",
            base_path: "/api/v1",
            license: "MIT",
        }
    }
}

/// Path of the documentation page, relative to the server root.
pub const DOCS_PATH: &str = "/swagger/index.html";

/// Path of the machine-readable document.
pub const OPENAPI_PATH: &str = "/swagger/doc.json";

pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let info = &state.api;
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{title}</title></head>\n<body>\n\
         <h1>{title} <small>{version}</small></h1>\n\
         <p>{description}</p>\n\
         <p>Base path: <code>{base_path}</code></p>\n\
         <p>OpenAPI document: <a href=\"{openapi}\">{openapi}</a></p>\n\
         </body>\n</html>\n",
        title = info.title,
        version = info.version,
        description = info.description,
        base_path = info.base_path,
        openapi = OPENAPI_PATH,
    ))
}

pub async fn openapi(State(state): State<AppState>) -> impl IntoResponse {
    let info = &state.api;
    Json(json!({
        "swagger": "2.0",
        "info": {
            "title": info.title,
            "version": info.version,
            "description": info.description,
            "license": { "name": info.license },
        },
        "basePath": info.base_path,
        "paths": {},
        "securityDefinitions": {
            "Bearer": {
                "type": "apiKey",
                "in": "header",
                "name": "Authorization",
            }
        },
    }))
}
