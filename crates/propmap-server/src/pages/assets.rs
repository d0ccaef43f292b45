use axum::{http::header, response::IntoResponse};

const MAP_JS: &str = include_str!("../../static/map.js");
const LIST_JS: &str = include_str!("../../static/list.js");
const SITE_CSS: &str = include_str!("../../static/site.css");

const JS: &str = "text/javascript; charset=utf-8";

pub(super) async fn map_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, JS)], MAP_JS)
}

pub(super) async fn list_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, JS)], LIST_JS)
}

pub(super) async fn site_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], SITE_CSS)
}
