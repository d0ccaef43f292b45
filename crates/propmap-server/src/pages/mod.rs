//! Server-rendered HTML pages: the map/list discovery page and property details.

mod assets;
mod views;

use askama::Template;
use axum::{
    extract::{Path, RawQuery, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use propmap_core::{compose, view_state::LinkBuilder, PageModel, PropertyRecord, ViewQuery};

use crate::api::AppState;

use self::views::{CardView, PaginationView, ToggleView};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route(
            "/property-for-sale-in/{city}/{slug}/{id}",
            get(property_detail),
        )
        .route("/static/map.js", get(assets::map_js))
        .route("/static/list.js", get(assets::list_js))
        .route("/static/site.css", get(assets::site_css))
}

#[derive(Template)]
#[template(path = "list.html")]
struct ListTemplate {
    toggle: ToggleView,
    cards: Vec<CardView>,
    showing_from: usize,
    showing_to: usize,
    total: usize,
    pagination: PaginationView,
}

#[derive(Template)]
#[template(path = "map.html")]
struct MapTemplate {
    toggle: ToggleView,
    rail: Vec<CardView>,
    center_lat: f64,
    center_lon: f64,
    zoom: u8,
    selected: String,
    icon_defaults: String,
}

#[derive(Template)]
#[template(path = "detail.html")]
struct DetailTemplate {
    card: CardView,
    latitude: f64,
    longitude: f64,
    typologies: Vec<String>,
}

#[derive(Template)]
#[template(path = "partials/popup.html")]
struct PopupTemplate {
    card: CardView,
}

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate {
    path: String,
}

/// Template rendering failure; logged and shown as a bare 500 page.
#[derive(Debug)]
pub struct PageError(askama::Error);

impl From<askama::Error> for PageError {
    fn from(e: askama::Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "template render failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Something went wrong</h1>".to_string()),
        )
            .into_response()
    }
}

/// Renders the selection panel shown in the map popup.
pub fn render_popup(property: &PropertyRecord) -> Result<String, askama::Error> {
    PopupTemplate {
        card: CardView::from(property),
    }
    .render()
}

async fn index(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Html<String>, PageError> {
    let query = ViewQuery::parse(raw.as_deref().unwrap_or_default());
    let model = compose(&state.catalog, &query, &state.map);
    let links = LinkBuilder::new(model.state(), &query);
    let toggle = ToggleView::new(&links, model.state().view);

    let html = match model {
        PageModel::List(page) => {
            tracing::debug!(page = page.state.page, items = page.items.len(), "rendering list view");
            ListTemplate {
                toggle,
                cards: page.items.iter().map(CardView::from).collect(),
                showing_from: page.showing.from,
                showing_to: page.showing.to,
                total: page.showing.total,
                pagination: PaginationView::new(&page.window, &links),
            }
            .render()?
        }
        PageModel::Map(map) => {
            tracing::debug!(markers = map.properties.len(), "rendering map view");
            MapTemplate {
                toggle,
                rail: map.properties.iter().map(CardView::from).collect(),
                center_lat: map.center.lat,
                center_lon: map.center.lon,
                zoom: map.zoom,
                selected: map
                    .selected
                    .map(|p| p.id.to_string())
                    .unwrap_or_default(),
                icon_defaults: state.icons.to_json(),
            }
            .render()?
        }
    };
    Ok(Html(html))
}

async fn property_detail(
    State(state): State<AppState>,
    Path((city, slug, id)): Path<(String, String, String)>,
    uri: Uri,
) -> Result<Response, PageError> {
    let property = id
        .trim()
        .parse::<u32>()
        .ok()
        .and_then(|id| state.catalog.find(id));

    let Some(property) = property else {
        tracing::debug!(%city, %slug, %id, "detail page for unknown property");
        return not_found_page(uri.path());
    };

    let html = DetailTemplate {
        card: CardView::from(property),
        latitude: property.latitude,
        longitude: property.longitude,
        typologies: property.typologies.clone(),
    }
    .render()?;
    Ok(Html(html).into_response())
}

pub async fn not_found(uri: Uri) -> Result<Response, PageError> {
    not_found_page(uri.path())
}

fn not_found_page(path: &str) -> Result<Response, PageError> {
    let html = NotFoundTemplate {
        path: path.to_string(),
    }
    .render()?;
    Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
