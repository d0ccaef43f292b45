use axum::{
    extract::{RawQuery, State},
    Extension, Json,
};
use propmap_core::{
    map::{
        build_features, Bounds, ClusterOptions, MapEffect, MapEvent, MapFeature, MapSession,
        NoRevealSurface, RevealSurface, Selection, MAX_ZOOM,
    },
    view_state::query_pairs,
    Catalog, PropertyId,
};
use serde::Serialize;

use crate::middleware::RequestId;
use crate::pages;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// Map viewport request. Every field is optional and parsed leniently:
/// unusable values fall back to defaults instead of failing the request.
#[derive(Debug, Default)]
pub(super) struct MapQuery {
    pub zoom: Option<String>,
    pub south: Option<String>,
    pub west: Option<String>,
    pub north: Option<String>,
    pub east: Option<String>,
    /// Currently selected property id.
    pub selected: Option<String>,
    /// Marker id or `background`.
    pub click: Option<String>,
    /// `0` or `false` when the page has no results rail.
    pub rail: Option<String>,
}

impl MapQuery {
    /// Reads a raw query string; a repeated key keeps its last value and unknown keys are ignored.
    fn parse(raw: &str) -> Self {
        let mut query = Self::default();
        for (key, value) in query_pairs(raw) {
            let slot = match key.as_str() {
                "zoom" => &mut query.zoom,
                "south" => &mut query.south,
                "west" => &mut query.west,
                "north" => &mut query.north,
                "east" => &mut query.east,
                "selected" => &mut query.selected,
                "click" => &mut query.click,
                "rail" => &mut query.rail,
                _ => continue,
            };
            *slot = Some(value);
        }
        query
    }

    fn bounds(&self) -> Option<Bounds> {
        let coord = |raw: &Option<String>| {
            raw.as_deref()
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
        };
        Some(Bounds {
            south: coord(&self.south)?,
            west: coord(&self.west)?,
            north: coord(&self.north)?,
            east: coord(&self.east)?,
        })
    }

    fn has_rail(&self) -> bool {
        !matches!(self.rail.as_deref(), Some("0" | "false"))
    }
}

#[derive(Debug, Serialize)]
pub(super) struct SelectedPanel {
    pub id: PropertyId,
    pub lat: f64,
    pub lon: f64,
    pub html: String,
}

#[derive(Debug, Serialize)]
pub(super) struct MapData {
    pub selection: Selection,
    pub selected: Option<SelectedPanel>,
    pub effects: Vec<MapEffect>,
    pub zoom: u8,
    pub features: Vec<MapFeature>,
}

/// The map page's results rail lists every catalog entry.
struct ResultsRail<'a> {
    catalog: &'a Catalog,
}

impl RevealSurface for ResultsRail<'_> {
    fn reveal(&mut self, id: PropertyId) -> bool {
        self.catalog.find(id).is_some()
    }
}

pub(super) async fn map_view(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    RawQuery(raw): RawQuery,
) -> Result<Json<ApiResponse<MapData>>, ApiError> {
    let query = MapQuery::parse(raw.as_deref().unwrap_or_default());
    let catalog = state.catalog.as_ref();
    let selected = query
        .selected
        .as_deref()
        .and_then(|s| s.trim().parse::<PropertyId>().ok());
    let mut session = MapSession::restore(catalog, selected);

    let effects = match query.click.as_deref().and_then(MapEvent::from_param) {
        Some(event) if query.has_rail() => session.handle(event, &mut ResultsRail { catalog }),
        Some(event) => session.handle(event, &mut NoRevealSurface),
        None => Vec::new(),
    };

    let zoom = query
        .zoom
        .as_deref()
        .and_then(|s| s.trim().parse::<u8>().ok())
        .unwrap_or(state.map.zoom)
        .min(MAX_ZOOM);
    let options = ClusterOptions {
        radius_px: state.map.cluster_radius_px,
        max_zoom: MAX_ZOOM,
    };
    let bounds = query.bounds();
    let features = build_features(catalog, &session, zoom, bounds.as_ref(), &options);

    let selected = match session.selected_property() {
        Some(property) => {
            let html = pages::render_popup(property).map_err(|e| {
                tracing::error!(error = %e, property_id = property.id, "popup render failed");
                ApiError::new(req_id.0.clone(), "internal_error", "failed to render popup")
            })?;
            Some(SelectedPanel {
                id: property.id,
                lat: property.latitude,
                lon: property.longitude,
                html,
            })
        }
        None => None,
    };

    tracing::debug!(
        zoom,
        features = features.len(),
        selection = ?session.selection(),
        "map view computed"
    );

    Ok(Json(ApiResponse {
        data: MapData {
            selection: session.selection(),
            selected,
            effects,
            zoom,
            features,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
