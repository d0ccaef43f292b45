use axum::{
    extract::{Path, RawQuery, State},
    Extension, Json,
};
use chrono::NaiveDate;
use propmap_core::{
    compose::{list_page, ShowingRange},
    format::{concatenate_typologies, format_date, format_price_range},
    PageItem, PropertyRecord, PropertyStatus, ViewMode, ViewQuery, ViewState, ITEMS_PER_PAGE,
};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct PropertyItem {
    pub id: u32,
    pub name: String,
    pub slug: String,
    pub city: String,
    pub micromarket: String,
    pub latitude: f64,
    pub longitude: f64,
    pub min_price: u64,
    pub max_price: u64,
    pub price_label: String,
    pub min_saleable_area: u32,
    pub max_saleable_area: u32,
    pub typologies: Vec<String>,
    pub typology_label: String,
    pub possession_date: NaiveDate,
    pub possession_label: String,
    pub status: PropertyStatus,
    pub propscore: f64,
    pub developer: Option<String>,
    pub property_type: String,
    pub image_url: String,
    pub alt: String,
    pub detail_path: String,
}

impl From<&PropertyRecord> for PropertyItem {
    fn from(p: &PropertyRecord) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            slug: p.slug.clone(),
            city: p.city.clone(),
            micromarket: p.micromarket.clone(),
            latitude: p.latitude,
            longitude: p.longitude,
            min_price: p.min_price,
            max_price: p.max_price,
            price_label: format_price_range(p.min_price, p.max_price),
            min_saleable_area: p.min_saleable_area,
            max_saleable_area: p.max_saleable_area,
            typologies: p.typologies.clone(),
            typology_label: concatenate_typologies(&p.typologies),
            possession_date: p.possession_date,
            possession_label: format_date(p.possession_date),
            status: p.status,
            propscore: p.propscore,
            developer: p.developer.clone(),
            property_type: p.property_type.clone(),
            image_url: p.image_url(),
            alt: p.alt_text().to_string(),
            detail_path: p.detail_path(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct PaginationMeta {
    pub page: u32,
    pub total_pages: u32,
    pub total_items: usize,
    pub items_per_page: usize,
    pub showing: ShowingRange,
    pub window: Vec<PageItem>,
    pub previous: Option<u32>,
    pub next: Option<u32>,
}

#[derive(Debug, Serialize)]
pub(super) struct PropertyPage {
    pub items: Vec<PropertyItem>,
    pub pagination: PaginationMeta,
}

/// Paginated listing. The `view` parameter is ignored here: this endpoint is always a list.
pub(super) async fn list_properties(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    RawQuery(raw): RawQuery,
) -> Json<ApiResponse<PropertyPage>> {
    let query = ViewQuery::parse(raw.as_deref().unwrap_or_default());
    let decoded = ViewState::decode(&query, state.catalog.len());
    let view_state = ViewState {
        view: ViewMode::List,
        page: decoded.page,
    };
    let page = list_page(&state.catalog, view_state, ITEMS_PER_PAGE);

    Json(ApiResponse {
        data: PropertyPage {
            items: page.items.iter().map(PropertyItem::from).collect(),
            pagination: PaginationMeta {
                page: page.state.page,
                total_pages: page.window.total_pages,
                total_items: page.total_items,
                items_per_page: page.items_per_page,
                showing: page.showing,
                previous: page.window.previous,
                next: page.window.next,
                window: page.window.items,
            },
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn get_property(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PropertyItem>>, ApiError> {
    let property = id
        .trim()
        .parse::<u32>()
        .ok()
        .and_then(|id| state.catalog.find(id))
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "not_found",
                format!("property {id} not found"),
            )
        })?;

    Ok(Json(ApiResponse {
        data: PropertyItem::from(property),
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::super::test_support::{app, get_json};

    #[tokio::test]
    async fn first_page_has_twelve_items() {
        let (status, json) = get_json(app(), "/api/v1/properties").await;
        assert_eq!(status, StatusCode::OK);
        let items = json["data"]["items"].as_array().expect("items");
        assert_eq!(items.len(), 12);
        assert_eq!(items[0]["id"], 1);
        assert_eq!(json["data"]["pagination"]["page"], 1);
        assert_eq!(json["data"]["pagination"]["previous"], serde_json::Value::Null);
        assert_eq!(json["data"]["pagination"]["next"], 2);
    }

    #[tokio::test]
    async fn malformed_page_falls_back_to_first_page() {
        let (status, json) = get_json(app(), "/api/v1/properties?page=-4").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["pagination"]["page"], 1);
    }

    #[tokio::test]
    async fn repeated_page_uses_the_last_value() {
        let (status, json) = get_json(app(), "/api/v1/properties?page=1&page=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["pagination"]["page"], 2);
    }

    #[tokio::test]
    async fn oversized_page_is_clamped_to_last_page() {
        let (_, json) = get_json(app(), "/api/v1/properties?page=999&view=map").await;
        let pagination = &json["data"]["pagination"];
        assert_eq!(pagination["page"], pagination["total_pages"]);
        assert!(!json["data"]["items"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn property_detail_includes_formatted_labels() {
        let (status, json) = get_json(app(), "/api/v1/properties/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["id"], 1);
        assert!(json["data"]["price_label"].as_str().unwrap().starts_with('₹'));
        assert!(json["data"]["detail_path"]
            .as_str()
            .unwrap()
            .starts_with("/property-for-sale-in/bangalore/"));
    }

    #[tokio::test]
    async fn unknown_property_is_not_found() {
        let (status, json) = get_json(app(), "/api/v1/properties/9999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "not_found");

        let (status, _) = get_json(app(), "/api/v1/properties/abc").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
