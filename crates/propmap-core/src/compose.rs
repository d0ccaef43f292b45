//! Turns `(catalog, query parameters)` into the model one page render needs.

use serde::Serialize;

use crate::app_config::MapSettings;
use crate::catalog::Catalog;
use crate::map::{GeoPoint, MapSession};
use crate::pagination::PageWindow;
use crate::property::{PropertyId, PropertyRecord};
use crate::view_state::{total_pages, ViewMode, ViewQuery, ViewState, ITEMS_PER_PAGE};

/// Query parameter carrying the initially selected property on the map view.
pub const SELECTED_PARAM: &str = "selected";

#[derive(Debug, Clone, PartialEq)]
pub enum PageModel<'a> {
    Map(MapPage<'a>),
    List(ListPage<'a>),
}

impl PageModel<'_> {
    #[must_use]
    pub fn state(&self) -> ViewState {
        match self {
            PageModel::Map(m) => m.state,
            PageModel::List(l) => l.state,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapPage<'a> {
    pub state: ViewState,
    /// The whole catalog; the map is never paginated.
    pub properties: &'a [PropertyRecord],
    pub selected: Option<&'a PropertyRecord>,
    pub center: GeoPoint,
    pub zoom: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<'a> {
    pub state: ViewState,
    pub items: &'a [PropertyRecord],
    pub window: PageWindow,
    pub total_items: usize,
    pub items_per_page: usize,
    pub showing: ShowingRange,
}

/// One-based, inclusive "Showing from - to of total" numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShowingRange {
    pub from: usize,
    pub to: usize,
    pub total: usize,
}

impl ShowingRange {
    #[must_use]
    pub fn new(state: ViewState, per_page: usize, total: usize) -> Self {
        let offset = state.offset(per_page);
        Self {
            from: if total == 0 { 0 } else { offset + 1 },
            to: offset.saturating_add(per_page).min(total),
            total,
        }
    }
}

#[must_use]
pub fn compose<'a>(catalog: &'a Catalog, query: &ViewQuery, map: &MapSettings) -> PageModel<'a> {
    let state = ViewState::decode(query, catalog.len());
    match state.view {
        ViewMode::List => PageModel::List(list_page(catalog, state, ITEMS_PER_PAGE)),
        ViewMode::Map => {
            let selected_id = query
                .extra
                .get(SELECTED_PARAM)
                .and_then(|raw| raw.trim().parse::<PropertyId>().ok());
            let session = MapSession::restore(catalog, selected_id);
            let center = session.target().unwrap_or(GeoPoint {
                lat: map.center_lat,
                lon: map.center_lon,
            });
            PageModel::Map(MapPage {
                state,
                properties: catalog.as_slice(),
                selected: session.selected_property(),
                center,
                zoom: map.zoom,
            })
        }
    }
}

/// The list slice for `state.page`; `state` must already be clamped.
#[must_use]
pub fn list_page(catalog: &Catalog, state: ViewState, per_page: usize) -> ListPage<'_> {
    let total_items = catalog.len();
    ListPage {
        state,
        items: catalog.slice(state.offset(per_page), per_page),
        window: PageWindow::compute(state.page, total_pages(total_items, per_page)),
        total_items,
        items_per_page: per_page,
        showing: ShowingRange::new(state, per_page, total_items),
    }
}
