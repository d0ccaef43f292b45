use propmap_core::{
    format::{
        concatenate_typologies, format_area_range, format_date, format_price_range,
        format_propscore,
    },
    property::MAX_PROPSCORE,
    view_state::LinkBuilder,
    PageItem, PageWindow, PropertyRecord, PropertyStatus, ViewMode,
};

/// Display-ready fields for one property card, popup or detail page.
pub(crate) struct CardView {
    pub id: u32,
    pub name: String,
    pub micromarket: String,
    pub location: String,
    pub image_url: String,
    pub alt: String,
    pub sold_out: bool,
    pub badge: String,
    pub badge_class: &'static str,
    pub property_type: String,
    pub propscore: String,
    /// Filled share of the rating bar, 0-100.
    pub rating_percent: u32,
    pub price: String,
    pub typology: String,
    pub area: String,
    pub possession: String,
    pub developer: String,
    pub detail_path: String,
}

impl From<&PropertyRecord> for CardView {
    fn from(p: &PropertyRecord) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            micromarket: p.micromarket.clone(),
            location: format!("{}, {}", p.micromarket, p.city),
            image_url: p.image_url(),
            alt: p.alt_text().to_string(),
            sold_out: p.status.is_sold_out(),
            badge: p.status.badge().unwrap_or_default().to_string(),
            badge_class: match p.status {
                PropertyStatus::Available => "badge-available",
                PropertyStatus::SoldOut => "badge-sold-out",
                PropertyStatus::Other => "",
            },
            property_type: p.property_type.clone(),
            propscore: format_propscore(p.propscore),
            rating_percent: rating_percent(p.propscore),
            price: format_price_range(p.min_price, p.max_price),
            typology: concatenate_typologies(&p.typologies),
            area: format_area_range(p.min_saleable_area, p.max_saleable_area),
            possession: format_date(p.possession_date),
            developer: p.developer.clone().unwrap_or_default(),
            detail_path: p.detail_path(),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rating_percent(score: f64) -> u32 {
    (score.clamp(0.0, MAX_PROPSCORE) / MAX_PROPSCORE * 100.0).round() as u32
}

pub(crate) struct ToggleView {
    pub map_href: String,
    pub list_href: String,
    pub map_active: bool,
    pub list_active: bool,
}

impl ToggleView {
    pub fn new(links: &LinkBuilder<'_>, current: ViewMode) -> Self {
        Self {
            map_href: links.toggle_href(ViewMode::Map),
            list_href: links.toggle_href(ViewMode::List),
            map_active: current == ViewMode::Map,
            list_active: current == ViewMode::List,
        }
    }
}

pub(crate) struct PageLinkView {
    pub label: String,
    pub href: String,
    pub current: bool,
    pub ellipsis: bool,
}

pub(crate) struct PaginationView {
    pub show: bool,
    pub has_previous: bool,
    pub previous_href: String,
    pub has_next: bool,
    pub next_href: String,
    pub links: Vec<PageLinkView>,
}

impl PaginationView {
    pub fn new(window: &PageWindow, links: &LinkBuilder<'_>) -> Self {
        let page_links = window
            .items
            .iter()
            .map(|item| match *item {
                PageItem::Page { number, current } => PageLinkView {
                    label: number.to_string(),
                    href: links.page_href(number),
                    current,
                    ellipsis: false,
                },
                PageItem::Ellipsis => PageLinkView {
                    label: "...".to_string(),
                    href: String::new(),
                    current: false,
                    ellipsis: true,
                },
            })
            .collect();

        Self {
            show: window.is_paginated(),
            has_previous: window.previous.is_some(),
            previous_href: window
                .previous
                .map_or_else(|| "#".to_string(), |p| links.page_href(p)),
            has_next: window.next.is_some(),
            next_href: window
                .next
                .map_or_else(|| "#".to_string(), |p| links.page_href(p)),
            links: page_links,
        }
    }
}
