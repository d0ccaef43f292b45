//! Translation between URL query parameters and the `{view, page}` pair.
//!
//! Decoding never fails: unknown views fall back to the map, unparseable or
//! out-of-range pages are clamped into `[1, total_pages]`.

use std::collections::BTreeMap;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Cards per list page.
pub const ITEMS_PER_PAGE: usize = 12;

/// Characters left unescaped in query components, matching `URLSearchParams`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'*');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Map,
    List,
}

impl ViewMode {
    /// Only the exact string `"list"` selects the list; everything else is the map.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("list") => ViewMode::List,
            _ => ViewMode::Map,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Map => "map",
            ViewMode::List => "list",
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw query parameters as they arrive on the request.
///
/// Parameters other than `view` and `page` are kept so generated links carry them along.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub view: Option<String>,
    pub page: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl ViewQuery {
    /// Parses a raw query string (with or without a leading `?`).
    ///
    /// Later duplicates win, as with `URLSearchParams::set`.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let mut parsed = Self::default();
        for (key, value) in query_pairs(query) {
            match key.as_str() {
                "view" => parsed.view = Some(value),
                "page" => parsed.page = Some(value),
                _ => {
                    parsed.extra.insert(key, value);
                }
            }
        }
        parsed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub view: ViewMode,
    pub page: u32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            view: ViewMode::Map,
            page: 1,
        }
    }
}

impl ViewState {
    /// Decodes with the fixed [`ITEMS_PER_PAGE`].
    #[must_use]
    pub fn decode(query: &ViewQuery, total_items: usize) -> Self {
        Self::decode_with_page_size(query, total_items, ITEMS_PER_PAGE)
    }

    #[must_use]
    pub fn decode_with_page_size(query: &ViewQuery, total_items: usize, per_page: usize) -> Self {
        let view = ViewMode::from_param(query.view.as_deref());
        let page = parse_page(query.page.as_deref()).min(total_pages(total_items, per_page));
        Self { view, page }
    }

    /// `view=list&page=N` for the list, `view=map` for the map.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        match self.view {
            ViewMode::List => format!("view=list&page={}", self.page),
            ViewMode::Map => "view=map".to_string(),
        }
    }

    /// Zero-based catalog offset of the first record on this page.
    #[must_use]
    pub fn offset(&self, per_page: usize) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(per_page)
    }
}

/// `ceil(total_items / per_page)`, never less than 1 so that page 1 is always valid.
#[must_use]
pub fn total_pages(total_items: usize, per_page: usize) -> u32 {
    let pages = total_items.div_ceil(per_page.max(1)).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Positive integer or 1.
fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|&p| p >= 1)
        .unwrap_or(1)
}

/// Builds navigation hrefs that keep the current view and any unrelated parameters.
#[derive(Debug, Clone)]
pub struct LinkBuilder<'a> {
    state: ViewState,
    extra: &'a BTreeMap<String, String>,
}

impl<'a> LinkBuilder<'a> {
    #[must_use]
    pub fn new(state: ViewState, query: &'a ViewQuery) -> Self {
        Self {
            state,
            extra: &query.extra,
        }
    }

    /// Link to `page`, keeping the current view mode.
    #[must_use]
    pub fn page_href(&self, page: u32) -> String {
        self.href(self.state.view, Some(page))
    }

    /// Link switching to `view`; the list keeps the current page, the map drops it.
    #[must_use]
    pub fn toggle_href(&self, view: ViewMode) -> String {
        match view {
            ViewMode::List => self.href(view, Some(self.state.page)),
            ViewMode::Map => self.href(view, None),
        }
    }

    fn href(&self, view: ViewMode, page: Option<u32>) -> String {
        let mut pairs: Vec<String> = self
            .extra
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect();
        pairs.push(format!("view={view}"));
        if let Some(page) = page {
            pairs.push(format!("page={page}"));
        }
        format!("?{}", pairs.join("&"))
    }
}

fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, QUERY_COMPONENT).to_string()
}

/// Decoded `key=value` pairs of a raw query string, in order and with duplicates kept.
///
/// Never fails: a pair without `=` has an empty value and bad escapes are decoded lossily.
pub fn query_pairs(query: &str) -> impl Iterator<Item = (String, String)> + '_ {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
