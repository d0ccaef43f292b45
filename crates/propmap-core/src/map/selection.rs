//! Selected-property state for one map session.
//!
//! `Idle` and `Selected(id)` are the only states. Marker clicks move straight
//! between selections; a background click returns to `Idle`. An id that is not
//! in the catalog always resolves to `Idle`.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::map::cluster::GeoPoint;
use crate::property::{PropertyId, PropertyRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "id", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    Idle,
    Selected(PropertyId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapEvent {
    MarkerClicked(PropertyId),
    BackgroundClicked,
}

impl MapEvent {
    /// Parses the `click` request parameter: `background` or a property id.
    #[must_use]
    pub fn from_param(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw == "background" {
            return Some(MapEvent::BackgroundClicked);
        }
        raw.parse().ok().map(MapEvent::MarkerClicked)
    }
}

/// Side effects the renderer performs after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapEffect {
    /// Animate the viewport to the selected marker.
    PanTo { lat: f64, lon: f64 },
    /// Bring the property's off-map representation into view.
    Reveal { id: PropertyId },
    CancelPan,
}

/// The UI surface holding off-map representations of properties (a results rail, a list).
pub trait RevealSurface {
    /// Returns `true` if the surface has an element for `id` and will bring it into view.
    fn reveal(&mut self, id: PropertyId) -> bool;
}

/// A surface with nothing to reveal.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRevealSurface;

impl RevealSurface for NoRevealSurface {
    fn reveal(&mut self, _id: PropertyId) -> bool {
        false
    }
}

#[derive(Debug, Clone)]
pub struct MapSession<'a> {
    catalog: &'a Catalog,
    selection: Selection,
    target: Option<GeoPoint>,
}

impl<'a> MapSession<'a> {
    #[must_use]
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            selection: Selection::Idle,
            target: None,
        }
    }

    /// Rebuilds a session from a previously selected id; unknown ids give an idle session.
    #[must_use]
    pub fn restore(catalog: &'a Catalog, selected: Option<PropertyId>) -> Self {
        let mut session = Self::new(catalog);
        if let Some(property) = selected.and_then(|id| catalog.find(id)) {
            session.selection = Selection::Selected(property.id);
            session.target = Some(position(property));
        }
        session
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The geographic point the viewport is moving towards, if any.
    #[must_use]
    pub fn target(&self) -> Option<GeoPoint> {
        self.target
    }

    #[must_use]
    pub fn selected_property(&self) -> Option<&'a PropertyRecord> {
        match self.selection {
            Selection::Selected(id) => self.catalog.find(id),
            Selection::Idle => None,
        }
    }

    #[must_use]
    pub fn is_selected(&self, id: PropertyId) -> bool {
        self.selection == Selection::Selected(id)
    }

    /// Applies `event` and returns the effects the renderer should carry out.
    pub fn handle(&mut self, event: MapEvent, surface: &mut dyn RevealSurface) -> Vec<MapEffect> {
        match event {
            MapEvent::MarkerClicked(id) => match self.catalog.find(id) {
                Some(property) => {
                    let point = position(property);
                    self.selection = Selection::Selected(id);
                    self.target = Some(point);

                    let mut effects = vec![MapEffect::PanTo {
                        lat: point.lat,
                        lon: point.lon,
                    }];
                    if surface.reveal(id) {
                        effects.push(MapEffect::Reveal { id });
                    }
                    effects
                }
                None => {
                    tracing::debug!(property_id = id, "ignoring click on unknown property");
                    self.clear()
                }
            },
            MapEvent::BackgroundClicked => self.clear(),
        }
    }

    fn clear(&mut self) -> Vec<MapEffect> {
        let had_target = self.target.take().is_some();
        self.selection = Selection::Idle;
        if had_target {
            vec![MapEffect::CancelPan]
        } else {
            Vec::new()
        }
    }
}

fn position(property: &PropertyRecord) -> GeoPoint {
    GeoPoint {
        lat: property.latitude,
        lon: property.longitude,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::property::fixtures::properties;

    struct Rail {
        ids: HashSet<PropertyId>,
        revealed: Vec<PropertyId>,
    }

    impl RevealSurface for Rail {
        fn reveal(&mut self, id: PropertyId) -> bool {
            if self.ids.contains(&id) {
                self.revealed.push(id);
                true
            } else {
                false
            }
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(properties(5)).unwrap()
    }

    #[test]
    fn marker_click_from_idle_selects_and_pans() {
        let catalog = catalog();
        let mut session = MapSession::new(&catalog);
        let mut rail = Rail {
            ids: [1, 2, 3].into_iter().collect(),
            revealed: Vec::new(),
        };

        let effects = session.handle(MapEvent::MarkerClicked(2), &mut rail);

        assert_eq!(session.selection(), Selection::Selected(2));
        let p = catalog.find(2).unwrap();
        assert_eq!(
            effects,
            vec![
                MapEffect::PanTo {
                    lat: p.latitude,
                    lon: p.longitude
                },
                MapEffect::Reveal { id: 2 },
            ]
        );
        assert_eq!(rail.revealed, vec![2]);
        assert_eq!(session.selected_property().map(|p| p.id), Some(2));
    }

    #[test]
    fn reveal_is_skipped_without_off_map_element() {
        let catalog = catalog();
        let mut session = MapSession::new(&catalog);
        let effects = session.handle(MapEvent::MarkerClicked(4), &mut NoRevealSurface);
        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], MapEffect::PanTo { .. }));
    }

    #[test]
    fn switching_markers_goes_directly_to_new_selection() {
        let catalog = catalog();
        let mut session = MapSession::new(&catalog);
        session.handle(MapEvent::MarkerClicked(1), &mut NoRevealSurface);

        let effects = session.handle(MapEvent::MarkerClicked(3), &mut NoRevealSurface);

        assert_eq!(session.selection(), Selection::Selected(3));
        assert!(!effects.contains(&MapEffect::CancelPan));
        assert!(session.is_selected(3));
        assert!(!session.is_selected(1));
    }

    #[test]
    fn background_click_clears_selection_and_cancels_pan() {
        let catalog = catalog();
        let mut session = MapSession::new(&catalog);
        session.handle(MapEvent::MarkerClicked(1), &mut NoRevealSurface);

        let effects = session.handle(MapEvent::BackgroundClicked, &mut NoRevealSurface);

        assert_eq!(session.selection(), Selection::Idle);
        assert_eq!(effects, vec![MapEffect::CancelPan]);
        assert!(session.target().is_none());
    }

    #[test]
    fn background_click_while_idle_is_a_no_op() {
        let catalog = catalog();
        let mut session = MapSession::new(&catalog);
        let effects = session.handle(MapEvent::BackgroundClicked, &mut NoRevealSurface);
        assert!(effects.is_empty());
        assert_eq!(session.selection(), Selection::Idle);
    }

    #[test]
    fn unknown_marker_resolves_to_idle() {
        let catalog = catalog();
        let mut session = MapSession::new(&catalog);
        session.handle(MapEvent::MarkerClicked(2), &mut NoRevealSurface);

        let effects = session.handle(MapEvent::MarkerClicked(404), &mut NoRevealSurface);

        assert_eq!(session.selection(), Selection::Idle);
        assert_eq!(effects, vec![MapEffect::CancelPan]);
        assert!(session.selected_property().is_none());
    }

    #[test]
    fn restore_with_unknown_id_is_idle() {
        let catalog = catalog();
        assert_eq!(
            MapSession::restore(&catalog, Some(99)).selection(),
            Selection::Idle
        );
        assert_eq!(
            MapSession::restore(&catalog, Some(5)).selection(),
            Selection::Selected(5)
        );
        assert_eq!(MapSession::restore(&catalog, None).selection(), Selection::Idle);
    }

    #[test]
    fn empty_catalog_never_selects() {
        let catalog = Catalog::default();
        let mut session = MapSession::new(&catalog);
        let effects = session.handle(MapEvent::MarkerClicked(1), &mut NoRevealSurface);
        assert!(effects.is_empty());
        assert_eq!(session.selection(), Selection::Idle);
    }

    #[test]
    fn click_param_parsing() {
        assert_eq!(
            MapEvent::from_param("background"),
            Some(MapEvent::BackgroundClicked)
        );
        assert_eq!(MapEvent::from_param(" 12 "), Some(MapEvent::MarkerClicked(12)));
        assert_eq!(MapEvent::from_param("nope"), None);
    }
}
