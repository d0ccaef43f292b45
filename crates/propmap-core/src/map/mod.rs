//! Map view model: clustered marker features and the selection state machine.

pub mod cluster;
pub mod marker;
pub mod selection;

use serde::Serialize;

use crate::catalog::Catalog;
use crate::property::PropertyId;

pub use cluster::{Bounds, ClusterOptions, GeoPoint, MAX_ZOOM};
pub use marker::MarkerIcon;
pub use selection::{MapEffect, MapEvent, MapSession, NoRevealSurface, RevealSurface, Selection};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapFeature {
    Marker(MarkerFeature),
    Cluster(ClusterFeature),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerFeature {
    pub id: PropertyId,
    pub lat: f64,
    pub lon: f64,
    pub icon: MarkerIcon,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterFeature {
    pub count: usize,
    pub lat: f64,
    pub lon: f64,
    pub member_ids: Vec<PropertyId>,
    pub expansion: Expansion,
}

/// How a cluster opens when clicked.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Expansion {
    Zoom { zoom: u8 },
    /// Members overlap even at max zoom and are fanned out instead.
    Spiderfy { legs: Vec<MarkerFeature> },
}

/// Clusters the whole catalog at `zoom` and keeps what falls inside `bounds`.
///
/// Clusters whose centroid lies outside the viewport padded by the cluster
/// radius are not returned; `None` bounds keep everything.
#[must_use]
pub fn build_features(
    catalog: &Catalog,
    session: &MapSession<'_>,
    zoom: u8,
    bounds: Option<&Bounds>,
    options: &ClusterOptions,
) -> Vec<MapFeature> {
    let zoom = zoom.min(options.max_zoom);
    let markers: Vec<(PropertyId, GeoPoint)> = catalog
        .iter()
        .map(|p| {
            (
                p.id,
                GeoPoint {
                    lat: p.latitude,
                    lon: p.longitude,
                },
            )
        })
        .collect();

    let marker_feature = |id: PropertyId, point: GeoPoint| -> Option<MarkerFeature> {
        let property = catalog.find(id)?;
        Some(MarkerFeature {
            id,
            lat: point.lat,
            lon: point.lon,
            icon: MarkerIcon::for_property(property, session.is_selected(id)),
        })
    };

    let visible = bounds.map(|b| b.padded(zoom, options.radius_px));
    cluster::cluster_markers(&markers, zoom, options)
        .into_iter()
        .filter(|c| visible.is_none_or(|b| b.contains(c.center)))
        .filter_map(|c| {
            if c.count() == 1 {
                let (id, point) = c.members[0];
                return marker_feature(id, point).map(MapFeature::Marker);
            }
            let expansion = match cluster::expansion_zoom(&c, zoom, options) {
                Some(zoom) => Expansion::Zoom { zoom },
                None => Expansion::Spiderfy {
                    legs: cluster::spiderfy(&c, zoom)
                        .into_iter()
                        .filter_map(|(id, point)| marker_feature(id, point))
                        .collect(),
                },
            };
            Some(MapFeature::Cluster(ClusterFeature {
                count: c.count(),
                lat: c.center.lat,
                lon: c.center.lon,
                member_ids: c.member_ids(),
                expansion,
            }))
        })
        .collect()
}
