//! Pixel-radius marker clustering over a Web-Mercator projection.
//!
//! Markers are projected to pixel space at the requested zoom and grouped in a
//! single greedy pass: each marker joins the first cluster whose seed is within
//! the radius, otherwise it seeds a new one. Catalog order decides the seeds, so
//! the result is deterministic for a given catalog and zoom.

use std::f64::consts::PI;

use serde::Serialize;

use crate::property::PropertyId;

pub const MAX_ZOOM: u8 = 18;
pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the square Web-Mercator world.
const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

/// Spacing between spiderfied markers along the circle, in pixels.
const SPIDER_FOOT_SEPARATION: f64 = 25.0;
const SPIDER_START_ANGLE: f64 = PI / 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    fn distance(self, other: PixelPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Visible map area. `west > east` means the viewport crosses the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Grows the bounds by `pad_px` screen pixels on every side at `zoom`.
    ///
    /// Clusters are culled by centroid, so the padding keeps a cluster whose
    /// members reach into the viewport even when its centroid sits just outside.
    #[must_use]
    pub fn padded(&self, zoom: u8, pad_px: f64) -> Bounds {
        let size = world_size(zoom);
        let north_west = project(GeoPoint { lat: self.north, lon: self.west }, zoom);
        let south_east = project(GeoPoint { lat: self.south, lon: self.east }, zoom);
        let mut width = south_east.x - north_west.x;
        if width < 0.0 {
            width += size;
        }

        let north = unproject(PixelPoint { x: 0.0, y: north_west.y - pad_px }, zoom).lat;
        let south = unproject(PixelPoint { x: 0.0, y: south_east.y + pad_px }, zoom).lat;
        if width + 2.0 * pad_px >= size {
            return Bounds { south, west: -180.0, north, east: 180.0 };
        }

        let degrees = pad_px / size * 360.0;
        Bounds {
            south,
            west: wrap_longitude(self.west - degrees),
            north,
            east: wrap_longitude(self.east + degrees),
        }
    }

    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        let lat_ok = point.lat >= self.south && point.lat <= self.north;
        let lon_ok = if self.west <= self.east {
            point.lon >= self.west && point.lon <= self.east
        } else {
            point.lon >= self.west || point.lon <= self.east
        };
        lat_ok && lon_ok
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterOptions {
    pub radius_px: f64,
    pub max_zoom: u8,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            radius_px: 80.0,
            max_zoom: MAX_ZOOM,
        }
    }
}

/// A group of nearby markers. Single-member clusters render as plain markers.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub center: GeoPoint,
    pub members: Vec<(PropertyId, GeoPoint)>,
}

impl Cluster {
    #[must_use]
    pub fn count(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn member_ids(&self) -> Vec<PropertyId> {
        self.members.iter().map(|(id, _)| *id).collect()
    }
}

fn wrap_longitude(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        lon
    } else {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    }
}

fn world_size(zoom: u8) -> f64 {
    TILE_SIZE * 2f64.powi(i32::from(zoom))
}

#[must_use]
pub fn project(point: GeoPoint, zoom: u8) -> PixelPoint {
    let size = world_size(zoom);
    let lat = point.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    let x = (point.lon + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
    PixelPoint { x, y }
}

#[must_use]
pub fn unproject(pixel: PixelPoint, zoom: u8) -> GeoPoint {
    let size = world_size(zoom);
    let lon = pixel.x / size * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * pixel.y / size);
    let lat = n.sinh().atan().to_degrees();
    GeoPoint { lat, lon }
}

/// Groups `markers` at `zoom`, keeping input order within and across clusters.
#[must_use]
pub fn cluster_markers(
    markers: &[(PropertyId, GeoPoint)],
    zoom: u8,
    options: &ClusterOptions,
) -> Vec<Cluster> {
    let zoom = zoom.min(options.max_zoom);
    let mut seeds: Vec<PixelPoint> = Vec::new();
    let mut clusters: Vec<Cluster> = Vec::new();

    for &(id, point) in markers {
        let pixel = project(point, zoom);
        let existing = seeds
            .iter()
            .position(|seed| seed.distance(pixel) <= options.radius_px);
        match existing {
            Some(index) => clusters[index].members.push((id, point)),
            None => {
                seeds.push(pixel);
                clusters.push(Cluster {
                    center: point,
                    members: vec![(id, point)],
                });
            }
        }
    }

    for cluster in &mut clusters {
        cluster.center = centroid(&cluster.members);
    }
    clusters
}

#[allow(clippy::cast_precision_loss)]
fn centroid(members: &[(PropertyId, GeoPoint)]) -> GeoPoint {
    let n = members.len().max(1) as f64;
    let (lat, lon) = members
        .iter()
        .fold((0.0, 0.0), |(lat, lon), (_, p)| (lat + p.lat, lon + p.lon));
    GeoPoint {
        lat: lat / n,
        lon: lon / n,
    }
}

/// First zoom above `zoom` at which the cluster's members no longer merge.
///
/// `None` means they still overlap at max zoom and have to be spiderfied.
#[must_use]
pub fn expansion_zoom(cluster: &Cluster, zoom: u8, options: &ClusterOptions) -> Option<u8> {
    if cluster.count() < 2 {
        return None;
    }
    (zoom.saturating_add(1)..=options.max_zoom)
        .find(|&z| cluster_markers(&cluster.members, z, options).len() > 1)
}

/// Fans cluster members out on a circle around the cluster center.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn spiderfy(cluster: &Cluster, zoom: u8) -> Vec<(PropertyId, GeoPoint)> {
    let count = cluster.count();
    if count < 2 {
        return cluster.members.clone();
    }
    let center = project(cluster.center, zoom);
    let circumference = SPIDER_FOOT_SEPARATION * (2.0 + count as f64);
    let leg_length = circumference / (2.0 * PI);
    let angle_step = 2.0 * PI / count as f64;

    cluster
        .members
        .iter()
        .enumerate()
        .map(|(i, (id, _))| {
            let angle = SPIDER_START_ANGLE + i as f64 * angle_step;
            let foot = PixelPoint {
                x: center.x + leg_length * angle.cos(),
                y: center.y + leg_length * angle.sin(),
            };
            (*id, unproject(foot, zoom))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint { lat, lon }
    }

    #[test]
    fn projection_round_trips() {
        let p = at(12.97, 77.59);
        let back = unproject(project(p, 12), 12);
        assert!((back.lat - p.lat).abs() < 1e-9);
        assert!((back.lon - p.lon).abs() < 1e-9);
    }

    #[test]
    fn origin_projects_to_world_center() {
        let px = project(at(0.0, 0.0), 0);
        assert!((px.x - 128.0).abs() < 1e-9);
        assert!((px.y - 128.0).abs() < 1e-9);
    }

    #[test]
    fn nearby_markers_merge_and_distant_ones_do_not() {
        let markers = vec![
            (1, at(12.970, 77.590)),
            (2, at(12.971, 77.591)),
            (3, at(13.200, 77.900)),
        ];
        let clusters = cluster_markers(&markers, 12, &ClusterOptions::default());
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].member_ids(), vec![1, 2]);
        assert_eq!(clusters[1].member_ids(), vec![3]);
        assert!((clusters[0].center.lat - 12.9705).abs() < 1e-9);
    }

    #[test]
    fn zooming_in_splits_clusters() {
        let markers = vec![(1, at(12.970, 77.590)), (2, at(12.975, 77.595))];
        let options = ClusterOptions::default();
        assert_eq!(cluster_markers(&markers, 10, &options).len(), 1);
        assert_eq!(cluster_markers(&markers, 18, &options).len(), 2);

        let cluster = &cluster_markers(&markers, 10, &options)[0];
        let z = expansion_zoom(cluster, 10, &options).expect("splits before max zoom");
        assert!(z > 10);
        assert_eq!(cluster_markers(&markers, z, &options).len(), 2);
        assert_eq!(cluster_markers(&markers, z - 1, &options).len(), 1);
    }

    #[test]
    fn identical_points_never_split_and_spiderfy() {
        let markers = vec![(1, at(12.97, 77.59)), (2, at(12.97, 77.59)), (3, at(12.97, 77.59))];
        let options = ClusterOptions::default();
        let cluster = &cluster_markers(&markers, 12, &options)[0];
        assert_eq!(expansion_zoom(cluster, 12, &options), None);

        let legs = spiderfy(cluster, MAX_ZOOM);
        assert_eq!(legs.len(), 3);
        let center = project(cluster.center, MAX_ZOOM);
        let expected_leg = SPIDER_FOOT_SEPARATION * 5.0 / (2.0 * PI);
        for (_, point) in &legs {
            let d = project(*point, MAX_ZOOM).distance(center);
            assert!((d - expected_leg).abs() < 1e-6, "leg length {d}");
        }
        assert_ne!(legs[0].1, legs[1].1);
    }

    #[test]
    fn empty_input_gives_no_clusters() {
        assert!(cluster_markers(&[], 12, &ClusterOptions::default()).is_empty());
    }

    #[test]
    fn padded_bounds_grow_by_pixels() {
        let bounds = Bounds {
            south: 12.9,
            west: 77.5,
            north: 13.1,
            east: 77.7,
        };
        let padded = bounds.padded(12, 80.0);
        let degrees = 80.0 / world_size(12) * 360.0;
        assert!((padded.west - (77.5 - degrees)).abs() < 1e-9);
        assert!((padded.east - (77.7 + degrees)).abs() < 1e-9);
        assert!(padded.north > 13.1 && padded.south < 12.9);
        assert!(padded.contains(at(13.1 + degrees / 2.0, 77.7 + degrees / 2.0)));
    }

    #[test]
    fn padded_bounds_wrap_or_cover_the_world() {
        let near_antimeridian = Bounds {
            south: -10.0,
            west: 170.0,
            north: 10.0,
            east: 179.99,
        };
        let padded = near_antimeridian.padded(4, 80.0);
        assert!(padded.west > padded.east);
        assert!(padded.contains(at(0.0, -179.9)));

        let whole = Bounds {
            south: -60.0,
            west: -170.0,
            north: 60.0,
            east: 170.0,
        }
        .padded(0, 80.0);
        assert_eq!((whole.west, whole.east), (-180.0, 180.0));
    }

    #[test]
    fn bounds_contains_handles_antimeridian() {
        let normal = Bounds {
            south: 12.0,
            west: 77.0,
            north: 13.5,
            east: 78.0,
        };
        assert!(normal.contains(at(12.97, 77.59)));
        assert!(!normal.contains(at(12.97, 78.5)));

        let wrapped = Bounds {
            south: -10.0,
            west: 170.0,
            north: 10.0,
            east: -170.0,
        };
        assert!(wrapped.contains(at(0.0, 175.0)));
        assert!(wrapped.contains(at(0.0, -175.0)));
        assert!(!wrapped.contains(at(0.0, 0.0)));
    }
}
