use anyhow::Result;
use geojson::{GeoJson, Geometry, Value};
use std::fs;
use std::path::Path;

use crate::globe::scene::LineString;

/// A broadcast station record. Fixed in-memory sample data, treated as
/// read-only external input; coordinates are assumed well-formed.
#[derive(Clone)]
pub struct Station {
    pub id: &'static str,
    pub name: &'static str,
    pub country: &'static str,
    pub lat_deg: f64,
    pub lon_deg: f64,
    pub description: &'static str,
    pub viewers: u64,
    pub category: &'static str,
    pub is_live: bool,
}

/// The sample broadcast network shown on the globe.
pub fn sample_stations() -> Vec<Station> {
    vec![
        Station {
            id: "tokyo-1",
            name: "Tokyo Central",
            country: "Japan",
            lat_deg: 35.6762,
            lon_deg: 139.6503,
            description: "Round-the-clock news desk covering East Asian markets and technology.",
            viewers: 1_250_000,
            category: "News",
            is_live: true,
        },
        Station {
            id: "nyc-1",
            name: "New York Studio",
            country: "United States",
            lat_deg: 40.7128,
            lon_deg: -74.0060,
            description: "Flagship studio with rolling coverage of finance and culture.",
            viewers: 2_840_000,
            category: "News",
            is_live: true,
        },
        Station {
            id: "london-1",
            name: "London Bureau",
            country: "United Kingdom",
            lat_deg: 51.5074,
            lon_deg: -0.1278,
            description: "European bureau broadcasting politics and live events.",
            viewers: 980_000,
            category: "Politics",
            is_live: true,
        },
        Station {
            id: "sao-paulo-1",
            name: "São Paulo Arena",
            country: "Brazil",
            lat_deg: -23.5505,
            lon_deg: -46.6333,
            description: "Live sports and music from South America's largest city.",
            viewers: 1_640_000,
            category: "Sports",
            is_live: true,
        },
        Station {
            id: "sydney-1",
            name: "Sydney Harbour Cam",
            country: "Australia",
            lat_deg: -33.8688,
            lon_deg: 151.2093,
            description: "Scenic harbour feed with weather and wildlife segments.",
            viewers: 86_000,
            category: "Nature",
            is_live: false,
        },
        Station {
            id: "nairobi-1",
            name: "Nairobi Wildlife",
            country: "Kenya",
            lat_deg: -1.2921,
            lon_deg: 36.8219,
            description: "Safari cameras streaming from the national park at dawn and dusk.",
            viewers: 430_000,
            category: "Nature",
            is_live: true,
        },
        Station {
            id: "mumbai-1",
            name: "Mumbai Studio One",
            country: "India",
            lat_deg: 19.0760,
            lon_deg: 72.8777,
            description: "Entertainment and film coverage from the heart of Bollywood.",
            viewers: 3_120_000,
            category: "Entertainment",
            is_live: true,
        },
        Station {
            id: "reykjavik-1",
            name: "Reykjavik Aurora",
            country: "Iceland",
            lat_deg: 64.1466,
            lon_deg: -21.9426,
            description: "Night-sky camera hunting the northern lights; live when skies are clear.",
            viewers: 54_000,
            category: "Nature",
            is_live: false,
        },
        Station {
            id: "cairo-1",
            name: "Cairo Heritage",
            country: "Egypt",
            lat_deg: 30.0444,
            lon_deg: 31.2357,
            description: "Documentary features and live digs from the Giza plateau.",
            viewers: 210_000,
            category: "Culture",
            is_live: true,
        },
        Station {
            id: "anchorage-1",
            name: "Anchorage Relay",
            country: "United States",
            lat_deg: 61.2181,
            lon_deg: -149.9003,
            description: "Regional relay carrying weather alerts across the Pacific Northwest.",
            viewers: 18_000,
            category: "Weather",
            is_live: false,
        },
    ]
}

/// Load coastline outlines from Natural Earth GeoJSON files if present.
/// Returns an empty Vec when no file loads; callers fall back to the
/// built-in outlines.
pub fn load_coastlines(data_dir: &Path) -> Result<Vec<LineString>> {
    let coastline_files = [
        "ne_110m_coastline.json",
        "natural-earth.json",
        "ne_50m_coastline.json",
    ];

    let mut lines = Vec::new();

    for filename in coastline_files {
        let path = data_dir.join(filename);
        if !path.exists() {
            continue;
        }
        match load_geojson_lines(&path) {
            Ok(mut file_lines) => {
                lines.append(&mut file_lines);
                // One resolution is enough for a spinning globe
                break;
            }
            Err(e) => eprintln!("Warning: Failed to load {}: {}", filename, e),
        }
    }

    Ok(lines)
}

fn load_geojson_lines(path: &Path) -> Result<Vec<LineString>> {
    let content = fs::read_to_string(path)?;
    let geojson: GeoJson = content.parse()?;

    let mut lines = Vec::new();
    process_geojson_lines(&geojson, |line| lines.push(line));
    Ok(lines)
}

/// Process GeoJSON and extract line features
fn process_geojson_lines<F>(geojson: &GeoJson, mut add_line: F)
where
    F: FnMut(LineString),
{
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in &fc.features {
                if let Some(ref geometry) = feature.geometry {
                    process_geometry_lines(geometry, &mut add_line);
                }
            }
        }
        GeoJson::Feature(f) => {
            if let Some(ref geometry) = f.geometry {
                process_geometry_lines(geometry, &mut add_line);
            }
        }
        GeoJson::Geometry(geometry) => {
            process_geometry_lines(geometry, &mut add_line);
        }
    }
}

fn process_geometry_lines<F>(geometry: &Geometry, add_line: &mut F)
where
    F: FnMut(LineString),
{
    match &geometry.value {
        Value::LineString(coords) => {
            add_line(coords.iter().map(|c| (c[0], c[1])).collect());
        }
        Value::MultiLineString(lines) => {
            for coords in lines {
                add_line(coords.iter().map(|c| (c[0], c[1])).collect());
            }
        }
        Value::Polygon(rings) => {
            if let Some(exterior) = rings.first() {
                add_line(exterior.iter().map(|c| (c[0], c[1])).collect());
            }
        }
        Value::MultiPolygon(polygons) => {
            for rings in polygons {
                if let Some(exterior) = rings.first() {
                    add_line(exterior.iter().map(|c| (c[0], c[1])).collect());
                }
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                process_geometry_lines(g, add_line);
            }
        }
        _ => {}
    }
}

/// Simplified continent outlines used when no GeoJSON data is available.
pub fn builtin_coastlines() -> Vec<LineString> {
    vec![
        // North America
        vec![
            (-168.0, 65.0), (-166.0, 60.0), (-141.0, 60.0), (-130.0, 55.0),
            (-125.0, 48.0), (-124.0, 40.0), (-117.0, 32.0), (-110.0, 25.0),
            (-97.0, 25.0), (-97.0, 28.0), (-82.0, 24.0), (-80.0, 25.0),
            (-81.0, 31.0), (-75.0, 35.0), (-70.0, 41.0), (-67.0, 45.0),
            (-65.0, 47.0), (-55.0, 47.0), (-52.0, 47.0), (-55.0, 52.0),
            (-58.0, 55.0), (-64.0, 60.0), (-73.0, 62.0), (-80.0, 63.0),
            (-95.0, 62.0), (-110.0, 68.0), (-130.0, 70.0), (-145.0, 70.0),
            (-168.0, 65.0),
        ],
        // South America
        vec![
            (-80.0, 10.0), (-75.0, 5.0), (-70.0, 5.0), (-60.0, 5.0),
            (-50.0, 0.0), (-35.0, -5.0), (-35.0, -10.0), (-38.0, -15.0),
            (-40.0, -22.0), (-48.0, -25.0), (-55.0, -34.0), (-58.0, -38.0),
            (-65.0, -42.0), (-68.0, -50.0), (-75.0, -52.0), (-75.0, -45.0),
            (-72.0, -40.0), (-72.0, -30.0), (-70.0, -20.0), (-70.0, -15.0),
            (-80.0, -5.0), (-80.0, 0.0), (-80.0, 10.0),
        ],
        // Europe
        vec![
            (-10.0, 36.0), (-5.0, 36.0), (0.0, 38.0), (5.0, 43.0),
            (10.0, 44.0), (15.0, 45.0), (20.0, 40.0), (25.0, 37.0),
            (30.0, 40.0), (35.0, 42.0), (40.0, 43.0), (40.0, 55.0),
            (30.0, 60.0), (25.0, 65.0), (20.0, 70.0), (10.0, 71.0),
            (5.0, 62.0), (5.0, 58.0), (-5.0, 58.0), (-10.0, 52.0),
            (-5.0, 48.0), (-5.0, 43.0), (-10.0, 36.0),
        ],
        // Africa (southern outline)
        vec![
            (-17.0, 15.0), (-15.0, 10.0), (-10.0, 5.0), (0.0, 5.0),
            (10.0, 5.0), (15.0, 0.0), (20.0, -5.0), (25.0, -10.0),
            (35.0, -20.0), (35.0, -25.0), (30.0, -30.0), (20.0, -35.0),
            (18.0, -35.0), (15.0, -30.0), (10.0, -15.0), (10.0, 0.0),
            (5.0, 5.0), (-5.0, 5.0), (-10.0, 10.0), (-17.0, 15.0),
        ],
        // Africa (northern outline) and the Horn
        vec![
            (-17.0, 15.0), (-17.0, 20.0), (-15.0, 28.0), (-5.0, 35.0),
            (10.0, 37.0), (20.0, 33.0), (25.0, 32.0), (35.0, 30.0),
            (35.0, 20.0), (42.0, 12.0), (50.0, 12.0), (45.0, 5.0),
            (35.0, -5.0), (35.0, -20.0),
        ],
        // Asia
        vec![
            (35.0, 42.0), (40.0, 43.0), (50.0, 40.0), (55.0, 37.0),
            (60.0, 25.0), (65.0, 25.0), (70.0, 20.0), (75.0, 15.0),
            (80.0, 8.0), (80.0, 15.0), (88.0, 22.0), (92.0, 22.0),
            (95.0, 16.0), (100.0, 14.0), (105.0, 10.0), (110.0, 20.0),
            (115.0, 22.0), (120.0, 22.0), (122.0, 25.0), (125.0, 30.0),
            (130.0, 35.0), (135.0, 35.0), (140.0, 40.0), (145.0, 45.0),
            (145.0, 50.0), (140.0, 55.0), (135.0, 55.0), (130.0, 52.0),
            (130.0, 43.0), (120.0, 40.0), (110.0, 45.0), (90.0, 50.0),
            (70.0, 55.0), (60.0, 55.0), (50.0, 50.0), (40.0, 43.0),
        ],
        // Australia
        vec![
            (115.0, -20.0), (120.0, -18.0), (130.0, -12.0), (140.0, -12.0),
            (145.0, -15.0), (150.0, -25.0), (153.0, -30.0), (150.0, -35.0),
            (145.0, -38.0), (140.0, -38.0), (135.0, -35.0), (130.0, -32.0),
            (125.0, -32.0), (115.0, -35.0), (115.0, -25.0), (115.0, -20.0),
        ],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_stations_have_valid_coordinates() {
        for s in sample_stations() {
            assert!((-90.0..=90.0).contains(&s.lat_deg), "{} latitude", s.id);
            assert!((-180.0..=180.0).contains(&s.lon_deg), "{} longitude", s.id);
        }
    }

    #[test]
    fn test_station_ids_unique() {
        let stations = sample_stations();
        let ids: HashSet<_> = stations.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), stations.len());
    }

    #[test]
    fn test_both_hemispheres_covered() {
        let stations = sample_stations();
        assert!(stations.iter().any(|s| s.lat_deg > 0.0));
        assert!(stations.iter().any(|s| s.lat_deg < 0.0));
        assert!(stations.iter().any(|s| s.is_live));
        assert!(stations.iter().any(|s| !s.is_live));
    }

    #[test]
    fn test_builtin_coastlines_in_range() {
        for line in builtin_coastlines() {
            assert!(line.len() >= 2);
            for (lon, lat) in line {
                assert!((-180.0..=180.0).contains(&lon));
                assert!((-90.0..=90.0).contains(&lat));
            }
        }
    }

    #[test]
    fn test_missing_data_dir_yields_empty() {
        let lines = load_coastlines(Path::new("/nonexistent")).unwrap();
        assert!(lines.is_empty());
    }
}
