//! Map widget adapter
//!
//! Turns a geocoded location into something a terminal user can open:
//! a Google Static Maps image URL or an OpenStreetMap browse link.

use std::fmt;
use std::str::FromStr;
use crate::config::MapConfig;
use crate::models::LatLng;
use crate::utils::errors::{BookHotelError, Result};

/// Zoom level of the hotel detail map
pub const DEFAULT_ZOOM: u8 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapType {
    #[default]
    Roadmap,
    Satellite,
    Hybrid,
    Terrain,
}

impl MapType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapType::Roadmap => "roadmap",
            MapType::Satellite => "satellite",
            MapType::Hybrid => "hybrid",
            MapType::Terrain => "terrain",
        }
    }
}

impl FromStr for MapType {
    type Err = BookHotelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "roadmap" => Ok(MapType::Roadmap),
            "satellite" => Ok(MapType::Satellite),
            "hybrid" => Ok(MapType::Hybrid),
            "terrain" => Ok(MapType::Terrain),
            other => Err(BookHotelError::InvalidInput(format!("Unknown map type: {}", other))),
        }
    }
}

impl fmt::Display for MapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the hotel detail screen shows on its map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
    pub map_type: MapType,
}

impl MapView {
    /// Roadmap centered on `center` at the default zoom
    pub fn centered(center: LatLng) -> Self {
        Self {
            center,
            zoom: DEFAULT_ZOOM,
            map_type: MapType::Roadmap,
        }
    }

    /// Apply configured zoom and map type
    pub fn with_config(center: LatLng, config: &MapConfig) -> Result<Self> {
        Ok(Self {
            center,
            zoom: config.zoom,
            map_type: config.map_type.parse()?,
        })
    }
}

/// Renders a map view to a displayable reference
pub trait MapRenderer: Send + Sync {
    fn render(&self, view: &MapView) -> String;
}

/// Google Static Maps image URL with a marker on the center
#[derive(Debug, Clone)]
pub struct StaticMapRenderer {
    pub base_url: String,
    pub api_key: Option<String>,
    pub width: u32,
    pub height: u32,
}

impl MapRenderer for StaticMapRenderer {
    fn render(&self, view: &MapView) -> String {
        let center = view.center.to_string();
        let mut url = format!(
            "{}?center={}&zoom={}&size={}x{}&maptype={}&markers={}",
            self.base_url,
            center,
            view.zoom,
            self.width,
            self.height,
            view.map_type,
            urlencoding::encode(&format!("color:red|{}", center)),
        );
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.is_empty()) {
            url.push_str(&format!("&key={}", urlencoding::encode(key)));
        }
        url
    }
}

/// OpenStreetMap browse link with a marker
#[derive(Debug, Clone, Default)]
pub struct OpenStreetMapRenderer;

impl MapRenderer for OpenStreetMapRenderer {
    fn render(&self, view: &MapView) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={lat:.6}&mlon={lng:.6}#map={zoom}/{lat:.6}/{lng:.6}",
            lat = view.center.lat,
            lng = view.center.lng,
            zoom = view.zoom,
        )
    }
}

/// Pick the renderer named by the configuration
pub fn renderer_for(config: &MapConfig) -> Result<Box<dyn MapRenderer>> {
    match config.provider.as_str() {
        "google_static" => Ok(Box::new(StaticMapRenderer {
            base_url: config.static_map_url.clone(),
            api_key: config.api_key.clone(),
            width: config.width,
            height: config.height,
        })),
        "openstreetmap" => Ok(Box::new(OpenStreetMapRenderer)),
        other => Err(BookHotelError::Config(format!("Unknown map provider: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn portland() -> LatLng {
        LatLng { lat: 43.6563, lng: -70.2484 }
    }

    #[test]
    fn test_default_view() {
        let view = MapView::centered(portland());
        assert_eq!(view.zoom, 10);
        assert_eq!(view.map_type, MapType::Roadmap);
    }

    #[test]
    fn test_view_from_config() {
        let mut config = Settings::default().map;
        config.zoom = 15;
        config.map_type = "Satellite".to_string();
        let view = MapView::with_config(portland(), &config).unwrap();
        assert_eq!(view.zoom, 15);
        assert_eq!(view.map_type, MapType::Satellite);

        config.map_type = "street".to_string();
        assert!(MapView::with_config(portland(), &config).is_err());
    }

    #[test]
    fn test_openstreetmap_link() {
        let link = OpenStreetMapRenderer.render(&MapView::centered(portland()));
        assert_eq!(
            link,
            "https://www.openstreetmap.org/?mlat=43.656300&mlon=-70.248400#map=10/43.656300/-70.248400"
        );
    }

    #[test]
    fn test_static_map_url() {
        let mut config = Settings::default().map;
        config.provider = "google_static".to_string();
        config.api_key = Some("k3y".to_string());
        let renderer = renderer_for(&config).unwrap();
        let url = renderer.render(&MapView::centered(portland()));
        assert!(url.starts_with("https://maps.googleapis.com/maps/api/staticmap?center=43.656300,-70.248400&zoom=10&size=600x400&maptype=roadmap"));
        assert!(url.contains("markers=color%3Ared%7C43.656300%2C-70.248400"));
        assert!(url.ends_with("&key=k3y"));
    }

    #[test]
    fn test_unknown_provider() {
        let mut config = Settings::default().map;
        config.provider = "bing".to_string();
        assert!(renderer_for(&config).is_err());
    }
}
