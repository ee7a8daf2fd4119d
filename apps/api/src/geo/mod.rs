//! Reverse geocoding: coordinates + map zoom → a place name at the right granularity.
//!
//! The provider is a trait so handlers never depend on Nominatim directly.
//! `AppState` holds an `Arc<dyn ReverseGeocoder>`.

pub mod nominatim;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

pub use nominatim::NominatimGeocoder;

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Geocoder returned status {status}")]
    Status { status: u16 },

    #[error("No address found: {0}")]
    NoResult(String),
}

/// Structured address as returned by the geocoding provider.
/// Every field is optional; providers omit whatever they cannot resolve.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AddressDetail {
    pub road: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

/// Level of geographic detail shown for a given map zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Country,
    Region,
    City,
    Street,
}

impl Granularity {
    /// Each tier's upper bound is inclusive: zoom 2 is still `Country`.
    pub fn from_zoom(zoom: f64) -> Self {
        if zoom <= 2.0 {
            Granularity::Country
        } else if zoom <= 5.0 {
            Granularity::Region
        } else if zoom <= 13.0 {
            Granularity::City
        } else {
            Granularity::Street
        }
    }
}

impl AddressDetail {
    /// Joins the fields this granularity shows, most specific first, with ", ".
    /// Missing and blank fields are skipped.
    pub fn display(&self, granularity: Granularity) -> String {
        let fields: &[&Option<String>] = match granularity {
            Granularity::Country => &[&self.country],
            Granularity::Region => &[&self.state, &self.country],
            Granularity::City => &[&self.city, &self.state, &self.country],
            Granularity::Street => &[&self.road, &self.city, &self.state, &self.country],
        };

        fields
            .iter()
            .filter_map(|field| field.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse(&self, lat: f64, lon: f64) -> Result<AddressDetail, GeoError>;
}

/// Resolves a map click into a display string for the given zoom.
pub async fn resolve_location(
    geocoder: &dyn ReverseGeocoder,
    lat: f64,
    lon: f64,
    zoom: f64,
) -> Result<String, GeoError> {
    let address = geocoder.reverse(lat, lon).await?;
    let granularity = Granularity::from_zoom(zoom);
    let shown = address.display(granularity);
    tracing::debug!(?granularity, "Resolved ({lat}, {lon}) to '{shown}'");
    Ok(shown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> AddressDetail {
        AddressDetail {
            road: Some("Rue de Rivoli".to_string()),
            city: Some("Paris".to_string()),
            state: Some("Île-de-France".to_string()),
            country: Some("France".to_string()),
        }
    }

    #[test]
    fn test_zoom_tier_boundaries_are_inclusive() {
        assert_eq!(Granularity::from_zoom(0.0), Granularity::Country);
        assert_eq!(Granularity::from_zoom(2.0), Granularity::Country);
        assert_eq!(Granularity::from_zoom(3.0), Granularity::Region);
        assert_eq!(Granularity::from_zoom(5.0), Granularity::Region);
        assert_eq!(Granularity::from_zoom(6.0), Granularity::City);
        assert_eq!(Granularity::from_zoom(13.0), Granularity::City);
        assert_eq!(Granularity::from_zoom(14.0), Granularity::Street);
        assert_eq!(Granularity::from_zoom(2.5), Granularity::Region);
    }

    #[test]
    fn test_low_zoom_shows_only_country() {
        for zoom in [0.0, 1.0, 2.0] {
            assert_eq!(paris().display(Granularity::from_zoom(zoom)), "France");
        }
    }

    #[test]
    fn test_low_zoom_without_country_is_empty() {
        let address = AddressDetail {
            country: None,
            ..paris()
        };
        assert_eq!(address.display(Granularity::Country), "");
    }

    #[test]
    fn test_region_zoom() {
        assert_eq!(paris().display(Granularity::Region), "Île-de-France, France");
    }

    #[test]
    fn test_city_zoom_skips_missing_fields() {
        for zoom in [6.0, 10.0, 13.0] {
            assert_eq!(
                paris().display(Granularity::from_zoom(zoom)),
                "Paris, Île-de-France, France"
            );
        }

        let no_state = AddressDetail {
            state: None,
            ..paris()
        };
        assert_eq!(no_state.display(Granularity::City), "Paris, France");

        let blank_city = AddressDetail {
            city: Some("  ".to_string()),
            ..paris()
        };
        assert_eq!(blank_city.display(Granularity::City), "Île-de-France, France");
    }

    #[test]
    fn test_street_zoom_includes_road() {
        assert_eq!(
            paris().display(Granularity::Street),
            "Rue de Rivoli, Paris, Île-de-France, France"
        );
    }

    #[test]
    fn test_address_decodes_with_unknown_and_missing_fields() {
        let raw = r#"{"road":"Main St","postcode":"12345","country":"Narnia"}"#;
        let address: AddressDetail = serde_json::from_str(raw).unwrap();
        assert_eq!(address.road.as_deref(), Some("Main St"));
        assert!(address.city.is_none());
        assert_eq!(address.display(Granularity::Street), "Main St, Narnia");
    }

    struct Fixed(AddressDetail);

    #[async_trait]
    impl ReverseGeocoder for Fixed {
        async fn reverse(&self, _lat: f64, _lon: f64) -> Result<AddressDetail, GeoError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_resolve_location_applies_granularity() {
        let geocoder = Fixed(paris());
        let shown = resolve_location(&geocoder, 48.85, 2.35, 4.0).await.unwrap();
        assert_eq!(shown, "Île-de-France, France");
    }
}
