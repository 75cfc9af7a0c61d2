// External data providers
// NASA NeoWs, the USGS earthquake catalog and the NASA near-Earth comet catalog

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use tracing::debug;

use crate::config::ServiceConfig;
use crate::error::ProviderError;

fn http_client(config: &ServiceConfig) -> Result<reqwest::Client, ProviderError> {
    Ok(reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()?)
}

async fn get_text(
    client: &reqwest::Client,
    provider: &'static str,
    url: &str,
    query: &[(&str, String)],
) -> Result<String, ProviderError> {
    debug!(provider, url, "provider request");

    let response = client.get(url).query(query).send().await?;

    if !response.status().is_success() {
        return Err(ProviderError::Status {
            provider,
            status: response.status(),
        });
    }

    Ok(response.text().await?)
}

async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    provider: &'static str,
    url: &str,
    query: &[(&str, String)],
) -> Result<T, ProviderError> {
    let body = get_text(client, provider, url, query).await?;
    serde_json::from_str(&body).map_err(|e| ProviderError::Payload {
        provider,
        reason: e.to_string(),
    })
}

// =============================================================================
// NASA NeoWs
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeoWsFeed {
    pub element_count: Option<i32>,
    #[serde(default)]
    pub near_earth_objects: HashMap<String, Vec<NeoObject>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeoObject {
    pub id: String,
    pub name: String,
    pub estimated_diameter: Option<EstimatedDiameter>,
    #[serde(default)]
    pub is_potentially_hazardous_asteroid: bool,
    #[serde(default)]
    pub close_approach_data: Vec<CloseApproachData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimatedDiameter {
    pub meters: Option<DiameterRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseApproachData {
    pub close_approach_date: Option<String>,
    pub relative_velocity: Option<RelativeVelocity>,
    pub miss_distance: Option<MissDistance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelativeVelocity {
    pub kilometers_per_second: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissDistance {
    pub kilometers: Option<String>,
}

/// Hazardous object summarised for the featured list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeaturedAsteroid {
    pub id: String,
    pub name: String,
    pub diameter_min: f64,
    pub diameter_max: f64,
    /// km/s
    pub velocity: f64,
    /// km
    pub miss_distance: f64,
    pub close_approach_date: Option<String>,
    pub is_hazardous: bool,
}

impl NeoObject {
    fn to_featured(&self) -> FeaturedAsteroid {
        let diameter = self.estimated_diameter.as_ref().and_then(|d| d.meters.as_ref());
        let approach = self.close_approach_data.first();

        FeaturedAsteroid {
            id: self.id.clone(),
            name: self.name.clone(),
            diameter_min: diameter.map(|m| m.estimated_diameter_min).unwrap_or(0.0),
            diameter_max: diameter.map(|m| m.estimated_diameter_max).unwrap_or(0.0),
            velocity: approach
                .and_then(|ca| ca.relative_velocity.as_ref())
                .and_then(|v| v.kilometers_per_second.as_ref())
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.0),
            miss_distance: approach
                .and_then(|ca| ca.miss_distance.as_ref())
                .and_then(|m| m.kilometers.as_ref())
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.0),
            close_approach_date: approach.and_then(|ca| ca.close_approach_date.clone()),
            is_hazardous: self.is_potentially_hazardous_asteroid,
        }
    }
}

/// Potentially hazardous objects of a feed, closest approach first
pub fn featured_from_feed(feed: &NeoWsFeed, limit: usize) -> Vec<FeaturedAsteroid> {
    let mut featured: Vec<FeaturedAsteroid> = feed
        .near_earth_objects
        .values()
        .flatten()
        .filter(|neo| neo.is_potentially_hazardous_asteroid)
        .map(NeoObject::to_featured)
        .collect();

    featured.sort_by(|a, b| a.miss_distance.total_cmp(&b.miss_distance));
    featured.truncate(limit);
    featured
}

pub struct NeoWsClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl NeoWsClient {
    const PROVIDER: &'static str = "NASA NeoWs";

    pub fn new(config: &ServiceConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            api_key: config.nasa_api_key.clone(),
            base_url: config.neows_base_url.clone(),
            client: http_client(config)?,
        })
    }

    /// Base URL extended by `segments`, each percent-encoded as a single
    /// path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url, ProviderError> {
        let invalid = |reason: String| ProviderError::InvalidUrl {
            provider: Self::PROVIDER,
            reason,
        };
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        mut query: Vec<(&str, String)>,
    ) -> Result<T, ProviderError> {
        query.push(("api_key", self.api_key.clone()));
        let url = self.endpoint(segments)?;
        get_json(&self.client, Self::PROVIDER, url.as_str(), &query).await
    }

    /// Raw feed of NEOs approaching Earth in a date range
    pub async fn feed_raw(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<serde_json::Value, ProviderError> {
        self.get(&["feed"], feed_query(start_date, end_date)).await
    }

    pub async fn feed(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<NeoWsFeed, ProviderError> {
        self.get(&["feed"], feed_query(start_date, end_date)).await
    }

    /// Fetch a specific NEO by ID
    pub async fn neo(&self, neo_id: &str) -> Result<serde_json::Value, ProviderError> {
        self.get(&["neo", neo_id], Vec::new()).await
    }

    pub async fn stats(&self) -> Result<serde_json::Value, ProviderError> {
        self.get(&["stats"], Vec::new()).await
    }
}

fn feed_query(start_date: NaiveDate, end_date: NaiveDate) -> Vec<(&'static str, String)> {
    vec![
        ("start_date", start_date.format("%Y-%m-%d").to_string()),
        ("end_date", end_date.format("%Y-%m-%d").to_string()),
    ]
}

// =============================================================================
// USGS EARTHQUAKE CATALOG
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeQuery {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub min_magnitude: f64,
    pub max_magnitude: f64,
    pub limit: u32,
    /// Largest events first instead of most recent first
    pub order_by_magnitude: bool,
}

impl EarthquakeQuery {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("format", "geojson".to_string()),
            ("starttime", self.start_date.format("%Y-%m-%d").to_string()),
            ("minmagnitude", self.min_magnitude.to_string()),
            ("maxmagnitude", self.max_magnitude.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(end) = self.end_date {
            params.push(("endtime", end.format("%Y-%m-%d").to_string()));
        }
        if self.order_by_magnitude {
            params.push(("orderby", "magnitude".to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarthquakeEvent {
    pub id: String,
    pub magnitude: Option<f64>,
    pub location: Option<String>,
    pub time: DateTime<Utc>,
    pub longitude: f64,
    pub latitude: f64,
    pub depth_km: f64,
    pub url: Option<String>,
    pub tsunami: bool,
    /// PAGER alert level (green/yellow/orange/red), when issued
    pub alert: Option<String>,
}

/// Source of historical earthquakes
pub trait EarthquakeCatalog {
    fn query_events(
        &self,
        query: &EarthquakeQuery,
    ) -> impl Future<Output = Result<Vec<EarthquakeEvent>, ProviderError>> + Send;
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    id: String,
    properties: FeatureProperties,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    mag: Option<f64>,
    place: Option<String>,
    /// Milliseconds since the Unix epoch
    time: i64,
    url: Option<String>,
    #[serde(default)]
    tsunami: i32,
    alert: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<f64>,
}

impl Feature {
    fn into_event(self) -> Result<EarthquakeEvent, ProviderError> {
        let coordinate = |i: usize| self.geometry.coordinates.get(i).copied().unwrap_or(0.0);
        let time = DateTime::from_timestamp_millis(self.properties.time).ok_or_else(|| {
            ProviderError::Payload {
                provider: UsgsClient::PROVIDER,
                reason: format!("event {} has invalid time {}", self.id, self.properties.time),
            }
        })?;

        Ok(EarthquakeEvent {
            longitude: coordinate(0),
            latitude: coordinate(1),
            depth_km: coordinate(2),
            id: self.id,
            magnitude: self.properties.mag,
            location: self.properties.place,
            time,
            url: self.properties.url,
            tsunami: self.properties.tsunami == 1,
            alert: self.properties.alert,
        })
    }
}

fn parse_feature_collection(body: &str) -> Result<Vec<EarthquakeEvent>, ProviderError> {
    let collection: FeatureCollection =
        serde_json::from_str(body).map_err(|e| ProviderError::Payload {
            provider: UsgsClient::PROVIDER,
            reason: e.to_string(),
        })?;
    collection
        .features
        .into_iter()
        .map(Feature::into_event)
        .collect()
}

pub struct UsgsClient {
    event_url: String,
    client: reqwest::Client,
}

impl UsgsClient {
    const PROVIDER: &'static str = "USGS";

    pub fn new(config: &ServiceConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            event_url: config.usgs_event_url.clone(),
            client: http_client(config)?,
        })
    }
}

impl EarthquakeCatalog for UsgsClient {
    async fn query_events(
        &self,
        query: &EarthquakeQuery,
    ) -> Result<Vec<EarthquakeEvent>, ProviderError> {
        let params = query.to_params();
        let body = get_text(&self.client, Self::PROVIDER, &self.event_url, &params).await?;
        parse_feature_collection(&body)
    }
}

// =============================================================================
// NEAR-EARTH COMETS
// =============================================================================

/// Orbital elements of a near-Earth comet; numeric fields arrive as strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CometRecord {
    pub object_name: String,
    #[serde(default)]
    pub epoch_tdb: Option<String>,
    #[serde(default)]
    pub tp_tdb: Option<String>,
    #[serde(default, with = "lenient_f64")]
    pub e: Option<f64>,
    #[serde(default, with = "lenient_f64")]
    pub i_deg: Option<f64>,
    #[serde(default, with = "lenient_f64")]
    pub w_deg: Option<f64>,
    #[serde(default, with = "lenient_f64")]
    pub node_deg: Option<f64>,
    #[serde(default, with = "lenient_f64")]
    pub q_au_1: Option<f64>,
    #[serde(default, with = "lenient_f64")]
    pub q_au_2: Option<f64>,
    #[serde(default, with = "lenient_f64")]
    pub p_yr: Option<f64>,
    #[serde(default, with = "lenient_f64")]
    pub moid_au: Option<f64>,
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,
    #[serde(default)]
    pub object_id: Option<String>,
}

/// Accepts numbers, numeric strings or null.
mod lenient_f64 {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(match Option::<Raw>::deserialize(d)? {
            Some(Raw::Number(v)) => Some(v),
            Some(Raw::Text(s)) => s.trim().parse().ok(),
            None => None,
        })
    }

    pub fn serialize<S: Serializer>(value: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => s.serialize_some(v),
            None => s.serialize_none(),
        }
    }
}

impl CometRecord {
    fn fallback(name: &str, e: f64, i_deg: f64, q_au: f64, p_yr: f64) -> Self {
        Self {
            object_name: name.to_string(),
            epoch_tdb: None,
            tp_tdb: None,
            e: Some(e),
            i_deg: Some(i_deg),
            w_deg: None,
            node_deg: None,
            q_au_1: Some(q_au),
            q_au_2: None,
            p_yr: Some(p_yr),
            moid_au: None,
            reference: Some("JPL Small-Body Database".to_string()),
            object_id: None,
        }
    }
}

/// Well-known periodic comets served when the catalog is unreachable
pub fn fallback_comets() -> Vec<CometRecord> {
    vec![
        CometRecord::fallback("1P/Halley", 0.967, 162.3, 0.586, 75.3),
        CometRecord::fallback("2P/Encke", 0.848, 11.8, 0.336, 3.3),
        CometRecord::fallback("55P/Tempel-Tuttle", 0.906, 162.5, 0.982, 33.2),
    ]
}

pub trait CometCatalog {
    fn near_earth_comets(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<CometRecord>, ProviderError>> + Send;
}

pub struct NasaCometClient {
    url: String,
    client: reqwest::Client,
}

impl NasaCometClient {
    const PROVIDER: &'static str = "NASA Open Data Portal";

    pub fn new(config: &ServiceConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            url: config.comets_url.clone(),
            client: http_client(config)?,
        })
    }
}

impl CometCatalog for NasaCometClient {
    async fn near_earth_comets(&self, limit: u32) -> Result<Vec<CometRecord>, ProviderError> {
        get_json(
            &self.client,
            Self::PROVIDER,
            &self.url,
            &[("$limit", limit.to_string())],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"{
        "element_count": 3,
        "near_earth_objects": {
            "2025-01-01": [
                {
                    "id": "1",
                    "name": "(2025 AA)",
                    "estimated_diameter": {"meters": {"estimated_diameter_min": 100.0, "estimated_diameter_max": 220.0}},
                    "is_potentially_hazardous_asteroid": true,
                    "close_approach_data": [{
                        "close_approach_date": "2025-01-01",
                        "relative_velocity": {"kilometers_per_second": "12.5"},
                        "miss_distance": {"kilometers": "5000000.0"}
                    }]
                },
                {
                    "id": "2",
                    "name": "(2025 AB)",
                    "is_potentially_hazardous_asteroid": false,
                    "close_approach_data": []
                }
            ],
            "2025-01-02": [
                {
                    "id": "3",
                    "name": "(2025 AC)",
                    "is_potentially_hazardous_asteroid": true,
                    "close_approach_data": [{
                        "close_approach_date": "2025-01-02",
                        "relative_velocity": {"kilometers_per_second": "20.0"},
                        "miss_distance": {"kilometers": "750000.5"}
                    }]
                }
            ]
        }
    }"#;

    #[test]
    fn test_featured_filters_and_sorts() {
        let feed: NeoWsFeed = serde_json::from_str(FEED).unwrap();
        let featured = featured_from_feed(&feed, 10);

        assert_eq!(featured.len(), 2);
        assert_eq!(featured[0].id, "3");
        assert!((featured[0].miss_distance - 750000.5).abs() < 1e-9);
        assert_eq!(featured[0].diameter_max, 0.0);
        assert_eq!(featured[1].id, "1");
        assert!((featured[1].velocity - 12.5).abs() < 1e-12);
        assert_eq!(featured[1].close_approach_date.as_deref(), Some("2025-01-01"));
    }

    #[test]
    fn test_featured_respects_limit() {
        let feed: NeoWsFeed = serde_json::from_str(FEED).unwrap();
        assert_eq!(featured_from_feed(&feed, 1).len(), 1);
    }

    #[test]
    fn test_parse_usgs_feature_collection() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [{
                "id": "us7000abcd",
                "properties": {
                    "mag": 7.1, "place": "100 km S of Somewhere", "time": 1704067200000,
                    "url": "https://earthquake.usgs.gov/x", "tsunami": 1, "alert": "orange"
                },
                "geometry": {"coordinates": [142.3, -3.5, 35.0]}
            }]
        }"#;
        let events = parse_feature_collection(body).unwrap();
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.magnitude, Some(7.1));
        assert!(event.tsunami);
        assert_eq!(event.alert.as_deref(), Some("orange"));
        assert_eq!(event.time.format("%Y-%m-%d").to_string(), "2024-01-01");
        assert!((event.latitude + 3.5).abs() < 1e-12);
        assert!((event.depth_km - 35.0).abs() < 1e-12);
    }

    #[test]
    fn test_earthquake_query_params() {
        let query = EarthquakeQuery {
            start_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            end_date: None,
            min_magnitude: 6.5,
            max_magnitude: 7.5,
            limit: 10,
            order_by_magnitude: true,
        };
        let params = query.to_params();
        assert!(params.contains(&("starttime", "2000-01-01".to_string())));
        assert!(params.contains(&("orderby", "magnitude".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "endtime"));
    }

    #[test]
    fn test_comet_record_parses_string_numbers() {
        let body = r#"[{"object_name": "P/2004 R1 (McNaught)", "e": "0.682", "i_deg": "4.89",
                        "q_au_1": "0.986", "p_yr": "5.48", "ref": "JPL 34"}]"#;
        let comets: Vec<CometRecord> = serde_json::from_str(body).unwrap();
        assert_eq!(comets[0].e, Some(0.682));
        assert_eq!(comets[0].moid_au, None);
        assert_eq!(comets[0].reference.as_deref(), Some("JPL 34"));
    }

    #[test]
    fn test_fallback_comets() {
        let comets = fallback_comets();
        assert_eq!(comets.len(), 3);
        assert_eq!(comets[0].object_name, "1P/Halley");
        assert_eq!(comets[0].q_au_1, Some(0.586));
    }

    #[test]
    fn test_neo_id_stays_one_path_segment() {
        let client = NeoWsClient::new(&ServiceConfig::default()).unwrap();

        let url = client.endpoint(&["neo", "3542519"]).unwrap();
        assert_eq!(url.as_str(), "https://api.nasa.gov/neo/rest/v1/neo/3542519");

        let url = client.endpoint(&["neo", "1?x=y"]).unwrap();
        assert_eq!(url.path(), "/neo/rest/v1/neo/1%3Fx=y");
        assert_eq!(url.query(), None);

        let url = client.endpoint(&["neo", "../stats"]).unwrap();
        assert_eq!(url.path(), "/neo/rest/v1/neo/..%2Fstats");
    }

    #[test]
    fn test_invalid_base_url_is_reported() {
        let config = ServiceConfig {
            neows_base_url: "not a url".to_string(),
            ..ServiceConfig::default()
        };
        let client = NeoWsClient::new(&config).unwrap();
        assert!(matches!(
            client.endpoint(&["stats"]),
            Err(ProviderError::InvalidUrl { .. })
        ));
    }
}
