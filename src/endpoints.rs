// Endpoints - request records, defaults and handlers
// Every handler is an independent function of its parameters; the data
// routes additionally make one provider call. Nothing is cached or stored.

use chrono::{Days, NaiveDate, Utc};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::TAU;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api_client::{
    fallback_comets, featured_from_feed, CometCatalog, CometRecord, EarthquakeCatalog,
    EarthquakeEvent, EarthquakeQuery, FeaturedAsteroid, NasaCometClient, NeoWsClient, UsgsClient,
};
use crate::config::ServiceConfig;
use crate::error::{ApiError, PhysicsError};
use crate::impact_physics::{
    asteroid_defaults, compute_impact, compute_mitigation, equivalent_earthquake,
    AsteroidParams, DeflectionOutcome, ImpactResult, MitigationPlan, MitigationStrategy,
    Recommendation,
};
use crate::physics_engine::{
    centuries_since_j2000, julian_date, julian_day_number, OrbitClass, OrbitalElements,
    OrbitalState, Planet, J2000_JD,
};

// =============================================================================
// APPLICATION STATE
// =============================================================================

/// Process-wide configuration. Read by the data routes, never written by a
/// request.
pub struct AppState {
    pub config: Arc<RwLock<ServiceConfig>>,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    pub fn from_env() -> Self {
        Self::new(ServiceConfig::from_env())
    }

    pub fn set_api_key(&self, key: String) {
        self.config.write().nasa_api_key = key;
    }

    pub fn config(&self) -> ServiceConfig {
        self.config.read().clone()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}

// =============================================================================
// ROUTING
// =============================================================================

pub const ROUTES: [&str; 15] = [
    "health",
    "planetary-positions",
    "keplerian-orbit",
    "orbit-propagator",
    "comet-trajectory",
    "impact",
    "mitigation",
    "impact-seismic-comparison",
    "earthquakes",
    "neo-feed",
    "neo-lookup",
    "neo-stats",
    "featured-asteroids",
    "comets",
    "sample-asteroids",
];

fn parse<T: DeserializeOwned>(params: serde_json::Value) -> Result<T, ApiError> {
    let params = match params {
        serde_json::Value::Null => serde_json::Value::Object(Default::default()),
        other => other,
    };
    Ok(serde_json::from_value(params)?)
}

fn to_json<T: Serialize>(response: T) -> Result<serde_json::Value, ApiError> {
    Ok(serde_json::to_value(response)?)
}

/// Route a request by name. `params` carries the query parameters or JSON
/// body; absent fields take their documented defaults.
pub async fn dispatch(
    state: &AppState,
    route: &str,
    params: serde_json::Value,
) -> Result<serde_json::Value, ApiError> {
    info!(route, "handling request");

    let result = match route {
        "health" => to_json(health(&state.config())),
        "planetary-positions" => to_json(planetary_positions(parse(params)?)?),
        "keplerian-orbit" => to_json(keplerian_orbit(parse(params)?)?),
        "orbit-propagator" => to_json(orbit_propagator(parse(params)?)?),
        "comet-trajectory" => to_json(comet_trajectory(parse(params)?)?),
        "impact" => to_json(impact(parse(params)?)?),
        "mitigation" => to_json(mitigation(parse(params)?)?),
        "impact-seismic-comparison" => {
            let catalog = UsgsClient::new(&state.config())?;
            to_json(impact_seismic_comparison(&catalog, parse(params)?).await?)
        }
        "earthquakes" => {
            let catalog = UsgsClient::new(&state.config())?;
            to_json(earthquakes(&catalog, parse(params)?).await?)
        }
        "neo-feed" => {
            let request: NeoFeedRequest = parse(params)?;
            let (start, end) = request.window()?;
            let client = NeoWsClient::new(&state.config())?;
            Ok(client.feed_raw(start, end).await?)
        }
        "neo-lookup" => {
            let request: NeoLookupRequest = parse(params)?;
            let id = request.id.ok_or(ApiError::MissingParameter("id"))?;
            let client = NeoWsClient::new(&state.config())?;
            Ok(client.neo(&id).await?)
        }
        "neo-stats" => {
            let client = NeoWsClient::new(&state.config())?;
            Ok(client.stats().await?)
        }
        "featured-asteroids" => {
            let client = NeoWsClient::new(&state.config())?;
            to_json(featured_asteroids(&client).await?)
        }
        "comets" => {
            let catalog = NasaCometClient::new(&state.config())?;
            to_json(comets(&catalog).await)
        }
        "sample-asteroids" => to_json(sample_asteroids()),
        other => Err(ApiError::UnknownRoute(other.to_string())),
    };

    if let Err(err) = &result {
        warn!(route, error = %err, "request failed");
    }
    result
}

// =============================================================================
// HEALTH
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: chrono::DateTime<Utc>,
    pub nasa_api_key: &'static str,
}

pub fn health(config: &ServiceConfig) -> HealthResponse {
    HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
        nasa_api_key: if config.uses_demo_key() {
            "using_demo_key"
        } else {
            "configured"
        },
    }
}

// =============================================================================
// PLANETARY POSITIONS
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlanetaryPositionsRequest {
    /// Calendar date (YYYY-MM-DD); today (UTC) when absent
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanetPosition {
    pub distance_au: f64,
    pub x_au: f64,
    pub y_au: f64,
    pub z_au: f64,
    pub true_anomaly_deg: f64,
    pub mean_anomaly_deg: f64,
}

impl From<OrbitalState> for PlanetPosition {
    fn from(state: OrbitalState) -> Self {
        Self {
            distance_au: state.radius_au,
            x_au: state.position.x,
            y_au: state.position.y,
            z_au: state.position.z,
            true_anomaly_deg: state.true_anomaly_deg,
            mean_anomaly_deg: state.mean_anomaly_deg,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanetaryPositionsResponse {
    pub date: NaiveDate,
    pub julian_day: i64,
    pub centuries_since_j2000: f64,
    pub planetary_positions: BTreeMap<Planet, PlanetPosition>,
    pub coordinate_system: &'static str,
    pub reference: &'static str,
}

pub fn planetary_positions(
    request: PlanetaryPositionsRequest,
) -> Result<PlanetaryPositionsResponse, ApiError> {
    let date = request.date.unwrap_or_else(|| Utc::now().date_naive());
    let julian_day = julian_day_number(&date);
    let centuries = centuries_since_j2000(julian_day as f64);

    let planetary_positions = Planet::ALL
        .into_iter()
        .map(|planet| (planet, planet.position(centuries).into()))
        .collect();

    Ok(PlanetaryPositionsResponse {
        date,
        julian_day,
        centuries_since_j2000: centuries,
        planetary_positions,
        coordinate_system: "Heliocentric ecliptic coordinates (AU)",
        reference: "NASA Approximate Positions of the Planets",
    })
}

// =============================================================================
// ORBIT GENERATION
// =============================================================================

/// Upper bound on `num_points` for any generated orbit
pub const MAX_ORBIT_POINTS: usize = 10_000;

/// States evenly spaced in mean anomaly, starting at `start_mean_anomaly`
fn sample_orbit(
    elements: &OrbitalElements,
    start_mean_anomaly: f64,
    num_points: usize,
) -> Result<Vec<OrbitalState>, ApiError> {
    if num_points > MAX_ORBIT_POINTS {
        return Err(ApiError::InvalidParams(format!(
            "num_points must not exceed {}, got {}",
            MAX_ORBIT_POINTS, num_points
        )));
    }

    Ok((0..num_points)
        .map(|i| {
            let m = start_mean_anomaly + TAU * i as f64 / num_points as f64;
            elements.propagated_state(m)
        })
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitPoint {
    pub mean_anomaly: f64,
    pub true_anomaly: f64,
    pub radius_au: f64,
    pub x_au: f64,
    pub y_au: f64,
    pub z_au: f64,
}

impl From<OrbitalState> for OrbitPoint {
    fn from(state: OrbitalState) -> Self {
        Self {
            mean_anomaly: state.mean_anomaly_deg,
            true_anomaly: state.true_anomaly_deg,
            radius_au: state.radius_au,
            x_au: state.position.x,
            y_au: state.position.y,
            z_au: state.position.z,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElementsSummary {
    pub semi_major_axis_au: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub longitude_ascending_node_deg: f64,
    pub argument_periapsis_deg: f64,
}

impl From<&OrbitalElements> for ElementsSummary {
    fn from(el: &OrbitalElements) -> Self {
        Self {
            semi_major_axis_au: el.semi_major_axis,
            eccentricity: el.eccentricity,
            inclination_deg: el.inclination,
            longitude_ascending_node_deg: el.longitude_ascending_node,
            argument_periapsis_deg: el.argument_periapsis,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitProperties {
    pub period_days: f64,
    pub period_years: f64,
    pub perihelion_au: f64,
    pub aphelion_au: f64,
}

impl From<&OrbitalElements> for OrbitProperties {
    fn from(el: &OrbitalElements) -> Self {
        Self {
            period_days: el.period_days(),
            period_years: el.period_years(),
            perihelion_au: el.perihelion_au(),
            aphelion_au: el.aphelion_au(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeplerianOrbitRequest {
    /// AU, required
    pub semi_major_axis: Option<f64>,
    /// required
    pub eccentricity: Option<f64>,
    pub inclination: f64,
    pub longitude_ascending_node: f64,
    pub argument_periapsis: f64,
    pub num_points: usize,
}

impl Default for KeplerianOrbitRequest {
    fn default() -> Self {
        Self {
            semi_major_axis: None,
            eccentricity: None,
            inclination: 0.0,
            longitude_ascending_node: 0.0,
            argument_periapsis: 0.0,
            num_points: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct KeplerianOrbitResponse {
    pub orbital_elements: ElementsSummary,
    pub orbit_properties: OrbitProperties,
    pub orbit_points: Vec<OrbitPoint>,
}

/// One revolution sampled evenly in mean anomaly
pub fn keplerian_orbit(
    request: KeplerianOrbitRequest,
) -> Result<KeplerianOrbitResponse, ApiError> {
    let semi_major_axis = request
        .semi_major_axis
        .ok_or(ApiError::MissingParameter("semi_major_axis"))?;
    let eccentricity = request
        .eccentricity
        .ok_or(ApiError::MissingParameter("eccentricity"))?;

    let elements = OrbitalElements {
        inclination: request.inclination,
        longitude_ascending_node: request.longitude_ascending_node,
        argument_periapsis: request.argument_periapsis,
        ..OrbitalElements::planar(semi_major_axis, eccentricity)
    };
    elements.validate_closed()?;

    let orbit_points = sample_orbit(&elements, 0.0, request.num_points)?
        .into_iter()
        .map(OrbitPoint::from)
        .collect();

    Ok(KeplerianOrbitResponse {
        orbital_elements: (&elements).into(),
        orbit_properties: (&elements).into(),
        orbit_points,
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrbitPropagatorRequest {
    pub semi_major_axis: Option<f64>,
    pub eccentricity: Option<f64>,
    pub inclination: f64,
    pub longitude_ascending_node: f64,
    pub argument_periapsis: f64,
    /// radians
    pub mean_anomaly_epoch: f64,
    pub epoch_jd: f64,
    /// Julian Date to propagate to; now when absent
    pub target_jd: Option<f64>,
    pub num_points: usize,
}

impl Default for OrbitPropagatorRequest {
    fn default() -> Self {
        Self {
            semi_major_axis: None,
            eccentricity: None,
            inclination: 0.0,
            longitude_ascending_node: 0.0,
            argument_periapsis: 0.0,
            mean_anomaly_epoch: 0.0,
            epoch_jd: J2000_JD,
            target_jd: None,
            num_points: 360,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PropagatedElements {
    #[serde(flatten)]
    pub elements: ElementsSummary,
    pub mean_anomaly_epoch_deg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EpochInfo {
    pub epoch_jd: f64,
    pub current_jd: f64,
    pub time_since_epoch_days: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PropagatedProperties {
    pub period_days: f64,
    pub perihelion_au: f64,
    pub aphelion_au: f64,
    pub mean_motion_deg_per_day: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PropagatedPoint {
    pub time_index: usize,
    pub mean_anomaly_deg: f64,
    pub eccentric_anomaly_deg: f64,
    pub true_anomaly_deg: f64,
    pub radius_au: f64,
    pub x_au: f64,
    pub y_au: f64,
    pub z_au: f64,
    pub orbital_velocity_km_s: f64,
    pub orbital_velocity_au_per_day: f64,
    pub converged: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrbitPropagatorResponse {
    pub orbital_elements: PropagatedElements,
    pub epoch_info: EpochInfo,
    pub orbit_properties: PropagatedProperties,
    pub orbit_data: Vec<PropagatedPoint>,
    pub reference: &'static str,
}

/// Advance the mean anomaly from the epoch to the target date, then trace
/// one full revolution from there in 3D.
pub fn orbit_propagator(
    request: OrbitPropagatorRequest,
) -> Result<OrbitPropagatorResponse, ApiError> {
    let semi_major_axis = request
        .semi_major_axis
        .ok_or(ApiError::MissingParameter("semi_major_axis"))?;
    let eccentricity = request
        .eccentricity
        .ok_or(ApiError::MissingParameter("eccentricity"))?;

    let elements = OrbitalElements {
        semi_major_axis,
        eccentricity,
        inclination: request.inclination,
        longitude_ascending_node: request.longitude_ascending_node,
        argument_periapsis: request.argument_periapsis,
        mean_anomaly_epoch: request.mean_anomaly_epoch,
        epoch: request.epoch_jd,
    };
    elements.validate_closed()?;

    let current_jd = request
        .target_jd
        .unwrap_or_else(|| julian_date(&Utc::now()));
    let current_mean_anomaly = elements.mean_anomaly_at(current_jd);

    let orbit_data = sample_orbit(&elements, current_mean_anomaly, request.num_points)?
        .into_iter()
        .enumerate()
        .map(|(time_index, state)| PropagatedPoint {
            time_index,
            mean_anomaly_deg: state.mean_anomaly_deg,
            eccentric_anomaly_deg: state.eccentric_anomaly_deg,
            true_anomaly_deg: state.true_anomaly_deg,
            radius_au: state.radius_au,
            x_au: state.position.x,
            y_au: state.position.y,
            z_au: state.position.z,
            orbital_velocity_km_s: elements.orbital_velocity_km_s(state.radius_au),
            orbital_velocity_au_per_day: elements.orbital_velocity_au_per_day(state.radius_au),
            converged: state.converged,
        })
        .collect();

    Ok(OrbitPropagatorResponse {
        orbital_elements: PropagatedElements {
            elements: (&elements).into(),
            mean_anomaly_epoch_deg: elements.mean_anomaly_epoch.to_degrees(),
        },
        epoch_info: EpochInfo {
            epoch_jd: elements.epoch,
            current_jd,
            time_since_epoch_days: current_jd - elements.epoch,
        },
        orbit_properties: PropagatedProperties {
            period_days: elements.period_days(),
            perihelion_au: elements.perihelion_au(),
            aphelion_au: elements.aphelion_au(),
            mean_motion_deg_per_day: elements.mean_motion().to_degrees(),
        },
        orbit_data,
        reference: "Based on NASA Elliptical Orbit Simulator algorithms",
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CometTrajectoryRequest {
    /// AU, required
    pub perihelion_distance: Option<f64>,
    /// required
    pub eccentricity: Option<f64>,
    pub num_points: usize,
}

impl Default for CometTrajectoryRequest {
    fn default() -> Self {
        Self {
            perihelion_distance: None,
            eccentricity: None,
            num_points: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CometProperties {
    pub perihelion_distance_au: f64,
    /// None for open trajectories
    pub aphelion_distance_au: Option<f64>,
    pub semi_major_axis_au: Option<f64>,
    pub eccentricity: f64,
    pub orbital_period_years: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CometTrajectoryResponse {
    pub comet_properties: CometProperties,
    pub orbit_points: Vec<OrbitPoint>,
    pub classification: &'static str,
}

/// Orbit of a comet described by perihelion distance and eccentricity.
/// Open trajectories are classified but not traced.
pub fn comet_trajectory(
    request: CometTrajectoryRequest,
) -> Result<CometTrajectoryResponse, ApiError> {
    let perihelion = request
        .perihelion_distance
        .ok_or(ApiError::MissingParameter("perihelion_distance"))?;
    let eccentricity = request
        .eccentricity
        .ok_or(ApiError::MissingParameter("eccentricity"))?;

    if perihelion.is_nan() || perihelion <= 0.0 {
        return Err(PhysicsError::NonPositive {
            name: "perihelion_distance",
            value: perihelion,
        }
        .into());
    }
    if eccentricity.is_nan() || eccentricity < 0.0 {
        return Err(PhysicsError::NegativeEccentricity(eccentricity).into());
    }

    if eccentricity >= 1.0 {
        return Ok(CometTrajectoryResponse {
            comet_properties: CometProperties {
                perihelion_distance_au: perihelion,
                aphelion_distance_au: None,
                semi_major_axis_au: None,
                eccentricity,
                orbital_period_years: None,
            },
            orbit_points: Vec::new(),
            classification: OrbitClass::Hyperbolic.label(),
        });
    }

    let elements = OrbitalElements::planar(perihelion / (1.0 - eccentricity), eccentricity);
    let orbit_points = sample_orbit(&elements, 0.0, request.num_points)?
        .into_iter()
        .map(OrbitPoint::from)
        .collect();

    Ok(CometTrajectoryResponse {
        comet_properties: CometProperties {
            perihelion_distance_au: perihelion,
            aphelion_distance_au: Some(elements.aphelion_au()),
            semi_major_axis_au: Some(elements.semi_major_axis),
            eccentricity,
            orbital_period_years: Some(elements.period_years()),
        },
        orbit_points,
        classification: elements.classify().label(),
    })
}

// =============================================================================
// IMPACT AND MITIGATION
// =============================================================================

pub fn impact(asteroid: AsteroidParams) -> Result<ImpactResult, ApiError> {
    Ok(compute_impact(&asteroid)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    #[default]
    KineticImpactor,
    GravityTractor,
    LaserAblation,
    Nuclear,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MitigationRequest {
    /// m
    pub diameter: f64,
    /// km/s
    pub velocity: f64,
    /// kg/m³
    pub density: f64,
    pub strategy: StrategyKind,
    /// years
    pub warning_time: f64,
    /// years between intervention and predicted impact
    pub deflection_time: f64,
    /// kg
    pub impactor_mass: f64,
    /// km/s
    pub impactor_velocity: f64,
    /// kg
    pub spacecraft_mass: f64,
    /// W
    pub laser_power: f64,
    /// Mt
    pub nuclear_yield: f64,
}

impl Default for MitigationRequest {
    fn default() -> Self {
        Self {
            diameter: asteroid_defaults::DIAMETER_M,
            velocity: asteroid_defaults::VELOCITY_KM_S,
            density: asteroid_defaults::DENSITY_KG_M3,
            strategy: StrategyKind::default(),
            warning_time: 10.0,
            deflection_time: 5.0,
            impactor_mass: 1000.0,
            impactor_velocity: 10.0,
            spacecraft_mass: 20000.0,
            laser_power: 1e6,
            nuclear_yield: 1.0,
        }
    }
}

impl MitigationRequest {
    /// Keep only the parameters the selected strategy uses
    pub fn selected_strategy(&self) -> MitigationStrategy {
        match self.strategy {
            StrategyKind::KineticImpactor => MitigationStrategy::KineticImpactor {
                impactor_mass_kg: self.impactor_mass,
                impactor_velocity_km_s: self.impactor_velocity,
            },
            StrategyKind::GravityTractor => MitigationStrategy::GravityTractor {
                spacecraft_mass_kg: self.spacecraft_mass,
            },
            StrategyKind::LaserAblation => MitigationStrategy::LaserAblation {
                laser_power_w: self.laser_power,
            },
            StrategyKind::Nuclear => MitigationStrategy::Nuclear {
                yield_megatons: self.nuclear_yield,
            },
        }
    }

    pub fn plan(&self) -> MitigationPlan {
        MitigationPlan {
            asteroid: AsteroidParams {
                diameter: self.diameter,
                velocity: self.velocity,
                density: self.density,
                ..AsteroidParams::default()
            },
            strategy: self.selected_strategy(),
            warning_time_years: self.warning_time,
            deflection_time_years: self.deflection_time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MitigationParameters {
    pub warning_time_years: f64,
    pub deflection_time_years: f64,
    pub asteroid_mass_kg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MitigationResponse {
    pub strategy: StrategyKind,
    pub strategy_parameters: MitigationStrategy,
    pub parameters: MitigationParameters,
    pub results: DeflectionOutcome,
    pub recommendation: Recommendation,
}

pub fn mitigation(request: MitigationRequest) -> Result<MitigationResponse, ApiError> {
    let plan = request.plan();
    let outcome = compute_mitigation(&plan)?;

    Ok(MitigationResponse {
        strategy: request.strategy,
        strategy_parameters: plan.strategy,
        parameters: MitigationParameters {
            warning_time_years: plan.warning_time_years,
            deflection_time_years: plan.deflection_time_years,
            asteroid_mass_kg: outcome.asteroid_mass_kg,
        },
        results: outcome.results,
        recommendation: outcome.recommendation,
    })
}

// =============================================================================
// SEISMIC
// =============================================================================

/// Start of the catalog window searched for comparable earthquakes
const HISTORICAL_CATALOG_START: NaiveDate = match NaiveDate::from_ymd_opt(2000, 1, 1) {
    Some(date) => date,
    None => panic!("invalid catalog start date"),
};
const SIMILAR_EVENT_LIMIT: u32 = 10;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeismicComparisonRequest {
    /// required
    pub energy_megatons: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactEnergySummary {
    pub megatons: f64,
    pub joules: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquivalentEarthquakeSummary {
    /// Rounded to one decimal
    pub magnitude: f64,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalEvent {
    pub magnitude: Option<f64>,
    pub location: Option<String>,
    pub date: String,
    /// PAGER alert level, or "unknown"
    pub casualties: String,
    pub tsunami: bool,
}

impl From<EarthquakeEvent> for HistoricalEvent {
    fn from(event: EarthquakeEvent) -> Self {
        Self {
            magnitude: event.magnitude,
            location: event.location,
            date: event.time.format("%Y-%m-%d").to_string(),
            casualties: event.alert.unwrap_or_else(|| "unknown".to_string()),
            tsunami: event.tsunami,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeismicEffects {
    pub felt_radius_km: f64,
    pub damage_radius_km: f64,
    pub intensity_description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeismicComparisonResponse {
    pub impact_energy: ImpactEnergySummary,
    pub equivalent_earthquake: EquivalentEarthquakeSummary,
    pub similar_historical_events: Vec<HistoricalEvent>,
    pub seismic_effects: SeismicEffects,
}

/// Put an impact on the earthquake scale and look up real quakes of
/// similar size.
pub async fn impact_seismic_comparison<C: EarthquakeCatalog>(
    catalog: &C,
    request: SeismicComparisonRequest,
) -> Result<SeismicComparisonResponse, ApiError> {
    let energy_megatons = request
        .energy_megatons
        .ok_or(ApiError::MissingParameter("energy_megatons"))?;
    let quake = equivalent_earthquake(energy_megatons)?;

    let query = EarthquakeQuery {
        start_date: HISTORICAL_CATALOG_START,
        end_date: None,
        min_magnitude: quake.min_magnitude,
        max_magnitude: quake.max_magnitude,
        limit: SIMILAR_EVENT_LIMIT,
        order_by_magnitude: true,
    };
    let events = catalog.query_events(&query).await?;

    Ok(SeismicComparisonResponse {
        impact_energy: ImpactEnergySummary {
            megatons: quake.energy_megatons,
            joules: quake.energy_joules,
        },
        equivalent_earthquake: EquivalentEarthquakeSummary {
            magnitude: (quake.magnitude * 10.0).round() / 10.0,
            description: quake.intensity_description,
        },
        similar_historical_events: events.into_iter().map(HistoricalEvent::from).collect(),
        seismic_effects: SeismicEffects {
            felt_radius_km: quake.felt_radius_km,
            damage_radius_km: quake.damage_radius_km,
            intensity_description: quake.intensity_description,
        },
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EarthquakesRequest {
    pub magnitude_min: f64,
    pub magnitude_max: f64,
    pub limit: u32,
    pub days_back: u64,
}

impl Default for EarthquakesRequest {
    fn default() -> Self {
        Self {
            magnitude_min: 6.0,
            magnitude_max: 9.0,
            limit: 100,
            days_back: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarthquakeQueryEcho {
    pub magnitude_range: String,
    pub days_back: u64,
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EarthquakesResponse {
    pub count: usize,
    pub earthquakes: Vec<EarthquakeEvent>,
    pub query_params: EarthquakeQueryEcho,
}

/// Recent significant earthquakes
pub async fn earthquakes<C: EarthquakeCatalog>(
    catalog: &C,
    request: EarthquakesRequest,
) -> Result<EarthquakesResponse, ApiError> {
    let today = Utc::now().date_naive();
    let start_date = today
        .checked_sub_days(Days::new(request.days_back))
        .ok_or_else(|| {
            ApiError::InvalidParams(format!("days_back {} out of range", request.days_back))
        })?;

    let query = EarthquakeQuery {
        start_date,
        end_date: Some(today),
        min_magnitude: request.magnitude_min,
        max_magnitude: request.magnitude_max,
        limit: request.limit,
        order_by_magnitude: false,
    };
    let earthquakes = catalog.query_events(&query).await?;

    Ok(EarthquakesResponse {
        count: earthquakes.len(),
        earthquakes,
        query_params: EarthquakeQueryEcho {
            magnitude_range: format!("{}-{}", request.magnitude_min, request.magnitude_max),
            days_back: request.days_back,
            limit: request.limit,
        },
    })
}

// =============================================================================
// NEAR-EARTH OBJECTS AND COMETS
// =============================================================================

const FEATURED_WINDOW_DAYS: u64 = 7;
const FEATURED_LIMIT: usize = 10;
const COMET_LIMIT: u32 = 50;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NeoFeedRequest {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl NeoFeedRequest {
    /// Defaults to today and the seven days after the start date
    pub fn window(&self) -> Result<(NaiveDate, NaiveDate), ApiError> {
        let start = self.start_date.unwrap_or_else(|| Utc::now().date_naive());
        let end = match self.end_date {
            Some(end) => end,
            None => start
                .checked_add_days(Days::new(FEATURED_WINDOW_DAYS))
                .ok_or_else(|| {
                    ApiError::InvalidParams(format!("start_date {} out of range", start))
                })?,
        };
        Ok((start, end))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NeoLookupRequest {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeaturedResponse {
    pub count: usize,
    pub asteroids: Vec<FeaturedAsteroid>,
}

/// Closest potentially hazardous asteroids of the coming week
pub async fn featured_asteroids(client: &NeoWsClient) -> Result<FeaturedResponse, ApiError> {
    let (start, end) = NeoFeedRequest::default().window()?;
    let feed = client.feed(start, end).await?;
    let asteroids = featured_from_feed(&feed, FEATURED_LIMIT);

    Ok(FeaturedResponse {
        count: asteroids.len(),
        asteroids,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct CometsResponse {
    pub count: usize,
    pub comets: Vec<CometRecord>,
    pub data_source: &'static str,
    pub description: &'static str,
    pub coordinate_system: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Near-Earth comet elements; falls back to a fixed list when the catalog
/// cannot be reached.
pub async fn comets<C: CometCatalog>(catalog: &C) -> CometsResponse {
    match catalog.near_earth_comets(COMET_LIMIT).await {
        Ok(comets) => CometsResponse {
            count: comets.len(),
            comets,
            data_source: "NASA Open Data Portal - Near-Earth Comets",
            description: "Keplerian orbital elements for near-Earth comets",
            coordinate_system: "Heliocentric ecliptic coordinates",
            note: None,
        },
        Err(err) => {
            warn!(error = %err, "comet catalog unavailable, serving fallback list");
            let comets = fallback_comets();
            CometsResponse {
                count: comets.len(),
                comets,
                data_source: "Demo Data (NASA API unavailable)",
                description: "Famous comets - fallback data",
                coordinate_system: "Heliocentric ecliptic coordinates",
                note: Some(format!("Comet catalog unavailable: {}", err)),
            }
        }
    }
}

// =============================================================================
// SAMPLE SCENARIOS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleAsteroid {
    pub id: &'static str,
    pub name: &'static str,
    pub diameter: f64,
    pub velocity: f64,
    pub density: f64,
    pub approach_angle: f64,
    pub description: &'static str,
}

impl SampleAsteroid {
    pub fn params(&self) -> AsteroidParams {
        AsteroidParams {
            diameter: self.diameter,
            velocity: self.velocity,
            density: self.density,
            angle: self.approach_angle,
        }
    }
}

pub const SAMPLE_ASTEROIDS: [SampleAsteroid; 5] = [
    SampleAsteroid {
        id: "sample_1",
        name: "Impactor-2025 (Hypothetical)",
        diameter: 300.0,
        velocity: 20.0,
        density: 3000.0,
        approach_angle: 45.0,
        description: "A hypothetical 300m asteroid approaching at 20 km/s",
    },
    SampleAsteroid {
        id: "sample_2",
        name: "City Killer (Hypothetical)",
        diameter: 150.0,
        velocity: 25.0,
        density: 2500.0,
        approach_angle: 30.0,
        description: "A smaller but faster asteroid capable of destroying a city",
    },
    SampleAsteroid {
        id: "sample_3",
        name: "Tunguska-Class",
        diameter: 60.0,
        velocity: 15.0,
        density: 2000.0,
        approach_angle: 20.0,
        description: "Similar to the 1908 Tunguska event asteroid",
    },
    SampleAsteroid {
        id: "sample_4",
        name: "Chelyabinsk-Class",
        diameter: 20.0,
        velocity: 19.0,
        density: 1800.0,
        approach_angle: 18.0,
        description: "Similar to the 2013 Chelyabinsk meteor",
    },
    SampleAsteroid {
        id: "sample_5",
        name: "Extinction Event",
        diameter: 10000.0,
        velocity: 30.0,
        density: 3500.0,
        approach_angle: 60.0,
        description: "A 10km asteroid - similar to the dinosaur extinction event",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct SamplesResponse {
    pub samples: &'static [SampleAsteroid],
}

pub fn sample_asteroids() -> SamplesResponse {
    SamplesResponse {
        samples: &SAMPLE_ASTEROIDS,
    }
}
