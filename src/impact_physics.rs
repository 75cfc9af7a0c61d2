// Impact Physics - Energy, cratering, seismic effects and deflection
// Closed-form scaling laws for an asteroid striking Earth and for the
// four mitigation strategies. Nothing here depends on orbital state.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::PhysicsError;
use crate::physics_engine::{EARTH_RADIUS_KM, G, JOULES_PER_MEGATON, SECONDS_PER_JULIAN_YEAR};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Earth's surface gravity (m/s²)
pub const EARTH_GRAVITY: f64 = 9.81;

/// Density of the target crust (kg/m³)
pub const TARGET_DENSITY: f64 = 2500.0;

/// Leading coefficient of the crater scaling law
const CRATER_COEFFICIENT: f64 = 1.8;

/// Empirical transient-to-final crater amplification
const CRATER_AMPLIFICATION: f64 = 20.0;

/// Yield of the Hiroshima bomb (Mt)
const HIROSHIMA_MEGATONS: f64 = 0.015;

/// Parameters applied when a request leaves a field out
pub mod asteroid_defaults {
    pub const DIAMETER_M: f64 = 100.0;
    pub const VELOCITY_KM_S: f64 = 20.0;
    pub const DENSITY_KG_M3: f64 = 3000.0;
    pub const ANGLE_DEG: f64 = 45.0;
}

/// Mitigation model constants
pub mod mitigation_constants {
    /// Momentum enhancement from ejecta (kinetic impactor)
    pub const BETA: f64 = 3.0;
    /// Gravity tractor hover distance from the asteroid centre (m)
    pub const TRACTOR_STANDOFF_M: f64 = 100.0;
    /// Fraction of laser energy that goes into ablation
    pub const LASER_COUPLING: f64 = 0.1;
    /// Energy needed to ablate one kilogram of surface material (J/kg)
    pub const SPECIFIC_ABLATION_ENERGY: f64 = 2.5e6;
    /// Velocity of the ablated plume (m/s)
    pub const ABLATION_EXHAUST_VELOCITY: f64 = 1000.0;
    /// Fraction of a stand-off burst's energy coupled into momentum
    pub const NUCLEAR_COUPLING: f64 = 0.01;
}

fn require_positive(name: &'static str, value: f64) -> Result<(), PhysicsError> {
    if value.is_nan() || value <= 0.0 {
        return Err(PhysicsError::NonPositive { name, value });
    }
    Ok(())
}

// =============================================================================
// ASTEROID
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidParams {
    /// Diameter (m)
    pub diameter: f64,
    /// Entry velocity (km/s)
    pub velocity: f64,
    /// Bulk density (kg/m³)
    pub density: f64,
    /// Impact angle from horizontal (degrees)
    pub angle: f64,
}

impl Default for AsteroidParams {
    fn default() -> Self {
        Self {
            diameter: asteroid_defaults::DIAMETER_M,
            velocity: asteroid_defaults::VELOCITY_KM_S,
            density: asteroid_defaults::DENSITY_KG_M3,
            angle: asteroid_defaults::ANGLE_DEG,
        }
    }
}

impl AsteroidParams {
    pub fn validate(&self) -> Result<(), PhysicsError> {
        require_positive("diameter", self.diameter)?;
        require_positive("velocity", self.velocity)?;
        require_positive("density", self.density)?;
        if self.angle.is_nan() || self.angle <= 0.0 || self.angle > 90.0 {
            return Err(PhysicsError::AngleOutOfRange(self.angle));
        }
        Ok(())
    }

    /// Mass of a homogeneous sphere (kg)
    pub fn mass_kg(&self) -> f64 {
        let radius = self.diameter / 2.0;
        let volume = (4.0 / 3.0) * PI * radius.powi(3);
        volume * self.density
    }

    pub fn velocity_m_s(&self) -> f64 {
        self.velocity * 1000.0
    }

    /// ½·m·v² (J)
    pub fn kinetic_energy(&self) -> f64 {
        let v = self.velocity_m_s();
        0.5 * self.mass_kg() * v * v
    }
}

// =============================================================================
// IMPACT EFFECTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactEnergy {
    pub joules: f64,
    pub megatons_tnt: f64,
    pub hiroshima_bombs: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Crater {
    pub diameter_meters: f64,
    pub diameter_km: f64,
    pub depth_meters: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeismicEffect {
    pub magnitude: f64,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TsunamiRisk {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlastEffects {
    pub fireball_radius_km: f64,
    pub thermal_radius_km: f64,
    pub blast_radius_severe_km: f64,
    pub blast_radius_moderate_km: f64,
    pub tsunami_potential: TsunamiRisk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum SeverityLevel {
    Negligible,
    Local,
    Regional,
    Continental,
    Global,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub level: SeverityLevel,
    pub description: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactResult {
    pub asteroid: AsteroidParams,
    pub mass_kg: f64,
    pub energy: ImpactEnergy,
    pub crater: Crater,
    pub seismic: SeismicEffect,
    pub effects: BlastEffects,
    pub classification: Classification,
}

/// Final crater diameter (m) from an empirical π-group scaling law
pub fn crater_diameter(asteroid: &AsteroidParams) -> f64 {
    CRATER_COEFFICIENT
        * (asteroid.density / TARGET_DENSITY).powf(1.0 / 3.0)
        * asteroid.diameter.powf(0.13)
        * asteroid.velocity_m_s().powf(0.44)
        * asteroid.angle.to_radians().sin().powf(1.0 / 3.0)
        * EARTH_GRAVITY.powf(-0.22)
        * CRATER_AMPLIFICATION
}

/// Richter-like magnitude of the ground shaking caused by the impact
pub fn seismic_magnitude(energy_joules: f64) -> f64 {
    0.67 * energy_joules.log10() - 5.87
}

pub fn seismic_description(magnitude: f64) -> &'static str {
    if magnitude < 4.0 {
        "Minor - Felt locally"
    } else if magnitude < 5.0 {
        "Light - Felt widely, minor damage"
    } else if magnitude < 6.0 {
        "Moderate - Significant damage in populated areas"
    } else if magnitude < 7.0 {
        "Strong - Major damage over large areas"
    } else if magnitude < 8.0 {
        "Great - Serious damage over very large areas"
    } else {
        "Catastrophic - Devastating effects globally"
    }
}

/// Fireball, thermal and blast radii (km) as power laws of yield
pub fn blast_effects(asteroid: &AsteroidParams, megatons: f64) -> BlastEffects {
    BlastEffects {
        fireball_radius_km: 0.28 * megatons.powf(0.33),
        thermal_radius_km: 0.66 * megatons.powf(0.41),
        blast_radius_severe_km: 0.23 * megatons.powf(0.33),
        blast_radius_moderate_km: 0.54 * megatons.powf(0.33),
        tsunami_potential: tsunami_risk(asteroid.diameter, asteroid.velocity),
    }
}

pub fn tsunami_risk(diameter_m: f64, velocity_km_s: f64) -> TsunamiRisk {
    if diameter_m > 100.0 && velocity_km_s > 15.0 {
        TsunamiRisk::High
    } else if diameter_m > 50.0 {
        TsunamiRisk::Moderate
    } else {
        TsunamiRisk::Low
    }
}

impl SeverityLevel {
    pub fn from_diameter(diameter_m: f64) -> Self {
        if diameter_m < 10.0 {
            SeverityLevel::Negligible
        } else if diameter_m < 50.0 {
            SeverityLevel::Local
        } else if diameter_m < 200.0 {
            SeverityLevel::Regional
        } else if diameter_m < 1000.0 {
            SeverityLevel::Continental
        } else {
            SeverityLevel::Global
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SeverityLevel::Negligible => "Burns up in atmosphere, minimal ground effects",
            SeverityLevel::Local => "Local damage, similar to Chelyabinsk event",
            SeverityLevel::Regional => "Regional devastation, city-killer",
            SeverityLevel::Continental => "Continental effects, climate impact",
            SeverityLevel::Global => "Mass extinction event",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            SeverityLevel::Negligible => "#4ade80",
            SeverityLevel::Local => "#fbbf24",
            SeverityLevel::Regional => "#fb923c",
            SeverityLevel::Continental => "#f87171",
            SeverityLevel::Global => "#dc2626",
        }
    }

    pub fn classification(self) -> Classification {
        Classification {
            level: self,
            description: self.description(),
            color: self.color(),
        }
    }
}

/// Energy, crater, shaking and blast footprint of a single impact
pub fn compute_impact(asteroid: &AsteroidParams) -> Result<ImpactResult, PhysicsError> {
    asteroid.validate()?;

    let joules = asteroid.kinetic_energy();
    let megatons_tnt = joules / JOULES_PER_MEGATON;

    let crater_m = crater_diameter(asteroid);
    let magnitude = seismic_magnitude(joules);

    Ok(ImpactResult {
        asteroid: *asteroid,
        mass_kg: asteroid.mass_kg(),
        energy: ImpactEnergy {
            joules,
            megatons_tnt,
            hiroshima_bombs: megatons_tnt / HIROSHIMA_MEGATONS,
        },
        crater: Crater {
            diameter_meters: crater_m,
            diameter_km: crater_m / 1000.0,
            depth_meters: crater_m / 3.0,
        },
        seismic: SeismicEffect {
            magnitude,
            description: seismic_description(magnitude),
        },
        effects: blast_effects(asteroid, megatons_tnt),
        classification: SeverityLevel::from_diameter(asteroid.diameter).classification(),
    })
}

// =============================================================================
// MITIGATION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum MitigationStrategy {
    KineticImpactor {
        impactor_mass_kg: f64,
        impactor_velocity_km_s: f64,
    },
    GravityTractor {
        spacecraft_mass_kg: f64,
    },
    LaserAblation {
        laser_power_w: f64,
    },
    Nuclear {
        yield_megatons: f64,
    },
}

impl MitigationStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            MitigationStrategy::KineticImpactor { .. } => "kinetic_impactor",
            MitigationStrategy::GravityTractor { .. } => "gravity_tractor",
            MitigationStrategy::LaserAblation { .. } => "laser_ablation",
            MitigationStrategy::Nuclear { .. } => "nuclear",
        }
    }

    fn validate(&self) -> Result<(), PhysicsError> {
        match *self {
            MitigationStrategy::KineticImpactor {
                impactor_mass_kg,
                impactor_velocity_km_s,
            } => {
                require_positive("impactor_mass", impactor_mass_kg)?;
                require_positive("impactor_velocity", impactor_velocity_km_s)
            }
            MitigationStrategy::GravityTractor { spacecraft_mass_kg } => {
                require_positive("spacecraft_mass", spacecraft_mass_kg)
            }
            MitigationStrategy::LaserAblation { laser_power_w } => {
                require_positive("laser_power", laser_power_w)
            }
            MitigationStrategy::Nuclear { yield_megatons } => {
                require_positive("nuclear_yield", yield_megatons)
            }
        }
    }

    /// Velocity change imparted to an asteroid of the given mass (m/s).
    /// Long-duration strategies act for `deflection_time_years`.
    pub fn delta_v(
        &self,
        asteroid_mass_kg: f64,
        deflection_time_years: f64,
    ) -> Result<f64, PhysicsError> {
        use mitigation_constants::*;

        let duration_s = deflection_time_years * SECONDS_PER_JULIAN_YEAR;

        let delta_v = match *self {
            MitigationStrategy::KineticImpactor {
                impactor_mass_kg,
                impactor_velocity_km_s,
            } => {
                let momentum = impactor_mass_kg * impactor_velocity_km_s * 1000.0;
                momentum / asteroid_mass_kg * BETA
            }
            MitigationStrategy::GravityTractor { spacecraft_mass_kg } => {
                G * spacecraft_mass_kg * duration_s
                    / (TRACTOR_STANDOFF_M * TRACTOR_STANDOFF_M * asteroid_mass_kg)
            }
            MitigationStrategy::LaserAblation { laser_power_w } => {
                let energy = laser_power_w * duration_s * LASER_COUPLING;
                let mass_ablated = energy / SPECIFIC_ABLATION_ENERGY;
                if mass_ablated >= asteroid_mass_kg {
                    return Err(PhysicsError::AblationExceedsMass {
                        ablated_kg: mass_ablated,
                        asteroid_kg: asteroid_mass_kg,
                    });
                }
                // Rocket equation with the asteroid as its own propellant
                let remaining = asteroid_mass_kg - mass_ablated;
                ABLATION_EXHAUST_VELOCITY * (asteroid_mass_kg / remaining).ln()
            }
            MitigationStrategy::Nuclear { yield_megatons } => {
                let energy = yield_megatons * JOULES_PER_MEGATON;
                let momentum = (2.0 * asteroid_mass_kg * energy * NUCLEAR_COUPLING).sqrt();
                momentum / asteroid_mass_kg
            }
        };

        Ok(delta_v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MitigationPlan {
    pub asteroid: AsteroidParams,
    pub strategy: MitigationStrategy,
    pub warning_time_years: f64,
    pub deflection_time_years: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeflectionOutcome {
    pub delta_v_ms: f64,
    pub delta_v_cms: f64,
    pub deflection_distance_km: f64,
    pub deflection_angle_degrees: f64,
    pub success: bool,
    pub success_margin_km: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RecommendationTier {
    Insufficient,
    Marginal,
    Successful,
    Excellent,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Recommendation {
    pub status: RecommendationTier,
    pub message: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MitigationResult {
    pub asteroid_mass_kg: f64,
    pub results: DeflectionOutcome,
    pub recommendation: Recommendation,
}

impl RecommendationTier {
    /// Grade a miss distance against one Earth radius
    pub fn from_deflection(deflection_km: f64) -> Self {
        if deflection_km > EARTH_RADIUS_KM {
            let margin = deflection_km - EARTH_RADIUS_KM;
            if margin > EARTH_RADIUS_KM * 2.0 {
                RecommendationTier::Excellent
            } else {
                RecommendationTier::Successful
            }
        } else {
            let deficit = EARTH_RADIUS_KM - deflection_km;
            if deficit < EARTH_RADIUS_KM * 0.5 {
                RecommendationTier::Marginal
            } else {
                RecommendationTier::Insufficient
            }
        }
    }

    pub fn recommendation(self) -> Recommendation {
        let (message, color) = match self {
            RecommendationTier::Excellent => {
                ("Deflection successful with large safety margin", "#22c55e")
            }
            RecommendationTier::Successful => {
                ("Deflection successful, asteroid will miss Earth", "#4ade80")
            }
            RecommendationTier::Marginal => (
                "Close call - consider additional deflection or earlier intervention",
                "#fbbf24",
            ),
            RecommendationTier::Insufficient => (
                "Deflection insufficient - need more powerful intervention or earlier action",
                "#ef4444",
            ),
        };
        Recommendation {
            status: self,
            message,
            color,
        }
    }
}

/// Delta-v, along-track drift at the predicted impact time, and a verdict
pub fn compute_mitigation(plan: &MitigationPlan) -> Result<MitigationResult, PhysicsError> {
    plan.asteroid.validate()?;
    plan.strategy.validate()?;
    require_positive("deflection_time", plan.deflection_time_years)?;
    require_positive("warning_time", plan.warning_time_years)?;

    let mass = plan.asteroid.mass_kg();
    let delta_v = plan.strategy.delta_v(mass, plan.deflection_time_years)?;

    let time_to_impact_s = plan.deflection_time_years * SECONDS_PER_JULIAN_YEAR;
    let deflection_distance_km = delta_v * time_to_impact_s / 1000.0;
    let deflection_angle_degrees = (delta_v / plan.asteroid.velocity_m_s()).atan().to_degrees();
    let success = deflection_distance_km > EARTH_RADIUS_KM;

    Ok(MitigationResult {
        asteroid_mass_kg: mass,
        results: DeflectionOutcome {
            delta_v_ms: delta_v,
            delta_v_cms: delta_v * 100.0,
            deflection_distance_km,
            deflection_angle_degrees,
            success,
            success_margin_km: deflection_distance_km - EARTH_RADIUS_KM,
        },
        recommendation: RecommendationTier::from_deflection(deflection_distance_km)
            .recommendation(),
    })
}

// =============================================================================
// COMPARATIVE SEISMIC MAPPING
// =============================================================================

/// Half-width of the magnitude window used to find comparable earthquakes
pub const MAGNITUDE_WINDOW: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquivalentEarthquake {
    pub energy_megatons: f64,
    pub energy_joules: f64,
    pub magnitude: f64,
    pub min_magnitude: f64,
    pub max_magnitude: f64,
    pub felt_radius_km: f64,
    pub damage_radius_km: f64,
    pub intensity_description: &'static str,
}

/// Gutenberg-Richter energy relation, log10(E) = 1.5·M + 4.8
pub fn equivalent_magnitude(energy_megatons: f64) -> f64 {
    ((energy_megatons * JOULES_PER_MEGATON).log10() - 4.8) / 1.5
}

pub fn intensity_description(magnitude: f64) -> &'static str {
    if magnitude < 5.0 {
        "Minimal structural damage expected"
    } else if magnitude < 6.0 {
        "Light to moderate structural damage"
    } else if magnitude < 7.0 {
        "Moderate to heavy structural damage"
    } else if magnitude < 8.0 {
        "Heavy structural damage, widespread destruction"
    } else {
        "Catastrophic destruction over vast areas"
    }
}

pub fn equivalent_earthquake(energy_megatons: f64) -> Result<EquivalentEarthquake, PhysicsError> {
    require_positive("energy_megatons", energy_megatons)?;

    let magnitude = equivalent_magnitude(energy_megatons);
    Ok(EquivalentEarthquake {
        energy_megatons,
        energy_joules: energy_megatons * JOULES_PER_MEGATON,
        magnitude,
        min_magnitude: (magnitude - MAGNITUDE_WINDOW).max(0.0),
        max_magnitude: magnitude + MAGNITUDE_WINDOW,
        felt_radius_km: 10f64.powf(magnitude - 3.0) * 100.0,
        damage_radius_km: 10f64.powf(magnitude - 4.0) * 50.0,
        intensity_description: intensity_description(magnitude),
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn asteroid(diameter: f64, velocity: f64) -> AsteroidParams {
        AsteroidParams {
            diameter,
            velocity,
            ..AsteroidParams::default()
        }
    }

    fn plan(diameter: f64, strategy: MitigationStrategy, years: f64) -> MitigationPlan {
        MitigationPlan {
            asteroid: asteroid(diameter, 20.0),
            strategy,
            warning_time_years: 10.0,
            deflection_time_years: years,
        }
    }

    const ALL_STRATEGIES: [MitigationStrategy; 4] = [
        MitigationStrategy::KineticImpactor {
            impactor_mass_kg: 1000.0,
            impactor_velocity_km_s: 10.0,
        },
        MitigationStrategy::GravityTractor {
            spacecraft_mass_kg: 20000.0,
        },
        MitigationStrategy::LaserAblation { laser_power_w: 1e6 },
        MitigationStrategy::Nuclear { yield_megatons: 1.0 },
    ];

    #[test]
    fn test_default_impact() {
        let result = compute_impact(&AsteroidParams::default()).unwrap();
        // 100 m stony body at 20 km/s: ~1.57e9 kg, ~75 Mt
        assert!((result.mass_kg - 1.5708e9).abs() / 1.5708e9 < 1e-4);
        assert!((result.energy.megatons_tnt - 75.09).abs() < 0.05);
        assert!((result.energy.hiroshima_bombs - result.energy.megatons_tnt / 0.015).abs() < 1e-6);
        assert!((result.crater.depth_meters - result.crater.diameter_meters / 3.0).abs() < 1e-9);
        assert_eq!(result.effects.tsunami_potential, TsunamiRisk::Moderate);
        assert_eq!(result.classification.level, SeverityLevel::Regional);
    }

    #[test]
    fn test_three_hundred_metre_impactor() {
        let params = AsteroidParams {
            diameter: 300.0,
            velocity: 20.0,
            density: 3000.0,
            angle: 45.0,
        };
        let result = compute_impact(&params).unwrap();
        assert!(result.energy.megatons_tnt > 0.0);
        // 300 m sits in the [200, 1000) tier
        assert_eq!(result.classification.level, SeverityLevel::Continental);
        assert_eq!(result.effects.tsunami_potential, TsunamiRisk::High);
    }

    #[test]
    fn test_energy_scales_with_velocity_squared() {
        let slow = compute_impact(&asteroid(100.0, 10.0)).unwrap();
        let fast = compute_impact(&asteroid(100.0, 20.0)).unwrap();
        let ratio = fast.energy.joules / slow.energy.joules;
        assert!((ratio - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_crater_monotonic_in_velocity_and_diameter() {
        let mut last = 0.0;
        for v in [5.0, 10.0, 20.0, 40.0, 70.0] {
            let d = crater_diameter(&asteroid(100.0, v));
            assert!(d > last);
            last = d;
        }
        let mut last = 0.0;
        for diameter in [1.0, 10.0, 100.0, 1000.0, 10000.0] {
            let d = crater_diameter(&asteroid(diameter, 20.0));
            assert!(d > last);
            last = d;
        }
    }

    #[test]
    fn test_severity_tiers() {
        assert_eq!(SeverityLevel::from_diameter(5.0), SeverityLevel::Negligible);
        assert_eq!(SeverityLevel::from_diameter(20.0), SeverityLevel::Local);
        assert_eq!(SeverityLevel::from_diameter(150.0), SeverityLevel::Regional);
        assert_eq!(SeverityLevel::from_diameter(200.0), SeverityLevel::Continental);
        assert_eq!(SeverityLevel::from_diameter(1000.0), SeverityLevel::Global);
        assert_eq!(SeverityLevel::Global.color(), "#dc2626");
    }

    #[test]
    fn test_seismic_magnitude_formula() {
        let m = seismic_magnitude(1e18);
        assert!((m - (0.67 * 18.0 - 5.87)).abs() < 1e-12);
        assert_eq!(seismic_description(3.0), "Minor - Felt locally");
        assert_eq!(seismic_description(8.5), "Catastrophic - Devastating effects globally");
    }

    #[test]
    fn test_invalid_asteroid_rejected() {
        assert!(matches!(
            compute_impact(&asteroid(-5.0, 20.0)),
            Err(PhysicsError::NonPositive { name: "diameter", .. })
        ));
        let steep = AsteroidParams {
            angle: 95.0,
            ..AsteroidParams::default()
        };
        assert_eq!(compute_impact(&steep), Err(PhysicsError::AngleOutOfRange(95.0)));
        let vertical = AsteroidParams {
            angle: 90.0,
            ..AsteroidParams::default()
        };
        assert!(compute_impact(&vertical).is_ok());
    }

    #[test]
    fn test_kinetic_impactor() {
        let result = compute_mitigation(&plan(100.0, ALL_STRATEGIES[0], 5.0)).unwrap();
        let mass = AsteroidParams::default().mass_kg();
        let expected = 1000.0 * 10_000.0 / mass * 3.0;
        assert!((result.results.delta_v_ms - expected).abs() < 1e-12);
        assert!(result.results.delta_v_ms > 0.0);
        assert_eq!(
            result.results.success,
            result.results.deflection_distance_km > 6371.0
        );
        assert!((result.results.delta_v_cms - expected * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_deflection_monotonic_in_lead_time() {
        for strategy in ALL_STRATEGIES {
            let mut last = 0.0;
            for years in [0.5, 1.0, 2.0, 5.0, 10.0, 20.0] {
                let result = compute_mitigation(&plan(100.0, strategy, years)).unwrap();
                assert!(
                    result.results.deflection_distance_km > last,
                    "{} not monotonic at {} years",
                    strategy.name(),
                    years
                );
                last = result.results.deflection_distance_km;
            }
        }
    }

    #[test]
    fn test_laser_ablation_exceeding_mass_is_domain_error() {
        let tiny = plan(1.0, ALL_STRATEGIES[2], 5.0);
        match compute_mitigation(&tiny) {
            Err(PhysicsError::AblationExceedsMass {
                ablated_kg,
                asteroid_kg,
            }) => assert!(ablated_kg >= asteroid_kg),
            other => panic!("expected domain error, got {:?}", other),
        }
    }

    #[test]
    fn test_nuclear_delta_v() {
        let mass = AsteroidParams::default().mass_kg();
        let dv = ALL_STRATEGIES[3].delta_v(mass, 5.0).unwrap();
        let expected = (2.0 * mass * 4.184e15 * 0.01).sqrt() / mass;
        assert!((dv - expected).abs() < 1e-12);
    }

    #[test]
    fn test_recommendation_tiers() {
        assert_eq!(
            RecommendationTier::from_deflection(6371.0 * 3.5),
            RecommendationTier::Excellent
        );
        assert_eq!(
            RecommendationTier::from_deflection(7000.0),
            RecommendationTier::Successful
        );
        assert_eq!(
            RecommendationTier::from_deflection(5000.0),
            RecommendationTier::Marginal
        );
        assert_eq!(
            RecommendationTier::from_deflection(1000.0),
            RecommendationTier::Insufficient
        );
        // Exactly one Earth radius is not a miss
        assert_eq!(
            RecommendationTier::from_deflection(EARTH_RADIUS_KM),
            RecommendationTier::Marginal
        );
    }

    #[test]
    fn test_equivalent_earthquake() {
        let quake = equivalent_earthquake(1.0).unwrap();
        let expected = ((4.184e15f64).log10() - 4.8) / 1.5;
        assert!((quake.magnitude - expected).abs() < 1e-12);
        assert!((quake.max_magnitude - quake.magnitude - 0.5).abs() < 1e-12);
        assert!((quake.felt_radius_km - 10f64.powf(expected - 3.0) * 100.0).abs() < 1e-9);
        assert!(quake.damage_radius_km < quake.felt_radius_km);
        assert!(equivalent_earthquake(0.0).is_err());
    }

    #[test]
    fn test_magnitude_window_clamped_at_zero() {
        // About 4 kJ, far below any felt earthquake
        let quake = equivalent_earthquake(1e-12).unwrap();
        assert!(quake.magnitude < 0.5);
        assert_eq!(quake.min_magnitude, 0.0);
    }
}
