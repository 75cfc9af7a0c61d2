// Physics Engine - Orbital Mechanics
// Calendar conversion, Kepler's equation, orbital state and the planetary ephemeris

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tracing::warn;

use crate::error::PhysicsError;

// =============================================================================
// PHYSICAL CONSTANTS
// =============================================================================

/// Gravitational constant (m³/(kg·s²))
pub const G: f64 = 6.67430e-11;

/// Astronomical Unit in kilometres
pub const AU_KM: f64 = 149_597_870.7;

/// Sun's gravitational parameter μ = G * M_sun (km³/s²)
pub const MU_SUN_KM3_S2: f64 = 1.32712440018e11;

/// Earth's mean radius (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Joules released by one megaton of TNT
pub const JOULES_PER_MEGATON: f64 = 4.184e15;

/// Julian Date of the J2000 epoch (2000-01-01 12:00 TT)
pub const J2000_JD: f64 = 2451545.0;

/// Julian Date of 1970-01-01 00:00 UTC
pub const UNIX_EPOCH_JD: f64 = 2440587.5;

pub const SECONDS_PER_DAY: f64 = 86400.0;
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;
pub const SECONDS_PER_JULIAN_YEAR: f64 = DAYS_PER_JULIAN_YEAR * SECONDS_PER_DAY;

// =============================================================================
// 3D VECTOR
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

// =============================================================================
// CALENDAR CONVERSION
// =============================================================================

/// Julian Day Number of a proleptic Gregorian calendar date
/// (Fliegel & Van Flandern, 1968).
pub fn julian_day_number<D: Datelike>(date: &D) -> i64 {
    let month = i64::from(date.month());
    let a = (14 - month) / 12;
    let y = i64::from(date.year()) + 4800 - a;
    let m = month + 12 * a - 3;

    i64::from(date.day()) + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045
}

/// Julian centuries elapsed since J2000
pub fn centuries_since_j2000(julian_day: f64) -> f64 {
    (julian_day - J2000_JD) / DAYS_PER_JULIAN_CENTURY
}

/// Fractional Julian Date of an instant
pub fn julian_date(instant: &DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64 / 86_400_000.0 + UNIX_EPOCH_JD
}

/// Wrap an angle into [0, 360) degrees.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

// =============================================================================
// KEPLER SOLVER
// =============================================================================

/// Default convergence tolerance on the Newton step (radians)
pub const KEPLER_TOLERANCE: f64 = 1e-6;

/// Iteration cap; reaching it returns the last iterate rather than failing
pub const KEPLER_MAX_ITERATIONS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeplerSolution {
    /// Eccentric anomaly (radians)
    pub eccentric_anomaly: f64,
    pub iterations: u32,
    /// False when the iteration cap was hit before the step fell below tolerance
    pub converged: bool,
}

impl KeplerSolution {
    /// |E - e*sin(E) - M| for the returned eccentric anomaly
    pub fn residual(&self, mean_anomaly: f64, eccentricity: f64) -> f64 {
        let e_anom = self.eccentric_anomaly;
        (e_anom - eccentricity * e_anom.sin() - mean_anomaly).abs()
    }
}

/// Solve Kepler's equation M = E - e*sin(E) using Newton-Raphson
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> KeplerSolution {
    solve_kepler_with_tolerance(mean_anomaly, eccentricity, KEPLER_TOLERANCE)
}

pub fn solve_kepler_with_tolerance(
    mean_anomaly: f64,
    eccentricity: f64,
    tolerance: f64,
) -> KeplerSolution {
    let mut e_anom = mean_anomaly; // Initial guess
    let mut delta = f64::INFINITY;
    let mut iterations = 0;

    while delta.abs() > tolerance && iterations < KEPLER_MAX_ITERATIONS {
        let f = e_anom - eccentricity * e_anom.sin() - mean_anomaly;
        let f_prime = 1.0 - eccentricity * e_anom.cos();
        delta = f / f_prime;
        e_anom -= delta;
        iterations += 1;
    }

    KeplerSolution {
        eccentric_anomaly: e_anom,
        iterations,
        converged: delta.abs() <= tolerance,
    }
}

/// True anomaly from eccentric anomaly, half-angle form (stable near E = 0 and E = π)
pub fn true_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    2.0 * ((1.0 + eccentricity).sqrt() * (eccentric_anomaly / 2.0).sin())
        .atan2((1.0 - eccentricity).sqrt() * (eccentric_anomaly / 2.0).cos())
}

// =============================================================================
// KEPLERIAN ORBITAL ELEMENTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis (AU)
    pub semi_major_axis: f64,
    /// Eccentricity (0-1 for elliptical)
    pub eccentricity: f64,
    /// Inclination (degrees)
    pub inclination: f64,
    /// Longitude of ascending node (degrees)
    pub longitude_ascending_node: f64,
    /// Argument of periapsis (degrees)
    pub argument_periapsis: f64,
    /// Mean anomaly at epoch (radians)
    pub mean_anomaly_epoch: f64,
    /// Epoch (Julian Date)
    pub epoch: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrbitClass {
    Elliptical,
    Hyperbolic,
}

impl OrbitClass {
    pub fn label(&self) -> &'static str {
        match self {
            OrbitClass::Elliptical => "Elliptical (periodic)",
            OrbitClass::Hyperbolic => "Hyperbolic (non-periodic)",
        }
    }
}

/// Snapshot of a body on its orbit. Angles in degrees, normalized to [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitalState {
    pub mean_anomaly_deg: f64,
    pub eccentric_anomaly_deg: f64,
    pub true_anomaly_deg: f64,
    pub radius_au: f64,
    /// Heliocentric position (AU)
    pub position: Vector3,
    pub converged: bool,
}

impl OrbitalElements {
    /// Elements in the reference plane with periapsis on the x axis
    pub fn planar(semi_major_axis: f64, eccentricity: f64) -> Self {
        Self {
            semi_major_axis,
            eccentricity,
            inclination: 0.0,
            longitude_ascending_node: 0.0,
            argument_periapsis: 0.0,
            mean_anomaly_epoch: 0.0,
            epoch: J2000_JD,
        }
    }

    pub fn classify(&self) -> OrbitClass {
        if self.eccentricity < 1.0 {
            OrbitClass::Elliptical
        } else {
            OrbitClass::Hyperbolic
        }
    }

    /// Reject elements that cannot be propagated as an ellipse.
    pub fn validate_closed(&self) -> Result<(), PhysicsError> {
        if self.semi_major_axis.is_nan() || self.semi_major_axis <= 0.0 {
            return Err(PhysicsError::NonPositive {
                name: "semi_major_axis",
                value: self.semi_major_axis,
            });
        }
        if self.eccentricity < 0.0 {
            return Err(PhysicsError::NegativeEccentricity(self.eccentricity));
        }
        if self.classify() == OrbitClass::Hyperbolic {
            return Err(PhysicsError::OpenOrbit(self.eccentricity));
        }
        Ok(())
    }

    /// Orbital period (years), Kepler's third law with a in AU
    pub fn period_years(&self) -> f64 {
        self.semi_major_axis.powi(3).sqrt()
    }

    pub fn period_days(&self) -> f64 {
        self.period_years() * DAYS_PER_JULIAN_YEAR
    }

    pub fn perihelion_au(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    pub fn aphelion_au(&self) -> f64 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    /// Mean motion n = 2π / √(a³) converted to radians per day
    pub fn mean_motion(&self) -> f64 {
        TAU / self.period_years() / DAYS_PER_JULIAN_YEAR
    }

    /// M(t) = M₀ + n·(t − t₀), radians
    pub fn mean_anomaly_at(&self, julian_date: f64) -> f64 {
        self.mean_anomaly_epoch + self.mean_motion() * (julian_date - self.epoch)
    }

    /// Vis-viva speed (km/s) at a heliocentric distance given in AU
    pub fn orbital_velocity_km_s(&self, radius_au: f64) -> f64 {
        let r = radius_au * AU_KM;
        let a = self.semi_major_axis * AU_KM;
        (MU_SUN_KM3_S2 * (2.0 / r - 1.0 / a)).sqrt()
    }

    /// Vis-viva speed in AU per day
    pub fn orbital_velocity_au_per_day(&self, radius_au: f64) -> f64 {
        self.orbital_velocity_km_s(radius_au) * SECONDS_PER_DAY / AU_KM
    }

    /// High-precision state: full Kepler solve and rotation into the
    /// ecliptic frame by ω, i and Ω.
    pub fn propagated_state(&self, mean_anomaly: f64) -> OrbitalState {
        let a = self.semi_major_axis;
        let e = self.eccentricity;

        let solution = solve_kepler(mean_anomaly, e);
        if !solution.converged {
            warn!(
                mean_anomaly,
                eccentricity = e,
                iterations = solution.iterations,
                "Kepler solver hit the iteration cap, returning last iterate"
            );
        }
        let eccentric_anomaly = solution.eccentric_anomaly;
        let nu = true_anomaly(eccentric_anomaly, e);

        // Distance from focus
        let r = a * (1.0 - e * eccentric_anomaly.cos());

        // Position in orbital plane (perifocal frame)
        let x_orb = r * nu.cos();
        let y_orb = r * nu.sin();

        OrbitalState {
            mean_anomaly_deg: normalize_degrees(mean_anomaly.to_degrees()),
            eccentric_anomaly_deg: normalize_degrees(eccentric_anomaly.to_degrees()),
            true_anomaly_deg: normalize_degrees(nu.to_degrees()),
            radius_au: r,
            position: self.perifocal_to_ecliptic(x_orb, y_orb),
            converged: solution.converged,
        }
    }

    /// Rotate a perifocal (x, y) into the reference frame: R_z(Ω)·R_x(i)·R_z(ω)
    fn perifocal_to_ecliptic(&self, x_orb: f64, y_orb: f64) -> Vector3 {
        let (sin_omega, cos_omega) = self.longitude_ascending_node.to_radians().sin_cos(); // Ω
        let (sin_w, cos_w) = self.argument_periapsis.to_radians().sin_cos(); // ω
        let (sin_i, cos_i) = self.inclination.to_radians().sin_cos();

        // Combined rotation matrix elements
        let r11 = cos_omega * cos_w - sin_omega * sin_w * cos_i;
        let r12 = -cos_omega * sin_w - sin_omega * cos_w * cos_i;
        let r21 = sin_omega * cos_w + cos_omega * sin_w * cos_i;
        let r22 = -sin_omega * sin_w + cos_omega * cos_w * cos_i;
        let r31 = sin_w * sin_i;
        let r32 = cos_w * sin_i;

        Vector3::new(
            r11 * x_orb + r12 * y_orb,
            r21 * x_orb + r22 * y_orb,
            r31 * x_orb + r32 * y_orb,
        )
    }
}

/// Low-precision snapshot: one first-order correction E ≈ M + e·sin(M)
/// instead of iterating, and no inclination rotation (z = 0).
pub fn snapshot_state(
    semi_major_axis: f64,
    eccentricity: f64,
    mean_anomaly_deg: f64,
) -> OrbitalState {
    let m = mean_anomaly_deg.to_radians();
    let eccentric_anomaly = m + eccentricity * m.sin();
    let nu = true_anomaly(eccentric_anomaly, eccentricity);
    let r = semi_major_axis * (1.0 - eccentricity * eccentric_anomaly.cos());

    OrbitalState {
        mean_anomaly_deg: normalize_degrees(mean_anomaly_deg),
        eccentric_anomaly_deg: normalize_degrees(eccentric_anomaly.to_degrees()),
        true_anomaly_deg: normalize_degrees(nu.to_degrees()),
        radius_au: r,
        position: Vector3::new(r * nu.cos(), r * nu.sin(), 0.0),
        converged: true,
    }
}

// =============================================================================
// PLANETARY EPHEMERIS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Planet {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
}

/// Mean elements at J2000, JPL "Approximate Positions of the Planets".
/// Angles in degrees; the mean longitude advances by `mean_longitude_rate`
/// degrees per Julian century.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanetElements {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub mean_longitude: f64,
    pub mean_longitude_rate: f64,
    /// Longitude of perihelion ϖ = Ω + ω
    pub longitude_perihelion: f64,
    pub longitude_ascending_node: f64,
}

/// Indexed by `Planet as usize`.
pub static EPHEMERIS: [PlanetElements; 6] = [
    PlanetElements {
        semi_major_axis: 0.38709927,
        eccentricity: 0.20563593,
        inclination: 7.00497902,
        mean_longitude: 252.25032350,
        mean_longitude_rate: 149472.67411175,
        longitude_perihelion: 77.45779628,
        longitude_ascending_node: 48.33076593,
    },
    PlanetElements {
        semi_major_axis: 0.72333566,
        eccentricity: 0.00677672,
        inclination: 3.39467605,
        mean_longitude: 181.97909950,
        mean_longitude_rate: 58517.81538729,
        longitude_perihelion: 131.60246718,
        longitude_ascending_node: 76.67984255,
    },
    PlanetElements {
        semi_major_axis: 1.00000261,
        eccentricity: 0.01671123,
        inclination: -0.00001531,
        mean_longitude: 100.46457166,
        mean_longitude_rate: 35999.37244981,
        longitude_perihelion: 102.93768193,
        longitude_ascending_node: 0.0,
    },
    PlanetElements {
        semi_major_axis: 1.52371034,
        eccentricity: 0.09339410,
        inclination: 1.84969142,
        mean_longitude: -4.55343205,
        mean_longitude_rate: 19140.30268499,
        longitude_perihelion: -23.94362959,
        longitude_ascending_node: 49.55953891,
    },
    PlanetElements {
        semi_major_axis: 5.20288700,
        eccentricity: 0.04838624,
        inclination: 1.30439695,
        mean_longitude: 34.39644051,
        mean_longitude_rate: 3034.74612775,
        longitude_perihelion: 14.72847983,
        longitude_ascending_node: 100.47390909,
    },
    PlanetElements {
        semi_major_axis: 9.53667594,
        eccentricity: 0.05386179,
        inclination: 2.48599187,
        mean_longitude: 49.95424423,
        mean_longitude_rate: 1222.49362201,
        longitude_perihelion: 92.59887831,
        longitude_ascending_node: 113.66242448,
    },
];

impl Planet {
    pub const ALL: [Planet; 6] = [
        Planet::Mercury,
        Planet::Venus,
        Planet::Earth,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Planet::Mercury => "mercury",
            Planet::Venus => "venus",
            Planet::Earth => "earth",
            Planet::Mars => "mars",
            Planet::Jupiter => "jupiter",
            Planet::Saturn => "saturn",
        }
    }

    pub fn from_name(name: &str) -> Option<Planet> {
        Planet::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    pub fn elements(&self) -> &'static PlanetElements {
        &EPHEMERIS[*self as usize]
    }

    /// Approximate heliocentric ecliptic position, `centuries` since J2000
    pub fn position(&self, centuries: f64) -> OrbitalState {
        let el = self.elements();
        let mean_longitude = el.mean_longitude + el.mean_longitude_rate * centuries;
        let mean_anomaly = mean_longitude - el.longitude_perihelion;
        snapshot_state(el.semi_major_axis, el.eccentricity, mean_anomaly)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use std::f64::consts::PI;

    #[test]
    fn test_julian_day_number_j2000() {
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert_eq!(julian_day_number(&date), 2451545);
        assert!(centuries_since_j2000(2451545.0).abs() < 1e-15);
    }

    #[test]
    fn test_julian_day_number_known_dates() {
        let date = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(julian_day_number(&date), 2440588);
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(julian_day_number(&date), 2460370);
        // 2100-01-01 is one Julian century (36525 days) after J2000
        let date = NaiveDate::from_ymd_opt(2100, 1, 1).unwrap();
        let jdn = julian_day_number(&date) as f64;
        assert!((centuries_since_j2000(jdn) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_julian_date_of_instant() {
        let instant = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((julian_date(&instant) - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(-1e-20), 0.0);
        assert!((normalize_degrees(359.5) - 359.5).abs() < 1e-12);
    }

    #[test]
    fn test_kepler_equation_circular() {
        // For circular orbit e=0, E = M
        let sol = solve_kepler(1.0, 0.0);
        assert!((sol.eccentric_anomaly - 1.0).abs() < 1e-10);
        assert!(sol.converged);
    }

    #[test]
    fn test_kepler_residual_within_tolerance() {
        for i in 0..10 {
            let e = i as f64 * 0.1;
            for k in 0..36 {
                let m = k as f64 * TAU / 36.0;
                let sol = solve_kepler(m, e);
                assert!(
                    sol.residual(m, e) <= KEPLER_TOLERANCE
                        || sol.iterations == KEPLER_MAX_ITERATIONS,
                    "e={} M={} residual={}",
                    e,
                    m,
                    sol.residual(m, e)
                );
            }
        }
    }

    #[test]
    fn test_kepler_iteration_cap_reports_not_converged() {
        // A negative tolerance can never be met
        let sol = solve_kepler_with_tolerance(0.5, 0.5, -1.0);
        assert_eq!(sol.iterations, KEPLER_MAX_ITERATIONS);
        assert!(!sol.converged);
        assert!(sol.eccentric_anomaly.is_finite());
    }

    #[test]
    fn test_perihelion_and_aphelion_radius() {
        let elements = OrbitalElements::planar(2.0, 0.3);
        let peri = elements.propagated_state(0.0);
        assert!(peri.true_anomaly_deg.abs() < 1e-9);
        assert!((peri.radius_au - elements.perihelion_au()).abs() < 1e-12);

        let apo = elements.propagated_state(PI);
        assert!((apo.true_anomaly_deg - 180.0).abs() < 1e-6);
        assert!((apo.radius_au - elements.aphelion_au()).abs() < 1e-9);
    }

    #[test]
    fn test_circular_orbit_true_equals_mean() {
        let elements = OrbitalElements {
            inclination: 25.0,
            longitude_ascending_node: 40.0,
            argument_periapsis: 10.0,
            ..OrbitalElements::planar(1.5, 0.0)
        };
        for k in 0..12 {
            let m = k as f64 * TAU / 12.0;
            let state = elements.propagated_state(m);
            let diff = (state.true_anomaly_deg - state.mean_anomaly_deg).abs();
            assert!(diff < 1e-9 || (diff - 360.0).abs() < 1e-9);
            assert!((state.radius_au - 1.5).abs() < 1e-12);
            assert!((state.position.magnitude() - 1.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rotation_preserves_radius_and_lifts_out_of_plane() {
        let elements = OrbitalElements {
            inclination: 30.0,
            argument_periapsis: 90.0,
            ..OrbitalElements::planar(1.0, 0.2)
        };
        let state = elements.propagated_state(0.0);
        assert!((state.position.magnitude() - state.radius_au).abs() < 1e-12);
        // Periapsis at ω = 90° sits at the top of the inclined plane
        assert!((state.position.z - state.radius_au * 30f64.to_radians().sin()).abs() < 1e-12);
    }

    #[test]
    fn test_mean_anomaly_advances_one_period() {
        let elements = OrbitalElements::planar(1.0, 0.0167);
        let after = elements.mean_anomaly_at(elements.epoch + elements.period_days());
        assert!((after - TAU).abs() < 1e-9);
    }

    #[test]
    fn test_vis_viva_earth_speed() {
        let elements = OrbitalElements::planar(1.0, 0.0);
        let v = elements.orbital_velocity_km_s(1.0);
        assert!((v - 29.78).abs() < 0.01, "got {}", v);
    }

    #[test]
    fn test_vis_viva_in_au_per_day() {
        // A circular 1 AU orbit moves at the Gaussian gravitational constant
        let elements = OrbitalElements::planar(1.0, 0.0);
        let v = elements.orbital_velocity_au_per_day(1.0);
        assert!((v - 0.01720209895).abs() < 1e-8, "got {}", v);
        let km_s = elements.orbital_velocity_km_s(1.0);
        assert!((v - km_s * 86400.0 / AU_KM).abs() < 1e-15);
    }

    #[test]
    fn test_validate_closed() {
        assert!(OrbitalElements::planar(1.0, 0.5).validate_closed().is_ok());
        assert_eq!(
            OrbitalElements::planar(1.0, 1.2).validate_closed(),
            Err(PhysicsError::OpenOrbit(1.2))
        );
        assert_eq!(
            OrbitalElements::planar(1.0, -0.1).validate_closed(),
            Err(PhysicsError::NegativeEccentricity(-0.1))
        );
        assert!(matches!(
            OrbitalElements::planar(0.0, 0.1).validate_closed(),
            Err(PhysicsError::NonPositive { .. })
        ));
    }

    #[test]
    fn test_earth_near_perihelion_at_j2000() {
        let earth = Planet::Earth.position(0.0);
        assert!((earth.radius_au - 0.9833).abs() < 1e-3, "got {}", earth.radius_au);
        assert_eq!(earth.position.z, 0.0);
        assert!(earth.mean_anomaly_deg >= 0.0 && earth.mean_anomaly_deg < 360.0);
    }

    #[test]
    fn test_planet_distances_stay_between_apsides() {
        for planet in Planet::ALL {
            let el = planet.elements();
            for k in 0..20 {
                let state = planet.position(k as f64 * 0.05);
                assert!(state.radius_au >= el.semi_major_axis * (1.0 - el.eccentricity) - 1e-9);
                assert!(state.radius_au <= el.semi_major_axis * (1.0 + el.eccentricity) + 1e-9);
            }
        }
    }

    #[test]
    fn test_mars_position_advances_at_jpl_rate() {
        // 2024-01-01 is exactly 0.24 Julian centuries after J2000
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let centuries = centuries_since_j2000(julian_day_number(&date) as f64);
        assert!((centuries - 0.24).abs() < 1e-12);

        let mars = Planet::Mars.position(centuries);
        assert!((mars.mean_anomaly_deg - 293.062842).abs() < 1e-5);
        assert!((mars.radius_au - 1.479406).abs() < 1e-5);
        assert!((mars.position.x - 0.332072).abs() < 1e-5);
        assert!((mars.position.y + 1.441656).abs() < 1e-5);
        assert!((mars.true_anomaly_deg - 282.971307).abs() < 1e-5);
    }

    #[test]
    fn test_planet_lookup() {
        assert_eq!(Planet::from_name("Mars"), Some(Planet::Mars));
        assert_eq!(Planet::from_name("pluto"), None);
        assert!((Planet::Jupiter.elements().semi_major_axis - 5.202887).abs() < 1e-12);
    }
}
