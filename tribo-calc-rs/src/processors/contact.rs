//! Hertzian contact pressure for a sphere-on-flat contact.

use std::f64::consts::PI;
use std::fmt;

use thiserror::Error;

/// mN to N.
const MILLINEWTON: f64 = 1e-3;
/// GPa to Pa.
const GIGAPASCAL: f64 = 1e9;
/// µm to m.
const MICROMETRE: f64 = 1e-6;

/// Errors that can occur during the contact calculation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ContactError {
    #[error("{quantity} is not a finite real number ({value}); check the input parameters")]
    NonFinite { quantity: &'static str, value: f64 },
}

/// Result type for contact calculations.
pub type Result<T> = std::result::Result<T, ContactError>;

/// Contact parameters in laboratory units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactInputs {
    /// Applied normal force in mN
    pub force_mn: f64,
    /// Elastic modulus of the counterface (ball) in GPa
    pub counter_modulus_gpa: f64,
    /// Poisson's ratio of the counterface
    pub counter_poisson: f64,
    /// Counterface radius in µm
    pub radius_um: f64,
    /// Elastic modulus of the plane in GPa
    pub plane_modulus_gpa: f64,
    /// Poisson's ratio of the plane
    pub plane_poisson: f64,
}

/// Derived contact quantities in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactResult {
    /// Curvature term from the counterface radius
    pub curvature_sum: f64,
    /// Combined elastic modulus E* in Pa
    pub equivalent_modulus: f64,
    /// Hertzian contact radius in m
    pub contact_radius: f64,
    /// Maximum Hertzian contact pressure in Pa
    pub contact_pressure: f64,
}

impl ContactResult {
    /// Maximum contact pressure in GPa.
    pub fn contact_pressure_gpa(&self) -> f64 {
        self.contact_pressure / GIGAPASCAL
    }
}

impl fmt::Display for ContactResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "curvature_sum: {} m^-1", format_sci(self.curvature_sum, 2))?;
        writeln!(
            f,
            "Equivalent Elastic Modulus: {} Pa",
            format_sci(self.equivalent_modulus, 2)
        )?;
        writeln!(f, "Contact Radius: {} m", format_sci(self.contact_radius, 2))?;
        write!(f, "Contact Pressure: {:.2} GPa", self.contact_pressure_gpa())
    }
}

/// Combined elastic modulus of two bodies.
///
/// `1 / ((1 - nu1^2) / e1 + (1 - nu2^2) / e2)`, moduli in Pa.
pub fn equivalent_modulus(e1: f64, nu1: f64, e2: f64, nu2: f64) -> f64 {
    1.0 / ((1.0 - nu1.powi(2)) / e1 + (1.0 - nu2.powi(2)) / e2)
}

/// Compute contact radius and maximum pressure for a sphere pressed on a flat.
///
/// Inputs are converted to N, Pa and m before evaluating
///
/// - `a = (3 F R / (4 E*))^(1/3)`
/// - `p_max = 3 F / (2 pi a^2)`
///
/// # Errors
///
/// [`ContactError::NonFinite`] when any derived quantity is NaN or infinite,
/// e.g. a negative force or radius (no real cube root) or a zero modulus.
pub fn hertz_contact(inputs: &ContactInputs) -> Result<ContactResult> {
    let force = inputs.force_mn * MILLINEWTON;
    let counter_modulus = inputs.counter_modulus_gpa * GIGAPASCAL;
    let plane_modulus = inputs.plane_modulus_gpa * GIGAPASCAL;
    let radius = inputs.radius_um * MICROMETRE;

    let e_star = equivalent_modulus(
        counter_modulus,
        inputs.counter_poisson,
        plane_modulus,
        inputs.plane_poisson,
    );

    // Kept as in the lab scripts: (1/R)^-1 is R, so this is 1/R + R.
    // TODO: switch to 1/R1 + 1/R2 once a second radius is part of the inputs.
    let curvature_sum = 1.0 / radius + (1.0 / radius).powi(-1);

    let contact_radius = (3.0 * force * radius / (4.0 * e_star)).powf(1.0 / 3.0);
    let contact_pressure = 3.0 * force / (2.0 * PI * contact_radius.powi(2));

    let result = ContactResult {
        curvature_sum,
        equivalent_modulus: e_star,
        contact_radius,
        contact_pressure,
    };

    for (quantity, value) in [
        ("curvature_sum", result.curvature_sum),
        ("equivalent elastic modulus", result.equivalent_modulus),
        ("contact radius", result.contact_radius),
        ("contact pressure", result.contact_pressure),
    ] {
        if !value.is_finite() {
            return Err(ContactError::NonFinite { quantity, value });
        }
    }

    log::debug!("Hertz contact: {:?} -> {:?}", inputs, result);
    Ok(result)
}

/// Format `value` in scientific notation with a signed, two-digit exponent (`2.00e+04`).
pub fn format_sci(value: f64, precision: usize) -> String {
    let raw = format!("{:.*e}", precision, value);
    match raw.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            Err(_) => raw,
        },
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_inputs() -> ContactInputs {
        ContactInputs {
            force_mn: 10.0,
            counter_modulus_gpa: 70.0,
            counter_poisson: 0.33,
            radius_um: 50.0,
            plane_modulus_gpa: 200.0,
            plane_poisson: 0.3,
        }
    }

    fn assert_rel(actual: f64, expected: f64, tol: f64) {
        let rel = ((actual - expected) / expected).abs();
        assert!(rel < tol, "actual={} expected={} rel={}", actual, expected, rel);
    }

    #[test]
    fn test_reference_contact() {
        let result = hertz_contact(&reference_inputs()).unwrap();

        // Hand-computed from the SI-converted Hertz formulas.
        let e_star = 1.0 / ((1.0 - 0.33f64.powi(2)) / 70e9 + (1.0 - 0.3f64.powi(2)) / 200e9);
        let a = (3.0 * 0.01 * 50e-6 / (4.0 * e_star)).powf(1.0 / 3.0);
        let p = 3.0 * 0.01 / (2.0 * PI * a * a);

        assert_rel(result.equivalent_modulus, e_star, 1e-12);
        assert_rel(result.contact_radius, a, 1e-12);
        assert_rel(result.contact_pressure, p, 1e-12);

        // 3 significant figures
        assert_rel(result.equivalent_modulus, 5.79e10, 5e-3);
        assert_rel(result.contact_radius, 1.86e-6, 5e-3);
        assert_rel(result.contact_pressure_gpa(), 1.37, 5e-3);
    }

    #[test]
    fn test_equivalent_modulus_symmetric() {
        let cases = [
            (70e9, 0.33, 200e9, 0.3),
            (210e9, 0.29, 3e9, 0.45),
            (1e9, 0.0, 1e12, 0.49),
        ];
        for (e1, nu1, e2, nu2) in cases {
            let forward = equivalent_modulus(e1, nu1, e2, nu2);
            let swapped = equivalent_modulus(e2, nu2, e1, nu1);
            assert_rel(forward, swapped, 1e-12);
        }

        let inputs = reference_inputs();
        let swapped = ContactInputs {
            counter_modulus_gpa: inputs.plane_modulus_gpa,
            counter_poisson: inputs.plane_poisson,
            plane_modulus_gpa: inputs.counter_modulus_gpa,
            plane_poisson: inputs.counter_poisson,
            ..inputs
        };
        let a = hertz_contact(&inputs).unwrap();
        let b = hertz_contact(&swapped).unwrap();
        assert_rel(a.equivalent_modulus, b.equivalent_modulus, 1e-12);
        assert_rel(a.contact_pressure, b.contact_pressure, 1e-12);
    }

    #[test]
    fn test_curvature_sum_literal_formula() {
        // Known discrepancy: this is 1/R + R rather than a sum of curvatures.
        let result = hertz_contact(&reference_inputs()).unwrap();
        let r = 50e-6;
        assert_rel(result.curvature_sum, 1.0 / r + r, 1e-12);
        assert_ne!(result.curvature_sum, 2.0 / r);
    }

    #[test]
    fn test_negative_radius_is_error() {
        let inputs = ContactInputs {
            radius_um: -50.0,
            ..reference_inputs()
        };
        assert!(matches!(
            hertz_contact(&inputs),
            Err(ContactError::NonFinite { quantity: "contact radius", .. })
        ));
    }

    #[test]
    fn test_zero_force_is_error() {
        let inputs = ContactInputs {
            force_mn: 0.0,
            ..reference_inputs()
        };
        // zero contact radius makes the pressure 0/0
        assert!(hertz_contact(&inputs).is_err());
    }

    #[test]
    fn test_display() {
        let result = hertz_contact(&reference_inputs()).unwrap();
        let text = result.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "curvature_sum: 2.00e+04 m^-1");
        assert_eq!(lines[1], "Equivalent Elastic Modulus: 5.79e+10 Pa");
        assert_eq!(lines[2], "Contact Radius: 1.86e-06 m");
        assert_eq!(lines[3], "Contact Pressure: 1.37 GPa");
    }

    #[test]
    fn test_format_sci() {
        assert_eq!(format_sci(20000.0, 2), "2.00e+04");
        assert_eq!(format_sci(1.864e-6, 2), "1.86e-06");
        assert_eq!(format_sci(0.0, 2), "0.00e+00");
        assert_eq!(format_sci(-1.5e123, 1), "-1.5e+123");
        assert_eq!(format_sci(f64::NAN, 2), "NaN");
    }
}
