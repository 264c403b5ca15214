//! Hourly snow water equivalent derivation.

use crate::{check_lengths, ModelResult};

/// Precipitation counts as snow below this temperature (deg C).
pub const SNOW_TEMPERATURE_THRESHOLD_C: f64 = 1.0;

/// Derive the hourly SWE series: precipitation where the temperature is
/// below 1 degC, zero otherwise. Series must be parallel and time-aligned.
pub fn hourly_swe(temperatures_c: &[f64], precipitation_mm: &[f64]) -> ModelResult<Vec<f64>> {
    check_lengths(temperatures_c.len(), precipitation_mm.len())?;
    Ok(temperatures_c
        .iter()
        .zip(precipitation_mm)
        .map(|(t, p)| {
            if *t < SNOW_TEMPERATURE_THRESHOLD_C {
                *p
            } else {
                0.0
            }
        })
        .collect())
}

/// Total SWE (mm) over the supplied window.
pub fn total_swe(temperatures_c: &[f64], precipitation_mm: &[f64]) -> ModelResult<f64> {
    Ok(hourly_swe(temperatures_c, precipitation_mm)?.iter().sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelError;

    #[test]
    fn test_threshold() {
        let temps = [-5.0, 0.9, 1.0, 1.1];
        let precip = [2.0, 3.0, 4.0, 5.0];
        let swe = hourly_swe(&temps, &precip).unwrap();
        assert_eq!(swe, vec![2.0, 3.0, 0.0, 0.0]);
    }

    #[test]
    fn test_total() {
        let temps = [-5.0, 2.0, 0.0];
        let precip = [1.5, 10.0, 2.5];
        assert_eq!(total_swe(&temps, &precip).unwrap(), 4.0);
    }

    #[test]
    fn test_mismatched_lengths_are_fatal() {
        let err = hourly_swe(&[0.0, 1.0], &[2.0]).unwrap_err();
        assert_eq!(err, ModelError::LengthMismatch { left: 2, right: 1 });
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(total_swe(&[], &[]).unwrap(), 0.0);
    }
}
