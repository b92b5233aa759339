//! Health classification of aggregated coverage against thresholds.

use crate::models::{AggregateResult, HealthIndicator};
use crate::resolver::ConfigError;

/// The two threshold fractions a run is classified against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Below this fraction the run is an error.
    pub min: f64,
    /// At or above this fraction the run is a success.
    pub ok: f64,
}

impl Thresholds {
    /// Parse a `"min,ok"` pair of whole percentages (0-100 each, min <= ok).
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let malformed = || ConfigError::MalformedPercentages(s.to_string());
        let (min, ok) = s.split_once(',').ok_or_else(malformed)?;
        let min: u32 = min.trim().parse().map_err(|_| malformed())?;
        let ok: u32 = ok.trim().parse().map_err(|_| malformed())?;
        if min > 100 || ok > 100 || min > ok {
            return Err(malformed());
        }
        Ok(Self {
            min: f64::from(min) / 100.0,
            ok: f64::from(ok) / 100.0,
        })
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { min: 0.5, ok: 0.9 }
    }
}

/// Classify final totals. Pure: the same `(percentage, min, ok)` always
/// yields the same indicator and message.
///
/// Boundaries: a percentage exactly at `min` is a warning, not an error;
/// exactly at `ok` is a success. An empty aggregate (no members found
/// anywhere) is an error with a distinct message.
pub fn evaluate(aggregate: &AggregateResult, thresholds: Thresholds) -> (HealthIndicator, String) {
    let Some(pct) = aggregate.documented_percentage() else {
        return (
            HealthIndicator::Error,
            "No public API members were found; nothing was analyzed.".to_string(),
        );
    };

    if pct < thresholds.min {
        (
            HealthIndicator::Error,
            "Documentation coverage is below the minimum threshold.".to_string(),
        )
    } else if pct < thresholds.ok {
        (
            HealthIndicator::Warning,
            "Documentation coverage is below the acceptable threshold.".to_string(),
        )
    } else {
        (
            HealthIndicator::Success,
            "Documentation coverage passed.".to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregate(total: usize, undocumented: usize) -> AggregateResult {
        AggregateResult { total, undocumented }
    }

    fn classify(total: usize, undocumented: usize) -> HealthIndicator {
        evaluate(&aggregate(total, undocumented), Thresholds::default()).0
    }

    #[test]
    fn classification_bands() {
        assert_eq!(classify(10, 6), HealthIndicator::Error); // 40%
        assert_eq!(classify(10, 3), HealthIndicator::Warning); // 70%
        assert_eq!(classify(10, 0), HealthIndicator::Success); // 100%
    }

    #[test]
    fn boundary_at_min_is_not_error() {
        // Exactly 50% with thresholds 50,90
        assert_eq!(classify(10, 5), HealthIndicator::Warning);
    }

    #[test]
    fn boundary_at_ok_is_success() {
        // Exactly 90% with thresholds 50,90
        assert_eq!(classify(10, 1), HealthIndicator::Success);
    }

    #[test]
    fn empty_aggregate_is_error() {
        let (health, message) = evaluate(&AggregateResult::default(), Thresholds::default());
        assert_eq!(health, HealthIndicator::Error);
        assert!(message.contains("No public API members"));
    }

    #[test]
    fn evaluate_is_pure() {
        let a = aggregate(10, 3);
        let first = evaluate(&a, Thresholds::default());
        let second = evaluate(&a, Thresholds::default());
        assert_eq!(first, second);
    }

    #[test]
    fn parse_thresholds() {
        let t = Thresholds::parse("50,90").unwrap();
        assert_eq!(t, Thresholds { min: 0.5, ok: 0.9 });
        assert!(Thresholds::parse("80, 90").is_ok());
        assert!(Thresholds::parse("90").is_err());
        assert!(Thresholds::parse("a,b").is_err());
        assert!(Thresholds::parse("50,101").is_err());
        assert!(Thresholds::parse("90,50").is_err());
    }
}
