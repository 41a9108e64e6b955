mod gap;
mod shortest_path;
mod step_size;

pub use gap::GapFunction;
pub use shortest_path::ShortestPathAlgorithm;
pub use step_size::StepSizeRule;

use crate::{Result, SolverError};

#[derive(Debug, Clone)]
pub struct Options {
    pub step_rule: StepSizeRule,
    pub gap_fn: GapFunction,
    pub shortest_path: ShortestPathAlgorithm,
    pub max_iterations: usize,
    /// A target of 0 runs until `max_iterations` unless the gap vanishes exactly.
    pub target_gap: f64,
    pub line_search_tolerance: f64,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            step_rule: StepSizeRule::FrankWolfe,
            gap_fn: GapFunction::RelativeGap,
            shortest_path: ShortestPathAlgorithm::HeapDijkstra,
            max_iterations: 1000,
            target_gap: 1e-4,
            line_search_tolerance: 1e-10,
        }
    }
}

impl Options {
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidOptionError(
                "at least one iteration is required".to_owned(),
            ));
        }
        if !(self.target_gap.is_finite() && self.target_gap >= 0.0) {
            return Err(SolverError::InvalidOptionError(format!(
                "target gap {} must be non-negative",
                self.target_gap
            )));
        }
        if !(self.line_search_tolerance.is_finite() && self.line_search_tolerance > 0.0) {
            return Err(SolverError::InvalidOptionError(format!(
                "line search tolerance {} must be positive",
                self.line_search_tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Options::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_options() {
        let zero_iterations = Options {
            max_iterations: 0,
            ..Options::default()
        };
        let negative_gap = Options {
            target_gap: -1e-3,
            ..Options::default()
        };
        let zero_tolerance = Options {
            line_search_tolerance: 0.0,
            ..Options::default()
        };

        for options in [zero_iterations, negative_gap, zero_tolerance] {
            assert!(matches!(
                options.validate(),
                Err(SolverError::InvalidOptionError(_))
            ));
        }
    }

    #[test]
    fn test_msa_schedule() {
        let network = crate::network::Network::new(vec![], vec![]).unwrap();
        let rule = StepSizeRule::SuccessiveAverages;

        assert_eq!(0.5, rule.apply(&network, &[], 1, 1e-10).unwrap());
        assert_eq!(0.25, rule.apply(&network, &[], 3, 1e-10).unwrap());
    }

    #[test]
    fn test_display_names() {
        assert_eq!("FW", StepSizeRule::FrankWolfe.to_string());
        assert_eq!("MSA", StepSizeRule::SuccessiveAverages.to_string());
        assert_eq!("relativeGap", GapFunction::RelativeGap.to_string());
        assert_eq!("heap-dijkstra", ShortestPathAlgorithm::HeapDijkstra.to_string());
    }
}
