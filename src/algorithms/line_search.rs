use crate::{network::Network, Result, SolverError};

const MAX_BISECTIONS: usize = 100;

/// Exact line search for Frank-Wolfe: the step size in [0, 1] at which the Beckmann objective
/// is minimal on the segment from the current flows to `target`.
///
/// The objective is convex along the segment, so its derivative
/// `sum((y - x) * cost((1 - theta) * x + theta * y))` is non-decreasing in theta and bisection
/// on its sign converges to the minimiser.
pub(crate) fn frank_wolfe_step_size(
    network: &Network,
    target: &[f64],
    tolerance: f64,
) -> Result<f64> {
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(SolverError::InvalidOptionError(format!(
            "line search tolerance {tolerance} must be positive"
        )));
    }

    let derivative = |theta: f64| -> f64 {
        network
            .links
            .iter()
            .zip(target)
            .map(|(link, y)| {
                let x = link.flow;
                (y - x) * link.cost_at((1.0 - theta) * x + theta * y)
            })
            .sum()
    };

    if derivative(1.0) <= 0.0 {
        return Ok(1.0);
    }

    let (mut low, mut high) = (0.0_f64, 1.0_f64);
    for _ in 0..MAX_BISECTIONS {
        if high - low <= tolerance {
            break;
        }
        let theta = (low + high) / 2.0;
        if derivative(theta) > 0.0 {
            high = theta;
        } else {
            low = theta;
        }
    }

    let step_size = (low + high) / 2.0;
    log::trace!("Line search settled on step size {step_size}");
    Ok(step_size)
}
