use std::{fs::File, io::Write, path::Path, time::Instant};

use strum::Display;

use crate::{network::Network, options::Options, Result};

use super::all_or_nothing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Termination {
    Converged,
    IterationLimitReached,
}

/// Diagnostics of a single equilibrium iteration.
#[derive(Debug, Clone)]
pub struct IterationRecord {
    pub iteration: usize,
    /// Seconds since the solve started, including the initial loading.
    pub elapsed_seconds: f64,
    pub step_size: f64,
    pub gap: f64,
}

/// Outcome of [`Network::user_equilibrium`]. The equilibrium flows themselves stay on the
/// network.
#[derive(Debug, Clone)]
pub struct Equilibrium {
    pub termination: Termination,
    pub iterations: usize,
    pub gap: f64,
    pub trace: Vec<IterationRecord>,
}

impl Equilibrium {
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    /// Writes the iteration trace as CSV with the columns `iteration,cumulative_seconds,gap`.
    pub fn write_trace(&self, filename: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(filename)?;
        writeln!(file, "iteration,cumulative_seconds,gap")?;
        for record in self.trace.iter() {
            writeln!(
                file,
                "{},{},{}",
                record.iteration, record.elapsed_seconds, record.gap
            )?;
        }
        Ok(())
    }
}

pub(crate) fn user_equilibrium(network: &mut Network, options: &Options) -> Result<Equilibrium> {
    options.validate()?;
    network.validate_network()?;
    log::info!(
        "Solving for user equilibrium with step rule {}, gap function {} and {} shortest paths.",
        options.step_rule,
        options.gap_fn,
        options.shortest_path
    );

    let start = Instant::now();
    let initial = all_or_nothing(network, &options.shortest_path)?;
    network.shift_flows(&initial, 1.0)?;

    let mut trace = Vec::with_capacity(options.max_iterations.min(1024));
    let mut gap = f64::INFINITY;
    for iteration in 1..=options.max_iterations {
        let target = all_or_nothing(network, &options.shortest_path)?;
        let step_size = options.step_rule.apply(
            network,
            &target,
            iteration,
            options.line_search_tolerance,
        )?;
        network.shift_flows(&target, step_size)?;
        gap = options.gap_fn.apply(network, &options.shortest_path)?;

        trace.push(IterationRecord {
            iteration,
            elapsed_seconds: start.elapsed().as_secs_f64(),
            step_size,
            gap,
        });
        log::debug!("Iteration {iteration}: step size {step_size:.6}, gap {gap:e}");

        if gap <= options.target_gap {
            log::info!("Converged after {iteration} iterations with gap {gap:e}.");
            return Ok(Equilibrium {
                termination: Termination::Converged,
                iterations: iteration,
                gap,
                trace,
            });
        }
    }

    log::warn!(
        "Stopped after {} iterations with gap {gap:e}, target was {:e}.",
        options.max_iterations,
        options.target_gap
    );
    Ok(Equilibrium {
        termination: Termination::IterationLimitReached,
        iterations: options.max_iterations,
        gap,
        trace,
    })
}
