use clap::{Parser, Subcommand};
use wardrop::{GapFunction, Options, ShortestPathAlgorithm, StepSizeRule};

/// CLI for the wardrop traffic assignment library.
#[derive(Parser, Debug)]
#[command()]
pub(crate) struct Args {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Enable [v]erbose debug logging
    #[arg(long, short = 'v', global = true, display_order = 1)]
    pub(crate) debug: bool,

    /// Enable [t]race logging
    #[arg(long, short, global = true, display_order = 2)]
    pub(crate) trace: bool,

    /// Disable logging, [q]uieting output. Takes precedence over debug.
    #[arg(long, short, global = true, display_order = 3)]
    pub(crate) quiet: bool,

    /// [E]xport a report of every solve, appending it to the given file.
    #[arg(long, short, global = true, display_order = 4)]
    pub(crate) export: Option<String>,

    /// Rule choosing the [s]tep size of each iteration
    #[arg(long, short='s', value_enum, default_value_t = StepSizeRule::FrankWolfe, global = true, display_order = 11, help_heading="Solver Parameters")]
    pub(crate) step_rule: StepSizeRule,

    /// Convergence [g]ap evaluated after each iteration
    #[arg(long, short='g', value_enum, default_value_t = GapFunction::RelativeGap, global = true, display_order = 12, help_heading="Solver Parameters")]
    pub(crate) gap_fn: GapFunction,

    /// Shortest [p]ath algorithm used for all-or-nothing loading
    #[arg(long, short='p', value_enum, default_value_t = ShortestPathAlgorithm::HeapDijkstra, global = true, display_order = 13, help_heading="Solver Parameters")]
    pub(crate) shortest_path: ShortestPathAlgorithm,

    /// [M]aximum number of iterations
    #[arg(long, short = 'm', default_value_t = 1000, global = true, display_order = 14, help_heading="Solver Parameters")]
    pub(crate) max_iterations: usize,

    /// Gap at which the solve counts as converged. 0 runs until the iteration limit.
    #[arg(long, default_value_t = 1e-4, global = true, display_order = 15, help_heading="Solver Parameters")]
    pub(crate) target_gap: f64,

    /// Bisection tolerance of the Frank-Wolfe line search
    #[arg(long, default_value_t = 1e-10, global = true, display_order = 16, help_heading="Solver Parameters")]
    pub(crate) line_search_tolerance: f64,
}

impl Args {
    pub(crate) fn options(&self) -> Options {
        Options {
            step_rule: self.step_rule,
            gap_fn: self.gap_fn,
            shortest_path: self.shortest_path,
            max_iterations: self.max_iterations,
            target_gap: self.target_gap,
            line_search_tolerance: self.line_search_tolerance,
        }
    }
}

#[derive(Parser, Debug)]
pub(crate) struct RandomizationArgs {
    /// The probability of each ordered node pair having demand
    #[arg(
        long,
        default_value_t = 0.2,
        display_order = 100,
        help_heading = "Random Demand"
    )]
    pub(crate) demand_density: f64,

    /// Minimum demand of generated OD pairs
    #[arg(
        long,
        default_value_t = 1.0,
        display_order = 101,
        help_heading = "Random Demand"
    )]
    pub(crate) dmin: f64,

    /// Maximum demand of generated OD pairs
    #[arg(
        long,
        default_value_t = 50.0,
        display_order = 102,
        help_heading = "Random Demand"
    )]
    pub(crate) dmax: f64,

    /// Minimum capacity of generated links
    #[arg(
        long,
        default_value_t = 100.0,
        display_order = 201,
        help_heading = "Random Links"
    )]
    pub(crate) umin: f64,

    /// Maximum capacity of generated links
    #[arg(
        long,
        default_value_t = 500.0,
        display_order = 202,
        help_heading = "Random Links"
    )]
    pub(crate) umax: f64,

    /// Minimum free-flow time of generated links
    #[arg(
        long,
        default_value_t = 1.0,
        display_order = 203,
        help_heading = "Random Links"
    )]
    pub(crate) tmin: f64,

    /// Maximum free-flow time of generated links
    #[arg(
        long,
        default_value_t = 10.0,
        display_order = 204,
        help_heading = "Random Links"
    )]
    pub(crate) tmax: f64,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve for user equilibrium on a TNTP network.
    Solve {
        /// Path to the TNTP network file.
        net: String,

        /// Path to the TNTP trips file.
        trips: String,

        /// Path to [o]utput file to save the equilibrium link flows in
        #[arg(short, long, display_order = 0)]
        output: Option<String>,

        /// Path to a CSV file to save the iteration trace in
        #[arg(long, display_order = 0)]
        trace_output: Option<String>,
    },
    /// Perform a single all-or-nothing loading at free-flow costs.
    Aon {
        /// Path to the TNTP network file.
        net: String,

        /// Path to the TNTP trips file.
        trips: String,

        /// Path to [o]utput file to save the link flows in
        #[arg(short, long, display_order = 0)]
        output: Option<String>,
    },
    /// Evaluate the convergence gaps of a given flow pattern.
    Gap {
        /// Path to the TNTP network file.
        net: String,

        /// Path to the TNTP trips file.
        trips: String,

        /// Path to a flow file with one "(tail,head) flow" line per link.
        flows: String,
    },
    /// Compare two flow files link by link.
    Compare {
        /// Path to the flow file to check.
        flows: String,

        /// Path to the reference flow file.
        expected: String,

        /// Relative tolerance, absolute for reference values near zero.
        #[arg(long, default_value_t = 0.01, display_order = 0)]
        tolerance: f64,
    },
    /// Benchmark all-or-nothing loading and the full solve.
    Benchmark {
        /// Path to the TNTP network file.
        net: String,

        /// Path to the TNTP trips file.
        trips: String,

        /// Number of [i]terations over which to average
        #[arg(short, long, display_order = 0)]
        iterations: usize,
    },
    /// Solve a random grid network instead of using input files.
    Random {
        /// Number of nodes along each side of the grid
        size: usize,

        /// Path to [o]utput file to save the equilibrium link flows in
        #[arg(short, long, display_order = 0)]
        output: Option<String>,

        #[command(flatten)]
        random: RandomizationArgs,
    },
}
