use std::time::{Duration, Instant};

use wardrop::{Network, Options, ShortestPathAlgorithm};

pub(crate) fn run_benchmark(network: &Network, options: &Options, iterations: usize) {
    for algorithm in [
        ShortestPathAlgorithm::LabelSetting,
        ShortestPathAlgorithm::HeapDijkstra,
    ] {
        let mut loading = Duration::ZERO;
        for _ in 0..iterations {
            let start_loading = Instant::now();
            crate::attempt!(network.all_or_nothing(&algorithm));
            loading += start_loading.elapsed();
        }
        loading /= iterations as u32;

        println!(
            "All-or-nothing loading with {} took {}s and {}ms on average (n={}).",
            algorithm,
            loading.as_secs(),
            loading.subsec_millis(),
            iterations,
        );
    }

    let mut solve = Duration::ZERO;
    let mut total_iterations = 0;
    for _ in 0..iterations {
        let mut n: Network = network.clone();

        let start_solve = Instant::now();
        let equilibrium = crate::attempt!(n.user_equilibrium(options));
        solve += start_solve.elapsed();
        total_iterations += equilibrium.iterations;
    }
    solve /= iterations as u32;

    println!(
        "Solving for user equilibrium took {}s and {}ms and {} iterations on average (n={}).",
        solve.as_secs(),
        solve.subsec_millis(),
        total_iterations / iterations,
        iterations,
    );
}
