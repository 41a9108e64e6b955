mod util;

use clap::Parser;

use util::{run_benchmark, setup_logger, Args, Commands};
use wardrop::{
    approx_equal, read_flows_file, write_flows_file, Equilibrium, Network, Options,
};

/// Unwraps a library result, or logs the error and exits.
#[macro_export]
macro_rules! attempt {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        }
    };
}

fn main() {
    let args = Args::parse();
    setup_logger(&args);
    let options = args.options();
    attempt!(options.validate());

    match &args.command {
        Commands::Solve {
            net,
            trips,
            output,
            trace_output,
        } => {
            let mut network = attempt!(Network::from_tntp(net, trips));
            let equilibrium = attempt!(network.user_equilibrium(&options));
            println!("{network}");
            print_summary(&network, &equilibrium);

            if let Some(path) = output {
                attempt!(write_flows_file(path, &network.flows()));
            }
            if let Some(path) = trace_output {
                attempt!(equilibrium.write_trace(path));
            }
            export(&args, &network, &equilibrium, &options);
        }
        Commands::Aon { net, trips, output } => {
            let mut network = attempt!(Network::from_tntp(net, trips));
            attempt!(network.validate_network());
            let flows = attempt!(network.all_or_nothing(&options.shortest_path));
            attempt!(network.shift_flows(&flows, 1.0));
            println!("{network}");

            if let Some(path) = output {
                attempt!(write_flows_file(path, &network.flows()));
            }
        }
        Commands::Gap { net, trips, flows } => {
            let mut network = attempt!(Network::from_tntp(net, trips));
            attempt!(network.set_flows(&attempt!(read_flows_file(flows))));
            let metrics = attempt!(network.metrics());

            println!("Relative gap:          {:e}", metrics.relative_gap);
            println!("Average excess cost:   {:e}", metrics.average_excess_cost);
            println!("Total system travel time: {:.3}", metrics.total_system_travel_time);
            println!("Beckmann objective:       {:.3}", network.beckmann_objective());
        }
        Commands::Compare {
            flows,
            expected,
            tolerance,
        } => {
            let flows = attempt!(read_flows_file(flows));
            let expected = attempt!(read_flows_file(expected));

            let mut mismatches = 0;
            for (link, target) in expected.iter() {
                match flows.get(link) {
                    Some(value) if approx_equal(*value, *target, *tolerance) => {}
                    Some(value) => {
                        log::warn!("Link {link} carries {value}, expected {target}.");
                        mismatches += 1;
                    }
                    None => {
                        log::warn!("Link {link} is missing.");
                        mismatches += 1;
                    }
                }
            }
            for link in flows.keys().filter(|link| !expected.contains_key(link)) {
                log::warn!("Link {link} is not part of the expected flows.");
                mismatches += 1;
            }

            if mismatches > 0 {
                log::error!("{mismatches} of {} links differ.", expected.len());
                std::process::exit(1);
            }
            println!("All {} link flows match.", expected.len());
        }
        Commands::Benchmark {
            net,
            trips,
            iterations,
        } => {
            if *iterations == 0 {
                log::error!("Benchmarking needs at least one iteration.");
                std::process::exit(1);
            }
            let network = attempt!(Network::from_tntp(net, trips));
            attempt!(network.validate_network());
            run_benchmark(&network, &options, *iterations);
        }
        Commands::Random {
            size,
            output,
            random,
        } => {
            let mut network = attempt!(Network::from_random(
                *size,
                random.demand_density,
                (random.tmin, random.tmax),
                (random.umin, random.umax),
                (random.dmin, random.dmax),
            ));
            let equilibrium = attempt!(network.user_equilibrium(&options));
            println!("{network}");
            print_summary(&network, &equilibrium);

            if let Some(path) = output {
                attempt!(write_flows_file(path, &network.flows()));
            }
            export(&args, &network, &equilibrium, &options);
        }
    }
}

fn print_summary(network: &Network, equilibrium: &Equilibrium) {
    println!(
        "\n{} after {} iterations with gap {:e}.",
        equilibrium.termination, equilibrium.iterations, equilibrium.gap
    );
    println!(
        "Beckmann objective is {:.3}.",
        network.beckmann_objective()
    );
    if let Some(record) = equilibrium.trace.last() {
        let elapsed = std::time::Duration::from_secs_f64(record.elapsed_seconds);
        println!(
            "Solving took {}s and {}ms.",
            elapsed.as_secs(),
            elapsed.subsec_millis()
        );
    }
}

fn export(args: &Args, network: &Network, equilibrium: &Equilibrium, options: &Options) {
    if let Some(filename) = &args.export {
        attempt!(network.export(filename, equilibrium, options));
        log::info!("Appended report to {filename}.");
    }
}
