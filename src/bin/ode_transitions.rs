use biodivine_ode_generator::algorithm_trait::Algorithm;
use biodivine_ode_generator::evaluator::EvaluatorStrategy;
use biodivine_ode_generator::model::OdeModel;
use biodivine_ode_generator::reachability::{
    ColoredStates, ForwardReachability, ReachabilityConfig,
};
use biodivine_ode_generator::transitions::{
    GeneratorConfig, OdeTransitionSystem, TransitionSystem,
};
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "ode_transitions")]
#[command(about = "Build the parametrized transition system of a multi-affine ODE model")]
struct Args {
    /// Path to a JSON model file
    #[arg(value_name = "FILE")]
    file: String,

    /// Derivative evaluation strategy
    #[arg(long, default_value = "interpreted", require_equals = true)]
    evaluator: Evaluator,

    /// Keep a universal self-loop on every state instead of removing escaping flow
    #[arg(long)]
    universal_self_loops: bool,

    /// Do not print individual edges, only the summary
    #[arg(long)]
    quiet: bool,

    /// Compute forward reachability from this state (for all parameters)
    #[arg(long, value_name = "STATE", require_equals = true)]
    reach_from: Option<usize>,

    /// Stop reachability after this many iterations
    #[arg(long, default_value_t = usize::MAX, require_equals = true)]
    max_iterations: usize,

    /// Logging verbosity (use -v for info, or -v=LEVEL for specific level)
    #[arg(long, short = 'v', value_name = "LEVEL", num_args = 0..=1, default_missing_value = "info", require_equals = true)]
    verbose: Option<Option<LogLevel>>,
}

#[derive(Clone, clap::ValueEnum)]
enum Evaluator {
    Interpreted,
    Compiled,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
}

impl From<Evaluator> for EvaluatorStrategy {
    fn from(value: Evaluator) -> Self {
        match value {
            Evaluator::Interpreted => EvaluatorStrategy::Interpreted,
            Evaluator::Compiled => EvaluatorStrategy::Compiled,
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
        }
    }
}

fn main() {
    let args = Args::parse();

    let log_level = match args.verbose {
        None => LevelFilter::Off,
        Some(None) => LevelFilter::Info,
        Some(Some(level)) => level.into(),
    };
    Builder::from_default_env().filter_level(log_level).init();

    let file = File::open(&args.file).unwrap_or_else(|e| {
        eprintln!("Failed to open model file {}: {}", args.file, e);
        std::process::exit(1);
    });
    let model: OdeModel = serde_json::from_reader(BufReader::new(file)).unwrap_or_else(|e| {
        eprintln!("Failed to parse model file {}: {}", args.file, e);
        std::process::exit(1);
    });

    println!(
        "Loaded model with {} variables and {} parameters.",
        model.variables.len(),
        model.parameters.len()
    );

    let config = GeneratorConfig {
        create_self_loops: !args.universal_self_loops,
        evaluator: args.evaluator.into(),
    };
    let system = OdeTransitionSystem::with_config(&model, config).unwrap_or_else(|e| {
        eprintln!("Invalid model: {}", e);
        std::process::exit(1);
    });
    let system = Arc::new(system);

    let edges = system.par_explore();
    if !args.quiet {
        for source in 0..system.state_count() {
            for target in system.successors(source) {
                println!(
                    "{} -> {}: {}",
                    system.encoder().describe(source),
                    system.encoder().describe(*target),
                    system.transition_color(source, *target)
                );
            }
        }
    }
    println!(
        "Transition system has {} states and {} edges.",
        system.state_count(),
        edges
    );

    let Some(initial) = args.reach_from else {
        return;
    };
    if initial >= system.state_count() {
        eprintln!("State {} is not in the grid.", initial);
        std::process::exit(1);
    }

    let initial = ColoredStates::with_universal_color(system.algebra(), [initial]);
    let config = ReachabilityConfig::new(system.clone()).with_max_iterations(args.max_iterations);
    let result = ForwardReachability::<OdeTransitionSystem>::configure(config, initial).run();
    match result {
        Ok(reachable) => {
            for (state, color) in reachable.iter() {
                println!("Reachable {}: {}", system.encoder().describe(state), color);
            }
            println!("Reached {} states.", reachable.len());
        }
        Err(e) => {
            eprintln!("Reachability failed: {}", e);
            std::process::exit(1);
        }
    }
}
