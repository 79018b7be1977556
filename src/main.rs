use at_funding_sim::io::reporting;
use at_funding_sim::io::scenario::Scenario;
use at_funding_sim::logging::init_logging;
use at_funding_sim::strategy::implementations::{HireStrategy, PurchaseStrategy};
use at_funding_sim::strategy::traits::FundingStrategy;
use at_funding_sim::{
    trial_count, MonteCarloEstimator, SimError, SimulationConfig, Spread, StdDevKind,
    DEFAULT_TRIALS,
};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "at-funding-sim")]
#[command(about = "Compare purchase vs hire funding for assistive technology by Monte Carlo")]
struct Args {
    /// JSON scenario file; flags below override its values
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Number of trials
    #[arg(short, long, allow_negative_numbers = true)]
    trials: Option<i64>,

    /// Run seed for a reproducible estimate
    #[arg(long)]
    seed: Option<u64>,

    /// Spread trials across all cores
    #[arg(long)]
    parallel: bool,

    /// Use the N-1 standard deviation for the standard error
    #[arg(long)]
    sample_std_dev: bool,

    /// Write per-trial samples to this CSV file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    // Funding agency
    #[arg(long)]
    initial_budget: Option<f64>,
    #[arg(long)]
    purchase_cost: Option<f64>,
    /// Annual, per device
    #[arg(long)]
    maintenance_cost: Option<f64>,
    /// Monthly, per device
    #[arg(long)]
    rental_cost: Option<f64>,

    // Repairs
    #[arg(long)]
    repair_cost: Option<f64>,
    /// Repairs per device per year
    #[arg(long)]
    repair_frequency: Option<f64>,
    /// Fraction of purchase cost, 0..=1
    #[arg(long)]
    replacement_threshold: Option<f64>,
    /// Fraction of repair cost paid by the funder, 0..=1
    #[arg(long)]
    funding_coverage: Option<f64>,

    // Variability (standard deviations)
    #[arg(long)]
    repair_cost_variability: Option<f64>,
    #[arg(long)]
    repair_frequency_variability: Option<f64>,
    #[arg(long)]
    rental_cost_variability: Option<f64>,
    #[arg(long)]
    replacement_threshold_variability: Option<f64>,

    // Participants
    #[arg(long)]
    num_participants: Option<u32>,
    /// Probability of a device change, 0..=1
    #[arg(long)]
    upgrade_prob: Option<f64>,
    /// Years
    #[arg(long)]
    usage_duration: Option<f64>,
}

fn override_spread(spread: &mut Spread, center: Option<f64>, variability: Option<f64>) {
    if let Some(c) = center {
        spread.center = c;
    }
    if let Some(v) = variability {
        spread.spread = v;
    }
}

fn apply_overrides(scenario: &mut Scenario, args: &Args) {
    let fixed = &mut scenario.fixed;
    let pairs = [
        (&mut fixed.initial_budget, args.initial_budget),
        (&mut fixed.purchase_cost, args.purchase_cost),
        (&mut fixed.maintenance_cost, args.maintenance_cost),
        (&mut fixed.funding_coverage, args.funding_coverage),
        (&mut fixed.upgrade_prob, args.upgrade_prob),
        (&mut fixed.usage_duration, args.usage_duration),
    ];
    for (field, value) in pairs {
        if let Some(v) = value {
            *field = v;
        }
    }
    if let Some(n) = args.num_participants {
        fixed.num_participants = n;
    }

    // The repair cost baseline is both a fixed input and the sampled center.
    if let Some(cost) = args.repair_cost {
        fixed.repair_cost = cost;
    }
    let variability = &mut scenario.variability;
    override_spread(
        &mut variability.repair_cost,
        args.repair_cost,
        args.repair_cost_variability,
    );
    override_spread(
        &mut variability.repair_frequency,
        args.repair_frequency,
        args.repair_frequency_variability,
    );
    override_spread(
        &mut variability.rental_cost,
        args.rental_cost,
        args.rental_cost_variability,
    );
    override_spread(
        &mut variability.replacement_threshold,
        args.replacement_threshold,
        args.replacement_threshold_variability,
    );

    if args.trials.is_some() {
        scenario.trials = args.trials;
    }
    if args.seed.is_some() {
        scenario.seed = args.seed;
    }
}

fn try_main(args: Args) -> Result<(), SimError> {
    // 1. LOAD PARAMETERS
    let mut scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    apply_overrides(&mut scenario, &args);

    // 2. TRIAL COUNT (inputs are validated by the estimator)
    let trials = trial_count(scenario.trials.unwrap_or(DEFAULT_TRIALS as i64))?;

    // 3. RUN
    let config = SimulationConfig {
        trials,
        seed: scenario.seed,
        parallel: args.parallel,
        std_dev: if args.sample_std_dev {
            StdDevKind::Sample
        } else {
            StdDevKind::Population
        },
    };
    let outcome = MonteCarloEstimator::new(config).run(&scenario.fixed, &scenario.variability)?;

    // 4. REPORT
    println!("=== Assistive Technology Funding Simulation ===");
    let strategies: [&dyn FundingStrategy; 2] = [&PurchaseStrategy, &HireStrategy];
    println!(
        "Strategies compared: {}",
        strategies.map(|s| s.label()).join(" vs ")
    );
    for line in reporting::summary_lines(&outcome, scenario.fixed.initial_budget) {
        println!("{line}");
    }

    // 5. EXPORT
    if let Some(path) = &args.export {
        reporting::write_samples_csv(path, &outcome)?;
        println!("Samples written to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    match try_main(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
