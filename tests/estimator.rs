use at_funding_sim::io::scenario::Scenario;
use at_funding_sim::{
    evaluate, run, trial_count, FixedInputs, MonteCarloEstimator, SampledTrialParams, SimError,
    SimulationConfig, Spread, StdDevKind, VariabilityConfig,
};

fn reference_fixed() -> FixedInputs {
    FixedInputs {
        num_participants: 100,
        purchase_cost: 5000.0,
        maintenance_cost: 500.0,
        usage_duration: 5.0,
        repair_cost: 300.0,
        funding_coverage: 0.8,
        upgrade_prob: 0.2,
        initial_budget: 100_000.0,
    }
}

fn reference_variability() -> VariabilityConfig {
    VariabilityConfig {
        repair_frequency: Spread::fixed(1.5),
        repair_cost: Spread::fixed(300.0),
        rental_cost: Spread::fixed(200.0),
        replacement_threshold: Spread::fixed(0.5),
    }
}

#[test]
fn end_to_end_reference_scenario() {
    let outcome = run(&reference_fixed(), &reference_variability(), 1000).unwrap();

    assert_eq!(outcome.trials, 1000);
    assert!((outcome.purchase.mean - 930_000.0).abs() < 1e-6);
    assert!((outcome.hire.mean - 1_380_000.0).abs() < 1e-6);
    assert_eq!(outcome.purchase.standard_error, 0.0);
    assert_eq!(outcome.hire.standard_error, 0.0);
}

#[test]
fn upgrade_boundary_through_public_api() {
    let fixed = reference_fixed();
    // Boundary: 5000 * 0.0625 = 312.5.
    let at = SampledTrialParams {
        repair_frequency: 1.5,
        repair_cost: 312.5,
        rental_cost: 200.0,
        replacement_threshold: 0.0625,
    };
    let just_above = SampledTrialParams {
        repair_cost: 313.0,
        ..at
    };

    // Fixed part: 100 * 5000 + 100 * 500 * 5 = 750_000.
    // Repairs: repair_cost * 0.8 * 1.5 * 5 * 100 = repair_cost * 600.
    let at_total = evaluate(&fixed, &at).purchase_total;
    let above_total = evaluate(&fixed, &just_above).purchase_total;

    assert!((at_total - (750_000.0 + 187_500.0)).abs() < 1e-6);
    assert!((above_total - (750_000.0 + 187_800.0 + 100_000.0)).abs() < 1e-6);
}

#[test]
fn non_positive_trials_never_produce_an_outcome() {
    for requested in [0_i64, -1, -1000] {
        assert!(matches!(
            trial_count(requested),
            Err(SimError::InvalidConfiguration(_))
        ));
    }
    assert!(matches!(
        run(&reference_fixed(), &reference_variability(), 0),
        Err(SimError::InvalidConfiguration(_))
    ));
}

#[test]
fn invalid_fixed_inputs_are_rejected_at_entry() {
    let fixed = FixedInputs {
        upgrade_prob: 1.5,
        ..reference_fixed()
    };
    assert!(matches!(
        run(&fixed, &reference_variability(), 10),
        Err(SimError::InvalidConfiguration(_))
    ));
}

#[test]
fn noisy_run_has_positive_uncertainty() {
    let outcome = MonteCarloEstimator::new(SimulationConfig {
        trials: 2000,
        seed: Some(2024),
        parallel: true,
        std_dev: StdDevKind::Population,
    })
    .run(&reference_fixed(), &VariabilityConfig::default())
    .unwrap();

    assert!(outcome.purchase.standard_error > 0.0);
    assert!(outcome.hire.standard_error > 0.0);
    assert!(outcome.purchase_costs.iter().all(|&c| c >= 0.0));
    assert!(outcome.hire_costs.iter().all(|&c| c >= 0.0));
    // Rental alone is 1.2M at the center; the estimate sits well above zero.
    assert!(outcome.hire.mean > 1_000_000.0);
}

#[test]
fn sample_estimator_is_wider_than_population() {
    let base = SimulationConfig {
        trials: 50,
        seed: Some(17),
        ..SimulationConfig::default()
    };
    let population = MonteCarloEstimator::new(base.clone())
        .run(&reference_fixed(), &VariabilityConfig::default())
        .unwrap();
    let sample = MonteCarloEstimator::new(SimulationConfig {
        std_dev: StdDevKind::Sample,
        ..base
    })
    .run(&reference_fixed(), &VariabilityConfig::default())
    .unwrap();

    assert_eq!(population.hire_costs, sample.hire_costs);
    assert!(sample.hire.standard_error > population.hire.standard_error);
}

#[test]
fn scenario_feeds_the_estimator() {
    let scenario = Scenario::from_json_str(
        r#"{
            "fixed": { "usage_duration": 2 },
            "variability": {
                "repair_frequency": { "center": 1.5, "spread": 0 },
                "repair_cost": { "center": 300, "spread": 0 },
                "rental_cost": { "center": 200, "spread": 0 },
                "replacement_threshold": { "center": 0.5, "spread": 0 }
            },
            "trials": 20,
            "seed": 1
        }"#,
    )
    .unwrap();

    let trials = trial_count(scenario.trials.unwrap()).unwrap();
    let outcome = MonteCarloEstimator::new(SimulationConfig {
        trials,
        seed: scenario.seed,
        ..SimulationConfig::default()
    })
    .run(&scenario.fixed, &scenario.variability)
    .unwrap();

    // 100 * 5000 + 100 * 500 * 2 + 300 * 0.8 * 1.5 * 2 * 100
    assert!((outcome.purchase.mean - 672_000.0).abs() < 1e-6);
    // 100 * 200 * 12 * 2 + 72_000
    assert!((outcome.hire.mean - 552_000.0).abs() < 1e-6);
}
