// scripts/barrier_pricer.rs
use barrier_mc::analytics::bs_analytic;
use barrier_mc::math_utils::Timer;
use barrier_mc::mc::{BarrierOption, EuropeanOption, MonteCarloProduct};
use barrier_mc::models::{BlackScholesConfig, BlackScholesMonteCarlo};
use barrier_mc::ScenarioVector;
use std::error::Error;

fn report(name: &str, value: &ScenarioVector, reference: f64) {
    println!(
        "{:<22} {:>10.6} ± {:.6}   (analytic {:.6})",
        name,
        value.average(),
        value.standard_error(),
        reference
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    let number_of_time_steps = 100;
    let number_of_simulations = 100_000;
    let initial_price = 100.0;
    let final_time = 1.0;
    let volatility = 0.2;
    let risk_free_rate = 0.0;
    let strike = 100.0;
    let barrier = 70.0;

    println!("Running barrier-mc pricer\n");
    println!(
        "Paths: {}, steps: {}, rayon threads: {}",
        number_of_simulations,
        number_of_time_steps,
        rayon::current_num_threads()
    );

    let mut timer = Timer::new();
    timer.start();
    let model = BlackScholesMonteCarlo::new(BlackScholesConfig {
        steps: number_of_time_steps,
        paths: number_of_simulations,
        s0: initial_price,
        r: risk_free_rate,
        sigma: volatility,
        t: final_time,
        ..Default::default()
    })?;
    println!(
        "Simulation: {:.1} ms ({} paths on {} grid times)\n",
        timer.elapsed_ms(),
        model.number_of_paths(),
        model.discretization().number_of_times()
    );

    let european = EuropeanOption::new(final_time, strike)?;
    let barrier_option = BarrierOption::new(final_time, strike, barrier)?;

    let dt = final_time / number_of_time_steps as f64;
    let shifted_barrier = bs_analytic::discrete_barrier_adjustment(barrier, volatility, dt);
    let european_reference =
        bs_analytic::bs_call_price(initial_price, strike, risk_free_rate, volatility, final_time);
    let barrier_reference = bs_analytic::bs_down_and_out_call_price(
        initial_price,
        strike,
        shifted_barrier,
        risk_free_rate,
        volatility,
        final_time,
    );

    timer.start();
    for evaluation_time in [0.0, final_time] {
        // references are time-0 prices; carry them forward at the risk-free rate
        let growth = (risk_free_rate * evaluation_time).exp();
        println!("Evaluation time {}:", evaluation_time);
        report(
            "European call",
            &european.value(evaluation_time, &model)?,
            european_reference * growth,
        );
        report(
            "Down-and-out call",
            &barrier_option.value(evaluation_time, &model)?,
            barrier_reference * growth,
        );
    }
    let valuation_ms = timer.elapsed_ms();
    println!("\nValuation: {:.1} ms", valuation_ms);

    Ok(())
}
