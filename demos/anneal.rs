use std::sync::atomic::AtomicBool;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use ising_sim::{
    run_anneal, Algorithm, AnnealConfig, CoolingSchedule, InitialSpins, IsingModel, LinearBiases,
    Node, PinningPolicy, QuadraticBiases, RandomSource,
};

const N_NODES: usize = 16;
const N_STEPS: usize = 2000;
const SEED: u64 = 42;

fn main() {
    env_logger::init();

    // random ±1 couplings on the complete graph
    let mut rng = RandomSource::new(Some(SEED));
    let mut quadratic = QuadraticBiases::new();
    for i in 0..N_NODES {
        for j in i + 1..N_NODES {
            let coupling = if rng.bernoulli(0.5) { -1.0 } else { 1.0 };
            quadratic.insert((Node::from(i), Node::from(j)), coupling);
        }
    }

    let mut model = match IsingModel::new(&LinearBiases::new(), &quadratic) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("failed to build model: {e}");
            std::process::exit(1);
        }
    };
    model.set_seed(Some(SEED));

    let t0 = (N_NODES * N_NODES) as f64;
    let config = AnnealConfig {
        n_steps: N_STEPS,
        algorithm: Algorithm::Sca,
        initial_temperature: t0,
        schedule: CoolingSchedule::Linear {
            final_temperature: 1.0,
        },
        pinning: PinningPolicy::Fixed((N_NODES as f64).sqrt()),
        initial_spins: Some(InitialSpins::Uniform),
        record_interval: N_STEPS / 10,
        ..Default::default()
    };

    println!(
        "Nodes: {}  |  Steps: {}  |  Algorithm: {}  |  T: {} -> 1",
        N_NODES,
        N_STEPS,
        config.algorithm.name(),
        t0
    );
    println!("{}", "-".repeat(70));

    let pb = ProgressBar::new(N_STEPS as u64);
    pb.set_style(
        ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len} [{elapsed_precise}]")
            .unwrap()
            .progress_chars("=> "),
    );
    pb.set_message("steps");

    let interrupted = AtomicBool::new(false);
    let start = Instant::now();
    let trace = match run_anneal(&mut model, &config, &interrupted, &|| pb.inc(1)) {
        Ok(t) => t,
        Err(e) => {
            pb.abandon();
            eprintln!("anneal failed: {e}");
            std::process::exit(1);
        }
    };
    pb.finish();

    for r in &trace.records {
        println!(
            "step {:>5}  T = {:>10.4}  energy = {:>10.4}",
            r.step, r.temperature, r.energy
        );
    }
    println!("Energy = {}", model.energy());
    println!("Best energy = {}", trace.best_energy);
    let spins: Vec<String> = trace
        .best_spins
        .iter()
        .map(|(node, s)| format!("{node}: {}", s.value()))
        .collect();
    println!("{{ {} }}", spins.join(", "));
    println!();
    println!("{}", model.report());
    println!("Total: {:.3} s", start.elapsed().as_secs_f64());
}
