use clap::{Parser, ValueEnum};
use nexo::{
    examples::n_queens,
    solver::{
        engine::SolverEngine,
        heuristics::{
            value::{IdentityValueHeuristic, LeastConstrainingValueHeuristic, ValueOrderingHeuristic},
            variable::{
                MinimumRemainingValuesHeuristic, SelectFirstHeuristic, VariableSelectionHeuristic,
            },
        },
        inference::{ForwardChecking, InferenceStrategy, MaintainArcConsistency, NoInference},
        stats::render_stats_table,
        value::StandardValue,
    },
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InferenceArg {
    /// Plain backtracking, no inference.
    None,
    /// Forward checking.
    Forward,
    /// Maintain arc consistency.
    Mac,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VariableArg {
    /// Lowest unassigned variable id.
    First,
    /// Minimum remaining values with degree tie-break.
    Mrv,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Solve n-queens with the nexo CSP engine", long_about = None)]
struct Args {
    /// Board size.
    #[arg(default_value_t = 8)]
    n: usize,

    #[arg(long, value_enum, default_value_t = InferenceArg::Mac)]
    inference: InferenceArg,

    #[arg(long, value_enum, default_value_t = VariableArg::Mrv)]
    variable_heuristic: VariableArg,

    /// Try values in natural order instead of least-constraining first.
    #[arg(long)]
    identity_values: bool,

    /// Skip the AC-3 preprocessing pass.
    #[arg(long)]
    no_ac3: bool,

    /// Print the per-constraint statistics table.
    #[arg(long)]
    stats: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let inference: Box<dyn InferenceStrategy<StandardValue>> = match args.inference {
        InferenceArg::None => Box::new(NoInference),
        InferenceArg::Forward => Box::new(ForwardChecking),
        InferenceArg::Mac => Box::new(MaintainArcConsistency),
    };
    let variable_heuristic: Box<dyn VariableSelectionHeuristic<StandardValue>> =
        match args.variable_heuristic {
            VariableArg::First => Box::new(SelectFirstHeuristic),
            VariableArg::Mrv => Box::new(MinimumRemainingValuesHeuristic),
        };
    let value_heuristic: Box<dyn ValueOrderingHeuristic<StandardValue>> = if args.identity_values {
        Box::new(IdentityValueHeuristic)
    } else {
        Box::new(LeastConstrainingValueHeuristic)
    };

    let model = n_queens::model(args.n).expect("n-queens model is well-formed");
    let engine = SolverEngine::new(variable_heuristic, value_heuristic, inference)
        .with_ac3_preprocessing(!args.no_ac3);

    println!("Solving n-queens for n={}", args.n);
    let (solution, stats) = engine.solve(&model);

    println!(
        "nodes visited: {}, backtracks: {}, inference failures: {}",
        stats.nodes_visited, stats.backtracks, stats.inference_failures
    );
    if args.stats {
        println!("{}", render_stats_table(&stats, &model));
    }

    match solution {
        Some(solution) => {
            println!("\nFound a placement:");
            for row in 1..=args.n as i64 {
                let line: String = (0..args.n as u32)
                    .map(|col| {
                        if solution[&col] == StandardValue::Int(row) {
                            'Q'
                        } else {
                            '.'
                        }
                    })
                    .collect();
                println!("{line}");
            }
        }
        None => println!("\nNo placement exists."),
    }
}
