use nexo::{examples::map_colouring, solver::engine::SolverEngine};

fn main() {
    tracing_subscriber::fmt::init();

    let model = map_colouring::australia().expect("the Australia map model is well-formed");
    let engine = SolverEngine::default();

    let (solution, stats) = engine.solve(&model);
    println!(
        "nodes visited: {}, backtracks: {}",
        stats.nodes_visited, stats.backtracks
    );

    match solution {
        Some(solution) => {
            let rendered =
                serde_json::to_string_pretty(&solution).expect("colour maps serialize to JSON");
            println!("{rendered}");
        }
        None => println!("No colouring exists."),
    }
}
