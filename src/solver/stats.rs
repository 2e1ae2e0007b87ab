use prettytable::{Cell, Row, Table};

use crate::solver::{
    engine::{ConstraintId, PerConstraintStats, SearchStats},
    model::Csp,
    value::ValueEquality,
};

/// Renders the per-constraint counters of a solve as a text table, one row
/// per binary constraint that was revised, slowest last.
pub fn render_stats_table<V: ValueEquality>(stats: &SearchStats, model: &Csp<V>) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Constraint Type"),
        Cell::new("ID"),
        Cell::new("Description"),
        Cell::new("Revise Calls"),
        Cell::new("Prunings"),
        Cell::new("Time / Call (µs)"),
        Cell::new("Total Time (ms)"),
    ]));

    let mut sorted_stats: Vec<(&ConstraintId, &PerConstraintStats)> =
        stats.constraint_stats.iter().collect();
    sorted_stats.sort_by_key(|(_, per_constraint)| per_constraint.time_spent_micros);

    for (constraint_id, constraint_stats) in sorted_stats {
        let descriptor = model.binary_constraints()[*constraint_id].descriptor();
        let avg_time = if constraint_stats.revisions > 0 {
            constraint_stats.time_spent_micros as f64 / constraint_stats.revisions as f64
        } else {
            0.0
        };

        table.add_row(Row::new(vec![
            Cell::new(&descriptor.name),
            Cell::new(&constraint_id.to_string()),
            Cell::new(&descriptor.description),
            Cell::new(&constraint_stats.revisions.to_string()),
            Cell::new(&constraint_stats.prunings.to_string()),
            Cell::new(&format!("{:.2}", avg_time)),
            Cell::new(&format!(
                "{:.2}",
                constraint_stats.time_spent_micros as f64 / 1000.0
            )),
        ]));
    }

    table.to_string()
}
