//! The n-queens problem: one queen per column, the variable's value is the
//! queen's row. Two queens attack each other when they share a row or a
//! diagonal.

use crate::{
    error::Result,
    solver::{
        constraint::BinaryConstraint,
        engine::VariableId,
        model::Csp,
        value::StandardValue,
    },
};

/// Builds the n-queens model: variable `i` is the queen in column `i`, its
/// domain the rows `1..=n`.
pub fn model(n: usize) -> Result<Csp<StandardValue>> {
    let variables: Vec<VariableId> = (0..n as u32).collect();
    let domains = variables
        .iter()
        .map(|_| (1..=n as i64).map(StandardValue::Int).collect())
        .collect();

    let mut binary = vec![];
    for i in 0..n {
        for j in (i + 1)..n {
            let column_distance = (j - i) as i64;
            binary.push(BinaryConstraint::custom(
                variables[i],
                variables[j],
                move |row1: &StandardValue, row2: &StandardValue| {
                    let (StandardValue::Int(r1), StandardValue::Int(r2)) = (row1, row2) else {
                        return false;
                    };
                    r1 != r2 && (r1 - r2).abs() != column_distance
                },
            ));
        }
    }

    Csp::new(variables, domains, vec![], binary)
}

/// Whether `rows[i]` places the column-`i` queens without any attacks.
pub fn is_valid_placement(rows: &[i64]) -> bool {
    for i in 0..rows.len() {
        for j in (i + 1)..rows.len() {
            if rows[i] == rows[j] || (rows[i] - rows[j]).abs() == (j - i) as i64 {
                return false;
            }
        }
    }
    true
}
