//! Heuristics for ordering the candidate values of the variable being
//! branched on.

use crate::solver::{
    assignment::Assignment,
    engine::VariableId,
    model::Csp,
    value::{ValueEquality, ValueOrdering},
};

/// A trait for strategies that determine the order in which a variable's
/// candidate values are tried.
pub trait ValueOrderingHeuristic<V: ValueEquality> {
    /// Returns the values of `var`'s current domain in the order they
    /// should be tried.
    fn order_values(&self, assignment: &Assignment<V>, model: &Csp<V>, var: VariableId) -> Vec<V>;
}

/// Returns values in their natural iteration order, with no heuristics.
pub struct IdentityValueHeuristic;

impl<V: ValueEquality> ValueOrderingHeuristic<V> for IdentityValueHeuristic {
    fn order_values(&self, assignment: &Assignment<V>, _model: &Csp<V>, var: VariableId) -> Vec<V> {
        assignment.domain(var).iter().cloned().collect()
    }
}

/// Least-constraining-value ordering.
///
/// Values are sorted ascending by the number of unassigned neighbouring
/// variables whose domain still contains the value: the value that rules
/// out the fewest options elsewhere is tried first. The sort is stable over
/// a pre-sorted value list, so ties keep a fixed, value-ordered relative
/// order — repeated runs explore candidates identically.
pub struct LeastConstrainingValueHeuristic;

impl<V: ValueOrdering> ValueOrderingHeuristic<V> for LeastConstrainingValueHeuristic {
    fn order_values(&self, assignment: &Assignment<V>, model: &Csp<V>, var: VariableId) -> Vec<V> {
        let mut neighbours: Vec<VariableId> = model
            .binary_constraints_affecting(var)
            .map(|(_, constraint)| constraint.other_variable(var))
            .filter(|&other| !assignment.is_assigned(other))
            .collect();
        neighbours.sort_unstable();
        neighbours.dedup();

        let mut values: Vec<V> = assignment.domain(var).iter().cloned().collect();
        values.sort();
        values.sort_by_key(|value| {
            neighbours
                .iter()
                .filter(|&&other| assignment.domain(other).contains(value))
                .count()
        });
        values
    }
}
