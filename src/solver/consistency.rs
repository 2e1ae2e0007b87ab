use crate::solver::{assignment::Assignment, engine::VariableId, model::Csp, value::ValueEquality};

/// Checks whether assigning `value` to `var` would be consistent with the
/// constraints anchored by already-assigned variables.
///
/// `value` is consistent iff every unary constraint affecting `var` accepts
/// it, and every binary constraint connecting `var` to a *currently
/// assigned* variable accepts the pair. Binary constraints whose other
/// endpoint is unassigned impose no restriction yet — the check is
/// optimistic about them. Nothing is mutated; the value is not assigned.
pub fn consistent<V: ValueEquality>(
    assignment: &Assignment<V>,
    model: &Csp<V>,
    var: VariableId,
    value: &V,
) -> bool {
    let unary_ok = model
        .unary_constraints()
        .iter()
        .filter(|constraint| constraint.affects(var))
        .all(|constraint| constraint.is_satisfied(value));

    let binary_ok = model
        .binary_constraints()
        .iter()
        .filter(|constraint| constraint.affects(var))
        .all(|constraint| {
            match assignment.value(constraint.other_variable(var)) {
                Some(other_value) => constraint.holds(var, value, other_value),
                None => true,
            }
        });

    unary_ok && binary_ok
}
