//! Constraint propagation: unary elimination, the arc revision primitive,
//! the AC-3 fixpoint (standalone and maintained during search), and forward
//! checking.
//!
//! Every function that prunes domains returns an
//! [`InferenceRecord`] of exactly the `(variable, value)` pairs it removed,
//! or `None` when it proves the current branch unsatisfiable. A `None`
//! return guarantees that the function's own removals have already been
//! undone, so a failed propagation never leaks partial effects into the
//! caller's domains.

use std::time::Instant;

use tracing::debug;

use crate::solver::{
    assignment::{Assignment, InferenceRecord},
    constraint::BinaryConstraint,
    engine::{SearchStats, VariableId},
    model::Csp,
    value::ValueEquality,
    work_list::WorkList,
};

/// Removes every value rejected by a unary constraint from the initial
/// domains.
///
/// Returns `None` if any domain is emptied, which proves the whole model
/// unsatisfiable before search begins. The assignment is expected to be
/// discarded by the caller in that case.
pub fn eliminate_unary_constraints<V: ValueEquality>(
    assignment: &mut Assignment<V>,
    model: &Csp<V>,
) -> Option<InferenceRecord<V>> {
    let mut record = InferenceRecord::new();

    for &var in model.variables() {
        for constraint in model
            .unary_constraints()
            .iter()
            .filter(|constraint| constraint.affects(var))
        {
            let rejected: Vec<V> = assignment
                .domain(var)
                .iter()
                .filter(|value| !constraint.is_satisfied(value))
                .cloned()
                .collect();

            for value in rejected {
                assignment.remove_value(var, &value);
                record.insert(var, value);
            }

            if assignment.domain(var).is_empty() {
                debug!(var, "unary elimination emptied a domain");
                return None;
            }
        }
    }

    Some(record)
}

/// Makes the arc between `var1` and `var2` consistent under `constraint`.
///
/// A value is removed from `var1`'s domain when no value in `var2`'s domain
/// satisfies the constraint with it, and symmetrically for `var2` against
/// `var1`'s (already pruned) domain. Both directions evaluate the relation
/// in its anchored argument order, so asymmetric relations are handled
/// correctly.
///
/// Returns `None` if `var2`'s domain is emptied; all removals made by this
/// call are undone first, so the domains are left exactly as they were.
/// (An emptied `var1` domain needs no separate check: it leaves every value
/// of `var2` unsupported, so the second pass empties `var2` as well.)
pub fn revise<V: ValueEquality>(
    assignment: &mut Assignment<V>,
    var1: VariableId,
    var2: VariableId,
    constraint: &BinaryConstraint<V>,
) -> Option<InferenceRecord<V>> {
    let mut record = InferenceRecord::new();

    let unsupported: Vec<V> = assignment
        .domain(var1)
        .iter()
        .filter(|value| {
            !assignment
                .domain(var2)
                .iter()
                .any(|other| constraint.holds(var1, value, other))
        })
        .cloned()
        .collect();
    for value in unsupported {
        assignment.remove_value(var1, &value);
        record.insert(var1, value);
    }

    let unsupported: Vec<V> = assignment
        .domain(var2)
        .iter()
        .filter(|value| {
            !assignment
                .domain(var1)
                .iter()
                .any(|other| constraint.holds(var2, value, other))
        })
        .cloned()
        .collect();
    for value in unsupported {
        assignment.remove_value(var2, &value);
        record.insert(var2, value);
    }

    if assignment.domain(var2).is_empty() {
        assignment.restore(&record);
        return None;
    }

    Some(record)
}

/// Runs the revision fixpoint over an initial work list of constraints.
///
/// When a revision removes values from either endpoint, every other
/// constraint touching exactly one of the two endpoints is re-enqueued;
/// constraints touching both or neither are unaffected by the change.
/// Returns `None` (with all removals undone) if any revision fails.
fn propagate<V: ValueEquality>(
    assignment: &mut Assignment<V>,
    model: &Csp<V>,
    mut worklist: WorkList,
    stats: &mut SearchStats,
) -> Option<InferenceRecord<V>> {
    let mut record = InferenceRecord::new();

    while let Some(constraint_id) = worklist.pop_front() {
        let constraint = &model.binary_constraints()[constraint_id];
        let (var1, var2) = constraint.variables();

        let start = Instant::now();
        let revision = revise(assignment, var1, var2, constraint);
        let elapsed = start.elapsed().as_micros() as u64;

        let constraint_stats = stats.constraint_stats.entry(constraint_id).or_default();
        constraint_stats.revisions += 1;
        constraint_stats.time_spent_micros += elapsed;

        match revision {
            None => {
                assignment.restore(&record);
                return None;
            }
            Some(removed) => {
                if !removed.is_empty() {
                    constraint_stats.prunings += removed.len() as u64;

                    for (other_id, other) in model.binary_constraints().iter().enumerate() {
                        if other_id != constraint_id && (other.affects(var1) ^ other.affects(var2))
                        {
                            worklist.push_back(other_id);
                        }
                    }

                    record.extend(removed);
                }
            }
        }
    }

    Some(record)
}

/// AC-3: establishes arc consistency across all binary constraints.
///
/// Intended as a preprocessing step before search; the work list starts
/// with every binary constraint and the fixpoint runs until no domain
/// changes. Returns `None` if the model is proven unsatisfiable without
/// any assignment having been made.
pub fn ac3<V: ValueEquality>(
    assignment: &mut Assignment<V>,
    model: &Csp<V>,
    stats: &mut SearchStats,
) -> Option<InferenceRecord<V>> {
    let mut worklist = WorkList::new();
    for constraint_id in 0..model.binary_constraints().len() {
        worklist.push_back(constraint_id);
    }

    let record = propagate(assignment, model, worklist, stats)?;
    debug!(removed = record.len(), "AC-3 preprocessing reached fixpoint");
    Some(record)
}

/// MAC: re-establishes arc consistency after tentatively assigning `value`
/// to `var`.
///
/// The variable's domain is first narrowed to the assigned value (those
/// removals are part of the returned record, so they are undone with the
/// rest on backtracking), then the fixpoint runs seeded only with the
/// constraints affecting `var` — propagation radiates outward from the new
/// assignment rather than re-examining the whole constraint set.
pub fn maintain_arc_consistency<V: ValueEquality>(
    assignment: &mut Assignment<V>,
    model: &Csp<V>,
    var: VariableId,
    value: &V,
    stats: &mut SearchStats,
) -> Option<InferenceRecord<V>> {
    let mut record = InferenceRecord::new();

    let displaced: Vec<V> = assignment
        .domain(var)
        .iter()
        .filter(|candidate| *candidate != value)
        .cloned()
        .collect();
    for candidate in displaced {
        assignment.remove_value(var, &candidate);
        record.insert(var, candidate);
    }

    let mut worklist = WorkList::new();
    for (constraint_id, _) in model.binary_constraints_affecting(var) {
        worklist.push_back(constraint_id);
    }

    match propagate(assignment, model, worklist, stats) {
        Some(propagated) => {
            record.extend(propagated);
            Some(record)
        }
        None => {
            assignment.restore(&record);
            None
        }
    }
}

/// Forward checking: prunes only the direct unassigned neighbours of the
/// just-assigned `var`.
///
/// For each binary constraint between `var` and an unassigned neighbour,
/// every neighbour value inconsistent with `value` is removed. There is no
/// queue and no propagation beyond the neighbours. Returns `None` (with
/// this call's removals undone) if any neighbour's domain is emptied.
pub fn forward_checking<V: ValueEquality>(
    assignment: &mut Assignment<V>,
    model: &Csp<V>,
    var: VariableId,
    value: &V,
    stats: &mut SearchStats,
) -> Option<InferenceRecord<V>> {
    let mut record = InferenceRecord::new();

    let neighbours: Vec<(usize, VariableId)> = model
        .binary_constraints_affecting(var)
        .map(|(constraint_id, constraint)| (constraint_id, constraint.other_variable(var)))
        .filter(|(_, other)| !assignment.is_assigned(*other))
        .collect();

    for &(constraint_id, other) in &neighbours {
        let constraint = &model.binary_constraints()[constraint_id];

        let start = Instant::now();
        let inconsistent: Vec<V> = assignment
            .domain(other)
            .iter()
            .filter(|other_value| !constraint.holds(var, value, other_value))
            .cloned()
            .collect();
        let elapsed = start.elapsed().as_micros() as u64;

        let constraint_stats = stats.constraint_stats.entry(constraint_id).or_default();
        constraint_stats.revisions += 1;
        constraint_stats.prunings += inconsistent.len() as u64;
        constraint_stats.time_spent_micros += elapsed;

        for other_value in inconsistent {
            assignment.remove_value(other, &other_value);
            record.insert(other, other_value);
        }
    }

    for &(_, other) in &neighbours {
        if assignment.domain(other).is_empty() {
            assignment.restore(&record);
            return None;
        }
    }

    Some(record)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::constraint::UnaryConstraint;
    use crate::solver::value::StandardValue;

    fn int(i: i64) -> StandardValue {
        StandardValue::Int(i)
    }

    fn int_domain(values: &[i64]) -> im::HashSet<StandardValue> {
        values.iter().map(|i| int(*i)).collect()
    }

    #[test]
    fn unary_elimination_removes_rejected_values() {
        let model = Csp::new(
            vec![0, 1],
            vec![int_domain(&[1, 2, 3]), int_domain(&[1, 2])],
            vec![
                UnaryConstraint::bad_value(0, int(2)),
                UnaryConstraint::good_value(1, int(1)),
            ],
            vec![],
        )
        .unwrap();
        let mut assignment = Assignment::new(&model);

        let record = eliminate_unary_constraints(&mut assignment, &model).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(assignment.domain(0), &int_domain(&[1, 3]));
        assert_eq!(assignment.domain(1), &int_domain(&[1]));
    }

    #[test]
    fn unary_elimination_fails_when_a_domain_empties() {
        // A singleton domain {5} with BadValue(5): unsatisfiable before search.
        let model = Csp::new(
            vec![0],
            vec![int_domain(&[5])],
            vec![UnaryConstraint::bad_value(0, int(5))],
            vec![],
        )
        .unwrap();
        let mut assignment = Assignment::new(&model);

        assert_eq!(eliminate_unary_constraints(&mut assignment, &model), None);
    }

    #[test]
    fn revise_prunes_unsupported_values_on_both_sides() {
        // ?0 < ?1 over {1,2,3} x {1,2,3}: 3 has no support in ?0's role,
        // 1 has no support in ?1's role.
        let model = Csp::new(
            vec![0, 1],
            vec![int_domain(&[1, 2, 3]), int_domain(&[1, 2, 3])],
            vec![],
            vec![BinaryConstraint::custom(0, 1, |a, b| a < b)],
        )
        .unwrap();
        let mut assignment = Assignment::new(&model);
        let constraint = &model.binary_constraints()[0];

        let record = revise(&mut assignment, 0, 1, constraint).unwrap();
        assert_eq!(record.len(), 2);
        assert!(record.contains(0, &int(3)));
        assert!(record.contains(1, &int(1)));
        assert_eq!(assignment.domain(0), &int_domain(&[1, 2]));
        assert_eq!(assignment.domain(1), &int_domain(&[2, 3]));
    }

    #[test]
    fn failed_revise_leaves_domains_untouched() {
        let model = Csp::new(
            vec![0, 1],
            vec![int_domain(&[1]), int_domain(&[1])],
            vec![],
            vec![BinaryConstraint::not_equal(0, 1)],
        )
        .unwrap();
        let mut assignment = Assignment::new(&model);
        let before = assignment.domains_snapshot();
        let constraint = &model.binary_constraints()[0];

        assert_eq!(revise(&mut assignment, 0, 1, constraint), None);
        assert_eq!(assignment.domains_snapshot(), before);
    }

    #[test]
    fn ac3_detects_unsatisfiability_without_assignments() {
        let model = Csp::new(
            vec![0, 1],
            vec![int_domain(&[1]), int_domain(&[1])],
            vec![],
            vec![BinaryConstraint::not_equal(0, 1)],
        )
        .unwrap();
        let mut assignment = Assignment::new(&model);
        let mut stats = SearchStats::default();

        assert_eq!(ac3(&mut assignment, &model, &mut stats), None);
    }

    #[test]
    fn ac3_propagates_through_a_chain() {
        // ?0 < ?1 < ?2 over {1,2,3}: the fixpoint pins 1 < 2 < 3.
        let model = Csp::new(
            vec![0, 1, 2],
            vec![
                int_domain(&[1, 2, 3]),
                int_domain(&[1, 2, 3]),
                int_domain(&[1, 2, 3]),
            ],
            vec![],
            vec![
                BinaryConstraint::custom(0, 1, |a, b| a < b),
                BinaryConstraint::custom(1, 2, |a, b| a < b),
            ],
        )
        .unwrap();
        let mut assignment = Assignment::new(&model);
        let mut stats = SearchStats::default();

        ac3(&mut assignment, &model, &mut stats).unwrap();
        assert_eq!(assignment.domain(0), &int_domain(&[1]));
        assert_eq!(assignment.domain(1), &int_domain(&[2]));
        assert_eq!(assignment.domain(2), &int_domain(&[3]));
    }

    #[test]
    fn ac3_reaches_a_fixpoint_on_satisfiable_models() {
        // All-pairs NotEqual over three values: arc consistent as-is, no
        // value may be removed (every value appears in some solution).
        let model = Csp::new(
            vec![0, 1, 2],
            vec![
                int_domain(&[1, 2, 3]),
                int_domain(&[1, 2, 3]),
                int_domain(&[1, 2, 3]),
            ],
            vec![],
            vec![
                BinaryConstraint::not_equal(0, 1),
                BinaryConstraint::not_equal(0, 2),
                BinaryConstraint::not_equal(1, 2),
            ],
        )
        .unwrap();
        let mut assignment = Assignment::new(&model);
        let mut stats = SearchStats::default();

        let record = ac3(&mut assignment, &model, &mut stats).unwrap();
        assert!(record.is_empty());
        for var in [0u32, 1, 2] {
            assert_eq!(assignment.domain(var), &int_domain(&[1, 2, 3]));
        }
    }

    #[test]
    fn mac_propagates_beyond_direct_neighbours() {
        // A chain of NotEqual constraints over two-value domains: assigning
        // the first variable forces every variable down the chain.
        let model = Csp::new(
            vec![0, 1, 2, 3],
            vec![
                int_domain(&[1, 2]),
                int_domain(&[1, 2]),
                int_domain(&[1, 2]),
                int_domain(&[1, 2]),
            ],
            vec![],
            vec![
                BinaryConstraint::not_equal(0, 1),
                BinaryConstraint::not_equal(1, 2),
                BinaryConstraint::not_equal(2, 3),
            ],
        )
        .unwrap();
        let mut assignment = Assignment::new(&model);
        let mut stats = SearchStats::default();

        assignment.assign(0, int(1));
        let record =
            maintain_arc_consistency(&mut assignment, &model, 0, &int(1), &mut stats).unwrap();

        assert_eq!(assignment.domain(0), &int_domain(&[1]));
        assert_eq!(assignment.domain(1), &int_domain(&[2]));
        assert_eq!(assignment.domain(2), &int_domain(&[1]));
        assert_eq!(assignment.domain(3), &int_domain(&[2]));

        // The record must restore every touched domain exactly.
        assignment.restore(&record);
        for var in [0u32, 1, 2, 3] {
            assert_eq!(assignment.domain(var), &int_domain(&[1, 2]));
        }
    }

    #[test]
    fn mac_failure_undoes_all_intermediate_removals() {
        // Assigning 1 to ?0 forces ?1 to 2, emptying ?2 (NotEqual both).
        let model = Csp::new(
            vec![0, 1, 2],
            vec![int_domain(&[1, 2]), int_domain(&[1, 2]), int_domain(&[2])],
            vec![],
            vec![
                BinaryConstraint::not_equal(0, 1),
                BinaryConstraint::not_equal(1, 2),
            ],
        )
        .unwrap();
        let mut assignment = Assignment::new(&model);
        let mut stats = SearchStats::default();
        let before = assignment.domains_snapshot();

        assignment.assign(0, int(1));
        assert_eq!(
            maintain_arc_consistency(&mut assignment, &model, 0, &int(1), &mut stats),
            None
        );
        assert_eq!(assignment.domains_snapshot(), before);
    }

    #[test]
    fn forward_checking_prunes_only_unassigned_neighbours() {
        let model = Csp::new(
            vec![0, 1, 2],
            vec![
                int_domain(&[1, 2]),
                int_domain(&[1, 2]),
                int_domain(&[1, 2]),
            ],
            vec![],
            vec![
                BinaryConstraint::not_equal(0, 1),
                BinaryConstraint::not_equal(0, 2),
            ],
        )
        .unwrap();
        let mut assignment = Assignment::new(&model);
        let mut stats = SearchStats::default();

        // ?2 is already assigned; only ?1's domain may be pruned.
        assignment.assign(2, int(2));
        assignment.assign(0, int(1));
        let record = forward_checking(&mut assignment, &model, 0, &int(1), &mut stats).unwrap();

        assert_eq!(record.len(), 1);
        assert!(record.contains(1, &int(1)));
        assert_eq!(assignment.domain(1), &int_domain(&[2]));
        assert_eq!(assignment.domain(2), &int_domain(&[1, 2]));
    }

    #[test]
    fn forward_checking_failure_restores_every_removal() {
        let model = Csp::new(
            vec![0, 1, 2],
            vec![int_domain(&[1]), int_domain(&[1, 2]), int_domain(&[1])],
            vec![],
            vec![
                BinaryConstraint::not_equal(0, 1),
                BinaryConstraint::not_equal(0, 2),
            ],
        )
        .unwrap();
        let mut assignment = Assignment::new(&model);
        let mut stats = SearchStats::default();
        let before = assignment.domains_snapshot();

        // Assigning 1 to ?0 empties ?2's domain; ?1's pruning must be undone.
        assignment.assign(0, int(1));
        assert_eq!(
            forward_checking(&mut assignment, &model, 0, &int(1), &mut stats),
            None
        );
        assert_eq!(assignment.domains_snapshot(), before);
    }

    #[test]
    fn forward_checking_does_not_propagate_past_neighbours() {
        // The chain used in the MAC test: forward checking only reaches ?1.
        let model = Csp::new(
            vec![0, 1, 2],
            vec![int_domain(&[1, 2]), int_domain(&[1, 2]), int_domain(&[1, 2])],
            vec![],
            vec![
                BinaryConstraint::not_equal(0, 1),
                BinaryConstraint::not_equal(1, 2),
            ],
        )
        .unwrap();
        let mut assignment = Assignment::new(&model);
        let mut stats = SearchStats::default();
        let before = assignment.domains_snapshot();

        assignment.assign(0, int(1));
        let record = forward_checking(&mut assignment, &model, 0, &int(1), &mut stats).unwrap();

        assert_eq!(assignment.domain(1), &int_domain(&[2]));
        assert_eq!(assignment.domain(2), &int_domain(&[1, 2]));

        assignment.restore(&record);
        assert_eq!(assignment.domains_snapshot(), before);
    }
}
