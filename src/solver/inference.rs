use crate::solver::{
    assignment::{Assignment, InferenceRecord},
    engine::{SearchStats, VariableId},
    model::Csp,
    propagation::{forward_checking, maintain_arc_consistency},
    value::ValueEquality,
};

/// A strategy for the inference step the search driver runs after each
/// tentative assignment.
///
/// Strategies are interchangeable: the driver only relies on the contract
/// that a `Some` record can be handed to
/// [`Assignment::restore`] to undo the inference exactly, and that a `None`
/// return means the branch is unsatisfiable and no effects remain.
pub trait InferenceStrategy<V: ValueEquality> {
    /// Runs inference after `value` has been tentatively assigned to `var`.
    fn infer(
        &self,
        assignment: &mut Assignment<V>,
        model: &Csp<V>,
        var: VariableId,
        value: &V,
        stats: &mut SearchStats,
    ) -> Option<InferenceRecord<V>>;
}

/// Performs no inference at all: plain backtracking search.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInference;

impl<V: ValueEquality> InferenceStrategy<V> for NoInference {
    fn infer(
        &self,
        _assignment: &mut Assignment<V>,
        _model: &Csp<V>,
        _var: VariableId,
        _value: &V,
        _stats: &mut SearchStats,
    ) -> Option<InferenceRecord<V>> {
        Some(InferenceRecord::new())
    }
}

/// Prunes the direct unassigned neighbours of the just-assigned variable.
///
/// See [`forward_checking`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardChecking;

impl<V: ValueEquality> InferenceStrategy<V> for ForwardChecking {
    fn infer(
        &self,
        assignment: &mut Assignment<V>,
        model: &Csp<V>,
        var: VariableId,
        value: &V,
        stats: &mut SearchStats,
    ) -> Option<InferenceRecord<V>> {
        forward_checking(assignment, model, var, value, stats)
    }
}

/// Re-establishes arc consistency around the just-assigned variable.
///
/// See [`maintain_arc_consistency`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MaintainArcConsistency;

impl<V: ValueEquality> InferenceStrategy<V> for MaintainArcConsistency {
    fn infer(
        &self,
        assignment: &mut Assignment<V>,
        model: &Csp<V>,
        var: VariableId,
        value: &V,
        stats: &mut SearchStats,
    ) -> Option<InferenceRecord<V>> {
        maintain_arc_consistency(assignment, model, var, value, stats)
    }
}
