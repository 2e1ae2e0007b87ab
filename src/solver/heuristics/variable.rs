//! Heuristics for selecting which variable the search branches on next.

use std::cell::RefCell;

use rand::seq::IteratorRandom;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use crate::solver::{
    assignment::Assignment, engine::VariableId, model::Csp, value::ValueEquality,
};

/// A trait for variable-selection heuristics.
///
/// Implementors define a strategy for choosing which unassigned variable
/// the solver should branch on next. A good heuristic can dramatically
/// improve solver performance.
pub trait VariableSelectionHeuristic<V: ValueEquality> {
    /// Selects the next variable to be assigned.
    ///
    /// Returns `None` only when every variable is already assigned; the
    /// search driver checks completeness before calling, so a `None` seen
    /// by the driver means the heuristic and the assignment disagree and
    /// the branch is abandoned.
    fn select_variable(&self, assignment: &Assignment<V>, model: &Csp<V>) -> Option<VariableId>;
}

/// Selects the unassigned variable with the lowest [`VariableId`].
///
/// The trivial baseline: deterministic, no heuristics.
pub struct SelectFirstHeuristic;

impl<V: ValueEquality> VariableSelectionHeuristic<V> for SelectFirstHeuristic {
    fn select_variable(&self, assignment: &Assignment<V>, _model: &Csp<V>) -> Option<VariableId> {
        assignment.unassigned_variables().min()
    }
}

/// Minimum-remaining-values with degree tie-break.
///
/// Chooses the unassigned variable with the smallest current domain (the
/// "fail-first" principle). Ties are broken by the degree heuristic: the
/// tied variable with the most binary constraints to other *unassigned*
/// variables wins, maximising future propagation. If the model has no
/// binary constraints at all, or variables still tie on degree, the lowest
/// [`VariableId`] is chosen so selection stays deterministic.
pub struct MinimumRemainingValuesHeuristic;

impl<V: ValueEquality> VariableSelectionHeuristic<V> for MinimumRemainingValuesHeuristic {
    fn select_variable(&self, assignment: &Assignment<V>, model: &Csp<V>) -> Option<VariableId> {
        let smallest_domain = assignment
            .unassigned_variables()
            .map(|var| assignment.domain_size(var))
            .min()?;

        let mut tied: Vec<VariableId> = assignment
            .unassigned_variables()
            .filter(|&var| assignment.domain_size(var) == smallest_domain)
            .collect();
        tied.sort_unstable();

        if tied.len() == 1 || model.binary_constraints().is_empty() {
            return tied.first().copied();
        }

        tied.into_iter().max_by_key(|&var| {
            let degree = model
                .binary_constraints_affecting(var)
                .filter(|(_, constraint)| !assignment.is_assigned(constraint.other_variable(var)))
                .count();
            // max_by_key keeps the last maximum; reversing the id makes the
            // lowest-id variable win degree ties.
            (degree, std::cmp::Reverse(var))
        })
    }
}

/// Selects an unassigned variable uniformly at random from a seeded
/// generator, so runs with the same seed are reproducible.
pub struct RandomVariableHeuristic {
    rng: RefCell<ChaCha8Rng>,
}

impl RandomVariableHeuristic {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: RefCell::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl<V: ValueEquality> VariableSelectionHeuristic<V> for RandomVariableHeuristic {
    fn select_variable(&self, assignment: &Assignment<V>, _model: &Csp<V>) -> Option<VariableId> {
        let mut unassigned: Vec<VariableId> = assignment.unassigned_variables().collect();
        // A fixed base order makes the choice a function of the seed alone.
        unassigned.sort_unstable();
        unassigned.into_iter().choose(&mut *self.rng.borrow_mut())
    }
}
