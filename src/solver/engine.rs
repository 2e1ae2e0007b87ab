use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::solver::{
    assignment::Assignment,
    consistency::consistent,
    heuristics::{
        value::{LeastConstrainingValueHeuristic, ValueOrderingHeuristic},
        variable::{MinimumRemainingValuesHeuristic, VariableSelectionHeuristic},
    },
    inference::{InferenceStrategy, NoInference},
    model::Csp,
    propagation::{ac3, eliminate_unary_constraints},
    value::{ValueEquality, ValueOrdering},
};

pub type VariableId = u32;
pub type ConstraintId = usize;

/// Counters for one binary constraint, keyed by its position in the
/// model's constraint list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PerConstraintStats {
    pub revisions: u64,
    pub prunings: u64,
    pub time_spent_micros: u64,
}

/// Counters accumulated over one `solve` call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStats {
    /// Decision frames entered by the backtracking search.
    pub nodes_visited: u64,
    /// Candidate values abandoned after a failed recursive call.
    pub backtracks: u64,
    /// Candidate values rejected because inference emptied a domain.
    pub inference_failures: u64,
    pub constraint_stats: HashMap<ConstraintId, PerConstraintStats>,
}

/// The main engine for solving binary constraint satisfaction problems.
///
/// The engine owns the pluggable pieces of the search — a
/// variable-selection heuristic, a value-ordering heuristic, and an
/// inference strategy — and drives them through a depth-first backtracking
/// search over an [`Assignment`] derived from the caller's [`Csp`] model.
///
/// Each `solve` call builds all of its working state fresh, so a single
/// engine can be reused across independent models without
/// cross-contamination.
pub struct SolverEngine<V: ValueEquality> {
    variable_heuristic: Box<dyn VariableSelectionHeuristic<V>>,
    value_heuristic: Box<dyn ValueOrderingHeuristic<V>>,
    inference: Box<dyn InferenceStrategy<V>>,
    use_ac3_preprocessing: bool,
}

impl<V: ValueEquality> SolverEngine<V> {
    /// Creates an engine with the given heuristics and inference strategy.
    /// AC-3 preprocessing is enabled; see
    /// [`SolverEngine::with_ac3_preprocessing`] to turn it off.
    pub fn new(
        variable_heuristic: Box<dyn VariableSelectionHeuristic<V>>,
        value_heuristic: Box<dyn ValueOrderingHeuristic<V>>,
        inference: Box<dyn InferenceStrategy<V>>,
    ) -> Self {
        Self {
            variable_heuristic,
            value_heuristic,
            inference,
            use_ac3_preprocessing: true,
        }
    }

    /// Enables or disables the standalone AC-3 pass that runs before the
    /// search starts.
    pub fn with_ac3_preprocessing(mut self, enabled: bool) -> Self {
        self.use_ac3_preprocessing = enabled;
        self
    }

    /// Attempts to solve `model`.
    ///
    /// Runs unary elimination, then (optionally) AC-3 preprocessing, then
    /// the backtracking search with the configured inference strategy.
    ///
    /// Returns the completed variable-to-value mapping, or `None` if the
    /// model is proven unsatisfiable — at whichever of the three stages
    /// that happens. Search statistics are returned either way.
    pub fn solve(&self, model: &Csp<V>) -> (Option<im::HashMap<VariableId, V>>, SearchStats) {
        let mut stats = SearchStats::default();
        let mut assignment = Assignment::new(model);

        if eliminate_unary_constraints(&mut assignment, model).is_none() {
            debug!("unsatisfiable during unary elimination");
            return (None, stats);
        }

        if self.use_ac3_preprocessing && ac3(&mut assignment, model, &mut stats).is_none() {
            debug!("unsatisfiable during AC-3 preprocessing");
            return (None, stats);
        }

        if self.search(model, &mut assignment, &mut stats) {
            (assignment.extract_solution(), stats)
        } else {
            (None, stats)
        }
    }

    /// One decision frame of the recursive backtracking search.
    ///
    /// The frame snapshots the assigned-value map before trying candidate
    /// values and restores it after every abandoned candidate, and undoes
    /// each failed candidate's inference record before moving on — so no
    /// mutation from an abandoned branch is ever visible to a sibling.
    fn search(
        &self,
        model: &Csp<V>,
        assignment: &mut Assignment<V>,
        stats: &mut SearchStats,
    ) -> bool {
        stats.nodes_visited += 1;

        if assignment.is_complete() {
            return true;
        }

        let Some(var) = self.variable_heuristic.select_variable(assignment, model) else {
            return assignment.is_complete();
        };

        let candidates = self.value_heuristic.order_values(assignment, model, var);
        let snapshot = assignment.values_snapshot();

        for value in candidates {
            if consistent(assignment, model, var, &value) {
                assignment.assign(var, value.clone());

                match self.inference.infer(assignment, model, var, &value, stats) {
                    Some(record) => {
                        if self.search(model, assignment, stats) {
                            return true;
                        }
                        assignment.restore(&record);
                        stats.backtracks += 1;
                    }
                    None => {
                        stats.inference_failures += 1;
                    }
                }
            }

            assignment.restore_values(snapshot.clone());
        }

        false
    }
}

/// The default configuration: minimum-remaining-values variable selection,
/// least-constraining-value ordering, no inference during search, AC-3
/// preprocessing on.
impl<V: ValueOrdering> Default for SolverEngine<V> {
    fn default() -> Self {
        Self::new(
            Box::new(MinimumRemainingValuesHeuristic),
            Box::new(LeastConstrainingValueHeuristic),
            Box::new(NoInference),
        )
    }
}
