use im::{HashMap, HashSet};

use crate::solver::{engine::VariableId, model::Csp, value::ValueEquality};

/// The set of `(variable, value)` pairs removed by one propagation call.
///
/// This is the unit of undo: any frame of the search can reverse a
/// propagation step by handing its record back to
/// [`Assignment::restore`], which re-inserts exactly those pairs and no
/// others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceRecord<V: ValueEquality> {
    removed: HashSet<(VariableId, V)>,
}

impl<V: ValueEquality> InferenceRecord<V> {
    pub fn new() -> Self {
        Self {
            removed: HashSet::new(),
        }
    }

    /// Records that `value` was removed from `var`'s domain.
    pub fn insert(&mut self, var: VariableId, value: V) {
        self.removed.insert((var, value));
    }

    /// Merges another record into this one.
    pub fn extend(&mut self, other: InferenceRecord<V>) {
        for pair in other.removed {
            self.removed.insert(pair);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.removed.len()
    }

    pub fn contains(&self, var: VariableId, value: &V) -> bool {
        self.removed.contains(&(var, value.clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &(VariableId, V)> {
        self.removed.iter()
    }
}

impl<V: ValueEquality> Default for InferenceRecord<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// The mutable working state of a search: each variable's current
/// (shrinking) domain plus the map of values assigned so far.
///
/// Both maps are persistent `im` structures, so snapshotting the
/// assigned-value map at a decision frame is a cheap structural clone —
/// the mechanism behind the solver's frame-scoped backtracking.
///
/// A variable absent from the value map is unassigned.
#[derive(Debug, Clone)]
pub struct Assignment<V: ValueEquality> {
    domains: HashMap<VariableId, HashSet<V>>,
    values: HashMap<VariableId, V>,
}

impl<V: ValueEquality> Assignment<V> {
    /// Creates a fresh assignment whose domains are a copy of the model's
    /// initial domains, with every variable unassigned.
    pub fn new(model: &Csp<V>) -> Self {
        Self {
            domains: model.domains().clone(),
            values: HashMap::new(),
        }
    }

    pub fn is_assigned(&self, var: VariableId) -> bool {
        self.values.contains_key(&var)
    }

    /// Whether every variable has an assigned value.
    pub fn is_complete(&self) -> bool {
        self.values.len() == self.domains.len()
    }

    /// The value currently assigned to `var`, if any.
    pub fn value(&self, var: VariableId) -> Option<&V> {
        self.values.get(&var)
    }

    pub fn assign(&mut self, var: VariableId, value: V) {
        self.values.insert(var, value);
    }

    pub fn unassign(&mut self, var: VariableId) {
        self.values.remove(&var);
    }

    /// The current domain of `var`. Panics if `var` is not part of the
    /// model this assignment was built from.
    pub fn domain(&self, var: VariableId) -> &HashSet<V> {
        self.domains.get(&var).unwrap()
    }

    pub fn domain_size(&self, var: VariableId) -> usize {
        self.domain(var).len()
    }

    /// Removes `value` from `var`'s domain. Returns `false` if the value
    /// was not present.
    pub fn remove_value(&mut self, var: VariableId, value: &V) -> bool {
        self.domains
            .get_mut(&var)
            .unwrap()
            .remove(value)
            .is_some()
    }

    /// Re-inserts every pair in `record` into the corresponding domain,
    /// reversing the propagation call that produced it.
    pub fn restore(&mut self, record: &InferenceRecord<V>) {
        for (var, value) in record.iter() {
            self.domains.get_mut(var).unwrap().insert(value.clone());
        }
    }

    /// A cheap snapshot of the assigned-value map, restorable with
    /// [`Assignment::restore_values`].
    pub fn values_snapshot(&self) -> HashMap<VariableId, V> {
        self.values.clone()
    }

    pub fn restore_values(&mut self, snapshot: HashMap<VariableId, V>) {
        self.values = snapshot;
    }

    /// The variables that do not yet have an assigned value.
    pub fn unassigned_variables(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.domains
            .keys()
            .copied()
            .filter(move |var| !self.values.contains_key(var))
    }

    /// Returns the completed variable-to-value mapping, or `None` if any
    /// variable is still unassigned.
    pub fn extract_solution(&self) -> Option<HashMap<VariableId, V>> {
        if self.is_complete() {
            Some(self.values.clone())
        } else {
            None
        }
    }

    #[cfg(test)]
    pub(crate) fn domains_snapshot(&self) -> HashMap<VariableId, HashSet<V>> {
        self.domains.clone()
    }
}
