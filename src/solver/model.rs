use im::{HashMap, HashSet};

use crate::{
    error::{ModelError, Result},
    solver::{
        constraint::{BinaryConstraint, UnaryConstraint},
        engine::{ConstraintId, VariableId},
        value::ValueEquality,
    },
};

/// An immutable description of a binary constraint satisfaction problem:
/// variables, their initial candidate domains, and the unary and binary
/// constraints restricting them.
///
/// A `Csp` is constructed once by the caller and never mutated by the
/// engine; all working state lives in an
/// [`Assignment`](crate::solver::assignment::Assignment) derived from it.
/// Every model owns its own constraint lists, so distinct instances can
/// never share (and accidentally cross-contaminate) containers.
#[derive(Debug, Clone)]
pub struct Csp<V: ValueEquality> {
    variables: Vec<VariableId>,
    domains: HashMap<VariableId, HashSet<V>>,
    unary_constraints: Vec<UnaryConstraint<V>>,
    binary_constraints: Vec<BinaryConstraint<V>>,
}

impl<V: ValueEquality> Csp<V> {
    /// Builds a model from a list of variables, a matching list of initial
    /// domains, and the constraint lists.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if the domains list does not match the
    /// variables list, a variable is declared twice, a constraint references
    /// an undeclared variable, or a binary constraint anchors both endpoints
    /// to the same variable. A model that merely has no solution is *not* an
    /// error; that outcome is reported by the solver.
    pub fn new(
        variables: Vec<VariableId>,
        domains: Vec<HashSet<V>>,
        unary_constraints: Vec<UnaryConstraint<V>>,
        binary_constraints: Vec<BinaryConstraint<V>>,
    ) -> Result<Self> {
        if variables.len() != domains.len() {
            return Err(ModelError::DomainCountMismatch {
                variables: variables.len(),
                domains: domains.len(),
            }
            .into());
        }

        let mut domain_map = HashMap::new();
        for (var, domain) in variables.iter().zip(domains) {
            if domain_map.insert(*var, domain).is_some() {
                return Err(ModelError::DuplicateVariable(*var).into());
            }
        }

        for constraint in &unary_constraints {
            if !domain_map.contains_key(&constraint.variable()) {
                return Err(ModelError::UndeclaredVariable(constraint.variable()).into());
            }
        }
        for constraint in &binary_constraints {
            let (var1, var2) = constraint.variables();
            if var1 == var2 {
                return Err(ModelError::SelfReferentialConstraint(var1).into());
            }
            for var in [var1, var2] {
                if !domain_map.contains_key(&var) {
                    return Err(ModelError::UndeclaredVariable(var).into());
                }
            }
        }

        Ok(Self {
            variables,
            domains: domain_map,
            unary_constraints,
            binary_constraints,
        })
    }

    pub fn variables(&self) -> &[VariableId] {
        &self.variables
    }

    pub fn domains(&self) -> &HashMap<VariableId, HashSet<V>> {
        &self.domains
    }

    /// The initial domain of `var`. Panics if `var` was not declared.
    pub fn domain(&self, var: VariableId) -> &HashSet<V> {
        self.domains.get(&var).unwrap()
    }

    pub fn unary_constraints(&self) -> &[UnaryConstraint<V>] {
        &self.unary_constraints
    }

    pub fn binary_constraints(&self) -> &[BinaryConstraint<V>] {
        &self.binary_constraints
    }

    /// The binary constraints connected to `var`, with their ids.
    pub fn binary_constraints_affecting(
        &self,
        var: VariableId,
    ) -> impl Iterator<Item = (ConstraintId, &BinaryConstraint<V>)> {
        self.binary_constraints
            .iter()
            .enumerate()
            .filter(move |(_, constraint)| constraint.affects(var))
    }
}
