use std::{fmt, sync::Arc};

use crate::solver::{engine::VariableId, value::ValueEquality};

/// A human-readable summary of a constraint, used when rendering search
/// statistics.
#[derive(Debug, Clone)]
pub struct ConstraintDescriptor {
    pub name: String,
    pub description: String,
}

pub type UnaryPredicate<V> = Arc<dyn Fn(&V) -> bool + Send + Sync>;
pub type BinaryPredicate<V> = Arc<dyn Fn(&V, &V) -> bool + Send + Sync>;

/// The rule applied by a [`UnaryConstraint`].
#[derive(Clone)]
pub enum UnaryRule<V: ValueEquality> {
    /// Satisfied by every value except the given one.
    BadValue(V),
    /// Satisfied only by the given value.
    GoodValue(V),
    /// Satisfied by every value the predicate accepts.
    Custom(UnaryPredicate<V>),
}

/// A constraint restricting the values of a single variable.
#[derive(Clone)]
pub struct UnaryConstraint<V: ValueEquality> {
    var: VariableId,
    rule: UnaryRule<V>,
}

impl<V: ValueEquality> UnaryConstraint<V> {
    /// Creates a constraint forbidding `value` for `var`.
    pub fn bad_value(var: VariableId, value: V) -> Self {
        Self {
            var,
            rule: UnaryRule::BadValue(value),
        }
    }

    /// Creates a constraint requiring `var` to take exactly `value`.
    pub fn good_value(var: VariableId, value: V) -> Self {
        Self {
            var,
            rule: UnaryRule::GoodValue(value),
        }
    }

    /// Creates a constraint satisfied by every value `predicate` accepts.
    pub fn custom<F>(var: VariableId, predicate: F) -> Self
    where
        F: Fn(&V) -> bool + Send + Sync + 'static,
    {
        Self {
            var,
            rule: UnaryRule::Custom(Arc::new(predicate)),
        }
    }

    /// The variable this constraint restricts.
    pub fn variable(&self) -> VariableId {
        self.var
    }

    /// Whether this constraint restricts `var`.
    pub fn affects(&self, var: VariableId) -> bool {
        var == self.var
    }

    /// Whether `value` satisfies this constraint.
    pub fn is_satisfied(&self, value: &V) -> bool {
        match &self.rule {
            UnaryRule::BadValue(bad) => value != bad,
            UnaryRule::GoodValue(good) => value == good,
            UnaryRule::Custom(predicate) => predicate(value),
        }
    }

    pub fn descriptor(&self) -> ConstraintDescriptor {
        match &self.rule {
            UnaryRule::BadValue(v) => ConstraintDescriptor {
                name: "BadValueConstraint".to_string(),
                description: format!("?{} != {:?}", self.var, v),
            },
            UnaryRule::GoodValue(v) => ConstraintDescriptor {
                name: "GoodValueConstraint".to_string(),
                description: format!("?{} == {:?}", self.var, v),
            },
            UnaryRule::Custom(_) => ConstraintDescriptor {
                name: "CustomUnaryConstraint".to_string(),
                description: format!("custom(?{})", self.var),
            },
        }
    }
}

impl<V: ValueEquality> fmt::Debug for UnaryConstraint<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let descriptor = self.descriptor();
        write!(f, "{} {{ {} }}", descriptor.name, descriptor.description)
    }
}

/// The relation enforced by a [`BinaryConstraint`].
#[derive(Clone)]
pub enum BinaryRelation<V: ValueEquality> {
    /// Satisfied whenever the two values differ.
    NotEqual,
    /// Satisfied whenever the predicate accepts the pair. The predicate
    /// receives the values in `(var1, var2)` order and may be asymmetric.
    Custom(BinaryPredicate<V>),
}

/// A constraint connecting an ordered pair of variables.
///
/// The anchoring order matters: [`BinaryConstraint::is_satisfied`] always
/// receives the first argument as the value of `var1` and the second as the
/// value of `var2`. Call sites that know a value's variable but not its
/// position should use [`BinaryConstraint::holds`], which orients the
/// arguments for them.
#[derive(Clone)]
pub struct BinaryConstraint<V: ValueEquality> {
    vars: [VariableId; 2],
    relation: BinaryRelation<V>,
}

impl<V: ValueEquality> BinaryConstraint<V> {
    /// Creates a constraint requiring the two variables to take different
    /// values.
    pub fn not_equal(var1: VariableId, var2: VariableId) -> Self {
        Self {
            vars: [var1, var2],
            relation: BinaryRelation::NotEqual,
        }
    }

    /// Creates a constraint enforcing an arbitrary relation between the two
    /// variables. The predicate receives values in `(var1, var2)` order.
    pub fn custom<F>(var1: VariableId, var2: VariableId, predicate: F) -> Self
    where
        F: Fn(&V, &V) -> bool + Send + Sync + 'static,
    {
        Self {
            vars: [var1, var2],
            relation: BinaryRelation::Custom(Arc::new(predicate)),
        }
    }

    /// The ordered pair of variables this constraint connects.
    pub fn variables(&self) -> (VariableId, VariableId) {
        (self.vars[0], self.vars[1])
    }

    /// Whether this constraint connects to `var`.
    pub fn affects(&self, var: VariableId) -> bool {
        var == self.vars[0] || var == self.vars[1]
    }

    /// The endpoint opposite to `var`.
    pub fn other_variable(&self, var: VariableId) -> VariableId {
        if var == self.vars[0] {
            self.vars[1]
        } else {
            self.vars[0]
        }
    }

    /// Evaluates the relation with `value1` bound to `var1` and `value2`
    /// bound to `var2`.
    pub fn is_satisfied(&self, value1: &V, value2: &V) -> bool {
        match &self.relation {
            BinaryRelation::NotEqual => value1 != value2,
            BinaryRelation::Custom(predicate) => predicate(value1, value2),
        }
    }

    /// Evaluates the relation with `value` bound to `var` and `other_value`
    /// bound to the opposite endpoint, respecting the anchoring order.
    pub fn holds(&self, var: VariableId, value: &V, other_value: &V) -> bool {
        if var == self.vars[0] {
            self.is_satisfied(value, other_value)
        } else {
            self.is_satisfied(other_value, value)
        }
    }

    pub fn descriptor(&self) -> ConstraintDescriptor {
        match &self.relation {
            BinaryRelation::NotEqual => ConstraintDescriptor {
                name: "NotEqualConstraint".to_string(),
                description: format!("?{} != ?{}", self.vars[0], self.vars[1]),
            },
            BinaryRelation::Custom(_) => ConstraintDescriptor {
                name: "CustomBinaryConstraint".to_string(),
                description: format!("custom(?{}, ?{})", self.vars[0], self.vars[1]),
            },
        }
    }
}

impl<V: ValueEquality> fmt::Debug for BinaryConstraint<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let descriptor = self.descriptor();
        write!(f, "{} {{ {} }}", descriptor.name, descriptor.description)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::value::StandardValue;

    fn int(i: i64) -> StandardValue {
        StandardValue::Int(i)
    }

    #[test]
    fn bad_value_rejects_only_the_bad_value() {
        let constraint = UnaryConstraint::bad_value(0, int(5));
        assert!(constraint.affects(0));
        assert!(!constraint.affects(1));
        assert!(!constraint.is_satisfied(&int(5)));
        assert!(constraint.is_satisfied(&int(4)));
    }

    #[test]
    fn good_value_accepts_only_the_good_value() {
        let constraint = UnaryConstraint::good_value(3, int(2));
        assert!(constraint.is_satisfied(&int(2)));
        assert!(!constraint.is_satisfied(&int(1)));
    }

    #[test]
    fn custom_unary_delegates_to_predicate() {
        let constraint =
            UnaryConstraint::custom(0, |v: &StandardValue| matches!(v, StandardValue::Int(i) if i % 2 == 0));
        assert!(constraint.is_satisfied(&int(4)));
        assert!(!constraint.is_satisfied(&int(3)));
    }

    #[test]
    fn not_equal_is_symmetric() {
        let constraint = BinaryConstraint::<StandardValue>::not_equal(0, 1);
        assert!(constraint.is_satisfied(&int(1), &int(2)));
        assert!(!constraint.is_satisfied(&int(2), &int(2)));
        assert_eq!(constraint.other_variable(0), 1);
        assert_eq!(constraint.other_variable(1), 0);
    }

    #[test]
    fn holds_orients_asymmetric_relations() {
        // ?0 < ?1
        let less_than = BinaryConstraint::custom(0, 1, |a: &StandardValue, b: &StandardValue| a < b);

        // Anchored order: 1 < 2 holds, 2 < 1 does not.
        assert!(less_than.holds(0, &int(1), &int(2)));
        assert!(!less_than.holds(0, &int(2), &int(1)));

        // Viewed from var 1 the arguments must be swapped back.
        assert!(less_than.holds(1, &int(2), &int(1)));
        assert!(!less_than.holds(1, &int(1), &int(2)));
    }
}
