use serde::{Deserialize, Serialize};

/// The base trait for any value that can appear in a variable's domain.
///
/// This trait establishes the minimum requirements for a value: it must be
/// cloneable, debuggable, equatable, and hashable. This is a marker trait,
/// so any type that satisfies these bounds implements `ValueEquality`.
pub trait ValueEquality: Clone + std::fmt::Debug + Eq + std::hash::Hash + 'static {}
impl<T> ValueEquality for T where T: Clone + std::fmt::Debug + Eq + std::hash::Hash + 'static {}

/// A capability trait for values that have a defined ordering.
///
/// Heuristics that need a deterministic value order (such as the
/// least-constraining-value orderer) require this capability so that ties
/// resolve the same way on every run.
pub trait ValueOrdering: ValueEquality + Ord {}
impl<T> ValueOrdering for T where T: ValueEquality + Ord {}

/// A concrete value type covering the common cases.
///
/// Problem-specific value types can wrap or compose `StandardValue` instead
/// of defining their own integer and boolean representations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StandardValue {
    /// A 64-bit integer value.
    Int(i64),
    /// A boolean value.
    Bool(bool),
}
