//! Nexo is a generic solver for binary constraint satisfaction problems
//! (CSPs): given variables with finite candidate domains and unary/binary
//! constraints over them, it finds an assignment of one value per variable
//! satisfying every constraint, or proves that none exists.
//!
//! The engine combines constraint propagation (unary elimination and the
//! AC-3 algorithm) with a backtracking depth-first search whose moving
//! parts are pluggable: variable selection, value ordering, and the
//! inference run after each tentative assignment (none, forward checking,
//! or maintained arc consistency).
//!
//! # Core Concepts
//!
//! - **[`Csp`]**: the immutable problem description — variables, initial
//!   domains, and constraints.
//! - **[`UnaryConstraint`] / [`BinaryConstraint`]**: the rules. Standard
//!   variants (`BadValue`, `GoodValue`, `NotEqual`) cover the common cases;
//!   `Custom` variants accept arbitrary predicates.
//! - **[`SolverEngine`]**: the search driver, configured with heuristics
//!   and an inference strategy.
//!
//! Each building block — [`consistent`], [`ac3`], [`forward_checking`],
//! [`maintain_arc_consistency`], the heuristics — is also independently
//! callable, which is how the unit tests exercise them.
//!
//! # Example: A Simple 2-Variable Problem
//!
//! Solving `?A != ?B` where `?A` can be `1` or `2` and `?B` can only be
//! `1`: the solver must deduce that `?A` is `2`.
//!
//! ```
//! use nexo::solver::constraint::BinaryConstraint;
//! use nexo::solver::engine::{SolverEngine, VariableId};
//! use nexo::solver::heuristics::value::LeastConstrainingValueHeuristic;
//! use nexo::solver::heuristics::variable::MinimumRemainingValuesHeuristic;
//! use nexo::solver::inference::MaintainArcConsistency;
//! use nexo::solver::model::Csp;
//! use nexo::solver::value::StandardValue;
//!
//! let a: VariableId = 0;
//! let b: VariableId = 1;
//!
//! let model = Csp::new(
//!     vec![a, b],
//!     vec![
//!         im::hashset![StandardValue::Int(1), StandardValue::Int(2)],
//!         im::hashset![StandardValue::Int(1)],
//!     ],
//!     vec![],
//!     vec![BinaryConstraint::not_equal(a, b)],
//! )
//! .unwrap();
//!
//! let engine = SolverEngine::new(
//!     Box::new(MinimumRemainingValuesHeuristic),
//!     Box::new(LeastConstrainingValueHeuristic),
//!     Box::new(MaintainArcConsistency),
//! );
//! let (solution, _stats) = engine.solve(&model);
//! let solution = solution.unwrap();
//!
//! assert_eq!(solution[&a], StandardValue::Int(2));
//! assert_eq!(solution[&b], StandardValue::Int(1));
//! ```
//!
//! [`Csp`]: solver::model::Csp
//! [`UnaryConstraint`]: solver::constraint::UnaryConstraint
//! [`BinaryConstraint`]: solver::constraint::BinaryConstraint
//! [`SolverEngine`]: solver::engine::SolverEngine
//! [`consistent`]: solver::consistency::consistent
//! [`ac3`]: solver::propagation::ac3
//! [`forward_checking`]: solver::propagation::forward_checking
//! [`maintain_arc_consistency`]: solver::propagation::maintain_arc_consistency

pub mod error;
pub mod examples;
pub mod solver;
