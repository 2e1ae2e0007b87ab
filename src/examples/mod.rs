//! Example problem domains built on the solver, used by the demos, the
//! benchmarks, and the integration-level tests.

pub mod map_colouring;
pub mod n_queens;
