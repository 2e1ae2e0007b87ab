pub mod assignment;
pub mod consistency;
pub mod constraint;
pub mod engine;
pub mod heuristics;
pub mod inference;
pub mod model;
pub mod propagation;
pub mod stats;
pub mod value;
pub mod work_list;
