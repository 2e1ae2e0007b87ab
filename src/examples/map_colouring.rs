//! Map colouring: adjacent regions must not share a colour, i.e. a
//! NotEqual constraint per border.

use im::HashSet;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    solver::{constraint::BinaryConstraint, engine::VariableId, model::Csp},
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Colour {
    Red,
    Green,
    Blue,
    Yellow,
}

/// Builds a colouring model over `num_regions` regions with the given
/// adjacency list and colour palette.
pub fn model(
    num_regions: u32,
    adjacencies: &[(VariableId, VariableId)],
    colours: &[Colour],
) -> Result<Csp<Colour>> {
    let variables: Vec<VariableId> = (0..num_regions).collect();
    let palette: HashSet<Colour> = colours.iter().cloned().collect();
    let domains = variables.iter().map(|_| palette.clone()).collect();

    let binary = adjacencies
        .iter()
        .map(|&(a, b)| BinaryConstraint::not_equal(a, b))
        .collect();

    Csp::new(variables, domains, vec![], binary)
}

/// The mainland-Australia map colouring instance: regions WA, NT, SA, Q,
/// NSW, V and their land borders.
pub fn australia() -> Result<Csp<Colour>> {
    let adjacencies = [
        (0, 1), // WA - NT
        (0, 2), // WA - SA
        (1, 2), // NT - SA
        (1, 3), // NT - Q
        (2, 3), // SA - Q
        (2, 4), // SA - NSW
        (2, 5), // SA - V
        (3, 4), // Q - NSW
        (4, 5), // NSW - V
    ];
    model(6, &adjacencies, &[Colour::Red, Colour::Green, Colour::Blue])
}
