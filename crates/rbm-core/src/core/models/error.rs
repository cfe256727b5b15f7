use super::component::ComponentKind;
use super::rule::PatternSide;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Only one model may be declared ('{existing}' previously declared)")]
    DuplicateModel { existing: String },

    #[error("A model must be declared before declaring any model components")]
    ModelNotDeclared,

    #[error("'{name}' is already defined")]
    DuplicateName { name: String },

    #[error("Duplicate sites specified for monomer '{monomer}': {sites:?}")]
    DuplicateSite { monomer: String, sites: Vec<String> },

    #[error("Unknown sites for monomer '{monomer}': {sites:?}")]
    UnknownSite { monomer: String, sites: Vec<String> },

    #[error("Malformed state labels for monomer '{monomer}' on sites: {sites:?}")]
    InvalidSiteState { monomer: String, sites: Vec<String> },

    #[error("Compartment given for '{owner}' is not a compartment of this model")]
    InvalidCompartment { owner: String },

    #[error("Invalid condition value in pattern of '{monomer}' for sites: {sites:?}")]
    InvalidPatternValue { monomer: String, sites: Vec<String> },

    #[error("Neighbors of compartment '{compartment}' at positions {positions:?} are not compartments of this model")]
    InvalidNeighbor {
        compartment: String,
        positions: Vec<usize>,
    },

    #[error("Invalid geometry for compartment '{compartment}': {reason}")]
    InvalidCompartmentGeometry { compartment: String, reason: String },

    #[error("Reactants of rule '{rule}' at positions {positions:?} are not valid monomer patterns")]
    InvalidReactant { rule: String, positions: Vec<usize> },

    #[error("Products of rule '{rule}' at positions {positions:?} are not valid monomer patterns")]
    InvalidProduct { rule: String, positions: Vec<usize> },

    #[error("Rate of rule '{rule}' is not a parameter of this model")]
    InvalidRate { rule: String },

    #[error("Unbalanced bonds in {side} of rule '{rule}' (index, occurrences): {bonds:?}")]
    UnbalancedBond {
        rule: String,
        side: PatternSide,
        bonds: Vec<(u32, usize)>,
    },

    #[error("Unknown component kind '{0}'")]
    UnknownComponentKind(String),

    #[error("Reference to a {kind} that is not part of this model")]
    UnresolvedReference { kind: ComponentKind },
}
