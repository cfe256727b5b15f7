use super::error::ModelError;
use super::ids::{CompartmentId, MonomerId, ParameterId, RuleId};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Model,
    Monomer,
    Compartment,
    Parameter,
    Rule,
}

impl FromStr for ComponentKind {
    type Err = ModelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "model" => Ok(Self::Model),
            "monomer" => Ok(Self::Monomer),
            "compartment" => Ok(Self::Compartment),
            "parameter" => Ok(Self::Parameter),
            "rule" => Ok(Self::Rule),
            _ => Err(ModelError::UnknownComponentKind(s.to_string())),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Model => "Model",
                Self::Monomer => "Monomer",
                Self::Compartment => "Compartment",
                Self::Parameter => "Parameter",
                Self::Rule => "Rule",
            }
        )
    }
}

/// A name-bound entity of a model.
///
/// This is what a name resolves to in the model's namespace. The model's own
/// name is bound as [`Component::Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Model,
    Monomer(MonomerId),
    Compartment(CompartmentId),
    Parameter(ParameterId),
    Rule(RuleId),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Model => ComponentKind::Model,
            Self::Monomer(_) => ComponentKind::Monomer,
            Self::Compartment(_) => ComponentKind::Compartment,
            Self::Parameter(_) => ComponentKind::Parameter,
            Self::Rule(_) => ComponentKind::Rule,
        }
    }

    pub fn as_monomer(&self) -> Option<MonomerId> {
        match self {
            Self::Monomer(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_compartment(&self) -> Option<CompartmentId> {
        match self {
            Self::Compartment(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_parameter(&self) -> Option<ParameterId> {
        match self {
            Self::Parameter(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_rule(&self) -> Option<RuleId> {
        match self {
            Self::Rule(id) => Some(*id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::ids::ModelUid;
    use slotmap::KeyData;

    fn dummy_monomer_id(n: u64) -> MonomerId {
        MonomerId::new(ModelUid::next(), KeyData::from_ffi(n).into())
    }

    #[test]
    fn component_kind_from_str_parses_valid_strings() {
        assert_eq!("model".parse::<ComponentKind>().unwrap(), ComponentKind::Model);
        assert_eq!(
            "Monomer".parse::<ComponentKind>().unwrap(),
            ComponentKind::Monomer
        );
        assert_eq!(
            " compartment ".parse::<ComponentKind>().unwrap(),
            ComponentKind::Compartment
        );
        assert_eq!(
            "PARAMETER".parse::<ComponentKind>().unwrap(),
            ComponentKind::Parameter
        );
        assert_eq!("rule".parse::<ComponentKind>().unwrap(), ComponentKind::Rule);
    }

    #[test]
    fn component_kind_from_str_rejects_unknown_kinds() {
        assert_eq!(
            "reaction".parse::<ComponentKind>(),
            Err(ModelError::UnknownComponentKind("reaction".to_string()))
        );
        assert!("".parse::<ComponentKind>().is_err());
    }

    #[test]
    fn component_kind_display_round_trips_through_from_str() {
        for kind in [
            ComponentKind::Model,
            ComponentKind::Monomer,
            ComponentKind::Compartment,
            ComponentKind::Parameter,
            ComponentKind::Rule,
        ] {
            assert_eq!(kind.to_string().parse::<ComponentKind>().unwrap(), kind);
        }
    }

    #[test]
    fn component_accessors_match_only_their_own_kind() {
        let id = dummy_monomer_id(7);
        let component = Component::Monomer(id);
        assert_eq!(component.kind(), ComponentKind::Monomer);
        assert_eq!(component.as_monomer(), Some(id));
        assert!(component.as_parameter().is_none());
        assert!(component.as_compartment().is_none());
        assert!(component.as_rule().is_none());
        assert_eq!(Component::Model.kind(), ComponentKind::Model);
    }
}
