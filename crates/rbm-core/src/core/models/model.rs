use super::compartment::{Compartment, CompartmentDecl};
use super::component::{Component, ComponentKind};
use super::error::ModelError;
use super::ids::{
    CompartmentId, CompartmentKey, ModelUid, MonomerId, MonomerKey, ParameterId, ParameterKey,
    RuleId, RuleKey,
};
use super::monomer::{Monomer, MonomerDecl};
use super::parameter::Parameter;
use super::pattern::PatternBuilder;
use super::rule::{Rule, RuleDecl};
use slotmap::SlotMap;
use std::collections::HashMap;

/// The aggregate root of a rule-based model.
///
/// A model owns its monomers, compartments, parameters and rules, keeps each
/// collection in creation order, and binds every entity's name in a single
/// namespace shared by all kinds. Entities are only ever added, never removed,
/// and an insertion that fails validation leaves the model untouched.
///
/// Ids issued by a model carry its [`ModelUid`]; an id issued by any other model
/// never resolves here, even when its slot key happens to match a local one.
/// A clone keeps the identity of its source, so the source's ids stay valid in it.
#[derive(Debug, Clone)]
pub struct Model {
    /// Name of the model, bound in its own namespace.
    pub name: String,
    uid: ModelUid,
    /// Primary storage for monomers using a slot map for stable ID management.
    monomers: SlotMap<MonomerKey, Monomer>,
    /// Primary storage for compartments.
    compartments: SlotMap<CompartmentKey, Compartment>,
    /// Primary storage for parameters.
    parameters: SlotMap<ParameterKey, Parameter>,
    /// Primary storage for rules.
    rules: SlotMap<RuleKey, Rule>,
    /// Creation order of each entity kind.
    monomer_order: Vec<MonomerId>,
    compartment_order: Vec<CompartmentId>,
    parameter_order: Vec<ParameterId>,
    rule_order: Vec<RuleId>,
    /// Lookup map from every bound name to the entity it designates.
    namespace: HashMap<String, Component>,
}

impl Model {
    /// Creates a new, empty model and binds its name.
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            uid: ModelUid::next(),
            monomers: SlotMap::with_key(),
            compartments: SlotMap::with_key(),
            parameters: SlotMap::with_key(),
            rules: SlotMap::with_key(),
            monomer_order: Vec::new(),
            compartment_order: Vec::new(),
            parameter_order: Vec::new(),
            rule_order: Vec::new(),
            namespace: HashMap::from([(name.to_string(), Component::Model)]),
        }
    }

    fn ensure_name_free(&self, name: &str) -> Result<(), ModelError> {
        if self.namespace.contains_key(name) {
            return Err(ModelError::DuplicateName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    /// Validates and adds a monomer.
    ///
    /// # Arguments
    ///
    /// * `decl` - The monomer declaration.
    /// * `strict_labels` - Whether state labels must be plain alphanumeric tokens.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if the name is bound, the monomer's own validation
    /// error, or `InvalidCompartment` if its compartment is not part of this model.
    pub(crate) fn insert_monomer(
        &mut self,
        decl: MonomerDecl,
        strict_labels: bool,
    ) -> Result<MonomerId, ModelError> {
        self.ensure_name_free(&decl.name)?;
        let monomer = Monomer::from_decl(decl, strict_labels)?;
        if let Some(compartment) = monomer.compartment {
            if self.compartment(compartment).is_none() {
                return Err(ModelError::InvalidCompartment {
                    owner: monomer.name,
                });
            }
        }

        let name = monomer.name.clone();
        let id = MonomerId::new(self.uid, self.monomers.insert(monomer));
        self.monomer_order.push(id);
        self.namespace.insert(name, Component::Monomer(id));
        Ok(id)
    }

    /// Validates and adds a compartment.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if the name is bound, `InvalidNeighbor` listing the
    /// positions of neighbors that are not compartments of this model, or
    /// `InvalidCompartmentGeometry` for an unusable dimension or size.
    pub(crate) fn insert_compartment(
        &mut self,
        decl: CompartmentDecl,
    ) -> Result<CompartmentId, ModelError> {
        self.ensure_name_free(&decl.name)?;
        let invalid: Vec<usize> = decl
            .neighbors
            .iter()
            .enumerate()
            .filter(|(_, id)| self.compartment(**id).is_none())
            .map(|(i, _)| i)
            .collect();
        if !invalid.is_empty() {
            return Err(ModelError::InvalidNeighbor {
                compartment: decl.name,
                positions: invalid,
            });
        }
        let compartment = Compartment::from_decl(decl)?;

        let name = compartment.name.clone();
        let id = CompartmentId::new(self.uid, self.compartments.insert(compartment));
        self.compartment_order.push(id);
        self.namespace.insert(name, Component::Compartment(id));
        Ok(id)
    }

    /// Adds a parameter. A missing value leaves the parameter unset (`NaN`).
    pub(crate) fn insert_parameter(
        &mut self,
        name: &str,
        value: Option<f64>,
    ) -> Result<ParameterId, ModelError> {
        self.ensure_name_free(name)?;
        let key = self.parameters.insert(Parameter::new(name, value));
        let id = ParameterId::new(self.uid, key);
        self.parameter_order.push(id);
        self.namespace
            .insert(name.to_string(), Component::Parameter(id));
        Ok(id)
    }

    /// Validates and adds a rule.
    ///
    /// # Arguments
    ///
    /// * `decl` - The rule declaration.
    /// * `enforce_bond_balance` - Whether every bond index must occur exactly twice
    ///   within the reactants and within the products.
    pub(crate) fn insert_rule(
        &mut self,
        decl: RuleDecl,
        enforce_bond_balance: bool,
    ) -> Result<RuleId, ModelError> {
        self.ensure_name_free(&decl.name)?;
        let rule = Rule::from_decl(decl, self, enforce_bond_balance)?;

        let name = rule.name.clone();
        let id = RuleId::new(self.uid, self.rules.insert(rule));
        self.rule_order.push(id);
        self.namespace.insert(name, Component::Rule(id));
        Ok(id)
    }

    /// The identity stamped into every id this model issues.
    pub fn uid(&self) -> ModelUid {
        self.uid
    }

    /// Starts a pattern of the given monomer.
    ///
    /// The builder validates the pattern against this model when it is built.
    pub fn pattern(&self, monomer: MonomerId) -> PatternBuilder<'_> {
        PatternBuilder::new(self, monomer)
    }

    /// Resolves a name to the entity bound under it.
    ///
    /// # Return
    ///
    /// Returns `Some(Component)` if the name is bound, otherwise `None`.
    pub fn lookup(&self, name: &str) -> Option<Component> {
        self.namespace.get(name).copied()
    }

    pub fn monomer_named(&self, name: &str) -> Option<MonomerId> {
        self.lookup(name)?.as_monomer()
    }

    pub fn compartment_named(&self, name: &str) -> Option<CompartmentId> {
        self.lookup(name)?.as_compartment()
    }

    pub fn parameter_named(&self, name: &str) -> Option<ParameterId> {
        self.lookup(name)?.as_parameter()
    }

    pub fn rule_named(&self, name: &str) -> Option<RuleId> {
        self.lookup(name)?.as_rule()
    }

    /// Returns the names bound to entities of one kind, in creation order.
    pub fn names_of_kind(&self, kind: ComponentKind) -> Vec<&str> {
        match kind {
            ComponentKind::Model => vec![self.name.as_str()],
            ComponentKind::Monomer => self.monomers().map(|(_, m)| m.name.as_str()).collect(),
            ComponentKind::Compartment => self
                .compartments()
                .map(|(_, c)| c.name.as_str())
                .collect(),
            ComponentKind::Parameter => self.parameters().map(|(_, p)| p.name.as_str()).collect(),
            ComponentKind::Rule => self.rules().map(|(_, r)| r.name.as_str()).collect(),
        }
    }

    /// Resolves a monomer id. Ids issued by another model resolve to `None`.
    pub fn monomer(&self, id: MonomerId) -> Option<&Monomer> {
        if id.model() != self.uid {
            return None;
        }
        self.monomers.get(id.key())
    }

    pub fn compartment(&self, id: CompartmentId) -> Option<&Compartment> {
        if id.model() != self.uid {
            return None;
        }
        self.compartments.get(id.key())
    }

    pub fn parameter(&self, id: ParameterId) -> Option<&Parameter> {
        if id.model() != self.uid {
            return None;
        }
        self.parameters.get(id.key())
    }

    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        if id.model() != self.uid {
            return None;
        }
        self.rules.get(id.key())
    }

    /// Returns an iterator over all monomers in creation order.
    pub fn monomers(&self) -> impl Iterator<Item = (MonomerId, &Monomer)> {
        self.monomer_order
            .iter()
            .map(|&id| (id, &self.monomers[id.key()]))
    }

    /// Returns an iterator over all compartments in creation order.
    pub fn compartments(&self) -> impl Iterator<Item = (CompartmentId, &Compartment)> {
        self.compartment_order
            .iter()
            .map(|&id| (id, &self.compartments[id.key()]))
    }

    /// Returns an iterator over all parameters in creation order.
    pub fn parameters(&self) -> impl Iterator<Item = (ParameterId, &Parameter)> {
        self.parameter_order
            .iter()
            .map(|&id| (id, &self.parameters[id.key()]))
    }

    /// Returns an iterator over all rules in creation order.
    pub fn rules(&self) -> impl Iterator<Item = (RuleId, &Rule)> {
        self.rule_order.iter().map(|&id| (id, &self.rules[id.key()]))
    }

    pub fn monomer_ids(&self) -> &[MonomerId] {
        &self.monomer_order
    }

    pub fn compartment_ids(&self) -> &[CompartmentId] {
        &self.compartment_order
    }

    pub fn parameter_ids(&self) -> &[ParameterId] {
        &self.parameter_order
    }

    pub fn rule_ids(&self) -> &[RuleId] {
        &self.rule_order
    }
}
