use super::component::ComponentKind;
use super::error::ModelError;
use super::ids::{CompartmentId, MonomerId, ParameterId};
use super::model::Model;
use super::rule::RuleDecl;
use crate::core::utils::identifiers::is_identifier;
use std::collections::BTreeSet;
use std::fmt;

/// Constraint on one site of a monomer within a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteCondition {
    /// No constraint on the site.
    #[default]
    Unspecified,
    /// Bond to a partner site carrying the same index within the same pattern list.
    Bond(u32),
    /// Direct binding to one of the listed monomer types.
    BoundTo(BTreeSet<MonomerId>),
}

impl SiteCondition {
    pub fn bond(index: u32) -> Self {
        Self::Bond(index)
    }

    /// Binding to a single monomer type, normalized to a one-element set.
    pub fn bound_to(monomer: MonomerId) -> Self {
        Self::BoundTo(BTreeSet::from([monomer]))
    }

    pub fn bound_to_any<I: IntoIterator<Item = MonomerId>>(monomers: I) -> Self {
        Self::BoundTo(monomers.into_iter().collect())
    }

    pub fn bond_index(&self) -> Option<u32> {
        match self {
            Self::Bond(index) => Some(*index),
            _ => None,
        }
    }

    fn is_valid_in(&self, model: &Model) -> bool {
        match self {
            Self::Unspecified | Self::Bond(_) => true,
            Self::BoundTo(partners) => {
                !partners.is_empty() && partners.iter().all(|id| model.monomer(*id).is_some())
            }
        }
    }
}

impl From<u32> for SiteCondition {
    fn from(index: u32) -> Self {
        Self::Bond(index)
    }
}

impl From<MonomerId> for SiteCondition {
    fn from(monomer: MonomerId) -> Self {
        Self::bound_to(monomer)
    }
}

impl From<Vec<MonomerId>> for SiteCondition {
    fn from(monomers: Vec<MonomerId>) -> Self {
        Self::bound_to_any(monomers)
    }
}

/// A concrete usage of a monomer with per-site conditions.
///
/// Patterns are only produced by [`PatternBuilder`], which validates them
/// against the model they were built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonomerPattern {
    monomer: MonomerId,
    conditions: Vec<(String, SiteCondition)>,
    compartment: Option<CompartmentId>,
}

impl MonomerPattern {
    pub fn monomer(&self) -> MonomerId {
        self.monomer
    }

    /// Site conditions in the order they were given.
    pub fn conditions(&self) -> &[(String, SiteCondition)] {
        &self.conditions
    }

    pub fn condition(&self, site: &str) -> Option<&SiteCondition> {
        self.conditions
            .iter()
            .find(|(name, _)| name == site)
            .map(|(_, condition)| condition)
    }

    pub fn compartment(&self) -> Option<CompartmentId> {
        self.compartment
    }

    pub fn bond_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.conditions
            .iter()
            .filter_map(|(_, condition)| condition.bond_index())
    }

    /// Joins two patterns into an ordered pattern list.
    pub fn combine(self, other: MonomerPattern) -> ReactionPattern {
        ReactionPattern {
            patterns: vec![self, other],
        }
    }

    /// Checks that every reference held by the pattern resolves in `model`.
    pub(crate) fn is_valid_in(&self, model: &Model) -> bool {
        let Some(monomer) = model.monomer(self.monomer) else {
            return false;
        };
        let compartment_ok = self
            .compartment
            .is_none_or(|id| model.compartment(id).is_some());
        compartment_ok
            && self
                .conditions
                .iter()
                .all(|(site, condition)| monomer.has_site(site) && condition.is_valid_in(model))
    }

    pub fn display<'a>(&'a self, model: &'a Model) -> PatternDisplay<'a> {
        PatternDisplay {
            pattern: self,
            model,
        }
    }
}

#[derive(Debug, Clone)]
enum RawCondition {
    Value(SiteCondition),
    Text(String),
}

/// Pattern factory of a monomer.
///
/// Conditions are collected first and validated together in [`build`](Self::build),
/// so a single error reports every offending site.
#[derive(Debug, Clone)]
pub struct PatternBuilder<'a> {
    model: &'a Model,
    monomer: MonomerId,
    conditions: Vec<(String, RawCondition)>,
    compartment: CompartmentChoice,
}

#[derive(Debug, Clone, Copy)]
enum CompartmentChoice {
    Inherit,
    Override(CompartmentId),
    Clear,
}

impl<'a> PatternBuilder<'a> {
    pub(crate) fn new(model: &'a Model, monomer: MonomerId) -> Self {
        Self {
            model,
            monomer,
            conditions: Vec::new(),
            compartment: CompartmentChoice::Inherit,
        }
    }

    /// Sets the condition of a site, replacing an earlier condition for the same site.
    pub fn site(mut self, site: &str, condition: impl Into<SiteCondition>) -> Self {
        self.set(site, RawCondition::Value(condition.into()));
        self
    }

    /// Sets a site condition from its textual form.
    ///
    /// `""` and `"?"` leave the site unspecified, a decimal integer is a bond
    /// index, and `A` or `A|B` binds to the named monomers.
    pub fn site_text(mut self, site: &str, text: &str) -> Self {
        self.set(site, RawCondition::Text(text.to_string()));
        self
    }

    /// Overrides the monomer's default compartment for this pattern.
    pub fn compartment(mut self, compartment: CompartmentId) -> Self {
        self.compartment = CompartmentChoice::Override(compartment);
        self
    }

    /// Places this pattern in no compartment, ignoring the monomer's default.
    pub fn no_compartment(mut self) -> Self {
        self.compartment = CompartmentChoice::Clear;
        self
    }

    fn set(&mut self, site: &str, condition: RawCondition) {
        match self.conditions.iter_mut().find(|(name, _)| name == site) {
            Some(entry) => entry.1 = condition,
            None => self.conditions.push((site.to_string(), condition)),
        }
    }

    pub fn build(self) -> Result<MonomerPattern, ModelError> {
        let monomer = self
            .model
            .monomer(self.monomer)
            .ok_or(ModelError::UnresolvedReference {
                kind: ComponentKind::Monomer,
            })?;

        let unknown_sites: Vec<String> = self
            .conditions
            .iter()
            .filter(|(site, _)| !monomer.has_site(site))
            .map(|(site, _)| site.clone())
            .collect();
        if !unknown_sites.is_empty() {
            return Err(ModelError::UnknownSite {
                monomer: monomer.name.clone(),
                sites: unknown_sites,
            });
        }

        let mut conditions = Vec::with_capacity(self.conditions.len());
        let mut invalid_sites = Vec::new();
        for (site, raw) in self.conditions {
            let resolved = match raw {
                RawCondition::Value(condition) => Some(condition),
                RawCondition::Text(text) => parse_condition(self.model, &text),
            };
            match resolved {
                Some(condition) if condition.is_valid_in(self.model) => {
                    conditions.push((site, condition))
                }
                _ => invalid_sites.push(site),
            }
        }
        if !invalid_sites.is_empty() {
            return Err(ModelError::InvalidPatternValue {
                monomer: monomer.name.clone(),
                sites: invalid_sites,
            });
        }

        let compartment = match self.compartment {
            CompartmentChoice::Inherit => monomer.compartment,
            CompartmentChoice::Override(id) => Some(id),
            CompartmentChoice::Clear => None,
        };
        if let Some(id) = compartment {
            if self.model.compartment(id).is_none() {
                return Err(ModelError::InvalidCompartment {
                    owner: monomer.name.clone(),
                });
            }
        }

        Ok(MonomerPattern {
            monomer: self.monomer,
            conditions,
            compartment,
        })
    }
}

fn parse_condition(model: &Model, text: &str) -> Option<SiteCondition> {
    let text = text.trim();
    if text.is_empty() || text == "?" {
        return Some(SiteCondition::Unspecified);
    }
    if text.chars().all(|c| c.is_ascii_digit()) {
        return text.parse().ok().map(SiteCondition::Bond);
    }
    let partners = text
        .split('|')
        .map(str::trim)
        .map(|name| {
            if is_identifier(name) {
                model.monomer_named(name)
            } else {
                None
            }
        })
        .collect::<Option<BTreeSet<_>>>()?;
    Some(SiteCondition::BoundTo(partners))
}

pub struct PatternDisplay<'a> {
    pattern: &'a MonomerPattern,
    model: &'a Model,
}

impl fmt::Display for PatternDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .model
            .monomer(self.pattern.monomer)
            .map_or("<unresolved>", |m| m.name.as_str());
        write!(f, "{name}(")?;
        for (i, (site, condition)) in self.pattern.conditions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match condition {
                SiteCondition::Unspecified => write!(f, "{site}=?")?,
                SiteCondition::Bond(index) => write!(f, "{site}={index}")?,
                SiteCondition::BoundTo(partners) => {
                    let names: Vec<&str> = partners
                        .iter()
                        .filter_map(|id| self.model.monomer(*id))
                        .map(|m| m.name.as_str())
                        .collect();
                    write!(f, "{site}=[{}]", names.join(", "))?
                }
            }
        }
        write!(f, ")")?;
        if let Some(compartment) = self
            .pattern
            .compartment
            .and_then(|id| self.model.compartment(id))
        {
            write!(f, " ** {}", compartment.name)?;
        }
        Ok(())
    }
}

/// An ordered list of monomer patterns, one side of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionPattern {
    patterns: Vec<MonomerPattern>,
}

impl ReactionPattern {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pattern at the end of the list.
    pub fn then(mut self, pattern: MonomerPattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    pub fn prepend(mut self, pattern: MonomerPattern) -> Self {
        self.patterns.insert(0, pattern);
        self
    }

    /// Concatenates two lists, keeping `self` first.
    pub fn join(mut self, other: ReactionPattern) -> Self {
        self.patterns.extend(other.patterns);
        self
    }

    pub fn patterns(&self) -> &[MonomerPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn into_patterns(self) -> Vec<MonomerPattern> {
        self.patterns
    }

    /// Turns this reactant list and a product list into a rule declaration.
    pub fn into_rule(
        self,
        products: impl Into<ReactionPattern>,
        name: &str,
        rate: ParameterId,
    ) -> RuleDecl {
        RuleDecl::new(name, self, products.into(), rate)
    }
}

impl From<MonomerPattern> for ReactionPattern {
    fn from(pattern: MonomerPattern) -> Self {
        Self {
            patterns: vec![pattern],
        }
    }
}

impl From<Vec<MonomerPattern>> for ReactionPattern {
    fn from(patterns: Vec<MonomerPattern>) -> Self {
        Self { patterns }
    }
}

impl FromIterator<MonomerPattern> for ReactionPattern {
    fn from_iter<I: IntoIterator<Item = MonomerPattern>>(iter: I) -> Self {
        Self {
            patterns: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ReactionPattern {
    type Item = MonomerPattern;
    type IntoIter = std::vec::IntoIter<MonomerPattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.into_iter()
    }
}
