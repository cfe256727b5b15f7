use super::error::ModelError;
use super::ids::CompartmentId;
use crate::core::utils::identifiers::{find_duplicates, is_state_label};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

/// Declaration of a monomer, prior to validation.
///
/// Every declaration owns its own collections, so two declarations never share
/// a site list or a state map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonomerDecl {
    pub(crate) name: String,
    pub(crate) sites: Vec<String>,
    pub(crate) site_states: BTreeMap<String, Vec<String>>,
    pub(crate) compartment: Option<CompartmentId>,
}

impl MonomerDecl {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn sites<I, S>(mut self, sites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sites.extend(sites.into_iter().map(Into::into));
        self
    }

    /// Sets the permitted state labels of one site, replacing earlier labels.
    pub fn site_states<I, S>(mut self, site: &str, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.site_states.insert(
            site.to_string(),
            labels.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn compartment(mut self, compartment: CompartmentId) -> Self {
        self.compartment = Some(compartment);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monomer {
    pub name: String,                                 // Globally unique name
    pub compartment: Option<CompartmentId>,           // Default compartment of its patterns
    sites: Vec<String>,                               // Ordered, duplicate-free site names
    site_lookup: HashSet<String>,                     // Membership index over `sites`
    site_states: BTreeMap<String, BTreeSet<String>>, // Permitted state labels per site
}

impl Monomer {
    /// Validates a declaration's intrinsic invariants and builds the monomer.
    ///
    /// Compartment membership is a model-level property and is checked by the
    /// model when the monomer is inserted.
    pub(crate) fn from_decl(decl: MonomerDecl, strict_labels: bool) -> Result<Self, ModelError> {
        let MonomerDecl {
            name,
            sites,
            site_states,
            compartment,
        } = decl;

        let duplicates = find_duplicates(sites.iter().cloned());
        if !duplicates.is_empty() {
            return Err(ModelError::DuplicateSite {
                monomer: name,
                sites: duplicates,
            });
        }

        let site_lookup: HashSet<String> = sites.iter().cloned().collect();

        let unknown_sites: Vec<String> = site_states
            .keys()
            .filter(|site| !site_lookup.contains(*site))
            .cloned()
            .collect();
        if !unknown_sites.is_empty() {
            return Err(ModelError::UnknownSite {
                monomer: name,
                sites: unknown_sites,
            });
        }

        let invalid_sites: Vec<String> = site_states
            .iter()
            .filter(|(_, labels)| {
                !labels.iter().all(|label| {
                    if strict_labels {
                        is_state_label(label)
                    } else {
                        !label.is_empty()
                    }
                })
            })
            .map(|(site, _)| site.clone())
            .collect();
        if !invalid_sites.is_empty() {
            return Err(ModelError::InvalidSiteState {
                monomer: name,
                sites: invalid_sites,
            });
        }

        let site_states = site_states
            .into_iter()
            .map(|(site, labels)| (site, labels.into_iter().collect()))
            .collect();

        Ok(Self {
            name,
            compartment,
            sites,
            site_lookup,
            site_states,
        })
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.site_lookup.contains(site)
    }

    /// Returns the permitted state labels of a site, if any were declared.
    pub fn site_states(&self, site: &str) -> Option<&BTreeSet<String>> {
        self.site_states.get(site)
    }

    pub fn site_states_iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.site_states.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Display for Monomer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.sites.join(", "))
    }
}
