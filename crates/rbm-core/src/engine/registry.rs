use super::config::RegistryConfig;
use crate::core::models::compartment::CompartmentDecl;
use crate::core::models::component::ComponentKind;
use crate::core::models::error::ModelError;
use crate::core::models::ids::{CompartmentId, MonomerId, ParameterId, RuleId};
use crate::core::models::model::Model;
use crate::core::models::monomer::MonomerDecl;
use crate::core::models::pattern::PatternBuilder;
use crate::core::models::rule::RuleDecl;
use tracing::{debug, info, instrument, warn};

/// Caller-owned construction context holding at most one active model.
///
/// A script declares the model first, then its components. Each registration
/// validates the component, checks that its name is free in the model's
/// namespace, and appends it to the matching ordered collection. Registries are
/// independent of each other, so any number of models can be built in one process.
#[derive(Debug, Default)]
pub struct Registry {
    config: RegistryConfig,
    model: Option<Model>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        if !config.enforce_bond_balance {
            warn!("Bond balance enforcement is disabled; rules may contain dangling bonds.");
        }
        Self {
            config,
            model: None,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Declares the model. This must be the first call on a registry.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateModel` if a model is already active, whatever its name.
    #[instrument(skip(self))]
    pub fn declare_model(&mut self, name: &str) -> Result<(), ModelError> {
        if let Some(existing) = &self.model {
            return Err(ModelError::DuplicateModel {
                existing: existing.name.clone(),
            });
        }
        self.model = Some(Model::new(name));
        info!("Declared model '{}'.", name);
        Ok(())
    }

    pub fn is_declared(&self) -> bool {
        self.model.is_some()
    }

    /// Returns the active model.
    pub fn model(&self) -> Result<&Model, ModelError> {
        self.model.as_ref().ok_or(ModelError::ModelNotDeclared)
    }

    fn model_mut(&mut self) -> Result<&mut Model, ModelError> {
        self.model.as_mut().ok_or(ModelError::ModelNotDeclared)
    }

    #[instrument(skip_all, fields(name = %decl.name()))]
    pub fn add_monomer(&mut self, decl: MonomerDecl) -> Result<MonomerId, ModelError> {
        let strict = self.config.strict_state_labels;
        let id = self.model_mut()?.insert_monomer(decl, strict)?;
        debug!(kind = %ComponentKind::Monomer, "Registered component.");
        Ok(id)
    }

    #[instrument(skip_all, fields(name = %decl.name()))]
    pub fn add_compartment(&mut self, decl: CompartmentDecl) -> Result<CompartmentId, ModelError> {
        let id = self.model_mut()?.insert_compartment(decl)?;
        debug!(kind = %ComponentKind::Compartment, "Registered component.");
        Ok(id)
    }

    /// Registers a parameter. `None` leaves its value unset (`NaN`).
    #[instrument(skip(self))]
    pub fn add_parameter(
        &mut self,
        name: &str,
        value: Option<f64>,
    ) -> Result<ParameterId, ModelError> {
        let id = self.model_mut()?.insert_parameter(name, value)?;
        if value.is_none() {
            warn!("Parameter '{}' was registered without a value.", name);
        }
        debug!(kind = %ComponentKind::Parameter, "Registered component.");
        Ok(id)
    }

    #[instrument(skip_all, fields(name = %decl.name()))]
    pub fn add_rule(&mut self, decl: RuleDecl) -> Result<RuleId, ModelError> {
        let enforce = self.config.enforce_bond_balance;
        let id = self.model_mut()?.insert_rule(decl, enforce)?;
        debug!(kind = %ComponentKind::Rule, "Registered component.");
        Ok(id)
    }

    /// Pattern factory of a monomer of the active model.
    pub fn pattern(&self, monomer: MonomerId) -> Result<PatternBuilder<'_>, ModelError> {
        Ok(self.model()?.pattern(monomer))
    }

    /// Discards the active model, returning it if there was one.
    pub fn reset(&mut self) -> Option<Model> {
        let model = self.model.take();
        if let Some(model) = &model {
            info!("Reset registry; discarded model '{}'.", model.name);
        }
        model
    }

    /// Consumes the registry and hands over the finished model.
    pub fn into_model(self) -> Result<Model, ModelError> {
        self.model.ok_or(ModelError::ModelNotDeclared)
    }
}
