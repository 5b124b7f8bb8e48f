//! Export Configuration Builder
//!
//! Runs in the opposite direction of catalog registration: a registry
//! component declares that its value should also be visible in contract
//! space. When the underlying registration is added to the registry, a
//! second, externally owned registration is made under the contract service.
//! That registration produces an [`Export`] whose value resolves the original
//! registration lazily, from the lifetime scope the export was resolved in.

use std::sync::Arc;

use partwire_domain::constants::EXPORT_TYPE_IDENTITY_METADATA_KEY;
use partwire_domain::{
    ContractName, ContractService, Error, Export, ExportDefinition, Metadata, MetadataValue,
    RegistrationBuilder, Result, Service, instance, type_identity,
};
use tracing::debug;

/// Accumulates the contract and metadata a registration is exported with
#[derive(Clone, Debug, Default)]
pub struct ExportConfigurationBuilder {
    contract: Option<ContractService>,
    metadata: Metadata,
}

impl ExportConfigurationBuilder {
    /// Empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Export under an anonymous contract name
    pub fn expose_as<C: Into<ContractName>>(self, contract_name: C) -> Self {
        self.expose_as_service(ContractService::new(contract_name, ""))
    }

    /// Export under an explicit contract service
    pub fn expose_as_service(mut self, contract: ContractService) -> Self {
        self.contract = Some(contract);
        self
    }

    /// Export under the type contract of `T`
    ///
    /// Also records the export type identity in the metadata.
    pub fn expose_as_type<T: ?Sized + 'static>(mut self) -> Self {
        let identity = type_identity::<T>();
        self.metadata
            .insert(EXPORT_TYPE_IDENTITY_METADATA_KEY, identity.clone());
        self.contract = Some(ContractService::new(identity.clone(), identity));
        self
    }

    /// Add a metadata entry; later entries with the same key replace earlier ones
    pub fn with_metadata<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<MetadataValue>,
    {
        self.metadata.insert(key, value);
        self
    }

    /// Contract chosen so far
    pub fn contract(&self) -> Option<&ContractService> {
        self.contract.as_ref()
    }

    /// Metadata accumulated so far
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Attach the export to `registration`
    ///
    /// Fails before touching the registration when no contract was chosen or
    /// a metadata key is empty.
    pub fn apply(self, registration: RegistrationBuilder) -> Result<RegistrationBuilder> {
        let contract = self
            .contract
            .ok_or_else(|| Error::invalid_argument("export configuration has no contract"))?;
        if contract.contract_name().is_empty() {
            return Err(Error::invalid_argument(
                "export configuration has an empty contract name",
            ));
        }
        if self.metadata.keys().any(str::is_empty) {
            return Err(Error::invalid_argument(
                "export configuration has an empty metadata key",
            ));
        }

        let metadata = self.metadata;
        Ok(registration.on_registered(move |registry, target| {
            let definition = ExportDefinition::new(contract.contract_name(), metadata.clone());
            let target = Arc::clone(target);
            debug!(%contract, source = %target, "exporting registration");

            registry.register(
                RegistrationBuilder::from_factory(move |context, _| {
                    let scope = context.scope();
                    let target = Arc::clone(&target);
                    Ok(instance(Export::new(definition.clone(), move || {
                        scope.resolve_registration(&target, &[])
                    })))
                })
                .as_service(Service::Contract(contract))
                .externally_owned()
                .with_metadata_map(&metadata),
            )?;
            Ok(())
        }))
    }
}

/// Fluent export configuration on registration builders
pub trait ExportRegistrationExt: Sized {
    /// Expose the registration's value in contract space
    fn exported<F>(self, configure: F) -> Result<Self>
    where
        F: FnOnce(ExportConfigurationBuilder) -> ExportConfigurationBuilder;
}

impl ExportRegistrationExt for RegistrationBuilder {
    fn exported<F>(self, configure: F) -> Result<Self>
    where
        F: FnOnce(ExportConfigurationBuilder) -> ExportConfigurationBuilder,
    {
        configure(ExportConfigurationBuilder::new()).apply(self)
    }
}
