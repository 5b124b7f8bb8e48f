//! Exposed services mappers
//!
//! Every export is reachable through its contract service. A mapper decides
//! which additional typed or keyed services the export answers to, so that
//! ordinary registry lookups can reach it too.

use partwire_domain::{Error, ExportDefinition, Result, Service, format_type_identity};

use crate::identity::ContractIdentityResolver;

/// Decides the extra services an export is exposed under
pub trait ExposedServicesMapper: Send + Sync {
    /// Services for `export`, possibly none
    fn map(&self, export: &ExportDefinition) -> Vec<Service>;
}

impl<F> ExposedServicesMapper for F
where
    F: Fn(&ExportDefinition) -> Vec<Service> + Send + Sync,
{
    fn map(&self, export: &ExportDefinition) -> Vec<Service> {
        self(export)
    }
}

/// Typed service by contract name, else keyed service by export type identity
#[derive(Clone, Debug, Default)]
pub struct DefaultExposedServicesMapper {
    resolver: ContractIdentityResolver,
}

impl DefaultExposedServicesMapper {
    /// Mapper over the process-wide type identity cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapper over a specific resolver
    pub fn with_resolver(resolver: ContractIdentityResolver) -> Self {
        Self { resolver }
    }
}

impl ExposedServicesMapper for DefaultExposedServicesMapper {
    fn map(&self, export: &ExportDefinition) -> Vec<Service> {
        let contract_name = export.contract_name();
        if let Some(service_type) = self.resolver.find_type(contract_name.as_str()) {
            return vec![Service::Typed(service_type)];
        }

        let type_identity = ContractIdentityResolver::export_type_identity(export);
        match self.resolver.find_type(&type_identity) {
            Some(service_type) => vec![Service::Keyed {
                key: contract_name.to_string(),
                service_type,
            }],
            None => Vec::new(),
        }
    }
}

/// Fixed list of interesting services
///
/// An export is exposed under the listed typed and keyed services whose
/// type identity equals the export's contract name.
#[derive(Clone, Debug)]
pub struct ExplicitServices {
    services: Vec<Service>,
}

impl ExplicitServices {
    /// Create the mapper; the list must not be empty
    pub fn new<I: IntoIterator<Item = Service>>(services: I) -> Result<Self> {
        let services: Vec<Service> = services.into_iter().collect();
        if services.is_empty() {
            return Err(Error::invalid_argument(
                "explicit exposed services list is empty",
            ));
        }
        Ok(Self { services })
    }

    /// Listed services
    pub fn services(&self) -> &[Service] {
        &self.services
    }
}

impl ExposedServicesMapper for ExplicitServices {
    fn map(&self, export: &ExportDefinition) -> Vec<Service> {
        self.services
            .iter()
            .filter(|service| {
                let service_type = match service {
                    Service::Typed(service_type) => service_type,
                    Service::Keyed { service_type, .. } => service_type,
                    _ => return false,
                };
                format_type_identity(service_type.name()) == export.contract_name().as_str()
            })
            .cloned()
            .collect()
    }
}

/// Exports stay reachable only through their contract service
#[derive(Clone, Copy, Debug, Default)]
pub struct NoExposedServices;

impl ExposedServicesMapper for NoExposedServices {
    fn map(&self, _export: &ExportDefinition) -> Vec<Service> {
        Vec::new()
    }
}
