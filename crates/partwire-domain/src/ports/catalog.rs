//! Catalog ports
//!
//! The catalog describes composable parts: units that declare exports (values
//! they supply under a contract name) and imports (dependencies they require).
//! These traits are the only view of the catalog the bridge has; discovery
//! and cataloging live behind them.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::value_objects::{
    ContractName, ImportCardinality, Instance, LazyValue, Metadata, TypeKey, downcast_instance,
};

// ============================================================================
// Export definitions and handles
// ============================================================================

/// A value a part can supply: contract name plus metadata
#[derive(Clone, Debug, PartialEq)]
pub struct ExportDefinition {
    contract_name: ContractName,
    metadata: Metadata,
}

impl ExportDefinition {
    /// Create an export definition
    pub fn new<C: Into<ContractName>>(contract_name: C, metadata: Metadata) -> Self {
        Self {
            contract_name: contract_name.into(),
            metadata,
        }
    }

    /// Contract name
    pub fn contract_name(&self) -> &ContractName {
        &self.contract_name
    }

    /// Export metadata
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}

/// Resolved export: definition plus a lazily evaluated value
///
/// The value is computed at most once, on first access. Clones share the
/// same cached value.
#[derive(Clone)]
pub struct Export {
    definition: ExportDefinition,
    value: LazyValue,
}

impl Export {
    /// Export whose value is produced by `factory` on first access
    pub fn new<F>(definition: ExportDefinition, factory: F) -> Self
    where
        F: Fn() -> Result<Instance> + Send + Sync + 'static,
    {
        Self {
            definition,
            value: LazyValue::new(factory),
        }
    }

    /// Export around an already computed value
    pub fn from_value(definition: ExportDefinition, value: Instance) -> Self {
        Self {
            definition,
            value: LazyValue::ready(value),
        }
    }

    /// Export definition
    pub fn definition(&self) -> &ExportDefinition {
        &self.definition
    }

    /// Contract name of the export
    pub fn contract_name(&self) -> &ContractName {
        self.definition.contract_name()
    }

    /// Export metadata
    pub fn metadata(&self) -> &Metadata {
        self.definition.metadata()
    }

    /// Exported value, computing it on first access
    pub fn value(&self) -> Result<Instance> {
        self.value.get()
    }

    /// Exported value as a concrete type
    pub fn value_as<T: std::any::Any + Send + Sync>(&self) -> Result<Arc<T>> {
        downcast_instance::<T>(self.value()?)
    }

    /// Whether the value has been computed
    pub fn is_value_created(&self) -> bool {
        self.value.is_created()
    }
}

impl fmt::Debug for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Export")
            .field("definition", &self.definition)
            .field("value_created", &self.is_value_created())
            .finish()
    }
}

// ============================================================================
// Import definitions
// ============================================================================

/// Import matched by contract name, type identity and metadata keys
#[derive(Clone, Debug, PartialEq)]
pub struct ContractBasedImportDefinition {
    contract_name: ContractName,
    required_type_identity: Option<String>,
    required_metadata: Vec<(String, TypeKey)>,
    cardinality: ImportCardinality,
    is_prerequisite: bool,
}

impl ContractBasedImportDefinition {
    /// Non-prerequisite import with no type identity or metadata requirements
    pub fn new<C: Into<ContractName>>(contract_name: C, cardinality: ImportCardinality) -> Self {
        Self {
            contract_name: contract_name.into(),
            required_type_identity: None,
            required_metadata: Vec::new(),
            cardinality,
            is_prerequisite: false,
        }
    }

    /// Require exports carrying this type identity
    pub fn with_required_type_identity<S: Into<String>>(mut self, type_identity: S) -> Self {
        self.required_type_identity = Some(type_identity.into());
        self
    }

    /// Require a metadata key whose value is declared as `T`
    pub fn requiring_metadata<T: 'static>(mut self, key: impl Into<String>) -> Self {
        self.required_metadata.push((key.into(), TypeKey::of::<T>()));
        self
    }

    /// Mark the import as prerequisite (satisfied before activation)
    pub fn prerequisite(mut self, is_prerequisite: bool) -> Self {
        self.is_prerequisite = is_prerequisite;
        self
    }

    /// Replace the cardinality
    pub fn with_cardinality(mut self, cardinality: ImportCardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    /// Contract name
    pub fn contract_name(&self) -> &ContractName {
        &self.contract_name
    }

    /// Required type identity, if any
    pub fn required_type_identity(&self) -> Option<&str> {
        self.required_type_identity.as_deref()
    }

    /// Required metadata keys with their declared value types
    pub fn required_metadata(&self) -> &[(String, TypeKey)] {
        &self.required_metadata
    }

    /// Cardinality
    pub fn cardinality(&self) -> ImportCardinality {
        self.cardinality
    }

    /// Whether the import is a prerequisite
    pub fn is_prerequisite(&self) -> bool {
        self.is_prerequisite
    }
}

/// Predicate over export definitions
pub type ImportConstraint = Arc<dyn Fn(&ExportDefinition) -> bool + Send + Sync>;

/// Import expressed as an arbitrary predicate over export definitions
#[derive(Clone)]
pub struct ConstraintImportDefinition {
    description: String,
    constraint: ImportConstraint,
    cardinality: ImportCardinality,
    is_prerequisite: bool,
}

impl ConstraintImportDefinition {
    /// Create a constraint-based import
    pub fn new<S, F>(description: S, cardinality: ImportCardinality, constraint: F) -> Self
    where
        S: Into<String>,
        F: Fn(&ExportDefinition) -> bool + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            constraint: Arc::new(constraint),
            cardinality,
            is_prerequisite: false,
        }
    }

    /// Mark the import as prerequisite
    pub fn prerequisite(mut self, is_prerequisite: bool) -> Self {
        self.is_prerequisite = is_prerequisite;
        self
    }

    /// Human readable description of the constraint
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Evaluate the constraint
    pub fn is_satisfied_by(&self, export: &ExportDefinition) -> bool {
        (self.constraint)(export)
    }
}

impl fmt::Debug for ConstraintImportDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintImportDefinition")
            .field("description", &self.description)
            .field("cardinality", &self.cardinality)
            .field("is_prerequisite", &self.is_prerequisite)
            .finish_non_exhaustive()
    }
}

/// A dependency a part requires
#[derive(Clone, Debug)]
pub enum ImportDefinition {
    /// Matched by contract
    Contract(ContractBasedImportDefinition),
    /// Matched by predicate (not understood by the bridge)
    Constraint(ConstraintImportDefinition),
}

impl ImportDefinition {
    /// Whether the import must be satisfied before activation
    pub fn is_prerequisite(&self) -> bool {
        match self {
            Self::Contract(import) => import.is_prerequisite,
            Self::Constraint(import) => import.is_prerequisite,
        }
    }

    /// Cardinality of the import
    pub fn cardinality(&self) -> ImportCardinality {
        match self {
            Self::Contract(import) => import.cardinality,
            Self::Constraint(import) => import.cardinality,
        }
    }

    /// Contract-based view of the import
    pub fn as_contract_based(&self) -> Option<&ContractBasedImportDefinition> {
        match self {
            Self::Contract(import) => Some(import),
            Self::Constraint(_) => None,
        }
    }

    /// Whether both definitions denote the same contract-based import
    pub fn same_as(&self, other: &ImportDefinition) -> bool {
        match (self, other) {
            (Self::Contract(left), Self::Contract(right)) => left == right,
            (Self::Constraint(left), Self::Constraint(right)) => {
                Arc::ptr_eq(&left.constraint, &right.constraint)
            }
            _ => false,
        }
    }
}

impl From<ContractBasedImportDefinition> for ImportDefinition {
    fn from(value: ContractBasedImportDefinition) -> Self {
        Self::Contract(value)
    }
}

impl From<ConstraintImportDefinition> for ImportDefinition {
    fn from(value: ConstraintImportDefinition) -> Self {
        Self::Constraint(value)
    }
}

impl fmt::Display for ImportDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contract(import) => write!(
                f,
                "import of '{}' ({:?})",
                import.contract_name, import.cardinality
            ),
            Self::Constraint(import) => write!(f, "constraint import '{}'", import.description),
        }
    }
}

// ============================================================================
// Parts
// ============================================================================

/// Describes a creatable part; immutable once cataloged
pub trait ComposablePartDefinition: Send + Sync {
    /// Exports the part declares
    fn export_definitions(&self) -> &[ExportDefinition];

    /// Imports the part requires
    fn import_definitions(&self) -> &[ImportDefinition];

    /// Part metadata (including the creation policy)
    fn metadata(&self) -> &Metadata;

    /// Create a fresh part instance
    fn create_part(&self) -> Result<Box<dyn ComposablePart>>;

    /// Name used in diagnostics
    fn display_name(&self) -> String {
        let contracts: Vec<&str> = self
            .export_definitions()
            .iter()
            .map(|export| export.contract_name().as_str())
            .collect();
        format!("part exporting [{}]", contracts.join(", "))
    }
}

/// A live part instance whose imports are being wired
///
/// Methods take `&self` and may be re-entered while another call on the
/// same part is still running (an import setter can resolve a part that
/// reads this part's exports). Implementations must not hold a lock while
/// calling into user code.
pub trait ComposablePart: Send + Sync {
    /// Imports of this part
    fn import_definitions(&self) -> &[ImportDefinition];

    /// Value for one of this part's exports
    fn get_exported_value(&self, definition: &ExportDefinition) -> Result<Instance>;

    /// Assign the exports matched for an import
    fn set_import(&self, definition: &ImportDefinition, exports: Vec<Export>) -> Result<()>;

    /// Every import has been assigned
    fn activate(&self) -> Result<()>;
}

/// An already materialized collection of part definitions
pub trait ComposablePartCatalog: Send + Sync {
    /// Every part definition of the catalog
    fn parts(&self) -> Vec<Arc<dyn ComposablePartDefinition>>;
}

impl ComposablePartCatalog for Vec<Arc<dyn ComposablePartDefinition>> {
    fn parts(&self) -> Vec<Arc<dyn ComposablePartDefinition>> {
        self.clone()
    }
}

/// Fail when an export definition cannot be registered
pub fn validate_export_definition(definition: &ExportDefinition) -> Result<()> {
    if definition.contract_name().is_empty() {
        return Err(Error::invalid_argument(
            "export definition has an empty contract name",
        ));
    }
    Ok(())
}
