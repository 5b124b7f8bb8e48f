//! Descriptor builders for typed parts

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use partwire_domain::constants::{
    EXPORT_TYPE_IDENTITY_METADATA_KEY, PART_CREATION_POLICY_METADATA_KEY,
};
use partwire_domain::{
    ContractBasedImportDefinition, ContractName, CreationPolicy, Error, Export, ExportDefinition,
    ImportCardinality, Instance, Metadata, MetadataValue, Result, type_identity,
};

pub(crate) type ExportAccessor<T> = Arc<dyn Fn(&Arc<T>) -> Instance + Send + Sync>;
pub(crate) type ImportSetter<T> = Arc<dyn Fn(&T, &[Export]) -> Result<()> + Send + Sync>;
pub(crate) type ActivationCallback<T> = Arc<dyn Fn(&T) -> Result<()> + Send + Sync>;

/// One export of a typed part
pub struct ExportSpec<T> {
    contract_name: ContractName,
    type_identity: String,
    metadata: Metadata,
    pub(crate) accessor: ExportAccessor<T>,
}

impl<T: Send + Sync + 'static> ExportSpec<T> {
    /// Export the part object itself under its type contract
    pub fn this() -> Self {
        Self {
            contract_name: ContractName::of::<T>(),
            type_identity: type_identity::<T>(),
            metadata: Metadata::new(),
            accessor: Arc::new(|object: &Arc<T>| {
                let value: Instance = object.clone();
                value
            }),
        }
    }

    /// Export a value derived from the part object under the type contract of `C`
    ///
    /// Trait exports use the shared pointer as `C`, e.g. `Arc<dyn Greeter>`.
    pub fn of<C, F>(convert: F) -> Self
    where
        C: Any + Send + Sync,
        F: Fn(&Arc<T>) -> C + Send + Sync + 'static,
    {
        Self {
            contract_name: ContractName::of::<C>(),
            type_identity: type_identity::<C>(),
            metadata: Metadata::new(),
            accessor: Arc::new(move |object: &Arc<T>| {
                let value: Instance = Arc::new(convert(object));
                value
            }),
        }
    }

    /// Publish under a custom contract name instead of the type contract
    pub fn named<C: Into<ContractName>>(mut self, contract_name: C) -> Self {
        self.contract_name = contract_name.into();
        self
    }

    /// Attach a metadata entry
    pub fn with_metadata<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<MetadataValue>,
    {
        self.metadata.insert(key, value);
        self
    }

    pub(crate) fn definition(&self) -> ExportDefinition {
        let mut metadata = self.metadata.clone();
        metadata.insert(EXPORT_TYPE_IDENTITY_METADATA_KEY, self.type_identity.clone());
        ExportDefinition::new(&self.contract_name, metadata)
    }
}

/// One import of a typed part
pub struct ImportSpec<T> {
    pub(crate) name: String,
    pub(crate) definition: ContractBasedImportDefinition,
    pub(crate) setter: Option<ImportSetter<T>>,
}

impl<T: Send + Sync + 'static> ImportSpec<T> {
    /// Exactly-one prerequisite import of a `C` under its type contract
    pub fn of<C: ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self::named::<C, _>(name, ContractName::of::<C>())
    }

    /// Exactly-one prerequisite import of a `C` published under `contract_name`
    pub fn named<C, N>(name: impl Into<String>, contract_name: N) -> Self
    where
        C: ?Sized + 'static,
        N: Into<ContractName>,
    {
        Self::anonymous(name, contract_name).requiring_type_identity(type_identity::<C>())
    }

    /// Exactly-one prerequisite import of an export with no type identity
    pub fn anonymous<N: Into<ContractName>>(name: impl Into<String>, contract_name: N) -> Self {
        Self {
            name: name.into(),
            definition: ContractBasedImportDefinition::new(
                contract_name,
                ImportCardinality::ExactlyOne,
            )
            .prerequisite(true),
            setter: None,
        }
    }

    /// Accept any number of matching exports
    pub fn zero_or_more(self) -> Self {
        self.with_cardinality(ImportCardinality::ZeroOrMore)
    }

    /// Accept a missing export
    pub fn zero_or_one(self) -> Self {
        self.with_cardinality(ImportCardinality::ZeroOrOne)
    }

    /// Set the cardinality
    pub fn with_cardinality(mut self, cardinality: ImportCardinality) -> Self {
        self.definition = self.definition.with_cardinality(cardinality);
        self
    }

    /// Only match exports whose metadata holds `key` with a value of type `V`
    pub fn requiring_metadata<V: 'static>(mut self, key: impl Into<String>) -> Self {
        self.definition = self.definition.requiring_metadata::<V>(key);
        self
    }

    /// Deliver the import after construction instead of before
    pub fn after_construction<F>(mut self, setter: F) -> Self
    where
        F: Fn(&T, &[Export]) -> Result<()> + Send + Sync + 'static,
    {
        self.definition = self.definition.prerequisite(false);
        self.setter = Some(Arc::new(setter));
        self
    }

    fn requiring_type_identity(mut self, identity: String) -> Self {
        self.definition = self.definition.with_required_type_identity(identity);
        self
    }
}

/// Declared exports, imports and metadata of a typed part
pub struct PartDescriptor<T> {
    pub(crate) exports: Vec<ExportSpec<T>>,
    pub(crate) imports: Vec<ImportSpec<T>>,
    pub(crate) metadata: Metadata,
    pub(crate) on_imports_satisfied: Option<ActivationCallback<T>>,
}

impl<T: Send + Sync + 'static> PartDescriptor<T> {
    pub(crate) fn new() -> Self {
        Self {
            exports: Vec::new(),
            imports: Vec::new(),
            metadata: Metadata::new(),
            on_imports_satisfied: None,
        }
    }

    /// Declare an export
    pub fn export(mut self, export: ExportSpec<T>) -> Self {
        self.exports.push(export);
        self
    }

    /// Declare an import
    pub fn import(mut self, import: ImportSpec<T>) -> Self {
        self.imports.push(import);
        self
    }

    /// Set the creation policy
    pub fn creation_policy(self, policy: CreationPolicy) -> Self {
        self.with_metadata(PART_CREATION_POLICY_METADATA_KEY, policy)
    }

    /// Attach a part metadata entry
    pub fn with_metadata<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<MetadataValue>,
    {
        self.metadata.insert(key, value);
        self
    }

    /// Run `callback` once every import has been assigned
    pub fn on_imports_satisfied<F>(mut self, callback: F) -> Self
    where
        F: Fn(&T) -> Result<()> + Send + Sync + 'static,
    {
        self.on_imports_satisfied = Some(Arc::new(callback));
        self
    }
}

/// Import values assigned to a typed part, by import name
#[derive(Clone, Debug, Default)]
pub struct ImportedValues {
    values: Vec<(String, Vec<Export>)>,
}

impl ImportedValues {
    /// Exports assigned to the import called `name`
    pub fn exports(&self, name: &str) -> &[Export] {
        self.values
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, exports)| exports.as_slice())
            .unwrap_or_default()
    }

    /// Whether the import called `name` has been assigned
    pub fn contains(&self, name: &str) -> bool {
        self.values.iter().any(|(existing, _)| existing == name)
    }

    /// First value of the import called `name`
    pub fn one<C: Any + Send + Sync>(&self, name: &str) -> Result<Arc<C>> {
        self.optional::<C>(name)?.ok_or_else(|| {
            Error::invalid_part_state(format!(
                "import '{name}' of type {} has no value",
                type_name::<C>()
            ))
        })
    }

    /// First value of the import called `name`, if any
    pub fn optional<C: Any + Send + Sync>(&self, name: &str) -> Result<Option<Arc<C>>> {
        self.exports(name)
            .first()
            .map(Export::value_as::<C>)
            .transpose()
    }

    /// Every value of the import called `name`, in assignment order
    pub fn many<C: Any + Send + Sync>(&self, name: &str) -> Result<Vec<Arc<C>>> {
        self.exports(name).iter().map(Export::value_as::<C>).collect()
    }

    pub(crate) fn set(&mut self, name: &str, exports: Vec<Export>) {
        match self.values.iter_mut().find(|(existing, _)| existing == name) {
            Some(entry) => entry.1 = exports,
            None => self.values.push((name.to_string(), exports)),
        }
    }
}

impl<T> fmt::Debug for ExportSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportSpec")
            .field("contract_name", &self.contract_name)
            .field("type_identity", &self.type_identity)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Debug for ImportSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportSpec")
            .field("name", &self.name)
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}
