//! Catalog port implementations for typed parts

use std::any::type_name;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use once_cell::sync::OnceCell;
use partwire_domain::{
    ComposablePart, ComposablePartDefinition, Error, Export, ExportDefinition, ImportDefinition,
    Instance, Metadata, Result,
};

use super::PartType;
use super::descriptor::{ImportedValues, PartDescriptor};

/// Part definition built from a [`PartType`]
pub struct TypedPartDefinition<T: PartType> {
    descriptor: Arc<PartDescriptor<T>>,
    exports: Vec<ExportDefinition>,
    imports: Vec<ImportDefinition>,
}

impl<T: PartType> TypedPartDefinition<T> {
    /// Describe `T`
    pub fn new() -> Self {
        let descriptor = T::describe(PartDescriptor::new());
        let exports = descriptor.exports.iter().map(|export| export.definition()).collect();
        let imports = descriptor
            .imports
            .iter()
            .map(|import| ImportDefinition::from(import.definition.clone()))
            .collect();
        Self {
            descriptor: Arc::new(descriptor),
            exports,
            imports,
        }
    }
}

impl<T: PartType> Default for TypedPartDefinition<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartType> ComposablePartDefinition for TypedPartDefinition<T> {
    fn export_definitions(&self) -> &[ExportDefinition] {
        &self.exports
    }

    fn import_definitions(&self) -> &[ImportDefinition] {
        &self.imports
    }

    fn metadata(&self) -> &Metadata {
        &self.descriptor.metadata
    }

    fn create_part(&self) -> Result<Box<dyn ComposablePart>> {
        Ok(Box::new(TypedPart {
            descriptor: Arc::clone(&self.descriptor),
            exports: self.exports.clone(),
            imports: self.imports.clone(),
            values: Mutex::new(ImportedValues::default()),
            object: OnceCell::new(),
            _type: PhantomData,
        }))
    }

    fn display_name(&self) -> String {
        type_name::<T>().to_string()
    }
}

/// Live instance of a typed part
///
/// The object is constructed on first need once every prerequisite import
/// has been assigned; prerequisite imports arriving later are rejected.
/// Construction, import setters and the activation callback run without
/// any lock held, so they may resolve parts that read this part's exports.
pub struct TypedPart<T: PartType> {
    descriptor: Arc<PartDescriptor<T>>,
    exports: Vec<ExportDefinition>,
    imports: Vec<ImportDefinition>,
    values: Mutex<ImportedValues>,
    object: OnceCell<Arc<T>>,
    _type: PhantomData<fn() -> T>,
}

impl<T: PartType> TypedPart<T> {
    /// The constructed object, if construction already happened
    pub fn object(&self) -> Option<&Arc<T>> {
        self.object.get()
    }

    fn values(&self) -> MutexGuard<'_, ImportedValues> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn constructed(&self) -> Result<Arc<T>> {
        if let Some(object) = self.object.get() {
            return Ok(Arc::clone(object));
        }
        let values = self.values().clone();
        let missing = self
            .descriptor
            .imports
            .iter()
            .find(|import| import.definition.is_prerequisite() && !values.contains(&import.name));
        if let Some(import) = missing {
            return Err(Error::invalid_part_state(format!(
                "{} constructed before prerequisite import '{}' was assigned",
                type_name::<T>(),
                import.name
            )));
        }
        let object = Arc::new(T::construct(&values)?);
        // A concurrent construction may have won; keep the first object
        let _ = self.object.set(object);
        self.object
            .get()
            .map(Arc::clone)
            .ok_or_else(|| Error::internal(format!("{} lost its object", type_name::<T>())))
    }
}

impl<T: PartType> ComposablePart for TypedPart<T> {
    fn import_definitions(&self) -> &[ImportDefinition] {
        &self.imports
    }

    fn get_exported_value(&self, definition: &ExportDefinition) -> Result<Instance> {
        let index = self
            .exports
            .iter()
            .position(|export| export == definition)
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "{} does not export '{}'",
                    type_name::<T>(),
                    definition.contract_name()
                ))
            })?;
        let object = self.constructed()?;
        Ok((self.descriptor.exports[index].accessor)(&object))
    }

    fn set_import(&self, definition: &ImportDefinition, exports: Vec<Export>) -> Result<()> {
        let index = self
            .imports
            .iter()
            .position(|import| import.same_as(definition))
            .ok_or_else(|| {
                Error::invalid_argument(format!("{} does not declare {definition}", type_name::<T>()))
            })?;
        let spec = &self.descriptor.imports[index];

        if spec.definition.is_prerequisite() {
            if self.object.get().is_some() {
                return Err(Error::invalid_part_state(format!(
                    "prerequisite import '{}' of {} assigned after construction",
                    spec.name,
                    type_name::<T>()
                )));
            }
            self.values().set(&spec.name, exports);
            return Ok(());
        }

        let object = self.constructed()?;
        if let Some(setter) = &spec.setter {
            setter(&object, &exports)?;
        }
        self.values().set(&spec.name, exports);
        Ok(())
    }

    fn activate(&self) -> Result<()> {
        let object = self.constructed()?;
        match &self.descriptor.on_imports_satisfied {
            Some(callback) => callback(&object),
            None => Ok(()),
        }
    }
}
