//! Part instance state machine
//!
//! A part instance has its imports assigned in two passes and is then
//! activated. Stages only move forward:
//!
//! ```text
//! Created --(prerequisites assigned)--> PrerequisitesAssigned --(activate)--> Activated
//! ```
//!
//! Prerequisite imports may only be assigned while `Created`; the remaining
//! imports only while `PrerequisitesAssigned`. Once `Activated` the import
//! wiring is frozen. Out-of-order transitions fail with `InvalidPartState`
//! instead of relying on the registry to call the hooks in the right order.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use partwire_domain::{
    ComposablePart, Error, Export, ExportDefinition, ImportDefinition, Instance, Result,
    downcast_instance,
};

/// Import wiring stage of a part instance
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PartStage {
    /// Created, no imports assigned yet
    Created,
    /// Prerequisite imports assigned
    PrerequisitesAssigned,
    /// Every import assigned and the part notified
    Activated,
}

/// A catalog part instance owned by a registry registration
///
/// The stage is guarded by a lock that is never held while the part runs,
/// so a part may be re-entered by resolutions its own import setters start.
pub struct PartInstance {
    name: String,
    imports: Vec<ImportDefinition>,
    part: Box<dyn ComposablePart>,
    stage: Mutex<PartStage>,
}

impl PartInstance {
    /// Wrap a freshly created part
    pub fn new<S: Into<String>>(name: S, part: Box<dyn ComposablePart>) -> Self {
        let imports = part.import_definitions().to_vec();
        Self {
            name: name.into(),
            imports,
            part,
            stage: Mutex::new(PartStage::Created),
        }
    }

    /// Recover a part instance from a resolved registry value
    pub fn from_instance(instance: &Instance) -> Result<Arc<Self>> {
        downcast_instance::<Self>(Arc::clone(instance))
    }

    /// Name used in diagnostics
    pub fn display_name(&self) -> &str {
        &self.name
    }

    /// Current stage
    pub fn stage(&self) -> PartStage {
        *self.lock()
    }

    /// Imports declared by the part
    pub fn import_definitions(&self) -> &[ImportDefinition] {
        &self.imports
    }

    /// Assign the exports matched for one import
    pub fn assign_import(&self, import: &ImportDefinition, exports: Vec<Export>) -> Result<()> {
        let expected = if import.is_prerequisite() {
            PartStage::Created
        } else {
            PartStage::PrerequisitesAssigned
        };
        let stage = self.stage();
        if stage != expected {
            return Err(Error::invalid_part_state(format!(
                "cannot assign {import} on {} in stage {stage:?}",
                self.name
            )));
        }
        self.part.set_import(import, exports)
    }

    /// Record that every prerequisite import has been assigned
    pub fn complete_prerequisites(&self) -> Result<()> {
        self.advance(PartStage::Created, PartStage::PrerequisitesAssigned)
    }

    /// Notify the part that every import has been assigned
    ///
    /// The stage moves first so a re-entrant activation is rejected.
    pub fn activate(&self) -> Result<()> {
        self.advance(PartStage::PrerequisitesAssigned, PartStage::Activated)?;
        self.part.activate()
    }

    /// Value of one of the part's exports
    ///
    /// Available once the prerequisite imports are assigned.
    pub fn exported_value(&self, export: &ExportDefinition) -> Result<Instance> {
        if self.stage() == PartStage::Created {
            return Err(Error::invalid_part_state(format!(
                "export '{}' of {} requested before its prerequisite imports were assigned",
                export.contract_name(),
                self.name
            )));
        }
        self.part.get_exported_value(export)
    }

    fn advance(&self, from: PartStage, to: PartStage) -> Result<()> {
        let mut stage = self.lock();
        if *stage != from {
            return Err(self.out_of_order(*stage, to));
        }
        *stage = to;
        Ok(())
    }

    fn out_of_order(&self, current: PartStage, target: PartStage) -> Error {
        Error::invalid_part_state(format!(
            "{} cannot move from {current:?} to {target:?}",
            self.name
        ))
    }

    fn lock(&self) -> MutexGuard<'_, PartStage> {
        self.stage.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for PartInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartInstance")
            .field("name", &self.name)
            .field("stage", &self.stage())
            .finish_non_exhaustive()
    }
}
