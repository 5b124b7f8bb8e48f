//! Parts shared by the bridge tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use partwire_application::{
    ComposablePartType, ExportSpec, ImportSpec, ImportedValues, PartDescriptor, PartType,
    register_catalog,
};
use partwire_domain::{ComposablePartCatalog, CreationPolicy, Export, Result};
use partwire_providers::{Container, ContainerBuilder, TypeCatalog};

/// Shared part exporting itself
pub struct Clock {
    pub ticks: u64,
}

impl PartType for Clock {
    fn describe(part: PartDescriptor<Self>) -> PartDescriptor<Self> {
        part.export(ExportSpec::this())
    }

    fn construct(_imports: &ImportedValues) -> Result<Self> {
        Ok(Self { ticks: 42 })
    }
}

/// Non-shared part exporting itself
pub struct Ticket {
    pub serial: usize,
}

static NEXT_TICKET: AtomicUsize = AtomicUsize::new(1);

impl PartType for Ticket {
    fn describe(part: PartDescriptor<Self>) -> PartDescriptor<Self> {
        part.export(ExportSpec::this())
            .creation_policy(CreationPolicy::NonShared)
    }

    fn construct(_imports: &ImportedValues) -> Result<Self> {
        Ok(Self {
            serial: NEXT_TICKET.fetch_add(1, Ordering::SeqCst),
        })
    }
}

pub trait Greeter: Send + Sync {
    fn greet(&self) -> String;
}

pub type SharedGreeter = Arc<dyn Greeter>;

/// Greeter with a prerequisite clock import
pub struct EnglishGreeter {
    pub clock: Arc<Clock>,
}

impl Greeter for EnglishGreeter {
    fn greet(&self) -> String {
        format!("hello at {}", self.clock.ticks)
    }
}

impl PartType for EnglishGreeter {
    fn describe(part: PartDescriptor<Self>) -> PartDescriptor<Self> {
        part.export(
            ExportSpec::of::<SharedGreeter, _>(|greeter: &Arc<Self>| {
                Arc::clone(greeter) as SharedGreeter
            })
            .with_metadata("Language", "en"),
        )
        .import(ImportSpec::of::<Clock>("clock"))
    }

    fn construct(imports: &ImportedValues) -> Result<Self> {
        Ok(Self {
            clock: imports.one::<Clock>("clock")?,
        })
    }
}

/// Greeter without imports
pub struct FrenchGreeter;

impl Greeter for FrenchGreeter {
    fn greet(&self) -> String {
        "bonjour".to_string()
    }
}

impl PartType for FrenchGreeter {
    fn describe(part: PartDescriptor<Self>) -> PartDescriptor<Self> {
        part.export(
            ExportSpec::of::<SharedGreeter, _>(|greeter: &Arc<Self>| {
                Arc::clone(greeter) as SharedGreeter
            })
            .with_metadata("Language", "fr"),
        )
    }

    fn construct(_imports: &ImportedValues) -> Result<Self> {
        Ok(Self)
    }
}

/// Collects every greeter after construction
pub struct Roster {
    pub clock: Arc<Clock>,
    pub saw_greeters_at_construction: bool,
    pub greeters: OnceLock<Vec<Arc<SharedGreeter>>>,
    pub satisfied: AtomicBool,
}

impl PartType for Roster {
    fn describe(part: PartDescriptor<Self>) -> PartDescriptor<Self> {
        part.export(ExportSpec::this())
            .import(ImportSpec::of::<Clock>("clock"))
            .import(
                ImportSpec::of::<SharedGreeter>("greeters")
                    .zero_or_more()
                    .after_construction(|roster: &Roster, exports: &[Export]| {
                        let greeters = exports
                            .iter()
                            .map(Export::value_as::<SharedGreeter>)
                            .collect::<Result<Vec<_>>>()?;
                        let _ = roster.greeters.set(greeters);
                        Ok(())
                    }),
            )
            .on_imports_satisfied(|roster: &Roster| {
                roster.satisfied.store(true, Ordering::SeqCst);
                Ok(())
            })
    }

    fn construct(imports: &ImportedValues) -> Result<Self> {
        Ok(Self {
            clock: imports.one::<Clock>("clock")?,
            saw_greeters_at_construction: imports.contains("greeters"),
            greeters: OnceLock::new(),
            satisfied: AtomicBool::new(false),
        })
    }
}

impl Roster {
    pub fn greetings(&self) -> Vec<String> {
        self.greeters
            .get()
            .map(|greeters| greeters.iter().map(|greeter| greeter.greet()).collect())
            .unwrap_or_default()
    }
}

/// Catalog with the given part types, in order
pub fn catalog_of(parts: &[fn() -> Arc<dyn partwire_domain::ComposablePartDefinition>]) -> TypeCatalog {
    parts.iter().map(|definition| definition()).collect()
}

pub fn definition<T: ComposablePartType>() -> Arc<dyn partwire_domain::ComposablePartDefinition> {
    T::part_definition()
}

/// Container holding every part of `catalog`
pub fn container_for(catalog: impl ComposablePartCatalog + 'static) -> Container {
    let mut builder = ContainerBuilder::new();
    register_catalog(&mut builder, Arc::new(catalog)).expect("register catalog");
    builder.build()
}
