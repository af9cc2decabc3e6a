use ladder_core::{
    AuditEntry, CleanHook, Delegate, Direction, MemoryVersionStore, MigrationId, MigrationSource,
    Target, UnitMap, Version, VersionStore,
};
use tracing::{debug, info, warn};

use crate::audit::AuditTrail;
use crate::catalog::Catalog;
use crate::error::EngineError;
use crate::executor::{StepExecutor, StepOutcome};
use crate::outcome::{HaltReason, Outcome};
use crate::registry::Registry;
use crate::resolve;

/// A catalog entry as reported by [`Engine::list_migrations`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationInfo {
    pub id: MigrationId,
    pub description: Option<String>,
}

/// Collects the pieces of an [`Engine`]. Anything a delegate provides overrides
/// what was set here.
pub struct EngineBuilder<C> {
    ctx: C,
    store: Option<Box<dyn VersionStore<C>>>,
    source: Option<Box<dyn MigrationSource<C>>>,
    delegate: Option<Box<dyn Delegate<C>>>,
}

impl<C: 'static> EngineBuilder<C> {
    pub fn version_store(mut self, store: impl VersionStore<C> + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    pub fn source(mut self, source: impl MigrationSource<C> + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn delegate(mut self, delegate: impl Delegate<C> + 'static) -> Self {
        self.delegate = Some(Box::new(delegate));
        self
    }

    /// Validate the catalog and assemble the engine.
    ///
    /// The version store is not touched unless the catalog is valid.
    pub fn build(self) -> Result<Engine<C>, EngineError> {
        let Self {
            mut ctx,
            store,
            source,
            mut delegate,
        } = self;

        let (delegate_store, delegate_source) = match delegate.as_mut() {
            Some(d) => (d.version_store(), d.source()),
            None => (None, None),
        };
        let mut store = delegate_store
            .or(store)
            .unwrap_or_else(|| Box::new(MemoryVersionStore::new()) as Box<dyn VersionStore<C>>);
        let source = delegate_source
            .or(source)
            .unwrap_or_else(|| Box::new(Registry::<C>::new()) as Box<dyn MigrationSource<C>>);

        let manifest = source.manifest()?;
        let units = source.units()?;
        let catalog = Catalog::build(manifest, units.keys())?;
        let default_clean = source.clean_hook();

        debug!("Using version store: {}", store.name());
        debug!(
            "Found {} migrations: [{}]",
            catalog.count(),
            catalog
                .iter()
                .map(MigrationId::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        );

        if !catalog.is_empty() && store.version(&mut ctx)?.is_zero() {
            warn!(
                "At least one migration is defined but the target is marked as version zero. \
                 This is expected on a fresh target; on an existing install the first \
                 migration will likely fail, so set the version manually if needed."
            );
        }

        Ok(Engine {
            ctx,
            catalog,
            units,
            store,
            delegate,
            default_clean,
            audit: AuditTrail::new(),
        })
    }
}

/// Moves a target system between versions of a fixed catalog.
///
/// `C` is the context handed to every unit, store and hook, typically the
/// database connection.
pub struct Engine<C> {
    ctx: C,
    catalog: Catalog,
    units: UnitMap<C>,
    store: Box<dyn VersionStore<C>>,
    delegate: Option<Box<dyn Delegate<C>>>,
    default_clean: Option<CleanHook<C>>,
    audit: AuditTrail,
}

impl<C: 'static> Engine<C> {
    pub fn builder(ctx: C) -> EngineBuilder<C> {
        EngineBuilder {
            ctx,
            store: None,
            source: None,
            delegate: None,
        }
    }

    pub fn context(&self) -> &C {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.ctx
    }

    pub fn into_context(self) -> C {
        self.ctx
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn audit_trail(&self) -> &[AuditEntry] {
        self.audit.entries()
    }

    pub fn latest_version(&self) -> Option<&MigrationId> {
        self.catalog.last_id()
    }

    pub fn version(&mut self) -> Result<Version, EngineError> {
        Ok(self.store.version(&mut self.ctx)?)
    }

    /// Write the version directly, without running anything.
    pub fn set_version(&mut self, version: &Version) -> Result<(), EngineError> {
        if let Version::At(id) = version {
            if !self.catalog.contains(id) {
                warn!("Setting version to {id}, which is not a known migration");
            }
        }
        self.store.set_version(&mut self.ctx, version)?;
        Ok(())
    }

    /// Every catalog entry in order with its description.
    pub fn list_migrations(&self) -> Result<Vec<MigrationInfo>, EngineError> {
        let mut infos = Vec::with_capacity(self.catalog.count());
        for id in &self.catalog {
            let factory = self
                .units
                .get(id)
                .ok_or_else(|| EngineError::UnknownVersion(id.to_string()))?;
            let unit = factory()?;
            infos.push(MigrationInfo {
                id: id.clone(),
                description: unit.description(),
            });
        }
        Ok(infos)
    }

    pub fn run_upgrade(&mut self, id: &MigrationId) -> Result<StepOutcome, EngineError> {
        self.run_migration(id, Direction::Up)
    }

    pub fn run_downgrade(&mut self, id: &MigrationId) -> Result<StepOutcome, EngineError> {
        self.run_migration(id, Direction::Down)
    }

    /// Run one migration once, regardless of the current version.
    pub fn run_migration(
        &mut self,
        id: &MigrationId,
        direction: Direction,
    ) -> Result<StepOutcome, EngineError> {
        self.catalog.index_of(id)?;
        self.executor().execute(id, direction)
    }

    /// Walk from the current version to `target`, one step at a time.
    ///
    /// Unknown versions fail before anything runs. A failing step stops the
    /// walk; every step committed before it stays committed.
    pub fn migrate_to_version(&mut self, target: impl Into<Target>) -> Result<Outcome, EngineError> {
        let target = target.into();
        let current = self.store.version(&mut self.ctx)?;

        let resolved = match resolve::resolve_target(&self.catalog, &current, &target)? {
            Some(version) => version,
            None => {
                if self.catalog.is_empty() {
                    info!("No migrations available.");
                }
                info!("Already at version {current}.");
                return Ok(Outcome::AlreadyAt(current));
            }
        };
        if !matches!(target, Target::Version(_) | Target::Zero) {
            debug!("Resolved {target} to {resolved}");
        }

        if resolved == current {
            info!("Already at version {current}.");
            return Ok(Outcome::AlreadyAt(current));
        }

        resolve::validate(&self.catalog, &resolved)?;
        resolve::validate(&self.catalog, &current)?;
        let direction = resolve::direction_between(&self.catalog, &current, &resolved)?;
        let action = direction.action_name();
        info!("{action} from version {current} to {resolved}.");

        let mark = self.audit.len();
        let mut position = current;
        let mut failure = None;
        while position != resolved {
            let step = match direction {
                Direction::Up => resolve::next_up(&self.catalog, &position)?,
                Direction::Down => position.as_id().cloned(),
            };
            let Some(step) = step else {
                break;
            };

            match self.executor().execute(&step, direction)? {
                StepOutcome::Committed(version) => {
                    position = version;
                    debug!("Current version now {position}");
                }
                StepOutcome::Failed(step_failure) => {
                    failure = Some(step_failure);
                    break;
                }
            }
        }

        let steps = self.audit.since(mark).to_vec();
        let persisted = self.store.version(&mut self.ctx)?;
        if persisted == resolved {
            info!("{resolved} {action} succeeded.");
            return Ok(Outcome::Reached {
                version: persisted,
                steps,
            });
        }

        warn!("{resolved} {action} failed. Rolled back to {persisted}.");
        let reason = match failure {
            Some(step_failure) => HaltReason::StepFailed(step_failure),
            None => HaltReason::BoundaryReached,
        };
        Ok(Outcome::Halted {
            version: persisted,
            target: resolved,
            steps,
            reason,
        })
    }

    /// Reset the version to zero and run the clean hook.
    ///
    /// The delegate's hook wins; the source's default hook runs only when the
    /// delegate has none. No migration runs and the audit trail is untouched.
    pub fn clean(&mut self) -> Result<(), EngineError> {
        info!("Cleaning...");
        self.store.set_version(&mut self.ctx, &Version::Zero)?;

        let delegated = match self.delegate.as_mut() {
            Some(delegate) => delegate.clean(&mut self.ctx),
            None => None,
        };
        match delegated {
            Some(result) => result.map_err(EngineError::Clean),
            None => match self.default_clean.as_mut() {
                Some(hook) => hook(&mut self.ctx).map_err(EngineError::Clean),
                None => Ok(()),
            },
        }
    }

    fn executor(&mut self) -> StepExecutor<'_, C> {
        StepExecutor {
            catalog: &self.catalog,
            units: &self.units,
            store: &mut self.store,
            audit: &mut self.audit,
            ctx: &mut self.ctx,
        }
    }
}
