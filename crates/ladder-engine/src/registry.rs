use std::collections::HashMap;
use std::rc::Rc;

use ladder_core::{
    CleanHook, LoadError, MigrationId, MigrationSource, MigrationUnit, SourceError, UnitError,
    UnitFactory, UnitMap,
};

type SharedFactory<C> = Rc<dyn Fn() -> Result<Box<dyn MigrationUnit<C>>, UnitError>>;
type SharedClean<C> = Rc<dyn Fn(&mut C) -> Result<(), UnitError>>;

/// Migrations registered in code.
///
/// `migration` adds an id to both the manifest and the unit set. `with_manifest`
/// and `unit` feed the two sides separately, which is how a mismatch between
/// them can be expressed. Registering the same unit id twice is reported by
/// [`MigrationSource::units`].
pub struct Registry<C> {
    manifest: Vec<MigrationId>,
    units: Vec<(MigrationId, SharedFactory<C>)>,
    clean: Option<SharedClean<C>>,
}

impl<C> Default for Registry<C> {
    fn default() -> Self {
        Self {
            manifest: Vec::new(),
            units: Vec::new(),
            clean: None,
        }
    }
}

impl<C: 'static> Registry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a unit and append its id to the manifest.
    pub fn migration<U, F>(mut self, id: MigrationId, factory: F) -> Self
    where
        U: MigrationUnit<C> + 'static,
        F: Fn() -> U + 'static,
    {
        self.manifest.push(id.clone());
        self.unit(id, factory)
    }

    /// Replace the manifest without touching the unit set.
    pub fn with_manifest(mut self, ids: impl IntoIterator<Item = MigrationId>) -> Self {
        self.manifest = ids.into_iter().collect();
        self
    }

    /// Register a unit without manifesting it.
    pub fn unit<U, F>(mut self, id: MigrationId, factory: F) -> Self
    where
        U: MigrationUnit<C> + 'static,
        F: Fn() -> U + 'static,
    {
        let shared: SharedFactory<C> =
            Rc::new(move || Ok(Box::new(factory()) as Box<dyn MigrationUnit<C>>));
        self.units.push((id, shared));
        self
    }

    /// Register a unit whose construction can fail.
    pub fn fallible_unit<F>(mut self, id: MigrationId, factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn MigrationUnit<C>>, UnitError> + 'static,
    {
        let shared: SharedFactory<C> = Rc::new(factory);
        self.units.push((id, shared));
        self
    }

    /// Default clean hook, used when no delegate supplies one.
    pub fn clean<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut C) -> Result<(), UnitError> + 'static,
    {
        self.clean = Some(Rc::new(hook));
        self
    }
}

impl<C: 'static> MigrationSource<C> for Registry<C> {
    fn manifest(&self) -> Result<Vec<MigrationId>, SourceError> {
        Ok(self.manifest.clone())
    }

    fn units(&self) -> Result<UnitMap<C>, SourceError> {
        let mut map: UnitMap<C> = HashMap::with_capacity(self.units.len());
        for (id, factory) in &self.units {
            let factory = Rc::clone(factory);
            let unit_id = id.clone();
            let previous = map.insert(
                id.clone(),
                Box::new(move || factory().map_err(|e| LoadError::new(unit_id.clone(), e)))
                    as UnitFactory<C>,
            );
            if previous.is_some() {
                return Err(SourceError::invalid(
                    format!("migration {id}"),
                    "registered more than once",
                ));
            }
        }
        Ok(map)
    }

    fn clean_hook(&self) -> Option<CleanHook<C>> {
        let hook = Rc::clone(self.clean.as_ref()?);
        Some(Box::new(move |ctx: &mut C| hook(ctx)))
    }
}
