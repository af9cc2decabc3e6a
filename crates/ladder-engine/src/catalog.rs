use std::collections::{HashMap, HashSet};

use ladder_core::MigrationId;

use crate::error::EngineError;

/// The validated, ordered list of migration ids for one engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    ids: Vec<MigrationId>,
    positions: HashMap<MigrationId, usize>,
}

impl Catalog {
    /// Build a catalog from the ordering manifest and the ids that actually have
    /// units. Membership must match exactly; the manifest decides the order.
    pub fn build<'a, I>(manifest: Vec<MigrationId>, discovered: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = &'a MigrationId>,
    {
        let mut positions = HashMap::with_capacity(manifest.len());
        for (index, id) in manifest.iter().enumerate() {
            if positions.insert(id.clone(), index).is_some() {
                return Err(EngineError::DuplicateManifestEntry(id.clone()));
            }
        }

        let discovered: HashSet<&MigrationId> = discovered.into_iter().collect();

        let mut manifested_without_unit: Vec<MigrationId> = manifest
            .iter()
            .filter(|id| !discovered.contains(id))
            .cloned()
            .collect();
        let mut unit_without_manifest: Vec<MigrationId> = discovered
            .iter()
            .filter(|id| !positions.contains_key(**id))
            .map(|id| (*id).clone())
            .collect();

        if !manifested_without_unit.is_empty() || !unit_without_manifest.is_empty() {
            manifested_without_unit.sort_by(|a, b| a.as_str().cmp(b.as_str()));
            unit_without_manifest.sort_by(|a, b| a.as_str().cmp(b.as_str()));
            return Err(EngineError::ManifestMismatch {
                manifested: manifest.len(),
                discovered: discovered.len(),
                manifested_without_unit,
                unit_without_manifest,
            });
        }

        Ok(Self {
            ids: manifest,
            positions,
        })
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn id_at(&self, index: usize) -> Option<&MigrationId> {
        self.ids.get(index)
    }

    pub fn index_of(&self, id: &MigrationId) -> Result<usize, EngineError> {
        self.positions
            .get(id)
            .copied()
            .ok_or_else(|| EngineError::UnknownVersion(id.to_string()))
    }

    pub fn contains(&self, id: &MigrationId) -> bool {
        self.positions.contains_key(id)
    }

    pub fn first_id(&self) -> Option<&MigrationId> {
        self.ids.first()
    }

    pub fn last_id(&self) -> Option<&MigrationId> {
        self.ids.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MigrationId> {
        self.ids.iter()
    }

    pub fn ids(&self) -> &[MigrationId] {
        &self.ids
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a MigrationId;
    type IntoIter = std::slice::Iter<'a, MigrationId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
