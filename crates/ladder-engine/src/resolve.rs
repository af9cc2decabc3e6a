//! Pure position arithmetic over a [`Catalog`].
//!
//! `Ok(None)` from a resolver means "nothing to do": the request is valid but
//! there is no version in that direction.

use ladder_core::{Direction, MigrationId, Target, Version};

use crate::catalog::Catalog;
use crate::error::EngineError;

/// Fail with `UnknownVersion` unless `version` is zero or in the catalog.
pub fn validate(catalog: &Catalog, version: &Version) -> Result<(), EngineError> {
    match version {
        Version::Zero => Ok(()),
        Version::At(id) => catalog.index_of(id).map(|_| ()),
    }
}

/// The id one position above `current`, if any.
pub fn next_up(catalog: &Catalog, current: &Version) -> Result<Option<MigrationId>, EngineError> {
    match current {
        Version::Zero => Ok(catalog.first_id().cloned()),
        Version::At(id) => {
            let index = catalog.index_of(id)?;
            Ok(catalog.id_at(index + 1).cloned())
        }
    }
}

/// The version one position below `current`. Zero has nothing below it.
pub fn next_down(catalog: &Catalog, current: &Version) -> Result<Option<Version>, EngineError> {
    match current {
        Version::Zero => Ok(None),
        Version::At(id) => version_below(catalog, id).map(Some),
    }
}

/// The version the target is left at after `id` runs down.
pub fn version_below(catalog: &Catalog, id: &MigrationId) -> Result<Version, EngineError> {
    let index = catalog.index_of(id)?;
    Ok(match index.checked_sub(1).and_then(|i| catalog.id_at(i)) {
        Some(prev) => Version::At(prev.clone()),
        None => Version::Zero,
    })
}

/// Turn a target into a concrete version, or `None` for a no-op.
pub fn resolve_target(
    catalog: &Catalog,
    current: &Version,
    target: &Target,
) -> Result<Option<Version>, EngineError> {
    match target {
        Target::Zero => Ok(Some(Version::Zero)),
        Target::Version(id) => Ok(Some(Version::At(id.clone()))),
        Target::Head => Ok(catalog.last_id().cloned().map(Version::At)),
        Target::Up => Ok(next_up(catalog, current)?.map(Version::At)),
        Target::Down => next_down(catalog, current),
    }
}

/// Which way to walk from `current` to reach `target`.
///
/// Callers must have ruled out `current == target` already.
pub fn direction_between(
    catalog: &Catalog,
    current: &Version,
    target: &Version,
) -> Result<Direction, EngineError> {
    validate(catalog, current)?;
    validate(catalog, target)?;

    let current_id = match current {
        Version::Zero => return Ok(Direction::Up),
        Version::At(id) => id,
    };
    if catalog.last_id() == Some(current_id) && target != current {
        return Ok(Direction::Down);
    }
    let target_id = match target {
        Version::Zero => return Ok(Direction::Down),
        Version::At(id) => id,
    };

    if catalog.index_of(target_id)? > catalog.index_of(current_id)? {
        Ok(Direction::Up)
    } else {
        Ok(Direction::Down)
    }
}
