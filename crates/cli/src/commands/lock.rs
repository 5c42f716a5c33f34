use super::{read_item, write_item};
use crate::items::validate_item;
use stackparams_config::Settings;
use stackparams_core::Result;
use stackparams_safe::{is_locked, strip_lock_marker, Locker};
use std::path::PathBuf;
use tracing::debug;

/// Lock an item in place. Returns the item path and whether it changed.
pub fn lock(settings: &Settings, item: &str) -> Result<(PathBuf, bool)> {
    let path = validate_item(settings, item)?;
    let content = read_item(&path)?;

    if is_locked(&content) {
        debug!(item = %path.display(), "item is already locked");
        eprintln!(" Locking {}... no-op", path.display());
        return Ok((path, false));
    }

    let locked = Locker::new(settings.safe.clone()).lock_content(content)?;
    write_item(&path, &locked)?;
    eprintln!(" Locking {}... locked", path.display());
    Ok((path, true))
}

/// Unlock an item in place. Returns the item path and whether it changed.
pub fn unlock(settings: &Settings, item: &str) -> Result<(PathBuf, bool)> {
    let path = validate_item(settings, item)?;
    let content = read_item(&path)?;

    if !is_locked(&content) {
        debug!(item = %path.display(), "item is already unlocked");
        eprintln!(" Unlocking {}... no-op", path.display());
        return Ok((path, false));
    }

    let mut unlocked = Locker::new(settings.safe.clone()).unlock_content(content)?;
    strip_lock_marker(&mut unlocked);
    write_item(&path, &unlocked)?;
    eprintln!(" Unlocking {}... unlocked", path.display());
    Ok((path, true))
}
