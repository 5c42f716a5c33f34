use super::read_item;
use crate::items::validate_item;
use stackparams_config::Settings;
use stackparams_core::Result;
use stackparams_safe::{is_locked, strip_lock_marker, Locker};

/// Pretty JSON for an item, decrypted when locked
pub fn render(settings: &Settings, item: &str) -> Result<String> {
    let path = validate_item(settings, item)?;
    let mut content = read_item(&path)?;

    if is_locked(&content) {
        eprintln!(" * Unlocking {} for display... unlocked", path.display());
        content = Locker::new(settings.safe.clone()).unlock_content(content)?;
        strip_lock_marker(&mut content);
    }

    Ok(serde_json::to_string_pretty(&content)?)
}
