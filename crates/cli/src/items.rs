//! Mapping item names given on the command line to parameter files

use stackparams_config::Settings;
use stackparams_core::{Error, Result, INFRASTRUCTURE_DIRECTORY, STACKS_DIRECTORY};
use stackparams_merge::DocumentFormat;
use std::path::{PathBuf, MAIN_SEPARATOR};

/// Locate an existing item
///
/// Tried in order: the item as a path, then `<dir>/<item>` and
/// `<dir>/<item><ext>` for every search directory and known document
/// extension. Exactly one candidate may exist.
pub fn validate_item(settings: &Settings, item: &str) -> Result<PathBuf> {
    if item.trim().is_empty() {
        return Err(Error::configuration("item name is required"));
    }

    let mut candidates = vec![settings.working_dir.join(item)];
    for directory in settings.search_directories() {
        candidates.push(directory.join(item));
        for extension in DocumentFormat::all_extensions() {
            candidates.push(directory.join(format!("{item}{extension}")));
        }
    }

    let mut found: Vec<PathBuf> = Vec::new();
    for candidate in candidates {
        if candidate.is_file() && !found.contains(&candidate) {
            found.push(candidate);
        }
    }

    match found.len() {
        0 => Err(Error::configuration(format!("failed to locate item `{item}`"))),
        1 => Ok(found.remove(0)),
        _ => Err(Error::ambiguous_match(item, found)),
    }
}

/// Path for an item that does not exist yet
///
/// A bare name is placed in the single existing parameter directory as
/// `<name>.json`. Anything containing a path separator is used as given.
pub fn new_item(settings: &Settings, item: &str) -> Result<PathBuf> {
    if item.trim().is_empty() {
        return Err(Error::configuration("item name is required"));
    }
    if item.contains(MAIN_SEPARATOR) || item.contains('/') {
        return Ok(settings.working_dir.join(item));
    }

    let mut checked: Vec<PathBuf> = Vec::new();
    if let Some(directory) = &settings.directory {
        checked.push(settings.working_dir.join(directory));
    }
    for default in [INFRASTRUCTURE_DIRECTORY, STACKS_DIRECTORY] {
        let directory = settings.working_dir.join(default);
        if !checked.contains(&directory) {
            checked.push(directory);
        }
    }

    let existing: Vec<&PathBuf> = checked.iter().filter(|dir| dir.is_dir()).collect();
    match existing.as_slice() {
        [directory] => Ok(directory.join(format!("{item}.json"))),
        [] => Err(Error::configuration(format!(
            "no existing parameter directories found, create one first (checked: {})",
            display_paths(&checked)
        ))),
        several => Err(Error::configuration(format!(
            "unable to pick a directory for `{item}`, several exist (detected: {})",
            display_paths(several.iter().copied())
        ))),
    }
}

fn display_paths<'a>(paths: impl IntoIterator<Item = &'a PathBuf>) -> String {
    paths
        .into_iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
