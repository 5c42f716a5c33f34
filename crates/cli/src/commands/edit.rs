//! Interactive create and edit through an external editor

use super::{read_item, write_item};
use crate::items::{new_item, validate_item};
use serde_json::{json, Map};
use stackparams_config::Settings;
use stackparams_core::{Document, Error, Result, EDITOR_VAR};
use stackparams_safe::{is_lock_enabled, is_locked, strip_lock_marker, Envelope, Locker};
use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Something that lets a person change the file at `path`
pub trait Editor {
    fn edit(&self, path: &Path) -> Result<()>;
}

impl<F> Editor for F
where
    F: Fn(&Path) -> Result<()>,
{
    fn edit(&self, path: &Path) -> Result<()> {
        self(path)
    }
}

/// Editor command taken from `$EDITOR`, split with shell quoting rules
#[derive(Debug, Clone)]
pub struct CommandEditor {
    program: String,
    args: Vec<String>,
}

impl CommandEditor {
    pub fn from_env() -> Result<Self> {
        let value = env::var(EDITOR_VAR).unwrap_or_default();
        Self::parse(&value)
    }

    pub fn parse(value: &str) -> Result<Self> {
        let mut words = shlex::split(value)
            .filter(|words| !words.is_empty())
            .ok_or_else(|| {
                Error::configuration(format!("${EDITOR_VAR} must be set for create/edit commands"))
            })?;
        let program = words.remove(0);
        Ok(Self {
            program,
            args: words,
        })
    }
}

impl Editor for CommandEditor {
    fn edit(&self, path: &Path) -> Result<()> {
        debug!(editor = %self.program, file = %path.display(), "launching editor");
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .map_err(|e| {
                Error::command_execution(
                    &self.program,
                    self.args.clone(),
                    format!("failed to launch editor: {e}"),
                    None,
                )
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::command_execution(
                &self.program,
                self.args.clone(),
                "editor exited unsuccessfully",
                status.code(),
            ))
        }
    }
}

fn new_item_content() -> Document {
    json!({
        "parameters": {},
        "compile_parameters": {},
        "apply_stacks": [],
        "stacks": {}
    })
}

/// Create an item, or edit it when it already exists
///
/// New items are always locked on save. Existing items are re-locked only
/// when they were locked before.
pub fn create(settings: &Settings, item: &str, editor: &dyn Editor) -> Result<PathBuf> {
    match validate_item(settings, item) {
        Ok(path) => edit_path(settings, path, false, editor),
        Err(e @ Error::AmbiguousMatch { .. }) => Err(e),
        Err(_) => {
            let path = new_item(settings, item)?;
            edit_path(settings, path, true, editor)
        }
    }
}

/// Edit an existing item
pub fn edit(settings: &Settings, item: &str, editor: &dyn Editor) -> Result<PathBuf> {
    let path = validate_item(settings, item)?;
    edit_path(settings, path, false, editor)
}

fn edit_path(
    settings: &Settings,
    path: PathBuf,
    is_new: bool,
    editor: &dyn Editor,
) -> Result<PathBuf> {
    let locker = Locker::new(settings.safe.clone());

    let mut content = if is_new {
        new_item_content()
    } else {
        read_item(&path)?
    };
    // Envelope fields we don't own go back out with the re-locked file
    let mut metadata = Map::new();
    if is_locked(&content) {
        eprintln!(" * Unlocking {} for edit... unlocked", path.display());
        metadata = Envelope::from_document(content.clone())?.extra;
        content = locker.unlock_content(content)?;
    }
    let lock_enabled = is_new || is_lock_enabled(&content);
    strip_lock_marker(&mut content);

    let mut scratch = tempfile::Builder::new()
        .prefix("stackparams-")
        .suffix(".json")
        .tempfile()
        .map_err(|e| Error::file_system(std::env::temp_dir(), "create temporary file", e))?;
    let text = serde_json::to_string_pretty(&content)?;
    scratch
        .write_all(text.as_bytes())
        .map_err(|e| Error::file_system(scratch.path(), "write", e))?;
    scratch
        .flush()
        .map_err(|e| Error::file_system(scratch.path(), "flush", e))?;

    editor.edit(scratch.path())?;

    let edited = std::fs::read(scratch.path())
        .map_err(|e| Error::file_system(scratch.path(), "read", e))?;
    let mut content: Document = serde_json::from_slice(&edited)?;

    if lock_enabled {
        content = locker.lock_content_with(content, metadata)?;
        eprintln!(" * Locking {} for storage... locked", path.display());
    } else {
        eprintln!(" * Storing {}... unlocked", path.display());
    }
    write_item(&path, &content)?;
    Ok(path)
}
