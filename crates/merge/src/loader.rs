//! Locating and reading the parameter file for a merge

use crate::engine::MergeEngine;
use crate::format::DocumentFormat;
use serde_json::{Map, Value};
use stackparams_config::{Layout, Settings};
use stackparams_core::{Document, Error, MergeContext, Result};
use stackparams_resolver::{CommandExecutor, ResolverContext, ResolverRegistry};
use stackparams_safe::Locker;
use stackparams_utils::tracing::merge_span;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Finds, decodes and unlocks parameter files according to [`Settings`]
#[derive(Debug)]
pub struct DocumentLoader<'a> {
    settings: &'a Settings,
    locker: Locker,
}

impl<'a> DocumentLoader<'a> {
    #[must_use]
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            locker: Locker::new(settings.safe.clone()),
        }
    }

    /// File stem searched for: the destination in the infrastructure
    /// layout, the stack name in the stacks layout
    pub fn search_stem(&self, stack_name: Option<&str>) -> Result<String> {
        match self.settings.layout {
            Layout::Infrastructure => Ok(self.settings.destination.clone()),
            Layout::Stacks => stack_name.map(str::to_string).ok_or_else(|| {
                Error::configuration("a stack name is required for the stacks layout")
            }),
        }
    }

    /// Existing parameter files named `stem` in the parameter directory
    #[must_use]
    pub fn find_files(&self, stem: &str) -> Vec<PathBuf> {
        let directory = self.settings.parameter_directory();
        DocumentFormat::all_extensions()
            .map(|extension| directory.join(format!("{stem}{extension}")))
            .filter(|path| path.is_file())
            .collect()
    }

    /// Load the document to merge for `stack_name`
    ///
    /// No matching file yields an empty document. More than one match is an
    /// error, since which one should win is not defined.
    pub fn load_file_for(&self, stack_name: Option<&str>) -> Result<Document> {
        let stem = self.search_stem(stack_name)?;
        let mut paths = self.find_files(&stem);

        match paths.len() {
            0 => {
                debug!(
                    stem = %stem,
                    directory = %self.settings.parameter_directory().display(),
                    "no parameter file found"
                );
                Ok(Value::Object(Map::new()))
            }
            1 => {
                let path = paths.remove(0);
                debug!(path = %path.display(), "loading parameter file");
                self.locker.unlock_content(read_document(&path)?)
            }
            _ => Err(Error::ambiguous_match(stem, paths)),
        }
    }
}

/// Read and decode a parameter file, choosing the format by extension
pub fn read_document(path: &Path) -> Result<Document> {
    let format = DocumentFormat::from_path(path)?;
    let bytes = fs::read(path).map_err(|e| Error::file_system(path, "read", e))?;
    format.decode(&bytes)
}

/// Merge the parameter file for one invocation into `ctx`
///
/// `ctx` may already hold values set by the caller; those win over
/// anything the loaded file declares for the same key. Each call uses a
/// fresh resolver cache.
pub fn load_context(
    settings: &Settings,
    registry: &ResolverRegistry,
    executor: Arc<dyn CommandExecutor>,
    stack_name: Option<&str>,
    mut ctx: MergeContext,
) -> Result<MergeContext> {
    let loader = DocumentLoader::new(settings);
    let stem = loader.search_stem(stack_name)?;
    let _span = merge_span(&stem).entered();

    let document = loader.load_file_for(stack_name)?;
    let context = ResolverContext::new(executor);
    MergeEngine::new(registry, &context).merge_document(document, &mut ctx)?;

    debug!(
        parameters = ctx.parameters.len(),
        compile_parameters = ctx.compile_parameters.len(),
        apply_stacks = ctx.apply_stack.len(),
        "merge complete"
    );
    Ok(ctx)
}
