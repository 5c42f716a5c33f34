use clap::Subcommand;
use stackparams_config::Settings;
use stackparams_core::{Document, Result};
use stackparams_merge::{read_document, DocumentFormat};
use stackparams_utils::write_atomic;
use std::path::Path;

pub mod edit;
pub mod lock;
pub mod merge;
pub mod show;

pub use edit::{CommandEditor, Editor};

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt a parameter file in place
    Lock {
        /// Item name or path
        item: String,
    },

    /// Decrypt a parameter file in place
    Unlock {
        /// Item name or path
        item: String,
    },

    /// Print a parameter file, decrypting it if needed
    Show {
        /// Item name or path
        item: String,
    },

    /// Create a parameter file in $EDITOR, or edit it if it already exists
    Create {
        /// Item name or path
        item: String,
    },

    /// Edit an existing parameter file in $EDITOR
    Edit {
        /// Item name or path
        item: String,
    },

    /// Merge the configured parameter file and print the result
    Merge {
        /// Stack name, used to pick the file in the stacks layout
        stack: Option<String>,

        /// Preset a template parameter; preset values win over the file
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },
}

impl Commands {
    pub fn execute(self, settings: &Settings) -> Result<()> {
        match self {
            Commands::Lock { item } => lock::lock(settings, &item).map(|_| ()),
            Commands::Unlock { item } => lock::unlock(settings, &item).map(|_| ()),
            Commands::Show { item } => {
                println!("{}", show::render(settings, &item)?);
                Ok(())
            }
            Commands::Create { item } => {
                edit::create(settings, &item, &CommandEditor::from_env()?).map(|_| ())
            }
            Commands::Edit { item } => {
                edit::edit(settings, &item, &CommandEditor::from_env()?).map(|_| ())
            }
            Commands::Merge { stack, set } => {
                println!("{}", merge::render(settings, stack.as_deref(), &set)?);
                Ok(())
            }
        }
    }
}

pub(crate) fn read_item(path: &Path) -> Result<Document> {
    read_document(path)
}

pub(crate) fn write_item(path: &Path, document: &Document) -> Result<()> {
    let bytes = DocumentFormat::from_path(path)?.encode(document)?;
    write_atomic(path, &bytes)
}
