use std::path::PathBuf;
use thiserror::Error;

/// All the ways a batch run can fail.
///
/// Nothing here is recovered locally: any error aborts the current document
/// and with it the whole batch. The vocabulary variants exist to catch
/// schema drift in the reports — an unrecognized tag is more likely a new
/// PLIP version than a feature we want to silently drop.
#[derive(Debug, Error)]
pub enum Error {
    /// A manifest, report, or output file could not be read or created.
    #[error("I/O error for {path}: {source}", path = .path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A report is not well-formed XML.
    #[error("failed to parse {path}: {source}", path = .path.display())]
    Xml {
        /// The report file.
        path: PathBuf,
        /// The underlying XML error.
        #[source]
        source: roxmltree::Error,
    },

    /// A contacting residue's code is not in the residue property table.
    #[error("unknown residue code '{0}'")]
    UnknownResidueCode(String),

    /// An interaction entry's tag is not in the interaction type table.
    #[error("unknown interaction kind '{0}'")]
    UnknownInteractionKind(String),

    /// A ligand property tag is not in the ligand property table.
    #[error("unknown ligand property '{0}'")]
    UnknownPropertyKind(String),

    /// A binding site record has no `identifiers/members/member` text.
    #[error("binding site record has no ligand identifier")]
    MissingIdentityKey,

    /// A binding site record lacks one of its three expected sections.
    #[error("binding site '{ligand}' has no '{section}' section")]
    MissingSection {
        /// The ligand identity key of the offending record.
        ligand: String,
        /// The absent section's element name.
        section: &'static str,
    },

    /// An entry inside a section lacks a required attribute or child node.
    #[error("'{element}' entry is missing its '{field}'")]
    MissingField {
        /// The entry's element name.
        element: String,
        /// The absent attribute or child node.
        field: &'static str,
    },

    /// Any of the above, tagged with the report it occurred in.
    #[error("in report {path}: {source}", path = .path.display())]
    Report {
        /// The report being processed when the error occurred.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: Box<Error>,
    },

    /// The aggregate could not be rendered as a DataFrame.
    #[error(transparent)]
    Table(#[from] polars::error::PolarsError),
}

impl Error {
    /// Attach the report path to an error raised while processing it.
    pub(crate) fn in_report(self, path: impl Into<PathBuf>) -> Self {
        Self::Report {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
