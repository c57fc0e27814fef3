//! Metadata extraction pipeline.
//!
//! Ties the pieces together: a source file is read into a
//! [`Document`](mxmeta_model::Document), the mmCIF catalog maps its
//! categories into [`MetadataField`](mxmeta_model::MetadataField)s, and the
//! resulting [`MetadataTree`] is handed to a [`MetadataSink`].

pub mod assemble;
pub mod catalog;
pub mod error;
pub mod format;
pub mod import;
pub mod options;
pub mod selection;
pub mod sink;

pub use assemble::{MetadataTree, assemble};
pub use catalog::{CatalogEntry, CategorySource, PROCESSING_CLASSIFICATIONS, mmcif_catalog};
pub use error::{ImportError, Result};
pub use format::SourceFormat;
pub use import::{LoadedSource, extract, import_file, import_into, load_document};
pub use options::{ImportOptions, PRIMARY_CITATION};
pub use selection::{
    REFLNS_RESOLUTION_COLUMN, REFLNS_SET_COLUMN, SHELL_RESOLUTION_COLUMN, SHELL_SET_COLUMN,
    collection_rows, collection_set_column, reflns_rows, reflns_selector, select_shell,
    shell_selector, target_resolution,
};
pub use sink::{CollectingSink, MetadataSink};
