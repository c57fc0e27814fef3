use std::fs::File;
use std::io::{self, BufWriter};

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::{info, info_span};

use mxmeta_core::{ImportOptions, MetadataSink, MetadataTree, import_file};

use crate::cli::{ExtractArgs, OutputArg, VocabArgs};
use crate::summary::{apply_table_style, print_summary};
use mxmeta_cli::sink::JsonSink;

/// Options file first, then command-line overrides.
pub fn import_options(args: &ExtractArgs) -> Result<ImportOptions> {
    let mut options = match &args.options {
        Some(path) => ImportOptions::load(path)
            .with_context(|| format!("load options from {}", path.display()))?,
        None => ImportOptions::default(),
    };
    if let Some(format) = args.format.source_format() {
        options.format = Some(format);
    }
    if let Some(set) = &args.set_id {
        options.diffraction_set = Some(set.clone());
    }
    if let Some(citation) = &args.citation {
        options.citation_selector.clone_from(citation);
    }
    Ok(options)
}

pub fn run_extract(args: &ExtractArgs) -> Result<MetadataTree> {
    let span = info_span!("extract", file = %args.file.display());
    let _guard = span.enter();

    let options = import_options(args)?;
    let tree = import_file(&args.file, &options)?;
    info!(fields = tree.fields().len(), "extracted metadata");

    match args.output {
        OutputArg::Json => match &args.out {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("create {}", path.display()))?;
                JsonSink::new(BufWriter::new(file)).publish(&tree)?;
            }
            None => JsonSink::new(io::stdout().lock()).publish(&tree)?,
        },
        OutputArg::Tree => print!("{tree}"),
        OutputArg::Summary => print_summary(&tree),
    }
    Ok(tree)
}

/// Prints the canonical term for the value; fails when nothing matches.
pub fn run_vocab(args: &VocabArgs) -> Result<()> {
    let kind = args.kind.kind();
    let Some(term) = kind.vocabulary().canonicalize(&args.value) else {
        bail!("no {kind} term matches '{}'", args.value);
    };
    let mut table = Table::new();
    table.set_header(vec!["Vocabulary", "Input", "Canonical"]);
    apply_table_style(&mut table);
    table.add_row(vec![kind.as_str(), args.value.as_str(), term]);
    println!("{table}");
    if kind.vocabulary().fallback() == Some(term) {
        info!(value = %args.value, "value fell back to the generic term");
    }
    Ok(())
}
