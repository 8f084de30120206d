//! Taxonomy command - inspect and validate category mappings.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use riclass_core::taxonomy::Taxonomy;

/// Arguments for the taxonomy command.
#[derive(Args)]
pub struct TaxonomyArgs {
    #[command(subcommand)]
    action: TaxonomyAction,
}

#[derive(Subcommand)]
enum TaxonomyAction {
    /// Print the built-in CEE mapping
    Show,

    /// Validate a custom mapping file
    Validate {
        /// Mapping file (JSON)
        file: PathBuf,
    },
}

pub fn run(args: TaxonomyArgs) -> anyhow::Result<()> {
    match args.action {
        TaxonomyAction::Show => {
            let taxonomy = Taxonomy::default_mapping();
            println!("{}", taxonomy.to_json()?);
            Ok(())
        }
        TaxonomyAction::Validate { file } => {
            let text = fs::read_to_string(&file)?;
            match Taxonomy::from_json(&text) {
                Ok(taxonomy) => {
                    println!(
                        "{} {} is valid ({} categories)",
                        style("✓").green(),
                        file.display(),
                        taxonomy.node_count()
                    );
                    Ok(())
                }
                Err(e) => anyhow::bail!("invalid mapping: {e}"),
            }
        }
    }
}
