//! CLI argument parsing and command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xsdhelper")]
#[command(about = "Generate helper classes for XSD-generated classes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the helper class next to the schema file
    Generate(GenerateArgs),

    /// Print the path the helper class would be written to
    Path {
        /// Schema file (.xsd)
        #[arg(short, long, value_name = "XSD")]
        input: PathBuf,

        /// Output language or extension (cs, vb, .cs, .vb)
        #[arg(short, long, default_value = "cs")]
        language: String,
    },
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Descriptor document (<helperClass .../>) instead of individual flags
    #[arg(
        long,
        value_name = "XML",
        conflicts_with_all = ["input", "class", "property", "namespace", "backing_field", "dataset"]
    )]
    pub descriptor: Option<PathBuf>,

    /// Schema file the wrapped class was generated from
    #[arg(short, long, value_name = "XSD", required_unless_present = "descriptor")]
    pub input: Option<PathBuf>,

    /// Name of the wrapped class
    #[arg(short, long, required_unless_present = "descriptor")]
    pub class: Option<String>,

    /// Name of the helper property holding the wrapped instance
    #[arg(short, long, required_unless_present = "descriptor")]
    pub property: Option<String>,

    /// Namespace of the wrapped class
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Store the property in this field instead of an auto property
    #[arg(long, value_name = "FIELD")]
    pub backing_field: Option<String>,

    /// The wrapped class is a dataset
    #[arg(long)]
    pub dataset: bool,

    /// Output language or extension (cs, vb, .cs, .vb)
    #[arg(short, long, default_value = "cs")]
    pub language: String,

    /// Overwrite an existing helper file
    #[arg(long)]
    pub force: bool,

    /// Print the source instead of writing it
    #[arg(long)]
    pub stdout: bool,

    /// Leave out region markers
    #[arg(long)]
    pub no_regions: bool,
}
