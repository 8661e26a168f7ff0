use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

use converter::{ConvertOptions, UnknownPartners};

#[derive(Debug, Parser)]
#[command(name = "convert")]
#[command(about = "Converts a person table and a family table into one GedcomX JSON document", long_about = None)]
#[command(version)]
pub struct Args {
    /// CSV table containing the persons
    pub persons: PathBuf,

    /// CSV table containing the families
    pub families: PathBuf,

    /// Write the document here instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON file with conversion options; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// What an empty or "0" partner slot becomes
    #[arg(long, value_enum)]
    pub unknown_partners: Option<PartnerPolicy>,

    /// Drop family notes instead of attaching them to couple relationships
    #[arg(long)]
    pub no_family_notes: bool,

    /// Add a MaritalStatus fact to every declared person
    #[arg(long)]
    pub marital_status: bool,

    /// Add a NumberOfChildren fact to every couple relationship
    #[arg(long)]
    pub children_count: bool,

    /// Contributor recorded in the document attribution
    #[arg(long)]
    pub contributor: Option<String>,

    /// Stamp the attribution with the conversion time
    #[arg(long)]
    pub timestamp: bool,

    /// Single-line JSON output
    #[arg(long)]
    pub compact: bool,

    /// More log output on stderr (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PartnerPolicy {
    Distinct,
    Shared,
}

impl From<PartnerPolicy> for UnknownPartners {
    fn from(policy: PartnerPolicy) -> Self {
        match policy {
            PartnerPolicy::Distinct => UnknownPartners::Distinct,
            PartnerPolicy::Shared => UnknownPartners::Shared,
        }
    }
}

impl Args {
    /// Applies the flags on top of `base` (defaults or a config file)
    pub fn apply(&self, mut base: ConvertOptions) -> ConvertOptions {
        if let Some(policy) = self.unknown_partners {
            base.unknown_partners = policy.into();
        }
        if self.no_family_notes {
            base.include_family_notes = false;
        }
        if self.marital_status {
            base.marital_status = true;
        }
        if self.children_count {
            base.children_count = true;
        }
        if let Some(contributor) = &self.contributor {
            base.contributor = Some(contributor.clone());
        }
        if self.timestamp {
            base.timestamp = true;
        }
        base
    }
}
