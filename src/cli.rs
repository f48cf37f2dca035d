//! Command line interface

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::split_libraries;
use crate::services::filters::FilterOptions;
use crate::services::output::SortBy;

#[derive(Debug, Parser)]
#[command(name = "bibchecker", version, about = "Check library availability for catalog items")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check identifiers once and print a plain-text report
    Check(CheckArgs),
    /// Serve the JSON API and refresh the report daily
    Serve,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Identifiers to check; read from the input file when empty
    pub ids: Vec<String>,

    /// Input file with one identifier per line
    #[arg(short, long, env = "BIB_INPUT_FILE")]
    pub input: Option<PathBuf>,

    /// Show all copies, not only those that can be borrowed
    #[arg(long)]
    pub all: bool,

    /// Only show items with at least one remaining copy
    #[arg(long)]
    pub only_available: bool,

    /// Comma-separated libraries to keep, skip the rest
    #[arg(long, value_name = "BIB1,BIB2")]
    pub bib: Option<String>,

    /// Report layout
    #[arg(long, value_enum, default_value_t = SortBy::Item)]
    pub sort: SortBy,

    /// Write the extracted entries to the cache file
    #[arg(long)]
    pub save_cache: bool,

    /// Write found titles back into the input file
    #[arg(long, requires = "input")]
    pub update_input: bool,
}

impl CheckArgs {
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            keep_unborrowable: self.all,
            only_available: self.only_available,
            libraries: self
                .bib
                .as_deref()
                .map(split_libraries)
                .unwrap_or_default()
                .into_iter()
                .collect(),
        }
    }
}
