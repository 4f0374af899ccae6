//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the cfapi binary.

use clap::{Parser, Subcommand, ValueEnum};

/// Cloud Foundry API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "cfapi", about = "Cloud Foundry API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by guid.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// The entity guid.
        guid: String,
    },

    /// List entities with optional filtering and a page bound.
    List {
        /// The type of entity to list.
        entity: ListEntity,

        /// Stop after this many pages (fetches all pages if omitted).
        #[arg(long)]
        pages: Option<i32>,

        /// `q` filter expression, e.g. `name:my-app` (repeatable).
        #[arg(long = "filter")]
        filters: Vec<String>,
    },
}

/// Entity types that can be fetched individually.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A Cloud Foundry application.
    #[value(alias = "apps")]
    App,
    /// A space.
    #[value(alias = "spaces")]
    Space,
    /// An organization.
    #[value(alias = "org", alias = "orgs")]
    Organization,
}

/// Entity types that can be listed.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum ListEntity {
    /// Cloud Foundry applications.
    #[value(alias = "app")]
    Apps,
    /// Routes.
    #[value(alias = "route")]
    Routes,
}
