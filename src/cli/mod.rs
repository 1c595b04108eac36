//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the dtrack binary.

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

/// Dependency-Track API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "dtrack", about = "Dependency-Track API CLI", version)]
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
    /// Show the connected server's version.
    Version,

    /// Work with components.
    #[command(subcommand)]
    Component(ComponentCommand),

    /// Work with VEX documents.
    #[command(subcommand)]
    Vex(VexCommand),
}

/// Component subcommands.
#[derive(Subcommand, Debug)]
pub enum ComponentCommand {
    /// Get a single component by UUID.
    Get {
        /// The component UUID.
        uuid: Uuid,
    },

    /// List the components of a project.
    List {
        /// The project UUID.
        project: Uuid,

        #[command(flatten)]
        page: PageArgs,

        /// Only direct dependencies.
        #[arg(long)]
        only_direct: bool,

        /// Only components with a newer version available.
        #[arg(long)]
        only_outdated: bool,
    },

    /// Look up components by hash.
    Hash {
        /// MD5, SHA or BLAKE hash.
        hash: String,

        #[command(flatten)]
        page: PageArgs,

        #[command(flatten)]
        sort: SortArgs,
    },

    /// Look up components by identity.
    Identity {
        #[arg(long)]
        group: Option<String>,

        #[arg(long)]
        name: Option<String>,

        /// Component version.
        #[arg(long)]
        component_version: Option<String>,

        /// Package URL.
        #[arg(long)]
        purl: Option<String>,

        /// CPE identifier.
        #[arg(long)]
        cpe: Option<String>,

        /// SWID tag identifier.
        #[arg(long)]
        swid_tag_id: Option<String>,

        /// Restrict to one project.
        #[arg(long)]
        project: Option<Uuid>,

        #[command(flatten)]
        page: PageArgs,

        #[command(flatten)]
        sort: SortArgs,
    },

    /// List the properties of a component.
    Properties {
        /// The component UUID.
        uuid: Uuid,
    },
}

/// VEX subcommands.
#[derive(Subcommand, Debug)]
pub enum VexCommand {
    /// Export a project's VEX as CycloneDX JSON.
    Export {
        /// The project UUID.
        project: Uuid,
    },
}

/// Paging flags shared by list commands.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct PageArgs {
    /// Page number (1-indexed).
    #[arg(long)]
    pub page: Option<u32>,

    /// Number of items per page.
    #[arg(long)]
    pub size: Option<u32>,
}

/// Sorting flags shared by lookup commands.
#[derive(Args, Debug, Clone, Default)]
pub struct SortArgs {
    /// Field to sort by.
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending.
    #[arg(long)]
    pub desc: bool,
}

impl From<PageArgs> for crate::PageOptions {
    fn from(args: PageArgs) -> Self {
        crate::PageOptions {
            page_number: args.page,
            page_size: args.size,
        }
    }
}

impl From<SortArgs> for crate::SortOptions {
    fn from(args: SortArgs) -> Self {
        crate::SortOptions {
            field: args.sort,
            order: if args.desc {
                crate::SortOrder::Desc
            } else {
                crate::SortOrder::Asc
            },
        }
    }
}
