// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Args, Parser, Subcommand};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Parse a non-negative number (quantity, price).
fn non_negative(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        Ok(_) => Err("must be a non-negative number".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

#[derive(Parser)]
#[command(name = "shoplist")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Offline-first shopping lists, shared between accounts")]
#[command(
    long_about = "Offline-first shopping lists, shared between accounts.\n\n\
    Lists are mirrored from the backend and kept in a local copy, so every command \
    works offline; changes made offline are pushed on the next connected run."
)]
pub struct Cli {
    /// Run as if shoplist was started in <path>
    #[arg(short = 'C', long = "directory", global = true, value_name = "path")]
    pub directory: Option<String>,

    /// Work from the local copy without contacting the backend
    #[arg(long, global = true)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize shoplist in the current directory
    #[command(after_help = "\
Examples:
  shoplist init --user alice --remote mock:backend.json   Use a shared mock backend
  shoplist init --user alice --local                      Local-only, never syncs")]
    Init {
        /// Account id to sign in as
        #[arg(long, value_parser = non_empty_string)]
        user: String,

        /// Backend location (mock:<path>)
        #[arg(long, conflicts_with = "local")]
        remote: Option<String>,

        /// Local-only mode: no backend
        #[arg(long)]
        local: bool,

        /// Directory to initialize (default: current directory)
        #[arg(long)]
        path: Option<String>,
    },

    /// Manage lists
    #[command(subcommand)]
    List(ListCommand),

    /// Manage items on a list
    #[command(subcommand)]
    Item(ItemCommand),

    /// Share one of your lists with another account
    #[command(after_help = "\
Examples:
  shoplist share list-1a2b bob   Give bob access to the list")]
    Share {
        /// List ID (or unique prefix)
        list: String,

        /// Account to share with
        #[arg(value_parser = non_empty_string)]
        user: String,
    },

    /// Show lists other accounts shared with you
    Shared,

    /// Reconcile the local copy with the backend
    Sync,

    /// Show account, connection and pending changes
    Status,

    /// Show or change account settings
    #[command(after_help = "\
Examples:
  shoplist user                            Show current settings
  shoplist user --username \"Alice\"         Change display name
  shoplist user --primary list-1a2b        Set the primary list
  shoplist user --auto-invitations false   Stop accepting shares automatically")]
    User {
        /// Set the display name
        #[arg(long, value_parser = non_empty_string)]
        username: Option<String>,

        /// Set the primary list (ID or unique prefix)
        #[arg(long)]
        primary: Option<String>,

        /// Accept incoming shares automatically
        #[arg(
            long,
            value_name = "bool",
            action = clap::ArgAction::Set,
            value_parser = clap::value_parser!(bool)
        )]
        auto_invitations: Option<bool>,
    },
}

#[derive(Subcommand)]
pub enum ListCommand {
    /// Create a list
    New {
        #[arg(value_parser = non_empty_string)]
        name: String,
    },

    /// Show your lists and lists shared with you
    Ls {
        /// Include archived lists
        #[arg(long, short)]
        all: bool,
    },

    /// Show a list with its items
    Show {
        /// List ID (or unique prefix)
        list: String,
    },

    /// Rename a list
    Rename {
        /// List ID (or unique prefix)
        list: String,
        #[arg(value_parser = non_empty_string)]
        name: String,
    },

    /// Archive a list
    Archive {
        /// List ID (or unique prefix)
        list: String,
    },

    /// Restore an archived list
    Unarchive {
        /// List ID (or unique prefix)
        list: String,
    },

    /// Delete a list
    Rm {
        /// List ID (or unique prefix)
        list: String,
    },
}

/// Item fields shared by `item add` and `item edit`.
#[derive(Args, Debug, Default, Clone)]
pub struct ItemFields {
    /// Quantity to buy
    #[arg(long, short, value_parser = non_negative)]
    pub quantity: Option<f64>,

    /// Unit price
    #[arg(long, short, value_parser = non_negative)]
    pub price: Option<f64>,

    /// Where to buy it
    #[arg(long, short)]
    pub vendor: Option<String>,

    /// Free-form notes
    #[arg(long, short)]
    pub notes: Option<String>,
}

#[derive(Subcommand)]
pub enum ItemCommand {
    /// Add an item to a list
    #[command(after_help = "\
Examples:
  shoplist item add list-1a2b Milk                 Add with default fields
  shoplist item add list-1a2b Milk -q 2 -v Corner   Add with quantity and vendor")]
    Add {
        /// List ID (or unique prefix)
        list: String,
        #[arg(value_parser = non_empty_string)]
        name: String,
        #[command(flatten)]
        fields: ItemFields,
    },

    /// Mark an item as bought
    Check {
        /// List ID (or unique prefix)
        list: String,
        /// Item ID (or unique prefix)
        item: String,
    },

    /// Mark an item as not bought
    Uncheck {
        /// List ID (or unique prefix)
        list: String,
        /// Item ID (or unique prefix)
        item: String,
    },

    /// Change an item's fields
    Edit {
        /// List ID (or unique prefix)
        list: String,
        /// Item ID (or unique prefix)
        item: String,
        /// New name
        #[arg(long, value_parser = non_empty_string)]
        name: Option<String>,
        #[command(flatten)]
        fields: ItemFields,
    },

    /// Remove an item
    Rm {
        /// List ID (or unique prefix)
        list: String,
        /// Item ID (or unique prefix)
        item: String,
    },
}

#[cfg(test)]
#[path = "cli_tests/mod.rs"]
mod tests;
