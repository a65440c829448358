// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! shoplist - offline-first shopping lists shared between accounts.
//!
//! This crate provides the client behind the `shoplist` CLI: the stores
//! that hold the signed-in account's state, the reconciliation that runs
//! when connectivity returns, and the commands built on top of them.
//!
//! # Main Components
//!
//! - [`Session`] - A signed-in client wiring the stores to one backend
//! - [`stores`] - Auth, user settings, lists and notifications
//! - [`sync`] - Reconciliation of the local copy with the backend
//! - [`Config`] - Per-directory configuration (`.shoplist/config.toml`)
//! - [`Error`] - Error types for all operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use shoplist::{Session, SessionOptions, StoreContext};
//!
//! let session = Session::start(ctx, storage, SessionOptions::new("alice")).await?;
//! let list_id = session.create_list("Groceries").await?;
//! session.add_item(&list_id, "Milk").await?;
//! ```

mod cli;
mod commands;
mod display;

pub mod config;
pub mod connectivity;
pub mod error;
pub mod session;
pub mod stores;
pub mod sync;

pub use cli::{Cli, Command, ItemCommand, ItemFields, ListCommand};
pub use config::{find_data_dir, init_data_dir, Config, RemoteConfig};
pub use connectivity::{Connectivity, Transition};
pub use error::{Error, Result};
pub use session::{Session, SessionOptions};
pub use stores::StoreContext;
pub use sync::SyncReport;

use commands::user::SettingsUpdate;

/// Runs one CLI command to completion.
pub fn run(command: Command, offline: bool) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(dispatch(command, offline))
}

async fn dispatch(command: Command, offline: bool) -> Result<()> {
    match command {
        Command::Init {
            user,
            remote,
            local,
            path,
        } => commands::init::run(user, remote, local, path),
        Command::List(cmd) => commands::list::run(cmd, offline).await,
        Command::Item(cmd) => commands::item::run(cmd, offline).await,
        Command::Share { list, user } => commands::share::run(list, user, offline).await,
        Command::Shared => commands::share::run_shared(offline).await,
        Command::Sync => commands::sync::run(offline).await,
        Command::Status => commands::status::run(offline).await,
        Command::User {
            username,
            primary,
            auto_invitations,
        } => {
            let update = SettingsUpdate {
                username,
                primary,
                auto_invitations,
            };
            commands::user::run(update, offline).await
        }
    }
}
