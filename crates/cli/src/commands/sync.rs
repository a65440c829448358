// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::App;
use crate::error::{Error, Result};
use crate::session::Session;

pub async fn run(offline: bool) -> Result<()> {
    let mut app = App::open(offline).await?;
    if !app.config.is_remote_mode() {
        return Err(Error::Config(
            "no remote configured: this directory is local-only".to_string(),
        ));
    }
    let output = execute(&mut app.session).await?;
    print!("{}", output);
    app.finish().await
}

/// Reports the reconciliation the session ran when it connected.
///
/// Opening a session already syncs, so a second pass only runs if none did.
pub(crate) async fn execute(session: &mut Session) -> Result<String> {
    if !session.is_online() {
        return Err(Error::Offline { action: "sync" });
    }
    let report = match session.last_sync() {
        Some(report) => report,
        None => session.sync().await?,
    };
    if report.is_empty() {
        Ok("Already up to date\n".to_string())
    } else {
        Ok(format!("Synced: {}\n", report))
    }
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
