// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::{resolve_list_id, App};
use crate::display::{format_grant, format_list_line};
use crate::error::Result;
use crate::session::Session;

pub async fn run(list: String, user: String, offline: bool) -> Result<()> {
    let mut app = App::open(offline).await?;
    let output = share(&mut app.session, &list, &user).await?;
    print!("{}", output);
    app.finish().await
}

pub async fn run_shared(offline: bool) -> Result<()> {
    let mut app = App::open(offline).await?;
    let output = shared(&mut app.session).await?;
    print!("{}", output);
    app.finish().await
}

pub(crate) async fn share(session: &mut Session, list: &str, user: &str) -> Result<String> {
    let list_id = resolve_list_id(session, list)?;
    let grant = session.share_list(&list_id, user).await?;
    Ok(format!("Shared {} with {} ({})\n", list_id, user, grant.id))
}

/// Lists shared with this account, plus the grants behind them when online.
pub(crate) async fn shared(session: &mut Session) -> Result<String> {
    let mut out = String::new();
    let shared = session.lists.shared_lists();
    if shared.is_empty() {
        out.push_str("No lists shared with you\n");
    }
    for list in shared {
        out.push_str(&format_list_line(list, session.user_id(), None));
        out.push('\n');
    }

    if session.is_online() {
        let grants = session.shared_with_me().await?;
        if !grants.is_empty() {
            out.push_str("\nGrants:\n");
            for grant in &grants {
                out.push_str("  ");
                out.push_str(&format_grant(grant));
                out.push('\n');
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "share_tests.rs"]
mod tests;
