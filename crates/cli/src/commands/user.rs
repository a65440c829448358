// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::{resolve_list_id, App};
use crate::error::{Error, Result};
use crate::session::Session;

/// Requested settings changes; all `None` shows the current settings.
#[derive(Debug, Default, Clone)]
pub struct SettingsUpdate {
    pub username: Option<String>,
    pub primary: Option<String>,
    pub auto_invitations: Option<bool>,
}

impl SettingsUpdate {
    fn is_empty(&self) -> bool {
        self.username.is_none() && self.primary.is_none() && self.auto_invitations.is_none()
    }
}

pub async fn run(update: SettingsUpdate, offline: bool) -> Result<()> {
    let mut app = App::open(offline).await?;
    let output = execute(&mut app.session, update).await?;
    print!("{}", output);
    app.finish().await
}

pub(crate) async fn execute(session: &mut Session, update: SettingsUpdate) -> Result<String> {
    if update.is_empty() {
        return Ok(show(session));
    }
    // Settings live only on the backend.
    if !session.is_online() {
        return Err(Error::Offline {
            action: "changing settings",
        });
    }

    let primary = match &update.primary {
        Some(input) => Some(resolve_list_id(session, input)?),
        None => None,
    };
    if let Some(username) = &update.username {
        session.user.update_username(username).await;
    }
    if let Some(id) = &primary {
        session.user.update_primary_list_id(Some(id)).await;
    }
    if let Some(value) = update.auto_invitations {
        session.user.update_auto_handle_invitations(value).await;
    }
    Ok(show(session))
}

fn show(session: &Session) -> String {
    let user = &session.user;
    let mut out = format!("User: {}\n", user.user_id());
    out.push_str(&format!("Username: {}\n", user.username()));
    match user.primary_list_id() {
        Some(id) => out.push_str(&format!("Primary list: {}\n", id)),
        None => out.push_str("Primary list: (none)\n"),
    }
    out.push_str(&format!(
        "Auto-handle invitations: {}\n",
        user.auto_handle_invitations()
    ));
    out
}

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;
