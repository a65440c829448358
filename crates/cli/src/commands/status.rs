// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::{App, Mode};
use crate::error::Result;
use crate::session::Session;

pub async fn run(offline: bool) -> Result<()> {
    let app = App::open(offline).await?;
    let output = render(&app.session, app.mode(), app.config.remote_url());
    print!("{}", output);
    app.finish().await
}

pub(crate) fn render(session: &Session, mode: Mode, remote: Option<&str>) -> String {
    let lists = &session.lists;
    let mut out = format!("User: {}\n", session.user_id());
    out.push_str(&format!("Mode: {}\n", mode.as_str()));
    if let Some(url) = remote {
        out.push_str(&format!("Remote: {}\n", url));
    }
    out.push_str(&format!(
        "Lists: {} own, {} shared with you\n",
        lists.my_lists().len(),
        lists.shared_lists().len()
    ));

    let unsynced = lists.unsynced_lists();
    if unsynced.is_empty() {
        out.push_str("Unsynced: none\n");
    } else {
        let ids: Vec<&str> = unsynced.iter().map(|l| l.id.as_str()).collect();
        out.push_str(&format!("Unsynced: {}\n", ids.join(", ")));
    }

    if let Some(id) = session.user.primary_list_id() {
        match lists.get_list(id) {
            Some(list) => out.push_str(&format!("Primary: {} ({})\n", list.name, id)),
            None => out.push_str(&format!("Primary: {}\n", id)),
        }
    }
    out
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
