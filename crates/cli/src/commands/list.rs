// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::{resolve_list_id, App};
use crate::cli::ListCommand;
use crate::display::{format_list_detail, format_list_line};
use crate::error::{Error, Result};
use crate::session::Session;

pub async fn run(command: ListCommand, offline: bool) -> Result<()> {
    let mut app = App::open(offline).await?;
    let output = execute(&mut app.session, command).await?;
    print!("{}", output);
    app.finish().await
}

/// Runs a list command and returns what it prints.
pub(crate) async fn execute(session: &mut Session, command: ListCommand) -> Result<String> {
    match command {
        ListCommand::New { name } => {
            let id = session.create_list(&name).await?;
            Ok(format!("Created list {}: {}\n", id, name))
        }
        ListCommand::Ls { all } => Ok(ls(session, all)),
        ListCommand::Show { list } => {
            let id = resolve_list_id(session, &list)?;
            let list = session
                .lists
                .get_list(&id)
                .ok_or_else(|| Error::ListNotFound(id.clone()))?;
            Ok(format_list_detail(list, session.user_id()))
        }
        ListCommand::Rename { list, name } => {
            let id = resolve_list_id(session, &list)?;
            session.rename_list(&id, &name).await?;
            Ok(format!("Renamed {} to {}\n", id, name))
        }
        ListCommand::Archive { list } => {
            let id = resolve_list_id(session, &list)?;
            session.set_archived(&id, true).await?;
            Ok(format!("Archived {}\n", id))
        }
        ListCommand::Unarchive { list } => {
            let id = resolve_list_id(session, &list)?;
            session.set_archived(&id, false).await?;
            Ok(format!("Unarchived {}\n", id))
        }
        ListCommand::Rm { list } => {
            let id = resolve_list_id(session, &list)?;
            session.delete_list(&id).await?;
            Ok(format!("Deleted list {}\n", id))
        }
    }
}

/// Own lists first, then lists shared with this account.
fn ls(session: &Session, all: bool) -> String {
    let user_id = session.user_id();
    let primary = session.user.primary_list_id();
    let mut hidden = 0;
    let mut out = String::new();

    let lists = session
        .lists
        .my_lists()
        .into_iter()
        .chain(session.lists.shared_lists());
    for list in lists {
        if list.archived && !all {
            hidden += 1;
            continue;
        }
        out.push_str(&format_list_line(list, user_id, primary));
        out.push('\n');
    }

    if out.is_empty() {
        out.push_str("No lists\n");
    }
    if hidden > 0 {
        out.push_str(&format!("({} archived, use --all to show)\n", hidden));
    }
    out
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
