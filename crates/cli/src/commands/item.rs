// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use sl_core::ItemPatch;

use super::{resolve_item_id, resolve_list_id, App};
use crate::cli::{ItemCommand, ItemFields};
use crate::error::Result;
use crate::session::Session;

pub async fn run(command: ItemCommand, offline: bool) -> Result<()> {
    let mut app = App::open(offline).await?;
    let output = execute(&mut app.session, command).await?;
    print!("{}", output);
    app.finish().await
}

/// Runs an item command and returns what it prints.
pub(crate) async fn execute(session: &mut Session, command: ItemCommand) -> Result<String> {
    match command {
        ItemCommand::Add { list, name, fields } => {
            let list_id = resolve_list_id(session, &list)?;
            let item_id = session.add_item(&list_id, &name).await?;
            let patch = to_patch(None, fields);
            if !patch.is_empty() {
                session.edit_item(&list_id, &item_id, &patch).await?;
            }
            Ok(format!("Added {} to {}: {}\n", item_id, list_id, name.trim()))
        }
        ItemCommand::Check { list, item } => set_checked(session, &list, &item, true).await,
        ItemCommand::Uncheck { list, item } => set_checked(session, &list, &item, false).await,
        ItemCommand::Edit {
            list,
            item,
            name,
            fields,
        } => {
            let list_id = resolve_list_id(session, &list)?;
            let item_id = resolve_item_id(session, &list_id, &item)?;
            session
                .edit_item(&list_id, &item_id, &to_patch(name, fields))
                .await?;
            Ok(format!("Updated {}\n", item_id))
        }
        ItemCommand::Rm { list, item } => {
            let list_id = resolve_list_id(session, &list)?;
            let item_id = resolve_item_id(session, &list_id, &item)?;
            session.delete_item(&list_id, &item_id).await?;
            Ok(format!("Removed {} from {}\n", item_id, list_id))
        }
    }
}

async fn set_checked(
    session: &mut Session,
    list: &str,
    item: &str,
    checked: bool,
) -> Result<String> {
    let list_id = resolve_list_id(session, list)?;
    let item_id = resolve_item_id(session, &list_id, item)?;
    session.set_checked(&list_id, &item_id, checked).await?;
    let verb = if checked { "Checked" } else { "Unchecked" };
    Ok(format!("{} {}\n", verb, item_id))
}

fn to_patch(name: Option<String>, fields: ItemFields) -> ItemPatch {
    ItemPatch {
        name,
        price: fields.price,
        vendor: fields.vendor,
        quantity: fields.quantity,
        notes: fields.notes,
        checked: None,
    }
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod tests;
