// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use sl_core::{GrantedPermission, List, ListItem};

/// Render a quantity or price without a trailing `.0`.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// Format a single item line.
///
/// Optional fields are shown only when set, e.g.
/// `[x] item-1a2b3c4d  Milk  x2  @Corner shop  $1.5`
pub fn format_item_line(item: &ListItem) -> String {
    let mut line = format!(
        "[{}] {}  {}",
        if item.checked { "x" } else { " " },
        item.id,
        item.name
    );
    if item.quantity > 0.0 {
        line.push_str(&format!("  x{}", format_number(item.quantity)));
    }
    if !item.vendor.is_empty() {
        line.push_str(&format!("  @{}", item.vendor));
    }
    if item.price > 0.0 {
        line.push_str(&format!("  ${}", format_number(item.price)));
    }
    line
}

/// Format a list for `list ls`.
///
/// The primary list is marked with `*`. Tags follow the counts:
/// archived, the sharing host for lists owned by someone else, and
/// unsynced for lists with local changes.
pub fn format_list_line(list: &List, user_id: &str, primary: Option<&str>) -> String {
    let marker = if primary == Some(list.id.as_str()) {
        "*"
    } else {
        " "
    };
    let done = list.items.iter().filter(|i| i.checked).count();
    let mut line = format!(
        "{} {}  {}  ({}/{} done)",
        marker,
        list.id,
        list.name,
        done,
        list.items.len()
    );
    if list.archived {
        line.push_str(" [archived]");
    }
    if !list.is_owned_by(user_id) {
        line.push_str(&format!(" [shared by {}]", list.owner));
    }
    if list.needs_sync {
        line.push_str(" [unsynced]");
    }
    line
}

/// Format a list with its items for `list show`.
///
/// Unchecked items come first, then checked ones; both newest first.
pub fn format_list_detail(list: &List, user_id: &str) -> String {
    let mut out = format!("{} ({})\n", list.name, list.id);
    if list.is_owned_by(user_id) {
        out.push_str("Owner: you\n");
    } else {
        out.push_str(&format!("Owner: {}\n", list.owner));
    }
    if !list.user_ids_with_access.is_empty() {
        out.push_str(&format!(
            "Shared with: {}\n",
            list.user_ids_with_access.join(", ")
        ));
    }
    out.push_str(&format!("Updated: {}\n", list.last_updated.to_rfc3339()));
    if list.archived {
        out.push_str("Archived\n");
    }

    if list.items.is_empty() {
        out.push_str("\n(no items)\n");
        return out;
    }

    let unchecked = list.unchecked_items();
    if !unchecked.is_empty() {
        out.push_str("\nTo buy:\n");
        for item in unchecked {
            push_item(&mut out, item);
        }
    }
    let checked = list.checked_items();
    if !checked.is_empty() {
        out.push_str("\nDone:\n");
        for item in checked {
            push_item(&mut out, item);
        }
    }
    out
}

fn push_item(out: &mut String, item: &ListItem) {
    out.push_str("  ");
    out.push_str(&format_item_line(item));
    out.push('\n');
    if !item.notes.is_empty() {
        out.push_str(&format!("      {}\n", item.notes));
    }
}

/// Format a grant made to this account.
pub fn format_grant(grant: &GrantedPermission) -> String {
    match grant.row_id() {
        Some(row_id) => format!(
            "{}  {} shared {}/{}",
            grant.id,
            grant.host_id,
            grant.table_name(),
            row_id
        ),
        None => format!(
            "{}  {} shared all of {}",
            grant.id,
            grant.host_id,
            grant.table_name()
        ),
    }
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
