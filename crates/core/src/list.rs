// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shopping list documents.
//!
//! A [`List`] is one document in a host's `lists` table. Its items are
//! embedded and have no lifecycle of their own: every item mutation is a
//! full replace of the parent list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::merge::Timestamped;
use crate::mirror::Document;

/// Name of the table holding list documents.
pub const LISTS_TABLE: &str = "lists";

fn is_false(value: &bool) -> bool {
    !*value
}

/// A single entry on a shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub checked: bool,
}

impl ListItem {
    /// Creates an unchecked item with zero price and quantity.
    pub fn new(id: String, name: String) -> Self {
        ListItem {
            id,
            name,
            price: 0.0,
            vendor: String::new(),
            quantity: 0.0,
            notes: String::new(),
            checked: false,
        }
    }
}

/// Field overrides for editing an item. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub vendor: Option<String>,
    pub quantity: Option<f64>,
    pub notes: Option<String>,
    pub checked: Option<bool>,
}

impl ItemPatch {
    /// Returns true if the patch sets no field.
    pub fn is_empty(&self) -> bool {
        *self == ItemPatch::default()
    }

    /// Applies the patch, returning true if any field changed.
    pub fn apply(&self, item: &mut ListItem) -> bool {
        let before = item.clone();
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(vendor) = &self.vendor {
            item.vendor = vendor.clone();
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(notes) = &self.notes {
            item.notes = notes.clone();
        }
        if let Some(checked) = self.checked {
            item.checked = checked;
        }
        *item != before
    }
}

/// A shopping list owned by exactly one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<ListItem>,
    #[serde(default)]
    pub archived: bool,
    /// Account that hosts the list document.
    #[serde(alias = "hostId")]
    pub owner: String,
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub user_ids_with_access: Vec<String>,
    /// Set while a local change has not reached the backend.
    #[serde(default, skip_serializing_if = "is_false")]
    pub needs_sync: bool,
}

impl List {
    /// Creates an empty, unarchived list.
    pub fn new(id: String, name: String, owner: String, now: DateTime<Utc>) -> Self {
        List {
            id,
            name,
            items: Vec::new(),
            archived: false,
            owner,
            last_updated: now,
            user_ids_with_access: Vec::new(),
            needs_sync: false,
        }
    }

    /// Decodes a list from a backend document.
    pub fn from_document(doc: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(doc)?)
    }

    /// Encodes the list as a backend document. Local-only state is dropped.
    pub fn to_document(&self) -> Result<serde_json::Value> {
        let mut remote = self.clone();
        remote.needs_sync = false;
        Ok(serde_json::to_value(&remote)?)
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner == user_id
    }

    /// Stamps a new modification time.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_updated = now;
    }

    pub fn item(&self, item_id: &str) -> Option<&ListItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut ListItem> {
        self.items.iter_mut().find(|item| item.id == item_id)
    }

    pub fn has_item(&self, item_id: &str) -> bool {
        self.item(item_id).is_some()
    }

    /// Replaces the item with the same id in place. Returns false if absent.
    pub fn replace_item(&mut self, updated: ListItem) -> bool {
        match self.item_mut(&updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    /// Removes the item with the given id. Returns false if absent.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != item_id);
        self.items.len() != before
    }

    /// Checked items, most recently added first.
    pub fn checked_items(&self) -> Vec<&ListItem> {
        self.items.iter().rev().filter(|item| item.checked).collect()
    }

    /// Unchecked items, most recently added first.
    pub fn unchecked_items(&self) -> Vec<&ListItem> {
        self.items.iter().rev().filter(|item| !item.checked).collect()
    }
}

impl Document for List {
    fn id(&self) -> &str {
        &self.id
    }

    /// Unpushed local changes yield only to a strictly newer remote copy.
    fn keeps_over(&self, incoming: &Self) -> bool {
        self.needs_sync && self.last_updated >= incoming.last_updated
    }
}

impl Timestamped for List {
    fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
