// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Sharing permissions granted between accounts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Kind of access a permission allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionType {
    Read,
    Insert,
    Update,
    Delete,
}

impl PermissionType {
    /// All permission types, the default for a share.
    pub const ALL: [PermissionType; 4] = [
        PermissionType::Read,
        PermissionType::Insert,
        PermissionType::Update,
        PermissionType::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionType::Read => "read",
            PermissionType::Insert => "insert",
            PermissionType::Update => "update",
            PermissionType::Delete => "delete",
        }
    }
}

impl fmt::Display for PermissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PermissionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "read" => Ok(PermissionType::Read),
            "insert" => Ok(PermissionType::Insert),
            "update" => Ok(PermissionType::Update),
            "delete" => Ok(PermissionType::Delete),
            _ => Err(Error::InvalidInput(format!(
                "invalid permission type: '{s}'\n  hint: valid types are: read, insert, update, delete"
            ))),
        }
    }
}

/// Restricts a permission to a single row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub row_id: String,
}

/// What a grant gives access to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub table_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(default)]
    pub types: Vec<PermissionType>,
}

impl Permission {
    /// Full access to one row of a table.
    pub fn row(table_name: &str, row_id: &str) -> Self {
        Permission {
            table_name: table_name.to_string(),
            condition: Some(Condition {
                row_id: row_id.to_string(),
            }),
            types: PermissionType::ALL.to_vec(),
        }
    }

    /// Full access to a whole table.
    pub fn table(table_name: &str) -> Self {
        Permission {
            table_name: table_name.to_string(),
            condition: None,
            types: PermissionType::ALL.to_vec(),
        }
    }

    pub fn allows(&self, kind: PermissionType) -> bool {
        self.types.contains(&kind)
    }

    /// Returns true if the permission covers `row_id` (any row when unscoped).
    pub fn covers_row(&self, row_id: &str) -> bool {
        match &self.condition {
            Some(condition) => condition.row_id == row_id,
            None => true,
        }
    }
}

/// A record saying `host_id` shared something with `guest_id`.
///
/// Read-only from the client's perspective: the backend creates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantedPermission {
    pub id: String,
    pub host_id: String,
    pub guest_id: String,
    pub permission: Permission,
}

impl GrantedPermission {
    pub fn table_name(&self) -> &str {
        &self.permission.table_name
    }

    /// The single row this grant is scoped to, if any.
    pub fn row_id(&self) -> Option<&str> {
        self.permission
            .condition
            .as_ref()
            .map(|condition| condition.row_id.as_str())
    }

    pub fn applies_to(&self, table_name: &str) -> bool {
        self.permission.table_name == table_name
    }
}

#[cfg(test)]
#[path = "permission_tests.rs"]
mod tests;
