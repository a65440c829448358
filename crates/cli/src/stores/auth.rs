// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

/// Whether the client holds a signed-in backend session.
#[derive(Debug, Default, Clone)]
pub struct AuthStore {
    logged_in: bool,
}

impl AuthStore {
    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn set_logged_in(&mut self, status: bool) {
        self.logged_in = status;
    }
}
