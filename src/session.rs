//! Session variables handed to the engine by the surrounding application.
//!
//! The engine never looks up the current user on its own; the shell resolves
//! authentication and passes the result in as a [`Session`]:
//!
//! ```json
//! { "x-merchant-id": "merchant-42" }
//! ```

use std::collections::HashMap;

use crate::error::{EngineError, Result};

pub const MERCHANT_ID: &str = "x-merchant-id";

#[derive(Debug, Clone, Default)]
pub struct Session {
    variables: HashMap<String, String>,
}

impl Session {
    /// Create an empty, unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session owned by `merchant_id`.
    pub fn for_merchant(merchant_id: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.set(MERCHANT_ID, merchant_id);
        session
    }

    /// Create a session from a map of variables.
    pub fn from_map(variables: HashMap<String, String>) -> Self {
        Self { variables }
    }

    /// The owning merchant, if authenticated. Blank ids count as absent.
    pub fn merchant_id(&self) -> Option<&str> {
        self.get(MERCHANT_ID).filter(|id| !id.trim().is_empty())
    }

    /// The owning merchant, or `NotAuthenticated`.
    pub fn require_merchant(&self) -> Result<&str> {
        self.merchant_id().ok_or(EngineError::NotAuthenticated)
    }

    /// Get a session variable by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|v| v.as_str())
    }

    /// Set a session variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }
}
