//! Storage schema for users.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{DocumentSchema, SchemaError};
use crate::model::{Role, User};
use crate::store::DocumentId;

/// Flat storage record for one user.
///
/// Roles are stored as the same tagged set the model uses; there is no
/// per-role subrecord. Self-contained, so the conversion context is `()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSchema {
    /// Display name.
    pub name: String,
    /// Granted role capabilities.
    pub roles: BTreeSet<Role>,
}

impl DocumentSchema for UserSchema {
    type Model = User;
    type Context = ();

    const COLLECTION: &'static str = "users";

    fn from_model(_ctx: &(), model: &User) -> Self {
        Self {
            name: model.name.clone(),
            roles: model.roles.clone(),
        }
    }

    fn to_model(&self, id: DocumentId) -> Result<User, SchemaError> {
        Ok(User {
            id,
            name: self.name.clone(),
            roles: self.roles.clone(),
        })
    }
}
