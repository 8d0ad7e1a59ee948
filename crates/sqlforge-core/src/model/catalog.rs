//! Catalog-level objects: the catalog itself, tablespaces, roles and
//! privilege grants.

use serde::{Deserialize, Serialize};

use super::schema::Schema;

/// A tablespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tablespace {
    /// Tablespace name.
    pub name: String,
    /// Storage location, if declared.
    pub location: Option<String>,
}

impl Tablespace {
    /// Creates a tablespace.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: None,
        }
    }

    /// Sets the storage location.
    #[must_use]
    pub fn at_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// A database role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role name.
    pub name: String,
    /// Whether the role may log in.
    pub login: bool,
}

impl Role {
    /// Creates a non-login role.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            login: false,
        }
    }

    /// Allows the role to log in.
    #[must_use]
    pub const fn with_login(mut self) -> Self {
        self.login = true;
        self
    }
}

/// A privilege grant: actions on an object, granted to a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Privilege {
    /// Granted actions (e.g. `SELECT`, `UPDATE`, `ALL`).
    pub actions: Vec<String>,
    /// The object the actions apply to, emitted verbatim
    /// (e.g. `app.users`, `SCHEMA app`).
    pub on_object: String,
    /// The grantee role.
    pub grantee: String,
}

impl Privilege {
    /// Creates a grant.
    #[must_use]
    pub fn new(actions: &[&str], on_object: impl Into<String>, grantee: impl Into<String>) -> Self {
        Self {
            actions: actions.iter().map(|&a| String::from(a)).collect(),
            on_object: on_object.into(),
            grantee: grantee.into(),
        }
    }
}

/// A catalog: the outermost container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Catalog name.
    pub name: String,
    /// Tablespaces.
    pub tablespaces: Vec<Tablespace>,
    /// Roles.
    pub roles: Vec<Role>,
    /// Schemas.
    pub schemas: Vec<Schema>,
    /// Privilege grants.
    pub privileges: Vec<Privilege>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tablespaces: Vec::new(),
            roles: Vec::new(),
            schemas: Vec::new(),
            privileges: Vec::new(),
        }
    }

    /// Adds a schema.
    #[must_use]
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schemas.push(schema);
        self
    }

    /// Adds a tablespace.
    #[must_use]
    pub fn tablespace(mut self, tablespace: Tablespace) -> Self {
        self.tablespaces.push(tablespace);
        self
    }

    /// Adds a role.
    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.roles.push(role);
        self
    }

    /// Adds a privilege grant.
    #[must_use]
    pub fn privilege(mut self, privilege: Privilege) -> Self {
        self.privileges.push(privilege);
        self
    }
}
