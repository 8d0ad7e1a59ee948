//! # sqlforge-core
//!
//! A multi-dialect SQL generation engine: schema objects and
//! difference trees go in, ordered lists of dialect-correct DDL/DML
//! statements come out.
//!
//! The same abstract model yields different SQL depending on the
//! selected [`Dialect`]; the same difference tree yields an ALTER
//! sequence a live database will accept without violating its own
//! constraints mid-script.
//!
//! ## Generating a schema from scratch
//!
//! ```rust
//! use sqlforge_core::dialect::PostgresDialect;
//! use sqlforge_core::kind::StatementKind;
//! use sqlforge_core::model::{Column, Constraint, DataType, SchemaObject, Table};
//! use sqlforge_core::options::Options;
//! use sqlforge_core::registry::{BuilderRegistry, GenContext};
//!
//! let registry = BuilderRegistry::with_defaults();
//! let dialect = PostgresDialect::new();
//! let ctx = GenContext::new(&registry, &dialect, Options::new());
//!
//! let users = Table::new("users")
//!     .column(Column::new("id", DataType::Bigint).identity())
//!     .column(Column::new("email", DataType::Varchar(Some(255))).not_null())
//!     .constraint(Constraint::primary_key("pk_users", &["id"]));
//!
//! let stmts = ctx
//!     .build(StatementKind::Create, &SchemaObject::Table(users))
//!     .unwrap();
//! assert!(stmts[0].text().starts_with("CREATE TABLE users"));
//! ```
//!
//! ## Altering towards a target
//!
//! ```rust
//! use sqlforge_core::dialect::PostgresDialect;
//! use sqlforge_core::diff::{diff_tables, DiffNode};
//! use sqlforge_core::model::{Column, DataType, Table};
//! use sqlforge_core::options::Options;
//! use sqlforge_core::registry::{BuilderRegistry, GenContext};
//!
//! let registry = BuilderRegistry::with_defaults();
//! let dialect = PostgresDialect::new();
//! let ctx = GenContext::new(&registry, &dialect, Options::new());
//!
//! let original = Table::new("t").column(Column::new("id", DataType::Integer));
//! let mut target = original.clone();
//! target.columns[0].nullable = false;
//!
//! let diff = diff_tables(&original, &target).unwrap();
//! let stmts = ctx.build_diff(&DiffNode::Table(diff)).unwrap();
//! assert_eq!(
//!     stmts[0].text(),
//!     "ALTER TABLE t ALTER COLUMN id SET NOT NULL"
//! );
//! ```

pub mod dialect;
pub mod diff;
mod error;
pub mod factory;
pub mod kind;
pub mod model;
pub mod options;
pub mod registry;
mod stmt;
pub mod writer;

pub use dialect::Dialect;
pub use error::{GenerateError, Result};
pub use factory::StatementBuilder;
pub use kind::{SqlCategory, StatementKind, TableOrder};
pub use options::{LockMode, Options, QuotePolicy};
pub use registry::{BuilderRegistry, GenContext};
pub use stmt::{script, Statement};
