//! Catalog builders: tablespaces, roles, schemas and grants, in
//! dependency order.

use tracing::debug;

use crate::diff::{CatalogDiff, DiffNode};
use crate::error::{GenerateError, Result};
use crate::kind::StatementKind;
use crate::model::{Catalog, ObjectKind, SchemaObject};
use crate::registry::GenContext;
use crate::stmt::Statement;

use super::{build_diff_batch, expect_catalog, StatementBuilder};

/// The fixed creation order of catalog-level categories. Storage and
/// principals exist before the schemas that use them; grants come
/// last because they reference both roles and schema objects.
pub const CATALOG_CREATE_ORDER: &[ObjectKind] = &[
    ObjectKind::Tablespace,
    ObjectKind::Role,
    ObjectKind::Schema,
    ObjectKind::Privilege,
];

fn members(catalog: &Catalog, category: ObjectKind) -> Vec<SchemaObject> {
    match category {
        ObjectKind::Tablespace => catalog.tablespaces.iter().cloned().map(Into::into).collect(),
        ObjectKind::Role => catalog.roles.iter().cloned().map(Into::into).collect(),
        ObjectKind::Schema => catalog.schemas.iter().cloned().map(Into::into).collect(),
        ObjectKind::Privilege => catalog.privileges.iter().cloned().map(Into::into).collect(),
        _ => Vec::new(),
    }
}

fn diff_members(diff: &CatalogDiff, category: ObjectKind) -> Vec<DiffNode> {
    match category {
        ObjectKind::Tablespace => diff
            .tablespaces
            .iter()
            .cloned()
            .map(DiffNode::Tablespace)
            .collect(),
        ObjectKind::Role => diff.roles.iter().cloned().map(DiffNode::Role).collect(),
        ObjectKind::Schema => diff.schemas.iter().cloned().map(DiffNode::Schema).collect(),
        ObjectKind::Privilege => diff
            .privileges
            .iter()
            .cloned()
            .map(DiffNode::Privilege)
            .collect(),
        _ => Vec::new(),
    }
}

/// Builds every catalog category in creation order.
pub struct CreateCatalogBuilder;

impl StatementBuilder for CreateCatalogBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Create
    }

    fn build(&self, ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        let catalog = expect_catalog(self.kind(), object)?;
        debug!(catalog = %catalog.name, "sequencing catalog creation");
        let mut out = Vec::new();
        for &category in CATALOG_CREATE_ORDER {
            let batch = members(catalog, category);
            if batch.is_empty() {
                continue;
            }
            let builder = ctx.registry.resolve(category, StatementKind::Create);
            out.extend(builder.build_batch(ctx, &batch)?);
        }
        Ok(out)
    }
}

/// The catalog alter sequencer: every category in creation order,
/// each batched Deleted-then-Added-then-Modified.
pub struct AlterCatalogBuilder;

impl StatementBuilder for AlterCatalogBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Alter
    }

    fn build(&self, _ctx: &GenContext<'_>, object: &SchemaObject) -> Result<Vec<Statement>> {
        expect_catalog(self.kind(), object)?;
        Ok(Vec::new())
    }

    fn build_diff(&self, ctx: &GenContext<'_>, node: &DiffNode) -> Result<Vec<Statement>> {
        let DiffNode::Catalog(diff) = node else {
            return Err(GenerateError::UnsupportedObject {
                kind: self.kind(),
                expected: ObjectKind::Catalog,
                actual: node.object_kind(),
            });
        };
        let mut out = Vec::new();
        for &category in CATALOG_CREATE_ORDER {
            let nodes = diff_members(diff, category);
            if nodes.is_empty() {
                continue;
            }
            out.extend(build_diff_batch(ctx, &nodes)?);
        }
        Ok(out)
    }
}
