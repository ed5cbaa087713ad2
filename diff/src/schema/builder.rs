//! Builds a [`SchemaNode`] tree from the `parquet` crate's decoded type
//! tree, in a single depth-first pre-order pass.

use parquet::basic::{ConvertedType, LogicalType, Repetition};
use parquet::schema::types::{BasicTypeInfo, Type};
use tracing::warn;

use super::{SchemaKind, SchemaNode};
use crate::DiffResult;

impl SchemaNode {
    /// Converts a decoded parquet message type into a schema tree.
    ///
    /// The root keeps the message name for diagnostics but is always tagged
    /// [`SchemaKind::Root`]. Groups annotated as lists or maps, whether by
    /// logical type or by the deprecated converted type older writers emit,
    /// get the matching kind; an unrecognized annotation falls back to a
    /// plain group rather than failing the build.
    pub fn from_message(message: &Type) -> DiffResult<SchemaNode> {
        let info = message.get_basic_info();
        // The message root usually carries no repetition of its own.
        let repetition = if info.has_repetition() {
            info.repetition()
        } else {
            Repetition::REPEATED
        };
        let mut root = SchemaNode::group(message.name(), SchemaKind::Root, repetition);
        attach_children(&mut root, message)?;
        Ok(root)
    }
}

fn convert(field: &Type) -> DiffResult<SchemaNode> {
    let info = field.get_basic_info();
    match field {
        Type::PrimitiveType { physical_type, .. } => Ok(SchemaNode::primitive(
            field.name(),
            info.repetition(),
            *physical_type,
            info.logical_type(),
        )),
        Type::GroupType { .. } => {
            let kind = group_kind(field.name(), info);
            let mut node = SchemaNode::group(field.name(), kind, info.repetition());
            attach_children(&mut node, field)?;
            Ok(node)
        }
    }
}

fn attach_children(parent: &mut SchemaNode, group: &Type) -> DiffResult<()> {
    for field in group.get_fields() {
        parent.try_add_child(convert(field)?)?;
    }
    Ok(())
}

fn group_kind(name: &str, info: &BasicTypeInfo) -> SchemaKind {
    match info.logical_type() {
        Some(LogicalType::List) => SchemaKind::List,
        Some(LogicalType::Map) => SchemaKind::Map,
        Some(other) => {
            warn!("unrecognized logical type {other:?} on group '{name}', treating as struct");
            SchemaKind::Group
        }
        // Older writers annotate list/map groups with the deprecated
        // converted type only.
        None => match info.converted_type() {
            ConvertedType::LIST => SchemaKind::List,
            ConvertedType::MAP => SchemaKind::Map,
            // MAP_KEY_VALUE marks the synthetic wrapper inside a legacy
            // map, not the map itself.
            _ => SchemaKind::Group,
        },
    }
}
