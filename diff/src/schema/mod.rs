//! In-memory model of a parquet schema: a rooted, ordered tree of named,
//! typed nodes, plus [`NodePath`] for addressing positions inside it.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};

use parquet::basic::{LogicalType, Repetition, TimeUnit, Type as PhysicalType};
use strum::Display as StrumDisplay;

use crate::{DiffResult, Error};

mod builder;
pub mod diff;

/// The kind of a [`SchemaNode`].
///
/// Exactly one of the group-like kinds (`Root`, `Group`, `List`, `Map`) may
/// own children; `Primitive` never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum SchemaKind {
    /// Root of a schema. Encapsulates the entire structure.
    Root,
    /// A nested record with no special logical meaning. Referred to as a
    /// struct in engines such as Spark or Hive.
    #[strum(serialize = "struct")]
    Group,
    /// A group logically representing a repeated single-valued sequence.
    List,
    /// A group logically representing key/value pairs.
    Map,
    /// A leaf carrying a physical storage type. Never has children.
    Primitive,
}

/// The physical storage type of a primitive leaf together with its optional
/// logical annotation, e.g. `string (byte_array)` or plain `int32`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveSignature {
    physical: PhysicalType,
    logical: Option<LogicalType>,
}

impl PrimitiveSignature {
    pub fn physical(&self) -> PhysicalType {
        self.physical
    }

    pub fn logical(&self) -> Option<&LogicalType> {
        self.logical.as_ref()
    }
}

impl fmt::Display for PrimitiveSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let physical = self.physical.to_string().to_lowercase();
        match &self.logical {
            Some(logical) => write!(f, "{} ({physical})", logical_label(logical)),
            None => f.write_str(&physical),
        }
    }
}

/// Compact rendering of a logical annotation: parameterized variants get
/// their parameters inlined, e.g. `decimal(10,2)` or `timestamp(micros,utc)`;
/// unit variants render as their lowercased name, e.g. `string`.
fn logical_label(logical: &LogicalType) -> String {
    match logical {
        LogicalType::Decimal { scale, precision } => format!("decimal({precision},{scale})"),
        LogicalType::Integer {
            bit_width,
            is_signed,
        } => {
            if *is_signed {
                format!("int({bit_width})")
            } else {
                format!("uint({bit_width})")
            }
        }
        LogicalType::Timestamp {
            is_adjusted_to_u_t_c,
            unit,
        } => format!(
            "timestamp({},{})",
            time_unit_label(unit),
            zone_label(*is_adjusted_to_u_t_c)
        ),
        LogicalType::Time {
            is_adjusted_to_u_t_c,
            unit,
        } => format!(
            "time({},{})",
            time_unit_label(unit),
            zone_label(*is_adjusted_to_u_t_c)
        ),
        other => format!("{other:?}").to_lowercase(),
    }
}

fn time_unit_label(unit: &TimeUnit) -> &'static str {
    match unit {
        TimeUnit::MILLIS(_) => "millis",
        TimeUnit::MICROS(_) => "micros",
        TimeUnit::NANOS(_) => "nanos",
    }
}

fn zone_label(is_adjusted_to_utc: bool) -> &'static str {
    if is_adjusted_to_utc {
        "utc"
    } else {
        "local"
    }
}

/// A node in a schema tree: either a primitive leaf or a group-like node
/// owning an ordered child list.
///
/// Trees are built once from a decoded parquet type tree (see
/// [`SchemaNode::from_message`]) and immutable afterwards. Each node is
/// owned exclusively by its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    name: String,
    kind: SchemaKind,
    repetition: Repetition,
    physical_type: Option<PhysicalType>,
    logical_type: Option<LogicalType>,
    children: Vec<SchemaNode>,
}

impl SchemaNode {
    /// Creates a group-like node (root, struct, list, or map) with no
    /// children attached yet.
    pub fn group(name: impl Into<String>, kind: SchemaKind, repetition: Repetition) -> Self {
        Self {
            name: name.into(),
            kind,
            repetition,
            physical_type: None,
            logical_type: None,
            children: Vec::new(),
        }
    }

    /// Creates a primitive leaf node.
    pub fn primitive(
        name: impl Into<String>,
        repetition: Repetition,
        physical_type: PhysicalType,
        logical_type: Option<LogicalType>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: SchemaKind::Primitive,
            repetition,
            physical_type: Some(physical_type),
            logical_type,
            children: Vec::new(),
        }
    }

    /// Appends `child` to this node's child list.
    ///
    /// Fails with [`Error::PrimitiveWithChildren`] when `self` is a
    /// primitive leaf.
    pub fn try_add_child(&mut self, child: SchemaNode) -> DiffResult<()> {
        if self.kind == SchemaKind::Primitive {
            return Err(Error::PrimitiveWithChildren(self.name.clone()));
        }
        self.children.push(child);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    pub fn repetition(&self) -> Repetition {
        self.repetition
    }

    /// Ordered child nodes. Empty for primitives.
    pub fn children(&self) -> &[SchemaNode] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// The physical/logical type pair of this node, or `None` for
    /// group-like nodes.
    pub fn primitive_signature(&self) -> Option<PrimitiveSignature> {
        let physical = self.physical_type?;
        Some(PrimitiveSignature {
            physical,
            logical: self.logical_type.clone(),
        })
    }

    /// Name-keyed lookup over direct children, rebuilt on demand.
    ///
    /// Sibling names are expected to be distinct; with duplicates the last
    /// occurrence wins.
    pub(crate) fn children_by_name(&self) -> HashMap<&str, &SchemaNode> {
        self.children
            .iter()
            .map(|child| (child.name.as_str(), child))
            .collect()
    }

    /// Writes the schema as an indented tree:
    ///
    /// ```text
    /// spark_schema
    ///   |-- id: int32
    ///   |-- address: struct
    ///     |-- city: string (byte_array)
    /// ```
    pub fn write_tree<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.write_node(out, 0)
    }

    fn write_node<W: Write>(&self, out: &mut W, indent: usize) -> io::Result<()> {
        if indent == 0 {
            writeln!(out, "{}", self.name)?;
        } else {
            let label = match self.kind {
                SchemaKind::Primitive => self
                    .primitive_signature()
                    .map(|signature| signature.to_string())
                    .unwrap_or_default(),
                kind => kind.to_string(),
            };
            writeln!(out, "{}|-- {}: {label}", " ".repeat(indent), self.name)?;
        }
        for child in &self.children {
            child.write_node(out, indent + 2)?;
        }
        Ok(())
    }
}

/// A path from a schema root to a node, as ordered name components.
///
/// Every reported difference is keyed by one of these. Appending a component
/// returns a new path and never mutates the receiver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<String>);

impl NodePath {
    pub fn new(components: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(components.into_iter().map(Into::into).collect())
    }

    /// Returns a new path with `component` appended.
    pub fn child(&self, component: &str) -> NodePath {
        let mut components = self.0.clone();
        components.push(component.to_string());
        NodePath(components)
    }

    pub fn components(&self) -> &[String] {
        &self.0
    }

    /// Joins the components with `delimiter`, with no leading or trailing
    /// delimiter. The empty path renders as the empty string.
    pub fn join(&self, delimiter: &str) -> String {
        self.0.join(delimiter)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_path_child_does_not_mutate_parent() {
        let path = NodePath::new(["root", "address"]);
        let extended = path.child("city");
        assert_eq!(path.components(), ["root", "address"]);
        assert_eq!(extended.components(), ["root", "address", "city"]);
    }

    #[test]
    fn node_path_rendering() {
        let path = NodePath::new(["root", "address", "city"]);
        assert_eq!(path.to_string(), "root.address.city");
        assert_eq!(path.join("||"), "root||address||city");
        assert_eq!(NodePath::default().join("."), "");
    }

    #[test]
    fn primitive_rejects_children() {
        let mut id = SchemaNode::primitive("id", Repetition::REQUIRED, PhysicalType::INT32, None);
        let child = SchemaNode::primitive("x", Repetition::REQUIRED, PhysicalType::INT32, None);
        let err = id.try_add_child(child).unwrap_err();
        assert!(matches!(err, Error::PrimitiveWithChildren(name) if name == "id"));
    }

    #[test]
    fn group_accepts_children() -> DiffResult<()> {
        let mut root = SchemaNode::group("root", SchemaKind::Root, Repetition::REPEATED);
        root.try_add_child(SchemaNode::primitive(
            "id",
            Repetition::REQUIRED,
            PhysicalType::INT32,
            None,
        ))?;
        assert!(root.has_children());
        assert_eq!(root.children()[0].name(), "id");
        Ok(())
    }

    #[test]
    fn children_lookup_last_duplicate_wins() -> DiffResult<()> {
        let mut root = SchemaNode::group("root", SchemaKind::Root, Repetition::REPEATED);
        root.try_add_child(SchemaNode::primitive(
            "id",
            Repetition::REQUIRED,
            PhysicalType::INT32,
            None,
        ))?;
        root.try_add_child(SchemaNode::primitive(
            "id",
            Repetition::REQUIRED,
            PhysicalType::INT64,
            None,
        ))?;
        let lookup = root.children_by_name();
        assert_eq!(lookup.len(), 1);
        let signature = lookup["id"].primitive_signature().unwrap();
        assert_eq!(signature.physical(), PhysicalType::INT64);
        Ok(())
    }

    #[test]
    fn primitive_signature_rendering() {
        let id = SchemaNode::primitive("id", Repetition::REQUIRED, PhysicalType::INT32, None);
        assert_eq!(id.primitive_signature().unwrap().to_string(), "int32");

        let name = SchemaNode::primitive(
            "name",
            Repetition::OPTIONAL,
            PhysicalType::BYTE_ARRAY,
            Some(LogicalType::String),
        );
        assert_eq!(
            name.primitive_signature().unwrap().to_string(),
            "string (byte_array)"
        );

        let root = SchemaNode::group("root", SchemaKind::Root, Repetition::REPEATED);
        assert!(root.primitive_signature().is_none());
    }

    #[test]
    fn parameterized_logical_annotations_render_compactly() {
        let price = SchemaNode::primitive(
            "price",
            Repetition::REQUIRED,
            PhysicalType::FIXED_LEN_BYTE_ARRAY,
            Some(LogicalType::Decimal {
                scale: 2,
                precision: 10,
            }),
        );
        assert_eq!(
            price.primitive_signature().unwrap().to_string(),
            "decimal(10,2) (fixed_len_byte_array)"
        );

        let updated_at = SchemaNode::primitive(
            "updated_at",
            Repetition::OPTIONAL,
            PhysicalType::INT64,
            Some(LogicalType::Timestamp {
                is_adjusted_to_u_t_c: true,
                unit: TimeUnit::MICROS(parquet::format::MicroSeconds {}),
            }),
        );
        assert_eq!(
            updated_at.primitive_signature().unwrap().to_string(),
            "timestamp(micros,utc) (int64)"
        );

        let wall_time = SchemaNode::primitive(
            "wall_time",
            Repetition::OPTIONAL,
            PhysicalType::INT32,
            Some(LogicalType::Time {
                is_adjusted_to_u_t_c: false,
                unit: TimeUnit::MILLIS(parquet::format::MilliSeconds {}),
            }),
        );
        assert_eq!(
            wall_time.primitive_signature().unwrap().to_string(),
            "time(millis,local) (int32)"
        );

        let count = SchemaNode::primitive(
            "count",
            Repetition::REQUIRED,
            PhysicalType::INT32,
            Some(LogicalType::Integer {
                bit_width: 16,
                is_signed: false,
            }),
        );
        assert_eq!(
            count.primitive_signature().unwrap().to_string(),
            "uint(16) (int32)"
        );
    }

    #[test]
    fn kind_display() {
        assert_eq!(SchemaKind::Root.to_string(), "root");
        assert_eq!(SchemaKind::Group.to_string(), "struct");
        assert_eq!(SchemaKind::List.to_string(), "list");
        assert_eq!(SchemaKind::Map.to_string(), "map");
        assert_eq!(SchemaKind::Primitive.to_string(), "primitive");
    }

    #[test]
    fn write_tree_renders_nested_nodes() -> DiffResult<()> {
        let mut address = SchemaNode::group("address", SchemaKind::Group, Repetition::OPTIONAL);
        address.try_add_child(SchemaNode::primitive(
            "city",
            Repetition::OPTIONAL,
            PhysicalType::BYTE_ARRAY,
            Some(LogicalType::String),
        ))?;
        let mut root = SchemaNode::group("spark_schema", SchemaKind::Root, Repetition::REPEATED);
        root.try_add_child(SchemaNode::primitive(
            "id",
            Repetition::REQUIRED,
            PhysicalType::INT32,
            None,
        ))?;
        root.try_add_child(address)?;

        let mut rendered = Vec::new();
        root.write_tree(&mut rendered)?;
        let rendered = String::from_utf8(rendered).unwrap();
        assert_eq!(
            rendered,
            "spark_schema\n  |-- id: int32\n  |-- address: struct\n    |-- city: string (byte_array)\n"
        );
        Ok(())
    }
}
