//! Structural schema comparison: walks two schema trees in lockstep,
//! depth-first, and records every divergence in a [`SchemaDiff`] report.
//!
//! Comparison is purely structural and total: a mismatch between two
//! schemas is data recorded in the report, never an error. Fields are
//! matched by name, so a renamed field classifies as one missing plus one
//! additional node rather than a rename.

use std::io::{self, Write};

use parquet::basic::Repetition;

use super::{NodePath, PrimitiveSignature, SchemaKind, SchemaNode};
use crate::reader::ParquetFile;

/// A node whose kind differs between the two schemas, e.g. struct vs
/// primitive. Nothing beneath such a node is compared further.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDiff {
    pub path: NodePath,
    pub old: SchemaKind,
    pub new: SchemaKind,
}

/// A primitive leaf whose physical type or logical annotation differs,
/// e.g. int32 vs int64.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveTypeDiff {
    pub path: NodePath,
    pub old: PrimitiveSignature,
    pub new: PrimitiveSignature,
}

/// A node whose repetition differs, e.g. required vs optional.
#[derive(Debug, Clone, PartialEq)]
pub struct RepetitionDiff {
    pub path: NodePath,
    pub old: Repetition,
    pub new: Repetition,
}

/// Differences between two parquet files' schemas.
///
/// The `reference` is the file the differences were established against;
/// the `candidate` is the file that was compared to it. All difference
/// lists are ordered by discovery, which follows the owning schema's own
/// field order.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDiff<'a> {
    reference: &'a ParquetFile,
    candidate: &'a ParquetFile,
    additional_nodes: Vec<NodePath>,
    missing_nodes: Vec<NodePath>,
    type_diffs: Vec<TypeDiff>,
    primitive_type_diffs: Vec<PrimitiveTypeDiff>,
    repetition_diffs: Vec<RepetitionDiff>,
}

impl<'a> SchemaDiff<'a> {
    /// Compares `candidate`'s schema against `reference`'s and returns the
    /// accumulated report.
    pub fn between(reference: &'a ParquetFile, candidate: &'a ParquetFile) -> Self {
        let mut diff = SchemaDiff {
            reference,
            candidate,
            additional_nodes: Vec::new(),
            missing_nodes: Vec::new(),
            type_diffs: Vec::new(),
            primitive_type_diffs: Vec::new(),
            repetition_diffs: Vec::new(),
        };
        diff.compare_nodes(reference.schema(), candidate.schema(), &NodePath::default());
        diff
    }

    /// True if any difference was recorded.
    pub fn has_differences(&self) -> bool {
        !self.additional_nodes.is_empty()
            || !self.missing_nodes.is_empty()
            || !self.type_diffs.is_empty()
            || !self.primitive_type_diffs.is_empty()
            || !self.repetition_diffs.is_empty()
    }

    /// The file whose schema served as the comparison baseline.
    pub fn reference(&self) -> &ParquetFile {
        self.reference
    }

    /// The file whose schema was compared to the reference.
    pub fn candidate(&self) -> &ParquetFile {
        self.candidate
    }

    /// Fields present in the candidate but absent in the reference.
    pub fn additional_nodes(&self) -> &[NodePath] {
        &self.additional_nodes
    }

    /// Fields present in the reference but absent in the candidate.
    pub fn missing_nodes(&self) -> &[NodePath] {
        &self.missing_nodes
    }

    pub fn type_diffs(&self) -> &[TypeDiff] {
        &self.type_diffs
    }

    pub fn primitive_type_diffs(&self) -> &[PrimitiveTypeDiff] {
        &self.primitive_type_diffs
    }

    pub fn repetition_diffs(&self) -> &[RepetitionDiff] {
        &self.repetition_diffs
    }

    fn compare_nodes(&mut self, reference: &SchemaNode, candidate: &SchemaNode, path: &NodePath) {
        // The reference node's name keys the path; the candidate's name is
        // never consulted (name is the join key).
        let path = path.child(reference.name());

        if reference.kind() != candidate.kind() {
            self.type_diffs.push(TypeDiff {
                path,
                old: reference.kind(),
                new: candidate.kind(),
            });
            // Child semantics are meaningless across incompatible kinds.
            return;
        }

        if reference.repetition() != candidate.repetition() {
            self.repetition_diffs.push(RepetitionDiff {
                path: path.clone(),
                old: reference.repetition(),
                new: candidate.repetition(),
            });
        }

        if let (Some(old), Some(new)) = (
            reference.primitive_signature(),
            candidate.primitive_signature(),
        ) {
            if old != new {
                self.primitive_type_diffs.push(PrimitiveTypeDiff {
                    path: path.clone(),
                    old,
                    new,
                });
            }
        }

        if !reference.has_children() && !candidate.has_children() {
            return;
        }

        let candidate_children = candidate.children_by_name();
        for child in reference.children() {
            match candidate_children.get(child.name()) {
                Some(matched) => self.compare_nodes(child, matched, &path),
                None => self.missing_nodes.push(path.child(child.name())),
            }
        }

        let reference_children = reference.children_by_name();
        for child in candidate.children() {
            if !reference_children.contains_key(child.name()) {
                self.additional_nodes.push(path.child(child.name()));
            }
        }
    }

    /// Writes the human-readable report: a header naming both partitions,
    /// then one line per recorded difference.
    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if !self.has_differences() {
            return writeln!(
                out,
                "No differences found in {}.",
                self.candidate.partitions()
            );
        }
        writeln!(
            out,
            "Differences found in {}, compared to {}:",
            self.candidate.partitions(),
            self.reference.partitions()
        )?;
        for node in &self.additional_nodes {
            writeln!(out, "additional field: '{node}'.")?;
        }
        for node in &self.missing_nodes {
            writeln!(out, "missing field: '{node}'.")?;
        }
        for diff in &self.type_diffs {
            writeln!(
                out,
                "different field type for '{}': '{}' instead of '{}'.",
                diff.path, diff.new, diff.old
            )?;
        }
        for diff in &self.primitive_type_diffs {
            writeln!(
                out,
                "different field primitive type for '{}': '{}' instead of '{}'.",
                diff.path, diff.new, diff.old
            )?;
        }
        for diff in &self.repetition_diffs {
            writeln!(
                out,
                "different repetition for '{}': '{}' instead of '{}'.",
                diff.path, diff.new, diff.old
            )?;
        }
        Ok(())
    }
}
