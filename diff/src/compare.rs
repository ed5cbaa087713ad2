//! Dataset-level comparison passes over an ordered file list: partition
//! structure agreement and chained pairwise schema diffs.
//!
//! Both passes are pure functions over the same input slice and share no
//! state, so a caller may run them independently (or concurrently).

use crate::partition::Partitions;
use crate::reader::ParquetFile;
use crate::schema::diff::SchemaDiff;

/// Checks whether every file exposes the same partition key structure.
///
/// Partition *values* are irrelevant; only the ordered key sequences are
/// compared. The first file's partitions are the reference. Returns an
/// empty list when all files agree, or when there are fewer than two files
/// to compare. A non-empty result starts with the reference partitions,
/// followed by every dissenting file's partitions in file order, so the
/// result is self-describing.
pub fn find_divergent_partitions(files: &[ParquetFile]) -> Vec<&Partitions> {
    let Some((first, rest)) = files.split_first() else {
        return Vec::new();
    };
    let reference = first.partitions();
    let mut divergent: Vec<&Partitions> = rest
        .iter()
        .map(ParquetFile::partitions)
        .filter(|partitions| !reference.same_structure(partitions))
        .collect();
    if !divergent.is_empty() {
        divergent.insert(0, reference);
    }
    divergent
}

/// Compares schemas pairwise along the file list with a sliding reference.
///
/// The first file is the initial reference. Whenever a comparison reports
/// differences, the report is kept and the candidate becomes the new
/// reference. A schema change is therefore reported once at its transition
/// instead of once per subsequent file. The flip side: an aberrant file
/// followed by a reversion yields two reports, the aberration and the
/// reversion.
pub fn find_schema_differences(files: &[ParquetFile]) -> Vec<SchemaDiff<'_>> {
    let Some((first, rest)) = files.split_first() else {
        return Vec::new();
    };
    let mut results = Vec::new();
    let mut reference = first;
    for candidate in rest {
        let diff = SchemaDiff::between(reference, candidate);
        if diff.has_differences() {
            results.push(diff);
            reference = candidate;
        }
    }
    results
}

/// Compares exactly two files, returning a report only when their schemas
/// differ.
pub fn compare_files<'a>(
    reference: &'a ParquetFile,
    candidate: &'a ParquetFile,
) -> Option<SchemaDiff<'a>> {
    let diff = SchemaDiff::between(reference, candidate);
    diff.has_differences().then_some(diff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{SchemaKind, SchemaNode};
    use crate::DiffResult;
    use parquet::basic::{Repetition, Type as PhysicalType};

    fn schema(field_names: &[&str]) -> DiffResult<SchemaNode> {
        let mut root = SchemaNode::group("test_schema", SchemaKind::Root, Repetition::REPEATED);
        for name in field_names {
            root.try_add_child(SchemaNode::primitive(
                *name,
                Repetition::REQUIRED,
                PhysicalType::INT32,
                None,
            ))?;
        }
        Ok(root)
    }

    fn file(path: &str, field_names: &[&str]) -> DiffResult<ParquetFile> {
        Ok(ParquetFile::new(path.into(), 10, schema(field_names)?))
    }

    #[test]
    fn divergent_partitions_empty_input() {
        assert!(find_divergent_partitions(&[]).is_empty());
    }

    #[test]
    fn divergent_partitions_single_file() -> DiffResult<()> {
        let files = [file("data/date=2020-12-28/country=Spain/f.parquet", &["id"])?];
        assert!(find_divergent_partitions(&files).is_empty());
        Ok(())
    }

    #[test]
    fn divergent_partitions_all_same_structure() -> DiffResult<()> {
        let files = [
            file("data/date=2020-12-28/country=Spain/f.parquet", &["id"])?,
            file("data/date=2020-12-29/country=France/f.parquet", &["id"])?,
        ];
        assert!(find_divergent_partitions(&files).is_empty());
        Ok(())
    }

    #[test]
    fn divergent_partitions_reports_reference_first() -> DiffResult<()> {
        let files = [
            file("data/date=2020-12-28/country=Spain/f.parquet", &["id"])?,
            file("data/date=2020-12-29/f.parquet", &["id"])?,
        ];
        let divergent = find_divergent_partitions(&files);
        assert_eq!(divergent.len(), 2);
        assert_eq!(divergent[0].keys().collect::<Vec<_>>(), ["date", "country"]);
        assert_eq!(divergent[1].keys().collect::<Vec<_>>(), ["date"]);
        Ok(())
    }

    #[test]
    fn schema_differences_empty_input() {
        assert!(find_schema_differences(&[]).is_empty());
    }

    #[test]
    fn schema_differences_identical_files() -> DiffResult<()> {
        let files = [
            file("data/date=2020-12-28/f.parquet", &["id", "name"])?,
            file("data/date=2020-12-29/f.parquet", &["id", "name"])?,
            file("data/date=2020-12-30/f.parquet", &["id", "name"])?,
        ];
        assert!(find_schema_differences(&files).is_empty());
        Ok(())
    }

    #[test]
    fn schema_change_is_reported_once_at_its_transition() -> DiffResult<()> {
        // B and C share a schema that differs from A: only the A->B
        // transition is reported, and B becomes the baseline for C.
        let files = [
            file("data/date=2020-12-28/f.parquet", &["id"])?,
            file("data/date=2020-12-29/f.parquet", &["id", "name"])?,
            file("data/date=2020-12-30/f.parquet", &["id", "name"])?,
        ];
        let diffs = find_schema_differences(&files);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].reference().path(), files[0].path());
        assert_eq!(diffs[0].candidate().path(), files[1].path());
        Ok(())
    }

    #[test]
    fn aberration_and_reversion_are_both_reported() -> DiffResult<()> {
        let files = [
            file("data/date=2020-12-28/f.parquet", &["id"])?,
            file("data/date=2020-12-29/f.parquet", &["id", "name"])?,
            file("data/date=2020-12-30/f.parquet", &["id"])?,
        ];
        let diffs = find_schema_differences(&files);
        assert_eq!(diffs.len(), 2);
        assert_eq!(diffs[0].candidate().path(), files[1].path());
        assert_eq!(diffs[1].reference().path(), files[1].path());
        assert_eq!(diffs[1].candidate().path(), files[2].path());
        Ok(())
    }

    #[test]
    fn compare_two_files() -> DiffResult<()> {
        let first = file("data/date=2020-12-28/f.parquet", &["id"])?;
        let same = file("data/date=2020-12-29/f.parquet", &["id"])?;
        let changed = file("data/date=2020-12-30/f.parquet", &["id", "name"])?;

        assert!(compare_files(&first, &same).is_none());
        let diff = compare_files(&first, &changed).expect("schemas differ");
        assert_eq!(diff.additional_nodes().len(), 1);
        Ok(())
    }
}
