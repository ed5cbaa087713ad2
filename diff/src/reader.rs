//! Reads parquet footers and directory trees into [`ParquetFile`]
//! descriptors.
//!
//! Only footer metadata is touched: row counts come from the row group
//! metadata and the schema tree is built from the footer's message type.
//! No column data is ever decoded.

use std::fs::File;
use std::path::{Path, PathBuf};

use parquet::file::reader::{FileReader, SerializedFileReader};
use tracing::{debug, error};

use crate::partition::Partitions;
use crate::schema::SchemaNode;
use crate::{DiffResult, Error};

const PARQUET_EXTENSION: &str = "parquet";

/// Metadata extracted from a single parquet file: its path, row count,
/// schema tree, and the partitions encoded in the path.
#[derive(Debug, Clone, PartialEq)]
pub struct ParquetFile {
    path: PathBuf,
    num_rows: u64,
    schema: SchemaNode,
    partitions: Partitions,
}

impl ParquetFile {
    /// Creates a descriptor, deriving the partitions from the path.
    pub fn new(path: PathBuf, num_rows: u64, schema: SchemaNode) -> Self {
        let partitions = Partitions::from_path(&path);
        Self {
            path,
            num_rows,
            schema,
            partitions,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn num_rows(&self) -> u64 {
        self.num_rows
    }

    pub fn schema(&self) -> &SchemaNode {
        &self.schema
    }

    pub fn partitions(&self) -> &Partitions {
        &self.partitions
    }
}

/// Reads the footer of a single parquet file into a [`ParquetFile`].
pub fn read_file(path: &Path) -> DiffResult<ParquetFile> {
    let file = File::open(path)?;
    let reader = SerializedFileReader::new(file)
        .inspect_err(|e| error!("error reading parquet footer in {}: {e}", path.display()))?;
    let metadata = reader.metadata();
    let num_rows = metadata
        .row_groups()
        .iter()
        .map(|row_group| row_group.num_rows().max(0) as u64)
        .sum();
    let schema = SchemaNode::from_message(metadata.file_metadata().schema_descr().root_schema())?;
    debug!("read {} ({num_rows} rows)", path.display());
    Ok(ParquetFile::new(path.to_path_buf(), num_rows, schema))
}

/// Recursively collects every `.parquet` file under `root` and reads each
/// one. The result is sorted by path so repeated runs over the same
/// snapshot are deterministic.
pub fn read_directory(root: &Path) -> DiffResult<Vec<ParquetFile>> {
    if !root.exists() {
        return Err(Error::invalid_path("parquet directory not found", root));
    }
    if !root.is_dir() {
        return Err(Error::invalid_path("not a directory", root));
    }
    let mut paths = Vec::new();
    collect_parquet_paths(root, &mut paths)?;
    paths.sort();
    paths.iter().map(|path| read_file(path)).collect()
}

fn collect_parquet_paths(dir: &Path, out: &mut Vec<PathBuf>) -> DiffResult<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_parquet_paths(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == PARQUET_EXTENSION) {
            out.push(path);
        }
    }
    Ok(())
}
