//! parquet-diff inspects a collection of parquet files organized into
//! directory-encoded partitions (`.../date=2020-12-28/country=Spain/...`)
//! and answers two questions: do all files expose the same partition key
//! structure, and do all files expose the same record schema? And if not,
//! where exactly do they diverge?
//!
//! The heart of the crate is the structural diff engine in
//! [`schema::diff`]: schemas are modeled as trees of [`SchemaNode`]s, two
//! trees are walked in lockstep, and every divergence (added field, missing
//! field, kind change, primitive type change, repetition change) is
//! recorded under its [`NodePath`]. The passes in [`compare`] apply the
//! engine across a whole dataset, chaining comparisons with a sliding
//! reference so a schema change is reported once at its transition rather
//! than once per subsequent file.
//!
//! # Example
//!
//! ```no_run
//! use parquet_diff::{compare, read_directory};
//!
//! fn main() -> parquet_diff::DiffResult<()> {
//!     let files = read_directory("/data/vaccinations.parquet".as_ref())?;
//!     for partitions in compare::find_divergent_partitions(&files) {
//!         println!("conflicting partition structure: {partitions}");
//!     }
//!     for diff in compare::find_schema_differences(&files) {
//!         diff.write_report(&mut std::io::stdout())?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod compare;
mod error;
pub mod partition;
pub mod reader;
pub mod schema;

pub use error::{DiffResult, Error};
pub use partition::{Partition, Partitions};
pub use reader::{read_directory, read_file, ParquetFile};
pub use schema::diff::SchemaDiff;
pub use schema::{NodePath, PrimitiveSignature, SchemaKind, SchemaNode};
