//! Registering external files and in-memory batches as named relations.
//!
//! Parsing and decoding are delegated to the engine's own readers; this
//! module only composes the registration SQL and checks paths up front.
//! Name collisions are the engine's to reject.

use std::fmt::Write as _;
use std::path::Path;

use duckdb::arrow::datatypes::DataType;
use duckdb::arrow::record_batch::RecordBatch;
use tracing::info;

use crate::errors::{config, Result};
use crate::session::Session;

impl Session {
    /// Register a CSV file as the relation `name`.
    ///
    /// Column types and headers are inferred by the engine.
    pub fn load_csv(&self, path: impl AsRef<Path>, name: &str) -> Result<()> {
        let path = existing_path(path.as_ref())?;
        self.execute_batch(&format!(
            "CREATE TABLE {} AS SELECT * FROM read_csv_auto({})",
            quote_ident(name),
            quote_literal(&path),
        ))?;
        info!(name, %path, "loaded csv");
        Ok(())
    }

    /// Register a Parquet file as the relation `name`.
    pub fn load_parquet(&self, path: impl AsRef<Path>, name: &str) -> Result<()> {
        let path = existing_path(path.as_ref())?;
        self.execute_batch(&format!(
            "CREATE TABLE {} AS SELECT * FROM read_parquet({})",
            quote_ident(name),
            quote_literal(&path),
        ))?;
        info!(name, %path, "loaded parquet");
        Ok(())
    }

    /// Register an in-memory Arrow batch as the relation `name`.
    ///
    /// The table schema is derived from the batch schema; rows go through
    /// the engine's Arrow appender.
    pub fn register_batch(&self, name: &str, batch: &RecordBatch) -> Result<()> {
        self.execute_batch(&create_table_ddl(name, batch)?)?;

        let mut appender = self.appender(name)?;
        appender.append_record_batch(batch.clone())?;
        appender.flush()?;

        info!(name, rows = batch.num_rows(), "registered batch");
        Ok(())
    }
}

fn existing_path(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(config!("source path does not exist: {}", path.display()));
    }
    Ok(path.display().to_string())
}

fn create_table_ddl(name: &str, batch: &RecordBatch) -> Result<String> {
    let mut ddl = format!("CREATE TABLE {} (", quote_ident(name));
    for (idx, field) in batch.schema().fields().iter().enumerate() {
        if idx > 0 {
            ddl.push_str(", ");
        }
        let _ = write!(
            ddl,
            "{} {}",
            quote_ident(field.name()),
            sql_type(field.data_type())?
        );
    }
    ddl.push(')');
    Ok(ddl)
}

fn sql_type(datatype: &DataType) -> Result<&'static str> {
    Ok(match datatype {
        DataType::Boolean => "BOOLEAN",
        DataType::Int8 => "TINYINT",
        DataType::Int16 => "SMALLINT",
        DataType::Int32 => "INTEGER",
        DataType::Int64 => "BIGINT",
        DataType::UInt8 => "UTINYINT",
        DataType::UInt16 => "USMALLINT",
        DataType::UInt32 => "UINTEGER",
        DataType::UInt64 => "UBIGINT",
        DataType::Float32 => "FLOAT",
        DataType::Float64 => "DOUBLE",
        DataType::Utf8 | DataType::LargeUtf8 => "VARCHAR",
        DataType::Binary | DataType::LargeBinary => "BLOB",
        DataType::Date32 => "DATE",
        other => {
            return Err(config!(
                "unsupported column type for registration: {other:?}"
            ))
        }
    })
}

/// Double-quote an identifier for splicing into SQL text.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Single-quote a string literal for splicing into SQL text.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use duckdb::arrow::array::{Int32Array, StringArray};
    use duckdb::arrow::datatypes::{Field, Schema, TimeUnit};

    use super::*;
    use crate::engine::Engine;
    use crate::errors::ExecError;
    use serde_json::json;

    fn connect() -> Session {
        Engine::in_memory().connect().unwrap()
    }

    fn write_sample_csv(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("sales.csv");
        let mut contents = String::from("id,category,quantity\n");
        for id in 1..=10 {
            let category = if id % 2 == 0 { "widgets" } else { "gadgets" };
            contents.push_str(&format!("{id},{category},{}\n", id * 3));
        }
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn csv_row_count_matches_the_source_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample_csv(dir.path());

        let session = connect();
        session.load_csv(&path, "sales").unwrap();

        let out = session.query("SELECT count(*) FROM sales").unwrap();
        assert_eq!(out.scalar(), Some(&json!(10)));
    }

    #[test]
    fn missing_source_path_fails_before_the_engine() {
        let session = connect();
        let err = session
            .load_csv("/no/such/file.csv", "sales")
            .unwrap_err();
        assert!(matches!(err, ExecError::Configuration(_)));
    }

    #[test]
    fn duplicate_relation_name_is_rejected_by_the_engine() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample_csv(dir.path());

        let session = connect();
        session.load_csv(&path, "sales").unwrap();
        let err = session.load_csv(&path, "sales").unwrap_err();
        assert!(matches!(err, ExecError::Duck(_)));
    }

    #[test]
    fn registered_batch_roundtrips() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int32, false),
            Field::new("name", DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int32Array::from(vec![1, 2, 3])),
                Arc::new(StringArray::from(vec!["a", "b", "c"])),
            ],
        )
        .unwrap();

        let session = connect();
        session.register_batch("people", &batch).unwrap();

        let out = session
            .query("SELECT id, name FROM people ORDER BY id")
            .unwrap();
        assert_eq!(out.row_count(), 3);
        assert_eq!(out.rows[2], vec![json!(3), json!("c")]);
    }

    #[test]
    fn unsupported_arrow_type_is_a_configuration_error() {
        let err = sql_type(&DataType::Duration(TimeUnit::Millisecond)).unwrap_err();
        assert!(matches!(err, ExecError::Configuration(_)));
    }

    #[test]
    fn quoting_escapes_embedded_delimiters() {
        assert_eq!(quote_ident("plain"), "\"plain\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(quote_literal("it's"), "'it''s'");
    }
}
