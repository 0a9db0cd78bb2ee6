// src/schema/write.rs
use super::GameTable;
use crate::error::ConfigError;
use anyhow::{anyhow, Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use serde::Serialize;
use serde_json::{Map, Value};
use std::{
    fmt,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    str::FromStr,
    sync::Arc,
};
use tracing::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Parquet,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "parquet" => Ok(OutputFormat::Parquet),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

/// Write `table` to `path`, one row per game.
pub fn write_table(table: &GameTable, format: OutputFormat, path: &Path) -> Result<()> {
    match table {
        GameTable::Football(r) => write_records(r, format, path),
        GameTable::Hockey(r) => write_records(r, format, path),
        GameTable::Baseball(r) => write_records(r, format, path),
    }
    .with_context(|| format!("writing {}", path.display()))?;
    debug!(path = %path.display(), %format, rows = table.len(), "wrote table");
    Ok(())
}

fn write_records<T: Serialize + Default>(
    records: &[T],
    format: OutputFormat,
    path: &Path,
) -> Result<()> {
    let file = File::create(path).context("creating output file")?;
    match format {
        OutputFormat::Json => {
            let mut out = BufWriter::new(file);
            serde_json::to_writer(&mut out, records)?;
            out.flush()?;
        }
        OutputFormat::Csv => {
            // header comes from the field list so an empty table still gets one
            let mut wtr = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(file);
            wtr.write_record(column_names::<T>()?)?;
            for r in records {
                wtr.serialize(r)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Parquet => write_parquet(records, file)?,
    }
    Ok(())
}

fn as_object<T: Serialize>(record: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(record)? {
        Value::Object(m) => Ok(m),
        other => Err(anyhow!("record serialized to non-object {other}")),
    }
}

/// Output column names in declaration order.
fn column_names<T: Serialize + Default>() -> Result<Vec<String>> {
    Ok(as_object(&T::default())?.into_iter().map(|(k, _)| k).collect())
}

/// Column types come from `T::default()`: `String` fields are Utf8, numbers
/// and options are Float64. The schema never depends on the rows.
fn write_parquet<T: Serialize + Default>(records: &[T], file: File) -> Result<()> {
    let template = as_object(&T::default())?;
    let rows = records.iter().map(as_object).collect::<Result<Vec<_>>>()?;

    let mut fields = Vec::with_capacity(template.len());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(template.len());
    for (name, sample) in &template {
        let values: Vec<Option<&Value>> = rows.iter().map(|r| r.get(name)).collect();
        if sample.is_string() {
            fields.push(Field::new(name, DataType::Utf8, true));
            columns.push(Arc::new(StringArray::from_iter(
                values.iter().map(|&v| v.and_then(Value::as_str)),
            )));
        } else {
            fields.push(Field::new(name, DataType::Float64, true));
            columns.push(Arc::new(Float64Array::from_iter(
                values.iter().map(|&v| v.and_then(Value::as_f64)),
            )));
        }
    }

    let schema = Arc::new(Schema::new(fields));
    let batch =
        RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(BufWriter::new(file), schema, Some(props))
        .context("initializing Parquet writer")?;
    writer.write(&batch).context("writing Parquet batch")?;
    writer.close().context("closing Parquet writer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{BaseballRecord, FootballRecord};
    use arrow::array::Array;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use std::fs;
    use tempfile::tempdir;

    fn football() -> GameTable {
        GameTable::Football(vec![FootballRecord {
            season: 2019,
            date: "09052019".into(),
            home_team: "Chicago Bears".into(),
            away_team: "Green Bay Packers".into(),
            home_final: 3,
            away_final: 10,
            home_close_ml: -165,
            away_close_ml: 145,
            home_open_spread: -3.5,
            away_open_spread: 3.5,
            second_half_total: 23.5,
            open_over_under: 47.0,
            ..FootballRecord::default()
        }])
    }

    #[test]
    fn format_keys_are_case_insensitive() {
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("Json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(
            "parquet".parse::<OutputFormat>().unwrap().extension(),
            "parquet"
        );
        assert!(matches!(
            "xml".parse::<OutputFormat>(),
            Err(ConfigError::UnknownFormat(f)) if f == "xml"
        ));
    }

    #[test]
    fn json_is_an_array_of_row_objects() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("games.json");
        write_table(&football(), OutputFormat::Json, &path)?;

        let rows: Vec<Map<String, Value>> = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["home_team"], "Chicago Bears");
        assert_eq!(rows[0]["2H_total"], 23.5);
        assert_eq!(rows[0]["home_1stQtr"], 0);
        Ok(())
    }

    #[test]
    fn csv_header_uses_output_names() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("games.csv");
        write_table(&football(), OutputFormat::Csv, &path)?;

        let text = fs::read_to_string(&path)?;
        let mut lines = text.lines();
        let header = lines.next().unwrap_or_default();
        assert!(header.starts_with("season,date,home_team,away_team,home_1stQtr,away_1stQtr"));
        assert!(header.ends_with("2H_total,open_over_under,close_over_under"));
        assert!(lines.next().unwrap_or_default().starts_with("2019,09052019,Chicago Bears"));
        assert_eq!(lines.next(), None);
        Ok(())
    }

    #[test]
    fn empty_csv_still_has_header() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("empty.csv");
        write_table(&GameTable::Baseball(Vec::new()), OutputFormat::Csv, &path)?;
        let text = fs::read_to_string(&path)?;
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("home_9thInn"));
        Ok(())
    }

    #[test]
    fn parquet_types_and_nulls() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("games.parquet");
        let table = GameTable::Baseball(vec![BaseballRecord {
            season: 2019,
            date: "04012019".into(),
            home_team: "BOS".into(),
            away_team: "NYY".into(),
            home_1st_inn: Some(1),
            home_9th_inn: None,
            close_ml: -150,
            ..BaseballRecord::default()
        }]);
        write_table(&table, OutputFormat::Parquet, &path)?;

        let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&path)?)?.build()?;
        let batches = reader.collect::<Result<Vec<_>, _>>()?;
        let batch = &batches[0];
        assert_eq!(batch.num_rows(), 1);

        let schema = batch.schema();
        assert_eq!(schema.field(0).name(), "season");
        assert_eq!(schema.field(0).data_type(), &DataType::Float64);
        assert_eq!(
            schema.field_with_name("home_team")?.data_type(),
            &DataType::Utf8
        );

        let col = |name: &str| batch.column(schema.index_of(name).unwrap()).clone();
        let nine = col("home_9thInn");
        assert!(nine.is_null(0));
        let close_ml = col("close_ml");
        let close_ml = close_ml
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert_eq!(close_ml.value(0), -150.0);
        Ok(())
    }

    #[test]
    fn empty_parquet_keeps_text_columns() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("empty.parquet");
        write_table(&GameTable::Football(Vec::new()), OutputFormat::Parquet, &path)?;

        let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(&path)?)?;
        let schema = builder.schema().clone();
        for name in ["date", "home_team", "away_team"] {
            assert_eq!(schema.field_with_name(name)?.data_type(), &DataType::Utf8);
        }
        assert_eq!(
            schema.field_with_name("home_close_ml")?.data_type(),
            &DataType::Float64
        );
        assert_eq!(schema.fields().len(), column_names::<FootballRecord>()?.len());

        let rows: usize = builder.build()?.map(|b| b.map(|b| b.num_rows())).sum::<Result<usize, _>>()?;
        assert_eq!(rows, 0);
        Ok(())
    }
}
