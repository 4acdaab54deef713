use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;

/// A single cell value. Values for one column may differ in type across rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Scalar {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Coerce to a number for renderers that aggregate or scale values.
    /// Anything that is not a finite number (or text holding one) maps to 0.
    pub fn as_f64_or_zero(&self) -> f64 {
        let parsed = match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Text(s) => s.trim().parse::<f64>().ok(),
            Scalar::Bool(_) | Scalar::Null => None,
        };
        parsed.filter(|n| n.is_finite()).unwrap_or(0.0)
    }

    /// Infer a typed value from a raw CSV cell
    pub fn from_cell(cell: &str) -> Self {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return Scalar::Null;
        }
        match trimmed {
            "true" => return Scalar::Bool(true),
            "false" => return Scalar::Bool(false),
            _ => {}
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Scalar::Number(n),
            _ => Scalar::Text(cell.to_string()),
        }
    }
}

/// Column name -> value, in column order. A missing key is a missing value.
pub type Row = IndexMap<String, Scalar>;

/// Look up a cell, treating a missing key the same as an explicit null
pub fn cell(row: &Row, column: &str) -> Scalar {
    row.get(column).cloned().unwrap_or(Scalar::Null)
}

/// Tabular query result: ordered column names plus rows keyed by them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Read a CSV document with a header row. An empty body yields zero rows.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns: Vec<String> = rdr
            .headers()
            .context("Failed to read CSV header row")?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (line, record) in rdr.records().enumerate() {
            let record = record.with_context(|| format!("Failed to read CSV record {}", line + 1))?;
            // Short records leave trailing columns missing rather than null
            let row: Row = columns
                .iter()
                .zip(record.iter())
                .map(|(col, raw)| (col.clone(), Scalar::from_cell(raw)))
                .collect();
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    /// Create a Table from a JSON array of objects.
    /// Column order follows first appearance across all objects.
    pub fn from_json(value: &Value) -> Result<Self> {
        let array = value
            .as_array()
            .ok_or_else(|| anyhow!("Input data must be a JSON array of objects"))?;

        let mut columns: Vec<String> = Vec::new();
        let mut rows = Vec::with_capacity(array.len());

        for item in array {
            let obj = item
                .as_object()
                .ok_or_else(|| anyhow!("Items in array must be objects"))?;

            let mut row = Row::with_capacity(obj.len());
            for (key, val) in obj {
                let scalar = match val {
                    Value::Null => Scalar::Null,
                    Value::Bool(b) => Scalar::Bool(*b),
                    Value::Number(n) => Scalar::Number(n.as_f64().unwrap_or(0.0)),
                    Value::String(s) => Scalar::Text(s.clone()),
                    _ => return Err(anyhow!("Unsupported value type for field '{}'", key)),
                };
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
                row.insert(key.clone(), scalar);
            }
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input).context("Input is not valid JSON")?;
        Self::from_json(&value)
    }
}
