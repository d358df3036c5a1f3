//! Columnar chart data loader
//!
//! Input shape: `columns` holds one array per column whose first element is
//! the column key (`"x"`, `"y0"`, ...), `types` maps keys to `"x"` or `"line"`,
//! `names` and `colors` map keys to display values. The x column is shared by
//! every line column.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ChartError, DataPoint, Result, Series};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub columns: Vec<Vec<Value>>,
    #[serde(default)]
    pub types: BTreeMap<String, String>,
    #[serde(default)]
    pub names: BTreeMap<String, String>,
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
}

impl ChartData {
    /// Parse a single chart document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Key of the shared x column
    pub fn x_key(&self) -> &str {
        self.types
            .iter()
            .find(|(_, kind)| kind.as_str() == "x")
            .map(|(key, _)| key.as_str())
            .unwrap_or("x")
    }

    /// Numeric values of a column, without its key
    pub fn column(&self, key: &str) -> Result<Option<Vec<f64>>> {
        let Some(column) = self.columns.iter().find(|c| c.first().and_then(Value::as_str) == Some(key)) else {
            return Ok(None);
        };

        column[1..]
            .iter()
            .map(|v| {
                v.as_f64().ok_or_else(|| {
                    ChartError::invalid_input(format!("column \"{key}\" holds a non-numeric value: {v}"))
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    /// One series per non-x column, in column order
    pub fn to_series(&self) -> Result<Vec<Series>> {
        let x_key = self.x_key();
        let xs = self
            .column(x_key)?
            .ok_or_else(|| ChartError::invalid_input(format!("chart data has no \"{x_key}\" column")))?;

        let mut series = Vec::new();
        for column in &self.columns {
            let Some(key) = column.first().and_then(Value::as_str) else {
                return Err(ChartError::invalid_input("column without a string key"));
            };
            if key == x_key {
                continue;
            }
            if let Some(kind) = self.types.get(key) {
                if kind != "line" {
                    tracing::warn!(column = key, kind = kind.as_str(), "skipping unsupported column type");
                    continue;
                }
            }

            let ys = self.column(key)?.unwrap_or_default();
            let data = xs.iter().zip(ys.iter()).map(|(&x, &y)| DataPoint::new(x, y)).collect();
            let name = self.names.get(key).cloned().unwrap_or_else(|| key.to_string());
            let color = self.colors.get(key).cloned().unwrap_or_default();

            series.push(Series::new(name, color, data));
        }

        Ok(series)
    }
}
