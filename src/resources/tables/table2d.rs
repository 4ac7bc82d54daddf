use serde::{Deserialize, Serialize};

use crate::utils::{bracket, lerp, Result, SimError, TableError};

/// Rectangular grid over two independent axes with bilinear lookup.
///
/// Cells are stored row-major: `data[i * cols.len() + j]` is the value at
/// `(rows[i], cols[j])`. Axes are expected to be increasing; queries outside
/// the grid clamp to the nearest edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Table2DData")]
pub struct Table2D {
    rows: Vec<f64>,
    cols: Vec<f64>,
    data: Vec<f64>,
}

/// Unchecked wire form, validated through [`Table2D::new`] on load.
#[derive(Deserialize)]
struct Table2DData {
    rows: Vec<f64>,
    cols: Vec<f64>,
    data: Vec<f64>,
}

impl TryFrom<Table2DData> for Table2D {
    type Error = SimError;

    fn try_from(raw: Table2DData) -> Result<Self> {
        Table2D::new(raw.rows, raw.cols, raw.data)
    }
}

impl Table2D {
    pub fn new(rows: Vec<f64>, cols: Vec<f64>, data: Vec<f64>) -> Result<Self> {
        if rows.is_empty() {
            return Err(TableError::EmptyAxis("rows").into());
        }
        if cols.is_empty() {
            return Err(TableError::EmptyAxis("cols").into());
        }
        let expected = rows.len() * cols.len();
        if data.len() != expected {
            return Err(TableError::ShapeMismatch {
                expected,
                actual: data.len(),
            }
            .into());
        }

        Ok(Self { rows, cols, data })
    }

    /// A table that returns `value` everywhere.
    pub fn constant(value: f64) -> Self {
        Self {
            rows: vec![0.0],
            cols: vec![0.0],
            data: vec![value],
        }
    }

    pub fn rows(&self) -> &[f64] {
        &self.rows
    }

    pub fn cols(&self) -> &[f64] {
        &self.cols
    }

    /// Raw cell at row `i`, column `j`.
    pub fn value(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.rows.len() && j < self.cols.len() {
            self.data.get(i * self.cols.len() + j).copied()
        } else {
            None
        }
    }

    fn cell(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols.len() + j]
    }

    pub fn interp(&self, row: f64, col: f64) -> f64 {
        let (i, ti) = bracket(&self.rows, row);
        let (j, tj) = bracket(&self.cols, col);
        let i1 = (i + 1).min(self.rows.len() - 1);
        let j1 = (j + 1).min(self.cols.len() - 1);

        let lower = lerp(self.cell(i, j), self.cell(i, j1), tj);
        let upper = lerp(self.cell(i1, j), self.cell(i1, j1), tj);
        lerp(lower, upper, ti)
    }
}
