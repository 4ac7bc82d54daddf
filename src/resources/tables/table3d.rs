use serde::{Deserialize, Serialize};

use super::Table2D;
use crate::utils::{bracket, lerp, Result, SimError, TableError};

/// A stack of [`Table2D`] pages indexed by a third, increasing axis.
///
/// Lookups blend the two pages bracketing the page value linearly. Page
/// values outside the table clamp to the first or last page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Table3DData")]
pub struct Table3D {
    pages: Vec<f64>,
    tables: Vec<Table2D>,
}

#[derive(Deserialize)]
struct Table3DData {
    pages: Vec<f64>,
    tables: Vec<Table2D>,
}

impl TryFrom<Table3DData> for Table3D {
    type Error = SimError;

    fn try_from(raw: Table3DData) -> Result<Self> {
        Table3D::new(raw.pages, raw.tables)
    }
}

impl Table3D {
    pub fn new(pages: Vec<f64>, tables: Vec<Table2D>) -> Result<Self> {
        if pages.is_empty() {
            return Err(TableError::EmptyAxis("pages").into());
        }
        if pages.len() != tables.len() {
            return Err(TableError::PageMismatch {
                pages: pages.len(),
                tables: tables.len(),
            }
            .into());
        }

        Ok(Self { pages, tables })
    }

    /// A single-page table that returns `value` everywhere.
    pub fn constant(value: f64) -> Self {
        Self {
            pages: vec![0.0],
            tables: vec![Table2D::constant(value)],
        }
    }

    pub fn pages(&self) -> &[f64] {
        &self.pages
    }

    pub fn interp(&self, page: f64, row: f64, col: f64) -> f64 {
        let (k, t) = bracket(&self.pages, page);
        let lower = self.tables[k].interp(row, col);
        if k + 1 >= self.tables.len() {
            return lower;
        }
        let upper = self.tables[k + 1].interp(row, col);
        lerp(lower, upper, t)
    }
}
