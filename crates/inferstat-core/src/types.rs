//! Input value types shared by the estimators and tests

use crate::errors::{StatsError, StatsResult};

/// Two measurements taken on the same subjects, associated index by index
///
/// Differences are always `second[i] - first[i]` ("after minus before").
#[derive(Debug, Clone, PartialEq)]
pub struct PairedSample {
    first: Vec<f64>,
    second: Vec<f64>,
}

impl PairedSample {
    /// Pair two sequences of equal length
    pub fn new(first: Vec<f64>, second: Vec<f64>) -> StatsResult<Self> {
        if first.len() != second.len() {
            return Err(StatsError::MismatchedPairLength {
                first: first.len(),
                second: second.len(),
            });
        }
        Ok(Self { first, second })
    }

    /// Pair two borrowed slices, copying them
    pub fn from_slices(first: &[f64], second: &[f64]) -> StatsResult<Self> {
        Self::new(first.to_vec(), second.to_vec())
    }

    pub fn first(&self) -> &[f64] {
        &self.first
    }

    pub fn second(&self) -> &[f64] {
        &self.second
    }

    /// Number of pairs, including pairs with a missing side
    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    /// Per-pair differences `second - first`, skipping pairs where either side is NaN
    pub fn differences(&self) -> Vec<f64> {
        self.first
            .iter()
            .zip(&self.second)
            .filter(|(a, b)| !a.is_nan() && !b.is_nan())
            .map(|(a, b)| b - a)
            .collect()
    }
}

/// 2x2 table of non-negative counts `[[a, b], [c, d]]`
///
/// Rows are groups, columns are outcomes. The labels are the caller's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContingencyTable {
    cells: [[u64; 2]; 2],
}

impl ContingencyTable {
    pub fn new(cells: [[u64; 2]; 2]) -> Self {
        Self { cells }
    }

    /// Build a table from dynamically shaped signed rows
    ///
    /// Fails unless there are exactly two rows of exactly two non-negative counts.
    pub fn from_rows(rows: &[Vec<i64>]) -> StatsResult<Self> {
        if rows.len() != 2 {
            return Err(StatsError::MalformedContingencyTable(format!(
                "expected 2 rows, got {}",
                rows.len()
            )));
        }
        let mut cells = [[0u64; 2]; 2];
        for (i, row) in rows.iter().enumerate() {
            if row.len() != 2 {
                return Err(StatsError::MalformedContingencyTable(format!(
                    "row {} has {} columns, expected 2",
                    i,
                    row.len()
                )));
            }
            for (j, &count) in row.iter().enumerate() {
                cells[i][j] = u64::try_from(count).map_err(|_| {
                    StatsError::MalformedContingencyTable(format!(
                        "negative count {} at ({}, {})",
                        count, i, j
                    ))
                })?;
            }
        }
        Ok(Self { cells })
    }

    pub fn cells(&self) -> [[u64; 2]; 2] {
        self.cells
    }

    pub fn a(&self) -> u64 {
        self.cells[0][0]
    }

    pub fn b(&self) -> u64 {
        self.cells[0][1]
    }

    pub fn c(&self) -> u64 {
        self.cells[1][0]
    }

    pub fn d(&self) -> u64 {
        self.cells[1][1]
    }

    pub fn row_total(&self, row: usize) -> StatsResult<u64> {
        checked_count(self.cells[row][0], self.cells[row][1])
    }

    pub fn col_total(&self, col: usize) -> StatsResult<u64> {
        checked_count(self.cells[0][col], self.cells[1][col])
    }

    pub fn total(&self) -> StatsResult<u64> {
        checked_count(self.row_total(0)?, self.row_total(1)?)
    }
}

fn checked_count(x: u64, y: u64) -> StatsResult<u64> {
    x.checked_add(y).ok_or_else(|| {
        StatsError::MalformedContingencyTable(format!("counts {} + {} overflow u64", x, y))
    })
}

impl From<[[u64; 2]; 2]> for ContingencyTable {
    fn from(cells: [[u64; 2]; 2]) -> Self {
        Self::new(cells)
    }
}
