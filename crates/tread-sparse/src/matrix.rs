//! Row-grouped sparse transition matrix.
//!
//! Rows are choices, grouped per state: the rows of state `s` are
//! `row_group(s)`. Each row is a probability distribution over successor
//! states, stored as `(successor, probability)` pairs.

use std::ops::Range;

use tread_core::{ChoiceIndex, StateId};

use crate::error::ModelError;

/// Maximum deviation of a row sum from 1 that is accepted as stochastic.
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// An immutable, validated transition matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseMatrix {
    /// `row_group_indices[s]..row_group_indices[s + 1]` are the rows of `s`.
    row_group_indices: Vec<usize>,
    /// `row_indices[r]..row_indices[r + 1]` are the entries of row `r`.
    row_indices: Vec<usize>,
    entries: Vec<(StateId, f64)>,
}

impl SparseMatrix {
    /// Start building a matrix.
    pub fn builder() -> SparseMatrixBuilder {
        SparseMatrixBuilder::new()
    }

    /// Number of row groups (states).
    pub fn nr_row_groups(&self) -> usize {
        self.row_group_indices.len() - 1
    }

    /// Number of rows (choices).
    pub fn nr_rows(&self) -> usize {
        self.row_indices.len() - 1
    }

    /// Number of stored transitions.
    pub fn nr_entries(&self) -> usize {
        self.entries.len()
    }

    /// Rows belonging to `state`. Empty for out-of-range states.
    pub fn row_group(&self, state: StateId) -> Range<usize> {
        match (
            self.row_group_indices.get(state.0),
            self.row_group_indices.get(state.0 + 1),
        ) {
            (Some(&start), Some(&end)) => start..end,
            _ => 0..0,
        }
    }

    /// Number of rows belonging to `state`.
    pub fn row_group_size(&self, state: StateId) -> usize {
        self.row_group(state).len()
    }

    /// Entries of row `row`. Empty for out-of-range rows.
    pub fn row(&self, row: ChoiceIndex) -> &[(StateId, f64)] {
        match (self.row_indices.get(row.0), self.row_indices.get(row.0 + 1)) {
            (Some(&start), Some(&end)) => &self.entries[start..end],
            _ => &[],
        }
    }

    /// Whether every row of `state` keeps all probability mass on `state`.
    pub fn is_self_absorbing(&self, state: StateId) -> bool {
        let rows = self.row_group(state);
        !rows.is_empty()
            && rows
                .flat_map(|r| self.row(ChoiceIndex(r)))
                .all(|&(succ, p)| succ == state || p == 0.0)
    }
}

/// Incremental builder for [`SparseMatrix`].
///
/// Call [`new_row_group`](Self::new_row_group) once per state, followed by
/// one [`add_row`](Self::add_row) per choice of that state. Validation
/// happens in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct SparseMatrixBuilder {
    row_group_indices: Vec<usize>,
    row_indices: Vec<usize>,
    entries: Vec<(StateId, f64)>,
}

impl SparseMatrixBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self {
            row_group_indices: Vec::new(),
            row_indices: vec![0],
            entries: Vec::new(),
        }
    }

    /// Begin the rows of the next state.
    pub fn new_row_group(&mut self) -> &mut Self {
        self.row_group_indices.push(self.row_indices.len() - 1);
        self
    }

    /// Append a choice to the current state.
    ///
    /// Opens the first row group implicitly if none has been started.
    pub fn add_row<I>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        if self.row_group_indices.is_empty() {
            self.new_row_group();
        }
        self.entries
            .extend(entries.into_iter().map(|(col, p)| (StateId(col), p)));
        self.row_indices.push(self.entries.len());
        self
    }

    /// Validate and freeze the matrix.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if there are no states, a state has no rows,
    /// a row is empty, a probability is outside `(0, 1]`, a successor is
    /// out of range, or a row does not sum to 1 within
    /// [`PROBABILITY_TOLERANCE`].
    pub fn build(&mut self) -> Result<SparseMatrix, ModelError> {
        let mut row_group_indices = std::mem::take(&mut self.row_group_indices);
        let row_indices = std::mem::replace(&mut self.row_indices, vec![0]);
        let entries = std::mem::take(&mut self.entries);

        let nr_states = row_group_indices.len();
        if nr_states == 0 {
            return Err(ModelError::NoStates);
        }
        row_group_indices.push(row_indices.len() - 1);

        for (state, bounds) in row_group_indices.windows(2).enumerate() {
            if bounds[0] == bounds[1] {
                return Err(ModelError::EmptyRowGroup {
                    state: StateId(state),
                });
            }
        }

        for (row, bounds) in row_indices.windows(2).enumerate() {
            let row_entries = &entries[bounds[0]..bounds[1]];
            if row_entries.is_empty() {
                return Err(ModelError::EmptyRow { row });
            }
            let mut sum = 0.0;
            for &(col, p) in row_entries {
                if col.0 >= nr_states {
                    return Err(ModelError::ColumnOutOfRange {
                        row,
                        column: col.0,
                        nr_states,
                    });
                }
                if !p.is_finite() || p <= 0.0 || p > 1.0 {
                    return Err(ModelError::InvalidProbability {
                        row,
                        column: col.0,
                        value: p,
                    });
                }
                sum += p;
            }
            if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
                return Err(ModelError::RowNotStochastic { row, sum });
            }
        }

        Ok(SparseMatrix {
            row_group_indices,
            row_indices,
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_state() -> SparseMatrix {
        let mut b = SparseMatrix::builder();
        b.new_row_group().add_row([(1, 1.0)]);
        b.new_row_group()
            .add_row([(1, 1.0)])
            .add_row([(0, 0.25), (1, 0.75)]);
        b.build().unwrap()
    }

    #[test]
    fn row_groups_index_rows() {
        let m = two_state();
        assert_eq!(m.nr_row_groups(), 2);
        assert_eq!(m.nr_rows(), 3);
        assert_eq!(m.nr_entries(), 4);
        assert_eq!(m.row_group(StateId(0)), 0..1);
        assert_eq!(m.row_group(StateId(1)), 1..3);
        assert_eq!(m.row_group(StateId(2)), 0..0);
        assert_eq!(m.row(ChoiceIndex(2)), &[(StateId(0), 0.25), (StateId(1), 0.75)]);
        assert!(m.row(ChoiceIndex(3)).is_empty());
    }

    #[test]
    fn self_absorbing_requires_every_row() {
        let m = two_state();
        assert!(!m.is_self_absorbing(StateId(0)));
        // State 1 has a row that leaves with probability 0.25.
        assert!(!m.is_self_absorbing(StateId(1)));

        let mut b = SparseMatrix::builder();
        b.new_row_group().add_row([(0, 1.0)]).add_row([(0, 1.0)]);
        assert!(b.build().unwrap().is_self_absorbing(StateId(0)));
    }

    #[test]
    fn rejects_empty_matrix() {
        assert_eq!(SparseMatrix::builder().build(), Err(ModelError::NoStates));
    }

    #[test]
    fn rejects_state_without_rows() {
        let mut b = SparseMatrix::builder();
        b.new_row_group().add_row([(0, 1.0)]);
        b.new_row_group();
        assert_eq!(
            b.build(),
            Err(ModelError::EmptyRowGroup { state: StateId(1) })
        );
    }

    #[test]
    fn rejects_non_stochastic_rows() {
        let mut b = SparseMatrix::builder();
        b.new_row_group().add_row([(0, 0.5)]);
        assert!(matches!(
            b.build(),
            Err(ModelError::RowNotStochastic { row: 0, .. })
        ));
    }

    #[test]
    fn rejects_bad_probabilities_and_columns() {
        let mut b = SparseMatrix::builder();
        b.new_row_group().add_row([(0, f64::NAN)]);
        assert!(matches!(
            b.build(),
            Err(ModelError::InvalidProbability { row: 0, column: 0, .. })
        ));

        let mut b = SparseMatrix::builder();
        b.new_row_group().add_row([(3, 1.0)]);
        assert_eq!(
            b.build(),
            Err(ModelError::ColumnOutOfRange {
                row: 0,
                column: 3,
                nr_states: 1
            })
        );

        let mut b = SparseMatrix::builder();
        b.new_row_group().add_row(std::iter::empty());
        assert_eq!(b.build(), Err(ModelError::EmptyRow { row: 0 }));
    }

    #[test]
    fn tolerates_rounding() {
        let mut b = SparseMatrix::builder();
        b.new_row_group().add_row((0..10).map(|_| (0, 0.1)));
        assert!(b.build().is_ok());
    }
}
