//! Dense simplex tableau.

use nalgebra::DMatrix;

use crate::problem::PivotRule;

/// Dense tableau `[A | I | b]` with the objective row stored last.
///
/// Layout: `rows() + 1` matrix rows, `cols() + 1` matrix columns. The last
/// column holds the right-hand side; the last row holds the reduced costs and,
/// in its last entry, the negated objective value of the current basis.
#[derive(Debug, Clone)]
pub struct Tableau {
    data: DMatrix<f64>,

    /// Basic column of each constraint row.
    basis: Vec<usize>,
}

impl Tableau {
    /// Create a tableau from a full matrix (objective row last) and a basis.
    pub fn new(data: DMatrix<f64>, basis: Vec<usize>) -> Self {
        debug_assert_eq!(data.nrows(), basis.len() + 1);
        Self { data, basis }
    }

    /// Number of constraint rows.
    pub fn rows(&self) -> usize {
        self.basis.len()
    }

    /// Number of variable columns (excluding the right-hand side).
    pub fn cols(&self) -> usize {
        self.data.ncols() - 1
    }

    /// Basic column for each row.
    pub fn basis(&self) -> &[usize] {
        &self.basis
    }

    /// Entry at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[(row, col)]
    }

    /// Right-hand side of a constraint row.
    pub fn rhs(&self, row: usize) -> f64 {
        self.data[(row, self.cols())]
    }

    /// Reduced cost of a column.
    pub fn reduced_cost(&self, col: usize) -> f64 {
        self.data[(self.rows(), col)]
    }

    /// Constant of the objective row (negated objective of the basis).
    pub fn objective_constant(&self) -> f64 {
        self.data[(self.rows(), self.cols())]
    }

    /// Pick the entering column among `0..limit`.
    ///
    /// Returns None when no reduced cost is below `-tol`, i.e. the basis is
    /// optimal for the current objective row.
    pub fn select_entering(&self, rule: PivotRule, limit: usize, tol: f64) -> Option<usize> {
        let obj = self.rows();
        match rule {
            PivotRule::Dantzig => {
                let mut entering = None;
                let mut most_negative = -tol;
                for j in 0..limit {
                    let cost = self.data[(obj, j)];
                    if cost < most_negative {
                        most_negative = cost;
                        entering = Some(j);
                    }
                }
                entering
            }
            PivotRule::FirstProfitable => (0..limit).find(|&j| self.data[(obj, j)] < -tol),
        }
    }

    /// Ratio test for the entering column.
    ///
    /// Among rows with a coefficient above `tol`, picks the smallest
    /// `rhs / coefficient`, ties to the first row. None means the column
    /// is an unbounded ray.
    pub fn select_leaving(&self, col: usize, tol: f64) -> Option<usize> {
        let rhs_col = self.cols();
        let mut leaving = None;
        let mut min_ratio = f64::INFINITY;

        for i in 0..self.rows() {
            let coef = self.data[(i, col)];
            if coef > tol {
                let ratio = self.data[(i, rhs_col)] / coef;
                if ratio < min_ratio {
                    min_ratio = ratio;
                    leaving = Some(i);
                }
            }
        }

        leaving
    }

    /// Pivot on (row, col): normalize the row, eliminate the column elsewhere.
    pub fn pivot(&mut self, row: usize, col: usize) {
        let width = self.data.ncols();
        let pivot = self.data[(row, col)];
        debug_assert!(pivot != 0.0, "zero pivot at ({}, {})", row, col);

        for j in 0..width {
            self.data[(row, j)] /= pivot;
        }

        let pivot_row: Vec<f64> = (0..width).map(|j| self.data[(row, j)]).collect();

        for i in 0..self.data.nrows() {
            if i == row {
                continue;
            }
            let factor = self.data[(i, col)];
            if factor == 0.0 {
                continue;
            }
            for (j, &p) in pivot_row.iter().enumerate() {
                self.data[(i, j)] -= factor * p;
            }
        }

        self.basis[row] = col;
    }

    /// Replace the objective row with `costs` priced out for the current basis.
    ///
    /// `costs` has one entry per variable column; the objective constant starts
    /// at zero.
    pub fn set_objective(&mut self, costs: &[f64]) {
        debug_assert_eq!(costs.len(), self.cols());
        let obj = self.rows();
        let width = self.data.ncols();

        for (j, &c) in costs.iter().enumerate() {
            self.data[(obj, j)] = c;
        }
        self.data[(obj, width - 1)] = 0.0;

        for i in 0..self.rows() {
            let factor = self.data[(obj, self.basis[i])];
            if factor == 0.0 {
                continue;
            }
            for j in 0..width {
                self.data[(obj, j)] -= factor * self.data[(i, j)];
            }
        }
    }

    /// Keep only the given constraint rows and the first `num_cols` variable
    /// columns. The objective row and right-hand side are preserved.
    pub fn restrict(&self, keep_rows: &[usize], num_cols: usize) -> Tableau {
        let obj = self.rows();
        let rhs_col = self.cols();
        let row_map: Vec<usize> = keep_rows.iter().copied().chain(std::iter::once(obj)).collect();

        let data = DMatrix::from_fn(row_map.len(), num_cols + 1, |i, j| {
            let src_col = if j == num_cols { rhs_col } else { j };
            self.data[(row_map[i], src_col)]
        });
        let basis = keep_rows.iter().map(|&i| self.basis[i]).collect();

        Tableau::new(data, basis)
    }

    /// Values of the first `n` columns in the current basic solution.
    pub fn primal_values(&self, n: usize) -> Vec<f64> {
        let mut x = vec![0.0; n];
        for (i, &j) in self.basis.iter().enumerate() {
            if j < n {
                x[j] = self.rhs(i);
            }
        }
        x
    }
}
