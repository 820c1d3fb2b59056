//! Non-negative integer matrices and their Perron–Frobenius data.
//!
//! Purpose
//! - Decide whether a folded transition matrix is irreducible (strongly connected
//!   positive-entry graph) and, if so, expose its dominant eigenvalue and a positive
//!   eigenvector that seeds new interval lengths.
//!
//! Why this design
//! - Irreducibility is combinatorial and exact: two BFS passes from vertex 0, one on
//!   the matrix and one on its transpose. Only qualified matrices reach the solver.
//! - The spectrum comes from nalgebra's real Schur form, with an iteration cap. If the
//!   Schur iteration stalls, power iteration on `A + I` gives the spectral radius instead.
//!   The eigenvector is the right-singular vector of `A - λI` with the smallest singular
//!   value, which is robust for the small dense sizes seen here (≤ a few dozen).
//!
//! The PF eigenvalue is the one with the largest absolute real part; a tie prefers the
//! positive one. Eigenvector components are stored as absolute values.

use std::collections::VecDeque;
use std::fmt;

use nalgebra::linalg::Schur;
use nalgebra::{DMatrix, DVector};

/// Rejected matrix input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatrixError {
    Empty,
    NotSquare { row: usize, len: usize, size: usize },
    NegativeEntry { row: usize, col: usize, value: i64 },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "matrix has no rows"),
            Self::NotSquare { row, len, size } => {
                write!(f, "matrix is not square: row {row} has {len} entries, expected {size}")
            }
            Self::NegativeEntry { row, col, value } => {
                write!(f, "matrix entry ({row}, {col}) is negative: {value}")
            }
        }
    }
}

impl std::error::Error for MatrixError {}

#[derive(Clone, Debug)]
struct PfData {
    eigenvalue: f64,
    eigenvector: Vec<f64>,
}

/// Square matrix of non-negative integers with cached Perron–Frobenius data.
#[derive(Clone, Debug)]
pub struct AlmostPfMatrix {
    rows: Vec<Vec<i64>>,
    pf: Option<PfData>,
}

impl AlmostPfMatrix {
    pub fn new(rows: Vec<Vec<i64>>) -> Result<Self, MatrixError> {
        let size = rows.len();
        if size == 0 {
            return Err(MatrixError::Empty);
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(MatrixError::NotSquare {
                    row: i,
                    len: row.len(),
                    size,
                });
            }
            if let Some((j, &value)) = row.iter().enumerate().find(|(_, v)| **v < 0) {
                return Err(MatrixError::NegativeEntry { row: i, col: j, value });
            }
        }
        Ok(Self::from_checked(rows))
    }

    fn from_checked(rows: Vec<Vec<i64>>) -> Self {
        let mut m = Self { rows, pf: None };
        if m.reaches_all(false) && m.reaches_all(true) {
            m.pf = dominant_eigenpair(&m.rows);
        }
        m
    }

    /// Matrix of the Arnoux–Yoccoz family for `genus`; its PF eigenvalue is the real root
    /// of `x^g - x^(g-1) - ... - x - 1`.
    ///
    /// Callers pass `genus >= 3`; smaller values produce a degenerate (but valid) matrix.
    pub fn arnoux_yoccoz(genus: usize) -> Self {
        let g = genus.max(1);
        let mut rows = vec![vec![0i64; g]; g];
        rows[0][0] = 1;
        rows[0][g - 1] = 1;
        for i in 1..g.saturating_sub(1) {
            rows[i][i - 1] = 1;
        }
        for i in 0..g - 1 {
            rows[g - 1][i] = 1;
        }
        Self::from_checked(rows)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn entry(&self, row: usize, col: usize) -> i64 {
        self.rows[row][col]
    }

    pub fn rows(&self) -> &[Vec<i64>] {
        &self.rows
    }

    /// Strongly connected and the eigen-solve succeeded.
    pub fn is_perron_frobenius(&self) -> bool {
        self.pf.is_some()
    }

    pub fn pf_eigenvalue(&self) -> Option<f64> {
        self.pf.as_ref().map(|pf| pf.eigenvalue)
    }

    pub fn pf_eigenvector(&self) -> Option<&[f64]> {
        self.pf.as_ref().map(|pf| pf.eigenvector.as_slice())
    }

    // BFS from vertex 0 along positive entries (columns of the transpose if `transposed`).
    fn reaches_all(&self, transposed: bool) -> bool {
        let n = self.size();
        let mut seen = vec![false; n];
        seen[0] = true;
        let mut reached = 1;
        let mut queue = VecDeque::from([0usize]);
        while let Some(v) = queue.pop_front() {
            for w in 0..n {
                let edge = if transposed {
                    self.rows[w][v]
                } else {
                    self.rows[v][w]
                };
                if edge > 0 && !seen[w] {
                    seen[w] = true;
                    reached += 1;
                    queue.push_back(w);
                }
            }
        }
        reached == n
    }
}

fn dominant_eigenpair(rows: &[Vec<i64>]) -> Option<PfData> {
    let n = rows.len();
    let a = DMatrix::<f64>::from_fn(n, n, |i, j| rows[i][j] as f64);
    let lambda = schur_dominant_real_part(&a).or_else(|| power_iteration_radius(&a))?;

    let shifted = &a - DMatrix::<f64>::identity(n, n) * lambda;
    let svd = shifted.try_svd(false, true, f64::EPSILON, SOLVER_MAX_ITER)?;
    let v_t = svd.v_t?;
    let (k, _) = svd
        .singular_values
        .iter()
        .enumerate()
        .min_by(|x, y| x.1.total_cmp(y.1))?;
    let eigenvector: Vec<f64> = v_t.row(k).iter().map(|x| x.abs()).collect();
    if eigenvector.iter().any(|x| !x.is_finite()) {
        return None;
    }
    Some(PfData {
        eigenvalue: lambda.abs(),
        eigenvector,
    })
}

const SOLVER_MAX_ITER: usize = 10_000;

// Real part of largest magnitude; `None` if the Schur iteration does not converge
// (cyclic permutation blocks can stall the Francis shifts).
fn schur_dominant_real_part(a: &DMatrix<f64>) -> Option<f64> {
    let schur = Schur::try_new(a.clone(), f64::EPSILON, SOLVER_MAX_ITER)?;
    schur
        .complex_eigenvalues()
        .iter()
        .map(|z| z.re)
        .filter(|re| re.is_finite())
        .max_by(|x, y| x.abs().total_cmp(&y.abs()).then(x.total_cmp(y)))
}

// Spectral radius of an irreducible non-negative matrix. `A + I` is primitive, so
// plain power iteration on it converges.
fn power_iteration_radius(a: &DMatrix<f64>) -> Option<f64> {
    let n = a.nrows();
    let step = a + DMatrix::<f64>::identity(n, n);
    let mut v = DVector::<f64>::from_element(n, 1.0);
    for _ in 0..SOLVER_MAX_ITER * 10 {
        let w = &step * &v;
        let scale = w.max();
        if scale.is_nan() || scale <= 0.0 {
            return None;
        }
        let w = w / scale;
        let done = (&w - &v).amax() < 1e-15;
        v = w;
        if done {
            break;
        }
    }
    let av = a * &v;
    let k = v.imax();
    Some(av[k] / v[k])
}

impl fmt::Display for AlmostPfMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[i64]]) -> AlmostPfMatrix {
        AlmostPfMatrix::new(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    fn assert_eigenvector(mat: &AlmostPfMatrix) {
        let lambda = mat.pf_eigenvalue().unwrap();
        let v = mat.pf_eigenvector().unwrap();
        assert!(v.iter().all(|x| *x > 0.0), "PF vector must be positive: {v:?}");
        for i in 0..mat.size() {
            let av: f64 = (0..mat.size()).map(|j| mat.entry(i, j) as f64 * v[j]).sum();
            assert!((av - lambda * v[i]).abs() < 1e-9, "row {i}: {av} vs {}", lambda * v[i]);
        }
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(AlmostPfMatrix::new(vec![]).unwrap_err(), MatrixError::Empty);
        assert_eq!(
            AlmostPfMatrix::new(vec![vec![1, 0], vec![1]]).unwrap_err(),
            MatrixError::NotSquare { row: 1, len: 1, size: 2 }
        );
        let err = AlmostPfMatrix::new(vec![vec![1, 0], vec![-2, 1]]).unwrap_err();
        assert_eq!(err, MatrixError::NegativeEntry { row: 1, col: 0, value: -2 });
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn block_diagonal_is_not_pf() {
        let mat = m(&[&[1, 1, 0, 0], &[1, 1, 0, 0], &[0, 0, 1, 1], &[0, 0, 1, 1]]);
        assert!(!mat.is_perron_frobenius());
        assert!(mat.pf_eigenvalue().is_none());
        assert!(mat.pf_eigenvector().is_none());
    }

    #[test]
    fn one_way_reachability_is_not_pf() {
        // 0 reaches everything, nothing reaches 0.
        let mat = m(&[&[0, 1, 0], &[0, 0, 1], &[0, 1, 0]]);
        assert!(!mat.is_perron_frobenius());
    }

    #[test]
    fn single_cycle_is_pf() {
        let mat = m(&[&[0, 1, 0, 0], &[0, 0, 1, 0], &[0, 0, 0, 1], &[1, 0, 0, 0]]);
        assert!(mat.is_perron_frobenius());
        // Spectrum is the 4th roots of unity.
        assert!((mat.pf_eigenvalue().unwrap() - 1.0).abs() < 1e-9);
        assert_eigenvector(&mat);
    }

    #[test]
    fn golden_mean_matrix() {
        let mat = m(&[&[1, 1], &[1, 0]]);
        let phi = (1.0 + 5f64.sqrt()) / 2.0;
        assert!((mat.pf_eigenvalue().unwrap() - phi).abs() < 1e-12);
        assert_eigenvector(&mat);
        let v = mat.pf_eigenvector().unwrap();
        assert!((v[0] / v[1] - phi).abs() < 1e-9);
    }

    #[test]
    fn arnoux_yoccoz_eigenvalues() {
        let g3 = AlmostPfMatrix::arnoux_yoccoz(3);
        assert_eq!(g3.rows(), &[vec![1, 0, 1], vec![1, 0, 0], vec![1, 1, 0]]);
        let l3 = g3.pf_eigenvalue().unwrap();
        assert!((l3 - 1.839286755214161).abs() < 1e-10);
        assert!((l3.powi(3) - l3.powi(2) - l3 - 1.0).abs() < 1e-9);
        assert_eigenvector(&g3);

        let g4 = AlmostPfMatrix::arnoux_yoccoz(4);
        assert!((g4.pf_eigenvalue().unwrap() - 1.9275619754829245).abs() < 1e-10);
        assert_eigenvector(&g4);
    }

    #[test]
    fn display_lists_rows() {
        let mat = m(&[&[0, 1], &[2, 3]]);
        assert_eq!(mat.to_string(), "0 1\n2 3\n");
    }
}
