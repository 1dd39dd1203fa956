use nalgebra::{DMatrix, DVector};

use crate::error::{Result, SplineError};

/// Direct solve of `A x = b` by LU decomposition with partial pivoting.
///
/// # Errors
/// [SplineError::DimensionMismatch] on inconsistent shapes, [SplineError::SingularSystem]
/// when the decomposition has a zero pivot.
pub fn solve_direct(matrix: &DMatrix<f64>, rhs: &DVector<f64>) -> Result<DVector<f64>> {
    check_square(matrix)?;
    if rhs.len() != matrix.nrows() {
        return Err(SplineError::DimensionMismatch {
            what: "right-hand side",
            expected: matrix.nrows(),
            found: rhs.len(),
        });
    }

    let lu = matrix.clone().lu();
    match lu.solve(rhs) {
        Some(solution) => Ok(solution),
        None => {
            let u = lu.u();
            let row = (0..u.nrows()).find(|&i| u[(i, i)] == 0.0).unwrap_or(0);
            Err(SplineError::SingularSystem { row, value: 0.0 })
        }
    }
}

/// Euclidean norm of the residual `b - A x`.
pub fn residual_norm(matrix: &DMatrix<f64>, x: &DVector<f64>, rhs: &DVector<f64>) -> Result<f64> {
    if x.len() != matrix.ncols() {
        return Err(SplineError::DimensionMismatch {
            what: "solution vector",
            expected: matrix.ncols(),
            found: x.len(),
        });
    }
    if rhs.len() != matrix.nrows() {
        return Err(SplineError::DimensionMismatch {
            what: "right-hand side",
            expected: matrix.nrows(),
            found: rhs.len(),
        });
    }
    Ok((rhs - matrix * x).norm())
}

/// Strict row-wise diagonal dominance: `|A[i,i]| > sum_{j != i} |A[i,j]|` for every row.
pub fn is_diagonally_dominant(matrix: &DMatrix<f64>) -> Result<bool> {
    check_square(matrix)?;

    let dominant = matrix.row_iter().enumerate().all(|(i, row)| {
        let off_diagonal: f64 = row
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, v)| v.abs())
            .sum();
        row[i].abs() > off_diagonal
    });
    Ok(dominant)
}

fn check_square(matrix: &DMatrix<f64>) -> Result<()> {
    if matrix.nrows() != matrix.ncols() {
        return Err(SplineError::DimensionMismatch {
            what: "matrix columns",
            expected: matrix.nrows(),
            found: matrix.ncols(),
        });
    }
    Ok(())
}
