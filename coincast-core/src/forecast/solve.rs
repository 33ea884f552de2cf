//! Penalized least squares: β = (XᵀX + diag(λ))⁻¹ Xᵀy

use nalgebra::{DMatrix, DVector};

use super::ForecastError;

/// Solve the ridge-penalized normal equations.
///
/// `rows` is the design matrix in row-major form. Cholesky is tried first;
/// LU is the fallback for systems that are not numerically positive definite.
pub fn penalized_least_squares(
    rows: &[Vec<f64>],
    y: &[f64],
    penalties: &[f64],
) -> Result<Vec<f64>, ForecastError> {
    let n = rows.len();
    let p = penalties.len();
    let flat: Vec<f64> = rows.iter().flat_map(|r| r.iter().copied()).collect();
    if flat.len() != n * p || y.len() != n {
        return Err(ForecastError::Singular(format!(
            "design is {n}x{} but {p} penalties and {} targets",
            flat.len() / n.max(1),
            y.len()
        )));
    }

    let x = DMatrix::from_row_slice(n, p, &flat);
    let y_vec = DVector::from_column_slice(y);

    let xtx = x.transpose() * &x + DMatrix::from_diagonal(&DVector::from_column_slice(penalties));
    let xty = x.transpose() * y_vec;

    let beta = match xtx.clone().cholesky() {
        Some(chol) => chol.solve(&xty),
        None => xtx
            .lu()
            .solve(&xty)
            .ok_or_else(|| ForecastError::Singular("normal equations have no solution".into()))?,
    };

    if beta.iter().any(|b| !b.is_finite()) {
        return Err(ForecastError::NonFinite);
    }
    Ok(beta.iter().copied().collect())
}

/// Dot product of a design row with fitted coefficients.
pub fn predict_row(row: &[f64], beta: &[f64]) -> f64 {
    row.iter().zip(beta).map(|(x, b)| x * b).sum()
}
