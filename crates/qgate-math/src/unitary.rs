//! 2x2 unitary matrix operations.
//!
//! Provides synthesis of single-qubit rotations from Euler-like angles,
//! exponentiation to a real power and closed-form inversion.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;

use crate::error::{MathError, MathResult};

/// Off-diagonal magnitude below which [`Unitary2x2::power`] takes the
/// diagonal fast path.
pub const DIAGONAL_TOLERANCE: f64 = 1e-12;

/// Tolerance for floating point comparisons.
pub const EPSILON: f64 = 1e-10;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A 2x2 complex matrix in row-major order.
///
/// Every gate handled by the engine is unitary, but the type itself does not
/// enforce it: [`Unitary2x2::inverse`] and [`Unitary2x2::power`] are defined
/// for any matrix and only misbehave on singular or defective input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

/// Eigenvalues and the column matrix of matching eigenvectors.
struct EigenBasis {
    values: [Complex64; 2],
    vectors: Unitary2x2,
}

impl Unitary2x2 {
    /// Create a new 2x2 matrix.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// Create a diagonal matrix.
    pub fn diagonal(a: Complex64, d: Complex64) -> Self {
        Self::new(a, ZERO, ZERO, d)
    }

    /// Create the identity matrix.
    pub fn identity() -> Self {
        Self::diagonal(ONE, ONE)
    }

    /// Create a Hadamard matrix.
    pub fn h() -> Self {
        let s = Complex64::new(FRAC_1_SQRT_2, 0.0);
        Self::new(s, s, s, -s)
    }

    /// Create a Pauli-X matrix.
    pub fn x() -> Self {
        Self::new(ZERO, ONE, ONE, ZERO)
    }

    /// Synthesize U(θ, φ, λ).
    ///
    /// Uses the phase convention where `synthesize(0, 0, λ)` is the phase gate
    /// `diag(1, e^{iλ})` and the (0,0) entry is `e^{iθ/2}·cos(θ/2)`.
    pub fn synthesize(theta: f64, phi: f64, lambda: f64) -> Self {
        let (sin_t, cos_t) = theta.sin_cos();
        Self::new(
            Complex64::new(0.5 * (1.0 + cos_t), 0.5 * sin_t),
            Complex64::new(
                0.5 * (lambda.sin() - (lambda + theta).sin()),
                -0.5 * (lambda.cos() - (lambda + theta).cos()),
            ),
            Complex64::new(
                -0.5 * (phi.sin() - (phi + theta).sin()),
                0.5 * (phi.cos() - (phi + theta).cos()),
            ),
            Complex64::new(
                0.5 * ((phi + lambda).cos() + (phi + lambda + theta).cos()),
                0.5 * ((phi + lambda).sin() + (phi + lambda + theta).sin()),
            ),
        )
    }

    /// Synthesize U(θ, φ, λ) multiplied by the global phase `e^{iγ}`.
    pub fn synthesize_with_phase(theta: f64, phi: f64, lambda: f64, gamma: f64) -> Self {
        let u = Self::synthesize(theta, phi, lambda);
        if gamma == 0.0 {
            return u;
        }
        u.scale(Complex64::from_polar(1.0, gamma))
    }

    /// Multiply every entry by a scalar.
    pub fn scale(&self, factor: Complex64) -> Self {
        let [a, b, c, d] = self.data;
        Self::new(a * factor, b * factor, c * factor, d * factor)
    }

    /// Multiply this matrix by another: self * other.
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Get the conjugate transpose (dagger).
    pub fn dagger(&self) -> Self {
        Self::new(
            self.data[0].conj(),
            self.data[2].conj(),
            self.data[1].conj(),
            self.data[3].conj(),
        )
    }

    /// Determinant `ad - bc`.
    pub fn determinant(&self) -> Complex64 {
        let [a, b, c, d] = self.data;
        a * d - b * c
    }

    /// Trace `a + d`.
    pub fn trace(&self) -> Complex64 {
        self.data[0] + self.data[3]
    }

    /// Closed-form inverse `(1/det)·[[d, -b], [-c, a]]`.
    ///
    /// Callers must not invert a singular matrix: the result then contains
    /// non-finite entries. A well-formed unitary always has `|det| = 1`.
    /// Use [`Unitary2x2::try_inverse`] to have that case reported.
    pub fn inverse(&self) -> Self {
        let [a, b, c, d] = self.data;
        let det = self.determinant();
        Self::new(d / det, -b / det, -c / det, a / det)
    }

    /// Inverse that fails when `|det|` is below `tolerance` or the result is
    /// not finite.
    ///
    /// A zero determinant is reported even with `tolerance = 0`; the
    /// non-finite case surfaces as [`MathError::NonFinite`] with exponent -1.
    pub fn try_inverse(&self, tolerance: f64) -> MathResult<Self> {
        let determinant = self.determinant().norm();
        if determinant < tolerance {
            return Err(MathError::SingularMatrix {
                determinant,
                tolerance,
            });
        }
        let result = self.inverse();
        if result.is_finite() {
            Ok(result)
        } else {
            Err(MathError::NonFinite { exponent: -1.0 })
        }
    }

    /// Raise the matrix to a real power.
    ///
    /// Diagonal matrices (both off-diagonal magnitudes below
    /// [`DIAGONAL_TOLERANCE`]) raise each diagonal entry independently.
    /// Otherwise the matrix is diagonalised as `P·diag(λ1, λ2)·P⁻¹` and the
    /// eigenvalues are raised with the principal branch of the complex power.
    ///
    /// The discriminant is taken as `(a-d)² + 4bc` rather than `tr² - 4det`,
    /// so the eigenvalue gap of a unitary close to the identity does not
    /// cancel away. For a defective (non-normal) input with coinciding
    /// eigenvalues `P` is singular and the result is non-finite;
    /// [`Unitary2x2::try_power`] reports that case.
    pub fn power(&self, exponent: f64) -> Self {
        if let Some(diagonal) = self.diagonal_power(exponent) {
            return diagonal;
        }
        let basis = self.eigen_basis();
        Self::reconstruct(&basis, exponent, basis.vectors.inverse())
    }

    /// Power that fails on a defective eigenbasis or a non-finite result.
    ///
    /// `tolerance` bounds the determinant of the eigenvector matrix.
    pub fn try_power(&self, exponent: f64, tolerance: f64) -> MathResult<Self> {
        let result = match self.diagonal_power(exponent) {
            Some(diagonal) => diagonal,
            None => {
                let basis = self.eigen_basis();
                let p_inv = basis.vectors.try_inverse(tolerance).map_err(|_| {
                    MathError::DefectiveMatrix {
                        separation: (basis.values[0] - basis.values[1]).norm(),
                    }
                })?;
                Self::reconstruct(&basis, exponent, p_inv)
            }
        };
        if result.is_finite() {
            Ok(result)
        } else {
            Err(MathError::NonFinite { exponent })
        }
    }

    fn diagonal_power(&self, exponent: f64) -> Option<Self> {
        let [a, b, c, d] = self.data;
        if b.norm() < DIAGONAL_TOLERANCE && c.norm() < DIAGONAL_TOLERANCE {
            Some(Self::diagonal(a.powf(exponent), d.powf(exponent)))
        } else {
            None
        }
    }

    /// Eigenvalues from the trace/determinant quadratic and eigenvectors as
    /// the columns of `vectors`.
    fn eigen_basis(&self) -> EigenBasis {
        let [a, b, c, d] = self.data;
        let trace = self.trace();
        let half_gap = (a - d) / 2.0;
        let half_disc = (half_gap * half_gap + b * c).sqrt();
        let lam1 = trace / 2.0 + half_disc;
        let lam2 = trace / 2.0 - half_disc;

        // `lam - a` and `lam - d` are formed from the gap directly so they keep
        // their precision when `a ≈ d`. Avoid dividing by a vanishing `b`; `c`
        // is then non-zero because the diagonal case was handled before.
        let eigenvector = |shift: Complex64| {
            if b.norm() > DIAGONAL_TOLERANCE {
                (ONE, (shift - half_gap) / b)
            } else {
                ((shift + half_gap) / c, ONE)
            }
        };
        let (v1_0, v1_1) = eigenvector(half_disc);
        let (v2_0, v2_1) = eigenvector(-half_disc);

        EigenBasis {
            values: [lam1, lam2],
            vectors: Self::new(v1_0, v2_0, v1_1, v2_1),
        }
    }

    fn reconstruct(basis: &EigenBasis, exponent: f64, p_inv: Self) -> Self {
        let d1 = basis.values[0].powf(exponent);
        let d2 = basis.values[1].powf(exponent);
        basis
            .vectors
            .mul(&Self::diagonal(d1, d2))
            .mul(&p_inv)
    }

    /// Check that every entry is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|z| z.re.is_finite() && z.im.is_finite())
    }

    /// Entry-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(x, y)| (x - y).norm() < tolerance)
    }

    /// Check `U·U† ≈ I`.
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        self.mul(&self.dagger())
            .approx_eq(&Self::identity(), tolerance)
    }

    /// Check if this is approximately identity (up to global phase).
    pub fn is_identity(&self) -> bool {
        let [a, b, c, d] = self.data;
        if b.norm() > EPSILON || c.norm() > EPSILON {
            return false;
        }
        (a - d).norm() < EPSILON
    }
}

impl Default for Unitary2x2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary2x2 {
    type Output = Self;

    #[allow(clippy::needless_pass_by_value)]
    fn mul(self, rhs: Self) -> Self::Output {
        Unitary2x2::mul(&self, &rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_hadamard_squared() {
        let h = Unitary2x2::h();
        assert!((h * h).approx_eq(&Unitary2x2::identity(), TOL));
    }

    #[test]
    fn test_pauli_x_squared() {
        let x = Unitary2x2::x();
        assert!((x * x).approx_eq(&Unitary2x2::identity(), TOL));
    }

    #[test]
    fn test_synthesize_phase_gate() {
        let u = Unitary2x2::synthesize(0.0, 0.0, 1.0);
        let expected = Unitary2x2::diagonal(ONE, Complex64::from_polar(1.0, 1.0));
        assert!(u.approx_eq(&expected, TOL));
    }

    #[test]
    fn test_synthesize_is_unitary() {
        for &(theta, phi, lambda) in &[(0.3, 0.2, 1.0), (PI, 0.0, PI), (1.7, -2.1, 0.4)] {
            let u = Unitary2x2::synthesize(theta, phi, lambda);
            assert!(u.is_unitary(TOL), "U({theta}, {phi}, {lambda}) not unitary");
        }
    }

    #[test]
    fn test_synthesize_pi_is_x_up_to_phase() {
        // The (0,0) convention carries e^{iθ/2}, so U(π, 0, π) = iX.
        let u = Unitary2x2::synthesize(PI, 0.0, PI);
        let ix = Unitary2x2::x().scale(Complex64::new(0.0, 1.0));
        assert!(u.approx_eq(&ix, TOL));
    }

    #[test]
    fn test_global_phase() {
        let gamma = 0.7;
        let u = Unitary2x2::synthesize(0.4, 0.1, 0.2);
        let g = Unitary2x2::synthesize_with_phase(0.4, 0.1, 0.2, gamma);
        let phase = Complex64::from_polar(1.0, gamma);
        for i in 0..4 {
            assert!((u.data[i] * phase - g.data[i]).norm() < TOL);
        }
    }

    #[test]
    fn test_sqrt_x() {
        let sx = Unitary2x2::x().power(0.5);
        let half = Complex64::new(0.5, 0.5);
        let half_conj = Complex64::new(0.5, -0.5);
        assert!(sx.approx_eq(&Unitary2x2::new(half, half_conj, half_conj, half), TOL));
        assert!((sx * sx).approx_eq(&Unitary2x2::x(), TOL));
    }

    #[test]
    fn test_power_one_is_noop() {
        let u = Unitary2x2::synthesize(0.9, 0.3, -0.5);
        assert!(u.power(1.0).approx_eq(&u, TOL));
    }

    #[test]
    fn test_power_zero_is_identity() {
        let h = Unitary2x2::h();
        assert!(h.power(0.0).approx_eq(&Unitary2x2::identity(), TOL));
    }

    #[test]
    fn test_power_diagonal_fast_path() {
        let z = Unitary2x2::diagonal(ONE, -ONE);
        let s = z.power(0.5);
        assert!(s.approx_eq(&Unitary2x2::diagonal(ONE, Complex64::new(0.0, 1.0)), TOL));
    }

    #[test]
    fn test_power_with_vanishing_b() {
        // Lower-triangular: b = 0 forces the `c` eigenvector branch.
        let m = Unitary2x2::new(ONE, ZERO, Complex64::new(0.5, 0.0), Complex64::new(2.0, 0.0));
        let root = m.power(0.5);
        assert!((root * root).approx_eq(&m, TOL));
    }

    #[test]
    fn test_inverse() {
        let u = Unitary2x2::synthesize(1.1, 0.4, -0.8);
        assert!((u * u.inverse()).approx_eq(&Unitary2x2::identity(), TOL));
        assert!(u.inverse().approx_eq(&u.dagger(), TOL));
    }

    #[test]
    fn test_inverse_of_power_matches_negative_power() {
        let u = Unitary2x2::synthesize(0.8, 0.6, 0.2);
        let p = 0.37;
        assert!(u.power(p).inverse().approx_eq(&u.power(-p), TOL));
    }

    #[test]
    fn test_try_inverse_singular() {
        let m = Unitary2x2::new(ONE, ONE, ONE, ONE);
        assert!(matches!(
            m.try_inverse(1e-12),
            Err(MathError::SingularMatrix { .. })
        ));
        assert!(!m.inverse().is_finite());
    }

    #[test]
    fn test_try_power_defective() {
        // Jordan block: repeated eigenvalue 1, single eigenvector.
        let m = Unitary2x2::new(ONE, ONE, ZERO, ONE);
        assert!(matches!(
            m.try_power(0.5, 1e-12),
            Err(MathError::DefectiveMatrix { .. })
        ));
    }

    #[test]
    fn test_power_near_identity() {
        for theta in [1e-8, 1e-9, 1e-10] {
            let u = Unitary2x2::synthesize(theta, 0.0, 0.0);
            let root = u.power(0.5);
            assert!(root.is_finite(), "theta = {theta}");
            assert!(root.is_unitary(TOL));
            assert!((root * root).approx_eq(&u, TOL));
            assert!(u.try_power(0.5, 1e-12).is_ok());
        }
    }

    #[test]
    fn test_power_lower_triangular_eigenvectors() {
        let m = Unitary2x2::new(ONE, ZERO, Complex64::new(0.5, 0.0), Complex64::new(2.0, 0.0));
        let squared = m.power(2.0);
        assert!(squared.approx_eq(&(m * m), TOL));
    }

    #[test]
    fn test_try_inverse_zero_tolerance() {
        let m = Unitary2x2::diagonal(ZERO, ONE);
        assert!(matches!(
            m.try_inverse(0.0),
            Err(MathError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_try_power_unitary_ok() {
        let h = Unitary2x2::h();
        let root = h.try_power(0.5, 1e-12).unwrap();
        assert!((root * root).approx_eq(&h, TOL));
    }
}
