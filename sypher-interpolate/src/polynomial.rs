use crate::{Interpolate, InterpolationError};
use std::ops::{AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Dense polynomial, coefficients in ascending order of degree.
#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial<T> {
    coeffs: Vec<T>,
}

impl<T> Polynomial<T> {
    pub fn new(coeffs: Vec<T>) -> Self {
        Self { coeffs }
    }

    pub fn coeffs(&self) -> &[T] {
        &self.coeffs
    }

    pub fn into_coeffs(self) -> Vec<T> {
        self.coeffs
    }
}

impl<T> Polynomial<T>
where
    T: Interpolate
        + Copy
        + PartialEq
        + Mul<Output = T>
        + Neg<Output = T>
        + AddAssign
        + SubAssign
        + MulAssign,
{
    pub fn interpolate(x: &[T], y: &[T]) -> Result<Self, InterpolationError> {
        if x.len() != y.len() {
            return Err(InterpolationError::InvalidInputLengths(x.len(), y.len()));
        }

        let n = x.len();
        if n == 0 {
            return Ok(Self::new(Vec::new()));
        }

        let mut s = vec![T::zero(); n];
        let mut coeffs = vec![T::zero(); n];

        s.push(T::one());
        s[n - 1] = -x[0];

        for (i, &x_elem) in x.iter().enumerate().skip(1) {
            for j in n - 1 - i..n - 1 {
                let aux = x_elem * s[j + 1];
                s[j] -= aux;
            }
            s[n - 1] -= x_elem;
        }

        for i in 0..n {
            let mut phi = T::zero();
            for j in (1..=n).rev() {
                phi *= x[i];
                phi += T::from_u64(j as u64) * s[j];
            }
            let maybe_ff: Option<T> = <T as Interpolate>::inverse(&phi).into();
            let ff = maybe_ff.ok_or(InterpolationError::TriedToInvertZero)?;
            let mut b = T::one();
            for j in (0..n).rev() {
                let aux = b * ff * y[i];
                coeffs[j] += aux;
                b *= x[i];
                b += s[j];
            }
        }

        Ok(Self { coeffs })
    }

    /// Monic polynomial vanishing exactly on `roots`.
    pub fn vanishing(roots: &[T]) -> Self {
        let mut coeffs = vec![T::one()];
        for &root in roots {
            let mut next = vec![T::zero(); coeffs.len() + 1];
            for (i, &c) in coeffs.iter().enumerate() {
                next[i + 1] += c;
                next[i] -= c * root;
            }
            coeffs = next;
        }
        Self { coeffs }
    }

    pub fn evaluate(&self, at: T) -> T {
        let mut ret = T::zero();
        for coeff in self.coeffs.iter().rev() {
            ret *= at;
            ret += *coeff;
        }
        ret
    }

    /// Degree of the polynomial, `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.iter().rposition(|c| *c != T::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.degree().is_none()
    }

    /// Euclidean division, returns `(quotient, remainder)`.
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self), InterpolationError> {
        let divisor_degree = divisor.degree().ok_or(InterpolationError::DivisionByZero)?;
        let lead_inverse: Option<T> =
            <T as Interpolate>::inverse(&divisor.coeffs[divisor_degree]).into();
        let lead_inverse = lead_inverse.ok_or(InterpolationError::TriedToInvertZero)?;

        let mut remainder = self.coeffs.clone();
        let self_degree = match self.degree() {
            Some(degree) if degree >= divisor_degree => degree,
            _ => return Ok((Self::new(Vec::new()), self.trimmed())),
        };

        let mut quotient = vec![T::zero(); self_degree - divisor_degree + 1];
        for shift in (0..quotient.len()).rev() {
            let factor = remainder[shift + divisor_degree] * lead_inverse;
            quotient[shift] = factor;
            for (j, &d) in divisor.coeffs[..=divisor_degree].iter().enumerate() {
                remainder[shift + j] -= factor * d;
            }
        }

        remainder.truncate(divisor_degree);
        Ok((Self::new(quotient), Self::new(remainder).trimmed()))
    }

    fn trimmed(&self) -> Self {
        let len = self.degree().map_or(0, |d| d + 1);
        Self {
            coeffs: self.coeffs[..len].to_vec(),
        }
    }
}

impl<T> Sub for &Polynomial<T>
where
    T: Interpolate + Copy + AddAssign + SubAssign,
{
    type Output = Polynomial<T>;

    fn sub(self, rhs: Self) -> Self::Output {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        let mut coeffs = vec![T::zero(); len];
        for (i, &c) in self.coeffs.iter().enumerate() {
            coeffs[i] += c;
        }
        for (i, &c) in rhs.coeffs.iter().enumerate() {
            coeffs[i] -= c;
        }
        Polynomial { coeffs }
    }
}

impl<T> Mul for &Polynomial<T>
where
    T: Interpolate + Copy + Mul<Output = T> + AddAssign,
{
    type Output = Polynomial<T>;

    fn mul(self, rhs: Self) -> Self::Output {
        if self.coeffs.is_empty() || rhs.coeffs.is_empty() {
            return Polynomial { coeffs: Vec::new() };
        }
        let mut coeffs = vec![T::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        Polynomial { coeffs }
    }
}
