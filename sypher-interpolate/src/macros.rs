macro_rules! test_polynomial {
    ($t: ty) => {
        #[cfg(test)]
        mod test {
            use crate::{Interpolate, InterpolationError, Polynomial};
            use std::ops::Neg;

            type TestScalar = $t;

            fn scalar(num: u64) -> TestScalar {
                <TestScalar as Interpolate>::from_u64(num)
            }

            fn scalars(nums: &[u64]) -> Vec<TestScalar> {
                nums.iter().map(|&n| scalar(n)).collect()
            }

            #[test]
            fn interpolate_polynomial() {
                let x = vec![scalar(3); 3];
                let y = vec![scalar(5); 4];
                assert_eq!(
                    Polynomial::interpolate(&x, &y),
                    Err(InterpolationError::InvalidInputLengths(3, 4))
                );

                // constant polynomial (y = 53)
                let poly = Polynomial::interpolate(&[scalar(3)], &[scalar(53)]).unwrap();
                assert_eq!(poly.coeffs()[0], scalar(53));

                // simple first order polynomial (y = x)
                let x = scalars(&[1, 2, 3]);
                let poly = Polynomial::interpolate(&x, &x).unwrap();
                assert_eq!(poly.coeffs()[0], <TestScalar as Interpolate>::zero());
                assert_eq!(poly.coeffs()[1], <TestScalar as Interpolate>::one());
                assert_eq!(poly.coeffs()[2], <TestScalar as Interpolate>::zero());

                // first order polynomial (y = 32 * x - 13)
                let (x, y) = (scalars(&[2, 3]), scalars(&[51, 83]));
                let poly = Polynomial::interpolate(&x, &y).unwrap();
                assert_eq!(poly.coeffs()[0], scalar(13).neg());
                assert_eq!(poly.coeffs()[1], scalar(32));

                // y = x^4 + 0 * x^3 + 3 * x^2 + 2 * x + 14
                let x = scalars(&[1, 2, 3, 4, 5, 6]);
                let y = scalars(&[20, 46, 128, 326, 724, 1430]);
                let poly = Polynomial::interpolate(&x, &y).unwrap();
                assert_eq!(poly.coeffs(), scalars(&[14, 2, 3, 0, 1, 0]).as_slice());
                assert_eq!(poly.degree(), Some(4));
                assert_eq!(poly.evaluate(scalar(7)), scalar(2576));
            }

            #[test]
            fn empty_interpolation() {
                let poly = Polynomial::<TestScalar>::interpolate(&[], &[]).unwrap();
                assert!(poly.is_zero());
                assert_eq!(poly.evaluate(scalar(12)), scalar(0));
            }

            #[test]
            fn vanishing_polynomial() {
                let roots = scalars(&[1, 2, 3]);
                let t = Polynomial::vanishing(&roots);
                assert_eq!(t.degree(), Some(3));
                for root in roots {
                    assert_eq!(t.evaluate(root), scalar(0));
                }
                // (4 - 1)(4 - 2)(4 - 3)
                assert_eq!(t.evaluate(scalar(4)), scalar(6));
            }

            #[test]
            fn arithmetic() {
                // (x + 1) * (x + 2) = x^2 + 3x + 2
                let a = Polynomial::new(scalars(&[1, 1]));
                let b = Polynomial::new(scalars(&[2, 1]));
                let product = &a * &b;
                assert_eq!(product.coeffs(), scalars(&[2, 3, 1]).as_slice());

                let diff = &product - &a;
                assert_eq!(diff.coeffs(), scalars(&[1, 2, 1]).as_slice());

                // subtracting a longer polynomial keeps its degree
                let negated = &a - &product;
                assert_eq!(negated.degree(), Some(2));
            }

            #[test]
            fn euclidean_division() {
                // x^3 + 3x^2 + 5x + 7 = (x + 1)(x^2 + 2x + 3) + 4
                let dividend = Polynomial::new(scalars(&[7, 5, 3, 1]));
                let divisor = Polynomial::new(scalars(&[1, 1]));
                let (q, r) = dividend.div_rem(&divisor).unwrap();
                assert_eq!(q.coeffs(), scalars(&[3, 2, 1]).as_slice());
                assert_eq!(r.coeffs(), scalars(&[4]).as_slice());

                // exact division leaves an empty remainder
                let t = Polynomial::vanishing(&scalars(&[1, 2]));
                let h = Polynomial::new(scalars(&[9, 4, 2]));
                let (q, r) = (&t * &h).div_rem(&t).unwrap();
                assert_eq!(q, h);
                assert!(r.is_zero());

                // lower degree dividend
                let (q, r) = divisor.div_rem(&dividend).unwrap();
                assert!(q.is_zero());
                assert_eq!(r, divisor);

                let zero = Polynomial::new(vec![scalar(0); 3]);
                assert_eq!(
                    dividend.div_rem(&zero),
                    Err(InterpolationError::DivisionByZero)
                );
            }
        }
    };
}

pub(crate) use test_polynomial;
