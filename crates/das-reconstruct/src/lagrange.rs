//! Barycentric Lagrange interpolation over the scalar field.
//!
//! Each field-element position within a cell is treated as an independent
//! evaluation of a degree-`< k` polynomial at the supplied cell indices.
//! We evaluate the unique interpolating polynomial at arbitrary target
//! points using the barycentric form with batched inversion, which is
//! mathematically identical to expanding coefficients and applying
//! Horner's method but avoids materializing a `k`-term coefficient vector
//! per evaluation.

use das_field::FieldElement;

use crate::errors::ReconstructError;

/// Precomputed barycentric weights for a fixed set of interpolation nodes
/// `xs`. Shared across every field-element channel being interpolated over
/// the same node set.
pub struct BarycentricWeights {
    xs: Vec<FieldElement>,
    weights: Vec<FieldElement>,
}

impl BarycentricWeights {
    /// Computes `w_i = 1 / prod_{j != i} (x_i - x_j)` for each node.
    pub fn new(xs: &[FieldElement]) -> Result<Self, ReconstructError> {
        let k = xs.len();
        let mut weights = Vec::with_capacity(k);
        for i in 0..k {
            let mut denom = FieldElement::one();
            for (j, xj) in xs.iter().enumerate() {
                if j == i {
                    continue;
                }
                denom = denom.mul(&xs[i].sub(xj));
            }
            weights.push(denom.inverse()?);
        }
        Ok(Self {
            xs: xs.to_vec(),
            weights,
        })
    }

    /// Inverts every element of `values` using a single modular inversion
    /// plus `O(k)` multiplications (Montgomery's batch-inversion trick).
    fn batch_invert(values: &[FieldElement]) -> Result<Vec<FieldElement>, ReconstructError> {
        let k = values.len();
        let mut prefix = Vec::with_capacity(k);
        let mut running = FieldElement::one();
        for v in values {
            running = running.mul(v);
            prefix.push(running);
        }

        let mut inv_running = running.inverse()?;
        let mut inverses = vec![FieldElement::zero(); k];
        for i in (0..k).rev() {
            if i == 0 {
                inverses[i] = inv_running;
            } else {
                inverses[i] = inv_running.mul(&prefix[i - 1]);
                inv_running = inv_running.mul(&values[i]);
            }
        }
        Ok(inverses)
    }

    /// Evaluates the polynomial defined by `(xs, ys)` at `target`.
    pub fn evaluate(
        &self,
        ys: &[FieldElement],
        target: FieldElement,
    ) -> Result<FieldElement, ReconstructError> {
        debug_assert_eq!(self.xs.len(), ys.len());

        if let Some(i) = self.xs.iter().position(|x| *x == target) {
            return Ok(ys[i]);
        }

        let diffs: Vec<FieldElement> = self.xs.iter().map(|x| target.sub(x)).collect();
        let inv_diffs = Self::batch_invert(&diffs)?;

        let mut total = FieldElement::zero();
        for i in 0..self.xs.len() {
            let term = self.weights[i].mul(&ys[i]).mul(&inv_diffs[i]);
            total = total.add(&term);
        }

        let numerator = diffs.iter().fold(FieldElement::one(), |acc, d| acc.mul(d));
        Ok(total.mul(&numerator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluating_at_a_node_returns_its_own_value() {
        let xs: Vec<_> = (0..5).map(FieldElement::from_u64).collect();
        let ys: Vec<_> = (0..5).map(|v| FieldElement::from_u64(v * 3 + 1)).collect();
        let weights = BarycentricWeights::new(&xs).unwrap();

        for (i, &x) in xs.iter().enumerate() {
            assert_eq!(weights.evaluate(&ys, x).unwrap(), ys[i]);
        }
    }

    #[test]
    fn interpolates_a_constant_polynomial() {
        let xs: Vec<_> = (0..4).map(FieldElement::from_u64).collect();
        let constant = FieldElement::from_u64(42);
        let ys = vec![constant; 4];
        let weights = BarycentricWeights::new(&xs).unwrap();

        let target = FieldElement::from_u64(99);
        assert_eq!(weights.evaluate(&ys, target).unwrap(), constant);
    }

    #[test]
    fn interpolates_a_linear_polynomial() {
        // P(x) = 2x + 5
        let xs: Vec<_> = (0..3).map(FieldElement::from_u64).collect();
        let ys: Vec<_> = xs
            .iter()
            .map(|x| x.mul(&FieldElement::from_u64(2)).add(&FieldElement::from_u64(5)))
            .collect();
        let weights = BarycentricWeights::new(&xs).unwrap();

        let target = FieldElement::from_u64(10);
        let expected = FieldElement::from_u64(10)
            .mul(&FieldElement::from_u64(2))
            .add(&FieldElement::from_u64(5));
        assert_eq!(weights.evaluate(&ys, target).unwrap(), expected);
    }
}
