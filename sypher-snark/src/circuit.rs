use crate::SnarkError;
use bls::Scalar;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variable {
    One,
    Public(usize),
    Private(usize),
}

/// `Σ coeff · variable`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinearCombination {
    terms: Vec<(Variable, Scalar)>,
}

impl LinearCombination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constant(value: Scalar) -> Self {
        Self::new().with(Variable::One, value)
    }

    pub fn with(mut self, variable: Variable, coeff: Scalar) -> Self {
        self.terms.push((variable, coeff));
        self
    }

    pub fn terms(&self) -> &[(Variable, Scalar)] {
        &self.terms
    }
}

impl From<Variable> for LinearCombination {
    fn from(variable: Variable) -> Self {
        Self::new().with(variable, Scalar::one())
    }
}

/// `⟨a, z⟩ · ⟨b, z⟩ = ⟨c, z⟩`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Constraint {
    pub a: LinearCombination,
    pub b: LinearCombination,
    pub c: LinearCombination,
}

/// Values of the allocated variables, in allocation order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    pub public: Vec<Scalar>,
    pub private: Vec<Scalar>,
}

/// Rank-1 constraint system over the BLS12-381 scalar field. Variables are
/// laid out as `z = (1, public…, private…)`.
#[derive(Clone, Debug, Default)]
pub struct ConstraintSystem {
    num_public: usize,
    num_private: usize,
    constraints: Vec<Constraint>,
}

impl ConstraintSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc_public(&mut self) -> Variable {
        self.num_public += 1;
        Variable::Public(self.num_public - 1)
    }

    pub fn alloc_private(&mut self) -> Variable {
        self.num_private += 1;
        Variable::Private(self.num_private - 1)
    }

    pub fn enforce(
        &mut self,
        a: impl Into<LinearCombination>,
        b: impl Into<LinearCombination>,
        c: impl Into<LinearCombination>,
    ) {
        self.constraints.push(Constraint {
            a: a.into(),
            b: b.into(),
            c: c.into(),
        });
    }

    pub fn num_public(&self) -> usize {
        self.num_public
    }

    pub fn num_private(&self) -> usize {
        self.num_private
    }

    pub fn num_variables(&self) -> usize {
        1 + self.num_public + self.num_private
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Position of a variable in `z`.
    pub fn index(&self, variable: Variable) -> usize {
        match variable {
            Variable::One => 0,
            Variable::Public(i) => 1 + i,
            Variable::Private(i) => 1 + self.num_public + i,
        }
    }

    /// Dense coefficient rows of the three constraint matrices.
    pub(crate) fn matrices(&self) -> [Vec<Vec<Scalar>>; 3] {
        [
            self.dense(|c| &c.a),
            self.dense(|c| &c.b),
            self.dense(|c| &c.c),
        ]
    }

    fn dense(&self, select: fn(&Constraint) -> &LinearCombination) -> Vec<Vec<Scalar>> {
        self.constraints
            .iter()
            .map(|constraint| {
                let mut row = vec![Scalar::zero(); self.num_variables()];
                for (variable, coeff) in select(constraint).terms() {
                    row[self.index(*variable)] += coeff;
                }
                row
            })
            .collect()
    }

    /// Builds `z` and checks every constraint.
    pub fn witness(&self, assignment: &Assignment) -> Result<Vec<Scalar>, SnarkError> {
        if assignment.public.len() != self.num_public
            || assignment.private.len() != self.num_private
        {
            return Err(SnarkError::InvalidAssignment(format!(
                "expected {} public and {} private values, got {} and {}",
                self.num_public,
                self.num_private,
                assignment.public.len(),
                assignment.private.len()
            )));
        }
        let mut z = Vec::with_capacity(self.num_variables());
        z.push(Scalar::one());
        z.extend_from_slice(&assignment.public);
        z.extend_from_slice(&assignment.private);

        for (i, constraint) in self.constraints.iter().enumerate() {
            let a = self.evaluate(&constraint.a, &z);
            let b = self.evaluate(&constraint.b, &z);
            let c = self.evaluate(&constraint.c, &z);
            if a * b != c {
                return Err(SnarkError::Unsatisfied(i));
            }
        }
        Ok(z)
    }

    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        self.witness(assignment).is_ok()
    }

    fn evaluate(&self, lc: &LinearCombination, z: &[Scalar]) -> Scalar {
        lc.terms()
            .iter()
            .fold(Scalar::zero(), |acc, (variable, coeff)| {
                acc + coeff * z[self.index(*variable)]
            })
    }
}
