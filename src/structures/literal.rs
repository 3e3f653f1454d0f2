/*!
Literals, as variables paired with a polarity.

A literal is encoded as a single integer, twice the index of its variable plus one if the literal is positive.
So, the variable of a literal is the literal divided by two, the polarity of a literal is the literal modulo two, and the negation of a literal flips the least significant bit.

The encoding also gives each literal a dense index, used to address watch lists.

Variable zero is reserved by every context, and so literals zero and one never occur in a formula.

```rust
# use prover_sat::structures::literal::Literal;
let p = Literal::new(3, true);

assert_eq!(p.variable(), 3);
assert!(p.polarity());
assert_eq!(-p, Literal::new(3, false));
assert_eq!(-(-p), p);
assert_eq!(p.index() ^ 1, (-p).index());
assert_eq!(format!("{}", -p), "-3");
```
*/

/// The index of a variable.
pub type VariableIndex = u32;

/// A literal, encoded as `2 * variable + polarity`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal(u32);

impl Literal {
    /// The literal of `variable` with `polarity`.
    pub fn new(variable: VariableIndex, polarity: bool) -> Self {
        Literal((variable << 1) | polarity as u32)
    }

    /// The variable of the literal.
    pub fn variable(&self) -> VariableIndex {
        self.0 >> 1
    }

    /// The polarity of the literal, with true for positive.
    pub fn polarity(&self) -> bool {
        self.0 & 1 == 1
    }

    /// The literal with the same variable and opposite polarity.
    pub fn negate(&self) -> Self {
        Literal(self.0 ^ 1)
    }

    /// The dense index of the literal.
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// The literal as a signed integer, using the index of the variable.
    pub fn as_int(&self) -> i64 {
        match self.polarity() {
            true => self.variable() as i64,
            false => -(self.variable() as i64),
        }
    }
}

impl std::ops::Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_int())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding() {
        for variable in 1..64 {
            let positive = Literal::new(variable, true);
            let negative = Literal::new(variable, false);

            assert_eq!(positive.index(), 2 * variable as usize + 1);
            assert_eq!(negative.index(), 2 * variable as usize);
            assert_eq!(positive.negate(), negative);
            assert_eq!(negative.variable(), variable);
            assert_eq!(positive.as_int(), -negative.as_int());
        }
    }
}
