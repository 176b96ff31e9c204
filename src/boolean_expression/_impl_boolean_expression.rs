use super::BoolExpression;
use super::BoolExpression::*;
use super::_impl_parser::parse_boolean_expression;
use crate::{TableError, Valuation, VariableSet};
use std::convert::TryFrom;
use std::fmt::{Display, Error, Formatter};

impl TryFrom<&str> for BoolExpression {
    type Error = TableError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse_boolean_expression(value)
    }
}

impl Display for BoolExpression {
    /// Render the expression in its canonical keyword spelling. The output parses back
    /// into an identical tree.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Var(letter) => write!(f, "{}", letter),
            Not(inner) => write!(f, "NOT {}", inner),
            And(l, r) => write!(f, "({} AND {})", l, r),
            Or(l, r) => write!(f, "({} OR {})", l, r),
            Xor(l, r) => write!(f, "({} XOR {})", l, r),
            Nand(l, r) => write!(f, "({} NAND {})", l, r),
            Nor(l, r) => write!(f, "({} NOR {})", l, r),
            Xnor(l, r) => write!(f, "({} XNOR {})", l, r),
        }
    }
}

impl BoolExpression {
    /// The distinct variable letters used in this expression, in lexicographic order.
    pub fn support(&self) -> Vec<char> {
        let mut letters = Vec::new();
        self.collect_support(&mut letters);
        letters.sort_unstable();
        letters.dedup();
        letters
    }

    fn collect_support(&self, letters: &mut Vec<char>) {
        match self {
            Var(letter) => letters.push(*letter),
            Not(inner) => inner.collect_support(letters),
            And(l, r) | Or(l, r) | Xor(l, r) | Nand(l, r) | Nor(l, r) | Xnor(l, r) => {
                l.collect_support(letters);
                r.collect_support(letters);
            }
        }
    }
}

/// Methods for evaluating boolean expressions.
impl VariableSet {
    /// Evaluate the given [BoolExpression] under one [Valuation] of this set.
    ///
    /// Returns `None` if the expression refers to a letter outside this set or if the
    /// valuation arity does not match; neither can happen for a table produced by the
    /// regular pipeline, where all three values come from the same token stream.
    pub fn safe_eval(&self, expression: &BoolExpression, valuation: &Valuation) -> Option<bool> {
        if valuation.num_vars() != self.num_vars() {
            return None;
        }
        self.eval_recursive(expression, valuation)
    }

    fn eval_recursive(&self, expression: &BoolExpression, valuation: &Valuation) -> Option<bool> {
        match expression {
            Var(letter) => self.var_by_name(*letter).map(|v| valuation.value(v)),
            Not(inner) => self.eval_recursive(inner, valuation).map(|value| !value),
            And(l, r) => {
                let left = self.eval_recursive(l, valuation)?;
                let right = self.eval_recursive(r, valuation)?;
                Some(left & right)
            }
            Or(l, r) => {
                let left = self.eval_recursive(l, valuation)?;
                let right = self.eval_recursive(r, valuation)?;
                Some(left | right)
            }
            Xor(l, r) => {
                let left = self.eval_recursive(l, valuation)?;
                let right = self.eval_recursive(r, valuation)?;
                Some(left != right)
            }
            Nand(l, r) => {
                let left = self.eval_recursive(l, valuation)?;
                let right = self.eval_recursive(r, valuation)?;
                Some(!(left & right))
            }
            Nor(l, r) => {
                let left = self.eval_recursive(l, valuation)?;
                let right = self.eval_recursive(r, valuation)?;
                Some(!(left | right))
            }
            Xnor(l, r) => {
                let left = self.eval_recursive(l, valuation)?;
                let right = self.eval_recursive(r, valuation)?;
                Some(left == right)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expression_support() {
        let expression = BoolExpression::try_from("C AND (A OR C) NAND NOT B").unwrap();
        assert_eq!(vec!['A', 'B', 'C'], expression.support());
        let single = BoolExpression::try_from("NOT NOT Q").unwrap();
        assert_eq!(vec!['Q'], single.support());
    }

    #[test]
    fn safe_eval_operators() {
        let variables = VariableSet::new(&['A', 'B']);
        // (expression, expected results for valuations 00, 01, 10, 11)
        let cases = vec![
            ("A AND B", [false, false, false, true]),
            ("A OR B", [false, true, true, true]),
            ("A XOR B", [false, true, true, false]),
            ("A NAND B", [true, true, true, false]),
            ("A NOR B", [true, false, false, false]),
            ("A XNOR B", [true, false, false, true]),
            ("NOT A", [true, true, false, false]),
        ];
        for (input, expected) in cases {
            let expression = BoolExpression::try_from(input).unwrap();
            for (i, valuation) in crate::ValuationIterator::new(2).enumerate() {
                assert_eq!(
                    Some(expected[i]),
                    variables.safe_eval(&expression, &valuation),
                    "{} in {}",
                    input,
                    valuation
                );
            }
        }
    }

    #[test]
    fn safe_eval_unknown_variable() {
        let variables = VariableSet::new(&['A']);
        let expression = BoolExpression::try_from("A AND B").unwrap();
        let valuation = Valuation::all_false(1);
        assert_eq!(None, variables.safe_eval(&expression, &valuation));
    }

    #[test]
    fn safe_eval_arity_mismatch() {
        let variables = VariableSet::new(&['A', 'B']);
        let expression = BoolExpression::try_from("A").unwrap();
        let valuation = Valuation::all_false(3);
        assert_eq!(None, variables.safe_eval(&expression, &valuation));
    }
}
