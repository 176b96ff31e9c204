use super::{Valuation, ValuationIterator, Variable};
use std::fmt::{Display, Error, Formatter};
use std::ops::Index;

impl Valuation {
    /// Create a new valuation from a vector of variable values.
    pub fn new(values: Vec<bool>) -> Valuation {
        Valuation(values)
    }

    /// Create a valuation with all variables set to false.
    pub fn all_false(num_vars: u16) -> Valuation {
        Valuation(vec![false; num_vars as usize])
    }

    /// Get the value of a specific variable in this valuation.
    pub fn value(&self, variable: Variable) -> bool {
        self.0[variable.0 as usize]
    }

    /// Number of variables in this valuation.
    pub fn num_vars(&self) -> u16 {
        self.0.len() as u16
    }

    /// Convert the valuation to its underlying vector.
    pub fn vector(self) -> Vec<bool> {
        self.0
    }

    /// **(internal)** "Increment" this valuation if possible. The valuation is interpreted
    /// as a binary number whose most significant bit is the FIRST variable, so the carry
    /// runs from the last position towards the front. Returns `None` once the all-true
    /// valuation has been passed.
    pub(crate) fn next(&self) -> Option<Valuation> {
        let mut next_vec = self.0.clone();
        let mut carry = true; // initially, we want to increment
        for bit in next_vec.iter_mut().rev() {
            let new_value = *bit ^ carry;
            let new_carry = *bit && carry;
            *bit = new_value;
            carry = new_carry;
            if !new_carry {
                break;
            } // if there is no carry, we can just stop
        }

        if carry {
            None
        } else {
            Some(Valuation(next_vec))
        }
    }
}

impl Display for Valuation {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        if self.0.is_empty() {
            write!(f, "[]")?;
        } else {
            write!(f, "[{}", if self.0[0] { 1 } else { 0 })?;
            for i in 1..self.0.len() {
                write!(f, ",{}", if self.0[i] { 1 } else { 0 })?
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

/// Allow indexing of `Valuation` using `Variable`s.
impl Index<Variable> for Valuation {
    type Output = bool;

    fn index(&self, index: Variable) -> &Self::Output {
        &self.0[usize::from(index.0)]
    }
}

impl ValuationIterator {
    /// Create a new iterator over all valuations of `num_vars` variables, starting from
    /// the all-false valuation.
    pub fn new(num_vars: u16) -> ValuationIterator {
        ValuationIterator(Some(Valuation::all_false(num_vars)))
    }
}

impl Iterator for ValuationIterator {
    type Item = Valuation;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(valuation) = &self.0 {
            let ret = valuation.clone();
            let next = valuation.next();
            self.0 = next;
            Some(ret)
        } else {
            None
        }
    }
}
