use super::Variable;
use std::fmt::{Display, Error, Formatter};

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.0)
    }
}

impl Variable {
    /// The position of this variable within its [crate::VariableSet] (column index in
    /// the table, `0` being the most significant bit of the row index).
    pub fn to_index(self) -> usize {
        self.0 as usize
    }
}
