use super::*;
use crate::boolean_expression::_impl_parser::{ExprToken, TokenKind};
use std::fmt::{Display, Formatter};

impl VariableSet {
    /// Create a new `VariableSet` from the given letters. The letters are stored in
    /// lexicographic order regardless of the order they are supplied in.
    ///
    /// *Panics:* the letters must be unique and drawn from `A`–`Z`.
    pub fn new(letters: &[char]) -> VariableSet {
        let mut sorted = letters.to_vec();
        sorted.sort_unstable();
        for i in 0..sorted.len() {
            if !sorted[i].is_ascii_uppercase() {
                panic!("Variable {:?} is invalid. Only A-Z can be used.", sorted[i]);
            }
            if i > 0 && sorted[i] == sorted[i - 1] {
                panic!("Variable {} appears more than once.", sorted[i]);
            }
        }
        VariableSet::from_sorted(sorted)
    }

    /// **(internal)** Collect the distinct variable letters of a normalized token tree
    /// into a `VariableSet`, enforcing the arity bounds before any parsing happens.
    pub(crate) fn extract(tokens: &[ExprToken]) -> Result<VariableSet, TableError> {
        let mut letters = Vec::new();
        collect_letters(tokens, &mut letters);
        letters.sort_unstable();
        letters.dedup();
        if letters.is_empty() {
            return Err(TableError::TooFewVariables);
        }
        if letters.len() > MAX_VARIABLES as usize {
            return Err(TableError::TooManyVariables { count: letters.len() });
        }
        Ok(VariableSet::from_sorted(letters))
    }

    /// **(internal)** Build the set from an already sorted, deduplicated letter vector.
    fn from_sorted(letters: Vec<char>) -> VariableSet {
        let mut index_mapping = HashMap::with_capacity_and_hasher(
            letters.len(),
            FxBuildHasher::default(),
        );
        for (index, letter) in letters.iter().enumerate() {
            index_mapping.insert(*letter, index as u16);
        }
        VariableSet {
            num_vars: letters.len() as u16,
            letters,
            index_mapping,
        }
    }

    /// Return the number of variables in this set.
    pub fn num_vars(&self) -> u16 {
        self.num_vars
    }

    /// Provides a vector of all `Variable`s in this set, in column order.
    pub fn variables(&self) -> Vec<Variable> {
        (0..self.num_vars).map(Variable).collect()
    }

    /// Create a `Variable` based on a variable letter. If the letter does not appear
    /// in this set, return `None`.
    pub fn var_by_name(&self, letter: char) -> Option<Variable> {
        self.index_mapping.get(&letter).cloned().map(Variable)
    }

    /// Obtain the letter of a specific `Variable`.
    pub fn name_of(&self, variable: Variable) -> char {
        self.letters[variable.0 as usize]
    }
}

/// **(internal)** Recursively push every variable letter of the token tree into `letters`.
fn collect_letters(tokens: &[ExprToken], letters: &mut Vec<char>) {
    for token in tokens {
        match &token.kind {
            TokenKind::Variable(letter) => letters.push(*letter),
            TokenKind::Group(inner) => collect_letters(inner, letters),
            _ => {}
        }
    }
}

impl Display for VariableSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        if self.letters.is_empty() {
            write!(f, "[]")?;
        } else {
            write!(f, "[{}", self.letters[0])?;
            for i in 1..self.letters.len() {
                write!(f, ",{}", self.letters[i])?
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boolean_expression::_impl_parser::tokenize;

    fn extract_from(input: &str) -> Result<VariableSet, TableError> {
        VariableSet::extract(&tokenize(input).unwrap())
    }

    #[test]
    fn variable_set_extract_sorted() {
        let variables = extract_from("(C | A) & B").unwrap();
        assert_eq!(3, variables.num_vars());
        assert_eq!("[A,B,C]", variables.to_string());
        assert_eq!(Some(Variable(0)), variables.var_by_name('A'));
        assert_eq!(Some(Variable(1)), variables.var_by_name('B'));
        assert_eq!(Some(Variable(2)), variables.var_by_name('C'));
        assert_eq!(None, variables.var_by_name('D'));
        assert_eq!('C', variables.name_of(Variable(2)));
    }

    #[test]
    fn variable_set_extract_deduplicates() {
        let variables = extract_from("A AND A AND NOT A").unwrap();
        assert_eq!(1, variables.num_vars());
        assert_eq!(vec![Variable(0)], variables.variables());
    }

    #[test]
    fn variable_set_extract_too_few() {
        assert_eq!(Err(TableError::TooFewVariables), extract_from("()"));
        assert_eq!(Err(TableError::TooFewVariables), extract_from("AND OR NOT"));
    }

    #[test]
    fn variable_set_extract_too_many() {
        // Seven distinct letters; the arity check fires before any parsing.
        assert_eq!(
            Err(TableError::TooManyVariables { count: 7 }),
            extract_from("A & B & C & D & E & F & G")
        );
        // Exactly six is still fine.
        assert!(extract_from("A & B & C & D & E & F").is_ok());
    }

    #[test]
    fn variable_set_new_unordered_input() {
        let variables = VariableSet::new(&['D', 'A', 'C']);
        assert_eq!("[A,C,D]", variables.to_string());
    }

    #[test]
    #[should_panic]
    fn variable_set_new_duplicate() {
        VariableSet::new(&['A', 'B', 'A']);
    }

    #[test]
    #[should_panic]
    fn variable_set_new_invalid_letter() {
        VariableSet::new(&['A', 'b']);
    }
}
