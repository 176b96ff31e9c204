use super::*;
use crate::boolean_expression::_impl_parser::{parse_token_stream, tokenize};
use log::debug;
use std::fmt::{Display, Formatter};

impl TruthTable {
    /// Run the whole pipeline for one expression string: normalize it into canonical
    /// tokens, extract the variable set, parse the tokens into an expression tree
    /// (exactly once), and evaluate the tree under every valuation.
    ///
    /// The result is a brand-new immutable table; re-running the pipeline on the same
    /// string always produces an identical table.
    pub fn generate(expression: &str) -> Result<TruthTable, TableError> {
        let tokens = tokenize(expression)?;
        let variables = VariableSet::extract(&tokens)?;
        let tree = parse_token_stream(&tokens)?;
        debug!(
            "parsed {} over {} variables {}",
            tree,
            variables.num_vars(),
            variables
        );

        let mut rows = Vec::with_capacity(1usize << variables.num_vars());
        for valuation in ValuationIterator::new(variables.num_vars()) {
            let value = match variables.safe_eval(&tree, &valuation) {
                Some(value) => value,
                None => {
                    return Err(TableError::Evaluation {
                        reason: format!("cannot evaluate {} in {}", tree, variables),
                    });
                }
            };
            rows.push(TruthTableRow { valuation, value });
        }
        debug!("completed a table with {} rows", rows.len());
        Ok(TruthTable { variables, rows })
    }

    /// The table header: the ordered set of variables, one per column.
    pub fn variables(&self) -> &VariableSet {
        &self.variables
    }

    /// All rows of the table, in binary counting order of their valuations.
    pub fn rows(&self) -> &[TruthTableRow] {
        &self.rows
    }

    /// Number of rows in this table; always `2^n` for `n` variables.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}

impl TruthTableRow {
    /// The variable assignment this row was evaluated under.
    pub fn valuation(&self) -> &Valuation {
        &self.valuation
    }

    /// The value of the expression under this row's valuation.
    pub fn value(&self) -> bool {
        self.value
    }
}

impl Display for TruthTable {
    /// A plain-text rendering for logs and test diagnostics: the header line followed by
    /// one `valuation -> value` line per row.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        writeln!(f, "{}", self.variables)?;
        for row in &self.rows {
            writeln!(f, "{} -> {}", row.valuation, if row.value { 1 } else { 0 })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Collect just the result column of a generated table.
    fn results(expression: &str) -> Vec<bool> {
        TruthTable::generate(expression)
            .unwrap()
            .rows()
            .iter()
            .map(|row| row.value())
            .collect()
    }

    #[test]
    fn table_and() {
        // Only the (A,B) = (1,1) row is true.
        assert_eq!(vec![false, false, false, true], results("A AND B"));
    }

    #[test]
    fn table_xor() {
        assert_eq!(vec![false, true, true, false], results("A XOR B"));
    }

    #[test]
    fn table_nand_complements_and() {
        let nand = results("A NAND B");
        let and = results("A AND B");
        for i in 0..4 {
            assert_eq!(nand[i], !and[i], "row {}", i);
        }
    }

    #[test]
    fn table_not() {
        assert_eq!(vec![true, false], results("NOT A"));
    }

    #[test]
    fn table_row_count_is_exponential() {
        for (expression, num_vars) in vec![
            ("A", 1),
            ("A & B", 2),
            ("A | B | C", 3),
            ("(A ^ B) NAND (C XNOR D)", 4),
            ("A & B & C & D & E & F", 6),
        ] {
            let table = TruthTable::generate(expression).unwrap();
            assert_eq!(num_vars, table.variables().num_vars());
            assert_eq!(1usize << num_vars, table.num_rows());
        }
    }

    #[test]
    fn table_rows_follow_binary_counting() {
        let table = TruthTable::generate("A OR (B AND C)").unwrap();
        for (i, row) in table.rows().iter().enumerate() {
            for variable in table.variables().variables() {
                let bit = ((i >> (2 - variable.to_index())) & 1) == 1;
                assert_eq!(bit, row.valuation().value(variable));
            }
        }
    }

    #[test]
    fn table_first_variable_is_most_significant() {
        // True exactly when A = 1 and B = 0, i.e. in row 2 (binary 10).
        let table = TruthTable::generate("A AND NOT B").unwrap();
        let values: Vec<bool> = table.rows().iter().map(|row| row.value()).collect();
        assert_eq!(vec![false, false, true, false], values);
    }

    #[test]
    fn table_column_order_ignores_input_order() {
        // Letters are sorted lexicographically no matter where they appear in the text.
        let table = TruthTable::generate("B AND NOT A").unwrap();
        assert_eq!("[A,B]", table.variables().to_string());
        // True exactly when A = 0 and B = 1, i.e. in row 1 (binary 01).
        let values: Vec<bool> = table.rows().iter().map(|row| row.value()).collect();
        assert_eq!(vec![false, true, false, false], values);
    }

    #[test]
    fn table_spelling_equivalences() {
        assert_eq!(
            TruthTable::generate("A AND B").unwrap(),
            TruthTable::generate("A . B").unwrap()
        );
        assert_eq!(
            TruthTable::generate("A OR B").unwrap(),
            TruthTable::generate("A + B").unwrap()
        );
        assert_eq!(
            TruthTable::generate("NOT A").unwrap(),
            TruthTable::generate("~A").unwrap()
        );
        assert_eq!(
            TruthTable::generate("A xor B").unwrap(),
            TruthTable::generate("A ^ B").unwrap()
        );
    }

    #[test]
    fn table_idempotent() {
        let expression = "NOT (A NAND B) XOR (C NOR A)";
        let first = TruthTable::generate(expression).unwrap();
        let second = TruthTable::generate(expression).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn table_unbalanced_parenthesis() {
        let result = TruthTable::generate("A AND (B");
        assert!(matches!(result, Err(TableError::Syntax { .. })));
    }

    #[test]
    fn table_too_many_variables_before_parsing() {
        // The expression is also syntactically broken after the seventh letter, but the
        // arity check runs first and wins.
        assert_eq!(
            Err(TableError::TooManyVariables { count: 7 }),
            TruthTable::generate("A & B & C & D & E & F & G AND")
        );
    }

    #[test]
    fn table_empty_expression() {
        assert_eq!(Err(TableError::EmptyExpression), TruthTable::generate(" "));
    }

    #[test]
    fn table_print() {
        let table = TruthTable::generate("A AND B").unwrap();
        let expected = "[A,B]\n\
                        [0,0] -> 0\n\
                        [0,1] -> 0\n\
                        [1,0] -> 0\n\
                        [1,1] -> 1\n";
        assert_eq!(expected, table.to_string());
    }
}
