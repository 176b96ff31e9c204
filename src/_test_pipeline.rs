//!
//! Here, we have a small toolbox for exercising the whole pipeline at once. It builds a
//! random evaluable tree of operations where each leaf is a random variable letter and
//! each node is one binary boolean operation, possibly negated.
//!
//! Each tree is just a boolean formula, so we can render it to text, push the text through
//! the regular tokenize-extract-parse-evaluate pipeline, and exhaustively check that every
//! row of the produced table matches the value computed directly on the op tree. To get
//! predictable test cases, we use a predefined set of randomness seeds.

use crate::boolean_expression::BoolExpression;
use crate::*;
use rand::prelude::StdRng;
use rand::{RngCore, SeedableRng};
use std::collections::HashMap;
use std::convert::TryFrom;

const LETTER_POOL: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];

/// Create a random expression tree with `2^depth` leaves.
fn random_expression(rand: &mut StdRng, depth: u8) -> BoolExpression {
    if depth == 0 {
        let letter = LETTER_POOL[(rand.next_u32() as usize) % LETTER_POOL.len()];
        return BoolExpression::Var(letter);
    }
    let left = Box::new(random_expression(rand, depth - 1));
    let right = Box::new(random_expression(rand, depth - 1));
    let node = match rand.next_u32() % 6 {
        0 => BoolExpression::And(left, right),
        1 => BoolExpression::Or(left, right),
        2 => BoolExpression::Xor(left, right),
        3 => BoolExpression::Nand(left, right),
        4 => BoolExpression::Nor(left, right),
        _ => BoolExpression::Xnor(left, right),
    };
    if rand.next_u32() % 2 == 0 {
        BoolExpression::Not(Box::new(node))
    } else {
        node
    }
}

/// Evaluate the tree directly, without any of the pipeline machinery.
fn eval_reference(expression: &BoolExpression, assignment: &HashMap<char, bool>) -> bool {
    match expression {
        BoolExpression::Var(letter) => assignment[letter],
        BoolExpression::Not(inner) => !eval_reference(inner, assignment),
        BoolExpression::And(l, r) => {
            eval_reference(l, assignment) && eval_reference(r, assignment)
        }
        BoolExpression::Or(l, r) => {
            eval_reference(l, assignment) || eval_reference(r, assignment)
        }
        BoolExpression::Xor(l, r) => {
            eval_reference(l, assignment) != eval_reference(r, assignment)
        }
        BoolExpression::Nand(l, r) => {
            !(eval_reference(l, assignment) && eval_reference(r, assignment))
        }
        BoolExpression::Nor(l, r) => {
            !(eval_reference(l, assignment) || eval_reference(r, assignment))
        }
        BoolExpression::Xnor(l, r) => {
            eval_reference(l, assignment) == eval_reference(r, assignment)
        }
    }
}

#[test]
fn pipeline_matches_reference_evaluation() {
    for seed in 0..20u64 {
        let mut rand = StdRng::seed_from_u64(seed);
        let expression = random_expression(&mut rand, 3);
        let text = expression.to_string();

        // The canonical rendering parses back into the identical tree.
        assert_eq!(
            expression,
            BoolExpression::try_from(text.as_str()).unwrap(),
            "seed {}",
            seed
        );

        let table = TruthTable::generate(&text).unwrap();
        assert_eq!(
            expression.support().len(),
            table.variables().num_vars() as usize,
            "seed {}",
            seed
        );
        assert_eq!(1usize << table.variables().num_vars(), table.num_rows());

        for row in table.rows() {
            let mut assignment = HashMap::new();
            for variable in table.variables().variables() {
                assignment.insert(
                    table.variables().name_of(variable),
                    row.valuation().value(variable),
                );
            }
            assert_eq!(
                eval_reference(&expression, &assignment),
                row.value(),
                "seed {}, formula {}, valuation {}",
                seed,
                text,
                row.valuation()
            );
        }
    }
}

#[test]
fn pipeline_derived_operator_identities() {
    // NAND/NOR/XNOR spelled through their definitions produce identical tables.
    let identities = vec![
        ("A NAND B", "NOT (A AND B)"),
        ("A NOR B", "NOT (A OR B)"),
        ("A XNOR B", "NOT (A XOR B)"),
        ("~(A & B) ^ (C + D)", "(A NAND B) XOR (C OR D)"),
        // De Morgan.
        ("NOT (A AND B)", "NOT A OR NOT B"),
        ("NOT (A OR B)", "NOT A AND NOT B"),
    ];
    for (left, right) in identities {
        assert_eq!(
            TruthTable::generate(left).unwrap(),
            TruthTable::generate(right).unwrap(),
            "{} should equal {}",
            left,
            right
        );
    }
}

#[test]
fn pipeline_error_never_yields_partial_table() {
    // Each input is broken in a different stage; all of them must produce a clean error.
    let inputs = vec![
        "",
        "   ",
        "A ?? B",
        "()",
        "NOT ()",
        "A AND (B",
        "A AND B)",
        "AB OR C",
        "A & B & C & D & E & F & G",
        "OR OR OR",
    ];
    for input in inputs {
        assert!(
            TruthTable::generate(input).is_err(),
            "{:?} should not produce a table",
            input
        );
    }
}

#[test]
fn pipeline_results_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TruthTable>();
    assert_send_sync::<TableError>();
    assert_send_sync::<TableSession>();
    assert_send_sync::<TableRun>();
}
