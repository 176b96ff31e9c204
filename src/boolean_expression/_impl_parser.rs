//!
//! Expression parsing proceeds in two steps. The tokenizer first normalizes every accepted
//! operator spelling (keyword or symbol) into one canonical token and groups tokens by
//! parenthesis nesting into a token tree. The parser then splits the token tree recursively
//! in the order of operator precedence: `OR`, then the shared `XOR`/`NAND`/`NOR`/`XNOR`
//! level, then `AND`. If an operator does not occur in the root of the tree, the tree is
//! forwarded to the next tighter operator. If it does occur, the tree is split at this
//! point; the left part goes to the next operator, the right part is processed by the same
//! operator to extract additional occurrences.
//!
//! Every token remembers the character position it started at, so each syntax error can
//! point back into the input string.

use super::BoolExpression;
use super::BoolExpression::*;
use crate::TableError;
use std::fmt::{Display, Error, Formatter};
use std::iter::Peekable;
use std::str::Chars;

/// **(internal)** Tokens that can appear in the boolean expression, together with the
/// character position (0-based) where the token started. The tokens form a token tree
/// defined by parenthesis groups.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ExprToken {
    pub position: usize,
    pub kind: TokenKind,
}

/// **(internal)** The canonical token alphabet. Every textual or symbolic operator
/// spelling maps to exactly one of these.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum TokenKind {
    Not,                    // 'NOT', '!', '~'
    And,                    // 'AND', '&', '.'
    Or,                     // 'OR', '|', '+'
    Xor,                    // 'XOR', '^'
    Nand,                   // 'NAND'
    Nor,                    // 'NOR'
    Xnor,                   // 'XNOR'
    Variable(char),         // 'A'..='Z'
    Group(Vec<ExprToken>),  // A block of tokens inside parentheses
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            TokenKind::Not => write!(f, "NOT"),
            TokenKind::And => write!(f, "AND"),
            TokenKind::Or => write!(f, "OR"),
            TokenKind::Xor => write!(f, "XOR"),
            TokenKind::Nand => write!(f, "NAND"),
            TokenKind::Nor => write!(f, "NOR"),
            TokenKind::Xnor => write!(f, "XNOR"),
            TokenKind::Variable(letter) => write!(f, "'{}'", letter),
            TokenKind::Group(_) => write!(f, "(...)"),
        }
    }
}

/// Takes an expression string and turns it into a [BoolExpression], or a [TableError]
/// if the string is not a valid expression.
pub fn parse_boolean_expression(from: &str) -> Result<BoolExpression, TableError> {
    let tokens = tokenize(from)?;
    parse_token_stream(&tokens)
}

/// **(internal)** A character iterator that counts how many characters it has produced.
struct CharStream<'a> {
    chars: Peekable<Chars<'a>>,
    consumed: usize,
}

impl<'a> CharStream<'a> {
    fn new(data: &'a str) -> CharStream<'a> {
        CharStream {
            chars: data.chars().peekable(),
            consumed: 0,
        }
    }

    /// Next character together with its position in the input.
    fn next(&mut self) -> Option<(usize, char)> {
        let c = self.chars.next()?;
        let position = self.consumed;
        self.consumed += 1;
        Some((position, c))
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }
}

/// **(internal)** Normalize the expression string into a canonical token tree.
///
/// Fails with [TableError::EmptyExpression] for whitespace-only input and with
/// [TableError::UnrecognizedToken] for any character outside the accepted alphabet.
pub(crate) fn tokenize(expression: &str) -> Result<Vec<ExprToken>, TableError> {
    if expression.trim().is_empty() {
        return Err(TableError::EmptyExpression);
    }
    tokenize_group(&mut CharStream::new(expression), None)
}

/// **(internal)** Process the character stream into a vector of [ExprToken]s.
///
/// The outer call passes `group_start = None`; a recursive call consumes everything up to
/// the closing parenthesis of the group opened at `group_start` (the opening parenthesis
/// itself is consumed by the caller).
fn tokenize_group(
    stream: &mut CharStream,
    group_start: Option<usize>,
) -> Result<Vec<ExprToken>, TableError> {
    let mut output = Vec::new();
    while let Some((position, c)) = stream.next() {
        match c {
            c if c.is_whitespace() => { /* skip whitespace */ }
            // single char operators, symbolic spellings
            '!' | '~' => output.push(ExprToken { position, kind: TokenKind::Not }),
            '&' | '.' => output.push(ExprToken { position, kind: TokenKind::And }),
            '|' | '+' => output.push(ExprToken { position, kind: TokenKind::Or }),
            '^' => output.push(ExprToken { position, kind: TokenKind::Xor }),
            ')' => {
                return if group_start.is_some() {
                    Ok(output)
                } else {
                    Err(TableError::Syntax {
                        position,
                        reason: "unexpected ')' with no matching '('".to_string(),
                    })
                };
            }
            '(' => {
                // start a nested token group
                let tokens = tokenize_group(stream, Some(position))?;
                output.push(ExprToken { position, kind: TokenKind::Group(tokens) });
            }
            c if c.is_ascii_alphabetic() => {
                // start of a keyword or a sequence of variable letters
                let mut word = String::new();
                word.push(c);
                while let Some(next) = stream.peek() {
                    if next.is_ascii_alphabetic() {
                        word.push(next);
                        stream.next();
                    } else {
                        break;
                    }
                }
                push_word(&mut output, position, &word)?;
            }
            _ => return Err(TableError::UnrecognizedToken { character: c, position }),
        }
    }
    if let Some(open) = group_start {
        Err(TableError::Syntax {
            position: open,
            reason: "missing ')' for this '('".to_string(),
        })
    } else {
        Ok(output)
    }
}

/// **(internal)** Classify one maximal letter run starting at `position`: either a single
/// operator keyword (case-insensitive), or a sequence of independent uppercase variable
/// letters. Multi-letter identifiers do not exist; `AB` is the two variables `A` and `B`.
fn push_word(output: &mut Vec<ExprToken>, position: usize, word: &str) -> Result<(), TableError> {
    if let Some(kind) = keyword_operator(word) {
        output.push(ExprToken { position, kind });
        return Ok(());
    }
    for (offset, letter) in word.chars().enumerate() {
        if letter.is_ascii_uppercase() {
            output.push(ExprToken {
                position: position + offset,
                kind: TokenKind::Variable(letter),
            });
        } else {
            return Err(TableError::UnrecognizedToken {
                character: letter,
                position: position + offset,
            });
        }
    }
    Ok(())
}

/// **(internal)** The canonical operator for a keyword spelling, if there is one.
fn keyword_operator(word: &str) -> Option<TokenKind> {
    if word.eq_ignore_ascii_case("NOT") {
        Some(TokenKind::Not)
    } else if word.eq_ignore_ascii_case("AND") {
        Some(TokenKind::And)
    } else if word.eq_ignore_ascii_case("OR") {
        Some(TokenKind::Or)
    } else if word.eq_ignore_ascii_case("XOR") {
        Some(TokenKind::Xor)
    } else if word.eq_ignore_ascii_case("NAND") {
        Some(TokenKind::Nand)
    } else if word.eq_ignore_ascii_case("NOR") {
        Some(TokenKind::Nor)
    } else if word.eq_ignore_ascii_case("XNOR") {
        Some(TokenKind::Xnor)
    } else {
        None
    }
}

/// **(internal)** Parse a normalized token tree into a [BoolExpression]. The stream is
/// consumed exactly once; the resulting tree is never re-derived from text.
pub(crate) fn parse_token_stream(data: &[ExprToken]) -> Result<BoolExpression, TableError> {
    Ok(*parse_formula(data, 0)?)
}

/// **(internal)** Parse an [ExprToken] tree into a [BoolExpression] (or error if invalid).
/// `at` is the position blamed when `data` turns out to be empty.
fn parse_formula(data: &[ExprToken], at: usize) -> Result<Box<BoolExpression>, TableError> {
    if data.len() == 1 && matches!(data[0].kind, TokenKind::Group(..)) {
        // A "fast-forward" branch for `(...)` formulas that tend to overflow the parser stack.
        return terminal(data, at);
    }
    or(data, at)
}

/// **(internal)** Utility method to find the first occurrence of a specific token kind in
/// the root of the token tree.
fn index_of_first(data: &[ExprToken], kind: TokenKind) -> Option<usize> {
    data.iter().position(|t| t.kind == kind)
}

/// **(internal)** Split `data` around the binary operator at index `i`, rejecting a
/// missing operand on either side.
fn split_operands(
    data: &[ExprToken],
    i: usize,
) -> Result<(&[ExprToken], &[ExprToken]), TableError> {
    let operator = &data[i];
    let (left, right) = (&data[..i], &data[(i + 1)..]);
    if left.is_empty() {
        return Err(TableError::Syntax {
            position: operator.position,
            reason: format!("operator {} has no left operand", operator.kind),
        });
    }
    if right.is_empty() {
        return Err(TableError::Syntax {
            position: operator.position,
            reason: format!("operator {} has no right operand", operator.kind),
        });
    }
    Ok((left, right))
}

/// **(internal)** Recursive parsing step 1: extract `OR` operators (loosest binding).
fn or(data: &[ExprToken], at: usize) -> Result<Box<BoolExpression>, TableError> {
    if let Some(or_token) = index_of_first(data, TokenKind::Or) {
        let (left, right) = split_operands(data, or_token)?;
        Ok(Box::new(Or(
            composite(left, at)?,
            or(right, data[or_token].position)?,
        )))
    } else {
        composite(data, at)
    }
}

/// **(internal)** Recursive parsing step 2: extract `XOR`, `NAND`, `NOR` and `XNOR`
/// operators. All four share one precedence level between `OR` and `AND`.
fn composite(data: &[ExprToken], at: usize) -> Result<Box<BoolExpression>, TableError> {
    let composite_token = data.iter().position(|t| {
        matches!(
            t.kind,
            TokenKind::Xor | TokenKind::Nand | TokenKind::Nor | TokenKind::Xnor
        )
    });
    if let Some(composite_token) = composite_token {
        let (left, right) = split_operands(data, composite_token)?;
        let l = and(left, at)?;
        let r = composite(right, data[composite_token].position)?;
        let node = match data[composite_token].kind {
            TokenKind::Xor => Xor(l, r),
            TokenKind::Nand => Nand(l, r),
            TokenKind::Nor => Nor(l, r),
            TokenKind::Xnor => Xnor(l, r),
            _ => unreachable!("The position above only matches the four composite operators."),
        };
        Ok(Box::new(node))
    } else {
        and(data, at)
    }
}

/// **(internal)** Recursive parsing step 3: extract `AND` operators.
fn and(data: &[ExprToken], at: usize) -> Result<Box<BoolExpression>, TableError> {
    if let Some(and_token) = index_of_first(data, TokenKind::And) {
        let (left, right) = split_operands(data, and_token)?;
        Ok(Box::new(And(
            terminal(left, at)?,
            and(right, data[and_token].position)?,
        )))
    } else {
        terminal(data, at)
    }
}

/// **(internal)** Recursive parsing step 4: extract terminals (variables, groups) and
/// negations. `NOT` binds tightest and is right-associative.
fn terminal(data: &[ExprToken], at: usize) -> Result<Box<BoolExpression>, TableError> {
    if data.is_empty() {
        return Err(TableError::Syntax {
            position: at,
            reason: "expected an operand, found nothing".to_string(),
        });
    }
    if data[0].kind == TokenKind::Not {
        if data.len() == 1 {
            return Err(TableError::Syntax {
                position: data[0].position,
                reason: "operator NOT has no operand".to_string(),
            });
        }
        return Ok(Box::new(Not(terminal(&data[1..], data[0].position)?)));
    }
    if data.len() > 1 {
        // Two operands next to each other with no operator in between. This also covers
        // adjacent variable letters such as `AB`, which are two variables, not one name.
        return Err(TableError::Syntax {
            position: data[1].position,
            reason: format!("expected an operator before {}", data[1].kind),
        });
    }
    match &data[0].kind {
        TokenKind::Variable(letter) => Ok(Box::new(Var(*letter))),
        TokenKind::Group(inner) => {
            if inner.is_empty() {
                Err(TableError::Syntax {
                    position: data[0].position,
                    reason: "nothing between '(' and ')'".to_string(),
                })
            } else {
                parse_formula(inner, data[0].position)
            }
        }
        // A binary operator in terminal position is normally split off by the callers;
        // report it instead of trusting that assumption.
        kind => Err(TableError::Syntax {
            position: data[0].position,
            reason: format!("expected an operand, found operator {}", kind),
        }),
    }
}
