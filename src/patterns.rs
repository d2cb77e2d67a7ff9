// patterns.rs - Ready-made expressions composed from the builder primitives.

use crate::char_set::{CharacterSet, LetterCase};
use crate::expression::Expression;
use crate::group::GroupKind;
use crate::quantifier::Quantifier;

/// A whole-input email address: `local@domain.tld`, with a top-level
/// domain of at least two letters.
///
/// ```
/// use rexcraft::patterns::email;
///
/// let re = email();
/// assert!(re.has_match("john.doe+tag@mail.example.org").unwrap());
/// assert!(!re.has_match("john.doe@localhost").unwrap());
/// ```
pub fn email() -> Expression {
    let local = CharacterSet::include()
        .letters(LetterCase::Both)
        .digits()
        .literals("._%+-");
    let domain = CharacterSet::include()
        .letters(LetterCase::Both)
        .digits()
        .literals(".-");
    let tld = CharacterSet::include().letters(LetterCase::Both);

    Expression::new()
        .start_of_line(true)
        .character_set(&local, Quantifier::one_or_more())
        .literal("@", Quantifier::ONCE)
        .character_set(&domain, Quantifier::one_or_more())
        .literal(".", Quantifier::ONCE)
        .character_set(&tld, Quantifier::at_least(2))
        .end_of_line(true)
}

/// A whole-input dotted-quad IPv4 address with octets 0-255 and no
/// leading zeros.
pub fn ipv4() -> Expression {
    let rest = octet(Expression::new().literal(".", Quantifier::ONCE));
    octet(Expression::new().start_of_line(true))
        .group(rest, GroupKind::NonCapturing, Quantifier::exactly(3))
        .end_of_line(true)
}

fn octet(expr: Expression) -> Expression {
    let q = Quantifier::ONCE;
    let alternatives = [
        // 250-255
        Expression::new()
            .literal("25", q)
            .character_set(&CharacterSet::include().range('0', '5'), q),
        // 200-249
        Expression::new()
            .literal("2", q)
            .character_set(&CharacterSet::include().range('0', '4'), q)
            .digit(q),
        // 100-199
        Expression::new().literal("1", q).digit(Quantifier::exactly(2)),
        // 0-99
        Expression::new()
            .character_set(&CharacterSet::include().range('1', '9'), Quantifier::optional())
            .digit(q),
    ];
    expr.or(&alternatives, q)
}
