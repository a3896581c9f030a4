//! Demonstration runs over sample expressions.
//!
//! Output goes to any `io::Write` so the runs can be checked in tests.

use scolex_core::{SymbolRegistry, Value, sexpr};
use std::hash::BuildHasher;
use std::io::{self, Write};
use tracing::debug;

// =============================================================================
// Demo
// =============================================================================

/// Print sample expressions, a head/tail walk, and equality checks.
pub fn run_demo<S: BuildHasher>(
    registry: &SymbolRegistry<S>,
    out: &mut impl Write,
) -> io::Result<()> {
    let sym = |name: &str| Value::symbol_in(registry, name);

    let expr = Value::string("foobar");
    let expr2 = sexpr![expr.clone(), expr.clone(), expr.clone()];
    let expr3 = Value::nil();
    let expr4 = sexpr![sym("quote"), expr2.clone(), Value::nil()];
    let expr5 = sexpr![
        sym("sum"),
        true,
        1.5,
        2,
        "foo",
        3,
        expr4.clone(),
        Value::nil(),
        Value::nil()
    ];
    let expr6 = sexpr![sym("+"), 1.5, 2.5, 3, 4.5];
    let expr7 = sexpr![sym("+"), 2.5, 3.5, 4, 5.5];

    writeln!(out, "Break it down!")?;
    let mut rest = expr5.clone();
    writeln!(out, "{rest}")?;
    let mut steps = 0usize;
    while rest.is_truthy() {
        let head = rest.head();
        rest = rest.tail();
        steps += 1;
        writeln!(out, "head => {head}    ---    tail => {rest}")?;
    }
    debug!(steps, "head/tail walk reached nil");

    for (label, value) in [
        ("expr", &expr),
        ("expr2", &expr2),
        ("expr3", &expr3),
        ("expr4", &expr4),
        ("expr5", &expr5),
        ("expr6", &expr6),
        ("expr7", &expr7),
    ] {
        writeln!(out, "{label:<6}=> {value}")?;
    }
    writeln!(out, "{}  --  {}", expr7.head(), expr7.tail())?;

    let true_sym = sym("true");
    let false_sym = sym("false");
    let checks = [
        ("true == true_sym", sym("true") == true_sym),
        ("true == false_sym", sym("true") == false_sym),
        ("false == false_sym", sym("false") == false_sym),
        ("bananas == true_sym", sym("bananas") == true_sym),
        ("true_sym == false_sym", true_sym == false_sym),
        ("expr7 == expr7", expr7 == expr7),
        ("expr7 == expr6", expr7 == expr6),
        ("expr7 == expr5", expr7 == expr5),
    ];
    for (label, result) in checks {
        writeln!(out, "({label:<22}) => {result}")?;
    }

    Ok(())
}

// =============================================================================
// Render
// =============================================================================

/// Convert one command-line word into a value.
///
/// `#t`/`#f` are booleans, `nil` and `'()` are nil, `"..."` is a string,
/// words that look numeric and parse as a float are numbers, and anything
/// else is a symbol.
pub fn word_to_value<S: BuildHasher>(registry: &SymbolRegistry<S>, word: &str) -> Value {
    match word {
        "#t" => Value::boolean(true),
        "#f" => Value::boolean(false),
        "nil" | "'()" => Value::nil(),
        _ => {
            if let Some(inner) = word
                .strip_prefix('"')
                .and_then(|rest| rest.strip_suffix('"'))
            {
                return Value::string(inner);
            }
            let numeric = word
                .trim_start_matches(['+', '-'])
                .starts_with(|c: char| c.is_ascii_digit() || c == '.');
            match word.parse::<f64>() {
                Ok(n) if numeric => Value::number(n),
                _ => Value::symbol_in(registry, word),
            }
        }
    }
}

/// Print the rendering of a list built from `words`.
pub fn render_words<S: BuildHasher>(
    registry: &SymbolRegistry<S>,
    words: &[String],
    out: &mut impl Write,
) -> io::Result<()> {
    debug!(count = words.len(), "rendering words");
    let value: Value = words
        .iter()
        .map(|word| word_to_value(registry, word))
        .collect();
    writeln!(out, "{value}")
}
