use log::debug;

use super::units::canonical_unit;
use crate::error::ParseError;
use crate::model::IngredientLine;

/// Turns free-text ingredient lines into [`IngredientLine`]s.
///
/// Parsing never fails: text that cannot be understood ends up in
/// `ingredient` with no count and no unit.
pub struct IngredientParser;

impl IngredientParser {
    /// Parse one ingredient line.
    ///
    /// Leading quantity tokens are summed (`1 1/2` is 1.5, `1-1/2` as well),
    /// the next token is taken as the unit when it is a known one, and the
    /// rest is the ingredient. Parenthesised remarks are dropped.
    pub fn parse(line: &str) -> IngredientLine {
        let cleaned = strip_parenthesized(line);
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();

        let mut count: Option<f64> = None;
        let mut quantity_len = 0;
        for token in &tokens {
            match parse_quantity(token) {
                Ok(value) => {
                    count = Some(count.unwrap_or(0.0) + value);
                    quantity_len += 1;
                }
                Err(e) => {
                    if let ParseError::ZeroDenominator(_) = e {
                        debug!("Ignoring malformed quantity in {:?}: {}", line, e);
                    }
                    break;
                }
            }
        }

        let rest = &tokens[quantity_len..];
        match rest.first().and_then(|token| canonical_unit(token)) {
            Some(unit) => IngredientLine {
                count,
                unit: unit.to_string(),
                ingredient: rest[1..].join(" "),
            },
            None => IngredientLine {
                count,
                unit: String::new(),
                ingredient: rest.join(" "),
            },
        }
    }

    pub fn parse_all<S: AsRef<str>>(lines: &[S]) -> Vec<IngredientLine> {
        lines.iter().map(|l| Self::parse(l.as_ref())).collect()
    }
}

/// Parse a single quantity token: `2`, `0.5`, `1/2`, `½`, `1½` or a
/// dash-joined mixed number like `1-1/2`.
pub(crate) fn parse_quantity(token: &str) -> Result<f64, ParseError> {
    let token = token.trim_end_matches(',');
    if token.contains('-') {
        // Dash-joined parts are summed, so a range like 3-4 reads as 7
        let total = token
            .split('-')
            .map(|part| parse_simple(part, token))
            .sum::<Result<f64, ParseError>>()?;
        debug!("Read dash-joined quantity {:?} as {}", token, total);
        return Ok(total);
    }
    parse_simple(token, token)
}

fn parse_simple(part: &str, token: &str) -> Result<f64, ParseError> {
    let not_a_quantity = || ParseError::NotAQuantity(token.to_string());

    if let Some(last) = part.chars().last() {
        if let Some(fraction) = vulgar_fraction(last) {
            let whole = &part[..part.len() - last.len_utf8()];
            if whole.is_empty() {
                return Ok(fraction);
            }
            return Ok(parse_number(whole).ok_or_else(not_a_quantity)? + fraction);
        }
    }

    if let Some((numerator, denominator)) = part.split_once('/') {
        let numerator = parse_number(numerator).ok_or_else(not_a_quantity)?;
        let denominator = parse_number(denominator).ok_or_else(not_a_quantity)?;
        if denominator == 0.0 {
            return Err(ParseError::ZeroDenominator(token.to_string()));
        }
        return Ok(numerator / denominator);
    }

    parse_number(part).ok_or_else(not_a_quantity)
}

fn parse_number(text: &str) -> Option<f64> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    text.parse::<f64>().ok()
}

fn vulgar_fraction(c: char) -> Option<f64> {
    let value = match c {
        '½' => 1.0 / 2.0,
        '⅓' => 1.0 / 3.0,
        '⅔' => 2.0 / 3.0,
        '¼' => 1.0 / 4.0,
        '¾' => 3.0 / 4.0,
        '⅕' => 1.0 / 5.0,
        '⅛' => 1.0 / 8.0,
        '⅜' => 3.0 / 8.0,
        '⅝' => 5.0 / 8.0,
        '⅞' => 7.0 / 8.0,
        _ => return None,
    };
    Some(value)
}

/// Remove `( ... )` segments. An unclosed parenthesis is kept as text.
fn strip_parenthesized(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('(') {
        match rest[open..].find(')') {
            Some(close) => {
                out.push_str(&rest[..open]);
                out.push(' ');
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}
