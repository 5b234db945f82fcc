//! Parser for the match filter language.
//!
//! # Syntax
//!
//! ```text
//! filter_expr := term (operator? term)*
//! term        := field:value | field:"quoted value"
//! operator    := AND | OR (case-insensitive)
//! field       := category | character | field (case-insensitive)
//! ```
//!
//! - `category:timeline` - Matches from one section of the character sheet
//! - `character:aria` - Matches on characters whose name contains the value
//! - `field:tag` - Matches whose field label contains the value
//!
//! Without an explicit operator, terms on the same field are OR'd and terms on different
//! fields are AND'd.
//!
//! # Examples
//!
//! ```rust
//! # use medieval_character_manager::filters::parser::parse_filter;
//! let expr = parse_filter("category:timeline character:aria").unwrap();
//! let expr = parse_filter("category:overview category:biography").unwrap();
//! let expr = parse_filter("character:\"Aria Stormwind\" OR field:tag").unwrap();
//! ```

use std::iter::Peekable;
use std::str::Chars;

use anyhow::{Context, Result, anyhow, bail};

use super::ast::{FieldFilter, FilterExpr, FilterField, FilterOperator};
use crate::models::Category;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Term { field: String, value: String },
    And,
    Or,
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.next_if(|ch| ch.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let word = read_until_whitespace(&mut chars);

        if word.eq_ignore_ascii_case("and") {
            tokens.push(Token::And);
            continue;
        }
        if word.eq_ignore_ascii_case("or") {
            tokens.push(Token::Or);
            continue;
        }

        let Some((field, rest)) = word.split_once(':') else {
            bail!("Invalid token: '{}' (expected field:value or AND/OR)", word);
        };

        let value = match rest.strip_prefix('"') {
            Some(opened) => finish_quoted(&mut chars, opened)?,
            None => rest.to_string(),
        };

        if field.is_empty() || value.trim().is_empty() {
            bail!("Invalid field:value format: {}", word);
        }

        tokens.push(Token::Term { field: field.to_string(), value });
    }

    Ok(tokens)
}

fn read_until_whitespace(chars: &mut Peekable<Chars>) -> String {
    let mut word = String::new();
    while let Some(ch) = chars.next_if(|ch| !ch.is_whitespace()) {
        word.push(ch);
    }
    word
}

/// Complete a quoted value whose opening quote has been consumed; `opened` is the text read
/// so far up to the first whitespace
fn finish_quoted(chars: &mut Peekable<Chars>, opened: &str) -> Result<String> {
    if let Some((inside, _)) = opened.split_once('"') {
        return Ok(inside.to_string());
    }

    let mut value = opened.to_string();
    for ch in chars.by_ref() {
        if ch == '"' {
            return Ok(value);
        }
        value.push(ch);
    }

    Err(anyhow!("Unterminated quoted string"))
}

fn parse_field(field: &str) -> Result<FilterField> {
    match field.to_lowercase().as_str() {
        "category" => Ok(FilterField::Category),
        "character" => Ok(FilterField::Character),
        "field" => Ok(FilterField::Field),
        _ => Err(anyhow!("Unknown field: '{}' (valid fields: category, character, field)", field)),
    }
}

fn validate_value(field: &FilterField, value: &str) -> Result<()> {
    if *field == FilterField::Category {
        value.parse::<Category>()?;
    }
    Ok(())
}

/// Parse filter text into a [`FilterExpr`]
///
/// Empty or whitespace-only input yields an empty expression, which matches everything.
pub fn parse_filter(input: &str) -> Result<FilterExpr> {
    let tokens = tokenize(input).context("Failed to tokenize filter")?;

    let mut expr = FilterExpr::new();
    let mut expecting_term = true;
    let mut last_field: Option<FilterField> = None;

    for token in tokens {
        match token {
            Token::Term { field, value } => {
                let field = parse_field(&field)?;
                validate_value(&field, &value)?;

                if !expecting_term {
                    let implicit = if last_field.as_ref() == Some(&field) {
                        FilterOperator::Or
                    } else {
                        FilterOperator::And
                    };
                    expr.add_operator(implicit);
                }

                expr.add_filter(FieldFilter::new(field.clone(), value));
                last_field = Some(field);
                expecting_term = false;
            }
            Token::And | Token::Or => {
                if expecting_term {
                    bail!("Unexpected operator (expected field:value)");
                }
                expr.add_operator(if token == Token::And {
                    FilterOperator::And
                } else {
                    FilterOperator::Or
                });
                expecting_term = true;
            }
        }
    }

    if expecting_term && !expr.is_empty() {
        bail!("Filter ended with operator (expected field:value)");
    }

    debug_assert_eq!(expr.operators.len(), expr.filters.len().saturating_sub(1));

    Ok(expr)
}
