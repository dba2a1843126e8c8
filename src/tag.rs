//! Rule-tag parser.
//!
//! Turns a declarative rule string such as
//! `"required,dive,keys,required,min=1,endkeys,dive"` into a tree of
//! [`FieldRules`] levels. Grammar, per traversal level:
//!
//! ```text
//! level      := item* ( "dive" level )?
//! item       := keys-block | chunk
//! keys-block := "keys" level "endkeys"        (first item of a dive level)
//! chunk      := alt ( "|" alt )*
//! alt        := "!"? name ( "=" param )?
//! ```
//!
//! Tokens split on commas. A whole chunk that matches a registered alias
//! is replaced by its expansion before parsing proceeds, recursively and
//! depth-bounded. `dive`, `keys` and `endkeys` are structural markers for
//! the walker, never predicates.

use std::collections::HashMap;

use crate::error::Error;

/// Alias expansions nest at most this deep; hitting the bound means a
/// cycle (or a pathological declaration) and is a parse error.
pub(crate) const MAX_ALIAS_DEPTH: usize = 8;

// ============================================================================
// PARSED REPRESENTATION
// ============================================================================

/// One parsed rule token: name, optional parameter, optional `!` negation.
///
/// Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    /// Rule name as resolved against the registry at evaluation time.
    pub name: String,
    /// Text after `=`, if any.
    pub param: Option<String>,
    /// True when the token carried a leading `!`.
    pub negated: bool,
}

/// One token position: a single rule, or `|`-separated alternatives.
///
/// A group with more than one alternative passes when *any* alternative
/// passes; when none do, the failure is tagged with the first alternative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleGroup {
    /// Alternatives in declaration order; always at least one.
    pub alternatives: Vec<RuleSpec>,
}

/// The rules of one traversal level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRules {
    /// Checks applied to the value at this level, in declaration order.
    pub checks: Vec<RuleGroup>,
    /// Rules for every key of a keyed collection (`keys … endkeys`).
    pub keys: Option<Box<FieldRules>>,
    /// Rules for every element/value one level down (`dive …`).
    pub dive: Option<Box<FieldRules>>,
}

impl FieldRules {
    /// True when this level constrains nothing and descends nowhere.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty() && self.keys.is_none() && self.dive.is_none()
    }
}

// ============================================================================
// TOKENIZER
// ============================================================================

#[derive(Debug, Clone)]
enum Token {
    Dive,
    Keys,
    EndKeys,
    Chunk(String),
}

/// Splits a tag into tokens, substituting whole-chunk aliases as it goes.
fn tokenize(
    tag: &str,
    source: &str,
    aliases: &HashMap<String, String>,
    depth: usize,
    out: &mut Vec<Token>,
) -> Result<(), Error> {
    for chunk in tag.split(',') {
        if chunk.is_empty() {
            return Err(Error::malformed(source, "empty rule name"));
        }
        if aliases.contains_key(chunk) {
            if depth == 0 {
                return Err(Error::malformed(
                    source,
                    format!("alias `{chunk}` expands deeper than {MAX_ALIAS_DEPTH} levels (cycle?)"),
                ));
            }
            tokenize(&aliases[chunk], source, aliases, depth - 1, out)?;
            continue;
        }
        match chunk {
            "dive" => out.push(Token::Dive),
            "keys" => out.push(Token::Keys),
            "endkeys" => out.push(Token::EndKeys),
            _ => out.push(Token::Chunk(chunk.to_string())),
        }
    }
    Ok(())
}

// ============================================================================
// STRUCTURAL PARSE
// ============================================================================

fn parse_spec(token: &str, source: &str) -> Result<RuleSpec, Error> {
    let (token, negated) = match token.strip_prefix('!') {
        Some(rest) => (rest, true),
        None => (token, false),
    };
    let (name, param) = match token.split_once('=') {
        Some((name, param)) => (name, Some(param.to_string())),
        None => (token, None),
    };
    if name.is_empty() {
        return Err(Error::malformed(source, "empty rule name"));
    }
    Ok(RuleSpec {
        name: name.to_string(),
        param,
        negated,
    })
}

fn parse_group(chunk: &str, source: &str) -> Result<RuleGroup, Error> {
    let alternatives = chunk
        .split('|')
        .map(|alt| parse_spec(alt, source))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RuleGroup { alternatives })
}

/// Parses one level; `in_dive` permits a leading `keys` block.
fn parse_level(
    tokens: &[Token],
    pos: &mut usize,
    source: &str,
    in_dive: bool,
) -> Result<FieldRules, Error> {
    let mut rules = FieldRules::default();
    let mut first = true;
    while *pos < tokens.len() {
        match &tokens[*pos] {
            Token::Dive => {
                *pos += 1;
                rules.dive = Some(Box::new(parse_level(tokens, pos, source, true)?));
                return Ok(rules);
            }
            Token::Keys => {
                if !in_dive || !first {
                    return Err(Error::malformed(
                        source,
                        "`keys` must immediately follow `dive`",
                    ));
                }
                *pos += 1;
                rules.keys = Some(Box::new(parse_keys_block(tokens, pos, source)?));
            }
            Token::EndKeys => {
                return Err(Error::malformed(source, "`endkeys` without matching `keys`"));
            }
            Token::Chunk(chunk) => {
                rules.checks.push(parse_group(chunk, source)?);
                *pos += 1;
            }
        }
        first = false;
    }
    Ok(rules)
}

fn parse_keys_block(tokens: &[Token], pos: &mut usize, source: &str) -> Result<FieldRules, Error> {
    let mut inner = Vec::new();
    let mut closed = false;
    while *pos < tokens.len() {
        match &tokens[*pos] {
            Token::EndKeys => {
                *pos += 1;
                closed = true;
                break;
            }
            Token::Keys => return Err(Error::malformed(source, "nested `keys` block")),
            token => {
                inner.push(token.clone());
                *pos += 1;
            }
        }
    }
    if !closed {
        return Err(Error::malformed(source, "`keys` without matching `endkeys`"));
    }
    let mut inner_pos = 0;
    parse_level(&inner, &mut inner_pos, source, false)
}

/// Parses a rule tag against an alias table.
///
/// The empty tag parses to an empty rule set (nothing to check). Malformed
/// syntax is a fatal [`Error::MalformedTag`]; unknown rule *names* are not
/// detected here — resolution happens at evaluation time.
pub fn parse(tag: &str, aliases: &HashMap<String, String>) -> Result<FieldRules, Error> {
    if tag.is_empty() {
        return Ok(FieldRules::default());
    }
    let mut tokens = Vec::new();
    tokenize(tag, tag, aliases, MAX_ALIAS_DEPTH, &mut tokens)?;
    let mut pos = 0;
    parse_level(&tokens, &mut pos, tag, false)
}

// ============================================================================
// TESTS
// ============================================================================
