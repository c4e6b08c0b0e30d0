//! Classifier for single directives.

use super::ast::{Directive, Target, SKIP_TOKEN};
use crate::circuit::Label;
use crate::error::{BridgeError, Result};

/// Classify one trimmed directive.
///
/// Grammars are tried in order: removal, direct edge, incremented series,
/// chained series. Anything else is an [`BridgeError::InvalidDirective`].
pub fn classify(text: &str) -> Result<Directive> {
    if let Some(rest) = text.strip_prefix('-') {
        return Label::parse(rest)
            .map(Directive::Remove)
            .ok_or_else(|| BridgeError::invalid(text));
    }

    if let Some(labels) = parse_hyphenated(text) {
        return Ok(match <[Label; 2]>::try_from(labels) {
            Ok([a, b]) => Directive::Connect(a, b),
            Err(labels) => Directive::Chain(labels),
        });
    }

    if let Some((start, rest)) = text.split_once("++") {
        return parse_increment(text, start, rest);
    }

    Err(BridgeError::invalid(text))
}

/// Two or more labels joined by single hyphens, with no other characters.
fn parse_hyphenated(text: &str) -> Option<Vec<Label>> {
    let parts: Vec<&str> = text.split('-').collect();
    if parts.len() < 2 {
        return None;
    }
    parts.into_iter().map(Label::parse).collect()
}

fn parse_increment(text: &str, start: &str, rest: &str) -> Result<Directive> {
    if start.is_empty() || !start.chars().all(|c| c.is_ascii_digit()) {
        return Err(BridgeError::invalid(text));
    }

    let inner = rest
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .ok_or_else(|| BridgeError::invalid(text))?;

    let start: u32 = start.parse().map_err(|_| BridgeError::PinOverflow {
        directive: text.to_string(),
    })?;

    if inner.trim().is_empty() {
        return Err(BridgeError::empty_expansion(text));
    }

    let targets = inner
        .split(',')
        .map(|item| {
            let item = item.trim();
            if item.eq_ignore_ascii_case(SKIP_TOKEN) {
                Some(Target::Skip)
            } else {
                Label::parse(item).map(Target::Label)
            }
        })
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| BridgeError::invalid(text))?;

    // The last pin used is start + len - 1
    let span = u32::try_from(targets.len() - 1).ok();
    if span.and_then(|span| start.checked_add(span)).is_none() {
        return Err(BridgeError::PinOverflow {
            directive: text.to_string(),
        });
    }

    Ok(Directive::Increment { start, targets })
}
