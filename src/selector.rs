use crate::dom::{Dom, NodeId};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttrCondition {
    Exists { key: String },
    Eq { key: String, value: String },
    StartsWith { key: String, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SelectorStep {
    pub(crate) tag: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<AttrCondition>,
    pub(crate) universal: bool,
}

/// One comma-separated alternative: a descendant chain of steps, leftmost
/// first.
pub(crate) type SelectorChain = Vec<SelectorStep>;

pub(crate) fn parse_selector_list(selector: &str) -> Result<Vec<SelectorChain>> {
    let trimmed = selector.trim();
    if trimmed.is_empty() {
        return Err(Error::UnsupportedSelector(selector.to_string()));
    }
    trimmed
        .split(',')
        .map(|alternative| parse_chain(alternative, selector))
        .collect()
}

fn parse_chain(src: &str, original: &str) -> Result<SelectorChain> {
    let chain = src
        .split_whitespace()
        .map(|step| parse_step(step, original))
        .collect::<Result<Vec<_>>>()?;
    if chain.is_empty() {
        return Err(Error::UnsupportedSelector(original.to_string()));
    }
    Ok(chain)
}

fn parse_step(src: &str, original: &str) -> Result<SelectorStep> {
    let mut step = SelectorStep::default();
    let chars = src.chars().collect::<Vec<_>>();
    let mut i = 0usize;

    if chars.first() == Some(&'*') {
        step.universal = true;
        i += 1;
    } else if chars
        .first()
        .map(|ch| ch.is_ascii_alphabetic())
        .unwrap_or(false)
    {
        let mut tag = String::new();
        while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '-') {
            tag.push(chars[i]);
            i += 1;
        }
        step.tag = Some(tag.to_ascii_lowercase());
    }

    while i < chars.len() {
        match chars[i] {
            '#' => {
                i += 1;
                let name = take_ident(&chars, &mut i);
                if name.is_empty() {
                    return Err(Error::UnsupportedSelector(original.to_string()));
                }
                step.id = Some(name);
            }
            '.' => {
                i += 1;
                let name = take_ident(&chars, &mut i);
                if name.is_empty() {
                    return Err(Error::UnsupportedSelector(original.to_string()));
                }
                step.classes.push(name);
            }
            '[' => {
                i += 1;
                let Some(end) = chars[i..].iter().position(|&ch| ch == ']') else {
                    return Err(Error::UnsupportedSelector(original.to_string()));
                };
                let body = chars[i..i + end].iter().collect::<String>();
                i += end + 1;
                step.attrs.push(parse_attr_condition(&body, original)?);
            }
            _ => return Err(Error::UnsupportedSelector(original.to_string())),
        }
    }

    if step.tag.is_none()
        && !step.universal
        && step.id.is_none()
        && step.classes.is_empty()
        && step.attrs.is_empty()
    {
        return Err(Error::UnsupportedSelector(original.to_string()));
    }
    Ok(step)
}

fn take_ident(chars: &[char], i: &mut usize) -> String {
    let mut out = String::new();
    while *i < chars.len()
        && (chars[*i].is_ascii_alphanumeric() || chars[*i] == '-' || chars[*i] == '_')
    {
        out.push(chars[*i]);
        *i += 1;
    }
    out
}

fn parse_attr_condition(body: &str, original: &str) -> Result<AttrCondition> {
    let unquote = |raw: &str| {
        let raw = raw.trim();
        raw.strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .or_else(|| raw.strip_prefix('\'').and_then(|rest| rest.strip_suffix('\'')))
            .unwrap_or(raw)
            .to_string()
    };

    if let Some((key, value)) = body.split_once("^=") {
        let key = key.trim().to_ascii_lowercase();
        if key.is_empty() {
            return Err(Error::UnsupportedSelector(original.to_string()));
        }
        return Ok(AttrCondition::StartsWith {
            key,
            value: unquote(value),
        });
    }
    if let Some((key, value)) = body.split_once('=') {
        let key = key.trim().to_ascii_lowercase();
        if key.is_empty() || key.ends_with(['~', '|', '$', '*']) {
            return Err(Error::UnsupportedSelector(original.to_string()));
        }
        return Ok(AttrCondition::Eq {
            key,
            value: unquote(value),
        });
    }
    let key = body.trim().to_ascii_lowercase();
    if key.is_empty() {
        return Err(Error::UnsupportedSelector(original.to_string()));
    }
    Ok(AttrCondition::Exists { key })
}

fn step_matches(dom: &Dom, node_id: NodeId, step: &SelectorStep) -> bool {
    let Some(element) = dom.element(node_id) else {
        return false;
    };
    if let Some(tag) = &step.tag {
        if !element.tag_name.eq_ignore_ascii_case(tag) {
            return false;
        }
    }
    if let Some(id) = &step.id {
        if element.attrs.get("id") != Some(id) {
            return false;
        }
    }
    for class in &step.classes {
        if !dom.has_class(node_id, class) {
            return false;
        }
    }
    for condition in &step.attrs {
        let matched = match condition {
            AttrCondition::Exists { key } => element.attrs.contains_key(key),
            AttrCondition::Eq { key, value } => {
                element.attrs.get(key).map(String::as_str) == Some(value.as_str())
            }
            AttrCondition::StartsWith { key, value } => element
                .attrs
                .get(key)
                .map(|have| have.starts_with(value.as_str()))
                .unwrap_or(false),
        };
        if !matched {
            return false;
        }
    }
    true
}

fn chain_matches(dom: &Dom, node_id: NodeId, chain: &SelectorChain) -> bool {
    let Some((last, rest)) = chain.split_last() else {
        return false;
    };
    if !step_matches(dom, node_id, last) {
        return false;
    }
    // Each remaining step must match some strictly higher ancestor, in order.
    let mut current = node_id;
    for step in rest.iter().rev() {
        let mut matched = None;
        for ancestor in dom.ancestors(current) {
            if step_matches(dom, ancestor, step) {
                matched = Some(ancestor);
                break;
            }
        }
        match matched {
            Some(ancestor) => current = ancestor,
            None => return false,
        }
    }
    true
}

/// All matching elements in document order.
pub(crate) fn query_all(dom: &Dom, selector: &str) -> Result<Vec<NodeId>> {
    let chains = parse_selector_list(selector)?;
    let mut out = Vec::new();
    for node_id in dom.elements_in_document_order(dom.root) {
        if chains.iter().any(|chain| chain_matches(dom, node_id, chain)) {
            out.push(node_id);
        }
    }
    Ok(out)
}

pub(crate) fn query_one(dom: &Dom, selector: &str) -> Result<Option<NodeId>> {
    Ok(query_all(dom, selector)?.into_iter().next())
}

/// `query_one` that errors with `SelectorNotFound` when nothing matches.
pub(crate) fn select_one(dom: &Dom, selector: &str) -> Result<NodeId> {
    query_one(dom, selector)?.ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
}
