//! Helpers for reading BigBlueButton XML responses

use std::str::FromStr;
use xmltree::{Element, XMLNode};

use crate::error::{ApiError, Result, NO_RESPONSE_MESSAGE};

pub const SUCCESS: &str = "SUCCESS";

/// Parse a response body into its root element
pub fn parse_response(call: &str, body: &str) -> Result<Element> {
    Element::parse(body.as_bytes()).map_err(|e| ApiError::MalformedResponse {
        call: call.to_string(),
        reason: e.to_string(),
    })
}

/// Check `returncode`, turning anything but SUCCESS into [`ApiError::Failed`]
pub fn check_return_code(call: &str, root: &Element) -> Result<()> {
    let code = child_text(root, "returncode").ok_or_else(|| ApiError::MalformedResponse {
        call: call.to_string(),
        reason: "missing returncode".to_string(),
    })?;

    if code == SUCCESS {
        return Ok(());
    }

    Err(ApiError::Failed {
        call: call.to_string(),
        message_key: child_text(root, "messageKey"),
        message: child_text(root, "message").unwrap_or_else(|| NO_RESPONSE_MESSAGE.to_string()),
    })
}

/// Trimmed text of a direct child, `None` when absent or empty
pub fn child_text(element: &Element, name: &str) -> Option<String> {
    element
        .get_child(name)
        .and_then(|child| child.get_text())
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Text of a direct child, empty when absent
pub fn child_string(element: &Element, name: &str) -> String {
    child_text(element, name).unwrap_or_default()
}

/// `true` iff the child text equals "true" ignoring ASCII case
pub fn child_bool(element: &Element, name: &str) -> bool {
    child_text(element, name)
        .map(|text| parse_bool(&text))
        .unwrap_or(false)
}

pub fn parse_bool(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("true")
}

/// Parsed child value, `None` when absent or unparsable
pub fn child_parse<T: FromStr>(element: &Element, name: &str) -> Option<T> {
    child_text(element, name).and_then(|text| text.parse().ok())
}

/// Child elements of `parent/name`, in document order
pub fn child_elements<'a>(element: &'a Element, name: &str) -> impl Iterator<Item = &'a Element> {
    element
        .get_child(name)
        .into_iter()
        .flat_map(|parent| parent.children.iter())
        .filter_map(|node| match node {
            XMLNode::Element(child) => Some(child),
            _ => None,
        })
}
