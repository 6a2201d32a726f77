//! Structural signatures: the typed form of the CSS selectors the engine
//! uses to recognise parts of the host page.
//!
//! Signatures are deliberately limited to a single compound selector (tag,
//! one class fragment, attribute predicates). That is all the host page
//! table needs, and it keeps matching implementable outside a browser.

use serde::Serialize;

/// Attribute predicate operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttrOp {
    /// `[name]`
    Present,
    /// `[name="value"]`
    Equals(&'static str),
    /// `[name*="value"]`
    Contains(&'static str),
}

/// One attribute predicate of a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttrMatch {
    pub name: &'static str,
    pub op: AttrOp,
}

impl AttrMatch {
    pub const fn present(name: &'static str) -> Self {
        Self {
            name,
            op: AttrOp::Present,
        }
    }

    pub const fn equals(name: &'static str, value: &'static str) -> Self {
        Self {
            name,
            op: AttrOp::Equals(value),
        }
    }

    pub const fn contains(name: &'static str, value: &'static str) -> Self {
        Self {
            name,
            op: AttrOp::Contains(value),
        }
    }

    fn accepts(&self, value: Option<&str>) -> bool {
        match (self.op, value) {
            (_, None) => false,
            (AttrOp::Present, Some(_)) => true,
            (AttrOp::Equals(expected), Some(v)) => v == expected,
            (AttrOp::Contains(fragment), Some(v)) => v.contains(fragment),
        }
    }
}

/// A named structural signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Signature {
    /// Stable name used in logs.
    pub name: &'static str,
    /// Lowercase tag name, if constrained.
    pub tag: Option<&'static str>,
    /// Class name the element must carry, if constrained.
    pub class: Option<&'static str>,
    /// Attribute predicates, all of which must hold.
    pub attrs: &'static [AttrMatch],
}

impl Signature {
    /// Signature matching any element with the given tag.
    pub const fn tag(name: &'static str, tag: &'static str) -> Self {
        Self {
            name,
            tag: Some(tag),
            class: None,
            attrs: &[],
        }
    }

    /// Render as a CSS selector for hosts with a native selector engine.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        if let Some(tag) = self.tag {
            css.push_str(tag);
        }
        if let Some(class) = self.class {
            css.push('.');
            css.push_str(class);
        }
        for attr in self.attrs {
            match attr.op {
                AttrOp::Present => css.push_str(&format!("[{}]", attr.name)),
                AttrOp::Equals(v) => css.push_str(&format!("[{}=\"{}\"]", attr.name, v)),
                AttrOp::Contains(v) => css.push_str(&format!("[{}*=\"{}\"]", attr.name, v)),
            }
        }
        if css.is_empty() {
            css.push('*');
        }
        css
    }

    /// Match against an element described by its tag and an attribute lookup.
    pub fn matches_with<F>(&self, tag: &str, attribute: F) -> bool
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(expected) = self.tag {
            if !tag.eq_ignore_ascii_case(expected) {
                return false;
            }
        }
        if let Some(class) = self.class {
            let has_class = attribute("class")
                .map(|list| list.split_whitespace().any(|c| c == class))
                .unwrap_or(false);
            if !has_class {
                return false;
            }
        }
        self.attrs
            .iter()
            .all(|a| a.accepts(attribute(a.name).as_deref()))
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.to_css())
    }
}

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
