//! Breadcrumb segments appended to a traversal path

use std::fmt;

/// Marker every path starts from
pub const ROOT: &str = "$";

/// One step of a breadcrumb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    /// `.<name>`
    Property(&'a str),
    /// `.#<name>`
    Method(&'a str),
    /// `.#<name>(fail)`
    MethodFailed(&'a str),
    /// `.(selector)`
    Selector,
    /// `.(validator)`
    Validator,
    /// `+<subject>`, a call routed through a helper subject
    Helper(&'a str),
    /// `.(await)`
    Await,
    /// `.#constructor`
    Constructor,
    /// `.call`, invoking a present value that is not callable
    NotCallable,
}

impl Segment<'_> {
    /// Append this segment to `path`
    pub(crate) fn extend(self, path: &str) -> String { format!("{path}{self}") }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property(name) => write!(f, ".{name}"),
            Self::Method(name) => write!(f, ".#{name}"),
            Self::MethodFailed(name) => write!(f, ".#{name}(fail)"),
            Self::Selector => f.write_str(".(selector)"),
            Self::Validator => f.write_str(".(validator)"),
            Self::Helper(subject) => write!(f, "+{subject}"),
            Self::Await => f.write_str(".(await)"),
            Self::Constructor => f.write_str(".#constructor"),
            Self::NotCallable => f.write_str(".call"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_markers() {
        assert_eq!(Segment::Property("a").extend(ROOT), "$.a");
        assert_eq!(Segment::Method("sum").extend("$.f"), "$.f.#sum");
        assert_eq!(Segment::MethodFailed("boom").extend("$.f"), "$.f.#boom(fail)");
        assert_eq!(
            Segment::Method("keys").extend(&Segment::Helper("Object").extend("$.a")),
            "$.a+Object.#keys"
        );
        assert_eq!(Segment::Await.extend("$.p"), "$.p.(await)");
        assert_eq!(Segment::NotCallable.extend("$.a.b.c"), "$.a.b.c.call");
    }
}
