//! Shorthand constructors for common selector shapes.

use std::borrow::Cow;

use crate::builder::MediaQuery;
use crate::rule::CssRule;

/// Entry points for building rules and media queries.
///
/// ```
/// use pagecraft_css::Css;
///
/// assert_eq!(Css::class("btn").selector(), ".btn");
/// assert_eq!(Css::id("#main").selector(), "#main");
/// ```
pub struct Css;

impl Css {
	/// A rule matching elements by tag name.
	pub fn element(tag: impl Into<Cow<'static, str>>) -> CssRule {
		CssRule::new(tag)
	}

	/// A rule matching a class. A leading `.` is added when missing.
	pub fn class(name: impl Into<Cow<'static, str>>) -> CssRule {
		CssRule::new(prefixed('.', name.into()))
	}

	/// A rule matching an id. A leading `#` is added when missing.
	pub fn id(name: impl Into<Cow<'static, str>>) -> CssRule {
		CssRule::new(prefixed('#', name.into()))
	}

	/// A rule with an arbitrary selector.
	pub fn selector(selector: impl Into<Cow<'static, str>>) -> CssRule {
		CssRule::new(selector)
	}

	/// An empty media query.
	pub fn media(condition: impl Into<Cow<'static, str>>) -> MediaQuery {
		MediaQuery::new(condition)
	}
}

fn prefixed(prefix: char, name: Cow<'static, str>) -> Cow<'static, str> {
	if name.starts_with(prefix) {
		name
	} else {
		Cow::Owned(format!("{prefix}{name}"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("btn", ".btn")]
	#[case(".btn", ".btn")]
	fn test_class_prefix(#[case] input: &'static str, #[case] expected: &str) {
		assert_eq!(Css::class(input).selector(), expected);
	}

	#[rstest]
	#[case("main", "#main")]
	#[case("#main", "#main")]
	fn test_id_prefix(#[case] input: &'static str, #[case] expected: &str) {
		assert_eq!(Css::id(input).selector(), expected);
	}

	#[rstest]
	fn test_element_and_selector_are_verbatim() {
		assert_eq!(Css::element("h1").selector(), "h1");
		assert_eq!(Css::selector("a:hover, a:focus").selector(), "a:hover, a:focus");
	}

	#[rstest]
	fn test_media() {
		let media = Css::media("prefers-color-scheme: dark");
		assert_eq!(media.condition(), "prefers-color-scheme: dark");
		assert!(media.items().is_empty());
	}
}
