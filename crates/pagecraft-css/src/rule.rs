//! Declarations and style rules.

use std::borrow::Cow;
use std::fmt;

use pagecraft_core::RenderOptions;

/// A single `property: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
	property: Cow<'static, str>,
	value: Cow<'static, str>,
}

impl Declaration {
	/// Creates a declaration. Both parts are stored verbatim.
	pub fn new(property: impl Into<Cow<'static, str>>, value: impl Into<Cow<'static, str>>) -> Self {
		Self {
			property: property.into(),
			value: value.into(),
		}
	}

	/// Returns the property name.
	pub fn property(&self) -> &str {
		&self.property
	}

	/// Returns the value.
	pub fn value(&self) -> &str {
		&self.value
	}
}

impl fmt::Display for Declaration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {};", self.property, self.value)
	}
}

/// A selector and its ordered declarations.
///
/// Declarations render in insertion order. Repeated properties are all
/// kept; the stylesheet's cascade decides which one applies.
///
/// ```
/// use pagecraft_css::CssRule;
///
/// let rule = CssRule::new(".a").add("color", "red").add("color", "blue");
/// assert_eq!(rule.render(), ".a { color: red; color: blue; }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssRule {
	selector: Cow<'static, str>,
	declarations: Vec<Declaration>,
}

impl CssRule {
	/// Creates a rule with no declarations. The selector is opaque text.
	pub fn new(selector: impl Into<Cow<'static, str>>) -> Self {
		Self {
			selector: selector.into(),
			declarations: Vec::new(),
		}
	}

	/// Appends a declaration.
	pub fn add(
		mut self,
		property: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.push(property, value);
		self
	}

	/// Appends a declaration whose name is given in snake_case
	/// (`font_size` becomes `font-size`).
	pub fn property(self, name: &str, value: impl Into<Cow<'static, str>>) -> Self {
		self.add(property_name(name), value)
	}

	/// Appends several declarations in iteration order.
	pub fn extend<I, P, V>(mut self, declarations: I) -> Self
	where
		I: IntoIterator<Item = (P, V)>,
		P: Into<Cow<'static, str>>,
		V: Into<Cow<'static, str>>,
	{
		self.declarations.extend(
			declarations
				.into_iter()
				.map(|(property, value)| Declaration::new(property, value)),
		);
		self
	}

	/// Appends a declaration in place.
	pub fn push(
		&mut self,
		property: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> &mut Self {
		self.declarations.push(Declaration::new(property, value));
		self
	}

	/// Returns the selector.
	pub fn selector(&self) -> &str {
		&self.selector
	}

	/// Returns the declarations in render order.
	pub fn declarations(&self) -> &[Declaration] {
		&self.declarations
	}

	/// Returns whether the rule has no declarations.
	pub fn is_empty(&self) -> bool {
		self.declarations.is_empty()
	}

	/// Renders the rule with default options.
	pub fn render(&self) -> String {
		self.render_with(&RenderOptions::default())
	}

	/// Renders the rule with the given options.
	///
	/// A rule without declarations renders as an empty string.
	pub fn render_with(&self, options: &RenderOptions) -> String {
		self.to_css(options, 0)
	}

	pub(crate) fn to_css(&self, options: &RenderOptions, depth: usize) -> String {
		if self.declarations.is_empty() {
			return String::new();
		}

		let mut out = String::new();
		if options.pretty {
			let indent = options.indent_str(depth);
			let inner = options.indent_str(depth + 1);
			out.push_str(&indent);
			out.push_str(&self.selector);
			out.push_str(" {\n");
			for declaration in &self.declarations {
				out.push_str(&inner);
				out.push_str(&declaration.to_string());
				out.push('\n');
			}
			out.push_str(&indent);
			out.push('}');
		} else {
			out.push_str(&self.selector);
			out.push_str(" {");
			for declaration in &self.declarations {
				out.push(' ');
				out.push_str(&declaration.to_string());
			}
			out.push_str(" }");
		}
		out
	}
}

impl fmt::Display for CssRule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render())
	}
}

/// Converts a snake_case property name to kebab-case.
pub fn property_name(name: &str) -> String {
	name.replace('_', "-")
}
