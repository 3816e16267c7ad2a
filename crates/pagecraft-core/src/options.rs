//! Render configuration.

use serde::Deserialize;

use crate::error::ConfigError;

/// Widest indent accepted per nesting level.
pub const MAX_INDENT: usize = 16;

/// Options controlling markup and stylesheet output.
///
/// The defaults produce compact output with self-closing void elements:
/// `<div><br/></div>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
	/// Break block-level children onto indented lines.
	pub pretty: bool,
	/// Spaces per nesting level when `pretty` is set. Values above
	/// [`MAX_INDENT`] are treated as `MAX_INDENT`.
	pub indent: usize,
	/// Emit void elements as `<br/>` rather than `<br>`.
	pub self_closing_void: bool,
}

impl Default for RenderOptions {
	fn default() -> Self {
		Self {
			pretty: false,
			indent: 2,
			self_closing_void: true,
		}
	}
}

impl RenderOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Enables pretty-printing.
	pub fn pretty(mut self) -> Self {
		self.pretty = true;
		self
	}

	/// Sets the indent width used by pretty-printing, capped at
	/// [`MAX_INDENT`].
	pub fn indent(mut self, width: usize) -> Self {
		self.indent = width.min(MAX_INDENT);
		self
	}

	/// Emits void elements without the trailing slash (`<br>`).
	pub fn html5_void(mut self) -> Self {
		self.self_closing_void = false;
		self
	}

	/// Loads options from a TOML document.
	///
	/// Missing keys take their default values; unknown keys and an `indent`
	/// above [`MAX_INDENT`] are rejected.
	///
	/// # Example
	///
	/// ```
	/// use pagecraft_core::RenderOptions;
	///
	/// let options = RenderOptions::from_toml_str("pretty = true\nindent = 4").unwrap();
	/// assert!(options.pretty);
	/// assert_eq!(options.indent, 4);
	/// assert!(options.self_closing_void);
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		let options: Self = toml::from_str(source)?;
		if options.indent > MAX_INDENT {
			tracing::debug!(indent = options.indent, "rejected render configuration");
			return Err(ConfigError::IndentTooLarge {
				indent: options.indent,
				max: MAX_INDENT,
			});
		}
		Ok(options)
	}

	/// Whitespace prefix for the given nesting depth.
	pub fn indent_str(&self, depth: usize) -> String {
		" ".repeat(self.indent.min(MAX_INDENT).saturating_mul(depth))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let options = RenderOptions::default();
		assert!(!options.pretty);
		assert_eq!(options.indent, 2);
		assert!(options.self_closing_void);
	}

	#[rstest]
	fn test_builder_methods() {
		let options = RenderOptions::new().pretty().indent(4).html5_void();
		assert!(options.pretty);
		assert_eq!(options.indent, 4);
		assert!(!options.self_closing_void);
	}

	#[rstest]
	fn test_from_toml_empty_is_default() {
		assert_eq!(
			RenderOptions::from_toml_str("").unwrap(),
			RenderOptions::default()
		);
	}

	#[rstest]
	fn test_from_toml_partial() {
		let options = RenderOptions::from_toml_str("self_closing_void = false").unwrap();
		assert!(!options.self_closing_void);
		assert!(!options.pretty);
	}

	#[rstest]
	#[case("minify = true")]
	#[case("pretty = \"yes\"")]
	#[case("pretty =")]
	fn test_from_toml_rejects(#[case] source: &str) {
		assert!(RenderOptions::from_toml_str(source).is_err());
	}

	#[rstest]
	#[case("indent = 9223372036854775807")]
	#[case("pretty = true\nindent = 17")]
	fn test_from_toml_rejects_wide_indent(#[case] source: &str) {
		let err = RenderOptions::from_toml_str(source).unwrap_err();
		assert!(matches!(err, ConfigError::IndentTooLarge { max: MAX_INDENT, .. }));
	}

	#[rstest]
	fn test_from_toml_accepts_max_indent() {
		let options = RenderOptions::from_toml_str("indent = 16").unwrap();
		assert_eq!(options.indent, MAX_INDENT);
	}

	#[rstest]
	fn test_indent_is_capped() {
		assert_eq!(RenderOptions::new().indent(usize::MAX).indent, MAX_INDENT);

		let options = RenderOptions {
			indent: usize::MAX,
			..RenderOptions::new().pretty()
		};
		assert_eq!(options.indent_str(2).len(), 2 * MAX_INDENT);
	}

	#[rstest]
	fn test_indent_str() {
		let options = RenderOptions::new().indent(3);
		assert_eq!(options.indent_str(2), "      ");
		assert_eq!(options.indent_str(0), "");
	}
}
