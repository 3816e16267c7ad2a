//! Error types for pagecraft-core
//!
//! Construction errors are raised at the offending `add` / attribute call.
//! Rendering a tree that was built through the public API never fails; the
//! serializer's own checks only exist as a safety net and report through
//! [`RenderError`].

use thiserror::Error;

/// The three categories of programmer-input errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// Malformed tag or attribute name, or children on a void element.
	Structural,
	/// Attribute value of an unsupported shape.
	AttributeType,
	/// Missing content passed where a child is required.
	UnknownReference,
}

/// Error raised while building an element tree.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
	/// Tag name is empty or not a valid element identifier.
	#[error("invalid tag name: {0:?}")]
	InvalidTagName(String),

	/// Children were added to an element that can never have any.
	#[error("<{tag}> is a void element and cannot have children")]
	VoidElementChildren {
		/// Tag of the void element.
		tag: String,
	},

	/// Attribute name is empty or contains characters that cannot appear
	/// in an attribute name.
	#[error("invalid attribute name: {0:?}")]
	InvalidAttributeName(String),

	/// Attribute value cannot be serialized.
	#[error("unsupported value for attribute `{name}`: {reason}")]
	UnsupportedAttributeValue {
		/// Attribute name.
		name: String,
		/// Why the value was rejected.
		reason: String,
	},

	/// `None` was supplied where content was required.
	#[error("missing content: expected a child node, found None")]
	MissingContent,
}

impl BuildError {
	/// Returns the category of this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::InvalidTagName(_)
			| Self::VoidElementChildren { .. }
			| Self::InvalidAttributeName(_) => ErrorKind::Structural,
			Self::UnsupportedAttributeValue { .. } => ErrorKind::AttributeType,
			Self::MissingContent => ErrorKind::UnknownReference,
		}
	}

	pub(crate) fn unsupported(name: impl Into<String>, reason: impl Into<String>) -> Self {
		Self::UnsupportedAttributeValue {
			name: name.into(),
			reason: reason.into(),
		}
	}
}

/// Error raised by the serializer.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RenderError {
	/// A void element carries children.
	#[error("<{tag}> is a void element but has children")]
	VoidElementChildren {
		/// Tag of the offending element.
		tag: String,
	},

	/// The output sink refused a write.
	#[error("failed to write output")]
	Fmt(#[from] std::fmt::Error),
}

/// Error raised while loading render configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The TOML document is malformed or has unknown keys.
	#[error("invalid render configuration: {0}")]
	Toml(#[from] toml::de::Error),

	/// `indent` is wider than the serializer supports.
	#[error("indent of {indent} exceeds the maximum of {max}")]
	IndentTooLarge {
		/// The configured indent.
		indent: usize,
		/// The largest accepted indent.
		max: usize,
	},
}

/// Result type for tree construction.
pub type Result<T> = std::result::Result<T, BuildError>;
