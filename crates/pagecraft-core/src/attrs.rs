//! Attribute values and the validated attribute set attached to an element.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{BuildError, Result};
use crate::util::is_valid_attr_name;

/// Key/value mapping carried by a mapping-valued attribute.
///
/// Under the name `style` it renders as inline declarations; under any
/// other name it expands into one prefixed attribute per entry.
pub type AttrMap = IndexMap<String, String>;

/// A numeric attribute value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
	/// Signed integer.
	Int(i64),
	/// Unsigned integer too large for `Int`.
	UInt(u64),
	/// Floating point number. Must be finite to be accepted.
	Float(f64),
}

impl Number {
	/// Returns `false` for NaN and infinities.
	pub fn is_finite(&self) -> bool {
		match self {
			Self::Float(f) => f.is_finite(),
			Self::Int(_) | Self::UInt(_) => true,
		}
	}
}

impl fmt::Display for Number {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Int(n) => write!(f, "{n}"),
			Self::UInt(n) => write!(f, "{n}"),
			Self::Float(n) => write!(f, "{n}"),
		}
	}
}

/// Value of a single attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
	/// Rendered as `name="escaped text"`.
	Text(Cow<'static, str>),
	/// Rendered as `name="number"`.
	Number(Number),
	/// `true` renders the bare attribute name, `false` omits the attribute.
	Bool(bool),
	/// Mapping rendered as inline style or as prefixed attributes.
	Map(AttrMap),
}

impl AttrValue {
	/// Returns whether this value produces any output when rendered.
	pub fn is_present(&self) -> bool {
		match self {
			Self::Bool(flag) => *flag,
			Self::Map(map) => !map.is_empty(),
			Self::Text(_) | Self::Number(_) => true,
		}
	}

	/// Converts a dynamically typed JSON value.
	///
	/// Strings, numbers and booleans map to their variants, `null` maps to
	/// `Bool(false)` and an object whose values are all scalars becomes a
	/// mapping. Arrays and nested objects are rejected.
	pub fn from_json(name: &str, value: Value) -> Result<Self> {
		match value {
			Value::Null => Ok(Self::Bool(false)),
			Value::Bool(flag) => Ok(Self::Bool(flag)),
			Value::String(s) => Ok(Self::Text(Cow::Owned(s))),
			Value::Number(n) => json_number(name, &n).map(Self::Number),
			Value::Array(_) => Err(BuildError::unsupported(name, "arrays are not supported")),
			Value::Object(object) => {
				let mut map = AttrMap::with_capacity(object.len());
				for (key, value) in object {
					let text = match value {
						Value::String(s) => s,
						Value::Bool(flag) => flag.to_string(),
						Value::Number(n) => json_number(name, &n)?.to_string(),
						Value::Null => continue,
						Value::Array(_) | Value::Object(_) => {
							return Err(BuildError::unsupported(
								name,
								format!("entry `{key}` must be a scalar"),
							));
						}
					};
					map.insert(key, text);
				}
				Ok(Self::Map(map))
			}
		}
	}

	fn validate(&self, name: &str) -> Result<()> {
		match self {
			Self::Number(n) if !n.is_finite() => {
				Err(BuildError::unsupported(name, "number is not finite"))
			}
			Self::Map(map) => match map.keys().find(|key| !is_valid_attr_name(key)) {
				Some(key) => Err(BuildError::unsupported(
					name,
					format!("invalid mapping key {key:?}"),
				)),
				None => Ok(()),
			},
			_ => Ok(()),
		}
	}
}

fn json_number(name: &str, n: &serde_json::Number) -> Result<Number> {
	if let Some(i) = n.as_i64() {
		Ok(Number::Int(i))
	} else if let Some(u) = n.as_u64() {
		Ok(Number::UInt(u))
	} else {
		n.as_f64()
			.map(Number::Float)
			.ok_or_else(|| BuildError::unsupported(name, "number is not representable"))
	}
}

impl From<&'static str> for AttrValue {
	fn from(value: &'static str) -> Self {
		Self::Text(Cow::Borrowed(value))
	}
}

impl From<String> for AttrValue {
	fn from(value: String) -> Self {
		Self::Text(Cow::Owned(value))
	}
}

impl From<&String> for AttrValue {
	fn from(value: &String) -> Self {
		Self::Text(Cow::Owned(value.clone()))
	}
}

impl From<Cow<'static, str>> for AttrValue {
	fn from(value: Cow<'static, str>) -> Self {
		Self::Text(value)
	}
}

impl From<bool> for AttrValue {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<Number> for AttrValue {
	fn from(value: Number) -> Self {
		Self::Number(value)
	}
}

macro_rules! impl_from_signed {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for AttrValue {
				fn from(value: $ty) -> Self {
					Self::Number(Number::Int(i64::from(value)))
				}
			}
		)*
	};
}

impl_from_signed!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for AttrValue {
	fn from(value: u64) -> Self {
		match i64::try_from(value) {
			Ok(i) => Self::Number(Number::Int(i)),
			Err(_) => Self::Number(Number::UInt(value)),
		}
	}
}

impl From<usize> for AttrValue {
	fn from(value: usize) -> Self {
		// usize is at most 64 bits on every supported target
		Self::from(value as u64)
	}
}

impl From<f32> for AttrValue {
	fn from(value: f32) -> Self {
		Self::Number(Number::Float(f64::from(value)))
	}
}

impl From<f64> for AttrValue {
	fn from(value: f64) -> Self {
		Self::Number(Number::Float(value))
	}
}

impl From<AttrMap> for AttrValue {
	fn from(value: AttrMap) -> Self {
		Self::Map(value)
	}
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for AttrValue {
	fn from(value: [(K, V); N]) -> Self {
		Self::Map(value.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for AttrValue {
	fn from(value: Vec<(K, V)>) -> Self {
		Self::Map(value.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
	fn from(value: Option<T>) -> Self {
		match value {
			Some(v) => v.into(),
			None => Self::Bool(false),
		}
	}
}

/// Returns whether a mapping stored under `name` renders as `name-key`
/// attributes rather than a single inline declaration list.
pub(crate) fn expands_to_prefixed(name: &str) -> bool {
	!name.eq_ignore_ascii_case("style")
}

/// Names a value occupies in rendered output when stored under `name`.
fn rendered_names(name: &str, value: &AttrValue) -> Vec<String> {
	match value {
		AttrValue::Map(map) if expands_to_prefixed(name) => {
			map.keys().map(|key| format!("{name}-{key}")).collect()
		}
		_ => vec![name.to_string()],
	}
}

/// Insertion-ordered mapping from attribute name to value.
///
/// Names are case-preserved and compared exactly. Setting an existing name
/// replaces its value in place, so render order is the order in which each
/// name was first set.
///
/// Mapping values expand to prefixed names (`data` + `id` renders as
/// `data-id`). A rendered name is owned by the most recent `set` that
/// produces it: storing a mapping drops matching scalar attributes, and
/// storing a scalar drops the matching entry from any mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
	entries: IndexMap<Cow<'static, str>, AttrValue>,
}

impl AttributeSet {
	/// Creates an empty attribute set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets an attribute, returning the value it replaced.
	///
	/// Fails if the name is not a valid attribute name or the value cannot
	/// be serialized.
	pub fn set(
		&mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<AttrValue>,
	) -> Result<Option<AttrValue>> {
		let name = name.into();
		if !is_valid_attr_name(&name) {
			tracing::debug!(name = %name, "rejected attribute name");
			return Err(BuildError::InvalidAttributeName(name.into_owned()));
		}
		let value = value.into();
		if let Err(err) = value.validate(&name) {
			tracing::debug!(name = %name, error = %err, "rejected attribute value");
			return Err(err);
		}
		self.release(&name, &rendered_names(&name, &value));
		Ok(self.entries.insert(name, value))
	}

	/// Removes every rendered name in `claimed` held by entries other than
	/// `name`, keeping the order of what remains.
	fn release(&mut self, name: &str, claimed: &[String]) {
		self.entries.retain(|existing, value| {
			if &**existing == name {
				return true;
			}
			match value {
				AttrValue::Map(map) if expands_to_prefixed(existing) => {
					map.retain(|key, _| {
						let rendered = format!("{existing}-{key}");
						let keep = !claimed.contains(&rendered);
						if !keep {
							tracing::trace!(name = %rendered, "replaced mapping entry");
						}
						keep
					});
					true
				}
				_ => {
					let keep = !claimed.iter().any(|claim| claim.as_str() == &**existing);
					if !keep {
						tracing::trace!(name = %existing, "replaced attribute");
					}
					keep
				}
			}
		});
	}

	/// Returns the value of an attribute.
	pub fn get(&self, name: &str) -> Option<&AttrValue> {
		self.entries.get(name)
	}

	/// Returns whether the attribute is set (even to `false`).
	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	/// Removes an attribute, keeping the order of the others.
	pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
		self.entries.shift_remove(name)
	}

	/// Number of attributes set.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns whether no attributes are set.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates over attributes in render order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
		self.entries.iter().map(|(name, value)| (name.as_ref(), value))
	}
}
