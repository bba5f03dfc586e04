//! Dynamically shaped values.
//!
//! [`Value`] enumerates the primitive shapes the default policies know how to compare:
//! numbers, strings, ordered sequences and field-keyed records.
//! Values of different shapes are incomparable, hence never less than each other.
use std::{
	cmp::Ordering,
	collections::BTreeMap,
	hash::{Hash, Hasher},
};

/// Dynamically shaped value.
#[derive(Clone, Debug)]
pub enum Value {
	Null,
	Bool(bool),
	Number(f64),
	String(String),

	/// Ordered sequence, compared element-wise.
	Sequence(Vec<Value>),

	/// Record, compared field-wise in field name order.
	Record(BTreeMap<String, Value>),
}

impl Value {
	/// Creates a record from its fields.
	pub fn record<I, S>(fields: I) -> Value
	where
		I: IntoIterator<Item = (S, Value)>,
		S: Into<String>,
	{
		Value::Record(
			fields
				.into_iter()
				.map(|(name, value)| (name.into(), value))
				.collect(),
		)
	}

	#[inline]
	pub fn as_number(&self) -> Option<f64> {
		match self {
			Value::Number(n) => Some(*n),
			_ => None,
		}
	}

	#[inline]
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the field `name` if `self` is a record.
	#[inline]
	pub fn field(&self, name: &str) -> Option<&Value> {
		match self {
			Value::Record(fields) => fields.get(name),
			_ => None,
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Value) -> bool {
		match (self, other) {
			(Value::Null, Value::Null) => true,
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::Number(a), Value::Number(b)) => a == b,
			(Value::String(a), Value::String(b)) => a == b,
			(Value::Sequence(a), Value::Sequence(b)) => a == b,
			(Value::Record(a), Value::Record(b)) => a == b,
			_ => false,
		}
	}
}

impl PartialOrd for Value {
	fn partial_cmp(&self, other: &Value) -> Option<Ordering> {
		match (self, other) {
			(Value::Null, Value::Null) => Some(Ordering::Equal),
			(Value::Bool(a), Value::Bool(b)) => a.partial_cmp(b),
			(Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
			(Value::String(a), Value::String(b)) => a.partial_cmp(b),
			(Value::Sequence(a), Value::Sequence(b)) => {
				lexicographic(a.iter().map(|v| (None, v)), b.iter().map(|v| (None, v)))
			}
			(Value::Record(a), Value::Record(b)) => lexicographic(
				a.iter().map(|(name, v)| (Some(name), v)),
				b.iter().map(|(name, v)| (Some(name), v)),
			),
			_ => None,
		}
	}
}

/// Compare two sequences of optionally named values.
///
/// The first differing (name, value) pair decides. A strict prefix is less.
fn lexicographic<'a, A, B>(mut a: A, mut b: B) -> Option<Ordering>
where
	A: Iterator<Item = (Option<&'a String>, &'a Value)>,
	B: Iterator<Item = (Option<&'a String>, &'a Value)>,
{
	loop {
		match (a.next(), b.next()) {
			(None, None) => return Some(Ordering::Equal),
			(None, Some(_)) => return Some(Ordering::Less),
			(Some(_), None) => return Some(Ordering::Greater),
			(Some((na, va)), Some((nb, vb))) => {
				match na.cmp(&nb) {
					Ordering::Equal => (),
					ord => return Some(ord),
				}

				match va.partial_cmp(vb)? {
					Ordering::Equal => (),
					ord => return Some(ord),
				}
			}
		}
	}
}

impl Hash for Value {
	fn hash<H: Hasher>(&self, h: &mut H) {
		std::mem::discriminant(self).hash(h);
		match self {
			Value::Null => (),
			Value::Bool(b) => b.hash(h),
			Value::Number(n) => {
				// 0.0 == -0.0
				let n = if *n == 0.0 { 0.0f64 } else { *n };
				n.to_bits().hash(h)
			}
			Value::String(s) => s.hash(h),
			Value::Sequence(items) => items.hash(h),
			Value::Record(fields) => {
				fields.len().hash(h);
				for (name, value) in fields {
					name.hash(h);
					value.hash(h);
				}
			}
		}
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Value {
		Value::Bool(b)
	}
}

impl From<f64> for Value {
	fn from(n: f64) -> Value {
		Value::Number(n)
	}
}

impl From<i32> for Value {
	fn from(n: i32) -> Value {
		Value::Number(n.into())
	}
}

impl From<u32> for Value {
	fn from(n: u32) -> Value {
		Value::Number(n.into())
	}
}

impl<'a> From<&'a str> for Value {
	fn from(s: &'a str) -> Value {
		Value::String(s.to_string())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Value {
		Value::String(s)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(items: Vec<T>) -> Value {
		Value::Sequence(items.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Value {
		match value {
			Some(value) => value.into(),
			None => Value::Null,
		}
	}
}
