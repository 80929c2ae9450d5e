//! Value types for parsed complex objects.
//!
//! Every value is one of:
//! - `Null`, carrying the declared kind so consumers still know what the
//!   property would have held (a null `Address` stays an `Address`)
//! - a typed [`Scalar`]
//! - a [`Complex`] object: the type name plus the properties present in input
//! - a [`Collection`]: the element kind plus items in input order
//!
//! Values are built once by the parser and never mutated afterwards.

use chrono::{DateTime, Utc};
use edm_schema::{ScalarKind, ValueKind};

/// A parsed property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Explicit `null`, tagged with the declared kind.
    Null(ValueKind),
    /// A primitive value.
    Scalar(Scalar),
    /// A nested object.
    Complex(Complex),
    /// An ordered sequence.
    Collection(Collection),
}

/// A validated primitive value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// `Edm.Boolean`
    Boolean(bool),
    /// `Edm.Int32`
    Int32(i32),
    /// `Edm.Single`
    Single(f32),
    /// `Edm.Double`
    Double(f64),
    /// `Edm.String`
    String(String),
    /// `Edm.DateTime`, in UTC.
    DateTime(DateTime<Utc>),
}

/// A complex object: its type and the properties that were present.
#[derive(Debug, Clone, PartialEq)]
pub struct Complex {
    type_name: String,
    properties: Vec<Property>,
}

/// A named property inside a [`Complex`] object.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    name: String,
    value: Value,
}

/// An ordered sequence of values of one element kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    element: ValueKind,
    items: Vec<Value>,
}

impl Value {
    /// Check if this is a null of any kind.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null(_))
    }

    /// The complex type carried by a null, if it is a null complex value.
    pub fn null_type_name(&self) -> Option<&str> {
        match self {
            Value::Null(ValueKind::Complex(name)) => Some(name),
            _ => None,
        }
    }

    /// Get as scalar.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Get as complex object.
    pub fn as_complex(&self) -> Option<&Complex> {
        match self {
            Value::Complex(c) => Some(c),
            _ => None,
        }
    }

    /// Get as collection.
    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Value::Collection(c) => Some(c),
            _ => None,
        }
    }

    /// Get as string (for `Edm.String` scalars).
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Get as boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Scalar(Scalar::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    /// Get as 32-bit integer.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Scalar(Scalar::Int32(n)) => Some(*n),
            _ => None,
        }
    }

    /// Get as a double, widening `Edm.Single` and `Edm.Int32`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Scalar(Scalar::Double(n)) => Some(*n),
            Value::Scalar(Scalar::Single(n)) => Some(f64::from(*n)),
            Value::Scalar(Scalar::Int32(n)) => Some(f64::from(*n)),
            _ => None,
        }
    }

    /// Get as UTC timestamp.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Scalar(Scalar::DateTime(t)) => Some(*t),
            _ => None,
        }
    }

    /// Get a value by path.
    ///
    /// Path segments are separated by `.`.
    /// Use `[n]` for collection indexing: `addresses[1].city`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(self);
        }

        match self {
            Value::Complex(obj) => obj.get(path),
            Value::Collection(seq) => {
                let (segment, rest) = crate::split_path(path);
                let idx: usize = segment.strip_prefix('[')?.strip_suffix(']')?.parse().ok()?;
                seq.get(idx)?.get(rest)
            }
            _ => None,
        }
    }
}

impl Scalar {
    /// The primitive kind of this value.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Boolean(_) => ScalarKind::Boolean,
            Scalar::Int32(_) => ScalarKind::Int32,
            Scalar::Single(_) => ScalarKind::Single,
            Scalar::Double(_) => ScalarKind::Double,
            Scalar::String(_) => ScalarKind::String,
            Scalar::DateTime(_) => ScalarKind::DateTime,
        }
    }
}

impl Complex {
    /// Create an object of `type_name` with the given properties, in order.
    pub fn new(type_name: impl Into<String>, properties: Vec<Property>) -> Self {
        Self {
            type_name: type_name.into(),
            properties,
        }
    }

    /// The complex type of this object.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Get a property value by name, or a nested value by path
    /// (`address.city`, `tags[1]`).
    pub fn get(&self, path: &str) -> Option<&Value> {
        let (name, rest) = crate::split_path(path);
        self.properties
            .iter()
            .find(|p| p.name == name)?
            .value
            .get(rest)
    }

    /// Check if a property is present.
    pub fn contains(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p.name == name)
    }

    /// Properties in input order.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Property names in input order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|p| p.name.as_str())
    }

    /// Number of properties present.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl Property {
    /// Create a property.
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Property name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Property value.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Collection {
    /// Create a collection of `element` values.
    pub fn new(element: ValueKind, items: Vec<Value>) -> Self {
        Self { element, items }
    }

    /// Declared element kind.
    pub fn element(&self) -> &ValueKind {
        &self.element
    }

    /// Items in input order.
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Get an item by index.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over items.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Scalar(scalar)
    }
}

impl From<Complex> for Value {
    fn from(complex: Complex) -> Self {
        Value::Complex(complex)
    }
}

impl From<Collection> for Value {
    fn from(collection: Collection) -> Self {
        Value::Collection(collection)
    }
}
