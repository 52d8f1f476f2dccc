use crate::collection::{DocId, Document};
use itertools::Itertools;
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};

/// Compare two integers widened to i128 for equality.
#[inline]
fn num_eq_int(a: i128, b: i128) -> bool {
    a == b
}

/// Compare two floats for equality with proper NaN handling.
#[inline]
fn num_eq_float(a: f64, b: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        true
    } else {
        a == b
    }
}

/// Compare two floats with NaN ordered greater than everything else.
#[inline]
fn num_cmp_float(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Represents a [Document] field value. It can be a simple value like [Value::I64]
/// or [Value::String], or a complex value like [Value::Document] or [Value::Array].
///
/// # Characteristics
/// - **Comparable**: integers are compared across widths through a common type,
///   decimals with total NaN ordering
/// - **Serializable**: can be serialized/deserialized with serde
/// - **Default**: defaults to [Value::Null]
///
/// Create values using the `From` trait or the `doc_value!` macro:
/// ```text
/// let v1: Value = 42.into();          // From i32
/// let v2 = Value::from("hello");      // From &str
/// let doc = doc! { age: 42, name: "Alice" };
/// ```
#[derive(Clone, Default, serde::Deserialize, serde::Serialize)]
pub enum Value {
    /// Represents a null value.
    #[default]
    Null,
    /// Represents a boolean value.
    Bool(bool),
    /// Represents a signed 32-bit integer value.
    I32(i32),
    /// Represents a signed 64-bit integer value.
    I64(i64),
    /// Represents an unsigned 32-bit integer value.
    U32(u32),
    /// Represents an unsigned 64-bit integer value.
    U64(u64),
    /// Represents a 32-bit floating point value.
    F32(f32),
    /// Represents a 64-bit floating point value.
    F64(f64),
    /// Represents a string value.
    String(String),
    /// Represents a document identifier.
    DocId(DocId),
    /// Represents a nested document value.
    Document(Document),
    /// Represents an array value.
    Array(Vec<Value>),
    /// Represents a byte array value. It cannot be filtered on.
    Bytes(Vec<u8>),
}

impl Value {
    /// Checks if the value is [Value::Null].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Checks if the value is any integer variant.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Value::I32(_) | Value::I64(_) | Value::U32(_) | Value::U64(_)
        )
    }

    /// Checks if the value is a floating point variant.
    pub fn is_decimal(&self) -> bool {
        matches!(self, Value::F32(_) | Value::F64(_))
    }

    /// Checks if the value is numeric.
    pub fn is_number(&self) -> bool {
        self.is_integer() || self.is_decimal()
    }

    /// Checks if the value is a [DocId].
    pub fn is_doc_id(&self) -> bool {
        matches!(self, Value::DocId(_))
    }

    /// Checks if the value can take part in ordered comparisons.
    pub fn is_comparable(&self) -> bool {
        self.is_number() || matches!(self, Value::String(_) | Value::DocId(_) | Value::Bool(_))
    }

    /// Widens any integer variant to i128.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Value::I32(v) => Some(*v as i128),
            Value::I64(v) => Some(*v as i128),
            Value::U32(v) => Some(*v as i128),
            Value::U64(v) => Some(*v as i128),
            _ => None,
        }
    }

    /// Widens any floating point variant to f64.
    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            Value::F32(v) => Some(*v as f64),
            Value::F64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::U64(v) => Some(*v),
            Value::U32(v) => Some(*v as u64),
            Value::I64(v) if *v >= 0 => Some(*v as u64),
            Value::I32(v) if *v >= 0 => Some(*v as u64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_doc_id(&self) -> Option<DocId> {
        match self {
            Value::DocId(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    // rank used to totally order values of different variants
    fn type_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::I32(_)
            | Value::I64(_)
            | Value::U32(_)
            | Value::U64(_)
            | Value::F32(_)
            | Value::F64(_) => 2,
            Value::String(_) => 3,
            Value::DocId(_) => 4,
            Value::Bytes(_) => 5,
            Value::Array(_) => 6,
            Value::Document(_) => 7,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        // numbers of any width compare against each other, as in cmp()
        if self.is_number() && other.is_number() {
            if self.is_integer() && other.is_integer() {
                if let (Some(a), Some(b)) = (self.as_integer(), other.as_integer()) {
                    return num_eq_int(a, b);
                }
            }
            let a = self
                .as_decimal()
                .or_else(|| self.as_integer().map(|v| v as f64))
                .unwrap_or(0.0);
            let b = other
                .as_decimal()
                .or_else(|| other.as_integer().map(|v| v as f64))
                .unwrap_or(0.0);
            return num_eq_float(a, b);
        }

        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::DocId(a), Value::DocId(b)) => a == b,
            (Value::Document(a), Value::Document(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        // numbers of any width compare against each other
        if self.is_number() && other.is_number() {
            return if self.is_integer() && other.is_integer() {
                let a = self.as_integer().unwrap_or(0);
                let b = other.as_integer().unwrap_or(0);
                a.cmp(&b)
            } else {
                let a = self
                    .as_decimal()
                    .or_else(|| self.as_integer().map(|v| v as f64))
                    .unwrap_or(0.0);
                let b = other
                    .as_decimal()
                    .or_else(|| other.as_integer().map(|v| v as f64))
                    .unwrap_or(0.0);
                num_cmp_float(a, b)
            };
        }

        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::DocId(a), Value::DocId(b)) => a.cmp(b),
            (Value::Bytes(a), Value::Bytes(b)) => a.cmp(b),
            (Value::Array(a), Value::Array(b)) => a.iter().cmp(b.iter()),
            (Value::Document(a), Value::Document(b)) => a.cmp(b),
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::U32(v) => write!(f, "{}", v),
            Value::U64(v) => write!(f, "{}", v),
            Value::F32(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "\"{}\"", v),
            Value::DocId(id) => write!(f, "{}", id),
            Value::Document(doc) => write!(f, "{}", doc),
            Value::Array(values) => {
                write!(f, "[{}]", values.iter().map(|v| v.to_string()).join(", "))
            }
            Value::Bytes(bytes) => write!(f, "bytes[{}]", bytes.len()),
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::I32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::U32(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::U64(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::F32(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<DocId> for Value {
    fn from(value: DocId) -> Self {
        Value::DocId(value)
    }
}

impl From<Document> for Value {
    fn from(value: Document) -> Self {
        Value::Document(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_compare_across_widths() {
        assert_eq!(Value::I32(42), Value::U64(42));
        assert_eq!(Value::I64(7), Value::U32(7));
        assert_ne!(Value::I32(42), Value::U64(43));
    }

    #[test]
    fn decimals_compare_across_widths() {
        assert_eq!(Value::F32(1.5), Value::F64(1.5));
        assert_eq!(Value::F64(f64::NAN), Value::F64(f64::NAN));
    }

    #[test]
    fn mixed_numeric_ordering() {
        assert!(Value::I32(2) < Value::U64(3));
        assert!(Value::F64(2.5) > Value::I32(2));
        assert!(Value::F64(f64::NAN) > Value::F64(1e300));
        // equality agrees with ordering across integer/decimal families
        assert_eq!(Value::I32(2), Value::F64(2.0));
        assert_ne!(Value::I32(2), Value::F64(2.5));
    }

    #[test]
    fn strings_order_lexicographically() {
        assert!(Value::from("alice") < Value::from("bob"));
        assert_eq!(Value::from("alice"), Value::String("alice".to_string()));
    }

    #[test]
    fn null_is_smallest() {
        assert!(Value::Null < Value::Bool(false));
        assert!(Value::Null < Value::I32(i32::MIN));
        assert!(Value::Null < Value::from(""));
    }

    #[test]
    fn accessors_return_matching_types() {
        assert_eq!(Value::I32(5).as_integer(), Some(5));
        assert_eq!(Value::U64(5).as_u64(), Some(5));
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Null.as_str(), None);
        assert_eq!(Value::from("x").as_integer(), None);
    }

    #[test]
    fn from_option_maps_none_to_null() {
        let some: Value = Some(1i32).into();
        let none: Value = Option::<i32>::None.into();
        assert_eq!(some, Value::I32(1));
        assert!(none.is_null());
    }

    #[test]
    fn display_formats() {
        assert_eq!(format!("{}", Value::Null), "null");
        assert_eq!(format!("{}", Value::I64(12)), "12");
        assert_eq!(format!("{}", Value::from("a")), "\"a\"");
        assert_eq!(
            format!("{}", Value::Array(vec![Value::I32(1), Value::I32(2)])),
            "[1, 2]"
        );
    }

    #[test]
    fn default_is_null() {
        assert!(Value::default().is_null());
    }
}
