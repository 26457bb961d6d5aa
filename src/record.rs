//! Field tables for encodable records.
//!
//! A [`Record`] lists its fields in declaration order, each as a [`Field`]
//! carrying the field name, optional key override and comment, and a
//! [`FieldValue`] from a closed set of kinds. The encoder walks these tables
//! instead of inspecting types at runtime.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::{error::ShapeError, keys};

/// A structured value with a fixed, ordered set of named fields.
pub trait Record {
    fn fields(&self) -> Vec<Field<'_>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Integer,
    Unsigned,
    Float,
    Complex,
    Boolean,
    Timestamp,
}

impl ScalarKind {
    /// Text shown in place of the value when an optional field is absent.
    pub fn type_hint(self) -> &'static str {
        match self {
            ScalarKind::Boolean => "true|false",
            ScalarKind::String => "\"text\"",
            ScalarKind::Integer => "integer",
            ScalarKind::Unsigned => "unsigned integer",
            ScalarKind::Float => "number",
            ScalarKind::Complex => "complex number",
            ScalarKind::Timestamp => "value",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarKind::String => "string",
            ScalarKind::Integer => "integer",
            ScalarKind::Unsigned => "unsigned integer",
            ScalarKind::Float => "float",
            ScalarKind::Complex => "complex",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Timestamp => "timestamp",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Complex(Complex),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
}

impl Scalar {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::String(_) => ScalarKind::String,
            Scalar::Integer(_) => ScalarKind::Integer,
            Scalar::Unsigned(_) => ScalarKind::Unsigned,
            Scalar::Float(_) => ScalarKind::Float,
            Scalar::Complex(_) => ScalarKind::Complex,
            Scalar::Boolean(_) => ScalarKind::Boolean,
            Scalar::Timestamp(_) => ScalarKind::Timestamp,
        }
    }
}

/// Conversion of a plain Rust field into a [`Scalar`].
pub trait ToScalar {
    const KIND: ScalarKind;

    fn to_scalar(&self) -> Scalar;
}

impl ToScalar for str {
    const KIND: ScalarKind = ScalarKind::String;

    fn to_scalar(&self) -> Scalar {
        Scalar::String(self.to_string())
    }
}

impl ToScalar for String {
    const KIND: ScalarKind = ScalarKind::String;

    fn to_scalar(&self) -> Scalar {
        Scalar::String(self.clone())
    }
}

impl ToScalar for bool {
    const KIND: ScalarKind = ScalarKind::Boolean;

    fn to_scalar(&self) -> Scalar {
        Scalar::Boolean(*self)
    }
}

impl ToScalar for Complex {
    const KIND: ScalarKind = ScalarKind::Complex;

    fn to_scalar(&self) -> Scalar {
        Scalar::Complex(*self)
    }
}

impl ToScalar for DateTime<Utc> {
    const KIND: ScalarKind = ScalarKind::Timestamp;

    fn to_scalar(&self) -> Scalar {
        Scalar::Timestamp(*self)
    }
}

macro_rules! impl_to_scalar {
    ($variant:ident as $target:ty => $($ty:ty),+) => {
        $(
            impl ToScalar for $ty {
                const KIND: ScalarKind = ScalarKind::$variant;

                fn to_scalar(&self) -> Scalar {
                    Scalar::$variant(*self as $target)
                }
            }
        )+
    };
}

impl_to_scalar!(Integer as i64 => i8, i16, i32, i64);
impl_to_scalar!(Unsigned as u64 => u8, u16, u32, u64, usize);
impl_to_scalar!(Float as f64 => f64);

impl ToScalar for f32 {
    const KIND: ScalarKind = ScalarKind::Float;

    // Widen through the shortest decimal form so 0.1f32 stays 0.1.
    fn to_scalar(&self) -> Scalar {
        Scalar::Float(self.to_string().parse().unwrap_or(f64::from(*self)))
    }
}

/// Builds an empty element instance for placeholder stanzas.
pub type EmptyRecord = fn() -> Box<dyn Record>;

fn empty_record<R: Record + Default + 'static>() -> Box<dyn Record> {
    Box::new(R::default())
}

pub enum FieldValue<'a> {
    Scalar(Scalar),
    Optional {
        kind: ScalarKind,
        value: Option<Scalar>,
    },
    List {
        kind: ScalarKind,
        items: Vec<Scalar>,
    },
    Table(&'a dyn Record),
    Array {
        items: Vec<&'a dyn Record>,
        empty: EmptyRecord,
    },
    Map {
        entries: Vec<(String, &'a dyn Record)>,
        empty: EmptyRecord,
    },
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Scalar(value) => f.debug_tuple("Scalar").field(value).finish(),
            FieldValue::Optional { kind, value } => f
                .debug_struct("Optional")
                .field("kind", kind)
                .field("value", value)
                .finish(),
            FieldValue::List { kind, items } => f
                .debug_struct("List")
                .field("kind", kind)
                .field("items", items)
                .finish(),
            FieldValue::Table(_) => f.write_str("Table"),
            FieldValue::Array { items, .. } => write!(f, "Array({})", items.len()),
            FieldValue::Map { entries, .. } => {
                let keys = entries.iter().map(|(key, _)| key).collect::<Vec<_>>();
                f.debug_tuple("Map").field(&keys).finish()
            }
        }
    }
}

/// One entry of a record's field table.
#[derive(Debug)]
pub struct Field<'a> {
    name: &'static str,
    key: Option<&'static str>,
    comment: Option<&'static str>,
    value: FieldValue<'a>,
}

impl<'a> Field<'a> {
    fn with_value(name: &'static str, value: FieldValue<'a>) -> Self {
        Self {
            name,
            key: None,
            comment: None,
            value,
        }
    }

    pub fn value<T: ToScalar + ?Sized>(name: &'static str, value: &T) -> Self {
        Self::with_value(name, FieldValue::Scalar(value.to_scalar()))
    }

    pub fn optional<T: ToScalar>(name: &'static str, value: &Option<T>) -> Self {
        Self::with_value(
            name,
            FieldValue::Optional {
                kind: T::KIND,
                value: value.as_ref().map(ToScalar::to_scalar),
            },
        )
    }

    pub fn list<T: ToScalar>(name: &'static str, values: &[T]) -> Self {
        Self::with_value(
            name,
            FieldValue::List {
                kind: T::KIND,
                items: values.iter().map(ToScalar::to_scalar).collect(),
            },
        )
    }

    pub fn table<R: Record>(name: &'static str, value: &'a R) -> Self {
        Self::with_value(name, FieldValue::Table(value))
    }

    pub fn array<R: Record + Default + 'static>(name: &'static str, values: &'a [R]) -> Self {
        Self::with_value(
            name,
            FieldValue::Array {
                items: values.iter().map(|item| item as &dyn Record).collect(),
                empty: empty_record::<R>,
            },
        )
    }

    pub fn map<K, R, I>(name: &'static str, entries: I) -> Self
    where
        K: fmt::Display + 'a,
        R: Record + Default + 'static,
        I: IntoIterator<Item = (&'a K, &'a R)>,
    {
        Self::with_value(
            name,
            FieldValue::Map {
                entries: entries
                    .into_iter()
                    .map(|(key, value)| (key.to_string(), value as &dyn Record))
                    .collect(),
                empty: empty_record::<R>,
            },
        )
    }

    /// Overrides the serialization key; an empty override is ignored.
    pub fn key(mut self, key: &'static str) -> Self {
        self.key = Some(key);
        self
    }

    pub fn comment(mut self, comment: &'static str) -> Self {
        self.comment = Some(comment);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The key used in output: the override if set, else the lower-cased
    /// name. Either is quoted when it contains whitespace.
    pub fn serialization_key(&self) -> String {
        let key = match self.key.filter(|key| !key.is_empty()) {
            Some(key) => key.to_string(),
            None => self.name.to_lowercase(),
        };
        if key.contains(char::is_whitespace) {
            keys::quote(&key)
        } else {
            key
        }
    }
}

#[derive(Debug)]
pub struct Reflected<'a> {
    pub key: String,
    pub comment: Option<&'static str>,
    pub value: FieldValue<'a>,
}

/// Resolves a record's field table into `(key, comment, value)` entries in
/// declaration order.
pub fn reflect(record: &dyn Record) -> Result<Vec<Reflected<'_>>, ShapeError> {
    let fields = record.fields();
    let mut reflected: Vec<Reflected<'_>> = Vec::with_capacity(fields.len());
    for field in fields {
        let key = field.serialization_key();
        if reflected.iter().any(|existing| existing.key == key) {
            return Err(ShapeError::DuplicateKey { key });
        }
        reflected.push(Reflected {
            key,
            comment: field.comment.filter(|comment| !comment.is_empty()),
            value: field.value,
        });
    }
    Ok(reflected)
}
