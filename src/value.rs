use crate::comparer::EqualityComparer;
use crate::op::of_type::AsAny;
use crate::{Float, Integer};
use itertools::Itertools;
use ordered_float::OrderedFloat;
use rustc_hash::FxBuildHasher;
use std::any::Any;
use std::fmt::{Display, Formatter};
use std::hash::BuildHasher;
use unicase::UniCase;

/// 动态类型的元素，`Null`表示空值。
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(Integer),
    Float(OrderedFloat<Float>),
    String(String),
    List(Vec<Value>),
}

/// 非空值的运行时类型。
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Kind {
    Bool,
    Integer,
    Float,
    String,
    List,
}

impl Value {
    /// 空值没有类型。
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(Kind::Bool),
            Value::Integer(_) => Some(Kind::Integer),
            Value::Float(_) => Some(Kind::Float),
            Value::String(_) => Some(Kind::String),
            Value::List(_) => Some(Kind::List),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "{s}"),
            Value::List(items) => write!(f, "[{}]", items.iter().join(", ")),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Integer> for Value {
    fn from(value: Integer) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value as Integer)
    }
}

impl From<Float> for Value {
    fn from(value: Float) -> Self {
        Value::Float(OrderedFloat(value))
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

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// 按类型暴露内部值：`Bool`为`bool`，`Integer`为`Integer`，`Float`为`Float`，`String`为`String`，
/// `List`为`Vec<Value>`。
impl AsAny for Value {
    fn as_any(&self) -> Option<&dyn Any> {
        let any: &dyn Any = match self {
            Value::Null => return None,
            Value::Bool(b) => b,
            Value::Integer(i) => i,
            Value::Float(v) => &v.0,
            Value::String(s) => s,
            Value::List(items) => items,
        };
        Some(any)
    }
}

/// `Value`的相等性约定，`nocase`时字符串忽略大小写比较，其他类型不受影响。
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueComparer {
    nocase: bool,
}

impl ValueComparer {
    pub fn new(nocase: bool) -> Self {
        ValueComparer { nocase }
    }
}

impl EqualityComparer<Value> for ValueComparer {
    fn equals(&self, left: &Value, right: &Value) -> bool {
        match (left, right) {
            (Value::String(l), Value::String(r)) if self.nocase => UniCase::new(l) == UniCase::new(r),
            _ => left == right,
        }
    }

    fn hash(&self, value: &Value) -> u64 {
        match value {
            Value::String(s) if self.nocase => FxBuildHasher.hash_one(UniCase::new(s)),
            _ => FxBuildHasher.hash_one(value),
        }
    }
}
