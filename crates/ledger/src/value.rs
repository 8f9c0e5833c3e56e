use super::*;
use rust_decimal::Decimal;
use serde::Serialize;
use serde::ser::SerializeMap;
use tokio_postgres::Row;
use tokio_postgres::types::Type;

/// A single decoded cell.
///
/// NUMERIC columns decode into [`Decimal`] and serialize as strings, so no
/// amount ever passes through a binary float.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Text(String),
    Int(i64),
    Decimal(Decimal),
    Float(f64),
    Bool(bool),
}

impl Value {
    /// Exact decimal rendering for integer and NUMERIC values.
    pub fn decimal(&self) -> Option<String> {
        match self {
            Self::Decimal(d) => Some(d.to_string()),
            Self::Int(i) => Some(i.to_string()),
            _ => None,
        }
    }

    fn decode(row: &Row, i: usize) -> Result<Self, QueryError> {
        let column = &row.columns()[i];
        let value = match *column.type_() {
            Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
                row.try_get::<_, Option<String>>(i)?.map(Self::Text)
            }
            Type::INT2 => row.try_get::<_, Option<i16>>(i)?.map(|v| Self::Int(v.into())),
            Type::INT4 => row.try_get::<_, Option<i32>>(i)?.map(|v| Self::Int(v.into())),
            Type::INT8 => row.try_get::<_, Option<i64>>(i)?.map(Self::Int),
            Type::NUMERIC => row.try_get::<_, Option<Decimal>>(i)?.map(Self::Decimal),
            Type::FLOAT4 => row.try_get::<_, Option<f32>>(i)?.map(|v| Self::Float(v.into())),
            Type::FLOAT8 => row.try_get::<_, Option<f64>>(i)?.map(Self::Float),
            Type::BOOL => row.try_get::<_, Option<bool>>(i)?.map(Self::Bool),
            ref other => {
                return Err(QueryError::QueryFailed(format!(
                    "unsupported type {} in column {}",
                    other,
                    column.name()
                )));
            }
        };
        Ok(value.unwrap_or(Self::Null))
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Text(s) => write!(f, "{}", s),
            Self::Int(i) => write!(f, "{}", i),
            Self::Decimal(d) => write!(f, "{}", d),
            Self::Float(x) => write!(f, "{}", x),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// One row as an ordered column → value mapping.
///
/// Column order is the projection order and survives serialization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record(Vec<(String, Value)>);

impl Record {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl TryFrom<&Row> for Record {
    type Error = QueryError;
    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        row.columns()
            .iter()
            .enumerate()
            .map(|(i, column)| Value::decode(row, i).map(|v| (column.name().to_string(), v)))
            .collect()
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
