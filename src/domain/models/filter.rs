use serde::{Deserialize, Serialize};
use std::fmt;

/// One filter as submitted by a client, before validation.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RawFilter {
    pub field: String,
    pub operator: String,
    pub value: String,
}

impl RawFilter {
    pub fn new(field: &str, operator: &str, value: &str) -> Self {
        Self { field: field.to_string(), operator: operator.to_string(), value: value.to_string() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    City,
    Topics,
    Month,
    MaxAttendees,
}

impl FilterField {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "CITY" => Some(Self::City),
            "TOPIC" => Some(Self::Topics),
            "MONTH" => Some(Self::Month),
            "MAX_ATTENDEES" => Some(Self::MaxAttendees),
            _ => None,
        }
    }

    /// Canonical field name as exposed by the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::City => "city",
            Self::Topics => "topics",
            Self::Month => "month",
            Self::MaxAttendees => "maxAttendees",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Month | Self::MaxAttendees)
    }

    pub fn is_repeated(&self) -> bool {
        matches!(self, Self::Topics)
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,
    Gt,
    Gteq,
    Lt,
    Lteq,
    Ne,
}

impl FilterOperator {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "EQ" => Some(Self::Eq),
            "GT" => Some(Self::Gt),
            "GTEQ" => Some(Self::Gteq),
            "LT" => Some(Self::Lt),
            "LTEQ" => Some(Self::Lteq),
            "NE" => Some(Self::Ne),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Gteq => ">=",
            Self::Lt => "<",
            Self::Lteq => "<=",
            Self::Ne => "!=",
        }
    }

    pub fn is_inequality(&self) -> bool {
        *self != Self::Eq
    }

    pub fn compare<T: PartialOrd>(&self, lhs: T, rhs: T) -> bool {
        match self {
            Self::Eq => lhs == rhs,
            Self::Gt => lhs > rhs,
            Self::Gteq => lhs >= rhs,
            Self::Lt => lhs < rhs,
            Self::Lteq => lhs <= rhs,
            Self::Ne => lhs != rhs,
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Int(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConferenceFilter {
    pub field: FilterField,
    pub operator: FilterOperator,
    pub value: FilterValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedFilters {
    pub inequality_field: Option<FilterField>,
    pub filters: Vec<ConferenceFilter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Field(FilterField),
    Name,
}

/// Ordered, filtered plan against the conference collection. Filters are
/// combined with AND; sort keys are all ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConferenceQuery {
    pub filters: Vec<ConferenceFilter>,
    pub order_by: Vec<SortKey>,
}
