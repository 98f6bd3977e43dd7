// Copyright 2025 RisingWave Labs
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use rust_decimal::Decimal;

use crate::{HiveUdfError, Result};

/// An owned Hive runtime value.
///
/// This collapses the foreign library's boxed primitive wrappers and writable
/// containers into one enum. `Null` is the foreign null wrapper: a function
/// with [`NullPolicy::CalledOnNull`](crate::NullPolicy) receives it and may
/// return it.
#[derive(Debug, Clone, PartialEq)]
pub enum HiveValue {
    Null,
    Boolean(bool),
    SmallInt(i16),
    Int(i32),
    BigInt(i64),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
    Text(String),
    List(Vec<HiveValue>),
    Map(Vec<(HiveValue, HiveValue)>),
    Struct(Vec<HiveValue>),
}

impl HiveValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// A short name of the value's kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::SmallInt(_) => "smallint",
            Self::Int(_) => "int",
            Self::BigInt(_) => "bigint",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::Decimal(_) => "decimal",
            Self::Text(_) => "string",
            Self::List(_) => "array",
            Self::Map(_) => "map",
            Self::Struct(_) => "struct",
        }
    }

    /// Borrow the value as text, or fail the way a Hive UDF does on a
    /// mis-typed argument.
    pub fn as_text(&self, function: &'static str) -> Result<&str> {
        match self {
            Self::Text(s) => Ok(s),
            other => Err(HiveUdfError::ArgumentMismatch {
                function,
                actual: other.kind().to_owned(),
            }),
        }
    }

    pub fn as_double(&self, function: &'static str) -> Result<f64> {
        match self {
            Self::Double(v) => Ok(*v),
            other => Err(HiveUdfError::ArgumentMismatch {
                function,
                actual: other.kind().to_owned(),
            }),
        }
    }

    pub fn as_int(&self, function: &'static str) -> Result<i32> {
        match self {
            Self::Int(v) => Ok(*v),
            other => Err(HiveUdfError::ArgumentMismatch {
                function,
                actual: other.kind().to_owned(),
            }),
        }
    }
}
