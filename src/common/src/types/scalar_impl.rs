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

/// A nullable scalar value. `None` is the SQL `NULL`.
pub type Datum = Option<ScalarImpl>;

/// An owned scalar value of the query engine.
///
/// `Char` values are stored blank-padded to their declared length, the same
/// representation the engine uses in its columnar arrays.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarImpl {
    Bool(bool),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Decimal(Decimal),
    Utf8(String),
    List(ListValue),
    Map(MapValue),
    Struct(StructValue),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListValue {
    pub values: Vec<Datum>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapValue {
    /// Entries in insertion order. Keys are non-null by construction.
    pub entries: Vec<(ScalarImpl, Datum)>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructValue {
    pub fields: Vec<Datum>,
}

impl ScalarImpl {
    /// A short name of the value's kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int16(_) => "smallint",
            Self::Int32(_) => "integer",
            Self::Int64(_) => "bigint",
            Self::Float32(_) => "real",
            Self::Float64(_) => "double precision",
            Self::Decimal(_) => "numeric",
            Self::Utf8(_) => "varchar",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Struct(_) => "struct",
        }
    }
}

macro_rules! impl_scalar_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for ScalarImpl {
                fn from(v: $ty) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_scalar_from! {
    bool => Bool,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    Decimal => Decimal,
    String => Utf8,
    &str => Utf8,
}
