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

use std::sync::Arc;

use parse_display::Display;

mod scalar_impl;
pub mod struct_type;

pub use rust_decimal::Decimal;
pub use scalar_impl::*;

use self::struct_type::StructType;

/// A logical data type of the query engine.
///
/// Type names in `Display` follow the SQL spelling, same as what the engine
/// prints in error messages and `DESCRIBE` output.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    #[display("boolean")]
    Boolean,
    #[display("smallint")]
    Int16,
    #[display("integer")]
    Int32,
    #[display("bigint")]
    Int64,
    #[display("real")]
    Float32,
    #[display("double precision")]
    Float64,
    #[display("numeric({precision},{scale})")]
    Decimal { precision: u8, scale: u8 },
    /// Fixed-length, blank-padded character type.
    #[display("character({len})")]
    Char { len: u32 },
    #[display("varchar")]
    Varchar,
    #[display("{0}[]")]
    List(Box<DataType>),
    #[display("map({key},{value})")]
    Map {
        key: Box<DataType>,
        value: Box<DataType>,
    },
    #[display("{0}")]
    Struct(Arc<StructType>),
}

impl DataType {
    pub fn new_struct(fields: Vec<DataType>, field_names: Vec<String>) -> Self {
        Self::Struct(Arc::new(StructType {
            fields,
            field_names,
        }))
    }

    pub fn new_list(datatype: DataType) -> Self {
        Self::List(Box::new(datatype))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::Float32
                | DataType::Float64
                | DataType::Decimal { .. }
        )
    }

    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            DataType::List(_) | DataType::Map { .. } | DataType::Struct(_)
        )
    }
}
