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

use std::fmt;

use itertools::Itertools;

/// A Hive type descriptor.
///
/// `Display` follows Hive's own type-name spelling (`array<int>`,
/// `map<string,bigint>`, `struct<a:int>`), so error messages read the way the
/// foreign library prints its signatures.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HiveType {
    Boolean,
    SmallInt,
    Int,
    BigInt,
    Float,
    Double,
    Decimal { precision: u8, scale: u8 },
    String,
    List(Box<HiveType>),
    Map(Box<HiveType>, Box<HiveType>),
    Struct(Vec<(String, HiveType)>),
}

impl fmt::Display for HiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "boolean"),
            Self::SmallInt => write!(f, "smallint"),
            Self::Int => write!(f, "int"),
            Self::BigInt => write!(f, "bigint"),
            Self::Float => write!(f, "float"),
            Self::Double => write!(f, "double"),
            Self::Decimal { precision, scale } => write!(f, "decimal({precision},{scale})"),
            Self::String => write!(f, "string"),
            Self::List(elem) => write!(f, "array<{elem}>"),
            Self::Map(key, value) => write!(f, "map<{key},{value}>"),
            Self::Struct(fields) => write!(
                f,
                "struct<{}>",
                fields
                    .iter()
                    .map(|(name, ty)| format!("{name}:{ty}"))
                    .format(",")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_hive_type() {
        assert_eq!(
            HiveType::Map(Box::new(HiveType::String), Box::new(HiveType::BigInt)).to_string(),
            "map<string,bigint>"
        );
        assert_eq!(
            HiveType::Struct(vec![
                ("a".into(), HiveType::Int),
                ("b".into(), HiveType::List(Box::new(HiveType::Double))),
            ])
            .to_string(),
            "struct<a:int,b:array<double>>"
        );
    }
}
