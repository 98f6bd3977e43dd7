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
use std::sync::Arc;

use itertools::Itertools;

use crate::types::HiveType;
use crate::value::HiveValue;
use crate::Result;

/// A native scalar entry point of the foreign library.
///
/// Entry points receive already-converted Hive values and return one. They
/// are pure functions of their arguments and safe to call concurrently.
pub type HiveScalarFn = Arc<dyn Fn(&[HiveValue]) -> Result<HiveValue> + Send + Sync>;

/// A parameter or return type pattern in a function declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigType {
    /// A concrete Hive type.
    Exact(HiveType),
    /// A type variable. All occurrences of the same variable within one
    /// declaration must unify to one concrete type.
    Var(&'static str),
}

impl fmt::Display for SigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(ty) => ty.fmt(f),
            Self::Var(name) => name.fmt(f),
        }
    }
}

/// How a function wants null arguments handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullPolicy {
    /// Any null argument short-circuits to a null result; the entry point is
    /// never invoked. The convention of Hive's simple `UDF` subclasses.
    Propagate,
    /// Nulls are passed through as [`HiveValue::Null`] and the function
    /// evaluates them itself. The convention of `GenericUDF`.
    CalledOnNull,
}

/// One candidate implementation of a named function family.
///
/// Declarations are immutable once loaded into a library. The declaration
/// order within a family is significant: it breaks coercion-cost ties during
/// resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    /// Unqualified family name, lower case.
    pub name: &'static str,
    /// Fixed parameter patterns. Their count is the minimum arity.
    pub params: Vec<SigType>,
    /// Pattern for a variable-arity tail, matched against every trailing
    /// argument beyond the fixed parameters.
    pub variadic: Option<SigType>,
    pub ret: SigType,
    pub null_policy: NullPolicy,
    /// Linkage name of the entry point in the library's entry-point table.
    pub entry: &'static str,
}

impl FunctionDecl {
    pub fn min_arity(&self) -> usize {
        self.params.len()
    }

    pub fn is_variadic(&self) -> bool {
        self.variadic.is_some()
    }

    /// The human-readable signature, e.g. `concat(string, string...) -> string`.
    pub fn signature(&self) -> String {
        let mut args = self.params.iter().map(|p| p.to_string()).collect_vec();
        if let Some(tail) = &self.variadic {
            args.push(format!("{tail}..."));
        }
        format!("{}({}) -> {}", self.name, args.iter().format(", "), self.ret)
    }
}
