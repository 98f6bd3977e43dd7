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

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use crate::builtins;
use crate::function::{FunctionDecl, HiveScalarFn};
use crate::value::HiveValue;
use crate::Result;

/// The builtin catalog, loaded once per process and read-only thereafter.
pub static BUILTIN_LIBRARY: LazyLock<Arc<HiveFunctionLibrary>> =
    LazyLock::new(|| Arc::new(builtins::library()));

/// A loaded foreign function library: an ordered declaration catalog per
/// function family, plus the entry-point table declarations link against.
///
/// A library is immutable after [`LibraryBuilder::build`]; readers never need
/// synchronization because no writer exists afterwards. Declarations may
/// reference linkage names that are absent from the entry-point table — that
/// is the foreign library's missing-class case, detected by the caller when
/// it tries to link.
pub struct HiveFunctionLibrary {
    namespace: &'static str,
    functions: HashMap<&'static str, Vec<FunctionDecl>>,
    entry_points: HashMap<&'static str, HiveScalarFn>,
}

impl std::fmt::Debug for HiveFunctionLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HiveFunctionLibrary")
            .field("namespace", &self.namespace)
            .field("functions", &self.functions.len())
            .field("entry_points", &self.entry_points.len())
            .finish()
    }
}

impl HiveFunctionLibrary {
    pub fn builder(namespace: &'static str) -> LibraryBuilder {
        LibraryBuilder {
            namespace,
            functions: HashMap::new(),
            entry_points: HashMap::new(),
        }
    }

    pub fn namespace(&self) -> &str {
        self.namespace
    }

    /// The declared candidates of a function family, in declaration order.
    pub fn candidates(&self, name: &str) -> Option<&[FunctionDecl]> {
        self.functions.get(name).map(|v| v.as_slice())
    }

    /// Look up an entry point by linkage name.
    pub fn entry_point(&self, linkage: &str) -> Option<HiveScalarFn> {
        self.entry_points.get(linkage).cloned()
    }

    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().copied()
    }
}

/// Write-once builder for a [`HiveFunctionLibrary`].
pub struct LibraryBuilder {
    namespace: &'static str,
    functions: HashMap<&'static str, Vec<FunctionDecl>>,
    entry_points: HashMap<&'static str, HiveScalarFn>,
}

impl LibraryBuilder {
    pub fn declare(mut self, decl: FunctionDecl) -> Self {
        self.functions.entry(decl.name).or_default().push(decl);
        self
    }

    pub fn link(
        mut self,
        linkage: &'static str,
        f: impl Fn(&[HiveValue]) -> Result<HiveValue> + Send + Sync + 'static,
    ) -> Self {
        self.entry_points.insert(linkage, Arc::new(f));
        self
    }

    pub fn build(self) -> HiveFunctionLibrary {
        HiveFunctionLibrary {
            namespace: self.namespace,
            functions: self.functions,
            entry_points: self.entry_points,
        }
    }
}
