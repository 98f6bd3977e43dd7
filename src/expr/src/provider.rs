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

//! The boundary the host query engine calls, once per distinct bound
//! call-site at query-compilation time.

use std::sync::Arc;

use hive_bridge_udf::{HiveFunctionLibrary, BUILTIN_LIBRARY};

use crate::adapter::{self, HiveScalarImpl, InvocationConvention};
use crate::sig::{self, BoundSignature, FunctionName, TieBreak};
use crate::Result;

/// Provides invocation handles for the functions of one loaded library.
///
/// Pure orchestration over resolver and adapter generator: no caching, no
/// state beyond the library handle. The host is expected to cache the
/// returned implementation per call-site; calling again with the same inputs
/// recomputes the same result.
#[derive(Debug, Clone)]
pub struct HiveFunctionProvider {
    library: Arc<HiveFunctionLibrary>,
}

impl HiveFunctionProvider {
    pub fn new(library: Arc<HiveFunctionLibrary>) -> Self {
        Self { library }
    }

    /// A provider over the builtin catalog.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_LIBRARY.clone())
    }

    /// Resolve a bound call-site to an invocable implementation.
    ///
    /// Fails with `NoMatchingFunction` / `AmbiguousFunction` when resolution
    /// does, and with `GenerationError` when the resolved candidate cannot be
    /// linked or the requested convention cannot be satisfied. All failures
    /// surface here, synchronously — nothing is deferred to row time.
    pub fn get_scalar_function_implementation(
        &self,
        name: &FunctionName,
        signature: &BoundSignature,
        convention: &InvocationConvention,
    ) -> Result<HiveScalarImpl> {
        let candidates = if name.namespace == self.library.namespace() {
            self.library.candidates(&name.name).unwrap_or(&[])
        } else {
            &[]
        };
        let resolved = sig::resolve(name, candidates, signature, TieBreak::DeclarationOrder)?;
        adapter::generate(&self.library, name, resolved, signature, convention)
    }
}
