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

//! The foreign (Hive-side) half of the UDF bridge: type descriptors, runtime
//! values, function declarations, and the loaded function library.
//!
//! Everything here models the legacy UDF ecosystem on its own terms. Nothing
//! in this crate knows about the query engine's types; the bridge in
//! `hive_bridge_expr` is the only place the two type systems meet.

mod builtins;
mod error;
mod function;
mod library;
mod types;
mod value;

pub use error::{HiveUdfError, Result};
pub use function::{FunctionDecl, HiveScalarFn, NullPolicy, SigType};
pub use library::{HiveFunctionLibrary, LibraryBuilder, BUILTIN_LIBRARY};
pub use types::HiveType;
pub use value::HiveValue;
