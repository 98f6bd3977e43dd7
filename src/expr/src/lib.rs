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

//! Resolution and invocation of Hive functions from the query engine.
//!
//! The pipeline runs once per bound call-site, at query-compilation time:
//!
//! 1. [`bridge`] maps types and values between the engine and the foreign
//!    library, and prices every coercion.
//! 2. [`sig`] picks the best-matching candidate declaration for a bound
//!    argument signature.
//! 3. [`adapter`] turns the resolved candidate into a cacheable, thread-safe
//!    invocation handle with a fixed per-position conversion plan.
//! 4. [`provider`] is the boundary the host calls.
//!
//! Per row, the host only invokes the handle it cached.

pub mod adapter;
pub mod bridge;
pub mod error;
pub mod provider;
pub mod sig;

pub use error::ExprError;

pub type Result<T> = std::result::Result<T, ExprError>;
