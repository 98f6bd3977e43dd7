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

pub use anyhow::anyhow;
use hive_bridge_udf::HiveUdfError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExprError {
    /// No candidate's arity or type pattern matches the bound signature.
    /// A query-compilation failure, reported with the full candidate list.
    #[error("no matching Hive function for {name}({arguments}), candidates: [{candidates}]")]
    NoMatchingFunction {
        name: String,
        arguments: String,
        candidates: String,
    },

    /// Two or more candidates tie at the lowest coercion cost and the
    /// resolver was asked to reject ties instead of breaking them by
    /// declaration order.
    #[error("ambiguous Hive function call {name}({arguments})")]
    AmbiguousFunction { name: String, arguments: String },

    /// One coercion between the two type systems is impossible.
    #[error("cannot bridge {from} to {to}")]
    TypeMismatch { from: String, to: String },

    /// A resolved, fully concrete signature cannot be turned into a callable
    /// adapter. A static-linkage problem: fatal for the call-site, never
    /// retried.
    #[error("failed to generate invocation for {name}: {reason}")]
    GenerationError { name: String, reason: String },

    /// A data-dependent failure inside the foreign function at row time.
    #[error("Hive function evaluation failed: {0}")]
    Eval(#[from] HiveUdfError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Return an [`ExprError::Internal`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::error::anyhow!($($arg)*).into())
    };
}
