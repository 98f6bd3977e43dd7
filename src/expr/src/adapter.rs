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

//! Invocation adapter generation.
//!
//! [`generate`] runs once per bound call-site and produces a
//! [`HiveScalarImpl`]: a handle that owns a fixed conversion plan and the
//! linked entry point. The handle holds no per-call state and is invoked
//! concurrently from however many worker threads the host runs.

use std::fmt;

use hive_bridge_common::types::{DataType, Datum};
use hive_bridge_udf::{HiveFunctionLibrary, HiveScalarFn, HiveType, HiveValue, NullPolicy};
use itertools::Itertools;

use crate::sig::{BoundSignature, FunctionName, ResolvedFunction};
use crate::{bail, bridge, ExprError, Result};

/// How one argument is physically passed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentConvention {
    /// A boxed nullable value (`Datum`).
    Boxed,
    /// The host guarantees the value is never null.
    NeverNull,
}

/// How the result is physically returned to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnConvention {
    Nullable,
    /// The host expects a value on every invocation. Only satisfiable by a
    /// null-propagating candidate whose arguments are all never-null.
    NonNull,
}

/// The physical calling convention requested by the host for one call-site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationConvention {
    pub arguments: Vec<ArgumentConvention>,
    pub result: ReturnConvention,
}

impl InvocationConvention {
    /// The engine's default: every argument boxed nullable, nullable result.
    pub fn boxed(arity: usize) -> Self {
        Self {
            arguments: vec![ArgumentConvention::Boxed; arity],
            result: ReturnConvention::Nullable,
        }
    }
}

/// The generated invocation handle for one `(function, bound signature)`
/// pair. Immutable, cheap to invoke, safe to cache and share across threads.
pub struct HiveScalarImpl {
    name: FunctionName,
    /// One fixed coercion per argument position.
    arg_plans: Vec<(DataType, HiveType)>,
    /// The return coercion, foreign to logical.
    return_plan: (HiveType, DataType),
    null_policy: NullPolicy,
    convention: InvocationConvention,
    entry: HiveScalarFn,
}

impl fmt::Debug for HiveScalarImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HiveScalarImpl")
            .field("name", &self.name)
            .field("arg_plans", &self.arg_plans)
            .field("return_plan", &self.return_plan)
            .field("null_policy", &self.null_policy)
            .finish_non_exhaustive()
    }
}

impl HiveScalarImpl {
    pub fn name(&self) -> &FunctionName {
        &self.name
    }

    pub fn return_type(&self) -> &DataType {
        &self.return_plan.1
    }

    /// Invoke the adapted function on one row of argument values.
    ///
    /// A pure function of its arguments. Errors out of here are
    /// data-dependent evaluation failures, never resolution-shaped ones.
    pub fn invoke(&self, args: &[Datum]) -> Result<Datum> {
        if args.len() != self.arg_plans.len() {
            bail!(
                "{} expects {} arguments, got {}",
                self.name,
                self.arg_plans.len(),
                args.len()
            );
        }
        for (i, (datum, convention)) in
            args.iter().zip(self.convention.arguments.iter()).enumerate()
        {
            if *convention == ArgumentConvention::NeverNull && datum.is_none() {
                bail!("argument {i} of {} is null under a never-null convention", self.name);
            }
        }

        if self.null_policy == NullPolicy::Propagate && args.iter().any(|d| d.is_none()) {
            return Ok(None);
        }

        let hive_args: Vec<HiveValue> = args
            .iter()
            .zip(self.arg_plans.iter())
            .map(|(datum, (from, to))| match datum {
                None => Ok(HiveValue::Null),
                Some(scalar) => bridge::to_hive_value(scalar, from, to),
            })
            .try_collect()?;

        let output = (self.entry)(&hive_args)?;

        let datum = bridge::from_hive_value(output, &self.return_plan.1)?;
        if datum.is_none() && self.convention.result == ReturnConvention::NonNull {
            bail!("{} returned null under a non-null return convention", self.name);
        }
        Ok(datum)
    }
}

/// Build the invocation handle for a resolved candidate.
///
/// Construction is idempotent and side-effect-free beyond the allocation: it
/// links the entry point, fixes the conversion plan, and validates the
/// requested convention. Failures here are [`ExprError::GenerationError`] —
/// static problems of the call-site, distinct from resolution failures.
pub fn generate(
    library: &HiveFunctionLibrary,
    name: &FunctionName,
    resolved: ResolvedFunction,
    signature: &BoundSignature,
    convention: &InvocationConvention,
) -> Result<HiveScalarImpl> {
    let generation_error = |reason: String| ExprError::GenerationError {
        name: name.to_string(),
        reason,
    };

    if convention.arguments.len() != signature.arg_types.len() {
        return Err(generation_error(format!(
            "invocation convention has {} argument slots for {} arguments",
            convention.arguments.len(),
            signature.arg_types.len()
        )));
    }

    let nullable_result = match resolved.decl.null_policy {
        NullPolicy::CalledOnNull => true,
        NullPolicy::Propagate => convention
            .arguments
            .iter()
            .any(|c| *c == ArgumentConvention::Boxed),
    };
    if convention.result == ReturnConvention::NonNull && nullable_result {
        return Err(generation_error(format!(
            "candidate {} can return null, which the non-null return convention forbids",
            resolved.decl.signature()
        )));
    }

    let entry = library.entry_point(resolved.decl.entry).ok_or_else(|| {
        generation_error(format!(
            "entry point `{}` is not linked in the {} library",
            resolved.decl.entry,
            library.namespace()
        ))
    })?;

    tracing::debug!(
        function = %name,
        signature = %resolved.decl.signature(),
        "generated Hive invocation handle"
    );

    Ok(HiveScalarImpl {
        name: name.clone(),
        arg_plans: signature
            .arg_types
            .iter()
            .cloned()
            .zip_eq(resolved.param_types)
            .collect(),
        return_plan: (resolved.return_type, signature.return_type.clone()),
        null_policy: resolved.decl.null_policy,
        convention: convention.clone(),
        entry,
    })
}
