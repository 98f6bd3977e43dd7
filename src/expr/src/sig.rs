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

//! Overload resolution: pick the best candidate declaration of a function
//! family for a concrete bound signature.
//!
//! Resolution is a pure function of its inputs. Each candidate is tried with
//! a fresh type-variable binding map that is discarded on failure, so a
//! rejected candidate leaves no trace in the next attempt.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use hive_bridge_common::types::DataType;
use hive_bridge_udf::{FunctionDecl, HiveType, SigType};
use itertools::Itertools;

use crate::{bridge, ExprError, Result};

/// Identity of a function family: `namespace.name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionName {
    pub namespace: String,
    pub name: String,
}

impl FunctionName {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// A name in the default `hive` namespace.
    pub fn hive(name: impl Into<String>) -> Self {
        Self::new("hive", name)
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// The caller's fully concrete argument and return types for one call-site.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundSignature {
    pub arg_types: Vec<DataType>,
    pub return_type: DataType,
}

impl BoundSignature {
    pub fn new(arg_types: Vec<DataType>, return_type: DataType) -> Self {
        Self {
            arg_types,
            return_type,
        }
    }

    pub fn arguments(&self) -> String {
        self.arg_types.iter().format(", ").to_string()
    }
}

/// What to do when two candidates tie at the lowest coercion cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// The first-declared candidate wins. Keeps resolution total and
    /// deterministic; the provider default.
    #[default]
    DeclarationOrder,
    /// Refuse to choose: a genuine tie is `AmbiguousFunction`.
    Reject,
}

/// A chosen candidate with all type variables substituted away.
#[derive(Debug, Clone)]
pub struct ResolvedFunction {
    pub decl: FunctionDecl,
    /// Concrete foreign type per bound argument position (the variadic tail
    /// expanded to the actual argument count).
    pub param_types: Vec<HiveType>,
    pub return_type: HiveType,
    /// Total coercion cost this candidate was ranked by.
    pub cost: u32,
}

/// Resolve a call against the candidate declarations of one family.
///
/// Repeated calls with the same inputs return the same candidate or the same
/// failure: candidates are tried in declaration order and ranking has no
/// hidden state.
pub fn resolve(
    name: &FunctionName,
    candidates: &[FunctionDecl],
    signature: &BoundSignature,
    tie_break: TieBreak,
) -> Result<ResolvedFunction> {
    let matches: Vec<ResolvedFunction> = candidates
        .iter()
        .filter_map(|decl| try_match(decl, signature))
        .collect();

    let Some(min_cost) = matches.iter().map(|m| m.cost).min() else {
        return Err(ExprError::NoMatchingFunction {
            name: name.to_string(),
            arguments: signature.arguments(),
            candidates: candidates.iter().map(|c| c.signature()).join(", "),
        });
    };

    let mut ties = matches.into_iter().filter(|m| m.cost == min_cost);
    let chosen = ties.next().unwrap();
    if ties.next().is_some() && tie_break == TieBreak::Reject {
        return Err(ExprError::AmbiguousFunction {
            name: name.to_string(),
            arguments: signature.arguments(),
        });
    }

    tracing::debug!(
        function = %name,
        signature = %chosen.decl.signature(),
        cost = chosen.cost,
        "resolved Hive function"
    );
    Ok(chosen)
}

/// Try one candidate. `None` means rejected; the binding map dies with the
/// attempt.
fn try_match(decl: &FunctionDecl, signature: &BoundSignature) -> Option<ResolvedFunction> {
    let arity = signature.arg_types.len();
    if decl.is_variadic() {
        if arity < decl.min_arity() {
            return None;
        }
    } else if arity != decl.params.len() {
        return None;
    }

    let pattern_at = |i: usize| {
        decl.params
            .get(i)
            .or(decl.variadic.as_ref())
            .expect("arity checked above")
    };

    // First pass: bind type variables. A variable seen twice widens its
    // binding to the least common foreign type of all occurrences, or the
    // candidate is rejected as mutually incompatible.
    let mut bindings: HashMap<&'static str, HiveType> = HashMap::new();
    for (i, arg) in signature.arg_types.iter().enumerate() {
        if let SigType::Var(var) = pattern_at(i) {
            let image = bridge::to_hive(arg).ok()?;
            match bindings.entry(*var) {
                Entry::Occupied(mut e) => {
                    let common = bridge::common_hive_type(e.get(), &image)?;
                    e.insert(common);
                }
                Entry::Vacant(e) => {
                    e.insert(image);
                }
            }
        }
    }
    // A variable occurring only in the return position binds from the bound
    // return type.
    if let SigType::Var(var) = &decl.ret {
        if !bindings.contains_key(var) {
            bindings.insert(*var, bridge::to_hive(&signature.return_type).ok()?);
        }
    }

    // Second pass: substitute, then price every position.
    let mut cost = 0;
    let mut param_types = Vec::with_capacity(arity);
    for (i, arg) in signature.arg_types.iter().enumerate() {
        let ty = match pattern_at(i) {
            SigType::Exact(ty) => ty.clone(),
            SigType::Var(var) => bindings[var].clone(),
        };
        cost += bridge::coercion_cost(arg, &ty)?;
        param_types.push(ty);
    }
    let return_type = match &decl.ret {
        SigType::Exact(ty) => ty.clone(),
        SigType::Var(var) => bindings[var].clone(),
    };
    cost += bridge::result_cost(&return_type, &signature.return_type)?;

    Some(ResolvedFunction {
        decl: decl.clone(),
        param_types,
        return_type,
        cost,
    })
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use hive_bridge_udf::NullPolicy;

    use super::*;

    fn decl(
        name: &'static str,
        params: Vec<SigType>,
        variadic: Option<SigType>,
        ret: SigType,
        entry: &'static str,
    ) -> FunctionDecl {
        FunctionDecl {
            name,
            params,
            variadic,
            ret,
            null_policy: NullPolicy::Propagate,
            entry,
        }
    }

    fn exact(ty: HiveType) -> SigType {
        SigType::Exact(ty)
    }

    #[test]
    fn lowest_cost_wins_over_declaration_order() {
        // both candidates match, but the exact one is cheaper even though it
        // is declared later
        let candidates = vec![
            decl(
                "f",
                vec![exact(HiveType::BigInt)],
                None,
                exact(HiveType::Int),
                "f_bigint",
            ),
            decl(
                "f",
                vec![exact(HiveType::SmallInt)],
                None,
                exact(HiveType::Int),
                "f_smallint",
            ),
        ];
        let signature = BoundSignature::new(vec![DataType::Int16], DataType::Int32);
        let resolved = resolve(
            &FunctionName::hive("f"),
            &candidates,
            &signature,
            TieBreak::DeclarationOrder,
        )
        .unwrap();
        assert_eq!(resolved.decl.entry, "f_smallint");
        assert_eq!(resolved.cost, 0);
    }

    #[test]
    fn resolution_is_deterministic() {
        let candidates = vec![
            decl(
                "f",
                vec![exact(HiveType::BigInt)],
                None,
                exact(HiveType::BigInt),
                "f_bigint",
            ),
            decl(
                "f",
                vec![exact(HiveType::Double)],
                None,
                exact(HiveType::Double),
                "f_double",
            ),
        ];
        let signature = BoundSignature::new(vec![DataType::Int16], DataType::Int64);
        for _ in 0..10 {
            let resolved = resolve(
                &FunctionName::hive("f"),
                &candidates,
                &signature,
                TieBreak::DeclarationOrder,
            )
            .unwrap();
            assert_eq!(resolved.decl.entry, "f_bigint");
            assert_eq!(resolved.cost, 2);
        }
    }

    #[test]
    fn type_variable_binds_all_occurrences() {
        let candidates = vec![decl(
            "f",
            vec![SigType::Var("T"), SigType::Var("T")],
            None,
            SigType::Var("T"),
            "f",
        )];
        // (integer, bigint) widens T to bigint
        let signature = BoundSignature::new(
            vec![DataType::Int32, DataType::Int64],
            DataType::Int64,
        );
        let resolved = resolve(
            &FunctionName::hive("f"),
            &candidates,
            &signature,
            TieBreak::DeclarationOrder,
        )
        .unwrap();
        assert_eq!(
            resolved.param_types,
            vec![HiveType::BigInt, HiveType::BigInt]
        );
        assert_eq!(resolved.return_type, HiveType::BigInt);

        // (integer, varchar) has no common foreign type, even though either
        // argument alone would match
        let signature =
            BoundSignature::new(vec![DataType::Int32, DataType::Varchar], DataType::Varchar);
        let err = resolve(
            &FunctionName::hive("f"),
            &candidates,
            &signature,
            TieBreak::DeclarationOrder,
        )
        .unwrap_err();
        assert!(matches!(err, ExprError::NoMatchingFunction { .. }));
    }

    #[test]
    fn variadic_minimum_arity() {
        let candidates = vec![decl(
            "concat",
            vec![exact(HiveType::String)],
            Some(exact(HiveType::String)),
            exact(HiveType::String),
            "concat",
        )];
        let name = FunctionName::hive("concat");

        let below = BoundSignature::new(vec![], DataType::Varchar);
        assert!(matches!(
            resolve(&name, &candidates, &below, TieBreak::DeclarationOrder),
            Err(ExprError::NoMatchingFunction { .. })
        ));

        for n in 1..=4 {
            let signature =
                BoundSignature::new(vec![DataType::Varchar; n], DataType::Varchar);
            let resolved =
                resolve(&name, &candidates, &signature, TieBreak::DeclarationOrder).unwrap();
            assert_eq!(resolved.param_types.len(), n);
        }

        // incompatible tail type
        let signature = BoundSignature::new(
            vec![DataType::Varchar, DataType::Boolean],
            DataType::Varchar,
        );
        assert!(matches!(
            resolve(&name, &candidates, &signature, TieBreak::DeclarationOrder),
            Err(ExprError::NoMatchingFunction { .. })
        ));
    }

    #[test]
    fn variadic_tail_shares_type_variable() {
        let candidates = vec![decl(
            "coalesce",
            vec![SigType::Var("T")],
            Some(SigType::Var("T")),
            SigType::Var("T"),
            "coalesce",
        )];
        let signature = BoundSignature::new(
            vec![DataType::Int16, DataType::Int32, DataType::Int64],
            DataType::Int64,
        );
        let resolved = resolve(
            &FunctionName::hive("coalesce"),
            &candidates,
            &signature,
            TieBreak::DeclarationOrder,
        )
        .unwrap();
        assert_eq!(resolved.param_types, vec![HiveType::BigInt; 3]);
    }

    #[test]
    fn tie_break_policies() {
        let candidates = vec![
            decl(
                "g",
                vec![exact(HiveType::Int)],
                None,
                exact(HiveType::Int),
                "g_first",
            ),
            decl(
                "g",
                vec![exact(HiveType::Int)],
                None,
                exact(HiveType::Int),
                "g_second",
            ),
        ];
        let signature = BoundSignature::new(vec![DataType::Int32], DataType::Int32);
        let name = FunctionName::hive("g");

        let resolved =
            resolve(&name, &candidates, &signature, TieBreak::DeclarationOrder).unwrap();
        assert_eq!(resolved.decl.entry, "g_first");

        let err = resolve(&name, &candidates, &signature, TieBreak::Reject).unwrap_err();
        assert!(matches!(err, ExprError::AmbiguousFunction { .. }));
    }

    #[test]
    fn no_matching_function_lists_candidates() {
        let candidates = vec![
            decl(
                "substr",
                vec![exact(HiveType::String), exact(HiveType::Int)],
                None,
                exact(HiveType::String),
                "substr",
            ),
            decl(
                "substr",
                vec![
                    exact(HiveType::String),
                    exact(HiveType::Int),
                    exact(HiveType::Int),
                ],
                None,
                exact(HiveType::String),
                "substr",
            ),
        ];
        let signature = BoundSignature::new(vec![DataType::Boolean], DataType::Varchar);
        let err = resolve(
            &FunctionName::hive("substr"),
            &candidates,
            &signature,
            TieBreak::DeclarationOrder,
        )
        .unwrap_err();
        expect![[r#"no matching Hive function for hive.substr(boolean), candidates: [substr(string, int) -> string, substr(string, int, int) -> string]"#]]
            .assert_eq(&err.to_string());
    }
}
