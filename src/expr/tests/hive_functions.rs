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

//! End-to-end resolution and invocation against the builtin catalog.

use expect_test::expect;
use hive_bridge_common::types::{DataType, Datum, Decimal, ScalarImpl};
use hive_bridge_expr::adapter::InvocationConvention;
use hive_bridge_expr::provider::HiveFunctionProvider;
use hive_bridge_expr::sig::{BoundSignature, FunctionName};
use hive_bridge_expr::ExprError;

/// Resolve, generate, and invoke in one go, the way the host does for a
/// single-row probe.
fn call(
    name: &str,
    args: Vec<(DataType, Datum)>,
    return_type: DataType,
) -> hive_bridge_expr::Result<Datum> {
    let provider = HiveFunctionProvider::builtin();
    let (arg_types, values): (Vec<_>, Vec<_>) = args.into_iter().unzip();
    let signature = BoundSignature::new(arg_types, return_type);
    let convention = InvocationConvention::boxed(signature.arg_types.len());
    let handle =
        provider.get_scalar_function_implementation(&FunctionName::hive(name), &signature, &convention)?;
    handle.invoke(&values)
}

fn varchar(s: &str) -> (DataType, Datum) {
    (DataType::Varchar, Some(ScalarImpl::Utf8(s.to_owned())))
}

#[test]
fn abs_keeps_the_argument_width() {
    let out = call(
        "abs",
        vec![(DataType::Int16, Some(ScalarImpl::Int16(-1)))],
        DataType::Int16,
    )
    .unwrap();
    assert_eq!(out, Some(ScalarImpl::Int16(1)));

    let out = call(
        "abs",
        vec![(DataType::Int64, Some(ScalarImpl::Int64(-42)))],
        DataType::Int64,
    )
    .unwrap();
    assert_eq!(out, Some(ScalarImpl::Int64(42)));

    let ty = DataType::Decimal {
        precision: 5,
        scale: 2,
    };
    let d: Decimal = "-1.25".parse().unwrap();
    let out = call("abs", vec![(ty.clone(), Some(ScalarImpl::Decimal(d)))], ty).unwrap();
    assert_eq!(out, Some(ScalarImpl::Decimal("1.25".parse().unwrap())));
}

#[test]
fn upper_strips_char_padding() {
    let out = call(
        "upper",
        vec![(
            DataType::Char { len: 10 },
            Some(ScalarImpl::Utf8("char10    ".to_owned())),
        )],
        DataType::Varchar,
    )
    .unwrap();
    assert_eq!(out, Some(ScalarImpl::Utf8("CHAR10".to_owned())));
}

#[test]
fn nvl_evaluates_nulls_itself() {
    let out = call(
        "nvl",
        vec![(DataType::Varchar, None), varchar("2")],
        DataType::Varchar,
    )
    .unwrap();
    assert_eq!(out, Some(ScalarImpl::Utf8("2".to_owned())));

    let out = call(
        "nvl",
        vec![varchar("1"), varchar("2")],
        DataType::Varchar,
    )
    .unwrap();
    assert_eq!(out, Some(ScalarImpl::Utf8("1".to_owned())));
}

#[test]
fn undeclared_function_is_no_matching_function() {
    let err = call("frobnicate", vec![varchar("x")], DataType::Varchar).unwrap_err();
    assert!(matches!(err, ExprError::NoMatchingFunction { .. }), "{err}");
}

#[test]
fn wrong_namespace_is_no_matching_function() {
    let provider = HiveFunctionProvider::builtin();
    let signature = BoundSignature::new(vec![DataType::Varchar], DataType::Varchar);
    let err = provider
        .get_scalar_function_implementation(
            &FunctionName::new("spark", "upper"),
            &signature,
            &InvocationConvention::boxed(1),
        )
        .unwrap_err();
    assert!(matches!(err, ExprError::NoMatchingFunction { .. }), "{err}");
}

#[test]
fn concat_is_variadic() {
    let out = call(
        "concat",
        vec![varchar("a"), varchar("b"), varchar("c")],
        DataType::Varchar,
    )
    .unwrap();
    assert_eq!(out, Some(ScalarImpl::Utf8("abc".to_owned())));

    // below the declared minimum arity
    let err = call("concat", vec![], DataType::Varchar).unwrap_err();
    assert!(matches!(err, ExprError::NoMatchingFunction { .. }), "{err}");
}

#[test]
fn coalesce_shares_its_variable_across_the_tail() {
    let out = call(
        "coalesce",
        vec![
            (DataType::Int32, None),
            (DataType::Int32, None),
            (DataType::Int32, Some(ScalarImpl::Int32(3))),
        ],
        DataType::Int32,
    )
    .unwrap();
    assert_eq!(out, Some(ScalarImpl::Int32(3)));

    // all-null input yields the foreign null wrapper, read back as NULL
    let out = call(
        "coalesce",
        vec![(DataType::Int32, None)],
        DataType::Int32,
    )
    .unwrap();
    assert_eq!(out, None);

    // mixed widths widen the binding
    let out = call(
        "coalesce",
        vec![
            (DataType::Int32, None),
            (DataType::Int64, Some(ScalarImpl::Int64(7))),
        ],
        DataType::Int64,
    )
    .unwrap();
    assert_eq!(out, Some(ScalarImpl::Int64(7)));
}

#[test]
fn substr_picks_the_right_overload() {
    let out = call(
        "substr",
        vec![varchar("facebook"), (DataType::Int32, Some(ScalarImpl::Int32(5)))],
        DataType::Varchar,
    )
    .unwrap();
    assert_eq!(out, Some(ScalarImpl::Utf8("book".to_owned())));

    let out = call(
        "substr",
        vec![
            varchar("facebook"),
            (DataType::Int32, Some(ScalarImpl::Int32(5))),
            (DataType::Int32, Some(ScalarImpl::Int32(2))),
        ],
        DataType::Varchar,
    )
    .unwrap();
    assert_eq!(out, Some(ScalarImpl::Utf8("bo".to_owned())));
}

#[test]
fn pow_and_length() {
    let out = call(
        "pow",
        vec![
            (DataType::Float64, Some(ScalarImpl::Float64(2.0))),
            (DataType::Float64, Some(ScalarImpl::Float64(3.0))),
        ],
        DataType::Float64,
    )
    .unwrap();
    assert_eq!(out, Some(ScalarImpl::Float64(8.0)));

    let out = call("length", vec![varchar("héllo")], DataType::Int32).unwrap();
    assert_eq!(out, Some(ScalarImpl::Int32(5)));
}

#[test]
fn provider_recomputes_deterministically() {
    let provider = HiveFunctionProvider::builtin();
    let name = FunctionName::hive("abs");
    let signature = BoundSignature::new(vec![DataType::Int16], DataType::Int16);
    let convention = InvocationConvention::boxed(1);

    for _ in 0..3 {
        let handle = provider
            .get_scalar_function_implementation(&name, &signature, &convention)
            .unwrap();
        assert_eq!(handle.return_type(), &DataType::Int16);
        assert_eq!(
            handle.invoke(&[Some(ScalarImpl::Int16(-5))]).unwrap(),
            Some(ScalarImpl::Int16(5))
        );
    }
}

#[test]
fn mismatched_call_reports_the_candidate_list() {
    let err = call(
        "substr",
        vec![(DataType::Boolean, Some(ScalarImpl::Bool(true)))],
        DataType::Varchar,
    )
    .unwrap_err();
    expect![[r#"no matching Hive function for hive.substr(boolean), candidates: [substr(string, int) -> string, substr(string, int, int) -> string]"#]]
        .assert_eq(&err.to_string());
}
