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

//! The builtin function catalog: a small cut of Hive's own scalar functions,
//! declared and linked the way any loaded library would be.

use itertools::Itertools;

use crate::function::{FunctionDecl, SigType};
use crate::library::{HiveFunctionLibrary, LibraryBuilder};
use crate::types::HiveType;
use crate::value::HiveValue;
use crate::{HiveUdfError, Result};

use crate::function::NullPolicy::{CalledOnNull, Propagate};
use crate::types::HiveType::{Double, Int, String as HString};

fn exact(ty: HiveType) -> SigType {
    SigType::Exact(ty)
}

pub(crate) fn library() -> HiveFunctionLibrary {
    let decl = |name, params: Vec<SigType>, variadic, ret, null_policy, entry| FunctionDecl {
        name,
        params,
        variadic,
        ret,
        null_policy,
        entry,
    };

    declare_entry_points(HiveFunctionLibrary::builder("hive"))
        .declare(decl(
            "abs",
            vec![SigType::Var("T")],
            None,
            SigType::Var("T"),
            Propagate,
            "abs",
        ))
        .declare(decl(
            "upper",
            vec![exact(HString)],
            None,
            exact(HString),
            Propagate,
            "upper",
        ))
        .declare(decl(
            "lower",
            vec![exact(HString)],
            None,
            exact(HString),
            Propagate,
            "lower",
        ))
        .declare(decl(
            "length",
            vec![exact(HString)],
            None,
            exact(Int),
            Propagate,
            "length",
        ))
        .declare(decl(
            "reverse",
            vec![exact(HString)],
            None,
            exact(HString),
            Propagate,
            "reverse",
        ))
        .declare(decl(
            "trim",
            vec![exact(HString)],
            None,
            exact(HString),
            Propagate,
            "trim",
        ))
        .declare(decl(
            "concat",
            vec![exact(HString)],
            Some(exact(HString)),
            exact(HString),
            Propagate,
            "concat",
        ))
        .declare(decl(
            "nvl",
            vec![SigType::Var("T"), SigType::Var("T")],
            None,
            SigType::Var("T"),
            CalledOnNull,
            "nvl",
        ))
        .declare(decl(
            "coalesce",
            vec![SigType::Var("T")],
            Some(SigType::Var("T")),
            SigType::Var("T"),
            CalledOnNull,
            "coalesce",
        ))
        .declare(decl(
            "pow",
            vec![exact(Double), exact(Double)],
            None,
            exact(Double),
            Propagate,
            "pow",
        ))
        .declare(decl(
            "substr",
            vec![exact(HString), exact(Int)],
            None,
            exact(HString),
            Propagate,
            "substr",
        ))
        .declare(decl(
            "substr",
            vec![exact(HString), exact(Int), exact(Int)],
            None,
            exact(HString),
            Propagate,
            "substr",
        ))
        .build()
}

fn declare_entry_points(builder: LibraryBuilder) -> LibraryBuilder {
    builder
        .link("abs", abs)
        .link("upper", |args| {
            Ok(HiveValue::Text(args[0].as_text("upper")?.to_uppercase()))
        })
        .link("lower", |args| {
            Ok(HiveValue::Text(args[0].as_text("lower")?.to_lowercase()))
        })
        .link("length", |args| {
            Ok(HiveValue::Int(
                args[0].as_text("length")?.chars().count() as i32
            ))
        })
        .link("reverse", |args| {
            Ok(HiveValue::Text(
                args[0].as_text("reverse")?.chars().rev().collect(),
            ))
        })
        .link("trim", |args| {
            Ok(HiveValue::Text(
                args[0].as_text("trim")?.trim_matches(' ').to_owned(),
            ))
        })
        .link("concat", |args| {
            let parts: Vec<&str> = args.iter().map(|v| v.as_text("concat")).try_collect()?;
            Ok(HiveValue::Text(parts.concat()))
        })
        .link("nvl", |args| {
            Ok(if args[0].is_null() {
                args[1].clone()
            } else {
                args[0].clone()
            })
        })
        .link("coalesce", |args| {
            Ok(args
                .iter()
                .find(|v| !v.is_null())
                .cloned()
                .unwrap_or(HiveValue::Null))
        })
        .link("pow", |args| {
            Ok(HiveValue::Double(
                args[0].as_double("pow")?.powf(args[1].as_double("pow")?),
            ))
        })
        .link("substr", substr)
}

fn abs(args: &[HiveValue]) -> Result<HiveValue> {
    Ok(match &args[0] {
        HiveValue::SmallInt(v) => {
            HiveValue::SmallInt(v.checked_abs().ok_or(HiveUdfError::NumericOutOfRange("abs"))?)
        }
        HiveValue::Int(v) => {
            HiveValue::Int(v.checked_abs().ok_or(HiveUdfError::NumericOutOfRange("abs"))?)
        }
        HiveValue::BigInt(v) => {
            HiveValue::BigInt(v.checked_abs().ok_or(HiveUdfError::NumericOutOfRange("abs"))?)
        }
        HiveValue::Float(v) => HiveValue::Float(v.abs()),
        HiveValue::Double(v) => HiveValue::Double(v.abs()),
        HiveValue::Decimal(v) => HiveValue::Decimal(v.abs()),
        other => {
            return Err(HiveUdfError::ArgumentMismatch {
                function: "abs",
                actual: other.kind().to_owned(),
            })
        }
    })
}

/// Hive `substr`: 1-based start, `0` treated as `1`, negative start counts
/// from the end, negative length yields the empty string. Offsets are in
/// characters, matching Hive's string (not binary) variant.
fn substr(args: &[HiveValue]) -> Result<HiveValue> {
    let s = args[0].as_text("substr")?;
    let start = args[1].as_int("substr")? as i64;
    let len = match args.get(2) {
        Some(v) => Some(v.as_int("substr")? as i64),
        None => None,
    };

    let chars: Vec<char> = s.chars().collect();
    let n = chars.len() as i64;
    let begin = if start > 0 {
        start - 1
    } else if start < 0 {
        (n + start).max(0)
    } else {
        0
    };
    if begin >= n {
        return Ok(HiveValue::Text(String::new()));
    }
    let len = match len {
        Some(l) if l >= 0 => l,
        Some(_) => 0,
        None => n - begin,
    };
    let end = (begin + len).min(n);
    Ok(HiveValue::Text(
        chars[begin as usize..end as usize].iter().collect(),
    ))
}
