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

//! The type bridge: bidirectional mapping between the engine's logical types
//! and Hive type descriptors, plus value conversion in both directions.
//!
//! Everything here is pure and stateless. Coercions are priced for overload
//! ranking: identity costs 0, every widening costs a small positive amount,
//! and anything that could lose information is incompatible (`None`).
//! Integer-to-floating coercions cost more than any integer widening, so an
//! integer overload always outranks a floating one when both match.

use hive_bridge_common::types::{
    DataType, Datum, ListValue, MapValue, ScalarImpl, StructValue,
};
use hive_bridge_udf::{HiveType, HiveValue};
use itertools::Itertools;

use crate::{bail, ExprError, Result};

/// The default foreign image of a logical type.
pub fn to_hive(ty: &DataType) -> Result<HiveType> {
    Ok(match ty {
        DataType::Boolean => HiveType::Boolean,
        DataType::Int16 => HiveType::SmallInt,
        DataType::Int32 => HiveType::Int,
        DataType::Int64 => HiveType::BigInt,
        DataType::Float32 => HiveType::Float,
        DataType::Float64 => HiveType::Double,
        DataType::Decimal { precision, scale } => HiveType::Decimal {
            precision: *precision,
            scale: *scale,
        },
        // Both text types collapse into Hive's variable-length string.
        DataType::Char { .. } | DataType::Varchar => HiveType::String,
        DataType::List(elem) => HiveType::List(Box::new(to_hive(elem)?)),
        DataType::Map { key, value } => {
            HiveType::Map(Box::new(to_hive(key)?), Box::new(to_hive(value)?))
        }
        DataType::Struct(st) => HiveType::Struct(
            st.field_names
                .iter()
                .zip_eq(st.fields.iter())
                .map(|(name, ty)| Ok::<_, ExprError>((name.clone(), to_hive(ty)?)))
                .try_collect()?,
        ),
    })
}

/// The logical type a foreign type reads back as.
pub fn to_data_type(ty: &HiveType) -> Result<DataType> {
    Ok(match ty {
        HiveType::Boolean => DataType::Boolean,
        HiveType::SmallInt => DataType::Int16,
        HiveType::Int => DataType::Int32,
        HiveType::BigInt => DataType::Int64,
        HiveType::Float => DataType::Float32,
        HiveType::Double => DataType::Float64,
        HiveType::Decimal { precision, scale } => DataType::Decimal {
            precision: *precision,
            scale: *scale,
        },
        HiveType::String => DataType::Varchar,
        HiveType::List(elem) => DataType::List(Box::new(to_data_type(elem)?)),
        HiveType::Map(key, value) => DataType::Map {
            key: Box::new(to_data_type(key)?),
            value: Box::new(to_data_type(value)?),
        },
        HiveType::Struct(fields) => DataType::new_struct(
            fields
                .iter()
                .map(|(_, ty)| to_data_type(ty))
                .try_collect()?,
            fields.iter().map(|(name, _)| name.clone()).collect(),
        ),
    })
}

/// Price of converting an argument into its foreign representation.
/// `None` means the coercion is incompatible.
pub fn coercion_cost(from: &DataType, to: &HiveType) -> Option<u32> {
    use DataType as D;
    use HiveType as H;
    match (from, to) {
        (D::Boolean, H::Boolean) => Some(0),

        (D::Int16, H::SmallInt) | (D::Int32, H::Int) | (D::Int64, H::BigInt) => Some(0),
        (D::Int16, H::Int) => Some(1),
        (D::Int16, H::BigInt) => Some(2),
        (D::Int32, H::BigInt) => Some(1),
        (D::Int16 | D::Int32 | D::Int64, H::Float) => Some(3),
        (D::Int16 | D::Int32 | D::Int64, H::Double) => Some(4),

        (D::Float32, H::Float) | (D::Float64, H::Double) => Some(0),
        (D::Float32, H::Double) => Some(1),

        (
            D::Decimal { precision, scale },
            H::Decimal {
                precision: to_precision,
                scale: to_scale,
            },
        ) => decimal_widening_cost(*precision, *scale, *to_precision, *to_scale),

        (D::Varchar, H::String) => Some(0),
        // Fixed-length text widens into the variable-length representation,
        // stripping its blank padding on the way.
        (D::Char { .. }, H::String) => Some(1),

        (D::List(a), H::List(b)) => coercion_cost(a, b),
        (D::Map { key, value }, H::Map(k, v)) => {
            Some(coercion_cost(key, k)? + coercion_cost(value, v)?)
        }
        (D::Struct(st), H::Struct(fields)) => {
            if st.fields.len() != fields.len() {
                return None;
            }
            st.fields
                .iter()
                .zip(fields.iter())
                .map(|(a, (_, b))| coercion_cost(a, b))
                .sum()
        }

        _ => None,
    }
}

/// Price of converting a foreign result back into a logical type.
///
/// `String` never converts into `Char`: the write-back could truncate, so
/// fixed-length text is not a valid result destination.
pub fn result_cost(from: &HiveType, to: &DataType) -> Option<u32> {
    use DataType as D;
    use HiveType as H;
    match (from, to) {
        (H::Boolean, D::Boolean) => Some(0),

        (H::SmallInt, D::Int16) | (H::Int, D::Int32) | (H::BigInt, D::Int64) => Some(0),
        (H::SmallInt, D::Int32) => Some(1),
        (H::SmallInt, D::Int64) => Some(2),
        (H::Int, D::Int64) => Some(1),
        (H::SmallInt | H::Int | H::BigInt, D::Float32) => Some(3),
        (H::SmallInt | H::Int | H::BigInt, D::Float64) => Some(4),

        (H::Float, D::Float32) | (H::Double, D::Float64) => Some(0),
        (H::Float, D::Float64) => Some(1),

        (
            H::Decimal { precision, scale },
            D::Decimal {
                precision: to_precision,
                scale: to_scale,
            },
        ) => decimal_widening_cost(*precision, *scale, *to_precision, *to_scale),

        (H::String, D::Varchar) => Some(0),

        (H::List(a), D::List(b)) => result_cost(a, b),
        (H::Map(k, v), D::Map { key, value }) => {
            Some(result_cost(k, key)? + result_cost(v, value)?)
        }
        (H::Struct(fields), D::Struct(st)) => {
            if st.fields.len() != fields.len() {
                return None;
            }
            fields
                .iter()
                .zip(st.fields.iter())
                .map(|((_, a), b)| result_cost(a, b))
                .sum()
        }

        _ => None,
    }
}

/// Decimal coercion is lossless only if neither the scale nor the integral
/// digit count shrinks.
fn decimal_widening_cost(p: u8, s: u8, to_p: u8, to_s: u8) -> Option<u32> {
    let integral = p as i16 - s as i16;
    let to_integral = to_p as i16 - to_s as i16;
    if to_s >= s && to_integral >= integral {
        Some((to_p != p || to_s != s) as u32)
    } else {
        None
    }
}

/// Whether `from` widens losslessly (or by the permitted integer-to-floating
/// step) into `to`, entirely within the foreign type system.
fn hive_widens_to(from: &HiveType, to: &HiveType) -> bool {
    use HiveType as H;
    match (from, to) {
        (H::SmallInt, H::Int | H::BigInt) | (H::Int, H::BigInt) => true,
        (H::SmallInt | H::Int | H::BigInt, H::Float | H::Double) => true,
        (H::Float, H::Double) => true,
        (
            H::Decimal { precision, scale },
            H::Decimal {
                precision: to_precision,
                scale: to_scale,
            },
        ) => decimal_widening_cost(*precision, *scale, *to_precision, *to_scale).is_some(),
        (H::List(a), H::List(b)) => hive_widens_to(a, b),
        (H::Map(ak, av), H::Map(bk, bv)) => hive_widens_to(ak, bk) && hive_widens_to(av, bv),
        (H::Struct(a), H::Struct(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b.iter())
                    .all(|((_, a), (_, b))| hive_widens_to(a, b))
        }
        _ => from == to,
    }
}

/// The least common foreign type two occurrences of one type variable can
/// unify to, or `None` if they are mutually incompatible.
pub fn common_hive_type(a: &HiveType, b: &HiveType) -> Option<HiveType> {
    if hive_widens_to(a, b) {
        Some(b.clone())
    } else if hive_widens_to(b, a) {
        Some(a.clone())
    } else {
        None
    }
}

/// Convert one non-null scalar into its foreign representation, following a
/// fixed `(from, to)` coercion established at generation time.
///
/// Floating conversions are raw numeric casts: NaN stays NaN and zero keeps
/// its sign.
pub fn to_hive_value(scalar: &ScalarImpl, from: &DataType, to: &HiveType) -> Result<HiveValue> {
    use HiveType as H;
    use ScalarImpl as S;
    Ok(match (scalar, to) {
        (S::Bool(v), H::Boolean) => HiveValue::Boolean(*v),

        (S::Int16(v), H::SmallInt) => HiveValue::SmallInt(*v),
        (S::Int16(v), H::Int) => HiveValue::Int(*v as i32),
        (S::Int16(v), H::BigInt) => HiveValue::BigInt(*v as i64),
        (S::Int16(v), H::Float) => HiveValue::Float(*v as f32),
        (S::Int16(v), H::Double) => HiveValue::Double(*v as f64),

        (S::Int32(v), H::Int) => HiveValue::Int(*v),
        (S::Int32(v), H::BigInt) => HiveValue::BigInt(*v as i64),
        (S::Int32(v), H::Float) => HiveValue::Float(*v as f32),
        (S::Int32(v), H::Double) => HiveValue::Double(*v as f64),

        (S::Int64(v), H::BigInt) => HiveValue::BigInt(*v),
        (S::Int64(v), H::Float) => HiveValue::Float(*v as f32),
        (S::Int64(v), H::Double) => HiveValue::Double(*v as f64),

        (S::Float32(v), H::Float) => HiveValue::Float(*v),
        (S::Float32(v), H::Double) => HiveValue::Double(*v as f64),
        (S::Float64(v), H::Double) => HiveValue::Double(*v),

        (S::Decimal(d), H::Decimal { scale, .. }) => {
            let mut d = *d;
            if d.scale() < *scale as u32 {
                d.rescale(*scale as u32);
            }
            HiveValue::Decimal(d)
        }

        (S::Utf8(s), H::String) => match from {
            DataType::Char { .. } => HiveValue::Text(s.trim_end_matches(' ').to_owned()),
            _ => HiveValue::Text(s.clone()),
        },

        (S::List(list), H::List(to_elem)) => {
            let DataType::List(from_elem) = from else {
                return Err(type_mismatch(from, to));
            };
            HiveValue::List(
                list.values
                    .iter()
                    .map(|datum| match datum {
                        None => Ok(HiveValue::Null),
                        Some(s) => to_hive_value(s, from_elem, to_elem),
                    })
                    .try_collect()?,
            )
        }
        (S::Map(map), H::Map(to_key, to_value)) => {
            let DataType::Map { key, value } = from else {
                return Err(type_mismatch(from, to));
            };
            HiveValue::Map(
                map.entries
                    .iter()
                    .map(|(k, v)| {
                        let k = to_hive_value(k, key, to_key)?;
                        let v = match v {
                            None => HiveValue::Null,
                            Some(s) => to_hive_value(s, value, to_value)?,
                        };
                        Ok::<_, ExprError>((k, v))
                    })
                    .try_collect()?,
            )
        }
        (S::Struct(sv), H::Struct(to_fields)) => {
            let DataType::Struct(st) = from else {
                return Err(type_mismatch(from, to));
            };
            if sv.fields.len() != to_fields.len() {
                return Err(type_mismatch(from, to));
            }
            HiveValue::Struct(
                sv.fields
                    .iter()
                    .zip(st.fields.iter().zip(to_fields.iter()))
                    .map(|(datum, (from_ty, (_, to_ty)))| match datum {
                        None => Ok(HiveValue::Null),
                        Some(s) => to_hive_value(s, from_ty, to_ty),
                    })
                    .try_collect()?,
            )
        }

        _ => return Err(type_mismatch(from, to)),
    })
}

/// Convert a foreign result back into a datum. The foreign null wrapper maps
/// to `NULL`.
pub fn from_hive_value(value: HiveValue, to: &DataType) -> Result<Datum> {
    use DataType as D;
    use HiveValue as V;
    Ok(Some(match (value, to) {
        (V::Null, _) => return Ok(None),

        (V::Boolean(v), D::Boolean) => ScalarImpl::Bool(v),

        (V::SmallInt(v), D::Int16) => ScalarImpl::Int16(v),
        (V::SmallInt(v), D::Int32) => ScalarImpl::Int32(v as i32),
        (V::SmallInt(v), D::Int64) => ScalarImpl::Int64(v as i64),
        (V::Int(v), D::Int32) => ScalarImpl::Int32(v),
        (V::Int(v), D::Int64) => ScalarImpl::Int64(v as i64),
        (V::BigInt(v), D::Int64) => ScalarImpl::Int64(v),

        (V::SmallInt(v), D::Float32) => ScalarImpl::Float32(v as f32),
        (V::Int(v), D::Float32) => ScalarImpl::Float32(v as f32),
        (V::BigInt(v), D::Float32) => ScalarImpl::Float32(v as f32),
        (V::SmallInt(v), D::Float64) => ScalarImpl::Float64(v as f64),
        (V::Int(v), D::Float64) => ScalarImpl::Float64(v as f64),
        (V::BigInt(v), D::Float64) => ScalarImpl::Float64(v as f64),

        (V::Float(v), D::Float32) => ScalarImpl::Float32(v),
        (V::Float(v), D::Float64) => ScalarImpl::Float64(v as f64),
        (V::Double(v), D::Float64) => ScalarImpl::Float64(v),

        (V::Decimal(d), D::Decimal { scale, .. }) => {
            let mut d = d;
            if d.scale() < *scale as u32 {
                d.rescale(*scale as u32);
            }
            ScalarImpl::Decimal(d)
        }

        (V::Text(s), D::Varchar) => ScalarImpl::Utf8(s),

        (V::List(values), D::List(elem)) => ScalarImpl::List(ListValue {
            values: values
                .into_iter()
                .map(|v| from_hive_value(v, elem))
                .try_collect()?,
        }),
        (V::Map(entries), D::Map { key, value }) => ScalarImpl::Map(MapValue {
            entries: entries
                .into_iter()
                .map(|(k, v)| {
                    let Some(k) = from_hive_value(k, key)? else {
                        bail!("Hive function returned a null map key");
                    };
                    Ok::<_, ExprError>((k, from_hive_value(v, value)?))
                })
                .try_collect()?,
        }),
        (V::Struct(values), D::Struct(st)) => {
            if values.len() != st.fields.len() {
                bail!(
                    "Hive function returned a struct of {} fields, expected {}",
                    values.len(),
                    st.fields.len()
                );
            }
            ScalarImpl::Struct(StructValue {
                fields: values
                    .into_iter()
                    .zip(st.fields.iter())
                    .map(|(v, ty)| from_hive_value(v, ty))
                    .try_collect()?,
            })
        }

        (other, _) => {
            return Err(ExprError::TypeMismatch {
                from: other.kind().to_owned(),
                to: to.to_string(),
            })
        }
    }))
}

fn type_mismatch(from: &DataType, to: &HiveType) -> ExprError {
    ExprError::TypeMismatch {
        from: from.to_string(),
        to: to.to_string(),
    }
}
