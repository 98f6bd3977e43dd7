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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HiveUdfError>;

/// Runtime failures raised by Hive function entry points.
///
/// These are data-dependent evaluation errors. Anything about declarations,
/// signatures, or linkage is the caller's problem and never surfaces here.
#[derive(Error, Debug)]
pub enum HiveUdfError {
    #[error("argument mismatch: function {function:?} does not accept {actual}")]
    ArgumentMismatch {
        function: &'static str,
        actual: String,
    },

    #[error("out of range in {0}")]
    NumericOutOfRange(&'static str),

    #[error("invalid argument for {function}: {reason}")]
    InvalidArgument {
        function: &'static str,
        reason: String,
    },
}
