// Copyright 2021 Datafuse Labs
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

use crate::ast::StatementKind;
use crate::compat::HostVersion;
use crate::compat::LegacyParameter;

pub type Result<T, E = ViewDdlError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ViewDdlError {
    /// The caller passed a non-default value for a constructor parameter that
    /// the detected host version no longer accepts.
    #[error(
        "parameter `{parameter}` is not supported by host version {version}: it was removed in {removed_in}"
    )]
    UnsupportedParameter {
        parameter: LegacyParameter,
        version: HostVersion,
        removed_in: HostVersion,
    },

    #[error("host version {version} accepts none of the known statement constructor signatures")]
    HostIncompatible { version: HostVersion },

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("no renderer registered for {kind} statements")]
    MissingRenderer { kind: StatementKind },

    #[error("renderer for {expected} statements was handed a {actual} statement")]
    RendererMismatch {
        expected: StatementKind,
        actual: StatementKind,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ViewDdlError {
    fn from(e: serde_json::Error) -> Self {
        ViewDdlError::Config(e.to_string())
    }
}

/// Failures raised by the identifier preparer or the SQL compiler while
/// producing text. Passed through to the caller untranslated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RenderError {
    #[error("identifier must not be empty")]
    EmptyIdentifier,

    #[error("cannot render non-finite float `{0}` as a SQL literal")]
    NonFiniteLiteral(f64),

    #[error("SELECT must have at least one result column")]
    EmptySelect,
}
