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

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::compat::HostCompat;
use crate::compat::HostVersion;
use crate::compat::HOST_VERSION;
use crate::error::Result;

#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Dialect {
    /// Standard SQL.
    #[default]
    Default,
    PostgreSQL,
    Redshift,
    MySQL,
    SQLite,
}

impl Dialect {
    pub fn capabilities(&self) -> DialectCapabilities {
        match self {
            Dialect::Default => DialectCapabilities {
                param_style: ParamStyle::Named,
                ..Default::default()
            },
            Dialect::PostgreSQL => DialectCapabilities::default(),
            Dialect::Redshift => DialectCapabilities {
                supports_view_options: false,
                ..Default::default()
            },
            Dialect::MySQL => DialectCapabilities {
                quote_char: '`',
                supports_view_options: false,
                param_style: ParamStyle::Qmark,
                ..Default::default()
            },
            Dialect::SQLite => DialectCapabilities {
                supports_or_replace: false,
                supports_view_options: false,
                param_style: ParamStyle::Qmark,
                ..Default::default()
            },
        }
    }
}

/// How bind parameters left in rendered SQL are spelled.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamStyle {
    /// `:name`
    Named,
    /// `$1`, `$2`, ...
    Numeric,
    /// `?`
    Qmark,
}

/// What a dialect can express in view DDL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectCapabilities {
    /// Character used to delimit identifiers.
    pub quote_char: char,
    /// `CREATE OR REPLACE VIEW`.
    pub supports_or_replace: bool,
    /// `WITH (key=value, ...)` view options.
    pub supports_view_options: bool,
    /// Render bind parameters in a raw view body as literals. When off, the
    /// placeholders stay and the values travel with the compiled statement.
    pub inline_body_literals: bool,
    pub param_style: ParamStyle,
}

impl Default for DialectCapabilities {
    fn default() -> Self {
        Self {
            quote_char: '"',
            supports_or_replace: true,
            supports_view_options: true,
            inline_body_literals: true,
            param_style: ParamStyle::Numeric,
        }
    }
}

/// Schema renames applied at render time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaTranslateMap {
    /// Schema given to tables that have none.
    pub default_schema: Option<String>,
    /// `from -> to` renames for qualified tables.
    pub map: BTreeMap<String, String>,
}

impl SchemaTranslateMap {
    pub fn is_empty(&self) -> bool {
        self.default_schema.is_none() && self.map.is_empty()
    }

    pub fn translate<'a>(&'a self, schema: Option<&'a str>) -> Option<&'a str> {
        match schema {
            None => self.default_schema.as_deref(),
            Some(s) => Some(self.map.get(s).map(String::as_str).unwrap_or(s)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    pub dialect: Dialect,
    /// Inline every bind parameter of the compiled statement as a literal.
    pub literal_binds: bool,
    pub schema_translate_map: SchemaTranslateMap,
    /// Replaces the built-in capability row of `dialect`.
    pub capabilities: Option<DialectCapabilities>,
}

impl CompileOptions {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Default::default()
        }
    }

    pub fn with_literal_binds(mut self, literal_binds: bool) -> Self {
        self.literal_binds = literal_binds;
        self
    }

    pub fn with_schema_translate_map(mut self, map: SchemaTranslateMap) -> Self {
        self.schema_translate_map = map;
        self
    }

    pub fn with_capabilities(mut self, capabilities: DialectCapabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    pub fn effective_capabilities(&self) -> DialectCapabilities {
        self.capabilities
            .clone()
            .unwrap_or_else(|| self.dialect.capabilities())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewDdlConfig {
    /// Host version statement constructors check legacy parameters against.
    pub host_version: HostVersion,
    pub compile: CompileOptions,
}

impl Default for ViewDdlConfig {
    fn default() -> Self {
        Self {
            host_version: HOST_VERSION,
            compile: CompileOptions::default(),
        }
    }
}

impl ViewDdlConfig {
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn host_compat(&self) -> HostCompat {
        HostCompat::detect(self.host_version)
    }
}
