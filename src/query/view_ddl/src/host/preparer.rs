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

use crate::config::SchemaTranslateMap;
use crate::error::RenderError;
use crate::host::metadata::Column;
use crate::host::metadata::Table;
use crate::host::metadata::TableRef;
use crate::host::quote::need_quote_ident;
use crate::host::quote::QuotedIdent;

/// Dialect-aware identifier formatting: quoting, escaping and schema
/// qualification.
#[derive(Debug, Clone)]
pub struct IdentifierPreparer {
    quote_char: char,
    schema_translate_map: SchemaTranslateMap,
}

impl IdentifierPreparer {
    pub fn new(quote_char: char, schema_translate_map: SchemaTranslateMap) -> Self {
        Self {
            quote_char,
            schema_translate_map,
        }
    }

    pub fn quote_char(&self) -> char {
        self.quote_char
    }

    pub fn requires_quotes(&self, ident: &str) -> bool {
        need_quote_ident(ident) || ident.contains(self.quote_char)
    }

    /// Unconditionally delimit `ident`.
    pub fn quote_identifier(&self, ident: &str) -> String {
        QuotedIdent(ident, self.quote_char).to_string()
    }

    /// Delimit `ident` only where needed.
    pub fn quote(&self, ident: &str) -> Result<String, RenderError> {
        if ident.is_empty() {
            return Err(RenderError::EmptyIdentifier);
        }
        if self.requires_quotes(ident) {
            Ok(self.quote_identifier(ident))
        } else {
            Ok(ident.to_string())
        }
    }

    pub fn format_schema(&self, schema: &str) -> Result<String, RenderError> {
        self.quote(schema)
    }

    pub fn format_table(&self, table: &Table) -> Result<String, RenderError> {
        self.format_table_ref(&TableRef::from(table))
    }

    /// `schema.name`, with the schema passed through the translate map.
    pub fn format_table_ref(&self, table: &TableRef) -> Result<String, RenderError> {
        let name = self.quote(&table.name)?;
        match self.schema_translate_map.translate(table.schema.as_deref()) {
            Some(schema) => Ok(format!("{}.{}", self.format_schema(schema)?, name)),
            None => Ok(name),
        }
    }

    pub fn format_column(&self, column: &Column) -> Result<String, RenderError> {
        self.quote(&column.name)
    }
}
