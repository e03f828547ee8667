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

use std::fmt::Display;
use std::fmt::Formatter;

use crate::host::expr::ColumnRef;
use crate::host::expr::Expr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    Integer,
    BigInt,
    Text,
    Varchar(u32),
    Boolean,
    Float,
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            DataType::Integer => write!(f, "INTEGER"),
            DataType::BigInt => write!(f, "BIGINT"),
            DataType::Text => write!(f, "TEXT"),
            DataType::Varchar(len) => write!(f, "VARCHAR({len})"),
            DataType::Boolean => write!(f, "BOOLEAN"),
            DataType::Float => write!(f, "FLOAT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
    pub primary_key: bool,
    pub nullable: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            primary_key: false,
            nullable: true,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// A named, optionally schema-qualified relation with ordered columns.
///
/// Views have no construct of their own: a view is described by the table it
/// would look like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub schema: Option<String>,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            columns: vec![],
        }
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Reference to a column of this table, usable in a select.
    ///
    /// The column is not required to exist.
    pub fn col(&self, name: &str) -> Expr {
        Expr::Column(ColumnRef {
            table: Some(TableRef::from(self)),
            column: name.to_string(),
        })
    }
}

/// The identity of a table, as referenced from a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub name: String,
    pub schema: Option<String>,
}

impl From<&Table> for TableRef {
    fn from(table: &Table) -> Self {
        Self {
            name: table.name.clone(),
            schema: table.schema.clone(),
        }
    }
}

/// A column as it appears in a CREATE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateColumn {
    element: Column,
}

impl CreateColumn {
    pub fn new(element: Column) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &Column {
        &self.element
    }
}
