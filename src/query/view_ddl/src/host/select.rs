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

use crate::config::CompileOptions;
use crate::error::Result;
use crate::host::compiler::Compiled;
use crate::host::compiler::SqlCompiler;
use crate::host::expr::Expr;
use crate::host::metadata::Table;
use crate::host::metadata::TableRef;

/// A SELECT statement: result columns, source tables and an optional filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Select {
    pub items: Vec<Expr>,
    pub from: Vec<TableRef>,
    pub filter: Option<Expr>,
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every column of `table`, in declaration order.
    pub fn from_table(table: &Table) -> Self {
        let items = table.columns.iter().map(|c| table.col(&c.name)).collect();
        Self {
            items,
            from: vec![TableRef::from(table)],
            filter: None,
        }
    }

    pub fn column(mut self, expr: Expr) -> Self {
        self.items.push(expr);
        self
    }

    pub fn from(mut self, table: &Table) -> Self {
        let table = TableRef::from(table);
        if !self.from.contains(&table) {
            self.from.push(table);
        }
        self
    }

    /// Add a WHERE condition, AND-ed with any existing one.
    pub fn filter(mut self, expr: Expr) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(expr),
            None => expr,
        });
        self
    }

    /// Tables to render in FROM: the explicit ones, then any table referenced
    /// by a result column that is not listed yet.
    pub fn froms(&self) -> Vec<&TableRef> {
        let mut froms: Vec<&TableRef> = self.from.iter().collect();
        for item in &self.items {
            collect_tables(item, &mut froms);
        }
        froms
    }

    pub fn compile(&self, options: &CompileOptions) -> Result<Compiled> {
        let compiler = SqlCompiler::new(options);
        let processed = compiler.process(self, options.literal_binds)?;
        Ok(Compiled::new(processed.sql, processed.params, options.dialect))
    }
}

fn collect_tables<'a>(expr: &'a Expr, froms: &mut Vec<&'a TableRef>) {
    match expr {
        Expr::Column(column) => {
            if let Some(table) = &column.table {
                if !froms.contains(&table) {
                    froms.push(table);
                }
            }
        }
        Expr::BinaryOp { left, right, .. } => {
            collect_tables(left, froms);
            collect_tables(right, froms);
        }
        Expr::Label { expr, .. } => collect_tables(expr, froms),
        Expr::Literal(_) | Expr::Bind(_) => {}
    }
}
