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

use itertools::process_results;
use itertools::Itertools;
use log::warn;

use super::Renderer;
use crate::ast::CreateView;
use crate::ast::DdlStatement;
use crate::ast::DropView;
use crate::ast::StatementKind;
use crate::ast::ViewBody;
use crate::error::Result;
use crate::error::ViewDdlError;
use crate::host::DdlCompiler;
use crate::host::ProcessedSql;

fn mismatch(expected: StatementKind, stmt: DdlStatement<'_>) -> ViewDdlError {
    ViewDdlError::RendererMismatch {
        expected,
        actual: stmt.kind(),
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub struct CreateViewRenderer;

impl CreateViewRenderer {
    fn render_create(&self, create: &CreateView<'_>, compiler: &DdlCompiler) -> Result<ProcessedSql> {
        let preparer = compiler.preparer();
        let capabilities = compiler.capabilities();

        let mut sql = String::from("CREATE ");
        if create.or_replace() {
            if capabilities.supports_or_replace {
                sql.push_str("OR REPLACE ");
            } else {
                warn!(
                    "{} does not support CREATE OR REPLACE VIEW, omitting OR REPLACE for {}",
                    compiler.dialect(),
                    create.target().name
                );
            }
        }

        sql.push_str("VIEW ");
        sql.push_str(&preparer.format_table(create.target())?);
        sql.push(' ');

        if !create.columns().is_empty() {
            let names = process_results(
                create
                    .columns()
                    .iter()
                    .map(|column| preparer.format_column(column.element())),
                |mut names| names.join(", "),
            )?;
            sql.push('(');
            sql.push_str(&names);
            sql.push_str(") ");
        }

        if !create.options().is_empty() {
            if capabilities.supports_view_options {
                sql.push_str(&format!("WITH ({}) ", create.options()));
            } else {
                warn!(
                    "{} does not support view options, omitting WITH ({}) for {}",
                    compiler.dialect(),
                    create.options(),
                    create.target().name
                );
            }
        }

        sql.push_str("AS ");
        let params = match create.body() {
            ViewBody::Compiled(compiled) => {
                if compiled.dialect() != compiler.dialect() {
                    warn!(
                        "view body of {} was compiled for {}, emitting it into {} DDL as is",
                        create.target().name,
                        compiled.dialect(),
                        compiler.dialect()
                    );
                }
                sql.push_str(compiled.sql());
                compiled.params().to_vec()
            }
            ViewBody::Query(select) => {
                let literal_binds = capabilities.inline_body_literals || compiler.literal_binds();
                let body = compiler.sql_compiler().process(select, literal_binds)?;
                sql.push_str(&body.sql);
                body.params
            }
        };
        sql.push_str("\n\n");

        Ok(ProcessedSql { sql, params })
    }
}

impl Renderer for CreateViewRenderer {
    fn render(&self, stmt: DdlStatement<'_>, compiler: &DdlCompiler) -> Result<ProcessedSql> {
        match stmt {
            DdlStatement::CreateView(create) => self.render_create(create, compiler),
            _ => Err(mismatch(StatementKind::CreateView, stmt)),
        }
    }
}

#[derive(Debug, Copy, Clone, Default)]
pub struct DropViewRenderer;

impl DropViewRenderer {
    fn render_drop(&self, drop: &DropView<'_>, compiler: &DdlCompiler) -> Result<ProcessedSql> {
        let mut sql = String::from("DROP VIEW ");
        if drop.if_exists() {
            sql.push_str("IF EXISTS ");
        }
        sql.push_str(&compiler.preparer().format_table(drop.target())?);
        if drop.cascade() {
            sql.push_str(" CASCADE");
        }

        Ok(ProcessedSql {
            sql,
            params: vec![],
        })
    }
}

impl Renderer for DropViewRenderer {
    fn render(&self, stmt: DdlStatement<'_>, compiler: &DdlCompiler) -> Result<ProcessedSql> {
        match stmt {
            DdlStatement::DropView(drop) => self.render_drop(drop, compiler),
            _ => Err(mismatch(StatementKind::DropView, stmt)),
        }
    }
}
