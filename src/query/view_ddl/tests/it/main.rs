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

mod compat;
mod create_view;

use databend_common_view_ddl::Column;
use databend_common_view_ddl::CompileOptions;
use databend_common_view_ddl::DataType;
use databend_common_view_ddl::DdlElement;
use databend_common_view_ddl::Table;

/// Collapse every run of whitespace so layout differences don't matter.
pub fn clean(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Render `stmt` with all bind parameters inlined, as a DBA would read it.
pub fn compile_query(stmt: &impl DdlElement, options: CompileOptions) -> String {
    let compiled = stmt.compile(&options.with_literal_binds(true)).unwrap();
    clean(compiled.sql())
}

pub fn t1(schema: Option<&str>) -> Table {
    let table = Table::new("t1")
        .with_column(Column::new("col1", DataType::Integer).primary_key())
        .with_column(Column::new("col2", DataType::Integer));
    match schema {
        Some(schema) => table.with_schema(schema),
        None => table,
    }
}
