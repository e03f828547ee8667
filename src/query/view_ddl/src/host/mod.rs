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

//! The query-building layer view DDL sits on: table metadata, selectables,
//! the identifier preparer and the SQL compiler.

mod compiler;
mod expr;
mod metadata;
mod preparer;
pub mod quote;
mod select;

pub use compiler::Compiled;
pub use compiler::CompiledParam;
pub use compiler::DdlCompiler;
pub use compiler::ProcessedSql;
pub use compiler::SqlCompiler;
pub use expr::BinaryOperator;
pub use expr::BindParam;
pub use expr::ColumnRef;
pub use expr::Expr;
pub use expr::Literal;
pub use metadata::Column;
pub use metadata::CreateColumn;
pub use metadata::DataType;
pub use metadata::Table;
pub use metadata::TableRef;
pub use preparer::IdentifierPreparer;
pub use select::Select;
