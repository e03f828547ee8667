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

//! `CREATE VIEW` and `DROP VIEW` statements and their dialect-aware rendering.
//!
//! ```ignore
//! let t1 = Table::new("t1").with_column(Column::new("col1", DataType::Integer));
//! let view = Table::new("myview");
//! let create = CreateView::new(&view, Select::from_table(&t1));
//! let sql = create.compile(&CompileOptions::new(Dialect::PostgreSQL))?;
//! // CREATE VIEW myview AS SELECT t1.col1 FROM t1
//! ```

#![allow(clippy::uninlined_format_args)]

pub mod ast;
pub mod compat;
pub mod config;
mod error;
pub mod host;
pub mod render;

pub use ast::CreateView;
pub use ast::CreateViewBuilder;
pub use ast::DdlElement;
pub use ast::DdlStatement;
pub use ast::DropView;
pub use ast::DropViewBuilder;
pub use ast::StatementKind;
pub use ast::ViewBody;
pub use ast::ViewOptions;
pub use compat::HostCompat;
pub use compat::HostVersion;
pub use compat::LegacyArgs;
pub use compat::LegacyParameter;
pub use config::CompileOptions;
pub use config::Dialect;
pub use config::DialectCapabilities;
pub use config::SchemaTranslateMap;
pub use config::ViewDdlConfig;
pub use error::RenderError;
pub use error::Result;
pub use error::ViewDdlError;
pub use host::Column;
pub use host::Compiled;
pub use host::DataType;
pub use host::Expr;
pub use host::Select;
pub use host::Table;
pub use render::default_registry;
pub use render::Renderer;
pub use render::RendererRegistry;
