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

mod view;

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use log::info;
use once_cell::sync::OnceCell;
pub use view::CreateViewRenderer;
pub use view::DropViewRenderer;

use crate::ast::DdlStatement;
use crate::ast::StatementKind;
use crate::config::CompileOptions;
use crate::error::Result;
use crate::error::ViewDdlError;
use crate::host::Compiled;
use crate::host::DdlCompiler;
use crate::host::ProcessedSql;

static DEFAULT_REGISTRY: OnceCell<RendererRegistry> = OnceCell::new();

/// Turns one kind of DDL statement into SQL.
///
/// Implementations must not keep state between calls: the output is a function
/// of the statement and the compiler context only.
pub trait Renderer: Send + Sync {
    fn render(&self, stmt: DdlStatement<'_>, compiler: &DdlCompiler) -> Result<ProcessedSql>;
}

/// Maps each statement kind to the renderer that compiles it.
#[derive(Clone, Default)]
pub struct RendererRegistry {
    renderers: HashMap<StatementKind, Arc<dyn Renderer>>,
}

impl RendererRegistry {
    /// A registry without any renderer.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_renderers() -> Self {
        let mut registry = Self::new();
        registry.register(StatementKind::CreateView, CreateViewRenderer);
        registry.register(StatementKind::DropView, DropViewRenderer);
        registry
    }

    /// Register `renderer` for `kind`, replacing any previous one.
    pub fn register(&mut self, kind: StatementKind, renderer: impl Renderer + 'static) {
        self.renderers.insert(kind, Arc::new(renderer));
    }

    pub fn get(&self, kind: StatementKind) -> Option<&Arc<dyn Renderer>> {
        self.renderers.get(&kind)
    }

    pub fn compile(&self, stmt: DdlStatement<'_>, options: &CompileOptions) -> Result<Compiled> {
        let kind = stmt.kind();
        let renderer = self
            .get(kind)
            .ok_or(ViewDdlError::MissingRenderer { kind })?;

        let compiler = DdlCompiler::new(options);
        let ProcessedSql { sql, params } = renderer.render(stmt, &compiler)?;
        debug!("compiled {} for {}: {}", kind, options.dialect, sql.trim());

        Ok(Compiled::new(sql, params, options.dialect))
    }
}

/// The process-wide registry used by [`crate::ast::DdlElement::compile`].
/// Built on first use and never modified afterwards.
pub fn default_registry() -> &'static RendererRegistry {
    DEFAULT_REGISTRY.get_or_init(|| {
        let registry = RendererRegistry::with_default_renderers();
        info!(
            "view ddl renderer registry initialized with {} renderers",
            registry.renderers.len()
        );
        registry
    })
}
