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

use super::view::CreateView;
use super::view::DropView;
use crate::config::CompileOptions;
use crate::error::Result;
use crate::host::Compiled;
use crate::render::default_registry;
use crate::render::RendererRegistry;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum StatementKind {
    #[strum(serialize = "CREATE VIEW")]
    CreateView,
    #[strum(serialize = "DROP VIEW")]
    DropView,
}

// DDL statement
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DdlStatement<'a> {
    CreateView(&'a CreateView<'a>),
    DropView(&'a DropView<'a>),
}

impl DdlStatement<'_> {
    pub fn kind(&self) -> StatementKind {
        match self {
            DdlStatement::CreateView(_) => StatementKind::CreateView,
            DdlStatement::DropView(_) => StatementKind::DropView,
        }
    }
}

/// An executable DDL construct.
pub trait DdlElement {
    fn statement(&self) -> DdlStatement<'_>;

    /// Render with the renderers of the default registry.
    fn compile(&self, options: &CompileOptions) -> Result<Compiled> {
        self.compile_with(default_registry(), options)
    }

    fn compile_with(&self, registry: &RendererRegistry, options: &CompileOptions) -> Result<Compiled> {
        registry.compile(self.statement(), options)
    }
}
