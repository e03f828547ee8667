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

use log::debug;

use crate::ast::write_comma_separated_map;
use crate::ast::DdlElement;
use crate::ast::DdlStatement;
use crate::compat::ConstructorSignature;
use crate::compat::HostCompat;
use crate::compat::HOST_SIGNATURE;
use crate::compat::LegacyArgs;
use crate::config::Dialect;
use crate::error::Result;
use crate::host::Compiled;
use crate::host::CreateColumn;
use crate::host::Select;
use crate::host::Table;

/// The query a view is defined by.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewBody {
    /// Rendered by the compiler of the statement's dialect.
    Query(Select),
    /// Rendered beforehand and emitted verbatim.
    Compiled(Compiled),
}

impl From<Select> for ViewBody {
    fn from(select: Select) -> Self {
        ViewBody::Query(select)
    }
}

impl From<Compiled> for ViewBody {
    fn from(compiled: Compiled) -> Self {
        ViewBody::Compiled(compiled)
    }
}

/// `WITH (...)` options of a view, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    entries: Vec<(String, String)>,
}

impl ViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`. A key that is already present keeps its position.
    pub fn insert(&mut self, key: impl ToString, value: impl ToString) {
        let key = key.to_string();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: ToString, V: ToString> FromIterator<(K, V)> for ViewOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = ViewOptions::new();
        for (k, v) in iter {
            options.insert(k, v);
        }
        options
    }
}

impl Display for ViewOptions {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write_comma_separated_map(f, self.iter())
    }
}

/// `CREATE [OR REPLACE] VIEW`.
///
/// The column list is a snapshot of `target`'s columns taken at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateView<'a> {
    target: &'a Table,
    columns: Vec<CreateColumn>,
    body: ViewBody,
    or_replace: bool,
    options: ViewOptions,
    legacy: LegacyArgs,
    signature: ConstructorSignature,
}

impl<'a> CreateView<'a> {
    /// Default modifiers, built for the host this crate targets. Cannot fail:
    /// default arguments resolve on every host.
    pub fn new(target: &'a Table, body: impl Into<ViewBody>) -> Self {
        Self::create(
            target,
            body.into(),
            false,
            ViewOptions::new(),
            LegacyArgs::default(),
            HOST_SIGNATURE,
        )
    }

    pub fn builder(target: &'a Table, body: impl Into<ViewBody>) -> CreateViewBuilder<'a> {
        CreateViewBuilder {
            target,
            body: body.into(),
            or_replace: false,
            options: ViewOptions::new(),
            legacy: LegacyArgs::default(),
        }
    }

    fn create(
        target: &'a Table,
        body: ViewBody,
        or_replace: bool,
        options: ViewOptions,
        legacy: LegacyArgs,
        signature: ConstructorSignature,
    ) -> Self {
        let columns = target.columns.iter().cloned().map(CreateColumn::new).collect();
        Self {
            target,
            columns,
            body,
            or_replace,
            options,
            legacy,
            signature,
        }
    }

    pub fn target(&self) -> &'a Table {
        self.target
    }

    pub fn columns(&self) -> &[CreateColumn] {
        &self.columns
    }

    pub fn body(&self) -> &ViewBody {
        &self.body
    }

    pub fn or_replace(&self) -> bool {
        self.or_replace
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    pub fn on(&self) -> Option<Dialect> {
        self.legacy.on
    }

    pub fn bind(&self) -> Option<Dialect> {
        self.legacy.bind
    }

    /// Constructor signature the host accepted for this statement.
    pub fn signature(&self) -> ConstructorSignature {
        self.signature
    }
}

impl DdlElement for CreateView<'_> {
    fn statement(&self) -> DdlStatement<'_> {
        DdlStatement::CreateView(self)
    }
}

pub struct CreateViewBuilder<'a> {
    target: &'a Table,
    body: ViewBody,
    or_replace: bool,
    options: ViewOptions,
    legacy: LegacyArgs,
}

impl<'a> CreateViewBuilder<'a> {
    pub fn or_replace(mut self, or_replace: bool) -> Self {
        self.or_replace = or_replace;
        self
    }

    pub fn option(mut self, key: impl ToString, value: impl ToString) -> Self {
        self.options.insert(key, value);
        self
    }

    pub fn options(mut self, options: ViewOptions) -> Self {
        self.options = options;
        self
    }

    pub fn on(mut self, dialect: Dialect) -> Self {
        self.legacy.on = Some(dialect);
        self
    }

    pub fn bind(mut self, dialect: Dialect) -> Self {
        self.legacy.bind = Some(dialect);
        self
    }

    /// Fails if `on` or `bind` was set and `host` no longer accepts it.
    pub fn build(self, host: &HostCompat) -> Result<CreateView<'a>> {
        let signature = host.resolve(&self.legacy)?;
        debug!(
            "create view {} with {} constructor",
            self.target.name, signature
        );
        Ok(CreateView::create(
            self.target,
            self.body,
            self.or_replace,
            self.options,
            self.legacy,
            signature,
        ))
    }
}

/// `DROP VIEW [IF EXISTS] ... [CASCADE]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropView<'a> {
    target: &'a Table,
    cascade: bool,
    if_exists: bool,
    legacy: LegacyArgs,
    signature: ConstructorSignature,
}

impl<'a> DropView<'a> {
    /// Default modifiers, built for the host this crate targets.
    pub fn new(target: &'a Table) -> Self {
        Self {
            target,
            cascade: false,
            if_exists: false,
            legacy: LegacyArgs::default(),
            signature: HOST_SIGNATURE,
        }
    }

    pub fn builder(target: &'a Table) -> DropViewBuilder<'a> {
        DropViewBuilder {
            target,
            cascade: false,
            if_exists: false,
            legacy: LegacyArgs::default(),
        }
    }

    pub fn target(&self) -> &'a Table {
        self.target
    }

    pub fn cascade(&self) -> bool {
        self.cascade
    }

    pub fn if_exists(&self) -> bool {
        self.if_exists
    }

    pub fn on(&self) -> Option<Dialect> {
        self.legacy.on
    }

    pub fn bind(&self) -> Option<Dialect> {
        self.legacy.bind
    }

    pub fn signature(&self) -> ConstructorSignature {
        self.signature
    }
}

impl DdlElement for DropView<'_> {
    fn statement(&self) -> DdlStatement<'_> {
        DdlStatement::DropView(self)
    }
}

pub struct DropViewBuilder<'a> {
    target: &'a Table,
    cascade: bool,
    if_exists: bool,
    legacy: LegacyArgs,
}

impl<'a> DropViewBuilder<'a> {
    pub fn cascade(mut self, cascade: bool) -> Self {
        self.cascade = cascade;
        self
    }

    pub fn if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = if_exists;
        self
    }

    pub fn on(mut self, dialect: Dialect) -> Self {
        self.legacy.on = Some(dialect);
        self
    }

    pub fn bind(mut self, dialect: Dialect) -> Self {
        self.legacy.bind = Some(dialect);
        self
    }

    pub fn build(self, host: &HostCompat) -> Result<DropView<'a>> {
        let signature = host.resolve(&self.legacy)?;
        debug!("drop view {} with {} constructor", self.target.name, signature);
        Ok(DropView {
            target: self.target,
            cascade: self.cascade,
            if_exists: self.if_exists,
            legacy: self.legacy,
            signature,
        })
    }
}
