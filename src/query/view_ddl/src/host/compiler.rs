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

use crate::config::CompileOptions;
use crate::config::Dialect;
use crate::config::DialectCapabilities;
use crate::config::ParamStyle;
use crate::error::RenderError;
use crate::host::expr::BindParam;
use crate::host::expr::Expr;
use crate::host::expr::Literal;
use crate::host::preparer::IdentifierPreparer;
use crate::host::select::Select;

/// A bind parameter left as a placeholder in rendered SQL.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledParam {
    pub name: String,
    pub value: Literal,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedSql {
    pub sql: String,
    pub params: Vec<CompiledParam>,
}

/// SQL already rendered for one dialect, with the values of any placeholders
/// it still contains.
#[derive(Debug, Clone, PartialEq)]
pub struct Compiled {
    sql: String,
    params: Vec<CompiledParam>,
    dialect: Dialect,
}

impl Compiled {
    pub fn new(sql: String, params: Vec<CompiledParam>, dialect: Dialect) -> Self {
        Self {
            sql,
            params,
            dialect,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[CompiledParam] {
        &self.params
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }
}

impl Display for Compiled {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.sql)
    }
}

/// Renders selectables to SQL text.
#[derive(Debug, Clone)]
pub struct SqlCompiler {
    preparer: IdentifierPreparer,
    param_style: ParamStyle,
}

impl SqlCompiler {
    pub fn new(options: &CompileOptions) -> Self {
        let capabilities = options.effective_capabilities();
        Self {
            preparer: IdentifierPreparer::new(
                capabilities.quote_char,
                options.schema_translate_map.clone(),
            ),
            param_style: capabilities.param_style,
        }
    }

    pub fn preparer(&self) -> &IdentifierPreparer {
        &self.preparer
    }

    /// Render `select`. With `literal_binds` every bind parameter is written as
    /// its literal value and no params are returned.
    pub fn process(&self, select: &Select, literal_binds: bool) -> Result<ProcessedSql, RenderError> {
        let mut writer = SelectWriter {
            compiler: self,
            literal_binds,
            sql: String::new(),
            params: vec![],
            anon_labels: 0,
            anon_params: 0,
        };
        writer.write_select(select)?;
        Ok(ProcessedSql {
            sql: writer.sql,
            params: writer.params,
        })
    }
}

/// Per-call rendering state, so the compiler itself stays shareable.
struct SelectWriter<'a> {
    compiler: &'a SqlCompiler,
    literal_binds: bool,
    sql: String,
    params: Vec<CompiledParam>,
    anon_labels: usize,
    anon_params: usize,
}

impl<'a> SelectWriter<'a> {
    fn write_select(&mut self, select: &Select) -> Result<(), RenderError> {
        if select.items.is_empty() {
            return Err(RenderError::EmptySelect);
        }

        self.sql.push_str("SELECT ");
        for (i, item) in select.items.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            self.write_expr(item)?;
            if !matches!(item, Expr::Column(_) | Expr::Label { .. }) {
                self.anon_labels += 1;
                self.sql.push_str(&format!(" AS anon_{}", self.anon_labels));
            }
        }

        let froms = select.froms();
        if !froms.is_empty() {
            self.sql.push_str(" FROM ");
            for (i, table) in froms.into_iter().enumerate() {
                if i > 0 {
                    self.sql.push_str(", ");
                }
                let table = self.compiler.preparer.format_table_ref(table)?;
                self.sql.push_str(&table);
            }
        }

        if let Some(filter) = &select.filter {
            self.sql.push_str(" WHERE ");
            self.write_expr(filter)?;
        }
        Ok(())
    }

    fn write_expr(&mut self, expr: &Expr) -> Result<(), RenderError> {
        let compiler: &'a SqlCompiler = self.compiler;
        let preparer = &compiler.preparer;
        match expr {
            Expr::Column(column) => {
                if let Some(table) = &column.table {
                    let table = preparer.format_table_ref(table)?;
                    self.sql.push_str(&table);
                    self.sql.push('.');
                }
                let name = preparer.quote(&column.column)?;
                self.sql.push_str(&name);
            }
            Expr::Literal(literal) => {
                let literal = literal.to_sql()?;
                self.sql.push_str(&literal);
            }
            Expr::Bind(param) => self.write_bind(param)?,
            Expr::BinaryOp { left, op, right } => {
                // Left-associative: an equal-precedence operand on the right keeps its parens.
                self.write_operand(left, op.precedence() > operand_precedence(left))?;
                self.sql.push_str(&format!(" {op} "));
                self.write_operand(right, op.precedence() >= operand_precedence(right))?;
            }
            Expr::Label { expr, name } => {
                self.write_expr(expr)?;
                let name = preparer.quote(name)?;
                self.sql.push_str(&format!(" AS {name}"));
            }
        }
        Ok(())
    }

    fn write_operand(&mut self, operand: &Expr, parenthesize: bool) -> Result<(), RenderError> {
        if parenthesize {
            self.sql.push('(');
            self.write_expr(operand)?;
            self.sql.push(')');
            Ok(())
        } else {
            self.write_expr(operand)
        }
    }

    fn write_bind(&mut self, param: &BindParam) -> Result<(), RenderError> {
        if self.literal_binds {
            let literal = param.value.to_sql()?;
            self.sql.push_str(&literal);
            return Ok(());
        }

        let name = match &param.key {
            Some(key) => key.clone(),
            None => {
                self.anon_params += 1;
                format!("param_{}", self.anon_params)
            }
        };
        let placeholder = match self.compiler.param_style {
            ParamStyle::Named => format!(":{name}"),
            ParamStyle::Numeric => format!("${}", self.params.len() + 1),
            ParamStyle::Qmark => "?".to_string(),
        };
        self.sql.push_str(&placeholder);
        self.params.push(CompiledParam {
            name,
            value: param.value.clone(),
        });
        Ok(())
    }
}

/// Binding strength of `expr` as an operand. Anything that is not a binary
/// operation never needs parentheses.
fn operand_precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::BinaryOp { op, .. } => op.precedence(),
        _ => u8::MAX,
    }
}

/// The compiler context handed to DDL renderers.
#[derive(Debug, Clone)]
pub struct DdlCompiler {
    dialect: Dialect,
    capabilities: DialectCapabilities,
    literal_binds: bool,
    sql_compiler: SqlCompiler,
}

impl DdlCompiler {
    pub fn new(options: &CompileOptions) -> Self {
        Self {
            dialect: options.dialect,
            capabilities: options.effective_capabilities(),
            literal_binds: options.literal_binds,
            sql_compiler: SqlCompiler::new(options),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn capabilities(&self) -> &DialectCapabilities {
        &self.capabilities
    }

    /// Whether the caller asked for every bind to be inlined.
    pub fn literal_binds(&self) -> bool {
        self.literal_binds
    }

    pub fn preparer(&self) -> &IdentifierPreparer {
        self.sql_compiler.preparer()
    }

    pub fn sql_compiler(&self) -> &SqlCompiler {
        &self.sql_compiler
    }
}
