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

use crate::error::RenderError;
use crate::host::metadata::TableRef;
use crate::host::quote::QuotedString;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Boolean(bool),
    Int(i64),
    Float(f64),
    // Unquoted string value
    String(String),
}

impl Literal {
    /// Render as inline SQL.
    pub fn to_sql(&self) -> Result<String, RenderError> {
        match self {
            Literal::Float(val) if !val.is_finite() => Err(RenderError::NonFiniteLiteral(*val)),
            _ => Ok(self.to_string()),
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Literal::Null => write!(f, "NULL"),
            Literal::Boolean(val) => {
                if *val {
                    write!(f, "TRUE")
                } else {
                    write!(f, "FALSE")
                }
            }
            Literal::Int(val) => write!(f, "{val}"),
            Literal::Float(val) => write!(f, "{val:?}"),
            Literal::String(val) => write!(f, "{}", QuotedString(val, '\'')),
        }
    }
}

impl From<i64> for Literal {
    fn from(v: i64) -> Self {
        Literal::Int(v)
    }
}

impl From<i32> for Literal {
    fn from(v: i32) -> Self {
        Literal::Int(v as i64)
    }
}

impl From<f64> for Literal {
    fn from(v: f64) -> Self {
        Literal::Float(v)
    }
}

impl From<bool> for Literal {
    fn from(v: bool) -> Self {
        Literal::Boolean(v)
    }
}

impl From<&str> for Literal {
    fn from(v: &str) -> Self {
        Literal::String(v.to_string())
    }
}

impl From<String> for Literal {
    fn from(v: String) -> Self {
        Literal::String(v)
    }
}

/// A value supplied at execution time rather than written into the SQL.
#[derive(Debug, Clone, PartialEq)]
pub struct BindParam {
    /// `None` for anonymous parameters, which are named `param_N` when
    /// compiled.
    pub key: Option<String>,
    pub value: Literal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub table: Option<TableRef>,
    pub column: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    Eq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,
    And,
    Or,
    Plus,
    Minus,
}

impl BinaryOperator {
    /// Higher binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Or => 1,
            BinaryOperator::And => 2,
            BinaryOperator::Eq
            | BinaryOperator::NotEq
            | BinaryOperator::Lt
            | BinaryOperator::Lte
            | BinaryOperator::Gt
            | BinaryOperator::Gte => 3,
            BinaryOperator::Plus | BinaryOperator::Minus => 4,
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            BinaryOperator::Eq => write!(f, "="),
            BinaryOperator::NotEq => write!(f, "!="),
            BinaryOperator::Lt => write!(f, "<"),
            BinaryOperator::Lte => write!(f, "<="),
            BinaryOperator::Gt => write!(f, ">"),
            BinaryOperator::Gte => write!(f, ">="),
            BinaryOperator::And => write!(f, "AND"),
            BinaryOperator::Or => write!(f, "OR"),
            BinaryOperator::Plus => write!(f, "+"),
            BinaryOperator::Minus => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Column(ColumnRef),
    Literal(Literal),
    Bind(BindParam),
    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    Label {
        expr: Box<Expr>,
        name: String,
    },
}

impl Expr {
    /// Unqualified column reference.
    pub fn col(name: impl Into<String>) -> Self {
        Expr::Column(ColumnRef {
            table: None,
            column: name.into(),
        })
    }

    /// Anonymous bind parameter, like the host's `literal()`.
    pub fn literal(value: impl Into<Literal>) -> Self {
        Expr::Bind(BindParam {
            key: None,
            value: value.into(),
        })
    }

    pub fn bind(key: impl Into<String>, value: impl Into<Literal>) -> Self {
        Expr::Bind(BindParam {
            key: Some(key.into()),
            value: value.into(),
        })
    }

    /// A value written into the SQL as-is, never as a parameter.
    pub fn value(value: impl Into<Literal>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn label(self, name: impl Into<String>) -> Self {
        Expr::Label {
            expr: Box::new(self),
            name: name.into(),
        }
    }

    fn binary(self, op: BinaryOperator, right: Expr) -> Self {
        Expr::BinaryOp {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn eq(self, right: Expr) -> Self {
        self.binary(BinaryOperator::Eq, right)
    }

    pub fn not_eq(self, right: Expr) -> Self {
        self.binary(BinaryOperator::NotEq, right)
    }

    pub fn lt(self, right: Expr) -> Self {
        self.binary(BinaryOperator::Lt, right)
    }

    pub fn gt(self, right: Expr) -> Self {
        self.binary(BinaryOperator::Gt, right)
    }

    pub fn and(self, right: Expr) -> Self {
        self.binary(BinaryOperator::And, right)
    }

    pub fn or(self, right: Expr) -> Self {
        self.binary(BinaryOperator::Or, right)
    }

    pub fn plus(self, right: Expr) -> Self {
        self.binary(BinaryOperator::Plus, right)
    }

    pub fn minus(self, right: Expr) -> Self {
        self.binary(BinaryOperator::Minus, right)
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Expr::Column(_))
    }
}
