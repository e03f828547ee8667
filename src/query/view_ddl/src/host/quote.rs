// Copyright 2022 Datafuse Labs.
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

// Lower-cased, sorted for binary search.
const RESERVED_WORDS: &[&str] = &[
    "all",
    "analyse",
    "analyze",
    "and",
    "any",
    "array",
    "as",
    "asc",
    "asymmetric",
    "authorization",
    "between",
    "binary",
    "both",
    "case",
    "cast",
    "check",
    "collate",
    "column",
    "constraint",
    "create",
    "cross",
    "current_date",
    "current_role",
    "current_time",
    "current_timestamp",
    "current_user",
    "default",
    "deferrable",
    "desc",
    "distinct",
    "do",
    "else",
    "end",
    "except",
    "false",
    "for",
    "foreign",
    "freeze",
    "from",
    "full",
    "grant",
    "group",
    "having",
    "ilike",
    "in",
    "initially",
    "inner",
    "intersect",
    "into",
    "is",
    "isnull",
    "join",
    "leading",
    "left",
    "like",
    "limit",
    "localtime",
    "localtimestamp",
    "natural",
    "new",
    "not",
    "notnull",
    "null",
    "off",
    "offset",
    "old",
    "on",
    "only",
    "or",
    "order",
    "outer",
    "overlaps",
    "placing",
    "primary",
    "references",
    "right",
    "select",
    "session_user",
    "similar",
    "some",
    "symmetric",
    "table",
    "then",
    "to",
    "trailing",
    "true",
    "union",
    "unique",
    "user",
    "using",
    "verbose",
    "when",
    "where",
];

pub fn is_reserved_word(ident: &str) -> bool {
    RESERVED_WORDS
        .binary_search(&ident.to_ascii_lowercase().as_str())
        .is_ok()
}

/// Whether `ident` must be delimited to survive the round trip through the
/// database unchanged. Unquoted names are case-folded to lower case, so any
/// upper-case letter forces quoting.
pub fn need_quote_ident(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        None => return true,
        Some(c) if c.is_ascii_digit() || c == '$' => return true,
        Some(_) => {}
    }

    for c in ident.chars() {
        if !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '$') {
            return true;
        }
    }

    is_reserved_word(ident)
}

/// Display `ident` delimited by `quote`, doubling embedded quotes.
pub struct QuotedIdent<T: AsRef<str>>(pub T, pub char);

impl<T: AsRef<str>> Display for QuotedIdent<T> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let QuotedIdent(ident, quote) = self;
        write!(f, "{quote}")?;
        for c in ident.as_ref().chars() {
            if c == *quote {
                write!(f, "{quote}")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, "{quote}")
    }
}

/// Display a string literal delimited by `quote`, doubling embedded quotes.
pub struct QuotedString<T: AsRef<str>>(pub T, pub char);

impl<T: AsRef<str>> Display for QuotedString<T> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let QuotedString(s, quote) = self;
        write!(f, "{}", QuotedIdent(s.as_ref(), *quote))
    }
}
