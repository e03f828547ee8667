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

use std::collections::BTreeMap;

use databend_common_view_ddl::host::CompiledParam;
use databend_common_view_ddl::host::Literal;
use databend_common_view_ddl::Column;
use databend_common_view_ddl::CompileOptions;
use databend_common_view_ddl::CreateView;
use databend_common_view_ddl::DataType;
use databend_common_view_ddl::DdlElement;
use databend_common_view_ddl::Dialect;
use databend_common_view_ddl::DialectCapabilities;
use databend_common_view_ddl::Expr;
use databend_common_view_ddl::HostCompat;
use databend_common_view_ddl::RenderError;
use databend_common_view_ddl::SchemaTranslateMap;
use databend_common_view_ddl::Select;
use databend_common_view_ddl::Table;
use databend_common_view_ddl::ViewDdlError;
use pretty_assertions::assert_eq;

use crate::clean;
use crate::compile_query;
use crate::t1;

fn pg() -> CompileOptions {
    CompileOptions::new(Dialect::PostgreSQL)
}

#[test]
fn test_basic_view() {
    for (schema, expected) in [
        (None, "CREATE VIEW myview AS SELECT t1.col1, t1.col2 FROM t1"),
        (
            Some("myschema"),
            "CREATE VIEW myschema.myview AS SELECT myschema.t1.col1, myschema.t1.col2 FROM myschema.t1",
        ),
    ] {
        let t1 = t1(schema);
        let mut view = Table::new("myview");
        if let Some(schema) = schema {
            view = view.with_schema(schema);
        }
        let create = CreateView::new(&view, Select::from_table(&t1));
        assert_eq!(compile_query(&create, pg()), expected);
    }
}

#[test]
fn test_view_replace() {
    let t1 = t1(None);
    let view = Table::new("myview");
    let create = CreateView::builder(&view, Select::from_table(&t1))
        .or_replace(true)
        .build(&HostCompat::current())
        .unwrap();

    assert_eq!(
        compile_query(&create, pg()),
        "CREATE OR REPLACE VIEW myview AS SELECT t1.col1, t1.col2 FROM t1"
    );
}

#[test]
fn test_view_with_column_names() {
    let t1 = t1(None);
    let view = Table::new("myview")
        .with_column(Column::new("col3", DataType::Integer))
        .with_column(Column::new("col4", DataType::Integer));
    let create = CreateView::new(&view, Select::from_table(&t1));

    assert_eq!(
        compile_query(&create, pg()),
        "CREATE VIEW myview (col3, col4) AS SELECT t1.col1, t1.col2 FROM t1"
    );
}

#[test]
fn test_view_with_literals() {
    let view = Table::new("myview").with_column(Column::new("col3", DataType::Integer));
    let create = CreateView::new(&view, Select::new().column(Expr::literal(0)));

    assert_eq!(
        compile_query(&create, pg()),
        "CREATE VIEW myview (col3) AS SELECT 0 AS anon_1"
    );
}

#[test]
fn test_view_with_delimited_identifiers() {
    let t1 = t1(None);
    let view = Table::new("my nice view!")
        .with_column(Column::new("col#1", DataType::Integer))
        .with_column(Column::new("select", DataType::Integer))
        .with_schema("Reporting");
    let create = CreateView::new(&view, Select::from_table(&t1));

    assert_eq!(
        compile_query(&create, pg()),
        r#"CREATE VIEW "Reporting"."my nice view!" ("col#1", "select") AS SELECT t1.col1, t1.col2 FROM t1"#
    );
    assert_eq!(
        compile_query(&create, CompileOptions::new(Dialect::MySQL)),
        "CREATE VIEW `Reporting`.`my nice view!` (`col#1`, `select`) AS SELECT t1.col1, t1.col2 FROM t1"
    );
}

#[test]
fn test_embedded_quote_chars_are_doubled() {
    let t1 = t1(None);
    let view = Table::new(r#"say "hi""#);
    let create = CreateView::new(&view, Select::from_table(&t1));

    assert_eq!(
        compile_query(&create, pg()),
        r#"CREATE VIEW "say ""hi""" AS SELECT t1.col1, t1.col2 FROM t1"#
    );
}

#[test]
fn test_view_with_options() {
    let t1 = t1(None);
    let view = Table::new("myview");
    let create = CreateView::builder(&view, Select::from_table(&t1))
        .option("check_option", "local")
        .build(&HostCompat::current())
        .unwrap();

    assert_eq!(
        compile_query(&create, pg()),
        "CREATE VIEW myview WITH (check_option=local) AS SELECT t1.col1, t1.col2 FROM t1"
    );
}

#[test]
fn test_all_clauses_in_order() {
    let t1 = t1(None);
    let view = Table::new("myview")
        .with_column(Column::new("col3", DataType::Integer))
        .with_column(Column::new("col4", DataType::Integer));
    let create = CreateView::builder(&view, Select::from_table(&t1))
        .or_replace(true)
        .option("check_option", "local")
        .option("security_barrier", true)
        .build(&HostCompat::current())
        .unwrap();

    assert_eq!(
        compile_query(&create, pg()),
        "CREATE OR REPLACE VIEW myview (col3, col4) WITH (check_option=local, security_barrier=true) AS SELECT t1.col1, t1.col2 FROM t1"
    );
}

#[test]
fn test_unsupported_clauses_are_omitted() {
    let t1 = t1(None);
    let view = Table::new("myview");
    let create = CreateView::builder(&view, Select::from_table(&t1))
        .or_replace(true)
        .option("check_option", "local")
        .build(&HostCompat::current())
        .unwrap();

    assert_eq!(
        compile_query(&create, CompileOptions::new(Dialect::Redshift)),
        "CREATE OR REPLACE VIEW myview AS SELECT t1.col1, t1.col2 FROM t1"
    );
    assert_eq!(
        compile_query(&create, CompileOptions::new(Dialect::SQLite)),
        "CREATE VIEW myview AS SELECT t1.col1, t1.col2 FROM t1"
    );

    // A capability override turns the clause back on.
    let options = CompileOptions::new(Dialect::Redshift).with_capabilities(DialectCapabilities {
        supports_view_options: true,
        ..Dialect::Redshift.capabilities()
    });
    assert_eq!(
        compile_query(&create, options),
        "CREATE OR REPLACE VIEW myview WITH (check_option=local) AS SELECT t1.col1, t1.col2 FROM t1"
    );
}

#[test]
fn test_body_binds_are_inlined() {
    let t1 = t1(None);
    let view = Table::new("myview");
    let select = Select::from_table(&t1)
        .filter(t1.col("col1").gt(Expr::bind("lo", 10)))
        .filter(t1.col("col2").not_eq(Expr::literal("it's")));
    let create = CreateView::new(&view, select);

    // Inlined by the dialect even though the caller did not ask for literal binds.
    let compiled = create.compile(&pg()).unwrap();
    assert_eq!(
        clean(compiled.sql()),
        "CREATE VIEW myview AS SELECT t1.col1, t1.col2 FROM t1 WHERE t1.col1 > 10 AND t1.col2 != 'it''s'"
    );
    assert!(compiled.params().is_empty());
    assert_eq!(compiled.dialect(), Dialect::PostgreSQL);
}

#[test]
fn test_body_binds_kept_without_inlining() {
    let t1 = t1(None);
    let view = Table::new("myview");
    let select = Select::from_table(&t1).filter(t1.col("col1").gt(Expr::bind("lo", 10)));
    let create = CreateView::new(&view, select);

    let options = pg().with_capabilities(DialectCapabilities {
        inline_body_literals: false,
        ..Dialect::PostgreSQL.capabilities()
    });
    let compiled = create.compile(&options).unwrap();
    assert_eq!(
        clean(compiled.sql()),
        "CREATE VIEW myview AS SELECT t1.col1, t1.col2 FROM t1 WHERE t1.col1 > $1"
    );
    assert_eq!(compiled.params(), &[CompiledParam {
        name: "lo".to_string(),
        value: Literal::Int(10),
    }]);

    // literal_binds still wins.
    assert_eq!(
        compile_query(&create, options),
        "CREATE VIEW myview AS SELECT t1.col1, t1.col2 FROM t1 WHERE t1.col1 > 10"
    );
}

#[test]
fn test_precompiled_body_is_verbatim() {
    let t1 = t1(None);
    let view = Table::new("myview");
    let body = Select::from_table(&t1)
        .filter(t1.col("col1").gt(Expr::literal(10)))
        .compile(&CompileOptions::default())
        .unwrap();
    assert_eq!(
        body.sql(),
        "SELECT t1.col1, t1.col2 FROM t1 WHERE t1.col1 > :param_1"
    );

    let create = CreateView::new(&view, body);
    let compiled = create.compile(&pg().with_literal_binds(true)).unwrap();
    assert_eq!(
        clean(compiled.sql()),
        "CREATE VIEW myview AS SELECT t1.col1, t1.col2 FROM t1 WHERE t1.col1 > :param_1"
    );
    assert_eq!(compiled.params(), &[CompiledParam {
        name: "param_1".to_string(),
        value: Literal::Int(10),
    }]);
}

#[test]
fn test_schema_translate_map() {
    let t1 = t1(Some("staging"));
    let view = Table::new("myview");
    let create = CreateView::new(&view, Select::from_table(&t1));

    let options = pg().with_schema_translate_map(SchemaTranslateMap {
        default_schema: Some("public".to_string()),
        map: BTreeMap::from([("staging".to_string(), "prod".to_string())]),
    });
    assert_eq!(
        compile_query(&create, options),
        "CREATE VIEW public.myview AS SELECT prod.t1.col1, prod.t1.col2 FROM prod.t1"
    );
}

#[test]
fn test_compile_is_repeatable() {
    let t1 = t1(None);
    let view = Table::new("myview").with_column(Column::new("col3", DataType::Integer));
    let select = Select::new()
        .column(Expr::literal(0))
        .from(&t1)
        .filter(t1.col("col1").gt(Expr::literal(5)));
    let create = CreateView::builder(&view, select)
        .or_replace(true)
        .build(&HostCompat::current())
        .unwrap();

    let first = create.compile(&pg()).unwrap();
    let second = create.compile(&pg()).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.sql(),
        "CREATE OR REPLACE VIEW myview (col3) AS SELECT 0 AS anon_1 FROM t1 WHERE t1.col1 > 5\n\n"
    );
}

#[test]
fn test_body_keeps_operator_grouping() {
    let t1 = t1(None);
    let view = Table::new("v");
    let select = Select::from_table(&t1)
        .filter(
            t1.col("col1")
                .eq(Expr::literal(1))
                .or(t1.col("col1").eq(Expr::literal(2))),
        )
        .filter(t1.col("col2").eq(Expr::literal(3)));
    let create = CreateView::new(&view, select);

    assert_eq!(
        compile_query(&create, pg()),
        "CREATE VIEW v AS SELECT t1.col1, t1.col2 FROM t1 WHERE (t1.col1 = 1 OR t1.col1 = 2) AND t1.col2 = 3"
    );

    let select = Select::new().column(
        Expr::literal(10)
            .minus(Expr::literal(3).minus(Expr::literal(2)))
            .label("x"),
    );
    let create = CreateView::new(&view, select);
    assert_eq!(
        compile_query(&create, pg()),
        "CREATE VIEW v AS SELECT 10 - (3 - 2) AS x"
    );
}

#[test]
fn test_render_errors_pass_through() {
    let t1 = t1(None);
    let unnamed = Table::new("");
    let err = CreateView::new(&unnamed, Select::from_table(&t1))
        .compile(&pg())
        .unwrap_err();
    assert_eq!(err, ViewDdlError::Render(RenderError::EmptyIdentifier));

    let view = Table::new("myview");
    let err = CreateView::new(&view, Select::new().column(Expr::literal(f64::NAN)))
        .compile(&pg())
        .unwrap_err();
    assert!(matches!(
        err,
        ViewDdlError::Render(RenderError::NonFiniteLiteral(_))
    ));

    let err = CreateView::new(&view, Select::new())
        .compile(&pg())
        .unwrap_err();
    assert_eq!(err, ViewDdlError::Render(RenderError::EmptySelect));
}
