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

use databend_common_view_ddl::compat::ConstructorSignature;
use databend_common_view_ddl::CompileOptions;
use databend_common_view_ddl::CreateView;
use databend_common_view_ddl::DdlElement;
use databend_common_view_ddl::Dialect;
use databend_common_view_ddl::DropView;
use databend_common_view_ddl::HostCompat;
use databend_common_view_ddl::HostVersion;
use databend_common_view_ddl::LegacyParameter;
use databend_common_view_ddl::Select;
use databend_common_view_ddl::Table;
use databend_common_view_ddl::ViewDdlConfig;
use databend_common_view_ddl::ViewDdlError;
use pretty_assertions::assert_eq;

use crate::compile_query;
use crate::t1;

fn host(major: u32, minor: u32) -> HostCompat {
    HostCompat::detect(HostVersion::new(major, minor, 0))
}

#[test]
fn test_legacy_params_on_old_hosts() {
    let t1 = t1(None);
    let view = Table::new("myview");

    let create = CreateView::builder(&view, Select::from_table(&t1))
        .on(Dialect::PostgreSQL)
        .bind(Dialect::PostgreSQL)
        .build(&host(1, 3))
        .unwrap();
    assert_eq!(create.signature(), ConstructorSignature::Legacy);
    assert_eq!(create.on(), Some(Dialect::PostgreSQL));
    assert_eq!(create.bind(), Some(Dialect::PostgreSQL));

    // on/bind are carried but never change the output.
    assert_eq!(
        compile_query(&create, CompileOptions::new(Dialect::SQLite)),
        "CREATE VIEW myview AS SELECT t1.col1, t1.col2 FROM t1"
    );

    let drop = DropView::builder(&view)
        .bind(Dialect::Redshift)
        .build(&host(1, 4))
        .unwrap();
    assert_eq!(drop.signature(), ConstructorSignature::BindOnly);
    assert_eq!(drop.bind(), Some(Dialect::Redshift));
}

#[test]
fn test_defaults_fall_back_silently() {
    let view = Table::new("myview");
    for host in [host(0, 9), host(1, 0), host(1, 4), host(2, 0), host(3, 1)] {
        let drop = DropView::builder(&view).build(&host).unwrap();
        let expected = if host.version() < HostVersion::new(1, 0, 0) {
            ConstructorSignature::Minimal
        } else if host.version() < HostVersion::new(1, 4, 0) {
            ConstructorSignature::Legacy
        } else if host.version() < HostVersion::new(2, 0, 0) {
            ConstructorSignature::BindOnly
        } else {
            ConstructorSignature::Minimal
        };
        assert_eq!(drop.signature(), expected);
    }
}

#[test]
fn test_unsupported_parameters() {
    let t1 = t1(None);
    let view = Table::new("myview");

    let err = CreateView::builder(&view, Select::from_table(&t1))
        .on(Dialect::PostgreSQL)
        .build(&host(1, 4))
        .unwrap_err();
    assert_eq!(err, ViewDdlError::UnsupportedParameter {
        parameter: LegacyParameter::On,
        version: HostVersion::new(1, 4, 0),
        removed_in: HostVersion::new(1, 4, 0),
    });

    // `on` is reported first when both are rejected.
    let err = DropView::builder(&view)
        .on(Dialect::MySQL)
        .bind(Dialect::MySQL)
        .build(&host(2, 0))
        .unwrap_err();
    assert!(matches!(err, ViewDdlError::UnsupportedParameter {
        parameter: LegacyParameter::On,
        ..
    }));

    let err = DropView::builder(&view)
        .bind(Dialect::MySQL)
        .build(&HostCompat::current())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "parameter `bind` is not supported by host version 2.0.0: it was removed in 2.0.0"
    );
}

#[test]
fn test_pre_legacy_host() {
    let t1 = t1(None);
    let view = Table::new("myview");

    let drop = DropView::builder(&view)
        .cascade(true)
        .build(&host(0, 9))
        .unwrap();
    assert_eq!(drop.signature(), ConstructorSignature::Minimal);
    let create = CreateView::builder(&view, Select::from_table(&t1))
        .build(&host(0, 9))
        .unwrap();
    assert_eq!(create.signature(), ConstructorSignature::Minimal);

    let err = DropView::builder(&view)
        .on(Dialect::PostgreSQL)
        .build(&host(0, 9))
        .unwrap_err();
    assert_eq!(err, ViewDdlError::HostIncompatible {
        version: HostVersion::new(0, 9, 0),
    });
}

#[test]
fn test_host_from_config() {
    let config = ViewDdlConfig::from_json(r#"{ "host_version": "1.3" }"#).unwrap();
    let view = Table::new("myview");
    let drop = DropView::builder(&view)
        .on(Dialect::PostgreSQL)
        .cascade(true)
        .build(&config.host_compat())
        .unwrap();

    assert_eq!(drop.signature(), ConstructorSignature::Legacy);
    let compiled = drop.compile(&config.compile).unwrap();
    assert_eq!(compiled.sql(), "DROP VIEW myview CASCADE");
    assert_eq!(compiled.dialect(), Dialect::Default);
}
