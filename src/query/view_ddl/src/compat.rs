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

//! Statement constructor compatibility across host versions.
//!
//! Older hosts let DDL elements be constructed with two extra parameters,
//! `on` and `bind`. `on` was dropped in 1.4 and `bind` in 2.0. The host
//! version is detected once into a [`HostCompat`], which then walks the
//! `Legacy -> BindOnly -> Minimal` signatures exactly once per construction and
//! either settles on one or reports which caller-supplied parameter the host
//! can no longer take.

use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use log::debug;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::config::Dialect;
use crate::error::Result;
use crate::error::ViewDdlError;

/// Version of the host library this crate is built against.
pub const HOST_VERSION: HostVersion = HostVersion::new(2, 0, 0);

/// Signature [`HOST_VERSION`] settles on when no legacy parameter is set.
pub const HOST_SIGNATURE: ConstructorSignature = ConstructorSignature::Minimal;

const LEGACY_SINCE: HostVersion = HostVersion::new(1, 0, 0);
const ON_REMOVED_IN: HostVersion = HostVersion::new(1, 4, 0);
const BIND_REMOVED_IN: HostVersion = HostVersion::new(2, 0, 0);

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HostVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl HostVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Display for HostVersion {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for HostVersion {
    type Err = ViewDdlError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ViewDdlError::Config(format!("invalid host version `{s}`"));

        let mut parts = s.trim().split('.');
        let mut next = |required: bool| -> Result<u32> {
            match parts.next() {
                Some(part) => part.parse::<u32>().map_err(|_| invalid()),
                None if required => Err(invalid()),
                None => Ok(0),
            }
        };

        let version = HostVersion::new(next(true)?, next(true)?, next(false)?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(version)
    }
}

impl Serialize for HostVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HostVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Constructor parameters that were accepted by older hosts only.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum LegacyParameter {
    On,
    Bind,
}

impl LegacyParameter {
    pub fn removed_in(&self) -> HostVersion {
        match self {
            LegacyParameter::On => ON_REMOVED_IN,
            LegacyParameter::Bind => BIND_REMOVED_IN,
        }
    }
}

/// Values for the legacy parameters. `None` is the default and is accepted by
/// every host version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyArgs {
    /// Restrict the statement to one dialect.
    pub on: Option<Dialect>,
    /// Dialect of the connection the statement is bound to.
    pub bind: Option<Dialect>,
}

impl LegacyArgs {
    pub fn is_set(&self, parameter: LegacyParameter) -> bool {
        match parameter {
            LegacyParameter::On => self.on.is_some(),
            LegacyParameter::Bind => self.bind.is_some(),
        }
    }
}

/// The base statement constructor shapes, widest first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum ConstructorSignature {
    /// `(element, on, bind)`
    Legacy,
    /// `(element, bind)`
    BindOnly,
    /// `(element)`
    Minimal,
}

impl ConstructorSignature {
    const LADDER: [ConstructorSignature; 3] = [
        ConstructorSignature::Legacy,
        ConstructorSignature::BindOnly,
        ConstructorSignature::Minimal,
    ];

    /// The parameter given up when falling back from this signature to the
    /// next one down the ladder.
    fn dropped_on_fallback(&self) -> Option<LegacyParameter> {
        match self {
            ConstructorSignature::Legacy => Some(LegacyParameter::On),
            ConstructorSignature::BindOnly => Some(LegacyParameter::Bind),
            ConstructorSignature::Minimal => None,
        }
    }
}

/// A host's refusal of one constructor signature. Never leaves this module:
/// the ladder either absorbs it or translates it.
#[derive(Debug)]
struct SignatureMismatch {
    parameter: Option<LegacyParameter>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HostCompat {
    version: HostVersion,
}

impl Default for HostCompat {
    fn default() -> Self {
        Self::current()
    }
}

impl HostCompat {
    pub fn current() -> Self {
        Self::detect(HOST_VERSION)
    }

    pub fn detect(version: HostVersion) -> Self {
        Self { version }
    }

    pub fn version(&self) -> HostVersion {
        self.version
    }

    fn try_signature(
        &self,
        signature: ConstructorSignature,
    ) -> std::result::Result<(), SignatureMismatch> {
        // Every host takes the bare element.
        if signature == ConstructorSignature::Minimal {
            return Ok(());
        }
        if self.version < LEGACY_SINCE {
            return Err(SignatureMismatch { parameter: None });
        }

        let accepted = match signature {
            ConstructorSignature::Legacy => self.version < ON_REMOVED_IN,
            ConstructorSignature::BindOnly => self.version < BIND_REMOVED_IN,
            ConstructorSignature::Minimal => true,
        };
        if accepted {
            Ok(())
        } else {
            Err(SignatureMismatch {
                parameter: signature.dropped_on_fallback(),
            })
        }
    }

    /// Settle on the widest constructor signature this host accepts.
    ///
    /// Default arguments always resolve. Otherwise fails with
    /// [`ViewDdlError::UnsupportedParameter`] naming the first parameter the
    /// caller set that the host has dropped, and with
    /// [`ViewDdlError::HostIncompatible`] when legacy parameters were set but
    /// the host refuses them for a reason unrelated to either parameter.
    pub fn resolve(&self, args: &LegacyArgs) -> Result<ConstructorSignature> {
        for signature in ConstructorSignature::LADDER {
            let mismatch = match self.try_signature(signature) {
                Ok(()) => {
                    debug!("host {} accepts the {} constructor", self.version, signature);
                    return Ok(signature);
                }
                Err(mismatch) => mismatch,
            };

            let Some(parameter) = mismatch.parameter else {
                if args.on.is_some() || args.bind.is_some() {
                    return Err(ViewDdlError::HostIncompatible {
                        version: self.version,
                    });
                }
                continue;
            };

            if args.is_set(parameter) {
                return Err(ViewDdlError::UnsupportedParameter {
                    parameter,
                    version: self.version,
                    removed_in: parameter.removed_in(),
                });
            }
        }

        Err(ViewDdlError::HostIncompatible {
            version: self.version,
        })
    }
}
