// Copyright 2025 the Gaugekit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

extern crate alloc;

use alloc::string::String;

use thiserror::Error;

/// A malformed scale configuration inside one range.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RangeError {
    /// A scale level with zero divisions.
    #[error("scale level {level} has zero divisions")]
    ZeroDivisions {
        /// Offending level index.
        level: usize,
    },
    /// The product of all divisions is unreasonably large.
    #[error("scale levels produce {count} ticks (limit {limit})")]
    TooManyTicks {
        /// Requested tick count (saturated).
        count: u64,
        /// Maximum supported tick count.
        limit: u64,
    },
    /// `from > to`, or a non-finite bound.
    #[error("range bounds {from}..{to} are invalid")]
    InvalidBounds {
        /// Lower value bound.
        from: f64,
        /// Upper value bound.
        to: f64,
    },
    /// A skip rule with a zero or non-finite operand.
    #[error("scale level {level} has an invalid skip rule")]
    InvalidSkipRule {
        /// Offending level index.
        level: usize,
    },
}

/// A configuration error detected while building an instrument.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BuildError {
    /// A register with `min > max` or a non-finite bound.
    #[error("register {register} has invalid bounds {min}..{max}")]
    InvalidRegisterBounds {
        /// Register index.
        register: usize,
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
    /// Two registers or gauges claim the same accessor name.
    #[error("accessor `{0}` is defined more than once")]
    DuplicateAccessor(String),
    /// A gauge references a register that does not exist.
    #[error("gauge {gauge} references unknown register `{reference}`")]
    UnknownRegister {
        /// Gauge index.
        gauge: usize,
        /// The unresolved reference (index or name).
        reference: String,
    },
    /// A gauge's mechanics need more registers than it references.
    #[error("gauge {gauge} needs {required} registers, found {found}")]
    MissingRegisters {
        /// Gauge index.
        gauge: usize,
        /// Registers the mechanics require.
        required: usize,
        /// Registers the gauge references.
        found: usize,
    },
    /// Clock mechanics on a gauge without a modulo.
    #[error("gauge {gauge} uses clock mechanics without a modulo")]
    MissingModulo {
        /// Gauge index.
        gauge: usize,
    },
    /// A zero, negative or non-finite modulo.
    #[error("gauge {gauge} has invalid modulo {modulo}")]
    InvalidModulo {
        /// Gauge index.
        gauge: usize,
        /// Configured modulo.
        modulo: f64,
    },
    /// The primary register spans no values, so no angular mapping exists.
    #[error("gauge {gauge} maps an empty value domain")]
    DegenerateDomain {
        /// Gauge index.
        gauge: usize,
    },
    /// A non-finite angular start, range or group transform parameter.
    #[error("gauge {gauge} has a non-finite {field}")]
    NonFiniteParameter {
        /// Gauge index.
        gauge: usize,
        /// Parameter name.
        field: &'static str,
    },
    /// The mechanics cannot drive the configured indicator.
    #[error("gauge {gauge}: {mechanics} mechanics cannot drive a {indicator} indicator")]
    IndicatorMismatch {
        /// Gauge index.
        gauge: usize,
        /// Mechanics kind.
        mechanics: &'static str,
        /// Indicator kind.
        indicator: &'static str,
    },
    /// A range of a gauge (or of its dial indicator) is malformed.
    #[error("gauge {gauge}, range {range}")]
    Range {
        /// Gauge index.
        gauge: usize,
        /// Range index.
        range: usize,
        /// What is wrong with it.
        #[source]
        source: RangeError,
    },
}

/// A failed runtime call on a built instrument.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InstrumentError {
    /// No register or gauge exposes an accessor with this name.
    #[error("instrument has no accessor named `{0}`")]
    UnknownAccessor(String),
    /// The drawing surface is borrowed elsewhere (for example by a caller holding
    /// [`Instrument::surface`](crate::Instrument::surface)).
    #[error("drawing surface is already borrowed")]
    SurfaceBusy,
}
