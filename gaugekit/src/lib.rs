// Copyright 2025 the Gaugekit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative analog instrument gauges.
//!
//! An instrument is described once as data and then built onto a [`Surface`]:
//! - **Registers** hold the instrument's live values. Setting a register clamps it to its
//!   bounds and notifies its listeners.
//! - **Gauges** draw arcs, tick scales and labels from angular geometry, then bind their
//!   [`Mechanics`] to register listeners so indicators follow the values.
//! - The built [`Instrument`] exposes the registers through named accessors
//!   (`setValue`, `getValue`, and `show*` visibility toggles).
//!
//! Geometry is computed once at build time. Updates only rewrite `transform` attributes.
//!
//! The crate renders into an abstract element tree; `gaugekit_svg` provides an SVG backend.
//! Ready-made flight instruments live in [`presets`].

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod art;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod gauge;
mod geometry;
mod instrument;
mod label;
mod mechanics;
pub mod presets;
mod range;
mod register;
mod skip;
mod surface;
#[cfg(test)]
mod test_surface;
mod tick;
mod transform;

pub use art::{Art, ArtElement, NeedleShape, points_attribute, ring_path};
pub use error::{BuildError, InstrumentError, RangeError};
pub use format::{format_coordinate, format_number};
pub use gauge::{DialSpec, GaugeSpec, HorizonSpec, IndicatorSpec, RegisterRef};
pub use geometry::{PathCommand, PathData, arc_path, vector_to_point};
pub use instrument::{Instrument, InstrumentSpec};
pub use label::{Formatter, LabelRotation, LabelSpec, LabelStyle, ScaleLabelSpec};
pub use mechanics::{GaugeGeometry, HorizonMechanics, IndicatorNodes, Mechanics};
pub use range::{AngularMapping, REST_ANGLE, RangeSpec, RangeSummary};
pub use register::{Conversion, Listener, ListenerError, Register, RegisterSpec};
pub use skip::{SkipRule, SkipRules};
pub use surface::{Attributes, ElementKind, NodeId, Surface};
pub use tick::{MAX_TICKS, ScaleLevelSpec, Tick, TickLayout};
pub use transform::{Canvas, ElementTransform, GroupTransform};
