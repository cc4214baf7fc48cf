// Copyright 2025 the Gaugekit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mechanics: how register values move an indicator.
//!
//! Each strategy is a pure value-to-transform function plus a one-time `bind` step that installs
//! a register listener writing the transform onto the indicator node.

extern crate alloc;

use alloc::rc::Rc;
use core::cell::RefCell;

use kurbo::{Point, Vec2};

use crate::register::{ListenerError, Register};
use crate::surface::{NodeId, Surface};
use crate::transform::ElementTransform;

/// The resolved angular layout of one gauge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaugeGeometry {
    /// Indicator rotation (degrees) at the minimum value.
    pub start: f64,
    /// Angular travel (degrees) over the value domain, or over one modulo period.
    pub range: f64,
    /// Rotation direction.
    pub clockwise: bool,
    /// Unsigned degrees per value unit.
    pub degrees_per_value: f64,
    /// Primary register minimum.
    pub min: f64,
    /// Primary register maximum.
    pub max: f64,
    /// Period of a clock-style gauge.
    pub modulo: Option<f64>,
    /// Rotation pivot.
    pub center: Point,
}

impl GaugeGeometry {
    /// Returns the degrees per value unit, negated for counter-clockwise gauges.
    pub fn signed_degrees_per_value(&self) -> f64 {
        if self.clockwise {
            self.degrees_per_value
        } else {
            -self.degrees_per_value
        }
    }

    /// Indicator rotation for `value` on a radial gauge.
    pub fn rotation(&self, value: f64) -> f64 {
        self.start + (value - self.min) * self.signed_degrees_per_value()
    }

    /// Indicator rotation for `value` on a clock-style gauge: the value is wrapped into one
    /// modulo period first. Without a modulo this is [`GaugeGeometry::rotation`].
    pub fn clock_rotation(&self, value: f64) -> f64 {
        match self.modulo {
            Some(period) => {
                self.start + wrap(value - self.min, period) * self.signed_degrees_per_value()
            }
            None => self.rotation(value),
        }
    }
}

/// Wraps `value` into `0..period`.
fn wrap(value: f64, period: f64) -> f64 {
    let r = value % period;
    if r < 0.0 { r + period } else { r }
}

/// Parameters of the dual-axis (attitude) strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HorizonMechanics {
    /// Pitch beyond this many degrees (either way) does not move the pitch layer further.
    pub max_pitch: f64,
    /// Vertical travel of the pitch layer per degree of pitch.
    pub units_per_degree: f64,
}

impl Default for HorizonMechanics {
    fn default() -> Self {
        Self {
            max_pitch: 32.0,
            units_per_degree: 2.7,
        }
    }
}

impl HorizonMechanics {
    /// Returns the pitch layer's vertical offset for `pitch` degrees.
    pub fn pitch_offset(&self, pitch: f64) -> f64 {
        pitch.clamp(-self.max_pitch, self.max_pitch) * self.units_per_degree
    }
}

/// A value-to-transform strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Mechanics {
    /// Rotate the indicator proportionally to the value.
    #[default]
    Radial,
    /// Rotate the indicator by the value wrapped into the gauge's modulo.
    Clock,
    /// Translate a pitch layer by the first register and rotate a roll layer by the second.
    Horizon(HorizonMechanics),
    /// Static gauge.
    None,
}

/// The nodes a mechanics strategy drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorNodes {
    /// No movable indicator.
    None,
    /// One rotating group.
    Single(NodeId),
    /// Nested roll and pitch groups.
    Horizon {
        /// Outer group, rotated by roll.
        roll: NodeId,
        /// Inner group, translated by pitch.
        pitch: NodeId,
    },
}

impl IndicatorNodes {
    /// Short name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::None => "static",
            Self::Single(_) => "rotating",
            Self::Horizon { .. } => "horizon",
        }
    }
}

impl Mechanics {
    /// Short name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Radial => "radial",
            Self::Clock => "clock",
            Self::Horizon(_) => "horizon",
            Self::None => "no",
        }
    }

    /// Number of registers the strategy reads.
    pub fn required_registers(&self) -> usize {
        match self {
            Self::Horizon(_) => 2,
            _ => 1,
        }
    }

    /// Returns `true` if the strategy can drive indicators of the given shape.
    pub fn can_drive(&self, nodes: &IndicatorNodes) -> bool {
        match (self, nodes) {
            (Self::None, _) | (_, IndicatorNodes::None) => true,
            (Self::Radial | Self::Clock, IndicatorNodes::Single(_)) => true,
            (Self::Horizon(_), IndicatorNodes::Horizon { .. }) => true,
            _ => false,
        }
    }

    /// Installs listeners on `registers` that update `nodes` on `surface`.
    ///
    /// Returns the number of listeners installed. Callers check [`Mechanics::can_drive`] and
    /// [`Mechanics::required_registers`] first; anything else binds nothing.
    pub fn bind<S: Surface + 'static>(
        &self,
        geometry: GaugeGeometry,
        registers: &[Register],
        nodes: IndicatorNodes,
        surface: &Rc<RefCell<S>>,
    ) -> usize {
        match (*self, nodes) {
            (Self::Radial, IndicatorNodes::Single(node)) => {
                let Some(register) = registers.first() else {
                    return 0;
                };
                register.add_listener(transform_listener(surface, node, move |v| {
                    ElementTransform::Rotate {
                        degrees: geometry.rotation(v),
                        center: geometry.center,
                    }
                }));
                1
            }
            (Self::Clock, IndicatorNodes::Single(node)) => {
                let Some(register) = registers.first() else {
                    return 0;
                };
                register.add_listener(transform_listener(surface, node, move |v| {
                    ElementTransform::Rotate {
                        degrees: geometry.clock_rotation(v),
                        center: geometry.center,
                    }
                }));
                1
            }
            (Self::Horizon(horizon), IndicatorNodes::Horizon { roll, pitch }) => {
                let [pitch_register, roll_register, ..] = registers else {
                    return 0;
                };
                pitch_register.add_listener(transform_listener(surface, pitch, move |v| {
                    ElementTransform::Translate(Vec2::new(0.0, horizon.pitch_offset(v)))
                }));
                roll_register.add_listener(transform_listener(surface, roll, move |v| {
                    ElementTransform::Rotate {
                        degrees: v,
                        center: geometry.center,
                    }
                }));
                2
            }
            _ => 0,
        }
    }
}

fn transform_listener<S: Surface + 'static>(
    surface: &Rc<RefCell<S>>,
    node: NodeId,
    transform: impl Fn(f64) -> ElementTransform + 'static,
) -> impl FnMut(f64) -> Result<(), ListenerError> + 'static {
    let surface = Rc::clone(surface);
    move |value| {
        let attribute = transform(value).to_attribute();
        let mut surface = surface
            .try_borrow_mut()
            .map_err(|_| ListenerError::SurfaceBusy)?;
        surface.set_attribute(node, "transform", attribute);
        Ok(())
    }
}
