// Copyright 2025 the Gaugekit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gauge specs and assembly.
//!
//! A gauge is one indicator mechanism: its base art, range bands, captions, the moving
//! indicator, and top art, composed into a single placed group and wired to its registers.

extern crate alloc;

use alloc::format;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use smallvec::{SmallVec, smallvec};

use crate::art::{Art, NeedleShape};
use crate::error::BuildError;
use crate::label::LabelSpec;
use crate::mechanics::{GaugeGeometry, IndicatorNodes, Mechanics};
use crate::range::{AngularMapping, RangeSpec};
use crate::register::Register;
use crate::surface::{NodeId, Surface};
use crate::transform::{Canvas, GroupTransform};

/// A reference from a gauge to one of the instrument's registers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegisterRef {
    /// By position in the instrument's register list.
    Index(usize),
    /// By register name.
    Name(String),
}

impl From<usize> for RegisterRef {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for RegisterRef {
    fn from(name: &str) -> Self {
        Self::Name(name.into())
    }
}

impl core::fmt::Display for RegisterRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Index(i) => write!(f, "#{i}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// A rotating dial read against a fixed pointer (compass rose, pressure scale).
#[derive(Clone, Debug)]
pub struct DialSpec {
    /// Group class.
    pub class: String,
    /// Screen angle (degrees) of the fixed pointer the dial is read against.
    pub pointer_angle: f64,
    /// Art drawn beneath the dial's ranges.
    pub face: Option<Art>,
    /// Ranges laid out in the dial's rotating frame.
    pub ranges: Vec<RangeSpec>,
}

impl DialSpec {
    /// Creates a dial read against a pointer at `pointer_angle`.
    pub fn new(class: impl Into<String>, pointer_angle: f64) -> Self {
        Self {
            class: class.into(),
            pointer_angle,
            face: None,
            ranges: Vec::new(),
        }
    }

    /// Sets the face art.
    pub fn with_face(mut self, face: Art) -> Self {
        self.face = Some(face);
        self
    }

    /// Appends a range.
    pub fn with_range(mut self, range: RangeSpec) -> Self {
        self.ranges.push(range);
        self
    }
}

/// Artwork for a dual-axis attitude indicator.
///
/// Rendered as a roll group containing `roll_back`, then a nested pitch group holding `pitch`,
/// then `roll_front`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HorizonSpec {
    /// Roll-layer art beneath the pitch layer.
    pub roll_back: Art,
    /// Pitch-layer art.
    pub pitch: Art,
    /// Roll-layer art above the pitch layer.
    pub roll_front: Art,
}

/// The moving part of a gauge.
#[derive(Clone, Debug)]
pub enum IndicatorSpec {
    /// A built-in needle.
    Needle(NeedleShape),
    /// Custom rotating art.
    Art(Art),
    /// A rotating dial with its own ranges.
    Dial(DialSpec),
    /// Nested roll/pitch layers.
    Horizon(HorizonSpec),
    /// No indicator.
    None,
}

impl Default for IndicatorSpec {
    fn default() -> Self {
        Self::Needle(NeedleShape::Standard)
    }
}

/// One gauge of an instrument.
#[derive(Clone, Debug)]
pub struct GaugeSpec {
    /// Group class.
    pub class: String,
    /// Initial visibility.
    pub visible: bool,
    /// Name of the visibility accessor, if any.
    pub show_name: Option<String>,
    /// Direction of increasing values.
    pub clockwise: bool,
    /// Indicator rotation at the minimum value; defaults to `90 − movement_range/2`.
    pub movement_start: Option<f64>,
    /// Angular travel over the value domain (or one modulo period).
    pub movement_range: f64,
    /// Period of a clock-style gauge.
    pub modulo: Option<f64>,
    /// Placement of the whole gauge.
    pub transform: GroupTransform,
    /// Registers driving this gauge; the first is primary.
    pub registers: SmallVec<[RegisterRef; 2]>,
    /// Art beneath everything else.
    pub base: Option<Art>,
    /// Bands on the gauge face.
    pub ranges: Vec<RangeSpec>,
    /// Static captions.
    pub labels: Vec<LabelSpec>,
    /// The moving part.
    pub indicator: IndicatorSpec,
    /// Art above everything else.
    pub top: Option<Art>,
    /// Value-to-transform strategy.
    pub mechanics: Mechanics,
}

impl Default for GaugeSpec {
    fn default() -> Self {
        Self {
            class: String::from("gauge"),
            visible: true,
            show_name: None,
            clockwise: true,
            movement_start: None,
            movement_range: 120.0,
            modulo: None,
            transform: GroupTransform::default(),
            registers: smallvec![RegisterRef::Index(0)],
            base: None,
            ranges: Vec::new(),
            labels: Vec::new(),
            indicator: IndicatorSpec::default(),
            top: None,
            mechanics: Mechanics::Radial,
        }
    }
}

impl GaugeSpec {
    /// Creates a gauge with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the register references.
    pub fn with_registers<R: Into<RegisterRef>>(
        mut self,
        registers: impl IntoIterator<Item = R>,
    ) -> Self {
        self.registers = registers.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the angular start and travel.
    pub fn with_movement(mut self, start: f64, range: f64) -> Self {
        self.movement_start = Some(start);
        self.movement_range = range;
        self
    }

    /// Sets the angular travel, keeping the default centered start.
    pub fn with_movement_range(mut self, range: f64) -> Self {
        self.movement_range = range;
        self
    }

    /// Sets the rotation direction.
    pub fn with_clockwise(mut self, clockwise: bool) -> Self {
        self.clockwise = clockwise;
        self
    }

    /// Makes this a clock-style gauge with the given period.
    pub fn with_modulo(mut self, modulo: f64) -> Self {
        self.modulo = Some(modulo);
        self
    }

    /// Sets the group class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Sets initial visibility.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Exposes a visibility accessor under `name`.
    pub fn with_show_name(mut self, name: impl Into<String>) -> Self {
        self.show_name = Some(name.into());
        self
    }

    /// Sets the group placement.
    pub fn with_transform(mut self, transform: GroupTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Sets the base art.
    pub fn with_base(mut self, art: Art) -> Self {
        self.base = Some(art);
        self
    }

    /// Appends a range band.
    pub fn with_range(mut self, range: RangeSpec) -> Self {
        self.ranges.push(range);
        self
    }

    /// Appends a static caption.
    pub fn with_label(mut self, label: LabelSpec) -> Self {
        self.labels.push(label);
        self
    }

    /// Sets the indicator.
    pub fn with_indicator(mut self, indicator: IndicatorSpec) -> Self {
        self.indicator = indicator;
        self
    }

    /// Sets the top art.
    pub fn with_top(mut self, art: Art) -> Self {
        self.top = Some(art);
        self
    }

    /// Sets the mechanics.
    pub fn with_mechanics(mut self, mechanics: Mechanics) -> Self {
        self.mechanics = mechanics;
        self
    }

    /// Returns the indicator rotation at the minimum value.
    pub fn resolved_start(&self) -> f64 {
        self.movement_start.unwrap_or(90.0 - self.movement_range / 2.0)
    }

    /// Resolves register references against the instrument's registers.
    pub fn resolve_registers(
        &self,
        index: usize,
        registers: &[Register],
    ) -> Result<Vec<Register>, BuildError> {
        self.registers
            .iter()
            .map(|reference| {
                let found = match reference {
                    RegisterRef::Index(i) => registers.get(*i),
                    RegisterRef::Name(name) => {
                        registers.iter().find(|r| r.name() == Some(name.as_str()))
                    }
                };
                found.cloned().ok_or_else(|| BuildError::UnknownRegister {
                    gauge: index,
                    reference: reference.to_string(),
                })
            })
            .collect()
    }

    /// Validates the angular configuration against the primary register.
    pub fn geometry(
        &self,
        index: usize,
        primary: &Register,
        canvas: Canvas,
    ) -> Result<GaugeGeometry, BuildError> {
        let start = self.resolved_start();
        for (field, value) in [("movement start", start), ("movement range", self.movement_range)]
        {
            if !value.is_finite() {
                return Err(BuildError::NonFiniteParameter {
                    gauge: index,
                    field,
                });
            }
        }
        if !self.transform.is_finite() {
            return Err(BuildError::NonFiniteParameter {
                gauge: index,
                field: "transform",
            });
        }
        if let Some(modulo) = self.modulo {
            if !(modulo.is_finite() && modulo > 0.0) {
                return Err(BuildError::InvalidModulo {
                    gauge: index,
                    modulo,
                });
            }
        } else if self.mechanics == Mechanics::Clock {
            return Err(BuildError::MissingModulo { gauge: index });
        }

        let (min, max) = (primary.min_value(), primary.max_value());
        let span = self.modulo.unwrap_or(max - min);
        if span <= 0.0 {
            return Err(BuildError::DegenerateDomain { gauge: index });
        }
        Ok(GaugeGeometry {
            start,
            range: self.movement_range,
            clockwise: self.clockwise,
            degrees_per_value: self.movement_range / span,
            min,
            max,
            modulo: self.modulo,
            center: canvas.center(),
        })
    }

    /// Renders this gauge under `parent` and binds its mechanics.
    pub(crate) fn build<S: Surface + 'static>(
        &self,
        index: usize,
        surface: &Rc<RefCell<S>>,
        parent: NodeId,
        registers: &[Register],
        canvas: Canvas,
    ) -> Result<NodeId, BuildError> {
        let registers = self.resolve_registers(index, registers)?;
        let required = self.mechanics.required_registers();
        let Some(primary) = registers.first().filter(|_| registers.len() >= required) else {
            return Err(BuildError::MissingRegisters {
                gauge: index,
                required,
                found: registers.len(),
            });
        };
        let geometry = self.geometry(index, primary, canvas)?;
        let domain = (geometry.min, geometry.max);

        let (group, nodes) = {
            let mut surface = surface.borrow_mut();
            let surface = &mut *surface;
            let group = surface.create_group(parent, Some(&self.class));
            if !self.visible {
                surface.set_attribute(group, "display", String::from("none"));
            }
            if let Some(base) = &self.base {
                base.render(surface, group);
            }

            let face = AngularMapping::face(&geometry);
            for (i, range) in self.ranges.iter().enumerate() {
                let summary = range
                    .render(surface, group, geometry.center, face, domain, geometry.modulo)
                    .map_err(|source| BuildError::Range {
                        gauge: index,
                        range: i,
                        source,
                    })?;
                log::debug!(
                    "gauge {index}: range {i} drew {} ticks ({} skipped) and {} labels",
                    summary.ticks,
                    summary.skipped,
                    summary.labels
                );
            }
            for label in &self.labels {
                label.render(surface, group);
            }

            let nodes = self.render_indicator(index, surface, group, &geometry, canvas)?;
            if let Some(top) = &self.top {
                top.render(surface, group);
            }
            if let Some(transform) = self.transform.to_attribute(canvas) {
                surface.set_attribute(group, "transform", transform);
            }
            (group, nodes)
        };

        if !self.mechanics.can_drive(&nodes) {
            return Err(BuildError::IndicatorMismatch {
                gauge: index,
                mechanics: self.mechanics.name(),
                indicator: nodes.kind(),
            });
        }
        let bound = self.mechanics.bind(geometry, &registers, nodes, surface);
        log::debug!(
            "gauge {index}: {} mechanics bound {bound} listeners",
            self.mechanics.name()
        );
        Ok(group)
    }

    fn render_indicator<S: Surface + ?Sized>(
        &self,
        index: usize,
        surface: &mut S,
        group: NodeId,
        geometry: &GaugeGeometry,
        canvas: Canvas,
    ) -> Result<IndicatorNodes, BuildError> {
        let nodes = match &self.indicator {
            IndicatorSpec::Needle(shape) => {
                IndicatorNodes::Single(shape.art(canvas).render(surface, group))
            }
            IndicatorSpec::Art(art) => IndicatorNodes::Single(art.render(surface, group)),
            IndicatorSpec::Dial(dial) => {
                let node = surface.create_group(group, Some(&dial.class));
                if let Some(face) = &dial.face {
                    face.render_into(surface, node);
                }
                let mapping = AngularMapping::dial(geometry, dial.pointer_angle);
                let domain = (geometry.min, geometry.max);
                for (i, range) in dial.ranges.iter().enumerate() {
                    range
                        .render(surface, node, geometry.center, mapping, domain, geometry.modulo)
                        .map_err(|source| BuildError::Range {
                            gauge: index,
                            range: self.ranges.len() + i,
                            source,
                        })?;
                }
                IndicatorNodes::Single(node)
            }
            IndicatorSpec::Horizon(horizon) => {
                let roll = surface.create_group(group, horizon.roll_back.class.as_deref());
                horizon.roll_back.render_into(surface, roll);
                let pitch = horizon.pitch.render(surface, roll);
                horizon.roll_front.render_into(surface, roll);
                IndicatorNodes::Horizon { roll, pitch }
            }
            IndicatorSpec::None => IndicatorNodes::None,
        };
        Ok(nodes)
    }
}

/// Formats a gauge index for log lines.
pub(crate) fn describe(index: usize, spec: &GaugeSpec) -> String {
    match &spec.show_name {
        Some(name) => format!("gauge {index} ({name})"),
        None => format!("gauge {index}"),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kurbo::Vec2;

    use super::*;
    use crate::error::RangeError;
    use crate::mechanics::HorizonMechanics;
    use crate::register::RegisterSpec;
    use crate::test_surface::Recorder;
    use crate::tick::ScaleLevelSpec;

    fn surface() -> Rc<RefCell<Recorder>> {
        Rc::new(RefCell::new(Recorder::default()))
    }

    #[test]
    fn default_start_centers_the_travel() {
        assert_eq!(GaugeSpec::new().resolved_start(), 30.0);
        assert_eq!(GaugeSpec::new().with_movement_range(360.0).resolved_start(), -90.0);
        assert_eq!(GaugeSpec::new().with_movement(90.0, 320.0).resolved_start(), 90.0);
    }

    #[test]
    fn registers_resolve_by_index_and_name() {
        let registers = [
            RegisterSpec::new(0.0, 1.0).with_name("a").instantiate(),
            RegisterSpec::new(0.0, 2.0).with_name("b").instantiate(),
        ];
        let spec = GaugeSpec::new()
            .with_registers([RegisterRef::from("b"), RegisterRef::from(0_usize)]);
        let resolved = spec.resolve_registers(0, &registers).unwrap();
        assert_eq!(resolved[0].max_value(), 2.0);
        assert_eq!(resolved[1].name(), Some("a"));

        let missing = GaugeSpec::new().with_registers(["c"]);
        assert_eq!(
            missing.resolve_registers(3, &registers).unwrap_err(),
            BuildError::UnknownRegister {
                gauge: 3,
                reference: "c".into()
            }
        );
    }

    #[test]
    fn assembly_order_is_fixed() {
        let s = surface();
        let registers = [Register::new(0.0, 160.0)];
        let spec = GaugeSpec::new()
            .with_base(Art::new("base"))
            .with_range(RangeSpec::new())
            .with_label(LabelSpec::new("KNOTS", kurbo::Point::new(200.0, 240.0)))
            .with_top(Art::new("top"));
        let root = s.borrow().root();
        let group = spec.build(0, &s, root, &registers, Canvas::default()).unwrap();

        let s = s.borrow();
        let order: Vec<&str> = s
            .children(group)
            .map(|(_, n)| n.class().unwrap_or("<none>"))
            .collect();
        assert_eq!(
            order,
            ["base", "range", "label", "needle needle-standard", "top"]
        );
        assert_eq!(registers[0].listener_count(), 1);
    }

    #[test]
    fn group_transform_and_visibility() {
        let s = surface();
        let registers = [Register::new(0.0, 1.0)];
        let spec = GaugeSpec::new()
            .with_visible(false)
            .with_transform(GroupTransform {
                offset: Vec2::new(5.0, 0.0),
                rotate: 0.0,
                scale: 1.0,
            });
        let root = s.borrow().root();
        let group = spec.build(0, &s, root, &registers, Canvas::default()).unwrap();
        let s = s.borrow();
        assert_eq!(s.attribute(group, "display"), Some("none"));
        assert_eq!(s.attribute(group, "transform"), Some("translate(5 0)"));
    }

    #[test]
    fn configuration_errors_are_descriptive() {
        let registers = [Register::new(0.0, 100.0)];
        let root = NodeId(0);
        let build =
            |spec: GaugeSpec| spec.build(7, &surface(), root, &registers, Canvas::default());

        assert_eq!(
            build(GaugeSpec::new().with_mechanics(Mechanics::Clock)).unwrap_err(),
            BuildError::MissingModulo { gauge: 7 }
        );
        assert!(matches!(
            build(GaugeSpec::new().with_modulo(0.0)),
            Err(BuildError::InvalidModulo { gauge: 7, .. })
        ));
        assert_eq!(
            build(
                GaugeSpec::new().with_mechanics(Mechanics::Horizon(HorizonMechanics::default()))
            )
            .unwrap_err(),
            BuildError::MissingRegisters {
                gauge: 7,
                required: 2,
                found: 1
            }
        );
        assert_eq!(
            build(GaugeSpec::new().with_range(
                RangeSpec::new().with_scale(ScaleLevelSpec::new(0))
            ))
            .unwrap_err(),
            BuildError::Range {
                gauge: 7,
                range: 0,
                source: RangeError::ZeroDivisions { level: 0 }
            }
        );
        let horizon_on_radial = GaugeSpec::new().with_indicator(IndicatorSpec::Horizon(
            HorizonSpec::default(),
        ));
        assert!(matches!(
            build(horizon_on_radial),
            Err(BuildError::IndicatorMismatch { gauge: 7, .. })
        ));
    }

    #[test]
    fn degenerate_domain_is_rejected() {
        let registers = [Register::new(5.0, 5.0)];
        let s = surface();
        assert_eq!(
            GaugeSpec::new()
                .build(0, &s, NodeId(0), &registers, Canvas::default())
                .unwrap_err(),
            BuildError::DegenerateDomain { gauge: 0 }
        );
    }

    #[test]
    fn dial_ranges_are_drawn_inside_the_indicator() {
        let s = surface();
        let registers = [Register::new(0.0, 360.0)];
        let spec = GaugeSpec::new()
            .with_movement(0.0, 360.0)
            .with_clockwise(false)
            .with_modulo(360.0)
            .with_indicator(IndicatorSpec::Dial(
                DialSpec::new("rose", -90.0)
                    .with_range(RangeSpec::new().with_scale(ScaleLevelSpec::new(36))),
            ));
        let group = spec
            .build(0, &s, NodeId(0), &registers, Canvas::default())
            .unwrap();
        registers[0].set_value(90.0);

        let s = s.borrow();
        let (dial, _) = s
            .children(group)
            .find(|(_, n)| n.class() == Some("rose"))
            .unwrap();
        assert_eq!(s.children(dial).count(), 1 + 36);
        assert_eq!(s.attribute(dial, "transform"), Some("rotate(-90 200 200)"));
    }

    #[test]
    fn describe_mentions_the_toggle() {
        assert_eq!(describe(2, &GaugeSpec::new()), "gauge 2");
        assert_eq!(
            describe(1, &GaugeSpec::new().with_show_name("showBeacon1")),
            "gauge 1 (showBeacon1)"
        );
    }
}
