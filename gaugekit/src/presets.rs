// Copyright 2025 the Gaugekit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ready-made flight instruments.
//!
//! Each function returns an [`InstrumentSpec`] that can be adjusted before building. Register
//! accessors are named after the quantity (`setAirspeed`, `setHeading`, ...).

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Vec2};
use peniko::Color;

use crate::art::{Art, ArtElement, NeedleShape};
use crate::format::format_number;
use crate::gauge::{DialSpec, GaugeSpec, HorizonSpec, IndicatorSpec};
use crate::geometry::vector_to_point;
use crate::instrument::InstrumentSpec;
use crate::label::{LabelRotation, LabelSpec, ScaleLabelSpec};
use crate::mechanics::{HorizonMechanics, Mechanics};
use crate::range::RangeSpec;
use crate::register::RegisterSpec;
use crate::skip::SkipRule;
use crate::surface::ElementKind;
use crate::tick::ScaleLevelSpec;
use crate::transform::Canvas;

const GREEN: Color = Color::from_rgba8(0x00, 0x75, 0x11, 0xff);
const YELLOW: Color = Color::from_rgba8(0xf9, 0xff, 0x00, 0xff);
const RED: Color = Color::from_rgba8(0xff, 0x00, 0x00, 0xff);

const BEACON_ONE_OUTLINE: &str =
    "M198,200 L198,90 L194,90 L200.5,72 L206.5,90 L202.5,90 L202.5,328 L198,328 Z";

/// Returns every preset with its name.
pub fn all() -> Vec<(&'static str, InstrumentSpec)> {
    alloc::vec![
        ("airspeed", airspeed()),
        ("altimeter", altimeter()),
        ("variometer", variometer()),
        ("heading", heading()),
        ("attitude", attitude()),
    ]
}

/// Airspeed indicator, 0–160 kt over 320°, with green, yellow and red arcs.
pub fn airspeed() -> InstrumentSpec {
    let band = |from: f64, to: f64, color: Color| {
        RangeSpec::new()
            .with_values(from, to)
            .with_offset(150.0)
            .with_extent(-10.0)
            .with_fill(color)
    };
    let gauge = GaugeSpec::new()
        .with_movement(90.0, 320.0)
        .with_label(LabelSpec::new("AIR SPEED", Point::new(200.0, 160.0)))
        .with_label(LabelSpec::new("KNOTS", Point::new(200.0, 240.0)))
        .with_range(band(30.0, 100.0, GREEN))
        .with_range(band(100.0, 140.0, YELLOW))
        .with_range(band(140.0, 160.0, RED))
        .with_range(
            RangeSpec::new()
                .with_class("hidden")
                .with_offset(150.0)
                .with_values(0.0, 30.0)
                .with_scale(
                    ScaleLevelSpec::new(12)
                        .with_class("scale scale-level-2")
                        .with_extent(-10.0)
                        .with_skip([
                            SkipRule::Exact(0.0),
                            SkipRule::Exact(30.0),
                            SkipRule::Modulo(5.0),
                        ]),
                ),
        )
        .with_range(
            RangeSpec::new()
                .with_class("hidden")
                .with_offset(150.0)
                .with_scale(
                    ScaleLevelSpec::new(16).with_extent(-20.0).with_label(
                        ScaleLabelSpec::new().with_skip([SkipRule::NotModulo(20.0)]),
                    ),
                )
                .with_scale(ScaleLevelSpec::new(2).with_extent(-16.0)),
        );

    InstrumentSpec::default()
        .with_class("airspeed")
        .with_registers([
            RegisterSpec::new(0.0, 160.0).with_accessors("setAirspeed", "getAirspeed"),
        ])
        .with_gauges([gauge])
}

/// Three-needle altimeter (0–30 000 ft) with a rotating pressure scale (975–1040 hPa).
pub fn altimeter() -> InstrumentSpec {
    let canvas = Canvas::default();
    let center = canvas.center();

    let pressure = GaugeSpec::new()
        .with_registers([1_usize])
        .with_movement(-20.0, 110.0)
        .with_indicator(IndicatorSpec::Dial(
            DialSpec::new("pressure-dial", 0.0)
                .with_face(
                    Art::default().with(ArtElement::circle("pressure-dial-face", center, 161.0)),
                )
                .with_range(
                    RangeSpec::new()
                        .with_class("hidden")
                        .with_offset(126.0)
                        .with_extent(0.0)
                        .with_scale(
                            ScaleLevelSpec::new(13)
                                .with_class("scale scale-level-1")
                                .with_extent(-12.0)
                                .with_label(
                                    ScaleLabelSpec::new()
                                        .with_class("label pressure-scale-label")
                                        .with_offset(-16.0)
                                        .with_rotation(LabelRotation::Radial),
                                ),
                        )
                        .with_scale(
                            ScaleLevelSpec::new(5)
                                .with_class("scale scale-level-2")
                                .with_offset(-3.0)
                                .with_extent(-9.0),
                        ),
                ),
        ));

    let small = |caption: &str, x: f64, y: f64| {
        LabelSpec::new(caption, Point::new(x, y)).with_class("label small")
    };
    let ten_thousands = GaugeSpec::new()
        .with_movement(90.0, 360.0)
        .with_modulo(10_000.0)
        .with_mechanics(Mechanics::Clock)
        .with_base(
            Art::face(canvas)
                .with(ArtElement::text("label scale-label", Point::new(300.0, 157.0), "2"))
                .with(ArtElement::text("label scale-label", Point::new(300.0, 250.0), "3")),
        )
        .with_indicator(IndicatorSpec::Needle(NeedleShape::Small))
        .with_label(LabelSpec::new("ALT", Point::new(200.0, 155.0)).with_class("label large"))
        .with_label(small("1000 FEET", 200.0, 130.0))
        .with_label(small("100", 180.0, 85.0))
        .with_label(small("FEET", 225.0, 85.0))
        .with_label(small("CALIBRATED", 145.0, 185.0))
        .with_label(small("TO", 145.0, 200.0))
        .with_label(small("25 000 FEET", 145.0, 215.0))
        .with_range(
            RangeSpec::new()
                .with_class("hidden")
                .with_offset(150.0)
                .with_scale(
                    ScaleLevelSpec::new(10).with_extent(-25.0).with_label(
                        ScaleLabelSpec::new()
                            .with_formatter(|v| format_number(v / 1000.0))
                            .with_skip([SkipRule::Exact(2000.0), SkipRule::Exact(3000.0)]),
                    ),
                )
                .with_scale(ScaleLevelSpec::new(5).with_extent(-20.0)),
        );

    let thousands = GaugeSpec::new()
        .with_movement(90.0, 360.0)
        .with_modulo(1_000.0)
        .with_mechanics(Mechanics::Clock);

    let mut top = Art::bezel(canvas);
    top.elements.push(ArtElement::polygon(
        "scale-glyph",
        &[
            Point::new(327.0, 200.0),
            Point::new(333.0, 194.0),
            Point::new(333.0, 206.0),
        ],
    ));

    InstrumentSpec::new(canvas)
        .with_class("altimeter")
        .with_face(None)
        .with_top(Some(top))
        .with_registers([
            RegisterSpec::new(0.0, 30_000.0).with_accessors("setAltitude", "getAltitude"),
            RegisterSpec::new(975.0, 1040.0).with_accessors("setPressure", "getPressure"),
        ])
        .with_gauges([pressure, ten_thousands, thousands])
}

/// Vertical speed indicator, ±2000 ft/min over a full turn. Inputs beyond ±1.9 are held at
/// ±1.9 so the needle never reaches the stop.
pub fn variometer() -> InstrumentSpec {
    let face = Art::new("vario-face")
        .with(ArtElement::text("label tiny left", Point::new(125.0, 184.0), "UP"))
        .with(ArtElement::text("label tiny left", Point::new(125.0, 222.0), "DOWN"));
    let gauge = GaugeSpec::new()
        .with_movement(180.0, 360.0)
        .with_base(face)
        .with_label(LabelSpec::new("VERTICAL SPEED", Point::new(200.0, 165.0)))
        .with_label(LabelSpec::new("1000 FEET PER MIN", Point::new(200.0, 235.0)))
        .with_range(
            RangeSpec::new()
                .with_class("hidden")
                .with_offset(150.0)
                .with_scale(
                    ScaleLevelSpec::new(8)
                        .with_extent(-25.0)
                        .with_skip([SkipRule::Above(1.9), SkipRule::Below(-1.9)])
                        .with_label(ScaleLabelSpec::new()),
                )
                .with_scale(ScaleLevelSpec::new(5).with_extent(-20.0))
                .with_scale(
                    ScaleLevelSpec::new(2)
                        .with_extent(-15.0)
                        .with_skip([SkipRule::Above(0.5), SkipRule::Below(-0.5)]),
                ),
        );

    InstrumentSpec::default()
        .with_class("variometer")
        .with_registers([RegisterSpec::new(-2.0, 2.0)
            .with_accessors("setVario", "getVario")
            .with_input_conversion(|v| v.clamp(-1.9, 1.9))])
        .with_gauges([gauge])
}

/// Heading indicator: a compass rose turning under a fixed aircraft symbol, plus two
/// optional beacon needles toggled with `showBeacon1` and `showBeacon2`.
pub fn heading() -> InstrumentSpec {
    let canvas = Canvas::default();
    let bearing = |set: &str, get: &str| {
        RegisterSpec::new(0.0, 360.0)
            .with_accessors(set, get)
            .with_input_conversion(wrap_degrees)
    };

    let rose = GaugeSpec::new()
        .with_movement(0.0, 360.0)
        .with_clockwise(false)
        .with_modulo(360.0)
        .with_indicator(IndicatorSpec::Dial(
            DialSpec::new("compass-rose", -90.0).with_range(
                RangeSpec::new()
                    .with_class("hidden")
                    .with_offset(150.0)
                    .with_extent(0.0)
                    .with_scale(
                        ScaleLevelSpec::new(36)
                            .with_class("heading-lines")
                            .with_extent(-40.0)
                            .with_label(
                                ScaleLabelSpec::new()
                                    .with_class("label heading-degrees")
                                    .with_offset(-60.0)
                                    .with_skip([SkipRule::NotModulo(30.0)])
                                    .with_formatter(compass_caption)
                                    .with_rotation(LabelRotation::Tangential),
                            ),
                    )
                    .with_scale(
                        ScaleLevelSpec::new(2)
                            .with_class("heading-lines")
                            .with_extent(-30.0),
                    ),
            ),
        ));

    let beacon = |register: usize, show: &str, art: Art| {
        GaugeSpec::new()
            .with_registers([register])
            .with_movement(0.0, 360.0)
            .with_visible(false)
            .with_show_name(show)
            .with_indicator(IndicatorSpec::Art(art))
    };
    let beacon_one = Art::new("heading-beacon-one").with(
        ArtElement::new(ElementKind::Path)
            .with_attribute("class", "heading-beacon-one-marker")
            .with_attribute("d", BEACON_ONE_OUTLINE),
    );
    let beacon_two = Art::new("heading-beacon-two")
        .with(ArtElement::rect(
            "heading-beacon-two-marker",
            Point::new(195.0, 120.0),
            10.0,
            150.0,
            0.0,
        ))
        .with(ArtElement::polygon(
            "heading-beacon-two-marker",
            &[
                Point::new(190.0, 120.0),
                Point::new(200.0, 80.0),
                Point::new(210.0, 120.0),
            ],
        ))
        .with(ArtElement::line(
            "heading-beacon-two-marker",
            Point::new(200.0, 270.0),
            Point::new(200.0, 325.0),
        ));

    InstrumentSpec::new(canvas)
        .with_class("heading")
        .with_top(Some(heading_markings(canvas)))
        .with_registers([
            bearing("setHeading", "getHeading"),
            bearing("setBeacon1", "getBeacon1"),
            bearing("setBeacon2", "getBeacon2"),
        ])
        .with_gauges([
            rose,
            beacon(1, "showBeacon1", beacon_one),
            beacon(2, "showBeacon2", beacon_two),
        ])
}

/// Attitude indicator: a pitch ladder translated by the first register inside a roll layer
/// rotated by the second.
pub fn attitude() -> InstrumentSpec {
    let canvas = Canvas::default();
    let center = canvas.center();
    let horizon = HorizonMechanics::default();

    let mut pitch = Art::new("attitude-pitch").with(ArtElement::line(
        "attitude-marking-scale round",
        center - Vec2::new(100.0, 0.0),
        center + Vec2::new(100.0, 0.0),
    ));
    for (degrees, half_width) in [(5.0, 12.5), (10.0, 20.0), (15.0, 12.5), (20.0, 30.0)] {
        for sign in [-1.0, 1.0] {
            let y = center.y - sign * degrees * horizon.units_per_degree;
            pitch = pitch.with(ArtElement::line(
                "attitude-marking-scale round",
                Point::new(center.x - half_width, y),
                Point::new(center.x + half_width, y),
            ));
            if half_width >= 20.0 {
                let caption = format_number(degrees);
                let dx = half_width + 15.0;
                let left = Point::new(center.x - dx, y);
                let right = Point::new(center.x + dx, y);
                pitch = pitch
                    .with(ArtElement::text("label small", left, caption.clone()))
                    .with(ArtElement::text("label small", right, caption));
            }
        }
    }

    let roll_back = Art::new("attitude-roll")
        .with(ArtElement::circle("attitude-roll-indicator", center, 150.0));
    let mut roll_front = Art::default();
    for angle in [180.0, 210.0, 240.0, 300.0, 330.0, 0.0] {
        let inner = if angle == 180.0 || angle == 0.0 { 100.0 } else { 110.0 };
        roll_front = roll_front.with(ArtElement::line(
            "attitude-marking-scale",
            vector_to_point(center, angle, 150.0),
            vector_to_point(center, angle, inner),
        ));
    }
    roll_front = roll_front.with(ArtElement::polygon(
        "attitude-marking-scale",
        &[
            Point::new(186.0, 60.0),
            Point::new(215.0, 60.0),
            Point::new(200.5, 99.0),
        ],
    ));

    let wings = Art::new("attitude-wings")
        .with(ArtElement::line(
            "attitude-marking-wings",
            Point::new(130.0, 200.0),
            Point::new(176.0, 200.0),
        ))
        .with(ArtElement::line(
            "attitude-marking-wings",
            Point::new(225.0, 200.0),
            Point::new(271.0, 200.0),
        ))
        .with(ArtElement::circle("attitude-marking-wings", center, 2.0))
        .with(ArtElement::polygon(
            "attitude-marking-wings",
            &[
                Point::new(200.0, 103.0),
                Point::new(190.0, 130.0),
                Point::new(210.0, 130.0),
            ],
        ));

    let gauge = GaugeSpec::new()
        .with_registers([0_usize, 1])
        .with_indicator(IndicatorSpec::Horizon(HorizonSpec {
            roll_back,
            pitch,
            roll_front,
        }))
        .with_top(wings)
        .with_mechanics(Mechanics::Horizon(horizon));

    InstrumentSpec::new(canvas)
        .with_class("attitude")
        .with_registers([
            RegisterSpec::new(-90.0, 90.0)
                .with_accessors("setPitch", "getPitch")
                .with_value(0.0)
                .with_input_conversion(fold_pitch),
            RegisterSpec::new(-180.0, 180.0)
                .with_accessors("setRoll", "getRoll")
                .with_value(0.0)
                .with_input_conversion(fold_roll),
        ])
        .with_gauges([gauge])
}

fn heading_markings(canvas: Canvas) -> Art {
    let c = canvas.center();
    let mut art = Art::new("heading-markings").with(ArtElement::polygon(
        "heading-aircraft",
        &[
            Point::new(c.x, c.y - 119.0),
            Point::new(c.x + 8.0, c.y - 60.0),
            Point::new(c.x + 80.0, c.y + 5.0),
            Point::new(c.x + 8.0, c.y + 5.0),
            Point::new(c.x + 5.0, c.y + 70.0),
            Point::new(c.x + 25.0, c.y + 85.0),
            Point::new(c.x - 25.0, c.y + 85.0),
            Point::new(c.x - 5.0, c.y + 70.0),
            Point::new(c.x - 8.0, c.y + 5.0),
            Point::new(c.x - 80.0, c.y + 5.0),
            Point::new(c.x - 8.0, c.y - 60.0),
        ],
    ));
    for angle in [0.0, 90.0, 180.0, 270.0_f64] {
        let tip = vector_to_point(c, angle, 132.0);
        let left = vector_to_point(c, angle - 2.6, 144.0);
        let right = vector_to_point(c, angle + 2.6, 144.0);
        art = art.with(ArtElement::polygon("heading-arrows-cardinal", &[tip, left, right]));
    }
    art
}

/// Caption for a compass rose tick: cardinal letters, otherwise tens of degrees.
fn compass_caption(value: f64) -> String {
    let cardinal = [(0.0, "N"), (90.0, "E"), (180.0, "S"), (270.0, "W")]
        .into_iter()
        .find(|(bearing, _)| *bearing == value);
    match cardinal {
        Some((_, letter)) => String::from(letter),
        None => format_number(value / 10.0),
    }
}

/// Wraps any bearing into `0..360`.
fn wrap_degrees(value: f64) -> f64 {
    let v = value % 360.0;
    if v < 0.0 { v + 360.0 } else { v }
}

fn fold_pitch(value: f64) -> f64 {
    let v = value % 180.0;
    if v < -90.0 {
        180.0 + v
    } else if v > 90.0 {
        v - 180.0
    } else {
        v
    }
}

fn fold_roll(value: f64) -> f64 {
    let v = value % 360.0;
    if v < -180.0 {
        360.0 + v
    } else if v > 180.0 {
        v - 360.0
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::test_surface::Recorder;

    #[test]
    fn every_preset_builds() {
        for (name, spec) in all() {
            let instrument = spec.build(Recorder::default());
            assert!(instrument.is_ok(), "{name}: {:?}", instrument.err());
        }
    }

    #[test]
    fn airspeed_tick_hierarchy() {
        let instrument = airspeed().build(Recorder::default()).unwrap();
        let surface = instrument.surface().unwrap();
        assert_eq!(surface.count_class("scale scale-level-0"), 17);
        assert_eq!(surface.count_class("scale scale-level-1"), 16);
        assert_eq!(surface.count_class("scale scale-level-2"), 6);
        assert_eq!(surface.count_class("label scale-label"), 9);
    }

    #[test]
    fn compass_captions() {
        let captions: Vec<String> = [0.0, 30.0, 90.0, 180.0, 270.0, 330.0]
            .into_iter()
            .map(compass_caption)
            .collect();
        assert_eq!(captions, ["N", "3", "E", "S", "W", "33"]);
    }

    #[test]
    fn heading_conversion_wraps() {
        let instrument = heading().build(Recorder::default()).unwrap();
        assert_eq!(instrument.set("setHeading", -90.0), Ok(270.0));
        assert_eq!(instrument.set("setHeading", 725.0), Ok(5.0));
        assert_eq!(instrument.set("setBeacon2", 360.0), Ok(0.0));
    }

    #[test]
    fn attitude_folds_out_of_range_inputs() {
        assert_eq!(fold_pitch(100.0), -80.0);
        assert_eq!(fold_pitch(-100.0), 80.0);
        assert_eq!(fold_pitch(45.0), 45.0);
        assert_eq!(fold_roll(190.0), -170.0);
        assert_eq!(fold_roll(-540.0), -180.0);
    }

    #[test]
    fn variometer_setter_stops_short_of_the_limit() {
        let instrument = variometer().build(Recorder::default()).unwrap();
        assert_eq!(instrument.set("setVario", 5.0), Ok(1.9));
        assert_eq!(instrument.set("setVario", -0.5), Ok(-0.5));
        let surface = instrument.surface().unwrap();
        // Seven major labels: -1.5 through 1.5.
        assert_eq!(surface.count_class("label scale-label"), 7);
    }
}
