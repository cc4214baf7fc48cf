// Copyright 2025 the Gaugekit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Preset instruments built onto an `SvgDocument` and driven through their accessors.

use gaugekit::{
    BuildError, GaugeSpec, Instrument, InstrumentError, InstrumentSpec, Mechanics, NodeId,
    RangeError, RangeSpec, RegisterSpec, ScaleLevelSpec, presets,
};
use gaugekit_svg::SvgDocument;

fn build(spec: InstrumentSpec) -> Instrument<SvgDocument> {
    spec.build(SvgDocument::new())
        .unwrap_or_else(|e| panic!("build failed: {e}"))
}

fn transform_of(instrument: &Instrument<SvgDocument>, class: &str) -> Vec<String> {
    let doc = instrument.surface().unwrap();
    doc.find_by_class(class)
        .into_iter()
        .filter_map(|id| doc.attribute(id, "transform").map(String::from))
        .collect()
}

fn display_of(instrument: &Instrument<SvgDocument>, group: NodeId) -> Option<String> {
    let doc = instrument.surface().unwrap();
    doc.attribute(group, "display").map(String::from)
}

#[test]
fn airspeed_needle_follows_the_register() {
    let airspeed = build(presets::airspeed());
    assert_eq!(
        transform_of(&airspeed, "needle-standard"),
        ["rotate(90 200 200)"],
        "starts at the minimum"
    );
    assert_eq!(airspeed.set("setAirspeed", 80.0), Ok(80.0));
    assert_eq!(transform_of(&airspeed, "needle-standard"), ["rotate(250 200 200)"]);
    assert_eq!(airspeed.get("getAirspeed"), Ok(80.0));

    assert_eq!(airspeed.set("setAirspeed", 500.0), Ok(160.0));
    assert_eq!(transform_of(&airspeed, "needle-standard"), ["rotate(410 200 200)"]);
}

#[test]
fn airspeed_draws_the_tick_hierarchy() {
    let airspeed = build(presets::airspeed());
    let doc = airspeed.surface().unwrap();
    assert_eq!(doc.find_by_class("scale-level-0").len(), 17);
    assert_eq!(doc.find_by_class("scale-level-1").len(), 16);
    assert_eq!(doc.find_by_class("scale-level-2").len(), 6);

    let labels: Vec<&str> = doc
        .find_by_class("scale-label")
        .into_iter()
        .filter_map(|id| doc.text(id))
        .collect();
    assert_eq!(
        labels,
        ["0", "20", "40", "60", "80", "100", "120", "140", "160"]
    );

    let bands = doc.find_by_class("range");
    assert_eq!(bands.len(), 3, "colored bands only");
    assert_eq!(doc.attribute(bands[0], "fill"), Some("#007511"));
}

#[test]
fn altimeter_hands_wrap_like_a_clock() {
    let altimeter = build(presets::altimeter());
    altimeter.set("setAltitude", 25_400.0).unwrap();
    assert_eq!(transform_of(&altimeter, "needle-small"), ["rotate(284.4 200 200)"]);
    assert_eq!(transform_of(&altimeter, "needle-standard"), ["rotate(234 200 200)"]);

    altimeter.set("setAltitude", 10_000.0).unwrap();
    assert_eq!(transform_of(&altimeter, "needle-small"), ["rotate(90 200 200)"]);
}

#[test]
fn altimeter_pressure_dial_turns_under_the_pointer() {
    let altimeter = build(presets::altimeter());
    let doc = altimeter.surface().unwrap();
    let labels: Vec<&str> = doc
        .find_by_class("pressure-scale-label")
        .into_iter()
        .filter_map(|id| doc.text(id))
        .collect();
    assert_eq!(labels.len(), 14);
    assert_eq!(labels.first(), Some(&"975"));
    assert_eq!(labels.last(), Some(&"1040"));
    drop(doc);

    // 975 sits under the pointer at the start of travel.
    assert_eq!(transform_of(&altimeter, "pressure-dial"), ["rotate(-20 200 200)"]);
    altimeter.set("setPressure", 1013.0).unwrap();
    let expected = -20.0 + 38.0 * 110.0 / 65.0;
    let actual = transform_of(&altimeter, "pressure-dial");
    let degrees: f64 = actual[0]
        .trim_start_matches("rotate(")
        .split(' ')
        .next()
        .and_then(|d| d.parse().ok())
        .unwrap();
    assert!((degrees - expected).abs() < 1e-3, "{degrees} vs {expected}");
}

#[test]
fn attitude_translates_pitch_inside_roll() {
    let attitude = build(presets::attitude());
    attitude.set("setPitch", 10.0).unwrap();
    attitude.set("setRoll", 30.0).unwrap();
    assert_eq!(transform_of(&attitude, "attitude-pitch"), ["translate(0 27)"]);
    assert_eq!(transform_of(&attitude, "attitude-roll"), ["rotate(30 200 200)"]);

    // Pitch travel stops at 32 degrees.
    attitude.set("setPitch", 60.0).unwrap();
    assert_eq!(transform_of(&attitude, "attitude-pitch"), ["translate(0 86.4)"]);

    // Out-of-range roll folds back into -180..180.
    assert_eq!(attitude.set("setRoll", 190.0), Ok(-170.0));
}

#[test]
fn heading_rose_turns_against_the_heading() {
    let heading = build(presets::heading());
    heading.set("setHeading", 90.0).unwrap();
    assert_eq!(transform_of(&heading, "compass-rose"), ["rotate(-90 200 200)"]);

    let doc = heading.surface().unwrap();
    assert_eq!(doc.find_by_class("heading-lines").len(), 72);
    let captions: Vec<&str> = doc
        .find_by_class("heading-degrees")
        .into_iter()
        .filter_map(|id| doc.text(id))
        .collect();
    assert_eq!(
        captions,
        ["N", "3", "6", "E", "12", "15", "S", "21", "24", "W", "30", "33"]
    );
}

#[test]
fn beacons_start_hidden_and_toggle() {
    let heading = build(presets::heading());
    let beacon_one = heading.gauge_groups()[1];
    let beacon_two = heading.gauge_groups()[2];
    assert_eq!(display_of(&heading, beacon_one).as_deref(), Some("none"));

    heading.show("showBeacon1", true).unwrap();
    assert_eq!(display_of(&heading, beacon_one), None);
    assert_eq!(display_of(&heading, beacon_two).as_deref(), Some("none"));

    heading.show("showBeacon1", false).unwrap();
    assert_eq!(display_of(&heading, beacon_one).as_deref(), Some("none"));

    assert_eq!(
        heading.show("showBeacon3", true),
        Err(InstrumentError::UnknownAccessor("showBeacon3".into()))
    );
}

#[test]
fn variometer_clamps_its_setter() {
    let vario = build(presets::variometer());
    assert_eq!(vario.set("setVario", 3.0), Ok(1.9));
    assert_eq!(transform_of(&vario, "needle-standard"), ["rotate(531 200 200)"]);
    assert_eq!(vario.set("setVario", 0.0), Ok(0.0));
    assert_eq!(transform_of(&vario, "needle-standard"), ["rotate(360 200 200)"]);
}

#[test]
fn serialized_document_is_self_contained() {
    let airspeed = build(presets::airspeed());
    airspeed.set("setAirspeed", 80.0).unwrap();
    let svg = airspeed.surface().unwrap().to_svg_string();
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" class=\"airspeed\""));
    assert!(svg.contains("viewBox=\"0 0 400 400\""));
    assert!(svg.contains("<style>"));
    assert!(svg.contains(">AIR SPEED</text>"));
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn configuration_errors_are_reported() {
    let clock_without_modulo = InstrumentSpec::default()
        .with_gauges([GaugeSpec::new().with_mechanics(Mechanics::Clock)]);
    assert_eq!(
        clock_without_modulo.build(SvgDocument::new()).err(),
        Some(BuildError::MissingModulo { gauge: 0 })
    );

    let zero_divisions = InstrumentSpec::default().with_gauges([
        GaugeSpec::new().with_range(RangeSpec::new().with_scale(ScaleLevelSpec::new(0)))
    ]);
    assert_eq!(
        zero_divisions.build(SvgDocument::new()).err(),
        Some(BuildError::Range {
            gauge: 0,
            range: 0,
            source: RangeError::ZeroDivisions { level: 0 },
        })
    );

    let missing_register =
        InstrumentSpec::default().with_gauges([GaugeSpec::new().with_registers([3_usize])]);
    assert!(matches!(
        missing_register.build(SvgDocument::new()),
        Err(BuildError::UnknownRegister { gauge: 0, .. })
    ));

    let reversed = InstrumentSpec::default().with_registers([RegisterSpec::new(10.0, 0.0)]);
    assert!(matches!(
        reversed.build(SvgDocument::new()),
        Err(BuildError::InvalidRegisterBounds { register: 0, .. })
    ));
}
