// Copyright 2025 the Gaugekit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders every preset instrument to SVG.
//!
//! Usage: `gaugekit_demo [OUT_DIR]` (default `gaugekit_demo_out`). Writes one `<name>.svg` per
//! instrument plus an `index.html` showing them side by side. Set `RUST_LOG=debug` to see the
//! build log.

mod html;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use gaugekit::presets;
use gaugekit_svg::SvgDocument;

/// Register values each preset is driven to before it is dumped.
fn sample_values(name: &str) -> &'static [(&'static str, f64)] {
    match name {
        "airspeed" => &[("setAirspeed", 80.0)],
        "altimeter" => &[("setAltitude", 25_400.0), ("setPressure", 1013.0)],
        "variometer" => &[("setVario", 0.7)],
        "heading" => &[("setHeading", 35.0), ("setBeacon1", 70.0), ("setBeacon2", 300.0)],
        "attitude" => &[("setPitch", 10.0), ("setRoll", 30.0)],
        _ => &[],
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let out_dir = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from("gaugekit_demo_out"), PathBuf::from);
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut sections = Vec::new();
    for (name, spec) in presets::all() {
        let instrument = spec
            .build(SvgDocument::new())
            .with_context(|| format!("building the {name} preset"))?;
        let mut caption = Vec::new();
        for &(accessor, value) in sample_values(name) {
            let applied = instrument.set(accessor, value)?;
            caption.push(format!("{accessor}({applied})"));
        }
        if name == "heading" {
            instrument.show("showBeacon1", true)?;
            instrument.show("showBeacon2", true)?;
        }

        let svg = instrument.surface()?.to_svg_string();
        let path = out_dir.join(format!("{name}.svg"));
        fs::write(&path, &svg).with_context(|| format!("writing {}", path.display()))?;
        log::info!("wrote {}", path.display());

        sections.push(html::Section {
            title: name.to_owned(),
            caption: caption.join(" "),
            svg,
        });
    }

    let index = out_dir.join("index.html");
    fs::write(&index, html::render_report("gaugekit presets", &sections))
        .with_context(|| format!("writing {}", index.display()))?;
    log::info!("wrote {}", index.display());
    Ok(())
}
