// Copyright 2025 the Gaugekit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-page HTML report with the rendered instruments inlined.

use std::fmt::Write as _;

/// One rendered instrument.
#[derive(Debug)]
pub(crate) struct Section {
    pub(crate) title: String,
    pub(crate) caption: String,
    pub(crate) svg: String,
}

pub(crate) fn render_report(title: &str, sections: &[Section]) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>\nbody {{ font-family: sans-serif; background: #eee; }}\n\
         .grid {{ display: flex; flex-wrap: wrap; gap: 24px; }}\n\
         figure {{ margin: 0; width: 320px; height: 360px; }}\n\
         figure > svg {{ width: 320px; height: 320px; }}\n</style>\n</head>\n<body>\n\
         <h1>{title}</h1>\n<div class=\"grid\">\n"
    );
    for section in sections {
        out.push_str("<figure>\n");
        out.push_str(&section.svg);
        let _ = writeln!(
            out,
            "<figcaption><b>{}</b> {}</figcaption>\n</figure>",
            section.title, section.caption
        );
    }
    out.push_str("</div>\n</body>\n</html>\n");
    out
}
