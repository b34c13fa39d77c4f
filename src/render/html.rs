//! HTML emission for print and preview surfaces.
//!
//! The output is a standalone document handed to a browser print dialog.
//! On print surfaces the background image is emitted with an inline
//! `opacity:0` as well as a print media rule, so a driver that ignores
//! stylesheets still transfers nothing but the field text to the paper.

use std::fmt::Write;

use super::{PlacedText, PrintSurface, RenderTarget};

/// Render a surface as a complete HTML document.
///
/// Output depends only on the surface, so rendering the same inputs twice
/// gives byte-identical documents.
pub fn to_html(surface: &PrintSurface) -> String {
    let unit = surface.unit.as_str();
    let font_family = css_value(&surface.font_family);
    let mut out = String::with_capacity(2048 + surface.items.len() * 192);

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape(&surface.title));
    out.push_str("<style>\n");
    if let Some(page) = surface.page {
        let _ = writeln!(out, "@page {{ size: {}; margin: 0; }}", page);
    }
    let _ = writeln!(
        out,
        "body {{ margin: 0; padding: 0; font-family: {}; }}",
        font_family
    );
    let _ = writeln!(
        out,
        ".print-container {{ position: relative; width: {}{unit}; height: {}{unit}; overflow: hidden; }}",
        surface.size.width, surface.size.height
    );
    out.push_str(
        ".template-bg { position: absolute; top: 0; left: 0; width: 100%; height: 100%; object-fit: contain; }\n",
    );
    out.push_str(".field { position: absolute; white-space: nowrap; }\n");
    if surface.target == RenderTarget::Print {
        out.push_str("@media print { .template-bg { opacity: 0 !important; } }\n");
    }
    out.push_str("</style>\n</head>\n<body>\n<div class=\"print-container\">\n");

    if let Some(bg) = &surface.background {
        let opacity = if surface.target == RenderTarget::Print {
            0.0
        } else {
            bg.opacity
        };
        let _ = writeln!(
            out,
            "<img class=\"template-bg\" src=\"{}\" alt=\"\" style=\"opacity:{}\">",
            escape(&bg.data_url),
            opacity
        );
    }

    for item in &surface.items {
        write_field(&mut out, item);
    }

    out.push_str("</div>\n</body>\n</html>\n");
    out
}

fn write_field(out: &mut String, item: &PlacedText) {
    let _ = writeln!(
        out,
        "<div class=\"field\" data-field=\"{}\" style=\"left:{}%;top:{}%;font-size:{}px;font-weight:{};text-align:{};transform:{}\">{}</div>",
        escape(&item.id),
        item.x,
        item.y,
        item.font_size,
        item.font_weight.as_str(),
        item.align.as_str(),
        item.align.css_transform(),
        escape(&item.text)
    );
}

/// Escape text for HTML content and attribute values.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Strip characters that could end a CSS declaration or the style block.
fn css_value(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '<' | '>' | '{' | '}' | ';'))
        .collect()
}
