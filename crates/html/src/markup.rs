//! Scene to HTML serialisation.

use std::fmt::Write;

use crate::core::{Element, ElementKind, Frame, Scene, ShadowLayer};

/// Escape text for element content and double-quoted attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// CSS pixel length with at most three decimals and no trailing zeros.
fn px(v: f64) -> String {
    let v = if v.is_finite() { v } else { 0.0 };
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0px".to_string(),
        _ => format!("{s}px"),
    }
}

fn shadow(layer: &ShadowLayer) -> String {
    format!(
        "{}{} {} {} {} {}",
        if layer.inset { "inset " } else { "" },
        px(layer.offset_x),
        px(layer.offset_y),
        px(layer.blur),
        px(layer.spread),
        escape(layer.color.as_str()),
    )
}

/// The full markup for `scene`: the padded board, then every element in
/// scene order.
pub fn scene_markup(scene: &Scene) -> String {
    let mut out = String::new();
    open_frame(&mut out, &scene.frame);
    for element in &scene.elements {
        write_element(&mut out, &scene.frame, element);
    }
    out.push_str("</div>\n</div>\n");
    out
}

fn open_frame(out: &mut String, frame: &Frame) {
    let background = escape(frame.background.as_str());
    let _ = writeln!(
        out,
        "<div class=\"arena\" style=\"width: 100%; background: {background}; color: {}; padding: {};\">",
        escape(frame.foreground.as_str()),
        px(frame.padding),
    );
    let _ = writeln!(
        out,
        "<div class=\"board\" style=\"width: {}; height: {}; border: {} solid {}; background: {background}; position: relative;\">",
        px(frame.width),
        px(frame.height),
        px(frame.border.width),
        escape(frame.border.color.as_str()),
    );
}

fn write_element(out: &mut String, frame: &Frame, e: &Element) {
    let border = e.border();
    let class = match e.kind {
        ElementKind::Player => "player",
        ElementKind::Fruit => "fruit",
    };

    let _ = write!(
        out,
        "<div id=\"{}\" class=\"{class}\" style=\"position: absolute; top: {}; left: {}; width: {}; height: {}; border: {} solid {}; border-radius: 50%;",
        escape(&e.key),
        px(e.bounds.y),
        px(e.bounds.x),
        px(e.bounds.width),
        px(e.bounds.height),
        px(border.width),
        escape(border.color.as_str()),
    );

    if let Some(label) = &e.label {
        let _ = write!(
            out,
            " display: flex; align-items: center; justify-content: center; color: {}; font-size: {};",
            escape(frame.foreground.as_str()),
            px(label.font_size),
        );
    }

    let shadows: Vec<String> = e.glow_layers().map(shadow).collect();
    if !shadows.is_empty() {
        let _ = write!(out, " box-shadow: {};", shadows.join(", "));
    }
    out.push_str("\">");

    if let Some(label) = &e.label {
        let drop = label.anchor.y - e.bounds.center().y;
        let _ = write!(
            out,
            "<span style=\"position: relative; bottom: -{};\">{}</span>",
            px(drop),
            escape(&label.text),
        );
    }
    out.push_str("</div>\n");
}

/// A standalone page: `stylesheet` inlined, `body` inside the root
/// container the renderer owns.
pub fn document(stylesheet: Option<&str>, body: &str) -> String {
    let mut out = String::from(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>arena</title>\n",
    );
    if let Some(css) = stylesheet {
        // `</` would end the style element early.
        let _ = writeln!(out, "<style>\n{}\n</style>", css.replace("</", "<\\/"));
    }
    let _ = write!(
        out,
        "</head>\n<body>\n<div id=\"arena-root\">\n{body}</div>\n</body>\n</html>\n"
    );
    out
}
