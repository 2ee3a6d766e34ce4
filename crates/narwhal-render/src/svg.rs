use crate::model::{
    ArcPrimitive, CirclePrimitive, LinePrimitive, Primitive, RectPrimitive, RenderedDocument,
    Stroke, TextPrimitive,
};
use std::fmt::Write as _;

pub const DEFAULT_DOCUMENT_ID: &str = "narwhal";

#[derive(Debug, Clone, Default)]
pub struct SvgRenderOptions {
    /// Root element id; also namespaces the arrow marker id. Sanitized before use.
    pub document_id: Option<String>,
}

impl SvgRenderOptions {
    pub fn with_document_id(id: impl Into<String>) -> Self {
        Self {
            document_id: Some(id.into()),
        }
    }
}

/// Makes `raw` usable as an XML id:
/// - trims whitespace
/// - replaces unsupported characters with `-`
/// - ensures the id starts with an ASCII letter by prefixing `n-` when needed
pub fn sanitize_svg_id(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return DEFAULT_DOCUMENT_ID.to_string();
    }

    let mut out = String::with_capacity(raw.len() + 2);
    for ch in raw.chars() {
        let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '.';
        out.push(if ok { ch } else { '-' });
    }

    if !out.starts_with(|c: char| c.is_ascii_alphabetic()) {
        out.insert_str(0, "n-");
    }
    while out.contains("--") {
        out = out.replace("--", "-");
    }
    let out = out.trim_matches('-');
    if out.is_empty() || out == "n" {
        return DEFAULT_DOCUMENT_ID.to_string();
    }
    out.to_string()
}

/// Escapes markup characters and replaces code points XML 1.0 cannot carry with U+FFFD.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\t' | '\n' | '\r' => out.push(ch),
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => out.push('\u{fffd}'),
            _ => out.push(ch),
        }
    }
    out
}

/// Attribute number: snaps float noise, never prints `-0`, integers have no fraction.
pub fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    if v == -0.0 {
        v = 0.0;
    }
    format!("{v}")
}

/// Path data number: rounded to 3 decimals with trailing zeros trimmed.
pub fn fmt_path(v: f64) -> String {
    if !v.is_finite() || v.abs() < 0.0005 {
        return "0".to_string();
    }
    let k = (v * 1000.0).round() as i64;
    if k == 0 {
        return "0".to_string();
    }
    let sign = if k < 0 { "-" } else { "" };
    let abs = k.unsigned_abs();
    let int_part = abs / 1000;
    let frac = abs % 1000;
    if frac == 0 {
        return format!("{sign}{int_part}");
    }
    let frac = format!("{frac:03}");
    format!("{sign}{int_part}.{}", frac.trim_end_matches('0'))
}

/// Serializes `doc` as a standalone SVG document, one element per primitive in paint order.
pub fn render_svg(doc: &RenderedDocument, options: &SvgRenderOptions) -> String {
    let id = sanitize_svg_id(options.document_id.as_deref().unwrap_or(DEFAULT_DOCUMENT_ID));
    let marker_id = format!("{id}-arrowhead");
    let (w, h) = doc.viewport();

    let mut out = String::new();
    let _ = writeln!(
        &mut out,
        r#"<svg id="{}" xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}" role="img" aria-label="{}" font-family="{}">"#,
        escape_xml(&id),
        fmt(w),
        fmt(h),
        fmt(w),
        fmt(h),
        escape_xml(doc.title()),
        escape_xml(doc.font_family()),
    );

    let arrow_color = doc.primitives().iter().find_map(|p| match p {
        Primitive::Line(l) if l.arrow => Some(l.stroke.color.as_str()),
        _ => None,
    });
    if let Some(color) = arrow_color {
        let _ = writeln!(
            &mut out,
            r#"<defs><marker id="{}" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="8" markerHeight="8" orient="auto-start-reverse"><path d="M 0 0 L 10 5 L 0 10 z" fill="{}"/></marker></defs>"#,
            escape_xml(&marker_id),
            escape_xml(color),
        );
    }

    for primitive in doc.primitives() {
        match primitive {
            Primitive::Rect(p) => write_rect(&mut out, p),
            Primitive::Circle(p) => write_circle(&mut out, p),
            Primitive::PathArc(p) => write_arc(&mut out, p),
            Primitive::Line(p) => write_line(&mut out, p, &marker_id),
            Primitive::Text(p) => write_text(&mut out, p),
        }
        out.push('\n');
    }
    out.push_str("</svg>\n");
    out
}

fn write_stroke(out: &mut String, stroke: Option<&Stroke>) {
    if let Some(s) = stroke {
        let _ = write!(
            out,
            r#" stroke="{}" stroke-width="{}""#,
            escape_xml(&s.color),
            fmt(s.width)
        );
    }
}

fn write_rect(out: &mut String, p: &RectPrimitive) {
    let _ = write!(
        out,
        r#"<rect class="{}" x="{}" y="{}" width="{}" height="{}""#,
        p.class,
        fmt(p.x),
        fmt(p.y),
        fmt(p.width.max(0.0)),
        fmt(p.height.max(0.0)),
    );
    if p.rx > 0.0 {
        let _ = write!(out, r#" rx="{}""#, fmt(p.rx));
    }
    match p.fill.as_deref() {
        Some(fill) => {
            let _ = write!(out, r#" fill="{}""#, escape_xml(fill));
        }
        None => out.push_str(r#" fill="none""#),
    }
    write_stroke(out, p.stroke.as_ref());
    out.push_str("/>");
}

fn write_circle(out: &mut String, p: &CirclePrimitive) {
    let _ = write!(
        out,
        r#"<circle class="{}" cx="{}" cy="{}" r="{}" fill="{}""#,
        p.class,
        fmt(p.cx),
        fmt(p.cy),
        fmt(p.r),
        escape_xml(&p.fill),
    );
    write_stroke(out, p.stroke.as_ref());
    out.push_str("/>");
}

/// Path data for a pie wedge. A sweep of a full turn cannot be expressed as one SVG arc, so it
/// is drawn as two half-circle arcs.
pub fn arc_path_data(p: &ArcPrimitive) -> String {
    let point = |angle: f64| {
        let (dx, dy) = crate::pie::polar_xy(p.r, angle);
        (p.cx + dx, p.cy + dy)
    };
    let (x0, y0) = point(p.start_angle);
    let r = fmt_path(p.r);

    if p.sweep() >= 360.0 - 1e-9 {
        let (xm, ym) = point(p.start_angle + 180.0);
        return format!(
            "M {},{} A {r},{r} 0 1,1 {},{} A {r},{r} 0 1,1 {},{} Z",
            fmt_path(x0),
            fmt_path(y0),
            fmt_path(xm),
            fmt_path(ym),
            fmt_path(x0),
            fmt_path(y0),
        );
    }

    let (x1, y1) = point(p.end_angle);
    let large = if p.sweep() > 180.0 { 1 } else { 0 };
    format!(
        "M {},{} L {},{} A {r},{r} 0 {large},1 {},{} Z",
        fmt_path(p.cx),
        fmt_path(p.cy),
        fmt_path(x0),
        fmt_path(y0),
        fmt_path(x1),
        fmt_path(y1),
    )
}

fn write_arc(out: &mut String, p: &ArcPrimitive) {
    let _ = write!(
        out,
        r#"<path class="{}" d="{}" fill="{}""#,
        p.class,
        arc_path_data(p),
        escape_xml(&p.fill),
    );
    write_stroke(out, p.stroke.as_ref());
    out.push_str("/>");
}

fn write_line(out: &mut String, p: &LinePrimitive, marker_id: &str) {
    let _ = write!(
        out,
        r#"<line class="{}" x1="{}" y1="{}" x2="{}" y2="{}""#,
        p.class,
        fmt(p.x1),
        fmt(p.y1),
        fmt(p.x2),
        fmt(p.y2),
    );
    write_stroke(out, Some(&p.stroke));
    if p.arrow {
        let _ = write!(out, r#" marker-end="url(#{})""#, escape_xml(marker_id));
    }
    out.push_str("/>");
}

fn write_text(out: &mut String, p: &TextPrimitive) {
    let _ = write!(
        out,
        r#"<text class="{}" x="{}" y="{}" text-anchor="{}" font-size="{}""#,
        p.class,
        fmt(p.x),
        fmt(p.y),
        p.anchor.as_svg(),
        fmt(p.font_size),
    );
    if let Some(weight) = p.font_weight {
        let _ = write!(out, r#" font-weight="{weight}""#);
    }
    let _ = write!(out, r#" fill="{}">{}</text>"#, escape_xml(&p.fill), escape_xml(&p.content));
}
