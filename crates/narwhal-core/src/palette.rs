//! Color parsing and deterministic palette generation.
//!
//! Palettes are produced by evenly sampling hue around the primary color, so they never depend
//! on randomness or on record contents (only on the count).

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Rgb01 {
    r: f64,
    g: f64,
    b: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Hsl {
    h_deg: f64,
    s_pct: f64,
    l_pct: f64,
}

/// Saturation/lightness used when the primary color is achromatic (hue sampling would
/// otherwise yield N identical greys).
const FALLBACK_S_PCT: f64 = 70.0;
const FALLBACK_L_PCT: f64 = 50.0;

const NAMED_COLORS: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("white", "#ffffff"),
    ("red", "#ff0000"),
    ("green", "#008000"),
    ("blue", "#0000ff"),
    ("yellow", "#ffff00"),
    ("orange", "#ffa500"),
    ("purple", "#800080"),
    ("teal", "#008080"),
    ("navy", "#000080"),
    ("gray", "#808080"),
    ("grey", "#808080"),
    ("silver", "#c0c0c0"),
    ("maroon", "#800000"),
    ("olive", "#808000"),
    ("lime", "#00ff00"),
    ("aqua", "#00ffff"),
    ("fuchsia", "#ff00ff"),
];

fn round_1e10(v: f64) -> f64 {
    let v = (v * 1e10).round() / 1e10;
    if v == -0.0 { 0.0 } else { v }
}

fn parse_hex_rgb01(s: &str) -> Option<Rgb01> {
    let hex = s.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let (r, g, b) = match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            (r, g, b)
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            (r, g, b)
        }
        _ => return None,
    };
    Some(Rgb01 {
        r: (r as f64) / 255.0,
        g: (g as f64) / 255.0,
        b: (b as f64) / 255.0,
    })
}

pub(crate) fn parse_color(s: &str) -> Option<Rgb01> {
    let s = s.trim();
    if s.starts_with('#') {
        return parse_hex_rgb01(s);
    }
    let lower = s.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .and_then(|(_, hex)| parse_hex_rgb01(hex))
}

/// Returns true for `#rgb`, `#rrggbb` and the small set of CSS color keywords we understand.
pub fn is_valid_color(s: &str) -> bool {
    parse_color(s).is_some()
}

/// Normalizes a color to lowercase `#rrggbb`.
pub fn normalize_color(s: &str) -> Option<String> {
    parse_color(s).map(rgb01_to_hex)
}

fn rgb01_to_hex(rgb: Rgb01) -> String {
    let r = (rgb.r.clamp(0.0, 1.0) * 255.0).round() as i64;
    let g = (rgb.g.clamp(0.0, 1.0) * 255.0).round() as i64;
    let b = (rgb.b.clamp(0.0, 1.0) * 255.0).round() as i64;
    format!(
        "#{:02x}{:02x}{:02x}",
        r.clamp(0, 255),
        g.clamp(0, 255),
        b.clamp(0, 255)
    )
}

pub(crate) fn rgb01_to_hsl(rgb: Rgb01) -> Hsl {
    let r = rgb.r;
    let g = rgb.g;
    let b = rgb.b;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl {
            h_deg: 0.0,
            s_pct: 0.0,
            l_pct: round_1e10(l * 100.0),
        };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let mut h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    h /= 6.0;

    Hsl {
        h_deg: round_1e10(h * 360.0),
        s_pct: round_1e10(s * 100.0).clamp(0.0, 100.0),
        l_pct: round_1e10(l * 100.0).clamp(0.0, 100.0),
    }
}

fn hsl_to_rgb01(hsl: Hsl) -> Rgb01 {
    let h = (hsl.h_deg / 360.0).rem_euclid(1.0);
    let s = (hsl.s_pct / 100.0).clamp(0.0, 1.0);
    let l = (hsl.l_pct / 100.0).clamp(0.0, 1.0);

    if s == 0.0 {
        return Rgb01 { r: l, g: l, b: l };
    }

    fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        if t < 1.0 / 6.0 {
            return p + (q - p) * 6.0 * t;
        }
        if t < 1.0 / 2.0 {
            return q;
        }
        if t < 2.0 / 3.0 {
            return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
        }
        p
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;
    Rgb01 {
        r: hue_to_rgb(p, q, h + 1.0 / 3.0),
        g: hue_to_rgb(p, q, h),
        b: hue_to_rgb(p, q, h - 1.0 / 3.0),
    }
}

/// Generates `n` colors by stepping the hue of `base` in `360 / n` degree increments.
///
/// The first entry is `base` itself (normalized to `#rrggbb`). Unparseable bases fall back to
/// the default primary color.
pub fn generate_palette(base: &str, n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }

    let rgb = parse_color(base)
        .or_else(|| parse_color(crate::style::DEFAULT_PRIMARY_COLOR))
        .unwrap_or(Rgb01 {
            r: 0.0,
            g: 0.0,
            b: 0.0,
        });
    let mut hsl = rgb01_to_hsl(rgb);
    let achromatic = hsl.s_pct < 1e-6;
    if achromatic {
        hsl.s_pct = FALLBACK_S_PCT;
        hsl.l_pct = FALLBACK_L_PCT;
    }

    let step = 360.0 / n as f64;
    (0..n)
        .map(|i| {
            if i == 0 && !achromatic {
                return rgb01_to_hex(rgb);
            }
            let h_deg = round_1e10((hsl.h_deg + step * i as f64).rem_euclid(360.0));
            rgb01_to_hex(hsl_to_rgb01(Hsl { h_deg, ..hsl }))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_through_hsl() {
        for hex in ["#2563eb", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6"] {
            let rgb = parse_color(hex).unwrap();
            assert_eq!(rgb01_to_hex(hsl_to_rgb01(rgb01_to_hsl(rgb))), hex);
        }
    }

    #[test]
    fn short_hex_and_named_colors_parse() {
        assert_eq!(normalize_color("#fff").as_deref(), Some("#ffffff"));
        assert_eq!(normalize_color(" Navy ").as_deref(), Some("#000080"));
        assert_eq!(normalize_color("#12345").as_deref(), None);
        assert_eq!(normalize_color("#gggggg").as_deref(), None);
        assert_eq!(normalize_color("not-a-color").as_deref(), None);
    }

    #[test]
    fn palette_starts_at_base_and_has_distinct_hues() {
        let palette = generate_palette("#2563eb", 4);
        assert_eq!(palette.len(), 4);
        assert_eq!(palette[0], "#2563eb");
        for i in 0..palette.len() {
            for j in (i + 1)..palette.len() {
                assert_ne!(palette[i], palette[j]);
            }
        }
    }

    #[test]
    fn palette_is_deterministic() {
        assert_eq!(generate_palette("#2563eb", 7), generate_palette("#2563eb", 7));
        assert!(generate_palette("#2563eb", 0).is_empty());
    }

    #[test]
    fn achromatic_base_still_yields_distinct_colors() {
        let palette = generate_palette("#808080", 3);
        assert_ne!(palette[0], palette[1]);
        assert_ne!(palette[1], palette[2]);
    }

    #[test]
    fn half_turn_of_blue_is_yellow() {
        // #0000ff rotated by 180 degrees is pure yellow.
        let palette = generate_palette("#0000ff", 2);
        assert_eq!(palette, vec!["#0000ff".to_string(), "#ffff00".to_string()]);
    }
}
