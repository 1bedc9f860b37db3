// Number and text formatting shared by the SVG document builder and serializers.

pub(crate) fn fmt(v: f64) -> String {
    // Shortest round-trippable decimal, without `-0` and without tiny float noise from our own
    // arithmetic (e.g. `8.399999999999999` for a 4% margin on 210mm).
    if !v.is_finite() {
        return "0".to_string();
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let scaled = v * 1e6;
    let nearest = scaled.round();
    if (scaled - nearest).abs() < 1e-6 {
        v = nearest / 1e6;
    }
    let s = v.to_string();
    if s == "-0" { "0".to_string() } else { s }
}

pub(crate) fn mm(v: f64) -> String {
    format!("{}mm", fmt(v))
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
