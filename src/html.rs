// Small helpers shared by the summary and details sections.

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// `35` for whole percentages, `35.5` otherwise.
pub fn fmt_percent(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}

pub fn bold(inner: &str) -> String {
    format!("<b>{}</b>", inner)
}

pub fn font(color: &str, inner: &str) -> String {
    format!(r#"<font color="{}">{}</font>"#, color, inner)
}
