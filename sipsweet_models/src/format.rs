pub fn format_volume(ml: u32) -> String {
    if ml >= 1000 {
        format!("{:.1}L", f64::from(ml) / 1000.0)
    } else {
        format!("{ml}ml")
    }
}

pub fn format_percentage(percentage: f64) -> String {
    format!("{}%", percentage.round() as i64)
}

pub fn format_interval(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{minutes}m");
    }

    let hours = minutes / 60;
    match minutes % 60 {
        0 => format!("{hours}h"),
        remaining => format!("{hours}h {remaining}m"),
    }
}
