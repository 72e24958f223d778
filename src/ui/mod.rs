pub mod panels;
pub mod plot;

/// Payload mass as shown in labels; infinite bounds come from classified
/// payloads.
pub fn format_mass(mass: f64) -> String {
    if mass == f64::INFINITY {
        "∞".to_string()
    } else if mass == f64::NEG_INFINITY {
        "-∞".to_string()
    } else {
        format!("{mass:.0}")
    }
}
