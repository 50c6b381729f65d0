use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    static ref FORMAT_NAMES: HashMap<&'static str, &'static str> = HashMap::from([
        ("ean_13", "EAN-13 (International Article Number)"),
        ("ean_8", "EAN-8 (Compressed Article Number)"),
        ("code_128", "Code 128 (ASCII Character Set)"),
        ("code_39", "Code 39 (Alphanumeric)"),
        ("upc_a", "UPC-A (Universal Product Code)"),
        ("upc_e", "UPC-E (Compressed Product Code)"),
        ("codabar", "Codabar (Library Systems)"),
        ("i2of5", "Interleaved 2 of 5 (Warehouse/Distribution)"),
    ]);
}

/// Display name for a decoder symbology id; unknown ids pass through as-is.
pub fn format_name(format: &str) -> String {
    FORMAT_NAMES
        .get(format.to_lowercase().as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| format.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_formats_get_display_names() {
        assert_eq!(format_name("ean_13"), "EAN-13 (International Article Number)");
        assert_eq!(format_name("UPC_A"), "UPC-A (Universal Product Code)");
    }

    #[test]
    fn unknown_formats_pass_through() {
        assert_eq!(format_name("qr_code"), "qr_code");
    }
}
