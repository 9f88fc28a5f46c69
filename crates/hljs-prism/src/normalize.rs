//! Declaration normalization: CSS property/value pairs to theme style entries.
//!
//! Property names are camel-cased (`font-style` -> `fontStyle`). The one
//! special case is the `background` shorthand, which becomes
//! `backgroundColor` with only the color kept from its value.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// CSS shorthand whose value may carry more than a color.
pub const BACKGROUND_PROPERTY: &str = "background";

/// Theme key for the background color.
pub const BACKGROUND_COLOR_KEY: &str = "backgroundColor";

static HYPHEN_LOWER: Lazy<Regex> = Lazy::new(|| Regex::new(r"-([a-z])").unwrap());

// Word boundaries are ASCII-only: `#abcé` still yields `#abc`.
static COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)#[0-9a-f]+(?-u:\b)|(?-u:\b)(?:rgb|rgba|hwb|hsl|hsla|lab|lch|oklab|oklch|color)\(.+?\)",
    )
    .unwrap()
});

/// Maps one declaration to a theme `(property, value)` pair.
///
/// Returns `None` only when the normalized property name is empty.
pub fn normalize(property: &str, value: &str) -> Option<(String, String)> {
    let (name, value) = match property {
        BACKGROUND_PROPERTY => (BACKGROUND_COLOR_KEY.to_string(), extract_color(value)),
        _ => (to_camel_case(property), value.to_string()),
    };

    if name.is_empty() {
        return None;
    }
    Some((name, value))
}

/// Replaces every `-x` (lowercase ASCII `x`) with `X`.
///
/// Hyphens not followed by a lowercase letter are left alone, so vendor
/// prefixes keep their shape: `-webkit-user-select` -> `WebkitUserSelect`.
pub fn to_camel_case(name: &str) -> String {
    HYPHEN_LOWER
        .replace_all(name, |caps: &Captures| caps[1].to_ascii_uppercase())
        .into_owned()
}

/// Pulls the first color out of a declaration value.
///
/// Finds the leftmost hex color or functional color notation. Without one,
/// falls back to the first whitespace-separated token, which covers named
/// colors such as `red`.
pub fn extract_color(value: &str) -> String {
    if let Some(found) = COLOR.find(value) {
        return found.as_str().to_string();
    }

    value
        .split(char::is_whitespace)
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_background_maps_to_background_color() {
        assert_eq!(
            normalize("background", "#123456"),
            Some(("backgroundColor".to_string(), "#123456".to_string()))
        );
    }

    #[test]
    fn test_background_extracts_color_from_shorthand() {
        assert_eq!(
            normalize("background", "url(bg.png) no-repeat #fafafa"),
            Some(("backgroundColor".to_string(), "#fafafa".to_string()))
        );
    }

    #[test]
    fn test_camel_case_property() {
        assert_eq!(
            normalize("font-style", "italic"),
            Some(("fontStyle".to_string(), "italic".to_string()))
        );
    }

    #[test]
    fn test_value_passes_through_unchanged() {
        assert_eq!(
            normalize("color", "rgba(0, 0, 0, 0.5) /* note */"),
            Some(("color".to_string(), "rgba(0, 0, 0, 0.5) /* note */".to_string()))
        );
    }

    #[test]
    fn test_background_color_is_only_camel_cased() {
        assert_eq!(
            normalize("background-color", "red solid"),
            Some(("backgroundColor".to_string(), "red solid".to_string()))
        );
    }

    #[test]
    fn test_empty_property_is_dropped() {
        assert_eq!(normalize("", "red"), None);
    }

    #[test]
    fn test_camel_case_edges() {
        assert_eq!(to_camel_case("color"), "color");
        assert_eq!(to_camel_case("text-decoration-line"), "textDecorationLine");
        assert_eq!(to_camel_case("-webkit-user-select"), "WebkitUserSelect");
        assert_eq!(to_camel_case("--custom-var"), "-CustomVar");
        assert_eq!(to_camel_case("grid-2"), "grid-2");
        assert_eq!(to_camel_case("trailing-"), "trailing-");
    }

    #[test]
    fn test_extract_color_cases() {
        assert_eq!(extract_color("#ff0000"), "#ff0000");
        assert_eq!(extract_color("rgba(0, 0, 0, 0.5) /* comment */"), "rgba(0, 0, 0, 0.5)");
        assert_eq!(extract_color("red"), "red");
        assert_eq!(extract_color("red solid"), "red");
    }

    #[test]
    fn test_extract_color_is_case_insensitive() {
        assert_eq!(extract_color("#FFF"), "#FFF");
        assert_eq!(extract_color("HSL(120, 50%, 50%) fixed"), "HSL(120, 50%, 50%)");
        assert_eq!(extract_color("oklch(70% 0.1 200)"), "oklch(70% 0.1 200)");
    }

    #[test]
    fn test_extract_color_takes_leftmost_match() {
        assert_eq!(extract_color("rgb(1, 2, 3) #abcdef"), "rgb(1, 2, 3)");
        assert_eq!(extract_color("#abcdef rgb(1, 2, 3)"), "#abcdef");
    }

    #[test]
    fn test_extract_color_stops_at_first_paren() {
        assert_eq!(
            extract_color("color(display-p3 1 0 0) / (x)"),
            "color(display-p3 1 0 0)"
        );
    }

    #[test]
    fn test_extract_color_hex_stops_at_non_hex() {
        assert_eq!(extract_color("#fff;"), "#fff");
        // No word boundary after the hex run, so no hex match; first token wins.
        assert_eq!(extract_color("#fffxyz"), "#fffxyz");
    }

    #[test]
    fn test_extract_color_function_name_needs_boundary() {
        // "mycolor(...)" is not a color function.
        assert_eq!(extract_color("mycolor(1) blue"), "mycolor(1)");
    }

    #[test]
    fn test_extract_color_word_boundary_is_ascii() {
        assert_eq!(extract_color("#abcé fallback"), "#abc");
        assert_eq!(extract_color("ürgb(1, 2, 3)"), "rgb(1, 2, 3)");
    }

    #[test]
    fn test_extract_color_empty() {
        assert_eq!(extract_color(""), "");
        assert_eq!(extract_color("  "), "");
    }

    proptest! {
        #[test]
        fn test_camel_case_has_no_hyphen_before_lowercase(name in "[a-z-]{0,24}") {
            let camel = to_camel_case(&name);
            let bytes = camel.as_bytes();
            for pair in bytes.windows(2) {
                prop_assert!(!(pair[0] == b'-' && pair[1].is_ascii_lowercase()));
            }
        }

        #[test]
        fn test_camel_case_without_hyphen_is_identity(name in "[a-zA-Z0-9]{0,24}") {
            prop_assert_eq!(to_camel_case(&name), name);
        }

        #[test]
        fn test_hex_color_extracts_itself(hex in "#[0-9a-fA-F]{1,8}", tail in "( [a-z ]{0,12})?") {
            let value = format!("{}{}", hex, tail);
            prop_assert_eq!(extract_color(&value), hex);
        }

        #[test]
        fn test_extract_color_never_panics(value in "\\PC*") {
            let _ = extract_color(&value);
        }
    }
}
