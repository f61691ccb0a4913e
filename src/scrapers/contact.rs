//! Contact-number recovery and display formatting.

use regex::Regex;
use std::sync::LazyLock;

/// Area code assumed when a match carries none
const DEFAULT_AREA_CODE: &str = "24";

/// Labeled patterns first, the bare "DD 9 XXXX-XXXX" shape last.
static CONTACT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let tail = r"[:\s]*(?:\+?55)?[\s-]?(\(?(?:24|21)\)?)[\s-]?9?\s*(\d{4}[\s-]?\d{4})";
    let mut patterns: Vec<Regex> = ["WhatsApp", "Whats", "telefone", "contato"]
        .iter()
        .map(|label| Regex::new(&format!("(?i){}{}", label, tail)).unwrap())
        .collect();
    patterns.push(Regex::new(r"(\(?(?:24|21)\)?)[\s-]?9\s*(\d{4}[\s-]?\d{4})").unwrap());
    patterns
});

/// First contact number found in `text`, as `(DD) dddd-dddd`
pub fn find_contact_number(text: &str) -> Option<String> {
    CONTACT_PATTERNS.iter().find_map(|pattern| {
        let caps = pattern.captures(text)?;
        let area = caps
            .get(1)
            .map(|m| m.as_str().replace(['(', ')'], ""))
            .filter(|area| !area.is_empty())
            .unwrap_or_else(|| DEFAULT_AREA_CODE.to_string());
        let number: String = caps
            .get(2)?
            .as_str()
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        if number.len() != 8 {
            return None;
        }
        Some(format!("({}) {}-{}", area, &number[..4], &number[4..]))
    })
}

/// Signage rendering of a stored number.
///
/// Ten digits get the mobile `9` inserted after the area code, eleven are
/// regrouped, anything else is shown as stored.
pub fn format_display_phone(phone: Option<&str>, fallback: &str) -> String {
    let Some(phone) = phone else {
        return fallback.to_string();
    };

    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        10 => format!("({}) 9 {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        11 => format!(
            "({}) {} {}-{}",
            &digits[..2],
            &digits[2..3],
            &digits[3..7],
            &digits[7..]
        ),
        _ => phone.to_string(),
    }
}

/// `wa.me` link for a stored number, with the Brazilian country code
pub fn whatsapp_link(phone: Option<&str>, fallback: &str) -> String {
    let phone = phone.unwrap_or(fallback);
    let mut digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 10 {
        digits.insert(2, '9');
    }
    format!("https://wa.me/+55{}", digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "(24) 9 8841 8058";

    #[test]
    fn test_labeled_whatsapp_number() {
        let text = "Atendimento 24h. WhatsApp: (24) 9 9876-5432 ou e-mail.";
        assert_eq!(find_contact_number(text).as_deref(), Some("(24) 9876-5432"));
    }

    #[test]
    fn test_labeled_number_with_country_code() {
        let text = "Telefone: +55 21 99876 5432";
        assert_eq!(find_contact_number(text).as_deref(), Some("(21) 9876-5432"));
    }

    #[test]
    fn test_labels_win_over_bare_numbers() {
        let text = "Loja (21) 9 1111-2222. Contato: (24) 3333-4444";
        assert_eq!(find_contact_number(text).as_deref(), Some("(24) 3333-4444"));
    }

    #[test]
    fn test_bare_number_needs_mobile_prefix() {
        assert_eq!(
            find_contact_number("Ligue 24 9 8765 4321").as_deref(),
            Some("(24) 8765-4321")
        );
        assert_eq!(find_contact_number("Ligue 24 8765 4321"), None);
    }

    #[test]
    fn test_no_number() {
        assert_eq!(find_contact_number("Sem telefone por aqui"), None);
    }

    #[test]
    fn test_display_inserts_nine_for_ten_digits() {
        assert_eq!(format_display_phone(Some("(24) 8841-8058"), FALLBACK), "(24) 9 8841-8058");
    }

    #[test]
    fn test_display_regroups_eleven_digits() {
        assert_eq!(format_display_phone(Some("24988418058"), FALLBACK), "(24) 9 8841-8058");
        assert_eq!(format_display_phone(Some("(21) 7 1234-5678"), FALLBACK), "(21) 7 1234-5678");
    }

    #[test]
    fn test_display_passes_other_lengths_through() {
        assert_eq!(format_display_phone(Some("0800 123"), FALLBACK), "0800 123");
        assert_eq!(format_display_phone(None, FALLBACK), FALLBACK);
    }

    #[test]
    fn test_whatsapp_link() {
        assert_eq!(
            whatsapp_link(Some("(24) 8841-8058"), FALLBACK),
            "https://wa.me/+5524988418058"
        );
        assert_eq!(whatsapp_link(None, FALLBACK), "https://wa.me/+5524988418058");
    }
}
