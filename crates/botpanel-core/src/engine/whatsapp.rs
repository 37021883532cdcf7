// Pawz Bot Panel — WhatsApp click-to-chat links
//
// Builds `https://wa.me/<number>?text=<message>` links. The number must be
// in international format; common separators are dropped, anything else is
// rejected.

use crate::atoms::constants::WA_ME_BASE;
use crate::atoms::error::{BotError, BotResult};

/// Strip `+`, spaces, dashes, dots and parentheses, then require digits.
pub fn normalize_number(raw: &str) -> BotResult<String> {
    let mut digits = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '0'..='9' => digits.push(c),
            '+' | ' ' | '-' | '.' | '(' | ')' => {}
            other => {
                return Err(BotError::validation(format!(
                    "phone number contains '{}'; use international format like +62 812 3456 789",
                    other
                )))
            }
        }
    }
    if digits.is_empty() {
        return Err(BotError::MissingField("number"));
    }
    Ok(digits)
}

/// Click-to-chat link, with a pre-filled message when one is given.
pub fn click_to_chat_link(number: &str, message: Option<&str>) -> BotResult<String> {
    let digits = normalize_number(number)?;
    let link = match message.map(str::trim).filter(|m| !m.is_empty()) {
        Some(text) => format!("{}{}?text={}", WA_ME_BASE, digits, urlencoding::encode(text)),
        None => format!("{}{}", WA_ME_BASE, digits),
    };
    Ok(link)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_encodes_message() {
        let link = click_to_chat_link(
            "+62 851-8906-3747",
            Some("Hello, I need support regarding my website payment."),
        )
        .unwrap();
        assert_eq!(
            link,
            "https://wa.me/6285189063747?text=Hello%2C%20I%20need%20support%20regarding%20my%20website%20payment."
        );
    }

    #[test]
    fn blank_message_gives_bare_link() {
        assert_eq!(click_to_chat_link("(555) 010.9999", None).unwrap(), "https://wa.me/5550109999");
        assert_eq!(click_to_chat_link("5550109999", Some("  ")).unwrap(), "https://wa.me/5550109999");
    }

    #[test]
    fn bad_numbers_are_rejected() {
        assert!(matches!(normalize_number("+-"), Err(BotError::MissingField("number"))));
        assert!(matches!(normalize_number("call-me"), Err(BotError::Validation(_))));
    }
}
