//! Emoji-flag matching over the location field.
//!
//! Flags come in two encodings: regional-indicator pairs (🇪🇸 → `":es:"`)
//! and tag sequences for subdivisions (🏴 + tag letters, e.g. Scotland →
//! `":gbsct:"`). Both decode to lowercase colon-wrapped shortcodes, the
//! same format the gazetteer's `flag_emoji_code` field uses.

use crate::gazetteer::{Gazetteer, PlaceKind};

const REGIONAL_INDICATOR_BASE: u32 = 0x1F1E6;
const REGIONAL_INDICATOR_LAST: u32 = 0x1F1FF;
const BLACK_FLAG: char = '\u{1F3F4}';
const TAG_BASE: u32 = 0xE0000;
const TAG_CANCEL: char = '\u{E007F}';

/// Resolve the first recognized flag emoji in `location`.
///
/// A location whose flags are mostly foreign says nothing useful, so the
/// method aborts when more than one *distinct* unrecognized flag is
/// present. With at most one stray flag, the leftmost recognized flag
/// decides; the place resolves at the requested granularity, falling back
/// to the country when the flag belongs to a coarser level.
pub fn identify_place_flag_in_location(
    gazetteer: &Gazetteer,
    location: &str,
    want: PlaceKind,
) -> Option<String> {
    if location.is_empty() {
        return None;
    }
    let codes = extract_flag_codes(location);
    if codes.is_empty() {
        return None;
    }

    let mut unknown: Vec<&String> = Vec::new();
    for code in &codes {
        if !gazetteer.flag_codes().contains(code) && !unknown.contains(&code) {
            unknown.push(code);
        }
    }
    if unknown.len() > 1 {
        log::debug!("{} distinct unrecognized flags, too ambiguous", unknown.len());
        return None;
    }

    let found = codes.iter().find(|c| gazetteer.flag_codes().contains(*c))?;
    let chain = gazetteer.find_flag(found)?;
    Some(chain.label(want))
}

/// Decode every flag emoji in `text` to its shortcode, in order of
/// appearance. Unpaired regional indicators and malformed tag sequences
/// are skipped.
pub fn extract_flag_codes(text: &str) -> Vec<String> {
    let mut codes = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let cp = c as u32;
        if (REGIONAL_INDICATOR_BASE..=REGIONAL_INDICATOR_LAST).contains(&cp) {
            let Some(&next) = chars.peek() else { break };
            let next_cp = next as u32;
            if (REGIONAL_INDICATOR_BASE..=REGIONAL_INDICATOR_LAST).contains(&next_cp) {
                chars.next();
                let a = char::from_u32('a' as u32 + (cp - REGIONAL_INDICATOR_BASE));
                let b = char::from_u32('a' as u32 + (next_cp - REGIONAL_INDICATOR_BASE));
                if let (Some(a), Some(b)) = (a, b) {
                    codes.push(format!(":{a}{b}:"));
                }
            }
        } else if c == BLACK_FLAG {
            let mut tag = String::new();
            while let Some(&t) = chars.peek() {
                if t == TAG_CANCEL {
                    chars.next();
                    break;
                }
                let t_cp = t as u32;
                if (TAG_BASE + 0x20..=TAG_BASE + 0x7E).contains(&t_cp) {
                    chars.next();
                    if let Some(letter) = char::from_u32(t_cp - TAG_BASE) {
                        tag.push(letter.to_ascii_lowercase());
                    }
                } else {
                    break;
                }
            }
            if !tag.is_empty() {
                codes.push(format!(":{tag}:"));
            }
        }
    }
    codes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_regional_indicator_pairs_in_order() {
        assert_eq!(extract_flag_codes("🇪🇸🇮🇹"), vec![":es:", ":it:"]);
        assert_eq!(extract_flag_codes("GC 🇮🇨"), vec![":ic:"]);
        assert_eq!(extract_flag_codes("no flags here"), Vec::<String>::new());
    }

    #[test]
    fn skips_unpaired_indicator() {
        // A lone regional indicator is not a flag.
        assert_eq!(extract_flag_codes("\u{1F1EA} hola"), Vec::<String>::new());
    }

    #[test]
    fn decodes_subdivision_tag_sequences() {
        let scotland = "\u{1F3F4}\u{E0067}\u{E0062}\u{E0073}\u{E0063}\u{E0074}\u{E007F}";
        assert_eq!(extract_flag_codes(scotland), vec![":gbsct:"]);
    }
}
