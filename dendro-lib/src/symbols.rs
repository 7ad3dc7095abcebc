// --- FILE: dendro-lib/src/symbols.rs ---

/// The four line-drawing tokens used to draw one render.
///
/// Tokens are raw bytes because the legacy family uses single code page 437
/// bytes (`0xC0`, `0xDA`, `0xC3`, `0xB3`) that are not valid UTF-8 on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolSet {
    /// Prefix for the last sibling at a level.
    pub corner_up: &'static [u8],
    /// Prefix for the very first line of the whole output, when not last.
    pub corner_down: &'static [u8],
    /// Prefix for any other sibling.
    pub branch: &'static [u8],
    /// Indent continuation beneath a sibling that is not last.
    pub vertical: &'static [u8],
}

impl SymbolSet {
    /// UTF-8 box-drawing glyphs.
    pub const UTF8: SymbolSet = SymbolSet {
        corner_up: "└── ".as_bytes(),
        corner_down: "┌── ".as_bytes(),
        branch: "├── ".as_bytes(),
        vertical: "│   ".as_bytes(),
    };

    /// Legacy console glyphs (code page 437 single bytes).
    pub const LEGACY: SymbolSet = SymbolSet {
        corner_up: b"\xC0 ",
        corner_down: b"\xDA ",
        branch: b"\xC3 ",
        vertical: b"\xB3   ",
    };

    pub fn for_utf8(use_utf8: bool) -> Self {
        if use_utf8 {
            Self::UTF8
        } else {
            Self::LEGACY
        }
    }
}

/// Indent appended beneath a sibling that is last at its level.
pub(crate) const LAST_INDENT: &[u8] = b"    ";

/// Decodes a legacy render into text for consoles that only accept Unicode.
///
/// Entry names stay as they are. Only the bytes that fall outside valid UTF-8
/// are read as code page 437 line glyphs.
pub fn legacy_to_unicode(mut bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    while !bytes.is_empty() {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                text.push_str(valid);
                break;
            }
            Err(err) => {
                let (valid, rest) = bytes.split_at(err.valid_up_to());
                text.push_str(&String::from_utf8_lossy(valid));
                let invalid_len = err.error_len().unwrap_or(rest.len());
                text.extend(rest[..invalid_len].iter().map(|&byte| cp437_glyph(byte)));
                bytes = &rest[invalid_len..];
            }
        }
    }
    text
}

fn cp437_glyph(byte: u8) -> char {
    match byte {
        0xC0 => '└',
        0xDA => '┌',
        0xC3 => '├',
        0xB3 => '│',
        _ => char::REPLACEMENT_CHARACTER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_selects_family() {
        assert_eq!(SymbolSet::for_utf8(true), SymbolSet::UTF8);
        assert_eq!(SymbolSet::for_utf8(false), SymbolSet::LEGACY);
    }

    #[test]
    fn legacy_tokens_are_single_byte_glyphs() {
        let legacy = SymbolSet::LEGACY;
        assert_eq!(legacy.corner_up, &[0xC0, b' ']);
        assert_eq!(legacy.corner_down, &[0xDA, b' ']);
        assert_eq!(legacy.branch, &[0xC3, b' ']);
        assert_eq!(legacy.vertical, &[0xB3, b' ', b' ', b' ']);
    }

    #[test]
    fn utf8_tokens_are_valid_text() {
        let utf8 = SymbolSet::UTF8;
        assert_eq!(std::str::from_utf8(utf8.corner_up).unwrap(), "└── ");
        assert_eq!(std::str::from_utf8(utf8.vertical).unwrap(), "│   ");
    }

    #[test]
    fn legacy_glyphs_decode_without_touching_names() {
        let legacy = b"src/\n\xDA caf\xC3\xA9.rs\n\xB3   \xC3 a.rs\n\xC0 z.rs\n";
        assert_eq!(
            legacy_to_unicode(legacy),
            "src/\n┌ café.rs\n│   ├ a.rs\n└ z.rs\n"
        );
    }
}
