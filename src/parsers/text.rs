use unicode_normalization::UnicodeNormalization;

/// Byte-order mark, zero-width space/joiners and word joiner.
const INVISIBLE: &[char] = &['\u{feff}', '\u{200b}', '\u{200c}', '\u{200d}', '\u{2060}'];

pub fn is_invisible(c: char) -> bool {
    INVISIBLE.contains(&c)
}

/// Removes invisible formatting characters without touching anything else.
pub fn strip_invisible(text: &str) -> String {
    text.chars().filter(|c| !is_invisible(*c)).collect()
}

/// Canonical comparison form of a header or cell value.
///
/// Lower-cases, drops invisible characters, applies canonical decomposition,
/// turns every character other than an ASCII word character or whitespace
/// (combining marks included) into a space, then collapses and trims
/// whitespace. The result only contains `[a-z0-9_]` and single
/// spaces, which makes the function idempotent.
pub fn normalize(text: &str) -> String {
    let mapped: String = text
        .chars()
        .filter(|c| !is_invisible(*c))
        .nfd()
        .flat_map(char::to_lowercase)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Header variant of [`normalize`]: underscores count as spaces, so a suffixed
/// duplicate such as `Image_1` compares as `image 1`.
pub fn normalize_key(text: &str) -> String {
    normalize(&text.replace('_', " "))
}

/// `normalize` for optional input; absent text is the empty string.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}
