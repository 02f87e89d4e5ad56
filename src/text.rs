use unicode_normalization::UnicodeNormalization;

/// Lowercases and strips diacritics for classification matching.
///
/// The input is lowercased, decomposed (NFD), and stripped of the combining
/// marks in U+0300..U+036F, so "Απευθείας" becomes "απευθειας". Total: any
/// string in, a plain lowercase string out.
///
/// Free-text search deliberately does NOT use this; it matches on plain
/// lowercase text, accents intact.
pub fn normalize_text(s: &str) -> String {
    s.to_lowercase()
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036F}').contains(c))
        .collect()
}
