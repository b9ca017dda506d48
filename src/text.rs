use ar_reshaper::ArabicReshaper;
use unicode_bidi::BidiInfo;
use unicode_segmentation::UnicodeSegmentation;

/// The question mark used by Arabic-script locales (U+061F), as opposed to the
/// ASCII `?`.
pub const ARABIC_QUESTION_MARK: char = '\u{061F}';

/// Canonicalizes character variants so the same word always compares equal.
///
/// Chat text mixes Arabic and Persian forms of the same letters (exports carry
/// whatever the sender's keyboard produced). The normalizer folds those to the
/// Persian forms, drops diacritics and tatweel, folds Arabic-Indic digits to
/// their Persian counterparts, and collapses whitespace runs. Constructed once
/// and shared through [`crate::AnalysisConfig`]; stopwords are passed through
/// the same instance at load time so both sides of a comparison agree.
#[derive(Debug, Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    pub fn new() -> Self {
        Normalizer
    }

    pub fn normalize(&self, text: &str) -> String {
        let mut folded = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                // harakat and tatweel carry no lexical information
                '\u{064B}'..='\u{0652}' | '\u{0640}' => {}
                _ => folded.push(fold_char(c)),
            }
        }
        folded.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

fn fold_char(c: char) -> char {
    match c {
        '\u{064A}' | '\u{0649}' => '\u{06CC}', // arabic yeh variants -> farsi yeh
        '\u{0643}' => '\u{06A9}',              // arabic kaf -> keheh
        '\u{0629}' => '\u{0647}',              // teh marbuta -> heh
        '\u{0660}'..='\u{0669}' => {
            char::from_u32(c as u32 - 0x0660 + 0x06F0).unwrap_or(c) // arabic-indic -> extended digits
        }
        _ => c,
    }
}

/// Splits text into words along UAX#29 word boundaries, dropping punctuation.
pub fn tokenize_words(text: &str) -> Vec<&str> {
    text.unicode_words().collect()
}

/// True if at least one sentence of `text` reads as a question.
///
/// Sentences come from UAX#29 sentence segmentation (which treats both `?` and
/// U+061F as terminators); a sentence counts as interrogative when it contains
/// the ASCII mark or the locale glyph. Scanning stops at the first hit.
pub fn contains_question(text: &str, locale_mark: char) -> bool {
    for sentence in text.split_sentence_bounds() {
        if sentence.contains('?') || sentence.contains(locale_mark) {
            return true;
        }
    }
    false
}

/// Shapes text for rendering: joins Arabic-script codepoints into their
/// presentation forms, then reorders the string so storage order matches
/// left-to-right visual order. The renderer can then draw glyphs naively.
pub fn prepare_for_display(text: &str) -> String {
    let reshaped = ArabicReshaper::default().reshape(text);
    let bidi = BidiInfo::new(&reshaped, None);
    let mut visual = String::with_capacity(reshaped.len());
    for paragraph in &bidi.paragraphs {
        visual.push_str(&bidi.reorder_line(paragraph, paragraph.range.clone()));
    }
    visual
}
