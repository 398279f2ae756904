//! Media-placeholder recognition.
//!
//! Exports replace attachments with short placeholder bodies such as
//! `<Media omitted>`, `image omitted` or `IMG-1234.jpg (file attached)`,
//! with wording that varies by platform and language. [`classify_content`]
//! recognizes these shapes without touching any attachment data.

use serde::{Deserialize, Serialize};

use crate::format::DIRECTION_MARKS;

/// What a message body carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Ordinary text.
    Text,
    /// An image placeholder (also the generic `<Media omitted>` shape).
    Image,
    /// A video placeholder.
    Video,
    /// A voice note or audio placeholder.
    Audio,
    /// A sticker placeholder.
    Sticker,
    /// A GIF placeholder.
    Gif,
    /// A document or generic file-attachment placeholder.
    Document,
    /// A shared contact card.
    Contact,
    /// A shared location, live or static.
    Location,
    /// A body that is a bare URL.
    Link,
}

/// Words that mark a short body as an attachment placeholder rather than
/// ordinary prose. English and Spanish export wordings.
const OMISSION_WORDS: &[&str] = &[
    "omitted", "omitido", "omitida", "attached", "adjunto", "shared",
];

/// Classifies a message body as text, a media placeholder, or a link.
///
/// The heuristic is deliberately narrow: a body only counts as a placeholder
/// when it is at most three words long and carries a placeholder signal
/// (angle brackets, an omission word, or a trailing colon on the first
/// word). Everything else is [`ContentKind::Text`], so prose that merely
/// mentions a video never misclassifies.
///
/// # Example
///
/// ```rust
/// use chatwrap::media::{ContentKind, classify_content};
///
/// assert_eq!(classify_content("<Media omitted>"), ContentKind::Image);
/// assert_eq!(classify_content("sticker omitted"), ContentKind::Sticker);
/// assert_eq!(classify_content("https://example.com/a"), ContentKind::Link);
/// assert_eq!(classify_content("I liked that video"), ContentKind::Text);
/// ```
pub fn classify_content(body: &str) -> ContentKind {
    let trimmed = body
        .trim_matches(|c: char| c.is_whitespace() || DIRECTION_MARKS.contains(&c));

    if trimmed.starts_with("http://")
        || trimmed.starts_with("https://")
        || trimmed.starts_with("www.")
    {
        return ContentKind::Link;
    }

    let bracketed = trimmed.starts_with('<') && trimmed.ends_with('>');
    let inner = trimmed.trim_matches(['<', '>']);
    let lowered = inner.to_lowercase();

    let words: Vec<&str> = lowered.split_whitespace().collect();
    if words.is_empty() || words.len() > 3 {
        return ContentKind::Text;
    }

    let signal = bracketed
        || words.first().is_some_and(|w| w.ends_with(':'))
        || words
            .iter()
            .any(|w| OMISSION_WORDS.contains(&strip_punct(w)));
    if !signal {
        return ContentKind::Text;
    }

    for word in &words {
        if let Some(kind) = keyword_kind(strip_punct(word)) {
            return kind;
        }
    }
    ContentKind::Text
}

fn strip_punct(word: &str) -> &str {
    word.trim_matches(|c: char| matches!(c, ':' | '.' | ',' | '(' | ')' | '<' | '>' | '"'))
}

fn keyword_kind(word: &str) -> Option<ContentKind> {
    Some(match word {
        "image" | "imagen" | "photo" | "foto" | "media" => ContentKind::Image,
        "video" | "vídeo" => ContentKind::Video,
        "audio" | "voice" | "ptt" => ContentKind::Audio,
        "sticker" => ContentKind::Sticker,
        "gif" => ContentKind::Gif,
        "document" | "documento" | "file" | "archivo" => ContentKind::Document,
        "contact" | "contacto" => ContentKind::Contact,
        "location" | "ubicación" => ContentKind::Location,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_media_omitted() {
        assert_eq!(classify_content("<Media omitted>"), ContentKind::Image);
        assert_eq!(classify_content("Media omitted"), ContentKind::Image);
    }

    #[test]
    fn test_typed_placeholders() {
        assert_eq!(classify_content("image omitted"), ContentKind::Image);
        assert_eq!(classify_content("video omitted"), ContentKind::Video);
        assert_eq!(classify_content("audio omitted"), ContentKind::Audio);
        assert_eq!(classify_content("sticker omitted"), ContentKind::Sticker);
        assert_eq!(classify_content("GIF omitted"), ContentKind::Gif);
        assert_eq!(classify_content("document omitted"), ContentKind::Document);
        assert_eq!(
            classify_content("Contact card omitted"),
            ContentKind::Contact
        );
    }

    #[test]
    fn test_spanish_placeholders() {
        assert_eq!(classify_content("imagen omitida"), ContentKind::Image);
        assert_eq!(classify_content("vídeo omitido"), ContentKind::Video);
        assert_eq!(classify_content("archivo adjunto"), ContentKind::Document);
    }

    #[test]
    fn test_file_attached() {
        assert_eq!(
            classify_content("IMG-1234.jpg (file attached)"),
            ContentKind::Document
        );
    }

    #[test]
    fn test_location_share() {
        assert_eq!(
            classify_content("location: https://maps.google.com/?q=0,0"),
            ContentKind::Location
        );
        assert_eq!(classify_content("live location shared"), ContentKind::Location);
    }

    #[test]
    fn test_bare_url_is_link() {
        assert_eq!(classify_content("https://example.com"), ContentKind::Link);
        assert_eq!(classify_content("http://example.com/x"), ContentKind::Link);
        assert_eq!(classify_content("www.example.com"), ContentKind::Link);
    }

    #[test]
    fn test_direction_marks_ignored() {
        assert_eq!(classify_content("\u{200E}sticker omitted"), ContentKind::Sticker);
    }

    #[test]
    fn test_prose_stays_text() {
        assert_eq!(classify_content("I liked that video"), ContentKind::Text);
        assert_eq!(classify_content("nice photo!"), ContentKind::Text);
        assert_eq!(
            classify_content("check the document I sent you yesterday"),
            ContentKind::Text
        );
        assert_eq!(classify_content(""), ContentKind::Text);
    }
}
