//! Parsed database entry from a `cddb read` reply.
//!
//! A read reply body is a mix of `#` comment lines and `KEYWORD=data`
//! lines. Parsing applies the first matching rule per line and silently
//! drops anything else; unknown comments are tolerated by design, so the
//! parser has no failure path.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static KEYWORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^=]+)=(.*)$").expect("keyword regex"));
static DISC_LEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^#\s*Disc length:\s*(\d+)\s*seconds").expect("length regex"));
static REVISION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^#\s*Revision:\s*(\d+)").expect("revision regex"));
static SUBMITTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^#\s*Submitted via:\s*(.+)").expect("submitted regex"));

/// One database entry: keyword fields plus the metadata carried in
/// well-known comment lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscRecord {
    fields: BTreeMap<String, String>,
    disc_len: Option<u32>,
    revision: Option<u32>,
    submitted_via: Option<String>,
}

impl DiscRecord {
    /// Parse the content lines of a successful read reply.
    ///
    /// Repeated keywords are concatenated in encounter order with no
    /// separator inserted: the protocol continues long fields across lines
    /// at arbitrary byte boundaries, so any delimiter we added could land
    /// mid-word. Pure and idempotent; lines matching no rule are dropped.
    pub fn parse<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut record = Self::default();

        for line in lines {
            if let Some(caps) = KEYWORD_RE.captures(line) {
                record
                    .fields
                    .entry(caps[1].to_string())
                    .or_default()
                    .push_str(&caps[2]);
            } else if let Some(caps) = DISC_LEN_RE.captures(line) {
                record.disc_len = caps[1].parse().ok();
            } else if let Some(caps) = REVISION_RE.captures(line) {
                record.revision = caps[1].parse().ok();
            } else if let Some(caps) = SUBMITTED_RE.captures(line) {
                record.submitted_via = Some(caps[1].to_string());
            }
        }

        record
    }

    /// Raw value of a keyword field, if present.
    pub fn field(&self, keyword: &str) -> Option<&str> {
        self.fields.get(keyword).map(String::as_str)
    }

    /// All keyword fields, sorted by keyword.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Disc playing time in seconds, from the `# Disc length:` comment.
    pub fn disc_len(&self) -> Option<u32> {
        self.disc_len
    }

    /// Entry revision number, from the `# Revision:` comment.
    pub fn revision(&self) -> Option<u32> {
        self.revision
    }

    /// Submitting client, from the `# Submitted via:` comment.
    pub fn submitted_via(&self) -> Option<&str> {
        self.submitted_via.as_deref()
    }

    // ------------------------------------------------------------------
    // Typed accessors over the standard CDDB keywords
    // ------------------------------------------------------------------

    /// Album artist: the part of `DTITLE` before the first `" / "`.
    /// A `DTITLE` without the separator names both artist and title.
    pub fn artist(&self) -> Option<&str> {
        self.dtitle_parts().map(|(artist, _)| artist)
    }

    /// Album title: the part of `DTITLE` after the first `" / "`.
    pub fn title(&self) -> Option<&str> {
        self.dtitle_parts().map(|(_, title)| title)
    }

    /// Release year (`DYEAR`, present from protocol level 5).
    pub fn year(&self) -> Option<u16> {
        self.field("DYEAR")?.trim().parse().ok()
    }

    /// Genre (`DGENRE`, present from protocol level 5). Freeform text,
    /// distinct from the category the entry is filed under.
    pub fn genre(&self) -> Option<&str> {
        self.field("DGENRE")
    }

    /// Title of the zero-based track `number` (`TTITLEn`).
    pub fn track_title(&self, number: u8) -> Option<&str> {
        self.field(&format!("TTITLE{number}"))
    }

    /// Track titles in track order, stopping at the first gap.
    pub fn track_titles(&self) -> Vec<&str> {
        (0..=u8::MAX)
            .map_while(|number| self.track_title(number))
            .collect()
    }

    /// Extended disc data (`EXTD`), often multi-line continuation.
    pub fn ext_data(&self) -> Option<&str> {
        self.field("EXTD")
    }

    /// Suggested playback order (`PLAYORDER`), rarely populated.
    pub fn playorder(&self) -> Option<&str> {
        self.field("PLAYORDER")
    }

    fn dtitle_parts(&self) -> Option<(&str, &str)> {
        let dtitle = self.field("DTITLE")?;
        Some(match dtitle.split_once(" / ") {
            Some((artist, title)) => (artist, title),
            None => (dtitle, dtitle),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY: &[&str] = &[
        "# xmcd CD database file",
        "#",
        "# Track frame offsets:",
        "#\t150",
        "#\t19270",
        "#",
        "# Disc length: 2930 seconds",
        "#",
        "# Revision: 7",
        "# Submitted via: audio-grabber 1.12",
        "#",
        "DISCID=940aac0d",
        "DTITLE=Miles Davis / Kind of Blue",
        "DYEAR=1959",
        "DGENRE=Jazz",
        "TTITLE0=So What",
        "TTITLE1=Freddie Freeloader",
        "EXTD=",
        "PLAYORDER=",
    ];

    #[test]
    fn test_keyword_fields() {
        let record = DiscRecord::parse(REPLY.iter().copied());
        assert_eq!(record.field("DISCID"), Some("940aac0d"));
        assert_eq!(record.field("TTITLE1"), Some("Freddie Freeloader"));
        assert_eq!(record.field("EXTD"), Some(""));
        assert_eq!(record.field("TTITLE9"), None);
    }

    #[test]
    fn test_comment_metadata() {
        let record = DiscRecord::parse(REPLY.iter().copied());
        assert_eq!(record.disc_len(), Some(2930));
        assert_eq!(record.revision(), Some(7));
        assert_eq!(record.submitted_via(), Some("audio-grabber 1.12"));
    }

    #[test]
    fn test_disc_len_is_numeric() {
        let record = DiscRecord::parse(["# Disc length: 2930 seconds"]);
        assert_eq!(record.disc_len(), Some(2930));
    }

    #[test]
    fn test_comment_matching_is_case_and_whitespace_tolerant() {
        let record = DiscRecord::parse([
            "#  disc length:  1999  seconds",
            "#REVISION: 3",
            "# submitted via: cdripper 0.9",
        ]);
        assert_eq!(record.disc_len(), Some(1999));
        assert_eq!(record.revision(), Some(3));
        assert_eq!(record.submitted_via(), Some("cdripper 0.9"));
    }

    #[test]
    fn test_repeated_keyword_concatenates_without_separator() {
        let record = DiscRecord::parse(["TTITLE0=Part A", "TTITLE0=Part B"]);
        assert_eq!(record.field("TTITLE0"), Some("Part APart B"));
    }

    #[test]
    fn test_unmatched_lines_are_dropped() {
        let record = DiscRecord::parse(["", "# some new comment", "no equals here at all"]);
        assert_eq!(record, DiscRecord::default());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = DiscRecord::parse(REPLY.iter().copied());
        let second = DiscRecord::parse(REPLY.iter().copied());
        assert_eq!(first, second);
    }

    #[test]
    fn test_dtitle_split() {
        let record = DiscRecord::parse(["DTITLE=Miles Davis / Kind of Blue"]);
        assert_eq!(record.artist(), Some("Miles Davis"));
        assert_eq!(record.title(), Some("Kind of Blue"));
    }

    #[test]
    fn test_dtitle_without_separator() {
        let record = DiscRecord::parse(["DTITLE=Kind of Blue"]);
        assert_eq!(record.artist(), Some("Kind of Blue"));
        assert_eq!(record.title(), Some("Kind of Blue"));
    }

    #[test]
    fn test_dtitle_splits_on_first_separator_only() {
        let record = DiscRecord::parse(["DTITLE=Simon / Garfunkel / Greatest Hits"]);
        assert_eq!(record.artist(), Some("Simon"));
        assert_eq!(record.title(), Some("Garfunkel / Greatest Hits"));
    }

    #[test]
    fn test_typed_accessors() {
        let record = DiscRecord::parse(REPLY.iter().copied());
        assert_eq!(record.year(), Some(1959));
        assert_eq!(record.genre(), Some("Jazz"));
        assert_eq!(record.track_titles(), vec!["So What", "Freddie Freeloader"]);
    }

    #[test]
    fn test_track_titles_stop_at_gap() {
        let record = DiscRecord::parse(["TTITLE0=A", "TTITLE2=C"]);
        assert_eq!(record.track_titles(), vec!["A"]);
        assert_eq!(record.track_title(2), Some("C"));
    }
}
