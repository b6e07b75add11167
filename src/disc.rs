//! Disc identity: the fingerprint a CDDB query is keyed on, and the
//! adapter that normalizes native disc handles into it.
//!
//! Internal logic only ever sees a [`DiscFingerprint`]. Callers that hold a
//! raw TOC (e.g. from libdiscid) wrap it in a [`DiscSource`], which is
//! resolved exactly once at the API boundary.

use serde::Serialize;

use crate::error::{Error, Result};

/// Frames per second on an audio CD; sector counts divide by this to get
/// playing time in seconds.
#[cfg(feature = "discid")]
const FRAMES_PER_SECOND: u32 = 75;

/// Normalized disc identity consumed by the query builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscFingerprint {
    disc_id: String,
    track_count: u8,
    toc: Vec<u32>,
}

impl DiscFingerprint {
    /// Build a fingerprint from an 8-hex-digit disc id, a track count, and
    /// the TOC entries: one starting offset per track, in ascending order,
    /// followed by the total disc length in seconds.
    ///
    /// Fails if the TOC does not hold exactly `track_count + 1` entries.
    pub fn new(disc_id: impl Into<String>, track_count: u8, toc: Vec<u32>) -> Result<Self> {
        let expected = track_count as usize + 1;
        if toc.len() != expected {
            return Err(Error::InvalidFingerprint {
                expected,
                actual: toc.len(),
            });
        }
        Ok(Self {
            disc_id: disc_id.into(),
            track_count,
            toc,
        })
    }

    /// The FreeDB disc id (8 hex characters).
    pub fn disc_id(&self) -> &str {
        &self.disc_id
    }

    /// Number of audio tracks on the disc.
    pub fn track_count(&self) -> u8 {
        self.track_count
    }

    /// Per-track starting offsets followed by total seconds.
    pub fn toc(&self) -> &[u32] {
        &self.toc
    }

    /// Render the `cddb query` command payload: disc id, track count, and
    /// every TOC entry, each followed by a single space.
    pub fn query_command(&self) -> String {
        use std::fmt::Write;

        let mut cmd = format!("{} {} ", self.disc_id, self.track_count);
        for entry in &self.toc {
            // Writing to a String cannot fail.
            let _ = write!(cmd, "{entry} ");
        }
        cmd
    }
}

/// Raw TOC data as exposed by native disc handles.
///
/// `toc_string` is the whitespace-separated libdiscid form: first track
/// number, last track number, lead-out sector, then one starting offset per
/// track. The first three fields are already captured elsewhere and are
/// discarded during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawToc {
    pub disc_id: String,
    pub track_count: u8,
    pub toc_string: String,
    /// Total disc playing time in seconds.
    pub seconds: u32,
}

impl RawToc {
    fn into_fingerprint(self) -> Result<DiscFingerprint> {
        let tokens: Vec<&str> = self.toc_string.split_whitespace().collect();
        if tokens.len() < 3 {
            return Err(Error::toc(format!(
                "TOC string {:?} is missing its 3-field prefix",
                self.toc_string
            )));
        }

        let mut toc = Vec::with_capacity(tokens.len() - 3 + 1);
        for token in &tokens[3..] {
            let offset = token
                .parse::<u32>()
                .map_err(|_| Error::toc(format!("non-numeric TOC offset {token:?}")))?;
            toc.push(offset);
        }
        toc.push(self.seconds);

        DiscFingerprint::new(self.disc_id, self.track_count, toc)
    }
}

/// Either shape of disc identity a caller may hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DiscSource {
    /// Already-normalized fingerprint.
    Fingerprint(DiscFingerprint),
    /// Raw TOC from a native disc handle, normalized on resolution.
    Toc(RawToc),
}

impl DiscSource {
    /// Normalize into the canonical fingerprint.
    pub fn resolve(self) -> Result<DiscFingerprint> {
        match self {
            Self::Fingerprint(fingerprint) => Ok(fingerprint),
            Self::Toc(raw) => raw.into_fingerprint(),
        }
    }
}

impl From<DiscFingerprint> for DiscSource {
    fn from(fingerprint: DiscFingerprint) -> Self {
        Self::Fingerprint(fingerprint)
    }
}

impl From<RawToc> for DiscSource {
    fn from(raw: RawToc) -> Self {
        Self::Toc(raw)
    }
}

#[cfg(feature = "discid")]
impl From<&discid::DiscId> for RawToc {
    fn from(disc: &discid::DiscId) -> Self {
        let track_count = (disc.last_track_num() - disc.first_track_num() + 1) as u8;
        Self {
            disc_id: disc.freedb_id(),
            track_count,
            toc_string: disc.toc_string(),
            seconds: disc.sectors() as u32 / FRAMES_PER_SECOND,
        }
    }
}

#[cfg(feature = "discid")]
impl From<&discid::DiscId> for DiscSource {
    fn from(disc: &discid::DiscId) -> Self {
        Self::Toc(RawToc::from(disc))
    }
}
