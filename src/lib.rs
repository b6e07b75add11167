//! Client for the CDDB (CD database) v1 protocol over HTTP.
//!
//! Given a disc's table of contents, `query` asks a FreeDB-style server
//! which album entries match, and `read` fetches the full entry (artist,
//! title, track listing, year, genre) for a chosen match.
//!
//! # Flow
//!
//! 1. Build a [`DiscFingerprint`] from the disc id, track count, and TOC
//!    (or hand a raw TOC to [`DiscSource::Toc`]; with the `discid` feature,
//!    a `discid::DiscId` converts directly).
//! 2. [`CddbClient::query`] classifies the answer: one exact match, a list
//!    of candidates, or a bare status code.
//! 3. [`CddbClient::read`] with the chosen category and disc id returns the
//!    parsed [`DiscRecord`].
//!
//! ```no_run
//! use cddb::{CddbClient, DiscFingerprint, QueryResult, ReadResult};
//!
//! # fn main() -> cddb::Result<()> {
//! let client = CddbClient::new();
//! let disc = DiscFingerprint::new("03015501", 1, vec![150, 344])?;
//!
//! if let QueryResult::Exact(m) = client.query(disc)? {
//!     if let ReadResult::Entry(record) = client.read(&m.category, &m.disc_id)? {
//!         println!("{} - {}", record.artist().unwrap_or("?"), record.title().unwrap_or("?"));
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Calls are blocking, one HTTP round trip each. The client is immutable
//! after construction and safe to share across threads.

pub mod client;
pub mod disc;
pub mod error;
pub mod hello;
pub mod protocol;
pub mod record;

pub use client::{CddbClient, DEFAULT_SERVER};
pub use disc::{DiscFingerprint, DiscSource, RawToc};
pub use error::{Error, Result};
pub use hello::Hello;
pub use protocol::{QueryMatch, QueryResult, ReadResult};
pub use record::DiscRecord;
