//! Blocking HTTP client for the CDDB CGI endpoint.
//!
//! One call, one round trip: `query` and `read` each issue a single GET and
//! return once the response body is parsed. The client holds no state
//! beyond its configuration, so it can be shared across threads; there is
//! no caching, no retrying, and no timeout of its own (configure one on the
//! transport if the server may hang).

use crate::disc::DiscSource;
use crate::error::Result;
use crate::hello::Hello;
use crate::protocol::{self, QueryResult, ReadResult};

/// The canonical FreeDB CGI endpoint.
pub const DEFAULT_SERVER: &str = "http://freedb.freedb.org/~cddb/cddb.cgi";

/// Protocol level sent with every command. Level 5 is required for servers
/// to include the DYEAR and DGENRE fields in read replies.
const PROTO_LEVEL: u8 = 5;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// CDDB client bound to one server and one identity.
pub struct CddbClient {
    http: reqwest::blocking::Client,
    server_url: String,
    hello: Hello,
}

impl CddbClient {
    /// Create a client for the default FreeDB server, with identity derived
    /// from the environment.
    pub fn new() -> Self {
        Self::with_hello(Hello::from_env())
    }

    /// Create a client with an explicit identity.
    pub fn with_hello(hello: Hello) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            server_url: DEFAULT_SERVER.to_string(),
            hello,
        }
    }

    /// Point the client at a different CGI endpoint.
    pub fn with_server(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into();
        self
    }

    /// The endpoint this client talks to.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// The identity sent with each command.
    pub fn hello(&self) -> &Hello {
        &self.hello
    }

    /// Look up a disc and classify the server's answer.
    ///
    /// Returns [`QueryResult::Exact`] for a single match,
    /// [`QueryResult::Inexact`] for a candidate list the caller picks from,
    /// and [`QueryResult::Other`] for any unhandled status (202 means no
    /// match was found).
    pub fn query(&self, source: impl Into<DiscSource>) -> Result<QueryResult> {
        let fingerprint = source.into().resolve()?;
        let command = format!("query+{}", quote_plus(&fingerprint.query_command()));
        let body = self.send(&command)?;
        protocol::parse_query_response(&body)
    }

    /// Fetch the full entry filed under `category`/`disc_id`, as reported
    /// by an earlier query.
    ///
    /// A 210 reply comes back parsed as [`ReadResult::Entry`]; a 417 reply
    /// keeps the server's raw lines as [`ReadResult::AccessDenied`].
    pub fn read(&self, category: &str, disc_id: &str) -> Result<ReadResult> {
        let command = format!("read+{category}+{disc_id}");
        let body = self.send(&command)?;
        protocol::parse_read_response(&body)
    }

    /// Build the full request URL for a `cddb` command.
    fn command_url(&self, command: &str) -> String {
        format!(
            "{}?cmd=cddb+{}&hello={}&proto={}",
            self.server_url,
            command,
            self.hello.query_clause(),
            PROTO_LEVEL
        )
    }

    /// Issue one blocking GET for a `cddb` command and return the response
    /// text. HTTP-level failures (including 4xx/5xx) surface as transport
    /// errors; protocol status codes live in the body.
    fn send(&self, command: &str) -> Result<String> {
        let url = self.command_url(command);
        tracing::debug!(%url, "sending CDDB command");
        let response = self.http.get(&url).send()?.error_for_status()?;
        let body = response.text()?;
        tracing::debug!(bytes = body.len(), "received CDDB response");
        Ok(body)
    }
}

impl Default for CddbClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Form-style percent encoding: spaces become `+`, everything else outside
/// `[A-Za-z0-9_.~-]` is percent-escaped.
fn quote_plus(s: &str) -> String {
    urlencoding::encode(s).replace("%20", "+")
}
