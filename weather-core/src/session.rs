use crate::{ResolveError, Resolver, WeatherSnapshot};

/// Handle for one in-flight search; only the newest ticket may update the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Per-user display state, updated only by search outcomes.
#[derive(Debug, Default)]
pub struct Session {
    query: String,
    snapshot: Option<WeatherSnapshot>,
    error: Option<String>,
    in_flight: bool,
    sequence: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Nothing to show yet: no result, no error, nothing loading.
    pub fn is_idle(&self) -> bool {
        self.snapshot.is_none() && self.error.is_none() && !self.in_flight
    }

    /// Start a search. Returns `None`, leaving the displayed state alone, for blank input
    /// or while another search is still outstanding.
    pub fn begin(&mut self, input: &str) -> Option<Ticket> {
        if input.trim().is_empty() || self.in_flight {
            return None;
        }

        self.query = input.to_string();
        self.snapshot = None;
        self.error = None;
        self.in_flight = true;
        self.sequence += 1;

        Some(Ticket(self.sequence))
    }

    /// Apply an outcome. Returns `false` and changes nothing when the ticket is stale.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<Option<WeatherSnapshot>, ResolveError>,
    ) -> bool {
        if ticket.0 != self.sequence {
            tracing::debug!(stale = ticket.0, current = self.sequence, "discarding stale result");
            return false;
        }

        self.in_flight = false;
        match outcome {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                self.error = None;
            }
            Err(err) => {
                self.snapshot = None;
                self.error = Some(err.to_string());
            }
        }

        true
    }

    /// Begin, resolve and complete in one go. Returns `false` if the search was not started.
    pub async fn search(&mut self, resolver: &Resolver, input: &str) -> bool {
        let Some(ticket) = self.begin(input) else {
            return false;
        };

        let outcome = resolver.resolve(input).await;
        self.complete(ticket, outcome)
    }
}
