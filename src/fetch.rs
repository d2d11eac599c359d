//! The boundary with the data layer that fetches records.
//!
//! Fetches are asynchronous and may resolve out of order. Each fetch is issued
//! a [RequestTicket] and only the result for the most recently issued ticket is
//! kept, so a slow, superseded response can never overwrite fresher data.

/// The state of data coming from the data layer.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// No data has arrived yet.
    Loading,
    /// The most recent fetch failed.
    Failed,
    /// The most recent fetch succeeded.
    Ready(T),
}

impl<T> FetchState<T> {
    /// Whether the data is still loading.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether the most recent fetch failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// The data, if it has arrived.
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }
}

/// Identifies one fetch. Later fetches have larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    /// The sequence number of the fetch.
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// Tracks in-flight fetches and keeps only the latest result.
#[derive(Debug)]
pub struct LatestWins<T> {
    issued: u64,
    settled: Option<u64>,
    state: FetchState<T>,
}

impl<T> Default for LatestWins<T> {
    fn default() -> Self {
        Self {
            issued: 0,
            settled: None,
            state: FetchState::Loading,
        }
    }
}

impl<T> LatestWins<T> {
    /// Create a tracker with no fetches issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new fetch, superseding any fetch still in flight.
    ///
    /// Data from an earlier fetch stays available until the new one settles.
    pub fn begin(&mut self) -> RequestTicket {
        self.issued += 1;
        RequestTicket(self.issued)
    }

    /// Store `data` as the result of the fetch for `ticket`.
    ///
    /// Returns `false` and discards `data` if a newer fetch has been issued or
    /// this fetch has already settled.
    pub fn resolve(&mut self, ticket: RequestTicket, data: T) -> bool {
        self.settle(ticket, FetchState::Ready(data))
    }

    /// Record that the fetch for `ticket` failed.
    ///
    /// Returns `false` if a newer fetch has been issued or this fetch has
    /// already settled.
    pub fn fail(&mut self, ticket: RequestTicket) -> bool {
        self.settle(ticket, FetchState::Failed)
    }

    fn settle(&mut self, ticket: RequestTicket, state: FetchState<T>) -> bool {
        if ticket.0 != self.issued {
            tracing::debug!(
                "Discarding result of fetch #{} superseded by fetch #{}",
                ticket.0,
                self.issued
            );
            return false;
        }

        if self.settled == Some(ticket.0) {
            tracing::debug!("Ignoring repeated result for fetch #{}", ticket.0);
            return false;
        }

        self.settled = Some(ticket.0);
        self.state = state;
        true
    }

    /// The latest accepted state.
    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// The ticket whose result is currently held, or `None` while loading.
    pub fn settled(&self) -> Option<RequestTicket> {
        self.settled.map(RequestTicket)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    use crate::fetch::{FetchState, LatestWins};

    #[test]
    fn starts_loading() {
        let slot: LatestWins<u8> = LatestWins::new();

        assert!(slot.state().is_loading());
        assert_eq!(slot.settled(), None);
    }

    #[test]
    fn accepts_result_of_latest_fetch() {
        let mut slot = LatestWins::new();
        let ticket = slot.begin();

        assert!(slot.resolve(ticket, "data"));
        assert_eq!(slot.state(), &FetchState::Ready("data"));
        assert_eq!(slot.settled(), Some(ticket));
    }

    #[test]
    fn discards_superseded_result() {
        let mut slot = LatestWins::new();
        let stale = slot.begin();
        let fresh = slot.begin();

        assert!(slot.resolve(fresh, "fresh"));
        assert!(!slot.resolve(stale, "stale"));
        assert_eq!(slot.state(), &FetchState::Ready("fresh"));
    }

    #[test]
    fn superseded_result_is_discarded_even_if_it_arrives_first() {
        let mut slot = LatestWins::new();
        let stale = slot.begin();
        let fresh = slot.begin();

        assert!(!slot.resolve(stale, "stale"));
        assert!(slot.state().is_loading());
        assert!(slot.resolve(fresh, "fresh"));
        assert_eq!(slot.state(), &FetchState::Ready("fresh"));
    }

    #[test]
    fn keeps_previous_data_while_refetching() {
        let mut slot = LatestWins::new();
        let first = slot.begin();
        slot.resolve(first, 1);

        let _second = slot.begin();

        assert_eq!(slot.state().ready(), Some(&1));
    }

    #[test]
    fn failure_replaces_data_and_settles_once() {
        let mut slot = LatestWins::new();
        let first = slot.begin();
        slot.resolve(first, 1);
        let second = slot.begin();

        assert!(slot.fail(second));
        assert!(!slot.resolve(second, 2));
        assert!(slot.state().is_failed());
    }

    #[tokio::test]
    async fn slow_stale_fetch_does_not_overwrite_newer_result() {
        let slot = Arc::new(Mutex::new(LatestWins::new()));
        let stale = slot.lock().unwrap().begin();
        let fresh = slot.lock().unwrap().begin();

        let stale_task = {
            let slot = slot.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                slot.lock().unwrap().resolve(stale, "stale")
            })
        };
        let fresh_task = {
            let slot = slot.clone();
            tokio::spawn(async move {
                slot.lock().unwrap().resolve(fresh, "fresh")
            })
        };

        assert!(fresh_task.await.unwrap());
        assert!(!stale_task.await.unwrap());
        assert_eq!(slot.lock().unwrap().state(), &FetchState::Ready("fresh"));
    }
}
