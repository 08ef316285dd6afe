use crate::{
    lookup::Lookup,
    state::{Event, State, Status, transition},
};

/// One page's worth of UI state, driven by a [`Lookup`].
#[derive(Debug)]
pub struct Session {
    lookup: Lookup,
    state: State,
}

impl Session {
    pub fn new(lookup: Lookup) -> Self {
        Self {
            lookup,
            state: State::default(),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Handle a form submission and, if it starts a lookup, run it to completion.
    pub async fn submit(&mut self, raw_query: &str) -> &State {
        self.apply(Event::Submit(raw_query.to_owned()));
        if self.state.status() != Status::Loading {
            return &self.state;
        }

        let event = match self.lookup.run(raw_query).await {
            Ok(outcome) => Event::OutcomeReceived(outcome),
            Err(err) => {
                tracing::error!(error = %err, "lookup failed unexpectedly");
                Event::Failed(err.to_string())
            }
        };
        self.apply(event);

        &self.state
    }

    pub fn increment(&mut self) -> u64 {
        self.apply(Event::Increment);
        self.state.clicks()
    }

    fn apply(&mut self, event: Event) {
        let current = std::mem::take(&mut self.state);
        self.state = transition(current, event);
    }
}
