//! Lifecycle of a single lookup, as a pure `(State, Event) -> State` function.
//!
//! Invariants kept by [`transition`]:
//! - `Success` always carries a result.
//! - `Error` always carries a non-empty message and never a result.
//! - The click counter only changes on [`Event::Increment`].

use crate::{error::Stage, lookup::Outcome, model::CurrentConditions};

pub const MSG_EMPTY_QUERY: &str = "Enter a city to see the weather.";
pub const MSG_NOT_FOUND: &str = "No matching city found.";
pub const MSG_GEOCODE_UNAVAILABLE: &str = "Could not reach the location service.";
pub const MSG_FORECAST_UNAVAILABLE: &str = "Could not reach the weather service.";
pub const MSG_MALFORMED: &str = "Weather data is missing.";
pub const MSG_GENERIC: &str = "Something went wrong.";
pub const MSG_IDLE_HINT: &str = "Look up any city to see its current conditions.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Loading => "loading",
            Status::Success => "success",
            Status::Error => "error",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The user submitted the search form with this raw text.
    Submit(String),
    OutcomeReceived(Outcome),
    /// The lookup failed unexpectedly; carries whatever detail was available.
    Failed(String),
    /// The click counter button was pressed.
    Increment,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct State {
    status: Status,
    message: Option<String>,
    result: Option<CurrentConditions>,
    clicks: u64,
}

impl State {
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn result(&self) -> Option<&CurrentConditions> {
        self.result.as_ref()
    }

    pub fn clicks(&self) -> u64 {
        self.clicks
    }

    /// Condition label of the shown result, if any.
    pub fn condition(&self) -> Option<&'static str> {
        self.result.as_ref().map(CurrentConditions::condition)
    }

    /// The form accepts input unless a lookup is in flight.
    pub fn can_submit(&self) -> bool {
        self.status != Status::Loading
    }

    /// Hint shown before anything has been looked up.
    pub fn placeholder(&self) -> Option<&'static str> {
        (self.status == Status::Idle && self.result.is_none() && self.message.is_none())
            .then_some(MSG_IDLE_HINT)
    }

    fn settle(self, status: Status, message: &str) -> Self {
        Self {
            status,
            message: Some(message.to_owned()),
            result: None,
            ..self
        }
    }
}

pub fn transition(state: State, event: Event) -> State {
    match event {
        Event::Increment => State {
            clicks: state.clicks.saturating_add(1),
            ..state
        },

        Event::Submit(_) if state.status == Status::Loading => {
            tracing::debug!("submission ignored while a lookup is in flight");
            state
        }
        Event::Submit(query) if query.trim().is_empty() => {
            state.settle(Status::Idle, MSG_EMPTY_QUERY)
        }
        Event::Submit(_) => State {
            status: Status::Loading,
            message: None,
            ..state
        },

        Event::OutcomeReceived(_) | Event::Failed(_) if state.status != Status::Loading => {
            tracing::debug!(status = %state.status, "stale lookup result dropped");
            state
        }
        Event::OutcomeReceived(outcome) => match outcome {
            Outcome::Rejected => state.settle(Status::Idle, MSG_EMPTY_QUERY),
            Outcome::NotFound => state.settle(Status::Idle, MSG_NOT_FOUND),
            Outcome::Unavailable(Stage::Geocode) => {
                state.settle(Status::Error, MSG_GEOCODE_UNAVAILABLE)
            }
            Outcome::Unavailable(Stage::Forecast) => {
                state.settle(Status::Error, MSG_FORECAST_UNAVAILABLE)
            }
            Outcome::Malformed => state.settle(Status::Error, MSG_MALFORMED),
            Outcome::Ok(conditions) => State {
                status: Status::Success,
                message: None,
                result: Some(conditions),
                ..state
            },
        },
        Event::Failed(detail) => {
            let detail = detail.trim();
            let message = if detail.is_empty() {
                MSG_GENERIC
            } else {
                detail
            };
            state.settle(Status::Error, message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::tests::{mild_reading, paris};

    fn conditions() -> CurrentConditions {
        CurrentConditions::new(&paris(), mild_reading())
    }

    fn run(events: impl IntoIterator<Item = Event>) -> State {
        events.into_iter().fold(State::default(), transition)
    }

    fn loading() -> State {
        run([Event::Submit("Paris".into())])
    }

    fn succeeded() -> State {
        run([
            Event::Submit("Paris".into()),
            Event::OutcomeReceived(Outcome::Ok(conditions())),
        ])
    }

    #[test]
    fn starts_idle_and_empty() {
        let s = State::default();
        assert_eq!(s.status(), Status::Idle);
        assert!(s.message().is_none());
        assert!(s.result().is_none());
        assert_eq!(s.clicks(), 0);
        assert_eq!(s.placeholder(), Some(MSG_IDLE_HINT));
        assert!(s.can_submit());
    }

    #[test]
    fn blank_submit_stays_idle_with_prompt() {
        for start in [State::default(), succeeded()] {
            let s = transition(start, Event::Submit("   ".into()));
            assert_eq!(s.status(), Status::Idle);
            assert_eq!(s.message(), Some(MSG_EMPTY_QUERY));
            assert!(s.result().is_none());
            assert!(s.placeholder().is_none());
        }
    }

    #[test]
    fn submit_enters_loading_and_clears_message() {
        let s = run([Event::Submit("".into()), Event::Submit("Paris".into())]);
        assert_eq!(s.status(), Status::Loading);
        assert!(s.message().is_none());
        assert!(!s.can_submit());
    }

    #[test]
    fn submit_while_loading_is_ignored() {
        let before = loading();
        let after = transition(before.clone(), Event::Submit("Berlin".into()));
        assert_eq!(before, after);

        let after = transition(before.clone(), Event::Submit("  ".into()));
        assert_eq!(before, after);
    }

    #[test]
    fn outcomes_map_to_status_and_message() {
        let cases = [
            (Outcome::NotFound, Status::Idle, MSG_NOT_FOUND),
            (Outcome::Rejected, Status::Idle, MSG_EMPTY_QUERY),
            (Outcome::Unavailable(Stage::Geocode), Status::Error, MSG_GEOCODE_UNAVAILABLE),
            (Outcome::Unavailable(Stage::Forecast), Status::Error, MSG_FORECAST_UNAVAILABLE),
            (Outcome::Malformed, Status::Error, MSG_MALFORMED),
        ];

        for (outcome, status, message) in cases {
            let s = transition(loading(), Event::OutcomeReceived(outcome.clone()));
            assert_eq!(s.status(), status, "{outcome:?}");
            assert_eq!(s.message(), Some(message), "{outcome:?}");
            assert!(s.result().is_none(), "{outcome:?}");
        }
    }

    #[test]
    fn success_holds_result_without_message() {
        let s = succeeded();
        assert_eq!(s.status(), Status::Success);
        assert!(s.message().is_none());
        assert_eq!(
            s.result().map(|c| c.location.as_str()),
            Some("Paris, France")
        );
        assert_eq!(s.condition(), Some("Mainly clear"));
    }

    #[test]
    fn new_lookup_keeps_previous_result_until_it_settles() {
        let s = transition(succeeded(), Event::Submit("Berlin".into()));
        assert_eq!(s.status(), Status::Loading);
        assert!(s.result().is_some());

        let s = transition(s, Event::OutcomeReceived(Outcome::Unavailable(Stage::Forecast)));
        assert_eq!(s.status(), Status::Error);
        assert!(s.result().is_none());
    }

    #[test]
    fn failure_uses_detail_or_generic_message() {
        let s = transition(loading(), Event::Failed("expected value at line 1".into()));
        assert_eq!(s.status(), Status::Error);
        assert_eq!(s.message(), Some("expected value at line 1"));

        let s = transition(loading(), Event::Failed("  ".into()));
        assert_eq!(s.message(), Some(MSG_GENERIC));
        assert!(s.result().is_none());
    }

    #[test]
    fn stale_results_are_dropped() {
        let idle = State::default();
        assert_eq!(
            transition(idle.clone(), Event::OutcomeReceived(Outcome::Ok(conditions()))),
            idle
        );

        let done = succeeded();
        assert_eq!(transition(done.clone(), Event::Failed("late".into())), done);
    }

    #[test]
    fn counter_is_independent_of_lookups() {
        let s = run([
            Event::Increment,
            Event::Submit("Paris".into()),
            Event::Increment,
            Event::OutcomeReceived(Outcome::NotFound),
            Event::Submit("".into()),
            Event::Increment,
        ]);
        assert_eq!(s.clicks(), 3);
        assert_eq!(s.message(), Some(MSG_EMPTY_QUERY));

        let only_clicks = run([Event::Increment, Event::Increment, Event::Increment]);
        assert_eq!(only_clicks.clicks(), 3);
        assert_eq!(only_clicks.status(), Status::Idle);
    }
}
