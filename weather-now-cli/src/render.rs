use weather_now_core::{CurrentConditions, State, Status, round_display};

/// Multi-line card for a successful lookup.
pub fn card(result: &CurrentConditions) -> String {
    let updated = match result.observed_at() {
        Some(at) => at.format("%a %-d %b %Y, %H:%M").to_string(),
        None => result.observed.clone(),
    };

    format!(
        "{location}\n\
         Updated at {updated}\n\
         \n  {temp}°C  {condition}\n\
         \n  Feels like  {feels}°C\
         \n  Humidity    {humidity}%\
         \n  Wind        {wind} km/h",
        location = result.location,
        temp = round_display(result.temperature_c),
        condition = result.condition(),
        feels = round_display(result.feels_like_c),
        humidity = round_display(result.humidity_pct),
        wind = round_display(result.wind_speed_kmh),
    )
}

/// Everything the page would show for `state`, minus the counter.
pub fn state(state: &State) -> String {
    if state.status() == Status::Loading {
        return "Searching…".to_string();
    }

    let mut out = Vec::new();
    if let Some(message) = state.message() {
        out.push(message.to_string());
    }
    if let (Status::Success, Some(result)) = (state.status(), state.result()) {
        out.push(card(result));
    }
    if let Some(hint) = state.placeholder() {
        out.push(hint.to_string());
    }

    out.join("\n")
}

pub fn counter(clicks: u64) -> String {
    format!("Button clicks: {clicks}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_now_core::{CurrentReading, Event, GeocodeMatch, Outcome, transition};

    fn paris() -> CurrentConditions {
        CurrentConditions::new(
            &GeocodeMatch {
                latitude: 48.85,
                longitude: 2.35,
                name: "Paris".into(),
                country: Some("France".into()),
                timezone: "Europe/Paris".into(),
            },
            CurrentReading {
                temperature_2m: 18.4,
                apparent_temperature: 17.9,
                relative_humidity_2m: 60.0,
                wind_speed_10m: 12.3,
                weather_code: 1,
                time: "2024-05-01T12:00".into(),
            },
        )
    }

    #[test]
    fn card_shows_rounded_values() {
        let text = card(&paris());

        assert!(text.starts_with("Paris, France\n"));
        assert!(text.contains("Updated at Wed 1 May 2024, 12:00"));
        assert!(text.contains("18°C  Mainly clear"));
        assert!(text.contains("Feels like  18°C"));
        assert!(text.contains("Humidity    60%"));
        assert!(text.contains("Wind        12 km/h"));
    }

    #[test]
    fn card_keeps_raw_timestamp_when_unparseable() {
        let mut result = paris();
        result.observed = "later".into();
        assert!(card(&result).contains("Updated at later"));
    }

    #[test]
    fn initial_state_shows_hint() {
        assert_eq!(
            state(&State::default()),
            "Look up any city to see its current conditions."
        );
    }

    #[test]
    fn error_state_shows_only_message() {
        let s = [
            Event::Submit("Paris".into()),
            Event::OutcomeReceived(Outcome::Malformed),
        ]
        .into_iter()
        .fold(State::default(), transition);
        assert_eq!(state(&s), "Weather data is missing.");
    }

    #[test]
    fn success_state_shows_card() {
        let s = [
            Event::Submit("Paris".into()),
            Event::OutcomeReceived(Outcome::Ok(paris())),
        ]
        .into_iter()
        .fold(State::default(), transition);
        assert_eq!(state(&s), card(&paris()));
    }

    #[test]
    fn loading_state_shows_progress() {
        let s = transition(State::default(), Event::Submit("Paris".into()));
        assert_eq!(state(&s), "Searching…");
    }
}
