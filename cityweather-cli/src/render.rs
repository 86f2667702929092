use chrono::NaiveDate;
use cityweather_core::{ByDateView, Condition, HomeView};

/// One weather card: title, condition icon, temperature, description, humidity.
pub fn card(title: &str, temperature_c: f64, humidity_pct: u8, condition: &Condition) -> String {
    format!(
        "== {title} ==\n  {temperature_c}°C\n  {}\n  Humidity: {humidity_pct}%\n  Icon: {}\n",
        condition.description,
        condition.icon_url(),
    )
}

fn missing_card(title: &str) -> String {
    format!("== {title} ==\n  No forecast available\n")
}

pub fn home(view: &HomeView) -> String {
    if let Some(error) = view.error {
        return format!("{error}\n");
    }
    let Some(current) = &view.current else {
        return String::new();
    };

    let mut out = card(
        &format!("Weather in {}", view.city),
        current.temperature_c,
        current.humidity_pct,
        &current.condition,
    );

    for (title, sample) in [
        ("Tomorrow's Weather", &view.tomorrow),
        ("Day After Tomorrow's Weather", &view.day_after),
    ] {
        out.push('\n');
        out.push_str(&match sample {
            Some(s) => card(title, s.temperature_c, s.humidity_pct, &s.condition),
            None => missing_card(title),
        });
    }
    out
}

pub fn by_date(view: &ByDateView) -> String {
    if let Some(error) = view.error {
        return format!("{error}\n");
    }
    let title = match view.date {
        Some(date) => format!("Weather in {} on {}", view.city.trim(), long_date(date)),
        None => format!("Weather in {}", view.city.trim()),
    };

    match &view.sample {
        Some(s) => card(&title, s.temperature_c, s.humidity_pct, &s.condition),
        None => missing_card(&title),
    }
}

fn long_date(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}
