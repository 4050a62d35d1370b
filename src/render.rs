//! Plain-text rendering of the dashboard.

use std::fmt::Write;
use std::time::Instant;

use weatherdeck_dashboard::{DashboardController, NotificationKind, ViewState};

pub const HELP: &str = "\
Commands:
  search <city>    look up current weather (a bare city name works too)
  unit             switch between Celsius and Fahrenheit
  add              add the current result to favorites
  remove <city>    remove a favorite
  clear            remove all favorites
  favorites        list favorites
  status           show the dashboard
  dismiss          hide the current notice
  help             show this help
  quit             exit";

pub fn render_dashboard(controller: &DashboardController, now: Instant) -> String {
    let mut out = String::new();
    let unit = controller.unit();

    match controller.view() {
        ViewState::Idle => {
            let _ = writeln!(out, "No city searched yet. Try `search London`.");
        }
        ViewState::Loading { query } => {
            let _ = writeln!(out, "Searching for {}...", query);
        }
        ViewState::Result(snapshot) => {
            let _ = writeln!(out, "{}", snapshot.heading());
            let _ = writeln!(out, "  Temperature: {}", snapshot.formatted_temperature());
            let _ = writeln!(out, "  [unit] {}   [add] Add to Favorites", unit.toggle_label());
        }
        ViewState::Error(message) => {
            let _ = writeln!(out, "{}", message);
        }
    }

    out.push('\n');
    out.push_str(&render_favorites(controller));

    if let Some(notification) = controller.notification_at(now) {
        let marker = match notification.kind {
            NotificationKind::Error => "!",
            NotificationKind::Warning => "warning:",
        };
        let _ = writeln!(
            out,
            "\n{} {} ({}s, `dismiss` to hide)",
            marker,
            notification.message,
            notification.remaining_at(now).as_secs()
        );
    }

    out
}

pub fn render_favorites(controller: &DashboardController) -> String {
    let favorites = controller.favorites();
    let mut out = String::new();

    if favorites.is_empty() {
        let _ = writeln!(out, "Favorites: none");
        return out;
    }

    let _ = writeln!(out, "Favorites ({}):", favorites.len());
    for fav in favorites {
        let _ = writeln!(out, "  - {:<24} {}", fav.name, fav.formatted_temperature());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use weatherdeck_store::MemoryStorage;
    use weatherdeck_weather::OpenWeatherClient;

    fn controller() -> DashboardController {
        let client =
            OpenWeatherClient::new("http://127.0.0.1:1", "k", std::time::Duration::from_secs(1))
                .unwrap();
        DashboardController::new(Arc::new(client), Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_idle_dashboard() {
        let rendered = render_dashboard(&controller(), Instant::now());
        assert!(rendered.contains("No city searched yet"));
        assert!(rendered.contains("Favorites: none"));
    }

    #[test]
    fn test_favorites_use_their_own_unit() {
        let storage = MemoryStorage::new().with_entry(
            "favorites",
            r#"[{"name":"Boston","country":"US","temp":61.5,"unit":"imperial"}]"#,
        );
        let client =
            OpenWeatherClient::new("http://127.0.0.1:1", "k", std::time::Duration::from_secs(1))
                .unwrap();
        let controller = DashboardController::new(Arc::new(client), Arc::new(storage));

        let rendered = render_favorites(&controller);
        assert!(rendered.contains("Favorites (1):"));
        assert!(rendered.contains("61.5°F"));
    }

    #[test]
    fn test_error_notice_shown_until_expiry() {
        let mut controller = controller();
        assert!(controller.begin_search("  ").is_none());

        let now = Instant::now();
        let rendered = render_dashboard(&controller, now);
        assert!(rendered.contains("! Please enter a city name"));

        let later = now + std::time::Duration::from_secs(10);
        assert!(!render_dashboard(&controller, later).contains("! "));
    }
}
