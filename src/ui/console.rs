//! Output sink for the CLI: capability detection plus stream routing.

use is_terminal::IsTerminal;

use sitepush::config::ConfigWarning;
use sitepush::sync::SyncEvent;
use sitepush::watch::WatchEvent;

use crate::ui::views;

/// Where and how lines are written. JSON mode turns every event into one
/// NDJSON line and suppresses the decorative output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Console {
    pub json: bool,
    pub color: bool,
    pub unicode: bool,
}

impl Console {
    pub fn detect(json: bool) -> Self {
        Self::detect_impl(
            json,
            |key| std::env::var(key).ok(),
            std::io::stdout().is_terminal(),
        )
    }

    fn detect_impl(json: bool, get_env: impl Fn(&str) -> Option<String>, is_tty: bool) -> Self {
        let term_is_dumb = get_env("TERM")
            .map(|term| term.eq_ignore_ascii_case("dumb"))
            .unwrap_or(false);
        let no_color =
            get_env("NO_COLOR").is_some() || get_env("SITEPUSH_NO_COLOR").is_some();

        Self {
            json,
            color: is_tty && !term_is_dumb && !no_color && !json,
            unicode: !term_is_dumb && unicode_locale(&get_env),
        }
    }

    pub fn banner(&self) {
        if self.json {
            return;
        }
        print!("{}", views::render_banner(self.color));
    }

    pub fn sync_event(&self, event: &SyncEvent) {
        if self.json {
            println!("{}", event.to_json());
        } else {
            print!("{}", views::render_sync_event(event, self.color, self.unicode));
        }
    }

    pub fn watch_header(&self) {
        if !self.json {
            print!("{}", views::render_watch_header(self.color, self.unicode));
        }
    }

    pub fn watch_event(&self, event: &WatchEvent) {
        if self.json {
            println!("{}", event.to_json());
            return;
        }
        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        let rendered = views::render_watch_event(&timestamp, event, self.color, self.unicode);
        match event {
            WatchEvent::DispatchFailed { .. } => eprint!("{rendered}"),
            _ => print!("{rendered}"),
        }
    }

    pub fn config_warning(&self, warning: &ConfigWarning) {
        if self.json {
            println!(
                "{}",
                serde_json::json!({ "event": "config_warning", "message": warning.to_string() })
            );
        } else {
            print!(
                "{}",
                views::render_config_warning(warning, self.color, self.unicode)
            );
        }
    }

    pub fn fatal(&self, message: &str) {
        if self.json {
            eprintln!(
                "{}",
                serde_json::json!({ "event": "fatal", "message": message })
            );
        } else {
            eprint!("{}", views::render_fatal(message, self.color, self.unicode));
        }
    }

    pub fn nothing_to_deploy(&self) {
        if self.json {
            println!("{}", serde_json::json!({ "event": "nothing_to_deploy" }));
        } else {
            print!("{}", views::render_nothing_to_deploy(self.color, self.unicode));
        }
    }
}

fn unicode_locale(get_env: &impl Fn(&str) -> Option<String>) -> bool {
    const KEYS: &[&str] = &["LC_ALL", "LC_CTYPE", "LANG"];
    for key in KEYS {
        if let Some(val) = get_env(key) {
            let v = val.to_lowercase();
            if v.contains("utf-8") || v.contains("utf8") {
                return true;
            }
        }
    }

    // Default to true on modern systems unless explicitly "dumb".
    true
}
