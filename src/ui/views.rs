//! Line renderers for deploy and watch output.
//!
//! Every function returns the finished text (including the trailing newline)
//! so callers decide which stream it goes to.

use sitepush::config::ConfigWarning;
use sitepush::sync::SyncEvent;
use sitepush::watch::WatchEvent;

use crate::ui::icon::Icon;
use crate::ui::text::Paint;

pub fn render_banner(supports_color: bool) -> String {
    let title = format!("sitepush {}", env!("CARGO_PKG_VERSION"));
    format!("{}\n", Paint::Title.apply(&title, supports_color))
}

pub fn render_sync_event(
    event: &SyncEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    match event {
        SyncEvent::SiteStarted { site } => format!(
            "{}\n",
            Paint::Title.apply(&format!("Deploying {site}"), supports_color)
        ),
        SyncEvent::MappingStarted {
            source,
            destination,
        } => format!(
            "  {} {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            Paint::Dim.apply(&format!("{source} -> {destination}"), supports_color)
        ),
        SyncEvent::FileDeployed { remote } => format!(
            "  {} {}\n",
            Icon::Success.colored(supports_color, supports_unicode),
            remote
        ),
        SyncEvent::FileSkipped { path } => format!(
            "  {} {}\n",
            Icon::Skip.colored(supports_color, supports_unicode),
            Paint::Dim.apply(path, supports_color)
        ),
        SyncEvent::SiteCompleted {
            site,
            deployed,
            skipped,
        } => format!(
            "{} {}: {} deployed, {} skipped\n",
            Icon::Success.colored(supports_color, supports_unicode),
            site,
            deployed,
            skipped
        ),
        SyncEvent::WatchArmed { site, sources } => format!(
            "{} Watching {}: {}\n",
            Icon::Watch.colored(supports_color, supports_unicode),
            site,
            sources.join(", ")
        ),
    }
}

pub fn render_watch_header(supports_color: bool, supports_unicode: bool) -> String {
    format!(
        "\n{} Watching for changes. Press Ctrl+C to stop.\n",
        Icon::Watch.colored(supports_color, supports_unicode)
    )
}

pub fn render_watch_event(
    timestamp: &str,
    event: &WatchEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = format!("[{}]", timestamp);

    match event {
        WatchEvent::FileChanged { path } => format!(
            "{} {} Changed: {}\n",
            prefix,
            Icon::Arrow.colored(supports_color, supports_unicode),
            path
        ),
        WatchEvent::FileDeployed { remote } => format!(
            "{} {} Deployed: {}\n",
            prefix,
            Icon::Success.colored(supports_color, supports_unicode),
            remote
        ),
        WatchEvent::DispatchFailed { path, message } => format!(
            "{} {} Failed: {}: {}\n",
            prefix,
            Icon::Error.colored(supports_color, supports_unicode),
            path,
            message
        ),
        WatchEvent::Shutdown => format!(
            "\n{} {} Watch stopped.\n",
            prefix,
            Icon::Watch.colored(supports_color, supports_unicode)
        ),
    }
}

pub fn render_config_warning(
    warning: &ConfigWarning,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    format!(
        "{} {}\n",
        Icon::Warning.colored(supports_color, supports_unicode),
        Paint::Warning.apply(&warning.to_string(), supports_color)
    )
}

pub fn render_fatal(message: &str, supports_color: bool, supports_unicode: bool) -> String {
    format!(
        "{} {}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        Paint::Error.apply(message, supports_color)
    )
}

pub fn render_nothing_to_deploy(supports_color: bool, supports_unicode: bool) -> String {
    format!(
        "{} {}\n",
        Icon::Warning.colored(supports_color, supports_unicode),
        Paint::Warning.apply("Nothing to deploy", supports_color)
    )
}
