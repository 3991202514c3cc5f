use clap::Parser;

use sitepush::deploy::DeployTarget;

/// Exit status for a successful run, including "nothing to deploy".
pub const EXIT_OK: u8 = 0;
/// Exit status for fatal errors and unrecognized arguments.
pub const EXIT_ERROR: u8 = 1;
/// Exit status when usage was requested.
pub const EXIT_USAGE: u8 = 2;

/// Sitepush - declarative deploys into a remote content store
#[derive(Parser, Debug)]
#[command(name = "sitepush")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Emit newline-delimited JSON events instead of colored lines
    #[arg(long)]
    pub json: bool,

    /// Selector and mode tokens: [name:<site> | env:<tag>] [watch]
    #[arg(value_name = "TOKEN")]
    pub tokens: Vec<String>,
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Print usage and exit with the usage status.
    Help,
    /// Run a deploy. `target` is `None` when the configured default
    /// environment decides.
    Deploy {
        target: Option<DeployTarget>,
        watch: bool,
    },
}

const HELP_TOKENS: &[&str] = &["-help", "--help", "-h", "-?", "/?", "?"];

pub fn is_help_token(arg: &str) -> bool {
    HELP_TOKENS
        .iter()
        .any(|token| arg.eq_ignore_ascii_case(token))
}

/// Help spellings are honored anywhere on the command line, including the
/// ones clap would reject as unknown flags. Called before clap parses.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|arg| is_help_token(arg))
}

/// Interpret the positional tokens.
///
/// Grammar: an optional selector (`name:<site>` or `env:<tag>`) plus an
/// optional `watch`, in any order. Tokens match case-insensitively; the
/// selector value keeps its spelling.
pub fn interpret(tokens: &[String]) -> Result<Invocation, String> {
    let mut target = None;
    let mut watch = false;

    for token in tokens {
        if is_help_token(token) {
            return Ok(Invocation::Help);
        }
        if token.eq_ignore_ascii_case("watch") {
            watch = true;
        } else if let Some(value) = strip_selector(token, "name:") {
            if target.is_some() {
                return Err(format!("conflicting selector: {token}"));
            }
            target = Some(DeployTarget::ByName(value.to_string()));
        } else if let Some(value) = strip_selector(token, "env:") {
            if target.is_some() {
                return Err(format!("conflicting selector: {token}"));
            }
            target = Some(DeployTarget::ByEnvironment(value.to_string()));
        } else {
            return Err(format!("unrecognized argument: {token}"));
        }
    }

    Ok(Invocation::Deploy { target, watch })
}

fn strip_selector<'a>(token: &'a str, prefix: &str) -> Option<&'a str> {
    match token.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => token.get(prefix.len()..),
        _ => None,
    }
}

/// Usage text for help requests and argument errors.
pub fn usage() -> String {
    let mut text = String::new();
    text.push_str(&format!("sitepush {}\n\n", env!("CARGO_PKG_VERSION")));
    text.push_str("Usage: sitepush [name:<site> | env:<tag>] [watch] [--json]\n\n");
    text.push_str("With no arguments the configured default environment is deployed.\n\n");
    text.push_str("Tokens:\n");
    text.push_str("  name:<site>    deploy the named site\n");
    text.push_str("  env:<tag>      deploy every site tagged with that environment\n");
    text.push_str("  watch          stay running and redeploy files as they change\n\n");
    text.push_str("Options:\n");
    text.push_str("  --json         newline-delimited JSON events\n");
    text.push_str("  --version      print the version\n");
    text.push_str("  -help, -?, /?  this message\n");
    text
}
