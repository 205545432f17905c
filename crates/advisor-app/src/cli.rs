use clap::{Parser, Subcommand};

/// Advisor: chat with the legal question-answering service from a terminal.
#[derive(Parser, Debug)]
#[command(name = "advisor", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error) or a full filter directive.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Service base URL override, e.g. http://localhost:8000/api.
    #[arg(long)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the chat (default).
    Chat,
    /// Store a token issued by the service.
    Login {
        #[arg(long)]
        token: String,
        /// Name to greet you with.
        #[arg(long)]
        user: Option<String>,
    },
    /// Forget the stored token.
    Logout,
}

impl Args {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Chat)
    }

    /// `EnvFilter` directive for `--log-level`. A bare level is scoped to
    /// this workspace's crates.
    pub fn log_directive(&self) -> Option<String> {
        self.log_level.as_deref().map(|level| {
            if level.contains('=') {
                level.to_string()
            } else {
                format!("advisor={level}")
            }
        })
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_is_the_default() {
        let args = Args::parse_from(["advisor"]);
        assert_eq!(args.command(), Command::Chat);
    }

    #[test]
    fn login_takes_token_and_user() {
        let args = Args::parse_from(["advisor", "login", "--token", "t-1", "--user", "Sana"]);
        assert_eq!(
            args.command(),
            Command::Login {
                token: "t-1".into(),
                user: Some("Sana".into()),
            }
        );
    }

    #[test]
    fn bare_log_level_is_scoped() {
        let args = Args::parse_from(["advisor", "--log-level", "debug"]);
        assert_eq!(args.log_directive().as_deref(), Some("advisor=debug"));

        let args = Args::parse_from(["advisor", "--log-level", "reqwest=trace"]);
        assert_eq!(args.log_directive().as_deref(), Some("reqwest=trace"));
    }
}
