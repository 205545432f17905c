//! Line-oriented chat front-end over an [`Orchestrator`].

use advisor_chat::{BackendStatus, Message, Orchestrator, Role, Session};
use advisor_common::{AdvisorError, ChatSignal, NotificationLevel};
use advisor_config::ChatConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::{self, error::TryRecvError};

const HELP: &str = "\
Type a question and press Enter. Commands:
  /new            start a new chat
  /list           show past chats
  /switch <n>     open chat number n from /list
  /delete <n>     delete chat number n from /list
  /refresh        reload the chat list
  /quit           exit";

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Empty,
    Question(String),
    New,
    List,
    Switch(usize),
    Delete(usize),
    Refresh,
    Help,
    Quit,
    Invalid(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }
    let Some(command) = line.strip_prefix('/') else {
        return Input::Question(line.to_string());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let index = parts.next().map(str::parse::<usize>);
    match (name, index) {
        ("new", None) => Input::New,
        ("list", None) => Input::List,
        ("refresh", None) => Input::Refresh,
        ("help", None) => Input::Help,
        ("quit" | "exit", None) => Input::Quit,
        ("switch", Some(Ok(n))) if n > 0 => Input::Switch(n),
        ("delete", Some(Ok(n))) if n > 0 => Input::Delete(n),
        _ => Input::Invalid(line.to_string()),
    }
}

/// What has already been printed.
#[derive(Default)]
struct View {
    shown: usize,
    status: Option<BackendStatus>,
    pending: bool,
}

pub async fn run(
    mut orch: Orchestrator,
    user: &str,
    chat: &ChatConfig,
) -> Result<(), AdvisorError> {
    let mut signals = orch.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut view = View::default();

    println!("Welcome, {user}. Type /help for commands.");
    orch.start();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_line(&mut orch, &line, chat) {
                    break;
                }
            }
            _ = orch.step(), if orch.in_flight() > 0 => {}
        }
        render(&mut orch, &mut signals, &mut view);
    }
    Ok(())
}

/// Act on one input line. Returns `false` when the user asked to quit.
fn handle_line(orch: &mut Orchestrator, line: &str, chat: &ChatConfig) -> bool {
    if orch.state().awaiting_confirmation().is_some() {
        let answer = line.trim();
        if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") {
            orch.confirm_delete();
        } else {
            orch.cancel_delete();
            println!("Kept.");
        }
        return true;
    }

    match parse_input(line) {
        Input::Empty => {}
        Input::Question(text) => {
            let state = orch.state();
            if state.backend_status() != BackendStatus::Connected {
                println!(
                    "Cannot send: backend is {}.",
                    state.backend_status().label().to_lowercase()
                );
            } else if state.is_pending() {
                println!("Still waiting for the previous answer.");
            } else if state.is_loading_history() {
                println!("Still loading this chat.");
            } else {
                orch.ask(text);
            }
        }
        Input::New => orch.new_chat(),
        Input::List => print_sidebar(orch, chat),
        Input::Switch(n) => match nth_session(orch, n) {
            Some(id) => orch.switch_to(id),
            None => println!("No chat number {n}. Try /list."),
        },
        Input::Delete(n) => match nth_session(orch, n) {
            Some(id) => orch.request_delete(id),
            None => println!("No chat number {n}. Try /list."),
        },
        Input::Refresh => orch.refresh_sidebar(),
        Input::Help => println!("{HELP}"),
        Input::Quit => return false,
        Input::Invalid(text) => println!("Unknown command: {text}. Try /help."),
    }
    true
}

fn nth_session(orch: &Orchestrator, n: usize) -> Option<String> {
    orch.state().sidebar().get(n - 1).map(|s| s.id.clone())
}

fn print_sidebar(orch: &Orchestrator, chat: &ChatConfig) {
    let state = orch.state();
    if state.sidebar().is_empty() {
        println!("No past chats.");
        return;
    }
    let max = usize::try_from(chat.title_preview_chars).unwrap_or(usize::MAX);
    for (i, session) in state.sidebar().iter().enumerate() {
        let active = state.active_session().server_id() == Some(session.id.as_str());
        println!("{}", sidebar_line(i + 1, session, active, max));
    }
}

/// One `/list` row: marker, number, truncated title, last update.
fn sidebar_line(number: usize, session: &Session, active: bool, max_title: usize) -> String {
    let marker = if active { '*' } else { ' ' };
    let updated = session
        .last_updated
        .map(|t| t.format(" (%Y-%m-%d %H:%M)").to_string())
        .unwrap_or_default();
    format!(
        "{marker}{number:>3}. {}{updated}",
        session.display_title(max_title)
    )
}

fn render(
    orch: &mut Orchestrator,
    signals: &mut broadcast::Receiver<ChatSignal>,
    view: &mut View,
) {
    loop {
        match signals.try_recv() {
            Ok(ChatSignal::SessionSwitched(id)) => {
                view.shown = 0;
                let title = id
                    .server_id()
                    .and_then(|sid| orch.state().session(sid))
                    .map(|s| s.title.clone())
                    .unwrap_or_else(|| "New chat".to_string());
                println!("--- {title} ---");
            }
            Ok(ChatSignal::ConfirmDelete { title, .. }) => {
                println!("Delete \"{title}\"? [y/N]");
            }
            Ok(ChatSignal::Notified) => {
                for n in orch.notifications().drain() {
                    let tag = match n.level {
                        NotificationLevel::Warning => "warning",
                        NotificationLevel::Error => "error",
                    };
                    println!("[{tag}] {}: {}", n.title, n.body);
                }
            }
            Ok(_) => {}
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "display fell behind chat signals");
            }
            Err(_) => break,
        }
    }

    let state = orch.state();
    if view.status != Some(state.backend_status()) {
        view.status = Some(state.backend_status());
        println!("Status: {}", state.backend_status().label());
    }

    let messages = state.messages();
    if messages.len() < view.shown {
        view.shown = 0;
    }
    for message in &messages[view.shown..] {
        print_message(message);
    }
    view.shown = messages.len();

    if state.is_pending() && !view.pending {
        println!("(thinking...)");
    }
    view.pending = state.is_pending();
}

fn print_message(message: &Message) {
    let who = match message.role {
        Role::User => "You",
        Role::Bot => "Advisor",
    };
    println!("[{}] {who}: {}", message.timestamp, message.content);
    for source in &message.sources {
        match &source.page {
            Some(page) => {
                let page = page
                    .as_str()
                    .map(String::from)
                    .unwrap_or_else(|| page.to_string());
                println!("    source: {} (p. {page})", source.content);
            }
            None => println!("    source: {}", source.content),
        }
    }
}
