//! Interactive shell around the authorization core.
//!
//! Thin consumer of the session and route guard; all screens it "renders"
//! are just printed path names.

mod accounts;

use std::io::{BufRead, Write};

use tracing_subscriber::EnvFilter;

use opsdesk_guard::{LOGIN_PATH, Navigation, RouteDecision, UNAUTHORIZED_PATH, navigate};
use opsdesk_session::{FileStore, Session};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let store = FileStore::open_default()?;
    tracing::info!(path = ?store.path(), "using session file");

    let mut session = Session::new(Box::new(store));
    session.restore();

    match session.current_user() {
        Some(user) => println!("restored session for {} ({})", user.email, user.role),
        None => println!("no persisted session; use `login <email> <password>`"),
    }

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("opsdesk> ");
        std::io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let mut words = line.split_whitespace();
        match words.next() {
            Some("login") => {
                let (Some(email), Some(password)) = (words.next(), words.next()) else {
                    println!("usage: login <email> <password>");
                    continue;
                };
                match accounts::verify(email, password) {
                    Some((token, user)) => {
                        session.login(&token, user)?;
                        println!("logged in as {email}");
                    }
                    None => println!("invalid credentials"),
                }
            }
            Some("logout") => {
                session.logout()?;
                println!("logged out");
            }
            Some("whoami") => match session.current_user() {
                Some(user) => {
                    println!("{} <{}> role={}", user.name, user.email, user.role);
                    let mut held: Vec<&str> =
                        session.permissions().iter().map(|p| p.as_str()).collect();
                    held.sort_unstable();
                    println!("permissions: {}", held.join(", "));
                }
                None => println!("not logged in"),
            },
            Some("go") => {
                let Some(path) = words.next() else {
                    println!("usage: go <path>");
                    continue;
                };
                show(&session, path);
            }
            Some("quit") | Some("exit") => break,
            Some(other) => println!("unknown command '{other}' (login, logout, whoami, go, quit)"),
            None => {}
        }
    }

    Ok(())
}

fn show(session: &Session, path: &str) {
    match navigate(session, path) {
        Navigation::Redirect { to } => println!("-> redirect to {to}"),
        Navigation::Decision(RouteDecision::Loading) => println!("... restoring session"),
        Navigation::Decision(RouteDecision::RedirectToLogin { return_to }) => {
            println!("-> {LOGIN_PATH} (will return to {return_to})")
        }
        Navigation::Decision(RouteDecision::RedirectToUnauthorized) => {
            println!("-> {UNAUTHORIZED_PATH}")
        }
        Navigation::Decision(RouteDecision::Render) => println!("rendering {path}"),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
