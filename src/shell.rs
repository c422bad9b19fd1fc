//! Interactive dashboard shell.
//!
//! DESIGN
//! ======
//! One task multiplexes two inputs with `select!`: command lines from the
//! user and auth state changes (including backend notifications). Every
//! input ends in a re-render of the current route, so the guard is always
//! evaluated against the latest state and never latches a redirect.

use std::io::Write;
use std::str::FromStr;

use auth::{AuthGuard, AuthHandle, GuardState};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::forms::login::LoginForm;
use crate::forms::signup::SignupForm;
use crate::forms::{Submission, redirect_if_authenticated};
use crate::pages;
use crate::router::{Route, Router};

/// Bound on redirects followed in a single render.
const MAX_REDIRECTS: usize = 4;

const CONFIRMATION_NOTICE: &str = "Check your email to confirm your account, then sign in.";

pub const HELP: &str = "\
commands:
  signup <email> <password>              create an account
  login <email> <password> [--remember]  sign in
  logout                                 sign out
  go <route>                             open /, /login or /signup
  whoami                                 show the signed-in user
  help                                   show this help
  quit                                   exit";

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("config error: {0}")]
    Config(#[from] auth::ConfigError),
    #[error("auth backend error: {0}")]
    Backend(#[from] auth::BackendError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// COMMANDS
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Signup { email: String, password: String },
    Login { email: String, password: String, remember_me: bool },
    Logout,
    Go(Route),
    Whoami,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();
        let arg = |i: usize| args.get(i).copied().unwrap_or_default().to_owned();

        match name {
            "signup" if args.len() <= 2 => Ok(Self::Signup { email: arg(0), password: arg(1) }),
            "login" => {
                let remember_me = args.contains(&"--remember");
                let positional: Vec<&str> = args.iter().copied().filter(|a| *a != "--remember").collect();
                if positional.len() > 2 {
                    return Err("usage: login <email> <password> [--remember]".to_owned());
                }
                let field = |i: usize| positional.get(i).copied().unwrap_or_default().to_owned();
                Ok(Self::Login { email: field(0), password: field(1), remember_me })
            }
            "logout" | "signout" => Ok(Self::Logout),
            "go" => args
                .first()
                .ok_or_else(|| "usage: go <route>".to_owned())
                .and_then(|path| path.parse().map(Self::Go)),
            "whoami" => Ok(Self::Whoami),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            "signup" => Err("usage: signup <email> <password>".to_owned()),
            "" => Err(String::new()),
            other => Err(format!("unknown command: {other} (try `help`)")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// =============================================================================
// SHELL
// =============================================================================

pub struct Shell<W: Write> {
    handle: AuthHandle,
    router: Router,
    guard: AuthGuard,
    login_form: LoginForm,
    signup_form: SignupForm,
    notice: Option<&'static str>,
    out: W,
}

impl<W: Write> Shell<W> {
    pub fn new(handle: AuthHandle, start: Route, redirect_to: Route, out: W) -> Self {
        Self {
            handle,
            router: Router::new(start),
            guard: AuthGuard::new(redirect_to.path()),
            login_form: LoginForm::default(),
            signup_form: SignupForm::default(),
            notice: None,
            out,
        }
    }

    #[must_use]
    pub fn route(&self) -> Route {
        self.router.current()
    }

    #[must_use]
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Drive the shell until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub async fn run<R>(&mut self, input: R) -> Result<(), ShellError>
    where
        R: AsyncBufRead + Unpin,
    {
        self.handle.mount().await;
        let mut changes = self.handle.watch();
        changes.borrow_and_update();
        self.render()?;

        let mut lines = input.lines();
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    match line.parse::<Command>() {
                        Ok(command) => {
                            if self.execute(command).await? == Flow::Quit {
                                break;
                            }
                        }
                        Err(message) if message.is_empty() => {}
                        Err(message) => writeln!(self.out, "{message}")?,
                    }
                    changes.borrow_and_update();
                    self.render()?;
                }
                changed = changes.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    changes.borrow_and_update();
                    self.render()?;
                }
            }
        }

        self.handle.dispose();
        Ok(())
    }

    /// Apply one command.
    ///
    /// # Errors
    ///
    /// Returns an error if writing output fails.
    pub async fn execute(&mut self, command: Command) -> Result<Flow, ShellError> {
        match command {
            Command::Signup { email, password } => {
                self.router.go(Route::Signup);
                self.signup_form.set_email(&self.handle, &email);
                self.signup_form.set_password(&self.handle, &password);
                self.notice = match self.signup_form.submit(&self.handle).await {
                    Submission::PendingConfirmation => Some(CONFIRMATION_NOTICE),
                    _ => None,
                };
            }
            Command::Login { email, password, remember_me } => {
                self.router.go(Route::Login);
                self.login_form.set_email(&self.handle, &email);
                self.login_form.set_password(&self.handle, &password);
                self.login_form.set_remember_me(remember_me);
                self.login_form.submit(&self.handle).await;
            }
            Command::Logout => {
                if !self.handle.is_authenticated() {
                    writeln!(self.out, "not signed in")?;
                } else if let Err(e) = self.handle.logout().await {
                    tracing::error!(error = %e, "sign out failed");
                }
            }
            Command::Go(route) => self.router.go(route),
            Command::Whoami => match self.handle.user() {
                Some(user) if self.handle.is_authenticated() => {
                    writeln!(self.out, "{} (id {}, member since {})", user.email, user.id, user.created_at)?;
                }
                _ => writeln!(self.out, "not signed in")?,
            },
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Render the current route, following guard and auth-page redirects.
    ///
    /// # Errors
    ///
    /// Returns an error if writing output fails.
    pub fn render(&mut self) -> Result<(), ShellError> {
        for _ in 0..MAX_REDIRECTS {
            let route = self.router.current();
            let state = self.handle.state();

            let page = match route {
                Route::Dashboard => match self.guard.evaluate(&state, &mut self.router) {
                    GuardState::Loading => pages::LOADING.to_owned(),
                    GuardState::Unauthenticated => {
                        if self.router.current() != route {
                            continue;
                        }
                        return Ok(());
                    }
                    GuardState::Authenticated => pages::dashboard::render(&state),
                },
                Route::Login | Route::Signup => {
                    self.guard.reset();
                    if redirect_if_authenticated(&state, &mut self.router) {
                        self.notice = None;
                        continue;
                    }
                    if route == Route::Login {
                        pages::login::render(&state, &self.login_form)
                    } else {
                        pages::signup::render(&state, &self.signup_form, self.notice)
                    }
                }
            };

            writeln!(self.out, "\n== {route} ==\n{page}")?;
            return Ok(());
        }
        tracing::warn!(route = %self.router.current(), "redirect loop; render skipped");
        Ok(())
    }
}

#[cfg(test)]
#[path = "shell_test.rs"]
mod tests;
