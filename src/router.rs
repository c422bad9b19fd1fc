//! Shell routes and the navigator the auth guard drives.

use std::fmt;
use std::str::FromStr;

use auth::Navigator;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// `/`, the guarded dashboard.
    Dashboard,
    /// `/login`
    Login,
    /// `/signup`
    Signup,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Login => "/login",
            Self::Signup => "/signup",
        }
    }
}

impl FromStr for Route {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_end_matches('/') {
            "" => Ok(Self::Dashboard),
            "/login" => Ok(Self::Login),
            "/signup" => Ok(Self::Signup),
            other => Err(format!("unknown route: {other} (expected /, /login or /signup)")),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug)]
pub struct Router {
    current: Route,
}

impl Router {
    #[must_use]
    pub fn new(start: Route) -> Self {
        Self { current: start }
    }

    #[must_use]
    pub fn current(&self) -> Route {
        self.current
    }

    pub fn go(&mut self, route: Route) {
        if route != self.current {
            tracing::debug!(from = %self.current, to = %route, "navigate");
        }
        self.current = route;
    }
}

impl Navigator for Router {
    fn navigate(&mut self, to: &str) {
        match to.parse::<Route>() {
            Ok(route) => self.go(route),
            Err(e) => tracing::warn!(error = %e, "ignoring navigation"),
        }
    }
}

#[cfg(test)]
#[path = "router_test.rs"]
mod tests;
