//! View routing and the authentication guard

use std::fmt;

/// The screens a user can be on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Register,
    Chat,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            View::Login => "login",
            View::Register => "register",
            View::Chat => "chat",
        };
        f.write_str(name)
    }
}

/// Decide which view is actually shown when `requested` is asked for.
///
/// Without a token only the account screens are reachable and chat bounces
/// to login. With a token the account screens bounce to chat.
pub fn guard(requested: View, authenticated: bool) -> View {
    match (requested, authenticated) {
        (View::Chat, false) => View::Login,
        (View::Login | View::Register, true) => View::Chat,
        (view, _) => view,
    }
}
