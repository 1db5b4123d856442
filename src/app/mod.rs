//! Application state shared by every flow
//!
//! [`App`] ties together the API client, the [`Session`] and the current
//! [`View`]. Flows pass every API result through [`App::intercept`], which is
//! where a rejected token turns into a sign-out and a redirect to login.

use std::sync::Arc;

use log::{debug, info};

use crate::client::ChatApi;
use crate::error::Result;
use crate::session::Session;

mod router;

pub use router::{View, guard};

pub struct App {
    client: Arc<dyn ChatApi>,
    session: Session,
    view: View,
}

impl App {
    /// Create the app and land on whichever view the guard allows for chat
    pub fn new(client: Arc<dyn ChatApi>, session: Session) -> Result<Self> {
        let mut app = Self {
            client,
            session,
            view: View::Login,
        };
        app.navigate(View::Chat)?;
        Ok(app)
    }

    pub fn client(&self) -> &dyn ChatApi {
        self.client.as_ref()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The view currently presented
    pub fn view(&self) -> View {
        self.view
    }

    /// Move to `to`, subject to the guard.
    ///
    /// Token presence is re-read on every call.
    pub fn navigate(&mut self, to: View) -> Result<View> {
        let authenticated = self.session.is_authenticated()?;
        let resolved = guard(to, authenticated);
        if resolved != to {
            debug!("Navigation to {} redirected to {}", to, resolved);
        }
        self.view = resolved;
        Ok(resolved)
    }

    /// Apply the global reaction to an API result.
    ///
    /// On `Unauthorized` the session is cleared and the view forced to login
    /// before the error is handed back. Everything else passes through.
    pub fn intercept<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            if err.is_unauthorized() {
                info!("Backend rejected the session token; signing out");
                let cleared = self.session.sign_out();
                // The token is dead even if the store could not be cleared
                self.view = View::Login;
                cleared?;
            }
        }
        result
    }

    /// End the session and return to login
    pub fn logout(&mut self) -> Result<()> {
        self.session.sign_out()?;
        self.navigate(View::Login)?;
        Ok(())
    }
}
