//! Two-view navigation between search and title
//!
//! The route store is what the shell binds its view switch to; the derived
//! view name feeds window titles and logs.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use super::store::{Derived, Store};

/// Views the app can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum Route {
    Search,
    Title,
}

impl Route {
    /// Name the shell shows for the view.
    pub fn view_name(self) -> &'static str {
        match self {
            Route::Search => "search",
            Route::Title => "title",
        }
    }
}

/// Route store plus its derived view name. Starts on [`Route::Search`].
pub struct Router {
    route: Store<Route>,
    view_name: Derived<&'static str>,
}

impl Router {
    pub fn new() -> Self {
        let route = Store::new(Route::Search);
        let view_name = Derived::new(&route, |r: &Route| r.view_name());

        Self { route, view_name }
    }

    pub fn route(&self) -> &Store<Route> {
        &self.route
    }

    pub fn view_name(&self) -> &Derived<&'static str> {
        &self.view_name
    }

    pub fn navigate(&self, route: Route) {
        debug!("navigating to {} view", route.view_name());
        self.route.set(route);
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
