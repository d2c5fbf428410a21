//! Navigation contracts shared by the UI shell.
//!
//! The sign-out control never switches screens itself; it asks a `Navigator`
//! to do so and forgets about it. This keeps screen routing out of the
//! feature reducers and makes navigation observable in tests.

/// Destinations the UI shell can be asked to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The account panel.
    Home,
    /// The sign-in instruction screen.
    SignIn,
}

impl Route {
    /// Stable path string for this destination.
    pub fn as_path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::SignIn => "/signin",
        }
    }
}

/// Fire-and-forget navigation collaborator.
///
/// Implementations must not block; a request to navigate is issued and the
/// caller moves on without awaiting a result.
pub trait Navigator: Send + Sync {
    fn go_to(&self, route: Route);
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct RecordingNavigator {
        seen: Mutex<Vec<Route>>,
    }

    impl Navigator for RecordingNavigator {
        fn go_to(&self, route: Route) {
            self.seen.lock().unwrap().push(route);
        }
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Home.as_path(), "/");
        assert_eq!(Route::SignIn.as_path(), "/signin");
    }

    #[test]
    fn test_navigator_is_object_safe() {
        let recorder = RecordingNavigator {
            seen: Mutex::new(Vec::new()),
        };
        let nav: &dyn Navigator = &recorder;
        nav.go_to(Route::SignIn);
        nav.go_to(Route::Home);
        assert_eq!(
            *recorder.seen.lock().unwrap(),
            vec![Route::SignIn, Route::Home]
        );
    }
}
