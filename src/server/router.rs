//! Request dispatch: static files first, then the named route table.

use std::path::{Component, Path, PathBuf};

use log::warn;

use crate::parser::{HttpRequest, Method};
use crate::server::handler::{HandlerFn, Route};
use crate::server::handlers;
use crate::server::{Error, HttpResponse};
use crate::store::AppState;

/// Maps `(method, path)` to a handler.
pub struct Router {
    static_root: PathBuf,
    routes: Vec<Route>,
}

impl Router {
    /// An empty router serving static files from `static_root`.
    pub fn new(static_root: impl Into<PathBuf>) -> Self {
        Self {
            static_root: static_root.into(),
            routes: Vec::new(),
        }
    }

    /// The router with the full session and user route table.
    pub fn with_default_routes(static_root: impl Into<PathBuf>) -> Self {
        let mut router = Self::new(static_root);
        router.add_route(Method::GET, "/users/{id}", handlers::get_user);
        router.add_route(Method::GET, "/get-data", handlers::get_session_data);
        router.add_route(Method::POST, "/store-data", handlers::store_session_data);
        router.add_route(Method::POST, "/submit", handlers::submit_form);
        router.add_route(Method::POST, "/users", handlers::create_user);
        router.add_route(Method::PUT, "/users/{id}", handlers::replace_user);
        router.add_route(Method::PATCH, "/users/{id}", handlers::update_user);
        router.add_route(Method::DELETE, "/users/{id}", handlers::delete_user);
        router
    }

    /// Add a route. Routes are tried in insertion order.
    pub fn add_route(&mut self, method: Method, pattern: &str, handler: HandlerFn) {
        self.routes.push(Route::new(method, pattern, handler));
    }

    /// The registered routes.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// The directory static files are served from.
    pub fn static_root(&self) -> &Path {
        &self.static_root
    }

    /// Dispatch a request and turn any handler error into a response.
    pub async fn dispatch(&self, request: &HttpRequest, state: &AppState) -> HttpResponse {
        match self.route(request, state).await {
            Ok(response) => response,
            Err(e) => {
                warn!("{method} {path}: {e}", method = request.method, path = request.path);
                e.into_response()
            }
        }
    }

    async fn route(&self, request: &HttpRequest, state: &AppState) -> Result<HttpResponse, Error> {
        let path = request.route_path();

        // Static files shadow named routes
        if request.method == Method::GET {
            if let Some(file) = self.static_file(path).await {
                return handlers::serve_static(&file).await;
            }
        }

        for route in &self.routes {
            if route.method != request.method {
                continue;
            }
            if let Some(matched) = route.pattern.matches(path) {
                return (route.handler)(request, &matched, state);
            }
        }

        Err(Error::NotFound(request.path.clone()))
    }

    /// The regular file under the static root for `path`, if one exists.
    ///
    /// Paths with `..` or other non-plain components never reach the disk.
    async fn static_file(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative.as_os_str().is_empty()
            || !relative.components().all(|c| matches!(c, Component::Normal(_)))
        {
            return None;
        }

        let file = self.static_root.join(relative);
        match tokio::fs::metadata(&file).await {
            Ok(meta) if meta.is_file() => Some(file),
            _ => None,
        }
    }
}
