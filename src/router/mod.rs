//! # Sistema de Routing
//! src/router/mod.rs
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! GET siempre va al contenido estático. POST se busca en la tabla de rutas
//! registradas (404 si no hay handler). Cualquier otro método es 405.

pub mod handlers;

use crate::assets::ContentStore;
use crate::http::{Method, Request, Response};
use crate::session::SessionStore;
use std::io;
use std::net::IpAddr;
use std::sync::Arc;

/// Lo que un handler necesita además del request
pub struct RequestContext<'a> {
    /// IP del cliente (el puerto se ignora)
    pub peer: IpAddr,

    /// Sesiones compartidas entre conexiones
    pub sessions: &'a SessionStore,

    /// Contenido estático
    pub content: &'a dyn ContentStore,
}

/// Tipo de función handler para POST
pub type Handler = fn(&Request, &RequestContext<'_>) -> Response;

/// Router que despacha por método y, para POST, por path
pub struct Router {
    /// Tabla path → handler para POST
    routes: Vec<(String, Handler)>,

    sessions: Arc<SessionStore>,

    content: Arc<dyn ContentStore>,
}

impl Router {
    /// Crea un router sin rutas POST
    pub fn new(content: Arc<dyn ContentStore>, sessions: Arc<SessionStore>) -> Self {
        Self {
            routes: Vec::new(),
            sessions,
            content,
        }
    }

    /// Registra un handler POST para un path exacto
    ///
    /// # Ejemplo
    /// ```
    /// use std::sync::Arc;
    /// use session_http_server::assets::MemoryStore;
    /// use session_http_server::router::{handlers, Router};
    /// use session_http_server::session::SessionStore;
    ///
    /// let mut router = Router::new(Arc::new(MemoryStore::new()), Arc::new(SessionStore::new()));
    /// router.register("/change_name", handlers::change_name_handler);
    /// ```
    pub fn register(&mut self, path: &str, handler: Handler) {
        self.routes.push((path.to_string(), handler));
    }

    /// Produce la respuesta para un request de `peer`
    ///
    /// # Errores
    ///
    /// Solo falla si un recurso estático existe pero no se puede leer.
    pub fn route(&self, request: &Request, peer: IpAddr) -> io::Result<Response> {
        let ctx = RequestContext {
            peer,
            sessions: &self.sessions,
            content: self.content.as_ref(),
        };

        let mut response = match request.method() {
            Method::GET => handlers::serve_static(request.path(), &ctx)?,
            Method::POST => match self.find(request.path()) {
                Some(handler) => handler(request, &ctx),
                None => handlers::endpoint_not_found(),
            },
            Method::Other(method) => handlers::method_not_allowed(method),
        };

        self.add_common_headers(&mut response);
        Ok(response)
    }

    /// Sesiones que usa el router
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    fn find(&self, path: &str) -> Option<Handler> {
        self.routes
            .iter()
            .find(|(route_path, _)| route_path == path)
            .map(|(_, handler)| *handler)
    }

    /// Agrega headers comunes a todas las respuestas
    fn add_common_headers(&self, response: &mut Response) {
        response.add_header("Server", "session-http/0.1");
        response.add_header("Connection", "close");
    }
}
