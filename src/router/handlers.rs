//! # Handlers
//! src/router/handlers.rs
//!
//! - GET: contenido estático con sustitución de `{{name}}`
//! - POST /change_name: registra el nombre de la IP que hace el request
//! - Cualquier otro método: 405
//!
//! El nombre y el método se insertan en el HTML sin escapar, tal como
//! llegaron. Un cliente puede inyectar marcado en su propia confirmación.

use super::RequestContext;
use crate::http::{Request, Response, StatusCode};
use std::io;

/// Token que se reemplaza en el contenido servido
pub const NAME_TOKEN: &str = "{{name}}";

/// Recurso servido para `GET /`
pub const INDEX_PATH: &str = "/index.html";

/// Handler para GET
///
/// `/` se sirve como `/index.html`. Se quita una sola `/` inicial y el resto
/// se busca en el `ContentStore`.
///
/// # Errores
///
/// Retorna el error de I/O si el recurso existe pero no se pudo leer; el
/// worker lo registra y cierra la conexión sin respuesta.
pub fn serve_static(path: &str, ctx: &RequestContext<'_>) -> io::Result<Response> {
    let path = if path == "/" { INDEX_PATH } else { path };
    let name = path.strip_prefix('/').unwrap_or(path);

    let Some(content) = ctx.content.load(name)? else {
        return Ok(file_not_found());
    };

    let display_name = ctx.sessions.get(ctx.peer).unwrap_or_default();
    let body = render_template(&content, &display_name);

    Ok(Response::html(StatusCode::Ok, &body))
}

/// Reemplaza cada aparición de `{{name}}`
pub fn render_template(content: &str, name: &str) -> String {
    content.replace(NAME_TOKEN, name)
}

/// Handler para POST /change_name
///
/// El body debe ser `name=<valor>`. Se separa en el primer `=`; el valor se
/// guarda tal cual, sin decodificar ni recortar.
///
/// # Ejemplo de response
/// ```text
/// <html><body>Name updated to Alice</body></html>
/// ```
pub fn change_name_handler(request: &Request, ctx: &RequestContext<'_>) -> Response {
    let name = match request.body().split_once('=') {
        Some(("name", value)) if !value.is_empty() => value,
        _ => return Response::plain(StatusCode::BadRequest, "Name not provided"),
    };

    ctx.sessions.set(ctx.peer, name);
    tracing::info!(peer = %ctx.peer, name, "nombre actualizado");

    Response::html(
        StatusCode::Ok,
        &format!("<html><body>Name updated to {}</body></html>", name),
    )
}

/// 404 para GET de un recurso inexistente
///
/// Sin `Content-Length`: el cliente lee hasta el cierre.
pub fn file_not_found() -> Response {
    Response::new(StatusCode::NotFound)
        .with_header("Content-Type", "text/plain")
        .with_unframed_body("File not found")
}

/// 404 para POST a un endpoint sin handler
pub fn endpoint_not_found() -> Response {
    Response::new(StatusCode::NotFound)
        .with_header("Content-Type", "text/plain")
        .with_unframed_body("Endpoint not found")
}

/// 405 con el método recibido dentro del HTML
pub fn method_not_allowed(method: &str) -> Response {
    Response::html(
        StatusCode::MethodNotAllowed,
        &format!("<html><body>Method {} is not supported</body></html>", method),
    )
}
