//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Un thread por conexión y un loop de aceptación secuencial. El loop se
//! apaga solo cuando pasa `idle_timeout` sin aceptar ninguna conexión.
//!
//! ## Ciclo de vida
//!
//! ```text
//! Starting → Listening → Stopping → Stopped
//! ```
//!
//! El listener es no bloqueante: el loop consulta `accept` cada
//! `ACCEPT_POLL_INTERVAL` y compara contra el instante de la última conexión,
//! así que no hace falta conectarse a sí mismo para desbloquear un `accept`.

use crate::assets::{ContentStore, DirectoryStore};
use crate::config::Config;
use crate::error::{Result, ServerError};
use crate::router::{handlers, Router};
use crate::server::connection;
use crate::session::SessionStore;
use socket2::{Domain, Protocol, Socket, Type};
use std::io::ErrorKind;
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Cola de conexiones pendientes del socket de escucha
pub const LISTEN_BACKLOG: i32 = 5;

/// Cada cuánto se reintenta `accept` cuando no hay conexiones pendientes
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Estado del ciclo de vida del servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Creado, sin socket
    Starting,

    /// Socket abierto, aceptando conexiones
    Listening,

    /// Saliendo del loop, cerrando el socket
    Stopping,

    /// Socket cerrado; estado terminal
    Stopped,
}

/// Permite detener el loop de aceptación desde otro thread
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    running: Arc<AtomicBool>,
}

impl ShutdownHandle {
    /// Pide al loop que termine; surte efecto en la siguiente vuelta
    pub fn shutdown(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Cuenta una conexión activa mientras vive
///
/// Se suelta al terminar el thread del worker, también si hace panic.
struct ConnectionGuard {
    active: Arc<AtomicUsize>,
}

impl ConnectionGuard {
    fn new(active: Arc<AtomicUsize>) -> Self {
        active.fetch_add(1, Ordering::AcqRel);
        Self { active }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Servidor HTTP/1.1 con apagado por inactividad
pub struct Server {
    config: Config,
    router: Arc<Router>,
    listener: Option<TcpListener>,
    state: ServerState,
    running: Arc<AtomicBool>,
    active_connections: Arc<AtomicUsize>,
}

impl Server {
    /// Crea un servidor que sirve archivos desde `config.assets_dir`
    pub fn new(config: Config) -> Self {
        let content = Arc::new(DirectoryStore::new(&config.assets_dir));
        Self::with_content(config, content)
    }

    /// Crea un servidor con una fuente de contenido arbitraria
    pub fn with_content(config: Config, content: Arc<dyn ContentStore>) -> Self {
        let mut router = Router::new(content, Arc::new(SessionStore::new()));
        router.register("/change_name", handlers::change_name_handler);

        Self {
            config,
            router: Arc::new(router),
            listener: None,
            state: ServerState::Starting,
            running: Arc::new(AtomicBool::new(true)),
            active_connections: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Abre el socket de escucha (Starting → Listening)
    ///
    /// Retorna la dirección real, útil cuando el puerto configurado es 0.
    /// Llamarlo de nuevo con el socket ya abierto solo retorna la dirección.
    pub fn bind(&mut self) -> Result<SocketAddr> {
        if let Some(listener) = &self.listener {
            return Ok(listener.local_addr()?);
        }

        let address = self.resolve_address()?;
        let listener = bind_listener(address)?;
        listener.set_nonblocking(true)?;
        let local_addr = listener.local_addr()?;

        self.listener = Some(listener);
        self.state = ServerState::Listening;
        tracing::info!(address = %local_addr, backlog = LISTEN_BACKLOG, "servidor escuchando");

        Ok(local_addr)
    }

    /// Corre el loop de aceptación hasta el apagado
    ///
    /// Bloquea el thread actual. Retorna `Ok(())` cuando el servidor se
    /// detiene por inactividad o por un `ShutdownHandle`.
    pub fn run(&mut self) -> Result<()> {
        if self.state == ServerState::Stopped {
            return Ok(());
        }

        self.bind()?;
        if let Some(listener) = self.listener.take() {
            self.accept_loop(&listener);
            self.stop(listener);
        }

        Ok(())
    }

    fn accept_loop(&self, listener: &TcpListener) {
        let idle_timeout = self.config.idle_timeout();
        let limit = self.config.connection_limit();
        let mut last_connection = Instant::now();

        tracing::info!(idle_timeout_secs = idle_timeout.as_secs(), "modo concurrente: un thread por conexión");

        while self.running.load(Ordering::SeqCst) {
            if let Some(limit) = limit {
                if self.active_connections.load(Ordering::Acquire) >= limit {
                    // Saturado tampoco cuenta como actividad
                    if idle_expired(last_connection, idle_timeout) {
                        break;
                    }
                    tracing::debug!(limit, "límite de conexiones alcanzado");
                    thread::sleep(ACCEPT_POLL_INTERVAL);
                    continue;
                }
            }

            match listener.accept() {
                Ok((stream, peer)) => {
                    last_connection = Instant::now();
                    self.spawn_worker(stream, peer);
                }
                Err(e) if e.kind() == ErrorKind::WouldBlock => {
                    if idle_expired(last_connection, idle_timeout) {
                        break;
                    }
                    thread::sleep(ACCEPT_POLL_INTERVAL);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    tracing::warn!(error = %e, "error al aceptar conexión");
                    thread::sleep(ACCEPT_POLL_INTERVAL);
                }
            }
        }
    }

    /// Listening → Stopping → Stopped
    ///
    /// Los workers en curso siguen por su cuenta; no se esperan.
    fn stop(&mut self, listener: TcpListener) {
        self.state = ServerState::Stopping;
        self.running.store(false, Ordering::SeqCst);

        drop(listener);

        self.state = ServerState::Stopped;
        tracing::info!(
            in_flight = self.active_connections.load(Ordering::Acquire),
            "servidor detenido"
        );
    }

    fn spawn_worker(&self, stream: TcpStream, peer: SocketAddr) {
        // En algunas plataformas el stream hereda el modo no bloqueante
        if let Err(e) = stream.set_nonblocking(false) {
            tracing::error!(%peer, error = %e, "no se pudo preparar la conexión");
            return;
        }

        tracing::debug!(%peer, "nueva conexión (spawning thread)");

        let router = Arc::clone(&self.router);
        let guard = ConnectionGuard::new(Arc::clone(&self.active_connections));

        let spawned = thread::Builder::new()
            .name(format!("conn-{}", peer))
            .spawn(move || {
                let _guard = guard;
                connection::serve(stream, peer.ip(), &router);
            });

        if let Err(e) = spawned {
            tracing::error!(%peer, error = %e, "no se pudo crear el thread de la conexión");
        }
    }

    fn resolve_address(&self) -> Result<SocketAddr> {
        let address = self.config.address();
        (self.config.host.as_str(), self.config.port)
            .to_socket_addrs()
            .map_err(|e| ServerError::AddressResolution(format!("{}: {}", address, e)))?
            .next()
            .ok_or(ServerError::AddressResolution(address))
    }

    /// Handle para detener el servidor desde otro thread
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            running: Arc::clone(&self.running),
        }
    }

    pub fn state(&self) -> ServerState {
        self.state
    }

    /// Dirección del socket mientras está abierto
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|listener| listener.local_addr().ok())
    }

    /// Sesiones compartidas por todas las conexiones
    pub fn sessions(&self) -> &Arc<SessionStore> {
        self.router.sessions()
    }

    /// Conexiones que todavía se están atendiendo
    pub fn active_connections(&self) -> usize {
        self.active_connections.load(Ordering::Acquire)
    }
}

/// `true` si pasó más de `idle_timeout` desde la última conexión aceptada
fn idle_expired(last_connection: Instant, idle_timeout: Duration) -> bool {
    let idle = last_connection.elapsed();
    if idle > idle_timeout {
        tracing::info!(idle_secs = idle.as_secs_f64(), "sin conexiones nuevas, apagando");
        return true;
    }
    false
}

/// Crea el socket de escucha con `SO_REUSEADDR` y backlog fijo
fn bind_listener(address: SocketAddr) -> std::io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(address), Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.bind(&address.into())?;
    socket.listen(LISTEN_BACKLOG)?;
    Ok(socket.into())
}
