//! # Contenido Estático
//! src/assets.rs
//!
//! El router solo necesita "dado un nombre, dame su texto". `ContentStore`
//! abstrae eso; `DirectoryStore` lo resuelve contra un directorio raíz y
//! `MemoryStore` contra un mapa en memoria.

use std::collections::HashMap;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Component, Path, PathBuf};

/// Fuente de contenido estático indexada por nombre relativo
pub trait ContentStore: Send + Sync {
    /// Lee el contenido completo de `name`
    ///
    /// * `Ok(Some(text))` - el recurso existe
    /// * `Ok(None)` - no existe o el nombre no es válido dentro de la raíz
    /// * `Err(e)` - existe pero no se pudo leer como texto
    fn load(&self, name: &str) -> io::Result<Option<String>>;
}

/// Contenido servido desde un directorio del filesystem
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resuelve `name` dentro de la raíz
    ///
    /// Solo se aceptan componentes normales: `..`, `.`, rutas absolutas y
    /// prefijos de unidad no pueden salir del directorio.
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        let mut components = relative.components().peekable();
        components.peek()?;

        if components.all(|component| matches!(component, Component::Normal(_))) {
            Some(self.root.join(relative))
        } else {
            None
        }
    }
}

impl ContentStore for DirectoryStore {
    fn load(&self, name: &str) -> io::Result<Option<String>> {
        let Some(path) = self.resolve(name) else {
            tracing::debug!(name, "ruta fuera del directorio de contenido");
            return Ok(None);
        };

        if path.is_dir() {
            return Ok(None);
        }

        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Contenido en memoria, útil para pruebas o para embeber páginas
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Agrega un archivo (versión builder)
    pub fn with_file(mut self, name: &str, content: &str) -> Self {
        self.files.insert(name.to_string(), content.to_string());
        self
    }
}

impl ContentStore for MemoryStore {
    fn load(&self, name: &str) -> io::Result<Option<String>> {
        Ok(self.files.get(name).cloned())
    }
}
