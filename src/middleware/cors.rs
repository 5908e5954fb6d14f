//! Middleware de CORS
//!
//! Este módulo maneja la configuración de CORS para permitir
//! requests desde el frontend.

use tower_http::cors::CorsLayer;

/// Crear middleware de CORS configurado para desarrollo
/// NOTA: Permite cualquier origen - solo para desarrollo
pub fn cors_middleware() -> CorsLayer {
    CorsLayer::very_permissive()
}
