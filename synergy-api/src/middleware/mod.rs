/// Middleware modules for the API server
///
/// Bearer authentication lives in `synergy_shared::auth::middleware`; this
/// module holds the HTTP-level middleware that is specific to the server:
///
/// - Security headers

pub mod security;
