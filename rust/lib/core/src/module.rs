use axum::Router;

/// A business module that contributes HTTP routes.
///
/// `production` and `access` both implement this; the server binary
/// merges every module's router into one app.
pub trait Module: Send + Sync {
    /// Module name, used in startup logs.
    fn name(&self) -> &str;

    /// Routes with their `/{name}` prefix already applied.
    fn routes(&self) -> Router;
}
