//! Static asset serving for the feed reader front-end.
//!
//! Every unmatched path is looked up under the asset root. A fixed set of
//! client-side routes always receives the index document so the browser
//! router can take over.

use std::path::PathBuf;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::config::StaticFilesConfig;

/// Build the static router. Routes are matched exactly; the directory
/// service is installed as the fallback.
pub fn router(config: &StaticFilesConfig) -> Router {
    let root = PathBuf::from(&config.root);
    let index = root.join(&config.index);

    let mut router = Router::new();
    for route in &config.app_routes {
        router = router.route_service(route, ServeFile::new(&index));
    }

    router.fallback_service(ServeDir::new(root))
}
