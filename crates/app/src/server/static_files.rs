//! Static file serving from the assets directory on disk.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use tracing::warn;

/// Root directory served by [`static_handler`].
#[derive(Debug, Clone)]
pub struct AssetRoot {
    dir: PathBuf,
}

impl AssetRoot {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Map a request path to a file under the root.
    ///
    /// Returns `None` for paths that try to leave the root.
    #[must_use]
    pub fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        let mut resolved = self.dir.clone();
        for segment in request_path.split('/') {
            if segment.is_empty() || segment == "." {
                continue;
            }
            let mut components = Path::new(segment).components();
            match (components.next(), components.next()) {
                (Some(Component::Normal(part)), None) => resolved.push(part),
                _ => return None,
            }
        }
        Some(resolved)
    }
}

/// Handler for every path: serves the matching file, `index.html` for
/// directories, 404 otherwise.
pub async fn static_handler(
    State(root): State<Arc<AssetRoot>>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let Some(mut path) = root.resolve(uri.path()) else {
        return not_found();
    };
    if tokio::fs::metadata(&path).await.is_ok_and(|m| m.is_dir()) {
        path.push("index.html");
    }

    serve_file(&path).await.unwrap_or_else(not_found)
}

/// Read a file from disk, or `None` if it does not exist.
async fn serve_file(path: &Path) -> Option<Response> {
    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => return None,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read asset");
            return None;
        }
    };

    // Determine content type from file extension
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .body(Body::from(data))
        .ok()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_stays_inside_root() {
        let root = AssetRoot::new("/srv/public");
        assert_eq!(
            root.resolve("/css/site.css"),
            Some(PathBuf::from("/srv/public/css/site.css"))
        );
        assert_eq!(root.resolve("/"), Some(PathBuf::from("/srv/public")));
        assert_eq!(
            root.resolve("/./app.js"),
            Some(PathBuf::from("/srv/public/app.js"))
        );
        assert_eq!(root.resolve("/../etc/passwd"), None);
        assert_eq!(root.resolve("/css/../../secret"), None);
    }
}
