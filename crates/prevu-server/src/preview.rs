//! Request pipeline for the preview server.
//!
//! Three layers around plain static dispatch, outermost first: permissive
//! CORS headers on every response, a guard that hides dotfiles unless the
//! operator opted in, and a client-side routing fallback that maps
//! extensionless paths onto the root document.

use std::path::Path;

use axum::{
    extract::Request,
    http::{header, HeaderValue, StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::services::ServeDir;

/// Document extensionless paths fall back to, so an in-browser router can
/// interpret the path itself.
pub const ROOT_DOCUMENT: &str = "/index.html";

/// Build the preview router over `root`.
///
/// Dotfile paths (`/.env` and friends) are answered 404 unless `expose_env`
/// is set; exposing them over an unauthenticated listener is a debug-only
/// feature the caller must opt into.
pub fn preview_router(root: &Path, expose_env: bool) -> Router {
    let router = Router::new()
        .fallback_service(ServeDir::new(root))
        .layer(middleware::from_fn(route_to_root_document));

    let router = if expose_env {
        router
    } else {
        router.layer(middleware::from_fn(refuse_dotfiles))
    };

    router.layer(middleware::from_fn(add_cors_headers))
}

async fn add_cors_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

async fn refuse_dotfiles(req: Request, next: Next) -> Response {
    if has_dotfile_segment(req.uri().path()) {
        return StatusCode::NOT_FOUND.into_response();
    }
    next.run(req).await
}

async fn route_to_root_document(mut req: Request, next: Next) -> Response {
    if is_route_path(req.uri().path()) {
        *req.uri_mut() = Uri::from_static(ROOT_DOCUMENT);
    }
    next.run(req).await
}

/// A path is a client-side route when it carries no apparent file
/// extension anywhere in it.
fn is_route_path(path: &str) -> bool {
    path.starts_with('/') && !path.contains('.')
}

fn has_dotfile_segment(path: &str) -> bool {
    path.split('/').any(|segment| segment.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request};
    use tower::util::ServiceExt;

    const CORS_HEADERS: [&str; 3] = [
        "access-control-allow-origin",
        "access-control-allow-methods",
        "access-control-allow-headers",
    ];

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>app shell</h1>").unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log('hi')").unwrap();
        std::fs::write(dir.path().join(".env"), "OPENAI_API_KEY=sk-test").unwrap();
        dir
    }

    async fn get(router: Router, path: &str) -> Response {
        router
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap()
            .to_vec()
    }

    #[test]
    fn route_paths_have_no_extension() {
        assert!(is_route_path("/"));
        assert!(is_route_path("/about"));
        assert!(is_route_path("/settings/profile"));
        assert!(!is_route_path("/styles.css"));
        assert!(!is_route_path("/v1.2/changelog"));
    }

    #[test]
    fn dotfile_segments_are_detected_anywhere() {
        assert!(has_dotfile_segment("/.env"));
        assert!(has_dotfile_segment("/config/.git/HEAD"));
        assert!(!has_dotfile_segment("/app.js"));
        assert!(!has_dotfile_segment("/about"));
    }

    #[tokio::test]
    async fn extensionless_path_serves_the_root_document() {
        let dir = site();
        let router = preview_router(dir.path(), false);

        let root = body_bytes(get(router.clone(), "/").await).await;
        let about = body_bytes(get(router, "/about").await).await;

        assert_eq!(root, b"<h1>app shell</h1>");
        assert_eq!(about, root);
    }

    #[tokio::test]
    async fn literal_files_are_served_as_is() {
        let dir = site();
        let router = preview_router(dir.path(), false);

        let response = get(router, "/app.js").await;
        assert_eq!(response.status(), 200);
        assert_eq!(body_bytes(response).await, b"console.log('hi')");
    }

    #[tokio::test]
    async fn missing_file_with_extension_is_a_plain_404() {
        let dir = site();
        let router = preview_router(dir.path(), false);

        let response = get(router, "/styles.css").await;
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn cors_headers_appear_on_every_response() {
        let dir = site();
        let router = preview_router(dir.path(), false);

        let ok = get(router.clone(), "/about").await;
        let not_found = get(router.clone(), "/styles.css").await;
        let options = router
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/app.js")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        for response in [&ok, &not_found, &options] {
            for name in CORS_HEADERS {
                assert!(
                    response.headers().contains_key(name),
                    "missing {} on {} response",
                    name,
                    response.status()
                );
            }
        }
        assert_eq!(
            ok.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        assert_eq!(
            ok.headers().get("access-control-allow-methods").unwrap(),
            "GET, POST, OPTIONS"
        );
        assert_eq!(
            ok.headers().get("access-control-allow-headers").unwrap(),
            "Content-Type"
        );
    }

    #[tokio::test]
    async fn dotfiles_are_hidden_by_default() {
        let dir = site();
        let router = preview_router(dir.path(), false);

        let response = get(router, "/.env").await;
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn dotfiles_are_served_when_exposed() {
        let dir = site();
        let router = preview_router(dir.path(), true);

        let response = get(router, "/.env").await;
        assert_eq!(response.status(), 200);
        assert_eq!(body_bytes(response).await, b"OPENAI_API_KEY=sk-test");
    }
}
