//! Static front-end assets served for every path the API does not claim.
//!
//! Files are read through a `cap_std` directory handle, so a request can never
//! reach outside the asset root. Unknown paths fall back to `index.html` to
//! let the single-page front-end handle its own routing.

use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use actix_web::http::{Method, header};
use actix_web::{HttpRequest, HttpResponse, web};
use cap_std::{ambient_authority, fs::Dir};
use tracing::{debug, warn};

use crate::domain::Error;
use crate::inbound::http::ApiResult;

const INDEX_FILE: &str = "index.html";

/// Handle on the static asset directory.
#[derive(Clone, Default)]
pub struct StaticAssets {
    root: Option<Arc<Dir>>,
}

impl StaticAssets {
    /// Open the asset directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error raised while opening the directory.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let dir = Dir::open_ambient_dir(path.as_ref(), ambient_authority())?;
        Ok(Self {
            root: Some(Arc::new(dir)),
        })
    }

    /// Open the asset directory, serving nothing when it cannot be opened.
    pub fn open_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::open(path).unwrap_or_else(|error| {
            warn!(path = %path.display(), %error, "static directory unavailable");
            Self::default()
        })
    }

    /// Read `relative`, or `index.html` when it does not name a readable file.
    fn read_with_fallback(&self, relative: &Path) -> Option<(PathBuf, Vec<u8>)> {
        let root = self.root.as_ref()?;
        if let Some(bytes) = read_regular_file(root, relative) {
            return Some((relative.to_path_buf(), bytes));
        }
        let index = PathBuf::from(INDEX_FILE);
        read_regular_file(root, &index).map(|bytes| (index, bytes))
    }
}

fn read_regular_file(root: &Dir, relative: &Path) -> Option<Vec<u8>> {
    if relative.as_os_str().is_empty() {
        return None;
    }
    let metadata = root.metadata(relative).ok()?;
    if !metadata.is_file() {
        return None;
    }
    root.read(relative).ok()
}

/// Turn a request path into a path relative to the asset root.
///
/// Directory requests resolve to their `index.html`. Parent and root
/// components are dropped.
fn relative_asset_path(request_path: &str) -> PathBuf {
    let mut relative: PathBuf = Path::new(request_path.trim_start_matches('/'))
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect();
    if request_path.ends_with('/') || relative.as_os_str().is_empty() {
        relative.push(INDEX_FILE);
    }
    relative
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("json" | "map") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("webmanifest") => "application/manifest+json",
        _ => "application/octet-stream",
    }
}

/// Serve a static asset, falling back to `index.html`.
///
/// Install as the application's default service. Only `GET` and `HEAD` are
/// answered; any other method on an unclaimed path is a 404.
pub async fn serve_static(
    req: HttpRequest,
    assets: web::Data<StaticAssets>,
) -> ApiResult<HttpResponse> {
    let method = req.method();
    if *method != Method::GET && *method != Method::HEAD {
        return Err(Error::not_found(format!(
            "no route for {} {}",
            method,
            req.path()
        )));
    }

    let relative = relative_asset_path(req.path());
    let assets = assets.get_ref().clone();
    let lookup = relative.clone();
    let found = web::block(move || assets.read_with_fallback(&lookup))
        .await
        .map_err(|err| Error::internal(format!("static asset read failed: {err}")))?;

    let Some((served, bytes)) = found else {
        debug!(path = %relative.display(), "static asset not found");
        return Err(Error::not_found(format!("{} not found", req.path())));
    };

    let mut response = HttpResponse::Ok();
    response.insert_header((header::CONTENT_TYPE, content_type_for(&served)));
    if *req.method() == Method::HEAD {
        return Ok(response.finish());
    }
    Ok(response.body(bytes))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for static asset resolution.

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::test_support::cap_fs::write_file;

    fn asset_root() -> TempDir {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_file(&dir.path().join("index.html"), b"<html>home</html>").expect("write index");
        write_file(&dir.path().join("app.js"), b"console.log(1);").expect("write script");
        dir
    }

    #[rstest]
    #[case("/", "index.html")]
    #[case("/app.js", "app.js")]
    #[case("/css/", "css/index.html")]
    #[case("/../secret.txt", "secret.txt")]
    fn request_paths_resolve_inside_root(#[case] request: &str, #[case] expected: &str) {
        assert_eq!(relative_asset_path(request), PathBuf::from(expected));
    }

    #[rstest]
    #[case("index.html", "text/html; charset=utf-8")]
    #[case("bundle.JS", "text/javascript; charset=utf-8")]
    #[case("logo.svg", "image/svg+xml")]
    #[case("archive.bin", "application/octet-stream")]
    fn content_type_follows_extension(#[case] file: &str, #[case] expected: &str) {
        assert_eq!(content_type_for(Path::new(file)), expected);
    }

    async fn request(assets: StaticAssets, req: actix_test::TestRequest) -> (StatusCode, String) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(assets))
                .default_service(web::to(serve_static)),
        )
        .await;
        let response = actix_test::call_service(&app, req.to_request()).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[actix_web::test]
    async fn serves_existing_file() {
        let root = asset_root();
        let assets = StaticAssets::open(root.path()).expect("open assets");

        let (status, body) =
            request(assets, actix_test::TestRequest::get().uri("/app.js")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log(1);");
    }

    #[actix_web::test]
    async fn unknown_path_falls_back_to_index() {
        let root = asset_root();
        let assets = StaticAssets::open(root.path()).expect("open assets");

        let (status, body) = request(
            assets,
            actix_test::TestRequest::get().uri("/students/5/history"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<html>home</html>");
    }

    #[actix_web::test]
    async fn non_get_requests_are_not_found() {
        let root = asset_root();
        let assets = StaticAssets::open(root.path()).expect("open assets");

        let (status, _) = request(assets, actix_test::TestRequest::post().uri("/anything")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn missing_directory_serves_nothing() {
        let root = tempfile::tempdir().expect("create temp dir");
        let assets = StaticAssets::open_or_empty(root.path().join("public"));

        let (status, _) = request(assets, actix_test::TestRequest::get().uri("/")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
