//! Static file serving module
//!
//! Resolves request paths under the document root and serves files, index
//! files or directory listings, with 301/304/206/416/404 handled the way
//! simple development file servers do.

use crate::config::StaticConfig;
use crate::handler::router::RequestContext;
use crate::http::{self, cache::Validators, mime, response, RangeOutcome};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Characters left as-is in listing hrefs
const HREF_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Serve the request from the document root
pub async fn serve(ctx: &RequestContext<'_>, config: &StaticConfig) -> Response<Full<Bytes>> {
    let root = Path::new(&config.root);
    let root_canonical = match fs::canonicalize(root).await {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Document root not found or inaccessible '{}': {e}",
                config.root
            ));
            return http::build_404_response();
        }
    };

    let decoded = percent_decode_str(ctx.path).decode_utf8_lossy();
    let candidate = root_canonical.join(relative_path(&decoded));

    // Missing files are the common 404, no need to log them
    let Ok(resolved) = fs::canonicalize(&candidate).await else {
        return http::build_404_response();
    };
    if !resolved.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path escapes document root, refused: {} -> {}",
            ctx.path,
            resolved.display()
        ));
        return http::build_404_response();
    }

    let is_dir = fs::metadata(&resolved).await.is_ok_and(|m| m.is_dir());
    if is_dir {
        if !ctx.path.ends_with('/') {
            let location = match ctx.query {
                Some(q) => format!("{}/?{q}", ctx.path),
                None => format!("{}/", ctx.path),
            };
            return http::build_moved_permanently(&location);
        }
        return serve_directory(ctx, config, &resolved, &decoded).await;
    }

    // A trailing slash names a directory; a file behind one does not exist
    if ctx.path.ends_with('/') {
        return http::build_404_response();
    }

    serve_file(ctx, &resolved).await
}

/// Turn a decoded URL path into a relative filesystem path, dropping empty,
/// `.` and `..` segments.
fn relative_path(decoded: &str) -> PathBuf {
    decoded
        .split('/')
        .filter(|seg| !seg.is_empty() && *seg != "." && *seg != ".." && !seg.contains('\\'))
        .collect()
}

async fn serve_directory(
    ctx: &RequestContext<'_>,
    config: &StaticConfig,
    dir: &Path,
    display_path: &str,
) -> Response<Full<Bytes>> {
    for index_file in &config.index_files {
        let index_path = dir.join(index_file);
        if fs::metadata(&index_path).await.is_ok_and(|m| m.is_file()) {
            return serve_file(ctx, &index_path).await;
        }
    }

    if !config.directory_listing {
        return http::build_404_response();
    }

    match render_listing(dir, display_path).await {
        Ok(html) => response::build_html_response(html, ctx.is_head),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to list directory '{}': {e}",
                dir.display()
            ));
            http::build_404_response()
        }
    }
}

async fn serve_file(ctx: &RequestContext<'_>, file_path: &Path) -> Response<Full<Bytes>> {
    let metadata = match fs::metadata(file_path).await {
        Ok(m) => m,
        Err(_) => return http::build_404_response(),
    };
    let validators = Validators::from_metadata(metadata.len(), metadata.modified().ok());

    if validators.is_fresh(
        ctx.if_none_match.as_deref(),
        ctx.if_modified_since.as_deref(),
    ) {
        return http::build_304_response(&validators);
    }

    let content = match fs::read(file_path).await {
        Ok(c) => Bytes::from(c),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_path.display()
            ));
            return http::build_404_response();
        }
    };
    let content_type = mime::content_type_for(file_path);
    let total_size = content.len();

    match http::parse_range_header(ctx.range_header.as_deref(), total_size) {
        RangeOutcome::Partial(span) => response::build_partial_response(
            content.slice(span.start..=span.end),
            content_type,
            &validators,
            (span.start, span.end),
            total_size,
            ctx.is_head,
        ),
        RangeOutcome::NotSatisfiable => http::build_416_response(total_size),
        RangeOutcome::Full => {
            response::build_file_response(content, content_type, &validators, ctx.is_head)
        }
    }
}

/// HTML listing, directories first-class with a trailing `/`
async fn render_listing(dir: &Path, display_path: &str) -> std::io::Result<String> {
    let mut names = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = fs::metadata(entry.path()).await.is_ok_and(|m| m.is_dir());
        names.push(if is_dir { format!("{name}/") } else { name });
    }
    names.sort_by_key(|n| n.to_lowercase());

    let title = format!("Directory listing for {}", escape_html(display_path));
    let mut html = format!(
        "<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n<hr>\n<ul>\n"
    );
    for name in &names {
        let (stem, slash) = name
            .strip_suffix('/')
            .map_or((name.as_str(), ""), |s| (s, "/"));
        let href = utf8_percent_encode(stem, HREF_SAFE);
        html.push_str(&format!(
            "<li><a href=\"{href}{slash}\">{}</a></li>\n",
            escape_html(name)
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    Ok(html)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_config;
    use http_body_util::BodyExt;
    use tempfile::TempDir;

    fn site() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>gold</h1>").unwrap();
        std::fs::write(dir.path().join("script.js"), "console.log(1);").unwrap();
        std::fs::write(dir.path().join("my file.txt"), "0123456789").unwrap();
        std::fs::create_dir(dir.path().join("public")).unwrap();
        std::fs::write(dir.path().join("public/mock-data.js"), "var x;").unwrap();
        std::fs::create_dir(dir.path().join("public/img")).unwrap();
        std::fs::create_dir(dir.path().join("docs")).unwrap();
        std::fs::write(dir.path().join("docs/index.htm"), "docs").unwrap();
        dir
    }

    fn ctx(path: &str) -> RequestContext<'_> {
        RequestContext {
            path,
            query: None,
            is_head: false,
            if_none_match: None,
            if_modified_since: None,
            range_header: None,
        }
    }

    async fn fetch(dir: &TempDir, ctx: &RequestContext<'_>) -> (u16, hyper::HeaderMap, Bytes) {
        let cfg = test_config(dir.path().to_str().unwrap()).static_files;
        let resp = serve(ctx, &cfg).await;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        (status, headers, body)
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let dir = site();
        let (status, headers, body) = fetch(&dir, &ctx("/")).await;
        assert_eq!(status, 200);
        assert_eq!(headers["content-type"], "text/html; charset=utf-8");
        assert_eq!(body, Bytes::from_static(b"<h1>gold</h1>"));
    }

    #[tokio::test]
    async fn test_file_with_type_and_validators() {
        let dir = site();
        let (status, headers, body) = fetch(&dir, &ctx("/script.js")).await;
        assert_eq!(status, 200);
        assert_eq!(headers["content-type"], "text/javascript; charset=utf-8");
        assert_eq!(headers["content-length"], "15");
        assert!(headers.contains_key("etag"));
        assert!(headers.contains_key("last-modified"));
        assert_eq!(body, Bytes::from_static(b"console.log(1);"));
    }

    #[tokio::test]
    async fn test_percent_decoded_path() {
        let dir = site();
        let (status, _, body) = fetch(&dir, &ctx("/my%20file.txt")).await;
        assert_eq!(status, 200);
        assert_eq!(body, Bytes::from_static(b"0123456789"));
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let dir = site();
        let (status, _, body) = fetch(&dir, &ctx("/nope.css")).await;
        assert_eq!(status, 404);
        assert_eq!(body, Bytes::from_static(b"404 Not Found"));
    }

    #[tokio::test]
    async fn test_trailing_slash_on_file_is_404() {
        let dir = site();
        let (status, _, _) = fetch(&dir, &ctx("/script.js/")).await;
        assert_eq!(status, 404);
        let (status, _, _) = fetch(&dir, &ctx("/public/mock-data.js/")).await;
        assert_eq!(status, 404);
        let (status, _, _) = fetch(&dir, &ctx("/script.js")).await;
        assert_eq!(status, 200);
    }

    #[tokio::test]
    async fn test_directory_without_slash_redirects() {
        let dir = site();
        let mut request = ctx("/public");
        request.query = Some("v=2");
        let (status, headers, _) = fetch(&dir, &request).await;
        assert_eq!(status, 301);
        assert_eq!(headers["location"], "/public/?v=2");
    }

    #[tokio::test]
    async fn test_directory_index_htm() {
        let dir = site();
        let (status, _, body) = fetch(&dir, &ctx("/docs/")).await;
        assert_eq!(status, 200);
        assert_eq!(body, Bytes::from_static(b"docs"));
    }

    #[tokio::test]
    async fn test_directory_listing() {
        let dir = site();
        let (status, headers, body) = fetch(&dir, &ctx("/public/")).await;
        assert_eq!(status, 200);
        assert_eq!(headers["content-type"], "text/html; charset=utf-8");
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Directory listing for /public/"));
        assert!(html.contains("<a href=\"img/\">img/</a>"));
        assert!(html.contains("<a href=\"mock-data.js\">mock-data.js</a>"));
        assert!(html.find("img/").unwrap() < html.find("mock-data.js").unwrap());
    }

    #[tokio::test]
    async fn test_directory_listing_disabled() {
        let dir = site();
        let mut cfg = test_config(dir.path().to_str().unwrap()).static_files;
        cfg.directory_listing = false;
        let resp = serve(&ctx("/public/"), &cfg).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_dot_dot_segments_stay_inside_root() {
        let dir = site();
        // `..` segments are dropped, never followed upward
        let (status, _, body) = fetch(&dir, &ctx("/../../public/mock-data.js")).await;
        assert_eq!(status, 200);
        assert_eq!(body, Bytes::from_static(b"var x;"));

        let (status, _, _) = fetch(&dir, &ctx("/public/../script.js")).await;
        assert_eq!(status, 404);

        let (status, _, _) = fetch(&dir, &ctx("/%2e%2e/%2e%2e/etc/passwd")).await;
        assert_eq!(status, 404);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_out_of_root_refused() {
        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("secret.txt"), "secret").unwrap();
        let dir = site();
        std::os::unix::fs::symlink(
            outside.path().join("secret.txt"),
            dir.path().join("leak.txt"),
        )
        .unwrap();

        let (status, _, _) = fetch(&dir, &ctx("/leak.txt")).await;
        assert_eq!(status, 404);
    }

    #[tokio::test]
    async fn test_conditional_get_returns_304() {
        let dir = site();
        let (_, headers, _) = fetch(&dir, &ctx("/script.js")).await;
        let etag = headers["etag"].to_str().unwrap().to_string();

        let mut request = ctx("/script.js");
        request.if_none_match = Some(etag);
        let (status, _, body) = fetch(&dir, &request).await;
        assert_eq!(status, 304);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_range_requests() {
        let dir = site();
        let mut request = ctx("/my%20file.txt");
        request.range_header = Some("bytes=2-5".to_string());
        let (status, headers, body) = fetch(&dir, &request).await;
        assert_eq!(status, 206);
        assert_eq!(headers["content-range"], "bytes 2-5/10");
        assert_eq!(body, Bytes::from_static(b"2345"));

        request.range_header = Some("bytes=50-".to_string());
        let (status, headers, _) = fetch(&dir, &request).await;
        assert_eq!(status, 416);
        assert_eq!(headers["content-range"], "bytes */10");
    }

    #[tokio::test]
    async fn test_head_has_headers_but_no_body() {
        let dir = site();
        let mut request = ctx("/script.js");
        request.is_head = true;
        let (status, headers, body) = fetch(&dir, &request).await;
        assert_eq!(status, 200);
        assert_eq!(headers["content-length"], "15");
        assert!(body.is_empty());
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#x27;");
    }
}
