//! Shared fixtures for integration tests.

use std::path::{Path, PathBuf};

use axum::http::Method;
use bidi_router::routing::{AttributeGuard, Params, Pattern, Route, Segment};

/// Handlers of the blog fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(dead_code)]
pub enum Page {
    Index,
    Article,
    ArticleEdit,
    Archive,
    Upload,
    Feed,
    Asset,
    Admin,
}

/// A blog-shaped tree exercising every pattern kind.
#[allow(dead_code)]
pub fn blog_routes() -> Route<Page> {
    Route::alternatives(
        "/",
        [
            Route::handler("index.html", Page::Index),
            Route::handler(
                Pattern::segments([
                    Segment::literal("articles/"),
                    Segment::wildcard("id").unwrap(),
                    Segment::literal("/article.html"),
                ]),
                Page::Article,
            ),
            Route::nested(
                Pattern::segments([
                    Segment::literal("edit/"),
                    Segment::keyed_regex("[0-9]+", "id").unwrap(),
                ]),
                Route::handler(Method::POST, Page::ArticleEdit),
            ),
            Route::handler(
                Pattern::segments([
                    Segment::literal("archive/"),
                    Segment::keyed_regex(r"\d{4}", "year").unwrap(),
                    Segment::literal("/"),
                    Segment::keyed_regex(r"\d{2}", "month").unwrap(),
                ]),
                Page::Archive,
            ),
            Route::nested(
                "upload",
                Route::alternatives(
                    Method::PUT,
                    [Route::handler("", Page::Upload)],
                ),
            ),
            Route::nested(
                AttributeGuard::new().one_of("server_name", ["juxt.pro"]),
                Route::handler("feed.xml", Page::Feed),
            ),
            Route::handler(Pattern::regex(r"static/[a-z]+\.css").unwrap(), Page::Asset),
            Route::nested(
                AttributeGuard::new().satisfies("x-role", |role| role == "admin"),
                Route::handler("admin", Page::Admin),
            ),
        ],
    )
}

/// Build a parameter map from pairs.
#[allow(dead_code)]
pub fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Write a config file into `dir` and return its path.
#[allow(dead_code)]
pub fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("routes.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

/// A config describing the articles part of the blog tree.
#[allow(dead_code)]
pub const BLOG_CONFIG: &str = r#"
[observability]
log_level = "debug"

[routes]
path = "/"

[[routes.routes]]
path = "index.html"
handler = "index"

[[routes.routes]]
segments = ["articles/", { param = "id" }, "/article.html"]
handler = "article"

[[routes.routes]]
segments = ["edit/", { param = "id", regex = "[0-9]+" }]

[[routes.routes.routes]]
method = "POST"
handler = "edit"

[[routes.routes]]
attributes = { server_name = ["juxt.pro"] }

[[routes.routes.routes]]
path = "feed.xml"
handler = "feed"
"#;
