//! End-to-end matching and generation over the blog fixture.

use std::thread;

use axum::http::Method;
use bidi_router::routing::{
    match_route, path_for, Attributes, Params, Pattern, Route, RouteError, Segment,
};

mod common;
use common::{blog_routes, params, Page};

#[test]
fn test_single_route() {
    let route = Route::handler("/index.html", "index");
    let attrs = Attributes::new();

    let m = match_route("/index.html", &route, &attrs).unwrap();
    assert_eq!(m.handler, "index");
    assert!(m.params.is_empty());

    assert!(match_route("/other.html", &route, &attrs).is_none());
}

#[test]
fn test_article_match_and_generation() {
    let routes = blog_routes();

    let m = match_route("/articles/123/article.html", &routes, &Attributes::new()).unwrap();
    assert_eq!(m.handler, Page::Article);
    assert_eq!(m.params, params(&[("id", "123")]));

    let path = path_for(&Page::Article, &routes, &params(&[("id", "123")])).unwrap();
    assert_eq!(path, "/articles/123/article.html");
}

#[test]
fn test_missing_parameter_is_an_error() {
    let err = path_for(&Page::Article, &blog_routes(), &Params::new()).unwrap_err();
    assert!(matches!(err, RouteError::MissingParameter(ref k) if k == "id"));
    assert_eq!(err.to_string(), "missing parameter `id`");
}

#[test]
fn test_method_guard_after_path() {
    let routes = blog_routes();
    let post = Attributes::new().with_method(Method::POST);
    let get = Attributes::new().with_method(Method::GET);

    let m = match_route("/edit/42", &routes, &post).unwrap();
    assert_eq!(m.handler, Page::ArticleEdit);
    assert_eq!(m.params, params(&[("id", "42")]));

    assert!(match_route("/edit/42", &routes, &get).is_none());
    assert!(match_route("/edit/42", &routes, &Attributes::new()).is_none());
    // Keyed regex stops at the digits; the leftover keeps the handler from resolving
    assert!(match_route("/edit/42abc", &routes, &post).is_none());
}

#[test]
fn test_nested_method_alternatives() {
    let routes = blog_routes();
    let put = Attributes::new().with_method(Method::PUT);

    assert_eq!(match_route("/upload", &routes, &put).unwrap().handler, Page::Upload);
    assert!(match_route("/upload", &routes, &Attributes::new().with_method(Method::POST)).is_none());
    assert_eq!(path_for(&Page::Upload, &routes, &Params::new()).unwrap(), "/upload");
}

#[test]
fn test_keyed_regex_segments() {
    let routes = blog_routes();

    let m = match_route("/archive/2024/05", &routes, &Attributes::new()).unwrap();
    assert_eq!(m.handler, Page::Archive);
    assert_eq!(m.params, params(&[("year", "2024"), ("month", "05")]));

    assert!(match_route("/archive/24/05", &routes, &Attributes::new()).is_none());

    let err = path_for(&Page::Archive, &routes, &params(&[("year", "2024"), ("month", "5")])).unwrap_err();
    assert!(matches!(
        err,
        RouteError::IncompatibleParameter { ref key, ref value } if key == "month" && value == "5"
    ));
}

#[test]
fn test_attribute_guards() {
    let routes = blog_routes();

    let juxt = Attributes::new().with("server_name", "juxt.pro");
    assert_eq!(match_route("/feed.xml", &routes, &juxt).unwrap().handler, Page::Feed);

    let other = Attributes::new().with("server_name", "example.org");
    assert!(match_route("/feed.xml", &routes, &other).is_none());
    assert!(match_route("/feed.xml", &routes, &Attributes::new()).is_none());

    let admin = Attributes::new().with("x-role", "admin");
    assert_eq!(match_route("/admin", &routes, &admin).unwrap().handler, Page::Admin);
    let guest = Attributes::new().with("x-role", "guest");
    assert!(match_route("/admin", &routes, &guest).is_none());

    // Guards render as nothing
    assert_eq!(path_for(&Page::Feed, &routes, &Params::new()).unwrap(), "/feed.xml");
    assert_eq!(path_for(&Page::Admin, &routes, &Params::new()).unwrap(), "/admin");
}

#[test]
fn test_regex_pattern_matches_but_does_not_invert() {
    let routes = blog_routes();

    let m = match_route("/static/site.css", &routes, &Attributes::new()).unwrap();
    assert_eq!(m.handler, Page::Asset);
    assert!(match_route("/static/site.js", &routes, &Attributes::new()).is_none());

    let err = path_for(&Page::Asset, &routes, &Params::new()).unwrap_err();
    assert!(matches!(err, RouteError::NotInvertible(ref expr) if expr == r"static/[a-z]+\.css"));
}

#[test]
fn test_first_alternative_wins() {
    let wide = Route::handler(
        Pattern::segments([Segment::literal("items/"), Segment::wildcard("rest").unwrap()]),
        "wide",
    );
    let narrow = Route::handler("items/new", "narrow");

    let wide_first = Route::alternatives("/", [wide.clone(), narrow.clone()]);
    let narrow_first = Route::alternatives("/", [narrow, wide]);
    let attrs = Attributes::new();

    assert_eq!(match_route("/items/new", &wide_first, &attrs).unwrap().handler, "wide");
    assert_eq!(match_route("/items/new", &narrow_first, &attrs).unwrap().handler, "narrow");

    // Disjoint inputs are unaffected by order
    for tree in [&wide_first, &narrow_first] {
        assert_eq!(match_route("/items/7", tree, &attrs).unwrap().handler, "wide");
    }
}

#[test]
fn test_catch_all_captures_true_remainder() {
    let routes = Route::nested(
        Pattern::segments([Segment::literal("/users/"), Segment::keyed_regex("[0-9]+", "user").unwrap()]),
        Route::alternatives(
            "",
            [
                Route::handler("", "profile"),
                Route::handler("/posts", "posts"),
            ],
        ),
    );
    let attrs = Attributes::new();

    let m = match_route("/users/12/posts", &routes, &attrs).unwrap();
    assert_eq!(m.handler, "posts");
    assert_eq!(m.params, params(&[("user", "12")]));

    assert_eq!(match_route("/users/12", &routes, &attrs).unwrap().handler, "profile");
    assert!(match_route("/users/12/comments", &routes, &attrs).is_none());
}

#[test]
fn test_round_trip() {
    let routes = blog_routes();
    let cases = [
        (Page::Index, Params::new(), Attributes::new()),
        (Page::Article, params(&[("id", "hello-world")]), Attributes::new()),
        (Page::Article, params(&[("id", "a/b")]), Attributes::new()),
        (Page::Archive, params(&[("year", "1999"), ("month", "12")]), Attributes::new()),
        (
            Page::ArticleEdit,
            params(&[("id", "7")]),
            Attributes::new().with_method(Method::POST),
        ),
    ];

    for (page, p, attrs) in cases {
        let path = path_for(&page, &routes, &p).unwrap();
        let m = match_route(&path, &routes, &attrs).unwrap();
        assert_eq!(m.handler, page, "path {}", path);
        assert_eq!(m.params, p, "path {}", path);
    }
}

#[test]
fn test_unbound_params_fail_generation() {
    let routes = blog_routes();

    let err = path_for(&Page::Article, &routes, &params(&[("id", "1"), ("bogus", "x")])).unwrap_err();
    assert!(matches!(err, RouteError::UnexpectedParameter(ref k) if k == "bogus"));
    assert_eq!(err.to_string(), "unexpected parameter `bogus`");

    let err = path_for(&Page::Index, &routes, &params(&[("unused", "x")])).unwrap_err();
    assert!(matches!(err, RouteError::UnexpectedParameter(ref k) if k == "unused"));
}

#[test]
fn test_concurrent_lookups_share_tree() {
    let routes = blog_routes();

    thread::scope(|s| {
        for i in 0..8 {
            let routes = &routes;
            s.spawn(move || {
                for j in 0..100 {
                    let id = format!("{}-{}", i, j);
                    let path = path_for(&Page::Article, routes, &params(&[("id", id.as_str())])).unwrap();
                    let m = match_route(&path, routes, &Attributes::new()).unwrap();
                    assert_eq!(m.params["id"], id);
                }
            });
        }
    });
}
