//! Tests for route registration and matching.

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;
    use std::thread;

    use crate::parser::Method;
    use crate::router::{Match, PathParams, RouteEntry, RouteError, Router, RouterConfig};

    fn router_with_get_paths(paths: &[&'static str]) -> Router<&'static str> {
        let mut router = Router::new();
        for path in paths {
            router.get(path, *path).unwrap();
        }
        router
    }

    fn found(router: &Router<&'static str>, method: Method, path: &str) -> Option<(&'static str, PathParams)> {
        match router.lookup(method, path) {
            Match::Found { handler, params } => Some((handler, params)),
            _ => None,
        }
    }

    #[test]
    fn test_register_without_leading_slash() {
        let mut router = router_with_get_paths(&["/foo"]);

        let result = router.get("foo", "bad");
        assert_eq!(result, Err(RouteError::InvalidPath("foo".to_string())));
        assert_eq!(router.register(Method::GET, "", Some("bad")), Err(RouteError::InvalidPath(String::new())));

        assert_eq!(router.lookup(Method::GET, "foo"), Match::NotFound);
        assert_eq!(found(&router, Method::GET, "/foo").map(|(h, _)| h), Some("/foo"));
    }

    #[test]
    fn test_invalid_path_does_not_create_method_root() {
        let mut router: Router<&'static str> = Router::new();
        assert!(router.post("nope", "x").is_err());

        assert!(router.routes().is_empty());
        assert_eq!(router.dump_routes(), "");
    }

    #[test]
    fn test_unknown_path() {
        let router = router_with_get_paths(&["/foo"]);
        assert_eq!(router.lookup(Method::GET, "/bar"), Match::NotFound);
    }

    #[test]
    fn test_every_method_entry_point() {
        let mut router: Router<&'static str> = Router::new();
        router.get("/r", "get").unwrap();
        router.post("/r", "post").unwrap();
        router.put("/r", "put").unwrap();
        router.patch("/r", "patch").unwrap();
        router.delete("/r", "delete").unwrap();
        router.head("/r", "head").unwrap();
        router.options("/r", "options").unwrap();
        router.trace("/r", "trace").unwrap();

        let expected = [
            (Method::GET, "get"),
            (Method::POST, "post"),
            (Method::PUT, "put"),
            (Method::PATCH, "patch"),
            (Method::DELETE, "delete"),
            (Method::HEAD, "head"),
            (Method::OPTIONS, "options"),
            (Method::TRACE, "trace"),
        ];
        for (method, handler) in expected {
            assert_eq!(found(&router, method, "/r").map(|(h, _)| h), Some(handler), "{method}");
        }
    }

    #[test]
    fn test_no_fallback_to_other_method() {
        let router = router_with_get_paths(&["/foo"]);
        assert_eq!(router.lookup(Method::POST, "/foo"), Match::NotFound);
    }

    #[test]
    fn test_static_routes_without_redirect() {
        let paths = ["/", "/foo", "/foo/bar", "/bar/", "/bar/foo/"];
        let mut router = router_with_get_paths(&paths);
        router.set_redirect_trailing_slash(false);

        for path in paths {
            assert_eq!(found(&router, Method::GET, path).map(|(h, _)| h), Some(path));
        }
    }

    #[test]
    fn test_none_handler_is_not_found() {
        let mut router: Router<&'static str> = Router::new();
        router.set_redirect_trailing_slash(false);
        router.register(Method::GET, "/nilhandler", None).unwrap();

        assert_eq!(router.lookup(Method::GET, "/nilhandler"), Match::NotFound);
        assert_eq!(router.lookup(Method::GET, "/undefined"), Match::NotFound);
    }

    #[test]
    fn test_last_registration_wins() {
        let mut router: Router<&'static str> = Router::new();
        router.get("/foo/:id", "first").unwrap();
        let shape = router.dump_routes();

        router.get("/foo/:id", "second").unwrap();

        assert_eq!(router.dump_routes(), shape);
        assert_eq!(found(&router, Method::GET, "/foo/1").map(|(h, _)| h), Some("second"));
    }

    #[test]
    fn test_trailing_slash_redirects() {
        let mut router = router_with_get_paths(&[
            "/",
            "/foo",
            "/foo/bar",
            "/bar/",
            "/bar/foo/",
            "/a",
            "/a/:id",
            "/b/",
            "/b/:id/",
        ]);
        router.register(Method::GET, "/nilhandler", None).unwrap();

        let expectations: Vec<(&str, Match<&'static str>)> = vec![
            ("/foo/", Match::Redirect("/foo".to_string())),
            ("/foo/bar/", Match::Redirect("/foo/bar".to_string())),
            ("/bar", Match::Redirect("/bar/".to_string())),
            ("/bar/foo", Match::Redirect("/bar/foo/".to_string())),
            ("/a/", Match::Redirect("/a".to_string())),
            ("/a/5/", Match::Redirect("/a/5".to_string())),
            ("/b", Match::Redirect("/b/".to_string())),
            ("/b/5", Match::Redirect("/b/5/".to_string())),
            ("/nilhandler", Match::NotFound),
            ("/undefined", Match::NotFound),
        ];
        for (path, expected) in expectations {
            assert_eq!(router.lookup(Method::GET, path), expected, "{path}");
        }

        for path in ["/", "/foo", "/foo/bar", "/bar/", "/bar/foo/", "/a", "/b/"] {
            assert_eq!(found(&router, Method::GET, path).map(|(h, _)| h), Some(path));
        }

        let (handler, params) = found(&router, Method::GET, "/a/5").unwrap();
        assert_eq!(handler, "/a/:id");
        assert_eq!(params.get("id"), Some("5"));

        let (handler, params) = found(&router, Method::GET, "/b/5/").unwrap();
        assert_eq!(handler, "/b/:id/");
        assert_eq!(&params["id"], "5");
    }

    #[test]
    fn test_mismatched_slash_is_not_found_without_redirect() {
        let mut router = router_with_get_paths(&["/", "/a", "/a/:id", "/b/", "/b/:id/"]);
        router.set_redirect_trailing_slash(false);

        for path in ["/a/", "/b", "/a/5/", "/b/5"] {
            assert_eq!(router.lookup(Method::GET, path), Match::NotFound, "{path}");
        }
    }

    #[test]
    fn test_no_redirect_when_both_variants_exist() {
        let router = router_with_get_paths(&["/foo", "/foo/"]);

        assert_eq!(found(&router, Method::GET, "/foo").map(|(h, _)| h), Some("/foo"));
        assert_eq!(found(&router, Method::GET, "/foo/").map(|(h, _)| h), Some("/foo/"));
    }

    #[test]
    fn test_dead_end_before_last_segment_is_not_found() {
        let router = router_with_get_paths(&["/foo"]);

        assert_eq!(router.lookup(Method::GET, "/foo/x/"), Match::NotFound);
        assert_eq!(router.lookup(Method::GET, "/foo//"), Match::NotFound);
    }

    #[test]
    fn test_path_params() {
        let cases: Vec<(&'static str, &str, Vec<(&str, &str)>)> = vec![
            ("/foo/:id", "/foo/1", vec![("id", "1")]),
            ("/foo/:id/bar", "/foo/1/bar", vec![("id", "1")]),
            ("/foo/:id/bar/:id2", "/foo/1/bar/2", vec![("id", "1"), ("id2", "2")]),
        ];

        for (defined, requested, expected) in cases {
            let router = router_with_get_paths(&[defined]);
            let (handler, params) = found(&router, Method::GET, requested).unwrap();
            assert_eq!(handler, defined);
            assert_eq!(params.len(), expected.len());
            for (name, value) in expected {
                assert_eq!(params.get(name), Some(value), "{requested}");
            }
        }
    }

    #[test]
    fn test_nested_params_on_shared_prefix() {
        let router = router_with_get_paths(&["/foo/:id", "/foo/:id/bar/:id2"]);

        let (handler, params) = found(&router, Method::GET, "/foo/1/bar/2").unwrap();
        assert_eq!(handler, "/foo/:id/bar/:id2");
        let mut pairs: Vec<(&str, &str)> = params.iter().collect();
        pairs.sort();
        assert_eq!(pairs, vec![("id", "1"), ("id2", "2")]);
    }

    #[test]
    fn test_literal_wins_over_param() {
        let router = router_with_get_paths(&["/users/:id", "/users/me"]);

        let (handler, params) = found(&router, Method::GET, "/users/me").unwrap();
        assert_eq!(handler, "/users/me");
        assert!(params.is_empty());

        let (handler, params) = found(&router, Method::GET, "/users/42").unwrap();
        assert_eq!(handler, "/users/:id");
        assert!(params.contains("id"));
    }

    #[test]
    fn test_param_does_not_capture_empty_segment() {
        let mut router = router_with_get_paths(&["/:name"]);
        router.set_redirect_trailing_slash(false);

        assert_eq!(router.lookup(Method::GET, "/"), Match::NotFound);
    }

    #[test]
    fn test_duplicate_path_param() {
        let mut router: Router<&'static str> = Router::new();
        router.register(Method::GET, "/:foo", None).unwrap();

        let result = router.register(Method::GET, "/:bar", None);
        assert!(matches!(result, Err(RouteError::ParamConflict { .. })));

        // Other methods have their own tree.
        assert!(router.register(Method::POST, "/:bar", None).is_ok());
    }

    #[test]
    fn test_conflict_keeps_earlier_routes() {
        let mut router = router_with_get_paths(&["/a/:id"]);
        assert!(router.get("/a/:other", "x").is_err());

        let (handler, params) = found(&router, Method::GET, "/a/7").unwrap();
        assert_eq!(handler, "/a/:id");
        assert_eq!(params.get("id"), Some("7"));
    }

    #[test]
    fn test_request_path_without_leading_slash() {
        let router = router_with_get_paths(&["/", "/foo"]);

        assert_eq!(router.lookup(Method::GET, ""), Match::NotFound);
        assert_eq!(router.lookup(Method::GET, "foo"), Match::NotFound);
        assert_eq!(router.lookup(Method::GET, "*"), Match::NotFound);
    }

    #[test]
    fn test_add_route_while_shared() {
        let router: Arc<Router<u32>> = Arc::new(Router::new());

        let handles: Vec<_> = (0..4u32)
            .map(|i| {
                let router = Arc::clone(&router);
                thread::spawn(move || router.add_route(Method::GET, &format!("/t{i}/:id"), Some(i)))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        for i in 0..4u32 {
            match router.lookup(Method::GET, &format!("/t{i}/x")) {
                Match::Found { handler, params } => {
                    assert_eq!(handler, i);
                    assert_eq!(params.get("id"), Some("x"));
                }
                other => panic!("expected a match, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_concurrent_lookups_during_add() {
        let mut router: Router<u32> = Router::new();
        router.get("/stable", 0).unwrap();
        let router = Arc::new(router);

        let writer = {
            let router = Arc::clone(&router);
            thread::spawn(move || {
                for i in 0..100u32 {
                    router.add_route(Method::GET, &format!("/r{i}"), Some(i)).unwrap();
                }
            })
        };
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let router = Arc::clone(&router);
                thread::spawn(move || {
                    for _ in 0..100 {
                        assert!(matches!(router.lookup(Method::GET, "/stable"), Match::Found { handler: 0, .. }));
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(router.routes().len(), 101);
    }

    #[test]
    fn test_add_route_rejected_without_locking() {
        let config = RouterConfig {
            concurrent_add: false,
            ..RouterConfig::default()
        };
        let mut router: Router<u32> = Router::with_config(config);

        assert_eq!(router.add_route(Method::GET, "/late", Some(1)), Err(RouteError::ConcurrentAddDisabled));

        router.get("/early", 2).unwrap();
        assert!(matches!(router.lookup(Method::GET, "/early"), Match::Found { handler: 2, .. }));
        assert!(matches!(router.lookup(Method::GET, "/early/"), Match::Redirect(ref p) if p == "/early"));
    }

    #[test]
    fn test_dump_routes() {
        let mut router: Router<&'static str> = Router::new();
        router.get("/", "root").unwrap();
        router.get("/a/:id", "a").unwrap();
        router.post("/b/", "b").unwrap();

        let expected = "  GET\n\
                        *   /\n\
                        \x20   /a\n\
                        *     /:id\n\
                        \x20 POST\n\
                        \x20   /b\n\
                        *     /\n";
        assert_eq!(router.dump_routes(), expected);
    }

    #[test]
    fn test_routes_listing() {
        let mut router: Router<&'static str> = Router::new();
        router.post("/b/", "b").unwrap();
        router.get("/a/:id", "a").unwrap();
        router.get("/", "root").unwrap();
        router.register(Method::GET, "/nil", None).unwrap();

        let routes = router.routes();
        assert_eq!(
            routes,
            vec![
                RouteEntry { method: Method::GET, path: "/".to_string() },
                RouteEntry { method: Method::GET, path: "/a/:id".to_string() },
                RouteEntry { method: Method::POST, path: "/b/".to_string() },
            ]
        );

        let json = serde_json::to_string(&routes[1]).unwrap();
        assert_eq!(json, r#"{"method":"GET","path":"/a/:id"}"#);
    }
}
