#![allow(dead_code)]

use std::collections::HashMap;

use oxide_router::{
    Hostname, Literal, MatchOutcome, Method, Params, PartialRoute, Request, Route, RouteOptions,
    Segment, Uri,
};

pub fn request(method: &str, path: &str) -> Request {
    Request::new(method, Uri::from_path(path))
}

pub fn host_request(host: &str, path: &str) -> Request {
    Request::get(Uri::from_path(path).with_host(host))
}

pub fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

pub fn constraints(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

pub fn literal(path: &str) -> Box<dyn PartialRoute> {
    Box::new(Literal::new(path, Params::new()).unwrap_or_else(|e| panic!("Bad literal {path}: {e}")))
}

pub fn leaf(path: &str) -> Box<dyn Route> {
    Box::new(Literal::new(path, Params::new()).unwrap_or_else(|e| panic!("Bad literal {path}: {e}")))
}

pub fn method(verbs: &str) -> Box<dyn PartialRoute> {
    Box::new(Method::new(verbs, Params::new()).unwrap_or_else(|e| panic!("Bad verbs {verbs}: {e}")))
}

pub fn segment(route: &str, pairs: &[(&str, &str)]) -> Segment {
    Segment::new(route, constraints(pairs), Params::new())
        .unwrap_or_else(|e| panic!("Bad segment {route}: {e}"))
}

pub fn hostname(route: &str) -> Hostname {
    Hostname::new(route, HashMap::new(), Params::new())
        .unwrap_or_else(|e| panic!("Bad hostname {route}: {e}"))
}

pub fn match_route(route: &dyn Route, request: &Request) -> MatchOutcome {
    route
        .match_request(request, 0, &RouteOptions::new())
        .unwrap_or_else(|e| panic!("Match failed for {}: {e}", request.path()))
}

pub fn assemble_path(route: &dyn Route, params: &Params, options: &RouteOptions) -> String {
    route
        .assemble(&Uri::new(), params, options)
        .unwrap_or_else(|e| panic!("Assemble failed: {e}"))
        .uri
        .path()
        .to_string()
}
