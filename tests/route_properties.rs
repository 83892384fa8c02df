// tests/route_properties.rs

use std::path::Path;

use proptest::prelude::*;
use serde_json::{json, Value};

use nvr::manifest::{DeploymentConfig, Route, CATCH_ALL_SRC};
use nvr::types::{FunctionName, FUNCTION_PREFIX};

fn pattern_strategy() -> impl Strategy<Value = String> {
    "/[a-z]{1,8}(/[a-z]{1,8}){0,2}(/\\(\\.\\*\\))?"
}

fn existing_route_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(json!({ "handle": "filesystem" })),
        "/[a-z]{1,6}".prop_map(|src| json!({ "src": src, "continue": true })),
    ]
}

proptest! {
    #[test]
    fn routes_land_immediately_before_catch_all(
        before in proptest::collection::vec(existing_route_strategy(), 0..4),
        patterns in proptest::collection::vec(pattern_strategy(), 1..6),
        suffix in "[a-z0-9._-]{0,12}",
    ) {
        let mut routes = before.clone();
        routes.push(json!({ "src": CATCH_ALL_SRC, "dest": "/__nitro" }));
        let doc = json!({ "version": 3, "routes": routes, "overrides": { "a": 1 } });

        let mut cfg = DeploymentConfig::parse(Path::new("config.json"), &doc.to_string()).unwrap();
        let dest = FunctionName::for_suffix(&suffix).route_dest();
        let new: Vec<Route> = patterns
            .iter()
            .map(|p| Route { src: p.clone(), dest: dest.clone() })
            .collect();

        let index = cfg.insert_before_catch_all(&new).unwrap();
        prop_assert_eq!(index, before.len());

        let out: Value = serde_json::from_str(&cfg.to_pretty_json().unwrap()).unwrap();
        let out_routes = out["routes"].as_array().unwrap();
        prop_assert_eq!(out_routes.len(), before.len() + patterns.len() + 1);
        prop_assert_eq!(&out_routes[..before.len()], &before[..]);
        for (i, pattern) in patterns.iter().enumerate() {
            prop_assert_eq!(&out_routes[before.len() + i], &json!({ "src": pattern, "dest": dest }));
        }
        prop_assert_eq!(&out_routes[before.len() + patterns.len()]["src"], &json!(CATCH_ALL_SRC));
        prop_assert_eq!(&out["version"], &doc["version"]);
        prop_assert_eq!(&out["overrides"], &doc["overrides"]);
    }

    #[test]
    fn function_names_are_deterministic_and_sanitised(suffix in "\\PC{0,16}") {
        let a = FunctionName::for_suffix(&suffix);
        let b = FunctionName::for_suffix(&suffix);
        prop_assert_eq!(&a, &b);

        let name = a.as_str();
        prop_assert!(name.starts_with(FUNCTION_PREFIX));

        let disallowed = |c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-');
        let stripped_count = suffix.chars().filter(|c| disallowed(*c)).count();
        let rest = name.strip_prefix(FUNCTION_PREFIX).unwrap();
        let kept = rest.strip_prefix('-').unwrap_or(rest);
        if stripped_count > 0 {
            prop_assert_eq!(kept.chars().count(), suffix.chars().count() - 1);
        } else {
            prop_assert_eq!(kept, suffix.as_str());
        }
    }
}
