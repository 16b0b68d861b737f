//! Property-based tests for path resolution and project detection.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use std::path::{Component, Path, PathBuf};

use proptest::prelude::*;

use strapi_codemods::core::paths::{absolutize, plugin_destination, V4_SUFFIX};
use strapi_codemods::core::project::{Manifest, ProjectKind};
use strapi_codemods::engine::request::{MigrateOptions, MigrationKind};
use strapi_codemods::engine::resolve::ResolvedRequest;
use strapi_codemods::engine::Plan;

/// Strategy for one path segment, including `.` and `..`.
fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-z0-9_-]{1,8}",
        1 => Just(".".to_string()),
        1 => Just("..".to_string()),
    ]
}

/// Strategy for relative paths built from segments.
fn relative_path() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec(segment(), 1..8).prop_map(|parts| parts.iter().collect())
}

/// Strategy for absolute base directories without `.` or `..`.
fn base_dir() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec("[a-z0-9]{1,8}", 0..5).prop_map(|parts| {
        let mut base = PathBuf::from("/");
        base.extend(parts);
        base
    })
}

/// Strategy for npm package names.
fn package_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,12}"
}

proptest! {
    #[test]
    fn absolutize_yields_normalized_absolute_paths(base in base_dir(), path in relative_path()) {
        let resolved = absolutize(&path, &base);

        prop_assert!(resolved.is_absolute());
        prop_assert!(resolved
            .components()
            .all(|c| !matches!(c, Component::CurDir | Component::ParentDir)));
    }

    #[test]
    fn absolutize_is_idempotent(base in base_dir(), path in relative_path()) {
        let once = absolutize(&path, &base);
        let twice = absolutize(&once, Path::new("/elsewhere"));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn plain_relative_paths_extend_base(base in base_dir(), parts in prop::collection::vec("[a-z]{1,8}", 1..5)) {
        let path: PathBuf = parts.iter().collect();
        prop_assert_eq!(absolutize(&path, &base), base.join(&path));
    }

    #[test]
    fn plugin_destination_is_a_sibling(base in base_dir(), name in "[a-z][a-z0-9-]{0,12}") {
        let source = base.join(&name);
        let destination = plugin_destination(&source);

        prop_assert_eq!(destination.parent(), source.parent());
        prop_assert_eq!(
            destination.file_name().and_then(|n| n.to_str()).map(str::to_string),
            Some(format!("{name}{V4_SUFFIX}"))
        );
    }

    #[test]
    fn any_v4_package_marks_project_migrated(
        v3 in prop::collection::vec(package_name(), 0..4),
        v4 in package_name(),
    ) {
        let mut deps: Vec<String> = v3.iter().map(|n| format!("\"{n}\": \"1.0.0\"")).collect();
        deps.push(format!("\"@strapi/{v4}\": \"4.0.0\""));
        let json = format!(
            "{{\"name\": \"app\", \"dependencies\": {{\"strapi\": \"3.6.8\", {}}}}}",
            deps.join(", ")
        );

        let manifest = Manifest::parse(&json).unwrap();
        prop_assert!(manifest.classify().is_err());
    }

    #[test]
    fn plans_never_run_destructive_steps_before_checks(skip in any::<bool>(), kind in 0u8..3) {
        let kind = match kind {
            0 => MigrationKind::Application,
            1 => MigrationKind::Dependencies,
            _ => MigrationKind::Plugin,
        };
        let plan = Plan::for_request(&ResolvedRequest {
            kind,
            source: PathBuf::from("/srv/project"),
            destination: None,
            options: MigrateOptions { skip_working_tree_check: skip },
            source_prompted: false,
        });

        let first_destructive = plan.steps.iter().position(|s| s.is_destructive());
        let last_check = plan.steps.iter().rposition(|s| !s.is_destructive());
        prop_assert!(first_destructive.is_some());
        prop_assert!(last_check < first_destructive);
    }
}

#[test]
fn v3_dependency_is_an_application() {
    let manifest = Manifest::parse(r#"{"dependencies": {"strapi-utils": "3.6.8"}}"#).unwrap();
    assert_eq!(manifest.classify().unwrap(), ProjectKind::Application);
}
