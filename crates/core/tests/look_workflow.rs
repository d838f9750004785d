//! End-to-end look resolution and attachment against an in-memory scene

mod common;

use common::{Project, resolve, resolve_with};
use lookloader_api::{
    AssetRef, DEFAULT_LOOK, OVERRIDE_LOOK, PlugState, SceneBindingService, SceneHandle,
};
use lookloader_core::{InMemoryScene, LookError, LookStandin, VariantKind, VariantProfile};

const FOO_SOURCE: &str = "/show/assets/foo/abc/foo_mod.v001.abc";

fn foo_scene() -> (InMemoryScene, SceneHandle) {
    let mut scene = InMemoryScene::new();
    let handle = scene.add_standin("foo1", Some(FOO_SOURCE));
    (scene, handle)
}

#[test]
fn test_latest_default_version_is_selected() {
    let project = Project::new();
    project.touch("assets/foo/publish/foo_operator.v001.ass");
    let v3 = project.touch("assets/foo/publish/foo_operator.v003.ass");
    let (scene, _) = foo_scene();

    let standin = resolve(&project, &scene, "foo", "foo1");
    let default = standin.catalog().get(DEFAULT_LOOK).unwrap();

    assert_eq!(default.path(), v3);
    assert_eq!(default.plug_state(), PlugState::NotPlugged);
    assert_eq!(default.binding_ref(), None);
    assert!(!standin.is_looks_up_to_date());
}

#[test]
fn test_catalog_order_and_override() {
    let project = Project::new();
    project.touch("assets/foo/publish/foo_operator.v002.ass");
    let over = project.touch("assets/foo/publish/foo_operator.ass");
    project.touch("assets/foo/publish/look/wet/foo_wet_operator.v001.ass");
    project.touch("assets/foo/publish/look/dirty/foo_dirty_operator.v004.ass");
    // reserved names never become sub-looks
    project.touch("assets/foo/publish/look/default/foo_default_operator.v001.ass");
    let (scene, _) = foo_scene();

    let standin = resolve(&project, &scene, "foo", "foo1");
    let names: Vec<&str> = standin.catalog().names().collect();

    assert_eq!(names, vec![DEFAULT_LOOK, OVERRIDE_LOOK, "dirty", "wet"]);
    assert_eq!(standin.catalog().get(OVERRIDE_LOOK).unwrap().path(), over);
}

#[test]
fn test_anterior_binding_is_retargeted_in_place() {
    let project = Project::new();
    let v1 = project.touch("assets/foo/publish/foo_operator.v001.ass");
    let v3 = project.touch("assets/foo/publish/foo_operator.v003.ass");
    project.touch("assets/foo/publish/foo_operator.ass");
    let (mut scene, handle) = foo_scene();
    let binding = scene
        .create_binding(handle, "aiIncludeGraph_foo1_default", &v1)
        .unwrap();

    let mut standin = resolve(&project, &scene, "foo", "foo1");
    let default = standin.catalog().get(DEFAULT_LOOK).unwrap();
    assert_eq!(default.plug_state(), PlugState::AnteriorVersionPlugged);
    assert_eq!(default.binding_ref(), Some(binding));
    // a versioned binding never claims the unversioned override
    assert_eq!(
        standin.catalog().get(OVERRIDE_LOOK).unwrap().plug_state(),
        PlugState::NotPlugged
    );

    let report = standin
        .attach_looks(&[v3.as_str()], false, &mut scene)
        .unwrap();
    assert_eq!(report.retargeted, 1);
    assert!(report.created.is_empty());

    assert_eq!(scene.binding_slots(handle).unwrap(), vec![Some(binding)]);
    assert_eq!(scene.binding(binding).unwrap().path, v3);

    standin.refresh_looks(project.root(), &scene).unwrap();
    assert_eq!(
        standin.catalog().get(DEFAULT_LOOK).unwrap().plug_state(),
        PlugState::AlreadyPlugged
    );
}

#[test]
fn test_replace_disconnects_other_looks() {
    let project = Project::new();
    project.touch("assets/foo/publish/foo_operator.v001.ass");
    let look_a = project.touch("assets/foo/publish/look/lookA/foo_lookA_operator.v001.ass");
    let look_b = project.touch("assets/foo/publish/look/lookB/foo_lookB_operator.v001.ass");
    let (mut scene, handle) = foo_scene();
    let a = scene.create_binding(handle, "aiIncludeGraph_foo1_lookA", &look_a).unwrap();
    let b = scene.create_binding(handle, "aiIncludeGraph_foo1_lookB", &look_b).unwrap();

    let mut standin = resolve(&project, &scene, "foo", "foo1");
    let report = standin
        .attach_looks(&[look_a.as_str()], true, &mut scene)
        .unwrap();

    assert_eq!(report.disconnected, 1);
    assert_eq!(scene.binding_slots(handle).unwrap(), vec![Some(a), None]);
    assert!(scene.binding(b).is_none());

    standin.refresh_looks(project.root(), &scene).unwrap();
    assert_eq!(
        standin.catalog().get("lookB").unwrap().plug_state(),
        PlugState::NotPlugged
    );
}

#[test]
fn test_replace_with_unbound_look_reuses_first_binding() {
    let project = Project::new();
    let default = project.touch("assets/foo/publish/foo_operator.v001.ass");
    let look_a = project.touch("assets/foo/publish/look/lookA/foo_lookA_operator.v002.ass");
    let (mut scene, handle) = foo_scene();
    let binding = scene
        .create_binding(handle, "aiIncludeGraph_foo1_default", &default)
        .unwrap();

    let standin = resolve(&project, &scene, "foo", "foo1");
    let report = standin
        .attach_looks(&[look_a.as_str()], true, &mut scene)
        .unwrap();

    assert_eq!(report.retargeted, 1);
    assert_eq!(report.renamed, 1);
    assert_eq!(scene.binding_slots(handle).unwrap(), vec![Some(binding)]);
    let record = scene.binding(binding).unwrap();
    assert_eq!(record.path, look_a);
    assert_eq!(record.name, "aiIncludeGraph_foo1_lookA");
}

#[test]
fn test_attach_creates_named_binding_and_clears_selection() {
    let project = Project::new();
    project.touch("assets/foo/publish/foo_operator.v001.ass");
    let wet = project.touch("assets/foo/publish/look/wet/foo_wet_operator.v001.ass");
    let (mut scene, handle) = foo_scene();
    scene.select(handle);

    let standin = resolve(&project, &scene, "foo", "foo1");
    let report = standin
        .attach_looks(&[wet.as_str(), "/not/in/catalog.ass"], false, &mut scene)
        .unwrap();

    assert_eq!(report.created.len(), 1);
    let record = scene.binding(report.created[0]).unwrap();
    assert_eq!(record.name, "aiIncludeGraph_foo1_wet");
    assert_eq!(record.path, wet);
    assert!(scene.selection().is_empty());
}

#[test]
fn test_attach_is_idempotent() {
    let project = Project::new();
    let default = project.touch("assets/foo/publish/foo_operator.v001.ass");
    let (mut scene, _) = foo_scene();

    let mut standin = resolve(&project, &scene, "foo", "foo1");
    let first = standin
        .attach_looks(&[default.as_str()], false, &mut scene)
        .unwrap();
    assert_eq!(first.created.len(), 1);

    standin.refresh_looks(project.root(), &scene).unwrap();
    let snapshot = scene.clone();
    let second = standin
        .attach_looks(&[default.as_str()], false, &mut scene)
        .unwrap();

    assert!(second.is_noop());
    assert_eq!(scene, snapshot);
}

#[test]
fn test_update_existing_looks() {
    let project = Project::new();
    let v1 = project.touch("assets/foo/publish/foo_operator.v001.ass");
    let v2 = project.touch("assets/foo/publish/foo_operator.v002.ass");
    let over = project.touch("assets/foo/publish/foo_operator.ass");
    let red_v1 = project.touch("assets/foo/publish/look/red/foo_red_operator.v001.ass");
    let red_v2 = project.touch("assets/foo/publish/look/red/foo_red_operator.v002.ass");
    project.touch("assets/foo/publish/look/blue/foo_blue_operator.v001.ass");
    let (mut scene, handle) = foo_scene();
    let default = scene.create_binding(handle, "aiIncludeGraph_foo1_default", &v1).unwrap();
    let red = scene.create_binding(handle, "aiIncludeGraph_foo1_red", &red_v1).unwrap();

    let mut standin = resolve(&project, &scene, "foo", "foo1");
    assert!(!standin.is_looks_up_to_date());

    let report = standin.update_existing_looks(&mut scene).unwrap();
    assert_eq!(report.retargeted, 2);
    assert_eq!(report.created.len(), 1);
    assert_eq!(scene.binding(default).unwrap().path, v2);
    assert_eq!(scene.binding(red).unwrap().path, red_v2);
    assert_eq!(scene.binding(report.created[0]).unwrap().path, over);

    standin.refresh_looks(project.root(), &scene).unwrap();
    assert!(standin.is_looks_up_to_date());
    // optional sub-looks are never plugged by an update
    assert_eq!(
        standin.catalog().get("blue").unwrap().plug_state(),
        PlugState::NotPlugged
    );
    assert!(standin.update_existing_looks(&mut scene).unwrap().is_noop());
}

#[test]
fn test_binding_ref_tracks_plug_state() {
    let project = Project::new();
    let v1 = project.touch("assets/foo/publish/foo_operator.v001.ass");
    project.touch("assets/foo/publish/foo_operator.v002.ass");
    let over = project.touch("assets/foo/publish/foo_operator.ass");
    project.touch("assets/foo/publish/look/red/foo_red_operator.v001.ass");
    let (mut scene, handle) = foo_scene();
    scene.create_binding(handle, "a", &v1).unwrap();
    scene.create_binding(handle, "b", &over).unwrap();
    scene.create_binding(handle, "c", "/elsewhere/unrelated.abc").unwrap();

    let standin = resolve(&project, &scene, "foo", "foo1");
    let states: Vec<PlugState> = standin.catalog().entries().map(|e| e.plug_state()).collect();
    assert_eq!(
        states,
        vec![
            PlugState::AnteriorVersionPlugged,
            PlugState::AlreadyPlugged,
            PlugState::NotPlugged
        ]
    );
    for entry in standin.catalog().entries() {
        assert_eq!(entry.is_bound(), entry.binding_ref().is_some());
    }
}

#[test]
fn test_missing_publish_dir_invalidates_asset() {
    let project = Project::new();
    let mut scene = InMemoryScene::new();
    let handle = scene.add_standin("bar1", Some("/show/assets/bar/abc/bar_mod.v001.abc"));

    let err = LookStandin::resolve(
        project.root(),
        AssetRef::new("bar", "bar1", handle),
        VariantProfile::ASSET,
        &scene,
    )
    .unwrap_err();

    assert!(matches!(err, LookError::AssetDirectoryMissing { .. }));
    assert!(err.invalidates_asset());
}

#[test]
fn test_missing_default_look_invalidates_asset() {
    let project = Project::new();
    project.touch("assets/foo/publish/foo_operator.ass");
    let (scene, handle) = foo_scene();

    let err = LookStandin::resolve(
        project.root(),
        AssetRef::new("foo", "foo1", handle),
        VariantProfile::ASSET,
        &scene,
    )
    .unwrap_err();

    assert!(matches!(err, LookError::NoDefaultLookFound { .. }));
    assert!(err.invalidates_asset());
}

#[test]
fn test_uv_update_points_at_latest_mod_file() {
    let project = Project::new();
    project.touch("assets/x/publish/x_operator.v001.ass");
    let v2 = project.touch("assets/x/abc/x_mod.v002.abc");
    let v5 = project.touch("assets/x/abc/x_mod.v005.abc");
    let mut scene = InMemoryScene::new();
    let handle = scene.add_standin("x1", Some(v2.as_str()));

    let standin = resolve(&project, &scene, "x", "x1");
    assert_eq!(standin.uvs().head().unwrap().path, v5);
    assert!(!standin.is_uv_up_to_date(&scene).unwrap());

    assert!(standin.update_uvs(&mut scene).unwrap());
    assert_eq!(scene.get_source_path(handle).unwrap(), Some(v5));
    assert!(standin.is_uv_up_to_date(&scene).unwrap());
}

#[test]
fn test_uv_without_mod_files_is_up_to_date() {
    let project = Project::new();
    project.touch("assets/x/publish/x_operator.v001.ass");
    let mut scene = InMemoryScene::new();
    scene.add_standin("x1", Some("/show/assets/x/abc/x_mod.v001.abc"));

    let standin = resolve(&project, &scene, "x", "x1");
    assert!(standin.uvs().is_empty());
    assert!(standin.is_uv_up_to_date(&scene).unwrap());
    assert!(!standin.update_uvs(&mut scene).unwrap());
}

#[test]
fn test_fur_variant() {
    let project = Project::new();
    let default = project.touch("assets/yeti/publish/yeti_fur.v002.ass");
    project.touch("assets/yeti/publish/yeti_fur.ass");
    project.touch("assets/yeti/publish/look_fur/wet/yeti_wet_fur.v001.ass");
    // asset-variant looks are invisible to the fur variant
    project.touch("assets/yeti/publish/look/dry/yeti_dry_operator.v001.ass");
    project.touch("assets/yeti/abc/yeti_mod.v003.abc");
    let mut scene = InMemoryScene::new();
    scene.add_standin("yeti1", Some("/show/assets/yeti/abc_fur/yeti_01_fur.abc"));

    let standin = resolve_with(&project, &scene, "yeti", "yeti1", VariantProfile::FUR);

    assert_eq!(standin.profile().kind, VariantKind::Fur);
    let names: Vec<&str> = standin.catalog().names().collect();
    assert_eq!(names, vec![DEFAULT_LOOK, "wet"]);
    assert_eq!(standin.catalog().get(DEFAULT_LOOK).unwrap().path(), default);
    assert!(standin.uvs().is_empty());
    assert!(standin.is_uv_up_to_date(&scene).unwrap());
}

#[test]
fn test_scene_survives_save_and_load() {
    let project = Project::new();
    let default = project.touch("assets/foo/publish/foo_operator.v001.ass");
    let (mut scene, handle) = foo_scene();

    let standin = resolve(&project, &scene, "foo", "foo1");
    standin
        .attach_looks(&[default.as_str()], false, &mut scene)
        .unwrap();

    let scene_path = project.root().join("scene.json");
    scene.save(&scene_path).unwrap();
    let reloaded = InMemoryScene::load(&scene_path).unwrap();
    assert_eq!(reloaded, scene);

    let standin = resolve(&project, &reloaded, "foo", "foo1");
    assert_eq!(
        standin.catalog().get(DEFAULT_LOOK).unwrap().plug_state(),
        PlugState::AlreadyPlugged
    );
    assert_eq!(reloaded.binding_slots(handle).unwrap().len(), 1);
}

/// Bindings of `handle` whose path continues `root` with a version or extension tail.
fn lineage_paths(scene: &InMemoryScene, handle: SceneHandle, root: &str) -> Vec<String> {
    scene
        .standin(handle)
        .unwrap()
        .bindings()
        .filter(|b| {
            b.path
                .strip_prefix(root)
                .is_some_and(|rest| rest.starts_with('.'))
        })
        .map(|b| b.path.clone())
        .collect()
}

fn lineage_root(versioned: &str) -> String {
    versioned.strip_suffix(".v001.ass").unwrap().to_string()
}

fn publish_three_defaults(project: &Project) -> (String, String, String) {
    (
        project.touch("assets/foo/publish/foo_operator.v001.ass"),
        project.touch("assets/foo/publish/foo_operator.v002.ass"),
        project.touch("assets/foo/publish/foo_operator.v003.ass"),
    )
}

#[test]
fn test_replace_anterior_collapses_lineage() {
    let project = Project::new();
    let (v1, v2, v3) = publish_three_defaults(&project);
    let root = lineage_root(&v1);
    let (mut scene, handle) = foo_scene();
    let b1 = scene.create_binding(handle, "aiIncludeGraph_foo1_default", &v1).unwrap();
    let b2 = scene.create_binding(handle, "aiIncludeGraph_foo1_default1", &v2).unwrap();

    let standin = resolve(&project, &scene, "foo", "foo1");
    let report = standin
        .attach_looks(&[v3.as_str()], true, &mut scene)
        .unwrap();

    assert_eq!(report.retargeted, 1);
    assert_eq!(report.disconnected, 1);
    assert_eq!(lineage_paths(&scene, handle, &root), vec![v3.clone()]);
    assert!(scene.binding(b1).is_none());
    assert_eq!(scene.binding(b2).unwrap().path, v3);
}

#[test]
fn test_replace_already_plugged_collapses_lineage() {
    let project = Project::new();
    let (v1, _, v3) = publish_three_defaults(&project);
    let root = lineage_root(&v1);
    let (mut scene, handle) = foo_scene();
    let b3 = scene.create_binding(handle, "aiIncludeGraph_foo1_default", &v3).unwrap();
    let b1 = scene.create_binding(handle, "aiIncludeGraph_foo1_default1", &v1).unwrap();

    let standin = resolve(&project, &scene, "foo", "foo1");
    let report = standin
        .attach_looks(&[v3.as_str()], true, &mut scene)
        .unwrap();

    assert_eq!(report.disconnected, 1);
    assert_eq!(scene.binding_slots(handle).unwrap(), vec![Some(b3), None]);
    assert!(scene.binding(b1).is_none());
    assert_eq!(lineage_paths(&scene, handle, &root), vec![v3]);
}

#[test]
fn test_replace_not_plugged_leaves_single_binding() {
    let project = Project::new();
    let (v1, v2, _) = publish_three_defaults(&project);
    let wet = project.touch("assets/foo/publish/look/wet/foo_wet_operator.v001.ass");
    let root = lineage_root(&v1);
    let (mut scene, handle) = foo_scene();
    scene.create_binding(handle, "aiIncludeGraph_foo1_default", &v1).unwrap();
    scene.create_binding(handle, "aiIncludeGraph_foo1_default1", &v2).unwrap();

    let mut standin = resolve(&project, &scene, "foo", "foo1");
    standin
        .attach_looks(&[wet.as_str()], true, &mut scene)
        .unwrap();

    let remaining: Vec<_> = scene.standin(handle).unwrap().bindings().cloned().collect();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].path, wet);
    assert_eq!(remaining[0].name, "aiIncludeGraph_foo1_wet");
    assert!(lineage_paths(&scene, handle, &root).is_empty());

    standin.refresh_looks(project.root(), &scene).unwrap();
    assert_eq!(
        standin.catalog().get("wet").unwrap().plug_state(),
        PlugState::AlreadyPlugged
    );
}

#[test]
fn test_resolution_is_idempotent() {
    let project = Project::new();
    let (v1, _, _) = publish_three_defaults(&project);
    project.touch("assets/foo/publish/foo_operator.ass");
    let red = project.touch("assets/foo/publish/look/red/foo_red_operator.v002.ass");
    project.touch("assets/foo/publish/look/blue/foo_blue_operator.v001.ass");
    let (mut scene, handle) = foo_scene();
    scene.create_binding(handle, "aiIncludeGraph_foo1_default", &v1).unwrap();
    scene.create_binding(handle, "aiIncludeGraph_foo1_red", &red).unwrap();

    let first = resolve(&project, &scene, "foo", "foo1");
    let second = resolve(&project, &scene, "foo", "foo1");

    assert_eq!(first.catalog(), second.catalog());
    assert_eq!(first.uvs(), second.uvs());
}
