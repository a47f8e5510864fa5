//! Integration tests for the public library API.

use moldgate::loader::{ArtifactLoader, ArtifactRef, BinaryLoader, Loader, MoldPathLoader};
use moldgate::provider::{ArtifactProvider, Mapping, MappedDataProvider, MoldDataProvider};
use moldgate::registry::{Capability, DirArtifactRegistry, DirMoldRegistry, Registries};
use moldgate::render::{
    data_from, ArtifactRenderer, JinjaEngine, MoldDataRenderer, MoldRenderer, Render,
    TemplateRenderer, UnknownMimeType,
};
use moldgate::response::Headers;
use moldgate::MoldgateError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn site() -> (TempDir, Registries) {
    let temp = TempDir::new().unwrap();
    let page = temp.path().join("page");
    let dist = temp.path().join("dist");
    fs::create_dir_all(&page).unwrap();
    fs::create_dir_all(&dist).unwrap();
    fs::write(page.join("template.nja"), "<p>{{ body }}</p>").unwrap();
    fs::write(page.join("row.nja"), "{{ a }}|{{ b }}").unwrap();
    fs::write(page.join("data.json"), r#"{"ok":true}"#).unwrap();
    fs::write(page.join("README"), "plain").unwrap();
    fs::write(dist.join("app.js"), "app()").unwrap();

    let registries = Registries::new()
        .with_mold("mold", DirMoldRegistry::new().with_mold("demo/page", &page))
        .with_artifact(
            "artifacts",
            DirArtifactRegistry::new().with_package("demo.pkg", &dist),
        );
    (temp, registries)
}

#[test]
fn registries_report_capability_mismatch() {
    let (_temp, registries) = site();
    let err = registries
        .get_registry("artifacts", Capability::Mold)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "'artifacts' does not resolve to a mold registry, got a artifact registry instead"
    );

    let err = registries.get_registry("nowhere", Capability::Any).unwrap_err();
    assert!(err.to_string().contains("got nothing instead"));
}

#[test]
fn mold_path_loader_resolves_without_io() {
    let (temp, registries) = site();
    let loader = MoldPathLoader::new(&registries).unwrap();
    assert_eq!(
        loader.load("demo/page/absent.txt").unwrap(),
        temp.path().join("page").join("absent.txt")
    );
}

#[test]
fn binary_loader_reads_bytes() {
    let (_temp, registries) = site();
    let loader = BinaryLoader::new(&registries).unwrap();
    assert_eq!(loader.load("demo/page/README").unwrap(), b"plain");
    assert!(loader.load("demo/page/absent.txt").unwrap_err().is_not_found());
}

#[test]
fn artifact_loader_splits_on_first_colon() {
    let (_temp, registries) = site();
    let loader = ArtifactLoader::new(&registries).unwrap();
    assert_eq!(
        loader.resolve("demo.pkg:app.js").unwrap(),
        ArtifactRef::new("demo.pkg", "app.js")
    );
    assert_eq!(
        ArtifactRef::parse("a:b:c").unwrap(),
        ArtifactRef::new("a", "b:c")
    );
    assert_eq!(loader.load("demo.pkg:app.js").unwrap(), b"app()");

    let err = loader.load("app.js").unwrap_err();
    assert!(matches!(err, MoldgateError::InvalidIdentifier { .. }));
}

#[test]
fn loaders_require_the_right_registry_kind() {
    let (_temp, registries) = site();
    assert!(BinaryLoader::from_registry(&registries, "artifacts").is_err());
    assert!(ArtifactLoader::from_registry(&registries, "mold").is_err());
    assert!(MoldPathLoader::new(&Registries::new()).is_err());
}

#[test]
fn data_renderer_guesses_mime_types() {
    let (_temp, registries) = site();
    let renderer = MoldDataRenderer::from_registries(&registries).unwrap();

    let response = renderer.render("demo/page/data.json").unwrap();
    assert_eq!(response.headers().get("Content-type"), Some("application/json"));
    assert_eq!(response.content().as_text(), Some(r#"{"ok":true}"#));

    let response = renderer.render("demo/page/README").unwrap();
    assert!(response.headers().is_empty());

    let renderer = MoldDataRenderer::from_registries(&registries)
        .unwrap()
        .with_unknown_mime_type(UnknownMimeType::Fallback(
            "application/octet-stream".to_string(),
        ));
    let response = renderer.render("demo/page/README").unwrap();
    assert_eq!(response.content_type(), Some("application/octet-stream"));
}

#[test]
fn mapped_providers_translate_public_names() {
    let (_temp, registries) = site();

    let molds: MoldDataProvider = MappedDataProvider::new(
        Mapping::from([("data.json", "demo/page/data.json")]),
        MoldDataRenderer::from_registries(&registries).unwrap(),
    );
    assert_eq!(
        molds.provide("data.json").unwrap().content_type(),
        Some("application/json")
    );
    assert!(matches!(
        molds.provide("demo/page/data.json").unwrap_err(),
        MoldgateError::MappingMiss { .. }
    ));

    let artifacts: ArtifactProvider = MappedDataProvider::new(
        Mapping::from([("bundle.js", "demo.pkg:app.js")]),
        ArtifactRenderer::from_registries(&registries).unwrap(),
    );
    let response = artifacts.render("bundle.js").unwrap();
    assert_eq!(response.content().as_bytes(), b"app()");
    assert_eq!(response.content_type(), Some("text/javascript"));
}

#[test]
fn template_renderer_builds_responses() {
    let (_temp, registries) = site();
    let renderer = TemplateRenderer::new(JinjaEngine::from_registries(&registries).unwrap());

    let response = renderer
        .render("demo/page/row.nja", &data_from([("a", "1"), ("b", "2")]), None)
        .unwrap();
    assert_eq!(response.content().as_text(), Some("1|2"));
    assert_eq!(response.content_type(), Some("text/html"));

    let wrapper = renderer
        .load_template("demo/page/row.nja", Headers::new())
        .unwrap()
        .prerender(&data_from([("a", "x"), ("b", "y")]));
    let response = wrapper.render(&data_from([("b", "z")])).unwrap();
    assert_eq!(response.content().as_text(), Some("x|z"));
    assert_eq!(response.headers().get("content-type"), Some("text/html"));
}

#[test]
fn mold_renderer_wraps_and_executes() {
    let (_temp, registries) = site();
    let renderer = MoldRenderer::new(JinjaEngine::from_registries(&registries).unwrap());
    let data = data_from([("body", "hi")]);

    assert_eq!(renderer.execute("demo/page", &data).unwrap(), "<p>hi</p>");
    assert_eq!(
        renderer.render("demo/page", &data).unwrap(),
        "<div data-nunja=\"demo/page\">\n<p>hi</p>\n</div>"
    );
    assert_eq!(
        renderer
            .render_template("demo/page/row.nja", &data_from([("a", "1"), ("b", "2")]))
            .unwrap(),
        "1|2"
    );

    let response = renderer.respond("demo/page", &data, None).unwrap();
    assert_eq!(response.headers().get("Content-type"), Some("text/html"));

    assert!(renderer.render("demo/unknown", &data).unwrap_err().is_not_found());
}

#[test]
fn responses_get_independent_headers() {
    let (_temp, registries) = site();
    let renderer = MoldDataRenderer::from_registries(&registries).unwrap();
    let first = renderer.render("demo/page/data.json").unwrap();
    let second = renderer.render("demo/page/data.json").unwrap();
    let (_content, mut headers) = first.into_parts();
    headers.insert("x-extra", "1");
    assert!(!second.headers().contains("x-extra"));
}

#[test]
fn config_composes_everything() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("page")).unwrap();
    fs::write(temp.path().join("page/a.css"), "a{}").unwrap();
    let config_path = temp.path().join("moldgate.yml");
    fs::write(
        &config_path,
        r#"
registries:
  mold: { kind: mold, molds: { demo/page: page } }
providers:
  static:
    mime_types: { css: text/x-css }
    files: { site.css: demo/page/a.css }
"#,
    )
    .unwrap();

    let found = moldgate::config::find_config(None, temp.path()).unwrap();
    assert_eq!(found, config_path);
    let config = moldgate::config::load_config_file(&found).unwrap();
    moldgate::config::validate(&config).unwrap();

    let base = moldgate::config::base_dir(&found);
    assert_eq!(base, Path::new(temp.path()));
    let registries = moldgate::config::build_registries(&config, &base).unwrap();
    let provider = moldgate::config::build_provider(&config, "static", &registries).unwrap();

    let response = provider.render("site.css").unwrap();
    assert_eq!(response.content_type(), Some("text/x-css"));
}
