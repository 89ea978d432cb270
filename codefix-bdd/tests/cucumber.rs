use anyhow::Context;
use camino::Utf8Path;
use codefix_core::{HostModules, LanguageService, PluginCreateInfo, create_plugin};
use codefix_domain::Resolver;
use codefix_fixtures::{InMemoryService, RecordingLog, offset_of};
use codefix_types::{
    ApplicableRefactorInfo, Diagnostic, PositionOrRange, RefactorActionInfo, RefactorEditInfo,
    UserPreferences,
};
use cucumber::{World, given, then, when};

#[derive(Debug, Default, World)]
pub struct CodefixWorld {
    file: String,
    service: Option<InMemoryService>,
    log: RecordingLog,
    plugin_config: serde_json::Value,
    actions: Vec<RefactorActionInfo>,
    edits: Option<RefactorEditInfo>,
    preview: String,
    refactors: Vec<ApplicableRefactorInfo>,
}

fn service(world: &CodefixWorld) -> &InMemoryService {
    world.service.as_ref().expect("file loaded")
}

/// Gherkin strings carry `\n` literally.
fn unescape(text: &str) -> String {
    text.replace("\\n", "\n")
}

fn position(world: &CodefixWorld, nth: usize, needle: &str) -> anyhow::Result<PositionOrRange> {
    let text = service(world)
        .file_text(&world.file)
        .context("file text")?;
    let offset = offset_of(text, needle, nth - 1)
        .with_context(|| format!("occurrence {nth} of {needle:?}"))?;
    Ok(PositionOrRange::Position(offset))
}

#[given(expr = "a file {string} containing {string}")]
async fn file_containing(world: &mut CodefixWorld, file: String, text: String) {
    let service = InMemoryService::new()
        .with_file(&file, &unescape(&text))
        .expect("fixture parses");
    world.file = file;
    world.service = Some(service);
}

#[given(expr = "the service reports error {int} at occurrence {int} of {string}")]
async fn service_reports(world: &mut CodefixWorld, code: u32, nth: usize, needle: String) {
    let start = position(world, nth, &needle).expect("position").anchor();
    let file = world.file.clone();
    let service = world.service.as_mut().expect("file loaded");
    service.set_diagnostics_override(&file, vec![Diagnostic::new(code, start)]);
}

#[given(expr = "the plugin config denies {string}")]
async fn plugin_config_denies(world: &mut CodefixWorld, pattern: String) {
    world.plugin_config = serde_json::json!({ "deny": [pattern] });
}

#[when(expr = "I request code fixes at occurrence {int} of {string}")]
async fn request_code_fixes(world: &mut CodefixWorld, nth: usize, needle: String) {
    let at = position(world, nth, &needle).expect("position");
    world.actions =
        Resolver::new().discover(service(world), Utf8Path::new(&world.file), at, &world.log);
}

#[when(expr = "I apply {string} at occurrence {int} of {string}")]
async fn apply_fix(world: &mut CodefixWorld, action: String, nth: usize, needle: String) {
    let at = position(world, nth, &needle).expect("position");
    let edits = Resolver::new().apply(
        service(world),
        Utf8Path::new(&world.file),
        at,
        &action,
        &world.log,
    );
    if let Some(edits) = &edits {
        world.preview = world
            .service
            .as_mut()
            .expect("file loaded")
            .apply_edit(edits)
            .expect("edit applies");
    }
    world.edits = edits;
}

#[when(expr = "I request refactors through the plugin at occurrence {int} of {string}")]
async fn request_refactors(world: &mut CodefixWorld, nth: usize, needle: String) {
    let at = position(world, nth, &needle).expect("position");
    let file = world.file.clone();
    let text = service(world).file_text(&file).expect("file text").to_string();
    let host = InMemoryService::new()
        .with_file(&file, &text)
        .expect("fixture parses");

    let proxy = create_plugin(HostModules::default()).create(PluginCreateInfo {
        language_service: host,
        logger: &world.log,
        config: world.plugin_config.clone(),
    });
    world.refactors =
        proxy.applicable_refactors(Utf8Path::new(&file), at, &UserPreferences::default());
}

#[then(expr = "exactly one fix {string} is offered for {string}")]
async fn exactly_one_fix(world: &mut CodefixWorld, name: String, ident: String) {
    assert_eq!(
        world.actions,
        vec![RefactorActionInfo {
            name,
            description: format!("Change \"const {ident}\" to \"let {ident}\""),
        }],
        "log: {:#?}",
        world.log.lines()
    );
}

#[then("no code fixes are offered")]
async fn no_code_fixes(world: &mut CodefixWorld) {
    assert!(world.actions.is_empty(), "offered: {:?}", world.actions);
}

#[then(expr = "the file reads {string}")]
async fn file_reads(world: &mut CodefixWorld, expected: String) {
    assert_eq!(
        service(world).file_text(&world.file),
        Some(unescape(&expected).as_str())
    );
}

#[then(expr = "the edit preview contains {string}")]
async fn preview_contains(world: &mut CodefixWorld, expected: String) {
    assert!(
        world.preview.contains(&unescape(&expected)),
        "preview:\n{}",
        world.preview
    );
}

#[then("the file has no diagnostics")]
async fn no_diagnostics(world: &mut CodefixWorld) {
    let diagnostics = service(world).diagnostics(&world.file);
    assert!(diagnostics.is_empty(), "diagnostics: {diagnostics:?}");
}

#[then("no edit is produced")]
async fn no_edit(world: &mut CodefixWorld) {
    assert_eq!(world.edits, None);
}

#[then(expr = "the plugin offers the group {string} labelled {string}")]
async fn plugin_offers_group(world: &mut CodefixWorld, name: String, description: String) {
    let group = world
        .refactors
        .iter()
        .find(|r| r.name == name)
        .unwrap_or_else(|| panic!("no group {name} in {:?}", world.refactors));
    assert_eq!(group.description, description);
    assert!(!group.actions.is_empty());
}

#[then("the plugin offers no code fix group")]
async fn plugin_offers_no_group(world: &mut CodefixWorld) {
    assert!(
        world.refactors.iter().all(|r| !r.name.ends_with("-refactor-info")),
        "refactors: {:?}",
        world.refactors
    );
}

#[tokio::main]
async fn main() {
    codefix_bdd::init_tracing();
    let features_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("features");
    CodefixWorld::cucumber().run(features_path).await;
}
