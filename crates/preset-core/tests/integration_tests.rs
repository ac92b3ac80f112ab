//! Integration tests for preset-core's public API with hand-written ports.

use std::path::Path;
use std::sync::{Arc, Mutex};

use preset_core::domain::DomainError;
use preset_core::prelude::*;

struct PrefixResolver {
    name: &'static str,
    prefix: &'static str,
    kind: SourceKind,
}

impl Resolver for PrefixResolver {
    fn name(&self) -> &'static str {
        self.name
    }

    fn supports(&self, input: &str) -> bool {
        input.starts_with(self.prefix)
    }

    fn resolve(&self, input: &str) -> PresetResult<PresetDescriptor> {
        Ok(PresetDescriptor::new(format!("/resolved/{}", self.name), input, self.kind))
    }
}

fn chain() -> ResolverChain {
    ResolverChain::new(vec![
        Box::new(PrefixResolver {
            name: "local",
            prefix: "./",
            kind: SourceKind::Local,
        }),
        Box::new(PrefixResolver {
            name: "github",
            prefix: "",
            kind: SourceKind::GitHub,
        }),
    ])
}

struct ActionsImporter(Vec<Action>);

impl Importer for ActionsImporter {
    fn load(&self, descriptor: &PresetDescriptor) -> PresetResult<Preset> {
        Ok(Preset::builder(descriptor.clone())
            .context(PresetContext::new().with("greeting", "hello"))
            .actions(self.0.clone())
            .build())
    }
}

/// Nothing exists; writes are refused.
struct EmptyFilesystem;

impl Filesystem for EmptyFilesystem {
    fn exists(&self, _: &Path) -> bool {
        false
    }
    fn is_file(&self, _: &Path) -> bool {
        false
    }
    fn is_dir(&self, _: &Path) -> bool {
        false
    }
    fn create_dir_all(&self, path: &Path) -> PresetResult<()> {
        Err(ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: "read-only".into(),
        }
        .into())
    }
    fn copy_file(&self, _: &Path, to: &Path) -> PresetResult<()> {
        self.create_dir_all(to)
    }
    fn remove_file(&self, _: &Path) -> PresetResult<()> {
        Ok(())
    }
    fn remove_dir_all(&self, _: &Path) -> PresetResult<()> {
        Ok(())
    }
    fn list_files(&self, _: &Path, _: bool) -> PresetResult<Vec<RelativePath>> {
        Ok(Vec::new())
    }
}

struct Defaults;

impl Prompt for Defaults {
    fn confirm(&self, _: &str, default: bool) -> PresetResult<bool> {
        Ok(default)
    }
    fn input(&self, _: &str, default: &str) -> PresetResult<String> {
        Ok(default.to_string())
    }
    fn select(&self, _: &str, choices: &[String], default: usize) -> PresetResult<String> {
        Ok(choices[default].clone())
    }
}

#[derive(Clone, Default)]
struct RecordingBus(Arc<Mutex<Vec<String>>>);

impl Bus for RecordingBus {
    fn debug(&self, _: &str) {}
    fn info(&self, message: &str) {
        self.0.lock().unwrap().push(format!("info: {message}"));
    }
    fn warn(&self, message: &str) {
        self.0.lock().unwrap().push(format!("warn: {message}"));
    }
}

fn applier(actions: Vec<Action>, bus: RecordingBus) -> PresetApplier {
    PresetApplier::new(
        chain(),
        Box::new(ActionsImporter(actions)),
        Box::new(EmptyFilesystem),
        Box::new(Defaults),
        Box::new(bus),
    )
}

#[test]
fn resolver_order_decides_precedence() {
    let chain = chain();
    assert_eq!(chain.names(), vec!["local", "github"]);
    assert_eq!(chain.resolve("./demo").unwrap().kind(), SourceKind::Local);
    assert_eq!(chain.resolve("acme/demo").unwrap().kind(), SourceKind::GitHub);
}

#[test]
fn blank_source_is_rejected_before_resolvers_run() {
    let err = chain().resolve("   ").unwrap_err();
    assert!(matches!(err, PresetError::Domain(DomainError::EmptySource)));
}

#[test]
fn full_run_with_prompts_conditions_and_custom_actions() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let actions = vec![
        Action::prompt(PromptAction::new(
            "stack",
            "Stack?",
            PromptKind::Select {
                choices: vec!["api".into(), "web".into()],
                default: Some("web".into()),
            },
        )),
        Action::custom(CustomAction::new("record", move |preset, options| {
            sink.lock().unwrap().push(format!(
                "{} {} in {}",
                preset.context.get_str("greeting").unwrap_or_default(),
                preset.context.get_str("stack").unwrap_or_default(),
                options.target().display()
            ));
            Ok(())
        }))
        .titled("Record"),
        Action::delete(DeleteAction::new("cache")).when(Contextualized::deferred(
            |ctx: &PresetContext| ctx.get_str("stack").as_deref() == Some("api"),
        )),
    ];

    let bus = RecordingBus::default();
    let options = ApplierOptions::new("/work").with_interactive(Some(false));
    let report = applier(actions, bus.clone()).apply("./demo", &options).unwrap();

    assert_eq!(report.preset, "local");
    assert_eq!((report.executed, report.skipped, report.failed), (2, 1, 0));
    assert_eq!(*seen.lock().unwrap(), vec!["hello web in /work"]);
    assert!(bus.0.lock().unwrap().iter().any(|m| m.contains("condition not met")));
}

#[test]
fn write_failures_are_reported_but_do_not_stop() {
    let bus = RecordingBus::default();
    let after = Arc::new(Mutex::new(false));
    let flag = Arc::clone(&after);

    let actions = vec![
        Action::extract(ExtractAction::new("missing.txt").to("out")),
        Action::custom(CustomAction::new("after", move |_, _| {
            *flag.lock().unwrap() = true;
            Ok(())
        })),
    ];

    let report = applier(actions, bus.clone())
        .apply("./demo", &ApplierOptions::new("/work"))
        .unwrap();

    assert_eq!(report.failed, 1);
    assert!(*after.lock().unwrap());
    assert!(bus.0.lock().unwrap().iter().any(|m| m.starts_with("warn:")));
}
