//! Copy template files into the target directory.
//!
//! For each input entry, with `template = template_root / entry` and
//! `target = options.target / action.target`:
//!
//! 1. template is a directory, target a regular file → stopping error
//! 2. both regular files → copy template onto target
//! 3. template is a file → copy to `target / rename(entry)`
//! 4. template is a directory → copy every file beneath it
//! 5. otherwise the entry is a glob rooted at the template directory
//!
//! Names ending in `.dotfile` are renamed on the way out. A failing copy is
//! logged and the remaining files still copy.

use std::path::Path;

use glob::{MatchOptions, Pattern};
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::application::handlers::HandlerContext;
use crate::domain::{ConflictStrategy, RelativePath, ResolvedExtract, rename_dotfile, rename_dotfile_path};
use crate::error::PresetResult;

#[instrument(skip_all, fields(inputs = ?action.inputs, target = %action.target, strategy = %action.strategy))]
pub fn handle(action: &ResolvedExtract, cx: &HandlerContext<'_>) -> PresetResult<()> {
    let template_root = cx.preset.template_root()?;
    let target = cx.target_path(&action.target)?;

    let entries = action
        .inputs
        .iter()
        .map(|entry| RelativePath::try_new(entry.as_str()).map(|rel| (entry, template_root.join(rel))))
        .collect::<Result<Vec<_>, _>>()?;

    // Structural conflicts abort before anything is written.
    if cx.filesystem.is_file(&target) {
        if let Some((_, dir)) = entries.iter().find(|(_, t)| cx.filesystem.is_dir(t)) {
            return Err(ApplicationError::directory_onto_file(dir, &target).into());
        }
    }

    for (entry, template) in &entries {
        let fs = cx.filesystem;
        if fs.is_file(template) && fs.is_file(&target) {
            copy_one(template, &target, action.strategy, cx)?;
        } else if fs.is_file(template) {
            copy_one(template, &target.join(rename_dotfile(entry)), action.strategy, cx)?;
        } else if fs.is_dir(template) {
            for file in fs.list_files(template, action.dotfiles)? {
                let dest = target.join(rename_dotfile_path(&file));
                copy_one(&template.join(&file), &dest, action.strategy, cx)?;
            }
        } else {
            extract_glob(entry, &template_root, &target, action, cx)?;
        }
    }

    Ok(())
}

fn extract_glob(
    pattern: &str,
    template_root: &Path,
    target: &Path,
    action: &ResolvedExtract,
    cx: &HandlerContext<'_>,
) -> PresetResult<()> {
    if !cx.filesystem.is_dir(template_root) {
        return Err(ApplicationError::Execution {
            message: format!(
                "Template directory {} does not exist",
                template_root.display()
            ),
            stops_execution: false,
        }
        .into());
    }

    let matcher = Pattern::new(pattern).map_err(|e| ApplicationError::Execution {
        message: format!("'{}' is neither a template path nor a valid glob: {}", pattern, e.msg),
        stops_execution: false,
    })?;
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: !action.dotfiles,
    };

    let matches: Vec<RelativePath> = cx
        .filesystem
        .list_files(template_root, action.dotfiles)?
        .into_iter()
        .filter(|file| matcher.matches_with(&file.to_slash_string(), options))
        .collect();

    if matches.is_empty() {
        cx.bus.warn(&format!("No template files match '{}'", pattern));
        return Ok(());
    }

    for file in matches {
        let dest = target.join(rename_dotfile_path(&file));
        copy_one(&template_root.join(&file), &dest, action.strategy, cx)?;
    }
    Ok(())
}

/// Copy a single file under the conflict policy.
///
/// Only a failing confirmation prompt is returned; write failures are
/// reported on the bus.
fn copy_one(
    from: &Path,
    to: &Path,
    strategy: ConflictStrategy,
    cx: &HandlerContext<'_>,
) -> PresetResult<()> {
    let shown = cx.display_path(to).to_string();

    if cx.filesystem.exists(to) {
        let overwrite = resolve_conflict(strategy, cx.is_interactive(), || {
            cx.prompt
                .confirm(&format!("{} already exists. Replace it?", shown), true)
        })?;
        if !overwrite {
            cx.bus.debug(&format!("Skipped existing {}", shown));
            return Ok(());
        }
        if strategy == ConflictStrategy::Ask && !cx.is_interactive() {
            cx.bus.debug(&format!("Overwriting {} (non-interactive)", shown));
        }
    }

    match write(from, to, cx) {
        Ok(()) => {
            debug!(from = %from.display(), to = %to.display(), "copied");
            Ok(())
        }
        Err(e) => {
            cx.bus.warn(&format!("Could not copy {}: {}", shown, e));
            Ok(())
        }
    }
}

fn write(from: &Path, to: &Path, cx: &HandlerContext<'_>) -> PresetResult<()> {
    if let Some(parent) = to.parent() {
        cx.filesystem.create_dir_all(parent)?;
    }
    cx.filesystem.copy_file(from, to)
}

/// Decide whether an existing target file gets replaced.
///
/// | strategy   | interactive | result            |
/// |------------|-------------|-------------------|
/// | `skip`     | any         | keep              |
/// | `override` | any         | replace           |
/// | `ask`      | yes         | ask (`confirm`)   |
/// | `ask`      | no          | replace           |
pub fn resolve_conflict<F>(strategy: ConflictStrategy, interactive: bool, confirm: F) -> PresetResult<bool>
where
    F: FnOnce() -> PresetResult<bool>,
{
    match strategy {
        ConflictStrategy::Skip => Ok(false),
        ConflictStrategy::Override => Ok(true),
        ConflictStrategy::Ask if interactive => confirm(),
        ConflictStrategy::Ask => Ok(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockBus, MockFilesystem, MockPrompt};
    use crate::domain::{ApplierOptions, Preset, PresetDescriptor, SourceKind};
    use crate::domain::DomainError;
    use crate::error::PresetError;
    use mockall::predicate::eq;

    fn preset() -> Preset {
        Preset::builder(PresetDescriptor::new("/preset", "./preset", SourceKind::Local))
            .interactive(false)
            .build()
    }

    fn action(inputs: &[&str], strategy: ConflictStrategy) -> ResolvedExtract {
        ResolvedExtract {
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            target: ".".into(),
            strategy,
            dotfiles: false,
        }
    }

    // ── conflict policy ───────────────────────────────────────────────────

    #[test]
    fn conflict_truth_table() {
        let never = || -> PresetResult<bool> { panic!("must not prompt") };

        assert!(!resolve_conflict(ConflictStrategy::Skip, true, never).unwrap());
        assert!(!resolve_conflict(ConflictStrategy::Skip, false, never).unwrap());
        assert!(resolve_conflict(ConflictStrategy::Override, true, never).unwrap());
        assert!(resolve_conflict(ConflictStrategy::Ask, false, never).unwrap());
        assert!(!resolve_conflict(ConflictStrategy::Ask, true, || Ok(false)).unwrap());
        assert!(resolve_conflict(ConflictStrategy::Ask, true, || Ok(true)).unwrap());
    }

    // ── handler ───────────────────────────────────────────────────────────

    #[test]
    fn directory_onto_file_writes_nothing() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file()
            .with(eq(Path::new("/target/out.txt")))
            .return_const(true);
        fs.expect_is_dir()
            .with(eq(Path::new("/preset/templates/base")))
            .return_const(true);
        fs.expect_copy_file().never();
        fs.expect_create_dir_all().never();

        let preset = preset();
        let options = ApplierOptions::new("/target");
        let cx = HandlerContext {
            preset: &preset,
            options: &options,
            filesystem: &fs,
            prompt: &MockPrompt::new(),
            bus: &MockBus::new(),
        };

        let mut extract = action(&["base"], ConflictStrategy::Override);
        extract.target = "out.txt".into();

        let err = handle(&extract, &cx).unwrap_err();
        assert!(err.stops_execution());
        assert!(matches!(err, PresetError::Application(ApplicationError::Execution { .. })));
    }

    #[test]
    fn skip_leaves_existing_file() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().returning(|p| p.ends_with("a.txt"));
        fs.expect_is_dir().return_const(false);
        fs.expect_exists().return_const(true);
        fs.expect_copy_file().never();

        let mut bus = MockBus::new();
        bus.expect_debug().times(1).return_const(());

        let preset = preset();
        let options = ApplierOptions::new("/target");
        let cx = HandlerContext {
            preset: &preset,
            options: &options,
            filesystem: &fs,
            prompt: &MockPrompt::new(),
            bus: &bus,
        };

        handle(&action(&["a.txt"], ConflictStrategy::Skip), &cx).unwrap();
    }

    #[test]
    fn ask_interactive_declined_keeps_file() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().returning(|p| p.ends_with("a.txt"));
        fs.expect_is_dir().return_const(false);
        fs.expect_exists().return_const(true);
        fs.expect_copy_file().never();

        let mut prompt = MockPrompt::new();
        prompt
            .expect_confirm()
            .withf(|msg, default| msg == "a.txt already exists. Replace it?" && *default)
            .times(1)
            .returning(|_, _| Ok(false));

        let mut bus = MockBus::new();
        bus.expect_debug().return_const(());

        let preset = preset();
        let options = ApplierOptions::new("/target").with_interactive(Some(true));
        let cx = HandlerContext {
            preset: &preset,
            options: &options,
            filesystem: &fs,
            prompt: &prompt,
            bus: &bus,
        };

        handle(&action(&["a.txt"], ConflictStrategy::Ask), &cx).unwrap();
    }

    #[test]
    fn copy_failure_is_reported_not_returned() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_file().returning(|p| p.starts_with("/preset"));
        fs.expect_is_dir().return_const(false);
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_copy_file().times(2).returning(|from, to| {
            if from.ends_with("a.txt") {
                Err(ApplicationError::FilesystemError {
                    path: to.to_path_buf(),
                    reason: "denied".into(),
                }
                .into())
            } else {
                Ok(())
            }
        });

        let mut bus = MockBus::new();
        bus.expect_warn().times(1).return_const(());

        let preset = preset();
        let options = ApplierOptions::new("/target");
        let cx = HandlerContext {
            preset: &preset,
            options: &options,
            filesystem: &fs,
            prompt: &MockPrompt::new(),
            bus: &bus,
        };

        handle(&action(&["a.txt", "b.txt"], ConflictStrategy::Ask), &cx).unwrap();
    }

    #[test]
    fn absolute_entry_is_rejected() {
        let fs = MockFilesystem::new();
        let preset = preset();
        let options = ApplierOptions::new("/target");
        let cx = HandlerContext {
            preset: &preset,
            options: &options,
            filesystem: &fs,
            prompt: &MockPrompt::new(),
            bus: &MockBus::new(),
        };

        let err = handle(&action(&["/etc/passwd"], ConflictStrategy::Ask), &cx).unwrap_err();
        assert!(matches!(err, PresetError::Domain(_)));
    }

    #[test]
    fn paths_outside_the_template_or_target_touch_nothing() {
        // No expectations: any filesystem call fails the test.
        let fs = MockFilesystem::new();
        let options = ApplierOptions::new("/target");

        let escaping_entry = action(&["../secret.txt"], ConflictStrategy::Override);
        let ordinary = action(&["a.txt"], ConflictStrategy::Override);
        let mut escaping_target = ordinary.clone();
        escaping_target.target = "../outside".into();

        let plain = preset();
        let mut wandering = preset();
        wandering.template_directory = "../elsewhere".into();

        for (subject, extract) in [
            (&plain, &escaping_entry),
            (&plain, &escaping_target),
            (&wandering, &ordinary),
        ] {
            let cx = HandlerContext {
                preset: subject,
                options: &options,
                filesystem: &fs,
                prompt: &MockPrompt::new(),
                bus: &MockBus::new(),
            };
            let err = handle(extract, &cx).unwrap_err();
            assert!(
                matches!(err, PresetError::Domain(DomainError::PathEscapesBase { .. })),
                "{err:?}"
            );
            assert!(err.stops_execution());
        }
    }
}
