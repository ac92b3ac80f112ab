//! Remove paths from the target directory.

use glob::{MatchOptions, Pattern};
use tracing::instrument;

use crate::application::handlers::HandlerContext;
use crate::domain::ResolvedDelete;
use crate::error::PresetResult;

/// Remove each path relative to the target.
///
/// Files and directory trees are removed when present. A path that does not
/// exist is matched as a glob against the target's files; no match is fine.
#[instrument(skip_all, fields(paths = ?action.paths))]
pub fn handle(action: &ResolvedDelete, cx: &HandlerContext<'_>) -> PresetResult<()> {
    let fs = cx.filesystem;

    for path in &action.paths {
        let full = cx.target_path(path)?;

        if fs.is_dir(&full) {
            fs.remove_dir_all(&full)?;
            cx.bus.debug(&format!("Removed directory {}", cx.display_path(&full)));
        } else if fs.exists(&full) {
            fs.remove_file(&full)?;
            cx.bus.debug(&format!("Removed {}", cx.display_path(&full)));
        } else {
            delete_glob(path, cx)?;
        }
    }

    Ok(())
}

fn delete_glob(pattern: &str, cx: &HandlerContext<'_>) -> PresetResult<()> {
    let target = cx.options.target();
    let matcher = match Pattern::new(pattern) {
        Ok(m) => m,
        Err(_) => {
            cx.bus.debug(&format!("Nothing to delete at {}", pattern));
            return Ok(());
        }
    };
    if !cx.filesystem.is_dir(target) {
        return Ok(());
    }

    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let mut removed = 0usize;
    for file in cx.filesystem.list_files(target, true)? {
        if matcher.matches_with(&file.to_slash_string(), options) {
            cx.filesystem.remove_file(&target.join(&file))?;
            removed += 1;
        }
    }

    cx.bus.debug(&format!("Removed {} file(s) matching {}", removed, pattern));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockBus, MockFilesystem, MockPrompt};
    use crate::domain::{ApplierOptions, DomainError, Preset, PresetDescriptor, RelativePath, SourceKind};
    use crate::error::PresetError;
    use mockall::predicate::eq;
    use std::path::Path;

    fn run(fs: &MockFilesystem, paths: &[&str]) -> PresetResult<()> {
        let preset = Preset::builder(PresetDescriptor::new("/preset", "./preset", SourceKind::Local)).build();
        let options = ApplierOptions::new("/target");
        let mut bus = MockBus::new();
        bus.expect_debug().return_const(());
        let cx = HandlerContext {
            preset: &preset,
            options: &options,
            filesystem: fs,
            prompt: &MockPrompt::new(),
            bus: &bus,
        };
        handle(
            &ResolvedDelete {
                paths: paths.iter().map(|p| p.to_string()).collect(),
            },
            &cx,
        )
    }

    #[test]
    fn removes_directory_tree() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir()
            .with(eq(Path::new("/target/node_modules")))
            .return_const(true);
        fs.expect_remove_dir_all()
            .with(eq(Path::new("/target/node_modules")))
            .times(1)
            .returning(|_| Ok(()));

        run(&fs, &["node_modules"]).unwrap();
    }

    #[test]
    fn removes_single_file() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(false);
        fs.expect_exists().return_const(true);
        fs.expect_remove_file().times(1).returning(|_| Ok(()));

        run(&fs, &["README.md"]).unwrap();
    }

    #[test]
    fn missing_path_falls_back_to_glob() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|p| p == Path::new("/target"));
        fs.expect_exists().return_const(false);
        fs.expect_list_files().returning(|_, _| {
            Ok(vec![
                RelativePath::new("a.log"),
                RelativePath::new("keep.txt"),
                RelativePath::new("logs/b.log"),
            ])
        });
        fs.expect_remove_file()
            .with(eq(Path::new("/target/a.log")))
            .times(1)
            .returning(|_| Ok(()));

        run(&fs, &["*.log"]).unwrap();
    }

    #[test]
    fn no_match_is_not_an_error() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().returning(|p| p == Path::new("/target"));
        fs.expect_exists().return_const(false);
        fs.expect_list_files().returning(|_, _| Ok(vec![]));
        fs.expect_remove_file().never();

        run(&fs, &["missing.txt"]).unwrap();
    }

    #[test]
    fn parent_paths_are_refused_before_any_removal() {
        let mut fs = MockFilesystem::new();
        fs.expect_remove_file().never();
        fs.expect_remove_dir_all().never();

        let err = run(&fs, &["../victim.txt"]).unwrap_err();
        assert!(matches!(
            err,
            PresetError::Domain(DomainError::PathEscapesBase { .. })
        ));
    }
}
