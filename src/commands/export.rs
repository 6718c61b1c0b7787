//! The `export` command: scan the source tree, aggregate strings, and
//! write one FTL file per locale.

use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::aggregate::{CollisionRecord, StringTable};
use crate::config::Config;
use crate::extractor;
use crate::fs::{FileSystem, RealFileSystem};
use crate::ftl;
use crate::logging;

pub struct ExportOptions {
    pub project_root: PathBuf,
    pub dry_run: bool,
    pub fail_on_collisions: bool,
}

pub fn run(config: &Config, options: &ExportOptions) -> Result<()> {
    run_with_fs(config, options, &RealFileSystem)
}

pub fn run_with_fs<F: FileSystem>(config: &Config, options: &ExportOptions, fs: &F) -> Result<()> {
    logging::info(&format!(
        "Scanning Rust files in {}...",
        options.project_root.display()
    ));

    let extraction = extractor::extract_tree(&options.project_root, config)?;
    logging::info(&format!("Found {} Rust files", extraction.scanned));

    let mut table = StringTable::new();
    for file_entries in extraction.files {
        logging::info(&format!(
            "  {}: {} {}, {} {}",
            file_entries.file,
            file_entries.singular.len(),
            config.singular_marker,
            file_entries.plural.len(),
            config.plural_marker,
        ));
        table.insert_file(file_entries);
    }

    report_collisions(config, &table);

    if options.fail_on_collisions && table.has_collisions() {
        bail!("key collisions detected (--fail-on-collisions enabled)");
    }

    logging::info("\nExtracted strings:");
    logging::info(&format!("  Regular strings: {}", table.singular_len()));
    logging::info(&format!("  Plural strings: {}", table.plural_len()));
    if extraction.rejected_count > 0 {
        logging::info(&format!(
            "  Rejected messages: {}",
            extraction.rejected_count
        ));
    }

    for locale in config.locales() {
        let pseudo = locale == config.pseudo_locale;
        let content = ftl::generate(&table, pseudo);
        let output_path = options
            .project_root
            .join(&config.output)
            .join(locale)
            .join("main.ftl");

        if options.dry_run {
            logging::info(&format!("\n--- Generated FTL content for {locale} ---"));
            logging::info(&content);
            logging::info(&format!("--- End of content for {locale} ---"));
        } else {
            if let Some(parent) = output_path.parent() {
                fs.create_dir_all(parent)?;
            }
            fs.atomic_write(&output_path, &content)?;
            logging::info(&format!("Generated FTL file: {}", output_path.display()));
        }
    }

    if !options.dry_run {
        logging::info(&format!(
            "\nTotal strings: {}",
            table.singular_len() + table.plural_len()
        ));
    }

    Ok(())
}

fn report_collisions(config: &Config, table: &StringTable) {
    let intra = table.intra_file_collisions();
    for collision in &intra {
        let mut lines = vec![format!(
            "Intra-file key collision in {} for '{}':",
            collision.file, collision.key
        )];
        for (comment, line) in &collision.occurrences {
            lines.push(format!("    Line {line}{}", comment_text(comment)));
        }
        logging::warn(&lines.join("\n"));
    }

    report_cross_file(
        &config.singular_marker,
        table.singular_collisions(),
    );
    report_cross_file(&config.plural_marker, table.plural_collisions());

    if table.has_collisions() {
        logging::info("Collision resolution: the last occurrence of each key wins.");
    }
}

fn report_cross_file(marker: &str, collisions: &std::collections::BTreeMap<String, CollisionRecord>) {
    if collisions.is_empty() {
        return;
    }
    let mut lines = vec![format!("key collisions detected in {marker} strings:")];
    for (key, record) in collisions {
        lines.push(format!("  '{key}':"));
        for (file, comment) in record {
            lines.push(format!("    {file}{}", comment_text(comment)));
        }
    }
    logging::warn(&lines.join("\n"));
}

fn comment_text(comment: &str) -> String {
    if comment.is_empty() {
        " (no comment)".to_string()
    } else {
        format!(" (comment: '{comment}')")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::InMemoryFileSystem;
    use std::path::Path;

    fn project_with(files: &[(&str, &str)]) -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        for (rel, content) in files {
            let path = tmp.path().join(rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }
        tmp
    }

    fn options(root: &Path) -> ExportOptions {
        ExportOptions {
            project_root: root.to_path_buf(),
            dry_run: false,
            fail_on_collisions: false,
        }
    }

    #[test]
    fn test_export_writes_both_locales() {
        let project = project_with(&[(
            "src/ui.rs",
            r#"fn ui() { let _ = tr!(ctx, "Hello, {name}!", "Greeting", name = n); }"#,
        )]);
        let fs = InMemoryFileSystem::new();
        let config = Config::default();

        run_with_fs(&config, &options(project.path()), &fs).unwrap();

        let files = fs.get_files();
        let plain = project.path().join("assets/translations/en-US/main.ftl");
        let pseudo = project.path().join("assets/translations/en-XA/main.ftl");
        let plain_content = files.get(&plain).expect("plain locale written");
        let pseudo_content = files.get(&pseudo).expect("pseudo locale written");

        assert!(plain_content.contains("Hello, {$name}!"));
        assert!(pseudo_content.contains("{$name}"));
        assert!(pseudo_content.contains("Hélló"));
    }

    #[test]
    fn test_strict_mode_fails_without_writing() {
        let project = project_with(&[
            ("src/a.rs", r#"fn a() { tr!(ctx, "Save", "Save button"); }"#),
            ("src/b.rs", r#"fn b() { tr!(ctx, "Save", "Save button"); }"#),
        ]);
        let fs = InMemoryFileSystem::new();
        let config = Config::default();
        let mut opts = options(project.path());
        opts.fail_on_collisions = true;

        let err = run_with_fs(&config, &opts, &fs).unwrap_err();
        assert!(err.to_string().contains("fail-on-collisions"));
        assert!(fs.get_files().is_empty());
    }

    #[test]
    fn test_collisions_resolve_last_write_wins_without_strict() {
        let project = project_with(&[
            ("src/a.rs", r#"fn a() { tr!(ctx, "Save", "Save button"); }"#),
            ("src/b.rs", r#"fn b() { tr!(ctx, "Save", "Save button"); }"#),
        ]);
        let fs = InMemoryFileSystem::new();
        let config = Config::default();

        run_with_fs(&config, &options(project.path()), &fs).unwrap();

        let files = fs.get_files();
        let plain = project.path().join("assets/translations/en-US/main.ftl");
        let content = files.get(&plain).unwrap();
        assert_eq!(content.matches("= Save").count(), 1);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let project = project_with(&[(
            "src/ui.rs",
            r#"fn ui() { tr!(ctx, "Hello", "Greeting"); }"#,
        )]);
        let fs = InMemoryFileSystem::new();
        let config = Config::default();
        let mut opts = options(project.path());
        opts.dry_run = true;

        run_with_fs(&config, &opts, &fs).unwrap();
        assert!(fs.get_files().is_empty());
    }
}
