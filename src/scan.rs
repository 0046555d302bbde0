//! Source file discovery and parallel parsing.
//!
//! Walks the configured include roots, filters by extension and the
//! `ignoreFiles` globs, then parses and lowers every file in parallel.
//! Validation itself runs sequentially afterwards, so the engine stays
//! single-threaded and the dictionary cache needs no locking.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use colored::Colorize;
use rayon::prelude::*;
use swc_common::{FilePathMapping, SourceMap};
use walkdir::WalkDir;

use crate::config::Settings;
use crate::findings::ParseErrorFinding;
use crate::markup::{Document, lower, parse_source};

/// Result of scanning a project's sources.
pub struct ScannedProject {
    pub documents: Vec<Document>,
    pub parse_errors: Vec<ParseErrorFinding>,
    pub files_checked: usize,
}

/// Discover, parse, and lower every markup source under `root`.
pub fn scan_project(root: &Path, settings: &Settings, verbose: bool) -> ScannedProject {
    let files = discover_files(root, settings, verbose);
    let files_checked = files.len();

    let results: Vec<Result<Document, ParseErrorFinding>> = files
        .par_iter()
        .map(|file| parse_file(root, file, settings))
        .collect();

    let mut documents = Vec::new();
    let mut parse_errors = Vec::new();
    for result in results {
        match result {
            Ok(document) => documents.push(document),
            Err(error) => parse_errors.push(error),
        }
    }

    ScannedProject {
        documents,
        parse_errors,
        files_checked,
    }
}

fn parse_file(root: &Path, rel_path: &str, settings: &Settings) -> Result<Document, ParseErrorFinding> {
    let full_path = root.join(rel_path.trim_start_matches("./"));
    let source = std::fs::read_to_string(&full_path).map_err(|e| ParseErrorFinding {
        file_path: rel_path.to_string(),
        error: format!("Failed to read file: {}", e),
    })?;

    let source_map = Arc::new(SourceMap::new(FilePathMapping::empty()));
    let parsed = parse_source(source.clone(), rel_path, source_map).map_err(|e| ParseErrorFinding {
        file_path: rel_path.to_string(),
        error: e.to_string(),
    })?;

    Ok(lower(&parsed, rel_path, &source, &settings.with_text))
}

/// Walk the include roots and collect relative paths of scannable files.
fn discover_files(root: &Path, settings: &Settings, verbose: bool) -> Vec<String> {
    let mut dirs_to_scan: Vec<PathBuf> = Vec::new();
    if settings.includes.is_empty() {
        dirs_to_scan.push(root.to_path_buf());
    } else {
        for include in &settings.includes {
            let path = root.join(include);
            if path.exists() {
                dirs_to_scan.push(path);
            } else if verbose {
                eprintln!(
                    "{} Include path does not exist: {}",
                    "warning:".bold().yellow(),
                    path.display()
                );
            }
        }
    }

    let mut files = Vec::new();
    for dir in dirs_to_scan {
        for entry in WalkDir::new(&dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() || !is_scannable_file(path) {
                continue;
            }

            let rel = match path.strip_prefix(root) {
                Ok(rel) => format!("./{}", rel.display()),
                Err(_) => path.display().to_string(),
            };

            if settings
                .ignore_files
                .iter()
                .any(|pattern| pattern.matches(&rel) || pattern.matches(rel.trim_start_matches("./")))
            {
                continue;
            }

            files.push(rel);
        }
    }

    files.sort();
    files.dedup();
    files
}

fn is_scannable_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("tsx" | "ts" | "jsx" | "js")
    )
}
