//! # Identity Provider Config Validator
//!
//! Dry-runs the parsing step of the file-based registry sync against a file or
//! a configuration directory, without touching any registry.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin idp-config-validator conf/identity/identity-providers/
//! cargo run --bin idp-config-validator google.json
//! cargo run --bin idp-config-validator ./idps/ --shared-prefix SHARED_
//! ```
//!
//! ## Output Example
//!
//! ```text
//! Validating identity providers in directory: ./idps/
//!
//!   ✓ google.json - Google (local)
//!   ✓ corp.json - shared_corp (shared)
//!   - blank.json - empty document, skipped
//!   ❌ broken.json - JSON error: EOF while parsing an object at line 1 column 26
//!
//! Validation Summary:
//!   Shared prefix: shared_
//!   Local providers: 1
//!   Shared providers: 1
//!   Empty documents: 1
//!   Invalid documents: 1
//! ```
//!
//! ## Exit Codes
//!
//! - `0`: Every document parsed (empty ones included)
//! - `1`: At least one document is invalid, the path could not be read, or the
//!   shared prefix is blank

use idp_registry::provider::{DEFAULT_SHARED_PREFIX, ProviderRecordParser, SharedRecordClassifier};
use idp_registry::{ComponentConfig, IdentityProvider, IdpMgtResult};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Default)]
struct Summary {
    local: usize,
    shared: usize,
    empty: usize,
    invalid: usize,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("idp-config-validator");

    let (path, prefix) = match parse_args(args.get(1..).unwrap_or_default()) {
        Some(parsed) => parsed,
        None => {
            eprintln!("Usage: {} <file-or-directory> [--shared-prefix PREFIX]", program);
            eprintln!();
            eprintln!("Examples:");
            eprintln!("  {} conf/identity/identity-providers/", program);
            eprintln!("  {} google.json --shared-prefix SHARED_", program);
            process::exit(1);
        }
    };

    let config = ComponentConfig::builder().shared_prefix(prefix).build();
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
    let classifier = SharedRecordClassifier::new(config.shared_prefix);
    let mut summary = Summary::default();

    if path.is_file() {
        println!("Validating identity provider file: {}", path.display());
        check_file(&path, &classifier, &mut summary);
    } else if path.is_dir() {
        println!("Validating identity providers in directory: {}\n", path.display());
        validate_directory(&path, &classifier, &mut summary);
    } else {
        eprintln!("Error: '{}' is not a valid file or directory", path.display());
        process::exit(1);
    }

    println!("\nValidation Summary:");
    println!("  Shared prefix: {}", classifier.prefix());
    println!("  Local providers: {}", summary.local);
    println!("  Shared providers: {}", summary.shared);
    println!("  Empty documents: {}", summary.empty);
    println!("  Invalid documents: {}", summary.invalid);

    if summary.invalid > 0 {
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Option<(PathBuf, String)> {
    let mut path = None;
    let mut prefix = DEFAULT_SHARED_PREFIX.to_string();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--shared-prefix" => prefix = iter.next()?.clone(),
            other if path.is_none() => path = Some(PathBuf::from(other)),
            _ => return None,
        }
    }

    path.map(|path| (path, prefix))
}

fn validate_directory(dir: &Path, classifier: &SharedRecordClassifier, summary: &mut Summary) {
    let mut files: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| !path.is_dir())
            .collect(),
        Err(e) => {
            eprintln!("Error reading directory: {}", e);
            process::exit(1);
        }
    };
    files.sort();

    let mut seen: HashMap<String, PathBuf> = HashMap::new();
    for path in files {
        if let Some(idp) = check_file(&path, classifier, summary) {
            if let Some(previous) = seen.insert(idp.name.clone(), path.clone()) {
                println!(
                    "    note: '{}' also defined in {}, the later file wins",
                    idp.name,
                    display_name(&previous)
                );
            }
        }
    }
}

fn check_file(
    path: &Path,
    classifier: &SharedRecordClassifier,
    summary: &mut Summary,
) -> Option<IdentityProvider> {
    match load(path) {
        Ok(Some(idp)) => {
            let kind = if classifier.is_shared(Some(&idp)) {
                summary.shared += 1;
                "shared"
            } else {
                summary.local += 1;
                "local"
            };
            println!("  ✓ {} - {} ({})", display_name(path), idp.name, kind);
            Some(idp)
        }
        Ok(None) => {
            summary.empty += 1;
            println!("  - {} - empty document, skipped", display_name(path));
            None
        }
        Err(e) => {
            summary.invalid += 1;
            eprintln!("  ❌ {} - {}", display_name(path), e);
            None
        }
    }
}

fn load(path: &Path) -> IdpMgtResult<Option<IdentityProvider>> {
    let content =
        fs::read_to_string(path).map_err(|e| idp_registry::IdpMgtError::io(path, e))?;
    ProviderRecordParser::parse_str(&content)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
