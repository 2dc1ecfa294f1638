use super::{find_documents, load_page, output_paths, split_frontmatter};
use crate::error::Error;
use crate::formats::markdown::MarkdownFormat;
use crate::parse::PageParser;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_find_documents_walks_directories() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("b.md"), "b").unwrap();
    fs::write(dir.path().join("nested").join("a.md"), "a").unwrap();
    fs::write(dir.path().join("skip.txt"), "x").unwrap();

    let docs = find_documents(vec![dir.path().to_path_buf()], &["md".to_string()]).unwrap();

    assert_eq!(docs.len(), 2);
    assert!(docs.iter().all(|p| p.extension().unwrap() == "md"));
    assert!(docs.windows(2).all(|w| w[0] <= w[1]), "should be sorted");
}

#[test]
fn test_explicit_files_kept_and_deduplicated() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("notes.txt");
    fs::write(&file, "x").unwrap();

    let docs = find_documents(vec![file.clone(), file.clone()], &["md".to_string()]).unwrap();
    assert_eq!(docs, vec![file]);
}

#[test]
fn test_missing_path_errors() {
    let dir = TempDir::new().unwrap();
    let result = find_documents(vec![dir.path().join("nope")], &["md".to_string()]);
    assert!(result.is_err());
}

#[test]
fn test_split_frontmatter() {
    let (fm, body) = split_frontmatter("+++\ntitle = \"Accounts\"\n+++\n## Body\n").unwrap();
    assert_eq!(fm.title.as_deref(), Some("Accounts"));
    assert_eq!(fm.description, None);
    assert_eq!(body, "## Body\n");
}

#[test]
fn test_no_frontmatter_passes_through() {
    let source = "## Just content\n";
    let (fm, body) = split_frontmatter(source).unwrap();
    assert_eq!(fm, crate::page::Frontmatter::default());
    assert_eq!(body, source);
}

#[test]
fn test_unterminated_frontmatter() {
    let result = split_frontmatter("+++\ntitle = \"x\"\n## Body\n");
    assert!(matches!(result, Err(Error::Frontmatter { .. })));
}

#[test]
fn test_load_page_uses_file_stem() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("builtins.md");
    fs::write(&path, "## keccak256\n\nHashes bytes.\n").unwrap();

    let mut parser = PageParser::new(&MarkdownFormat).unwrap();
    let page = load_page(&path, &mut parser).unwrap();

    assert_eq!(page.title(), "builtins");
    assert_eq!(page.headings()[0].id, "keccak256");
}

#[cfg(unix)]
#[test]
fn test_symlink_loop_is_not_followed() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.md"), "a").unwrap();
    std::os::unix::fs::symlink(".", dir.path().join("loop")).unwrap();

    let docs = find_documents(vec![dir.path().to_path_buf()], &["md".to_string()]).unwrap();
    assert_eq!(docs, vec![dir.path().join("a.md")]);
}

#[test]
fn test_output_paths_use_stems() {
    let docs = vec![PathBuf::from("docs/intro.md"), PathBuf::from("docs/v1.2.md")];
    let targets = output_paths(&docs, Path::new("out"), "json").unwrap();
    assert_eq!(
        targets,
        vec![PathBuf::from("out/intro.json"), PathBuf::from("out/v1.2.json")]
    );
}

#[test]
fn test_output_paths_reject_shared_stems() {
    let docs = vec![PathBuf::from("a/index.md"), PathBuf::from("b/index.md")];
    match output_paths(&docs, Path::new("out"), "html") {
        Err(Error::OutputCollision {
            target,
            first,
            second,
        }) => {
            assert_eq!(target, PathBuf::from("out/index.html"));
            assert_eq!(first, PathBuf::from("a/index.md"));
            assert_eq!(second, PathBuf::from("b/index.md"));
        }
        other => panic!("expected collision, got {other:?}"),
    }
}
