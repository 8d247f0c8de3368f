use artindex::engine::{
    glob_match, is_excluded, normalize_separators, path_relative_to, path_to_index_string,
    relative_entry_path, should_include_in_walk,
};
use artindex::utils::temp_path_for;
use std::path::{Path, PathBuf};

// --- path_relative_to ---

#[test]
fn test_path_relative_under_base() {
    let base = PathBuf::from("/foo/bar");
    let path = PathBuf::from("/foo/bar/baz/qux");
    assert_eq!(
        path_relative_to(&path, &base),
        Some(PathBuf::from("baz/qux"))
    );
}

#[test]
fn test_path_relative_not_under_base() {
    let base = PathBuf::from("/foo/bar");
    let path = PathBuf::from("/other/qux");
    assert_eq!(path_relative_to(&path, &base), None);
}

// --- path_to_index_string / relative_entry_path ---

#[test]
fn test_path_to_index_string_forward_slashes() {
    assert_eq!(
        path_to_index_string(Path::new("sub/dir/b.txt")),
        "sub/dir/b.txt"
    );
}

#[test]
fn test_path_to_index_string_normalizes_backslashes() {
    assert_eq!(
        path_to_index_string(Path::new("sub\\b.txt")),
        "sub/b.txt"
    );
}

#[test]
fn test_relative_entry_path_prefers_public_root() {
    let root = Path::new("/site/public/articles");
    let public = Path::new("/site/public");
    let file = Path::new("/site/public/articles/2024/post.md");
    assert_eq!(
        relative_entry_path(file, root, Some(public)),
        "articles/2024/post.md"
    );
}

#[test]
fn test_relative_entry_path_falls_back_to_root() {
    let root = Path::new("/data/articles");
    let public = Path::new("/site/public");
    let file = Path::new("/data/articles/sub/b.txt");
    assert_eq!(relative_entry_path(file, root, Some(public)), "sub/b.txt");
    assert_eq!(relative_entry_path(file, root, None), "sub/b.txt");
}

// --- glob_match ---

#[test]
fn test_glob_match_literal() {
    assert!(glob_match("drafts", "drafts"));
    assert!(!glob_match("drafts", "draft"));
    assert!(!glob_match("draft", "drafts"));
}

#[test]
fn test_glob_match_star() {
    assert!(glob_match("*.bak", "post.bak"));
    assert!(glob_match("*.bak", ".bak"));
    assert!(!glob_match("*.bak", "post.bak.md"));
    assert!(glob_match("draft_*", "draft_one"));
    assert!(glob_match("*", ""));
    assert!(glob_match("a*b*c", "aXXbYYc"));
    assert!(!glob_match("a*b*c", "aXXbYY"));
}

#[test]
fn test_glob_match_question() {
    assert!(glob_match("post?.md", "post1.md"));
    assert!(!glob_match("post?.md", "post.md"));
}

// --- should_include_in_walk ---

#[test]
fn test_should_include_root_excluded() {
    let root = PathBuf::from("/foo");
    assert!(!should_include_in_walk(&root, &root, &[], &[]));
}

#[test]
fn test_should_include_skip_path() {
    let root = PathBuf::from("/foo");
    let out = PathBuf::from("/foo/articleIndex.json");
    assert!(!should_include_in_walk(&out, &root, &[out.clone()], &[]));
}

#[test]
fn test_should_include_exclude_dir_component() {
    let root = PathBuf::from("/foo");
    let path = PathBuf::from("/foo/drafts/a.md");
    assert!(!should_include_in_walk(
        &path,
        &root,
        &[],
        &["drafts".to_string()]
    ));
}

#[test]
fn test_should_include_exclude_pattern_glob() {
    let root = PathBuf::from("/foo");
    let path = PathBuf::from("/foo/bar/baz.bak");
    assert!(!should_include_in_walk(
        &path,
        &root,
        &[],
        &["*.bak".to_string()]
    ));
}

#[test]
fn test_should_include_not_excluded() {
    let root = PathBuf::from("/foo");
    let path = PathBuf::from("/foo/bar/baz.md");
    assert!(should_include_in_walk(
        &path,
        &root,
        &[],
        &["*.bak".to_string(), "drafts".to_string()]
    ));
}

#[test]
fn test_should_include_pattern_not_matched_against_root_components() {
    // "foo" is the root's own name; only components below root count.
    let root = PathBuf::from("/foo");
    let path = PathBuf::from("/foo/a.md");
    assert!(should_include_in_walk(&path, &root, &[], &["foo".to_string()]));
}

#[test]
fn test_is_excluded_never_excludes_root() {
    let root = PathBuf::from("/site/drafts");
    assert!(!is_excluded(&root, &root, &["drafts".to_string()]));
    assert!(is_excluded(
        Path::new("/site/drafts/drafts"),
        &root,
        &["drafts".to_string()]
    ));
}

// --- output writer ---

#[test]
fn test_normalize_separators_doubled_backslash() {
    assert_eq!(
        normalize_separators(r#"{"relativePath":"articles\\2024\\a.md"}"#),
        r#"{"relativePath":"articles/2024/a.md"}"#
    );
}

#[test]
fn test_normalize_separators_leaves_single_backslash() {
    assert_eq!(normalize_separators(r#"say \"hi\""#), r#"say \"hi\""#);
}

#[test]
fn test_temp_path_is_sibling() {
    let out = PathBuf::from("public/articleIndex.json");
    let temp = temp_path_for(&out);
    assert_eq!(temp.parent(), Some(Path::new("public")));
    assert_ne!(temp, out);
}
