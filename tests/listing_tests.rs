mod util;

use lsv::data::{DisplayMode, ListingRequest, RenderOptions};
use lsv::listing::{run, run_to_lines};
use lsv::reader::collect_entries;
use std::collections::BTreeSet;
use std::fs;
use std::os::unix::fs::{MetadataExt, PermissionsExt, symlink};
use util::{build_tree, header};

fn options(width: usize) -> RenderOptions {
    RenderOptions {
        width,
        special_bits: true,
    }
}

#[test]
fn test_reader_matches_visible_children() {
    let temp = build_tree(&["one", "two/", ".dot", ".dotdir/", "three.rs"]).unwrap();

    let listed: BTreeSet<String> = collect_entries(temp.path())
        .unwrap()
        .into_iter()
        .map(|e| e.display_name().into_owned())
        .collect();

    let expected: BTreeSet<String> = fs::read_dir(temp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| !n.starts_with('.'))
        .collect();

    assert_eq!(listed, expected);
    assert_eq!(listed.len(), 3);
}

#[test]
fn test_default_mode_orders_names() {
    let temp = build_tree(&["b.txt", "a.txt", "c.txt"]).unwrap();
    let request = ListingRequest::new(temp.path(), DisplayMode::Grid);
    let lines = run_to_lines(&request, &options(80)).unwrap();
    assert_eq!(lines, ["a.txt  b.txt  c.txt"]);

    // Narrow enough that each name needs its own row.
    let lines = run_to_lines(&request, &options(8)).unwrap();
    assert_eq!(lines, ["a.txt", "b.txt", "c.txt"]);
}

#[test]
fn test_recursive_prints_headers() {
    let temp = build_tree(&["sub/"]).unwrap();
    let request = ListingRequest::new(temp.path(), DisplayMode::Grid).recursive(true);
    let lines = run_to_lines(&request, &options(80)).unwrap();

    assert_eq!(
        lines,
        [
            header(temp.path()),
            "sub".to_string(),
            String::new(),
            header(&temp.path().join("sub")),
        ]
    );
}

#[test]
fn test_recursive_is_depth_first_in_sorted_order() {
    let temp = build_tree(&["b/", "b/inner/", "a/", "a/file", "c"]).unwrap();
    let request = ListingRequest::new(temp.path(), DisplayMode::SingleColumn).recursive(true);
    let lines = run_to_lines(&request, &options(80)).unwrap();

    let headers: Vec<&String> = lines.iter().filter(|l| l.ends_with(':')).collect();
    assert_eq!(
        headers,
        [
            &header(temp.path()),
            &header(&temp.path().join("a")),
            &header(&temp.path().join("b")),
            &header(&temp.path().join("b/inner")),
        ]
    );
}

#[test]
fn test_long_mode_empty_directory() {
    let temp = build_tree(&[".hidden"]).unwrap();
    let request = ListingRequest::new(temp.path(), DisplayMode::Long);
    assert_eq!(run_to_lines(&request, &options(80)).unwrap(), ["total 0"]);
}

#[test]
fn test_long_mode_total_matches_blocks() {
    let temp = build_tree(&["small", "dir/"]).unwrap();
    fs::write(temp.path().join("big"), vec![7u8; 64 * 1024]).unwrap();

    let blocks: u64 = ["small", "dir", "big"]
        .iter()
        .map(|n| fs::symlink_metadata(temp.path().join(n)).unwrap().blocks())
        .sum();

    let request = ListingRequest::new(temp.path(), DisplayMode::Long);
    let lines = run_to_lines(&request, &options(80)).unwrap();

    assert_eq!(lines[0], format!("total {}", blocks / 2));
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("-") && lines[1].ends_with(" big"));
    assert!(lines[2].starts_with("d") && lines[2].ends_with(" dir"));
    assert!(lines[3].starts_with("-") && lines[3].ends_with(" small"));
    for line in &lines[1..] {
        assert_eq!(line.split_whitespace().next().unwrap().len(), 10);
    }
}

#[test]
fn test_long_mode_reports_links_as_links() {
    let temp = build_tree(&["target.txt"]).unwrap();
    symlink("target.txt", temp.path().join("link")).unwrap();

    let request = ListingRequest::new(temp.path(), DisplayMode::Long);
    let lines = run_to_lines(&request, &options(80)).unwrap();
    let link_line = lines.iter().find(|l| l.contains(" link")).unwrap();
    assert!(link_line.starts_with('l'));
    assert!(link_line.ends_with(" link -> target.txt"));
}

#[test]
fn test_long_mode_shows_mode_bits() {
    let temp = build_tree(&["script.sh"]).unwrap();
    let path = temp.path().join("script.sh");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o750)).unwrap();

    let request = ListingRequest::new(temp.path(), DisplayMode::Long);
    let lines = run_to_lines(&request, &options(80)).unwrap();
    assert!(lines[1].starts_with("-rwxr-x--- "));
}

#[test]
fn test_across_long_name_gets_own_line() {
    let long = "n".repeat(100);
    let temp = build_tree(&["a", long.as_str(), "z"]).unwrap();
    let request = ListingRequest::new(temp.path(), DisplayMode::Across);
    let lines = run_to_lines(&request, &options(80)).unwrap();
    assert!(lines.contains(&long));
}

#[test]
fn test_across_fills_rows_first() {
    let temp = build_tree(&["aa", "bb", "cc", "dd", "ee"]).unwrap();
    let request = ListingRequest::new(temp.path(), DisplayMode::Across);
    // Columns are 4 wide, so a width of 8 fits two per row.
    let lines = run_to_lines(&request, &options(8)).unwrap();
    assert_eq!(lines, ["aa  bb", "cc  dd", "ee"]);

    let request = ListingRequest::new(temp.path(), DisplayMode::Grid);
    let lines = run_to_lines(&request, &options(8)).unwrap();
    assert_eq!(lines, ["aa  dd", "bb  ee", "cc"]);
}

#[test]
fn test_unreadable_subdirectory_does_not_stop_siblings() {
    // Permission bits do not restrict root.
    if unsafe { libc::geteuid() } == 0 {
        return;
    }

    let temp = build_tree(&["a_locked/", "b_open/", "b_open/inside"]).unwrap();
    let locked = temp.path().join("a_locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    let request = ListingRequest::new(temp.path(), DisplayMode::SingleColumn).recursive(true);
    let mut out = Vec::new();
    let mut reported = Vec::new();
    let summary = run(&request, &options(80), &mut out, &mut |e| {
        reported.push(e.path().cloned())
    })
    .unwrap();

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(summary.failures.len(), 1);
    assert_eq!(reported, [Some(locked)]);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("inside"));
}
