use super::*;
use std::path::Path;

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn parse_args_resolves_relative_files_against_cwd() {
    let cwd = Path::new("/work");
    let options = parse_args(cwd, args(&["a.py", "/abs/b.py"])).unwrap();

    assert_eq!(
        options.files,
        vec![PathBuf::from("/work/a.py"), PathBuf::from("/abs/b.py")]
    );
    assert_eq!(options.color, None);
    assert!(options.line_numbers);
}

#[test]
fn parse_args_reads_flags() {
    let options =
        parse_args(Path::new("/"), args(&["--plain", "--no-line-numbers", "x.py"])).unwrap();

    assert_eq!(options.color, Some(false));
    assert!(!options.line_numbers);
}

#[test]
fn parse_args_requires_a_file() {
    let err = parse_args(Path::new("/"), args(&["--plain"])).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
}

#[test]
fn parse_args_rejects_unknown_flags() {
    let err = parse_args(Path::new("/"), args(&["--fast", "x.py"])).unwrap_err();
    assert!(err.to_string().contains("--fast"));
}

#[test]
fn usage_lists_every_accepted_flag() {
    for flag in ["--plain", "--color", "--no-line-numbers"] {
        assert!(USAGE.contains(flag), "usage is missing {flag}");
        parse_args(Path::new("/"), args(&[flag, "x.py"])).unwrap();
    }
    let options = parse_args(Path::new("/"), args(&["--color", "x.py"])).unwrap();
    assert_eq!(options.color, Some(true));
}
