use smart_calc::{Environment, Outcome, Session};

fn output(session: &mut Session, line: &str) -> String {
    match session.execute(line) {
        Outcome::print(text) => text,
        other => panic!("expected output for {line:?}, got {other:?}"),
    }
}

#[test]
fn write_then_read_variables() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vars.txt");
    let path = path.to_string_lossy();

    let mut first = Session::new();
    first.execute("x = 12");
    first.execute("y = x * -2");
    assert_eq!(first.execute(&format!("/write {path}")), Outcome::silent);

    let mut second = Session::new();
    assert_eq!(second.execute(&format!("/read {path}")), Outcome::silent);
    assert_eq!(output(&mut second, "/vars"), "x = 12\ny = -24");
}

#[test]
fn read_runs_every_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("script.txt");
    std::fs::write(&path, "a = 2\nb = a ^ 3\na + b\n\nq = nope\n").unwrap();

    let mut session = Session::new();
    let text = output(&mut session, &format!("/read {}", path.display()));
    assert_eq!(text, "10\nUnknown variable");
    assert_eq!(session.variables().lookup("b"), Some(8));
    assert_eq!(session.variables().lookup("q"), None);
}

#[test]
fn read_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");

    let mut session = Session::new();
    let text = output(&mut session, &format!("/read {}", path.display()));
    assert!(text.starts_with(&path.display().to_string()));
}

#[test]
fn commands_without_arguments_do_nothing() {
    let mut session = Session::new();
    session.execute("a = 1");
    for command in ["/con", "/del", "/read", "/write"] {
        assert_eq!(session.execute(command), Outcome::silent);
    }
    assert_eq!(session.variables().lookup("a"), Some(1));
}

#[test]
fn reassignment_uses_the_old_value() {
    let mut session = Session::new();
    session.execute("n = 5");
    session.execute("n = n * n");
    assert_eq!(output(&mut session, "n"), "25");
}
