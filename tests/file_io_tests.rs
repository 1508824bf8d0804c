use mini_nano::file::{FilePersistence, Persistence};
use mini_nano::input::Key;
use mini_nano::{App, EditorConfig};
use tempfile::TempDir;

fn file_app() -> App<FilePersistence> {
    App::new(FilePersistence::new(), &EditorConfig::default(), 10, 40)
}

#[test]
fn test_crlf_file_is_normalized_on_save() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("dos.txt");
    std::fs::write(&path, b"alpha\r\nbeta\r\n").unwrap();
    let name = path.to_str().unwrap();

    let mut app = file_app();
    app.open_startup_file(name);
    assert_eq!(app.buffer().num_rows(), 2);
    assert!(!app.buffer().is_dirty());

    app.process_key(Key::Control(0x13));
    assert_eq!(app.status_text(), format!("Saved to {}", name));
    assert_eq!(std::fs::read(&path).unwrap(), b"alpha\nbeta\n");
}

#[test]
fn test_new_file_is_created_on_first_save() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("new.txt");
    let name = path.to_str().unwrap();

    let mut app = file_app();
    app.open_startup_file(name);
    assert!(app.status_text().starts_with("Could not open: No such file"));

    for byte in b"hello" {
        app.process_key(Key::Printable(*byte));
    }
    app.process_key(Key::Control(0x13));

    assert_eq!(std::fs::read(&path).unwrap(), b"hello\n");
    assert!(!app.buffer().is_dirty());
}

#[test]
fn test_save_into_missing_directory_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing").join("out.txt");

    let mut app = file_app();
    app.open_startup_file(path.to_str().unwrap());
    app.process_key(Key::Printable(b'x'));
    app.process_key(Key::Control(0x13));

    assert!(app.status_text().starts_with("Can't save: "));
    assert!(app.buffer().is_dirty());
    assert!(app.is_running());
}

#[test]
fn test_file_without_trailing_newline_round_trips_with_one() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tail.txt");
    std::fs::write(&path, b"a\nb").unwrap();

    let mut persistence = FilePersistence::new();
    let lines = persistence.load(&path).unwrap();
    assert_eq!(lines, vec![b"a".to_vec(), b"b".to_vec()]);

    let mut app = file_app();
    app.open_startup_file(path.to_str().unwrap());
    app.process_key(Key::Control(0x13));
    assert_eq!(std::fs::read(&path).unwrap(), b"a\nb\n");
}
