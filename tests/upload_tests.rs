mod common;

use common::{setup_temp_dir, write_local, Event, MemoryFs};
use xftp::config::ClientOptions;
use xftp::transfer::upload;
use xftp::XftpError;

fn options(chunk_size: usize) -> ClientOptions {
    ClientOptions {
        chunk_size,
        ..Default::default()
    }
}

//===============
// Directory creation
//===============
#[test]
fn test_upload_creates_missing_parents_before_data() {
    let temp_dir = setup_temp_dir();
    let local = write_local(temp_dir.path(), "report.csv", b"id,value\n1,42\n");
    let mut remote = MemoryFs::new();

    upload(&mut remote, &local, "/a/b/c/report.csv", &options(4)).expect("upload failed");

    assert_eq!(
        remote.events,
        vec![
            Event::Mkdir("/a".to_string()),
            Event::Mkdir("/a/b".to_string()),
            Event::Mkdir("/a/b/c".to_string()),
            Event::Write("/a/b/c/report.csv".to_string()),
        ]
    );
    assert_eq!(remote.files["/a/b/c/report.csv"], b"id,value\n1,42\n");
}

#[test]
fn test_upload_creates_only_missing_prefixes() {
    let temp_dir = setup_temp_dir();
    let local = write_local(temp_dir.path(), "app.log", b"started");
    let mut remote = MemoryFs::with_dirs(&["/var", "/var/log"]);

    upload(&mut remote, &local, "/var/log/app/app.log", &options(1024)).expect("upload failed");

    assert_eq!(remote.created, vec!["/var/log/app"]);
    assert_eq!(remote.files["/var/log/app/app.log"], b"started");
}

#[test]
fn test_upload_twice_to_same_destination() {
    let temp_dir = setup_temp_dir();
    let first = write_local(temp_dir.path(), "v1.txt", b"first");
    let second = write_local(temp_dir.path(), "v2.txt", b"second");
    let mut remote = MemoryFs::new();

    upload(&mut remote, &first, "srv/data/file.txt", &options(1024)).expect("first upload failed");
    upload(&mut remote, &second, "srv/data/file.txt", &options(1024))
        .expect("second upload failed");

    assert_eq!(remote.created, vec!["srv", "srv/data"]);
    assert_eq!(remote.files["srv/data/file.txt"], b"second");
}

#[test]
fn test_upload_tolerates_concurrently_created_directory() {
    let temp_dir = setup_temp_dir();
    let local = write_local(temp_dir.path(), "x.bin", &[1, 2, 3]);
    let mut remote = MemoryFs::new();
    remote.racing.insert("/shared".to_string());

    upload(&mut remote, &local, "/shared/inbox/x.bin", &options(1024)).expect("upload failed");

    assert_eq!(remote.created, vec!["/shared/inbox"]);
    assert_eq!(remote.files["/shared/inbox/x.bin"], vec![1, 2, 3]);
}

#[test]
fn test_upload_normalizes_backslash_destination() {
    let temp_dir = setup_temp_dir();
    let local = write_local(temp_dir.path(), "index.html", b"<html></html>");
    let mut remote = MemoryFs::new();

    upload(&mut remote, &local, r"\srv\\www\index.html", &options(1024)).expect("upload failed");

    assert_eq!(remote.created, vec!["/srv", "/srv/www"]);
    assert!(remote.files.contains_key("/srv/www/index.html"));
}

#[test]
fn test_upload_bare_file_name_creates_nothing() {
    let temp_dir = setup_temp_dir();
    let local = write_local(temp_dir.path(), "notes.txt", b"hello");
    let mut remote = MemoryFs::new();

    upload(&mut remote, &local, "notes.txt", &options(1024)).expect("upload failed");

    assert!(remote.mkdir_calls().is_empty());
    assert_eq!(remote.files["notes.txt"], b"hello");
}

//===============
// Error paths
//===============
#[test]
fn test_upload_empty_destination() {
    let temp_dir = setup_temp_dir();
    let local = write_local(temp_dir.path(), "a.txt", b"a");
    let mut remote = MemoryFs::new();

    let err = upload(&mut remote, &local, "", &options(1024)).unwrap_err();
    assert!(matches!(err, XftpError::EmptyPath));
    assert!(remote.events.is_empty());
}

#[test]
fn test_upload_mkdir_failure_names_segment() {
    let temp_dir = setup_temp_dir();
    let local = write_local(temp_dir.path(), "a.txt", b"a");
    let mut remote = MemoryFs::new();
    remote
        .mkdir_errors
        .insert("/data/locked".to_string(), "550 Permission denied".to_string());

    let err = upload(&mut remote, &local, "/data/locked/deep/a.txt", &options(1024)).unwrap_err();

    match err {
        XftpError::DirectoryCreation { segment, cause } => {
            assert_eq!(segment, "/data/locked");
            assert_eq!(cause.to_string(), "550 Permission denied");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(remote.mkdir_calls(), vec!["/data", "/data/locked"]);
    assert!(remote.files.is_empty());
}

#[test]
fn test_upload_missing_local_file() {
    let temp_dir = setup_temp_dir();
    let missing = temp_dir.path().join("does-not-exist.txt");
    let mut remote = MemoryFs::new();

    let err = upload(&mut remote, &missing, "/in/box.txt", &options(1024)).unwrap_err();

    assert!(matches!(err, XftpError::LocalFile { .. }));
    assert!(remote.files.is_empty());
}

#[test]
fn test_upload_broken_stream_leaves_partial_file() {
    let temp_dir = setup_temp_dir();
    let data = vec![7u8; 100];
    let local = write_local(temp_dir.path(), "big.bin", &data);
    let mut remote = MemoryFs::new();
    remote.write_budget = Some(40);

    let err = upload(&mut remote, &local, "/up/big.bin", &options(16)).unwrap_err();

    match err {
        XftpError::Transfer { path, .. } => assert_eq!(path, "/up/big.bin"),
        other => panic!("unexpected error: {other}"),
    }
    // 不做原子替换，远端留下部分内容
    assert_eq!(remote.files["/up/big.bin"].len(), 32);
}
