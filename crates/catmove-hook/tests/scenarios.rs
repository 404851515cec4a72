use std::fs;
use std::io;
use std::path::Path;

use anyhow::Result;
use catmove_config::{MapSource, keys};
use catmove_fsops::{DirectoryMover, Transfer};
use catmove_hook::{ExitStatus, HookError, Outcome, execute, pipeline};
use catmove_telemetry::host_subscriber;
use catmove_test_support::fixtures::{Library, completed_download, host_options, test_command};
use catmove_test_support::logs::LogCapture;
use catmove_test_support::mocks::RecordingTransfer;

struct Invocation {
    status: ExitStatus,
    stdout: String,
    raw_stdout: Vec<u8>,
    logs: Vec<String>,
}

impl Invocation {
    fn logged(&self, line: &str) -> bool {
        self.logs.iter().any(|logged| logged == line)
    }
}

fn invoke(source: &MapSource, transfer: &dyn Transfer) -> Result<Invocation> {
    let capture = LogCapture::new();
    let subscriber = host_subscriber("debug", capture.clone())?;
    let mut out = Vec::new();
    let status =
        tracing::subscriber::with_default(subscriber, || execute(source, transfer, &mut out));
    Ok(Invocation {
        status,
        stdout: String::from_utf8_lossy(&out).into_owned(),
        raw_stdout: out,
        logs: capture.lines(),
    })
}

#[test]
fn scenario_a_moves_matching_download() -> Result<()> {
    let library = Library::new()?;
    let download = library.add_download("Movie.2024")?;
    let source = completed_download(&download, library.destination());

    let run = invoke(&source, &DirectoryMover)?;

    let moved = library.destination().join("Movie.2024");
    assert_eq!(run.status, ExitStatus::Success);
    assert_eq!(run.status.code(), 93);
    assert_eq!(run.stdout, format!("[NZB] DIRECTORY={}\n", moved.display()));
    assert!(moved.join("Movie.2024.mkv").is_file());
    assert!(!download.exists());
    assert!(run.logged("[DETAIL] Script successfully started"));
    assert!(run.logged("[INFO] Moving download directory"));
    assert!(run.logged(&format!(
        "[INFO] - Source: {}",
        fs::canonicalize(library.downloads())?.join("Movie.2024").display()
    )));
    Ok(())
}

#[test]
fn scenario_b_other_category_is_left_alone() -> Result<()> {
    let library = Library::new()?;
    let download = library.add_download("Movie.2024")?;
    let source =
        completed_download(&download, library.destination()).with(keys::CATEGORY, "tv");
    let transfer = RecordingTransfer::new();

    let run = invoke(&source, &transfer)?;

    assert_eq!(run.status, ExitStatus::NoActionTaken);
    assert_eq!(run.status.code(), 95);
    assert!(transfer.calls().is_empty());
    assert!(download.is_dir());
    assert!(run.stdout.is_empty());
    assert!(run.logged("[INFO] Skipping move, category is not movies."));
    Ok(())
}

#[test]
fn scenario_c_failed_repair_is_an_error() -> Result<()> {
    let library = Library::new()?;
    let download = library.add_download("Movie.2024")?;
    let source =
        completed_download(&download, library.destination()).with(keys::PAR_STATUS, "4");
    let transfer = RecordingTransfer::new();

    let run = invoke(&source, &transfer)?;

    assert_eq!(run.status, ExitStatus::Error);
    assert_eq!(run.status.code(), 94);
    assert!(run.logged("[ERROR] Par-repair failed."));
    assert!(transfer.calls().is_empty());
    assert!(download.is_dir());
    Ok(())
}

#[test]
fn scenario_d_test_command_echoes_options() -> Result<()> {
    let source = test_command("movies", Path::new("/library/movies"));
    let transfer = RecordingTransfer::new();

    let run = invoke(&source, &transfer)?;

    assert_eq!(run.status, ExitStatus::Success);
    assert!(run.logged("[DETAIL] Script successfully invoked with params:"));
    assert!(run.logged("[DETAIL] NameOfCategory: movies"));
    assert!(run.logged("[DETAIL] NewLocationOfCategory: /library/movies"));
    assert!(transfer.calls().is_empty());
    assert!(run.stdout.is_empty());
    Ok(())
}

#[test]
fn missing_marker_fails_whatever_else_is_set() -> Result<()> {
    let library = Library::new()?;
    let download = library.add_download("Movie.2024")?;
    let sources = [
        MapSource::new(),
        completed_download(&download, library.destination()).without(keys::HOST_MARKER),
        test_command("movies", library.destination()).without(keys::HOST_MARKER),
        MapSource::new().with(keys::COMMAND, "Purge"),
    ];

    for source in &sources {
        let transfer = RecordingTransfer::new();
        let run = invoke(source, &transfer)?;
        assert_eq!(run.status, ExitStatus::Error);
        assert_eq!(
            run.logs,
            vec!["[ERROR] This script can only be called from NZBGet."]
        );
        assert!(transfer.calls().is_empty());
    }
    assert!(download.is_dir());
    Ok(())
}

#[test]
fn missing_option_names_the_setting() -> Result<()> {
    let source = host_options("movies", Path::new("/library/movies"))
        .without(keys::DESTINATION_ROOT);

    let run = invoke(&source, &RecordingTransfer::new())?;

    assert_eq!(run.status, ExitStatus::Error);
    assert!(run.logged(
        "[ERROR] Option NEWLOCATIONOFCATEGORY is missing in configuration file. Please check script settings"
    ));
    Ok(())
}

#[test]
fn unknown_command_is_rejected() -> Result<()> {
    let source = host_options("movies", Path::new("/library/movies")).with(keys::COMMAND, "Purge");

    let run = invoke(&source, &RecordingTransfer::new())?;

    assert_eq!(run.status, ExitStatus::Error);
    assert!(run.logged("[ERROR] Invalid command Purge"));
    Ok(())
}

#[test]
fn absent_category_never_matches() -> Result<()> {
    let library = Library::new()?;
    let download = library.add_download("Movie.2024")?;
    let source = completed_download(&download, library.destination()).without(keys::CATEGORY);
    let transfer = RecordingTransfer::new();

    let run = invoke(&source, &transfer)?;

    assert_eq!(run.status, ExitStatus::NoActionTaken);
    assert!(transfer.calls().is_empty());
    Ok(())
}

#[test]
fn unsuccessful_total_status_fails_regardless_of_other_checks() -> Result<()> {
    let library = Library::new()?;
    let download = library.add_download("Movie.2024")?;

    for total in ["WARNING", "FAILURE", "DELETED", "success"] {
        for par in ["0", "2", "4"] {
            for unpack in ["0", "1", "2"] {
                let source = completed_download(&download, library.destination())
                    .with(keys::TOTAL_STATUS, total)
                    .with(keys::PAR_STATUS, par)
                    .with(keys::UNPACK_STATUS, unpack);
                let transfer = RecordingTransfer::new();
                let run = invoke(&source, &transfer)?;
                assert_eq!(run.status, ExitStatus::Error, "{total}/{par}/{unpack}");
                assert!(run.logged(&format!("[ERROR] Download failed with status {total}.")));
                assert!(transfer.calls().is_empty());
            }
        }
    }
    Ok(())
}

#[test]
fn every_status_failure_is_logged() -> Result<()> {
    let library = Library::new()?;
    let download = library.add_download("Movie.2024")?;
    let source = completed_download(&download, library.destination())
        .with(keys::TOTAL_STATUS, "FAILURE")
        .with(keys::PAR_STATUS, "1")
        .with(keys::UNPACK_STATUS, "1");

    let run = invoke(&source, &RecordingTransfer::new())?;

    let errors: Vec<&String> = run
        .logs
        .iter()
        .filter(|line| line.starts_with("[ERROR]"))
        .collect();
    assert_eq!(
        errors,
        vec![
            "[ERROR] Download failed with status FAILURE.",
            "[ERROR] Par-repair failed.",
            "[ERROR] Unpack failed.",
        ]
    );
    Ok(())
}

#[test]
fn second_invocation_reports_missing_source() -> Result<()> {
    let library = Library::new()?;
    let download = library.add_download("Movie.2024")?;
    let source = completed_download(&download, library.destination());

    let first = invoke(&source, &DirectoryMover)?;
    assert_eq!(first.status, ExitStatus::Success);

    let second = invoke(&source, &DirectoryMover)?;
    assert_eq!(second.status, ExitStatus::Error);
    assert!(second.stdout.is_empty());
    assert!(second.logged(&format!(
        "[ERROR] Current destination directory \"{}\" does not exist.",
        download.display()
    )));
    assert!(
        library
            .destination()
            .join("Movie.2024")
            .join("Movie.2024.mkv")
            .is_file()
    );
    Ok(())
}

#[test]
fn download_already_in_destination_is_not_moved() -> Result<()> {
    let library = Library::new()?;
    let in_place = library.destination().join("Movie.2024");
    fs::create_dir(&in_place)?;
    let source = completed_download(&in_place, library.destination());
    let transfer = RecordingTransfer::new();

    let run = invoke(&source, &transfer)?;

    assert_eq!(run.status, ExitStatus::NoActionTaken);
    assert!(transfer.calls().is_empty());
    assert!(run.logged(&format!(
        "[INFO] Skipping move, download directory \"{}\" is already in the proper destination.",
        in_place.display()
    )));
    Ok(())
}

#[test]
fn missing_destination_root_is_an_error() -> Result<()> {
    let library = Library::new()?;
    let download = library.add_download("Movie.2024")?;
    let destination = library.root().join("library").join("tv");
    let source = completed_download(&download, &destination);
    let transfer = RecordingTransfer::new();

    let run = invoke(&source, &transfer)?;

    assert_eq!(run.status, ExitStatus::Error);
    assert!(run.logged(&format!(
        "[ERROR] New destination directory \"{}\" does not exist.",
        destination.display()
    )));
    assert!(transfer.calls().is_empty());
    Ok(())
}

#[test]
fn move_failures_carry_the_system_error() -> Result<()> {
    let library = Library::new()?;
    let download = library.add_download("Movie.2024")?;
    let source = completed_download(&download, library.destination());
    let transfer = RecordingTransfer::failing(io::ErrorKind::PermissionDenied);

    let run = invoke(&source, &transfer)?;

    assert_eq!(run.status, ExitStatus::Error);
    assert_eq!(transfer.calls().len(), 1);
    assert!(
        run.logs
            .iter()
            .any(|line| line.starts_with("[ERROR] Failed to move download directory: rename"))
    );
    assert!(run.stdout.is_empty());
    Ok(())
}

#[test]
fn occupied_target_is_never_overwritten() -> Result<()> {
    let library = Library::new()?;
    let download = library.add_download("Movie.2024")?;
    let occupied = library.destination().join("Movie.2024");
    fs::create_dir(&occupied)?;
    fs::write(occupied.join("keep.txt"), b"existing")?;
    let source = completed_download(&download, library.destination());

    let run = invoke(&source, &DirectoryMover)?;

    assert_eq!(run.status, ExitStatus::Error);
    assert!(run.logs.iter().any(|line| line.contains("already exists")));
    assert!(download.join("Movie.2024.mkv").is_file());
    assert_eq!(fs::read(occupied.join("keep.txt"))?, b"existing");
    Ok(())
}

#[test]
fn missing_download_directory_key_fails_after_status_checks() -> Result<()> {
    let library = Library::new()?;
    let source = completed_download(Path::new("/unused"), library.destination())
        .without(keys::DOWNLOAD_DIRECTORY);

    let run = invoke(&source, &RecordingTransfer::new())?;

    assert_eq!(run.status, ExitStatus::Error);
    assert!(run.logged("[ERROR] Host did not provide NZBPP_DIRECTORY"));
    Ok(())
}

#[test]
fn pipeline_reports_configured_destination_path() -> Result<()> {
    let library = Library::new()?;
    let download = library.add_download("Movie.2024")?;
    let source = completed_download(&download, library.destination());
    let transfer = RecordingTransfer::new();

    let outcome = pipeline::run(&source, &transfer)?;

    assert_eq!(
        outcome,
        Outcome::Moved {
            directory: library.destination().join("Movie.2024")
        }
    );
    let calls = transfer.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, fs::canonicalize(&download)?);
    assert_eq!(
        calls[0].1,
        fs::canonicalize(library.destination())?.join("Movie.2024")
    );
    Ok(())
}

#[test]
fn pipeline_errors_are_typed() -> Result<()> {
    let library = Library::new()?;
    let download = library.add_download("Movie.2024")?;
    let source = completed_download(&download, library.destination())
        .with(keys::UNPACK_STATUS, "1");

    let result = pipeline::run(&source, &RecordingTransfer::new());

    assert!(matches!(
        result,
        Err(HookError::StatusCheck { ref failures }) if failures.len() == 1
    ));
    Ok(())
}

#[cfg(unix)]
#[test]
fn non_utf8_download_name_is_moved_intact() -> Result<()> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let library = Library::new()?;
    let name = OsStr::from_bytes(b"Film.\xe9t\xe9");
    let download = library.downloads().join(name);
    fs::create_dir(&download)?;
    fs::write(download.join("film.mkv"), b"film")?;
    let source = completed_download(&download, library.destination());

    let run = invoke(&source, &DirectoryMover)?;

    let moved = library.destination().join(name);
    assert_eq!(run.status, ExitStatus::Success);
    assert_eq!(fs::read(moved.join("film.mkv"))?, b"film");
    assert!(!download.exists());
    let mut expected = b"[NZB] DIRECTORY=".to_vec();
    expected.extend_from_slice(moved.as_os_str().as_bytes());
    expected.push(b'\n');
    assert_eq!(run.raw_stdout, expected);
    Ok(())
}

#[test]
fn host_lines_contain_no_terminal_escapes() -> Result<()> {
    let library = Library::new()?;
    let download = library.add_download("Movie.2024")?;
    let source = completed_download(&download, library.destination());

    let run = invoke(&source, &DirectoryMover)?;

    assert_eq!(run.status, ExitStatus::Success);
    assert!(run.logs.iter().any(|line| line.contains("resolved directory")));
    assert!(run.logs.iter().all(|line| !line.contains('\u{1b}')));
    Ok(())
}
