//! Export requests travelling from the event handler through the worker to disk.

use tempfile::TempDir;
use userdeck::app::{Action, AppState, Settings};
use userdeck::export::{EmptyExportPolicy, ExportFile, ExportFormat, ExportSink, FileSink, CSV_HEADER};
use userdeck::remote::decode_response;
use userdeck::worker::{ExportWorker, WorkerMessage, WorkerResponse};
use userdeck::{handle_event, Event, Theme};

const USERS: &str = r#"[
    {
        "id": 1,
        "name": "Leanne Graham",
        "email": "Sincere@april.biz",
        "phone": "1-770-736-8031",
        "website": "hildegard.org",
        "address": { "street": "Kulas Light", "suite": "Apt. 556", "city": "Gwenborough", "zipcode": "92998" },
        "company": { "name": "Romaguera-Crona", "catchPhrase": "Multi-layered", "bs": "e-markets" }
    },
    {
        "id": 2,
        "name": "Ervin \"E\" Howell",
        "email": "Shanna@melissa.tv",
        "phone": "010-692-6593",
        "website": "anastasia.net",
        "address": { "street": "Victor Plains", "suite": "Suite 879", "city": "Wisokyburgh", "zipcode": "90566" },
        "company": { "name": "Deckow-Crist", "catchPhrase": "Proactive", "bs": "synergize" }
    }
]"#;

fn loaded_in(dir: &TempDir, policy: EmptyExportPolicy) -> AppState {
    let settings = Settings {
        export_dir: dir.path().to_string_lossy().into_owned(),
        export_policy: policy,
        ..Settings::default()
    };
    let mut state = AppState::new(Theme::default(), settings);
    handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
    let users = decode_response(200, USERS.as_bytes()).unwrap();
    handle_event(&mut state, &Event::UsersFetched(Ok(users))).unwrap();
    state
}

fn search(state: &mut AppState, text: &str) {
    handle_event(state, &Event::FocusSearch).unwrap();
    for c in text.chars() {
        handle_event(state, &Event::Char(c)).unwrap();
    }
    for _ in text.chars() {
        handle_event(state, &Event::DebounceElapsed).unwrap();
    }
    handle_event(state, &Event::BlurSearch).unwrap();
}

/// Runs one export end to end and returns the worker's answer.
fn run_export(state: &mut AppState, format: ExportFormat) -> (WorkerMessage, WorkerResponse) {
    let (_, actions) = handle_event(state, &Event::Export(format)).unwrap();
    let [Action::PostToWorker(message)] = actions.as_slice() else {
        panic!("expected one worker post, got {actions:?}");
    };
    let response = ExportWorker::default().handle_message(message.clone());
    handle_event(state, &Event::WorkerResponse(response.clone())).unwrap();
    (message.clone(), response)
}

#[test]
fn csv_export_writes_the_filtered_rows() {
    let dir = TempDir::new().unwrap();
    let mut state = loaded_in(&dir, EmptyExportPolicy::ExportAll);
    search(&mut state, "ervin");

    let (message, response) = run_export(&mut state, ExportFormat::Csv);

    let WorkerMessage::WriteExport { file_name, .. } = message;
    assert!(file_name.starts_with("users_"));
    assert!(file_name.ends_with(".csv"));

    let written = std::fs::read_to_string(dir.path().join(&file_name)).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(
        lines[1],
        r#"2,"Ervin ""E"" Howell","Shanna@melissa.tv","010-692-6593","Wisokyburgh","Deckow-Crist""#
    );
    assert_eq!(lines.len(), 2);

    let WorkerResponse::ExportWritten { bytes, .. } = response else {
        panic!("export failed: {response:?}");
    };
    assert_eq!(bytes, written.len());
    assert!(state.notice.unwrap().text.starts_with("Exported to "));
}

#[test]
fn empty_result_exports_everything_by_default() {
    let dir = TempDir::new().unwrap();
    let mut state = loaded_in(&dir, EmptyExportPolicy::ExportAll);
    search(&mut state, "zzz");
    assert!(state.store.derived().filtered_users.is_empty());

    let (message, _) = run_export(&mut state, ExportFormat::Json);

    let WorkerMessage::WriteExport { file_name, .. } = message;
    let written = std::fs::read_to_string(dir.path().join(file_name)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    let ids: Vec<u64> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn empty_result_can_export_nothing() {
    let dir = TempDir::new().unwrap();
    let mut state = loaded_in(&dir, EmptyExportPolicy::ExportEmpty);
    search(&mut state, "zzz");

    let (message, _) = run_export(&mut state, ExportFormat::Csv);

    let WorkerMessage::WriteExport { file_name, .. } = message;
    let written = std::fs::read_to_string(dir.path().join(file_name)).unwrap();
    assert_eq!(written, CSV_HEADER);
}

#[test]
fn unwritable_directory_reports_a_failure_notice() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file").unwrap();

    let settings = Settings {
        export_dir: blocker.join("exports").to_string_lossy().into_owned(),
        ..Settings::default()
    };
    let mut state = AppState::new(Theme::default(), settings);
    handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
    let users = decode_response(200, USERS.as_bytes()).unwrap();
    handle_event(&mut state, &Event::UsersFetched(Ok(users))).unwrap();

    let (_, response) = run_export(&mut state, ExportFormat::Csv);

    assert!(matches!(response, WorkerResponse::Error { .. }));
    let notice = state.notice.unwrap();
    assert!(notice.is_error);
    assert!(notice.text.starts_with("Export failed: "));
}

#[test]
fn file_sink_replaces_an_existing_export() {
    let dir = TempDir::new().unwrap();
    let sink = FileSink::new(dir.path().join("nested"));
    let file = |contents: &str| ExportFile {
        file_name: "users_2024-03-09.csv".to_string(),
        contents: contents.to_string(),
    };

    sink.offer(&file("first")).unwrap();
    let path = sink.offer(&file("second")).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("nested"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(leftovers.len(), 1);
}
