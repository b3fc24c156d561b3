//! End-to-end query behaviour driven through the event handler.

use userdeck::app::{Action, AppState, Settings};
use userdeck::query::{LoadStatus, LOAD_FAILED_MESSAGE};
use userdeck::remote::decode_response;
use userdeck::ui::PageState;
use userdeck::{handle_event, Event, LoadError, Theme, UserRecord};

fn user_json(id: u64, name: &str, email: &str, city: &str) -> String {
    format!(
        r#"{{
            "id": {id},
            "name": "{name}",
            "username": "u{id}",
            "email": "{email}",
            "address": {{ "street": "Main St", "suite": "Apt. {id}", "city": "{city}", "zipcode": "1000{id}" }},
            "phone": "555-{id}",
            "website": "site{id}.org",
            "company": {{ "name": "Co {id}", "catchPhrase": "Do things", "bs": "synergize" }}
        }}"#
    )
}

fn users(specs: &[(&str, &str, &str)]) -> Vec<UserRecord> {
    let items: Vec<String> = specs
        .iter()
        .zip(1..)
        .map(|((name, email, city), id)| user_json(id, name, email, city))
        .collect();
    decode_response(200, format!("[{}]", items.join(",")).as_bytes()).unwrap()
}

fn in_cities(cities: &[&str]) -> Vec<UserRecord> {
    let specs: Vec<(String, String, &str)> = cities
        .iter()
        .enumerate()
        .map(|(i, city)| (format!("Person {i}"), format!("p{i}@mail.test"), *city))
        .collect();
    let borrowed: Vec<(&str, &str, &str)> = specs
        .iter()
        .map(|(n, e, c)| (n.as_str(), e.as_str(), *c))
        .collect();
    users(&borrowed)
}

fn session() -> AppState {
    let mut state = AppState::new(Theme::default(), Settings::default());
    let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).unwrap();
    assert!(matches!(actions.as_slice(), [Action::FetchUsers { .. }]));
    state
}

fn loaded(records: Vec<UserRecord>) -> AppState {
    let mut state = session();
    handle_event(&mut state, &Event::UsersFetched(Ok(records))).unwrap();
    state
}

fn type_and_settle(state: &mut AppState, text: &str) {
    handle_event(state, &Event::FocusSearch).unwrap();
    for c in text.chars() {
        handle_event(state, &Event::Char(c)).unwrap();
    }
    for _ in text.chars() {
        handle_event(state, &Event::DebounceElapsed).unwrap();
    }
    handle_event(state, &Event::BlurSearch).unwrap();
}

#[test]
fn city_filter_narrows_to_one_page() {
    let mut state = loaded(in_cities(&["A", "A", "B", "B", "B", "C", "C"]));

    assert_eq!(state.store.derived().distinct_cities, vec!["A", "B", "C"]);

    handle_event(&mut state, &Event::OpenCityPicker).unwrap();
    handle_event(&mut state, &Event::PickerDown).unwrap();
    handle_event(&mut state, &Event::PickerDown).unwrap();
    handle_event(&mut state, &Event::ConfirmCity).unwrap();

    let view = state.store.derived();
    assert_eq!(state.store.city_filter(), "B");
    assert_eq!(view.filtered_users.len(), 3);
    assert_eq!(view.page_count, 1);
}

#[test]
fn last_page_holds_the_remainder() {
    let mut state = loaded(in_cities(&["X"; 12]));
    assert_eq!(state.store.derived().page_count, 3);

    handle_event(&mut state, &Event::GoToPage(3)).unwrap();

    let view = state.store.derived();
    assert_eq!(view.paged_users.len(), 2);
    assert_eq!(view.paged_users[0].id, 11);

    let vm = state.compute_viewmodel(30, 120);
    let pager = vm.pager.unwrap();
    assert_eq!(pager.summary, "Showing page 3 of 3 • 12 users");
    assert!(pager.has_previous);
    assert!(!pager.has_next);
}

#[test]
fn search_matches_name_or_email_ignoring_case() {
    let mut state = loaded(users(&[
        ("John Smith", "smith@x.com", "Oslo"),
        ("Ann Lee", "a.john@x.com", "Oslo"),
        ("Bob Stone", "bob@x.com", "Oslo"),
    ]));

    type_and_settle(&mut state, "JOHN");

    let ids: Vec<u64> = state.store.derived().filtered_users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 2]);

    let vm = state.compute_viewmodel(30, 120);
    assert_eq!(vm.display_items[0].name_highlights, vec![(0, 4)]);
    assert_eq!(vm.display_items[1].email_highlights, vec![(2, 6)]);
}

#[test]
fn failed_load_leaves_an_empty_store() {
    let mut state = session();
    handle_event(&mut state, &Event::UsersFetched(Err(LoadError::Status(503)))).unwrap();

    assert_eq!(
        state.store.status(),
        &LoadStatus::Failed(LOAD_FAILED_MESSAGE.to_string())
    );
    assert_eq!(state.store.error_message(), Some(LOAD_FAILED_MESSAGE));
    assert!(state.store.raw_users().is_empty());
    assert!(state.store.derived().distinct_cities.is_empty());

    let vm = state.compute_viewmodel(30, 120);
    assert_eq!(vm.state, PageState::Failed);
    assert_eq!(vm.empty_state.unwrap().hint.as_deref(), Some("r: reload"));
}

#[test]
fn undecodable_body_fails_the_load() {
    let outcome = decode_response(200, b"{\"not\": \"a list\"}");
    assert!(matches!(outcome, Err(LoadError::Decode(_))));

    let mut state = session();
    handle_event(&mut state, &Event::UsersFetched(outcome)).unwrap();
    assert!(matches!(state.store.status(), LoadStatus::Failed(_)));
}

#[test]
fn no_matches_recovers_with_clear_filters() {
    let mut state = loaded(in_cities(&["A", "B"]));
    type_and_settle(&mut state, "nobody");

    let vm = state.compute_viewmodel(30, 120);
    assert_eq!(vm.state, PageState::NoMatches);
    assert_eq!(vm.empty_state.unwrap().message, "No users found");

    handle_event(&mut state, &Event::ClearFilters).unwrap();
    assert_eq!(state.compute_viewmodel(30, 120).state, PageState::Normal);
    assert_eq!(state.search.draft(), "");
}

#[test]
fn search_commit_returns_to_first_page() {
    let mut state = loaded(in_cities(&["A"; 12]));
    handle_event(&mut state, &Event::NextPage).unwrap();
    assert_eq!(state.store.page(), 2);

    type_and_settle(&mut state, "person");
    assert_eq!(state.store.page(), 1);
}

#[test]
fn reload_restarts_the_session() {
    let mut state = session();
    handle_event(&mut state, &Event::UsersFetched(Err(LoadError::Status(500)))).unwrap();

    let (_, actions) = handle_event(&mut state, &Event::Reload).unwrap();
    assert!(matches!(actions.as_slice(), [Action::FetchUsers { .. }]));
    assert_eq!(state.compute_viewmodel(30, 120).state, PageState::Loading);

    handle_event(&mut state, &Event::UsersFetched(Ok(in_cities(&["A", "B", "C"])))).unwrap();
    assert_eq!(state.store.raw_users().len(), 3);
    assert_eq!(state.compute_viewmodel(30, 120).state, PageState::Normal);
}
