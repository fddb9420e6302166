use std::sync::Arc;

use runtime::{
    FileStore, HomeView, InMemoryStore, Origin, Refresh, RuntimeError, StorageError,
};
use tournament_core::keys;
use tournament_core::{Metric, Role, Tournament, TournamentStatus, User, UserPatch};

fn seeded(entries: &[(&str, &str)]) -> Origin {
    Origin::new(Arc::new(InMemoryStore::with_entries(entries.iter().copied())))
}

/// Home page counters for two stored tournaments, compared against the
/// fixed last-month baseline.
#[test]
fn test_home_counters_scenario() {
    let origin = seeded(&[(
        keys::TOURNAMENTS,
        r#"[{"id":1,"status":"active","players":10},{"id":2,"status":"upcoming","players":5}]"#,
    )]);
    let home = origin.open_tab().views().home();

    assert_eq!(home.counters.total, 2);
    assert_eq!(home.counters.active, 1);
    assert_eq!(home.counters.upcoming, 1);
    assert_eq!(home.counters.completed, 0);
    assert_eq!(home.counters.total_players, 15);

    let rendered: Vec<(Metric, String)> = home
        .deltas
        .iter()
        .map(|delta| (delta.metric, delta.to_string()))
        .collect();
    assert_eq!(
        rendered,
        [
            (Metric::Total, "-8 from last month".to_string()),
            (Metric::Active, "-1 from last month".to_string()),
            (Metric::Upcoming, "-1 from last month".to_string()),
        ]
    );

    assert_eq!(home.featured.len(), 2);
    assert_eq!(home.featured[0].description, "Tournament");
}

#[test]
fn test_counters_are_idempotent() {
    let origin = seeded(&[(
        keys::TOURNAMENTS,
        r#"[{"id":1,"status":"completed","players":"many"},{"id":2,"status":"Paused"}]"#,
    )]);
    let views = origin.open_tab().views();

    let first = views.counters();
    assert_eq!(first, views.counters());
    assert_eq!(first.total, 2);
    assert_eq!(first.completed, 1);
    assert_eq!(first.total_players, 0);
}

/// Persisting the same collection twice yields the same counters, and the
/// second write does not wake other tabs.
#[test]
fn test_persisting_same_collection_twice() {
    let origin = Origin::in_memory();
    let writer = origin.open_tab();
    let reader = origin.open_tab();
    let mut home = reader.watch(HomeView::interest()).expect("watch home");

    let collection = [
        Tournament::new(1, "Club Open")
            .with_status(TournamentStatus::Active)
            .with_players(12),
        Tournament::new(2, "Junior Rapid")
            .with_status(TournamentStatus::Upcoming)
            .with_players(8),
        Tournament::new(3, "Winter Classic").with_status(TournamentStatus::Completed),
    ];

    writer
        .tournaments()
        .replace_all(&collection)
        .expect("first write should persist");
    let first = reader.views().counters();
    assert_eq!(
        home.poll().expect("poll after first write"),
        [Refresh::KeyChanged(keys::TOURNAMENTS.to_string())]
    );

    writer
        .tournaments()
        .replace_all(&collection)
        .expect("second write should persist");
    let second = reader.views().counters();

    assert_eq!(first, second);
    assert_eq!(second.total, 3);
    assert_eq!(second.total_players, 20);
    assert!(home.poll().expect("poll after second write").is_empty());
}

/// Participation via `registrations_<id>`: the registered email sees the
/// tournament, any other email sees nothing.
#[test]
fn test_participation_scenario() {
    let origin = seeded(&[
        (keys::USER_DATA, r#"{"email":"a@x.com"}"#),
        (keys::TOURNAMENTS, r#"[{"id":7,"name":"Weekend Blitz"}]"#),
        ("registrations_7", r#"[{"email":"a@x.com"}]"#),
    ]);
    let tab = origin.open_tab();

    let participating = tab.views().profile().participating;
    assert_eq!(participating.len(), 1);
    assert_eq!(participating[0].name.as_deref(), Some("Weekend Blitz"));

    tab.users()
        .write(UserPatch {
            email: Some("b@x.com".into()),
            ..UserPatch::default()
        })
        .expect("profile should persist");
    assert!(tab.views().profile().participating.is_empty());
}

#[test]
fn test_unparsable_tournaments_read_as_empty() {
    let origin = seeded(&[(keys::TOURNAMENTS, "not json at all")]);
    let tab = origin.open_tab();

    assert!(tab.tournaments().list().is_empty());
    let home = tab.views().home();
    assert_eq!(home.counters.total, 0);
    assert!(home.featured.is_empty());
}

/// Nothing stored at all: every read yields its documented default.
#[test]
fn test_empty_state() {
    let tab = Origin::in_memory().open_tab();

    assert_eq!(tab.users().read(), User::default());
    assert!(tab.tournaments().list().is_empty());
    assert!(tab.views().profile().owned.is_empty());
    assert_eq!(tab.views().profile().initials, "DU");
    assert_eq!(tab.views().dashboard().role, None);
    assert!(!tab.session().is_authenticated());
}

/// Writing a partial profile keeps every field the patch does not name.
#[test]
fn test_shallow_merge() {
    let tab = Origin::in_memory().open_tab();
    let users = tab.users();

    users
        .write(UserPatch {
            first_name: Some("Koneru".into()),
            last_name: Some("Humpy".into()),
            fide_id: Some("5008123".into()),
            ..UserPatch::default()
        })
        .expect("first write");
    users
        .write(UserPatch {
            bio: Some("Rapid specialist".into()),
            role: Some(Role::Arbiter),
            ..UserPatch::default()
        })
        .expect("second write");

    let user = users.read();
    assert_eq!(user.first_name, "Koneru");
    assert_eq!(user.fide_id, "5008123");
    assert_eq!(user.bio, "Rapid specialist");
    assert_eq!(user.country, "India");
    assert_eq!(tab.views().dashboard().role, Some(Role::Arbiter));
}

#[test]
fn test_ownership_by_identifier_with_name_fallback() {
    let origin = seeded(&[
        (
            keys::USER_DATA,
            r#"{"firstName":"Anna","lastName":"Admin","email":"anna@club.org"}"#,
        ),
        (
            keys::TOURNAMENTS,
            r#"[
                {"id":1,"organizerName":"Anna Admin","organizerEmail":"anna@club.org"},
                {"id":2,"organizerName":"Anna Admin","organizerEmail":"impostor@club.org"},
                {"id":3,"organizerName":"Anna Admin"},
                {"id":4,"organizerName":"Someone Else"}
            ]"#,
        ),
    ]);

    let owned = origin.open_tab().views().profile().owned;
    let ids: Vec<String> = owned
        .iter()
        .filter_map(|t| t.id.as_ref().map(ToString::to_string))
        .collect();
    assert_eq!(ids, ["1", "3"]);
}

#[test]
fn test_quota_write_failure_is_surfaced() {
    let origin = Origin::new(Arc::new(InMemoryStore::with_quota(64)));
    let tab = origin.open_tab();

    let err = tab
        .users()
        .write(UserPatch {
            bio: Some("x".repeat(128)),
            ..UserPatch::default()
        })
        .expect_err("write beyond quota must fail");
    assert!(matches!(err, StorageError::QuotaExceeded { .. }));
    assert!(!tab.users().exists());

    let err = tab
        .session()
        .sign_in(&User::default(), "demo-token")
        .expect_err("profile does not fit");
    assert!(err.is_write_failure());
    assert!(matches!(err, RuntimeError::Storage(_)));
    assert!(!tab.session().is_authenticated());
}

#[test]
fn test_file_store_survives_reopen() {
    let dir = tempfile::tempdir().expect("temp dir");

    {
        let origin = Origin::new(Arc::new(FileStore::new(dir.path()).expect("file store")));
        let tab = origin.open_tab();
        tab.tournaments()
            .replace_all(&[tournament_core::Tournament::new(9, "Monsoon Open")
                .with_status(TournamentStatus::Upcoming)])
            .expect("persist tournaments");
        tab.session()
            .sign_in(&User::default(), "demo-token")
            .expect("sign in");
    }

    let origin = Origin::new(Arc::new(FileStore::new(dir.path()).expect("reopen")));
    let tab = origin.open_tab();
    assert_eq!(tab.views().home().counters.upcoming, 1);
    assert!(tab.session().is_authenticated());
    assert_eq!(tab.session().role(), Some(Role::Player));
}
