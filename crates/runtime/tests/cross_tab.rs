use std::time::Duration;

use runtime::{DashboardView, HomeView, Interest, Origin, ProfileView, Refresh, Signal};
use tournament_core::keys;
use tournament_core::{
    Registration, Role, Tournament, TournamentId, TournamentStatus, User, UserPatch,
};

/// Two tabs of one origin: writes in one tab reach the other tab's
/// watchers, never the writer's own.
#[test]
fn test_cross_tab_isolation() {
    let origin = Origin::in_memory();
    let writer = origin.open_tab();
    let reader = origin.open_tab();

    let mut own = writer.watch(HomeView::interest()).expect("watch writer");
    let mut other = reader.watch(HomeView::interest()).expect("watch reader");

    writer
        .tournaments()
        .replace_all(&[Tournament::new(1, "Club Open").with_status(TournamentStatus::Active)])
        .expect("tournaments should persist");

    assert!(own.poll().expect("poll writer").is_empty());
    assert_eq!(
        other.poll().expect("poll reader"),
        [Refresh::KeyChanged(keys::TOURNAMENTS.to_string())]
    );

    // The reader sees the write on its next fresh read.
    assert_eq!(reader.views().home().counters.active, 1);
}

/// Keys outside a watcher's interest never wake it.
#[test]
fn test_interest_filtering() {
    let origin = Origin::in_memory();
    let writer = origin.open_tab();
    let reader = origin.open_tab();

    let mut dashboard = reader
        .watch(DashboardView::interest())
        .expect("watch dashboard");
    let mut profile = reader.watch(ProfileView::interest()).expect("watch profile");

    writer
        .registrations()
        .register(&TournamentId::Number(7), Registration::new("a@x.com"))
        .expect("registration should persist");

    assert!(!dashboard.needs_refresh().expect("poll dashboard"));
    assert_eq!(
        profile.poll().expect("poll profile"),
        [Refresh::KeyChanged("registrations_7".to_string())]
    );
}

/// Signing out raises `authChange` in the same tab; listeners re-read and
/// observe the logged-out state. Other tabs learn through the removed keys.
#[test]
fn test_same_tab_sign_out_propagation() {
    let origin = Origin::in_memory();
    let tab = origin.open_tab();
    let other = origin.open_tab();

    let profile = User {
        first_name: "Arjun".into(),
        last_name: "Rao".into(),
        email: "arjun@club.org".into(),
        ..User::default()
    };
    tab.session().sign_in(&profile, "demo-token").expect("sign in");

    let mut home = tab.watch(HomeView::interest()).expect("watch home");
    let mut elsewhere = other.watch(HomeView::interest()).expect("watch other");
    assert!(tab.views().home().logged_in);

    tab.session().sign_out().expect("sign out");

    assert_eq!(
        home.poll().expect("poll home"),
        [Refresh::Signal(Signal::AuthChanged)]
    );
    assert!(!tab.views().home().logged_in);

    assert_eq!(
        elsewhere.poll().expect("poll other"),
        [Refresh::KeyChanged(keys::AUTH_TOKEN.to_string())]
    );
    assert!(!other.views().home().logged_in);

    // The profile record outlives the session.
    assert_eq!(tab.users().read().email, "arjun@club.org");
}

/// Clearing every session key by hand and raising `authChange` brings all
/// of the tab's watchers to the logged-out state.
#[test]
fn test_clearing_session_keys_by_hand() {
    let origin = Origin::in_memory();
    let tab = origin.open_tab();

    let profile = User {
        email: "arjun@club.org".into(),
        role: Role::Arbiter,
        ..User::default()
    };
    tab.session().sign_in(&profile, "demo-token").expect("sign in");

    let mut home = tab.watch(HomeView::interest()).expect("watch home");
    let mut profile_page = tab.watch(ProfileView::interest()).expect("watch profile");
    let mut dashboard = tab.watch(DashboardView::interest()).expect("watch dashboard");

    let storage = tab.storage();
    for key in [keys::USER_DATA, keys::AUTH_TOKEN, keys::ROLE] {
        assert!(storage.remove(key).expect("remove"), "{key} was stored");
    }
    storage.raise(Signal::AuthChanged).expect("tab is open");

    for watcher in [&mut home, &mut profile_page, &mut dashboard] {
        assert_eq!(
            watcher.poll().expect("poll"),
            [Refresh::Signal(Signal::AuthChanged)]
        );
    }

    let views = tab.views();
    assert!(!views.home().logged_in);
    assert_eq!(
        views.dashboard(),
        DashboardView {
            role: None,
            authenticated: false,
        }
    );
    assert_eq!(views.profile().user, User::default());
}

/// A signal raised right after a write is observed after the write is
/// re-readable.
#[test]
fn test_signal_follows_durable_write() {
    let origin = Origin::in_memory();
    let tab = origin.open_tab();
    let mut watcher = tab.watch(ProfileView::interest()).expect("watch profile");

    tab.users()
        .write(UserPatch {
            first_name: Some("Mira".into()),
            ..UserPatch::default()
        })
        .expect("profile should persist");
    tab.storage()
        .raise(Signal::AuthChanged)
        .expect("tab is open");

    assert_eq!(
        watcher.poll().expect("poll"),
        [Refresh::Signal(Signal::AuthChanged)]
    );
    assert_eq!(tab.views().profile().user.first_name, "Mira");
}

#[test]
fn test_lagging_watcher_reconciles() {
    let origin = Origin::in_memory().with_bus(runtime::ChangeBus::with_capacity(2));
    let writer = origin.open_tab();
    let reader = origin.open_tab();
    let mut watcher = reader.watch(HomeView::interest()).expect("watch");

    for id in 1..=5 {
        writer
            .tournaments()
            .append(Tournament::new(id, format!("Open {id}")))
            .expect("append");
    }

    let refreshes = watcher.poll().expect("poll");
    assert_eq!(refreshes.first(), Some(&Refresh::Missed));
    assert_eq!(reader.views().home().counters.total, 5);
}

#[tokio::test]
async fn test_next_waits_for_relevant_change() {
    let origin = Origin::in_memory();
    let writer = origin.open_tab();
    let reader = origin.open_tab();
    let mut watcher = reader.watch(HomeView::interest()).expect("watch");

    let storage = writer.storage().clone();
    let tournaments = writer.tournaments();
    let task = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        storage.set_text("theme", "dark").expect("unrelated write");
        tournaments
            .replace_all(&[Tournament::new(3, "Rapid")])
            .expect("tournaments should persist");
    });

    let refresh = tokio::time::timeout(Duration::from_secs(1), watcher.next())
        .await
        .expect("notification should arrive")
        .expect("bus open");
    assert_eq!(refresh, Refresh::KeyChanged(keys::TOURNAMENTS.to_string()));

    task.await.expect("writer task");
}

#[tokio::test]
async fn test_focus_wakes_waiting_watcher() {
    let origin = Origin::in_memory();
    let tab = origin.open_tab();
    let mut watcher = tab.watch(Interest::new()).expect("watch");

    tab.focus().expect("tab is open");

    let refresh = tokio::time::timeout(Duration::from_secs(1), watcher.next())
        .await
        .expect("signal should arrive")
        .expect("bus open");
    assert_eq!(refresh, Refresh::Signal(Signal::FocusRegained));
}
