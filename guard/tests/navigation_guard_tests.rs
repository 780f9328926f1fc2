use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::test;

use guard::decision::{Access, Decision};
use guard::engine::NavigationGuard;
use guard::routes::RouteTable;
use guard::types::{LOGIN_PATH, Notifier};
use session::manager::SessionManager;
use session::model::Role;
use session::store::{CredentialStore, PROFILE_KEY, TOKEN_KEY};

use mock_store::{InMemoryCredentialStore, StubAuthService, sample_credentials, sample_profile};

type Guard = NavigationGuard<InMemoryCredentialStore>;

fn empty_guard() -> (Arc<InMemoryCredentialStore>, Guard) {
    common::logger::init_logger("guard-tests");

    let store = Arc::new(InMemoryCredentialStore::default());
    let manager = Arc::new(SessionManager::new(
        store.clone(),
        Arc::new(StubAuthService::rejecting()),
    ));
    (store, NavigationGuard::new(manager))
}

/// Store pre-populated as if a previous page load had logged in.
async fn seeded_guard(role: Role) -> (Arc<InMemoryCredentialStore>, Guard) {
    common::logger::init_logger("guard-tests");

    let store = Arc::new(InMemoryCredentialStore::default());
    store.set(TOKEN_KEY, "tok").await.unwrap();

    let raw = serde_json::to_string(&sample_profile(role)).unwrap();
    store.set(PROFILE_KEY, &raw).await.unwrap();

    let manager = Arc::new(SessionManager::new(
        store.clone(),
        Arc::new(StubAuthService::rejecting()),
    ));
    (store, NavigationGuard::new(manager))
}

#[test]
async fn guard_hydrates_persisted_state_before_deciding() -> anyhow::Result<()> {
    // The manager never saw an explicit init(); the guard must hydrate
    // on its own before evaluating.
    let (_store, guard) = seeded_guard(Role::Teacher).await;
    let table = RouteTable::attendance_app();

    let decision = guard.authorize(&table.resolve("/teacher"), LOGIN_PATH).await?;

    assert_eq!(decision, Decision::Proceed);

    Ok(())
}

#[test]
async fn unauthenticated_navigation_is_sent_to_login() -> anyhow::Result<()> {
    let (_store, guard) = empty_guard();
    let table = RouteTable::attendance_app();

    let decision = guard.authorize(&table.resolve("/admin/users"), "/").await?;

    assert_eq!(decision, Decision::RedirectTo("/login".into()));

    Ok(())
}

#[test]
async fn wrong_role_is_sent_to_own_role_home() -> anyhow::Result<()> {
    let (_store, guard) = seeded_guard(Role::Teacher).await;
    let table = RouteTable::attendance_app();

    let decision = guard.authorize(&table.resolve("/admin"), "/teacher").await?;

    assert_eq!(decision, Decision::RedirectTo("/teacher".into()));

    Ok(())
}

#[test]
async fn authenticated_session_skips_the_login_page() -> anyhow::Result<()> {
    let (_store, guard) = seeded_guard(Role::Admin).await;
    let table = RouteTable::attendance_app();

    let decision = guard.authorize(&table.resolve(LOGIN_PATH), "/admin").await?;

    assert_eq!(decision, Decision::RedirectTo("/admin".into()));

    Ok(())
}

#[test]
async fn corrupt_persisted_profile_redirects_to_login_and_heals() -> anyhow::Result<()> {
    let (store, guard) = empty_guard();
    store.set(TOKEN_KEY, "abc").await?;
    store.set(PROFILE_KEY, "garbage }{").await?;

    let table = RouteTable::attendance_app();
    let decision = guard.authorize(&table.resolve("/teacher/records"), "/").await?;

    assert_eq!(decision, Decision::RedirectTo("/login".into()));

    // Hydration self-healed: both persisted entries are gone
    let map = store.map.lock().await;
    assert!(!map.contains_key(TOKEN_KEY));
    assert!(!map.contains_key(PROFILE_KEY));

    Ok(())
}

#[test]
async fn logout_invalidates_the_next_navigation() -> anyhow::Result<()> {
    let store = Arc::new(InMemoryCredentialStore::default());
    let manager = Arc::new(SessionManager::new(
        store.clone(),
        Arc::new(StubAuthService::accepting("tok", sample_profile(Role::Student))),
    ));
    let guard = NavigationGuard::new(manager.clone());
    let table = RouteTable::attendance_app();

    manager.login(&sample_credentials()).await?;
    assert_eq!(
        guard.authorize(&table.resolve("/student/signin"), "/").await?,
        Decision::Proceed
    );

    manager.logout().await;
    assert_eq!(
        guard.authorize(&table.resolve("/student/signin"), "/student").await?,
        Decision::RedirectTo("/login".into())
    );

    Ok(())
}

#[test]
async fn denial_redirect_targets_pass_their_own_check() -> anyhow::Result<()> {
    let (_store, guard) = seeded_guard(Role::Teacher).await;
    let table = RouteTable::attendance_app();

    let first = guard.authorize(&table.resolve("/admin"), "/").await?;
    let Decision::RedirectTo(target) = first else {
        panic!("expected a redirect, got {first:?}");
    };

    // Following the redirect must terminate
    let second = guard.authorize(&table.resolve(&target), "/admin").await?;
    assert_eq!(second, Decision::Proceed);

    Ok(())
}

#[derive(Default)]
struct RecordingNotifier {
    messages: Mutex<Vec<&'static str>>,
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn login_required(&self) {
        self.messages.lock().await.push("please log in");
    }

    async fn insufficient_role(&self) {
        self.messages.lock().await.push("insufficient permission");
    }
}

/// What the routing layer does with the guard: evaluate, notify on
/// denial, apply the decision.
async fn route_with_notify(
    guard: &Guard,
    table: &RouteTable,
    path: &str,
    current: &str,
    notifier: &dyn Notifier,
) -> anyhow::Result<Decision> {
    let access = guard.evaluate(&table.resolve(path), current).await?;

    match &access {
        Access::LoginRequired => notifier.login_required().await,
        Access::RoleDenied { .. } => notifier.insufficient_role().await,
        Access::Granted | Access::AlreadyAuthenticated { .. } => {}
    }

    Ok(access.into_decision())
}

#[test]
async fn notifier_receives_denial_reasons_but_not_grants() -> anyhow::Result<()> {
    let table = RouteTable::attendance_app();
    let notifier = RecordingNotifier::default();

    let (_store, guard) = empty_guard();
    route_with_notify(&guard, &table, "/admin", "/", &notifier).await?;

    let (_store, guard) = seeded_guard(Role::Student).await;
    route_with_notify(&guard, &table, "/teacher", "/student", &notifier).await?;
    route_with_notify(&guard, &table, "/student/history", "/student", &notifier).await?;

    assert_eq!(
        *notifier.messages.lock().await,
        vec!["please log in", "insufficient permission"]
    );

    Ok(())
}
