//! Behaviour tests for the authentication session lifecycle.
//!
//! These scenarios drive a fully wired client against a mock API: startup
//! with a stored token, logout with a failing server, and overlapping form
//! submits.

use std::cell::RefCell;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use client::domain::ports::{ConfirmationPrompt, Navigator, Notice, TokenStore};
use client::domain::{AuthToken, BarId, MenuItem, MenuItemInput, MenuItemType, Route};
use client::inbound::ui::SubmitOutcome;
use client::outbound::presenter::AlertBridge;
use client::outbound::token_store::MemoryTokenStore;
use client::{AppContext, ClientSettings};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MENU_PATH: &str = "/api/bars/b-1/menu";

struct AcceptingBridge;

impl AlertBridge for AcceptingBridge {
    fn show_notice(&self, _notice: &Notice) {}

    fn ask(&self, _prompt: &ConfirmationPrompt) -> bool {
        true
    }
}

#[derive(Default)]
struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().expect("routes lock").push(route);
    }
}

// The runtime is declared last so it outlives everything dropped before it.
struct SessionWorld {
    server: MockServer,
    tokens: Arc<MemoryTokenStore>,
    app: AppContext,
    navigator: Arc<RecordingNavigator>,
    outcomes: RefCell<Vec<SubmitOutcome<MenuItem>>>,
    runtime: Runtime,
}

impl SessionWorld {
    fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("tokio runtime");
        let server = runtime.block_on(MockServer::start());
        let tokens = Arc::new(MemoryTokenStore::default());
        let settings = ClientSettings {
            api_base_url: Some(format!("{}/api/", server.uri())),
            request_timeout_secs: Some(5),
            token_dir: None,
            platform: Some("native".to_owned()),
            json_logs: false,
        };
        let store: Arc<dyn TokenStore> = tokens.clone();
        let app = AppContext::with_token_store(&settings, store, Some(Arc::new(AcceptingBridge)))
            .expect("context wires");
        Self {
            server,
            tokens,
            app,
            navigator: Arc::new(RecordingNavigator::default()),
            outcomes: RefCell::new(Vec::new()),
            runtime,
        }
    }

    fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    fn stored_token(&self) -> Option<AuthToken> {
        self.runtime
            .block_on(self.tokens.get())
            .expect("memory store readable")
    }

    fn menu_requests(&self) -> usize {
        self.runtime
            .block_on(self.server.received_requests())
            .expect("recording enabled")
            .iter()
            .filter(|request| request.url.path() == MENU_PATH)
            .count()
    }
}

#[fixture]
fn world() -> SessionWorld {
    SessionWorld::new()
}

#[given("the stored token is {token}")]
fn the_stored_token_is(world: &SessionWorld, token: String) {
    let token = AuthToken::new(token).expect("non-blank token");
    world
        .runtime
        .block_on(world.tokens.save(&token))
        .expect("memory store writable");
}

#[given("the server rejects token validation")]
fn the_server_rejects_token_validation(world: &SessionWorld) {
    world.mount(
        Mock::given(method("GET"))
            .and(path("/api/auth/validate"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid token"})),
            ),
    );
}

#[given("the server is down for maintenance")]
fn the_server_is_down_for_maintenance(world: &SessionWorld) {
    world.mount(
        Mock::given(method("GET"))
            .and(path("/api/auth/validate"))
            .respond_with(
                ResponseTemplate::new(503)
                    .set_body_json(json!({"message": "Down for maintenance"})),
            ),
    );
}

#[given("the server accepts the token for a business account")]
fn the_server_accepts_the_token_for_a_business_account(world: &SessionWorld) {
    world.mount(
        Mock::given(method("GET"))
            .and(path("/api/auth/validate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": {
                    "_id": "u-200",
                    "email": "owner@example.com",
                    "username": "owner",
                    "accountType": "business"
                }
            }))),
    );
}

#[given("the server fails logout")]
fn the_server_fails_logout(world: &SessionWorld) {
    world.mount(
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .respond_with(ResponseTemplate::new(500)),
    );
}

#[given("the server adds menu items slowly")]
fn the_server_adds_menu_items_slowly(world: &SessionWorld) {
    world.mount(
        Mock::given(method("POST"))
            .and(path(MENU_PATH))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_delay(Duration::from_millis(200))
                    .set_body_json(json!({
                        "_id": "m-1",
                        "bar": "b-1",
                        "name": "Spritz",
                        "price": 8.0,
                        "type": "alcohol",
                        "alcoholPercentage": 11.0
                    })),
            ),
    );
}

#[when("the client starts")]
fn the_client_starts(world: &SessionWorld) {
    world.runtime.block_on(world.app.session().initialize());
}

#[when("the user logs out")]
fn the_user_logs_out(world: &SessionWorld) {
    world.runtime.block_on(world.app.session().logout());
}

#[when("the user submits the add-menu-item form twice")]
fn the_user_submits_the_add_menu_item_form_twice(world: &SessionWorld) {
    let navigator: Arc<dyn Navigator> = world.navigator.clone();
    let controller = world
        .app
        .add_menu_item(BarId::new("b-1").expect("bar id"), navigator);
    let input = MenuItemInput {
        name: "Spritz".to_owned(),
        price: "8".to_owned(),
        item_type: MenuItemType::Alcohol,
        alcohol_percentage: "11".to_owned(),
        ..MenuItemInput::default()
    };
    let (first, second) = world
        .runtime
        .block_on(async { tokio::join!(controller.submit(&input), controller.submit(&input)) });
    world.outcomes.borrow_mut().extend([first, second]);
}

#[then("the session is signed out without an error")]
fn the_session_is_signed_out_without_an_error(world: &SessionWorld) {
    let session = world.app.session().session();
    assert!(!session.is_authenticated());
    assert!(!session.is_loading());
    assert_eq!(session.error(), None);
}

#[then("the session shows the error {message}")]
fn the_session_shows_the_error(world: &SessionWorld, message: String) {
    let session = world.app.session().session();
    assert!(!session.is_authenticated());
    assert_eq!(session.error(), Some(message.as_str()));
}

#[then("no token is stored")]
fn no_token_is_stored(world: &SessionWorld) {
    assert!(world.stored_token().is_none());
}

#[then("a token is still stored")]
fn a_token_is_still_stored(world: &SessionWorld) {
    assert!(world.stored_token().is_some());
}

#[then("exactly one menu request reaches the server")]
fn exactly_one_menu_request_reaches_the_server(world: &SessionWorld) {
    assert_eq!(world.menu_requests(), 1);
    let outcomes = world.outcomes.borrow();
    assert_eq!(outcomes.iter().filter(|outcome| outcome.is_success()).count(), 1);
    assert!(
        outcomes
            .iter()
            .any(|outcome| matches!(outcome, SubmitOutcome::Ignored))
    );
}

#[then("the screen navigates back once")]
fn the_screen_navigates_back_once(world: &SessionWorld) {
    let routes = world.navigator.routes.lock().expect("routes lock");
    assert_eq!(routes.as_slice(), [Route::Back]);
}

#[scenario(
    path = "tests/features/auth_session.feature",
    name = "Stored token rejected at startup"
)]
fn stored_token_rejected_at_startup(world: SessionWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/auth_session.feature",
    name = "Server unavailable while validating the stored token"
)]
fn server_unavailable_while_validating_the_stored_token(world: SessionWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/auth_session.feature",
    name = "Logout clears the session when the server fails"
)]
fn logout_clears_the_session_when_the_server_fails(world: SessionWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/auth_session.feature",
    name = "Rapid double submit of a menu item"
)]
fn rapid_double_submit_of_a_menu_item(world: SessionWorld) {
    drop(world);
}
