//! Composition root.
//!
//! [`AppContext`] builds every adapter once from [`ClientSettings`] and hands
//! out `Arc` handles. Screen controllers are created per screen through the
//! factory methods so each one gets its own form state.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::config::{ClientSettings, ConfigError, Platform};
use crate::domain::ports::{
    BarCatalogue, ConfirmationPresenter, EventQuery, Favorites, MenuCommand, Navigator, Reviews,
    SessionIdentity, TokenStore, UserProfiles,
};
use crate::domain::{AuthSessionService, BarId, Route};
use crate::inbound::ui::{
    AccessGuard, AccessRequirement, AddMenuItemController, LoginForm, RegisterForm, ReviewEditor,
};
use crate::outbound::http::{
    ApiClient, HttpAuthApi, HttpBarCatalogue, HttpEventQuery, HttpFavorites, HttpMenuCommand,
    HttpReviews, HttpUserProfiles,
};
use crate::outbound::presenter::{AlertBridge, ModalPresenter, NativeAlertPresenter};
use crate::outbound::token_store::FileTokenStore;

/// Session manager as wired by the composition root.
pub type ClientSession = AuthSessionService<HttpAuthApi, dyn TokenStore>;

/// Failure while wiring the client.
#[derive(Debug, Error)]
pub enum AppError {
    /// A setting is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
    /// Native shells must provide an alert bridge.
    #[error("native platform requires an alert bridge")]
    MissingAlertBridge,
}

/// Long-lived client handles.
pub struct AppContext {
    api: Arc<ApiClient>,
    tokens: Arc<dyn TokenStore>,
    session: Arc<ClientSession>,
    bars: Arc<dyn BarCatalogue>,
    menus: Arc<dyn MenuCommand>,
    reviews: Arc<dyn Reviews>,
    events: Arc<dyn EventQuery>,
    users: Arc<dyn UserProfiles>,
    favorites: Arc<dyn Favorites>,
    presenter: Arc<dyn ConfirmationPresenter>,
    modal: Option<Arc<ModalPresenter>>,
}

impl AppContext {
    /// Wire the client with the token persisted under the configured
    /// directory.
    ///
    /// `alert_bridge` is required on native platforms and ignored on the web.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] when settings are invalid, the HTTP client cannot
    /// be built, or a native shell provides no alert bridge.
    pub fn new(
        settings: &ClientSettings,
        alert_bridge: Option<Arc<dyn AlertBridge>>,
    ) -> Result<Self, AppError> {
        let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(settings.token_dir()));
        Self::with_token_store(settings, tokens, alert_bridge)
    }

    /// Wire the client around an existing token store.
    ///
    /// # Errors
    ///
    /// See [`AppContext::new`].
    pub fn with_token_store(
        settings: &ClientSettings,
        tokens: Arc<dyn TokenStore>,
        alert_bridge: Option<Arc<dyn AlertBridge>>,
    ) -> Result<Self, AppError> {
        let platform = settings.platform()?;
        let (presenter, modal) = match platform {
            Platform::Web => {
                let modal = Arc::new(ModalPresenter::new());
                let presenter: Arc<dyn ConfirmationPresenter> = modal.clone();
                (presenter, Some(modal))
            }
            Platform::Native => {
                let bridge = alert_bridge.ok_or(AppError::MissingAlertBridge)?;
                let presenter: Arc<dyn ConfirmationPresenter> =
                    Arc::new(NativeAlertPresenter::new(bridge));
                (presenter, None)
            }
        };

        let base_url = settings.api_base_url()?;
        let api = Arc::new(ApiClient::new(
            base_url,
            settings.request_timeout()?,
            Arc::clone(&tokens),
        )?);
        let session: Arc<ClientSession> = Arc::new(AuthSessionService::new(
            Arc::new(HttpAuthApi::new(Arc::clone(&api))),
            Arc::clone(&tokens),
        ));
        let identity: Arc<dyn SessionIdentity> = session.clone();

        info!(base_url = %api.base_url(), ?platform, "client wired");
        Ok(Self {
            bars: Arc::new(HttpBarCatalogue::new(Arc::clone(&api), Arc::clone(&identity))),
            menus: Arc::new(HttpMenuCommand::new(Arc::clone(&api), Arc::clone(&identity))),
            reviews: Arc::new(HttpReviews::new(Arc::clone(&api), Arc::clone(&identity))),
            events: Arc::new(HttpEventQuery::new(Arc::clone(&api))),
            users: Arc::new(HttpUserProfiles::new(Arc::clone(&api), Arc::clone(&identity))),
            favorites: Arc::new(HttpFavorites::new(Arc::clone(&api), identity)),
            api,
            tokens,
            session,
            presenter,
            modal,
        })
    }

    /// Shared REST transport.
    pub fn api(&self) -> Arc<ApiClient> {
        Arc::clone(&self.api)
    }

    /// Token persistence.
    pub fn token_store(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.tokens)
    }

    /// Session manager. Call [`AuthSessionService::initialize`] once at
    /// startup.
    pub fn session(&self) -> Arc<ClientSession> {
        Arc::clone(&self.session)
    }

    /// Bar listing and detail reads.
    pub fn bars(&self) -> Arc<dyn BarCatalogue> {
        Arc::clone(&self.bars)
    }

    /// Menu management.
    pub fn menus(&self) -> Arc<dyn MenuCommand> {
        Arc::clone(&self.menus)
    }

    /// Review reads and writes.
    pub fn reviews(&self) -> Arc<dyn Reviews> {
        Arc::clone(&self.reviews)
    }

    /// Event reads.
    pub fn events(&self) -> Arc<dyn EventQuery> {
        Arc::clone(&self.events)
    }

    /// Public profiles.
    pub fn users(&self) -> Arc<dyn UserProfiles> {
        Arc::clone(&self.users)
    }

    /// Favorite bars of the signed-in user.
    pub fn favorites(&self) -> Arc<dyn Favorites> {
        Arc::clone(&self.favorites)
    }

    /// Presenter chosen for the platform.
    pub fn presenter(&self) -> Arc<dyn ConfirmationPresenter> {
        Arc::clone(&self.presenter)
    }

    /// Modal state source; present on the web platform only.
    pub fn modal(&self) -> Option<Arc<ModalPresenter>> {
        self.modal.clone()
    }

    /// Controller for the "add menu item" screen of `bar`.
    pub fn add_menu_item(&self, bar: BarId, navigator: Arc<dyn Navigator>) -> AddMenuItemController {
        AddMenuItemController::new(bar, self.menus(), self.presenter(), navigator)
    }

    /// Controller for the review editor of `bar`.
    pub fn review_editor(&self, bar: BarId, navigator: Arc<dyn Navigator>) -> ReviewEditor {
        ReviewEditor::new(bar, self.reviews(), self.presenter(), navigator)
    }

    /// Sign-in form leading to `destination`.
    pub fn login_form(
        &self,
        navigator: Arc<dyn Navigator>,
        destination: Route,
    ) -> LoginForm<HttpAuthApi, dyn TokenStore> {
        LoginForm::new(self.session(), navigator, destination)
    }

    /// Registration form leading to `destination`.
    pub fn register_form(
        &self,
        navigator: Arc<dyn Navigator>,
        destination: Route,
    ) -> RegisterForm<HttpAuthApi, dyn TokenStore> {
        RegisterForm::new(self.session(), navigator, destination)
    }

    /// Guard for a screen with `requirement`.
    pub fn access_guard(
        &self,
        requirement: AccessRequirement,
        navigator: Arc<dyn Navigator>,
    ) -> AccessGuard {
        AccessGuard::new(self.session.subscribe(), requirement, navigator)
    }
}
