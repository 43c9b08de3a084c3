//! Recording in-memory `Backend` for controller and route tests.

use std::sync::Mutex;

use time::OffsetDateTime;
use uuid::Uuid;

use super::{AuthUser, Backend, BackendError, Session, SignUpRequest, TransactionRequest, UserProfile};

pub const ACCESS_TOKEN: &str = "access-test";
pub const REFRESH_TOKEN: &str = "refresh-test";

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    RefreshSession(String),
    GetUser(String),
    SignUp(SignUpRequest),
    SignIn { email: String },
    SignOut(String),
    ResetPassword { email: String, redirect_to: String },
    VerifyRecovery(String),
    UpdatePassword(String),
    SelectProfile(Uuid),
    InsertTransaction(TransactionRequest),
}

/// Scripted responses. Each field is the outcome of the matching call.
pub struct MockBackend {
    pub user: Mutex<Result<Option<AuthUser>, BackendError>>,
    pub profile: Mutex<Result<UserProfile, BackendError>>,
    pub refresh: Mutex<Result<Session, BackendError>>,
    pub sign_up: Mutex<Result<Option<Session>, BackendError>>,
    pub sign_in: Mutex<Result<Session, BackendError>>,
    pub sign_out: Mutex<Result<(), BackendError>>,
    pub reset: Mutex<Result<(), BackendError>>,
    pub verify: Mutex<Result<Session, BackendError>>,
    pub update_password: Mutex<Result<(), BackendError>>,
    pub insert: Mutex<Result<(), BackendError>>,
    calls: Mutex<Vec<Call>>,
}

#[must_use]
pub fn user_id() -> Uuid {
    Uuid::from_u128(0x6f1c_1c4e_8a51_4b8e_9d0e_3b1f_2a7c_9d10)
}

#[must_use]
pub fn fresh_session() -> Session {
    Session {
        access_token: ACCESS_TOKEN.into(),
        refresh_token: REFRESH_TOKEN.into(),
        expires_at: OffsetDateTime::now_utc().unix_timestamp() + 3600,
    }
}

#[must_use]
pub fn profile(balance: f64) -> UserProfile {
    UserProfile {
        id: user_id(),
        name: "Ada".into(),
        balance,
        created_at: OffsetDateTime::UNIX_EPOCH,
    }
}

impl MockBackend {
    /// A backend where every call succeeds for a signed-in user with an email.
    #[must_use]
    pub fn signed_in() -> Self {
        Self {
            user: Mutex::new(Ok(Some(AuthUser { id: user_id(), email: Some("ada@example.com".into()) }))),
            profile: Mutex::new(Ok(profile(42.5))),
            refresh: Mutex::new(Ok(fresh_session())),
            sign_up: Mutex::new(Ok(Some(fresh_session()))),
            sign_in: Mutex::new(Ok(fresh_session())),
            sign_out: Mutex::new(Ok(())),
            reset: Mutex::new(Ok(())),
            verify: Mutex::new(Ok(fresh_session())),
            update_password: Mutex::new(Ok(())),
            insert: Mutex::new(Ok(())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set<T>(slot: &Mutex<T>, value: T) {
        *slot.lock().unwrap() = value;
    }

    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    #[must_use]
    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl Backend for MockBackend {
    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, BackendError> {
        self.record(Call::RefreshSession(refresh_token.to_owned()));
        self.refresh.lock().unwrap().clone()
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, BackendError> {
        self.record(Call::GetUser(access_token.to_owned()));
        self.user.lock().unwrap().clone()
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<Option<Session>, BackendError> {
        self.record(Call::SignUp(request.clone()));
        self.sign_up.lock().unwrap().clone()
    }

    async fn sign_in_with_password(&self, email: &str, _password: &str) -> Result<Session, BackendError> {
        self.record(Call::SignIn { email: email.to_owned() });
        self.sign_in.lock().unwrap().clone()
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), BackendError> {
        self.record(Call::SignOut(access_token.to_owned()));
        self.sign_out.lock().unwrap().clone()
    }

    async fn reset_password_for_email(&self, email: &str, redirect_to: &str) -> Result<(), BackendError> {
        self.record(Call::ResetPassword { email: email.to_owned(), redirect_to: redirect_to.to_owned() });
        self.reset.lock().unwrap().clone()
    }

    async fn verify_recovery(&self, token_hash: &str) -> Result<Session, BackendError> {
        self.record(Call::VerifyRecovery(token_hash.to_owned()));
        self.verify.lock().unwrap().clone()
    }

    async fn update_password(&self, _access_token: &str, password: &str) -> Result<(), BackendError> {
        self.record(Call::UpdatePassword(password.to_owned()));
        self.update_password.lock().unwrap().clone()
    }

    async fn select_profile(&self, _access_token: &str, user_id: Uuid) -> Result<UserProfile, BackendError> {
        self.record(Call::SelectProfile(user_id));
        self.profile.lock().unwrap().clone()
    }

    async fn insert_transaction_request(
        &self,
        _access_token: &str,
        request: &TransactionRequest,
    ) -> Result<(), BackendError> {
        self.record(Call::InsertTransaction(request.clone()));
        self.insert.lock().unwrap().clone()
    }
}
