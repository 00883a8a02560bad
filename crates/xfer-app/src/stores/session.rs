//! Current user, the global loading flag and the campus-account flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};
use xfer_core::ports::{AccountPort, GatewayResult};
use xfer_core::user::NewUser;
use xfer_core::{User, ValidationError};

use crate::error_channel::ErrorChannel;
use crate::sequence::{FetchOutcome, RequestSequence, Ticket};

/// Result of looking a submitter up by email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    Found,
    /// No account yet; the email is kept as a partial user for registration.
    NotFound,
    Stale,
    Failed,
}

/// Session/identity store.
/// 会话与身份存储。
pub struct SessionStore {
    user: RwLock<Option<User>>,
    loading: AtomicBool,
    is_uva: AtomicBool,
    accounts: Arc<dyn AccountPort>,
    errors: Arc<ErrorChannel>,
    account_seq: RequestSequence,
}

impl SessionStore {
    pub fn new(accounts: Arc<dyn AccountPort>, errors: Arc<ErrorChannel>) -> Self {
        Self {
            user: RwLock::new(None),
            loading: AtomicBool::new(false),
            is_uva: AtomicBool::new(false),
            accounts,
            errors,
            account_seq: RequestSequence::new(),
        }
    }

    pub async fn set_user(&self, raw: User) {
        let user = raw.normalized();
        debug!(email = %user.email, authenticated = user.authenticated, "user set");
        *self.user.write().await = Some(user);
    }

    pub async fn set_user_email(&self, email: impl Into<String>) {
        *self.user.write().await = Some(User::email_only(email));
    }

    pub async fn clear_user(&self) {
        *self.user.write().await = None;
        debug!("user cleared");
    }

    pub async fn current_user(&self) -> Option<User> {
        self.user.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.user
            .read()
            .await
            .as_ref()
            .is_some_and(|user| user.authenticated)
    }

    /// Empty when nobody is signed in.
    pub async fn login_name(&self) -> String {
        self.user
            .read()
            .await
            .as_ref()
            .map(User::login_name)
            .unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn set_loading(&self, loading: bool) {
        self.loading.store(loading, Ordering::SeqCst);
    }

    /// Whether the submitter signed in with a university account.
    pub fn is_uva(&self) -> bool {
        self.is_uva.load(Ordering::SeqCst)
    }

    pub fn set_uva(&self, is_uva: bool) {
        self.is_uva.store(is_uva, Ordering::SeqCst);
    }

    #[tracing::instrument(name = "store.session.lookup_user", skip(self))]
    pub async fn lookup_user(&self, email: &str) -> LookupOutcome {
        let ticket = self.account_seq.issue();
        self.set_loading(true);
        let result = self.accounts.lookup_user(email).await;
        if !self.account_seq.is_latest(ticket) {
            return LookupOutcome::Stale;
        }
        self.set_loading(false);

        match result {
            Ok(user) => {
                self.set_user(user).await;
                LookupOutcome::Found
            }
            Err(err) if err.is_not_found() => {
                info!("no account for email, keeping it for registration");
                self.set_user_email(email).await;
                LookupOutcome::NotFound
            }
            Err(err) => {
                self.errors
                    .raise(err.user_message("Internal Error: Unable to look up user"))
                    .await;
                LookupOutcome::Failed
            }
        }
    }

    #[tracing::instrument(name = "store.session.register_user", skip_all)]
    pub async fn register_user(&self, form: NewUser) -> Result<FetchOutcome, ValidationError> {
        let form = form.validated()?;
        let ticket = self.account_seq.issue();
        self.set_loading(true);
        let result = self.accounts.register_user(&form).await;
        Ok(self.apply_account(ticket, result, "Internal Error: Unable to register user").await)
    }

    #[tracing::instrument(name = "store.session.verify_user", skip_all)]
    pub async fn verify_user(&self, token: &str) -> Result<FetchOutcome, ValidationError> {
        if token.trim().is_empty() {
            return Err(ValidationError::MissingField("token"));
        }
        let ticket = self.account_seq.issue();
        self.set_loading(true);
        let result = self.accounts.verify_user(token.trim()).await;
        Ok(self.apply_account(ticket, result, "Internal Error: Unable to verify user").await)
    }

    /// Ask the server to mail the verification link for `token` again.
    /// The stored user is left alone.
    #[tracing::instrument(name = "store.session.resend_verification", skip_all)]
    pub async fn resend_verification(&self, token: &str) -> Result<FetchOutcome, ValidationError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ValidationError::MissingField("token"));
        }
        self.set_loading(true);
        let result = self.accounts.resend_verification(token).await;
        self.set_loading(false);
        match result {
            Ok(()) => {
                info!("verification email resent");
                Ok(FetchOutcome::Applied)
            }
            Err(err) => {
                self.errors
                    .raise(err.user_message("Internal Error: Unable to resend verification email"))
                    .await;
                Ok(FetchOutcome::Failed)
            }
        }
    }

    async fn apply_account(
        &self,
        ticket: Ticket,
        result: GatewayResult<User>,
        fallback: &str,
    ) -> FetchOutcome {
        if !self.account_seq.is_latest(ticket) {
            return FetchOutcome::Stale;
        }
        self.set_loading(false);
        match result {
            Ok(user) => {
                self.set_user(user).await;
                FetchOutcome::Applied
            }
            Err(err) => {
                self.errors.raise(err.user_message(fallback)).await;
                FetchOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;
    use xfer_core::ports::GatewayError;

    struct FakeAccounts {
        lookup: GatewayResult<User>,
        resent: std::sync::Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AccountPort for FakeAccounts {
        async fn lookup_user(&self, _email: &str) -> GatewayResult<User> {
            self.lookup.clone()
        }

        async fn register_user(&self, user: &NewUser) -> GatewayResult<User> {
            Ok(User {
                first_name: user.first_name.clone(),
                email: user.email.clone(),
                ..User::default()
            })
        }

        async fn verify_user(&self, _token: &str) -> GatewayResult<User> {
            Err(GatewayError::ServerError {
                status: 400,
                body: "token expired".into(),
            })
        }

        async fn resend_verification(&self, token: &str) -> GatewayResult<()> {
            if token == "unknown" {
                return Err(GatewayError::ServerError {
                    status: 404,
                    body: String::new(),
                });
            }
            self.resent.lock().unwrap().push(token.to_string());
            Ok(())
        }
    }

    fn store(lookup: GatewayResult<User>) -> (SessionStore, Arc<ErrorChannel>) {
        let (store, errors, _) = store_with_accounts(lookup);
        (store, errors)
    }

    fn store_with_accounts(
        lookup: GatewayResult<User>,
    ) -> (SessionStore, Arc<ErrorChannel>, Arc<FakeAccounts>) {
        let errors = Arc::new(ErrorChannel::new(Duration::from_secs(10)));
        let accounts = Arc::new(FakeAccounts {
            lookup,
            resent: std::sync::Mutex::new(Vec::new()),
        });
        let store = SessionStore::new(accounts.clone(), errors.clone());
        (store, errors, accounts)
    }

    #[tokio::test]
    async fn set_user_normalizes_placeholders() {
        let (store, _) = store(Ok(User::default()));
        store
            .set_user(User {
                first_name: "Ada".into(),
                email: "ada@virginia.edu".into(),
                title: "Head+Archivist".into(),
                affiliation: "Special+Collections".into(),
                authenticated: true,
                ..User::default()
            })
            .await;

        let user = store.current_user().await.unwrap();
        assert_eq!(user.title, "Head Archivist");
        assert_eq!(user.affiliation, "Special Collections");
        assert!(store.is_authenticated().await);
        assert_eq!(store.login_name().await, "Ada (ada@virginia.edu)");
    }

    #[tokio::test]
    async fn partial_user_is_not_authenticated() {
        let (store, _) = store(Ok(User::default()));
        store.set_user_email("lou@virginia.edu").await;

        assert!(!store.is_authenticated().await);
        assert_eq!(store.current_user().await.unwrap().email, "lou@virginia.edu");

        store.clear_user().await;
        assert!(store.current_user().await.is_none());
        assert_eq!(store.login_name().await, "");
    }

    #[tokio::test]
    async fn lookup_not_found_keeps_email() {
        let (store, errors) = store(Err(GatewayError::ServerError {
            status: 404,
            body: "not found".into(),
        }));

        let outcome = store.lookup_user("new@virginia.edu").await;

        assert_eq!(outcome, LookupOutcome::NotFound);
        assert_eq!(store.current_user().await.unwrap().email, "new@virginia.edu");
        assert!(errors.message().is_none());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn lookup_failure_raises_error() {
        let (store, errors) = store(Err(GatewayError::Unreachable("refused".into())));

        assert_eq!(store.lookup_user("x@y.z").await, LookupOutcome::Failed);
        assert_eq!(
            errors.message().as_deref(),
            Some("Internal Error: Unable to look up user")
        );
        assert!(store.current_user().await.is_none());
    }

    #[tokio::test]
    async fn register_rejects_incomplete_form_before_calling_out() {
        let (store, _) = store(Ok(User::default()));
        let err = store.register_user(NewUser::default()).await.unwrap_err();
        assert!(matches!(err, ValidationError::MissingField(_)));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn verify_failure_uses_server_body() {
        let (store, errors) = store(Ok(User::default()));
        let outcome = store.verify_user("abc").await.unwrap();
        assert_eq!(outcome, FetchOutcome::Failed);
        assert_eq!(errors.message().as_deref(), Some("token expired"));
    }

    #[tokio::test]
    async fn resend_verification_keeps_the_user() {
        let (store, errors, accounts) = store_with_accounts(Ok(User::default()));
        store.set_user_email("lou@virginia.edu").await;

        let outcome = store.resend_verification(" abc123 ").await.unwrap();

        assert_eq!(outcome, FetchOutcome::Applied);
        assert_eq!(accounts.resent.lock().unwrap().as_slice(), ["abc123"]);
        assert_eq!(store.current_user().await.unwrap().email, "lou@virginia.edu");
        assert!(errors.message().is_none());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn resend_verification_needs_a_token_and_reports_failures() {
        let (store, errors) = store(Ok(User::default()));
        assert_eq!(
            store.resend_verification("  ").await,
            Err(ValidationError::MissingField("token"))
        );

        let outcome = store.resend_verification("unknown").await.unwrap();

        assert_eq!(outcome, FetchOutcome::Failed);
        assert_eq!(
            errors.message().as_deref(),
            Some("Internal Error: Unable to resend verification email")
        );
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn uva_flag_is_independent_of_the_user() {
        let (store, _) = store(Ok(User::default()));
        assert!(!store.is_uva());
        store.set_uva(true);
        store.clear_user().await;
        assert!(store.is_uva());
        store.set_uva(false);
        assert!(!store.is_uva());
    }
}
