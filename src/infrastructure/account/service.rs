//! Account service for registration, login and profile management

use std::sync::Arc;

use crate::domain::account::{
    is_valid_email, is_valid_handle, is_valid_password, Account, AccountId, AccountRepository,
    OutcomeCode, ServiceOutcome,
};
use crate::domain::error::StorageError;

use super::digest::{CredentialDigester, Sha256Digester};
use super::repository::InMemoryAccountRepository;

/// Account service for registration, login and profile management
///
/// Stateless across calls: it holds nothing but the repository and digester
/// handles, so any number of operations may run concurrently. Uniqueness of
/// email and handle is only as strong as the repository's own constraints; a
/// lost check-then-insert race comes back from `insert` as a constraint
/// error and resolves to the system-exception outcome.
#[derive(Debug)]
pub struct AccountService<R: AccountRepository, D: CredentialDigester> {
    repository: Arc<R>,
    digester: Arc<D>,
}

impl AccountService<InMemoryAccountRepository, Sha256Digester> {
    /// Create a service wired to the bundled in-memory repository and
    /// SHA-256 digester
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(Sha256Digester::new()),
        )
    }
}

impl<R: AccountRepository, D: CredentialDigester> AccountService<R, D> {
    /// Create a new account service
    pub fn new(repository: Arc<R>, digester: Arc<D>) -> Self {
        Self {
            repository,
            digester,
        }
    }

    /// Validate registration input before an account is created
    ///
    /// Checks run in a fixed order and the first failure wins: email format,
    /// then email uniqueness, then password format. Any client-supplied id
    /// is stripped before anything else happens.
    pub async fn check_register(&self, mut account: Account) -> ServiceOutcome<Account> {
        account.clear_id();

        let email = match account.email() {
            Some(email) if is_valid_email(email) => email.to_string(),
            _ => return ServiceOutcome::error(OutcomeCode::EmailFormatIncorrect, account),
        };

        match self.repository.find_by_email(&email).await {
            Ok(Some(_)) => return ServiceOutcome::error(OutcomeCode::EmailAlreadyUsed, account),
            Ok(None) => {}
            Err(error) => return storage_failure("check_register", &error, account),
        }

        if !account.password().is_some_and(is_valid_password) {
            return ServiceOutcome::error(OutcomeCode::InvalidPassword, account);
        }

        ServiceOutcome::success(OutcomeCode::RegisterInfoValid, account)
    }

    /// Digest the password in place and create the account row
    ///
    /// On success the echoed account carries no credential at all; on
    /// failure it carries the digest, never the plaintext.
    pub async fn insert_account(&self, mut account: Account) -> ServiceOutcome<Account> {
        let Some(plaintext) = account.password().map(str::to_string) else {
            return ServiceOutcome::error(OutcomeCode::InvalidPassword, account);
        };

        account.set_password(self.digester.digest(&plaintext));

        match self.repository.insert(&account).await {
            Ok(1) => {
                account.clear_password();
                ServiceOutcome::success(OutcomeCode::RegisterSuccess, account)
            }
            Ok(_) => ServiceOutcome::error(OutcomeCode::SystemException, account),
            Err(error) => storage_failure("insert_account", &error, account),
        }
    }

    /// Check a login attempt against the stored credential
    ///
    /// On success the persisted id is copied onto the echoed account,
    /// establishing the authenticated identity.
    pub async fn verify_credentials(&self, mut account: Account) -> ServiceOutcome<Account> {
        let stored = match account.email().map(str::to_string) {
            Some(email) => match self.repository.find_by_email(&email).await {
                Ok(stored) => stored,
                Err(error) => return storage_failure("verify_credentials", &error, account),
            },
            None => None,
        };

        let Some(stored) = stored else {
            return ServiceOutcome::error(OutcomeCode::AccountNotFound, account);
        };

        let verified = account
            .password()
            .zip(stored.password())
            .is_some_and(|(attempt, digest)| self.digester.matches(attempt, digest));

        if !verified {
            return ServiceOutcome::error(OutcomeCode::PasswordIncorrect, account);
        }

        match stored.id() {
            Some(id) => {
                account.set_id(id);
                ServiceOutcome::success(OutcomeCode::LoginSuccess, account)
            }
            None => {
                tracing::error!(
                    email = %stored.email().unwrap_or_default(),
                    "stored account has no id"
                );
                ServiceOutcome::error(OutcomeCode::SystemException, account)
            }
        }
    }

    /// Check whether a handle is well-formed and unclaimed
    pub async fn check_handle_availability(&self, handle: &str) -> ServiceOutcome<String> {
        if !is_valid_handle(handle) {
            return ServiceOutcome::error(OutcomeCode::HandleInvalid, handle.to_string());
        }

        match self.repository.find_by_handle(handle).await {
            Ok(Some(_)) => ServiceOutcome::error(OutcomeCode::HandleUsed, handle.to_string()),
            Ok(None) => ServiceOutcome::success(OutcomeCode::HandleValid, handle.to_string()),
            Err(error) => storage_failure("check_handle_availability", &error, handle.to_string()),
        }
    }

    /// Fetch the profile for an account id
    ///
    /// The returned profile never carries the stored credential digest.
    pub async fn get_profile(&self, id: AccountId) -> ServiceOutcome<Option<Account>> {
        match self.repository.find_by_id(id).await {
            Ok(Some(mut account)) => {
                account.clear_password();
                ServiceOutcome::success(OutcomeCode::GetInfoSuccess, Some(account))
            }
            Ok(None) => ServiceOutcome::error(OutcomeCode::NoUserInfo, None),
            Err(error) => storage_failure("get_profile", &error, None),
        }
    }

    /// Persist profile changes for an existing account
    ///
    /// Credentials and the login email can never travel through this path:
    /// both are stripped from the input before storage sees it, and the
    /// stripped object is what gets echoed back on every outcome.
    pub async fn update_profile(&self, mut account: Account) -> ServiceOutcome<Account> {
        account.clear_password();
        account.clear_email();

        match self.repository.update(&account).await {
            Ok(1) => ServiceOutcome::success(OutcomeCode::UpdateInfoSuccess, account),
            Ok(_) => ServiceOutcome::error(OutcomeCode::UpdateUserFailed, account),
            Err(error) => storage_failure("update_profile", &error, account),
        }
    }
}

/// Collapse a storage failure into the generic system-exception outcome
///
/// The failure itself goes to the log; callers only ever see the code.
fn storage_failure<T>(operation: &str, error: &StorageError, payload: T) -> ServiceOutcome<T> {
    tracing::error!(operation, error = %error, "account storage failure");
    ServiceOutcome::error(OutcomeCode::SystemException, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::MockAccountRepository;
    use crate::domain::account::OutcomeStatus;

    fn create_service() -> AccountService<InMemoryAccountRepository, Sha256Digester> {
        AccountService::in_memory()
    }

    fn mocked_service() -> (
        AccountService<MockAccountRepository, Sha256Digester>,
        Arc<MockAccountRepository>,
    ) {
        let repository = Arc::new(MockAccountRepository::new());
        let service = AccountService::new(repository.clone(), Arc::new(Sha256Digester::new()));
        (service, repository)
    }

    fn registration(email: &str, password: &str) -> Account {
        Account::new(email, password)
    }

    /// Register an account and log in once to learn its storage id
    async fn register(
        service: &AccountService<InMemoryAccountRepository, Sha256Digester>,
        email: &str,
        password: &str,
    ) -> AccountId {
        let inserted = service.insert_account(registration(email, password)).await;
        assert!(inserted.is_success());

        let verified = service.verify_credentials(registration(email, password)).await;
        assert!(verified.is_success());

        verified.payload().id().unwrap()
    }

    // register-check tests

    #[tokio::test]
    async fn test_check_register_accepts_fresh_account() {
        let service = create_service();

        let outcome = service
            .check_register(registration("freddy@banter.chat", "secret_99"))
            .await;

        assert!(outcome.is_success());
        assert_eq!(outcome.code(), OutcomeCode::RegisterInfoValid);
        assert_eq!(outcome.payload().email(), Some("freddy@banter.chat"));
    }

    #[tokio::test]
    async fn test_check_register_strips_client_supplied_id() {
        let service = create_service();

        let input = registration("freddy@banter.chat", "secret_99").with_id(AccountId::new(404));

        let outcome = service.check_register(input).await;

        assert!(outcome.is_success());
        assert!(outcome.payload().id().is_none());
    }

    #[tokio::test]
    async fn test_check_register_rejects_malformed_email() {
        let service = create_service();

        let outcome = service.check_register(registration("bad", "secret_99")).await;

        assert!(outcome.is_error());
        assert_eq!(outcome.code(), OutcomeCode::EmailFormatIncorrect);
    }

    #[tokio::test]
    async fn test_check_register_rejects_missing_email() {
        let service = create_service();

        let mut input = registration("freddy@banter.chat", "secret_99");
        input.clear_email();

        let outcome = service.check_register(input).await;

        assert!(outcome.is_error());
        assert_eq!(outcome.code(), OutcomeCode::EmailFormatIncorrect);
    }

    #[tokio::test]
    async fn test_check_register_rejects_taken_email() {
        let service = create_service();

        service
            .insert_account(registration("freddy@banter.chat", "secret_99"))
            .await;

        let outcome = service
            .check_register(registration("freddy@banter.chat", "other_99"))
            .await;

        assert!(outcome.is_error());
        assert_eq!(outcome.code(), OutcomeCode::EmailAlreadyUsed);
    }

    #[tokio::test]
    async fn test_check_register_rejects_short_password() {
        let service = create_service();

        let outcome = service
            .check_register(registration("freddy@banter.chat", "ab"))
            .await;

        assert!(outcome.is_error());
        assert_eq!(outcome.code(), OutcomeCode::InvalidPassword);
    }

    #[tokio::test]
    async fn test_check_register_email_checks_win_over_password() {
        let service = create_service();

        service
            .insert_account(registration("freddy@banter.chat", "secret_99"))
            .await;

        // Both the email and the password are unacceptable; the email
        // condition is the one reported.
        let taken = service
            .check_register(registration("freddy@banter.chat", "ab"))
            .await;
        assert_eq!(taken.code(), OutcomeCode::EmailAlreadyUsed);

        let malformed = service.check_register(registration("bad", "ab")).await;
        assert_eq!(malformed.code(), OutcomeCode::EmailFormatIncorrect);
    }

    // insert-account tests

    #[tokio::test]
    async fn test_insert_account_clears_password_on_success() {
        let service = create_service();

        let outcome = service
            .insert_account(registration("freddy@banter.chat", "secret_99"))
            .await;

        assert!(outcome.is_success());
        assert_eq!(outcome.code(), OutcomeCode::RegisterSuccess);
        assert!(outcome.payload().password().is_none());
    }

    #[tokio::test]
    async fn test_insert_account_stores_digest_not_plaintext() {
        let repository = Arc::new(InMemoryAccountRepository::new());
        let digester = Arc::new(Sha256Digester::new());
        let service = AccountService::new(repository.clone(), digester.clone());

        service
            .insert_account(registration("freddy@banter.chat", "secret_99"))
            .await;

        let stored = repository
            .find_by_email("freddy@banter.chat")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(stored.password(), Some(digester.digest("secret_99").as_str()));
    }

    #[tokio::test]
    async fn test_insert_account_without_password() {
        let service = create_service();

        let mut input = registration("freddy@banter.chat", "secret_99");
        input.clear_password();

        let outcome = service.insert_account(input).await;

        assert!(outcome.is_error());
        assert_eq!(outcome.code(), OutcomeCode::InvalidPassword);
    }

    #[tokio::test]
    async fn test_insert_account_duplicate_email_collapses_to_system_exception() {
        let service = create_service();

        service
            .insert_account(registration("freddy@banter.chat", "secret_99"))
            .await;

        // A second insert models the lost race where both callers passed
        // the register check before either row existed.
        let outcome = service
            .insert_account(registration("freddy@banter.chat", "other_99"))
            .await;

        assert!(outcome.is_error());
        assert_eq!(outcome.code(), OutcomeCode::SystemException);
    }

    #[tokio::test]
    async fn test_insert_account_failure_echo_keeps_digest_not_plaintext() {
        let service = create_service();

        service
            .insert_account(registration("freddy@banter.chat", "secret_99"))
            .await;

        let outcome = service
            .insert_account(registration("freddy@banter.chat", "other_99"))
            .await;

        let echoed = outcome.payload().password();
        assert!(echoed.is_some());
        assert_ne!(echoed, Some("other_99"));
        assert!(echoed.unwrap().starts_with("sha256$"));
    }

    // verify-credentials tests

    #[tokio::test]
    async fn test_verify_credentials_unknown_email() {
        let service = create_service();

        let outcome = service
            .verify_credentials(registration("nobody@banter.chat", "secret_99"))
            .await;

        assert!(outcome.is_error());
        assert_eq!(outcome.code(), OutcomeCode::AccountNotFound);
    }

    #[tokio::test]
    async fn test_verify_credentials_missing_email() {
        let service = create_service();

        let mut input = registration("freddy@banter.chat", "secret_99");
        input.clear_email();

        let outcome = service.verify_credentials(input).await;

        assert!(outcome.is_error());
        assert_eq!(outcome.code(), OutcomeCode::AccountNotFound);
    }

    #[tokio::test]
    async fn test_verify_credentials_wrong_password() {
        let service = create_service();

        service
            .insert_account(registration("freddy@banter.chat", "secret_99"))
            .await;

        let outcome = service
            .verify_credentials(registration("freddy@banter.chat", "wrong_99"))
            .await;

        assert!(outcome.is_error());
        assert_eq!(outcome.code(), OutcomeCode::PasswordIncorrect);
    }

    #[tokio::test]
    async fn test_verify_credentials_missing_password() {
        let service = create_service();

        service
            .insert_account(registration("freddy@banter.chat", "secret_99"))
            .await;

        let mut input = registration("freddy@banter.chat", "secret_99");
        input.clear_password();

        let outcome = service.verify_credentials(input).await;

        assert!(outcome.is_error());
        assert_eq!(outcome.code(), OutcomeCode::PasswordIncorrect);
    }

    #[tokio::test]
    async fn test_verify_credentials_success_populates_id() {
        let service = create_service();

        service
            .insert_account(registration("freddy@banter.chat", "secret_99"))
            .await;

        let outcome = service
            .verify_credentials(registration("freddy@banter.chat", "secret_99"))
            .await;

        assert!(outcome.is_success());
        assert_eq!(outcome.code(), OutcomeCode::LoginSuccess);
        assert!(outcome.payload().id().is_some());
        assert_eq!(outcome.payload().email(), Some("freddy@banter.chat"));
    }

    // check-handle-availability tests

    #[tokio::test]
    async fn test_check_handle_availability_rejects_malformed_handle() {
        let service = create_service();

        let outcome = service.check_handle_availability("no").await;

        assert!(outcome.is_error());
        assert_eq!(outcome.code(), OutcomeCode::HandleInvalid);
        assert_eq!(outcome.payload(), "no");
    }

    #[tokio::test]
    async fn test_check_handle_availability_reports_taken_handle() {
        let service = create_service();

        let claimed = registration("freddy@banter.chat", "secret_99").with_handle("freddy_01");
        service.insert_account(claimed).await;

        let outcome = service.check_handle_availability("freddy_01").await;

        assert!(outcome.is_error());
        assert_eq!(outcome.code(), OutcomeCode::HandleUsed);
    }

    #[tokio::test]
    async fn test_check_handle_availability_accepts_free_handle() {
        let service = create_service();

        let outcome = service.check_handle_availability("freddy_01").await;

        assert!(outcome.is_success());
        assert_eq!(outcome.code(), OutcomeCode::HandleValid);
        assert_eq!(outcome.payload(), "freddy_01");
    }

    // get-profile tests

    #[tokio::test]
    async fn test_get_profile_unknown_id() {
        let service = create_service();

        let outcome = service.get_profile(AccountId::new(404)).await;

        assert!(outcome.is_error());
        assert_eq!(outcome.code(), OutcomeCode::NoUserInfo);
        assert!(outcome.payload().is_none());
    }

    #[tokio::test]
    async fn test_get_profile_returns_profile_without_credential() {
        let service = create_service();
        let id = register(&service, "freddy@banter.chat", "secret_99").await;

        let outcome = service.get_profile(id).await;

        assert!(outcome.is_success());
        assert_eq!(outcome.code(), OutcomeCode::GetInfoSuccess);

        let profile = outcome.payload().as_ref().unwrap();
        assert_eq!(profile.id(), Some(id));
        assert_eq!(profile.email(), Some("freddy@banter.chat"));
        assert!(profile.password().is_none());
        assert!(profile.created_at().is_some());
    }

    // update-profile tests

    #[tokio::test]
    async fn test_update_profile_success() {
        let service = create_service();
        let id = register(&service, "freddy@banter.chat", "secret_99").await;

        let input = Account::default()
            .with_id(id)
            .with_display_name("Freddy")
            .with_signature("hello there");

        let outcome = service.update_profile(input).await;

        assert!(outcome.is_success());
        assert_eq!(outcome.code(), OutcomeCode::UpdateInfoSuccess);

        let profile = service.get_profile(id).await;
        let profile = profile.payload().as_ref().unwrap();
        assert_eq!(profile.display_name(), Some("Freddy"));
        assert_eq!(profile.signature(), Some("hello there"));
    }

    #[tokio::test]
    async fn test_update_profile_without_id_fails_with_update_user_failed() {
        let service = create_service();

        let outcome = service
            .update_profile(Account::default().with_display_name("Freddy"))
            .await;

        assert!(outcome.is_error());
        assert_eq!(outcome.code(), OutcomeCode::UpdateUserFailed);
    }

    #[tokio::test]
    async fn test_update_profile_strips_password_and_email_even_on_failure() {
        let service = create_service();

        let input = Account::new("freddy@banter.chat", "secret_99").with_display_name("Freddy");

        let outcome = service.update_profile(input).await;

        assert!(outcome.is_error());
        assert!(outcome.payload().password().is_none());
        assert!(outcome.payload().email().is_none());
    }

    #[tokio::test]
    async fn test_update_profile_cannot_change_login_identity() {
        let service = create_service();
        let id = register(&service, "freddy@banter.chat", "secret_99").await;

        let input = Account::new("evil@banter.chat", "stolen_99")
            .with_id(id)
            .with_display_name("Freddy");

        let outcome = service.update_profile(input).await;
        assert!(outcome.is_success());

        // The original credentials still authenticate, and the original
        // email still identifies the account.
        let verified = service
            .verify_credentials(registration("freddy@banter.chat", "secret_99"))
            .await;
        assert!(verified.is_success());
        assert_eq!(verified.payload().id(), Some(id));

        let moved = service
            .verify_credentials(registration("evil@banter.chat", "stolen_99"))
            .await;
        assert_eq!(moved.code(), OutcomeCode::AccountNotFound);
    }

    // storage failure tests

    #[tokio::test]
    async fn test_check_register_storage_failure() {
        let (service, repository) = mocked_service();
        repository.set_should_fail(true).await;

        let outcome = service
            .check_register(registration("freddy@banter.chat", "secret_99"))
            .await;

        assert_eq!(outcome.status(), OutcomeStatus::Error);
        assert_eq!(outcome.code(), OutcomeCode::SystemException);
    }

    #[tokio::test]
    async fn test_insert_account_storage_failure() {
        let (service, repository) = mocked_service();
        repository.set_should_fail(true).await;

        let outcome = service
            .insert_account(registration("freddy@banter.chat", "secret_99"))
            .await;

        assert_eq!(outcome.code(), OutcomeCode::SystemException);
    }

    #[tokio::test]
    async fn test_verify_credentials_storage_failure() {
        let (service, repository) = mocked_service();
        repository.set_should_fail(true).await;

        let outcome = service
            .verify_credentials(registration("freddy@banter.chat", "secret_99"))
            .await;

        assert_eq!(outcome.code(), OutcomeCode::SystemException);
    }

    #[tokio::test]
    async fn test_check_handle_availability_storage_failure() {
        let (service, repository) = mocked_service();
        repository.set_should_fail(true).await;

        let outcome = service.check_handle_availability("freddy_01").await;

        assert_eq!(outcome.code(), OutcomeCode::SystemException);
    }

    #[tokio::test]
    async fn test_get_profile_storage_failure() {
        let (service, repository) = mocked_service();
        repository.set_should_fail(true).await;

        let outcome = service.get_profile(AccountId::new(1)).await;

        assert_eq!(outcome.code(), OutcomeCode::SystemException);
        assert!(outcome.payload().is_none());
    }

    #[tokio::test]
    async fn test_update_profile_storage_failure() {
        let (service, repository) = mocked_service();
        repository.set_should_fail(true).await;

        let outcome = service
            .update_profile(Account::default().with_id(AccountId::new(1)))
            .await;

        assert_eq!(outcome.code(), OutcomeCode::SystemException);
    }
}
