mod support;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockall::mock;
use pr_app::{SessionStore, SiweLogin};
use pr_core::auth::{AuthError, AuthState, Role};
use pr_core::ports::{WalletError, WalletPort};
use pr_core::registry::endpoints::fallback;
use serde_json::json;

use support::{example_settings, FixedClock, ScriptedTransport, StaticWallet};

mock! {
    pub Wallet {}

    #[async_trait]
    impl WalletPort for Wallet {
        async fn request_accounts(&self) -> Result<String, WalletError>;
        async fn sign_message(&self, message: &str) -> Result<String, WalletError>;
    }
}

const EXPECTED_MESSAGE: &str = "example.com wants you to sign in with your Ethereum account:\n0xDEAD\n\nURI: https://example.com\nVersion: 1\nChain ID: 11155111\nNonce: abc123\nIssued At: 2024-01-01T00:00:00Z";

fn happy_transport() -> Arc<ScriptedTransport> {
    ScriptedTransport::new()
        .ok("/auth/siwe/start", json!({ "nonce": "abc123" }))
        .ok("/auth/siwe/verify", json!({ "token": "t1", "role": "USER" }))
        .arc()
}

fn login_with(
    wallet: Option<Arc<dyn WalletPort>>,
    transport: Arc<ScriptedTransport>,
    session: Arc<SessionStore>,
) -> SiweLogin {
    SiweLogin::new(wallet, transport, Arc::new(FixedClock), session, example_settings())
}

#[tokio::test]
async fn siwe_login_test_verified_signature_establishes_session() {
    let transport = happy_transport();
    let wallet = StaticWallet::new("0xDEAD", "0xsig");
    let session = SessionStore::new().arc();
    let login = login_with(Some(wallet.clone()), transport.clone(), session.clone());

    let established = login.login().await.expect("login should succeed");

    assert_eq!(established.credential_token, "t1");
    assert_eq!(established.role, Role::User);
    assert_eq!(session.token().await.as_deref(), Some("t1"));
    assert_eq!(
        login.state(),
        AuthState::Authenticated {
            address: "0xDEAD".into(),
            role: Role::User
        }
    );

    assert_eq!(*wallet.signed.lock().unwrap(), vec![EXPECTED_MESSAGE.to_string()]);

    let requests = transport.requests();
    assert_eq!(transport.paths(), vec!["/auth/siwe/start", "/auth/siwe/verify"]);
    assert!(requests.iter().all(|request| request.bearer.is_none()));
    assert_eq!(
        requests[1].body,
        Some(json!({
            "address": "0xDEAD",
            "message": EXPECTED_MESSAGE,
            "signature": "0xsig"
        }))
    );
}

#[tokio::test]
async fn siwe_login_test_missing_wallet_fails_before_any_request() {
    let transport = happy_transport();
    let login = login_with(None, transport.clone(), SessionStore::new().arc());

    let err = login.login().await.unwrap_err();

    assert_eq!(err, AuthError::WalletNotFound);
    assert_eq!(err.to_string(), "wallet not found");
    assert!(matches!(login.state(), AuthState::Failed { .. }));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn siwe_login_test_start_failure_ignores_server_text() {
    let transport = ScriptedTransport::new()
        .status("/auth/siwe/start", 500, "database exploded", "unused")
        .arc();
    let wallet = StaticWallet::new("0xDEAD", "0xsig");
    let login = login_with(Some(wallet.clone()), transport.clone(), SessionStore::new().arc());

    let err = login.login().await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to start SIWE");
    assert!(wallet.signed.lock().unwrap().is_empty());
    assert_eq!(transport.paths(), vec!["/auth/siwe/start"]);
}

#[tokio::test]
async fn siwe_login_test_empty_nonce_is_a_start_failure() {
    let transport = ScriptedTransport::new()
        .ok("/auth/siwe/start", json!({ "nonce": "" }))
        .arc();
    let login = login_with(
        Some(StaticWallet::new("0xDEAD", "0xsig")),
        transport,
        SessionStore::new().arc(),
    );

    assert_eq!(login.login().await.unwrap_err(), AuthError::StartFailed);
}

#[tokio::test]
async fn siwe_login_test_verify_failure_surfaces_body_text() {
    let transport = ScriptedTransport::new()
        .ok("/auth/siwe/start", json!({ "nonce": "abc123" }))
        .status("/auth/siwe/verify", 401, "Invalid signature", fallback::VERIFY_SIGNATURE)
        .arc();
    let session = SessionStore::new().arc();
    let login = login_with(
        Some(StaticWallet::new("0xDEAD", "0xsig")),
        transport,
        session.clone(),
    );

    let err = login.login().await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid signature");
    assert!(!session.is_authenticated().await);
    assert_eq!(login.state().status_text(), "Erro: Invalid signature");
}

#[tokio::test]
async fn siwe_login_test_denied_account_access_never_signs() {
    let mut wallet = MockWallet::new();
    wallet
        .expect_request_accounts()
        .times(1)
        .returning(|| Err(WalletError::Rejected("User rejected the request.".into())));
    wallet.expect_sign_message().never();
    let transport = happy_transport();
    let login = login_with(Some(Arc::new(wallet)), transport.clone(), SessionStore::new().arc());

    let err = login.login().await.unwrap_err();

    assert_eq!(err.to_string(), "User rejected the request.");
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn siwe_login_test_refused_signature_skips_verification() {
    let mut wallet = MockWallet::new();
    wallet
        .expect_request_accounts()
        .returning(|| Ok("0xDEAD".to_string()));
    wallet
        .expect_sign_message()
        .withf(|message| message.to_string() == EXPECTED_MESSAGE)
        .times(1)
        .returning(|_| Err(WalletError::Rejected("User denied message signature.".into())));
    let transport = happy_transport();
    let login = login_with(Some(Arc::new(wallet)), transport.clone(), SessionStore::new().arc());

    let err = login.login().await.unwrap_err();

    assert_eq!(err.to_string(), "User denied message signature.");
    assert_eq!(transport.paths(), vec!["/auth/siwe/start"]);
}

#[tokio::test]
async fn siwe_login_test_relogin_requests_fresh_nonce() {
    let transport = happy_transport();
    let login = login_with(
        Some(StaticWallet::new("0xDEAD", "0xsig")),
        transport.clone(),
        SessionStore::new().arc(),
    );

    login.login().await.expect("first login");
    login.login().await.expect("second login");

    assert_eq!(
        transport.paths(),
        vec![
            "/auth/siwe/start",
            "/auth/siwe/verify",
            "/auth/siwe/start",
            "/auth/siwe/verify"
        ]
    );
}

#[tokio::test]
async fn siwe_login_test_failed_relogin_clears_previous_session() {
    let session = support::session_with(Role::Financial, "old-token").await;
    let transport = ScriptedTransport::new()
        .ok("/auth/siwe/start", json!({ "nonce": "abc123" }))
        .status("/auth/siwe/verify", 401, "", fallback::VERIFY_SIGNATURE)
        .arc();
    let login = login_with(
        Some(StaticWallet::new("0xDEAD", "0xsig")),
        transport,
        session.clone(),
    );

    let err = login.login().await.unwrap_err();

    assert_eq!(err.to_string(), "Falha ao verificar assinatura");
    assert!(session.current().await.is_none());
}

#[tokio::test]
async fn siwe_login_test_logout_returns_to_disconnected() {
    let session = SessionStore::new().arc();
    let login = login_with(
        Some(StaticWallet::new("0xDEAD", "0xsig")),
        happy_transport(),
        session.clone(),
    );
    let mut states = login.subscribe();

    login.login().await.expect("login");
    login.logout().await;

    assert!(states.has_changed().unwrap());
    assert_eq!(*states.borrow_and_update(), AuthState::Disconnected);
    assert!(!session.is_authenticated().await);
}

#[tokio::test(start_paused = true)]
async fn siwe_login_test_logout_during_verification_discards_the_session() {
    let session = SessionStore::new().arc();
    let transport = ScriptedTransport::new()
        .ok("/auth/siwe/start", json!({ "nonce": "abc123" }))
        .respond("/auth/siwe/verify", |_| {
            (
                Duration::from_millis(100),
                Ok(json!({ "token": "t1", "role": "USER" })),
            )
        })
        .arc();
    let login = Arc::new(login_with(
        Some(StaticWallet::new("0xDEAD", "0xsig")),
        transport,
        session.clone(),
    ));

    let attempt = tokio::spawn({
        let login = login.clone();
        async move { login.login().await }
    });
    tokio::time::sleep(Duration::from_millis(10)).await;
    login.logout().await;

    let result = attempt.await.unwrap();
    assert_eq!(result.unwrap_err(), AuthError::Cancelled);
    assert_eq!(login.state(), AuthState::Disconnected);
    assert!(session.token().await.is_none());
}
