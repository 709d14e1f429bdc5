//! End-to-End-Tests: Payload -> RequestHandler -> CredentialService -> Store

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use miauw_auth::{Argon2Hasher, CredentialService, HashingParams, UuidSessionIds};
use miauw_core::AccountId;
use miauw_db::{Account, AccountRepository, DbResult, MemoryStore, Session, SessionRepository};
use miauw_worker::{RequestHandler, Response, UserSessionResponse};

const ID: &str = "11111111-1111-1111-1111-111111111111";

fn handler_mit<A, S>(accounts: Arc<A>, sessions: Arc<S>, timeout: Duration) -> RequestHandler<A, S>
where
    A: AccountRepository,
    S: SessionRepository,
{
    let hasher = Argon2Hasher::new(&HashingParams::minimal()).expect("Parameter ungueltig");
    let service = CredentialService::neu(accounts, sessions, Arc::new(hasher), Arc::new(UuidSessionIds))
        .expect("Service-Erstellung fehlgeschlagen");
    RequestHandler::neu(Arc::new(service), timeout)
}

fn handler() -> (RequestHandler<MemoryStore, MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::neu());
    let handler = handler_mit(Arc::clone(&store), Arc::clone(&store), Duration::from_secs(5));
    (handler, store)
}

fn payload(id: &str, passwort: &str) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({ "ID": id, "Password": passwort })).unwrap()
}

fn sid(antwort: &Response) -> String {
    let inhalt = antwort.content.clone().expect("Login-Antwort ohne Inhalt");
    let session: UserSessionResponse = serde_json::from_value(inhalt).unwrap();
    session.sid
}

#[tokio::test]
async fn beispielablauf_erstellen_ablehnen_verifizieren_anmelden() {
    let (handler, store) = handler();

    let erstellt = handler.user_create(&payload(ID, "correct-horse")).await;
    assert_eq!(erstellt.code(), 201);
    assert!(erstellt.content.is_none());

    let abgelehnt = handler.user_login(&payload(ID, "correct-horse")).await;
    assert_eq!(abgelehnt.code(), 403);
    assert_eq!(
        abgelehnt.status.problem_type,
        "https://auth.miauw.social/login/not-verified"
    );

    assert!(store.mark_verified(AccountId::parse(ID).unwrap()).await);

    let erste = handler.user_login(&payload(ID, "correct-horse")).await;
    assert_eq!(erste.code(), 200);
    let zweite = handler.user_login(&payload(ID, "correct-horse")).await;
    assert_eq!(zweite.code(), 200);

    let sid1 = sid(&erste);
    let sid2 = sid(&zweite);
    assert!(!sid1.is_empty());
    assert_ne!(sid1, sid2, "Jeder Login muss eine neue SID liefern");
}

#[tokio::test]
async fn falsches_passwort_gibt_401() {
    let (handler, store) = handler();
    handler.user_create(&payload(ID, "correct-horse")).await;
    store.mark_verified(AccountId::parse(ID).unwrap()).await;

    let antwort = handler.user_login(&payload(ID, "correct-hors3")).await;
    assert_eq!(antwort.code(), 401);
    assert_eq!(antwort.status.title, "Wrong password");
    assert_eq!(
        antwort.status.problem_type,
        "https://auth.miauw.social/login/wrong-password"
    );
    assert_eq!(store.session_count().await, 0);
}

#[tokio::test]
async fn unbekanntes_konto_gibt_dieselbe_antwort_wie_falsches_passwort() {
    let (handler, store) = handler();
    handler.user_create(&payload(ID, "correct-horse")).await;
    store.mark_verified(AccountId::parse(ID).unwrap()).await;

    let falsch = handler.user_login(&payload(ID, "nope")).await;
    let unbekannt = handler
        .user_login(&payload("22222222-2222-2222-2222-222222222222", "nope"))
        .await;
    assert_eq!(falsch, unbekannt);
}

#[tokio::test]
async fn kaputtes_json_gibt_422_ohne_zustandsaenderung() {
    let (handler, store) = handler();

    for roh in [&b"{"[..], b"kein json", b"{\"ID\": 5}", b""] {
        let erstellt = handler.user_create(roh).await;
        assert_eq!(erstellt.code(), 422);
        assert_eq!(erstellt.status.title, "Not processable!");
        assert_eq!(
            erstellt.status.detail,
            "The data send to the worker was not processable."
        );
        assert_eq!(
            erstellt.status.problem_type,
            "https://auth.miauw.social/login/not-processable"
        );

        let login = handler.user_login(roh).await;
        assert_eq!(login.code(), 422);
    }

    assert_eq!(store.account_count().await, 0);
    assert_eq!(store.session_count().await, 0);
}

#[tokio::test]
async fn ungueltige_id_gibt_422_mit_eigenem_typ() {
    let (handler, store) = handler();

    let antwort = handler.user_create(&payload("kein-uuid", "correct-horse")).await;
    assert_eq!(antwort.code(), 422);
    assert_eq!(
        antwort.status.problem_type,
        "https://auth.miauw.social/login/invalid-input"
    );
    assert_eq!(store.account_count().await, 0);
}

#[tokio::test]
async fn doppeltes_konto_gibt_409() {
    let (handler, store) = handler();
    assert_eq!(handler.user_create(&payload(ID, "erstes")).await.code(), 201);
    let hash_vorher = store
        .find_by_id(AccountId::parse(ID).unwrap())
        .await
        .unwrap()
        .unwrap()
        .password_hash;

    let antwort = handler.user_create(&payload(ID, "zweites")).await;
    assert_eq!(antwort.code(), 409);
    assert_eq!(
        antwort.status.problem_type,
        "https://auth.miauw.social/login/conflict"
    );

    let hash_nachher = store
        .find_by_id(AccountId::parse(ID).unwrap())
        .await
        .unwrap()
        .unwrap()
        .password_hash;
    assert_eq!(hash_vorher, hash_nachher);
}

#[tokio::test]
async fn antwort_verraet_keinen_hash() {
    let (handler, store) = handler();
    handler.user_create(&payload(ID, "correct-horse")).await;
    store.mark_verified(AccountId::parse(ID).unwrap()).await;

    let antwort = handler.user_login(&payload(ID, "correct-horse")).await;
    let bytes = antwort.to_bytes().unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(!text.contains("argon2"));
    assert!(!text.contains("correct-horse"));
}

/// Store der jede Anfrage laenger blockiert als das Zeitlimit erlaubt
struct LangsamerStore;

#[async_trait]
impl AccountRepository for LangsamerStore {
    async fn create(&self, _account: &Account) -> DbResult<()> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(())
    }

    async fn find_by_id(&self, _id: AccountId) -> DbResult<Option<Account>> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(None)
    }
}

#[async_trait]
impl SessionRepository for LangsamerStore {
    async fn create(&self, _session: &Session) -> DbResult<()> {
        Ok(())
    }
}

#[tokio::test]
async fn zeitlimit_bricht_operation_ab() {
    let store = Arc::new(LangsamerStore);
    let handler = handler_mit(Arc::clone(&store), store, Duration::from_millis(50));

    let antwort = handler.user_login(&payload(ID, "correct-horse")).await;
    assert_eq!(antwort.code(), 500);
    assert_eq!(
        antwort.status.problem_type,
        "https://auth.miauw.social/login/internal"
    );
}
