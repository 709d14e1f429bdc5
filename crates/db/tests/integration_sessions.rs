//! Integration-Tests fuer SessionRepository (In-Memory SQLite)

use miauw_core::{AccountId, SessionId};
use miauw_db::{Account, AccountRepository, DbError, Session, SessionRepository, SqliteDb};
use uuid::Uuid;

async fn db_mit_konto() -> (SqliteDb, AccountId) {
    let db = SqliteDb::in_memory()
        .await
        .expect("In-Memory DB konnte nicht erstellt werden");
    let konto = Account::neu(AccountId(Uuid::new_v4()), "hash".into());
    AccountRepository::create(&db, &konto).await.unwrap();
    (db, konto.id)
}

#[tokio::test]
async fn session_anlegen() {
    let (db, konto_id) = db_mit_konto().await;

    SessionRepository::create(&db, &Session::neu(SessionId::new(), konto_id))
        .await
        .expect("Session anlegen fehlgeschlagen");
    SessionRepository::create(&db, &Session::neu(SessionId::new(), konto_id))
        .await
        .unwrap();

    assert_eq!(db.session_count_for(konto_id).await.unwrap(), 2);
}

#[tokio::test]
async fn session_fuer_unbekanntes_konto_wird_abgelehnt() {
    let (db, _) = db_mit_konto().await;
    let fremd = AccountId(Uuid::new_v4());

    let ergebnis = SessionRepository::create(&db, &Session::neu(SessionId::new(), fremd)).await;
    assert!(matches!(ergebnis, Err(DbError::NichtGefunden(_))));
    assert_eq!(db.session_count_for(fremd).await.unwrap(), 0);
}

#[tokio::test]
async fn doppelte_session_id_gibt_konflikt() {
    let (db, konto_id) = db_mit_konto().await;
    let session = Session::neu(SessionId::new(), konto_id);

    SessionRepository::create(&db, &session).await.unwrap();
    let ergebnis = SessionRepository::create(&db, &session).await;
    assert!(matches!(ergebnis, Err(DbError::Konflikt(_))));
}
