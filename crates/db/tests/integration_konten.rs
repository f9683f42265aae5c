//! Integration-Tests fuer das KontoRepository (In-Memory SQLite)

use gobar_db::{DbError, KontoRepository, NeuesKonto, SqliteDb};

async fn db() -> SqliteDb {
    SqliteDb::in_memory()
        .await
        .expect("In-Memory DB konnte nicht erstellt werden")
}

fn konto<'a>(name: &'a str, email: &'a str) -> NeuesKonto<'a> {
    NeuesKonto {
        name,
        email,
        password_hash: "$argon2id$platzhalter",
    }
}

#[tokio::test]
async fn konto_erstellen_und_laden() {
    let db = db().await;

    let erstellt = db
        .erstellen(konto("Ada", "ada@example.com"))
        .await
        .unwrap();
    assert_eq!(erstellt.name, "Ada");
    assert_eq!(erstellt.email, "ada@example.com");

    let geladen = db
        .laden_nach_email("ada@example.com")
        .await
        .unwrap()
        .expect("Konto muss auffindbar sein");
    assert_eq!(geladen.id, erstellt.id);
    assert_eq!(geladen.password_hash, "$argon2id$platzhalter");
    assert_eq!(geladen.created_at, erstellt.created_at);
}

#[tokio::test]
async fn lookup_ist_exakter_byte_vergleich() {
    let db = db().await;
    db.erstellen(konto("Ada", "Ada@Example.com")).await.unwrap();

    // Keine Normalisierung: andere Schreibweise findet nichts
    assert!(db
        .laden_nach_email("ada@example.com")
        .await
        .unwrap()
        .is_none());
    assert!(db
        .laden_nach_email("Ada@Example.com")
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn doppelte_email_verletzt_eindeutigkeit() {
    let db = db().await;

    db.erstellen(konto("Erste", "doppelt@example.com"))
        .await
        .unwrap();

    let ergebnis = db.erstellen(konto("Zweite", "doppelt@example.com")).await;
    match ergebnis {
        Err(e) => assert!(e.ist_eindeutigkeit(), "erwartet Eindeutigkeit, war: {e}"),
        Ok(_) => panic!("zweiter Insert derselben E-Mail darf nicht gelingen"),
    }

    // Genau ein Konto gespeichert
    assert_eq!(db.anzahl().await.unwrap(), 1);
}

#[tokio::test]
async fn unbekannte_email_gibt_none() {
    let db = db().await;
    assert!(db
        .laden_nach_email("niemand@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn eindeutigkeit_erkennung_auf_sqlx_fehler() {
    // ist_eindeutigkeit greift auch auf rohen SQLx-Fehlern mit UNIQUE-Code
    let db = db().await;
    db.erstellen(konto("A", "x@y.z")).await.unwrap();

    let roh = sqlx::query("INSERT INTO konten (id, name, email, password_hash, created_at) VALUES ('i', 'B', 'x@y.z', 'h', 'c')")
        .execute(db.pool())
        .await
        .expect_err("UNIQUE-Verletzung erwartet");
    assert!(DbError::Sqlx(roh).ist_eindeutigkeit());
}
