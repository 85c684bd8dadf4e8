//! SeaORM storage tests against in-memory SQLite

mod common;

use common::{entry, Store};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use std::collections::HashMap;
use std::sync::Arc;
use translation_service::config::{Config, DefaultColumnConfig};
use translation_service::contract::*;
use translation_service::domain::repository::{LanguageRepository, TranslationRepository};
use translation_service::domain::Service;
use translation_service::infra::storage::{
    DefaultColumns, SeaOrmLanguageRepository, SeaOrmTranslationRepository, TableColumnWriter,
};
use translation_service::TranslationServiceModule;

async fn connect() -> Arc<DatabaseConnection> {
    // A single connection keeps every query on the same in-memory database
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();

    db.execute_unprepared(
        "CREATE TABLE stores (id INTEGER PRIMARY KEY, name TEXT NOT NULL, address TEXT)",
    )
    .await
    .unwrap();
    db.execute_unprepared("INSERT INTO stores (id, name) VALUES (1, 'Corner Shop'), (2, 'Bakery')")
        .await
        .unwrap();

    Arc::new(db)
}

fn store_columns() -> DefaultColumnConfig {
    DefaultColumnConfig {
        owner: "store".to_string(),
        table: "stores".to_string(),
        id_column: "id".to_string(),
        columns: HashMap::from([
            ("name".to_string(), "name".to_string()),
            ("address".to_string(), "address".to_string()),
        ]),
    }
}

async fn setup() -> (Arc<DatabaseConnection>, Arc<Service>) {
    let db = connect().await;
    let config = Config {
        default_columns: vec![store_columns()],
        ..Config::default()
    };
    let module = TranslationServiceModule::new(config);
    module.init_with_connection(db.clone()).await.unwrap();
    (db, module.service().unwrap())
}

async fn store_name(db: &DatabaseConnection, id: i64) -> String {
    let row = db
        .query_one(sea_orm::Statement::from_string(
            db.get_database_backend(),
            format!("SELECT name FROM stores WHERE id = {}", id),
        ))
        .await
        .unwrap()
        .unwrap();
    row.try_get::<String>("", "name").unwrap()
}

fn store(id: i64) -> OwnerRef {
    OwnerRef::new(OwnerKind::Store, id)
}

#[tokio::test]
async fn migrations_seed_supported_languages() {
    let (_db, service) = setup().await;

    let languages = service.list_languages(false).await.unwrap();
    let codes: Vec<_> = languages.iter().map(|l| l.code.as_str()).collect();
    assert_eq!(codes, vec!["en", "ar", "ckb"]);

    assert!(languages[0].is_default);
    assert_eq!(languages[0].aliases, vec!["eng", "english"]);
    assert_eq!(service.get_language("English").await.unwrap().code, "en");
    assert_eq!(languages[1].direction, TextDirection::Rtl);
    assert!(languages[2].is_fallback);
    assert_eq!(languages[2].aliases, vec!["kurdish", "sorani", "ckb_IQ"]);
}

#[tokio::test]
async fn repeated_upsert_keeps_one_row() {
    let (_db, service) = setup().await;

    for value in ["Z", "Z", "Z2"] {
        service
            .upsert_translations(store(1), vec![entry("ku", "name", value)])
            .await
            .unwrap();
    }

    let rows = service.load_translations(store(1)).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].locale, "ckb");
    assert_eq!(rows[0].value.as_deref(), Some("Z2"));
    assert!(rows[0].updated_at >= rows[0].created_at);
}

#[tokio::test]
async fn default_entries_update_the_owner_table() {
    let (db, service) = setup().await;

    let outcome = service
        .upsert_translations(
            store(2),
            vec![entry("default", "name", "Fresh Bakery"), entry("ar", "name", "مخبز")],
        )
        .await
        .unwrap();
    assert_eq!(outcome.defaults_written, vec!["name".to_string()]);
    assert_eq!(store_name(&db, 2).await, "Fresh Bakery");

    let loaded = service.attach(Store::new(2, "Fresh Bakery")).await.unwrap();
    assert_eq!(loaded.translations().len(), 1);
    assert_eq!(loaded.resolve("name", "ar"), "مخبز");
    assert_eq!(loaded.resolve("name", "kurdish"), "Fresh Bakery");
}

#[tokio::test]
async fn failed_default_write_rolls_back_the_batch() {
    let (db, service) = setup().await;

    service
        .upsert_translations(store(1), vec![entry("ar", "name", "before")])
        .await
        .unwrap();

    // Store 99 has no row, so the base-column update touches nothing
    let err = service
        .upsert_translations(
            store(99),
            vec![entry("ar", "name", "A"), entry("default", "name", "B")],
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TranslationError::BatchFailed { ref key, ref locale, .. } if key == "name" && locale == "default"
    ));
    assert!(service.load_translations(store(99)).await.unwrap().is_empty());

    service
        .upsert_translations(
            store(1),
            vec![entry("ar", "name", "after"), entry("ckb", "name", "K"), entry("default", "name", "")],
        )
        .await
        .unwrap();
    assert_eq!(store_name(&db, 1).await, "");

    let rows = service.load_translations(store(1)).await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn repository_rolls_back_on_unmapped_default_column() {
    let db = connect().await;
    TranslationServiceModule::migrate(&db).await.unwrap();

    let mut defaults = DefaultColumns::new();
    defaults.register(
        OwnerKind::Store,
        Arc::new(TableColumnWriter::new(
            "stores",
            "id",
            HashMap::from([("name".to_string(), "name".to_string())]),
        )),
    );
    let repo = SeaOrmTranslationRepository::with_defaults(db.clone(), defaults);
    assert!(repo.accepts_default(OwnerKind::Store));
    assert!(!repo.accepts_default(OwnerKind::Item));

    let entries = vec![
        TranslationEntry::new("ar", "name", "A"),
        TranslationEntry::new("default", "address", "Somewhere"),
    ];
    let err = repo.upsert_batch(store(1), &entries).await.unwrap_err();
    assert!(err.to_string().contains("address/default"));
    assert!(repo.find_by_owner(store(1)).await.unwrap().is_empty());
}

#[tokio::test]
async fn conflicting_writes_update_in_place() {
    let db = connect().await;
    TranslationServiceModule::migrate(&db).await.unwrap();
    let repo = SeaOrmTranslationRepository::new(db);

    let first = repo
        .upsert_batch(store(1), &[TranslationEntry::new("ar", "name", "A")])
        .await
        .unwrap();
    let original = first.translations[0].clone();

    let second = repo
        .upsert_batch(store(1), &[TranslationEntry::new("ar", "name", "B")])
        .await
        .unwrap();
    let updated = &second.translations[0];
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.created_at, original.created_at);
    assert_eq!(updated.value.as_deref(), Some("B"));

    // Two batches racing on a fresh tuple both commit
    let entries_c = [TranslationEntry::new("ckb", "address", "C")];
    let entries_d = [TranslationEntry::new("ckb", "address", "D")];
    let (c, d) = tokio::join!(
        repo.upsert_batch(store(1), &entries_c),
        repo.upsert_batch(store(1), &entries_d),
    );
    c.unwrap();
    d.unwrap();

    let rows = repo.find_by_owner(store(1)).await.unwrap();
    assert_eq!(rows.len(), 2);
    let address = rows.iter().find(|t| t.key == "address").unwrap();
    assert!(matches!(address.value.as_deref(), Some("C") | Some("D")));
}

#[tokio::test]
async fn loads_are_ordered_and_grouped() {
    let (_db, service) = setup().await;

    service
        .upsert_translations(
            store(1),
            vec![
                entry("ckb", "name", "N-ckb"),
                entry("ar", "name", "N-ar"),
                entry("ckb", "address", "A-ckb"),
            ],
        )
        .await
        .unwrap();
    service
        .upsert_translations(store(2), vec![entry("ar", "name", "B-ar")])
        .await
        .unwrap();
    service
        .upsert_translations(
            OwnerRef::new(OwnerKind::Item, 1),
            vec![entry("ar", "name", "I-ar")],
        )
        .await
        .unwrap();

    let rows = service.load_translations(store(1)).await.unwrap();
    let order: Vec<_> = rows
        .iter()
        .map(|t| (t.key.as_str(), t.locale.as_str()))
        .collect();
    assert_eq!(order, vec![("address", "ckb"), ("name", "ar"), ("name", "ckb")]);

    let grouped = service
        .load_translations_for(OwnerKind::Store, &[1, 2, 3])
        .await
        .unwrap();
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[&1].len(), 3);
    assert_eq!(grouped[&2].len(), 1);
    assert!(grouped[&2].iter().all(|t| t.owner.kind == OwnerKind::Store));
}

#[tokio::test]
async fn purge_deletes_only_one_owner() {
    let (_db, service) = setup().await;

    service
        .upsert_translations(store(1), vec![entry("ar", "name", "A"), entry("ckb", "name", "K")])
        .await
        .unwrap();
    service
        .upsert_translations(store(2), vec![entry("ar", "name", "B")])
        .await
        .unwrap();

    assert_eq!(service.delete_owner_translations(store(1)).await.unwrap(), 2);
    assert!(service.load_translations(store(1)).await.unwrap().is_empty());
    assert_eq!(service.load_translations(store(2)).await.unwrap().len(), 1);
}

#[tokio::test]
async fn language_changes_persist() {
    let db = connect().await;
    TranslationServiceModule::migrate(&db).await.unwrap();
    let repo = SeaOrmLanguageRepository::new(db);

    let mut tr = SupportedLanguage::new("tr", "Turkish");
    tr.sort_order = 4;
    tr.aliases = vec!["turkish".into()];
    let created = repo.create(&tr).await.unwrap();
    assert_eq!(created, tr);

    let updated = repo.set_active("tr", false).await.unwrap().unwrap();
    assert!(!updated.is_active);
    assert!(repo.set_active("xx", false).await.unwrap().is_none());

    let all = repo.list_all().await.unwrap();
    assert_eq!(all.len(), 4);
    let stored = all.iter().find(|l| l.code == "tr").unwrap();
    assert!(!stored.is_active);
}

#[tokio::test]
async fn native_client_exposes_the_service() {
    let db = connect().await;
    let module = TranslationServiceModule::new(Config::default());
    module.init_with_connection(db).await.unwrap();
    let client = module.client().unwrap();

    client
        .upsert_translations(store(1), vec![entry("sorani", "address", "Hewlêr")])
        .await
        .unwrap();
    let rows = client.load_translations(store(1)).await.unwrap();
    assert_eq!(rows[0].locale, "ckb");

    assert_eq!(client.get_language("ckb_IQ").await.unwrap().code, "ckb");
    assert_eq!(client.delete_owner_translations(store(1)).await.unwrap(), 1);
}
