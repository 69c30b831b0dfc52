//! Integration tests for the PostgreSQL read model.

use chrono::{TimeZone, Utc};
use pawhaven_animal::domain::events::AnimalKind;
use pawhaven_animal::read_model::{AnimalChanges, AnimalReadModel, AnimalRow};
use pawhaven_read_model::{PgAnimalReadModel, PgSponsorshipReadModel};
use pawhaven_sponsorship::read_model::{SponsorshipReadModel, SponsorshipRow};
use sqlx::PgPool;
use uuid::Uuid;

fn make_animal_row(id: Uuid, minute: u32) -> AnimalRow {
    AnimalRow {
        id,
        name: "Rex".to_string(),
        kind: AnimalKind::Dog,
        breed: "Labrador".to_string(),
        photo_url: "https://example.org/rex.jpg".to_string(),
        total_sponsored: 0.0,
        created_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, minute, 0).unwrap(),
    }
}

fn make_sponsorship_row(animal_id: Uuid, user_id: Uuid, minute: u32) -> SponsorshipRow {
    SponsorshipRow {
        id: Uuid::new_v4(),
        animal_id,
        user_id,
        user_email: "sponsor@example.org".to_string(),
        amount: 10.0,
        currency: "USD".to_string(),
        created_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, minute, 0).unwrap(),
    }
}

// --- animals ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_animal_insert_and_find_round_trip(pool: PgPool) {
    let read_model = PgAnimalReadModel::new(pool);
    let id = Uuid::new_v4();

    read_model.insert(make_animal_row(id, 0)).await.unwrap();

    let row = read_model.find(id).await.unwrap().unwrap();
    assert_eq!(row.id, id);
    assert_eq!(row.name, "Rex");
    assert_eq!(row.kind, AnimalKind::Dog);
    assert!((row.total_sponsored - 0.0).abs() < f64::EPSILON);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_animal_apply_changes_patches_present_fields_only(pool: PgPool) {
    let read_model = PgAnimalReadModel::new(pool);
    let id = Uuid::new_v4();
    read_model.insert(make_animal_row(id, 0)).await.unwrap();

    read_model
        .apply_changes(
            id,
            &AnimalChanges {
                name: Some("Rexy".to_string()),
                kind: None,
                breed: None,
                photo_url: None,
            },
        )
        .await
        .unwrap();

    let row = read_model.find(id).await.unwrap().unwrap();
    assert_eq!(row.name, "Rexy");
    assert_eq!(row.breed, "Labrador");
    assert_eq!(row.kind, AnimalKind::Dog);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_animal_remove_deletes_row(pool: PgPool) {
    let read_model = PgAnimalReadModel::new(pool);
    let id = Uuid::new_v4();
    read_model.insert(make_animal_row(id, 0)).await.unwrap();

    read_model.remove(id).await.unwrap();

    assert!(read_model.find(id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_animal_total_sponsored_increments_accumulate(pool: PgPool) {
    let read_model = PgAnimalReadModel::new(pool);
    let id = Uuid::new_v4();
    read_model.insert(make_animal_row(id, 0)).await.unwrap();

    for amount in [10.0, 25.5, 5.0] {
        read_model.add_to_total_sponsored(id, amount).await.unwrap();
    }

    let row = read_model.find(id).await.unwrap().unwrap();
    assert!((row.total_sponsored - 40.5).abs() < f64::EPSILON);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_animal_list_orders_newest_first_and_filters_by_kind(pool: PgPool) {
    let read_model = PgAnimalReadModel::new(pool);
    let older_dog = Uuid::new_v4();
    let newer_dog = Uuid::new_v4();
    let cat = Uuid::new_v4();

    read_model.insert(make_animal_row(older_dog, 0)).await.unwrap();
    read_model.insert(make_animal_row(newer_dog, 30)).await.unwrap();
    let mut cat_row = make_animal_row(cat, 15);
    cat_row.kind = AnimalKind::Cat;
    read_model.insert(cat_row).await.unwrap();

    let all = read_model.list().await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].id, newer_dog);
    assert_eq!(all[2].id, older_dog);

    let dogs = read_model.list_by_kind(AnimalKind::Dog).await.unwrap();
    assert_eq!(dogs.len(), 2);
    assert_eq!(dogs[0].id, newer_dog);
    assert_eq!(dogs[1].id, older_dog);
}

// --- sponsorships ---

#[sqlx::test(migrations = "../../migrations")]
async fn test_sponsorship_insert_and_find_round_trip(pool: PgPool) {
    let read_model = PgSponsorshipReadModel::new(pool);
    let row = make_sponsorship_row(Uuid::new_v4(), Uuid::new_v4(), 0);
    let id = row.id;

    read_model.insert(row).await.unwrap();

    let loaded = read_model.find(id).await.unwrap().unwrap();
    assert_eq!(loaded.user_email, "sponsor@example.org");
    assert!((loaded.amount - 10.0).abs() < f64::EPSILON);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_sponsorship_listings(pool: PgPool) {
    let read_model = PgSponsorshipReadModel::new(pool);
    let animal_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    let early = make_sponsorship_row(animal_id, user_id, 0);
    let late = make_sponsorship_row(animal_id, Uuid::new_v4(), 30);
    let unrelated = make_sponsorship_row(Uuid::new_v4(), user_id, 15);
    read_model.insert(early.clone()).await.unwrap();
    read_model.insert(late.clone()).await.unwrap();
    read_model.insert(unrelated.clone()).await.unwrap();

    let for_animal = read_model.list_for_animal(animal_id).await.unwrap();
    assert_eq!(for_animal.len(), 2);
    assert_eq!(for_animal[0].id, late.id);
    assert_eq!(for_animal[1].id, early.id);

    let for_user = read_model.list_for_user(user_id).await.unwrap();
    assert_eq!(for_user.len(), 2);
    assert_eq!(for_user[0].id, unrelated.id);

    let recent = read_model.list_recent(2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].id, late.id);
}
