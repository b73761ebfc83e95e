//! PostgreSQLアダプターの統合テスト
//!
//! DATABASE_URLで到達できるデータベースが必要なため、既定では無視される。
//! `cargo test -- --ignored` で実行する。

mod common;

use sewa_rental::adapters::postgres::{
    PostgresBookStore, PostgresMemberStore, PostgresRentalStore,
};
use sewa_rental::domain::value_objects::{BookId, MemberId, Penalty, RentalId};
use sewa_rental::domain::{NewRental, Rental};
use sewa_rental::ports::{BookStore, MemberStore, RentalStore};
use serial_test::serial;
use sqlx::PgPool;

use common::{date, seed_book, seed_member};

/// テストの独立性を保つため、各テスト前にすべてのデータを削除する
async fn cleanup_database(pool: &PgPool) {
    sqlx::query("TRUNCATE TABLE rentals, members, books")
        .execute(pool)
        .await
        .expect("Failed to truncate tables");
}

async fn setup() -> (
    PgPool,
    PostgresMemberStore,
    PostgresBookStore,
    PostgresRentalStore,
) {
    let pool = common::create_test_pool().await;
    cleanup_database(&pool).await;
    (
        pool.clone(),
        PostgresMemberStore::new(pool.clone()),
        PostgresBookStore::new(pool.clone()),
        PostgresRentalStore::new(pool),
    )
}

fn new_rental(member_id: MemberId, book_id: BookId) -> NewRental {
    NewRental {
        member_id,
        book_id,
        start_date: date(2023, 5, 25),
        end_date: date(2023, 6, 1),
    }
}

#[tokio::test]
#[serial]
#[ignore = "requires DATABASE_URL"]
async fn test_member_store_insert_save_delete() {
    let (_pool, members, _, _) = setup().await;

    let member = seed_member(&members, "M001").await;
    assert_eq!(member.penalty, Penalty::None);

    let found = members.find_by_id(member.member_id).await.unwrap();
    assert_eq!(found, Some(member.clone()));

    let flagged = sewa_rental::domain::member::flag_penalty(member.clone());
    let saved = members.save(flagged.clone()).await.unwrap();
    assert_eq!(saved, Some(flagged));

    assert!(members.delete_by_id(member.member_id).await.unwrap());
    assert!(!members.delete_by_id(member.member_id).await.unwrap());
    assert!(members.find_by_id(member.member_id).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
#[ignore = "requires DATABASE_URL"]
async fn test_save_missing_record_returns_none() {
    let (_pool, _, books, rentals) = setup().await;

    let mut book = seed_book(&books, "B001").await;
    BookStore::delete_by_id(&books, book.book_id).await.unwrap();
    book.stock = 3;
    assert!(books.save(book).await.unwrap().is_none());

    let ghost = Rental {
        rental_id: RentalId::new(),
        member_id: MemberId::new(),
        book_id: BookId::new(),
        start_date: date(2023, 5, 25),
        end_date: date(2023, 6, 1),
    };
    assert!(rentals.save(ghost).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
#[ignore = "requires DATABASE_URL"]
async fn test_rental_store_count_by_member() {
    let (_pool, members, books, rentals) = setup().await;
    let member = seed_member(&members, "M001").await;
    let other = seed_member(&members, "M002").await;
    let book = seed_book(&books, "B001").await;

    rentals
        .insert(new_rental(member.member_id, book.book_id))
        .await
        .unwrap();
    rentals
        .insert(new_rental(member.member_id, book.book_id))
        .await
        .unwrap();
    rentals
        .insert(new_rental(other.member_id, book.book_id))
        .await
        .unwrap();

    assert_eq!(rentals.count_by_member(member.member_id).await.unwrap(), 2);
    assert_eq!(rentals.count_by_member(other.member_id).await.unwrap(), 1);
    assert_eq!(rentals.count_by_member(MemberId::new()).await.unwrap(), 0);
}

#[tokio::test]
#[serial]
#[ignore = "requires DATABASE_URL"]
async fn test_rental_store_resolves_references() {
    let (_pool, members, books, rentals) = setup().await;
    let member = seed_member(&members, "M001").await;
    let book = seed_book(&books, "B001").await;

    let rental = rentals
        .insert(new_rental(member.member_id, book.book_id))
        .await
        .unwrap();
    assert_eq!(rental.start_date, date(2023, 5, 25));

    let view = rentals
        .find_resolved_by_id(rental.rental_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(view.member, Some(member.clone()));
    assert_eq!(view.book, Some(book));

    // 会員削除後は参照がNoneになる
    MemberStore::delete_by_id(&members, member.member_id)
        .await
        .unwrap();
    let all = rentals.find_all_resolved().await.unwrap();
    assert_eq!(all.len(), 1);
    assert!(all[0].member.is_none());
    assert!(all[0].book.is_some());
}

#[tokio::test]
#[serial]
#[ignore = "requires DATABASE_URL"]
async fn test_rental_store_update_and_delete() {
    let (_pool, members, books, rentals) = setup().await;
    let member = seed_member(&members, "M001").await;
    let book = seed_book(&books, "B001").await;
    let rental = rentals
        .insert(new_rental(member.member_id, book.book_id))
        .await
        .unwrap();

    let extended = Rental {
        end_date: date(2023, 6, 20),
        ..rental.clone()
    };
    let saved = rentals.save(extended.clone()).await.unwrap();
    assert_eq!(saved, Some(extended.clone()));
    assert_eq!(
        RentalStore::find_by_id(&rentals, rental.rental_id)
            .await
            .unwrap(),
        Some(extended)
    );

    assert!(RentalStore::delete_by_id(&rentals, rental.rental_id)
        .await
        .unwrap());
    assert!(!RentalStore::delete_by_id(&rentals, rental.rental_id)
        .await
        .unwrap());
    assert!(RentalStore::find_all(&rentals).await.unwrap().is_empty());
}
