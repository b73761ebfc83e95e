use crate::domain::{
    NewRental, Rental,
    value_objects::{BookId, MemberId, RentalId},
};
use crate::ports::rental_store::{RentalStore as RentalStoreTrait, RentalView, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use super::{book_store::map_row_to_book, member_store::map_row_to_member};

/// 参照解決用のSELECT句
///
/// 会員・書籍の列は接頭辞 `m_` / `b_` 付きで取得する。
/// LEFT JOINのため、参照先が削除済みの場合はNULLになる。
const RESOLVED_SELECT: &str = r#"
    SELECT
        r.rental_id,
        r.member_id,
        r.book_id,
        r.start_date,
        r.end_date,
        m.member_id AS m_member_id,
        m.code AS m_code,
        m.name AS m_name,
        m.email AS m_email,
        m.penalty AS m_penalty,
        b.book_id AS b_book_id,
        b.code AS b_code,
        b.title AS b_title,
        b.author AS b_author,
        b.stock AS b_stock
    FROM rentals r
    LEFT JOIN members m ON m.member_id = r.member_id
    LEFT JOIN books b ON b.book_id = r.book_id
"#;

fn map_row_to_rental(row: &PgRow) -> Rental {
    Rental {
        rental_id: RentalId::from_uuid(row.get("rental_id")),
        member_id: MemberId::from_uuid(row.get("member_id")),
        book_id: BookId::from_uuid(row.get("book_id")),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
    }
}

fn map_row_to_rental_view(row: &PgRow) -> Result<RentalView> {
    let resolved_member: Option<Uuid> = row.get("m_member_id");
    let resolved_book: Option<Uuid> = row.get("b_book_id");

    let member = match resolved_member {
        Some(_) => Some(map_row_to_member(row, "m_")?),
        None => None,
    };
    let book = match resolved_book {
        Some(_) => Some(map_row_to_book(row, "b_")?),
        None => None,
    };

    Ok(RentalView {
        rental_id: RentalId::from_uuid(row.get("rental_id")),
        member,
        book,
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
    })
}

/// RentalStoreのPostgreSQL実装
pub struct RentalStore {
    pool: PgPool,
}

impl RentalStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RentalStoreTrait for RentalStore {
    async fn find_all(&self) -> Result<Vec<Rental>> {
        let rows = sqlx::query(
            r#"
            SELECT rental_id, member_id, book_id, start_date, end_date
            FROM rentals
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_row_to_rental).collect())
    }

    async fn find_by_id(&self, rental_id: RentalId) -> Result<Option<Rental>> {
        let row = sqlx::query(
            r#"
            SELECT rental_id, member_id, book_id, start_date, end_date
            FROM rentals
            WHERE rental_id = $1
            "#,
        )
        .bind(rental_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_row_to_rental))
    }

    /// idx_rentals_member_id を使用する
    async fn count_by_member(&self, member_id: MemberId) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rentals WHERE member_id = $1")
            .bind(member_id.value())
            .fetch_one(&self.pool)
            .await?;

        Ok(count.try_into()?)
    }

    async fn insert(&self, rental: NewRental) -> Result<Rental> {
        let row = sqlx::query(
            r#"
            INSERT INTO rentals (member_id, book_id, start_date, end_date)
            VALUES ($1, $2, $3, $4)
            RETURNING rental_id, member_id, book_id, start_date, end_date
            "#,
        )
        .bind(rental.member_id.value())
        .bind(rental.book_id.value())
        .bind(rental.start_date)
        .bind(rental.end_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(map_row_to_rental(&row))
    }

    async fn save(&self, rental: Rental) -> Result<Option<Rental>> {
        let row = sqlx::query(
            r#"
            UPDATE rentals
            SET member_id = $2, book_id = $3, start_date = $4, end_date = $5
            WHERE rental_id = $1
            RETURNING rental_id, member_id, book_id, start_date, end_date
            "#,
        )
        .bind(rental.rental_id.value())
        .bind(rental.member_id.value())
        .bind(rental.book_id.value())
        .bind(rental.start_date)
        .bind(rental.end_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_row_to_rental))
    }

    async fn delete_by_id(&self, rental_id: RentalId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM rentals WHERE rental_id = $1")
            .bind(rental_id.value())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_all_resolved(&self) -> Result<Vec<RentalView>> {
        let sql = format!("{} ORDER BY r.created_at ASC", RESOLVED_SELECT);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.iter().map(map_row_to_rental_view).collect()
    }

    async fn find_resolved_by_id(&self, rental_id: RentalId) -> Result<Option<RentalView>> {
        let sql = format!("{} WHERE r.rental_id = $1", RESOLVED_SELECT);
        let row = sqlx::query(&sql)
            .bind(rental_id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row_to_rental_view).transpose()
    }
}
