use crate::domain::{Member, NewMember, Penalty, value_objects::MemberId};
use crate::ports::member_store::{MemberStore as MemberStoreTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::str::FromStr;

/// PostgreSQLの行データをMemberに変換する
///
/// `prefix` はJOIN時の列名の接頭辞（例: `m_`）。単表の場合は空文字。
pub(super) fn map_row_to_member(row: &PgRow, prefix: &str) -> Result<Member> {
    let column = |name: &str| format!("{}{}", prefix, name);

    let penalty_str: String = row.get(column("penalty").as_str());
    let penalty = Penalty::from_str(&penalty_str).map_err(|e| {
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(Member {
        member_id: MemberId::from_uuid(row.get(column("member_id").as_str())),
        code: row.get(column("code").as_str()),
        name: row.get(column("name").as_str()),
        email: row.get(column("email").as_str()),
        penalty,
    })
}

/// MemberStoreのPostgreSQL実装
pub struct MemberStore {
    pool: PgPool,
}

impl MemberStore {
    /// PostgreSQLコネクションプールから新しいMemberStoreを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberStoreTrait for MemberStore {
    async fn find_all(&self) -> Result<Vec<Member>> {
        let rows = sqlx::query(
            r#"
            SELECT member_id, code, name, email, penalty
            FROM members
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(|row| map_row_to_member(row, "")).collect()
    }

    async fn find_by_id(&self, member_id: MemberId) -> Result<Option<Member>> {
        let row = sqlx::query(
            r#"
            SELECT member_id, code, name, email, penalty
            FROM members
            WHERE member_id = $1
            "#,
        )
        .bind(member_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref()
            .map(|row| map_row_to_member(row, ""))
            .transpose()
    }

    /// IDはgen_random_uuid()で採番する
    async fn insert(&self, member: NewMember) -> Result<Member> {
        let row = sqlx::query(
            r#"
            INSERT INTO members (code, name, email, penalty)
            VALUES ($1, $2, $3, $4)
            RETURNING member_id, code, name, email, penalty
            "#,
        )
        .bind(&member.code)
        .bind(&member.name)
        .bind(&member.email)
        .bind(member.penalty.as_str())
        .fetch_one(&self.pool)
        .await?;

        map_row_to_member(&row, "")
    }

    async fn save(&self, member: Member) -> Result<Option<Member>> {
        let row = sqlx::query(
            r#"
            UPDATE members
            SET code = $2, name = $3, email = $4, penalty = $5
            WHERE member_id = $1
            RETURNING member_id, code, name, email, penalty
            "#,
        )
        .bind(member.member_id.value())
        .bind(&member.code)
        .bind(&member.name)
        .bind(&member.email)
        .bind(member.penalty.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref()
            .map(|row| map_row_to_member(row, ""))
            .transpose()
    }

    async fn delete_by_id(&self, member_id: MemberId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM members WHERE member_id = $1")
            .bind(member_id.value())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
