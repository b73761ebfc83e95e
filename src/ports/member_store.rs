use crate::domain::{Member, NewMember, value_objects::MemberId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 会員ストアポート
///
/// 会員レコードの永続化を抽象化する。IDは挿入時にストアが採番する。
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// 全会員を取得する
    async fn find_all(&self) -> Result<Vec<Member>>;

    /// IDで会員を取得する
    async fn find_by_id(&self, member_id: MemberId) -> Result<Option<Member>>;

    /// 会員を新規作成し、採番済みのレコードを返す
    async fn insert(&self, member: NewMember) -> Result<Member>;

    /// 既存の会員を上書き保存する
    ///
    /// 対象が存在しない場合は `None` を返す。
    async fn save(&self, member: Member) -> Result<Option<Member>>;

    /// 会員を削除する。削除した場合は `true`
    async fn delete_by_id(&self, member_id: MemberId) -> Result<bool>;
}
