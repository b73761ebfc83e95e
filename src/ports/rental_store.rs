use crate::domain::{
    Book, Member, NewRental, Rental,
    value_objects::{MemberId, RentalId},
};
use async_trait::async_trait;
use chrono::NaiveDate;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 参照解決済みレンタルビュー
///
/// 会員・書籍のIDを完全なレコードに置き換えた読み取り用の表現。
/// 参照先が削除済みの場合は `None` になる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalView {
    pub rental_id: RentalId,
    pub member: Option<Member>,
    pub book: Option<Book>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// レンタルストアポート
#[async_trait]
pub trait RentalStore: Send + Sync {
    /// 全レンタルを取得する（参照は未解決）
    async fn find_all(&self) -> Result<Vec<Rental>>;

    /// IDでレンタルを取得する（参照は未解決）
    async fn find_by_id(&self, rental_id: RentalId) -> Result<Option<Rental>>;

    /// 会員のレンタル件数を数える
    ///
    /// レンタル上限（会員ごと最大2件）の確認に使用される。
    /// 件数取得と挿入はアトミックではない。
    async fn count_by_member(&self, member_id: MemberId) -> Result<u64>;

    /// レンタルを新規作成し、採番済みのレコードを返す
    async fn insert(&self, rental: NewRental) -> Result<Rental>;

    /// 既存のレンタルを上書き保存する。対象が存在しない場合は `None`
    async fn save(&self, rental: Rental) -> Result<Option<Rental>>;

    /// レンタルを削除する。削除した場合は `true`
    async fn delete_by_id(&self, rental_id: RentalId) -> Result<bool>;

    /// 全レンタルを参照解決して取得する
    async fn find_all_resolved(&self) -> Result<Vec<RentalView>>;

    /// IDでレンタルを参照解決して取得する
    async fn find_resolved_by_id(&self, rental_id: RentalId) -> Result<Option<RentalView>>;
}
