use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, MemberId, RentalChanges, RentalId};

/// コマンド：レンタルを開始する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenRental {
    pub member_id: MemberId,
    pub book_id: BookId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// コマンド：レンタルを更新する
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRental {
    pub rental_id: RentalId,
    pub changes: RentalChanges,
}

/// コマンド：レンタルを終了する（返却）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseRental {
    pub rental_id: RentalId,
    pub closed_at: DateTime<Utc>,
}
