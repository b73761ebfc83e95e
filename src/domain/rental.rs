use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, MemberId, RentalId, RentalPeriodError, commands::OpenRental};

/// 会員1人あたりの同時レンタル上限
pub const MAX_ACTIVE_RENTALS: u64 = 2;

/// 返却の猶予日数。これを超えるとペナルティ対象
pub const LATE_RETURN_GRACE_DAYS: u64 = 7;

const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// レンタル（sewa）- 1人の会員と1冊の書籍を期間で結び付ける
///
/// ライフサイクル: 作成 → (更新) → 終了（削除）。
/// 「返却済みだが未削除」という状態は存在しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rental {
    pub rental_id: RentalId,
    pub member_id: MemberId,
    pub book_id: BookId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// 新規レンタル（IDはストアが採番する）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRental {
    pub member_id: MemberId,
    pub book_id: BookId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// レンタルの部分更新
///
/// 会員・書籍の存在確認やレンタル上限の再チェックは行わない。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalChanges {
    pub member_id: Option<MemberId>,
    pub book_id: Option<BookId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

fn check_period(start_date: NaiveDate, end_date: NaiveDate) -> Result<(), RentalPeriodError> {
    if end_date < start_date {
        return Err(RentalPeriodError::EndDateBeforeStartDate);
    }
    Ok(())
}

/// 純粋関数：レンタルを開始する
///
/// 期間の整合性のみを検証する。会員・書籍の存在と上限はアプリケーション層で確認する。
pub fn open_rental(cmd: &OpenRental) -> Result<NewRental, RentalPeriodError> {
    check_period(cmd.start_date, cmd.end_date)?;

    Ok(NewRental {
        member_id: cmd.member_id,
        book_id: cmd.book_id,
        start_date: cmd.start_date,
        end_date: cmd.end_date,
    })
}

/// 会員が既にレンタル上限に達しているか
pub fn has_reached_rental_limit(active_rentals: u64) -> bool {
    active_rentals >= MAX_ACTIVE_RENTALS
}

/// 純粋関数：レンタルに部分更新を適用する
pub fn apply_rental_changes(
    rental: Rental,
    changes: RentalChanges,
) -> Result<Rental, RentalPeriodError> {
    let updated = Rental {
        member_id: changes.member_id.unwrap_or(rental.member_id),
        book_id: changes.book_id.unwrap_or(rental.book_id),
        start_date: changes.start_date.unwrap_or(rental.start_date),
        end_date: changes.end_date.unwrap_or(rental.end_date),
        ..rental
    };

    check_period(updated.start_date, updated.end_date)?;
    Ok(updated)
}

/// 終了日（UTC 0時）と指定時刻の差を日数で返す（切り上げ）
///
/// 差は絶対値で扱うため、終了日より前の返却も日数としてカウントされる。
pub fn elapsed_days(end_date: NaiveDate, at: DateTime<Utc>) -> u64 {
    let end = end_date.and_time(NaiveTime::MIN).and_utc();
    let millis = at.signed_duration_since(end).num_milliseconds().unsigned_abs();
    millis.div_ceil(MILLIS_PER_DAY)
}

/// 延滞返却か判定する
pub fn is_late_return(rental: &Rental, closed_at: DateTime<Utc>) -> bool {
    elapsed_days(rental.end_date, closed_at) > LATE_RETURN_GRACE_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn rental_ending(end_date: NaiveDate) -> Rental {
        Rental {
            rental_id: RentalId::new(),
            member_id: MemberId::new(),
            book_id: BookId::new(),
            start_date: date(2023, 5, 20),
            end_date,
        }
    }

    #[test]
    fn test_open_rental_copies_command_fields() {
        let cmd = OpenRental {
            member_id: MemberId::new(),
            book_id: BookId::new(),
            start_date: date(2023, 6, 1),
            end_date: date(2023, 6, 15),
        };

        let new_rental = open_rental(&cmd).unwrap();

        assert_eq!(new_rental.member_id, cmd.member_id);
        assert_eq!(new_rental.book_id, cmd.book_id);
        assert_eq!(new_rental.start_date, cmd.start_date);
        assert_eq!(new_rental.end_date, cmd.end_date);
    }

    #[test]
    fn test_open_rental_accepts_single_day_period() {
        let cmd = OpenRental {
            member_id: MemberId::new(),
            book_id: BookId::new(),
            start_date: date(2023, 6, 1),
            end_date: date(2023, 6, 1),
        };
        assert!(open_rental(&cmd).is_ok());
    }

    #[test]
    fn test_open_rental_rejects_end_before_start() {
        let cmd = OpenRental {
            member_id: MemberId::new(),
            book_id: BookId::new(),
            start_date: date(2023, 6, 15),
            end_date: date(2023, 6, 1),
        };
        assert_eq!(
            open_rental(&cmd),
            Err(RentalPeriodError::EndDateBeforeStartDate)
        );
    }

    #[test]
    fn test_rental_limit_boundaries() {
        assert!(!has_reached_rental_limit(0));
        assert!(!has_reached_rental_limit(1));
        assert!(has_reached_rental_limit(2));
        assert!(has_reached_rental_limit(3));
    }

    #[test]
    fn test_apply_rental_changes_keeps_omitted_fields() {
        let rental = rental_ending(date(2023, 6, 15));
        let new_book = BookId::new();
        let changes = RentalChanges {
            book_id: Some(new_book),
            ..Default::default()
        };

        let updated = apply_rental_changes(rental.clone(), changes).unwrap();

        assert_eq!(updated.rental_id, rental.rental_id);
        assert_eq!(updated.member_id, rental.member_id);
        assert_eq!(updated.book_id, new_book);
        assert_eq!(updated.start_date, rental.start_date);
        assert_eq!(updated.end_date, rental.end_date);
    }

    #[test]
    fn test_apply_rental_changes_rejects_inverted_period() {
        let rental = rental_ending(date(2023, 6, 15));
        let changes = RentalChanges {
            end_date: Some(date(2023, 5, 1)),
            ..Default::default()
        };
        assert_eq!(
            apply_rental_changes(rental, changes),
            Err(RentalPeriodError::EndDateBeforeStartDate)
        );
    }

    #[test]
    fn test_elapsed_days_rounds_up_partial_days() {
        let end = date(2023, 6, 1);
        assert_eq!(elapsed_days(end, at(2023, 6, 1)), 0);
        assert_eq!(elapsed_days(end, at(2023, 6, 1) + Duration::hours(1)), 1);
        assert_eq!(elapsed_days(end, at(2023, 6, 10)), 9);
        assert_eq!(
            elapsed_days(end, at(2023, 6, 10) + Duration::hours(12)),
            10
        );
    }

    #[test]
    fn test_elapsed_days_uses_absolute_difference() {
        let end = date(2023, 6, 15);
        assert_eq!(elapsed_days(end, at(2023, 6, 5)), 10);
    }

    #[test]
    fn test_is_late_return_nine_days_after_end() {
        let rental = rental_ending(date(2023, 6, 1));
        assert!(is_late_return(&rental, at(2023, 6, 10)));
    }

    #[test]
    fn test_is_late_return_four_days_after_end() {
        let rental = rental_ending(date(2023, 6, 1));
        assert!(!is_late_return(&rental, at(2023, 6, 5)));
    }

    #[test]
    fn test_is_late_return_grace_boundary() {
        let rental = rental_ending(date(2023, 6, 1));
        // ちょうど7日は猶予内
        assert!(!is_late_return(&rental, at(2023, 6, 8)));
        assert!(is_late_return(
            &rental,
            at(2023, 6, 8) + Duration::milliseconds(1)
        ));
    }

    #[test]
    fn test_is_late_return_counts_early_close_far_before_end() {
        let rental = rental_ending(date(2023, 6, 15));
        assert!(is_late_return(&rental, at(2023, 6, 1)));
        assert!(!is_late_return(&rental, at(2023, 6, 10)));
    }
}
