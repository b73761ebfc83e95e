use crate::application::{ApplicationError, Result, ServiceDependencies};
use crate::domain::{
    self, Rental,
    commands::{CloseRental, OpenRental, UpdateRental},
    value_objects::RentalId,
};
use crate::ports::RentalView;

/// レンタル終了の結果
///
/// 削除済みのレコードをそのまま保持する。削除後にストアを再読込しても
/// 取得できる保証はないため、ペナルティ判定はこの値から行う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalClosed {
    pub rental: Rental,
    pub elapsed_days: u64,
    pub penalty_applied: bool,
}

/// レンタルを開始する
///
/// ビジネスルール：
/// - 会員と書籍が存在すること
/// - 終了日が開始日以降であること
/// - 会員の既存レンタルが2件未満であること
///
/// 失敗時は書き込みを一切行わない。
///
/// # 一貫性保証
///
/// 件数確認と挿入はアトミックではない。同一会員への同時リクエストが
/// どちらも件数1を観測した場合、両方が挿入され3件以上になり得る。
pub async fn open_rental(deps: &ServiceDependencies, cmd: OpenRental) -> Result<Rental> {
    // 1. 会員・書籍の存在確認
    let member = deps
        .member_store
        .find_by_id(cmd.member_id)
        .await
        .map_err(ApplicationError::StoreError)?;
    let book = deps
        .book_store
        .find_by_id(cmd.book_id)
        .await
        .map_err(ApplicationError::StoreError)?;

    if member.is_none() || book.is_none() {
        tracing::debug!(
            member_id = %cmd.member_id.value(),
            book_id = %cmd.book_id.value(),
            "rejecting rental: member or book missing"
        );
        return Err(ApplicationError::MemberOrBookNotFound);
    }

    // 2. 期間の検証
    let new_rental = domain::rental::open_rental(&cmd)
        .map_err(|e| ApplicationError::Validation(e.to_string()))?;

    // 3. レンタル上限確認（2件まで）
    let active_rentals = deps
        .rental_store
        .count_by_member(cmd.member_id)
        .await
        .map_err(ApplicationError::StoreError)?;

    if domain::rental::has_reached_rental_limit(active_rentals) {
        tracing::debug!(
            member_id = %cmd.member_id.value(),
            active_rentals,
            "rejecting rental: limit reached"
        );
        return Err(ApplicationError::RentalLimitExceeded);
    }

    // 4. 保存
    let rental = deps
        .rental_store
        .insert(new_rental)
        .await
        .map_err(ApplicationError::StoreError)?;

    tracing::info!(
        rental_id = %rental.rental_id.value(),
        member_id = %rental.member_id.value(),
        book_id = %rental.book_id.value(),
        "rental opened"
    );

    Ok(rental)
}

/// レンタルを更新する
///
/// 指定されたフィールドのみ上書きする。会員・書籍の存在確認と
/// レンタル上限の再チェックは行わない（開始時のみ）。
pub async fn update_rental(deps: &ServiceDependencies, cmd: UpdateRental) -> Result<RentalView> {
    let rental = deps
        .rental_store
        .find_by_id(cmd.rental_id)
        .await
        .map_err(ApplicationError::StoreError)?
        .ok_or(ApplicationError::RentalNotFound)?;

    let updated = domain::rental::apply_rental_changes(rental, cmd.changes)
        .map_err(|e| ApplicationError::Validation(e.to_string()))?;

    deps.rental_store
        .save(updated)
        .await
        .map_err(ApplicationError::StoreError)?
        .ok_or(ApplicationError::RentalNotFound)?;

    get_rental(deps, cmd.rental_id).await
}

/// レンタルを終了する（返却）
///
/// 手順:
/// 1. レンタルを削除する
/// 2. 終了日と終了時刻の差を日数（切り上げ）で求める
/// 3. 7日を超える場合、会員のペナルティを `Flagged` にする
///
/// 同じIDで2回呼んだ場合、2回目は `RentalNotFound` となりペナルティは再適用されない。
pub async fn close_rental(deps: &ServiceDependencies, cmd: CloseRental) -> Result<RentalClosed> {
    let rental = deps
        .rental_store
        .find_by_id(cmd.rental_id)
        .await
        .map_err(ApplicationError::StoreError)?
        .ok_or(ApplicationError::RentalNotFound)?;

    // 1. 削除（並行して削除された場合はNotFound）
    let deleted = deps
        .rental_store
        .delete_by_id(cmd.rental_id)
        .await
        .map_err(ApplicationError::StoreError)?;

    if !deleted {
        return Err(ApplicationError::RentalNotFound);
    }

    // 2. 経過日数
    let elapsed_days = domain::rental::elapsed_days(rental.end_date, cmd.closed_at);

    // 3. ペナルティ判定
    let mut penalty_applied = false;
    if domain::rental::is_late_return(&rental, cmd.closed_at) {
        penalty_applied = apply_late_penalty(deps, &rental).await?;
    }

    tracing::info!(
        rental_id = %rental.rental_id.value(),
        elapsed_days,
        penalty_applied,
        "rental closed"
    );

    Ok(RentalClosed {
        rental,
        elapsed_days,
        penalty_applied,
    })
}

async fn apply_late_penalty(deps: &ServiceDependencies, rental: &Rental) -> Result<bool> {
    let member = deps
        .member_store
        .find_by_id(rental.member_id)
        .await
        .map_err(ApplicationError::StoreError)?;

    let Some(member) = member else {
        tracing::warn!(
            member_id = %rental.member_id.value(),
            "late return for a member that no longer exists, skipping penalty"
        );
        return Ok(false);
    };

    let saved = deps
        .member_store
        .save(domain::member::flag_penalty(member))
        .await
        .map_err(ApplicationError::StoreError)?;

    if saved.is_some() {
        tracing::info!(member_id = %rental.member_id.value(), "member flagged for late return");
    }

    Ok(saved.is_some())
}

/// 全レンタルを参照解決して取得する
pub async fn list_rentals(deps: &ServiceDependencies) -> Result<Vec<RentalView>> {
    deps.rental_store
        .find_all_resolved()
        .await
        .map_err(ApplicationError::StoreError)
}

/// IDでレンタルを参照解決して取得する
pub async fn get_rental(deps: &ServiceDependencies, rental_id: RentalId) -> Result<RentalView> {
    deps.rental_store
        .find_resolved_by_id(rental_id)
        .await
        .map_err(ApplicationError::StoreError)?
        .ok_or(ApplicationError::RentalNotFound)
}
