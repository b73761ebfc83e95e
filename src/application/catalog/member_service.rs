use crate::application::{ApplicationError, Result, ServiceDependencies};
use crate::domain::{Member, MemberChanges, NewMember, member, value_objects::MemberId};

/// 全会員を取得する
pub async fn list_members(deps: &ServiceDependencies) -> Result<Vec<Member>> {
    deps.member_store
        .find_all()
        .await
        .map_err(ApplicationError::StoreError)
}

/// IDで会員を取得する
pub async fn get_member(deps: &ServiceDependencies, member_id: MemberId) -> Result<Member> {
    deps.member_store
        .find_by_id(member_id)
        .await
        .map_err(ApplicationError::StoreError)?
        .ok_or(ApplicationError::MemberNotFound)
}

/// 会員を登録する
pub async fn register_member(deps: &ServiceDependencies, new_member: NewMember) -> Result<Member> {
    let member = deps
        .member_store
        .insert(new_member)
        .await
        .map_err(ApplicationError::StoreError)?;

    tracing::info!(member_id = %member.member_id.value(), "member registered");
    Ok(member)
}

/// 会員を部分更新する
pub async fn update_member(
    deps: &ServiceDependencies,
    member_id: MemberId,
    changes: MemberChanges,
) -> Result<Member> {
    let current = get_member(deps, member_id).await?;

    deps.member_store
        .save(member::apply_member_changes(current, changes))
        .await
        .map_err(ApplicationError::StoreError)?
        .ok_or(ApplicationError::MemberNotFound)
}

/// 会員を削除する
///
/// 会員を参照しているレンタルは残り、参照解決時に `None` となる。
pub async fn remove_member(deps: &ServiceDependencies, member_id: MemberId) -> Result<()> {
    let deleted = deps
        .member_store
        .delete_by_id(member_id)
        .await
        .map_err(ApplicationError::StoreError)?;

    if !deleted {
        return Err(ApplicationError::MemberNotFound);
    }

    tracing::info!(member_id = %member_id.value(), "member removed");
    Ok(())
}
