use serde::{Deserialize, Serialize};

use super::{MemberId, Penalty};

/// 会員
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub member_id: MemberId,
    pub code: String,
    pub name: String,
    pub email: Option<String>,
    pub penalty: Penalty,
}

/// 新規会員（IDはストアが採番する）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMember {
    pub code: String,
    pub name: String,
    pub email: Option<String>,
    pub penalty: Penalty,
}

/// 会員の部分更新
///
/// `None` のフィールドは既存の値を維持する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberChanges {
    pub code: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub penalty: Option<Penalty>,
}

/// 純粋関数：会員に部分更新を適用する
pub fn apply_member_changes(member: Member, changes: MemberChanges) -> Member {
    Member {
        code: changes.code.unwrap_or(member.code),
        name: changes.name.unwrap_or(member.name),
        email: changes.email.or(member.email),
        penalty: changes.penalty.unwrap_or(member.penalty),
        ..member
    }
}

/// 純粋関数：会員にペナルティを付与する
///
/// 既存の値に関わらず `Flagged` で上書きする。
pub fn flag_penalty(member: Member) -> Member {
    Member {
        penalty: Penalty::Flagged,
        ..member
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_member() -> Member {
        Member {
            member_id: MemberId::new(),
            code: "M001".to_string(),
            name: "Angga".to_string(),
            email: Some("angga@example.com".to_string()),
            penalty: Penalty::None,
        }
    }

    #[test]
    fn test_apply_member_changes_overwrites_given_fields_only() {
        let member = sample_member();
        let changes = MemberChanges {
            name: Some("Ferry".to_string()),
            ..Default::default()
        };

        let updated = apply_member_changes(member.clone(), changes);

        assert_eq!(updated.member_id, member.member_id);
        assert_eq!(updated.name, "Ferry");
        assert_eq!(updated.code, member.code);
        assert_eq!(updated.email, member.email);
        assert_eq!(updated.penalty, Penalty::None);
    }

    #[test]
    fn test_apply_member_changes_with_no_changes_is_identity() {
        let member = sample_member();
        let updated = apply_member_changes(member.clone(), MemberChanges::default());
        assert_eq!(updated, member);
    }

    #[test]
    fn test_apply_member_changes_can_clear_penalty() {
        let member = flag_penalty(sample_member());
        let changes = MemberChanges {
            penalty: Some(Penalty::None),
            ..Default::default()
        };
        assert_eq!(apply_member_changes(member, changes).penalty, Penalty::None);
    }

    #[test]
    fn test_flag_penalty_is_idempotent() {
        let flagged = flag_penalty(sample_member());
        assert_eq!(flagged.penalty, Penalty::Flagged);
        assert_eq!(flag_penalty(flagged.clone()), flagged);
    }
}
