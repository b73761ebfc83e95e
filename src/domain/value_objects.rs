use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// レンタルID - レンタル（sewa）レコードの識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RentalId(Uuid);

impl RentalId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for RentalId {
    fn default() -> Self {
        Self::new()
    }
}

/// 書籍ID - 書籍レコードへの参照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookId(Uuid);

impl BookId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

/// 会員ID - 会員レコードへの参照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(Uuid);

impl MemberId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

/// ペナルティフラグ
///
/// 延滞返却の履歴を示す。レンタルワークフローは `Flagged` への変更のみ行い、
/// 解除は会員の更新操作でしか行われない。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Penalty {
    /// ペナルティなし
    #[default]
    None,
    /// 延滞返却あり
    Flagged,
}

impl Penalty {
    /// 文字列表現を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            Penalty::None => "none",
            Penalty::Flagged => "flagged",
        }
    }

    pub fn is_flagged(&self) -> bool {
        matches!(self, Penalty::Flagged)
    }
}

impl std::str::FromStr for Penalty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Penalty::None),
            "flagged" => Ok(Penalty::Flagged),
            _ => Err(format!("Invalid penalty: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_rental_id_creation() {
        let id1 = RentalId::new();
        let id2 = RentalId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_rental_id_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = RentalId::from_uuid(uuid);
        assert_eq!(id.value(), uuid);
    }

    #[test]
    fn test_member_id_creation() {
        let id1 = MemberId::new();
        let id2 = MemberId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_book_id_from_uuid() {
        let uuid = Uuid::new_v4();
        assert_eq!(BookId::from_uuid(uuid).value(), uuid);
    }

    #[test]
    fn test_penalty_defaults_to_none() {
        assert_eq!(Penalty::default(), Penalty::None);
        assert!(!Penalty::default().is_flagged());
    }

    #[test]
    fn test_penalty_round_trips_through_str() {
        for penalty in [Penalty::None, Penalty::Flagged] {
            assert_eq!(Penalty::from_str(penalty.as_str()), Ok(penalty));
        }
    }

    #[test]
    fn test_penalty_from_str_rejects_unknown() {
        assert!(Penalty::from_str("t").is_err());
        assert!(Penalty::from_str("").is_err());
    }

    #[test]
    fn test_penalty_serializes_lowercase() {
        let json = serde_json::to_string(&Penalty::Flagged).unwrap();
        assert_eq!(json, "\"flagged\"");
    }
}
