/// レンタル期間のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RentalPeriodError {
    /// 終了日が開始日より前
    EndDateBeforeStartDate,
}

impl std::fmt::Display for RentalPeriodError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RentalPeriodError::EndDateBeforeStartDate => {
                write!(f, "endDate must not be before startDate")
            }
        }
    }
}
