pub mod catalog;
mod errors;
pub mod rental;

pub use errors::{ApplicationError, Result};

use crate::ports::{BookStore, MemberStore, RentalStore};
use std::sync::Arc;

/// サービスの依存関係
///
/// データ構造として定義し、振る舞いは持たない。
/// 各ユースケース関数に引数として明示的に渡す。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub member_store: Arc<dyn MemberStore>,
    pub book_store: Arc<dyn BookStore>,
    pub rental_store: Arc<dyn RentalStore>,
}
