use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{
    Book, BookChanges, Member, MemberChanges, NewBook, NewMember, Penalty, Rental, RentalChanges,
    book::DEFAULT_STOCK,
    commands::OpenRental,
    value_objects::{BookId, MemberId},
};
use crate::ports::RentalView;

// ============================================================================
// Rental (sewa)
// ============================================================================

/// レンタル作成リクエスト（POST /sewa）
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRentalRequest {
    pub member_id: Uuid,
    pub book_id: Uuid,
    #[schema(value_type = String, format = Date, example = "2023-06-01")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2023-06-15")]
    pub end_date: NaiveDate,
}

impl CreateRentalRequest {
    pub fn to_command(&self) -> OpenRental {
        OpenRental {
            member_id: MemberId::from_uuid(self.member_id),
            book_id: BookId::from_uuid(self.book_id),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// レンタル更新リクエスト（PUT /sewa/:id）
///
/// 省略またはnullのフィールドは変更しない。
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRentalRequest {
    pub member_id: Option<Uuid>,
    pub book_id: Option<Uuid>,
    #[schema(value_type = Option<String>, format = Date)]
    pub start_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub end_date: Option<NaiveDate>,
}

impl UpdateRentalRequest {
    pub fn to_changes(&self) -> RentalChanges {
        RentalChanges {
            member_id: self.member_id.map(MemberId::from_uuid),
            book_id: self.book_id.map(BookId::from_uuid),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// レンタルレスポンス（参照未解決）
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalResponse {
    pub id: Uuid,
    pub member_id: Uuid,
    pub book_id: Uuid,
    #[schema(value_type = String, format = Date)]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub end_date: NaiveDate,
}

impl From<Rental> for RentalResponse {
    fn from(rental: Rental) -> Self {
        Self {
            id: rental.rental_id.value(),
            member_id: rental.member_id.value(),
            book_id: rental.book_id.value(),
            start_date: rental.start_date,
            end_date: rental.end_date,
        }
    }
}

/// 参照解決済みレンタルレスポンス（GET /sewa, GET /sewa/:id）
///
/// 参照先が削除済みの場合、`member` / `book` は null になる。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalViewResponse {
    pub id: Uuid,
    pub member: Option<MemberResponse>,
    pub book: Option<BookResponse>,
    #[schema(value_type = String, format = Date)]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub end_date: NaiveDate,
}

impl From<RentalView> for RentalViewResponse {
    fn from(view: RentalView) -> Self {
        Self {
            id: view.rental_id.value(),
            member: view.member.map(MemberResponse::from),
            book: view.book.map(BookResponse::from),
            start_date: view.start_date,
            end_date: view.end_date,
        }
    }
}

// ============================================================================
// Member
// ============================================================================

/// 会員作成リクエスト
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, message = "code must not be empty"))]
    pub code: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    pub penalty: Option<Penalty>,
}

impl CreateMemberRequest {
    pub fn into_new_member(self) -> NewMember {
        NewMember {
            code: self.code,
            name: self.name,
            email: self.email,
            penalty: self.penalty.unwrap_or_default(),
        }
    }
}

/// 会員更新リクエスト
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    #[validate(length(min = 1, message = "code must not be empty"))]
    pub code: Option<String>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    pub penalty: Option<Penalty>,
}

impl UpdateMemberRequest {
    pub fn into_changes(self) -> MemberChanges {
        MemberChanges {
            code: self.code,
            name: self.name,
            email: self.email,
            penalty: self.penalty,
        }
    }
}

/// 会員レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub email: Option<String>,
    pub penalty: Penalty,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.member_id.value(),
            code: member.code,
            name: member.name,
            email: member.email,
            penalty: member.penalty,
        }
    }
}

// ============================================================================
// Book
// ============================================================================

/// 書籍作成リクエスト
///
/// stock省略時は1。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    #[validate(length(min = 1, message = "code must not be empty"))]
    pub code: String,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: String,
    #[validate(range(min = 0, max = 4294967295_i64, message = "stock must not be negative"))]
    pub stock: Option<i64>,
}

impl CreateBookRequest {
    /// `validate()` 済みであることを前提とする
    pub fn into_new_book(self) -> NewBook {
        NewBook {
            code: self.code,
            title: self.title,
            author: self.author,
            stock: self.stock.map(clamp_stock).unwrap_or(DEFAULT_STOCK),
        }
    }
}

/// 書籍更新リクエスト
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    #[validate(length(min = 1, message = "code must not be empty"))]
    pub code: Option<String>,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: Option<String>,
    #[validate(range(min = 0, max = 4294967295_i64, message = "stock must not be negative"))]
    pub stock: Option<i64>,
}

impl UpdateBookRequest {
    pub fn into_changes(self) -> BookChanges {
        BookChanges {
            code: self.code,
            title: self.title,
            author: self.author,
            stock: self.stock.map(clamp_stock),
        }
    }
}

fn clamp_stock(stock: i64) -> u32 {
    stock.clamp(0, u32::MAX as i64) as u32
}

/// 書籍レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: Uuid,
    pub code: String,
    pub title: String,
    pub author: String,
    pub stock: u32,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.book_id.value(),
            code: book.code,
            title: book.title,
            author: book.author,
            stock: book.stock,
        }
    }
}

// ============================================================================
// Error
// ============================================================================

/// エラーレスポンス
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
