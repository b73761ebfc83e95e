pub mod book_store;
pub mod member_store;
pub mod rental_store;

// パブリックに型を再エクスポート
pub use book_store::BookStore as PostgresBookStore;
pub use member_store::MemberStore as PostgresMemberStore;
pub use rental_store::RentalStore as PostgresRentalStore;
