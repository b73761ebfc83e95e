pub mod book_store;
pub mod member_store;
pub mod rental_store;

pub use book_store::BookStore;
pub use member_store::MemberStore;
pub use rental_store::{RentalStore, RentalView};
